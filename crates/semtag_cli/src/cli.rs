use std::io::Write;
use std::path::{Path, PathBuf};

use eyre::{Context, OptionExt, Result, bail};
use semtag::{Located, SemanticVersion, StdFs, VersionFileLocator, VersionTemplate};

use crate::settings::Settings;

/// Manage semantic version files.
///
/// Commands other than `init` and `compare` operate on the version file in the
/// start directory or the nearest parent directory that has one.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Directory to start searching from [default: current directory]
    #[arg(short = 'C', long, global = true)]
    pub dir: Option<PathBuf>,
    /// Name of the version file [default: `.semver`]
    #[arg(long, global = true)]
    pub file_name: Option<String>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Create a version file containing `v0.0.0` in the start directory.
    Init {
        /// Overwrite an existing version file.
        #[arg(short, long)]
        force: bool,
    },
    /// Print the version in the form `v1.2.3-special`.
    Tag,
    /// Print the version using a template.
    ///
    /// `%M`, `%m`, and `%p` are the major, minor, and patch numbers. `%s` is
    /// the special string including its leading `-`.
    Format {
        /// Template such as `%M.%m.%p%s`
        template: Option<String>,
    },
    /// Increment part of the version, resetting lower parts and clearing the
    /// special string.
    Inc {
        /// Part to increment
        #[arg(value_enum)]
        part: Part,
    },
    /// Set the special (prerelease) string, or clear it if none is given.
    Special {
        /// Special string such as `alpha.1`
        value: Option<String>,
    },
    /// Compare two versions and print `<`, `=`, or `>`.
    Compare {
        /// First version
        a: String,
        /// Second version
        b: String,
        /// Template used to parse both versions
        #[arg(short, long)]
        template: Option<String>,
        /// Parse missing version numbers as zero.
        #[arg(long)]
        allow_missing: bool,
    },
}

/// Part of a version that can be incremented.
#[derive(clap::ValueEnum, Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Part {
    Major,
    Minor,
    Patch,
}

pub(crate) fn exec(args: Args, settings: &Settings, out: &mut impl Write) -> Result<()> {
    let dir = match args.dir {
        Some(dir) => std::path::absolute(dir)?,
        None => std::env::current_dir().wrap_err("error getting current directory")?,
    };
    let file_name = args.file_name.unwrap_or_else(|| settings.file_name.clone());
    let locator = VersionFileLocator::new(StdFs).with_file_name(file_name);

    match args.subcommand {
        Subcommand::Init { force } => {
            let path = dir.join(locator.file_name());
            if path.exists() && !force {
                bail!("{path:?} already exists; use --force to overwrite it");
            }
            SemanticVersion::default().save(&path)?;
            log::info!("created {path:?}");
            Ok(())
        }

        Subcommand::Tag => {
            let Located { version, .. } = find(&locator, &dir)?;
            writeln!(out, "{version}")?;
            Ok(())
        }

        Subcommand::Format { template } => {
            let Located { version, .. } = find(&locator, &dir)?;
            let template = template.as_deref().unwrap_or(&settings.format);
            writeln!(out, "{}", version.format(template))?;
            Ok(())
        }

        Subcommand::Inc { part } => {
            let Located { path, mut version } = find(&locator, &dir)?;
            increment(&mut version, part)?;
            version.save(&path)?;
            writeln!(out, "{version}")?;
            Ok(())
        }

        Subcommand::Special { value } => {
            let Located { path, mut version } = find(&locator, &dir)?;
            version.special = value.filter(|s| !s.is_empty());
            version.save(&path)?;
            writeln!(out, "{version}")?;
            Ok(())
        }

        Subcommand::Compare {
            a,
            b,
            template,
            allow_missing,
        } => {
            let template = VersionTemplate::new(template.as_deref().unwrap_or(&settings.format));
            let parse = |s: &str| {
                template
                    .parse(s, allow_missing)
                    .wrap_err_with(|| format!("error parsing {s:?} using template `{template}`"))
            };
            let symbol = match parse(&a)?.cmp(&parse(&b)?) {
                std::cmp::Ordering::Less => "<",
                std::cmp::Ordering::Equal => "=",
                std::cmp::Ordering::Greater => ">",
            };
            writeln!(out, "{symbol}")?;
            Ok(())
        }
    }
}

fn find(locator: &VersionFileLocator, dir: &Path) -> Result<Located> {
    locator.find_file(dir)?.ok_or_eyre(format!(
        "no {} found in {dir:?} or any parent directory; run `semtag init` to create one",
        locator.file_name(),
    ))
}

fn increment(version: &mut SemanticVersion, part: Part) -> Result<()> {
    let field = match part {
        Part::Major => &mut version.major,
        Part::Minor => &mut version.minor,
        Part::Patch => &mut version.patch,
    };
    *field = field
        .checked_add(1)
        .ok_or_eyre("version number overflow")?;
    match part {
        Part::Major => {
            version.minor = 0;
            version.patch = 0;
        }
        Part::Minor => version.patch = 0,
        Part::Patch => (),
    }
    version.special = None;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    fn settings() -> Settings {
        Settings {
            file_name: semtag::FILE_NAME.to_owned(),
            format: semtag::TAG_FORMAT.to_owned(),
        }
    }

    fn run(dir: &Path, args: &[&str]) -> Result<String> {
        let dir_str = dir.to_str().unwrap();
        let argv = ["semtag", "-C", dir_str].into_iter().chain(args.iter().copied());
        let args = Args::try_parse_from(argv)?;
        let mut out = vec![];
        exec(args, &settings(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_increment() {
        let mut v = SemanticVersion::new(1, 2, 3).with_special("rc.1");
        increment(&mut v, Part::Patch).unwrap();
        assert_eq!(v, SemanticVersion::new(1, 2, 4));
        increment(&mut v, Part::Minor).unwrap();
        assert_eq!(v, SemanticVersion::new(1, 3, 0));
        increment(&mut v, Part::Major).unwrap();
        assert_eq!(v, SemanticVersion::new(2, 0, 0));

        let mut v = SemanticVersion::new(u64::MAX, 0, 0);
        assert!(increment(&mut v, Part::Major).is_err());
    }

    #[test]
    fn test_workflow() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();

        assert!(run(&nested, &["tag"]).is_err());

        run(root.path(), &["init"]).unwrap();
        assert!(run(root.path(), &["init"]).is_err());
        assert_eq!(run(&nested, &["tag"]).unwrap(), "v0.0.0\n");

        assert_eq!(run(&nested, &["inc", "minor"]).unwrap(), "v0.1.0\n");
        assert_eq!(run(&nested, &["inc", "patch"]).unwrap(), "v0.1.1\n");
        assert_eq!(run(&nested, &["special", "beta.2"]).unwrap(), "v0.1.1-beta.2\n");
        assert_eq!(
            run(&nested, &["format", "%M.%m.%p%s"]).unwrap(),
            "0.1.1-beta.2\n",
        );
        assert_eq!(run(&nested, &["special"]).unwrap(), "v0.1.1\n");
        assert_eq!(run(&nested, &["inc", "major"]).unwrap(), "v1.0.0\n");

        assert_eq!(
            std::fs::read_to_string(root.path().join(".semver")).unwrap(),
            "v1.0.0",
        );

        run(root.path(), &["init", "--force"]).unwrap();
        assert_eq!(run(&nested, &["tag"]).unwrap(), "v0.0.0\n");
    }

    #[test]
    fn test_custom_file_name() {
        let root = tempfile::tempdir().unwrap();
        run(root.path(), &["--file-name", "VERSION", "init"]).unwrap();
        assert!(root.path().join("VERSION").is_file());
        assert!(run(root.path(), &["tag"]).is_err());
        assert_eq!(
            run(root.path(), &["--file-name", "VERSION", "tag"]).unwrap(),
            "v0.0.0\n",
        );
    }

    #[test]
    fn test_compare() {
        let dir = tempfile::tempdir().unwrap();
        let cmp = |a: &str, b: &str| run(dir.path(), &["compare", a, b]).unwrap();
        assert_eq!(cmp("v1.0.0-rc.1", "v1.0.0"), "<\n");
        assert_eq!(cmp("v1.0.0-beta.11", "v1.0.0-beta.3"), ">\n");
        assert_eq!(cmp("v2.0.0", "v2.0.0"), "=\n");

        assert_eq!(
            run(dir.path(), &["compare", "-t", "%M.%m", "--allow-missing", "1.2", "1.10"])
                .unwrap(),
            "<\n",
        );
        assert!(run(dir.path(), &["compare", "1.2.3", "v1.2.3"]).is_err());
    }
}
