use std::path::PathBuf;

use eyre::Result;
use serde::Deserialize;

const CONFIG_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const ENV_PREFIX: &str = "SEMTAG";

/// Settings that can be set in the user config file or the environment.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    /// Name of the version file.
    pub file_name: String,
    /// Template used by `format` and `compare` when none is given.
    pub format: String,
}

impl Settings {
    /// Loads settings from the defaults, the user config file, and the
    /// environment, in increasing order of priority.
    pub fn load() -> Result<Self> {
        Self::load_from(user_config_file(), config::Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(user_file: Option<PathBuf>, env: config::Environment) -> Result<Self> {
        let mut config = config::Config::builder()
            .set_default("file_name", semtag::FILE_NAME)?
            .set_default("format", semtag::TAG_FORMAT)?;

        if let Some(path) = user_file {
            log::debug!("reading settings from {path:?}");
            config = config.add_source(
                config::File::from(path)
                    .format(CONFIG_FILE_FORMAT)
                    .required(false),
            );
        }

        config = config.add_source(env);

        Ok(config.build()?.try_deserialize()?)
    }
}

fn user_config_file() -> Option<PathBuf> {
    let Some(dirs) = directories::ProjectDirs::from("", "", "semtag") else {
        log::warn!("unable to determine config directory");
        return None;
    };
    Some(dirs.config_dir().join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::load_from(None, env(&[])).unwrap();
        assert_eq!(
            settings,
            Settings {
                file_name: ".semver".to_owned(),
                format: "v%M.%m.%p%s".to_owned(),
            },
        );
    }

    #[test]
    fn test_missing_user_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings =
            Settings::load_from(Some(dir.path().join("config.yaml")), env(&[])).unwrap();
        assert_eq!(settings.file_name, ".semver");
    }

    #[test]
    fn test_layering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "file_name: VERSION\nformat: \"%M.%m.%p%s\"\n").unwrap();

        let settings = Settings::load_from(Some(path.clone()), env(&[])).unwrap();
        assert_eq!(settings.file_name, "VERSION");
        assert_eq!(settings.format, "%M.%m.%p%s");

        let settings =
            Settings::load_from(Some(path), env(&[("SEMTAG_FILE_NAME", ".version")])).unwrap();
        assert_eq!(settings.file_name, ".version");
        assert_eq!(settings.format, "%M.%m.%p%s");
    }
}
