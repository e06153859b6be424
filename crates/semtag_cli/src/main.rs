//! Command-line tool for reading and updating semantic version files.

mod cli;
mod settings;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    color_eyre::install().expect("error initializing panic handler");

    // Initialize logging.
    env_logger::builder().init();

    let args = cli::Args::parse();
    let settings = settings::Settings::load()?;
    cli::exec(args, &settings, &mut std::io::stdout().lock())
}
