#![deny(clippy::unwrap_used, clippy::expect_used)]

use clap::Parser;
use std::path::PathBuf;

use mathsheet::{configuration::GeneratorConfiguration, error::ContextError, generator};

/// Without arguments the document is written to `test_math_questions.pdf` in the current directory.
#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct CliArguments {
    /// The path of the output PDF file.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "file_path",
        default_value = generator::DEFAULT_OUTPUT_FILE_NAME
    )]
    output_file_path: PathBuf,
    /// A JSON file overriding the layout constants and the document information.
    #[arg(short = 'c', long = "configuration", value_name = "json_file")]
    configuration_path: Option<PathBuf>,
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    if let Err(error) = fallible_main() {
        log::error!("{}", error);
        std::process::exit(1);
    }
}

fn fallible_main() -> Result<(), ContextError> {
    let arguments = CliArguments::parse();
    log::debug!("{:?}", arguments);

    let configuration = match &arguments.configuration_path {
        Some(configuration_path) => GeneratorConfiguration::from_path(configuration_path)?,
        None => GeneratorConfiguration::default(),
    };
    log::debug!("{:?}", configuration);

    generator::generate_with_configuration(&arguments.output_file_path, &configuration)?;

    Ok(())
}
