use clap::Parser;
use clap::error::ErrorKind;
use console::style;
use log::{error, info};
use photo_date_organize::component::{DateDispatcher, LivePhotoRemover};
use photo_date_organize::config::RawConfig;
use photo_date_organize::init;
use photo_date_organize::signal::setup_shutdown_signal;
use photo_date_organize::tools::{ensure_directory_exists, validate_directory_exists};
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_CONF_FAILURE: u8 = 1;
const EXIT_EXEC_FAILURE: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "photo_date_organize",
    about = "Relocates photos and videos into date-bucketed folders using their capture-date metadata"
)]
struct Cli {
    /// Source folder
    #[arg(short = 's', long)]
    source: PathBuf,

    /// Destination folder (defaults to <source>/out)
    #[arg(short = 'd', long)]
    destination: Option<PathBuf>,

    /// Configuration file
    #[arg(short = 'c', long)]
    config: PathBuf,
}

/// Exit code for an argument-parsing outcome: bad flags are a configuration
/// failure, while `--help`/`--version` are not failures at all.
fn parse_error_exit(e: &clap::Error) -> u8 {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => EXIT_CONF_FAILURE,
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(parse_error_exit(&e));
        }
    };

    let raw = match RawConfig::load(&cli.config) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("{} {e:#}", style("configuration error:").red().bold());
            return ExitCode::from(EXIT_CONF_FAILURE);
        }
    };
    init::init_logging(raw.logging_level());

    let config = match raw.resolve() {
        Ok(config) => config,
        Err(e) => {
            error!("error during configuration validation: {e:#}");
            return ExitCode::from(EXIT_CONF_FAILURE);
        }
    };

    if let Err(e) = validate_directory_exists(&cli.source) {
        error!("invalid source folder: {e:#}");
        return ExitCode::from(EXIT_CONF_FAILURE);
    }

    let destination = match &cli.destination {
        Some(destination) => destination.clone(),
        None => {
            let destination = cli.source.join("out");
            info!("no destination provided (-d), defaults to {}", destination.display());
            destination
        }
    };
    if let Err(e) = ensure_directory_exists(&destination) {
        error!("error while creating output folder {}: {e:#}", destination.display());
        return ExitCode::from(EXIT_CONF_FAILURE);
    }

    let shutdown_signal = setup_shutdown_signal();

    // destructive preprocessing pass; a traversal error here stops the run
    // before the pipeline starts
    match LivePhotoRemover::new().run(&cli.source) {
        Ok(removed) => info!("live photo cleanup done, {removed} companion video(s) removed"),
        Err(e) => {
            error!("error while removing live videos: {e:#}");
            return ExitCode::from(EXIT_EXEC_FAILURE);
        }
    }

    let dispatcher = DateDispatcher::new(config, shutdown_signal);
    match dispatcher.dispatch(&cli.source, &destination) {
        Ok(summary) => {
            println!(
                "{}",
                style(format!(
                    "{} file(s) found, {} file(s) relocated to {}",
                    summary.files_found,
                    summary.files_moved,
                    destination.display()
                ))
                .green()
                .bold()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("error while dispatching: {e:#}");
            ExitCode::from(EXIT_EXEC_FAILURE)
        }
    }
}
