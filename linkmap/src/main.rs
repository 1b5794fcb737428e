use colored::Colorize;
use linkmap::{ViewOptions, command_argument_builder, run_view};
use linkmap_core::MapError;
use tracing::Level;

fn main() {
    let matches = command_argument_builder().get_matches();
    init_tracing(matches.get_flag("quiet"), matches.get_flag("verbose"));

    let options = match ViewOptions::from_matches(&matches) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(2);
        }
    };

    match run_view(&options) {
        Ok(summary) => {
            let failed = summary.failed_artifacts();
            if failed > 0 {
                eprintln!(
                    "{} {} of {} artifacts could not be written",
                    "✗".red().bold(),
                    failed,
                    summary.artifacts.len()
                );
            }
            if summary.failures() > 0 {
                std::process::exit(1);
            }
        }
        Err(e) => {
            let input_unavailable = e
                .downcast_ref::<MapError>()
                .is_some_and(MapError::is_input_unavailable);
            if input_unavailable {
                eprintln!("{} {:#}", "✗ Error loading database:".red().bold(), e);
            } else {
                eprintln!("{} {:#}", "✗".red().bold(), e);
            }
            std::process::exit(1);
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
