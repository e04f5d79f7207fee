use clap::Parser;
use pantry::cli::commands::Cli;
use pantry::cli::handlers;
use pantry::io::config_io;
use pantry::io::logging::{self, LogTarget};

fn main() {
    let cli = Cli::parse();

    if cli.command.is_none() {
        // No subcommand → launch TUI; keep log lines off the terminal
        let (data_dir, _) =
            config_io::resolve_locations(cli.data_dir.as_deref(), cli.config.as_deref());
        logging::init(LogTarget::File(data_dir.join("pantry.log")));
    } else {
        logging::init(LogTarget::Stderr);
    }

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
