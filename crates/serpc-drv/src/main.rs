use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;

use serpc_drv::{run, Config};

/// Serpent front-end compiler: prints the AST (and optionally the IR) of a
/// Serpent source file.
#[derive(Parser)]
#[command(name = "serpc", version)]
struct Cli {
    /// Path to the Serpent source file
    input_file: std::path::PathBuf,

    /// Show the generated intermediate representation
    #[arg(long)]
    show_ir: bool,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = SimpleLogger::new().with_level(level).init();

    let config = Config {
        input_file: cli.input_file,
        show_ir: cli.show_ir,
    };

    match run(&config) {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            eprintln!("error: {:#}", error);
            std::process::exit(1);
        }
    }
}
