//! Plantsharp CLI - Generate PlantUML class diagrams from C# sources

mod cli;
mod sources;

use clap::Parser;

fn main() {
    // Logging is initialized inside run() once the flags are known
    let cli_args = cli::Cli::parse();

    let mut app = cli::PlantsharpApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
