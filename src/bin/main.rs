/// quosure CLI
///
/// Parse and evaluate expressions against JSON data contexts from the
/// command line.

use quosure::cli;

fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = cli::run_cli() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
