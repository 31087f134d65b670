//! Seekbench CLI entry point.

fn main() {
    if let Err(e) = seekbench_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
