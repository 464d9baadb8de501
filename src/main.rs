//! catalogd CLI entry point.
//!
//! Minimal entrypoint: parse arguments, dispatch to the CLI module,
//! print errors to stderr and exit non-zero on failure. All wiring lives
//! in the CLI module.

use catalogd::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
