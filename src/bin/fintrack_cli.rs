use std::process;

use fintrack_core::{cli::run_cli, init};

fn main() {
    // A missing .env file is the normal case.
    let _ = dotenvy::dotenv();
    init();

    if let Err(err) = run_cli() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
