//! PyToExe - package a Python script into a standalone executable.
//!
//! Resolves a Python 3 interpreter, makes sure PyInstaller is installed,
//! runs it with the chosen options and verifies the executable exists.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match pytoexe::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  {}", suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}
