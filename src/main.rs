//! Karang Lestari packager - builds the signed macOS bundle and installer.
//!
//! Exit code 0 means the `.dmg` exists and the bundle inside it is signed.

use std::process;

#[tokio::main]
async fn main() {
    let exit_code = match karang_bundler::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
