//! revyl-ci - CI commands for the Revyl build service.
//!
//! Exit code 0 on success, 1 on any missing configuration, HTTP failure or
//! response contract violation.

use revyl_ci::cli;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    let exit_code = cli::run().await;
    process::exit(exit_code);
}
