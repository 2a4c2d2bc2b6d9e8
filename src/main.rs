use std::process::ExitCode;

use swapmylook_client::frameworks::runtime;

#[tokio::main]
async fn main() -> ExitCode {
    // Errors are logged where they occur; only the exit status is left to set.
    match runtime::run_with_config().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
