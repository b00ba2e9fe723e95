use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    appcmd::app::startup::startup().await
}
