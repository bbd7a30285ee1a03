use std::process::ExitCode;

use serde_json::json;
use tokio::io::{self, AsyncReadExt, AsyncWriteExt};
use tracing::error;
use tracing_subscriber::EnvFilter;

use brevo_pack::{ActionRequest, ActionRunner, BrevoError, Config};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let (body, code) = match run().await {
        Ok(value) => (value, ExitCode::SUCCESS),
        Err(err) => {
            error!(error = ?err, "Action failed");
            (json!({ "error": err.to_string() }), ExitCode::FAILURE)
        }
    };

    let mut stdout = io::stdout();
    let written = async {
        stdout.write_all(body.to_string().as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await
    }
    .await;
    if let Err(err) = written {
        error!(error = ?err, "Failed to write result");
        return ExitCode::FAILURE;
    }
    code
}

/// Read one action request from stdin and execute it.
async fn run() -> Result<serde_json::Value, BrevoError> {
    let config = Config::load().await;

    let mut raw = String::new();
    io::stdin().read_to_string(&mut raw).await?;
    let request = ActionRequest::from_json(&raw)?;

    let runner = ActionRunner::new(&config)?;
    runner.run(request).await
}
