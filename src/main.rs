mod console;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use hr_shell::bootstrap::{
    apply_env_overrides, init_tracing_subscriber, load_or_empty, resolve_config_path,
    resolve_log_dir, wire_runtime,
};

use console::{ConsoleCommand, StdoutEmitter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; a missing file is fine.
    dotenvy::dotenv().ok();

    let config_path = resolve_config_path();
    let mut config = load_or_empty(config_path.as_deref())?;
    apply_env_overrides(&mut config);

    if let Err(err) = init_tracing_subscriber(resolve_log_dir(&config).as_deref()) {
        eprintln!("Failed to initialize tracing: {err}");
    }
    tracing::info!(
        config = ?config_path.as_ref().map(|p| p.display().to_string()),
        "hrconsole starting"
    );

    let runtime = wire_runtime(config, Arc::new(StdoutEmitter)).map_err(|e| {
        tracing::error!(error = %e, "Failed to wire runtime");
        e
    })?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match ConsoleCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", serde_json::json!({ "error": message }));
                continue;
            }
        };
        if !console::dispatch(&runtime, command).await {
            break;
        }
    }

    runtime.close_view().await;
    tracing::info!("hrconsole stopped");
    Ok(())
}
