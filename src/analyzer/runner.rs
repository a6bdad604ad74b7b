//! AI CLI呼び出し

use crate::ai_provider::AiProvider;
use crate::error::{PartAiError, Result};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

pub async fn run_ai_cli(
    provider: AiProvider,
    prompt: &str,
    model: &str,
    timeout: Duration,
) -> Result<String> {
    let args = provider.prompt_args(prompt, model);

    // Windowsではcmd /c経由
    #[cfg(windows)]
    let mut command = {
        let mut c = Command::new("cmd");
        c.arg("/c").arg(provider.command_name());
        c
    };

    #[cfg(not(windows))]
    let mut command = Command::new(provider.command_name());

    command.args(&args).kill_on_drop(true);

    let output = tokio::time::timeout(timeout, command.output())
        .await
        .map_err(|_| {
            PartAiError::Timeout(format!(
                "{} CLI が {}秒以内に応答しませんでした",
                provider.command_name(),
                timeout.as_secs()
            ))
        })?
        .map_err(|e| PartAiError::CliExecution(format!("{} CLI実行エラー: {}", provider.command_name(), e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PartAiError::CliExecution(format!(
            "{} CLI failed (code {:?}): {}",
            provider.command_name(),
            output.status.code(),
            stderr
        )));
    }

    let response = String::from_utf8_lossy(&output.stdout).to_string();

    let preview: String = response.chars().take(500).collect();
    debug!(%preview, "cli response");

    Ok(response)
}
