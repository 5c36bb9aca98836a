use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::error::{Error, Result};

/// Print `prompt` and wait for one line on stdin. End of input proceeds;
/// Ctrl-C returns [`Error::Interrupted`].
pub async fn wait_for_enter(prompt: &str) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(prompt.as_bytes()).await?;
    stdout.flush().await?;

    let mut reader = BufReader::new(tokio::io::stdin());
    let mut line = String::new();

    tokio::select! {
        read = reader.read_line(&mut line) => {
            let n = read?;
            debug!(bytes = n, "prompt answered");
            Ok(())
        }
        _ = tokio::signal::ctrl_c() => Err(Error::Interrupted),
    }
}
