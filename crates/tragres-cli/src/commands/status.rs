//! `tragres status` command implementation
//!
//! Checks that the API server answers.

use crate::api::ApiClient;
use crate::error::{CliError, Result};
use colored::Colorize;

/// Report whether the configured server is reachable
pub async fn run(client: &ApiClient) -> Result<()> {
    if !client.health_check().await {
        return Err(CliError::Unreachable(client.base_url().to_string()));
    }

    println!("{} Connected to {}", "✓".green(), client.base_url().cyan());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_status_unreachable() {
        // Port 9 (discard) is closed on test machines
        let client = ApiClient::new("http://127.0.0.1:9/api").unwrap();

        let err = run(&client).await.unwrap_err();
        assert!(matches!(err, CliError::Unreachable(ref url) if url == "http://127.0.0.1:9/api"));
    }
}
