//! CLI Status Command
//!
//! Asks a running relay for its health report.

use anyhow::Result;

use tui::RelayClient;

use crate::terminal_output::{note_error, note_success, render_table};

pub async fn run(relay_url: &str) -> Result<()> {
    match RelayClient::new(relay_url).health().await {
        Ok(report) => {
            note_success(&format!("Relay at {relay_url} is {}", report.status));
            let rows = vec![
                vec!["service".to_string(), report.service],
                vec!["version".to_string(), report.version],
                vec!["provider".to_string(), report.provider],
                vec!["model".to_string(), report.model],
            ];
            print!("{}", render_table(&["Key", "Value"], &rows));
        }
        Err(e) => note_error(&format!("Relay is not reachable at {relay_url} ({e})")),
    }
    Ok(())
}
