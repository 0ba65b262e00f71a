//! CLI Doctor Command
//!
//! Validates the effective config and checks that the relay answers.

use anyhow::Result;

use codereview_config::{validate, ValidationReport};
use tui::RelayClient;

use crate::config::Loaded;
use crate::terminal_output::{note_error, note_info, note_success, note_warn, render_table};

/// Executes the full doctor diagnosis.
pub async fn run(loaded: &Loaded) -> Result<()> {
    println!("\n🔍 Running CodeReview Doctor...\n");
    note_info(&format!("Config file: {}", loaded.path.display()));

    let report = validate(&loaded.config);
    let config_ok = print_report(&report);
    let relay_ok = check_relay(&loaded.config.client.relay_url).await;

    println!();
    if config_ok && relay_ok {
        note_success("All checks passed! CodeReview is healthy.");
    } else {
        note_error("Some checks failed! Please fix the errors above.");
    }
    Ok(())
}

fn report_rows(report: &ValidationReport) -> Vec<Vec<String>> {
    let errors = report.errors.iter().map(|e| ("error", e));
    let warnings = report.warnings.iter().map(|w| ("warning", w));
    errors
        .chain(warnings)
        .map(|(level, issue)| vec![level.to_string(), issue.path.clone(), issue.message.clone()])
        .collect()
}

fn print_report(report: &ValidationReport) -> bool {
    let rows = report_rows(report);
    if rows.is_empty() {
        note_success("Config is valid");
        return true;
    }
    print!("{}", render_table(&["Level", "Field", "Problem"], &rows));
    if report.is_valid() {
        note_warn("Config is usable but has warnings");
    }
    report.is_valid()
}

async fn check_relay(relay_url: &str) -> bool {
    match RelayClient::new(relay_url).health().await {
        Ok(health) => {
            note_success(&format!(
                "Relay at {relay_url} answers ({} / {})",
                health.provider, health.model
            ));
            true
        }
        Err(e) => {
            note_warn(&format!("Relay at {relay_url} is not reachable ({e})"));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codereview_config::CodeReviewConfig;

    #[test]
    fn test_missing_key_is_listed_as_error() {
        let report = validate(&CodeReviewConfig::default());
        let rows = report_rows(&report);
        assert!(rows
            .iter()
            .any(|row| row[0] == "error" && row[1] == "provider.apiKey"));
    }
}
