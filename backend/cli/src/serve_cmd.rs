//! `codereview serve`: run the HTTP relay.

use anyhow::{bail, Result};
use tracing::info;

use codereview_config::validate;
use codereview_providers::build_provider;
use codereview_relay::{start_server, RelayState};

use crate::config::{relay_with_overrides, Loaded};
use crate::terminal_output::note_error;

pub async fn run(loaded: Loaded, port: Option<u16>, bind: Option<String>) -> Result<()> {
    let mut config = loaded.config;
    config.relay = relay_with_overrides(&config.relay, port, bind);

    // Warnings were logged at startup; flags can only add errors.
    let report = validate(&config);
    if !report.is_valid() {
        for error in &report.errors {
            note_error(&format!("{}: {}", error.path, error.message));
        }
        bail!(
            "Refusing to start with an invalid config ({})",
            loaded.path.display()
        );
    }

    let provider = build_provider(&config.provider)?;
    info!(
        provider = provider.name(),
        model = provider.model(),
        config = %loaded.path.display(),
        "Starting CodeReview relay"
    );
    start_server(RelayState::new(provider), &config.relay).await
}
