use anyhow::Context;
use fawrykit_core::{log_error, logging::init_logging, CheckoutConfig, Platform};
use fawrykit_demo::{CheckoutScreen, SandboxSdk, CONFIG_ENV};
use fawrykit_events::LocalEmitter;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Handle;

fn load_config() -> anyhow::Result<CheckoutConfig> {
    let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) else {
        tracing::info!("{} not set, using sandbox config", CONFIG_ENV);
        return Ok(CheckoutConfig::sandbox());
    };
    CheckoutConfig::load(&path)
        .inspect_err(|err| log_error("load checkout config", err))
        .with_context(|| format!("loading {}", path.display()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = load_config()?;
    let emitter = LocalEmitter::new();
    let sdk = Arc::new(SandboxSdk::new(emitter.clone(), Handle::current()));

    let screen = CheckoutScreen::mount(Arc::new(emitter), sdk.clone(), config, Platform::current())
        .inspect_err(|err| log_error("mount checkout screen", err))?;

    screen.checkout();
    screen.manage_cards();
    sdk.settle().await;

    let state = screen.unmount();
    tracing::info!(payment = ?state.payment, cards = ?state.cards, events = state.events_seen, "done");
    Ok(())
}
