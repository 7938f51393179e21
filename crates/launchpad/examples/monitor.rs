//! Key monitor for a connected Launchpad.
//!
//! This example demonstrates:
//! - Loading the session config from a JSON file
//! - Connecting to the first port matching the configured device name
//! - Lighting pads while they are held and logging every key event
//!
//! Usage: cargo run --package padlink-launchpad --example monitor [config.json]

use std::env;
use std::path::PathBuf;

use padlink_launchpad::{logging, Color, ConfigManager, Intensity, Launchpad, SessionEvent};
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    logging::init("info")?;

    let config_path = env::args().nth(1).map(PathBuf::from);
    let mut manager = ConfigManager::new(config_path);
    let config = manager.load()?;
    tracing::info!("Using config {}", manager.config_path().display());

    let launchpad = Launchpad::open(config)?;
    let mut events = launchpad.subscribe();
    if !launchpad.is_connected() {
        launchpad.connect(None)?;
    }
    launchpad.reset()?;

    println!("Press pads on the Launchpad, Ctrl+C to quit");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = events.recv() => match event {
                Ok(SessionEvent::Down(button)) => {
                    launchpad.set_color(button, Color::Green, Intensity::High)?;
                }
                Ok(SessionEvent::Up(button)) => {
                    launchpad.set_color(button, Color::Off, Intensity::default())?;
                }
                Ok(SessionEvent::Key(key)) => {
                    let button = key.button;
                    println!("{:?} ({}, {}) {}", button.kind, button.x, button.y, key.state);
                }
                Ok(other) => tracing::info!(?other, "Session event"),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Monitor fell behind, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    launchpad.reset()?;
    launchpad.disconnect()?;
    Ok(())
}
