//! Impressionist - painterly rendering core
//!
//! Image filters over RGBA8 buffers and a brush stroke engine that turns
//! pointer gestures into colored geometry for an external rasterizer.

pub mod brush;
pub mod commands;
pub mod core;
pub mod filter;
pub mod input;
pub mod raster;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging. Safe to call more than once.
pub fn init() {
    let installed = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "impressionist=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Impressionist core initializing...");
    }
}
