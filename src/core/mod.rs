//! Core module: diagram model, builder, rendering and configuration

pub mod architecture;
pub mod builder;
pub mod config;
pub mod description;
pub mod error;
pub mod models;
pub mod preview;
pub mod render;
pub mod style;

/// Returns the current version of the `arch-diagram` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
