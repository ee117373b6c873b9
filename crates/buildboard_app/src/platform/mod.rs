//! Terminal shell: config, logging, feed effects and rendering.
mod app;
mod config;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
