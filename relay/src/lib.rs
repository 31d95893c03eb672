//! HTTP relay between the browser labeling page and the Moondream API.
//!
//! [`app`] builds the axum router serving the page, its assets and
//! `POST /auto-label`. The [`commands`] module holds the `serve` and batch
//! `label` entry points used by the binary.

pub mod client;
pub mod commands;
pub mod config;
pub mod logging;
pub mod web;

pub use client::RelayClient;
pub use config::{Cli, Command, LabelArgs, ServeArgs, UpstreamArgs};
pub use logging::init_logging;
pub use web::{ApiError, AppState, app, auto_label, index};
