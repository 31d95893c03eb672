//! Command line and environment configuration.
//!
//! Every option can also be set through the environment or a `.env` file.

use clap::{Args, Parser, Subcommand};
use moondream::{DEFAULT_BASE_URL, MoondreamClient, VisionClient};
use std::{path::PathBuf, sync::Arc};

/// Assets shipped with the crate.
pub const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub upstream: UpstreamArgs,

    #[command(flatten)]
    pub serve: ServeArgs,

    /// Label images from the command line instead of serving HTTP
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Args, Debug, Clone)]
pub struct UpstreamArgs {
    /// Moondream API key
    #[arg(long, env = "MOONDREAM_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Base URL of the Moondream API
    #[arg(long, env = "MOONDREAM_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub api_url: String,
}

impl UpstreamArgs {
    /// Client for the configured API, or `None` without a key.
    pub fn vision_client(&self) -> Option<Arc<dyn VisionClient>> {
        let key = self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())?;
        Some(Arc::new(MoondreamClient::with_base_url(&self.api_url, key)) as Arc<dyn VisionClient>)
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind the HTTP server
    #[arg(long, env = "RELAY_ADDR", default_value = "0.0.0.0:3002")]
    pub addr: String,

    /// Directory with the browser client's assets
    #[arg(long, env = "RELAY_STATIC_DIR", default_value = DEFAULT_STATIC_DIR)]
    pub static_dir: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Label image files and folders, printing the results as JSON
    Label(LabelArgs),
}

#[derive(Args, Debug, Clone)]
pub struct LabelArgs {
    /// Image files or folders to label
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Objects to look for; empty finds everything
    #[arg(long, short, default_value = "")]
    pub prompt: String,

    /// Submit images to a running relay instead of calling Moondream directly
    #[arg(long)]
    pub server: Option<String>,

    /// Write an SVG overlay per labeled image into this folder
    #[arg(long)]
    pub overlay_dir: Option<PathBuf>,

    /// Write the JSON results to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}
