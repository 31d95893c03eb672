//! Client for the Moondream vision-language API.
//!
//! The crate defines the [`VisionClient`] trait used by the labeler along with
//! [`MoondreamClient`], the reqwest implementation talking to the hosted
//! `/query` and `/detect` endpoints.

pub mod client;
pub mod traits;

pub use client::{DEFAULT_BASE_URL, MoondreamClient};
pub use traits::{BoundingBox, VisionClient, VisionError};
