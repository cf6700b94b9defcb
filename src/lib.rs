#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod app;
pub mod cache;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod gateway;
pub mod links;
pub mod preview;
pub mod utils;

pub use config::Config;
pub use error::{ExtractError, FetchError, PreviewError};
pub use links::{ColorSource, FaviconLookup, LinkPreviewPayload};
pub use preview::PreviewService;
