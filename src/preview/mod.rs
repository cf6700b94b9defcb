pub mod candidates;
mod service;

pub use candidates::{choose_base, gather_candidates, pick_winner, settle};
pub use service::PreviewService;
