pub mod favicon;
pub mod fetcher;
pub mod manifest;
pub mod metadata;
pub mod target;
pub mod types;

pub use favicon::FaviconService;
pub use fetcher::{FetchedBody, Fetcher, Overflow};
pub use metadata::{PageMetadata, extract_metadata};
pub use target::parse_target_url;
pub use types::{ColorCandidate, ColorSource, FaviconLookup, LinkPreviewPayload};
