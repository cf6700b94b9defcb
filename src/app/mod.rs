pub mod dispatch;

pub use dispatch::{dispatch, load_config};
