//! Remote track list: wire models and the one-shot catalog fetch.

mod catalog;
pub mod models;

pub use catalog::*;
pub use models::*;
