pub mod index;
pub mod loader;
pub mod presenter;
pub mod search;

pub use index::{BlockId, IndexEntry, SearchResult};
