//! Client-side query caching and synchronization.
//!
//! The store keeps one entry per [`QueryKey`], deduplicates in-flight
//! requests, serves stale data while revalidating in the background, and
//! orders commits by issue sequence so a superseded response can never
//! clobber newer data.

mod key;
mod store;

pub use key::{keys, QueryKey};
pub use store::{QueryHandle, QueryOptions, QuerySnapshot, QueryStatus, QueryStore};
