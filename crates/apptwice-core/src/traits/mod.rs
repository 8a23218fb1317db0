//! Core traits defined in `apptwice-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
