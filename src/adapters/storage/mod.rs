//! Storage adapters - blob persistence for uploaded documents.

mod filesystem;

pub use filesystem::FsBlobStore;
