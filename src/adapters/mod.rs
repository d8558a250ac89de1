// Adapters layer: concrete implementations for exports (tables, zip archive, documents).

pub mod document;
pub mod export;
pub mod tables;
