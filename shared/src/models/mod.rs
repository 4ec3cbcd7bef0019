//! Catalog data models
//!
//! The database owns the entities; these types only shape the write
//! requests sent to it and the rows read back.

pub mod payload;
pub mod price;
pub mod product;

// Re-exports
pub use payload::FieldReader;
pub use price::*;
pub use product::*;
