pub mod document;
pub mod error;
pub mod fetch;
pub mod filing;
pub mod parsing;

// Re-exports
pub use document::{Document, DocumentChunk, MetaValue, MetadataMap};
pub use error::ParsingError;
pub use filing::{FilingMetadata, RawFiling};
pub use parsing::{convert_filing, convert_filing_with};
