//! Metadata locator
//!
//! The statement header is a single short insert with one tuple. Only the
//! first statement insert in a document is used; later ones are counted but
//! otherwise ignored.

use crate::error::DecodeError;

use super::literal::{extract_values, SqlValue};
use super::scanner::{find_marker, BlockScan};
use super::schema::statement_marker;

/// The statement header found in a document
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataBlock {
    /// Values of the first tuple of the first statement insert
    pub values: Vec<SqlValue>,
    /// Number of statement inserts in the document
    pub occurrences: usize,
}

/// Find the statement header and extract its values
///
/// Fails with [`DecodeError::MissingMetadataBlock`] when the document has no
/// statement insert, or when that insert has no complete tuple before its
/// terminator.
pub fn locate_metadata(text: &str) -> Result<MetadataBlock, DecodeError> {
    let marker = statement_marker();
    let first = find_marker(text, marker, 0).ok_or(DecodeError::MissingMetadataBlock)?;

    let inner = BlockScan::new(text, first.end())
        .next()
        .ok_or(DecodeError::MissingMetadataBlock)?;

    let mut occurrences = 1;
    let mut from = first.end();
    while let Some(found) = find_marker(text, marker, from) {
        occurrences += 1;
        from = found.end();
    }

    Ok(MetadataBlock {
        values: extract_values(inner),
        occurrences,
    })
}
