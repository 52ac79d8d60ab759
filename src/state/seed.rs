/// Seed data loading
///
/// The catalog can be reset to a known state from an ordered CSV file
/// with a `title,author,rating,isbn` header (the application ships a
/// default in assets/books.csv). Every value is kept as text; the store
/// parses the rating when the row is inserted.

use serde::Deserialize;
use std::path::Path;

use crate::error::ShelfError;

/// One seed row, in file order
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedBook {
    pub title: String,
    pub author: String,
    pub rating: String,
    pub isbn: String,
}

/// Read every seed row from `path`, preserving file order
pub fn load_seed_file(path: &Path) -> Result<Vec<SeedBook>, ShelfError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|source| ShelfError::SeedRead {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: SeedBook = record.map_err(|source| ShelfError::SeedRead {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(row);
    }
    Ok(rows)
}
