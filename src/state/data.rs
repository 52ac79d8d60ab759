/// Shared data structures for the catalog
///
/// These structs represent the data model that flows between
/// the database layer and the terminal front end.

use crate::error::ShelfError;

/// Represents a single book record in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    /// Unique database ID, assigned on insert and never reused
    pub id: i64,
    /// Book title (may be empty, no uniqueness constraint)
    pub title: String,
    /// Author name
    pub author: String,
    /// Numeric rating, None when the field was left blank
    pub rating: Option<f64>,
    /// ISBN as entered, no format validation
    pub isbn: String,
}

impl Book {
    /// Render the record as a one-line tuple for list output
    pub fn display_line(&self) -> String {
        let rating = match self.rating {
            Some(value) => value.to_string(),
            None => "-".to_string(),
        };
        format!(
            "({}, \"{}\", \"{}\", {}, \"{}\")",
            self.id, self.title, self.author, rating, self.isbn
        )
    }
}

/// Parse rating entry text into its stored form.
///
/// Blank input means "no rating" and is stored as NULL. Anything else
/// must be a finite number; otherwise the operation is rejected before
/// any write happens.
pub fn parse_rating(text: &str) -> Result<Option<f64>, ShelfError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(ShelfError::InvalidRating(trimmed.to_string())),
    }
}
