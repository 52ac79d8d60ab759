/// Editable field values
///
/// This struct holds the four entry values exactly as the user typed
/// them. Values stay plain text all the way to the store boundary,
/// where the rating is parsed explicitly.

use super::data::Book;

/// The current contents of the four entry fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFields {
    pub title: String,
    pub author: String,
    pub rating: String,
    pub isbn: String,
}

impl EntryFields {
    /// Create empty entry fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy a record's values into the fields.
    /// The id stays with the selection and is never editable.
    pub fn populate(&mut self, book: &Book) {
        self.title = book.title.clone();
        self.author = book.author.clone();
        self.rating = match book.rating {
            Some(value) => value.to_string(),
            None => String::new(),
        };
        self.isbn = book.isbn.clone();
    }

    /// Clear all four values
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when every field is blank or whitespace
    pub fn is_blank(&self) -> bool {
        [&self.title, &self.author, &self.rating, &self.isbn]
            .iter()
            .all(|value| value.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> Book {
        Book {
            id: 7,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            rating: Some(5.0),
            isbn: "111".to_string(),
        }
    }

    #[test]
    fn test_populate_copies_values() {
        let mut fields = EntryFields::new();
        fields.populate(&sample_book());

        assert_eq!(fields.title, "Dune");
        assert_eq!(fields.author, "Herbert");
        assert_eq!(fields.rating, "5");
        assert_eq!(fields.isbn, "111");
    }

    #[test]
    fn test_populate_blank_rating() {
        let mut fields = EntryFields::new();
        let book = Book {
            rating: None,
            ..sample_book()
        };
        fields.populate(&book);

        assert_eq!(fields.rating, "");
    }

    #[test]
    fn test_clear() {
        let mut fields = EntryFields::new();
        fields.populate(&sample_book());
        assert!(!fields.is_blank());

        fields.clear();

        assert!(fields.is_blank());
        assert_eq!(fields, EntryFields::default());
    }

    #[test]
    fn test_is_blank_ignores_whitespace() {
        let fields = EntryFields {
            title: "  ".to_string(),
            ..EntryFields::default()
        };
        assert!(fields.is_blank());
    }
}
