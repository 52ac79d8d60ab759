/// Search constraints
///
/// A search is a sparse set of per-field constraints taken from the
/// entry fields. Blank constraints impose no filter; a search with
/// every constraint blank issues no query at all and yields nothing,
/// which is deliberately different from matching everything.

use rusqlite::types::Value;

use super::data::parse_rating;
use super::edit::EntryFields;
use crate::error::ShelfError;

/// Optional per-field search constraints.
///
/// Title, author, and ISBN match as case-insensitive substrings; the
/// rating matches by exact numeric equality. Present constraints are
/// combined with AND.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub title: String,
    pub author: String,
    pub rating: String,
    pub isbn: String,
}

impl SearchFilter {
    /// Take the current entry field values as constraints
    pub fn from_fields(fields: &EntryFields) -> Self {
        SearchFilter {
            title: fields.title.clone(),
            author: fields.author.clone(),
            rating: fields.rating.clone(),
            isbn: fields.isbn.clone(),
        }
    }

    /// Build the WHERE clause and its positional parameters.
    ///
    /// Returns None when every constraint is blank, in which case the
    /// caller must not query at all. A non-blank rating that is not
    /// numeric fails with `InvalidRating` before any query runs.
    pub(crate) fn where_clause(&self) -> Result<Option<(String, Vec<Value>)>, ShelfError> {
        let mut conditions: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if !self.title.trim().is_empty() {
            conditions.push("LOWER(title) LIKE ? ESCAPE '\\'");
            values.push(Value::Text(like_pattern(&self.title)));
        }

        if !self.author.trim().is_empty() {
            conditions.push("LOWER(author) LIKE ? ESCAPE '\\'");
            values.push(Value::Text(like_pattern(&self.author)));
        }

        if let Some(rating) = parse_rating(&self.rating)? {
            conditions.push("rating = ?");
            values.push(Value::Real(rating));
        }

        if !self.isbn.trim().is_empty() {
            conditions.push("LOWER(isbn) LIKE ? ESCAPE '\\'");
            values.push(Value::Text(like_pattern(&self.isbn)));
        }

        if conditions.is_empty() {
            return Ok(None);
        }
        Ok(Some((conditions.join(" AND "), values)))
    }
}

/// Lower-case the needle and wrap it in wildcards, escaping LIKE
/// metacharacters so they match literally.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::library::Library;
    use tempfile::TempDir;

    fn filter(title: &str, author: &str, rating: &str, isbn: &str) -> SearchFilter {
        SearchFilter {
            title: title.to_string(),
            author: author.to_string(),
            rating: rating.to_string(),
            isbn: isbn.to_string(),
        }
    }

    fn entry(title: &str, author: &str, rating: &str, isbn: &str) -> EntryFields {
        EntryFields {
            title: title.to_string(),
            author: author.to_string(),
            rating: rating.to_string(),
            isbn: isbn.to_string(),
        }
    }

    /// A throwaway catalog holding the two-record example set
    fn sample_library() -> (TempDir, Library) {
        let dir = TempDir::new().unwrap();
        let library = Library::open(dir.path().join("books.db")).unwrap();
        library.insert_book(&entry("Dune", "Herbert", "5", "111")).unwrap();
        library.insert_book(&entry("1984", "Orwell", "4", "222")).unwrap();
        (dir, library)
    }

    #[test]
    fn test_blank_filter_builds_no_clause() {
        let result = filter("", "  ", "", "\t").where_clause().unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_blank_filter_returns_nothing_even_when_rows_exist() {
        let (_dir, library) = sample_library();
        let matches = library.search(&filter("", "", "", "")).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_title_matches_substring_case_insensitively() {
        let (_dir, library) = sample_library();

        let matches = library.search(&filter("DUNE", "", "", "")).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Dune");

        let matches = library.search(&filter("un", "", "", "")).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Dune");
    }

    #[test]
    fn test_author_substring_matches_example() {
        let (_dir, library) = sample_library();

        let matches = library.search(&filter("", "orw", "", "")).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, 2);
        assert_eq!(matches[0].author, "Orwell");
    }

    #[test]
    fn test_constraints_combine_with_and() {
        let (_dir, library) = sample_library();

        let matches = library.search(&filter("dune", "", "5", "")).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Dune");

        let matches = library.search(&filter("dune", "", "4", "")).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_rating_matches_exact_numeric_value() {
        let (_dir, library) = sample_library();

        let matches = library.search(&filter("", "", "4", "")).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].rating, Some(4.0));

        let matches = library.search(&filter("", "", "4.0", "")).unwrap();
        assert_eq!(matches.len(), 1);

        let matches = library.search(&filter("", "", "4.5", "")).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_non_numeric_rating_constraint_fails() {
        let (_dir, library) = sample_library();

        let result = library.search(&filter("", "", "four", ""));
        assert!(matches!(result, Err(ShelfError::InvalidRating(_))));
    }

    #[test]
    fn test_isbn_substring() {
        let (_dir, library) = sample_library();

        let matches = library.search(&filter("", "", "", "22")).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].isbn, "222");
    }

    #[test]
    fn test_results_come_back_in_id_order() {
        let (_dir, library) = sample_library();
        library.insert_book(&entry("Dune Messiah", "Herbert", "4", "333")).unwrap();

        let matches = library.search(&filter("", "herbert", "", "")).unwrap();
        let ids: Vec<i64> = matches.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_like_metacharacters_match_literally() {
        let (_dir, library) = sample_library();
        library.insert_book(&entry("100% Wool", "Anon", "", "444")).unwrap();
        library.insert_book(&entry("1000 Wools", "Anon", "", "555")).unwrap();

        let matches = library.search(&filter("100%", "", "", "")).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "100% Wool");

        let matches = library.search(&filter("0_w", "", "", "")).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_search_results_are_a_subset_of_all_books() {
        let (_dir, library) = sample_library();

        let all = library.all_books().unwrap();
        let matches = library.search(&filter("", "", "", "1")).unwrap();
        for found in &matches {
            assert!(all.contains(found));
        }
    }
}
