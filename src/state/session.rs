/// Displayed rows and the current selection
///
/// The Session sits between the store and the front end: it owns the
/// rows currently on screen, the entry field values, and the record
/// selected for update or delete, if any.

use tracing::debug;

use super::data::{parse_rating, Book};
use super::edit::EntryFields;
use super::library::Library;
use super::search::SearchFilter;
use crate::error::ShelfError;

/// Front-end session state.
///
/// At most one record is selected at a time, held as a full copy keyed
/// by its database id so a refreshed list can never leave a stale
/// positional index behind. Every operation that changes the displayed
/// list drops the selection; selecting again while something is already
/// selected simply replaces it.
#[derive(Debug, Default)]
pub struct Session {
    fields: EntryFields,
    rows: Vec<Book>,
    selected: Option<Book>,
}

impl Session {
    /// Create an empty session with nothing displayed or selected
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &EntryFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut EntryFields {
        &mut self.fields
    }

    /// The rows currently displayed
    pub fn rows(&self) -> &[Book] {
        &self.rows
    }

    /// The record currently selected for update/delete, if any
    pub fn selected(&self) -> Option<&Book> {
        self.selected.as_ref()
    }

    /// Refresh the displayed list with every record in the catalog
    pub fn view_all(&mut self, library: &Library) -> Result<&[Book], ShelfError> {
        self.rows = library.all_books()?;
        self.selected = None;
        Ok(&self.rows)
    }

    /// Search with the current entry fields as constraints.
    /// Blank fields impose no filter; all-blank fields yield nothing.
    pub fn search(&mut self, library: &Library) -> Result<&[Book], ShelfError> {
        let filter = SearchFilter::from_fields(&self.fields);
        self.rows = library.search(&filter)?;
        self.selected = None;
        Ok(&self.rows)
    }

    /// Designate one displayed record as the current selection and copy
    /// its values into the entry fields. Returns None when `id` is not
    /// among the displayed rows, leaving any previous selection alone.
    pub fn select(&mut self, id: i64) -> Option<&Book> {
        let book = self.rows.iter().find(|book| book.id == id)?.clone();
        self.fields.populate(&book);
        self.selected = Some(book);
        self.selected.as_ref()
    }

    /// Add a record built from the entry fields. Valid whether or not
    /// anything is selected; afterwards nothing is selected.
    pub fn submit_add(&mut self, library: &Library) -> Result<Book, ShelfError> {
        let book = library.insert_book(&self.fields)?;
        self.rows.clear();
        self.selected = None;
        Ok(book)
    }

    /// Overwrite the selected record with the entry field values.
    /// Returns Ok(None) when nothing is selected. A rejected rating
    /// keeps the selection so the user can fix the field and retry.
    pub fn submit_update(&mut self, library: &Library) -> Result<Option<Book>, ShelfError> {
        let Some(selected) = &self.selected else {
            return Ok(None);
        };
        let id = selected.id;

        let affected = library.update_book(id, &self.fields)?;
        if affected == 0 {
            debug!(id, "update matched no rows");
        }

        let book = Book {
            id,
            title: self.fields.title.clone(),
            author: self.fields.author.clone(),
            rating: parse_rating(&self.fields.rating)?,
            isbn: self.fields.isbn.clone(),
        };
        self.rows.clear();
        self.selected = None;
        Ok(Some(book))
    }

    /// Delete the selected record. Returns Ok(None) when nothing is
    /// selected; afterwards nothing is selected either way.
    pub fn submit_delete(&mut self, library: &Library) -> Result<Option<Book>, ShelfError> {
        let Some(book) = self.selected.take() else {
            return Ok(None);
        };

        let affected = library.delete_book(book.id)?;
        if affected == 0 {
            debug!(id = book.id, "delete matched no rows");
        }

        self.rows.clear();
        Ok(Some(book))
    }

    /// Drop the selection and wipe the entry fields and displayed rows
    pub fn clear_all(&mut self) {
        self.fields.clear();
        self.rows.clear();
        self.selected = None;
    }
}
