use rusqlite::{params, params_from_iter, Connection, Row};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::data::{parse_rating, Book};
use super::edit::EntryFields;
use super::search::SearchFilter;
use super::seed::SeedBook;
use crate::error::ShelfError;

/// The Library manages the SQLite catalog database.
/// It owns the connection for the whole process lifetime and exposes
/// every read and write the front end needs. The connection closes when
/// the Library is dropped.
pub struct Library {
    conn: Connection,
    db_path: PathBuf,
}

impl Library {
    /// Open (or create) the catalog database at `path` and initialize
    /// its schema. Failure here means the application cannot run.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ShelfError> {
        let db_path = path.as_ref().to_path_buf();

        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&db_path).map_err(|source| ShelfError::StoreUnavailable {
            path: db_path.clone(),
            source,
        })?;

        info!("database opened at {}", db_path.display());

        let library = Library { conn, db_path };
        if let Err(source) = library.init_schema() {
            return Err(ShelfError::StoreUnavailable {
                path: library.db_path,
                source,
            });
        }

        Ok(library)
    }

    /// Get the path where the database is stored by default:
    /// - Linux: ~/.local/share/bookshelf/books.db
    /// - macOS: ~/Library/Application Support/bookshelf/books.db
    /// - Windows: %APPDATA%\bookshelf\books.db
    pub fn default_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        path.push("bookshelf");
        path.push("books.db");
        path
    }

    /// Initialize the database schema.
    /// Safe to call on an already-initialized database.
    fn init_schema(&self) -> rusqlite::Result<()> {
        // AUTOINCREMENT keeps deleted ids from ever being handed out again
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS books (
                id      INTEGER PRIMARY KEY AUTOINCREMENT,
                title   TEXT NOT NULL,
                author  TEXT NOT NULL,
                rating  REAL,
                isbn    TEXT NOT NULL
            )",
            [],
        )?;

        debug!("schema ready");
        Ok(())
    }

    /// Get the path to the database file
    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Get a count of records in the catalog
    pub fn book_count(&self) -> Result<i64, ShelfError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Insert one new record from the entry field values.
    /// Returns the stored record including its fresh id. Any field may
    /// be empty; a non-numeric rating is rejected before the write.
    pub fn insert_book(&self, fields: &EntryFields) -> Result<Book, ShelfError> {
        let rating = parse_rating(&fields.rating)?;

        self.conn.execute(
            "INSERT INTO books (title, author, rating, isbn) VALUES (?1, ?2, ?3, ?4)",
            params![fields.title, fields.author, rating, fields.isbn],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, "inserted record");

        Ok(Book {
            id,
            title: fields.title.clone(),
            author: fields.author.clone(),
            rating,
            isbn: fields.isbn.clone(),
        })
    }

    /// Get all records from the catalog, ordered by id (insertion order)
    pub fn all_books(&self) -> Result<Vec<Book>, ShelfError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, author, rating, isbn FROM books ORDER BY id ASC")?;

        let book_iter = stmt.query_map([], row_to_book)?;

        let mut books = Vec::new();
        for book in book_iter {
            books.push(book?);
        }
        Ok(books)
    }

    /// Run a search against the catalog.
    /// A filter with no constraints issues no query and returns nothing.
    pub fn search(&self, filter: &SearchFilter) -> Result<Vec<Book>, ShelfError> {
        let Some((where_clause, values)) = filter.where_clause()? else {
            return Ok(Vec::new());
        };

        let sql = format!(
            "SELECT id, title, author, rating, isbn FROM books WHERE {where_clause} ORDER BY id ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let book_iter = stmt.query_map(params_from_iter(values), row_to_book)?;

        let mut books = Vec::new();
        for book in book_iter {
            books.push(book?);
        }
        Ok(books)
    }

    /// Overwrite all four editable fields of the record matching `id`.
    /// Returns the affected-row count; zero means the id does not exist,
    /// which is not an error.
    pub fn update_book(&self, id: i64, fields: &EntryFields) -> Result<usize, ShelfError> {
        let rating = parse_rating(&fields.rating)?;

        let affected = self.conn.execute(
            "UPDATE books SET title = ?1, author = ?2, rating = ?3, isbn = ?4 WHERE id = ?5",
            params![fields.title, fields.author, rating, fields.isbn, id],
        )?;
        debug!(id, affected, "updated record");

        Ok(affected)
    }

    /// Remove the record matching `id`.
    /// Returns the affected-row count; zero rows is not an error.
    pub fn delete_book(&self, id: i64) -> Result<usize, ShelfError> {
        let affected = self
            .conn
            .execute("DELETE FROM books WHERE id = ?1", params![id])?;
        debug!(id, affected, "deleted record");

        Ok(affected)
    }

    /// Replace the whole catalog with the seed rows, preserving seed
    /// order and handing out fresh sequential ids starting at 1.
    /// Runs in one transaction so a bad seed row never leaves a
    /// half-written table.
    pub fn reset_to_seed(&mut self, rows: &[SeedBook]) -> Result<usize, ShelfError> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM books", [])?;
        // The sequence table only exists once an AUTOINCREMENT insert has
        // happened, so this may legitimately fail on a fresh database
        let _ = tx.execute("DELETE FROM sqlite_sequence WHERE name = 'books'", []);

        for row in rows {
            let rating = parse_rating(&row.rating)?;
            tx.execute(
                "INSERT INTO books (title, author, rating, isbn) VALUES (?1, ?2, ?3, ?4)",
                params![row.title, row.author, rating, row.isbn],
            )?;
        }

        tx.commit()?;
        info!(rows = rows.len(), "catalog reset from seed");
        Ok(rows.len())
    }
}

fn row_to_book(row: &Row) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        rating: row.get(3)?,
        isbn: row.get(4)?,
    })
}

// Implement Debug for better error messages
impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("db_path", &self.db_path)
            .finish()
    }
}
