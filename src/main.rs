use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Declare the modules
mod error;
mod state;

use error::ShelfError;
use state::data::Book;
use state::library::Library;
use state::seed;
use state::session::Session;

/// Seed file the application ships with
const DEFAULT_SEED_FILE: &str = "assets/books.csv";

#[derive(Parser, Debug)]
#[command(
    name = "bookshelf",
    about = "A small terminal catalog manager for your personal book collection"
)]
struct CliArgs {
    /// Database file (defaults to the user data directory)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Seed CSV file; when given, the catalog is reset from it at startup
    #[arg(long)]
    seed: Option<PathBuf>,
}

/// The entry field a `title`/`author`/`rating`/`isbn` command sets
#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Title,
    Author,
    Rating,
    Isbn,
}

/// One parsed line of user input
#[derive(Debug, Clone, PartialEq)]
enum Command {
    ViewAll,
    Search,
    Select(i64),
    SetField(Field, String),
    ShowFields,
    Add,
    Update,
    Delete,
    Clear,
    Reset,
    Help,
    Quit,
}

/// Parse one input line into a command
fn parse_command(line: &str) -> Result<Command, String> {
    let trimmed = line.trim();
    let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (trimmed, ""),
    };

    match keyword.to_lowercase().as_str() {
        "view" | "all" => Ok(Command::ViewAll),
        "search" => Ok(Command::Search),
        "select" => rest
            .parse::<i64>()
            .map(Command::Select)
            .map_err(|_| "select needs a record id, e.g. 'select 3'".to_string()),
        "title" => Ok(Command::SetField(Field::Title, rest.to_string())),
        "author" => Ok(Command::SetField(Field::Author, rest.to_string())),
        "rating" => Ok(Command::SetField(Field::Rating, rest.to_string())),
        "isbn" => Ok(Command::SetField(Field::Isbn, rest.to_string())),
        "fields" => Ok(Command::ShowFields),
        "add" => Ok(Command::Add),
        "update" => Ok(Command::Update),
        "delete" => Ok(Command::Delete),
        "clear" => Ok(Command::Clear),
        "reset" => Ok(Command::Reset),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!(
            "Unknown command '{other}'. Type 'help' for the command list."
        )),
    }
}

/// Main application state
struct BookShelf {
    /// The catalog database
    library: Library,
    /// Displayed rows, entry fields, and the current selection
    session: Session,
    /// Seed file for the `reset` command, when one is known
    seed_path: Option<PathBuf>,
}

impl BookShelf {
    /// Handle one command and print its outcome
    fn update(&mut self, command: Command) -> Result<(), ShelfError> {
        match command {
            Command::ViewAll => {
                let rows = self.session.view_all(&self.library)?;
                if rows.is_empty() {
                    println!("The catalog is empty.");
                } else {
                    print_rows(rows);
                }
            }
            Command::Search => {
                let blank = self.session.fields().is_blank();
                let rows = self.session.search(&self.library)?;
                if blank {
                    println!("No search fields are set. Set one with e.g. 'author orwell'.");
                } else if rows.is_empty() {
                    println!("No records matched.");
                } else {
                    print_rows(rows);
                }
            }
            Command::Select(id) => match self.session.select(id) {
                Some(book) => println!("Selected: {}", book.display_line()),
                None => {
                    println!("No displayed record has id {id}. Use 'view' or 'search' first.")
                }
            },
            Command::SetField(field, value) => {
                let fields = self.session.fields_mut();
                match field {
                    Field::Title => fields.title = value,
                    Field::Author => fields.author = value,
                    Field::Rating => fields.rating = value,
                    Field::Isbn => fields.isbn = value,
                }
            }
            Command::ShowFields => {
                let fields = self.session.fields();
                println!("  title:  \"{}\"", fields.title);
                println!("  author: \"{}\"", fields.author);
                println!("  rating: \"{}\"", fields.rating);
                println!("  isbn:   \"{}\"", fields.isbn);
            }
            Command::Add => {
                let book = self.session.submit_add(&self.library)?;
                println!("The following record has successfully been added:");
                println!("  {}", book.display_line());
            }
            Command::Update => match self.session.submit_update(&self.library)? {
                Some(book) => {
                    println!("The following record has been updated:");
                    println!("  {}", book.display_line());
                }
                None => println!("Nothing is selected. Use 'select <id>' first."),
            },
            Command::Delete => match self.session.submit_delete(&self.library)? {
                Some(book) => {
                    println!("The following record has been deleted:");
                    println!("  {}", book.display_line());
                }
                None => println!("Nothing is selected. Use 'select <id>' first."),
            },
            Command::Clear => {
                self.session.clear_all();
                println!("Cleared the entry fields, list, and selection.");
            }
            Command::Reset => match &self.seed_path {
                Some(path) => {
                    let rows = seed::load_seed_file(path)?;
                    let count = self.library.reset_to_seed(&rows)?;
                    self.session.clear_all();
                    println!("Catalog reset with {count} seed records.");
                }
                None => println!("No seed file is configured. Start with --seed <file>."),
            },
            Command::Help => print_help(),
            // Quit is handled by the input loop
            Command::Quit => {}
        }
        Ok(())
    }

    /// Read and handle commands until quit or end of input
    fn run(&mut self) -> Result<(), ShelfError> {
        loop {
            print!("> ");
            io::stdout().flush()?;

            let mut line = String::new();
            if io::stdin().read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(message) => {
                    println!("{message}");
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }

            // Errors inside a command are reported and the loop keeps
            // going; only startup failure is fatal
            if let Err(error) = self.update(command) {
                println!("⚠️  {error}");
            }
        }
        Ok(())
    }
}

fn print_rows(rows: &[Book]) {
    for book in rows {
        println!("  {}", book.display_line());
    }
}

fn print_help() {
    println!("Commands:");
    println!("  view            list every record");
    println!("  search          search with the current entry fields");
    println!("  select <id>     select a displayed record for update/delete");
    println!("  title [text]    set the title entry field (empty clears it)");
    println!("  author [text]   set the author entry field");
    println!("  rating [text]   set the rating entry field");
    println!("  isbn [text]     set the isbn entry field");
    println!("  fields          show the current entry fields");
    println!("  add             add a record from the entry fields");
    println!("  update          overwrite the selected record");
    println!("  delete          delete the selected record");
    println!("  clear           clear the entry fields, list, and selection");
    println!("  reset           reset the catalog from the seed file");
    println!("  help            show this list");
    println!("  quit            exit");
}

fn main() -> Result<(), ShelfError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .init();

    let args = CliArgs::parse();

    let db_path = args.db.clone().unwrap_or_else(Library::default_path);
    let is_new_database = !db_path.exists();
    let mut library = Library::open(&db_path)?;
    println!("📁 Catalog database at: {}", library.path().display());

    // An explicit --seed always reseeds; a brand new database seeds
    // itself from the default file when that file exists.
    let seed_path = args.seed.clone().or_else(|| {
        let default = PathBuf::from(DEFAULT_SEED_FILE);
        default.exists().then_some(default)
    });
    if let Some(path) = &seed_path {
        if args.seed.is_some() || is_new_database {
            let rows = seed::load_seed_file(path)?;
            let count = library.reset_to_seed(&rows)?;
            println!("🌱 Seeded the catalog with {} records from {}", count, path.display());
        }
    }

    let book_count = library.book_count()?;
    println!("📚 Bookshelf ready with {book_count} records. Type 'help' for commands.");

    let mut app = BookShelf {
        library,
        session: Session::new(),
        seed_path,
    };
    app.run()
}
