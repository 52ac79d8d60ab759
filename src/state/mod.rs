/// State management module
///
/// This module handles all application state, including:
/// - Database connection and queries (library.rs)
/// - Shared data structures (data.rs)
/// - Search constraints (search.rs)
/// - Editable field values (edit.rs)
/// - Displayed rows and the current selection (session.rs)
/// - Seed data loading (seed.rs)

pub mod data;
pub mod edit;
pub mod library;
pub mod search;
pub mod seed;
pub mod session;
