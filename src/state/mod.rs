/// State management module
///
/// This module handles all application state, including:
/// - The in-memory image collection (library.rs)
/// - Shared data structures (data.rs)
/// - The name filter (search.rs)

pub mod library;
pub mod data;
pub mod search;
