/// User interface module
///
/// - `gallery.rs` - thumbnail grid and the pure tile derivation behind it
/// - `toolbar.rs` - search field, match-case toggle and upload controls
///
/// Every interactive element carries a fixed widget id so automation can
/// find it.

pub mod gallery;
pub mod toolbar;

/// Container around the upload controls and drop hint
pub const FILE_INPUT_ID: &str = "file-input";
/// Container around the upload button
pub const UPLOAD_BUTTON_ID: &str = "upload-button";
/// The search text input
pub const SEARCH_INPUT_ID: &str = "search-input";
/// Placeholder shown in the empty search field
pub const SEARCH_PLACEHOLDER: &str = "Search photo by name";
