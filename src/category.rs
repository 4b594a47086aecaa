/// Built-in extension-to-category table.
///
/// This module provides the read-only mapping from file extensions to the
/// category subdirectory a file belongs to inside the destination root
/// (e.g. `.jpg` -> `Media/Images`). The table is constructed once per run
/// and never mutated afterwards; lookups are case-insensitive.
use std::collections::HashMap;

/// Category subdirectory used when the operator picks the generic fallback
/// for an uncategorized file.
pub const FALLBACK_CATEGORY: &str = "Other";

/// The standard extension mappings, keyed by case-folded extension
/// including the leading dot.
const BUILTIN_RULES: &[(&str, &str)] = &[
    // Media
    (".jpg", "Media/Images"),
    (".jpeg", "Media/Images"),
    (".png", "Media/Images"),
    (".gif", "Media/Images"),
    (".heic", "Media/Images"),
    (".webp", "Media/Images"),
    (".svg", "Media/Images"),
    (".mp4", "Media/Videos"),
    (".mov", "Media/Videos"),
    (".avi", "Media/Videos"),
    (".mkv", "Media/Videos"),
    (".webm", "Media/Videos"),
    // Documents
    (".pdf", "Documents/Text"),
    (".doc", "Documents/Text"),
    (".docx", "Documents/Text"),
    (".txt", "Documents/Text"),
    (".rtf", "Documents/Text"),
    (".pages", "Documents/Text"),
    (".xls", "Documents/Spreadsheets"),
    (".xlsx", "Documents/Spreadsheets"),
    (".csv", "Documents/Spreadsheets"),
    (".numbers", "Documents/Spreadsheets"),
    (".ppt", "Documents/Presentations"),
    (".pptx", "Documents/Presentations"),
    (".key", "Documents/Presentations"),
    // Other categories
    (".mp3", "Audio"),
    (".wav", "Audio"),
    (".aac", "Audio"),
    (".flac", "Audio"),
    (".m4a", "Audio"),
    (".zip", "Archives"),
    (".rar", "Archives"),
    (".7z", "Archives"),
    (".tar", "Archives"),
    (".gz", "Archives"),
    (".cpp", "Code"),
    (".h", "Code"),
    (".js", "Code"),
    (".py", "Code"),
    (".java", "Code"),
    (".html", "Code"),
    (".css", "Code"),
    (".exe", "Applications"),
    (".dmg", "Applications"),
    (".app", "Applications"),
];

/// Immutable table of built-in extension rules.
///
/// # Examples
///
/// ```
/// use dirmerge::category::CategoryTable;
///
/// let table = CategoryTable::new();
/// assert_eq!(table.lookup(".jpg"), Some("Media/Images"));
/// assert_eq!(table.lookup(".xyz"), None);
/// ```
#[derive(Debug, Clone)]
pub struct CategoryTable {
    map: HashMap<&'static str, &'static str>,
}

impl CategoryTable {
    /// Creates the table with all standard mappings.
    pub fn new() -> Self {
        Self {
            map: BUILTIN_RULES.iter().copied().collect(),
        }
    }

    /// Looks up a category subpath by case-folded extension (with leading
    /// dot). Callers are expected to fold case via [`dot_extension`].
    pub fn lookup(&self, ext: &str) -> Option<&'static str> {
        self.map.get(ext).copied()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts the case-folded extension of a file name, leading dot included.
///
/// Returns `None` for names with no extension (`README`), for dot-files
/// whose only dot is the leading one (`.config`), and for names ending in
/// a bare dot. Those files never match the built-in table or session rules
/// and classify as unresolved.
///
/// # Examples
///
/// ```
/// use dirmerge::category::dot_extension;
///
/// assert_eq!(dot_extension("photo.JPG"), Some(".jpg".to_string()));
/// assert_eq!(dot_extension("archive.tar.gz"), Some(".gz".to_string()));
/// assert_eq!(dot_extension("README"), None);
/// assert_eq!(dot_extension(".config"), None);
/// ```
pub fn dot_extension(file_name: &str) -> Option<String> {
    let idx = file_name.rfind('.')?;
    if idx == 0 || idx + 1 == file_name.len() {
        return None;
    }
    Some(file_name[idx..].to_lowercase())
}
