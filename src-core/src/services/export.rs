//! Favorites export
//!
//! Plain-text export for reading and sharing, JSON export for keeping the
//! full records.

use crate::config::{EXPORT_DEFAULT_FILENAME, EXPORT_ENTRY_SEPARATOR};
use crate::error::Result;
use crate::models::Quote;
use std::path::Path;
use tokio::fs;

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
        }
    }

    /// Suggested file name, e.g. `WhisperZen_Favorites.txt`
    pub fn default_file_name(self) -> String {
        format!("{}.{}", EXPORT_DEFAULT_FILENAME, self.extension())
    }
}

/// Render quotes as readable text.
///
/// Each entry is the content, an optional "— author" line and a
/// "[Category]" line; entries are separated by a `---` line.
pub fn favorites_to_text(quotes: &[Quote]) -> String {
    quotes
        .iter()
        .map(|quote| {
            let mut entry = quote.content.clone();
            if let Some(author) = quote.author.as_deref().filter(|a| !a.is_empty()) {
                entry.push_str("\n— ");
                entry.push_str(author);
            }
            entry.push_str(&format!("\n[{}]", quote.category));
            entry
        })
        .collect::<Vec<_>>()
        .join(EXPORT_ENTRY_SEPARATOR)
}

/// Render quotes as a pretty JSON array of full records
pub fn favorites_to_json(quotes: &[Quote]) -> Result<String> {
    Ok(serde_json::to_string_pretty(quotes)?)
}

/// Render quotes in `format`
pub fn render(quotes: &[Quote], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Text => Ok(favorites_to_text(quotes)),
        ExportFormat::Json => favorites_to_json(quotes),
    }
}

/// Write an export to disk, creating parent directories
pub async fn write_export(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    fs::write(path, contents).await?;
    tracing::info!("Favorites exported to: {:?}", path);

    Ok(())
}
