use crate::error::{ChunkerError, Result};
use crate::types::Document;
use std::path::Path;
use walkdir::WalkDir;

/// File extensions the loader understands, with their reader functions.
/// Everything is read as UTF-8 text; adding a format means one more entry.
fn reader_for(extension: &str) -> Option<fn(&Path) -> std::io::Result<String>> {
    match extension {
        "txt" | "md" => Some(read_text),
        _ => None,
    }
}

fn read_text(path: &Path) -> std::io::Result<String> {
    std::fs::read_to_string(path)
}

/// Load every supported document under `dir`, one `Document` per file.
///
/// Traversal is recursive and sorted by path, so the resulting order is
/// stable across runs and machines. A file that fails to read is skipped
/// with a warning rather than aborting the whole load; files with
/// unsupported extensions and empty files are skipped silently. The
/// `source` identifier is the path relative to `dir`.
pub fn load_documents(dir: impl AsRef<Path>) -> Result<Vec<Document>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ChunkerError::InvalidDirectory(dir.display().to_string()));
    }

    let mut documents = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            ChunkerError::InvalidDirectory(format!("{}: {e}", dir.display()))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(reader) = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .and_then(|ext| reader_for(&ext))
        else {
            log::debug!("Skipping unsupported file {}", path.display());
            continue;
        };

        let content = match reader(path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Skipping unreadable file {}: {e}", path.display());
                continue;
            }
        };
        if content.trim().is_empty() {
            log::debug!("Skipping empty file {}", path.display());
            continue;
        }

        let source = path
            .strip_prefix(dir)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned();
        documents.push(Document::new(content, source));
    }

    log::info!("Loaded {} documents from {}", documents.len(), dir.display());
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn loads_supported_files_in_sorted_order() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.txt", "second");
        write(&dir, "a.md", "first");

        let docs = load_documents(dir.path()).unwrap();
        let sources: Vec<&str> = docs.iter().map(|d| d.metadata.source.as_str()).collect();
        assert_eq!(sources, vec!["a.md", "b.txt"]);
        assert_eq!(docs[0].content, "first");
    }

    #[test]
    fn skips_unsupported_and_empty_files() {
        let dir = TempDir::new().unwrap();
        write(&dir, "keep.txt", "kept");
        write(&dir, "skip.pdf", "%PDF-1.4 binary-ish");
        write(&dir, "empty.txt", "  \n ");

        let docs = load_documents(dir.path()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].metadata.source, "keep.txt");
    }

    #[test]
    fn recurses_into_subdirectories_with_relative_sources() {
        let dir = TempDir::new().unwrap();
        write(&dir, "nested/deep.txt", "below");

        let docs = load_documents(dir.path()).unwrap();
        assert_eq!(docs.len(), 1);
        let source = &docs[0].metadata.source;
        assert!(source.starts_with("nested"), "got source {source}");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("nope");
        let err = load_documents(&gone).unwrap_err();
        assert!(matches!(err, ChunkerError::InvalidDirectory(_)));
    }
}
