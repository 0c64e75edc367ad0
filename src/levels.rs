use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

/// Error type for catalog loading.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("levels directory '{}' not found", .0.display())]
    MissingDir(PathBuf),
    #[error("no levels could be loaded")]
    Empty,
}

/// An ordered collection of raw level definitions, indexed from 0.
///
/// Definitions are kept as unparsed symbol rows: restarting a level and the
/// original-goal mask both re-derive from the pristine definition, so the
/// catalog is read-only for the lifetime of the process.
#[derive(Debug)]
pub struct Catalog {
    levels: Vec<Vec<String>>,
}

impl Catalog {
    /// Load numbered level files (`level1.txt`, `level2.txt`, ...) from a
    /// directory. Probing stops at the first gap once a file has been found,
    /// or after `level5.txt` if none was. Files that yield zero non-blank
    /// rows are skipped with a warning rather than failing the whole load.
    pub fn from_dir(dir: &Path) -> Result<Self, CatalogError> {
        if !dir.is_dir() {
            return Err(CatalogError::MissingDir(dir.to_path_buf()));
        }

        let mut levels = Vec::new();
        let mut any_found = false;
        for i in 1..100 {
            let path = dir.join(format!("level{}.txt", i));
            if path.is_file() {
                any_found = true;
                match fs::read_to_string(&path) {
                    Ok(contents) => {
                        let rows = rows_from_text(&contents);
                        if rows.is_empty() {
                            warn!("level file '{}' is empty, skipping", path.display());
                            continue;
                        }
                        levels.push(rows);
                    }
                    Err(err) => {
                        warn!("failed to read level file '{}': {}", path.display(), err);
                    }
                }
            } else if any_found {
                break;
            } else if i > 5 {
                break;
            }
        }

        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        info!("loaded {} levels from '{}'", levels.len(), dir.display());
        Ok(Catalog { levels })
    }

    /// Build a catalog from in-memory level texts. Empty texts are skipped
    /// like empty files; an empty catalog is permitted here so callers can
    /// exercise the no-levels path.
    pub fn from_texts(texts: &[&str]) -> Self {
        let levels = texts
            .iter()
            .map(|text| rows_from_text(text))
            .filter(|rows| !rows.is_empty())
            .collect();
        Catalog { levels }
    }

    /// Get the nth raw level definition (0-indexed).
    pub fn get(&self, index: usize) -> Option<&[String]> {
        self.levels.get(index).map(|rows| rows.as_slice())
    }

    /// Get the number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Split level text into rows, stripping trailing newlines and skipping blank
/// lines entirely (they are separators, not empty rows).
fn rows_from_text(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_texts_basic() {
        let catalog = Catalog::from_texts(&["####\n#@.#\n####", "#####\n#@$.#\n#####"]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.get(0).unwrap(),
            &["####".to_string(), "#@.#".to_string(), "####".to_string()]
        );
        assert!(catalog.get(2).is_none());
    }

    #[test]
    fn test_blank_lines_skipped() {
        let catalog = Catalog::from_texts(&["####\n\n#@.#\n   \n####\n"]);
        assert_eq!(catalog.get(0).unwrap().len(), 3);
    }

    #[test]
    fn test_empty_texts_skipped() {
        let catalog = Catalog::from_texts(&["", "   \n\n", "###\n#@#\n###"]);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_empty_catalog_permitted_in_memory() {
        let catalog = Catalog::from_texts(&[]);
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn test_from_dir_missing() {
        let result = Catalog::from_dir(Path::new("nonexistent_levels_dir"));
        assert!(matches!(result, Err(CatalogError::MissingDir(_))));
    }

    #[test]
    fn test_from_dir_probing_and_skipping() {
        let dir = std::env::temp_dir().join(format!("hakoban-levels-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("level1.txt"), "####\n#@.#\n####\n").unwrap();
        fs::write(dir.join("level2.txt"), "\n   \n").unwrap(); // empty, skipped
        fs::write(dir.join("level3.txt"), "#####\n#@$.#\n#####\n").unwrap();
        // level4.txt missing: probing stops there
        fs::write(dir.join("level5.txt"), "###\n#@#\n###\n").unwrap();

        let catalog = Catalog::from_dir(&dir).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap()[1], "#@$.#");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_from_dir_all_empty_is_error() {
        let dir = std::env::temp_dir().join(format!("hakoban-empty-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("level1.txt"), "\n\n").unwrap();

        let result = Catalog::from_dir(&dir);
        assert!(matches!(result, Err(CatalogError::Empty)));

        fs::remove_dir_all(&dir).unwrap();
    }
}
