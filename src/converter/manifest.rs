//! Level manifest and tile index

use std::fs;
use std::path::Path;

use crate::errors::TerrainResult;

/// Name of the manifest file in the output directory
pub const MANIFEST_FILE: &str = "Level.dir.txt";

/// Name of the tile index file in the output directory
pub const INDEX_FILE: &str = "index.txt";

/// Entries every manifest starts with; they are not produced by extraction
pub const BOOTSTRAP_ENTRIES: [&str; 3] = ["gradient.img", "icon.img", INDEX_FILE];

/// Ordered file list of a terrain plus the stems listed in `index.txt`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    files: Vec<String>,
    index: Vec<String>,
}

impl Manifest {
    /// Create a manifest holding only the bootstrap entries
    pub fn new() -> Self {
        Manifest {
            files: BOOTSTRAP_ENTRIES.iter().map(|s| s.to_string()).collect(),
            index: Vec::new(),
        }
    }

    pub fn push_file(&mut self, name: impl Into<String>) {
        self.files.push(name.into());
    }

    pub fn push_index(&mut self, stem: impl Into<String>) {
        self.index.push(stem.into());
    }

    /// Manifest entries in write order
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Index stems in write order
    pub fn index_stems(&self) -> &[String] {
        &self.index
    }

    /// Write `Level.dir.txt` and `index.txt`, one entry per line
    pub fn write(&self, output_dir: &Path) -> TerrainResult<()> {
        fs::write(output_dir.join(MANIFEST_FILE), join_lines(&self.files))?;
        fs::write(output_dir.join(INDEX_FILE), join_lines(&self.index))?;
        Ok(())
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Manifest::new()
    }
}

fn join_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{}\n", line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_manifest_has_bootstrap_entries() {
        let manifest = Manifest::new();
        assert_eq!(manifest.files(), ["gradient.img", "icon.img", "index.txt"]);
        assert!(manifest.index_stems().is_empty());
    }

    #[test]
    fn test_write_one_entry_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let mut manifest = Manifest::new();
        manifest.push_file("text.img");
        manifest.push_file("floor00.img");
        manifest.push_file("floor00.inf");
        manifest.push_index("floor00");
        manifest.write(dir.path()).unwrap();

        let listing = fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        assert_eq!(listing, "gradient.img\nicon.img\nindex.txt\ntext.img\nfloor00.img\nfloor00.inf\n");
        let index = fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap();
        assert_eq!(index, "floor00\n");
    }

    #[test]
    fn test_empty_index_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        Manifest::new().write(dir.path()).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap(), "");
    }
}
