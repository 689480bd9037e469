use anyhow::{Context, Result};
use glob::glob;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions of files that may contain `require` calls.
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "cjs", "mjs", "jsx", "ts", "cts", "mts", "tsx"];

pub struct FileHandler {
    backup_enabled: bool,
}

impl FileHandler {
    pub fn new(backup_enabled: bool) -> Self {
        Self { backup_enabled }
    }

    /// Expand files, directories and glob patterns into the script files they name.
    pub fn find_script_files(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for path in paths {
            if path.is_file() {
                if is_script_file(path) {
                    files.push(path.clone());
                }
            } else if path.is_dir() {
                self.find_in_dir(path, &mut files)?;
            } else {
                let pattern = path.to_str().context("Invalid path")?;
                for entry in glob(pattern).context("Failed to read glob pattern")? {
                    let file = entry.context("Failed to process glob entry")?;
                    if is_script_file(&file) {
                        files.push(file);
                    }
                }
            }
        }

        files.sort();
        files.dedup();
        debug!(count = files.len(), "discovered script files");
        Ok(files)
    }

    fn find_in_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

        for entry in entries {
            let path = entry.context("Failed to read directory entry")?.path();

            if path.is_dir() {
                let skipped = path
                    .file_name()
                    .map(|name| name.to_string_lossy())
                    .is_some_and(|name| name == "node_modules" || name.starts_with('.'));
                if !skipped {
                    self.find_in_dir(&path, files)?;
                }
            } else if is_script_file(&path) {
                files.push(path);
            }
        }
        Ok(())
    }

    pub fn read_file(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    pub fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        if self.backup_enabled {
            self.create_backup(path)?;
        }

        fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
    }

    fn create_backup(&self, path: &Path) -> Result<()> {
        let backup_path = path.with_extension(format!(
            "{}.bak",
            path.extension().and_then(|ext| ext.to_str()).unwrap_or("")
        ));

        fs::copy(path, &backup_path)
            .with_context(|| format!("Failed to create backup: {}", backup_path.display()))?;

        Ok(())
    }
}

pub fn is_script_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SCRIPT_EXTENSIONS.contains(&ext))
}
