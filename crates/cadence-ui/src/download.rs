//! Writes generated export files where the user expects downloads to land.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// A file produced for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub path: PathBuf,
    pub mime: &'static str,
}

/// The platform downloads folder, falling back to the app data dir on
/// headless setups without one.
pub fn download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(cadence_core::store::default_data_dir)
}

pub fn save_text(
    dir: &Path,
    filename: &str,
    contents: &str,
    mime: &'static str,
) -> Result<DownloadedFile> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(filename);
    std::fs::write(&path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(DownloadedFile { path, mime })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_text_writes_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("exports");

        let file = save_text(&target, "out.md", "# hello", "text/markdown;charset=utf-8").unwrap();

        assert_eq!(std::fs::read_to_string(&file.path).unwrap(), "# hello");
        assert_eq!(file.mime, "text/markdown;charset=utf-8");
    }
}
