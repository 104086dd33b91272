use std::fs;
use std::path::{Path, PathBuf};

use docreview_core::SelectedFile;
use docreview_logging::review_warn;

use crate::SelectionError;

#[derive(Debug, Default)]
pub struct ResolvedSelection {
    pub files: Vec<SelectedFile>,
    pub skipped: Vec<SelectionError>,
}

/// Turns dropped or picked paths into selected files. Unreadable paths are
/// skipped; type and size checks belong to the server.
pub fn resolve_selection(paths: &[PathBuf]) -> ResolvedSelection {
    let mut resolved = ResolvedSelection::default();
    for path in paths {
        match selected_file_from_path(path) {
            Ok(file) => resolved.files.push(file),
            Err(err) => {
                review_warn!("Skipping selection: {}", err);
                resolved.skipped.push(err);
            }
        }
    }
    resolved
}

pub fn selected_file_from_path(path: &Path) -> Result<SelectedFile, SelectionError> {
    let meta = fs::metadata(path).map_err(|source| SelectionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if !meta.is_file() {
        return Err(SelectionError::NotAFile(path.to_path_buf()));
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| SelectionError::NotAFile(path.to_path_buf()))?;
    Ok(SelectedFile::new(name, meta.len(), path))
}
