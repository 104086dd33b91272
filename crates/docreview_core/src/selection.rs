use crate::model::SelectedFile;

pub const NO_FILES_PLACEHOLDER: &str = "No files selected";

/// Where a selection came from. Both sources feed the same store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    DragDrop,
    Picker,
}

/// The user's current set of files.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileSelectionStore {
    files: Vec<SelectedFile>,
}

impl FileSelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection wholesale. No type or size checks happen here.
    pub fn set_files(&mut self, files: Vec<SelectedFile>) {
        self.files = files;
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn view(&self) -> FileListView {
        if self.files.is_empty() {
            return FileListView::Placeholder(NO_FILES_PLACEHOLDER);
        }
        FileListView::Files(
            self.files
                .iter()
                .map(|file| FileRowView {
                    name: file.name.clone(),
                    size_label: size_label(file.size_bytes),
                })
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileListView {
    Placeholder(&'static str),
    Files(Vec<FileRowView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub name: String,
    pub size_label: String,
}

/// Kilobytes rounded half-up, e.g. `40 KB`.
pub fn size_label(size_bytes: u64) -> String {
    let kb = (size_bytes + 512) / 1024;
    format!("{kb} KB")
}
