// batch.rs — Editing remarks for many folders at once
//
// Each entry keeps the values read from disk (`original`) next to the
// values being edited (`current`).  The snapshot is a plain clone; revert
// copies it back, a successful save replaces it.

use std::path::{Path, PathBuf};

use crate::ehm::AppError;
use crate::folder_info::{FolderField, FolderInfo};
use crate::remark_manager::{read_folder_remark, RemarkManager};
use crate::shell_provider::ShellProvider;





////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub folder_path: PathBuf,
    pub folder_name: String,
    pub original:    FolderInfo,
    pub current:     FolderInfo,
    pub selected:    bool,
    pub error:       Option<String>,
}

impl BatchEntry {

    ////////////////////////////////////////////////////////////////////////////
    //
    //  load
    //
    //  Reads the folder's remark; missing or unreadable remarks load empty.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn load(folder_path: &Path) -> Self {
        let info = read_folder_remark(folder_path);
        let folder_name = folder_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| folder_path.display().to_string());

        BatchEntry {
            folder_path: folder_path.to_path_buf(),
            folder_name,
            original:    info.clone(),
            current:     info,
            selected:    true,
            error:       None,
        }
    }

    /// True when saving would change what is on disk.
    pub fn is_modified(&self) -> bool {
        self.current.cleaned() != self.original.cleaned()
    }

    pub fn revert(&mut self) {
        self.current = self.original.clone();
        self.error = None;
    }
}





////////////////////////////////////////////////////////////////////////////////

#[derive(Debug)]
pub struct BatchFailure {
    pub folder_path: PathBuf,
    pub error:       AppError,
}

/// Outcome of a batch save.  One failed folder never stops the others.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub saved:    usize,
    pub skipped:  usize,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}





////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Default)]
pub struct BatchEditor {
    entries: Vec<BatchEntry>,
}

impl BatchEditor {
    pub fn load<I, S>(folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        BatchEditor {
            entries: folders.into_iter().map(|f| BatchEntry::load(f.as_ref())).collect(),
        }
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    pub fn entry_mut(&mut self, index: usize) -> Option<&mut BatchEntry> {
        self.entries.get_mut(index)
    }

    pub fn modified_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_modified()).count()
    }

    // ── Selection ─────────────────────────────────────────────────────────────

    pub fn select_all(&mut self) {
        self.entries.iter_mut().for_each(|e| e.selected = true);
    }

    pub fn select_none(&mut self) {
        self.entries.iter_mut().for_each(|e| e.selected = false);
    }

    pub fn invert_selection(&mut self) {
        self.entries.iter_mut().for_each(|e| e.selected = !e.selected);
    }

    // ── Editing ───────────────────────────────────────────────────────────────

    ////////////////////////////////////////////////////////////////////////////
    //
    //  apply_to_selected
    //
    //  Sets one field on every selected entry.  Returns how many entries
    //  were touched.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn apply_to_selected(&mut self, field: FolderField, value: &str) -> usize {
        let mut count = 0;
        for entry in self.entries.iter_mut().filter(|e| e.selected) {
            entry.current.set(field, value);
            count += 1;
        }
        count
    }

    pub fn clear_selected(&mut self, field: FolderField) -> usize {
        self.apply_to_selected(field, "")
    }

    pub fn revert(&mut self, index: usize) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => { entry.revert(); true }
            None => false,
        }
    }

    pub fn revert_all(&mut self) {
        self.entries.iter_mut().for_each(BatchEntry::revert);
    }

    // ── Saving ────────────────────────────────────────────────────────────────

    /// Writes every modified entry.
    pub fn save_modified<P: ShellProvider>(&mut self, manager: &RemarkManager<P>) -> BatchReport {
        self.save_where(manager, |e| e.is_modified())
    }

    /// Writes every selected entry, modified or not.
    pub fn save_selected<P: ShellProvider>(&mut self, manager: &RemarkManager<P>) -> BatchReport {
        self.save_where(manager, |e| e.selected)
    }





    ////////////////////////////////////////////////////////////////////////////
    //
    //  save_where
    //
    //  Writes entries matching `pick`.  Saved entries get a fresh snapshot
    //  and lose any old error; failed ones keep their edits and record the
    //  message.
    //
    ////////////////////////////////////////////////////////////////////////////

    fn save_where<P, F>(&mut self, manager: &RemarkManager<P>, pick: F) -> BatchReport
    where
        P: ShellProvider,
        F: Fn(&BatchEntry) -> bool,
    {
        let mut report = BatchReport::default();
        let total = self.entries.len();

        for (i, entry) in self.entries.iter_mut().enumerate() {
            if !pick(entry) {
                report.skipped += 1;
                continue;
            }

            log::debug!("saving folder {}/{}: {}", i + 1, total, entry.folder_name);

            match manager.write(&entry.folder_path, &entry.current) {
                Ok(()) => {
                    entry.current  = entry.current.cleaned();
                    entry.original = entry.current.clone();
                    entry.error    = None;
                    report.saved  += 1;
                }
                Err(e) => {
                    log::warn!("{}: {}", entry.folder_path.display(), e);
                    entry.error = Some(e.to_string());
                    report.failures.push(BatchFailure {
                        folder_path: entry.folder_path.clone(),
                        error:       e,
                    });
                }
            }
        }

        report
    }
}
