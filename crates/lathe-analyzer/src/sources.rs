use crate::{Analysis, CancellationToken, Document};
use indexmap::IndexMap;
use lsp_types::Range;
use std::fmt;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

/// Integer identifier for an open source file. Ids are process-unique and
/// never reused, so a stale id simply misses.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FileId {
    id: NonZeroU64,
}

impl FileId {
    /// Allocate a fresh id.
    pub fn new() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        loop {
            let id = NEXT.fetch_add(1, Ordering::AcqRel);
            if let Some(id) = NonZeroU64::new(id) {
                return Self { id };
            }
        }
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.id)
    }
}

/// One open file: its document and the analysis of its current revision.
pub struct SourceEntry {
    document: Document,
    analysis: Analysis,
}

impl SourceEntry {
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }
}

/// The open documents of an editor session, keyed by [`FileId`].
///
/// The map holds text blobs only; reading files off disk is the
/// editor-server's job. Every mutation re-parses the affected document, so
/// an entry's analysis is never stale.
#[derive(Default)]
pub struct Sources {
    files: IndexMap<FileId, SourceEntry>,
}

impl Sources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document and return its id.
    pub fn open(&mut self, text: impl Into<String>) -> FileId {
        let id = FileId::new();
        let document = Document::of(text);
        let analysis = Analysis::of(&document);
        self.files.insert(id, SourceEntry { document, analysis });
        id
    }

    /// Drop a document. Returns whether it was open.
    pub fn close(&mut self, id: FileId) -> bool {
        self.files.shift_remove(&id).is_some()
    }

    pub fn get(&self, id: FileId) -> Option<&SourceEntry> {
        self.files.get(&id)
    }

    /// Apply an edit to an open document and re-analyze it. Returns whether
    /// the id was open.
    pub fn edit(&mut self, id: FileId, range: Option<Range>, text: &str) -> bool {
        let Some(entry) = self.files.get_mut(&id) else {
            return false;
        };
        entry.document.apply_edit(range, text);
        entry.analysis = Analysis::of(&entry.document);
        true
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FileId, &SourceEntry)> {
        self.files.iter().map(|(id, entry)| (*id, entry))
    }

    /// Visit every open file, checking for cancellation between files.
    /// Returns `None` when cancelled, the sentinel for "apply nothing".
    pub fn scan<T>(
        &self,
        token: &CancellationToken,
        mut visit: impl FnMut(FileId, &SourceEntry) -> Vec<T>,
    ) -> Option<Vec<T>> {
        let mut results = Vec::new();
        for (id, entry) in &self.files {
            if token.is_cancelled() {
                return None;
            }
            results.extend(visit(*id, entry));
        }
        Some(results)
    }
}
