//! File registry: the PDFs the user has dropped or picked.

use crate::file_utils::{generate_unique_id, is_pdf_upload};
use crate::schema::UploadedFile;
use rand::Rng;

/// A file as handed over by the browser, before it is accepted.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl IncomingFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FileRegistry {
    files: Vec<UploadedFile>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every PDF in `incoming` and drops the rest.
    ///
    /// Each accepted file gets a fresh id and a page count drawn uniformly
    /// from `1..=max_page_count`. Returns the ids of the accepted files in
    /// input order.
    pub fn add_files<R: Rng + ?Sized>(
        &mut self,
        incoming: Vec<IncomingFile>,
        max_page_count: u32,
        rng: &mut R,
    ) -> Vec<String> {
        let max_page_count = max_page_count.max(1);
        let mut accepted = Vec::new();

        for file in incoming {
            if !is_pdf_upload(&file.mime_type, &file.name) {
                continue;
            }
            let id = generate_unique_id(rng, |candidate| self.get(candidate).is_some());
            self.files.push(UploadedFile {
                id: id.clone(),
                name: file.name,
                size: file.bytes.len(),
                page_count: rng.gen_range(1..=max_page_count),
                bytes: file.bytes,
            });
            accepted.push(id);
        }

        accepted
    }

    /// Removes one file. Returns `false` if the id is unknown.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f.id != id);
        self.files.len() != before
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn get(&self, id: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.id == id)
    }

    /// The file the export action downloads.
    pub fn first(&self) -> Option<&UploadedFile> {
        self.files.first()
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_pages(&self) -> u32 {
        self.files.iter().map(|f| f.page_count).sum()
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size as u64).sum()
    }
}
