//! Files picked for upload but not sent yet.

use crate::error::ValidationError;

/// What the staging set needs to know about a picked file.
pub trait StagedFile {
    fn name(&self) -> String;

    /// Size in bytes.
    fn size(&self) -> f64;
}

impl StagedFile for web_sys::File {
    fn name(&self) -> String {
        web_sys::File::name(self)
    }

    fn size(&self) -> f64 {
        web_sys::Blob::size(self)
    }
}

pub fn is_pdf_name(name: &str) -> bool {
    name.to_lowercase().ends_with(".pdf")
}

/// Size shown next to a staged file, e.g. `"12 KB"`.
pub fn size_label(bytes: f64) -> String {
    format!("{} KB", (bytes / 1024.0).round() as u64)
}

/// Checks a quick-upload selection: one file that is not a PDF rejects the
/// whole selection.
pub fn validate_quick_batch<F: StagedFile>(files: &[F]) -> Result<(), ValidationError> {
    match files.iter().find(|f| !is_pdf_name(&f.name())) {
        Some(file) => Err(ValidationError::NotPdf(file.name())),
        None => Ok(()),
    }
}

/// Staged files keyed by name, in the order they were picked. A name can only
/// be staged once; picking it again keeps the first file.
#[derive(Debug, Clone)]
pub struct StagingSet<F> {
    entries: Vec<(String, F)>,
}

impl<F> Default for StagingSet<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F: StagedFile> StagingSet<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages every PDF in `files` whose name is not staged yet. Everything
    /// else is skipped silently. Returns how many were added.
    pub fn add(&mut self, files: impl IntoIterator<Item = F>) -> usize {
        let mut added = 0;
        for file in files {
            let name = file.name();
            if !is_pdf_name(&name) || self.contains(&name) {
                continue;
            }
            self.entries.push((name, file));
            added += 1;
        }
        added
    }

    pub fn remove(&mut self, name: &str) -> Option<F> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&F> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &F)> {
        self.entries.iter().map(|(n, f)| (n.as_str(), f))
    }

    /// Copies of the staged files, for building an upload request while the
    /// set stays intact until the upload succeeds.
    pub fn files(&self) -> Vec<F>
    where
        F: Clone,
    {
        self.entries.iter().map(|(_, f)| f.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeFile;

    #[test]
    fn duplicate_names_keep_first_staged_file() {
        let mut staging = StagingSet::new();
        let added = staging.add(vec![
            FakeFile::new("a.pdf", 1000.0),
            FakeFile::new("b.pdf", 2000.0),
            FakeFile::new("a.pdf", 3000.0),
        ]);

        assert_eq!(added, 2);
        assert_eq!(staging.len(), 2);
        assert_eq!(staging.names(), vec!["a.pdf", "b.pdf"]);
        assert_eq!(staging.get("a.pdf").map(|f| f.size), Some(1000.0));
    }

    #[test]
    fn later_selection_cannot_replace_a_staged_name() {
        let mut staging = StagingSet::new();
        staging.add(vec![FakeFile::new("a.pdf", 1.0)]);
        assert_eq!(staging.add(vec![FakeFile::new("a.pdf", 2.0)]), 0);
        assert_eq!(staging.get("a.pdf").map(|f| f.size), Some(1.0));
    }

    #[test]
    fn only_pdf_names_are_staged() {
        let mut staging = StagingSet::new();
        staging.add(vec![
            FakeFile::new("scan.PDF", 1.0),
            FakeFile::new("notes.txt", 1.0),
            FakeFile::new("pdf", 1.0),
        ]);
        assert_eq!(staging.names(), vec!["scan.PDF"]);
    }

    #[test]
    fn remove_and_clear() {
        let mut staging = StagingSet::new();
        staging.add(vec![FakeFile::new("a.pdf", 1.0), FakeFile::new("b.pdf", 1.0)]);
        assert!(staging.remove("a.pdf").is_some());
        assert!(staging.remove("a.pdf").is_none());
        assert_eq!(staging.names(), vec!["b.pdf"]);
        staging.clear();
        assert!(staging.is_empty());
    }

    #[test]
    fn quick_batch_rejects_on_first_non_pdf() {
        let files = vec![
            FakeFile::new("a.pdf", 1.0),
            FakeFile::new("b.docx", 1.0),
            FakeFile::new("c.txt", 1.0),
        ];
        assert_eq!(
            validate_quick_batch(&files),
            Err(ValidationError::NotPdf("b.docx".to_string()))
        );
        assert_eq!(validate_quick_batch(&files[..1]), Ok(()));
    }

    #[test]
    fn size_label_rounds_to_kilobytes() {
        assert_eq!(size_label(0.0), "0 KB");
        assert_eq!(size_label(1536.0), "2 KB");
        assert_eq!(size_label(10_240.0), "10 KB");
    }
}
