//! Directory-backed store of page records.
//!
//! Every record lives in its own file named after the BLAKE3 digest of its
//! URL, so re-crawling a URL overwrites the earlier record.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::corpus::record::PageRecord;
use crate::error::{Result, SemcrawlError};

const RECORD_EXTENSION: &str = "json";

/// A flat directory of JSON page records.
#[derive(Debug, Clone)]
pub struct CorpusStore {
    directory: PathBuf,
}

impl CorpusStore {
    /// Open a store rooted at `directory`, creating it if needed.
    pub fn new<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();

        if !directory.exists() {
            fs::create_dir_all(&directory)
                .map_err(|e| SemcrawlError::storage(format!("Failed to create directory: {e}")))?;
        }

        if !directory.is_dir() {
            return Err(SemcrawlError::storage(format!(
                "Path is not a directory: {}",
                directory.display()
            )));
        }

        Ok(CorpusStore { directory })
    }

    /// Open an existing store without creating anything.
    pub fn open<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();
        if !directory.is_dir() {
            return Err(SemcrawlError::storage(format!(
                "Corpus directory not found: {}",
                directory.display()
            )));
        }
        Ok(CorpusStore { directory })
    }

    /// The directory this store reads and writes.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File name used for the record of `url`: hex BLAKE3 digest plus `.json`.
    pub fn record_file_name(url: &str) -> String {
        format!("{}.{RECORD_EXTENSION}", blake3::hash(url.as_bytes()).to_hex())
    }

    /// Full path of the record file for `url`.
    pub fn record_path(&self, url: &str) -> PathBuf {
        self.directory.join(Self::record_file_name(url))
    }

    /// Write a record, replacing any earlier record for the same URL.
    pub fn save(&self, record: &PageRecord) -> Result<PathBuf> {
        let path = self.record_path(&record.url);
        fs::write(&path, Self::encode(record)?)?;
        Ok(path)
    }

    /// Asynchronous variant of [`save`](Self::save) used by crawl workers.
    pub async fn persist(&self, record: &PageRecord) -> Result<PathBuf> {
        let path = self.record_path(&record.url);
        tokio::fs::write(&path, Self::encode(record)?).await?;
        Ok(path)
    }

    /// Names of all record files, sorted. Subdirectories are not visited.
    pub fn list_record_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in fs::read_dir(&self.directory)? {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type()?.is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some(RECORD_EXTENSION)
            {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Read every record in the store.
    ///
    /// Files that cannot be read or do not hold a complete record are skipped
    /// with a warning. The result follows [`list_record_files`](Self::list_record_files) order.
    pub fn load_records(&self) -> Result<Vec<PageRecord>> {
        let files = self.list_record_files()?;

        let records: Vec<Option<PageRecord>> = files
            .par_iter()
            .map(|path| match Self::read_record(path) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping record {}: {e}", path.display());
                    None
                }
            })
            .collect();

        Ok(records.into_iter().flatten().collect())
    }

    /// Read and parse a single record file.
    pub fn read_record(path: &Path) -> Result<PageRecord> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn encode(record: &PageRecord) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        record.serialize(&mut serializer)?;
        Ok(buffer)
    }
}
