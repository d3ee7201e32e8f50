//! JSON persistence for the record book.
//!
//! One pretty-printed JSON file holds every contact and application. A
//! missing file reads as an empty book so first launch needs no setup;
//! a file that exists but fails to decode is surfaced as an error rather
//! than silently replaced.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{JobdexError, Result};
use crate::model::{Contact, JobApplication};

/// Everything the record keeper persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordBook {
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub applications: Vec<JobApplication>,
    /// Stamped on every save.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl RecordBook {
    /// Read a book from `path`. A missing file yields an empty book.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no record file yet, starting empty");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|source| JobdexError::CorruptStore {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the book to `path`, creating parent directories as needed.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        self.saved_at = Some(Utc::now());
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Default record file under the platform data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jobdex")
            .join("records.json")
    }

    pub fn add_contact(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    /// Contact at a 1-based display index.
    pub fn contact(&self, index: usize) -> Result<&Contact> {
        index
            .checked_sub(1)
            .and_then(|i| self.contacts.get(i))
            .ok_or_else(|| out_of_range("contact", index, self.contacts.len()))
    }

    pub fn contact_mut(&mut self, index: usize) -> Result<&mut Contact> {
        let len = self.contacts.len();
        index
            .checked_sub(1)
            .and_then(|i| self.contacts.get_mut(i))
            .ok_or_else(|| out_of_range("contact", index, len))
    }

    /// Remove the contact at a 1-based index, dropping its applications
    /// with it.
    pub fn remove_contact(&mut self, index: usize) -> Result<Contact> {
        let i = index
            .checked_sub(1)
            .filter(|i| *i < self.contacts.len())
            .ok_or_else(|| out_of_range("contact", index, self.contacts.len()))?;
        let contact = self.contacts.remove(i);
        self.applications.retain(|a| a.contact != contact.id);
        Ok(contact)
    }

    pub fn add_application(&mut self, application: JobApplication) {
        self.applications.push(application);
    }

    /// Application at a 1-based display index.
    pub fn application_mut(&mut self, index: usize) -> Result<&mut JobApplication> {
        let len = self.applications.len();
        index
            .checked_sub(1)
            .and_then(|i| self.applications.get_mut(i))
            .ok_or_else(|| out_of_range("application", index, len))
    }

    pub fn contact_by_id(&self, id: Uuid) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.contacts.clear();
        self.applications.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty() && self.applications.is_empty()
    }
}

fn out_of_range(kind: &str, index: usize, len: usize) -> JobdexError {
    JobdexError::Execution(format!(
        "no {kind} at index {index} (there are {len})"
    ))
}
