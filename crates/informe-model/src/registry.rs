//! Doctor registry: name to professional credential lookup.
//!
//! The registry is plain configuration data. It is loaded by the caller and
//! passed into resolution, so tests and deployments can swap it freely.

use serde::{Deserialize, Serialize};

/// Credential text used when a doctor is not registered.
pub const UNKNOWN_CREDENTIAL: &str = "N/A";

/// A registered doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorEntry {
    pub name: String,
    /// Registration text printed on reports, e.g. the college membership number.
    pub credential: String,
}

impl DoctorEntry {
    pub fn new(name: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            credential: credential.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoctorRegistry {
    entries: Vec<DoctorEntry>,
}

impl DoctorRegistry {
    pub fn new(entries: Vec<DoctorEntry>) -> Self {
        Self { entries }
    }

    /// Exact, case-sensitive lookup. The first matching entry wins.
    pub fn find(&self, name: &str) -> Option<&DoctorEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Credential for `name`, or [`UNKNOWN_CREDENTIAL`].
    pub fn credential_or_unknown(&self, name: &str) -> &str {
        self.find(name)
            .map_or(UNKNOWN_CREDENTIAL, |entry| entry.credential.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn entries(&self) -> &[DoctorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<DoctorEntry> for DoctorRegistry {
    fn from_iter<T: IntoIterator<Item = DoctorEntry>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
