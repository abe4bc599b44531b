//! Practice directory models
//!
//! The directory is fetched from the organisation registry by another job and
//! handed to this crate read-only. A practice may own several ASIDs (one per
//! clinical system it runs).

use chrono::NaiveDateTime;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One GP practice and the device identifiers it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeDetails {
    /// ODS code of the practice
    pub ods_code: String,
    /// Display name
    pub name: String,
    /// ASIDs registered to the practice
    #[serde(default)]
    pub asids: Vec<String>,
}

impl PracticeDetails {
    /// Create a practice with the given ASIDs
    #[must_use]
    pub fn new(ods_code: impl Into<String>, name: impl Into<String>, asids: Vec<String>) -> Self {
        Self {
            ods_code: ods_code.into(),
            name: name.into(),
            asids,
        }
    }
}

/// The organisation list as produced by the registry export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeDirectory {
    /// When the export was taken
    pub generated_on: NaiveDateTime,
    /// All active practices
    pub practices: Vec<PracticeDetails>,
}

/// ASID to practice lookup built once over the directory
#[derive(Debug, Clone)]
pub struct PracticeLookup {
    practices: Vec<PracticeDetails>,
    asid_to_practice: FxHashMap<String, usize>,
}

impl PracticeLookup {
    /// Index every ASID of every practice
    ///
    /// If two practices claim the same ASID, the later entry wins.
    #[must_use]
    pub fn new(practices: Vec<PracticeDetails>) -> Self {
        let asid_to_practice = practices
            .iter()
            .enumerate()
            .flat_map(|(idx, practice)| practice.asids.iter().map(move |asid| (asid.clone(), idx)))
            .collect();

        Self {
            practices,
            asid_to_practice,
        }
    }

    /// Whether the ASID belongs to a known practice
    #[must_use]
    pub fn has_asid_code(&self, asid: &str) -> bool {
        self.asid_to_practice.contains_key(asid)
    }

    /// ODS code of the practice owning the ASID
    #[must_use]
    pub fn ods_code_from_asid(&self, asid: &str) -> Option<&str> {
        self.practice_index(asid)
            .map(|idx| self.practices[idx].ods_code.as_str())
    }

    /// Directory position of the practice owning the ASID
    #[must_use]
    pub fn practice_index(&self, asid: &str) -> Option<usize> {
        self.asid_to_practice.get(asid).copied()
    }

    /// All practices in directory order
    pub fn all_practices(&self) -> impl Iterator<Item = &PracticeDetails> {
        self.practices.iter()
    }

    /// Number of practices in the directory
    #[must_use]
    pub fn len(&self) -> usize {
        self.practices.len()
    }

    /// Whether the directory is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.practices.is_empty()
    }
}

impl From<PracticeDirectory> for PracticeLookup {
    fn from(directory: PracticeDirectory) -> Self {
        Self::new(directory.practices)
    }
}
