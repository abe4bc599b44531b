//! Organisation metadata published next to the practice metrics

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::PracticeLookup;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeEntry {
    pub ods_code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationMetadataPresentation {
    pub generated_on: DateTime<Utc>,
    pub practices: Vec<PracticeEntry>,
}

/// List every practice of the directory by ODS code and name
#[must_use]
pub fn construct_organisation_metadata(
    lookup: &PracticeLookup,
    generated_on: DateTime<Utc>,
) -> OrganisationMetadataPresentation {
    OrganisationMetadataPresentation {
        generated_on,
        practices: lookup
            .all_practices()
            .map(|practice| PracticeEntry {
                ods_code: practice.ods_code.clone(),
                name: practice.name.clone(),
            })
            .collect(),
    }
}
