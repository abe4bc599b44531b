//! Dashboard presentation records
//!
//! Output shapes handed to the writers. Every record carries the generation
//! timestamp supplied by the caller and serialises with camelCase keys.

pub mod national;
pub mod organisation;
pub mod practice;

pub use national::{NationalMetricsPresentation, construct_national_metrics};
pub use organisation::{OrganisationMetadataPresentation, construct_organisation_metadata};
pub use practice::{PracticeMetricsPresentation, construct_practice_summaries};
