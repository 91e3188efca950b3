//! Patient-facing care service: wires the triage and tinnitus rules to a clinical record
//! store and exposes them over HTTP.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AssessmentId, AssessmentRecord, ImpactView, InterviewReceipt, MaskingSessionRecord,
    OutcomeRecord, PatientId, ScreeningId, ScreeningReceipt, ScreeningRecord,
    TreatmentRecommendation, TriageEntry, TriageOutcome, TriageResultView,
};
pub use repository::{ClinicalRecordStore, RepositoryError};
pub use router::{patient_router, PatientRouterState};
pub use service::{PatientCareError, PatientCareService};
