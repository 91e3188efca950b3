use super::domain::{
    AssessmentId, AssessmentRecord, MaskingSessionRecord, OutcomeRecord, PatientId, ScreeningId,
    ScreeningRecord, TriageEntry,
};
use crate::workflows::tinnitus::CarePathFacts;

/// Persistence boundary for clinical records. Row-level ownership is enforced by callers.
pub trait ClinicalRecordStore: Send + Sync {
    fn insert_triage(&self, entry: TriageEntry) -> Result<(), RepositoryError>;
    fn insert_screening(&self, record: ScreeningRecord)
        -> Result<ScreeningRecord, RepositoryError>;
    fn fetch_screening(&self, id: &ScreeningId) -> Result<Option<ScreeningRecord>, RepositoryError>;
    fn insert_assessment(
        &self,
        record: AssessmentRecord,
    ) -> Result<AssessmentRecord, RepositoryError>;
    fn fetch_assessment(
        &self,
        id: &AssessmentId,
    ) -> Result<Option<AssessmentRecord>, RepositoryError>;
    fn insert_outcome(&self, record: OutcomeRecord) -> Result<(), RepositoryError>;
    fn insert_masking_session(&self, record: MaskingSessionRecord) -> Result<(), RepositoryError>;
    /// Screening count, assessment count, and the step of the newest assessment.
    fn care_path_facts(&self, patient: &PatientId) -> Result<CarePathFacts, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
