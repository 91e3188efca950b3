use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::IdentityConfig;
use crate::workflows::patient::domain::{
    AssessmentId, AssessmentRecord, MaskingSessionRecord, OutcomeRecord, PatientId, ScreeningId,
    ScreeningRecord, TriageEntry,
};
use crate::workflows::patient::repository::{ClinicalRecordStore, RepositoryError};
use crate::workflows::patient::{patient_router, PatientCareService};
use crate::workflows::tinnitus::{
    CarePathFacts, InterviewSubmission, OutcomeSubmission, ScreenerSubmission,
    SoundMaskingSubmission, ThsSubmission,
};
use crate::workflows::triage::TriageSubmission;

pub(super) fn patient() -> PatientId {
    PatientId("patient-42".to_string())
}

pub(super) fn triage_submission() -> TriageSubmission {
    TriageSubmission {
        age: 50,
        noise_exposure: "1-3hr".to_string(),
        hearing_difficulty: "Sometimes".to_string(),
        tinnitus: "Occasionally".to_string(),
        family_history: "No".to_string(),
    }
}

pub(super) fn screener_submission() -> ScreenerSubmission {
    ScreenerSubmission {
        duration: "persistent".to_string(),
        bothersomeness_score: 7,
        sleep_impact: "moderate".to_string(),
        concentration_impact: "mild".to_string(),
        emotional_impact: "mild".to_string(),
        hearing_difficulty: "often".to_string(),
    }
}

/// Sections total 12 plus the screening bonus: moderate impact, step 4.
pub(super) fn ths_submission() -> ThsSubmission {
    ThsSubmission {
        screening_id: None,
        section_a_score: 5,
        section_b_score: 4,
        section_c_screening: true,
        section_d_score: 3,
    }
}

pub(super) fn interview_submission() -> InterviewSubmission {
    InterviewSubmission {
        onset: "sudden".to_string(),
        laterality: "left".to_string(),
        sound_description: "buzzing like a fridge".to_string(),
        triggers: None,
        hearing_care_history: "none".to_string(),
        noise_exposure: "high".to_string(),
        sleep_quality: "poor".to_string(),
        stress_level: "moderate".to_string(),
    }
}

pub(super) fn outcome_submission() -> OutcomeSubmission {
    OutcomeSubmission {
        treatment_id: None,
        measurement_type: "thi".to_string(),
        score: 38,
        global_change: "much_better".to_string(),
    }
}

pub(super) fn masking_submission() -> SoundMaskingSubmission {
    SoundMaskingSubmission {
        sound_type: "rain".to_string(),
        duration_minutes: 45,
        volume_level: 35,
    }
}

pub(super) fn build_service() -> (PatientCareService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = PatientCareService::new(store.clone());
    (service, store)
}

pub(super) fn router_with_service(service: PatientCareService<MemoryStore>) -> axum::Router {
    patient_router(Arc::new(service), IdentityConfig::default())
}

#[derive(Default)]
pub(super) struct MemoryStore {
    pub(super) triage: Mutex<Vec<TriageEntry>>,
    pub(super) screenings: Mutex<Vec<ScreeningRecord>>,
    pub(super) assessments: Mutex<Vec<AssessmentRecord>>,
    pub(super) outcomes: Mutex<Vec<OutcomeRecord>>,
    pub(super) sessions: Mutex<Vec<MaskingSessionRecord>>,
}

impl ClinicalRecordStore for MemoryStore {
    fn insert_triage(&self, entry: TriageEntry) -> Result<(), RepositoryError> {
        self.triage.lock().expect("store mutex poisoned").push(entry);
        Ok(())
    }

    fn insert_screening(
        &self,
        record: ScreeningRecord,
    ) -> Result<ScreeningRecord, RepositoryError> {
        self.screenings
            .lock()
            .expect("store mutex poisoned")
            .push(record.clone());
        Ok(record)
    }

    fn fetch_screening(
        &self,
        id: &ScreeningId,
    ) -> Result<Option<ScreeningRecord>, RepositoryError> {
        let guard = self.screenings.lock().expect("store mutex poisoned");
        Ok(guard
            .iter()
            .find(|record| &record.screening_id == id)
            .cloned())
    }

    fn insert_assessment(
        &self,
        record: AssessmentRecord,
    ) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.assessments.lock().expect("store mutex poisoned");
        if guard
            .iter()
            .any(|existing| existing.assessment_id == record.assessment_id)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch_assessment(
        &self,
        id: &AssessmentId,
    ) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.assessments.lock().expect("store mutex poisoned");
        Ok(guard
            .iter()
            .find(|record| &record.assessment_id == id)
            .cloned())
    }

    fn insert_outcome(&self, record: OutcomeRecord) -> Result<(), RepositoryError> {
        self.outcomes
            .lock()
            .expect("store mutex poisoned")
            .push(record);
        Ok(())
    }

    fn insert_masking_session(&self, record: MaskingSessionRecord) -> Result<(), RepositoryError> {
        self.sessions
            .lock()
            .expect("store mutex poisoned")
            .push(record);
        Ok(())
    }

    fn care_path_facts(&self, patient: &PatientId) -> Result<CarePathFacts, RepositoryError> {
        let screenings = self.screenings.lock().expect("store mutex poisoned");
        let assessments = self.assessments.lock().expect("store mutex poisoned");

        let screening_count = screenings
            .iter()
            .filter(|record| &record.patient_id == patient)
            .count() as i64;
        let owned: Vec<&AssessmentRecord> = assessments
            .iter()
            .filter(|record| &record.patient_id == patient)
            .collect();
        let latest_recommended_step = owned
            .iter()
            .max_by_key(|record| record.recorded_at)
            .map(|record| record.recommended_step);

        Ok(CarePathFacts {
            screening_count,
            assessment_count: owned.len() as i64,
            latest_recommended_step,
        })
    }
}

pub(super) struct UnavailableStore;

impl ClinicalRecordStore for UnavailableStore {
    fn insert_triage(&self, _entry: TriageEntry) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_screening(
        &self,
        _record: ScreeningRecord,
    ) -> Result<ScreeningRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_screening(
        &self,
        _id: &ScreeningId,
    ) -> Result<Option<ScreeningRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_assessment(
        &self,
        _record: AssessmentRecord,
    ) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_assessment(
        &self,
        _id: &AssessmentId,
    ) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_outcome(&self, _record: OutcomeRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_masking_session(
        &self,
        _record: MaskingSessionRecord,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn care_path_facts(&self, _patient: &PatientId) -> Result<CarePathFacts, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Reports a negative screening count, as a misbehaving count query might.
pub(super) struct CorruptCountStore;

impl ClinicalRecordStore for CorruptCountStore {
    fn insert_triage(&self, _entry: TriageEntry) -> Result<(), RepositoryError> {
        Ok(())
    }

    fn insert_screening(
        &self,
        record: ScreeningRecord,
    ) -> Result<ScreeningRecord, RepositoryError> {
        Ok(record)
    }

    fn fetch_screening(
        &self,
        _id: &ScreeningId,
    ) -> Result<Option<ScreeningRecord>, RepositoryError> {
        Ok(None)
    }

    fn insert_assessment(
        &self,
        record: AssessmentRecord,
    ) -> Result<AssessmentRecord, RepositoryError> {
        Ok(record)
    }

    fn fetch_assessment(
        &self,
        _id: &AssessmentId,
    ) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Ok(None)
    }

    fn insert_outcome(&self, _record: OutcomeRecord) -> Result<(), RepositoryError> {
        Ok(())
    }

    fn insert_masking_session(
        &self,
        _record: MaskingSessionRecord,
    ) -> Result<(), RepositoryError> {
        Ok(())
    }

    fn care_path_facts(&self, _patient: &PatientId) -> Result<CarePathFacts, RepositoryError> {
        Ok(CarePathFacts {
            screening_count: -1,
            ..CarePathFacts::default()
        })
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
