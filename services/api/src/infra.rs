use hearing_care::workflows::patient::{
    AssessmentId, AssessmentRecord, ClinicalRecordStore, MaskingSessionRecord, OutcomeRecord,
    PatientId, RepositoryError, ScreeningId, ScreeningRecord, TriageEntry,
};
use hearing_care::workflows::tinnitus::CarePathFacts;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local clinical records. Everything is lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryClinicalStore {
    triage: Arc<Mutex<Vec<TriageEntry>>>,
    screenings: Arc<Mutex<Vec<ScreeningRecord>>>,
    assessments: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
    outcomes: Arc<Mutex<Vec<OutcomeRecord>>>,
    sessions: Arc<Mutex<Vec<MaskingSessionRecord>>>,
}

impl ClinicalRecordStore for InMemoryClinicalStore {
    fn insert_triage(&self, entry: TriageEntry) -> Result<(), RepositoryError> {
        let mut guard = self.triage.lock().expect("triage mutex poisoned");
        guard.push(entry);
        Ok(())
    }

    fn insert_screening(
        &self,
        record: ScreeningRecord,
    ) -> Result<ScreeningRecord, RepositoryError> {
        let mut guard = self.screenings.lock().expect("screening mutex poisoned");
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch_screening(
        &self,
        id: &ScreeningId,
    ) -> Result<Option<ScreeningRecord>, RepositoryError> {
        let guard = self.screenings.lock().expect("screening mutex poisoned");
        Ok(guard
            .iter()
            .find(|record| &record.screening_id == id)
            .cloned())
    }

    fn insert_assessment(
        &self,
        record: AssessmentRecord,
    ) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.assessments.lock().expect("assessment mutex poisoned");
        if guard.contains_key(&record.assessment_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.assessment_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch_assessment(
        &self,
        id: &AssessmentId,
    ) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.assessments.lock().expect("assessment mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn insert_outcome(&self, record: OutcomeRecord) -> Result<(), RepositoryError> {
        let mut guard = self.outcomes.lock().expect("outcome mutex poisoned");
        guard.push(record);
        Ok(())
    }

    fn insert_masking_session(&self, record: MaskingSessionRecord) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        guard.push(record);
        Ok(())
    }

    fn care_path_facts(&self, patient: &PatientId) -> Result<CarePathFacts, RepositoryError> {
        let screenings = self.screenings.lock().expect("screening mutex poisoned");
        let assessments = self.assessments.lock().expect("assessment mutex poisoned");

        let screening_count = screenings
            .iter()
            .filter(|record| &record.patient_id == patient)
            .count();
        let owned = assessments
            .values()
            .filter(|record| &record.patient_id == patient);
        let assessment_count = owned.clone().count();
        // Ids come from a monotonic sequence, so they break timestamp ties.
        let latest_recommended_step = owned
            .max_by(|left, right| {
                left.recorded_at
                    .cmp(&right.recorded_at)
                    .then_with(|| left.assessment_id.0.cmp(&right.assessment_id.0))
            })
            .map(|record| record.recommended_step);

        Ok(CarePathFacts {
            screening_count: screening_count as i64,
            assessment_count: assessment_count as i64,
            latest_recommended_step,
        })
    }
}

impl InMemoryClinicalStore {
    pub(crate) fn triage_entries(&self) -> Vec<TriageEntry> {
        self.triage.lock().expect("triage mutex poisoned").clone()
    }

    pub(crate) fn outcome_count(&self) -> usize {
        self.outcomes.lock().expect("outcome mutex poisoned").len()
    }

    pub(crate) fn session_count(&self) -> usize {
        self.sessions.lock().expect("session mutex poisoned").len()
    }
}
