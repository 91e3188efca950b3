use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{
    AssessmentId, AssessmentRecord, MaskingSessionRecord, OutcomeRecord, PatientId,
    ScreeningId, ScreeningReceipt, ScreeningRecord, TreatmentRecommendation, TriageEntry,
    TriageOutcome,
};
use super::repository::{ClinicalRecordStore, RepositoryError};
use crate::workflows::tinnitus::{
    classify_impact, derive_care_path, CarePath, ImpactAssessment, InterviewSubmission,
    OutcomeMeasure, OutcomeSubmission, ScreenerSubmission, SoundMaskingSession,
    SoundMaskingSubmission, ThsResponses, ThsSubmission, TinnitusInterview, TinnitusScreening,
    TreatmentPlan,
};
use crate::workflows::triage::{classify_risk, TriageAnswers, TriageRecord, TriageSubmission};
use crate::workflows::InvalidInput;

static SCREENING_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_screening_id() -> ScreeningId {
    let id = SCREENING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ScreeningId(format!("scr-{id:06}"))
}

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("ths-{id:06}"))
}

/// Service composing the scoring rules with the clinical record store.
pub struct PatientCareService<R> {
    records: Arc<R>,
}

impl<R> PatientCareService<R>
where
    R: ClinicalRecordStore + 'static,
{
    pub fn new(records: Arc<R>) -> Self {
        Self { records }
    }

    /// Classify a triage form, saving the result when a patient is signed in.
    pub fn assess_risk(
        &self,
        patient: Option<&PatientId>,
        submission: &TriageSubmission,
    ) -> Result<TriageOutcome, PatientCareError> {
        let answers = TriageAnswers::try_from(submission)?;
        let risk_level = classify_risk(&answers)?;

        let Some(patient_id) = patient else {
            debug!(risk = risk_level.label(), "anonymous triage classified");
            return Ok(TriageOutcome {
                risk_level,
                saved: false,
            });
        };

        self.records.insert_triage(TriageEntry {
            patient_id: patient_id.clone(),
            record: TriageRecord::from_answers(&answers, risk_level),
            recorded_at: Utc::now(),
        })?;
        info!(patient = %patient_id, risk = risk_level.label(), "triage recorded");

        Ok(TriageOutcome {
            risk_level,
            saved: true,
        })
    }

    /// Validate a tinnitus screener. Anonymous screeners are accepted but not kept.
    pub fn submit_screening(
        &self,
        patient: Option<&PatientId>,
        submission: &ScreenerSubmission,
    ) -> Result<ScreeningReceipt, PatientCareError> {
        let screening = TinnitusScreening::try_from(submission)?;

        let Some(patient_id) = patient else {
            return Ok(ScreeningReceipt {
                screening_id: None,
                saved: false,
            });
        };

        let stored = self.records.insert_screening(ScreeningRecord {
            screening_id: next_screening_id(),
            patient_id: patient_id.clone(),
            screening,
            recorded_at: Utc::now(),
        })?;
        info!(
            patient = %patient_id,
            screening = %stored.screening_id.0,
            duration = screening.duration.label(),
            "tinnitus screening recorded"
        );

        Ok(ScreeningReceipt {
            screening_id: Some(stored.screening_id),
            saved: true,
        })
    }

    /// Validate an interview for the care team. Interviews are acknowledged, not stored.
    pub fn review_interview(
        &self,
        submission: &InterviewSubmission,
    ) -> Result<TinnitusInterview, PatientCareError> {
        let interview = TinnitusInterview::try_from(submission)?;
        debug!(
            onset = interview.onset.label(),
            laterality = interview.laterality.label(),
            "tinnitus interview reviewed"
        );
        Ok(interview)
    }

    /// Classify THS answers without storing anything.
    pub fn estimate_impact(
        &self,
        submission: &ThsSubmission,
    ) -> Result<ImpactAssessment, PatientCareError> {
        let responses = ThsResponses::try_from(submission)?;
        Ok(classify_impact(&responses.scores)?)
    }

    /// Classify and store a THS assessment for a signed-in patient.
    pub fn submit_assessment(
        &self,
        patient: Option<&PatientId>,
        submission: &ThsSubmission,
    ) -> Result<AssessmentRecord, PatientCareError> {
        let patient_id = patient.ok_or(PatientCareError::Unauthenticated(
            "save your assessment",
        ))?;
        let responses = ThsResponses::try_from(submission)?;
        let assessment = classify_impact(&responses.scores)?;
        let screening_id = match responses.screening_id {
            Some(reference) => Some(self.owned_screening(patient_id, ScreeningId(reference))?),
            None => None,
        };

        let stored = self.records.insert_assessment(AssessmentRecord {
            assessment_id: next_assessment_id(),
            patient_id: patient_id.clone(),
            screening_id,
            scores: responses.scores,
            impact: assessment.impact,
            recommended_step: assessment.step,
            recorded_at: Utc::now(),
        })?;
        info!(
            patient = %patient_id,
            assessment = %stored.assessment_id.0,
            impact = %stored.impact,
            step = %stored.recommended_step,
            "tinnitus assessment recorded"
        );

        Ok(stored)
    }

    /// Another patient's screening is reported exactly like a missing one.
    fn owned_screening(
        &self,
        patient_id: &PatientId,
        screening_id: ScreeningId,
    ) -> Result<ScreeningId, PatientCareError> {
        match self.records.fetch_screening(&screening_id)? {
            Some(record) if &record.patient_id == patient_id => Ok(screening_id),
            _ => Err(InvalidInput::new(
                "screening_id",
                format!("'{}' is not one of your screenings", screening_id.0),
            )
            .into()),
        }
    }

    /// Recommendation for one of the patient's stored assessments.
    pub fn treatment_recommendation(
        &self,
        patient: Option<&PatientId>,
        assessment_id: &AssessmentId,
    ) -> Result<TreatmentRecommendation, PatientCareError> {
        let patient_id = patient.ok_or(PatientCareError::Unauthenticated(
            "view recommendations",
        ))?;
        let record = self
            .records
            .fetch_assessment(assessment_id)?
            .filter(|record| &record.patient_id == patient_id)
            .ok_or(RepositoryError::NotFound)?;

        Ok(TreatmentRecommendation::from(&record))
    }

    pub fn treatment_plan(
        &self,
        patient: Option<&PatientId>,
    ) -> Result<TreatmentPlan, PatientCareError> {
        let patient_id = patient.ok_or(PatientCareError::Unauthenticated(
            "view your treatment plan",
        ))?;
        let facts = self.records.care_path_facts(patient_id)?;
        Ok(TreatmentPlan::for_step(facts.latest_recommended_step))
    }

    /// Recompute the patient's care path from their current record counts.
    pub fn care_path(&self, patient: Option<&PatientId>) -> Result<CarePath, PatientCareError> {
        let patient_id = patient.ok_or(PatientCareError::Unauthenticated(
            "view your care path",
        ))?;
        let facts = self.records.care_path_facts(patient_id)?;
        let path = derive_care_path(&facts)?;
        debug!(
            patient = %patient_id,
            level = path.current_level,
            screenings = facts.screening_count,
            assessments = facts.assessment_count,
            "care path derived"
        );
        Ok(path)
    }

    pub fn record_outcome(
        &self,
        patient: Option<&PatientId>,
        submission: &OutcomeSubmission,
    ) -> Result<(), PatientCareError> {
        let patient_id = patient.ok_or(PatientCareError::Unauthenticated("save outcomes"))?;
        let measure = OutcomeMeasure::try_from(submission)?;
        let instrument = measure.instrument;

        self.records.insert_outcome(OutcomeRecord {
            patient_id: patient_id.clone(),
            measure,
            recorded_at: Utc::now(),
        })?;
        info!(patient = %patient_id, instrument = instrument.label(), "outcome recorded");
        Ok(())
    }

    pub fn record_masking_session(
        &self,
        patient: Option<&PatientId>,
        submission: &SoundMaskingSubmission,
    ) -> Result<(), PatientCareError> {
        let patient_id = patient.ok_or(PatientCareError::Unauthenticated(
            "save sound masking sessions",
        ))?;
        let session = SoundMaskingSession::try_from(submission)?;

        self.records.insert_masking_session(MaskingSessionRecord {
            patient_id: patient_id.clone(),
            session,
            recorded_at: Utc::now(),
        })?;
        info!(
            patient = %patient_id,
            sound = session.sound.label(),
            minutes = session.duration_minutes,
            "sound masking session recorded"
        );
        Ok(())
    }
}

/// Error raised by the patient care service.
#[derive(Debug, thiserror::Error)]
pub enum PatientCareError {
    #[error(transparent)]
    Intake(#[from] InvalidInput),
    #[error("please sign in to {0}")]
    Unauthenticated(&'static str),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
