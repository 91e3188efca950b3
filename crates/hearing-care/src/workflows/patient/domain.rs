use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::tinnitus::{
    ImpactAssessment, ImpactBand, OutcomeMeasure, RecommendedStep, SoundMaskingSession,
    TinnitusImpactInputs, TinnitusScreening,
};
use crate::workflows::triage::{RiskLevel, TriageRecord};

/// Identifier of a signed-in patient, as supplied by the upstream auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientId(pub String);

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreeningId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageEntry {
    pub patient_id: PatientId,
    pub record: TriageRecord,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningRecord {
    pub screening_id: ScreeningId,
    pub patient_id: PatientId,
    pub screening: TinnitusScreening,
    pub recorded_at: DateTime<Utc>,
}

/// Stored THS assessment with the classification computed at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub assessment_id: AssessmentId,
    pub patient_id: PatientId,
    pub screening_id: Option<ScreeningId>,
    pub scores: TinnitusImpactInputs,
    pub impact: ImpactBand,
    pub recommended_step: RecommendedStep,
    pub recorded_at: DateTime<Utc>,
}

impl AssessmentRecord {
    pub fn assessment(&self) -> ImpactAssessment {
        ImpactAssessment {
            impact: self.impact,
            step: self.recommended_step,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub patient_id: PatientId,
    pub measure: OutcomeMeasure,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskingSessionRecord {
    pub patient_id: PatientId,
    pub session: SoundMaskingSession,
    pub recorded_at: DateTime<Utc>,
}

/// Risk classification returned to the caller; anonymous results are not saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TriageOutcome {
    pub risk_level: RiskLevel,
    pub saved: bool,
}

/// Patient-facing triage result. Anonymous callers only see a preview title.
#[derive(Debug, Clone, Serialize)]
pub struct TriageResultView {
    pub risk_level: RiskLevel,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<&'static str>,
    pub saved: bool,
    pub gated: bool,
}

impl From<TriageOutcome> for TriageResultView {
    fn from(outcome: TriageOutcome) -> Self {
        let gated = !outcome.saved;
        Self {
            risk_level: outcome.risk_level,
            title: outcome.risk_level.title(),
            guidance: (!gated).then(|| outcome.risk_level.guidance()),
            saved: outcome.saved,
            gated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreeningReceipt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screening_id: Option<ScreeningId>,
    pub saved: bool,
}

/// Acknowledgement for a reviewed interview. Interviews are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterviewReceipt {
    pub saved: bool,
    pub message: &'static str,
}

impl InterviewReceipt {
    pub fn acknowledged() -> Self {
        Self {
            saved: false,
            message: "Interview responses captured for your care team.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreatmentRecommendation {
    pub assessment_id: AssessmentId,
    pub impact: ImpactBand,
    pub step: RecommendedStep,
    pub recommendation: &'static str,
}

impl From<&AssessmentRecord> for TreatmentRecommendation {
    fn from(record: &AssessmentRecord) -> Self {
        Self {
            assessment_id: record.assessment_id.clone(),
            impact: record.impact,
            step: record.recommended_step,
            recommendation: record.recommended_step.recommendation(),
        }
    }
}

/// Summary of a classified THS assessment for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ImpactView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_id: Option<AssessmentId>,
    pub impact: ImpactBand,
    pub recommended_step: RecommendedStep,
    pub recommendation: &'static str,
}

impl From<ImpactAssessment> for ImpactView {
    fn from(assessment: ImpactAssessment) -> Self {
        Self {
            assessment_id: None,
            impact: assessment.impact,
            recommended_step: assessment.step,
            recommendation: assessment.recommendation(),
        }
    }
}

impl From<&AssessmentRecord> for ImpactView {
    fn from(record: &AssessmentRecord) -> Self {
        Self {
            assessment_id: Some(record.assessment_id.clone()),
            ..Self::from(record.assessment())
        }
    }
}
