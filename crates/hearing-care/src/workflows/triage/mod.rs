//! Hearing-risk triage: intake answers, the rule-based risk classifier, and the storage
//! projection persisted for signed-in patients.

pub mod domain;
mod record;
mod risk;

pub use domain::{
    FamilyHistory, HearingDifficulty, NoiseExposureBand, TinnitusPresence, TriageAnswers,
    TriageSubmission,
};
pub use record::TriageRecord;
pub use risk::{classify_risk, RiskLevel};
