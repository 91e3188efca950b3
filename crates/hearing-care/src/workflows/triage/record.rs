use serde::{Deserialize, Serialize};

use super::domain::{FamilyHistory, HearingDifficulty, TinnitusPresence, TriageAnswers};
use super::risk::RiskLevel;

/// Flattened triage row persisted for signed-in patients.
///
/// Ordinal answers collapse to presence flags and the exposure band to a representative
/// hour count, matching the hearing assessment table layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageRecord {
    pub age: u8,
    pub noise_exposure_hours: u8,
    pub difficulty_hearing: bool,
    pub tinnitus: bool,
    pub family_history: bool,
    pub risk_level: RiskLevel,
}

impl TriageRecord {
    pub fn from_answers(answers: &TriageAnswers, risk_level: RiskLevel) -> Self {
        Self {
            age: answers.age,
            noise_exposure_hours: answers.noise_exposure.storage_hours(),
            difficulty_hearing: answers.hearing_difficulty != HearingDifficulty::No,
            tinnitus: answers.tinnitus != TinnitusPresence::No,
            family_history: answers.family_history == FamilyHistory::Yes,
            risk_level,
        }
    }
}
