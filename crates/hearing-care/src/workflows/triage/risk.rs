use serde::{Deserialize, Serialize};

use super::domain::{
    FamilyHistory, HearingDifficulty, NoiseExposureBand, TinnitusPresence, TriageAnswers,
};
use crate::workflows::InvalidInput;

const HIGH_RISK_AGE: u8 = 60;
const RISK_FACTOR_AGE: u8 = 45;
const MODERATE_RISK_FACTORS: usize = 2;

/// Outcome of the hearing-risk triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::High => "High Risk",
        }
    }

    pub const fn guidance(self) -> &'static str {
        match self {
            RiskLevel::Low => {
                "Your answers suggest a low risk of hearing difficulty right now. Keep protecting your ears and schedule routine checks."
            }
            RiskLevel::Moderate => {
                "You may benefit from a professional hearing test. Monitor your symptoms and reduce noise exposure where possible."
            }
            RiskLevel::High => {
                "Your responses suggest elevated risk. Please book a consultation for a more detailed, in-person hearing evaluation."
            }
        }
    }
}

/// Classify intake answers into a hearing-risk level.
///
/// Any high-risk marker (age over 60, 6+ hours of daily noise, constant difficulty hearing)
/// decides the result outright. Otherwise two or more contributing factors yield `Moderate`.
pub fn classify_risk(answers: &TriageAnswers) -> Result<RiskLevel, InvalidInput> {
    answers.validate()?;

    if is_high_risk(answers) {
        return Ok(RiskLevel::High);
    }

    if risk_factor_count(answers) >= MODERATE_RISK_FACTORS {
        Ok(RiskLevel::Moderate)
    } else {
        Ok(RiskLevel::Low)
    }
}

fn is_high_risk(answers: &TriageAnswers) -> bool {
    answers.age > HIGH_RISK_AGE
        || answers.noise_exposure == NoiseExposureBand::OverSixHours
        || answers.hearing_difficulty == HearingDifficulty::Always
}

fn risk_factor_count(answers: &TriageAnswers) -> usize {
    let factors = [
        answers.age >= RISK_FACTOR_AGE,
        answers.noise_exposure != NoiseExposureBand::UnderOneHour,
        answers.hearing_difficulty == HearingDifficulty::Often,
        answers.tinnitus != TinnitusPresence::No,
        answers.family_history == FamilyHistory::Yes,
    ];

    factors.iter().filter(|present| **present).count()
}
