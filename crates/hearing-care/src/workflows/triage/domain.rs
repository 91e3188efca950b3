use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::workflows::validation::bounded_u8;
use crate::workflows::InvalidInput;

pub const AGE_RANGE: RangeInclusive<u8> = 1..=120;

/// Daily hours spent in loud environments, ordered from least to most exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NoiseExposureBand {
    #[serde(rename = "<1hr")]
    UnderOneHour,
    #[serde(rename = "1-3hr")]
    OneToThreeHours,
    #[serde(rename = "4-6hr")]
    FourToSixHours,
    #[serde(rename = "6+hr")]
    OverSixHours,
}

impl NoiseExposureBand {
    pub const fn label(self) -> &'static str {
        match self {
            NoiseExposureBand::UnderOneHour => "<1hr",
            NoiseExposureBand::OneToThreeHours => "1-3hr",
            NoiseExposureBand::FourToSixHours => "4-6hr",
            NoiseExposureBand::OverSixHours => "6+hr",
        }
    }

    /// Representative hour count stored alongside a triage result.
    pub const fn storage_hours(self) -> u8 {
        match self {
            NoiseExposureBand::UnderOneHour => 0,
            NoiseExposureBand::OneToThreeHours => 2,
            NoiseExposureBand::FourToSixHours => 5,
            NoiseExposureBand::OverSixHours => 7,
        }
    }
}

impl FromStr for NoiseExposureBand {
    type Err = InvalidInput;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "<1hr" | "<1 hour" => Ok(Self::UnderOneHour),
            "1-3hr" | "1-3 hours" => Ok(Self::OneToThreeHours),
            "4-6hr" | "4-6 hours" => Ok(Self::FourToSixHours),
            "6+hr" | "6+ hours" => Ok(Self::OverSixHours),
            _ => Err(InvalidInput::unrecognized("noise_exposure", value)),
        }
    }
}

/// How often the patient struggles to follow conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HearingDifficulty {
    No,
    Sometimes,
    Often,
    Always,
}

impl HearingDifficulty {
    pub const fn label(self) -> &'static str {
        match self {
            HearingDifficulty::No => "No",
            HearingDifficulty::Sometimes => "Sometimes",
            HearingDifficulty::Often => "Often",
            HearingDifficulty::Always => "Always",
        }
    }
}

impl FromStr for HearingDifficulty {
    type Err = InvalidInput;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "no" => Ok(Self::No),
            "sometimes" => Ok(Self::Sometimes),
            "often" => Ok(Self::Often),
            "always" => Ok(Self::Always),
            _ => Err(InvalidInput::unrecognized("hearing_difficulty", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TinnitusPresence {
    No,
    Occasionally,
    Frequently,
}

impl TinnitusPresence {
    pub const fn label(self) -> &'static str {
        match self {
            TinnitusPresence::No => "No",
            TinnitusPresence::Occasionally => "Occasionally",
            TinnitusPresence::Frequently => "Frequently",
        }
    }
}

impl FromStr for TinnitusPresence {
    type Err = InvalidInput;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "no" => Ok(Self::No),
            "occasionally" => Ok(Self::Occasionally),
            "frequently" => Ok(Self::Frequently),
            _ => Err(InvalidInput::unrecognized("tinnitus", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FamilyHistory {
    No,
    Yes,
    Unsure,
}

impl FamilyHistory {
    pub const fn label(self) -> &'static str {
        match self {
            FamilyHistory::No => "No",
            FamilyHistory::Yes => "Yes",
            FamilyHistory::Unsure => "Unsure",
        }
    }
}

impl FromStr for FamilyHistory {
    type Err = InvalidInput;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "no" => Ok(Self::No),
            "yes" => Ok(Self::Yes),
            "unsure" => Ok(Self::Unsure),
            _ => Err(InvalidInput::unrecognized("family_history", value)),
        }
    }
}

/// Triage form exactly as posted by the patient, before any domain checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageSubmission {
    pub age: i64,
    pub noise_exposure: String,
    pub hearing_difficulty: String,
    pub tinnitus: String,
    pub family_history: String,
}

/// Validated intake answers feeding the risk classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageAnswers {
    pub age: u8,
    pub noise_exposure: NoiseExposureBand,
    pub hearing_difficulty: HearingDifficulty,
    pub tinnitus: TinnitusPresence,
    pub family_history: FamilyHistory,
}

impl TriageAnswers {
    pub fn new(
        age: u8,
        noise_exposure: NoiseExposureBand,
        hearing_difficulty: HearingDifficulty,
        tinnitus: TinnitusPresence,
        family_history: FamilyHistory,
    ) -> Result<Self, InvalidInput> {
        let answers = Self {
            age,
            noise_exposure,
            hearing_difficulty,
            tinnitus,
            family_history,
        };
        answers.validate()?;
        Ok(answers)
    }

    /// Enumerated fields are closed by construction; only the age can drift out of range.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        bounded_u8("age", i64::from(self.age), AGE_RANGE).map(|_| ())
    }
}

impl TryFrom<&TriageSubmission> for TriageAnswers {
    type Error = InvalidInput;

    fn try_from(submission: &TriageSubmission) -> Result<Self, Self::Error> {
        Ok(Self {
            age: bounded_u8("age", submission.age, AGE_RANGE)?,
            noise_exposure: submission.noise_exposure.parse()?,
            hearing_difficulty: submission.hearing_difficulty.parse()?,
            tinnitus: submission.tinnitus.parse()?,
            family_history: submission.family_history.parse()?,
        })
    }
}
