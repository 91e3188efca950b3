//! Raw questionnaire submissions and their conversion into validated domain values.

use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::{
    OutcomeMeasure, SoundMaskingSession, TinnitusImpactInputs, TinnitusInterview,
    TinnitusScreening,
};
use super::impact::SECTION_SCORE_RANGE;
use crate::workflows::validation::{bounded_u16, bounded_u8};
use crate::workflows::InvalidInput;

pub const BOTHERSOMENESS_RANGE: RangeInclusive<u8> = 0..=10;
pub const OUTCOME_SCORE_RANGE: RangeInclusive<u8> = 0..=100;
pub const SESSION_MINUTES_RANGE: RangeInclusive<u16> = 1..=240;
pub const VOLUME_RANGE: RangeInclusive<u8> = 0..=100;
pub const SOUND_DESCRIPTION_MIN_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenerSubmission {
    pub duration: String,
    pub bothersomeness_score: i64,
    pub sleep_impact: String,
    pub concentration_impact: String,
    pub emotional_impact: String,
    pub hearing_difficulty: String,
}

/// Tinnitus and Hearing Survey answers as posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThsSubmission {
    #[serde(default)]
    pub screening_id: Option<String>,
    pub section_a_score: i64,
    pub section_b_score: i64,
    pub section_c_screening: bool,
    pub section_d_score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeSubmission {
    #[serde(default)]
    pub treatment_id: Option<String>,
    pub measurement_type: String,
    pub score: i64,
    pub global_change: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundMaskingSubmission {
    pub sound_type: String,
    pub duration_minutes: i64,
    pub volume_level: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewSubmission {
    pub onset: String,
    pub laterality: String,
    pub sound_description: String,
    #[serde(default)]
    pub triggers: Option<String>,
    pub hearing_care_history: String,
    pub noise_exposure: String,
    pub sleep_quality: String,
    pub stress_level: String,
}

/// Validated THS answers plus the screening they follow up on, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThsResponses {
    pub screening_id: Option<String>,
    pub scores: TinnitusImpactInputs,
}

/// Parse an enumerated form value, reporting failures against the submitted field name.
fn parse_field<T>(field: &'static str, value: &str) -> Result<T, InvalidInput>
where
    T: FromStr<Err = InvalidInput>,
{
    value
        .parse()
        .map_err(|_| InvalidInput::unrecognized(field, value))
}

fn optional_reference(
    field: &'static str,
    value: &Option<String>,
) -> Result<Option<String>, InvalidInput> {
    match value.as_deref().map(str::trim) {
        None => Ok(None),
        Some("") => Err(InvalidInput::new(field, "reference must not be blank")),
        Some(reference) => Ok(Some(reference.to_string())),
    }
}

impl TryFrom<&ScreenerSubmission> for TinnitusScreening {
    type Error = InvalidInput;

    fn try_from(submission: &ScreenerSubmission) -> Result<Self, Self::Error> {
        Ok(Self {
            duration: parse_field("duration", &submission.duration)?,
            bothersomeness_score: bounded_u8(
                "bothersomeness_score",
                submission.bothersomeness_score,
                BOTHERSOMENESS_RANGE,
            )?,
            sleep_impact: parse_field("sleep_impact", &submission.sleep_impact)?,
            concentration_impact: parse_field(
                "concentration_impact",
                &submission.concentration_impact,
            )?,
            emotional_impact: parse_field("emotional_impact", &submission.emotional_impact)?,
            hearing_difficulty: parse_field("hearing_difficulty", &submission.hearing_difficulty)?,
        })
    }
}

impl TryFrom<&ThsSubmission> for ThsResponses {
    type Error = InvalidInput;

    fn try_from(submission: &ThsSubmission) -> Result<Self, Self::Error> {
        let scores = TinnitusImpactInputs {
            section_a: bounded_u8(
                "section_a_score",
                submission.section_a_score,
                SECTION_SCORE_RANGE,
            )?,
            section_b: bounded_u8(
                "section_b_score",
                submission.section_b_score,
                SECTION_SCORE_RANGE,
            )?,
            section_c: submission.section_c_screening,
            section_d: bounded_u8(
                "section_d_score",
                submission.section_d_score,
                SECTION_SCORE_RANGE,
            )?,
        };

        Ok(Self {
            screening_id: optional_reference("screening_id", &submission.screening_id)?,
            scores,
        })
    }
}

impl TryFrom<&OutcomeSubmission> for OutcomeMeasure {
    type Error = InvalidInput;

    fn try_from(submission: &OutcomeSubmission) -> Result<Self, Self::Error> {
        Ok(Self {
            treatment_id: optional_reference("treatment_id", &submission.treatment_id)?,
            instrument: parse_field("measurement_type", &submission.measurement_type)?,
            score: bounded_u8("score", submission.score, OUTCOME_SCORE_RANGE)?,
            global_change: parse_field("global_change", &submission.global_change)?,
        })
    }
}

impl TryFrom<&SoundMaskingSubmission> for SoundMaskingSession {
    type Error = InvalidInput;

    fn try_from(submission: &SoundMaskingSubmission) -> Result<Self, Self::Error> {
        Ok(Self {
            sound: parse_field("sound_type", &submission.sound_type)?,
            duration_minutes: bounded_u16(
                "duration_minutes",
                submission.duration_minutes,
                SESSION_MINUTES_RANGE,
            )?,
            volume_level: bounded_u8("volume_level", submission.volume_level, VOLUME_RANGE)?,
        })
    }
}

impl TryFrom<&InterviewSubmission> for TinnitusInterview {
    type Error = InvalidInput;

    fn try_from(submission: &InterviewSubmission) -> Result<Self, Self::Error> {
        let sound_description = submission.sound_description.trim();
        if sound_description.chars().count() < SOUND_DESCRIPTION_MIN_CHARS {
            return Err(InvalidInput::new(
                "sound_description",
                format!("must be at least {SOUND_DESCRIPTION_MIN_CHARS} characters"),
            ));
        }
        let triggers = submission
            .triggers
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Ok(Self {
            onset: parse_field("onset", &submission.onset)?,
            laterality: parse_field("laterality", &submission.laterality)?,
            sound_description: sound_description.to_string(),
            triggers,
            hearing_care_history: parse_field(
                "hearing_care_history",
                &submission.hearing_care_history,
            )?,
            noise_exposure: parse_field("noise_exposure", &submission.noise_exposure)?,
            sleep_quality: parse_field("sleep_quality", &submission.sleep_quality)?,
            stress_level: parse_field("stress_level", &submission.stress_level)?,
        })
    }
}
