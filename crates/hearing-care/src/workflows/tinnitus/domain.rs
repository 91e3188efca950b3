use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::workflows::InvalidInput;

/// Categorical severity derived from the summed THS section scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactBand {
    None,
    Mild,
    Moderate,
    Severe,
    Catastrophic,
}

impl ImpactBand {
    pub const fn label(self) -> &'static str {
        match self {
            ImpactBand::None => "none",
            ImpactBand::Mild => "mild",
            ImpactBand::Moderate => "moderate",
            ImpactBand::Severe => "severe",
            ImpactBand::Catastrophic => "catastrophic",
        }
    }
}

impl fmt::Display for ImpactBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// PTM step recommended for a patient, ordered by intervention intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecommendedStep {
    #[serde(rename = "step_2")]
    Step2,
    #[serde(rename = "step_3")]
    Step3,
    #[serde(rename = "step_4")]
    Step4,
    #[serde(rename = "step_5")]
    Step5,
    #[serde(rename = "step_6")]
    Step6,
}

impl RecommendedStep {
    pub const ALL: [RecommendedStep; 5] = [
        RecommendedStep::Step2,
        RecommendedStep::Step3,
        RecommendedStep::Step4,
        RecommendedStep::Step5,
        RecommendedStep::Step6,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            RecommendedStep::Step2 => "step_2",
            RecommendedStep::Step3 => "step_3",
            RecommendedStep::Step4 => "step_4",
            RecommendedStep::Step5 => "step_5",
            RecommendedStep::Step6 => "step_6",
        }
    }

    /// Fixed clinical recommendation shown alongside a stored assessment.
    pub const fn recommendation(self) -> &'static str {
        match self {
            RecommendedStep::Step2 => "Education and reassurance with self-management resources.",
            RecommendedStep::Step3 => "Structured counseling and hearing screening follow-up.",
            RecommendedStep::Step4 => "Sound therapy with masking and relaxation guidance.",
            RecommendedStep::Step5 => "Advanced counseling support and multidisciplinary review.",
            RecommendedStep::Step6 => "Comprehensive management with clinical referral.",
        }
    }

    pub const fn plan_title(self) -> &'static str {
        match self {
            RecommendedStep::Step2 => "Step 2: Audiologic evaluation",
            RecommendedStep::Step3 => "Step 3: Skills education",
            RecommendedStep::Step4 => "Step 4: Sound therapy",
            RecommendedStep::Step5 => "Step 5: Interdisciplinary evaluation",
            RecommendedStep::Step6 => "Step 6: Individualized support",
        }
    }

    pub const fn plan_description(self) -> &'static str {
        match self {
            RecommendedStep::Step2 => "Complete the THS assessment and tinnitus interview.",
            RecommendedStep::Step3 => "Learn coping skills and sound strategies.",
            RecommendedStep::Step4 => "Use sound masking to reduce tinnitus contrast.",
            RecommendedStep::Step5 => "Coordinate audiology and behavioral health care.",
            RecommendedStep::Step6 => "Ongoing, personalized tinnitus management.",
        }
    }

    /// Care path level (1..=5) this step unlocks; the two most intensive steps share level 5.
    pub const fn care_level(self) -> u8 {
        match self {
            RecommendedStep::Step2 => 2,
            RecommendedStep::Step3 => 3,
            RecommendedStep::Step4 => 4,
            RecommendedStep::Step5 | RecommendedStep::Step6 => 5,
        }
    }
}

impl fmt::Display for RecommendedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecommendedStep {
    type Err = InvalidInput;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "step_2" => Ok(Self::Step2),
            "step_3" => Ok(Self::Step3),
            "step_4" => Ok(Self::Step4),
            "step_5" => Ok(Self::Step5),
            "step_6" => Ok(Self::Step6),
            _ => Err(InvalidInput::unrecognized("recommended_step", value)),
        }
    }
}

/// THS section scores feeding the impact classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TinnitusImpactInputs {
    pub section_a: u8,
    pub section_b: u8,
    /// Section C is a yes/no screening item rather than a graded score.
    pub section_c: bool,
    pub section_d: u8,
}

macro_rules! form_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }
        }

        impl FromStr for $name {
            type Err = InvalidInput;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let normalized = value.trim().to_ascii_lowercase();
                match normalized.as_str() {
                    $($token => Ok($name::$variant),)+
                    _ => Err(InvalidInput::unrecognized($field, value)),
                }
            }
        }
    };
}

form_enum! {
    /// How long, and how regularly, the patient has noticed tinnitus.
    TinnitusDuration, "duration" {
        Persistent => "persistent",
        RecentOnset => "recent_onset",
        Transient => "transient",
        Temporary => "temporary",
        Occasional => "occasional",
        Intermittent => "intermittent",
        Constant => "constant",
    }
}

form_enum! {
    /// Self-reported interference with sleep, concentration, or mood.
    DailyImpact, "daily_impact" {
        None => "none",
        Mild => "mild",
        Moderate => "moderate",
        Severe => "severe",
    }
}

form_enum! {
    ScreenerHearingDifficulty, "hearing_difficulty" {
        No => "no",
        Sometimes => "sometimes",
        Often => "often",
        Always => "always",
    }
}

form_enum! {
    /// Validated questionnaire used for an outcome measurement.
    OutcomeInstrument, "measurement_type" {
        Tfi => "tfi",
        Thi => "thi",
        Ths => "ths",
    }
}

form_enum! {
    /// Patient global impression of change since starting treatment.
    GlobalChange, "global_change" {
        VeryMuchWorse => "very_much_worse",
        MuchWorse => "much_worse",
        ALittleWorse => "a_little_worse",
        NoChange => "no_change",
        ALittleBetter => "a_little_better",
        MuchBetter => "much_better",
        VeryMuchBetter => "very_much_better",
    }
}

form_enum! {
    MaskingSound, "sound_type" {
        WhiteNoise => "white_noise",
        PinkNoise => "pink_noise",
        BrownNoise => "brown_noise",
        NatureSounds => "nature_sounds",
        Rain => "rain",
        Ocean => "ocean",
        Forest => "forest",
        Custom => "custom",
    }
}

/// Validated tinnitus screener responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TinnitusScreening {
    pub duration: TinnitusDuration,
    pub bothersomeness_score: u8,
    pub sleep_impact: DailyImpact,
    pub concentration_impact: DailyImpact,
    pub emotional_impact: DailyImpact,
    pub hearing_difficulty: ScreenerHearingDifficulty,
}

/// Validated outcome questionnaire result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeMeasure {
    pub treatment_id: Option<String>,
    pub instrument: OutcomeInstrument,
    pub score: u8,
    pub global_change: GlobalChange,
}

/// Validated sound-masking listening session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundMaskingSession {
    pub sound: MaskingSound,
    pub duration_minutes: u16,
    pub volume_level: u8,
}

form_enum! {
    TinnitusOnset, "onset" {
        Sudden => "sudden",
        Gradual => "gradual",
        Unknown => "unknown",
    }
}

form_enum! {
    /// Where the patient perceives the sound.
    Laterality, "laterality" {
        Left => "left",
        Right => "right",
        Both => "both",
        Head => "head",
    }
}

form_enum! {
    HearingCareHistory, "hearing_care_history" {
        None => "none",
        HearingTest => "hearing_test",
        HearingAids => "hearing_aids",
        MedicalVisit => "medical_visit",
    }
}

form_enum! {
    InterviewNoiseExposure, "noise_exposure" {
        Low => "low",
        Moderate => "moderate",
        High => "high",
    }
}

form_enum! {
    SleepQuality, "sleep_quality" {
        Good => "good",
        Fair => "fair",
        Poor => "poor",
    }
}

form_enum! {
    StressLevel, "stress_level" {
        Low => "low",
        Moderate => "moderate",
        High => "high",
    }
}

/// Validated tinnitus interview, captured for the care team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TinnitusInterview {
    pub onset: TinnitusOnset,
    pub laterality: Laterality,
    pub sound_description: String,
    pub triggers: Option<String>,
    pub hearing_care_history: HearingCareHistory,
    pub noise_exposure: InterviewNoiseExposure,
    pub sleep_quality: SleepQuality,
    pub stress_level: StressLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommended_steps_serialize_with_underscore() {
        let json = serde_json::to_string(&RecommendedStep::Step4).expect("serializes");
        assert_eq!(json, "\"step_4\"");
        let parsed: RecommendedStep = serde_json::from_str("\"step_6\"").expect("parses");
        assert_eq!(parsed, RecommendedStep::Step6);
    }

    #[test]
    fn every_step_has_distinct_recommendation() {
        let mut seen = std::collections::HashSet::new();
        for step in RecommendedStep::ALL {
            let text = step.recommendation();
            assert!(!text.is_empty(), "{step} has no recommendation");
            assert!(seen.insert(text), "{step} duplicates another recommendation");
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn care_levels_saturate_at_five() {
        let levels: Vec<u8> = RecommendedStep::ALL
            .into_iter()
            .map(RecommendedStep::care_level)
            .collect();
        assert_eq!(levels, vec![2, 3, 4, 5, 5]);
    }

    #[test]
    fn form_enums_parse_tokens_case_insensitively() {
        assert_eq!(
            "Recent_Onset".parse::<TinnitusDuration>(),
            Ok(TinnitusDuration::RecentOnset)
        );
        assert_eq!(
            "very_much_better".parse::<GlobalChange>(),
            Ok(GlobalChange::VeryMuchBetter)
        );
        let err = "static".parse::<MaskingSound>().expect_err("unknown sound");
        assert_eq!(err.field, "sound_type");
    }

    #[test]
    fn unknown_step_is_rejected() {
        let err = "step_7".parse::<RecommendedStep>().expect_err("unknown step");
        assert_eq!(err.field, "recommended_step");
    }
}
