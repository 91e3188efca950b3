//! Tinnitus screening, THS impact banding, and the stepped-care path.

pub mod care_path;
pub mod domain;
mod impact;
pub mod intake;
mod plan;


pub use care_path::{
    derive_care_path, CarePath, CarePathFacts, CareStage, CareStageView, StageStatus,
};
pub use domain::{
    DailyImpact, GlobalChange, HearingCareHistory, ImpactBand, InterviewNoiseExposure,
    Laterality, MaskingSound, OutcomeInstrument, OutcomeMeasure, RecommendedStep,
    ScreenerHearingDifficulty, SleepQuality, SoundMaskingSession, StressLevel, TinnitusDuration,
    TinnitusImpactInputs, TinnitusInterview, TinnitusOnset, TinnitusScreening,
};
pub use impact::{
    classify_impact, impact_for_total, ImpactAssessment, SECTION_C_BONUS, SECTION_SCORE_RANGE,
};
pub use intake::{
    InterviewSubmission, OutcomeSubmission, ScreenerSubmission, SoundMaskingSubmission,
    ThsResponses, ThsSubmission,
};
pub use plan::{PlanStepView, TreatmentPlan};
