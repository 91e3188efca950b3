pub mod patient;
pub mod tinnitus;
pub mod triage;
mod validation;

pub use validation::InvalidInput;

/// Educational disclaimer attached to every patient-facing result.
pub const MEDICAL_DISCLAIMER: &str = "IMPORTANT MEDICAL DISCLAIMER\n\n\
This platform provides educational information and hearing health screening tools.\n\
It is NOT a substitute for professional medical advice, diagnosis, or treatment.\n\n\
- Always seek the advice of a qualified audiologist or physician\n\
- Do not disregard professional medical advice based on information here\n\
- This service does not diagnose conditions or prescribe treatments\n\
- Operated by a registered Audiology student - not a licensed practitioner\n\n\
If you think you may have a medical emergency, call your doctor immediately.";
