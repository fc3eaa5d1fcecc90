//! External generative-language collaborators
//!
//! Coaching advice and scam classification. Both go through a
//! [`GenerativeBackend`]; the production backend is [`GeminiClient`].
//! Failures are returned as errors and never touch the financial state.

pub mod advice;
pub mod backend;
pub mod gemini;
pub mod scam;

pub use advice::{build_advice_prompt, AdviceLine, AdviceLines, AdviceService, ADVICE_FAILURE_MESSAGE};
pub use backend::{GenerationRequest, GenerativeBackend};
pub use gemini::GeminiClient;
pub use scam::{
    build_scam_prompt, parse_scam_analysis, scam_response_schema, ScamAnalysis, ScamScanner,
    SCAN_FAILURE_MESSAGE,
};
