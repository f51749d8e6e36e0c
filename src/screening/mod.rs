//! Screening form subsystem.
//!
//! # Data Flow
//! ```text
//! mount:
//!     questions.rs (load questionnaire, retried)
//!     → form.rs (step 1: typed patient record)
//!     → validation.rs (required-field gate, named validators)
//!     → form.rs (confirmation gate → step 2: dynamic answers)
//!     → questions.rs (submit merged payload)
//!
//! side entry:
//!     analysis.rs (KTP image → patient patch → form.rs)
//! ```
//!
//! # Design Decisions
//! - Typed patient record and dynamic answers stay separate; they merge
//!   only into the outbound submission payload
//! - Step two is unreachable until step one validates and is confirmed
//! - The analysis step is an interface with a mock, never an algorithm

pub mod analysis;
pub mod form;
pub mod questions;
pub mod types;
pub mod validation;

pub use form::{FormStep, ScreeningForm, ScreeningSubmitter, ViewEffect};
pub use questions::{HttpScreeningSubmitter, ScreeningService};
pub use types::{AnswerValue, PatientData, Question, QuestionKind};
