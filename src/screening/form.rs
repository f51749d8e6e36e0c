//! Two-step screening form controller.
//!
//! Step one collects the patient record, step two the questionnaire answers.
//! Leaving step one requires the mandatory fields plus an explicit
//! confirmation; submission only happens from step two.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate};
use thiserror::Error;

use crate::api::error::ApiError;
use crate::notify::Notifier;
use crate::screening::analysis::PatientPatch;
use crate::screening::types::{AnswerValue, PatientData, Question, QuestionKind};

/// Option text marking an affirmative answer, matched case-insensitively as
/// a substring.
pub const AFFIRMATIVE_TOKEN: &str = "ya";

/// Patient fields that must be filled before leaving step one.
pub const REQUIRED_FIELDS: [&str; 5] = ["nik", "name", "gender", "date_of_birth", "age"];

/// Wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStep {
    PatientData,
    Screening,
}

/// Side effect the view should perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEffect {
    ScrollToTop,
}

/// Rejected form operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("required field '{0}' is empty")]
    MissingField(&'static str),

    #[error("no confirmation pending")]
    NoConfirmationPending,

    #[error("operation not allowed in step {0:?}")]
    WrongStep(FormStep),

    #[error(transparent)]
    Submission(#[from] ApiError),
}

/// Submission collaborator the form delegates to from step two.
#[async_trait]
pub trait ScreeningSubmitter: Send + Sync {
    async fn submit(&self, payload: &serde_json::Value) -> Result<(), ApiError>;
}

/// State for one mounted screening form.
///
/// Created once per mount, mutated by field edits and step transitions, and
/// discarded when the view unmounts.
#[derive(Debug, Clone)]
pub struct ScreeningForm {
    step: FormStep,
    patient: PatientData,
    answers: HashMap<String, AnswerValue>,
    questions: Vec<Question>,
    confirmation_pending: bool,
}

impl ScreeningForm {
    /// Create a form over an already-loaded set of questions.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            step: FormStep::PatientData,
            patient: PatientData::default(),
            answers: HashMap::new(),
            questions,
            confirmation_pending: false,
        }
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    pub fn confirmation_pending(&self) -> bool {
        self.confirmation_pending
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn patient(&self) -> &PatientData {
        &self.patient
    }

    /// Mutable access for field edits that carry no derived state.
    pub fn patient_mut(&mut self) -> &mut PatientData {
        &mut self.patient
    }

    pub fn answer(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers.get(question_id)
    }

    /// Set the birth date and recompute the derived age.
    pub fn set_date_of_birth(&mut self, date_of_birth: Option<NaiveDate>) {
        self.set_date_of_birth_at(date_of_birth, Local::now().date_naive());
    }

    /// As [`set_date_of_birth`](Self::set_date_of_birth), against an explicit
    /// "today".
    pub fn set_date_of_birth_at(&mut self, date_of_birth: Option<NaiveDate>, today: NaiveDate) {
        self.patient.date_of_birth = date_of_birth;
        if let Some(dob) = date_of_birth {
            self.patient.age = age_in_years(dob, today);
        }
    }

    /// Apply fields recovered from an ID card and refresh the derived age.
    pub fn apply_analysis(&mut self, patch: &PatientPatch) {
        patch.apply_to(&mut self.patient);
        if let Some(dob) = self.patient.date_of_birth {
            self.patient.age = age_in_years(dob, Local::now().date_naive());
        }
    }

    /// Store a free-text or select answer for a question.
    pub fn set_answer(&mut self, question_id: &str, value: AnswerValue) {
        self.answers.insert(question_id.to_string(), value);
    }

    /// Toggle one option of a checkbox question on or off.
    ///
    /// A non-checkbox value already stored under the id is replaced by a
    /// fresh selection set.
    pub fn toggle_option(&mut self, question_id: &str, option: &str) {
        if !matches!(
            self.answers.get(question_id),
            Some(AnswerValue::MultiSelected(_))
        ) {
            self.answers.insert(
                question_id.to_string(),
                AnswerValue::MultiSelected(Vec::new()),
            );
        }
        let Some(AnswerValue::MultiSelected(selected)) = self.answers.get_mut(question_id) else {
            return;
        };
        if let Some(pos) = selected.iter().position(|v| v == option) {
            selected.remove(pos);
        } else {
            selected.push(option.to_string());
        }
    }

    /// Whether the free-text explanation of a checkbox+textarea question
    /// should be visible: any selected option containing the affirmative
    /// token. This is a display rule, not validation.
    pub fn explanation_visible(&self, question_id: &str) -> bool {
        let is_textarea_kind = self
            .questions
            .iter()
            .any(|q| q.id == question_id && q.kind == QuestionKind::CheckboxTextarea);
        if !is_textarea_kind {
            return false;
        }
        match self.answers.get(question_id) {
            Some(AnswerValue::MultiSelected(selected)) => selected
                .iter()
                .any(|v| v.to_lowercase().contains(AFFIRMATIVE_TOKEN)),
            _ => false,
        }
    }

    /// Ask to leave step one. On success the form waits for
    /// [`confirm`](Self::confirm) before actually moving.
    pub fn request_advance(&mut self, notifier: &dyn Notifier) -> Result<(), FormError> {
        if self.step != FormStep::PatientData {
            return Err(FormError::WrongStep(self.step));
        }
        if let Some(field) = self.first_missing_required() {
            tracing::debug!(field, "advance refused, required field missing");
            notifier.error("Please complete the patient data first.");
            return Err(FormError::MissingField(field));
        }
        self.confirmation_pending = true;
        Ok(())
    }

    /// Confirm the pending advance and move to the screening step.
    pub fn confirm(&mut self) -> Result<ViewEffect, FormError> {
        if !self.confirmation_pending {
            return Err(FormError::NoConfirmationPending);
        }
        self.confirmation_pending = false;
        self.step = FormStep::Screening;
        Ok(ViewEffect::ScrollToTop)
    }

    /// Dismiss the pending advance and stay on step one.
    pub fn cancel_confirmation(&mut self) -> Result<(), FormError> {
        if !self.confirmation_pending {
            return Err(FormError::NoConfirmationPending);
        }
        self.confirmation_pending = false;
        Ok(())
    }

    /// Merge the typed record and the dynamic answers into one outbound
    /// payload. The two stay separate everywhere else.
    pub fn submission_payload(&self) -> serde_json::Value {
        let mut payload = match serde_json::to_value(&self.patient) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        for (id, answer) in &self.answers {
            let value = match answer {
                AnswerValue::Text(text) | AnswerValue::Selected(text) => {
                    serde_json::Value::String(text.clone())
                }
                AnswerValue::MultiSelected(selected) => serde_json::Value::Array(
                    selected
                        .iter()
                        .cloned()
                        .map(serde_json::Value::String)
                        .collect(),
                ),
            };
            payload.insert(id.clone(), value);
        }
        serde_json::Value::Object(payload)
    }

    /// Submit from step two.
    ///
    /// On success the fields reset to their defaults; on failure everything
    /// entered is preserved so the patient can retry.
    pub async fn submit(
        &mut self,
        submitter: &dyn ScreeningSubmitter,
        notifier: &dyn Notifier,
    ) -> Result<(), FormError> {
        if self.step != FormStep::Screening {
            return Err(FormError::WrongStep(self.step));
        }
        let payload = self.submission_payload();
        match submitter.submit(&payload).await {
            Ok(()) => {
                tracing::info!("screening form submitted");
                notifier.success("Screening form submitted.");
                self.patient = PatientData::default();
                self.answers.clear();
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "screening submission failed");
                notifier.error("Failed to submit the screening form.");
                Err(FormError::Submission(err))
            }
        }
    }

    fn first_missing_required(&self) -> Option<&'static str> {
        REQUIRED_FIELDS
            .into_iter()
            .find(|field| self.required_field_missing(field))
    }

    // Empty string, unset date, or a zero age all count as missing.
    fn required_field_missing(&self, field: &str) -> bool {
        match field {
            "nik" => self.patient.nik.is_empty(),
            "name" => self.patient.name.is_empty(),
            "gender" => self.patient.gender.is_empty(),
            "date_of_birth" => self.patient.date_of_birth.is_none(),
            "age" => self.patient.age == 0,
            _ => false,
        }
    }
}

/// Exact calendar-year age: a year only counts once the birthday has passed
/// in the current year.
pub fn age_in_years(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age.max(0) as u32
}
