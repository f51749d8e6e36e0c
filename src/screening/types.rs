//! Screening domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed choices for the patient-data selects.
pub const GENDER_OPTIONS: [&str; 2] = ["Laki-laki", "Perempuan"];
pub const RELIGION_OPTIONS: [&str; 6] =
    ["Islam", "Kristen", "Katolik", "Hindu", "Buddha", "Konghucu"];
pub const MARITAL_STATUS_OPTIONS: [&str; 4] =
    ["Belum Menikah", "Menikah", "Cerai Hidup", "Cerai Mati"];
pub const BLOOD_TYPE_OPTIONS: [&str; 12] = [
    "A", "B", "AB", "O", "A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-",
];

/// Input widget a question renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Text,
    Date,
    Select,
    Checkbox,
    /// Checkbox group with a free-text explanation revealed on an
    /// affirmative selection.
    CheckboxTextarea,
}

/// A screening question, loaded once at form mount and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Answer to one question, keyed by question id in the form state.
///
/// Answers stay tagged until submission; only the payload merge flattens
/// them into plain JSON values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Free text, including dates entered as text.
    Text(String),
    /// The chosen option of a select question.
    Selected(String),
    /// The checked options of a checkbox question.
    MultiSelected(Vec<String>),
}

/// The fixed typed patient record behind step one.
///
/// Serialized field names are the wire names the backend expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientData {
    pub nik: String,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub gender: String,
    pub contact: String,
    pub place_of_birth: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: String,
    pub rt_rw: String,
    pub village: String,
    pub district: String,
    pub religion: String,
    pub marital_status: String,
    pub occupation: String,
    pub nationality: String,
    pub valid_until: String,
    pub blood_type: String,
    #[serde(rename = "tinggi_badan")]
    pub height: String,
    #[serde(rename = "berat_badan")]
    pub weight: String,
}

impl Default for PatientData {
    fn default() -> Self {
        Self {
            nik: String::new(),
            name: String::new(),
            email: String::new(),
            age: 0,
            gender: String::new(),
            contact: String::new(),
            place_of_birth: String::new(),
            date_of_birth: None,
            address: String::new(),
            rt_rw: String::new(),
            village: String::new(),
            district: String::new(),
            religion: String::new(),
            marital_status: String::new(),
            occupation: String::new(),
            nationality: "Indonesia".to_string(),
            valid_until: String::new(),
            blood_type: String::new(),
            height: String::new(),
            weight: String::new(),
        }
    }
}
