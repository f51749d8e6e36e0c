//! KTP image analysis seam.
//!
//! Reading patient fields off an ID-card image is an external collaborator;
//! this module only defines the interface and the patch it yields. The mock
//! implementation stands in for the real service and for tests.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::screening::types::PatientData;

/// An ID-card image captured by file upload or webcam.
#[derive(Debug, Clone)]
pub enum KtpImage {
    Bytes(Vec<u8>),
    Base64(String),
}

/// Errors from the analysis collaborator.
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    #[error("KTP analysis failed: {0}")]
    Failed(String),
}

/// Patient fields recovered from an ID card.
///
/// Absent or empty values leave the record untouched when applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientPatch {
    pub nik: Option<String>,
    pub name: Option<String>,
    pub place_of_birth: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub rt_rw: Option<String>,
    pub village: Option<String>,
    pub district: Option<String>,
    pub religion: Option<String>,
    pub marital_status: Option<String>,
    pub occupation: Option<String>,
    pub nationality: Option<String>,
    pub valid_until: Option<String>,
    pub blood_type: Option<String>,
}

impl PatientPatch {
    /// Copy the recovered fields onto a patient record.
    pub fn apply_to(&self, patient: &mut PatientData) {
        apply_string(&self.nik, &mut patient.nik);
        apply_string(&self.name, &mut patient.name);
        apply_string(&self.place_of_birth, &mut patient.place_of_birth);
        apply_string(&self.gender, &mut patient.gender);
        apply_string(&self.address, &mut patient.address);
        apply_string(&self.rt_rw, &mut patient.rt_rw);
        apply_string(&self.village, &mut patient.village);
        apply_string(&self.district, &mut patient.district);
        apply_string(&self.religion, &mut patient.religion);
        apply_string(&self.marital_status, &mut patient.marital_status);
        apply_string(&self.occupation, &mut patient.occupation);
        apply_string(&self.nationality, &mut patient.nationality);
        apply_string(&self.valid_until, &mut patient.valid_until);
        apply_string(&self.blood_type, &mut patient.blood_type);
        if let Some(dob) = self.date_of_birth {
            patient.date_of_birth = Some(dob);
        }
    }
}

fn apply_string(source: &Option<String>, target: &mut String) {
    if let Some(value) = source {
        if !value.is_empty() {
            *target = value.clone();
        }
    }
}

/// Analyzer collaborator; a real backend or a test double satisfies this.
#[async_trait]
pub trait KtpAnalyzer: Send + Sync {
    async fn analyze(&self, image: &KtpImage) -> Result<PatientPatch, AnalysisError>;
}

/// Fixed-delay stand-in returning hardcoded card data.
#[derive(Debug, Clone)]
pub struct MockKtpAnalyzer {
    pub delay: Duration,
}

impl Default for MockKtpAnalyzer {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(2),
        }
    }
}

#[async_trait]
impl KtpAnalyzer for MockKtpAnalyzer {
    async fn analyze(&self, _image: &KtpImage) -> Result<PatientPatch, AnalysisError> {
        tokio::time::sleep(self.delay).await;
        Ok(PatientPatch {
            nik: Some("1234567890123456".to_string()),
            name: Some("Nama AI".to_string()),
            place_of_birth: Some("Kota AI".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1),
            gender: Some("Laki-laki".to_string()),
            address: Some("Jalan AI No. 1".to_string()),
            rt_rw: Some("001/002".to_string()),
            village: Some("Desa AI".to_string()),
            district: Some("Kecamatan AI".to_string()),
            religion: Some("Islam".to_string()),
            marital_status: Some("Belum Menikah".to_string()),
            occupation: Some("Programmer".to_string()),
            nationality: Some("Indonesia".to_string()),
            valid_until: Some("2025-12-31".to_string()),
            blood_type: Some("O".to_string()),
        })
    }
}
