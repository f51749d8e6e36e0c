//! Field validators for the patient record and the registration form.
//!
//! # Responsibilities
//! - Express the form constraints as plain named checks
//! - Return every failing field, not just the first
//!
//! # Design Decisions
//! - Validation is a pure function over the typed record
//! - Decoupled from any form-binding machinery; the view decides rendering

use crate::screening::types::PatientData;

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate the typed patient record.
pub fn validate_patient(patient: &PatientData) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if patient.nik.len() != 16 || !patient.nik.chars().all(|c| c.is_ascii_digit()) {
        errors.push(FieldError::new("nik", "NIK must be exactly 16 digits"));
    }
    if patient.name.chars().count() < 2 {
        errors.push(FieldError::new("name", "name must be at least 2 characters"));
    }
    if !is_valid_email(&patient.email) {
        errors.push(FieldError::new("email", "invalid email format"));
    }
    if !(1..=120).contains(&patient.age) {
        errors.push(FieldError::new("age", "age must be between 1 and 120"));
    }
    if patient.date_of_birth.is_none() {
        errors.push(FieldError::new("date_of_birth", "date of birth is required"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a registration form before it is posted.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if name.is_empty() {
        errors.push(FieldError::new("name", "name is required"));
    }
    if email.is_empty() {
        errors.push(FieldError::new("email", "email is required"));
    } else if !is_valid_email(email) {
        errors.push(FieldError::new("email", "invalid email format"));
    }
    if password.is_empty() {
        errors.push(FieldError::new("password", "password is required"));
    }
    if confirm_password.is_empty() {
        errors.push(FieldError::new("confirm_password", "confirmation is required"));
    } else if password != confirm_password {
        errors.push(FieldError::new("confirm_password", "passwords do not match"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Structural email check: a non-empty local part and a dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@')
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_patient() -> PatientData {
        PatientData {
            nik: "1234567890123456".to_string(),
            name: "Budi Santoso".to_string(),
            email: "budi@example.com".to_string(),
            age: 24,
            gender: "Laki-laki".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 6, 15),
            ..PatientData::default()
        }
    }

    #[test]
    fn test_valid_patient_passes() {
        assert!(validate_patient(&valid_patient()).is_ok());
    }

    #[test]
    fn test_nik_must_be_sixteen_digits() {
        let mut patient = valid_patient();
        patient.nik = "12345".to_string();
        let errors = validate_patient(&patient).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "nik");

        patient.nik = "123456789012345X".to_string();
        assert!(validate_patient(&patient).is_err());
    }

    #[test]
    fn test_age_bounds() {
        let mut patient = valid_patient();
        patient.age = 0;
        assert_eq!(validate_patient(&patient).unwrap_err()[0].field, "age");
        patient.age = 121;
        assert_eq!(validate_patient(&patient).unwrap_err()[0].field, "age");
        patient.age = 120;
        assert!(validate_patient(&patient).is_ok());
    }

    #[test]
    fn test_all_failures_reported_at_once() {
        let patient = PatientData::default();
        let errors = validate_patient(&patient).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["nik", "name", "email", "age", "date_of_birth"]
        );
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("nama.pasien@clinic.example.id"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("plain"));
        assert!(!is_valid_email("@no-local.com"));
        assert!(!is_valid_email("x@nodot"));
        assert!(!is_valid_email("x@.leading.dot"));
        assert!(!is_valid_email("x@trailing.dot."));
        assert!(!is_valid_email("x@two@ats.com"));
    }

    #[test]
    fn test_registration_password_mismatch() {
        let errors =
            validate_registration("Budi", "budi@example.com", "secret1", "secret2").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "confirm_password");
    }

    #[test]
    fn test_registration_requires_all_fields() {
        let errors = validate_registration("", "", "", "").unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
