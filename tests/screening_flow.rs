//! End-to-end screening flow: load questions, fill, confirm, submit.

mod common;

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;
use intake_client::api::client::ApiClient;
use intake_client::config::ApiConfig;
use intake_client::notify::{Notifier, NullNotifier};
use intake_client::resilience::retries::RetryPolicy;
use intake_client::screening::form::{FormStep, ScreeningForm};
use intake_client::screening::questions::{HttpScreeningSubmitter, ScreeningService};
use intake_client::screening::types::AnswerValue;

use common::{start_programmable_backend, MockResponse};

const QUESTIONS_BODY: &str = r#"[
    {"id":"q-date","label":"Tanggal Rencana Pendakian","type":"date"},
    {"id":"q-history","label":"Apakah Anda memiliki riwayat penyakit berikut ini?","type":"checkbox","options":["Asma","Hipertensi (tekanan darah tinggi)","Tidak ada dari yang disebutkan"]},
    {"id":"q-meds","label":"Apakah Anda sedang dalam pengobatan rutin?","type":"checkbox_textarea","options":["Ya","Tidak"]}
]"#;

fn client_for(addr: SocketAddr) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url: format!("http://{addr}/api/v1"),
        timeout_ms: 2_000,
    })
    .unwrap()
}

fn quick_retry() -> RetryPolicy {
    RetryPolicy {
        max_retries: 2,
        base_delay: Duration::from_millis(10),
    }
}

struct CountingNotifier {
    errors: AtomicU32,
}

impl Notifier for CountingNotifier {
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }
}

fn fill_patient(form: &mut ScreeningForm) {
    form.patient_mut().nik = "3201012345678901".to_string();
    form.patient_mut().name = "Siti Rahayu".to_string();
    form.patient_mut().gender = "Perempuan".to_string();
    form.set_date_of_birth_at(
        NaiveDate::from_ymd_opt(1995, 3, 20),
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
    );
}

#[tokio::test]
async fn test_full_flow_from_load_to_submission() {
    let submitted = Arc::new(Mutex::new(String::new()));
    let s = submitted.clone();
    let addr = start_programmable_backend(move |req| {
        let s = s.clone();
        async move {
            if req.starts_with("GET /api/v1/screening/questions") {
                MockResponse::json(200, QUESTIONS_BODY)
            } else if req.starts_with("POST /api/v1/screening") {
                *s.lock().unwrap() = req;
                MockResponse::json(200, r#"{"status":"queued"}"#)
            } else {
                MockResponse::json(404, r#"{"error":"no such endpoint"}"#)
            }
        }
    })
    .await;

    let client = client_for(addr);
    let service = ScreeningService::new(client.clone(), quick_retry());
    let questions = service.load_questions().await.unwrap();
    assert_eq!(questions.len(), 3);

    let mut form = ScreeningForm::new(questions);
    fill_patient(&mut form);

    form.request_advance(&NullNotifier).unwrap();
    form.confirm().unwrap();
    assert_eq!(form.step(), FormStep::Screening);

    form.set_answer("q-date", AnswerValue::Text("2026-09-01".to_string()));
    form.toggle_option("q-history", "Asma");
    form.toggle_option("q-meds", "Ya");
    assert!(form.explanation_visible("q-meds"));
    form.set_answer("q-meds_text", AnswerValue::Text("Inhaler salbutamol".to_string()));

    let submitter = HttpScreeningSubmitter::new(client);
    form.submit(&submitter, &NullNotifier).await.unwrap();

    // The posted body carries the typed record and the answers merged flat.
    let request = submitted.lock().unwrap().clone();
    let body_start = request.find("\r\n\r\n").unwrap() + 4;
    let payload: serde_json::Value = serde_json::from_str(&request[body_start..]).unwrap();
    assert_eq!(payload["nik"], "3201012345678901");
    assert_eq!(payload["q-history"], serde_json::json!(["Asma"]));
    assert_eq!(payload["q-meds_text"], "Inhaler salbutamol");

    // Success resets the form fields.
    assert!(form.patient().nik.is_empty());
    assert!(form.answer("q-meds").is_none());
}

#[tokio::test]
async fn test_question_load_retries_transient_failures() {
    let calls = Arc::new(AtomicU32::new(0));
    let c = calls.clone();
    let addr = start_programmable_backend(move |_req| {
        let c = c.clone();
        async move {
            if c.fetch_add(1, Ordering::SeqCst) == 0 {
                MockResponse::json(503, r#"{"error":"starting"}"#)
            } else {
                MockResponse::json(200, QUESTIONS_BODY)
            }
        }
    })
    .await;

    let service = ScreeningService::new(client_for(addr), quick_retry());
    let questions = service.load_questions().await.unwrap();

    assert_eq!(questions.len(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_question_load_failure_surfaces_error() {
    let addr = start_programmable_backend(|_req| async {
        MockResponse::json(500, r#"{"error":"database unavailable"}"#)
    })
    .await;

    let service = ScreeningService::new(client_for(addr), quick_retry());
    let err = service.load_questions().await.unwrap_err();
    assert_eq!(err.message, "database unavailable");
}

#[tokio::test]
async fn test_failed_submission_keeps_entered_fields() {
    let addr = start_programmable_backend(|req| async move {
        if req.starts_with("GET /api/v1/screening/questions") {
            MockResponse::json(200, QUESTIONS_BODY)
        } else {
            MockResponse::json(502, r#"{"error":"upstream down"}"#)
        }
    })
    .await;

    let client = client_for(addr);
    let service = ScreeningService::new(client.clone(), quick_retry());
    let mut form = ScreeningForm::new(service.load_questions().await.unwrap());
    fill_patient(&mut form);
    form.request_advance(&NullNotifier).unwrap();
    form.confirm().unwrap();
    form.toggle_option("q-history", "Hipertensi (tekanan darah tinggi)");

    let notifier = CountingNotifier {
        errors: AtomicU32::new(0),
    };
    let submitter = HttpScreeningSubmitter::new(client);
    let result = form.submit(&submitter, &notifier).await;

    assert!(result.is_err());
    assert_eq!(notifier.errors.load(Ordering::SeqCst), 1);
    assert_eq!(form.patient().name, "Siti Rahayu");
    assert_eq!(
        form.answer("q-history"),
        Some(&AnswerValue::MultiSelected(vec![
            "Hipertensi (tekanan darah tinggi)".to_string()
        ]))
    );
}
