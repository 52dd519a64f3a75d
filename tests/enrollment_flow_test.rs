use chrono::NaiveDate;
use httpmock::prelude::*;
use std::sync::{Arc, Mutex};
use studio_enroll::adapters::{api::StudentApiClient, viacep::ViaCepLookup};
use studio_enroll::core::validation::Field;
use studio_enroll::domain::ports::AlertPresenter;
use studio_enroll::{Advance, EnrollmentSession, Step, SubmitOutcome};

/// Test double for the alert presenter; records (level, title) pairs.
#[derive(Clone, Default)]
struct RecordingAlerts {
    events: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingAlerts {
    fn titles(&self, level: &str) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| l == level)
            .map(|(_, t)| t.clone())
            .collect()
    }
}

impl AlertPresenter for RecordingAlerts {
    fn show_error(&self, title: &str, _message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(("error".to_string(), title.to_string()));
    }

    fn show_warning(&self, title: &str, _message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(("warning".to_string(), title.to_string()));
    }

    fn show_success(&self, title: &str, _message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(("success".to_string(), title.to_string()));
    }
}

fn session_against(
    server: &MockServer,
) -> (
    EnrollmentSession<ViaCepLookup, StudentApiClient, RecordingAlerts>,
    RecordingAlerts,
) {
    let alerts = RecordingAlerts::default();
    let session = EnrollmentSession::new(
        ViaCepLookup::new(server.base_url()),
        StudentApiClient::new(server.base_url()),
        alerts.clone(),
    );
    (session, alerts)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
}

fn fill_valid_personal(
    session: &mut EnrollmentSession<ViaCepLookup, StudentApiClient, RecordingAlerts>,
) {
    let wizard = session.wizard_mut();
    wizard.set_full_name("Maria Souza");
    wizard.set_email("maria@example.com");
    wizard.set_national_id("111.444.777-35");
    wizard.set_birth_date("1990-05-01");
    wizard.set_phone("11987654321");
}

#[tokio::test]
async fn test_full_enrollment_with_lookup_autofill() {
    let server = MockServer::start();
    let lookup_mock = server.mock(|when, then| {
        when.method(GET).path("/ws/01001000/json/");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "logradouro": "Praça da Sé",
                "bairro": "Sé",
                "localidade": "São Paulo",
                "uf": "SP"
            }));
    });
    let register_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/students")
            .json_body_partial(
                r#"{
                    "name": "Maria Souza",
                    "nationalId": "11144477735",
                    "address": { "street": "Praça da Sé", "number": "100", "postalCode": "01001000" }
                }"#,
            );
        then.status(201)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({ "id": 42, "name": "Maria Souza" }));
    });

    let (mut session, alerts) = session_against(&server);

    // step 1
    fill_valid_personal(&mut session);
    assert_eq!(session.advance(today()), Advance::Moved(Step::Address));

    // step 2: completing the postal code auto-fills the address
    session.set_postal_code("01001-000").await;
    lookup_mock.assert();
    assert_eq!(session.wizard().address().street, "Praça da Sé");
    assert_eq!(session.wizard().address().city, "São Paulo");
    assert_eq!(session.wizard().address().state_code, "SP");

    // number is still empty: advance is blocked with an error on number only
    assert_eq!(session.advance(today()), Advance::Blocked);
    assert_eq!(session.wizard().step(), Step::Address);
    assert_eq!(session.wizard().errors().len(), 1);
    assert!(session.wizard().error_for(Field::Number).is_some());
    assert_eq!(alerts.titles("warning"), vec!["Required fields"]);

    session.wizard_mut().set_number("100");
    assert_eq!(session.advance(today()), Advance::Moved(Step::StudentInfo));

    // step 3 is optional; advancing finalizes into confirmation
    session.wizard_mut().set_notes("prefers morning classes");
    assert_eq!(session.advance(today()), Advance::Moved(Step::Confirmation));
    assert!(session.wizard().review().is_some());

    // step 4: submit
    let outcome = session.submit().await;
    register_mock.assert();
    match outcome {
        SubmitOutcome::Registered(student) => assert_eq!(student.id, Some(42)),
        other => panic!("expected a successful registration, got {:?}", other),
    }
    assert_eq!(alerts.titles("success"), vec!["Success"]);
}

#[tokio::test]
async fn test_unknown_postal_code_warns_and_keeps_fields() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/ws/99999999/json/");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({ "erro": true }));
    });

    let (mut session, alerts) = session_against(&server);
    session.wizard_mut().set_street("Rua Antiga");

    session.set_postal_code("99999999").await;
    assert_eq!(session.wizard().address().street, "Rua Antiga");
    assert_eq!(alerts.titles("warning"), vec!["Postal code not found"]);
    assert!(alerts.titles("error").is_empty());
}

#[tokio::test]
async fn test_lookup_transport_failure_raises_error_and_keeps_fields() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/ws/01001000/json/");
        then.status(500);
    });

    let (mut session, alerts) = session_against(&server);
    session.wizard_mut().set_street("Rua Antiga");

    session.set_postal_code("01001000").await;
    assert_eq!(session.wizard().address().street, "Rua Antiga");
    assert_eq!(alerts.titles("error"), vec!["Postal code lookup failed"]);
}

#[tokio::test]
async fn test_short_postal_code_never_calls_the_service() {
    let server = MockServer::start();
    let lookup_mock = server.mock(|when, then| {
        when.method(GET).path_contains("/ws/");
        then.status(200).json_body(serde_json::json!({}));
    });

    let (mut session, _alerts) = session_against(&server);
    session.set_postal_code("0100100").await; // 7 digits
    session.set_postal_code("010010001").await; // straight to 9 digits, no 8-digit transition

    lookup_mock.assert_hits(0);
}

#[tokio::test]
async fn test_submit_rejection_keeps_state_for_retry() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/ws/01001000/json/");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "logradouro": "Praça da Sé",
                "bairro": "Sé",
                "localidade": "São Paulo",
                "uf": "SP"
            }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/students");
        then.status(400).body("national ID already registered");
    });

    let (mut session, alerts) = session_against(&server);
    fill_valid_personal(&mut session);
    session.advance(today());
    session.set_postal_code("01001000").await;
    session.wizard_mut().set_number("100");
    session.advance(today());
    session.advance(today());
    assert_eq!(session.wizard().step(), Step::Confirmation);

    let outcome = session.submit().await;
    assert_eq!(outcome, SubmitOutcome::Retry);
    assert_eq!(session.wizard().step(), Step::Confirmation);
    assert_eq!(session.wizard().personal().full_name, "Maria Souza");
    assert_eq!(alerts.titles("error"), vec!["Registration rejected"]);

    // the attempt can be repeated with state intact
    let outcome = session.submit().await;
    assert_eq!(outcome, SubmitOutcome::Retry);
}

#[tokio::test]
async fn test_submit_is_only_reachable_from_confirmation() {
    let server = MockServer::start();
    let register_mock = server.mock(|when, then| {
        when.method(POST).path("/api/students");
        then.status(201).json_body(serde_json::json!({}));
    });

    let (mut session, _alerts) = session_against(&server);
    assert_eq!(session.submit().await, SubmitOutcome::NotReady);
    register_mock.assert_hits(0);
}

#[tokio::test]
async fn test_cancel_resets_everything() -> anyhow::Result<()> {
    let server = MockServer::start();
    let (mut session, _alerts) = session_against(&server);

    fill_valid_personal(&mut session);
    session.advance(today());
    session.cancel();

    assert_eq!(session.wizard().personal().full_name, "");
    assert_eq!(session.wizard().address().street, "");
    assert!(session.wizard().errors().is_empty());
    Ok(())
}
