use clinic_client::core::bind::DoctorBinder;
use clinic_client::core::trust::{AllowList, TrustValidator};
use clinic_client::domain::model::BindingOutcome;
use clinic_client::domain::ports::{Choice, Navigator, Notifier, Route, SessionStore};
use httpmock::prelude::*;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct MemorySession {
    token: Arc<Mutex<Option<String>>>,
}

impl MemorySession {
    fn with_token(token: &str) -> Self {
        Self {
            token: Arc::new(Mutex::new(Some(token.to_string()))),
        }
    }
}

impl SessionStore for MemorySession {
    fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn store(&self, token: &str) -> clinic_client::Result<()> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> clinic_client::Result<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

#[derive(Clone, Default)]
struct RecordingNavigator {
    can_go_back: bool,
    events: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    fn with_history() -> Self {
        Self {
            can_go_back: true,
            ..Default::default()
        }
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn back(&self) -> bool {
        self.events.lock().unwrap().push("back".to_string());
        self.can_go_back
    }

    fn navigate_to(&self, route: Route) {
        self.events
            .lock()
            .unwrap()
            .push(format!("navigate:{:?}", route));
    }

    fn redirect_to(&self, route: Route) {
        self.events
            .lock()
            .unwrap()
            .push(format!("redirect:{:?}", route));
    }
}

#[derive(Clone)]
struct ScriptedNotifier {
    choice: Choice,
    events: Arc<Mutex<Vec<String>>>,
}

impl ScriptedNotifier {
    fn new(choice: Choice) -> Self {
        Self {
            choice,
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl Notifier for ScriptedNotifier {
    fn toast(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("toast:{}", message));
    }

    fn alert(&self, title: &str, _content: &str) {
        self.events.lock().unwrap().push(format!("alert:{}", title));
    }

    fn confirm(&self, title: &str, _content: &str, _confirm: &str, _cancel: &str) -> Choice {
        self.events
            .lock()
            .unwrap()
            .push(format!("confirm:{}", title));
        self.choice
    }
}

const BIND_PATH: &str = "/api/patient/bind-doctor/";

fn binder_for(
    server: &MockServer,
    session: MemorySession,
    navigator: RecordingNavigator,
    notifier: ScriptedNotifier,
) -> DoctorBinder<MemorySession, RecordingNavigator, ScriptedNotifier> {
    let allow = AllowList::new(["127.0.0.1"], [server.port().to_string()], [BIND_PATH]);
    DoctorBinder::new(
        TrustValidator::new(allow).unwrap(),
        server.url(BIND_PATH),
        session,
        navigator,
        notifier,
    )
    .unwrap()
}

#[tokio::test]
async fn test_successful_binding_offers_navigation() {
    let server = MockServer::start();
    let bind_mock = server.mock(|when, then| {
        when.method(POST)
            .path(BIND_PATH)
            .header("Authorization", "Token secret-token")
            .json_body(serde_json::json!({"doctor_id": 7}));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"success": true, "message": "绑定成功"}));
    });

    let navigator = RecordingNavigator::default();
    let notifier = ScriptedNotifier::new(Choice::Confirm);
    let binder = binder_for(
        &server,
        MemorySession::with_token("secret-token"),
        navigator.clone(),
        notifier.clone(),
    );

    let outcome = binder.bind_from_scan(r#"{"doctor_id": 7}"#).await;

    bind_mock.assert();
    assert_eq!(outcome, BindingOutcome::Success);
    assert!(!binder.is_busy());
    assert_eq!(notifier.events(), vec!["confirm:Doctor bound"]);
    // no prior page in this host, so back() falls back to direct navigation
    assert_eq!(navigator.events(), vec!["back", "navigate:PatientInfo"]);
}

#[tokio::test]
async fn test_navigation_prefers_going_back() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(BIND_PATH);
        then.status(200)
            .json_body(serde_json::json!({"success": true}));
    });

    let navigator = RecordingNavigator::with_history();
    let binder = binder_for(
        &server,
        MemorySession::with_token("secret-token"),
        navigator.clone(),
        ScriptedNotifier::new(Choice::Confirm),
    );

    binder.bind_from_scan(r#"{"doctor_id": 2}"#).await;

    // back() succeeded, so no direct navigation happens
    assert_eq!(navigator.events(), vec!["back"]);
}

#[tokio::test]
async fn test_declining_navigation_stays_put() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(BIND_PATH);
        then.status(200)
            .json_body(serde_json::json!({"success": true}));
    });

    let navigator = RecordingNavigator::default();
    let binder = binder_for(
        &server,
        MemorySession::with_token("secret-token"),
        navigator.clone(),
        ScriptedNotifier::new(Choice::Cancel),
    );

    let outcome = binder.bind_from_scan(r#"{"doctor_id": 2}"#).await;

    assert_eq!(outcome, BindingOutcome::Success);
    assert!(navigator.events().is_empty());
}

#[tokio::test]
async fn test_zero_code_body_counts_as_success() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(BIND_PATH);
        then.status(200).json_body(serde_json::json!({"code": 0}));
    });

    let binder = binder_for(
        &server,
        MemorySession::with_token("secret-token"),
        RecordingNavigator::default(),
        ScriptedNotifier::new(Choice::Cancel),
    );

    assert_eq!(
        binder.bind_from_scan(r#"{"doctor_id": 2}"#).await,
        BindingOutcome::Success
    );
}

#[tokio::test]
async fn test_conflict_status_is_already_bound() {
    let server = MockServer::start();
    let bind_mock = server.mock(|when, then| {
        when.method(POST).path(BIND_PATH);
        then.status(409)
            .json_body(serde_json::json!({"success": false, "message": "duplicate"}));
    });

    let notifier = ScriptedNotifier::new(Choice::Cancel);
    let binder = binder_for(
        &server,
        MemorySession::with_token("secret-token"),
        RecordingNavigator::default(),
        notifier.clone(),
    );

    let outcome = binder.bind_from_scan(r#"{"doctor_id": 5}"#).await;

    bind_mock.assert();
    assert_eq!(
        outcome,
        BindingOutcome::AlreadyBound {
            message: "duplicate".to_string()
        }
    );
    assert_eq!(notifier.events(), vec!["confirm:Already bound"]);
}

#[tokio::test]
async fn test_already_bound_message_with_plain_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(BIND_PATH);
        then.status(400)
            .json_body(serde_json::json!({"success": false, "message": "您已绑定医生，请勿重复绑定"}));
    });

    let binder = binder_for(
        &server,
        MemorySession::with_token("secret-token"),
        RecordingNavigator::default(),
        ScriptedNotifier::new(Choice::Cancel),
    );

    let outcome = binder.bind_from_scan(r#"{"doctor_id": 5}"#).await;
    assert!(matches!(outcome, BindingOutcome::AlreadyBound { .. }));
}

#[tokio::test]
async fn test_server_error_without_body_synthesizes_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(BIND_PATH);
        then.status(500);
    });

    let notifier = ScriptedNotifier::new(Choice::Cancel);
    let binder = binder_for(
        &server,
        MemorySession::with_token("secret-token"),
        RecordingNavigator::default(),
        notifier.clone(),
    );

    let outcome = binder.bind_from_scan(r#"{"doctor_id": 5}"#).await;

    assert_eq!(
        outcome,
        BindingOutcome::HttpError {
            status: 500,
            message: "HTTP 500".to_string()
        }
    );
    assert_eq!(notifier.events(), vec!["alert:Binding failed"]);
}

#[tokio::test]
async fn test_untrusted_endpoint_is_blocked_before_any_request() {
    let server = MockServer::start();
    let bind_mock = server.mock(|when, then| {
        when.method(POST).path(BIND_PATH);
        then.status(200)
            .json_body(serde_json::json!({"success": true}));
    });

    let notifier = ScriptedNotifier::new(Choice::Confirm);
    let binder = binder_for(
        &server,
        MemorySession::with_token("secret-token"),
        RecordingNavigator::default(),
        notifier.clone(),
    );

    let scan = r#"{"doctor_id": 7, "bind_api": "http://evil.com/api/patient/bind-doctor/"}"#;
    let outcome = binder.bind_from_scan(scan).await;

    assert_eq!(bind_mock.hits(), 0);
    assert_eq!(
        outcome,
        BindingOutcome::Untrusted {
            endpoint: "http://evil.com/api/patient/bind-doctor/".to_string()
        }
    );
    // the block must be disclosed, never silent
    assert_eq!(notifier.events(), vec!["alert:Untrusted address blocked"]);
}

#[tokio::test]
async fn test_missing_token_halts_before_any_request() {
    let server = MockServer::start();
    let bind_mock = server.mock(|when, then| {
        when.method(POST).path(BIND_PATH);
        then.status(200)
            .json_body(serde_json::json!({"success": true}));
    });

    let navigator = RecordingNavigator::default();
    let notifier = ScriptedNotifier::new(Choice::Confirm);
    let binder = binder_for(
        &server,
        MemorySession::default(),
        navigator.clone(),
        notifier.clone(),
    );

    let outcome = binder.bind_from_scan(r#"{"doctor_id": 7}"#).await;

    assert_eq!(bind_mock.hits(), 0);
    assert_eq!(outcome, BindingOutcome::NotAuthenticated);
    assert_eq!(notifier.events(), vec!["toast:Please log in first"]);
    assert_eq!(navigator.events(), vec!["redirect:Login"]);
}

#[tokio::test]
async fn test_malformed_scan_never_reaches_network() {
    let server = MockServer::start();
    let bind_mock = server.mock(|when, then| {
        when.method(POST).path(BIND_PATH);
        then.status(200);
    });

    let notifier = ScriptedNotifier::new(Choice::Confirm);
    let binder = binder_for(
        &server,
        MemorySession::with_token("secret-token"),
        RecordingNavigator::default(),
        notifier.clone(),
    );

    assert_eq!(
        binder.bind_from_scan("not json at all").await,
        BindingOutcome::MalformedPayload
    );
    assert_eq!(
        binder.bind_from_scan(r#"{"doctor_id": "abc"}"#).await,
        BindingOutcome::MissingDoctorId
    );
    assert_eq!(bind_mock.hits(), 0);
    assert_eq!(
        notifier.events(),
        vec![
            "alert:Unreadable code",
            "toast:The scanned code has no valid doctor_id"
        ]
    );
}

#[tokio::test]
async fn test_unreachable_server_is_network_failure() {
    // port 1 on loopback: nothing listens there
    let allow = AllowList::new(["127.0.0.1"], ["1"], [BIND_PATH]);
    let notifier = ScriptedNotifier::new(Choice::Confirm);
    let binder = DoctorBinder::new(
        TrustValidator::new(allow).unwrap(),
        format!("http://127.0.0.1:1{}", BIND_PATH),
        MemorySession::with_token("secret-token"),
        RecordingNavigator::default(),
        notifier.clone(),
    )
    .unwrap();

    let outcome = binder.bind_from_scan(r#"{"doctor_id": 7}"#).await;

    assert_eq!(outcome, BindingOutcome::NetworkFailure);
    assert!(!binder.is_busy());
    assert_eq!(notifier.events(), vec!["alert:Network error"]);
}

#[tokio::test]
async fn test_blank_bind_api_falls_back_to_default_endpoint() {
    let server = MockServer::start();
    let bind_mock = server.mock(|when, then| {
        when.method(POST).path(BIND_PATH);
        then.status(200)
            .json_body(serde_json::json!({"success": true}));
    });

    let binder = binder_for(
        &server,
        MemorySession::with_token("secret-token"),
        RecordingNavigator::default(),
        ScriptedNotifier::new(Choice::Cancel),
    );

    let outcome = binder
        .bind_from_scan(r#"{"doctor_id": 7, "bind_api": "   "}"#)
        .await;

    bind_mock.assert();
    assert_eq!(outcome, BindingOutcome::Success);
}
