use crate::core::decode::{decode_scan, DecodeError};
use crate::core::trust::TrustValidator;
use crate::domain::model::BindingOutcome;
use crate::domain::ports::{Choice, Navigator, Notifier, Route, SessionStore};
use crate::utils::error::Result;
use regex::Regex;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};

// 後端目前有兩種語言的「已綁定」提示
const ALREADY_BOUND_PATTERN: &str = r"(?i)已绑定|重复绑定|already\s*bound|has\s*bound";

/// Maps an HTTP response (or the lack of one) to a binding outcome.
pub struct OutcomeClassifier {
    conflict: Regex,
}

impl OutcomeClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            conflict: Regex::new(ALREADY_BOUND_PATTERN)?,
        })
    }

    /// Priority order: success flag first, then conflict, then generic error.
    /// Transport failures never reach this point.
    pub fn classify(&self, status: u16, body: &Value) -> BindingOutcome {
        let ok_status = (200..300).contains(&status);
        let ok_flag = body.get("success").and_then(Value::as_bool) == Some(true)
            || body.get("code").and_then(Value::as_i64) == Some(0);

        let message = body
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| body.get("detail").and_then(Value::as_str))
            .unwrap_or("")
            .to_string();

        if ok_status && ok_flag {
            return BindingOutcome::Success;
        }

        if status == 409 || self.conflict.is_match(&message) {
            return BindingOutcome::AlreadyBound { message };
        }

        BindingOutcome::HttpError {
            status,
            message: if message.is_empty() {
                format!("HTTP {}", status)
            } else {
                message
            },
        }
    }
}

/// Drives one binding attempt from scanned text to a terminal prompt:
/// decode, trust gate, auth gate, request, classification, user guidance.
pub struct DoctorBinder<S: SessionStore, N: Navigator, U: Notifier> {
    validator: TrustValidator,
    classifier: OutcomeClassifier,
    default_endpoint: String,
    session: S,
    navigator: N,
    notifier: U,
    client: Client,
    loading: AtomicBool,
}

impl<S: SessionStore, N: Navigator, U: Notifier> DoctorBinder<S, N, U> {
    pub fn new(
        validator: TrustValidator,
        default_endpoint: impl Into<String>,
        session: S,
        navigator: N,
        notifier: U,
    ) -> Result<Self> {
        Ok(Self {
            validator,
            classifier: OutcomeClassifier::new()?,
            default_endpoint: default_endpoint.into(),
            session,
            navigator,
            notifier,
            client: Client::new(),
            loading: AtomicBool::new(false),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// One full binding attempt. Always returns a terminal outcome and shows
    /// exactly one prompt for it; never retries.
    pub async fn bind_from_scan(&self, raw: &str) -> BindingOutcome {
        let outcome = self.attempt(raw).await;
        tracing::info!("binding attempt finished: {:?}", outcome);
        self.present(&outcome);
        outcome
    }

    async fn attempt(&self, raw: &str) -> BindingOutcome {
        let payload = match decode_scan(raw) {
            Ok(payload) => payload,
            Err(DecodeError::Malformed) => return BindingOutcome::MalformedPayload,
            Err(DecodeError::MissingDoctorId) => return BindingOutcome::MissingDoctorId,
        };

        let endpoint = payload
            .bind_api
            .unwrap_or_else(|| self.default_endpoint.clone());

        if !self.validator.trust(&endpoint) {
            tracing::warn!("blocked bind request to untrusted endpoint: {}", endpoint);
            return BindingOutcome::Untrusted { endpoint };
        }

        let Some(token) = self.session.token() else {
            return BindingOutcome::NotAuthenticated;
        };

        self.loading.store(true, Ordering::SeqCst);
        let outcome = self
            .request_bind(&endpoint, &token, payload.doctor_id)
            .await;
        self.loading.store(false, Ordering::SeqCst);

        outcome
    }

    async fn request_bind(&self, endpoint: &str, token: &str, doctor_id: i64) -> BindingOutcome {
        tracing::debug!("binding doctor {} via {}", doctor_id, endpoint);

        let response = self
            .client
            .post(endpoint)
            .header("Authorization", format!("Token {}", token))
            .header("content-type", "application/json")
            .json(&json!({ "doctor_id": doctor_id }))
            .send()
            .await;

        match response {
            Ok(resp) => {
                let status = resp.status().as_u16();
                match resp.text().await {
                    Ok(text) => {
                        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
                        self.classifier.classify(status, &body)
                    }
                    Err(err) => {
                        tracing::error!("bind response body unreadable: {}", err);
                        BindingOutcome::NetworkFailure
                    }
                }
            }
            Err(err) => {
                tracing::error!("bind request failed: {}", err);
                BindingOutcome::NetworkFailure
            }
        }
    }

    // One display action per terminal state, then back to idle.
    fn present(&self, outcome: &BindingOutcome) {
        match outcome {
            BindingOutcome::Success => {
                if self.notifier.confirm(
                    "Doctor bound",
                    "View the latest patient info now?",
                    "View",
                    "Stay here",
                ) == Choice::Confirm
                {
                    self.go_to_patient_info();
                }
            }
            BindingOutcome::AlreadyBound { message } => {
                let content = if message.is_empty() {
                    "A doctor is already bound to this account; no need to bind again."
                } else {
                    message.as_str()
                };
                if self
                    .notifier
                    .confirm("Already bound", content, "View", "Got it")
                    == Choice::Confirm
                {
                    self.go_to_patient_info();
                }
            }
            BindingOutcome::HttpError { message, .. } => {
                self.notifier.alert("Binding failed", message);
            }
            BindingOutcome::NetworkFailure => {
                self.notifier
                    .alert("Network error", "Could not reach the server, try again later.");
            }
            BindingOutcome::Untrusted { .. } => {
                // Silent blocking is disallowed: say it was blocked and not sent.
                self.notifier.alert(
                    "Untrusted address blocked",
                    "The endpoint in the scanned code is not on the allow-list; \
                     the request was blocked and has not been sent.\n\
                     Ask an administrator to update the allow-list if it is needed.",
                );
            }
            BindingOutcome::MalformedPayload => {
                self.notifier
                    .alert("Unreadable code", "The scanned content is not valid JSON.");
            }
            BindingOutcome::MissingDoctorId => {
                self.notifier.toast("The scanned code has no valid doctor_id");
            }
            BindingOutcome::NotAuthenticated => {
                self.notifier.toast("Please log in first");
                self.navigator.redirect_to(Route::Login);
            }
        }
    }

    // 優先返回上一頁，沒有上一頁再直接導航
    fn go_to_patient_info(&self) {
        if !self.navigator.back() {
            self.navigator.navigate_to(Route::PatientInfo);
        }
    }
}
