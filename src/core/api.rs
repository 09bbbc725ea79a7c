use crate::domain::model::{
    ApiEnvelope, DoctorSummary, LoginData, PatientInfo, RegisterRequest, RegisteredUser,
};
use crate::utils::error::Result;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

/// Envelope plus the HTTP status it arrived with. Callers that care about
/// auth expiry check the status; everything else just reads the envelope.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub body: ApiEnvelope<T>,
}

impl<T> ApiResponse<T> {
    /// Token rejected or auth-flavored failure message from the backend.
    pub fn auth_expired(&self) -> bool {
        if self.status == 401 {
            return true;
        }
        self.body
            .message
            .as_deref()
            .is_some_and(|m| m.contains("认证") || m.contains("登录已过期"))
    }
}

/// Plain pass-through client for the clinic backend. No retries, no special
/// handling beyond envelope decoding; the binding protocol lives in
/// core::bind, not here.
pub struct ApiClient {
    base: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            base,
            client: Client::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base, path))
            .header("content-type", "application/json")
    }

    fn authorized(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.request(method, path)
            .header("Authorization", format!("Token {}", token))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<ApiResponse<T>> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.json::<ApiEnvelope<T>>().await?;
        tracing::debug!("API response: status={} success={}", status, body.success);
        Ok(ApiResponse { status, body })
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<ApiResponse<RegisteredUser>> {
        self.send(self.request(Method::POST, "/api/patient/register/").json(request))
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<ApiResponse<LoginData>> {
        let credentials = serde_json::json!({
            "username": username,
            "password": password,
        });
        self.send(self.request(Method::POST, "/api/patient/login/").json(&credentials))
            .await
    }

    pub async fn patient_info(&self, token: &str) -> Result<ApiResponse<PatientInfo>> {
        self.send(self.authorized(Method::GET, "/api/patient/info/", token))
            .await
    }

    pub async fn update_patient(
        &self,
        token: &str,
        fields: &HashMap<String, String>,
    ) -> Result<ApiResponse<PatientInfo>> {
        self.send(
            self.authorized(Method::PUT, "/api/patient/update/", token)
                .json(fields),
        )
        .await
    }

    pub async fn doctors(&self) -> Result<ApiResponse<Vec<DoctorSummary>>> {
        self.send(self.request(Method::GET, "/api/doctors/")).await
    }

    pub async fn logout(&self, token: &str) -> Result<ApiResponse<Value>> {
        self.send(self.authorized(Method::POST, "/api/patient/logout/", token))
            .await
    }
}
