use serde::{Deserialize, Serialize};

/// One scanned binding request. Ephemeral, owned by a single binding attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingPayload {
    pub doctor_id: i64,
    pub bind_api: Option<String>,
}

/// Pieces of a candidate endpoint as decomposed by the trust validator.
/// An empty port means "no explicit port given".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointComponents {
    pub scheme: String,
    pub host: String,
    pub port: String,
    pub path: String,
}

/// Terminal result of one binding attempt. Exactly one variant is produced
/// per attempt and drives the single user-facing prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingOutcome {
    Success,
    AlreadyBound { message: String },
    HttpError { status: u16, message: String },
    NetworkFailure,
    Untrusted { endpoint: String },
    MalformedPayload,
    MissingDoctorId,
    NotAuthenticated,
}

impl BindingOutcome {
    pub fn is_bound(&self) -> bool {
        matches!(
            self,
            BindingOutcome::Success | BindingOutcome::AlreadyBound { .. }
        )
    }
}

/// Standard response envelope used by every clinic backend endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientInfo {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub user_info: Option<UserInfo>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub assigned_doctor_name: Option<String>,
    // 後端序列化器對這個欄位用駝峰命名
    #[serde(default, alias = "admitDate")]
    pub admit_date: Option<String>,
    #[serde(default)]
    pub status: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub user_info: UserInfo,
    #[serde(default)]
    pub patient_info: Option<PatientInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub id: i64,
    pub doctor_name: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_doctor_id: Option<i64>,
}
