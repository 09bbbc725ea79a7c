use crate::domain::model::BindingPayload;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("scanned text is not valid JSON")]
    Malformed,
    #[error("scanned payload has no usable doctor_id")]
    MissingDoctorId,
}

/// Parse raw scanned text into a binding payload. Pure: no I/O, no side
/// effects, and no panic on arbitrary input.
pub fn decode_scan(raw: &str) -> Result<BindingPayload, DecodeError> {
    let value: Value = serde_json::from_str(raw).map_err(|_| DecodeError::Malformed)?;

    let doctor_id = coerce_doctor_id(value.get("doctor_id")).ok_or(DecodeError::MissingDoctorId)?;

    let bind_api = value
        .get("bind_api")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);

    Ok(BindingPayload { doctor_id, bind_api })
}

// 數字或數字字串都接受，其餘一律視為缺失
fn coerce_doctor_id(value: Option<&Value>) -> Option<i64> {
    let id = match value? {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    (id > 0).then_some(id)
}
