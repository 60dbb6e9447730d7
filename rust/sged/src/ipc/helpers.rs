use crate::ipc::error::HandlerErr;
use crate::ipc::types::AppState;
use crate::mozambique::FieldKind;
use crate::permissions::Role;
use rusqlite::Connection;

pub fn get_required_str<'a>(params: &'a serde_json::Value, key: &str) -> Result<&'a str, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

pub fn get_required_f64(params: &serde_json::Value, key: &str) -> Result<f64, HandlerErr> {
    let v = params
        .get(key)
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))?;
    v.as_f64()
        .ok_or_else(|| HandlerErr::bad_params(format!("{} must be a number", key)))
}

pub fn get_field_kind(params: &serde_json::Value) -> Result<FieldKind, HandlerErr> {
    let raw = get_required_str(params, "kind")?;
    FieldKind::parse(raw).ok_or_else(|| {
        HandlerErr::bad_params(format!("unknown kind: {}", raw)).with_details(serde_json::json!({
            "allowed": FieldKind::ALL.iter().map(|k| k.as_str()).collect::<Vec<_>>()
        }))
    })
}

/// Role to evaluate: an explicit `params.role` wins, otherwise the session's.
/// A role string that does not parse yields `None`, which grants nothing.
pub fn effective_role(state: &AppState, params: &serde_json::Value) -> Option<Role> {
    match params.get("role") {
        Some(serde_json::Value::String(s)) => Role::parse(s),
        Some(v) if !v.is_null() => None,
        _ => state.session.as_ref().map(|s| s.role()),
    }
}

pub fn require_db(state: &AppState) -> Result<&Connection, HandlerErr> {
    state
        .db
        .as_ref()
        .ok_or_else(|| HandlerErr::new("no_workspace", "select a workspace first"))
}
