use crate::db;
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::require_db;
use crate::ipc::types::{AppState, Request};
use crate::session;
use serde_json::{json, Map, Value};

#[derive(Clone, Copy)]
pub enum SetupSection {
    Session,
    Grades,
}

impl SetupSection {
    const ALL: [SetupSection; 2] = [Self::Session, Self::Grades];

    fn parse(s: &str) -> Option<Self> {
        match s {
            "session" => Some(Self::Session),
            "grades" => Some(Self::Grades),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::Grades => "grades",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Session => "setup.session",
            Self::Grades => "setup.grades",
        }
    }
}

fn default_section(section: SetupSection) -> Value {
    match section {
        SetupSection::Session => json!({
            "persist": true,
            "autoLockMinutes": 0
        }),
        SetupSection::Grades => json!({
            "showClassification": true,
            "inputStep": "0.5"
        }),
    }
}

fn as_object_mut(value: &mut Value) -> Result<&mut Map<String, Value>, String> {
    value
        .as_object_mut()
        .ok_or_else(|| "internal setup object must be a JSON object".to_string())
}

fn parse_bool(v: &Value, key: &str) -> Result<bool, String> {
    v.as_bool().ok_or_else(|| format!("{} must be boolean", key))
}

fn parse_i64_range(v: &Value, key: &str, min: i64, max: i64) -> Result<i64, String> {
    let n = v
        .as_i64()
        .ok_or_else(|| format!("{} must be integer", key))?;
    if !(min..=max).contains(&n) {
        return Err(format!("{} must be in {}..={}", key, min, max));
    }
    Ok(n)
}

fn parse_one_of(v: &Value, key: &str, allowed: &[&str]) -> Result<String, String> {
    let s = v.as_str().ok_or_else(|| format!("{} must be string", key))?;
    if !allowed.contains(&s) {
        return Err(format!("{} must be one of {}", key, allowed.join(", ")));
    }
    Ok(s.to_string())
}

fn merge_section_patch(
    section: SetupSection,
    current: &mut Value,
    patch: &Map<String, Value>,
) -> Result<(), String> {
    let obj = as_object_mut(current)?;
    for (k, v) in patch {
        match section {
            SetupSection::Session => match k.as_str() {
                "persist" => {
                    obj.insert(k.clone(), json!(parse_bool(v, k)?));
                }
                "autoLockMinutes" => {
                    obj.insert(k.clone(), json!(parse_i64_range(v, k, 0, 240)?));
                }
                _ => return Err(format!("unknown session field: {}", k)),
            },
            SetupSection::Grades => match k.as_str() {
                "showClassification" => {
                    obj.insert(k.clone(), json!(parse_bool(v, k)?));
                }
                "inputStep" => {
                    obj.insert(k.clone(), json!(parse_one_of(v, k, &["0.1", "0.5", "1"])?));
                }
                _ => return Err(format!("unknown grades field: {}", k)),
            },
        }
    }
    Ok(())
}

pub fn load_section(conn: &rusqlite::Connection, section: SetupSection) -> anyhow::Result<Value> {
    let mut current = default_section(section);
    if let Some(saved) = db::settings_get_json(conn, section.key())? {
        if let Some(saved_obj) = saved.as_object() {
            // Best-effort apply: a malformed saved value falls back to defaults.
            if let Err(msg) = merge_section_patch(section, &mut current, saved_obj) {
                tracing::warn!(section = section.name(), %msg, "ignoring saved setup");
                current = default_section(section);
            }
        }
    }
    Ok(current)
}

/// Session persistence settings, with defaults when no workspace is open.
pub struct SessionSetup {
    pub persist: bool,
    pub auto_lock_minutes: i64,
}

pub fn session_setup(conn: Option<&rusqlite::Connection>) -> anyhow::Result<SessionSetup> {
    let section = match conn {
        Some(c) => load_section(c, SetupSection::Session)?,
        None => default_section(SetupSection::Session),
    };
    Ok(SessionSetup {
        persist: section.get("persist").and_then(|v| v.as_bool()).unwrap_or(true),
        auto_lock_minutes: section
            .get("autoLockMinutes")
            .and_then(|v| v.as_i64())
            .unwrap_or(0),
    })
}

fn handle_setup_get(state: &AppState) -> Result<Value, HandlerErr> {
    let conn = require_db(state)?;
    let mut out = Map::new();
    for section in SetupSection::ALL {
        let v = load_section(conn, section)
            .map_err(|e| HandlerErr::new("db_query_failed", e.to_string()))?;
        out.insert(section.name().to_string(), v);
    }
    Ok(Value::Object(out))
}

fn handle_setup_update(state: &AppState, req: &Request) -> Result<Value, HandlerErr> {
    let conn = require_db(state)?;
    let Some(section_raw) = req.params.get("section").and_then(|v| v.as_str()) else {
        return Err(HandlerErr::bad_params("missing section"));
    };
    let Some(section) = SetupSection::parse(section_raw) else {
        return Err(HandlerErr::bad_params("unknown section"));
    };
    let Some(patch_obj) = req.params.get("patch").and_then(|v| v.as_object()) else {
        return Err(HandlerErr::bad_params("patch must be an object"));
    };

    let mut current = load_section(conn, section)
        .map_err(|e| HandlerErr::new("db_query_failed", e.to_string()))?;
    merge_section_patch(section, &mut current, patch_obj).map_err(HandlerErr::bad_params)?;
    db::settings_set_json(conn, section.key(), &current)
        .map_err(|e| HandlerErr::new("db_update_failed", e.to_string()))?;
    if let SetupSection::Session = section {
        if current.get("persist").and_then(|v| v.as_bool()) == Some(false) {
            session::clear(conn).map_err(|e| HandlerErr::new("db_update_failed", e.to_string()))?;
        }
    }
    Ok(json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "setup.get" => Some(respond(&req.id, handle_setup_get(state))),
        "setup.update" => Some(respond(&req.id, handle_setup_update(state, req))),
        _ => None,
    }
}
