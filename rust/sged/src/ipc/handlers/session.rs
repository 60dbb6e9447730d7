use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::handlers::setup::session_setup;
use crate::ipc::types::{AppState, Request};
use crate::permissions;
use crate::session::{self, ProfileInput, Session};
use serde_json::{json, Value};

pub fn session_json(s: &Session) -> Value {
    json!({
        "id": s.id,
        "startedAt": s.started_at,
        "user": s.user,
        "initials": s.initials(),
        "roleLabel": s.role().label(),
        "capabilities": permissions::grants_for(Some(s.role())),
    })
}

fn open_session(state: &mut AppState, input: ProfileInput) -> Result<Value, HandlerErr> {
    let profile = input
        .into_profile()
        .map_err(|e| HandlerErr::bad_params(e.0))?;
    let s = Session::start(profile);

    let setup = session_setup(state.db.as_ref())
        .map_err(|e| HandlerErr::new("db_query_failed", e.to_string()))?;
    if let Some(conn) = state.db.as_ref() {
        let stored = if setup.persist {
            session::save(conn, &s)
        } else {
            session::clear(conn)
        };
        stored.map_err(|e| HandlerErr::new("db_update_failed", e.to_string()))?;
    }

    tracing::info!(user = %s.user.id, role = s.role().as_str(), "session started");
    let out = json!({ "session": session_json(&s) });
    state.session = Some(s);
    Ok(out)
}

fn handle_login(state: &mut AppState, req: &Request) -> Result<Value, HandlerErr> {
    let Some(profile) = req.params.get("profile") else {
        return Err(HandlerErr::bad_params("missing profile"));
    };
    let input: ProfileInput = serde_json::from_value(profile.clone())
        .map_err(|e| HandlerErr::bad_params(format!("invalid profile: {}", e)))?;
    open_session(state, input)
}

fn handle_register(state: &mut AppState, req: &Request) -> Result<Value, HandlerErr> {
    let text = |key: &str| {
        req.params
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    };
    let input = ProfileInput {
        id: None,
        email: text("email"),
        name: text("name"),
        role: text("role"),
        avatar: None,
    };
    open_session(state, input)
}

fn handle_get(state: &AppState) -> Value {
    json!({ "session": state.session.as_ref().map(session_json) })
}

fn handle_logout(state: &mut AppState) -> Result<Value, HandlerErr> {
    if let Some(conn) = state.db.as_ref() {
        session::clear(conn).map_err(|e| HandlerErr::new("db_update_failed", e.to_string()))?;
    }
    let was_signed_in = state.session.take().is_some();
    if was_signed_in {
        tracing::info!("session ended");
    }
    Ok(json!({ "ok": true, "wasSignedIn": was_signed_in }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "session.login" => Some(respond(&req.id, handle_login(state, req))),
        "session.register" => Some(respond(&req.id, handle_register(state, req))),
        "session.get" => Some(respond(&req.id, Ok(handle_get(state)))),
        "session.logout" => Some(respond(&req.id, handle_logout(state))),
        _ => None,
    }
}
