use crate::db;
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::handlers::session::session_json;
use crate::ipc::handlers::setup::session_setup;
use crate::ipc::helpers::get_required_str;
use crate::ipc::types::{AppState, Request};
use crate::session::{self, Restored};
use serde_json::{json, Value};
use std::path::PathBuf;

fn handle_health(state: &AppState) -> Value {
    json!({
        "version": env!("CARGO_PKG_VERSION"),
        "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string()),
        "authenticated": state.session.is_some(),
    })
}

fn handle_workspace_select(state: &mut AppState, req: &Request) -> Result<Value, HandlerErr> {
    let path = PathBuf::from(get_required_str(&req.params, "path")?);
    let conn = db::open_db(&path).map_err(|e| HandlerErr::new("db_open_failed", format!("{e:?}")))?;

    let setup = session_setup(Some(&conn))
        .map_err(|e| HandlerErr::new("db_query_failed", e.to_string()))?;
    if !setup.persist {
        // A row left from before persistence was turned off must never sign anyone in.
        session::clear(&conn).map_err(|e| HandlerErr::new("db_update_failed", e.to_string()))?;
    } else if let Some(live) = state.session.as_ref() {
        // Someone already signed in: they stay, and become the stored session.
        session::save(&conn, live)
            .map_err(|e| HandlerErr::new("db_update_failed", e.to_string()))?;
    } else {
        let restored = session::restore(&conn, setup.auto_lock_minutes, chrono::Utc::now())
            .map_err(|e| HandlerErr::new("db_query_failed", e.to_string()))?;
        match restored {
            Restored::Session(s) => {
                tracing::info!(user = %s.user.id, "restored session");
                state.session = Some(s);
            }
            Restored::Discarded(reason) => {
                tracing::warn!(%reason, "discarded stored session");
            }
            Restored::Nothing => {}
        }
    }

    tracing::info!(workspace = %path.display(), "workspace opened");
    state.workspace = Some(path.clone());
    state.db = Some(conn);
    Ok(json!({
        "workspacePath": path.to_string_lossy(),
        "session": state.session.as_ref().map(session_json),
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "health" => Some(respond(&req.id, Ok(handle_health(state)))),
        "workspace.select" => Some(respond(&req.id, handle_workspace_select(state, req))),
        _ => None,
    }
}
