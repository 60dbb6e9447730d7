use super::handlers;
use super::types::{AppState, Request};
use crate::ipc::error::err;
use crate::session;

pub fn handle_request(state: &mut AppState, req: Request) -> serde_json::Value {
    tracing::debug!(id = %req.id, method = %req.method, "request");
    let resp = dispatch(state, &req);
    record_activity(state);
    resp
}

// Any request made while signed in counts toward the auto-lock idle clock.
fn record_activity(state: &AppState) {
    if let (Some(conn), Some(_)) = (state.db.as_ref(), state.session.as_ref()) {
        if let Err(e) = session::touch(conn, chrono::Utc::now()) {
            tracing::warn!(error = %e, "failed to record session activity");
        }
    }
}

fn dispatch(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Some(resp) = handlers::core::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::fields::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::grades::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::currency::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::geo::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::access::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::session::try_handle(state, req) {
        return resp;
    }
    if let Some(resp) = handlers::setup::try_handle(state, req) {
        return resp;
    }

    tracing::debug!(method = %req.method, "unknown method");
    err(
        &req.id,
        "not_implemented",
        format!("unknown method: {}", req.method),
        None,
    )
}
