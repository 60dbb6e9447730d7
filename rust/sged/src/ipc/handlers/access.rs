use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{effective_role, get_required_str};
use crate::ipc::types::{AppState, Request};
use crate::nav::{self, NavEntry, NavSection, RouteDecision};
use crate::permissions::{self, Capability, Role};
use serde_json::{json, Value};

fn handle_roles() -> Value {
    let roles: Vec<Value> = Role::ALL
        .iter()
        .map(|r| json!({ "role": r, "label": r.label() }))
        .collect();
    json!({ "roles": roles })
}

fn handle_capabilities(state: &AppState, req: &Request) -> Value {
    let role = effective_role(state, &req.params);
    json!({
        "role": role,
        "capabilities": permissions::grants_for(role),
    })
}

fn parse_required(params: &Value) -> Result<Vec<Capability>, HandlerErr> {
    let Some(items) = params.get("capabilities").and_then(|v| v.as_array()) else {
        return Err(HandlerErr::bad_params("capabilities must be an array"));
    };
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let raw = item
            .as_str()
            .ok_or_else(|| HandlerErr::bad_params(format!("capabilities[{}] must be a string", i)))?;
        let cap = Capability::parse(raw).ok_or_else(|| {
            HandlerErr::bad_params(format!("unknown capability: {}", raw))
                .with_details(json!({ "index": i }))
        })?;
        out.push(cap);
    }
    Ok(out)
}

fn handle_check(state: &AppState, req: &Request) -> Result<Value, HandlerErr> {
    let required = parse_required(&req.params)?;
    let role = effective_role(state, &req.params);
    Ok(json!({
        "role": role,
        "allowed": permissions::has_capability(role, &required),
    }))
}

fn entry_json(e: &NavEntry) -> Value {
    json!({
        "title": e.title,
        "url": e.url,
        "requires": e.requires,
    })
}

fn handle_nav_visible(state: &AppState, req: &Request) -> Value {
    let role = effective_role(state, &req.params);
    let visible = nav::visible_entries(role, nav::NAV_ENTRIES);
    let section = |s: NavSection| -> Vec<Value> {
        visible
            .iter()
            .filter(|e| e.section == s)
            .map(|e| entry_json(e))
            .collect()
    };
    json!({
        "role": role,
        "main": section(NavSection::Main),
        "system": section(NavSection::System),
    })
}

fn handle_route_guard(state: &AppState, req: &Request) -> Result<Value, HandlerErr> {
    let path = get_required_str(&req.params, "path")?;
    let role = state.session.as_ref().map(|s| s.role());
    Ok(match nav::guard_route(role, path) {
        RouteDecision::Allow => json!({ "decision": "allow" }),
        RouteDecision::Redirect(to) => json!({ "decision": "redirect", "redirect": to }),
        RouteDecision::Forbidden => json!({ "decision": "forbidden" }),
    })
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "auth.roles" => Some(respond(&req.id, Ok(handle_roles()))),
        "auth.capabilities" => Some(respond(&req.id, Ok(handle_capabilities(state, req)))),
        "auth.check" => Some(respond(&req.id, handle_check(state, req))),
        "nav.visible" => Some(respond(&req.id, Ok(handle_nav_visible(state, req)))),
        "route.guard" => Some(respond(&req.id, handle_route_guard(state, req))),
        _ => None,
    }
}
