use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_field_kind, get_required_str};
use crate::ipc::types::{AppState, Request};
use crate::mozambique::{self, FieldKind};
use serde_json::{json, Map, Value};

fn handle_mask(req: &Request) -> Result<Value, HandlerErr> {
    let kind = get_field_kind(&req.params)?;
    let value = get_required_str(&req.params, "value")?;
    Ok(json!({ "masked": mozambique::mask(kind, value) }))
}

fn handle_validate(req: &Request) -> Result<Value, HandlerErr> {
    let kind = get_field_kind(&req.params)?;
    let value = get_required_str(&req.params, "value")?;
    let verdict = mozambique::validate(kind, value);
    Ok(json!({ "valid": verdict.valid, "message": verdict.message }))
}

fn handle_check(req: &Request) -> Result<Value, HandlerErr> {
    let kind = get_field_kind(&req.params)?;
    let value = get_required_str(&req.params, "value")?;
    let shape_ok = !value.is_empty() && mozambique::validate(kind, value).valid;
    Ok(json!({
        "valid": shape_ok,
        "checksumValid": mozambique::checksum_valid(kind, value),
    }))
}

fn handle_placeholders() -> Value {
    let mut out = Map::new();
    for kind in FieldKind::ALL {
        out.insert(kind.as_str().to_string(), json!(kind.placeholder()));
    }
    Value::Object(out)
}

pub fn try_handle(_state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "fields.mask" => Some(respond(&req.id, handle_mask(req))),
        "fields.validate" => Some(respond(&req.id, handle_validate(req))),
        "fields.check" => Some(respond(&req.id, handle_check(req))),
        "fields.placeholders" => Some(respond(&req.id, Ok(handle_placeholders()))),
        _ => None,
    }
}
