use crate::currency::{format_mzn, sanitize_currency_input};
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_required_f64, get_required_str};
use crate::ipc::types::{AppState, Request};
use serde_json::{json, Value};

fn handle_format(req: &Request) -> Result<Value, HandlerErr> {
    let amount = get_required_f64(&req.params, "amount")?;
    Ok(json!({ "formatted": format_mzn(amount) }))
}

fn handle_sanitize(req: &Request) -> Result<Value, HandlerErr> {
    let input = get_required_str(&req.params, "input")?;
    let parsed = sanitize_currency_input(input);
    Ok(json!({
        "display": parsed.display,
        "amount": parsed.amount,
        "formatted": parsed.amount.map(format_mzn),
    }))
}

pub fn try_handle(_state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "currency.format" => Some(respond(&req.id, handle_format(req))),
        "currency.sanitize" => Some(respond(&req.id, handle_sanitize(req))),
        _ => None,
    }
}
