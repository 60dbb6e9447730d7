use crate::grades;
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_required_f64, get_required_str};
use crate::ipc::types::{AppState, Request};
use serde_json::{json, Value};

fn handle_classify(req: &Request) -> Result<Value, HandlerErr> {
    let value = get_required_f64(&req.params, "value")?;
    match grades::classify_grade(value) {
        Ok(c) => Ok(json!({
            "band": c.band,
            "label": c.label,
            "passed": c.passed,
            "tier": c.tier,
        })),
        Err(e) => Err(HandlerErr::new(e.code(), e.message()).with_details(json!({
            "value": value,
            "min": grades::GRADE_MIN,
            "max": grades::GRADE_MAX,
        }))),
    }
}

fn handle_validate(req: &Request) -> Result<Value, HandlerErr> {
    let value = get_required_f64(&req.params, "value")?;
    let verdict = grades::validate_grade(value);
    Ok(json!({ "valid": verdict.valid, "message": verdict.message }))
}

fn handle_normalize(req: &Request) -> Result<Value, HandlerErr> {
    let input = get_required_str(&req.params, "input")?;
    match grades::normalize_grade_input(input) {
        Some(v) => Ok(json!({ "value": v })),
        None => Err(HandlerErr::new("grade_not_a_number", "A nota deve ser um número")),
    }
}

pub fn try_handle(_state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "grades.classify" => Some(respond(&req.id, handle_classify(req))),
        "grades.validate" => Some(respond(&req.id, handle_validate(req))),
        "grades.normalize" => Some(respond(&req.id, handle_normalize(req))),
        _ => None,
    }
}
