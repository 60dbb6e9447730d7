use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::get_required_str;
use crate::ipc::types::{AppState, Request};
use crate::provinces;
use serde_json::{json, Value};

fn handle_districts(req: &Request) -> Result<Value, HandlerErr> {
    let province = get_required_str(&req.params, "province")?;
    let districts = provinces::districts_of(province)
        .ok_or_else(|| HandlerErr::bad_params(format!("unknown province: {}", province)))?;
    let mut out = json!({ "province": province, "districts": districts });
    if let Some(district) = req.params.get("district").and_then(|v| v.as_str()) {
        out["belongs"] = json!(provinces::is_district_of(province, district));
    }
    Ok(out)
}

pub fn try_handle(_state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "geo.provinces" => Some(respond(
            &req.id,
            Ok(json!({ "provinces": provinces::province_names().collect::<Vec<_>>() })),
        )),
        "geo.districts" => Some(respond(&req.id, handle_districts(req))),
        _ => None,
    }
}
