mod test_support;

use serde_json::json;
use std::io::{BufRead, Write};
use test_support::{request, request_ok, spawn_sidecar, temp_dir};

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let workspace = temp_dir("sged-router-smoke");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let calls: Vec<(&str, serde_json::Value)> = vec![
        ("health", json!({})),
        ("workspace.select", json!({ "path": workspace.to_string_lossy() })),
        ("fields.mask", json!({ "kind": "BI", "value": "1234567890123" })),
        ("fields.validate", json!({ "kind": "PHONE", "value": "+258 84 123 4567" })),
        ("fields.check", json!({ "kind": "NUIT", "value": "123456789E" })),
        ("fields.placeholders", json!({})),
        ("grades.classify", json!({ "value": 12.0 })),
        ("grades.validate", json!({ "value": 12.0 })),
        ("grades.normalize", json!({ "input": "12.5" })),
        ("currency.format", json!({ "amount": 1234.5 })),
        ("currency.sanitize", json!({ "input": "1.5" })),
        ("geo.provinces", json!({})),
        ("geo.districts", json!({ "province": "Gaza" })),
        ("auth.roles", json!({})),
        ("session.register", json!({ "name": "Ana", "email": "ana@sge.mz", "role": "SECRETARIA" })),
        ("session.get", json!({})),
        ("auth.capabilities", json!({})),
        ("auth.check", json!({ "capabilities": ["students"] })),
        ("nav.visible", json!({})),
        ("route.guard", json!({ "path": "/students" })),
        ("setup.get", json!({})),
        ("setup.update", json!({ "section": "grades", "patch": { "inputStep": "1" } })),
        ("session.logout", json!({})),
    ];
    for (i, (method, params)) in calls.into_iter().enumerate() {
        let _ = request_ok(&mut stdin, &mut reader, &(i + 1).to_string(), method, params);
    }

    let unknown = request(&mut stdin, &mut reader, "99", "students.list", json!({}));
    assert_eq!(
        unknown.pointer("/error/code").and_then(|v| v.as_str()),
        Some("not_implemented")
    );

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn malformed_json_gets_bad_json_reply_and_loop_continues() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    writeln!(stdin, "{{not json").expect("write");
    stdin.flush().expect("flush");
    let mut line = String::new();
    reader.read_line(&mut line).expect("read");
    let v: serde_json::Value = serde_json::from_str(line.trim()).expect("json");
    assert_eq!(v.pointer("/error/code").and_then(|v| v.as_str()), Some("bad_json"));

    let health = request_ok(&mut stdin, &mut reader, "1", "health", json!({}));
    assert_eq!(health.get("authenticated").and_then(|v| v.as_bool()), Some(false));
    assert!(health.get("workspacePath").map(|v| v.is_null()).unwrap_or(false));

    drop(stdin);
    let _ = child.wait();
}
