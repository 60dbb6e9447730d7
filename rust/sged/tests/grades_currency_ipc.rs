mod test_support;

use serde_json::json;
use test_support::{request, request_err, request_ok, spawn_sidecar};

#[test]
fn classify_reports_band_label_and_pass() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let cases = [
        (16.0, "excellent", "Excelente", true),
        (15.9, "good", "Bom", true),
        (10.0, "sufficient", "Suficiente", true),
        (9.9, "insufficient", "Insuficiente", false),
        (4.9, "fail", "Mau", false),
        (0.0, "fail", "Mau", false),
    ];
    for (i, (value, band, label, passed)) in cases.iter().enumerate() {
        let r = request_ok(
            &mut stdin,
            &mut reader,
            &i.to_string(),
            "grades.classify",
            json!({ "value": value }),
        );
        assert_eq!(r.get("band").and_then(|v| v.as_str()), Some(*band), "{}", value);
        assert_eq!(r.get("label").and_then(|v| v.as_str()), Some(*label));
        assert_eq!(r.get("passed").and_then(|v| v.as_bool()), Some(*passed));
    }
}

#[test]
fn classify_rejects_out_of_scale_grade() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let v = request(&mut stdin, &mut reader, "1", "grades.classify", json!({ "value": 21 }));
    assert_eq!(v.pointer("/error/code").and_then(|v| v.as_str()), Some("grade_out_of_range"));
    assert_eq!(v.pointer("/error/details/max").and_then(|v| v.as_f64()), Some(20.0));

    let code = request_err(&mut stdin, &mut reader, "2", "grades.classify", json!({ "value": "12" }));
    assert_eq!(code, "bad_params");
}

#[test]
fn normalize_clamps_typed_grade() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let r = request_ok(&mut stdin, &mut reader, "1", "grades.normalize", json!({ "input": "25" }));
    assert_eq!(r.get("value").and_then(|v| v.as_f64()), Some(20.0));

    let r = request_ok(&mut stdin, &mut reader, "2", "grades.normalize", json!({ "input": "" }));
    assert_eq!(r.get("value").and_then(|v| v.as_f64()), Some(0.0));

    let code = request_err(&mut stdin, &mut reader, "3", "grades.normalize", json!({ "input": "dez" }));
    assert_eq!(code, "grade_not_a_number");

    let r = request_ok(&mut stdin, &mut reader, "4", "grades.validate", json!({ "value": -2 }));
    assert_eq!(r.get("message").and_then(|v| v.as_str()), Some("A nota mínima é 0"));
}

#[test]
fn currency_format_and_sanitize() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let r = request_ok(&mut stdin, &mut reader, "1", "currency.format", json!({ "amount": 1234.5 }));
    let formatted = r.get("formatted").and_then(|v| v.as_str()).expect("formatted");
    assert_eq!(formatted, "1\u{a0}234,50\u{a0}MTn");

    let r = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "currency.sanitize",
        json!({ "input": "MT 2.500.5" }),
    );
    assert_eq!(r.get("display").and_then(|v| v.as_str()), Some("2.5005"));
    assert_eq!(r.get("amount").and_then(|v| v.as_f64()), Some(2.5));

    let r = request_ok(&mut stdin, &mut reader, "3", "currency.sanitize", json!({ "input": "." }));
    assert!(r.get("amount").map(|v| v.is_null()).unwrap_or(false));
}

#[test]
fn provinces_and_districts() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let r = request_ok(&mut stdin, &mut reader, "1", "geo.provinces", json!({}));
    let provinces = r.get("provinces").and_then(|v| v.as_array()).expect("provinces");
    assert_eq!(provinces.len(), 11);

    let r = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "geo.districts",
        json!({ "province": "Nampula" }),
    );
    let districts = r.get("districts").and_then(|v| v.as_array()).expect("districts");
    assert!(districts.iter().any(|d| d.as_str() == Some("Ilha de Moçambique")));

    let code = request_err(&mut stdin, &mut reader, "3", "geo.districts", json!({ "province": "Lisboa" }));
    assert_eq!(code, "bad_params");

    let r = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "geo.districts",
        json!({ "province": "Zambézia", "district": "Gurué" }),
    );
    assert_eq!(r.get("belongs").and_then(|v| v.as_bool()), Some(true));

    // A district kept from a previous province no longer fits.
    let r = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "geo.districts",
        json!({ "province": "Gaza", "district": "Gurué" }),
    );
    assert_eq!(r.get("belongs").and_then(|v| v.as_bool()), Some(false));
    assert!(r.get("districts").and_then(|v| v.as_array()).is_some());
}
