//! Serde roundtrip and JsonSchema validation tests for wire entities.

use chrono::Utc;
use schemars::schema_for;
use gatepass_core::entities::*;
use gatepass_core::enums::*;
use gatepass_core::responses::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn student() -> User {
    User {
        id: "usr-a3f8b2c1".into(),
        name: "Asha Verma".into(),
        phone: "9876543210".into(),
        email: Some("asha@example.edu".into()),
        role: Role::Student,
        gender: Some(Gender::Female),
        hostel_type: Some(HostelType::Girls),
        assigned_hostel: None,
        room_number: Some("B-214".into()),
        parent_phone: Some("9123456780".into()),
        session: Some("2024-28".into()),
        branch: Some("ECE".into()),
        college: None,
        is_approved: true,
        created_at: Utc::now(),
    }
}

fn out_log() -> VisitLog {
    VisitLog {
        id: "vlg-0b1c2d3e".into(),
        student: "usr-a3f8b2c1".into(),
        gate: "gat-11223344".into(),
        hostel_type: HostelType::Girls,
        direction: Direction::Out,
        reason: Some("Library".into()),
        status: VisitStatus::Approved,
        handled_by: None,
        handled_at: None,
        timestamp: Utc::now(),
        created_at: Utc::now(),
    }
}

roundtrip_and_validate!(user_roundtrip, User, student());

roundtrip_and_validate!(
    guard_roundtrip,
    User,
    User {
        id: "usr-99887766".into(),
        role: Role::Guard,
        hostel_type: None,
        assigned_hostel: Some(HostelType::Boys),
        email: None,
        gender: None,
        ..student()
    }
);

roundtrip_and_validate!(
    gate_roundtrip,
    Gate,
    Gate {
        id: "gat-11223344".into(),
        name: "Girls Hostel Main Gate".into(),
        code: "GH-MAIN".into(),
        hostel_type: HostelType::Girls,
        is_active: true,
        latitude: Some(28.7041),
        longitude: Some(77.1025),
        assigned_guard: None,
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    unconfigured_gate_roundtrip,
    Gate,
    Gate {
        id: "gat-55667788".into(),
        name: "Old Side Gate".into(),
        code: "GH-SIDE".into(),
        hostel_type: HostelType::Girls,
        is_active: false,
        latitude: None,
        longitude: None,
        assigned_guard: Some("usr-99887766".into()),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(visit_log_roundtrip, VisitLog, out_log());

roundtrip_and_validate!(
    visit_log_detail_roundtrip,
    VisitLogDetail,
    VisitLogDetail {
        log: out_log(),
        gate_info: Some(GateSummary {
            id: "gat-11223344".into(),
            name: "Girls Hostel Main Gate".into(),
            code: "GH-MAIN".into(),
            hostel_type: HostelType::Girls,
        }),
        student_info: Some(student().summary()),
    }
);

roundtrip_and_validate!(
    check_receipt_roundtrip,
    CheckReceipt,
    CheckReceipt {
        message: CheckReceipt::success_message(Direction::Out),
        distance: 1.25,
        log: out_log(),
    }
);

roundtrip_and_validate!(
    last_log_empty_roundtrip,
    LastLogResponse,
    LastLogResponse { log: None }
);

// --- Wire shape ---

#[test]
fn visit_log_uses_original_field_names() {
    let value = serde_json::to_value(out_log()).unwrap();
    assert_eq!(value["direction"], "OUT");
    assert_eq!(value["status"], "approved");
    assert_eq!(value["hostelType"], "girls");
    assert_eq!(value["student"], "usr-a3f8b2c1");
    assert!(value["handledBy"].is_null());
}

#[test]
fn detail_flattens_the_log() {
    let detail = VisitLogDetail {
        log: out_log(),
        gate_info: None,
        student_info: None,
    };
    let value = serde_json::to_value(detail).unwrap();
    assert_eq!(value["id"], "vlg-0b1c2d3e");
    assert!(value.get("studentInfo").is_none());
}

// --- Schema rejection tests ---

#[test]
fn schema_rejects_lowercase_direction() {
    let schema = serde_json::to_value(schema_for!(VisitLog)).unwrap();
    let mut invalid = serde_json::to_value(out_log()).unwrap();
    invalid["direction"] = serde_json::json!("out");
    let errors = validate_against_schema(&schema, &invalid);
    assert!(!errors.is_empty(), "Should reject lowercase direction");
}

#[test]
fn schema_rejects_gate_without_code() {
    let schema = serde_json::to_value(schema_for!(Gate)).unwrap();
    let invalid = serde_json::json!({
        "id": "gat-test",
        "name": "Main",
        "hostelType": "boys",
        "isActive": true,
        "createdAt": "2026-02-08T12:00:00Z"
    });
    let errors = validate_against_schema(&schema, &invalid);
    assert!(!errors.is_empty(), "Should reject gate without 'code'");
}
