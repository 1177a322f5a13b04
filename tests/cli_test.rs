//! CLI behavior tests.

mod support;

use support::{
    assert_failure, assert_stderr_contains, assert_stdout_contains, assert_success, fixtures,
    stdout, Test,
};

#[test]
fn test_generate_without_config_fails_with_hint() {
    let t = Test::new();

    let output = t.generate();
    assert_failure(&output);
    assert_stderr_contains(&output, "warren.json");
}

#[test]
fn test_generate_creates_files_and_reports() {
    let t = Test::with_config(&fixtures::two_backends());

    let output = t.generate();
    assert_success(&output);
    assert_stdout_contains(&output, "secrets generated");

    assert!(t.has_file("secrets.framework.json"));
    assert!(t.has_file("secrets.user.json"));
    assert!(t.has_file("secrets.local.json"));
}

#[test]
fn test_sync_reports_in_sync_on_second_run() {
    let t = Test::with_config(&fixtures::two_backends());

    assert_success(&t.generate());
    let output = t.sync();
    assert_success(&output);
    assert_stdout_contains(&output, "already in sync");
}

#[test]
fn test_sync_creates_user_file_when_missing() {
    let t = Test::with_config(&fixtures::two_backends());

    let output = t.sync();
    assert_success(&output);
    assert_stdout_contains(&output, "created");
    assert!(t.has_file("secrets.user.json"));
}

#[test]
fn test_map_json_is_parsable() {
    let t = Test::with_config(&fixtures::full_project());
    assert_success(&t.generate());

    let output = t.map_json();
    assert_success(&output);

    let map: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let auth = map["auth-service"].as_array().unwrap();
    assert!(auth.iter().any(|v| v == "AUTH_SERVICE_API_KEY"));
    assert!(map.get("auth-worker").is_none());
}

#[test]
fn test_remove_lists_changed_files() {
    let t = Test::with_config(&fixtures::with_demo_service());
    assert_success(&t.generate());

    let output = t.remove("demo-service");
    assert_success(&output);
    assert_stdout_contains(&output, "secrets.framework.json");
    assert_stdout_contains(&output, "secrets.local.json");
}

#[test]
fn test_remove_rejects_invalid_service_name() {
    let t = Test::with_config(&fixtures::two_backends());

    let output = t.remove("Not_A_Service");
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid service name");
}

#[test]
fn test_remove_warns_when_service_still_configured() {
    let t = Test::with_config(&fixtures::with_demo_service());
    assert_success(&t.generate());

    let output = t.remove("demo-service");
    assert_success(&output);
    assert_stdout_contains(&output, "still listed in warren.json");
}
