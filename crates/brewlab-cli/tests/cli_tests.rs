use std::path::Path;

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn brew_cmd(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("brew").expect("Failed to find brew binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

/// Pull the ID out of a "Created ... (ID: <uuid>)" line.
fn created_id(stdout: &[u8]) -> String {
    let text = String::from_utf8_lossy(stdout);
    let start = text.find("(ID: ").expect("output should contain an ID") + 5;
    text[start..start + 36].to_string()
}

/// Create a two-pour method and return its ID.
fn create_two_pour_method(db_path: &Path) -> String {
    let output = brew_cmd(db_path)
        .args(["method", "create", "V60"])
        .output()
        .expect("Failed to run brew");
    assert!(output.status.success());
    let id = created_id(&output.stdout);

    brew_cmd(db_path)
        .args(["step", "add", &id, "Bloom", "--ratio", "2", "--duration", "45"])
        .assert()
        .success();
    brew_cmd(db_path)
        .args(["step", "add", &id, "Finish", "--ratio", "15", "--duration", "90"])
        .assert()
        .success();

    id
}

#[test]
fn test_cli_create_method_success() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    brew_cmd(&db_path)
        .args(["method", "create", "Kalita Wave", "--temp", "94", "--ratio", "16"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created method 'Kalita Wave'"))
        .stdout(predicate::str::contains("- Ratio: 1:16"))
        .stdout(predicate::str::contains("- Temperature: 94°C"))
        .stdout(predicate::str::contains("No steps in this method."));
}

#[test]
fn test_cli_list_empty_methods() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    brew_cmd(&db_path)
        .args(["method", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No brew methods found."));
}

#[test]
fn test_cli_no_command_lists_methods() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_two_pour_method(&db_path);

    brew_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("## V60 (drip)"))
        .stdout(predicate::str::contains("- **Steps**: 2 (2 pours, 02:15)"));
}

#[test]
fn test_cli_show_method_with_dose() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let id = create_two_pour_method(&db_path);

    brew_cmd(&db_path)
        .args(["method", "show", &id, "--dose", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# V60 with 20 g coffee"))
        .stdout(predicate::str::contains("- Total water: 300 g (1:15)"))
        .stdout(predicate::str::contains("| 0 | Bloom | 00:45 | 40 g | 40 g |"))
        .stdout(predicate::str::contains("| 1 | Finish | 01:30 | 260 g | 300 g |"));
}

#[test]
fn test_cli_step_editing() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let id = create_two_pour_method(&db_path);

    brew_cmd(&db_path)
        .args(["step", "insert", &id, "1", "Swirl", "--kind", "wait", "--duration", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inserted step 'Swirl' at index 1"))
        .stdout(predicate::str::contains("| 1 | Swirl | wait | - | 00:10 |"));

    brew_cmd(&db_path)
        .args(["step", "incremental", &id, "0", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 0 now adds ×3"))
        .stdout(predicate::str::contains("| 0 | Bloom | pour | ×3 | 00:45 |"));

    brew_cmd(&db_path)
        .args(["step", "mode", &id, "2", "grams", "--dose", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 2 target is now 300 g"));

    brew_cmd(&db_path)
        .args(["step", "remove", &id, "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed step 1"))
        .stdout(predicate::str::contains("| 1 | Finish | pour | 300 g | 01:30 |"));
}

#[test]
fn test_cli_step_index_out_of_range() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let id = create_two_pour_method(&db_path);

    brew_cmd(&db_path)
        .args(["step", "remove", &id, "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to remove step"))
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_cli_delete_requires_confirm() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let id = create_two_pour_method(&db_path);

    brew_cmd(&db_path)
        .args(["method", "delete", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("confirmation"));

    brew_cmd(&db_path)
        .args(["method", "delete", &id, "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted method 'V60'"));

    brew_cmd(&db_path)
        .args(["method", "show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_cli_export_and_import() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let id = create_two_pour_method(&db_path);

    brew_cmd(&db_path)
        .args(["method", "export", &id, "--output"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported method to"));

    let file = temp_dir.path().join("V60.json");
    let document: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(document["steps"][1]["waterEndTargetRatio"], 15.0);

    brew_cmd(&db_path)
        .args(["method", "import"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created method 'V60'"));

    brew_cmd(&db_path)
        .args(["method", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## V60").count(2));
}

#[test]
fn test_cli_share_link_round_trip() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let id = create_two_pour_method(&db_path);

    let output = brew_cmd(&db_path)
        .args(["method", "share", &id, "--base", "https://brew.example"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let link = String::from_utf8_lossy(&output.stdout).trim().to_string();
    assert!(link.starts_with("https://brew.example#/methods?import="));

    brew_cmd(&db_path)
        .args(["method", "import-link", &link])
        .assert()
        .success()
        .stdout(predicate::str::contains("| 1 | Finish | pour | ×15 | 01:30 |"));

    brew_cmd(&db_path)
        .args(["method", "import-link", "not-a-link"])
        .assert()
        .failure();
}

#[test]
fn test_cli_bean_catalog() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let output = brew_cmd(&db_path)
        .args([
            "bean",
            "add",
            "Guji",
            "--roast",
            "light",
            "--purchased",
            "2024-04-01",
            "--notes",
            "peach, black tea",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let id = created_id(&output.stdout);

    brew_cmd(&db_path)
        .args(["bean", "update", &id, "--finished"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Guji (finished)"));

    brew_cmd(&db_path)
        .args(["bean", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Notes**: peach, black tea"))
        .stdout(predicate::str::contains("- **Purchased**: 2024-04-01"));

    brew_cmd(&db_path)
        .args(["bean", "list", "--active"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No coffee beans found."));
}

#[test]
fn test_cli_grinders() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    brew_cmd(&db_path)
        .args(["grinder", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Timemore S3"))
        .stdout(predicate::str::contains("## Pegasus 600N"));

    brew_cmd(&db_path)
        .args(["grinder", "ranges", "pour-over"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Timemore S3 for Pour-over: 5.5 - 7.5"));

    brew_cmd(&db_path)
        .args(["grinder", "add", "Comandante", "--max", "40", "--step", "1", "--default", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created grinder 'Comandante'"));
}

#[test]
fn test_cli_log_brew_with_unknown_bean() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    brew_cmd(&db_path)
        .args(["record", "log", "--dose", "18", "--water", "288", "--aroma", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created brew record for 'Unknown Bean'"))
        .stdout(predicate::str::contains("18 g coffee, 288 g water"));

    brew_cmd(&db_path)
        .args(["record", "log", "--overall", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("overall"));

    brew_cmd(&db_path)
        .args(["record", "list", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Unknown Bean"));
}

#[test]
fn test_cli_calc() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    brew_cmd(&db_path)
        .args(["calc", "cumulative", "2", "4", "6", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 → 6 → 12 → 15"));

    brew_cmd(&db_path)
        .args(["calc", "suggest", "--dose", "20", "--roast", "light"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Water: 320 g"))
        .stdout(predicate::str::contains("- Temperature: 92°C"))
        .stdout(predicate::str::contains("- Ratio: 1:16"));
}

#[test]
fn test_cli_timer_runs_to_completion() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let id = create_two_pour_method(&db_path);

    brew_cmd(&db_path)
        .args(["timer", &id, "--dose", "20", "--tick-ms", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 1/2: Bloom, pour 40 g (to 40 g)"))
        .stdout(predicate::str::contains("**00:45** Step 2/2: Finish, pour 260 g (to 300 g)"))
        .stdout(predicate::str::contains("**02:15** Done. Total water 300 g."));
}

#[test]
fn test_cli_sync_configuration() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    brew_cmd(&db_path)
        .args(["sync", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Warning: Sync is not configured"));

    brew_cmd(&db_path)
        .args(["sync", "push"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No sync URL configured"));

    brew_cmd(&db_path)
        .args(["sync", "set-url", "https://script.example/exec"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Sync URL saved"));

    brew_cmd(&db_path)
        .args(["sync", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Syncing with https://script.example/exec"));

    brew_cmd(&db_path)
        .args(["sync", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sync URL cleared"));
}

#[test]
fn test_cli_sync_url_flag_overrides_store() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    brew_cmd(&db_path)
        .args(["--sync-url", "https://other.example/exec", "sync", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Syncing with https://other.example/exec"));
}

#[test]
fn test_cli_warns_when_sync_endpoint_rejects_push() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let server = MockServer::start();
    let push = server.mock(|when, then| {
        when.method(Method::POST)
            .path("/exec")
            .body_includes(r#""type":"METHOD""#);
        then.status(200).body(r#"{"status":"error","message":"sheet locked"}"#);
    });

    brew_cmd(&db_path)
        .env("RUST_LOG", "warn")
        .args(["--sync-url", &server.url("/exec"), "method", "create", "Origami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created method 'Origami'"))
        .stderr(predicate::str::contains("did not accept the method"));
    push.assert();
}

#[test]
fn test_cli_unconfigured_sync_stays_quiet() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    brew_cmd(&db_path)
        .env("RUST_LOG", "warn")
        .args(["method", "create", "Origami"])
        .assert()
        .success()
        .stderr(predicate::str::contains("did not accept").not());
}

#[test]
fn test_cli_invalid_method_id() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    brew_cmd(&db_path)
        .args(["method", "show", "not-a-uuid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_cli_help_output() {
    Command::cargo_bin("brew")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: brew"))
        .stdout(predicate::str::contains("method"))
        .stdout(predicate::str::contains("timer"));
}

#[test]
fn test_cli_version_output() {
    Command::cargo_bin("brew")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("brew"));
}
