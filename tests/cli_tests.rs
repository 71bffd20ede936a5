use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn recall_cmd(data_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("recall"));
    cmd.arg("--data-dir")
        .arg(data_dir.path())
        .env_remove("ANTHROPIC_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn init_journal() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    recall_cmd(&temp_dir).arg("init").assert().success();
    temp_dir
}

fn add_json(data_dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = recall_cmd(data_dir)
        .arg("add")
        .args(args)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success(), "add failed: {:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

fn add_id(data_dir: &TempDir, args: &[&str]) -> String {
    add_json(data_dir, args)["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn test_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("recall"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("memory journal"));
}

#[test]
fn test_version() {
    Command::new(assert_cmd::cargo::cargo_bin!("recall"))
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("recall"));
}

#[test]
fn test_not_initialized_error() {
    let temp_dir = TempDir::new().unwrap();

    recall_cmd(&temp_dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn test_init_creates_config_and_store() {
    let temp_dir = TempDir::new().unwrap();

    recall_cmd(&temp_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    assert!(temp_dir.path().join("recall.toml").exists());
    assert!(temp_dir.path().join("store").join("settings.json").exists());
}

#[test]
fn test_init_twice_fails() {
    let temp_dir = init_journal();

    recall_cmd(&temp_dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_init_with_samples() {
    let temp_dir = TempDir::new().unwrap();
    recall_cmd(&temp_dir)
        .args(["init", "--samples", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"samples\": 2"));

    recall_cmd(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Started keeping memories"));
}

// =============================================================================
// Add / show / list
// =============================================================================

#[test]
fn test_add_and_show() {
    let temp_dir = init_journal();
    let memory = add_json(
        &temp_dir,
        &[
            "Lunch with Mina at the harbour",
            "--tag",
            "food",
            "-i",
            "8",
            "--person",
            "Mina",
        ],
    );
    assert_eq!(memory["type"], "text");
    assert_eq!(memory["importance"], 8);
    assert_eq!(memory["tags"][0], "food");
    let id = memory["id"].as_str().unwrap();

    recall_cmd(&temp_dir)
        .args(["show", id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch with Mina"))
        .stdout(predicate::str::contains("Mina"))
        .stdout(predicate::str::contains("food"));
}

#[test]
fn test_add_uses_default_importance() {
    let temp_dir = init_journal();
    let memory = add_json(&temp_dir, &["Plain note"]);
    assert_eq!(memory["importance"], 5);
}

#[test]
fn test_add_with_location_and_media() {
    let temp_dir = init_journal();
    let memory = add_json(
        &temp_dir,
        &[
            "Sunset at the beach",
            "-t",
            "photo",
            "--lat",
            "33.45",
            "--lon",
            "-126.5",
            "--address",
            "Jeju",
            "--media",
            "photos/sunset.jpg",
        ],
    );
    assert_eq!(memory["type"], "photo");
    assert_eq!(memory["location"]["longitude"], -126.5);
    assert_eq!(memory["location"]["address"], "Jeju");
    assert_eq!(memory["media"]["mime"], "image/jpeg");
}

#[test]
fn test_add_rejects_out_of_range_importance() {
    let temp_dir = init_journal();
    recall_cmd(&temp_dir)
        .args(["add", "too much", "-i", "11"])
        .assert()
        .failure();
}

#[test]
fn test_add_rejects_invalid_coordinates() {
    let temp_dir = init_journal();
    recall_cmd(&temp_dir)
        .args(["add", "Nowhere", "--lat", "NaN", "--lon", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Latitude"));
    recall_cmd(&temp_dir)
        .args(["add", "Off the map", "--lat", "500", "--lon", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Latitude"));
    recall_cmd(&temp_dir)
        .args(["add", "Off the map", "--lat", "10", "--lon", "inf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Longitude"));

    recall_cmd(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No memories found."));
}

#[test]
fn test_add_from_stdin() {
    let temp_dir = init_journal();
    recall_cmd(&temp_dir)
        .args(["add", "-", "--json"])
        .write_stdin("Piped in from a script\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Piped in from a script"));
}

#[test]
fn test_add_body_file_rejects_absolute_path() {
    let temp_dir = init_journal();
    recall_cmd(&temp_dir)
        .args(["add", "--body-file", "/etc/passwd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Absolute paths are not allowed"));
}

#[test]
fn test_add_body_file_rejects_traversal() {
    let temp_dir = init_journal();
    recall_cmd(&temp_dir)
        .current_dir(temp_dir.path())
        .args(["add", "--body-file", "../secret.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path traversal"));
}

#[test]
fn test_add_body_file_reads_relative_file() {
    let temp_dir = init_journal();
    std::fs::write(temp_dir.path().join("note.txt"), "From a file\n").unwrap();

    recall_cmd(&temp_dir)
        .current_dir(temp_dir.path())
        .args(["add", "--body-file", "note.txt", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"content\": \"From a file\""));
}

#[test]
fn test_show_missing_memory() {
    let temp_dir = init_journal();
    recall_cmd(&temp_dir)
        .args(["show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Memory not found"));
}

#[test]
fn test_list_filters() {
    let temp_dir = init_journal();
    add_id(&temp_dir, &["Team meeting notes", "--tag", "work", "-i", "7"]);
    add_id(&temp_dir, &["Bought groceries", "--tag", "shopping", "-i", "3"]);

    recall_cmd(&temp_dir)
        .args(["list", "--tag", "work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Team meeting"))
        .stdout(predicate::str::contains("groceries").not());

    recall_cmd(&temp_dir)
        .args(["list", "--min-importance", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Team meeting"))
        .stdout(predicate::str::contains("groceries").not());

    recall_cmd(&temp_dir)
        .args(["list", "-q", "grocer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("groceries"))
        .stdout(predicate::str::contains("Team meeting").not());
}

#[test]
fn test_list_empty() {
    let temp_dir = init_journal();
    recall_cmd(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No memories found."));
}

#[test]
fn test_list_pagination_json() {
    let temp_dir = init_journal();
    for i in 0..5 {
        add_id(&temp_dir, &[&format!("Entry number {}", i)]);
    }

    let output = recall_cmd(&temp_dir)
        .args(["list", "--per-page", "2", "--page", "3", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let page: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["page"], 3);
    assert_eq!(page["total_pages"], 3);
    assert_eq!(page["total"], 5);
    assert_eq!(page["memories"].as_array().unwrap().len(), 1);
}

#[test]
fn test_list_page_far_past_the_end() {
    let temp_dir = init_journal();
    add_id(&temp_dir, &["Only entry"]);

    let output = recall_cmd(&temp_dir)
        .args(["list", "--page", &usize::MAX.to_string(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "list failed: {:?}", output);
    let page: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["total"], 1);
    assert!(page["memories"].as_array().unwrap().is_empty());
}

// =============================================================================
// Edit / delete / clear
// =============================================================================

#[test]
fn test_edit_memory() {
    let temp_dir = init_journal();
    let id = add_id(&temp_dir, &["First draft", "--tag", "draft"]);

    recall_cmd(&temp_dir)
        .args([
            "edit",
            &id,
            "--content",
            "Final version",
            "-i",
            "9",
            "--add-tag",
            "done",
            "--remove-tag",
            "draft",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Final version"))
        .stdout(predicate::str::contains("\"importance\": 9"))
        .stdout(predicate::str::contains("done"))
        .stdout(predicate::str::contains("draft").not())
        .stdout(predicate::str::contains("\"updated\""));
}

#[test]
fn test_edit_rejects_invalid_coordinates() {
    let temp_dir = init_journal();
    let id = add_id(&temp_dir, &["Pinned", "--lat", "33.45", "--lon", "126.5"]);

    recall_cmd(&temp_dir)
        .args(["edit", &id, "--lat", "95", "--lon", "126.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Latitude"));

    recall_cmd(&temp_dir)
        .args(["show", &id, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("33.45"));
}

#[test]
fn test_edit_without_changes_fails() {
    let temp_dir = init_journal();
    let id = add_id(&temp_dir, &["Unchanged"]);

    recall_cmd(&temp_dir)
        .args(["edit", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));
}

#[test]
fn test_delete_with_force() {
    let temp_dir = init_journal();
    let id = add_id(&temp_dir, &["Short-lived"]);

    recall_cmd(&temp_dir)
        .args(["delete", &id, "-f"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));

    recall_cmd(&temp_dir).args(["show", &id]).assert().failure();
}

#[test]
fn test_delete_cancelled_without_confirmation() {
    let temp_dir = init_journal();
    let id = add_id(&temp_dir, &["Keep me"]);

    recall_cmd(&temp_dir)
        .args(["delete", &id])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));

    recall_cmd(&temp_dir).args(["show", &id]).assert().success();
}

#[test]
fn test_delete_many() {
    let temp_dir = init_journal();
    let first = add_id(&temp_dir, &["One"]);
    let second = add_id(&temp_dir, &["Two"]);
    let keep = add_id(&temp_dir, &["Three"]);

    recall_cmd(&temp_dir)
        .args(["delete", &first, &second, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 2"));

    recall_cmd(&temp_dir).args(["show", &keep]).assert().success();
}

#[test]
fn test_delete_repeated_id_reports_once() {
    let temp_dir = init_journal();
    let id = add_id(&temp_dir, &["Said twice"]);

    recall_cmd(&temp_dir)
        .args(["delete", &id, &id, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 1"));

    let id = add_id(&temp_dir, &["Said twice again"]);
    let output = recall_cmd(&temp_dir)
        .args(["delete", &id, &id, "-f"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Deleted").count(), 1);
}

#[test]
fn test_delete_missing_id_fails() {
    let temp_dir = init_journal();
    recall_cmd(&temp_dir)
        .args(["delete", "missing", "-f"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Memory not found"));
}

#[test]
fn test_clear_requires_force() {
    let temp_dir = init_journal();
    add_id(&temp_dir, &["Something"]);

    recall_cmd(&temp_dir)
        .arg("clear")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    recall_cmd(&temp_dir)
        .args(["clear", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared"));

    recall_cmd(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No memories found."));
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_search_plain_and_fields() {
    let temp_dir = init_journal();
    add_id(&temp_dir, &["Dinner at the noodle bar", "--tag", "food"]);
    add_id(&temp_dir, &["Quarterly planning", "--tag", "work"]);

    recall_cmd(&temp_dir)
        .args(["search", "noodle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 results"))
        .stdout(predicate::str::contains("noodle bar"));

    recall_cmd(&temp_dir)
        .args(["search", "tag:work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quarterly planning"))
        .stdout(predicate::str::contains("noodle").not());

    recall_cmd(&temp_dir)
        .args(["search", "regex:^Quarter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quarterly planning"));
}

#[test]
fn test_search_invalid_regex_fails() {
    let temp_dir = init_journal();
    recall_cmd(&temp_dir)
        .args(["search", "regex:(unclosed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid regex"));
}

#[test]
fn test_search_ai_falls_back_offline() {
    let temp_dir = init_journal();
    add_id(&temp_dir, &["Hiking the ridge", "--tag", "travel"]);

    recall_cmd(&temp_dir)
        .args(["search", "hiking", "--ai", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"offline\": true"))
        .stdout(predicate::str::contains("1 memories matched"));
}

#[test]
fn test_find_smart_queries() {
    let temp_dir = init_journal();
    add_id(&temp_dir, &["Passport renewal deadline", "-i", "9"]);
    add_id(&temp_dir, &["Cat photo", "-t", "photo", "-i", "2"]);

    recall_cmd(&temp_dir)
        .args(["find", "important"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Passport"))
        .stdout(predicate::str::contains("Cat photo").not());

    recall_cmd(&temp_dir)
        .args(["find", "photos"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cat photo"))
        .stdout(predicate::str::contains("Passport").not());

    recall_cmd(&temp_dir)
        .args(["find", "today", "--sort", "importance", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Passport"))
        .stdout(predicate::str::contains("Cat photo"));
}

// =============================================================================
// Index / group / stats
// =============================================================================

#[test]
fn test_group_by_tags() {
    let temp_dir = init_journal();
    add_id(&temp_dir, &["Ramen", "--tag", "food"]);
    add_id(&temp_dir, &["Tacos", "--tag", "food"]);
    add_id(&temp_dir, &["Standup", "--tag", "work"]);

    recall_cmd(&temp_dir)
        .args(["group", "tags", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"food\": 2"))
        .stdout(predicate::str::contains("\"work\": 1"));

    recall_cmd(&temp_dir)
        .args(["group", "tags", "food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ramen"))
        .stdout(predicate::str::contains("Tacos"))
        .stdout(predicate::str::contains("Standup").not());
}

#[test]
fn test_group_unknown_value_is_empty() {
    let temp_dir = init_journal();
    recall_cmd(&temp_dir)
        .args(["group", "person", "nobody"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No memories found."));
}

#[test]
fn test_index_report() {
    let temp_dir = init_journal();
    add_id(&temp_dir, &["Standup", "--tag", "work", "--person", "Jun"]);

    recall_cmd(&temp_dir)
        .args(["index", "--optimize", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_memories\": 1"))
        .stdout(predicate::str::contains("Jun"));
}

#[test]
fn test_stats_json() {
    let temp_dir = init_journal();
    add_id(&temp_dir, &["Morning run", "--tag", "health"]);
    add_id(&temp_dir, &["Evening run", "--tag", "health"]);

    let output = recall_cmd(&temp_dir)
        .args(["stats", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["dates"]["today"], 2);
    assert_eq!(stats["top_tags"][0]["tag"], "health");
    assert_eq!(stats["top_tags"][0]["count"], 2);
    assert_eq!(stats["recent_activity"].as_array().unwrap().len(), 2);
}

// =============================================================================
// Export / import / backup
// =============================================================================

#[test]
fn test_export_import_roundtrip() {
    let source = init_journal();
    let first = add_id(&source, &["Exported one", "--tag", "a"]);
    let second = add_id(&source, &["Exported two", "-i", "8"]);

    let export_path = source.path().join("export.json");
    recall_cmd(&source)
        .args(["export", "-o"])
        .arg(&export_path)
        .assert()
        .success();

    let target = init_journal();
    recall_cmd(&target)
        .arg("import")
        .arg(&export_path)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"imported\": 2"));

    recall_cmd(&target).args(["show", &first]).assert().success();
    recall_cmd(&target)
        .args(["show", &second, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"importance\": 8"));

    recall_cmd(&target)
        .arg("import")
        .arg(&export_path)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"imported\": 0"))
        .stdout(predicate::str::contains("\"skipped\": 2"));
}

#[test]
fn test_export_yaml_bundle() {
    let temp_dir = init_journal();
    add_id(&temp_dir, &["In YAML"]);

    recall_cmd(&temp_dir)
        .args(["export", "--format", "yaml", "--bundle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("version: 1.0.0"))
        .stdout(predicate::str::contains("In YAML"));
}

#[test]
fn test_import_replace_restores_settings() {
    let source = init_journal();
    add_id(&source, &["Backed up memory"]);
    recall_cmd(&source)
        .args(["settings", "set", "personality", "concise"])
        .assert()
        .success();
    let backup_dir = source.path().join("out");
    recall_cmd(&source)
        .args(["backup", "-o"])
        .arg(&backup_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Backed up"));

    let backup = std::fs::read_dir(&backup_dir)
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();
    assert!(
        backup
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("recall_backup_")
    );

    let target = init_journal();
    add_id(&target, &["Will be replaced"]);
    recall_cmd(&target)
        .arg("import")
        .arg(&backup)
        .arg("--replace")
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored settings"));

    recall_cmd(&target)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backed up memory"))
        .stdout(predicate::str::contains("Will be replaced").not());

    recall_cmd(&target)
        .args(["settings", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("concise"));
}

#[test]
fn test_import_replace_over_limit_keeps_journal() {
    let source = init_journal();
    add_id(&source, &["Imported one"]);
    add_id(&source, &["Imported two"]);
    let export_path = source.path().join("export.json");
    recall_cmd(&source)
        .args(["export", "--bundle", "-o"])
        .arg(&export_path)
        .assert()
        .success();

    let target = init_journal();
    let kept = add_id(&target, &["Already here"]);
    recall_cmd(&target)
        .args(["settings", "set", "max-memories", "1"])
        .assert()
        .success();

    recall_cmd(&target)
        .arg("import")
        .arg(&export_path)
        .arg("--replace")
        .assert()
        .failure()
        .stderr(predicate::str::contains("max-memories"));

    recall_cmd(&target).args(["show", &kept]).assert().success();
    recall_cmd(&target)
        .args(["settings", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"maxMemories\": 1"));
}

#[test]
fn test_import_rejects_garbage() {
    let temp_dir = init_journal();
    let path = temp_dir.path().join("garbage.json");
    std::fs::write(&path, "{ not json").unwrap();

    recall_cmd(&temp_dir)
        .arg("import")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON import"));
}

// =============================================================================
// Assistant (offline)
// =============================================================================

#[test]
fn test_chat_without_key_answers_offline() {
    let temp_dir = init_journal();
    add_id(&temp_dir, &["Coffee with Jun at the corner cafe"]);

    recall_cmd(&temp_dir)
        .args(["chat", "coffee", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"offline\": true"))
        .stdout(predicate::str::contains("Offline: 1 of 1 memories match"));

    recall_cmd(&temp_dir)
        .args(["history", "usage", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_conversations\": 0"));
}

#[test]
fn test_analyze_without_key_uses_heuristics() {
    let temp_dir = init_journal();
    let id = add_id(&temp_dir, &["Urgent hospital appointment, so much stress"]);

    recall_cmd(&temp_dir)
        .args(["analyze", &id, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"importance\": 8"))
        .stdout(predicate::str::contains("\"emotion\": \"negative\""))
        .stdout(predicate::str::contains("\"source\": \"offline\""));
}

#[test]
fn test_history_empty() {
    let temp_dir = init_journal();
    recall_cmd(&temp_dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No conversations yet."));

    recall_cmd(&temp_dir)
        .args(["history", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 exchanges"));
}

// =============================================================================
// Settings
// =============================================================================

#[test]
fn test_settings_set_and_show() {
    let temp_dir = init_journal();
    recall_cmd(&temp_dir)
        .args(["settings", "set", "max-memories", "1"])
        .assert()
        .success();

    recall_cmd(&temp_dir)
        .args(["settings", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"maxMemories\": 1"));

    add_id(&temp_dir, &["Only one fits"]);
    recall_cmd(&temp_dir)
        .args(["add", "No room"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Journal is full"));
}

#[test]
fn test_settings_unknown_key_fails() {
    let temp_dir = init_journal();
    recall_cmd(&temp_dir)
        .args(["settings", "set", "theme", "dark"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting"));
}
