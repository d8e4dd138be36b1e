#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn stockroom_cmd(data_dir: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("stockroom"));
    cmd.env("STOCKROOM_DATA", data_dir.path().as_os_str())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn init_and_login_admin(dir: &TempDir) {
    stockroom_cmd(dir).arg("init").assert().success();
    stockroom_cmd(dir)
        .args(["login", "admin", "admin"])
        .assert()
        .success();
}

fn add_widget(dir: &TempDir) {
    stockroom_cmd(dir)
        .args([
            "product", "add", "--id", "P1", "--name", "Widget", "--category", "Tools",
            "--price", "9.99", "--stock", "5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product 'Widget' added successfully!"));
}

#[test]
fn test_init_creates_store_files() {
    let temp = TempDir::new().unwrap();

    stockroom_cmd(&temp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized stockroom data at"))
        .stdout(predicate::str::contains("Seeded account admin/admin"));

    assert!(temp.path().join("products.json").exists());
    assert!(temp.path().join("users.json").exists());
    assert!(temp.path().join("roles.json").exists());

    // A second init leaves everything in place.
    stockroom_cmd(&temp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded").not());
}

#[test]
fn test_product_workflow_as_admin() {
    let temp = TempDir::new().unwrap();
    init_and_login_admin(&temp);
    add_widget(&temp);

    stockroom_cmd(&temp)
        .args(["product", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Widget"))
        .stdout(predicate::str::contains("9.99"));

    stockroom_cmd(&temp)
        .args(["product", "update", "P1", "--stock", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product 'Widget' updated successfully!"));

    stockroom_cmd(&temp)
        .args(["product", "list", "--by", "stock", "--value", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("P1"));

    stockroom_cmd(&temp)
        .args(["product", "delete", "P1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Are you sure you want to delete 'Widget'?",
        ));

    stockroom_cmd(&temp)
        .args(["product", "delete", "P1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product 'Widget' deleted successfully!"));

    stockroom_cmd(&temp)
        .args(["product", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No products found."));

    let raw = fs::read_to_string(temp.path().join("products.json")).unwrap();
    assert_eq!(raw.trim(), "[]");
}

#[test]
fn test_validation_errors_are_reported() {
    let temp = TempDir::new().unwrap();
    init_and_login_admin(&temp);

    stockroom_cmd(&temp)
        .args([
            "product", "add", "--id", "P1", "--name", "Widget", "--category", "Tools",
            "--price", "0", "--stock", "5",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Price must be greater than 0."));

    stockroom_cmd(&temp)
        .args([
            "product", "add", "--id", "P1", "--name", "Widget", "--category", "Tools",
            "--price", "1.5", "--stock", "-1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Stock Quantity cannot be negative."));

    stockroom_cmd(&temp)
        .args([
            "product", "add", "--id", "P1", "--name", "", "--category", "Tools", "--price",
            "1.5", "--stock", "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Name is required."));

    stockroom_cmd(&temp)
        .args(["product", "list", "--by", "stock", "--value", "many"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please enter a valid stock quantity number.",
        ));

    stockroom_cmd(&temp)
        .args(["product", "update", "P404", "--name", "Ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Product not found: P404"));
}

#[test]
fn test_regular_user_can_only_browse() {
    let temp = TempDir::new().unwrap();
    init_and_login_admin(&temp);
    add_widget(&temp);

    stockroom_cmd(&temp)
        .args([
            "user", "add", "--id", "U2", "--username", "bob", "--password", "pw",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("bob"));

    stockroom_cmd(&temp).arg("logout").assert().success();
    stockroom_cmd(&temp)
        .args(["login", "bob", "pw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, bob!"));

    stockroom_cmd(&temp)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("bob"))
        .stdout(predicate::str::contains("(user)"));

    stockroom_cmd(&temp)
        .args(["product", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Widget"));

    stockroom_cmd(&temp)
        .args(["product", "delete", "P1", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Permission denied"));

    stockroom_cmd(&temp)
        .args(["user", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Permission denied"));
}

#[test]
fn test_bad_login_and_missing_session() {
    let temp = TempDir::new().unwrap();
    stockroom_cmd(&temp).arg("init").assert().success();

    stockroom_cmd(&temp)
        .args(["login", "admin", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));

    stockroom_cmd(&temp)
        .args(["product", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_commands_before_init_fail_cleanly() {
    let temp = TempDir::new().unwrap();

    stockroom_cmd(&temp)
        .args(["login", "admin", "admin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("stockroom init"));
}

#[test]
fn test_config_changes_store_file_names() {
    let temp = TempDir::new().unwrap();

    stockroom_cmd(&temp)
        .args(["config", "products-file", "catalogue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("products-file set to catalogue.json"));

    stockroom_cmd(&temp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("products-file = catalogue.json"))
        .stdout(predicate::str::contains("default-role = user"));

    stockroom_cmd(&temp).arg("init").assert().success();
    assert!(temp.path().join("catalogue.json").exists());
}

#[test]
fn test_role_management() {
    let temp = TempDir::new().unwrap();
    init_and_login_admin(&temp);

    stockroom_cmd(&temp)
        .args([
            "role", "add", "--id", "R3", "--name", "auditor", "--permission", "read-only",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Role 'auditor' added successfully!"));

    stockroom_cmd(&temp)
        .args(["role", "list", "--by", "permission", "--value", "read"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R2"))
        .stdout(predicate::str::contains("R3"))
        .stdout(predicate::str::contains("R1").not());
}
