//! Integration tests for the expense ledger.

#![allow(clippy::expect_used)]

use expense_ledger::core::{DeleteOutcome, NewExpense};
use expense_ledger::storage::{RecordStore, SqliteConnector};
use tempfile::TempDir;

/// Helper to create a record store on a fresh database file.
fn create_test_store() -> (RecordStore<SqliteConnector>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = RecordStore::new(SqliteConnector::new(temp_dir.path().join("test.db")));
    (store, temp_dir)
}

fn new_expense(amount: &str, memo: &str, date: &str) -> NewExpense {
    NewExpense::parse(amount, memo, Some(date)).expect("valid expense")
}

#[test]
fn test_insert_round_trip_fidelity() {
    let (store, _temp) = create_test_store();
    let before = store.select_all().expect("select_all failed");

    let inserted = store
        .insert(&new_expense("20.5", "Groceries", "2026-02-28"))
        .expect("insert failed");
    let after = store.select_all().expect("select_all failed");

    assert_eq!(after.count, before.count + 1);
    let stored = after
        .expenses
        .iter()
        .find(|e| e.id == inserted.id)
        .expect("inserted row present");
    assert_eq!(stored.amount.to_string(), "20.50");
    assert_eq!(stored.memo, "Groceries");
    assert_eq!(stored.created_on.to_string(), "2026-02-28");
}

#[test]
fn test_search_matches_exactly() {
    let (store, _temp) = create_test_store();
    for memo in ["Coffee beans", "ICED COFFEE", "Tea", "coffeehouse tip", "Cofee typo"] {
        store
            .insert(&new_expense("1", memo, "2026-10-19"))
            .expect("insert failed");
    }

    let found = store.search("coffee").expect("search failed");
    let memos: Vec<&str> = found.expenses.iter().map(|e| e.memo.as_str()).collect();
    assert_eq!(memos, vec!["Coffee beans", "ICED COFFEE", "coffeehouse tip"]);
    assert_eq!(found.count, 3);
}

#[test]
fn test_search_folds_accented_memos() {
    let (store, _temp) = create_test_store();
    for memo in ["Café latte", "ÜBER ride", "cafe au lait"] {
        store
            .insert(&new_expense("1", memo, "2026-10-19"))
            .expect("insert failed");
    }

    let found = store.search("CAFÉ").expect("search failed");
    assert_eq!(found.count, 1);
    assert_eq!(found.expenses[0].memo, "Café latte");

    let found = store.search("über").expect("search failed");
    assert_eq!(found.count, 1);
    assert_eq!(found.expenses[0].memo, "ÜBER ride");
}

#[test]
fn test_delete_existing_and_missing() {
    let (store, _temp) = create_test_store();
    let a = store
        .insert(&new_expense("1", "a", "2026-10-19"))
        .expect("insert failed");
    let b = store
        .insert(&new_expense("2", "b", "2026-10-19"))
        .expect("insert failed");

    let outcome = store.delete_by_id(a.id).expect("delete failed");
    assert_eq!(outcome, DeleteOutcome::Deleted(a.clone()));

    let rows = store.select_all().expect("select_all failed");
    assert_eq!(rows.count, 1);
    assert!(rows.expenses.iter().all(|e| e.id != a.id));

    let outcome = store.delete_by_id(a.id).expect("delete failed");
    assert_eq!(outcome, DeleteOutcome::NotFound(a.id));
    assert_eq!(
        store.select_all().expect("select_all failed").expenses,
        vec![b]
    );
}

#[test]
fn test_delete_all_empties_table() {
    let (store, _temp) = create_test_store();
    for i in 0..5 {
        store
            .insert(&new_expense("3.33", &format!("item {i}"), "2026-10-19"))
            .expect("insert failed");
    }

    assert_eq!(store.delete_all().expect("delete_all failed"), 5);
    assert_eq!(store.select_all().expect("select_all failed").count, 0);
}

#[test]
fn test_ensure_schema_across_runs() {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("test.db");

    let first = RecordStore::new(SqliteConnector::new(&db_path));
    assert!(first.ensure_schema().expect("first ensure"));
    first
        .insert(&new_expense("1", "survives", "2026-10-19"))
        .expect("insert failed");

    let second = RecordStore::new(SqliteConnector::new(&db_path));
    assert!(!second.ensure_schema().expect("second ensure"));
    assert_eq!(second.select_all().expect("select_all failed").count, 1);
}

mod property_tests {
    use expense_ledger::core::{Expense, parse_amount, total};
    use expense_ledger::storage::{RecordStore, SqliteConnector};
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use tempfile::TempDir;
    use time::macros::date;

    proptest! {
        #[test]
        fn total_matches_integer_cents(cents in prop::collection::vec(0i64..1_000_000, 0..40)) {
            let rows: Vec<Expense> = cents
                .iter()
                .enumerate()
                .map(|(i, c)| Expense {
                    id: i64::try_from(i).unwrap_or_default(),
                    amount: Decimal::new(*c, 2),
                    memo: String::new(),
                    created_on: date!(2026 - 01 - 01),
                })
                .collect();
            let expected = Decimal::new(cents.iter().sum(), 2);
            prop_assert_eq!(total(&rows), expected);
            prop_assert_eq!(total(&rows).scale(), 2);
        }

        #[test]
        fn parsed_amount_has_two_decimals(whole in 0u32..10_000, frac in 0u32..100) {
            let amount = parse_amount(&format!("{whole}.{frac:02}")).expect("in range");
            prop_assert_eq!(amount.scale(), 2);
            prop_assert_eq!(amount.to_string(), format!("{whole}.{frac:02}"));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn search_returns_exactly_matching_rows(
            memos in prop::collection::vec("[a-dA-DéÉüÜ ]{0,8}", 0..8),
            term in "[a-dA-DéÉüÜ]{1,2}",
        ) {
            let temp_dir = TempDir::new().expect("temp dir");
            let store = RecordStore::new(SqliteConnector::new(temp_dir.path().join("p.db")));
            for memo in &memos {
                store
                    .insert(&expense_ledger::NewExpense {
                        amount: parse_amount("1").expect("amount"),
                        memo: memo.clone(),
                        created_on: Some(date!(2026 - 01 - 01)),
                    })
                    .expect("insert");
            }

            let found = store.search(&term).expect("search");
            let expected: Vec<&String> = memos
                .iter()
                .filter(|m| m.to_lowercase().contains(&term.to_lowercase()))
                .collect();
            let actual: Vec<&String> = found.expenses.iter().map(|e| &e.memo).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}

/// End-to-end tests of the `expense` binary.
mod binary_tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn expense(db_path: &Path) -> Command {
        let mut cmd = Command::cargo_bin("expense").expect("binary built");
        cmd.env_remove("EXPENSE_BACKEND")
            .env_remove("EXPENSE_LOG")
            .env("EXPENSE_DB_PATH", db_path);
        cmd
    }

    #[test]
    fn test_no_args_prints_help() {
        let temp_dir = TempDir::new().expect("temp dir");
        expense(&temp_dir.path().join("x.db"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage"));
    }

    #[test]
    fn test_unknown_command_prints_help() {
        let temp_dir = TempDir::new().expect("temp dir");
        expense(&temp_dir.path().join("x.db"))
            .arg("frobnicate")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage"));
    }

    #[test]
    fn test_rejected_arguments_print_help() {
        let temp_dir = TempDir::new().expect("temp dir");
        let db_path = temp_dir.path().join("x.db");
        for args in [&["list", "extra"][..], &["delete", "1", "2"][..]] {
            expense(&db_path)
                .args(args)
                .assert()
                .code(0)
                .stdout(predicate::str::contains("Usage"));
        }
        assert!(!db_path.exists());
    }

    #[test]
    fn test_memo_starting_with_hyphen() {
        let temp_dir = TempDir::new().expect("temp dir");
        let db_path = temp_dir.path().join("ledger.db");

        expense(&db_path)
            .args(["add", "5", "-x", "2026-10-19"])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("Expense added:"))
            .stdout(predicate::str::contains("| -x"));

        expense(&db_path)
            .args(["search", "-x"])
            .assert()
            .code(0)
            .stdout(predicate::str::starts_with("There is 1 expense\n"));
    }

    #[test]
    fn test_missing_memo_is_not_a_failure() {
        let temp_dir = TempDir::new().expect("temp dir");
        expense(&temp_dir.path().join("x.db"))
            .args(["add", "3.50"])
            .assert()
            .success()
            .stdout("You must provide an amount and memo.\n");
    }

    #[test]
    fn test_add_list_search_delete_clear() {
        let temp_dir = TempDir::new().expect("temp dir");
        let db_path = temp_dir.path().join("ledger.db");

        expense(&db_path)
            .args(["add", "10.00", "Coffee beans", "2026-10-19"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Expense added:"));
        expense(&db_path)
            .args(["add", "20.50", "Groceries", "10/19/2026"])
            .assert()
            .success();
        expense(&db_path)
            .args(["add", "5.25", "coffee cup", "2026-10-19"])
            .assert()
            .success();

        expense(&db_path)
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("There are 3 expenses\n"))
            .stdout(predicate::str::contains(format!("Total {:>30}", "35.75")))
            .stdout(predicate::str::contains("Mon Oct 19 2026"));

        expense(&db_path)
            .args(["search", "COFFEE"])
            .assert()
            .success()
            .stdout(predicate::str::contains("There are 2 expenses"))
            .stdout(predicate::str::contains("15.25"));

        expense(&db_path)
            .args(["delete", "2"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Groceries"));

        expense(&db_path)
            .args(["delete", "2"])
            .assert()
            .success()
            .stdout("There is no expense with the id '2'.\n");

        expense(&db_path)
            .arg("clear")
            .write_stdin("y\n")
            .assert()
            .success()
            .stdout("All expenses have been deleted.\n");

        expense(&db_path)
            .arg("list")
            .assert()
            .success()
            .stdout("there are no expenses\n");
    }

    #[test]
    fn test_clear_declined_keeps_rows() {
        let temp_dir = TempDir::new().expect("temp dir");
        let db_path = temp_dir.path().join("ledger.db");
        expense(&db_path).args(["add", "1", "a"]).assert().success();

        expense(&db_path)
            .arg("clear")
            .write_stdin("n\n")
            .assert()
            .success()
            .stdout("Clear cancelled.\n")
            .stderr(predicate::str::contains("Are you sure?"));

        expense(&db_path)
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("There is 1 expense"));
    }

    #[test]
    fn test_invalid_amount_exits_with_failure() {
        let temp_dir = TempDir::new().expect("temp dir");
        expense(&temp_dir.path().join("x.db"))
            .args(["add", "ten", "Lunch"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("invalid input syntax for type numeric"));
    }

    #[test]
    fn test_amount_overflow_exits_with_failure() {
        let temp_dir = TempDir::new().expect("temp dir");
        expense(&temp_dir.path().join("x.db"))
            .args(["add", "10000", "Car"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("numeric field overflow"));
    }

    #[test]
    fn test_json_output() {
        let temp_dir = TempDir::new().expect("temp dir");
        let db_path = temp_dir.path().join("ledger.db");
        expense(&db_path)
            .args(["add", "2.5", "Bus", "2026-10-19"])
            .assert()
            .success();

        let output = expense(&db_path)
            .args(["--format", "json", "list"])
            .output()
            .expect("run");
        assert!(output.status.success());
        let value: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("valid json");
        assert_eq!(value["total"], "2.50");
        assert_eq!(value["expenses"][0]["created_on"], "2026-10-19");
    }

    #[cfg(feature = "postgres")]
    #[test]
    fn test_unreachable_postgres_exits_with_failure() {
        let temp_dir = TempDir::new().expect("temp dir");
        expense(&temp_dir.path().join("x.db"))
            .args(["--backend", "postgres", "--host", "127.0.0.1", "--port", "1", "list"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("connection failed"));
    }
}
