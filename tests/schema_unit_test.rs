//! Unit tests for snapshot construction from metadata records.

use schema_graph::diagnostics::Diagnostic;
use schema_graph::error::MalformedReason;
use schema_graph::schema::{ColumnRecord, ForeignKeyRecord, SchemaMetadata, SnapshotBuilder};
use std::fs;
use tempfile::TempDir;

fn columns() -> Vec<ColumnRecord> {
    vec![
        ColumnRecord::new("users", "id", "INT", true),
        ColumnRecord::new("users", "email", "VARCHAR(255)", false),
        ColumnRecord::new("orders", "id", "INT", true),
        ColumnRecord::new("orders", "user_id", "INT", false),
        ColumnRecord::new("order_items", "order_id", "INT", true),
        ColumnRecord::new("order_items", "line_no", "INT", true),
    ]
}

fn malformed_reasons(diags: &[Diagnostic]) -> Vec<MalformedReason> {
    diags
        .iter()
        .filter_map(|d| match d {
            Diagnostic::MalformedSchema(e) => Some(e.reason.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_tables_from_column_records() {
    let build = SnapshotBuilder::from_records(&columns(), &[]);
    let snap = build.snapshot;
    assert!(build.diagnostics.is_empty());
    assert_eq!(snap.len(), 3);
    assert_eq!(snap.column_count(), 6);
    assert_eq!(
        snap.table_names().collect::<Vec<_>>(),
        vec!["order_items", "orders", "users"]
    );
    assert!(!snap.has_foreign_keys());
}

#[test]
fn test_primary_keys() {
    let snap = SnapshotBuilder::from_records(&columns(), &[]).snapshot;
    let users = snap.get_table("users").unwrap();
    assert_eq!(users.single_primary_key(), Some("id"));
    assert!(users.is_pk_column("id"));
    assert!(!users.is_pk_column("email"));

    let items = snap.get_table("order_items").unwrap();
    assert!(items.has_composite_primary_key());
    assert_eq!(items.single_primary_key(), None);
    assert_eq!(items.primary_key, vec!["order_id", "line_no"]);
}

#[test]
fn test_column_order_and_types_preserved() {
    let snap = SnapshotBuilder::from_records(&columns(), &[]).snapshot;
    let users = snap.get_table("users").unwrap();
    let names: Vec<&str> = users.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id", "email"]);
    assert_eq!(users.get_column("email").unwrap().col_type, "VARCHAR(255)");
    assert!(users.get_column("EMAIL").is_none());
}

#[test]
fn test_valid_foreign_key_attached() {
    let build = SnapshotBuilder::from_records(
        &columns(),
        &[ForeignKeyRecord::new("orders", &["user_id"], "users", &["id"])],
    );
    assert!(build.diagnostics.is_empty());
    let orders = build.snapshot.get_table("orders").unwrap();
    assert_eq!(orders.foreign_keys.len(), 1);
    assert_eq!(orders.foreign_keys[0].referred_table, "users");
    assert_eq!(build.snapshot.foreign_key_count(), 1);
}

#[test]
fn test_dangling_foreign_keys_reported() {
    let build = SnapshotBuilder::from_records(
        &columns(),
        &[
            ForeignKeyRecord::new("orders", &["user_id"], "ghosts", &["id"]),
            ForeignKeyRecord::new("orders", &["coupon_id"], "users", &["id"]),
            ForeignKeyRecord::new("orders", &["user_id"], "users", &["uuid"]),
            ForeignKeyRecord::new("archive", &["user_id"], "users", &["id"]),
            ForeignKeyRecord::new("orders", &["user_id"], "users", &["id", "email"]),
            ForeignKeyRecord::new("orders", &[], "users", &[]),
        ],
    );

    assert_eq!(
        malformed_reasons(&build.diagnostics),
        vec![
            MalformedReason::UnknownReferencedTable("ghosts".to_string()),
            MalformedReason::UnknownColumn("coupon_id".to_string()),
            MalformedReason::UnknownReferencedColumn("uuid".to_string()),
            MalformedReason::UnknownTable("archive".to_string()),
            MalformedReason::ArityMismatch {
                constrained: 1,
                referred: 2
            },
            MalformedReason::NoColumns,
        ]
    );
    assert!(!build.snapshot.has_foreign_keys());
}

#[test]
fn test_partial_result_survives_malformed_metadata() {
    let build = SnapshotBuilder::from_records(
        &columns(),
        &[
            ForeignKeyRecord::new("orders", &["user_id"], "ghosts", &["id"]),
            ForeignKeyRecord::new("orders", &["user_id"], "users", &["id"]),
        ],
    );
    assert_eq!(build.diagnostics.len(), 1);
    assert_eq!(build.snapshot.foreign_key_count(), 1);
    assert!(build.diagnostics[0]
        .to_string()
        .contains("referenced table 'ghosts' is unknown"));
}

#[test]
fn test_duplicate_column_first_wins() {
    let mut records = columns();
    records.push(ColumnRecord::new("users", "email", "TEXT", false));
    let build = SnapshotBuilder::from_records(&records, &[]);
    assert_eq!(
        build.diagnostics,
        vec![Diagnostic::DuplicateColumn {
            table: "users".to_string(),
            column: "email".to_string()
        }]
    );
    let users = build.snapshot.get_table("users").unwrap();
    assert_eq!(users.columns.len(), 2);
    assert_eq!(users.get_column("email").unwrap().col_type, "VARCHAR(255)");
}

#[test]
fn test_metadata_load_json_and_yaml() {
    let dir = TempDir::new().unwrap();

    let json_path = dir.path().join("meta.json");
    fs::write(
        &json_path,
        r#"{
  "database": "shop",
  "columns": [
    { "table": "users", "column": "id", "type": "INT", "is_primary_key": true },
    { "table": "orders", "column": "user_id", "type": "INT" }
  ],
  "foreign_keys": [
    { "table": "orders", "constrained_columns": ["user_id"],
      "referred_table": "users", "referred_columns": ["id"] }
  ]
}"#,
    )
    .unwrap();
    let json = SchemaMetadata::load(&json_path).unwrap();
    assert_eq!(json.database.as_deref(), Some("shop"));
    assert_eq!(json.columns.len(), 2);
    assert!(!json.columns[1].is_primary_key);
    assert_eq!(json.foreign_keys.len(), 1);

    let yaml_path = dir.path().join("meta.yml");
    fs::write(
        &yaml_path,
        "database: shop\ncolumns:\n  - { table: users, column: id, type: INT, is_primary_key: true }\n  - { table: orders, column: user_id, type: INT }\nforeign_keys:\n  - table: orders\n    constrained_columns: [user_id]\n    referred_table: users\n    referred_columns: [id]\n",
    )
    .unwrap();
    let yaml = SchemaMetadata::load(&yaml_path).unwrap();
    assert_eq!(yaml, json);
}

#[test]
fn test_metadata_load_errors() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.json");
    fs::write(&bad, "{ not json").unwrap();
    let err = SchemaMetadata::load(&bad).unwrap_err();
    assert!(format!("{:#}", err).contains("invalid JSON metadata"));

    let missing = dir.path().join("missing.json");
    assert!(SchemaMetadata::load(&missing).is_err());
}
