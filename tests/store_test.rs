//! Store tests against a real SQLite engine
//! Run with: cargo test --test store_test

use serde_json::{json, Map, Value};
use sqlite_easy::{Column, ColumnOptions, Operator, Store, StoreConfig, WhereCondition};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn record(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn users_store(config: StoreConfig) -> Store {
    init_logging();
    let store = Store::open(":memory:", config).unwrap();
    store
        .create_table(
            "users",
            &[
                Column::integer("id", ColumnOptions::new().primary_key().auto_increment()).unwrap(),
                Column::text("name", ColumnOptions::new().not_null()).unwrap(),
                Column::tiny_integer("age", ColumnOptions::new().default_value(18)).unwrap(),
                Column::text(
                    "created",
                    ColumnOptions::new().default_expression("CURRENT_TIMESTAMP"),
                )
                .unwrap(),
            ],
            true,
        )
        .unwrap();
    store
}

mod select_tests {
    use super::*;

    #[test]
    fn test_scalar_unwrap_and_raw_rows() {
        let store = users_store(StoreConfig::default());
        store
            .insert("users", &record(json!({"name": "Ann"})))
            .unwrap()
            .insert("users", &record(json!({"name": "Bo"})))
            .unwrap();

        let names = store.select("users", &[], &["name"], false).unwrap();
        assert_eq!(names, vec![json!("Ann"), json!("Bo")]);

        let rows = store.select("users", &[], &["name"], true).unwrap();
        assert_eq!(rows, vec![json!({"name": "Ann"}), json!({"name": "Bo"})]);
    }

    #[test]
    fn test_defaults_applied() {
        let store = users_store(StoreConfig::default());
        store.insert("users", &record(json!({"name": "Ann"}))).unwrap();

        let rows = store.fetch_all("users").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], json!(1));
        assert_eq!(rows[0]["age"], json!(18));
        assert!(rows[0]["created"].is_string());
    }

    #[test]
    fn test_multiple_conditions_are_anded() {
        let store = users_store(StoreConfig::default());
        for (name, age) in [("Ann", 20), ("Bo", 30), ("Cy", 30)] {
            store
                .insert("users", &record(json!({"name": name, "age": age})))
                .unwrap();
        }

        let conditions = vec![
            WhereCondition::equals("age", 30).unwrap(),
            WhereCondition::not_equals("name", "Cy").unwrap(),
        ];
        let names = store.select("users", &conditions, &["name"], false).unwrap();
        assert_eq!(names, vec![json!("Bo")]);
    }

    #[test]
    fn test_in_and_between() {
        let store = users_store(StoreConfig::default());
        for (name, age) in [("Ann", 20), ("Bo", 30), ("Cy", 40)] {
            store
                .insert("users", &record(json!({"name": name, "age": age})))
                .unwrap();
        }

        let in_list = WhereCondition::new("name", Operator::In, json!(["Ann", "Cy"])).unwrap();
        let names = store.select("users", &[in_list], &["name"], false).unwrap();
        assert_eq!(names, vec![json!("Ann"), json!("Cy")]);

        let between = WhereCondition::between("age", 25, 40).unwrap();
        let names = store.select("users", &[between], &["name"], false).unwrap();
        assert_eq!(names, vec![json!("Bo"), json!("Cy")]);

        let empty = WhereCondition::new("name", Operator::In, json!([])).unwrap();
        assert!(store.select("users", &[empty], &["name"], false).unwrap().is_empty());
    }
}

mod write_tests {
    use super::*;

    #[test]
    fn test_quoted_string_round_trip() {
        let store = users_store(StoreConfig::default());
        let tricky = "O'Brien said ''hi'' -- ; DROP TABLE users";
        store.insert("users", &record(json!({"name": tricky}))).unwrap();

        let found = store
            .select("users", &[WhereCondition::equals("name", tricky).unwrap()], &["name"], false)
            .unwrap();
        assert_eq!(found, vec![json!(tricky)]);
    }

    #[test]
    fn test_nul_byte_round_trip() {
        let store = users_store(StoreConfig::default());
        let with_nul = "a\u{0}b's";
        store.insert("users", &record(json!({"name": with_nul}))).unwrap();

        let names = store.select("users", &[], &["name"], false).unwrap();
        assert_eq!(names, vec![json!(with_nul)]);

        let found = store
            .select("users", &[WhereCondition::equals("name", with_nul).unwrap()], &["id"], false)
            .unwrap();
        assert_eq!(found, vec![json!(1)]);
    }

    #[test]
    fn test_unsigned_big_integer_above_i64_is_stored_as_real() {
        init_logging();
        let store = Store::open(":memory:", StoreConfig::default()).unwrap();
        store
            .create_table(
                "counters",
                &[Column::big_integer("n", ColumnOptions::new().default_value(u64::MAX)).unwrap()],
                false,
            )
            .unwrap()
            .insert("counters", &Map::new())
            .unwrap();

        let values = store.select("counters", &[], &["n"], false).unwrap();
        assert_eq!(values.len(), 1);
        assert!(values[0].is_f64());
        assert_eq!(values[0].as_f64(), Some(u64::MAX as f64));
    }

    #[test]
    fn test_update_without_conditions_touches_every_row() {
        let store = users_store(StoreConfig::default());
        store
            .insert("users", &record(json!({"name": "Ann"})))
            .unwrap()
            .insert("users", &record(json!({"name": "Bo"})))
            .unwrap()
            .update("users", &[], "age", &json!(50))
            .unwrap();

        let ages = store.select("users", &[], &["age"], false).unwrap();
        assert_eq!(ages, vec![json!(50), json!(50)]);
    }

    #[test]
    fn test_delete_rows() {
        let store = users_store(StoreConfig::default());
        store
            .insert("users", &record(json!({"name": "Ann"})))
            .unwrap()
            .insert("users", &record(json!({"name": "Bo"})))
            .unwrap();

        assert!(store.delete_rows("users", &[]).unwrap_err().is_configuration());
        store
            .delete_rows("users", &[WhereCondition::equals("name", "Ann").unwrap()])
            .unwrap();
        let names = store.select("users", &[], &["name"], false).unwrap();
        assert_eq!(names, vec![json!("Bo")]);
    }

    #[test]
    fn test_drop_table() {
        let store = users_store(StoreConfig::default());
        store.drop_table("users").unwrap();
        assert!(store.fetch_all("users").unwrap_err().is_engine());
    }

    #[test]
    fn test_constraint_violation_is_engine_error() {
        let store = users_store(StoreConfig::default());
        let err = store
            .insert("users", &record(json!({"age": 1})))
            .unwrap_err();
        assert!(err.is_engine());
        assert!(err.to_string().starts_with("SQLite Error:"));
    }
}

mod policy_tests {
    use super::*;

    #[test]
    fn test_suppressed_failures() {
        let store = users_store(StoreConfig {
            debug: true,
            suppress_errors: true,
        });

        let returned = store.execute("NOT VALID SQL").unwrap();
        assert!(std::ptr::eq(returned, &store));
        assert!(store.query("SELECT * FROM missing").unwrap().is_empty());

        // descriptor errors still surface
        assert!(store.delete_rows("users", &[]).is_err());
    }

    #[test]
    fn test_raw_query() {
        let store = users_store(StoreConfig::default());
        store
            .execute("INSERT INTO users (name, age) VALUES ('Ann', 3)")
            .unwrap();
        let rows = store.query("SELECT name, age FROM users").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(Value::Object(rows[0].clone()), json!({"name": "Ann", "age": 3}));
    }
}

mod file_tests {
    use super::*;

    #[test]
    fn test_extension_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let bare = dir.path().join("people");
        let bare = bare.to_str().unwrap();

        {
            let store = Store::open(bare, StoreConfig::default()).unwrap();
            store
                .create_table(
                    "people",
                    &[Column::text("name", ColumnOptions::new()).unwrap()],
                    true,
                )
                .unwrap()
                .insert("people", &record(json!({"name": "Ann"})))
                .unwrap();
        }

        assert!(dir.path().join("people.sqlite").exists());

        let store = Store::open(&format!("{}.sqlite", bare), StoreConfig::default()).unwrap();
        let names = store.select("people", &[], &["name"], false).unwrap();
        assert_eq!(names, vec![json!("Ann")]);
    }
}
