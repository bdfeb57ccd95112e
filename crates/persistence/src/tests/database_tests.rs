// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_customer, create_test_db};
use crate::{Persistence, PersistenceError, SqlitePersistence};

#[test]
fn test_persistence_initialization() {
    let result: Result<SqlitePersistence, PersistenceError> = SqlitePersistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_keys_are_enforced() {
    let mut db = create_test_db();
    assert!(db.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = create_test_db();
    let mut db2: Persistence = create_test_db();

    create_test_customer(&mut db1, "Ana Souza");

    assert_eq!(db1.list_customers(false).unwrap().len(), 1);
    assert!(db2.list_customers(false).unwrap().is_empty());
}

#[test]
fn test_file_database_round_trip() {
    let path = std::env::temp_dir().join(format!("washbay-test-{}.db", std::process::id()));
    let _ = std::fs::remove_file(&path);

    {
        let mut db = Persistence::new_with_file(&path).unwrap();
        create_test_customer(&mut db, "Ana Souza");
    }
    {
        let mut db = Persistence::new_with_file(&path).unwrap();
        let customers = db.list_customers(true).unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].name, "Ana Souza");
    }

    for file in [path.clone(), path.with_extension("db-wal"), path.with_extension("db-shm")] {
        let _ = std::fs::remove_file(file);
    }
}
