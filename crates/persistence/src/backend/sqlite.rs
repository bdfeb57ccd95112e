// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opening and preparing `SQLite` connections for the Washbay store.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Embedded schema migrations.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applied to every connection before migrations run.
///
/// Material cleanup and the delete guards on reference data need foreign
/// keys; concurrent writers wait out `SQLITE_BUSY` instead of failing.
const CONNECTION_PRAGMAS: [&str; 2] = ["PRAGMA foreign_keys = ON", "PRAGMA busy_timeout = 5000"];

/// Where a store's database lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreLocation<'a> {
    /// A named shared-cache in-memory database.
    Memory(&'a str),
    /// A database file on disk, run in WAL mode.
    File(&'a str),
}

impl StoreLocation<'_> {
    fn url(&self) -> String {
        match self {
            Self::Memory(name) => format!("file:{name}?mode=memory&cache=shared"),
            Self::File(path) => (*path).to_string(),
        }
    }
}

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Opens the store at `location`, configures it and applies pending
/// migrations.
///
/// # Errors
///
/// Returns an error if the connection cannot be established, a PRAGMA
/// fails, a migration fails, or foreign keys end up disabled.
pub fn open(location: StoreLocation<'_>) -> Result<SqliteConnection, PersistenceError> {
    info!(?location, "Opening Washbay store");

    let mut conn: SqliteConnection = SqliteConnection::establish(&location.url())?;

    for pragma in CONNECTION_PRAGMAS {
        run_pragma(&mut conn, pragma)?;
    }
    if matches!(location, StoreLocation::File(_)) {
        run_pragma(&mut conn, "PRAGMA journal_mode = WAL")?;
    }

    let applied: usize = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?
        .len();
    info!(applied, "Schema migrations up to date");

    check_foreign_keys(&mut conn)?;
    Ok(conn)
}

fn run_pragma(conn: &mut SqliteConnection, pragma: &str) -> Result<(), PersistenceError> {
    debug!(pragma, "Applying connection setting");
    diesel::sql_query(pragma)
        .execute(conn)
        .map(|_| ())
        .map_err(|e| PersistenceError::QueryFailed(format!("{pragma}: {e}")))
}

/// Fails unless foreign key enforcement is on for `conn`.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeyEnforcementNotEnabled` if it is off.
pub fn check_foreign_keys(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let pragma: ForeignKeysPragma =
        diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    if pragma.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }
    Ok(())
}

/// Returns the id of the row inserted last on this connection.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_insert_id(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}
