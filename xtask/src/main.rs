// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! Wraps the cargo invocations used locally and in CI for the Washbay
//! workspace.
//!
//! ### Migration Verification
//!
//! - `cargo test`: Runs all standard tests against in-memory `SQLite`
//! - `cargo xtask verify-migrations`: Applies the `SQLite` migrations to a
//!   scratch database, checks the resulting schema against the Diesel
//!   schema module, then reverts every migration and checks that nothing
//!   is left behind
//!
//! No external database or container is required.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{fmt::Debug, io, process::Output, vec};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, Result};
use diesel::sql_types::{Integer, Text};
use diesel::{QueryableByName, RunQueryDsl, SqliteConnection};
use duct::cmd;
use std::collections::{BTreeMap, BTreeSet};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Check if README.md is up-to-date
    #[command(visible_alias = "cr")]
    CheckReadme,

    /// Generate code coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    /// Check dependencies
    #[command(visible_alias = "cd")]
    Deny,

    // Check unused dependencies
    #[command(visible_alias = "m")]
    Machete,

    /// Lint formatting, typos, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Lint markdown files
    #[command(visible_alias = "md")]
    LintMarkdown,

    /// Check for typos in the project
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Fix typos in the project
    #[command(visible_alias = "typos")]
    FixTypos,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run lib tests
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Verify that the migrations match the Diesel schema and revert cleanly
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Deny => deny(),
            Self::Machete => machete(),
            Self::CheckReadme => check_readme(),
            Self::Coverage => coverage(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::LintTypos => lint_typos(),
            Self::LintMarkdown => lint_markdown(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_format(),
            Self::FixTypos => fix_typos(),
            Self::Test => test(),
            Self::TestDocs => test_docs(),
            Self::TestLibs => test_libs(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

/// Run CI checks (lint, build, test)
fn ci() -> Result<()> {
    lint()?;
    deny()?;
    machete()?;
    build()?;
    test()?;
    verify_migrations()?;
    Ok(())
}

fn deny() -> Result<()> {
    run_cargo(vec!["deny", "check"])
}

fn machete() -> Result<()> {
    cmd!("cargo-machete").run_with_trace()?;
    Ok(())
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Run cargo check
fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

/// Run cargo-rdme to check if README.md is up-to-date with the library documentation
fn check_readme() -> Result<()> {
    run_cargo(vec!["rdme", "--workspace-project", "washbay", "--check"])
}

/// Generate code coverage report
fn coverage() -> Result<()> {
    run_cargo(vec![
        "llvm-cov",
        "--lcov",
        "--output-path",
        "target/lcov.info",
        "--all-features",
    ])
}

/// Lint formatting, typos, clippy, and docs (and a soft fail on markdown)
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    lint_typos()?;
    if let Err(err) = lint_markdown() {
        tracing::warn!("known issue: markdownlint is currently noisy and can be ignored: {err}");
    }
    Ok(())
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Fix clippy warnings in the project
fn fix_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

/// Check that docs build without errors using docs.rs-equivalent flags
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

/// Fix formatting issues in the project
fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Lint markdown files using [markdownlint-cli2](https://github.com/DavidAnson/markdownlint-cli2)
fn lint_markdown() -> Result<()> {
    cmd!("markdownlint-cli2", "**/*.md", "!target", "!**/target").run_with_trace()?;

    Ok(())
}

/// Check for typos in the project using [typos-cli](https://github.com/crate-ci/typos/)
fn lint_typos() -> Result<()> {
    cmd!("typos").run_with_trace()?;
    Ok(())
}

/// Fix typos in the project
fn fix_typos() -> Result<()> {
    cmd!("typos", "-w").run_with_trace()?;
    Ok(())
}

/// Run tests for libs and docs
fn test() -> Result<()> {
    test_libs()?;
    test_docs()?; // run last because it's slow
    Ok(())
}

/// Run doc tests for the workspace's default packages
fn test_docs() -> Result<()> {
    run_cargo(vec!["test", "--doc", "--all-features"])
}

/// Run lib tests for the workspace's default packages
fn test_libs() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Run a cargo subcommand with the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO env var is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Verify the `SQLite` migrations against the Diesel schema module
///
/// This command performs the following steps:
/// 1. Applies every migration to an in-memory `SQLite` database
/// 2. Introspects the resulting tables, columns and foreign keys
/// 3. Compares tables, columns, types and nullability with `diesel_schema.rs`
/// 4. Checks that every foreign key targets an existing table and column
/// 5. Reverts all migrations and checks that no table survives
///
/// # Errors
///
/// Returns an error if:
/// - A migration fails to apply or revert
/// - Schema introspection fails
/// - The migrated schema and the Diesel schema disagree
fn verify_migrations() -> Result<()> {
    use diesel::Connection;
    use diesel_migrations::{embed_migrations, MigrationHarness};

    const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
        embed_migrations!("../crates/persistence/migrations");
    const DIESEL_SCHEMA: &str = include_str!("../../crates/persistence/src/diesel_schema.rs");

    tracing::info!("Starting migration verification");

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to apply SQLite migrations: {}", e))?;
    tracing::info!("SQLite migrations applied successfully");

    tracing::info!("Introspecting SQLite schema");
    let migrated = introspect_sqlite_schema(&mut conn)?;

    tracing::info!("Parsing Diesel schema");
    let declared = parse_diesel_schema(DIESEL_SCHEMA)?;

    tracing::info!("Comparing schemas");
    compare_schemas(&migrated, &declared)?;
    check_foreign_keys(&migrated)?;

    tracing::info!("Reverting migrations");
    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to revert SQLite migrations: {}", e))?;

    let leftover = introspect_sqlite_schema(&mut conn)?;
    if !leftover.tables.is_empty() {
        let names: Vec<&str> = leftover.tables.keys().map(String::as_str).collect();
        return Err(color_eyre::eyre::eyre!(
            "❌ Migration verification FAILED: tables left after revert: {}",
            names.join(", ")
        ));
    }

    tracing::info!("✓ Migration verification passed");
    Ok(())
}

/// Normalized schema representation
#[derive(Debug, Clone, PartialEq, Eq)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Table {
    columns: BTreeMap<String, Column>,
    primary_keys: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Column {
    normalized_type: String,
    nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
}

/// Introspect `SQLite` schema
fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    let mut schema = Schema {
        tables: BTreeMap::new(),
    };

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    for table in tables {
        let mut table_info = Table::default();

        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;

        for col in columns {
            // SQLite reports INTEGER PRIMARY KEY columns as nullable
            let nullable = col.notnull == 0 && col.pk == 0;
            table_info.columns.insert(
                col.name.clone(),
                Column {
                    normalized_type: normalize_sqlite_type(&col.r#type),
                    nullable,
                },
            );

            if col.pk > 0 {
                table_info.primary_keys.insert(col.name);
            }
        }

        let fks: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err(format!(
                    "Failed to get foreign keys for table {}",
                    table.name
                ))?;

        for fk in fks {
            table_info.foreign_keys.insert(ForeignKey {
                from_column: fk.from,
                to_table: fk.table,
                to_column: fk.to,
            });
        }

        schema.tables.insert(table.name, table_info);
    }

    Ok(schema)
}

/// Parse the `diesel::table!` blocks of a generated schema module
fn parse_diesel_schema(source: &str) -> Result<Schema> {
    let mut schema = Schema {
        tables: BTreeMap::new(),
    };
    let mut current: Option<(String, Table)> = None;
    let mut in_table_macro = false;

    for line in source.lines().map(str::trim) {
        if line.starts_with("diesel::table!") {
            in_table_macro = true;
            continue;
        }
        if !in_table_macro {
            continue;
        }

        if current.is_none() {
            // Header: `name (pk, ...) {`
            let Some((name, rest)) = line.split_once(' ') else {
                continue;
            };
            let keys = rest
                .trim_start_matches('(')
                .trim_end_matches('{')
                .trim()
                .trim_end_matches(')');
            let mut table = Table::default();
            for key in keys.split(',').map(str::trim).filter(|k| !k.is_empty()) {
                table.primary_keys.insert(key.to_string());
            }
            current = Some((name.to_string(), table));
        } else if line == "}" {
            if let Some((name, table)) = current.take() {
                schema.tables.insert(name, table);
            }
            in_table_macro = false;
        } else if let Some((column, sql_type)) = line.split_once("->") {
            let sql_type = sql_type.trim().trim_end_matches(',');
            let (nullable, inner) = sql_type
                .strip_prefix("Nullable<")
                .and_then(|t| t.strip_suffix('>'))
                .map_or((false, sql_type), |t| (true, t));
            if let Some((_, table)) = current.as_mut() {
                table.columns.insert(
                    column.trim().to_string(),
                    Column {
                        normalized_type: normalize_diesel_type(inner),
                        nullable,
                    },
                );
            }
        }
    }

    if schema.tables.is_empty() {
        return Err(color_eyre::eyre::eyre!(
            "No diesel::table! declarations found in the schema module"
        ));
    }
    Ok(schema)
}

/// Normalize `SQLite` type to common representation
fn normalize_sqlite_type(sqlite_type: &str) -> String {
    let normalized = sqlite_type.to_uppercase();
    if normalized.contains("INT") {
        "integer".to_string()
    } else if normalized.contains("REAL")
        || normalized.contains("FLOA")
        || normalized.contains("DOUB")
    {
        "real".to_string()
    } else if normalized.contains("BLOB") {
        "blob".to_string()
    } else {
        "text".to_string() // Default for SQLite
    }
}

/// Normalize a Diesel SQL type name to common representation
#[allow(clippy::match_same_arms)]
fn normalize_diesel_type(diesel_type: &str) -> String {
    match diesel_type {
        "SmallInt" | "Integer" | "BigInt" | "Bool" => "integer".to_string(),
        "Float" | "Double" => "real".to_string(),
        "Binary" => "blob".to_string(),
        _ => "text".to_string(),
    }
}

/// Compare the migrated schema with the declared one and fail on mismatch
fn compare_schemas(migrated: &Schema, declared: &Schema) -> Result<()> {
    let migrated_tables: BTreeSet<_> = migrated.tables.keys().collect();
    let declared_tables: BTreeSet<_> = declared.tables.keys().collect();

    if migrated_tables != declared_tables {
        let mut errors = Vec::new();

        for table in migrated_tables.difference(&declared_tables) {
            errors.push(format!(
                "  - Table '{table}' is created by migrations but missing from diesel_schema.rs"
            ));
        }

        for table in declared_tables.difference(&migrated_tables) {
            errors.push(format!(
                "  - Table '{table}' is declared in diesel_schema.rs but not created by migrations"
            ));
        }

        return Err(color_eyre::eyre::eyre!(
            "❌ Migration verification FAILED: Table mismatch\n{}",
            errors.join("\n")
        ));
    }

    for table_name in migrated_tables {
        let migrated_table = &migrated.tables[table_name];
        let declared_table = &declared.tables[table_name];

        let migrated_columns: BTreeSet<_> = migrated_table.columns.keys().collect();
        let declared_columns: BTreeSet<_> = declared_table.columns.keys().collect();

        if migrated_columns != declared_columns {
            let mut errors = Vec::new();

            for col in migrated_columns.difference(&declared_columns) {
                errors.push(format!("    - Column '{col}' missing from diesel_schema.rs"));
            }

            for col in declared_columns.difference(&migrated_columns) {
                errors.push(format!("    - Column '{col}' missing from migrations"));
            }

            return Err(color_eyre::eyre::eyre!(
                "❌ Migration verification FAILED: Column mismatch in table '{}'\n{}",
                table_name,
                errors.join("\n")
            ));
        }

        for col_name in migrated_columns {
            let migrated_col = &migrated_table.columns[col_name];
            let declared_col = &declared_table.columns[col_name];

            if migrated_col != declared_col {
                return Err(color_eyre::eyre::eyre!(
                    "❌ Migration verification FAILED: Column '{}.{}' differs\n  migrations: {:?}\n  diesel_schema.rs: {:?}",
                    table_name,
                    col_name,
                    migrated_col,
                    declared_col
                ));
            }
        }

        if migrated_table.primary_keys != declared_table.primary_keys {
            return Err(color_eyre::eyre::eyre!(
                "❌ Migration verification FAILED: Primary key mismatch in table '{}'\n  migrations: {:?}\n  diesel_schema.rs: {:?}",
                table_name,
                migrated_table.primary_keys,
                declared_table.primary_keys
            ));
        }
    }

    Ok(())
}

/// Check that every foreign key points at an existing table and column
fn check_foreign_keys(schema: &Schema) -> Result<()> {
    let mut errors = Vec::new();

    for (table_name, table) in &schema.tables {
        for fk in &table.foreign_keys {
            let target_exists = schema
                .tables
                .get(&fk.to_table)
                .is_some_and(|target| target.columns.contains_key(&fk.to_column));
            if !target_exists {
                errors.push(format!(
                    "  - {}.{} references missing {}.{}",
                    table_name, fk.from_column, fk.to_table, fk.to_column
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(color_eyre::eyre::eyre!(
            "❌ Migration verification FAILED: Dangling foreign keys\n{}",
            errors.join("\n")
        ))
    }
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
