/*!
 * Database schema definitions.
 *
 * This module contains the SQL schema for the three append-only tables:
 * students, internships and feedback.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::Connection;

/// Tables the dashboard needs, in creation order
pub const TABLES: [&str; 3] = ["students", "internships", "feedback"];

/// Apply per-connection settings
///
/// SQLite only honours foreign keys when the pragma is set on the
/// connection itself, so this runs for every connection the store opens.
pub fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys=ON;")
        .context("Failed to enable foreign keys")?;
    Ok(())
}

/// Initialize the database schema
///
/// Idempotent: every statement is `CREATE TABLE IF NOT EXISTS`.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    configure_connection(conn)?;

    if tables_present(conn)? == TABLES.len() {
        debug!("Database schema already present");
        return Ok(());
    }

    info!("Initializing database schema");
    create_all_tables(conn)
}

/// Count how many of the expected tables already exist
fn tables_present(conn: &Connection) -> Result<usize> {
    let mut count = 0;
    for table in TABLES {
        let exists: bool = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |row| row.get(0),
            )
            .with_context(|| format!("Failed to check {} table existence", table))?;
        if exists {
            count += 1;
        }
    }
    Ok(count)
}

/// Create all database tables
fn create_all_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            student_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT UNIQUE NOT NULL
        );
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS internships (
            internship_id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id INTEGER REFERENCES students(student_id),
            company_name TEXT NOT NULL,
            duration TEXT NOT NULL,
            feedback TEXT,
            msme_digitalized INTEGER DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_internships_student ON internships(student_id);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS feedback (
            feedback_id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id INTEGER REFERENCES students(student_id),
            rating INTEGER,
            comments TEXT
        );
        "#,
    )?;

    info!("Database schema created successfully");
    Ok(())
}
