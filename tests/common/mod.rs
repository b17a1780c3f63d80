/*!
 * Common test utilities for the kyra test suite
 */

use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

use kyra::database::NewInternship;
use kyra::Repository;

/// Install a test logger once; later calls are no-ops
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Database path inside a temporary directory
pub fn database_path(dir: &TempDir) -> PathBuf {
    dir.path().join("internship_tracking.db")
}

/// Repository on a fresh database file; keep the `TempDir` alive while using it
pub fn file_repository() -> Result<(TempDir, Repository)> {
    init_logging();
    let dir = create_temp_dir()?;
    let repo = Repository::open(database_path(&dir))?;
    Ok((dir, repo))
}

/// Register a student and log the given (company, msmes) internships
pub async fn seed_student(
    repo: &Repository,
    name: &str,
    email: &str,
    internships: &[(&str, u32)],
) -> Result<()> {
    repo.register_student(name, email).await?;
    for (company, msmes) in internships {
        repo.log_internship(email, &NewInternship::new(*company, "3 months", "Great", *msmes))
            .await?;
    }
    Ok(())
}
