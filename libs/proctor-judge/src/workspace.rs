//! Ephemeral per-job working directories.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::error::{JudgeError, Result};

/// Directory backing a single sandbox run.
///
/// Names combine a UTC timestamp with a random suffix so concurrent jobs
/// never collide. The directory is removed when the value is dropped, on
/// every exit path; removal failures are logged and swallowed.
#[derive(Debug)]
pub struct JobWorkspace {
    dir: PathBuf,
}

impl JobWorkspace {
    pub async fn create(root: &Path) -> Result<Self> {
        let suffix = Uuid::new_v4().simple().to_string();
        let name = format!("job-{}-{}", Utc::now().format("%Y%m%d%H%M%S%3f"), &suffix[..8]);
        let dir = root.join(name);
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            JudgeError::Infrastructure(format!(
                "failed to create workspace {}: {e}",
                dir.display()
            ))
        })?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub async fn write_file(&self, name: &str, contents: &str) -> Result<()> {
        let path = self.dir.join(name);
        tokio::fs::write(&path, contents).await.map_err(|e| {
            JudgeError::Infrastructure(format!("failed to write {}: {e}", path.display()))
        })
    }
}

impl Drop for JobWorkspace {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.dir) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(dir = %self.dir.display(), error = %e, "failed to remove job workspace");
            }
        }
    }
}
