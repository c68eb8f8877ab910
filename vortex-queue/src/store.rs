//! SQLite-backed job persistence.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde_json::Value;

use vortex_core::errors::{QueueError, VortexResult};
use vortex_core::models::{Job, JobStatus};

fn sqlite_err(e: rusqlite::Error) -> QueueError {
    QueueError::Sqlite {
        message: e.to_string(),
    }
}

/// Per-status job counts for health/status endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobCounts {
    pub queued: usize,
    pub running: usize,
    pub done: usize,
    pub failed: usize,
}

/// Job table behind a single connection. Writes are short and infrequent
/// relative to search traffic, so one mutex-guarded connection suffices.
pub struct JobStore {
    conn: Mutex<Connection>,
}

impl JobStore {
    /// Open a file-backed store, or an in-memory one when `path` is `None`.
    pub fn open(path: Option<&Path>) -> VortexResult<Self> {
        let conn = match path {
            Some(p) => Connection::open(p).map_err(sqlite_err)?,
            None => Connection::open_in_memory().map_err(sqlite_err)?,
        };
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS jobs (
                id TEXT PRIMARY KEY,
                job_type TEXT NOT NULL,
                payload TEXT NOT NULL,
                status TEXT NOT NULL,
                progress REAL NOT NULL DEFAULT 0.0,
                message TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_jobs_status_created
                ON jobs (status, created_at);",
        )
        .map_err(sqlite_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> VortexResult<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let guard = self.conn.lock().map_err(|e| QueueError::Sqlite {
            message: format!("job store lock poisoned: {e}"),
        })?;
        f(&guard).map_err(|e| sqlite_err(e).into())
    }

    pub fn insert(&self, job: &Job) -> VortexResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO jobs (id, job_type, payload, status, progress, message, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                rusqlite::params![
                    job.id,
                    job.job_type,
                    job.payload.to_string(),
                    job.status.as_str(),
                    job.progress,
                    job.message,
                    job.created_at.to_rfc3339(),
                    job.updated_at.to_rfc3339(),
                ],
            )
            .map(|_| ())
        })
    }

    /// Transition a job's status, optionally replacing the message.
    pub fn set_status(
        &self,
        job_id: &str,
        status: JobStatus,
        message: Option<&str>,
    ) -> VortexResult<()> {
        let now = Utc::now().to_rfc3339();
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE jobs SET status = ?1, message = COALESCE(?2, message), updated_at = ?3
                 WHERE id = ?4",
                rusqlite::params![status.as_str(), message, now, job_id],
            )
            .map(|_| ())
        })
    }

    pub fn set_progress(&self, job_id: &str, progress: f64) -> VortexResult<()> {
        let now = Utc::now().to_rfc3339();
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE jobs SET progress = ?1, updated_at = ?2 WHERE id = ?3",
                rusqlite::params![progress.clamp(0.0, 1.0), now, job_id],
            )
            .map(|_| ())
        })
    }

    pub fn get(&self, job_id: &str) -> VortexResult<Option<Job>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, job_type, payload, status, progress, message, created_at, updated_at
                 FROM jobs WHERE id = ?1",
            )?;
            let mut rows = stmt.query_map([job_id], row_to_job)?;
            rows.next().transpose()
        })
    }

    /// Most recent jobs, newest first.
    pub fn recent(&self, limit: usize) -> VortexResult<Vec<Job>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, job_type, payload, status, progress, message, created_at, updated_at
                 FROM jobs ORDER BY created_at DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map([limit as i64], row_to_job)?;
            rows.collect()
        })
    }

    pub fn counts(&self) -> VortexResult<JobCounts> {
        self.with_conn(|conn| {
            let mut counts = JobCounts::default();
            let mut stmt = conn.prepare("SELECT status, COUNT(*) FROM jobs GROUP BY status")?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize))
            })?;
            for row in rows {
                let (status, count) = row?;
                match status.as_str() {
                    "queued" => counts.queued = count,
                    "running" => counts.running = count,
                    "done" => counts.done = count,
                    "failed" => counts.failed = count,
                    _ => {}
                }
            }
            Ok(counts)
        })
    }

    /// Whether a job of this type is currently queued or running.
    pub fn has_active(&self, job_type: &str) -> VortexResult<bool> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT 1 FROM jobs WHERE job_type = ?1 AND status IN ('queued', 'running') LIMIT 1",
            )?;
            let found = stmt.query_map([job_type], |_| Ok(()))?.next().is_some();
            Ok(found)
        })
    }

    /// Number of jobs still waiting for a worker.
    pub fn depth(&self) -> VortexResult<usize> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM jobs WHERE status = 'queued'",
                [],
                |row| row.get::<_, i64>(0).map(|n| n as usize),
            )
        })
    }
}

fn row_to_job(row: &rusqlite::Row<'_>) -> rusqlite::Result<Job> {
    let payload_raw: String = row.get(2)?;
    let status_raw: String = row.get(3)?;
    let created_raw: String = row.get(6)?;
    let updated_raw: String = row.get(7)?;
    Ok(Job {
        id: row.get(0)?,
        job_type: row.get(1)?,
        payload: serde_json::from_str::<Value>(&payload_raw).unwrap_or(Value::Null),
        status: status_raw.parse().unwrap_or(JobStatus::Failed),
        progress: row.get(4)?,
        message: row.get(5)?,
        created_at: parse_ts(&created_raw),
        updated_at: parse_ts(&updated_raw),
    })
}

fn parse_ts(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn job(id: &str, job_type: &str) -> Job {
        Job {
            id: id.to_string(),
            job_type: job_type.to_string(),
            payload: json!({"n": 1}),
            status: JobStatus::Queued,
            progress: 0.0,
            message: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn insert_get_roundtrip() {
        let store = JobStore::open(None).unwrap();
        store.insert(&job("j1", "batch_ingest")).unwrap();
        let loaded = store.get("j1").unwrap().unwrap();
        assert_eq!(loaded.job_type, "batch_ingest");
        assert_eq!(loaded.status, JobStatus::Queued);
        assert_eq!(loaded.payload["n"], 1);
    }

    #[test]
    fn status_transitions_persist_and_keep_terminal_rows() {
        let store = JobStore::open(None).unwrap();
        store.insert(&job("j1", "batch_ingest")).unwrap();
        store.set_status("j1", JobStatus::Running, None).unwrap();
        store
            .set_status("j1", JobStatus::Failed, Some("boom"))
            .unwrap();

        let loaded = store.get("j1").unwrap().unwrap();
        assert_eq!(loaded.status, JobStatus::Failed);
        assert_eq!(loaded.message.as_deref(), Some("boom"));
        // Terminal rows are never deleted.
        assert_eq!(store.recent(10).unwrap().len(), 1);
    }

    #[test]
    fn counts_and_depth_track_statuses() {
        let store = JobStore::open(None).unwrap();
        store.insert(&job("a", "batch_ingest")).unwrap();
        store.insert(&job("b", "batch_ingest")).unwrap();
        store.set_status("b", JobStatus::Done, None).unwrap();

        let counts = store.counts().unwrap();
        assert_eq!(counts.queued, 1);
        assert_eq!(counts.done, 1);
        assert_eq!(store.depth().unwrap(), 1);
    }

    #[test]
    fn has_active_sees_queued_and_running_only() {
        let store = JobStore::open(None).unwrap();
        store.insert(&job("a", "index_retrain")).unwrap();
        assert!(store.has_active("index_retrain").unwrap());
        store.set_status("a", JobStatus::Done, None).unwrap();
        assert!(!store.has_active("index_retrain").unwrap());
    }
}
