//! SQLite run history.
//!
//! RULE: Only store.rs talks to the database.
//! The linear system itself is never persisted; only the solved volumes.

use crate::{
    error::FlowResult,
    report::{AirportVolume, FlowReport},
    types::RunId,
};
use rusqlite::{params, Connection};

pub struct FlowStore {
    conn: Connection,
}

impl FlowStore {
    /// Open (or create) the history database at `path`.
    pub fn open(path: &str) -> FlowResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only matters for real files.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> FlowResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> FlowResult<()> {
        self.conn.execute_batch(include_str!("../../migrations/001_runs.sql"))?;
        Ok(())
    }

    // ── Run ────────────────────────────────────────────────────

    /// Record a new run and return its id.
    pub fn insert_run(&self, source: &str, airport_count: usize) -> FlowResult<RunId> {
        let run_id = uuid::Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO flow_run (run_id, source, airport_count, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![run_id, source, airport_count as i64, created_at],
        )?;
        Ok(run_id)
    }

    pub fn run_count(&self) -> FlowResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM flow_run",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // ── Volumes ────────────────────────────────────────────────

    /// Persist every volume of `report` under `run_id`, in index order.
    /// Non-finite volumes are stored as NULL.
    pub fn insert_volumes(&mut self, run_id: &str, report: &FlowReport) -> FlowResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO airport_volume (run_id, airport_index, code, volume)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (i, v) in report.volumes.iter().enumerate() {
                let volume = v.volume.is_finite().then_some(v.volume);
                stmt.execute(params![run_id, i as i64, v.code, volume])?;
            }
        }
        tx.commit()?;
        log::debug!("stored {} volumes for run {run_id}", report.volumes.len());
        Ok(())
    }

    /// Volumes of a run in index order. NULL comes back as NaN.
    pub fn volumes_for_run(&self, run_id: &str) -> FlowResult<Vec<AirportVolume>> {
        let mut stmt = self.conn.prepare(
            "SELECT code, volume FROM airport_volume
             WHERE run_id = ?1
             ORDER BY airport_index ASC",
        )?;
        let volumes = stmt
            .query_map(params![run_id], |row| {
                Ok(AirportVolume {
                    code:   row.get(0)?,
                    volume: row.get::<_, Option<f64>>(1)?.unwrap_or(f64::NAN),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(volumes)
    }
}
