use crate::app_dirs::AppDirs;
use crate::error::EngineError;
use chrono::{DateTime, Local};
use rusqlite::{params, Connection, Result};
use std::path::{Path, PathBuf};

/// One completed race, as persisted. The engine itself never writes this;
/// the hosting app records it from the final snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceRecord {
    pub recorded_at: DateTime<Local>,
    pub passage_chars: usize,
    pub wpm: f64,
    pub accuracy: f64,
    pub position: usize,
    pub field_size: usize,
    pub reward: u32,
}

/// Database manager for race history
#[derive(Debug)]
pub struct HistoryDb {
    conn: Connection,
}

impl HistoryDb {
    /// Open (and migrate) the default on-disk database.
    pub fn new() -> Result<Self> {
        let db_path = Self::get_db_path().unwrap_or_else(|| PathBuf::from("keyrace_history.db"));

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CANTOPEN),
                    Some(format!("Failed to create directory: {}", e)),
                )
            })?;
        }

        Self::open(Connection::open(&db_path)?)
    }

    /// Open a database at an explicit path (used by tests and exports).
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(Connection::open(path.as_ref())?)
    }

    fn open(conn: Connection) -> Result<Self> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS races (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                recorded_at TEXT NOT NULL,
                passage_chars INTEGER NOT NULL,
                wpm REAL NOT NULL,
                accuracy REAL NOT NULL,
                position INTEGER NOT NULL,
                field_size INTEGER NOT NULL,
                reward INTEGER NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_races_recorded_at ON races(recorded_at)",
            [],
        )?;

        Ok(HistoryDb { conn })
    }

    fn get_db_path() -> Option<PathBuf> {
        AppDirs::db_path()
    }

    pub fn record_race(&self, record: &RaceRecord) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO races
            (recorded_at, passage_chars, wpm, accuracy, position, field_size, reward)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                record.recorded_at.to_rfc3339(),
                record.passage_chars as i64,
                record.wpm,
                record.accuracy,
                record.position as i64,
                record.field_size as i64,
                record.reward as i64,
            ],
        )?;

        Ok(())
    }

    /// Most recent races first.
    pub fn recent(&self, limit: usize) -> Result<Vec<RaceRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT recorded_at, passage_chars, wpm, accuracy, position, field_size, reward
            FROM races
            ORDER BY recorded_at DESC
            LIMIT ?1
            "#,
        )?;

        let rows = stmt.query_map([limit as i64], |row| {
            let recorded_at: String = row.get(0)?;
            let recorded_at = DateTime::parse_from_rfc3339(&recorded_at)
                .map_err(|_| {
                    rusqlite::Error::InvalidColumnType(
                        0,
                        "recorded_at".to_string(),
                        rusqlite::types::Type::Text,
                    )
                })?
                .with_timezone(&Local);

            Ok(RaceRecord {
                recorded_at,
                passage_chars: row.get::<_, i64>(1)? as usize,
                wpm: row.get(2)?,
                accuracy: row.get(3)?,
                position: row.get::<_, i64>(4)? as usize,
                field_size: row.get::<_, i64>(5)? as usize,
                reward: row.get::<_, i64>(6)? as u32,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    pub fn best_wpm(&self) -> Result<Option<f64>> {
        let mut stmt = self.conn.prepare("SELECT MAX(wpm) FROM races")?;
        let best: Option<f64> = stmt.query_row([], |row| row.get(0))?;
        Ok(best)
    }

    pub fn race_count(&self) -> Result<i64> {
        let mut stmt = self.conn.prepare("SELECT COUNT(*) FROM races")?;
        stmt.query_row([], |row| row.get(0))
    }

    /// Total experience earned across all recorded races.
    pub fn total_reward(&self) -> Result<i64> {
        let mut stmt = self
            .conn
            .prepare("SELECT COALESCE(SUM(reward), 0) FROM races")?;
        stmt.query_row([], |row| row.get(0))
    }

    /// Writes the full history to a CSV file, newest first.
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), EngineError> {
        let records = self.recent(i64::MAX as usize)?;
        let mut writer = csv::Writer::from_path(path.as_ref())?;

        writer.write_record([
            "date",
            "passage_chars",
            "wpm",
            "accuracy",
            "position",
            "field_size",
            "reward",
        ])?;
        for r in records {
            writer.write_record([
                r.recorded_at.to_rfc3339(),
                r.passage_chars.to_string(),
                format!("{:.1}", r.wpm),
                format!("{:.1}", r.accuracy),
                r.position.to_string(),
                r.field_size.to_string(),
                r.reward.to_string(),
            ])?;
        }
        writer.flush().map_err(EngineError::Io)?;
        Ok(())
    }
}
