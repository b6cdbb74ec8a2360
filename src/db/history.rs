//! Sync history query operations.
//!
//! Outcomes are keyed by media type: series episodes go to `history`,
//! movies to `history_movie`. The action code distinguishes synchronization
//! from other subtitle events sharing the tables.

use chrono::Utc;
use rusqlite::{params, Connection};

use crate::error::Result;
use crate::sync::{HistoryRecorder, MediaId, SyncReport};

/// A persisted history row, as read back for display.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub action: i64,
    pub timestamp: String,
    pub description: String,
    pub video_path: Option<String>,
    pub language: Option<String>,
    pub subtitles_path: Option<String>,
    pub offset_seconds: Option<f64>,
}

/// History sink backed by the SQLite database.
pub struct DbHistory<'a> {
    conn: &'a Connection,
}

impl<'a> DbHistory<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl HistoryRecorder for DbHistory<'_> {
    fn record(&self, action: i64, media: &MediaId, report: &SyncReport) -> Result<()> {
        match media {
            MediaId::Episode {
                series_id,
                episode_id,
            } => log_series(self.conn, action, *series_id, *episode_id, report),
            MediaId::Movie { movie_id } => log_movie(self.conn, action, *movie_id, report),
        }
    }
}

fn log_series(
    conn: &Connection,
    action: i64,
    series_id: i64,
    episode_id: i64,
    report: &SyncReport,
) -> Result<()> {
    conn.execute(
        "INSERT INTO history (action, sonarr_series_id, sonarr_episode_id, timestamp,
                              description, video_path, language, subtitles_path, offset_seconds)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            action,
            series_id,
            episode_id,
            Utc::now().to_rfc3339(),
            report.message,
            report.video_path.to_string_lossy(),
            report.language,
            report.subtitle_path.to_string_lossy(),
            report.offset_seconds,
        ],
    )?;
    Ok(())
}

fn log_movie(conn: &Connection, action: i64, movie_id: i64, report: &SyncReport) -> Result<()> {
    conn.execute(
        "INSERT INTO history_movie (action, radarr_id, timestamp, description,
                                    video_path, language, subtitles_path, offset_seconds)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            action,
            movie_id,
            Utc::now().to_rfc3339(),
            report.message,
            report.video_path.to_string_lossy(),
            report.language,
            report.subtitle_path.to_string_lossy(),
            report.offset_seconds,
        ],
    )?;
    Ok(())
}

/// Read back history rows for a movie, newest first.
pub fn movie_history(conn: &Connection, movie_id: i64) -> Result<Vec<HistoryEntry>> {
    let mut stmt = conn.prepare(
        "SELECT action, timestamp, description, video_path, language, subtitles_path, offset_seconds
         FROM history_movie WHERE radarr_id = ? ORDER BY id DESC",
    )?;
    let rows = stmt.query_map([movie_id], row_to_entry)?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Read back history rows for an episode, newest first.
pub fn episode_history(
    conn: &Connection,
    series_id: i64,
    episode_id: i64,
) -> Result<Vec<HistoryEntry>> {
    let mut stmt = conn.prepare(
        "SELECT action, timestamp, description, video_path, language, subtitles_path, offset_seconds
         FROM history WHERE sonarr_series_id = ? AND sonarr_episode_id = ? ORDER BY id DESC",
    )?;
    let rows = stmt.query_map([series_id, episode_id], row_to_entry)?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<HistoryEntry> {
    Ok(HistoryEntry {
        action: row.get(0)?,
        timestamp: row.get(1)?,
        description: row.get(2)?,
        video_path: row.get(3)?,
        language: row.get(4)?,
        subtitles_path: row.get(5)?,
        offset_seconds: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;
    use crate::sync::ACTION_SYNCED;
    use std::path::PathBuf;

    fn report() -> SyncReport {
        SyncReport {
            message: "English subtitles synchronization ended with an offset of 1.23 seconds and a framerate scale factor of 1.00.".to_string(),
            offset_seconds: 1.23,
            framerate_scale_factor: 1.001,
            video_path: PathBuf::from("/data/media/movie.mkv"),
            language: "en".to_string(),
            subtitle_path: PathBuf::from("/mnt/media/movie.srt"),
            provider: None,
            score: None,
            subtitle_id: None,
            forced: None,
            hearing_impaired: None,
        }
    }

    #[test]
    fn movie_record_round_trip() {
        let conn = open_in_memory().unwrap();
        let history = DbHistory::new(&conn);

        history
            .record(ACTION_SYNCED, &MediaId::Movie { movie_id: 42 }, &report())
            .unwrap();

        let entries = movie_history(&conn, 42).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, ACTION_SYNCED);
        assert!(entries[0].description.contains("English"));
        assert_eq!(entries[0].offset_seconds, Some(1.23));
        assert_eq!(
            entries[0].video_path.as_deref(),
            Some("/data/media/movie.mkv")
        );

        assert!(movie_history(&conn, 43).unwrap().is_empty());
    }

    #[test]
    fn episode_record_round_trip() {
        let conn = open_in_memory().unwrap();
        let history = DbHistory::new(&conn);

        history
            .record(
                ACTION_SYNCED,
                &MediaId::Episode {
                    series_id: 7,
                    episode_id: 1201,
                },
                &report(),
            )
            .unwrap();

        let entries = episode_history(&conn, 7, 1201).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, ACTION_SYNCED);

        // Keyed by both ids.
        assert!(episode_history(&conn, 7, 1202).unwrap().is_empty());
    }
}
