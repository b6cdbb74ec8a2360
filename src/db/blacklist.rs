//! Blacklist query operations.
//!
//! Subtitles a user rejected are keyed by `(provider, subs_id)` so the
//! download pipeline can skip them. Movies and series episodes live in
//! separate tables; every mutation announces itself on the event bus.

use chrono::Utc;
use rusqlite::{params, Connection};

use crate::error::Result;
use crate::events::{AppEvent, BlacklistAction, EventBus};

/// A blacklisted subtitle identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlacklistedSubtitle {
    pub provider: String,
    pub subs_id: String,
}

/// List blacklisted `(provider, subs_id)` pairs for movies.
pub fn get_blacklist_movie(conn: &Connection) -> Result<Vec<BlacklistedSubtitle>> {
    let mut stmt = conn.prepare("SELECT provider, subs_id FROM blacklist_movie")?;
    let rows = stmt.query_map([], |row| {
        Ok(BlacklistedSubtitle {
            provider: row.get(0)?,
            subs_id: row.get(1)?,
        })
    })?;

    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// List blacklisted `(provider, subs_id)` pairs for series episodes.
pub fn get_blacklist(conn: &Connection) -> Result<Vec<BlacklistedSubtitle>> {
    let mut stmt = conn.prepare("SELECT provider, subs_id FROM blacklist")?;
    let rows = stmt.query_map([], |row| {
        Ok(BlacklistedSubtitle {
            provider: row.get(0)?,
            subs_id: row.get(1)?,
        })
    })?;

    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Blacklist a movie subtitle.
pub fn blacklist_log_movie(
    conn: &Connection,
    events: &EventBus,
    radarr_id: i64,
    provider: &str,
    subs_id: &str,
    language: Option<&str>,
) -> Result<()> {
    conn.execute(
        "INSERT INTO blacklist_movie (radarr_id, timestamp, provider, subs_id, language)
         VALUES (?, ?, ?, ?, ?)",
        params![radarr_id, Utc::now().to_rfc3339(), provider, subs_id, language],
    )?;

    events.emit(AppEvent::MovieBlacklistChanged {
        action: BlacklistAction::Added,
    });
    Ok(())
}

/// Blacklist a series episode subtitle.
pub fn blacklist_log(
    conn: &Connection,
    events: &EventBus,
    sonarr_series_id: i64,
    sonarr_episode_id: i64,
    provider: &str,
    subs_id: &str,
    language: Option<&str>,
) -> Result<()> {
    conn.execute(
        "INSERT INTO blacklist (sonarr_series_id, sonarr_episode_id, timestamp, provider, subs_id, language)
         VALUES (?, ?, ?, ?, ?, ?)",
        params![
            sonarr_series_id,
            sonarr_episode_id,
            Utc::now().to_rfc3339(),
            provider,
            subs_id,
            language
        ],
    )?;

    events.emit(AppEvent::SeriesBlacklistChanged {
        action: BlacklistAction::Added,
    });
    Ok(())
}

/// Remove a single movie blacklist entry.
pub fn blacklist_delete_movie(
    conn: &Connection,
    events: &EventBus,
    provider: &str,
    subs_id: &str,
) -> Result<()> {
    conn.execute(
        "DELETE FROM blacklist_movie WHERE provider = ? AND subs_id = ?",
        params![provider, subs_id],
    )?;

    events.emit(AppEvent::MovieBlacklistChanged {
        action: BlacklistAction::Deleted,
    });
    Ok(())
}

/// Remove a single series blacklist entry.
pub fn blacklist_delete(
    conn: &Connection,
    events: &EventBus,
    provider: &str,
    subs_id: &str,
) -> Result<()> {
    conn.execute(
        "DELETE FROM blacklist WHERE provider = ? AND subs_id = ?",
        params![provider, subs_id],
    )?;

    events.emit(AppEvent::SeriesBlacklistChanged {
        action: BlacklistAction::Deleted,
    });
    Ok(())
}

/// Clear the movie blacklist.
pub fn blacklist_delete_all_movie(conn: &Connection, events: &EventBus) -> Result<()> {
    conn.execute("DELETE FROM blacklist_movie", [])?;

    events.emit(AppEvent::MovieBlacklistChanged {
        action: BlacklistAction::Deleted,
    });
    Ok(())
}

/// Clear the series blacklist.
pub fn blacklist_delete_all(conn: &Connection, events: &EventBus) -> Result<()> {
    conn.execute("DELETE FROM blacklist", [])?;

    events.emit(AppEvent::SeriesBlacklistChanged {
        action: BlacklistAction::Deleted,
    });
    Ok(())
}
