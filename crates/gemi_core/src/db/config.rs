//! Config table access.

use anyhow::Result;

/// All key/value pairs, ordered by key.
pub fn get_config(conn: &rusqlite::Connection) -> Result<Vec<(String, String)>> {
    let mut stmt = conn.prepare("SELECT key, value FROM config ORDER BY key")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}

pub fn get_config_value(conn: &rusqlite::Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM config WHERE key = ?1")?;
    let mut rows = stmt.query(rusqlite::params![key])?;
    Ok(rows.next()?.map(|row| row.get::<_, String>(0)).transpose()?)
}

/// Insert or replace one key.
pub fn set_config(conn: &rusqlite::Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO config (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = ?2",
        rusqlite::params![key, value],
    )?;
    Ok(())
}

/// Returns whether a row was removed.
pub fn delete_config(conn: &rusqlite::Connection, key: &str) -> Result<bool> {
    let n = conn.execute("DELETE FROM config WHERE key = ?1", rusqlite::params![key])?;
    Ok(n > 0)
}
