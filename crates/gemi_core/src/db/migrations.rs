//! SQL schema. Applied on open.

/// Key/value settings; also stores the session identifier.
pub const CONFIG: &str = "
CREATE TABLE IF NOT EXISTS config (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);
";

pub fn run_all(conn: &rusqlite::Connection) -> anyhow::Result<()> {
    conn.execute_batch(CONFIG)?;
    Ok(())
}
