//! `gemi session` subcommands.

use anyhow::{Context, Result};

use gemi_core::SessionId;

use crate::cli::SessionAction;
use crate::output;

pub fn handle(action: SessionAction) -> Result<()> {
    let conn = gemi_core::db::open_db().context("open session store")?;
    match action {
        SessionAction::Show => match SessionId::load(&conn)? {
            Some(id) => output::kv("session_id", id.as_str()),
            None => output::dim("No session yet; one is created with the first message."),
        },
        SessionAction::Reset => {
            if SessionId::reset(&conn)? {
                output::success("Session reset. The next message starts a new conversation.");
            } else {
                output::dim("No session to reset.");
            }
        }
    }
    Ok(())
}
