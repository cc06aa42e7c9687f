//! CLI entry point for gemi.

mod cli;
mod commands;
mod output;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use clap::Parser;

use gemi_constant::{app, env};

use crate::cli::Cli;

static KEYS_FROM_DB: OnceLock<Vec<String>> = OnceLock::new();

/// Keys this process took from the DB config table at startup.
pub(crate) fn keys_from_db() -> &'static [String] {
    KEYS_FROM_DB.get().map(Vec::as_slice).unwrap_or(&[])
}

/// Strip one level of surrounding double quotes from a stored value.
fn unquote_config_value(v: &str) -> &str {
    let v = v.trim();
    if v.len() >= 2 && v.starts_with('"') && v.ends_with('"') {
        &v[1..v.len() - 1]
    } else {
        v
    }
}

/// First `start/<name>`, `start/../<name>`, ... that exists.
fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .take(32)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.exists())
}

/// DB pairs worth exporting: known keys that the environment does not already set.
fn db_overrides(
    pairs: Vec<(String, String)>,
    is_set: impl Fn(&str) -> bool,
) -> Vec<(String, String)> {
    pairs
        .into_iter()
        .filter(|(k, _)| env::CONFIG_KEYS.contains(&k.as_str()) && !is_set(k))
        .map(|(k, v)| {
            let v = unquote_config_value(&v).to_string();
            (k, v)
        })
        .collect()
}

/// Load configuration into the process environment; the runtime reads env only.
/// Precedence: process env, project `.env`, `~/.gemi/env`, `~/.gemi/gemi.db`.
/// dotenvy never overrides a variable that is already set, so loading the
/// most specific file first keeps that order.
fn load_gemi_config() {
    if let Some(env_file) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_upwards(&cwd, ".env"))
    {
        let _ = dotenvy::from_path(&env_file);
    }

    let data_dir = gemi_core::db::data_dir();
    let home_env = data_dir.join(app::ENV_FILE);
    if home_env.exists() {
        let _ = dotenvy::from_path(&home_env);
    }

    if data_dir.join(app::DB_FILE).exists() {
        if let Ok(conn) = gemi_core::db::open_db_at(&data_dir) {
            if let Ok(pairs) = gemi_core::db::get_config(&conn) {
                let mut applied = Vec::new();
                for (k, v) in db_overrides(pairs, |k| std::env::var_os(k).is_some()) {
                    // Single-threaded: runs before the tokio runtime starts any workers.
                    unsafe { std::env::set_var(&k, v) };
                    applied.push(k);
                }
                let _ = KEYS_FROM_DB.set(applied);
            }
        }
    }
}

fn main() {
    load_gemi_config();
    let cli = Cli::parse();
    output::init(cli.output);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            output::error(&format!("Failed to start async runtime: {e}"));
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(commands::handle(cli)) {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
