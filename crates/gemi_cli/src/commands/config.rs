//! `gemi config` subcommands: settings in the `~/.gemi/gemi.db` config table.

use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};

use gemi_client::BackendConfig;
use gemi_constant::{defaults, env};
use gemi_runtime::RuntimeConfig;
use gemi_tui::Appearance;

use crate::cli::ConfigAction;
use crate::output;

const LIST_HEADERS: &[&str] = &["Key", "Value", "Source"];

pub fn handle(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Set { key, value } => set(&key, &value),
        ConfigAction::List => list(),
    }
}

fn set(key: &str, value: &str) -> Result<()> {
    let key = normalize_key(key)?;
    let value = validate_value(key, value)?;

    let conn = gemi_core::db::open_db().context("open config store")?;
    gemi_core::db::set_config(&conn, key, &value)?;
    output::success(&format!("Saved {} = {}", key, value));

    if std::env::var_os(key).is_some() && !crate::keys_from_db().iter().any(|k| k == key) {
        output::warning(&format!("{} is also set in the environment, which takes precedence.", key));
    }
    Ok(())
}

fn list() -> Result<()> {
    let conn = gemi_core::db::open_db().context("open config store")?;
    let stored = gemi_core::db::get_config(&conn)?;
    let from_db = crate::keys_from_db();

    let rows: Vec<Vec<String>> = env::CONFIG_KEYS
        .iter()
        .map(|key| {
            let stored_value = stored.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone());
            let (value, source) = match std::env::var(key) {
                Ok(v) if from_db.iter().any(|k| k == key) => (v, "db"),
                Ok(v) => (v, "env"),
                Err(_) => match stored_value {
                    Some(v) => (v, "db"),
                    None => (default_value(key), "default"),
                },
            };
            vec![key.to_string(), value, source.to_string()]
        })
        .collect();

    output::header("Configuration");
    let mut table = output::table(LIST_HEADERS);
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        output::table_row(&mut table, &cells);
    }
    output::table_print(&table, LIST_HEADERS, &rows);
    Ok(())
}

/// Known key for `raw`, matched case-insensitively.
fn normalize_key(raw: &str) -> Result<&'static str> {
    let wanted = raw.trim();
    env::CONFIG_KEYS
        .iter()
        .copied()
        .find(|k| k.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            anyhow!(
                "Unknown setting '{}'. Available: {}",
                raw,
                env::CONFIG_KEYS.join(", ")
            )
        })
}

/// Check `value` the way the reader of `key` will, and return what to store.
fn validate_value(key: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        bail!("{} needs a value", key);
    }
    match key {
        env::API_BASE_URL => {
            let config = BackendConfig::new(value);
            config.validate()?;
            Ok(config.base_url)
        }
        env::REQUEST_TIMEOUT_SECS => match value.parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs.to_string()),
            _ => bail!("{} must be a positive number of seconds", key),
        },
        env::REVEAL_TICK_MS => {
            let ms: u64 = value
                .parse()
                .map_err(|_| anyhow!("{} must be milliseconds", key))?;
            let clamped = RuntimeConfig::new().with_reveal_tick(Duration::from_millis(ms)).reveal_tick;
            if clamped.as_millis() as u64 != ms {
                output::warning(&format!(
                    "{} is clamped to {}..={} ms; {} ms will be used",
                    key,
                    defaults::REVEAL_TICK_MIN_MS,
                    defaults::REVEAL_TICK_MAX_MS,
                    clamped.as_millis()
                ));
            }
            Ok(ms.to_string())
        }
        env::APPEARANCE => {
            let appearance: Appearance = value.parse().map_err(|e: String| anyhow!(e))?;
            Ok(if appearance.is_light() { "light" } else { "dark" }.to_string())
        }
        _ => Ok(value.to_string()),
    }
}

fn default_value(key: &str) -> String {
    match key {
        env::API_BASE_URL => defaults::API_BASE_URL.to_string(),
        env::REQUEST_TIMEOUT_SECS => defaults::REQUEST_TIMEOUT_SECS.to_string(),
        env::REVEAL_TICK_MS => defaults::REVEAL_TICK_MS.to_string(),
        env::DOWNLOAD_DIR => RuntimeConfig::default().download_dir.display().to_string(),
        env::APPEARANCE => "dark".to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_match_case_insensitively() {
        assert_eq!(normalize_key("gemi_api_base_url").unwrap(), env::API_BASE_URL);
        assert!(normalize_key("OPENAI_API_KEY").is_err());
    }

    #[test]
    fn base_url_is_validated_and_trimmed() {
        assert_eq!(
            validate_value(env::API_BASE_URL, " http://10.0.0.2:5000/api/ ").unwrap(),
            "http://10.0.0.2:5000/api"
        );
        assert!(validate_value(env::API_BASE_URL, "ftp://x").is_err());
    }

    #[test]
    fn numbers_are_checked() {
        assert!(validate_value(env::REQUEST_TIMEOUT_SECS, "0").is_err());
        assert!(validate_value(env::REQUEST_TIMEOUT_SECS, "soon").is_err());
        assert_eq!(validate_value(env::REQUEST_TIMEOUT_SECS, "30").unwrap(), "30");
        assert_eq!(validate_value(env::REVEAL_TICK_MS, "20").unwrap(), "20");
        assert!(validate_value(env::REVEAL_TICK_MS, "-5").is_err());
    }

    #[test]
    fn appearance_is_normalized() {
        assert_eq!(validate_value(env::APPEARANCE, "Light").unwrap(), "light");
        assert!(validate_value(env::APPEARANCE, "sepia").is_err());
    }

    #[test]
    fn blank_values_are_rejected() {
        assert!(validate_value(env::DOWNLOAD_DIR, "  ").is_err());
    }

    #[test]
    fn every_key_has_a_default() {
        for key in env::CONFIG_KEYS {
            assert!(!default_value(key).is_empty(), "{key}");
        }
    }
}
