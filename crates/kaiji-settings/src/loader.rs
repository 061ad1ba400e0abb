//! Settings loading: defaults → JSON file → environment overrides.

use std::path::Path;

use crate::errors::{Result, SettingsError};
use crate::types::KaijiSettings;

/// Deep-merge `overlay` into `base`.
///
/// Objects merge recursively; any other value in `overlay` (including `null`)
/// replaces the corresponding `base` value.
#[must_use]
pub fn deep_merge(base: serde_json::Value, overlay: serde_json::Value) -> serde_json::Value {
    match (base, overlay) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                let _ = base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

/// Load settings from a JSON file path, layered over compiled defaults and
/// under environment overrides, then validated.
///
/// A missing file is not an error — defaults apply. A file that exists but
/// does not parse is an error, since silently ignoring a broken config file
/// would mask operator mistakes.
pub fn load_from_path(path: &Path) -> Result<KaijiSettings> {
    let defaults = serde_json::to_value(KaijiSettings::default())?;

    let merged = if path.exists() {
        let raw = std::fs::read_to_string(path)?;
        let overlay: serde_json::Value = serde_json::from_str(&raw)?;
        deep_merge(defaults, overlay)
    } else {
        tracing::debug!(?path, "no settings file, using defaults");
        defaults
    };

    let mut settings: KaijiSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings, &|key| std::env::var(key).ok());
    settings.validate();
    Ok(settings)
}

/// Apply `KAIJI_*` environment overrides.
///
/// The environment is read through `lookup` so tests can inject values
/// without mutating process state.
pub fn apply_env_overrides(settings: &mut KaijiSettings, lookup: &dyn Fn(&str) -> Option<String>) {
    if let Some(url) = lookup("KAIJI_REGISTRY_BASE_URL") {
        settings.registry.base_url = url;
    }
    if let Some(raw) = lookup("KAIJI_MAX_CONCURRENCY") {
        match raw.parse() {
            Ok(n) => settings.registry.max_concurrency = n,
            Err(_) => tracing::warn!(value = %raw, "ignoring non-numeric KAIJI_MAX_CONCURRENCY"),
        }
    }
    if let Some(url) = lookup("KAIJI_LLM_BASE_URL") {
        settings.llm.base_url = url;
    }
    if let Some(model) = lookup("KAIJI_LLM_MODEL") {
        settings.llm.model = model;
    }
    if let Some(level) = lookup("KAIJI_LOG_LEVEL") {
        settings.logging.level = level;
    }
}

/// Read a required secret from the environment.
///
/// Absence is a [`SettingsError::Missing`] — fatal at startup, no retry.
pub fn require_env(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| SettingsError::Missing {
            key: key.to_owned(),
        })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    // ── deep_merge ───────────────────────────────────────────────────────

    #[test]
    fn merge_disjoint_keys() {
        let a = serde_json::json!({"x": 1});
        let b = serde_json::json!({"y": 2});
        let merged = deep_merge(a, b);
        assert_eq!(merged["x"], 1);
        assert_eq!(merged["y"], 2);
    }

    #[test]
    fn merge_overlay_wins_on_scalars() {
        let a = serde_json::json!({"x": 1});
        let b = serde_json::json!({"x": 9});
        assert_eq!(deep_merge(a, b)["x"], 9);
    }

    #[test]
    fn merge_recurses_into_objects() {
        let a = serde_json::json!({"registry": {"baseUrl": "a", "timeoutSecs": 10}});
        let b = serde_json::json!({"registry": {"baseUrl": "b"}});
        let merged = deep_merge(a, b);
        assert_eq!(merged["registry"]["baseUrl"], "b");
        assert_eq!(merged["registry"]["timeoutSecs"], 10);
    }

    #[test]
    fn merge_array_replaced_whole() {
        let a = serde_json::json!({"xs": [1, 2, 3]});
        let b = serde_json::json!({"xs": [9]});
        assert_eq!(deep_merge(a, b)["xs"], serde_json::json!([9]));
    }

    // ── load_from_path ───────────────────────────────────────────────────

    #[test]
    fn missing_file_yields_defaults() {
        let settings = load_from_path(Path::new("/nonexistent/kaiji.json")).unwrap();
        assert_eq!(settings.registry.max_concurrency, 10);
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"registry": {"maxConcurrency": 3}, "llm": {"model": "gpt-4o"}}"#,
        )
        .unwrap();

        let settings = load_from_path(&path).unwrap();
        assert_eq!(settings.registry.max_concurrency, 3);
        assert_eq!(settings.llm.model, "gpt-4o");
        // Deep merge preserves untouched defaults
        assert_eq!(settings.summarize.max_chunk_tokens, 2000);
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_matches!(load_from_path(&path), Err(SettingsError::Json(_)));
    }

    #[test]
    fn file_values_pass_through_validate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"registry": {"maxConcurrency": 0}}"#).unwrap();
        let settings = load_from_path(&path).unwrap();
        assert_eq!(settings.registry.max_concurrency, 1);
    }

    // ── apply_env_overrides ──────────────────────────────────────────────

    #[test]
    fn env_overrides_take_priority() {
        let mut settings = KaijiSettings::default();
        apply_env_overrides(&mut settings, &|key| match key {
            "KAIJI_REGISTRY_BASE_URL" => Some("http://localhost:9000".into()),
            "KAIJI_MAX_CONCURRENCY" => Some("2".into()),
            "KAIJI_LLM_MODEL" => Some("gpt-test".into()),
            _ => None,
        });
        assert_eq!(settings.registry.base_url, "http://localhost:9000");
        assert_eq!(settings.registry.max_concurrency, 2);
        assert_eq!(settings.llm.model, "gpt-test");
    }

    #[test]
    fn non_numeric_concurrency_ignored() {
        let mut settings = KaijiSettings::default();
        apply_env_overrides(&mut settings, &|key| {
            (key == "KAIJI_MAX_CONCURRENCY").then(|| "many".to_string())
        });
        assert_eq!(settings.registry.max_concurrency, 10);
    }

    #[test]
    fn no_env_no_change() {
        let mut settings = KaijiSettings::default();
        apply_env_overrides(&mut settings, &|_| None);
        assert_eq!(
            settings.registry.base_url,
            KaijiSettings::default().registry.base_url
        );
    }

    // ── require_env ──────────────────────────────────────────────────────

    #[test]
    fn require_env_missing_is_configuration_error() {
        let err = require_env("KAIJI_TEST_SURELY_UNSET_KEY").unwrap_err();
        assert_matches!(err, SettingsError::Missing { key } if key == "KAIJI_TEST_SURELY_UNSET_KEY");
    }
}
