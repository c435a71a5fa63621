//! Environment variable fallbacks.
//!
//! Env vars are **fallback**, not override: they only fill fields that no
//! config file set.

use std::collections::HashMap;

use tracing::debug;

use crate::merge::{ConfigLayer, FieldSources};

/// Mapping from environment variable name to config field path.
struct EnvMapping {
    var_name: &'static str,
    field_path: &'static str,
}

/// All supported `TERN_*` env var mappings.
const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "TERN_ENVIRONMENT",
        field_path: "environment.kind",
    },
    EnvMapping {
        var_name: "TERN_LOCATION_FRAGMENT",
        field_path: "environment.location_fragment",
    },
    EnvMapping {
        var_name: "TERN_LISTEN_ADDR",
        field_path: "server.listen_addr",
    },
    EnvMapping {
        var_name: "TERN_ACCOUNT_ID",
        field_path: "server.account_id",
    },
    EnvMapping {
        var_name: "TERN_STORAGE_PATH",
        field_path: "storage.path",
    },
    EnvMapping {
        var_name: "TERN_REQUEST_TIMEOUT_SECS",
        field_path: "transport.request_timeout_secs",
    },
    EnvMapping {
        var_name: "TERN_LOG_LEVEL",
        field_path: "logging.level",
    },
];

/// Apply environment variable fallbacks to fields that were **not** set by
/// any config file layer.
///
/// Returns the number of env vars applied.
pub fn apply_env_fallbacks<S: ::std::hash::BuildHasher>(
    merged: &mut toml::Value,
    sources: &mut FieldSources,
    env_vars: &HashMap<String, String, S>,
) -> usize {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        if sources
            .get(mapping.field_path)
            .is_some_and(ConfigLayer::is_file)
        {
            continue;
        }

        if let Some(val) = env_vars.get(mapping.var_name) {
            debug!(
                var = mapping.var_name,
                field = mapping.field_path,
                "applying env var fallback"
            );

            if set_field_from_string(merged, mapping.field_path, val) {
                sources.insert(mapping.field_path.to_owned(), ConfigLayer::Environment);
                count = count.saturating_add(1);
            }
        }
    }

    count
}

/// Set a field in the TOML tree from a string value, creating intermediate
/// tables as needed. Returns `false` if a non-table value is in the way.
fn set_field_from_string(root: &mut toml::Value, path: &str, val: &str) -> bool {
    let toml_val = coerce_to_toml_value(path, val);

    let Some((parents, leaf)) = path.rsplit_once('.') else {
        return match root.as_table_mut() {
            Some(table) => {
                table.insert(path.to_owned(), toml_val);
                true
            },
            None => false,
        };
    };

    let mut current = root;
    for segment in parents.split('.') {
        let Some(table) = current.as_table_mut() else {
            return false;
        };
        current = table
            .entry(segment.to_owned())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    match current.as_table_mut() {
        Some(table) => {
            table.insert(leaf.to_owned(), toml_val);
            true
        },
        None => false,
    }
}

/// Attempt to coerce a string env var value to the appropriate TOML type
/// based on the field path.
fn coerce_to_toml_value(path: &str, val: &str) -> toml::Value {
    // Known integer fields.
    if matches!(
        path,
        "transport.connection_timeout_secs" | "transport.request_timeout_secs"
    ) && let Ok(i) = val.parse::<i64>()
    {
        return toml::Value::Integer(i);
    }

    // Known boolean fields.
    if path == "transport.bridge_logging"
        && let Ok(b) = val.parse::<bool>()
    {
        return toml::Value::Boolean(b);
    }

    // Default: string.
    toml::Value::String(val.to_owned())
}

/// Collect all current environment variables into a map.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_apply_env_fallbacks() {
        let mut merged: toml::Value = toml::from_str("[server]\nlisten_addr = \"x\"").unwrap();
        let mut sources = FieldSources::new();
        let env = make_env(&[("TERN_LOG_LEVEL", "debug")]);

        let count = apply_env_fallbacks(&mut merged, &mut sources, &env);

        assert_eq!(count, 1);
        assert_eq!(merged["logging"]["level"].as_str().unwrap(), "debug");
        assert_eq!(
            sources.get("logging.level"),
            Some(&ConfigLayer::Environment)
        );
    }

    #[test]
    fn test_env_fallback_overrides_defaults() {
        let mut merged: toml::Value = toml::from_str("[environment]\nkind = \"native\"").unwrap();
        let mut sources = FieldSources::new();
        sources.insert("environment.kind".to_owned(), ConfigLayer::Defaults);

        let env = make_env(&[("TERN_ENVIRONMENT", "browser")]);
        apply_env_fallbacks(&mut merged, &mut sources, &env);

        assert_eq!(merged["environment"]["kind"].as_str().unwrap(), "browser");
    }

    #[test]
    fn test_env_fallback_skips_file_set_fields() {
        let mut merged: toml::Value = toml::from_str("[logging]\nlevel = \"warn\"").unwrap();
        let mut sources = FieldSources::new();
        sources.insert("logging.level".to_owned(), ConfigLayer::User);

        let env = make_env(&[("TERN_LOG_LEVEL", "debug")]);
        let count = apply_env_fallbacks(&mut merged, &mut sources, &env);

        assert_eq!(count, 0);
        assert_eq!(merged["logging"]["level"].as_str().unwrap(), "warn");
    }

    #[test]
    fn test_set_field_refuses_to_clobber_scalar_parent() {
        let mut merged: toml::Value = toml::from_str("server = 3").unwrap();
        assert!(!set_field_from_string(&mut merged, "server.listen_addr", "x"));
    }

    #[test]
    fn test_coerce_integer() {
        let v = coerce_to_toml_value("transport.request_timeout_secs", "45");
        assert_eq!(v.as_integer().unwrap(), 45);
    }

    #[test]
    fn test_coerce_bool() {
        let v = coerce_to_toml_value("transport.bridge_logging", "false");
        assert!(!v.as_bool().unwrap());
    }

    #[test]
    fn test_coerce_string_default() {
        let v = coerce_to_toml_value("server.listen_addr", "0.0.0.0:1");
        assert_eq!(v.as_str().unwrap(), "0.0.0.0:1");

        // Unparseable numbers stay strings and fail later in deserialization.
        let v = coerce_to_toml_value("transport.request_timeout_secs", "soon");
        assert_eq!(v.as_str().unwrap(), "soon");
    }
}
