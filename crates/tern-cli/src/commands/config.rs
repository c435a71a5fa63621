//! `tern config`: print the resolved configuration.

use std::fmt::Write as _;

use anyhow::Result;
use tern_config::ResolvedConfig;

use crate::theme::Theme;

/// Render `resolved` as TOML, annotating each field with the layer that set it.
pub(crate) fn render(resolved: &ResolvedConfig) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "# Resolved tern configuration")?;
    writeln!(out, "# Source annotations: [defaults] [user] [explicit] [environment]")?;
    if resolved.loaded_files.is_empty() {
        writeln!(out, "# (defaults and environment only)")?;
    } else {
        writeln!(out, "#\n# Loaded files (in precedence order):")?;
        for (i, path) in resolved.loaded_files.iter().enumerate() {
            writeln!(out, "#   {}. {path}", i.saturating_add(1))?;
        }
    }
    out.push('\n');

    let body = toml::to_string_pretty(&resolved.config)?;
    let mut section = String::new();
    for line in body.lines() {
        let trimmed = line.trim();
        if let Some(name) = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            name.clone_into(&mut section);
        }
        match annotate(resolved, &section, trimmed) {
            Some(layer) => writeln!(out, "{line}  # [{layer}]")?,
            None => writeln!(out, "{line}")?,
        }
    }
    Ok(out)
}

/// Source of the `key = value` field on `line` under `[section]`, if tracked.
fn annotate(resolved: &ResolvedConfig, section: &str, line: &str) -> Option<String> {
    if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
        return None;
    }
    let key = line.split('=').next()?.trim();
    let path = if section.is_empty() {
        key.to_owned()
    } else {
        format!("{section}.{key}")
    };
    resolved.source_of(&path).map(ToString::to_string)
}

/// Print the resolved configuration.
pub(crate) fn show_config(resolved: &ResolvedConfig) -> Result<()> {
    println!("{}", Theme::header("Configuration"));
    print!("{}", render(resolved)?);
    Ok(())
}
