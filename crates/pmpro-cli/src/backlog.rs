//! Feature backlog files
//!
//! JSON files hold either an array of drafts or `{"features": [...]}`.
//! TOML files use `[[features]]` tables. Every entry must carry a name and
//! all four criteria.

use anyhow::Context as _;
use pmpro_rice::FeatureDraft;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

#[derive(Deserialize)]
struct TomlBacklog {
    #[serde(default)]
    features: Vec<FeatureDraft>,
}

/// Parse JSON backlog text
///
/// # Errors
/// Text is neither a draft array nor a `features` table.
pub fn parse_json(text: &str) -> anyhow::Result<Vec<FeatureDraft>> {
    let mut backlog: Value = serde_json::from_str(text).context("invalid JSON backlog")?;
    let features = if backlog.get("features").is_some() {
        backlog["features"].take()
    } else {
        backlog
    };
    serde_json::from_value(features).context("invalid feature entry")
}

/// Parse TOML backlog text
///
/// # Errors
/// Invalid TOML or draft fields.
pub fn parse_toml(text: &str) -> anyhow::Result<Vec<FeatureDraft>> {
    let backlog: TomlBacklog = toml::from_str(text).context("invalid TOML backlog")?;
    Ok(backlog.features)
}

/// Load drafts, choosing the format by extension (`.toml`, else JSON)
///
/// # Errors
/// Unreadable file or invalid contents.
pub fn load_drafts(path: &Path) -> anyhow::Result<Vec<FeatureDraft>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read backlog {}", path.display()))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let drafts = if is_toml {
        parse_toml(&text)
    } else {
        parse_json(&text)
    }
    .with_context(|| format!("in {}", path.display()))?;

    tracing::debug!("Loaded {} drafts from {}", drafts.len(), path.display());
    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_array_and_table() {
        let list = parse_json(
            r#"[{"name": "Search", "reach": 8, "impact": 6, "confidence": 7, "effort": 2}]"#,
        )
        .unwrap();
        assert_eq!(list, vec![FeatureDraft::new("Search", 8.0, 6.0, 7.0, 2.0)]);

        let table = parse_json(
            r#"{"features": [
                {"name": "A", "reach": 1, "impact": 1, "confidence": 1, "effort": 1},
                {"name": "B", "reach": 2, "impact": 2, "confidence": 2, "effort": 2}
            ]}"#,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[1].name, "B");
    }

    #[test]
    fn missing_criterion_is_rejected() {
        let err = parse_json(r#"[{"name": "X", "reach": 10, "impact": 10, "confidence": 10}]"#)
            .unwrap_err();
        assert!(format!("{err:#}").contains("missing field `effort`"));

        let err = parse_toml(
            r#"
            [[features]]
            name = "X"
            reach = 10
            effort = 2
            "#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("missing field `impact`"));
    }

    #[test]
    fn toml_features() {
        let drafts = parse_toml(
            r#"
            [[features]]
            name = "Offline mode"
            reach = 6
            impact = 7
            confidence = 5
            effort = 8
            "#,
        )
        .unwrap();
        assert_eq!(drafts[0].name, "Offline mode");
        assert_eq!(drafts[0].effort, 8.0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_json("{\"nope\": 1}").is_err());
        assert!(parse_toml("features = 3").is_err());
    }
}
