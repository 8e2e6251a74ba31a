//! Configuration loading

use std::fs;
use std::path::Path;

use crate::error::{SelectionError, SelectionResult};

use super::types::{ConfigWarning, SelectionConfig};

const KNOWN_KEYS: &[&str] = &["auto_select", "single_select"];

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> SelectionResult<(SelectionConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: SelectionConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| SelectionError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            log::warn!("unknown configuration key '{}' in {}", key, path.display());
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Apply environment variable overrides (SELTREE_* prefix)
pub fn with_env_overrides(config: SelectionConfig) -> SelectionConfig {
    apply_overrides(config, |name| std::env::var(name).ok())
}

pub(super) fn apply_overrides(
    mut config: SelectionConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> SelectionConfig {
    // SELTREE_AUTO_SELECT
    if let Some(val) = lookup("SELTREE_AUTO_SELECT") {
        config.auto_select = parse_flag(&val);
    }

    // SELTREE_SINGLE_SELECT
    if let Some(val) = lookup("SELTREE_SINGLE_SELECT") {
        config.single_select = parse_flag(&val);
    }

    config
}

fn parse_flag(val: &str) -> bool {
    val.to_lowercase() != "false" && val != "0"
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    let normalized = unknown.replace('-', "_").to_lowercase();

    let mut best: Option<(&str, usize)> = None;
    for &candidate in KNOWN_KEYS {
        let dist = levenshtein(&normalized, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
