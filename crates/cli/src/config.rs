// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Start parameters from `CODEBUILD__*` environment variables
//!
//! `CODEBUILD__sourceVersion=main` becomes `{"sourceVersion": "main"}` and
//! every further `__` opens a nested object. Values that parse as JSON keep
//! their type, anything else is a string.

use cbr_core::StartParams;
use serde_json::{Map, Value};
use std::ffi::OsString;

pub const OVERRIDE_PREFIX: &str = "CODEBUILD__";
const SEPARATOR: &str = "__";

/// Start parameters for `project_name` with overrides from the process env
pub fn start_params_from_env(project_name: &str) -> StartParams {
    start_params(project_name, utf8_vars(std::env::vars_os()))
}

/// Variables whose name and value are both valid UTF-8
pub fn utf8_vars<I>(vars: I) -> impl Iterator<Item = (String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (key, _) => {
                tracing::debug!(key = ?key, "skipping non-UTF-8 environment variable");
                None
            }
        })
}

pub fn start_params<I>(project_name: &str, vars: I) -> StartParams
where
    I: IntoIterator<Item = (String, String)>,
{
    StartParams::new(project_name, overrides(vars))
}

/// Nested override map from `CODEBUILD__`-prefixed variables
pub fn overrides<I>(vars: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut vars: Vec<(String, String)> = vars
        .into_iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(OVERRIDE_PREFIX)
                .map(|path| (path.to_string(), value))
        })
        .collect();
    // Parents sort before their children, so a nested key replaces a scalar
    vars.sort();

    let mut root = Map::new();
    'vars: for (path, raw) in vars {
        let keys: Vec<&str> = path.split(SEPARATOR).filter(|k| !k.is_empty()).collect();
        let Some((leaf, parents)) = keys.split_last() else {
            tracing::debug!(path = %path, "ignoring override without a key");
            continue;
        };

        let mut node = &mut root;
        for key in parents {
            let entry = node
                .entry(key.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            let Value::Object(next) = entry else {
                continue 'vars;
            };
            node = next;
        }
        node.insert(leaf.to_string(), parse_value(&raw));
    }
    root
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
