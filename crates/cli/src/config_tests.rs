// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn nested_keys_become_nested_objects() {
    let map = overrides(vars(&[
        ("CODEBUILD__test__nested__variable", "CODEBUILD__test_nested_variable"),
        ("CODEBUILD__test__nested__bool", "true"),
        ("CODEBUILD__test__nested__number", "555"),
        ("PATH", "/usr/bin"),
    ]));

    assert_eq!(
        Value::Object(map),
        json!({
            "test": {
                "nested": {
                    "variable": "CODEBUILD__test_nested_variable",
                    "bool": true,
                    "number": 555
                }
            }
        })
    );
}

#[yare::parameterized(
    boolean = { "false", json!(false) },
    integer = { "42", json!(42) },
    float = { "1.5", json!(1.5) },
    plain = { "main", json!("main") },
    empty = { "", json!("") },
    array = { r#"[{"name":"A","value":"1"}]"#, json!([{ "name": "A", "value": "1" }]) },
)]
fn values_keep_their_json_type(raw: &str, expected: Value) {
    let map = overrides(vars(&[("CODEBUILD__key", raw)]));
    assert_eq!(map["key"], expected);
}

#[test]
fn nested_key_replaces_scalar_parent() {
    let map = overrides(vars(&[
        ("CODEBUILD__source__location", "s3://bucket"),
        ("CODEBUILD__source", "plain"),
    ]));
    assert_eq!(Value::Object(map), json!({ "source": { "location": "s3://bucket" } }));
}

#[test]
fn bare_prefix_is_ignored() {
    let map = overrides(vars(&[("CODEBUILD__", "x"), ("CODEBUILD", "y")]));
    assert!(map.is_empty());
}

#[test]
fn project_name_input_wins() {
    let params = start_params(
        "app",
        vars(&[
            ("CODEBUILD__projectName", "other"),
            ("CODEBUILD__sourceVersion", "main"),
        ]),
    );

    assert_eq!(params.project_name, "app");
    assert!(!params.overrides.contains_key("projectName"));
    assert_eq!(params.overrides["sourceVersion"], "main");
}

#[cfg(unix)]
#[test]
fn non_utf8_variables_are_skipped() {
    use std::os::unix::ffi::OsStringExt;

    let vars = vec![
        (OsString::from("CODEBUILD__sourceVersion"), OsString::from("main")),
        (
            OsString::from("CODEBUILD__binary"),
            OsString::from_vec(b"fo\xffo".to_vec()),
        ),
        (OsString::from_vec(b"UNRELATED_\xff".to_vec()), OsString::from("x")),
    ];

    let params = start_params("app", utf8_vars(vars));

    assert_eq!(Value::Object(params.overrides), json!({ "sourceVersion": "main" }));
}

#[cfg(unix)]
#[test]
fn reading_the_process_env_tolerates_non_utf8_values() {
    use std::os::unix::ffi::OsStrExt;

    let key = "CBR_CONFIG_TEST_NON_UTF8";
    std::env::set_var(key, std::ffi::OsStr::from_bytes(b"fo\xffo"));
    let params = std::panic::catch_unwind(|| start_params_from_env("app"));
    std::env::remove_var(key);

    let params = params.unwrap();
    assert_eq!(params.project_name, "app");
}
