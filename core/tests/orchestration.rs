//! Template rendering and checked engine invocation against real files.

use fuelcycle_core::engine::{verify_output_store, EngineCommand};
use fuelcycle_core::error::SweepError;
use fuelcycle_core::render::render_template;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn renders_template_file_to_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("scenario.xml.in");
    let output = dir.path().join("scenario.xml");
    fs::write(
        &template,
        "<control><handle>{{handle}}</handle><cooling>{{cooling_time}}</cooling></control>",
    )
    .unwrap();

    render_template(
        &template,
        &vars(&[("handle", "CT10"), ("cooling_time", "120")]),
        &output,
    )
    .unwrap();

    let rendered = fs::read_to_string(&output).unwrap();
    assert_eq!(
        rendered,
        "<control><handle>CT10</handle><cooling>120</cooling></control>"
    );
}

#[test]
fn unreadable_template_propagates_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = render_template(
        &dir.path().join("no-such.xml.in"),
        &vars(&[]),
        &dir.path().join("out.xml"),
    )
    .unwrap_err();
    assert!(matches!(err, SweepError::Io(_)));
}

#[test]
fn missing_output_store_is_an_engine_failure() {
    let err = verify_output_store(Path::new("/nonexistent/run.sqlite")).unwrap_err();
    assert!(matches!(err, SweepError::EngineFailure { .. }));
}

#[test]
fn empty_output_store_is_an_engine_failure() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("run.sqlite");
    fs::write(&store, b"").unwrap();

    let err = verify_output_store(&store).unwrap_err();
    assert!(matches!(err, SweepError::EngineFailure { ref reason } if reason.contains("empty")));
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn fake_engine(dir: &Path, script_body: &str) -> std::path::PathBuf {
        let path = dir.join("fake-engine.sh");
        fs::write(&path, format!("#!/bin/sh\n{script_body}\n")).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[test]
    fn nonzero_exit_is_an_engine_failure() {
        let dir = tempfile::tempdir().unwrap();
        let engine = fake_engine(dir.path(), "echo 'bad input' >&2; exit 3");

        let err = EngineCommand::new(
            &engine,
            &dir.path().join("in.xml"),
            &dir.path().join("out.sqlite"),
        )
        .run()
        .unwrap_err();

        assert!(
            matches!(err, SweepError::EngineFailure { ref reason } if reason.contains("bad input")),
            "stderr must be surfaced, got {err}"
        );
    }

    #[test]
    fn clean_exit_without_an_output_store_is_still_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let engine = fake_engine(dir.path(), "exit 0");

        let err = EngineCommand::new(
            &engine,
            &dir.path().join("in.xml"),
            &dir.path().join("out.sqlite"),
        )
        .run()
        .unwrap_err();

        assert!(matches!(err, SweepError::EngineFailure { ref reason } if reason.contains("missing")));
    }

    #[test]
    fn engine_that_writes_its_store_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        // $4 is the -o argument: -i <input> -o <output>.
        let engine = fake_engine(dir.path(), "echo data > \"$4\"");
        let out = dir.path().join("out.sqlite");

        EngineCommand::new(&engine, &dir.path().join("in.xml"), &out)
            .run()
            .unwrap();
        assert!(out.exists());
    }
}
