#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
//! End-to-end behaviour of single line declarations against real files.
//!
//! Each test builds a [`FileLineResource`] through the same path a manifest
//! entry takes and checks the exact bytes left on disk.

mod common;

use common::IntegrationTestContext;
use file_line::config::file_lines::{Flag, FileLineOptions};
use file_line::error::FileLineError;
use file_line::resources::file_line::FileLineResource;
use file_line::resources::{Resource, ResourceChange};

fn resource(path: &std::path::Path, line: &str, tweak: impl FnOnce(&mut FileLineOptions)) -> FileLineResource {
    let mut options = FileLineOptions {
        path: path.display().to_string(),
        line: line.to_string(),
        ..FileLineOptions::default()
    };
    tweak(&mut options);
    FileLineResource::from_entry(&options.validate().unwrap()).unwrap()
}

#[test]
fn append_twice_is_idempotent() {
    let ctx = IntegrationTestContext::new();
    let path = ctx.write_file("f", "foo1\nfoo2");
    let r = resource(&path, "foo", |_| {});
    assert_eq!(r.apply().unwrap(), ResourceChange::Applied);
    assert_eq!(r.apply().unwrap(), ResourceChange::AlreadyCorrect);
    assert_eq!(ctx.read(&path), "foo1\nfoo2\nfoo\n");
}

#[test]
fn file_containing_line_stays_byte_identical() {
    let ctx = IntegrationTestContext::new();
    let original = "foo1\r\nfoo = bar\nfoo2";
    let path = ctx.write_file("f", original);
    let r = resource(&path, "foo = bar", |o| o.match_pattern = Some(r"^foo\s*=.*$".into()));
    assert!(r.exists());
    assert_eq!(r.apply().unwrap(), ResourceChange::AlreadyCorrect);
    assert_eq!(ctx.read(&path), original);
}

#[test]
fn multiple_matches_fail_without_multiple() {
    let ctx = IntegrationTestContext::new();
    let original = "foo1\nfoo=blah\nfoo2\nfoo=baz";
    let path = ctx.write_file("f", original);
    let r = resource(&path, "foo = bar", |o| o.match_pattern = Some(r"^foo\s*=.*$".into()));
    let err = r.apply().unwrap_err();
    let err = err.downcast::<FileLineError>().unwrap();
    assert!(matches!(err, FileLineError::MultipleMatches { count: 2, .. }), "got {err:?}");
    assert_eq!(ctx.read(&path), original);
}

#[test]
fn multiple_matches_replaced_with_multiple() {
    let ctx = IntegrationTestContext::new();
    let path = ctx.write_file("f", "foo1\nfoo=blah\nfoo2\nfoo=baz");
    let r = resource(&path, "foo = bar", |o| {
        o.match_pattern = Some(r"^foo\s*=.*$".into());
        o.multiple = Some(Flag::Text("true".into()));
    });
    r.apply().unwrap();
    assert_eq!(ctx.read(&path), "foo1\nfoo = bar\nfoo2\nfoo = bar\n");
}

#[test]
fn backreference_expands_captured_group() {
    let ctx = IntegrationTestContext::new();
    let path = ctx.write_file("f", "foo1\nfoo=blah\nfoo2");
    let r = resource(&path, r"foo = \1.bar", |o| o.match_pattern = Some(r"^foo\s*=(.*)$".into()));
    r.apply().unwrap();
    assert_eq!(ctx.read(&path), "foo1\nfoo = blah.bar\nfoo2\n");
}

#[test]
fn unless_suppresses_replacement() {
    let ctx = IntegrationTestContext::new();
    let path = ctx.write_file("f", "foo1\nfoo = blah.bar\nfoo2");
    let r = resource(&path, r"foo = \1.bar", |o| {
        o.match_pattern = Some(r"^foo\s*=\s*(\w+)".into());
        o.unless = Some("blah.bar".into());
    });
    r.apply().unwrap();
    assert_eq!(ctx.read(&path), "foo1\nfoo = blah.bar\nfoo2");
}

#[test]
fn after_with_multiple_inserts_after_every_anchor() {
    let ctx = IntegrationTestContext::new();
    let path = ctx.write_file("f", "foo1\nfoo = blah\nfoo2\nfoo1\nfoo = baz");
    let r = resource(&path, "inserted = line", |o| {
        o.after = Some("^foo1$".into());
        o.multiple = Some(Flag::Bool(true));
    });
    r.apply().unwrap();
    assert_eq!(
        ctx.read(&path),
        "foo1\ninserted = line\nfoo = blah\nfoo2\nfoo1\ninserted = line\nfoo = baz\n"
    );
}

#[test]
fn match_with_after_fallback_inserts_once() {
    let ctx = IntegrationTestContext::new();
    let path = ctx.write_file("f", "foo1\nfoo2\nfoo1\n");
    let r = resource(&path, "inserted = line", |o| {
        o.match_pattern = Some("^inserted".into());
        o.after = Some("^foo1$".into());
        o.multiple = Some(Flag::Text("true".into()));
    });
    r.apply().unwrap();
    assert_eq!(ctx.read(&path), "foo1\ninserted = line\nfoo2\nfoo1\n");
}

#[test]
fn removal_drops_every_occurrence() {
    let ctx = IntegrationTestContext::new();
    let path = ctx.write_file("f", "foo1\nfoo\nfoo2\nfoo\nfoo");
    let r = resource(&path, "foo", |o| o.ensure = Some("absent".into()));
    assert_eq!(r.apply().unwrap(), ResourceChange::Applied);
    assert_eq!(ctx.read(&path), "foo1\nfoo2\n");
}

#[test]
fn no_match_appends() {
    let ctx = IntegrationTestContext::new();
    let path = ctx.write_file("f", "foo1\nfoo2");
    let r = resource(&path, "foo = bar", |o| o.match_pattern = Some(r"^foo\s*=.*$".into()));
    r.apply().unwrap();
    assert_eq!(ctx.read(&path), "foo1\nfoo2\nfoo = bar\n");
}

#[test]
fn no_match_with_no_append_leaves_file() {
    let ctx = IntegrationTestContext::new();
    let path = ctx.write_file("f", "foo1\nfoo2");
    let r = resource(&path, "foo = bar", |o| {
        o.match_pattern = Some(r"^foo\s*=.*$".into());
        o.no_append = Some(Flag::Text("true".into()));
    });
    assert_eq!(r.apply().unwrap(), ResourceChange::AlreadyCorrect);
    assert_eq!(ctx.read(&path), "foo1\nfoo2");
}

#[test]
fn missing_file_is_created_on_present() {
    let ctx = IntegrationTestContext::new();
    let path = ctx.path("conf.d").join("new.conf");
    let r = resource(&path, "enabled = true", |_| {});
    assert!(!r.exists());
    r.apply().unwrap();
    assert_eq!(ctx.read(&path), "enabled = true\n");
}

#[test]
fn invalid_pattern_is_reported() {
    let options = FileLineOptions {
        path: "/etc/app.conf".to_string(),
        line: "x".to_string(),
        after: Some("[unclosed".to_string()),
        ..FileLineOptions::default()
    };
    let err = FileLineResource::from_entry(&options.validate().unwrap()).unwrap_err();
    assert!(matches!(err, FileLineError::InvalidPattern { .. }), "got {err:?}");
}
