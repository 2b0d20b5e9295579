// tests/session.rs

//! Patch-once behavior of build sessions.

mod common;

use common::{Call, Fixture, RecordingToolchain};
use std::fs;
use std::sync::Arc;
use vorbis_recipe::Error;

#[test]
fn test_patch_applied_once_per_folder() {
    let fixture = Fixture::new();
    let toolchain = Arc::new(RecordingToolchain::new());
    let mut session = fixture.session(toolchain.clone());
    let source = fixture.working_dir.join("libvorbis_source_win10");

    assert!(session.patch_sources(&source, &fixture.working_dir, "_win10").unwrap());
    assert!(!session.patch_sources(&source, &fixture.working_dir, "_win10").unwrap());

    assert_eq!(toolchain.patch_calls(), 1);
    assert!(session.is_patched(&source));
}

#[test]
fn test_patch_runs_from_working_dir() {
    let fixture = Fixture::new();
    let toolchain = Arc::new(RecordingToolchain::new());
    let mut session = fixture.session(toolchain.clone());
    let source = fixture.working_dir.join("libvorbis_source_win10");

    session.patch_sources(&source, &fixture.working_dir, "_win10").unwrap();

    let calls = toolchain.calls();
    let Call::Patch { patch, cwd } = &calls[0] else {
        panic!("expected a patch call, got {:?}", calls);
    };
    assert!(patch.is_absolute());
    assert!(patch.ends_with("patch_win10.diff"));
    assert_eq!(cwd, &fixture.working_dir);
}

#[test]
fn test_distinct_folders_are_patched_separately() {
    let fixture = Fixture::new();
    let toolchain = Arc::new(RecordingToolchain::new());
    let mut session = fixture.session(toolchain.clone());

    let first = fixture.working_dir.join("libvorbis_source_win10");
    let second = fixture.temp.path().join("other/libvorbis_source_win10");
    session.patch_sources(&first, &fixture.working_dir, "_win10").unwrap();
    session.patch_sources(&second, &fixture.working_dir, "_win10").unwrap();

    assert_eq!(toolchain.patch_calls(), 2);
}

#[test]
fn test_new_session_does_not_inherit_patch_cache() {
    let fixture = Fixture::new();
    let toolchain = Arc::new(RecordingToolchain::new());
    let source = fixture.working_dir.join("libvorbis_source_win10");

    let mut first = fixture.session(toolchain.clone());
    first.patch_sources(&source, &fixture.working_dir, "_win10").unwrap();

    let mut second = fixture.session(toolchain.clone());
    assert!(!second.is_patched(&source));
    second.patch_sources(&source, &fixture.working_dir, "_win10").unwrap();

    assert_eq!(toolchain.patch_calls(), 2);
}

#[test]
fn test_missing_patch_file_is_fatal() {
    let fixture = Fixture::new();
    fs::remove_file(fixture.patch_dir.join("patch_win10.diff")).unwrap();
    let toolchain = Arc::new(RecordingToolchain::new());
    let mut session = fixture.session(toolchain.clone());
    let source = fixture.working_dir.join("libvorbis_source_win10");

    let result = session.patch_sources(&source, &fixture.working_dir, "_win10");

    assert!(matches!(result, Err(Error::NotFound(ref msg)) if msg.contains("patch_win10.diff")));
    assert_eq!(toolchain.patch_calls(), 0);
    assert!(!session.is_patched(&source));
}

#[test]
fn test_vs_env_prepends_include() {
    let fixture = Fixture::new();
    let toolchain = Arc::new(RecordingToolchain::new());
    let session = fixture.session(toolchain);
    let ogg = fixture.temp.path().join("thirdparty/libogg/libogg_source/include");

    let env = session
        .vs_env_with_include(vorbis_recipe::VsVersion::Vs2013, vorbis_recipe::VsArch::X86, &ogg)
        .unwrap();

    assert_eq!(
        env.get("INCLUDE"),
        Some(format!("{};C:\\VC\\include", ogg.display()).as_str())
    );
}
