//! Probe client tests against stub scripts standing in for the real binary.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use ytdlx_gateway::config::ExtractorConfig;
use ytdlx_gateway::extractor::{
    DownloadOptions, ExtractorError, MediaExtractor, SearchFilters, YtProbe,
};

fn write_stub(dir: &Path, body: &str) -> String {
    let path = dir.join("probe.sh");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.to_str().unwrap().to_string()
}

fn probe_for(binary: String, dir: &Path, timeout_secs: u64) -> YtProbe {
    let config = ExtractorConfig {
        binary,
        timeout_secs,
        proxy: None,
        search_limit: 5,
        extra_args: vec![],
    };
    YtProbe::new(&config, dir.to_str().unwrap())
}

#[tokio::test]
async fn video_info_parses_single_json_document() {
    let dir = tempfile::tempdir().unwrap();
    let binary = write_stub(
        dir.path(),
        r#"echo '{"id":"dQw4w9WgXcQ","title":"Stub video","view_count":42}'"#,
    );
    let probe = probe_for(binary, dir.path(), 10);

    let info = probe.video_info("dQw4w9WgXcQ").await.unwrap();
    assert_eq!(info.id, "dQw4w9WgXcQ");
    assert_eq!(info.title, "Stub video");
    assert_eq!(info.view_count, Some(42));
}

#[tokio::test]
async fn search_parses_one_document_per_line() {
    let dir = tempfile::tempdir().unwrap();
    let binary = write_stub(
        dir.path(),
        concat!(
            r#"echo '{"id":"aaaaaaaaaaa","title":"First","view_count":10}'"#,
            "\n",
            r#"echo '{"id":"bbbbbbbbbbb","title":"Second","view_count":20}'"#,
        ),
    );
    let probe = probe_for(binary, dir.path(), 10);

    let videos = probe
        .search_videos("anything", &SearchFilters::default())
        .await
        .unwrap();
    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0].id, "aaaaaaaaaaa");
    assert_eq!(videos[1].id, "bbbbbbbbbbb");
}

#[tokio::test]
async fn failing_probe_surfaces_rewritten_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let binary = write_stub(
        dir.path(),
        r#"echo 'ERROR: yt-dlp blew up' >&2
exit 1"#,
    );
    let probe = probe_for(binary, dir.path(), 10);

    let err = probe.video_info("dQw4w9WgXcQ").await.unwrap_err();
    assert_eq!(err.to_string(), "ERROR: yt-dlx blew up");
}

#[tokio::test]
async fn stderr_rewrite_ignores_case() {
    let dir = tempfile::tempdir().unwrap();
    let binary = write_stub(
        dir.path(),
        r#"echo 'ERROR: YT-DLP blew up' >&2
exit 1"#,
    );
    let probe = probe_for(binary, dir.path(), 10);

    let err = probe.video_info("dQw4w9WgXcQ").await.unwrap_err();
    assert_eq!(err.to_string(), "ERROR: yt-dlx blew up");
}

#[tokio::test]
async fn stdout_carries_rewritten_tool_name() {
    let dir = tempfile::tempdir().unwrap();
    let binary = write_stub(
        dir.path(),
        r#"echo '{"id":"dQw4w9WgXcQ","title":"fetched via yt-dlp","view_count":1}'"#,
    );
    let probe = probe_for(binary, dir.path(), 10);

    let info = probe.video_info("dQw4w9WgXcQ").await.unwrap();
    assert_eq!(info.title, "fetched via yt-dlx");
}

#[tokio::test]
async fn download_rejects_path_escaping_filename() {
    let dir = tempfile::tempdir().unwrap();
    // The stub must never run; it would leave a marker file if it did
    let marker = dir.path().join("ran");
    let binary = write_stub(dir.path(), &format!("touch {}", marker.display()));
    let probe = probe_for(binary, dir.path(), 10);

    let options = DownloadOptions {
        filename: Some("../../etc/owned".to_string()),
        ..Default::default()
    };
    let err = probe
        .download_lowest("https://www.youtube.com/watch?v=dQw4w9WgXcQ", &options)
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractorError::InvalidFilename(_)));
    assert!(!marker.exists());
}

#[tokio::test]
async fn missing_binary_is_spawn_error() {
    let dir = tempfile::tempdir().unwrap();
    let probe = probe_for("/nonexistent/probe".to_string(), dir.path(), 10);

    let err = probe.probe_version().await.unwrap_err();
    assert!(matches!(err, ExtractorError::Spawn { .. }));
}

#[tokio::test]
async fn slow_probe_times_out() {
    let dir = tempfile::tempdir().unwrap();
    let binary = write_stub(dir.path(), "sleep 5");
    let probe = probe_for(binary, dir.path(), 1);

    let err = probe.probe_version().await.unwrap_err();
    assert!(matches!(err, ExtractorError::Timeout(1)));
}

#[tokio::test]
async fn version_is_cached_after_first_call() {
    let dir = tempfile::tempdir().unwrap();
    // The stub appends to a counter file so repeat invocations are visible
    let counter = dir.path().join("calls");
    let binary = write_stub(
        dir.path(),
        &format!("echo x >> {}\necho '2026.01.01'", counter.display()),
    );
    let probe = probe_for(binary, dir.path(), 10);

    assert_eq!(probe.probe_version().await.unwrap(), "2026.01.01");
    assert_eq!(probe.probe_version().await.unwrap(), "2026.01.01");

    let calls = std::fs::read_to_string(&counter).unwrap();
    assert_eq!(calls.lines().count(), 1);
}

#[tokio::test]
async fn empty_output_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let binary = write_stub(dir.path(), "true");
    let probe = probe_for(binary, dir.path(), 10);

    let err = probe.video_info("dQw4w9WgXcQ").await.unwrap_err();
    assert!(matches!(err, ExtractorError::EmptyOutput));
}
