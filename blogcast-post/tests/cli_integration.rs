//! CLI integration tests for blogcast-post

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const NEW_ROUTES: &str = r#"---
title: "New Routes"
description: "Expanded coverage"
tags: ["Safety", "Birmingham"]
---
We are expanding our school and SEND transport routes across Birmingham.
"#;

const ENV_VARS: &[&str] = &[
    "SITE_URL",
    "LLM_API_KEY",
    "LLM_MODEL",
    "BLOGCAST_LLM_BASE_URL",
    "FACEBOOK_PAGE_ID",
    "FACEBOOK_ACCESS_TOKEN",
    "BLOGCAST_FACEBOOK_API_BASE",
    "LINKEDIN_ORG_ID",
    "LINKEDIN_ACCESS_TOKEN",
    "BLOGCAST_LINKEDIN_API_BASE",
    "BLOGCAST_LOG_FORMAT",
    "BLOGCAST_LOG_LEVEL",
    "RUST_LOG",
];

/// Temp dir holding a blog post and an empty config file
fn setup_test_env() -> (TempDir, String) {
    let temp_dir = TempDir::new().unwrap();
    let post_path = temp_dir.path().join("new-routes.md");
    fs::write(&post_path, NEW_ROUTES).unwrap();
    fs::write(temp_dir.path().join("config.toml"), "[http]\ntimeout_secs = 5\n").unwrap();

    (temp_dir, post_path.to_string_lossy().to_string())
}

/// Command isolated from the caller's environment and config files
fn blogcast_post(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("blogcast-post").unwrap();
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.current_dir(temp_dir.path())
        .env("BLOGCAST_CONFIG", temp_dir.path().join("config.toml"));
    cmd
}

fn with_facebook_credentials(cmd: &mut Command) -> &mut Command {
    cmd.env("FACEBOOK_PAGE_ID", "1234567890")
        .env("FACEBOOK_ACCESS_TOKEN", "fb-test-token")
}

#[test]
fn test_help_flag_output() {
    let mut cmd = Command::cargo_bin("blogcast-post").unwrap();

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generate and publish a social post"))
        .stdout(predicate::str::contains("--post"))
        .stdout(predicate::str::contains("--platform"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--log-format"));
}

#[test]
fn test_dry_run_facebook_succeeds_without_llm_key() {
    let (temp_dir, post) = setup_test_env();
    let mut cmd = blogcast_post(&temp_dir);

    with_facebook_credentials(&mut cmd)
        .args(["--post", &post, "--platform", "facebook", "--dry-run"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Title: New Routes"))
        .stderr(predicate::str::contains(
            "https://www.afjltd.co.uk/blog/new-routes",
        ))
        .stderr(predicate::str::contains("DRY RUN"))
        .stderr(predicate::str::contains("New on the AFJ blog: New Routes"))
        .stderr(predicate::str::contains("Done."));
}

#[test]
fn test_dry_run_never_logs_access_token() {
    let (temp_dir, post) = setup_test_env();
    let mut cmd = blogcast_post(&temp_dir);

    with_facebook_credentials(&mut cmd)
        .args(["--post", &post, "--platform", "facebook", "--dry-run"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[REDACTED]"))
        .stderr(predicate::str::contains("fb-test-token").not());
}

#[test]
fn test_site_url_override() {
    let (temp_dir, post) = setup_test_env();
    let mut cmd = blogcast_post(&temp_dir);

    with_facebook_credentials(&mut cmd)
        .env("SITE_URL", "https://example.org/")
        .args(["--post", &post, "--platform", "facebook", "--dry-run"])
        .assert()
        .success()
        .stderr(predicate::str::contains("https://example.org/blog/new-routes"));
}

#[test]
fn test_missing_post_file_exits_1() {
    let (temp_dir, _) = setup_test_env();
    let mut cmd = blogcast_post(&temp_dir);

    with_facebook_credentials(&mut cmd)
        .args(["--post", "does-not-exist.md", "--platform", "facebook", "--dry-run"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_missing_credentials_exits_1() {
    let (temp_dir, post) = setup_test_env();

    blogcast_post(&temp_dir)
        .args(["--post", &post, "--platform", "facebook", "--dry-run"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("FACEBOOK_PAGE_ID"))
        .stderr(predicate::str::contains("FACEBOOK_ACCESS_TOKEN"));
}

#[test]
fn test_missing_linkedin_credentials_exits_1() {
    let (temp_dir, post) = setup_test_env();

    blogcast_post(&temp_dir)
        .env("LINKEDIN_ORG_ID", "98765")
        .args(["--post", &post, "--platform", "linkedin"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("LINKEDIN_ACCESS_TOKEN must be set for LinkedIn"));
}

#[test]
fn test_unreachable_platform_exits_1() {
    let (temp_dir, post) = setup_test_env();
    let mut cmd = blogcast_post(&temp_dir);

    with_facebook_credentials(&mut cmd)
        .env("BLOGCAST_FACEBOOK_API_BASE", "http://127.0.0.1:1")
        .args(["--post", &post, "--platform", "facebook"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_unreachable_llm_falls_back() {
    let (temp_dir, post) = setup_test_env();
    let mut cmd = blogcast_post(&temp_dir);

    with_facebook_credentials(&mut cmd)
        .env("LLM_API_KEY", "sk-test")
        .env("BLOGCAST_LLM_BASE_URL", "http://127.0.0.1:1")
        .args(["--post", &post, "--platform", "facebook", "--dry-run"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Using fallback template"))
        .stderr(predicate::str::contains("New on the AFJ blog: New Routes"));
}

#[test]
fn test_invalid_platform_rejected() {
    let (temp_dir, post) = setup_test_env();

    blogcast_post(&temp_dir)
        .args(["--post", &post, "--platform", "mastodon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown platform"));
}

#[test]
fn test_json_log_format() {
    let (temp_dir, post) = setup_test_env();
    let mut cmd = blogcast_post(&temp_dir);

    with_facebook_credentials(&mut cmd)
        .args([
            "--post",
            &post,
            "--platform",
            "facebook",
            "--dry-run",
            "--log-format",
            "json",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("\"level\":\"INFO\""));
}
