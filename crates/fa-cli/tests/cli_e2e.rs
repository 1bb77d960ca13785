// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! End-to-end runs of the `farmer-assist` binary against the mock backend

use assert_cmd::Command;
use fa_mock_server::{spawn_ephemeral, AppState, MockBackendOptions};
use predicates::prelude::*;
use tempfile::TempDir;

struct Harness {
    base_url: String,
    home: TempDir,
}

impl Harness {
    async fn start(options: MockBackendOptions) -> Self {
        let (base_url, _handle) =
            spawn_ephemeral(AppState::new(options)).await.expect("spawn mock backend");
        Self {
            base_url,
            home: TempDir::new().expect("temp home"),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::cargo_bin("farmer-assist").expect("binary");
        cmd.env("FA_HOME", self.home.path())
            .env_remove("FA_API_BASE_URL")
            .env_remove("RUST_LOG")
            .args(["--api-url", self.base_url.as_str()])
            .args(args);
        cmd
    }
}

async fn run_blocking(mut cmd: Command) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || cmd.assert()).await.expect("join")
}

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("farmer-assist")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("recommend"))
        .stdout(predicate::str::contains("disease"))
        .stdout(predicate::str::contains("yield"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_recommend_prints_cards() {
    let harness = Harness::start(MockBackendOptions::default()).await;
    let cmd = harness.command(&[
        "recommend",
        "--region",
        "Punjab",
        "--soil-type",
        "black",
        "--season",
        "rabi",
    ]);

    run_blocking(cmd)
        .await
        .success()
        .stdout(predicate::str::starts_with("Recommended crops\n\n🌾 Wheat\n"))
        .stderr(predicate::str::contains("Getting crop recommendations..."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_region_fails_without_request() {
    let harness = Harness::start(MockBackendOptions::default()).await;
    run_blocking(harness.command(&["recommend"]))
        .await
        .failure()
        .stderr(predicate::str::contains("Error: Please select a region"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_disease_predict_json_output() {
    let harness = Harness::start(MockBackendOptions {
        disease_model_loaded: true,
        ..Default::default()
    })
    .await;
    let image = harness.home.path().join("leaf.png");
    std::fs::write(&image, [1u8, 2, 3]).unwrap();

    let assert = run_blocking(harness.command(&[
        "--output",
        "json",
        "disease",
        "predict",
        image.to_str().unwrap(),
    ]))
    .await
    .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let body: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(body["prediction"]["disease"], "Early Blight");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_yield_predict_reports_untrained_model() {
    let harness = Harness::start(MockBackendOptions::default()).await;
    run_blocking(harness.command(&[
        "yield", "predict", "--crop", "Rice", "--state", "Punjab", "--season", "Kharif",
    ]))
    .await
    .failure()
    .stderr(predicate::str::contains("Model not trained. Please train the model first."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_config_show_reports_flag_origin() {
    let harness = Harness::start(MockBackendOptions::default()).await;
    run_blocking(harness.command(&["config", "show", "api-base-url", "--show-origin"]))
        .await
        .success()
        .stdout(predicate::str::contains("(from flags)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_yield_status_json_keeps_backend_details() {
    let harness = Harness::start(MockBackendOptions::default()).await;
    let assert = run_blocking(harness.command(&["--output", "json", "yield", "status"]))
        .await
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let body: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(body["is_trained"], false);
    assert_eq!(body["model_type"], "RandomForestRegressor");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health_reports_backend_status() {
    let harness = Harness::start(MockBackendOptions::default()).await;
    run_blocking(harness.command(&["health"]))
        .await
        .success()
        .stdout(predicate::str::contains(": ok"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_zero_timeout_flag_is_rejected() {
    let harness = Harness::start(MockBackendOptions::default()).await;
    run_blocking(harness.command(&["--timeout", "0", "health"]))
        .await
        .failure()
        .stderr(predicate::str::contains("command-line flags"));
}
