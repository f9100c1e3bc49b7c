mod support;

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

use paddock::testkit::fixture::COMPRESSED_MARKET_DATA;
use support::feed::{rss, FeedServer};

fn paddock() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_paddock"));
    command.env("RUST_LOG", "warn");
    command
}

#[test]
fn decode_prints_one_record_per_runner() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prices.txt");
    fs::write(&input, COMPRESSED_MARKET_DATA).unwrap();

    let output = paddock()
        .args(["decode", "--compact"])
        .arg(&input)
        .args(["--config"])
        .arg(dir.path().join("absent.toml"))
        .output()
        .expect("run paddock");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let runners: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let runners = runners.as_array().unwrap();
    assert_eq!(runners.len(), 13);
    assert_eq!(runners[0]["selection_id"], 4_056_154);
    assert_eq!(runners[0]["best_to_back"][0]["amount_available"], 54.64);
    assert_eq!(runners[11]["vacant"], true);
}

#[test]
fn decode_reads_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = paddock()
        .arg("decode")
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn paddock");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"meta:58805~0~12.5~2.0~~0.0~false~~~|2.0~10.0~L~1~\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let runners: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(runners[0]["selection_id"], 58805);
    assert_eq!(runners[0]["best_to_back"][0]["side"], "L");
}

#[test]
fn decode_failure_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prices.txt");
    fs::write(&input, "meta:1~2~3").unwrap();

    let output = paddock()
        .arg("decode")
        .arg(&input)
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .output()
        .expect("run paddock");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("expected 10"), "{stderr}");
}

#[test]
fn cli_returns_nonzero_on_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[retry]\nmax_retries = 0\n").unwrap();

    let output = paddock()
        .arg("check")
        .arg("--config")
        .arg(&path)
        .output()
        .expect("run paddock");

    assert!(!output.status.success(), "Expected nonzero exit code");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("retry.max_retries"), "{stderr}");
}

#[test]
fn check_summarises_a_valid_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[racing]\nmock_bets = false\n").unwrap();

    let output = paddock()
        .arg("check")
        .arg("--config")
        .arg(&path)
        .output()
        .expect("run paddock");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Mock bets: false"), "{stdout}");
    assert!(stdout.contains("Configuration is valid"), "{stdout}");
}

#[tokio::test(flavor = "multi_thread")]
async fn position_and_winners_query_the_feed() {
    let server = FeedServer::start(200, &rss("Winner(s): Shergar, Dancing Brave")).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        format!("[results]\nfeed_url = \"{}\"\n", server.base_url),
    )
    .unwrap();

    let position = tokio::process::Command::new(env!("CARGO_BIN_EXE_paddock"))
        .env("RUST_LOG", "warn")
        .args(["position", "501", "Dancing Brave", "--config"])
        .arg(&path)
        .output()
        .await
        .expect("run paddock");
    assert!(position.status.success(), "{}", String::from_utf8_lossy(&position.stderr));
    assert_eq!(String::from_utf8_lossy(&position.stdout).trim(), "2");

    let winners = tokio::process::Command::new(env!("CARGO_BIN_EXE_paddock"))
        .env("RUST_LOG", "warn")
        .args(["winners", "501", "--config"])
        .arg(&path)
        .output()
        .await
        .expect("run paddock");
    assert!(winners.status.success(), "{}", String::from_utf8_lossy(&winners.stderr));
    assert_eq!(
        String::from_utf8_lossy(&winners.stdout),
        "1. Shergar\n2. Dancing Brave\n"
    );

    assert_eq!(server.requests().len(), 2);
}
