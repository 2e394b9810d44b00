//! Integration tests for CLI argument handling
//!
//! Runs the skyrating binary against a mock server and checks its output and
//! exit status.

use std::process::Command;

use mockito::{Matcher, Server};

/// Helper to run the CLI with given args and environment, capturing output
fn run_cli_with_env(args: &[&str], vars: &[(&str, &str)]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_skyrating"))
        .args(args)
        .env_remove("SKYRATING_API_URL")
        .env_remove("SKYRATING_PROXY_URL")
        .env_remove("SKYRATING_CACHE_TTL")
        .env_remove("SKYRATING_TIMEOUT_SECS")
        .env_remove("RUST_LOG")
        .envs(vars.iter().copied())
        .output()
        .expect("Failed to execute skyrating")
}

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    run_cli_with_env(args, &[])
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("skyrating"), "Help should mention skyrating");
    assert!(stdout.contains("load"), "Help should mention the load command");
    assert!(stdout.contains("rate"), "Help should mention the rate command");
}

#[test]
fn test_missing_command_fails() {
    let output = run_cli(&[]);
    assert!(!output.status.success());
}

#[test]
fn test_invalid_rating_prints_error_and_exits() {
    let output = run_cli(&["rate", "--collection", "movies", "--id", "a", "--rating", "lots"]);
    assert!(!output.status.success(), "Expected invalid rating to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid rating"),
        "Should print error message about invalid rating: {}",
        stderr
    );
}

#[test]
fn test_load_prints_ratings_as_json() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/proxy")
        .match_query(Matcher::UrlEncoded("keys".into(), "a,b".into()))
        .with_status(200)
        .with_body(r#"{"data":{"b":{"count":1,"rating":"5"},"a":{"count":2,"rating":"3.5"}}}"#)
        .create();
    let proxy_url = format!("{}/proxy", server.url());

    let output = run_cli(&[
        "--proxy-url",
        &proxy_url,
        "load",
        "--collection",
        "movies",
        "--ids",
        "a,b",
    ]);

    mock.assert();
    assert!(output.status.success());
    let printed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(printed["a"]["count"], 2);
    assert_eq!(printed["b"]["rating"], "5");
}

#[test]
fn test_proxy_url_is_read_from_environment() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/env-proxy")
        .match_query(Matcher::UrlEncoded("keys".into(), "a".into()))
        .with_status(200)
        .with_body(r#"{"data":{"a":{"count":4,"rating":"2.5"}}}"#)
        .create();
    let proxy_url = format!("{}/env-proxy", server.url());

    let output = run_cli_with_env(
        &["load", "--collection", "movies", "--ids", "a"],
        &[("SKYRATING_PROXY_URL", proxy_url.as_str()), ("SKYRATING_TIMEOUT_SECS", "5")],
    );

    mock.assert();
    assert!(output.status.success());
    let printed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(printed["a"]["count"], 4);
}

#[test]
fn test_malformed_timeout_in_environment_is_rejected() {
    let output = run_cli_with_env(
        &["load", "--collection", "movies", "--ids", "a"],
        &[("SKYRATING_TIMEOUT_SECS", "an hour")],
    );

    assert!(!output.status.success(), "A malformed timeout must not be ignored");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("an hour"),
        "Should name the rejected value: {}",
        stderr
    );
}

#[test]
fn test_load_failure_prints_empty_object() {
    let mut server = Server::new();
    server
        .mock("GET", "/proxy")
        .match_query(Matcher::Any)
        .with_status(502)
        .create();
    let proxy_url = format!("{}/proxy", server.url());

    let output = run_cli(&["--proxy-url", &proxy_url, "load", "--collection", "movies", "--ids", "a"]);

    assert!(output.status.success(), "Reads degrade instead of failing");
    let printed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(printed, serde_json::json!({}));
}

#[test]
fn test_rate_failure_prints_normalized_error() {
    let mut server = Server::new();
    server
        .mock("POST", "/api")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"message":"unknown collection"}"#)
        .create();
    let api_url = format!("{}/api", server.url());

    let output = run_cli(&[
        "--api-url",
        &api_url,
        "rate",
        "--collection",
        "nope",
        "--id",
        "a",
        "--rating",
        "3",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    let start = stderr.find('{').expect("stderr should contain the error object");
    let reported: serde_json::Value =
        serde_json::from_str(stderr[start..].trim()).expect("error object should be JSON");
    assert_eq!(reported["error"]["code"], 404);
    assert_eq!(
        reported["error"]["title"],
        "Failed to post rating - Request failed with status code 404"
    );
    assert_eq!(reported["meta"]["response"]["data"]["message"], "unknown collection");
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use skyrating::cli::{parse_rating_arg, Cli, Command};

    #[test]
    fn test_cli_load_with_proxy_ttl() {
        let cli = Cli::parse_from([
            "skyrating",
            "load",
            "--collection",
            "books",
            "--ids",
            "x",
            "--proxy-ttl",
            "0",
        ]);
        match cli.command {
            Command::Load { proxy_ttl, ids, .. } => {
                assert_eq!(proxy_ttl, 0);
                assert_eq!(ids, vec!["x".to_string()]);
            }
            other => panic!("Expected load, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rating_arg_rejects_negative() {
        assert!(parse_rating_arg("-2").is_err());
    }

    #[test]
    fn test_rate_requires_rating() {
        let result = Cli::try_parse_from(["skyrating", "rate", "--collection", "movies", "--id", "a"]);
        assert!(result.is_err());
    }
}
