//! Narrator CLI - render the Beacon narration clips.
//!
//! ```bash
//! CARTESIA_API_KEY=sk_car_... narrator
//! ```

#![allow(clippy::print_stdout)] // CLI program intentionally uses stdout

use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use narrator::audio::kilobytes;
use narrator::prelude::*;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Narrator - pre-render narration audio with Cartesia
#[derive(Parser)]
#[command(name = "narrator")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every missing clip (default)
    Generate,

    /// Show which clips exist and whether the API key is set
    Status,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            let msg = format!("failed to create tokio runtime: {e}");
            report_fatal(&mut std::io::stderr(), &msg);
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_fatal(&mut std::io::stderr(), &e);
            ExitCode::FAILURE
        }
    }
}

/// Write a fatal error to `out`.
///
/// Fatal errors bypass the log filter so `RUST_LOG=off` cannot hide them.
fn report_fatal(out: &mut impl Write, err: &dyn std::fmt::Display) {
    let _ = writeln!(out, "Error: {err}");
}

/// Initialize logging with the given verbosity level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "narrator={level},narrator_cli={level},{}",
            if verbosity >= 2 { "debug" } else { "warn" }
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Commands::Generate) {
        Commands::Generate => {
            cmd_generate(CartesiaConfig::from_env(), RunnerConfig::default()).await?;
            Ok(())
        }
        Commands::Status => cmd_status().await,
    }
}

/// Render the built-in script.
///
/// Per-clip failures are logged but leave the exit status at success.
async fn cmd_generate(
    credentials: Result<CartesiaConfig>,
    config: RunnerConfig,
) -> Result<RunReport> {
    // Credential first: nothing is created or requested without it.
    let client = Cartesia::new(credentials?)?;
    let runner = BatchRunner::new(client, config);

    let report = runner.run(&beacon_narrations()).await?;

    if report.failed() > 0 {
        let keys: Vec<&str> = report.failures().map(ItemOutcome::key).collect();
        tracing::warn!(
            failed = report.failed(),
            keys = ?keys,
            "some clips failed; re-run to retry them"
        );
    }
    Ok(report)
}

/// Print artifact status without touching the network.
async fn cmd_status() -> Result<()> {
    let config = RunnerConfig::default();

    println!("Narrator Status\n");
    println!("Output: {}", config.output_dir.display());
    println!();
    println!("Clips:");
    for item in beacon_narrations() {
        let path = config.artifact_path(item.key());
        println!("  {:<20} {}", item.key(), describe(&path).await);
    }

    println!();
    println!("Environment:");
    let key_set = std::env::var(CartesiaConfig::API_KEY_VAR).is_ok_and(|v| !v.is_empty());
    println!(
        "  {}: {}",
        CartesiaConfig::API_KEY_VAR,
        if key_set { "set" } else { "-" }
    );

    Ok(())
}

/// One-line state of an artifact path.
///
/// Only `NotFound` counts as missing; any other error is shown by kind,
/// since the runner would treat that clip as missing and retry it.
async fn describe(path: &Path) -> String {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => "present (directory, not a clip)".to_owned(),
        Ok(meta) => format!("present ({} KB)", kilobytes(meta.len())),
        Err(e) if e.kind() == ErrorKind::NotFound => "missing".to_owned(),
        Err(e) => format!("unreadable ({})", e.kind()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use clap::CommandFactory;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_generate() {
        let cli = Cli::parse_from(["narrator", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.command.is_none());
    }

    #[test]
    fn status_subcommand_parses() {
        let cli = Cli::parse_from(["narrator", "status"]);
        assert!(matches!(cli.command, Some(Commands::Status)));
    }

    #[test]
    fn fatal_errors_are_written_out() {
        let err = CartesiaConfig::from_vars(|_| None).unwrap_err();
        let mut out = Vec::new();

        report_fatal(&mut out, &err);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Error: configuration error: Missing CARTESIA_API_KEY env var\n"
        );
    }

    mod generate {
        use super::*;

        fn with_key(server: &MockServer) -> Result<CartesiaConfig> {
            CartesiaConfig::from_vars(|name| {
                (name == CartesiaConfig::API_KEY_VAR).then(|| "sk_car_test".to_owned())
            })
            .map(|config| config.with_base_url(server.uri()))
        }

        fn without_key(server: &MockServer) -> Result<CartesiaConfig> {
            CartesiaConfig::from_vars(|_| None).map(|config| config.with_base_url(server.uri()))
        }

        #[tokio::test]
        async fn missing_key_touches_nothing() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(200))
                .expect(0)
                .mount(&server)
                .await;
            let dir = TempDir::new().unwrap();
            let out = dir.child("app").child("audio");

            let err = cmd_generate(
                without_key(&server),
                RunnerConfig::default().with_output_dir(out.path()),
            )
            .await
            .unwrap_err();

            assert!(err.is_config());
            assert!(!dir.child("app").path().exists());
            server.verify().await;
        }

        #[tokio::test]
        async fn renders_the_whole_script_with_a_key() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/tts/bytes"))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3".to_vec()))
                .expect(11)
                .mount(&server)
                .await;
            let dir = TempDir::new().unwrap();
            let out = dir.child("app").child("audio");

            let report = cmd_generate(
                with_key(&server),
                RunnerConfig::default().with_output_dir(out.path()),
            )
            .await
            .unwrap();

            assert_eq!(report.generated(), 11);
            assert_eq!(std::fs::read(out.child("welcome.mp3").path()).unwrap(), b"ID3");
            server.verify().await;
        }

        #[tokio::test]
        async fn failed_clips_keep_success_result() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
                .mount(&server)
                .await;
            let dir = TempDir::new().unwrap();

            let report = cmd_generate(
                with_key(&server),
                RunnerConfig::default().with_output_dir(dir.path()),
            )
            .await
            .unwrap();

            assert_eq!(report.failed(), 11);
        }
    }

    mod status_line {
        use super::*;

        #[tokio::test]
        async fn missing_file() {
            let dir = TempDir::new().unwrap();
            assert_eq!(describe(&dir.path().join("intro.mp3")).await, "missing");
        }

        #[tokio::test]
        async fn present_file_shows_size() {
            let dir = TempDir::new().unwrap();
            let clip = dir.child("intro.mp3");
            clip.write_binary(&[0_u8; 2048]).unwrap();

            assert_eq!(describe(clip.path()).await, "present (2 KB)");
        }

        #[tokio::test]
        async fn directory_is_not_a_clip() {
            let dir = TempDir::new().unwrap();
            let squatter = dir.child("intro.mp3");
            squatter.create_dir_all().unwrap();

            assert_eq!(describe(squatter.path()).await, "present (directory, not a clip)");
        }

        #[tokio::test]
        async fn other_errors_are_not_reported_as_missing() {
            let dir = TempDir::new().unwrap();
            let file = dir.child("audio");
            file.write_str("not a directory").unwrap();

            let status = describe(&file.path().join("intro.mp3")).await;

            assert!(status.starts_with("unreadable ("), "{status}");
        }
    }
}
