//! List command

use crate::cli::ListArgs;
use crate::config::SkimConfig;
use anyhow::{anyhow, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use skim_core::{Extractor, ImageSet};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::fmt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use walkdir::WalkDir;

/// One input to read manifests from
#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Stdin,
    File(Utf8PathBuf),
}

pub async fn run(args: ListArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = SkimConfig::load(config_path)?;
    let token = CancellationToken::new();
    let extractor = build_extractor(&args, &config, token.clone())?;
    let sources = collect_sources(&args.paths)?;

    let watcher = tokio::spawn(cancel_on_interrupt(
        token,
        args.timeout.map(Duration::from_secs),
    ));
    let extraction = tokio::task::spawn_blocking(move || extract_all(&extractor, &sources));

    match await_extraction(extraction, watcher, STOP_GRACE).await? {
        Outcome::Finished(images) => print_images(&images, args.json),
        Outcome::Abandoned(stop) => {
            // The blocking read cannot be interrupted, so leave it behind
            tracing::error!("{}, input is still blocked, exiting", stop);
            std::process::exit(stop.exit_code());
        }
    }
}

/// How long a cancelled extraction gets to reach a document boundary
const STOP_GRACE: Duration = Duration::from_millis(500);

/// Why a run was cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Interrupted,
    TimedOut,
}

impl Stop {
    /// Shell conventions: 128 + SIGINT, and `timeout(1)`
    fn exit_code(self) -> i32 {
        match self {
            Stop::Interrupted => 130,
            Stop::TimedOut => 124,
        }
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stop::Interrupted => write!(f, "interrupted"),
            Stop::TimedOut => write!(f, "timed out"),
        }
    }
}

#[derive(Debug)]
enum Outcome {
    Finished(ImageSet),
    /// Cancelled while the extraction was stuck inside a read
    Abandoned(Stop),
}

/// Wait for the extraction, giving up on it if it outlives a stop by `grace`
async fn await_extraction(
    mut extraction: JoinHandle<Result<ImageSet>>,
    mut watcher: JoinHandle<Stop>,
    grace: Duration,
) -> Result<Outcome> {
    let result = tokio::select! {
        result = &mut extraction => {
            watcher.abort();
            result
        }
        stop = &mut watcher => {
            let stop = stop.context("cancellation watcher failed")?;
            match tokio::time::timeout(grace, &mut extraction).await {
                Ok(result) => result,
                Err(_) => return Ok(Outcome::Abandoned(stop)),
            }
        }
    };
    let images = result.context("extraction task failed")??;
    Ok(Outcome::Finished(images))
}

/// Layer flags and environment over the config file
fn build_extractor(
    args: &ListArgs,
    config: &SkimConfig,
    token: CancellationToken,
) -> Result<Extractor> {
    let policy = args.unknown_kind.or(config.unknown_kind).unwrap_or_default();
    tracing::debug!(policy = %policy, "unknown kind policy");

    // Flag mappings come last so they replace config entries for the same kind
    let aliases = config
        .kind_aliases
        .iter()
        .map(|(from, to)| (from.clone(), to.clone()))
        .chain(args.map_kind.iter().cloned());
    let builder = aliases.fold(
        Extractor::builder().unknown_kind(policy).cancellation(token),
        |builder, (from, to)| builder.alias(from, to),
    );
    builder.build().context("invalid kind mapping")
}

/// Expand arguments into sources; directories are walked in name order
fn collect_sources(paths: &[String]) -> Result<Vec<Source>> {
    let mut sources = Vec::new();
    for arg in paths {
        if arg == "-" {
            sources.push(Source::Stdin);
            continue;
        }
        for entry in WalkDir::new(arg).follow_root_links(true).sort_by_file_name() {
            let entry = entry.with_context(|| format!("failed to walk path {}", arg))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = Utf8PathBuf::from_path_buf(entry.into_path())
                .map_err(|p| anyhow!("path is not valid UTF-8: {}", p.display()))?;
            sources.push(Source::File(path));
        }
    }
    Ok(sources)
}

fn extract_all(extractor: &Extractor, sources: &[Source]) -> Result<ImageSet> {
    let mut images = ImageSet::new();
    for source in sources {
        match source {
            Source::Stdin => {
                tracing::info!("Processing stdin");
                extractor
                    .extract(io::stdin().lock(), &mut images)
                    .context("failed to extract images from stdin")?;
            }
            Source::File(path) => {
                tracing::info!(path = %path, "Processing file");
                let file =
                    File::open(path).with_context(|| format!("failed to open file {}", path))?;
                extractor
                    .extract(BufReader::new(file), &mut images)
                    .with_context(|| format!("failed to extract images from file {}", path))?;
            }
        }
    }
    Ok(images)
}

/// Cancel `token` on Ctrl-C or once `timeout` elapses
async fn cancel_on_interrupt(token: CancellationToken, timeout: Option<Duration>) -> Stop {
    let deadline = async {
        match timeout {
            Some(duration) => tokio::time::sleep(duration).await,
            None => std::future::pending::<()>().await,
        }
    };

    let stop = tokio::select! {
        _ = tokio::signal::ctrl_c() => Stop::Interrupted,
        _ = deadline => Stop::TimedOut,
    };
    tracing::warn!("{}, stopping before the next document", stop);
    token.cancel();
    stop
}

fn print_images(images: &ImageSet, json: bool) -> Result<()> {
    let sorted = sorted_images(images);
    if sorted.is_empty() {
        tracing::warn!("No images found");
    }

    let mut stdout = io::stdout().lock();
    if json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(&sorted)?)
            .context("failed to write output")?;
        return Ok(());
    }
    for image in sorted {
        writeln!(stdout, "{}", image).context("failed to write output")?;
    }
    Ok(())
}

fn sorted_images(images: &ImageSet) -> Vec<&str> {
    let mut sorted: Vec<&str> = images.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use skim_core::UnknownKindPolicy;
    use std::fs;
    use tempfile::TempDir;

    const POD: &str = "apiVersion: v1\nkind: Pod\nspec:\n  containers:\n    - image: nginx:1.21.0\n";
    const UNKNOWN: &str = "apiVersion: v1\nkind: Podonkadonk\nspec:\n  containers:\n    - image: busybox:1.35\n";

    fn list_args(paths: &[&str]) -> ListArgs {
        ListArgs {
            paths: paths.iter().map(|p| p.to_string()).collect(),
            unknown_kind: None,
            map_kind: Vec::new(),
            timeout: None,
            json: false,
        }
    }

    fn temp_path(temp: &TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().join(name)).unwrap()
    }

    #[test]
    fn test_collect_sources_walks_directories_in_order() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("b.yaml"), POD).unwrap();
        fs::write(temp.path().join("a.yaml"), POD).unwrap();
        fs::write(temp.path().join("nested").join("c.yml"), POD).unwrap();

        let root = temp.path().to_str().unwrap().to_string();
        let sources = collect_sources(&[root, "-".to_string()]).unwrap();
        assert_eq!(
            sources,
            vec![
                Source::File(temp_path(&temp, "a.yaml")),
                Source::File(temp_path(&temp, "b.yaml")),
                Source::File(temp_path(&temp, "nested/c.yml")),
                Source::Stdin,
            ]
        );
    }

    #[test]
    fn test_collect_sources_missing_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.yaml").to_str().unwrap().to_string();
        let err = collect_sources(&[missing]).unwrap_err();
        assert!(err.to_string().contains("failed to walk path"));
    }

    #[test]
    fn test_extract_all_accumulates_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("pod.yaml"), POD).unwrap();
        fs::write(
            temp.path().join("deploy.yaml"),
            "apiVersion: apps/v1\nkind: Deployment\nspec:\n  template:\n    spec:\n      containers:\n        - image: redis:7.0\n",
        )
        .unwrap();

        let sources = collect_sources(&[temp.path().to_str().unwrap().to_string()]).unwrap();
        let images = extract_all(&Extractor::new(), &sources).unwrap();
        assert_eq!(sorted_images(&images), vec!["nginx:1.21.0", "redis:7.0"]);
    }

    #[test]
    fn test_extract_all_names_failing_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("unknown.yaml"), UNKNOWN).unwrap();

        let sources = collect_sources(&[temp.path().to_str().unwrap().to_string()]).unwrap();
        let err = extract_all(&Extractor::new(), &sources).unwrap_err();
        assert!(err.to_string().contains("failed to extract images from file"));
        assert!(format!("{:#}", err).contains("v1.Podonkadonk"));
    }

    #[test]
    fn test_flag_policy_beats_config() {
        let mut args = list_args(&["-"]);
        args.unknown_kind = Some(UnknownKindPolicy::Skip);
        let config = SkimConfig {
            unknown_kind: Some(UnknownKindPolicy::FreeText),
            ..Default::default()
        };
        let extractor = build_extractor(&args, &config, CancellationToken::new()).unwrap();
        assert_eq!(extractor.policy(), UnknownKindPolicy::Skip);
    }

    #[test]
    fn test_config_policy_used_without_flag() {
        let config = SkimConfig {
            unknown_kind: Some(UnknownKindPolicy::FreeText),
            ..Default::default()
        };
        let extractor =
            build_extractor(&list_args(&["-"]), &config, CancellationToken::new()).unwrap();
        assert_eq!(extractor.policy(), UnknownKindPolicy::FreeText);
    }

    #[test]
    fn test_config_and_flag_aliases() {
        let mut args = list_args(&["-"]);
        args.map_kind = vec![("v1.Podonkadonk".to_string(), "v1.Pod".to_string())];
        let mut config = SkimConfig::default();
        config
            .kind_aliases
            .insert("v1.Podonkadonk".to_string(), "v1.ConfigMap".to_string());

        let extractor = build_extractor(&args, &config, CancellationToken::new()).unwrap();
        let mut images = ImageSet::new();
        extractor.extract_str(UNKNOWN, &mut images).unwrap();
        assert!(images.contains("busybox:1.35"));
    }

    #[test]
    fn test_invalid_alias_target() {
        let mut args = list_args(&["-"]);
        args.map_kind = vec![("v1.Podonkadonk".to_string(), "v1.Nothing".to_string())];
        let err = build_extractor(&args, &SkimConfig::default(), CancellationToken::new())
            .unwrap_err();
        assert!(err.to_string().contains("invalid kind mapping"));
    }

    #[tokio::test]
    async fn test_timeout_cancels_token() {
        let token = CancellationToken::new();
        let stop = cancel_on_interrupt(token.clone(), Some(Duration::from_millis(10))).await;
        assert!(token.is_cancelled());
        assert_eq!(stop, Stop::TimedOut);
        assert_eq!(stop.exit_code(), 124);
    }

    #[tokio::test]
    async fn test_await_extraction_finishes_without_stop() {
        let extraction = tokio::task::spawn_blocking(|| {
            Ok::<_, anyhow::Error>(ImageSet::from(["nginx:1.21.0".to_string()]))
        });
        let watcher = tokio::spawn(cancel_on_interrupt(CancellationToken::new(), None));

        let outcome = await_extraction(extraction, watcher, STOP_GRACE).await.unwrap();
        match outcome {
            Outcome::Finished(images) => assert!(images.contains("nginx:1.21.0")),
            other => panic!("expected finished extraction, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_await_extraction_abandons_blocked_read() {
        let (release, blocked) = std::sync::mpsc::channel::<()>();
        let extraction = tokio::task::spawn_blocking(move || {
            let _ = blocked.recv();
            Ok::<_, anyhow::Error>(ImageSet::new())
        });
        let token = CancellationToken::new();
        let watcher = tokio::spawn(cancel_on_interrupt(
            token.clone(),
            Some(Duration::from_millis(10)),
        ));

        let outcome = await_extraction(extraction, watcher, Duration::from_millis(50))
            .await
            .unwrap();
        assert!(token.is_cancelled());
        assert!(matches!(outcome, Outcome::Abandoned(Stop::TimedOut)));
        release.send(()).unwrap();
    }

    #[tokio::test]
    async fn test_await_extraction_reports_extraction_error_after_stop() {
        let token = CancellationToken::new();
        let extractor = Extractor::builder()
            .cancellation(token.clone())
            .build()
            .unwrap();
        let watcher = tokio::spawn(cancel_on_interrupt(
            token.clone(),
            Some(Duration::from_millis(10)),
        ));
        let extraction = tokio::task::spawn_blocking(move || {
            while !token.is_cancelled() {
                std::thread::sleep(Duration::from_millis(5));
            }
            let mut images = ImageSet::new();
            extractor.extract_str(POD, &mut images)?;
            Ok::<_, anyhow::Error>(images)
        });

        let err = await_extraction(extraction, watcher, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("cancel"));
    }
}
