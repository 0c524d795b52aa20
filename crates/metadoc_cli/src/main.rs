//! metadoc - render enriched namespace documentation from a metadata snapshot
//!
//! ```text
//! metadoc render <snapshot.json> [--config <metadoc.toml>] [--no-examples]
//!                                [--no-alter-docs] [--output <file>]
//! ```

use anyhow::{bail, Context, Result};
use forge_metadoc::snapshot::RegistrySnapshot;
use forge_metadoc::{Aggregator, MarkdownRenderer, MetadocConfig, RunStatus};
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    // METADOC_LOG controls the log level, default "info"
    use tracing_subscriber::EnvFilter;
    let filter =
        EnvFilter::try_from_env("METADOC_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("render") => render(&args[1..]),
        Some("--help") | Some("-h") | None => {
            print_usage();
            Ok(())
        }
        Some(other) => bail!("unknown command `{}`, expected `render`", other),
    }
}

fn print_usage() {
    println!("Usage: metadoc render <snapshot.json> [options]");
    println!();
    println!("Options:");
    println!("  -c, --config <file>   Load settings from a TOML file");
    println!("      --no-examples     Ignore stored examples");
    println!("      --no-alter-docs   Skip aggregation, print docs unchanged");
    println!("  -o, --output <file>   Write markdown to a file instead of stdout");
}

/// Render command configuration
#[derive(Debug, Default, PartialEq)]
struct RenderCommand {
    /// Snapshot to load
    snapshot: PathBuf,
    /// Optional TOML configuration
    config: Option<PathBuf>,
    /// Force examples off
    no_examples: bool,
    /// Force aggregation off
    no_alter_docs: bool,
    /// Output file, stdout when absent
    output: Option<PathBuf>,
}

impl RenderCommand {
    fn parse(args: &[String]) -> Result<Self> {
        let mut cmd = RenderCommand::default();
        let mut snapshot = None;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    let Some(value) = args.get(i + 1) else {
                        bail!("--config requires a value");
                    };
                    cmd.config = Some(PathBuf::from(value));
                    i += 2;
                }
                "--output" | "-o" => {
                    let Some(value) = args.get(i + 1) else {
                        bail!("--output requires a value");
                    };
                    cmd.output = Some(PathBuf::from(value));
                    i += 2;
                }
                "--no-examples" => {
                    cmd.no_examples = true;
                    i += 1;
                }
                "--no-alter-docs" => {
                    cmd.no_alter_docs = true;
                    i += 1;
                }
                arg if !arg.starts_with('-') && snapshot.is_none() => {
                    snapshot = Some(PathBuf::from(arg));
                    i += 1;
                }
                arg => bail!("unexpected argument `{}`", arg),
            }
        }

        let Some(snapshot) = snapshot else {
            bail!("missing snapshot path");
        };
        cmd.snapshot = snapshot;
        Ok(cmd)
    }

    /// Resolve the effective configuration: file, then environment, then flags
    fn load_config(&self) -> Result<MetadocConfig> {
        let mut config = match &self.config {
            Some(path) => MetadocConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => MetadocConfig::default(),
        }
        .with_env_overrides();

        if self.no_examples {
            config.examples_enabled = false;
        }
        if self.no_alter_docs {
            config.aggregation_enabled = false;
        }
        Ok(config)
    }
}

fn render(args: &[String]) -> Result<()> {
    let cmd = RenderCommand::parse(args)?;
    let config = cmd.load_config()?;

    let mut registry = RegistrySnapshot::from_file(&cmd.snapshot)
        .and_then(RegistrySnapshot::into_registry)
        .with_context(|| format!("loading snapshot {}", cmd.snapshot.display()))?;

    let statuses = Aggregator::new(&config).run_all(&mut registry)?;
    let completed = statuses.iter().filter(|s| s.is_completed()).count();
    if statuses.iter().any(|s| *s == RunStatus::Skipped) {
        tracing::info!("Aggregation disabled, documentation left unchanged");
    } else {
        tracing::info!("Processed {} namespace(s)", completed);
    }

    let renderer = MarkdownRenderer::from_config(&config);
    let pages = registry
        .iter()
        .map(|ns| renderer.render_page(ns))
        .collect::<Vec<_>>()
        .join("\n");

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, &pages)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{}", pages),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_all_flags() {
        let cmd = RenderCommand::parse(&args(&[
            "snap.json",
            "--config",
            "metadoc.toml",
            "--no-examples",
            "-o",
            "out.md",
        ]))
        .unwrap();

        assert_eq!(
            cmd,
            RenderCommand {
                snapshot: PathBuf::from("snap.json"),
                config: Some(PathBuf::from("metadoc.toml")),
                no_examples: true,
                no_alter_docs: false,
                output: Some(PathBuf::from("out.md")),
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(RenderCommand::parse(&args(&[])).is_err());
        assert!(RenderCommand::parse(&args(&["snap.json", "--output"])).is_err());
        assert!(RenderCommand::parse(&args(&["a.json", "b.json"])).is_err());
        assert!(RenderCommand::parse(&args(&["a.json", "--bogus"])).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cmd = RenderCommand {
            no_alter_docs: true,
            ..Default::default()
        };
        let config = cmd.load_config().unwrap();
        assert!(!config.aggregation_enabled);
    }

    #[test]
    fn test_render_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("snap.json");
        let output = dir.path().join("out.md");
        std::fs::write(
            &snapshot,
            r#"{"namespaces": [{"name": "demo", "doc": "Demo.", "symbols": [{"name": "f"}]}]}"#,
        )
        .unwrap();

        render(&args(&[
            snapshot.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ]))
        .unwrap();

        let md = std::fs::read_to_string(&output).unwrap();
        assert!(md.starts_with("# demo\n\nDemo.\n\n#### Categories"));
        assert!(md.contains("* Other functions: [f](#var-f)"));
    }
}
