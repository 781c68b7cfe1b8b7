use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use lawdoc::document::{collect_inputs, read_document, DocumentError, LawDocument};
use lawdoc::export::{export_to_json, export_to_outline};
use lawdoc::{Config, ExportFormat};

#[derive(Parser, Debug)]
#[command(name = "lawdoc")]
#[command(about = "Normalize statute HTML pages into structured JSON")]
#[command(version)]
struct Cli {
    /// Statute pages (.htm/.html) or directories containing them
    #[arg(required_unless_present = "init_config")]
    inputs: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
    export: ExportFormat,

    /// Directory to write one output file per input into
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Only treat linked blocks as references when they cite an act number and date
    #[arg(long)]
    strict_links: bool,

    /// Nest lettered items under the preceding numbered item
    #[arg(long)]
    nest_lists: bool,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the default config file and exit
    #[arg(long)]
    init_config: bool,

    /// Log each classification decision
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("lawdoc=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lawdoc=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn render(document: &LawDocument, format: ExportFormat, pretty: bool) -> Result<String> {
    match format {
        ExportFormat::Json => export_to_json(document, pretty),
        ExportFormat::Outline => export_to_outline(document),
    }
}

fn output_path(input: &Path, output_dir: Option<&Path>, format: ExportFormat) -> PathBuf {
    let extension = match format {
        ExportFormat::Json => "json",
        ExportFormat::Outline => "txt",
    };
    // Titles carry dates like 30.06.1993, so append rather than replace an extension
    let file_name = match input.file_stem() {
        Some(stem) => {
            let mut name = stem.to_os_string();
            name.push(".");
            name.push(extension);
            PathBuf::from(name)
        }
        None => PathBuf::from(format!("output.{extension}")),
    };

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

/// Where and how finished documents are written
#[derive(Debug, Clone)]
struct OutputTarget {
    format: ExportFormat,
    pretty: bool,
    dir: Option<PathBuf>,
    to_stdout: bool,
}

impl OutputTarget {
    /// Render one document and print or write it
    async fn emit(&self, source: &Path, document: &LawDocument) -> Result<()> {
        let rendered = render(document, self.format, self.pretty)?;
        if self.to_stdout {
            println!("{rendered}");
            return Ok(());
        }

        let target = output_path(source, self.dir.as_deref(), self.format);
        tokio::fs::write(&target, rendered)
            .await
            .with_context(|| format!("Failed to write {}", target.display()))?;
        info!(from = %source.display(), to = %target.display(), "wrote");
        Ok(())
    }
}

/// Per-run tally; one bad document never stops the rest
#[derive(Debug, Default, PartialEq, Eq)]
struct BatchSummary {
    succeeded: usize,
    failed: usize,
}

impl BatchSummary {
    fn record(&mut self, path: &Path, outcome: Result<()>) {
        let Err(e) = outcome else {
            self.succeeded += 1;
            return;
        };

        self.failed += 1;
        match e.downcast_ref::<DocumentError>() {
            Some(doc_error) if doc_error.is_skippable() => {
                warn!(path = %path.display(), "skipping: {doc_error}")
            }
            _ => error!(path = %path.display(), "failed: {e:#}"),
        }
    }

    fn finish(self) -> Result<()> {
        if self.succeeded == 0 && self.failed > 0 {
            bail!("All {} input(s) failed", self.failed);
        }
        if self.failed > 0 {
            warn!(
                succeeded = self.succeeded,
                failed = self.failed,
                "finished with skipped inputs"
            );
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.init_config {
        match Config::init_default()? {
            Some(path) => println!("Wrote default config to {}", path.display()),
            None => bail!("Could not determine a config directory on this system"),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if cli.strict_links {
        config.classifier.strict_links = true;
    }
    if cli.nest_lists {
        config.classifier.nest_lettered_lists = true;
    }
    if cli.compact {
        config.output.pretty = false;
    }

    let files = collect_inputs(&cli.inputs)?;
    if let Some(dir) = &cli.output {
        tokio::fs::create_dir_all(dir).await?;
    }
    let target = OutputTarget {
        format: cli.export,
        pretty: config.output.pretty,
        to_stdout: files.len() == 1 && cli.output.is_none(),
        dir: cli.output,
    };

    // Parsing is CPU-bound; every document gets its own blocking thread and engine state
    let classifier = Arc::new(config.classifier());
    let options = Arc::new(config.load_options());

    let mut tasks = JoinSet::new();
    for path in files {
        let classifier = Arc::clone(&classifier);
        let options = Arc::clone(&options);
        tasks.spawn_blocking(move || {
            let result = read_document(&path, &classifier, &options);
            (path, result)
        });
    }

    let mut summary = BatchSummary::default();
    while let Some(joined) = tasks.join_next().await {
        let (path, result) = match joined {
            Ok(done) => done,
            Err(e) => {
                error!("document task failed: {e}");
                summary.failed += 1;
                continue;
            }
        };

        let outcome = match result {
            Ok(document) => target.emit(&path, &document).await,
            Err(e) => Err(e),
        };
        summary.record(&path, outcome);
    }

    summary.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_next_to_source() {
        let path = output_path(Path::new("/data/law.htm"), None, ExportFormat::Json);
        assert_eq!(path, PathBuf::from("/data/law.json"));
    }

    #[test]
    fn test_output_path_in_directory() {
        let path = output_path(
            Path::new("/data/Про дорожній рух - Закон № 3353-XII від 30.06.1993.htm"),
            Some(Path::new("/out")),
            ExportFormat::Outline,
        );
        assert_eq!(
            path,
            PathBuf::from("/out/Про дорожній рух - Закон № 3353-XII від 30.06.1993.txt")
        );
    }

    fn fixture() -> LawDocument {
        LawDocument {
            title: "Про дорожній рух".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_failed_write_does_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        // A directory squatting on a.json makes that one write fail
        std::fs::create_dir(dir.path().join("a.json")).unwrap();

        let target = OutputTarget {
            format: ExportFormat::Json,
            pretty: false,
            dir: Some(dir.path().to_path_buf()),
            to_stdout: false,
        };

        let mut summary = BatchSummary::default();
        for name in ["a.htm", "b.htm", "c.htm"] {
            let source = Path::new(name);
            let outcome = target.emit(source, &fixture()).await;
            summary.record(source, outcome);
        }

        assert_eq!(
            summary,
            BatchSummary {
                succeeded: 2,
                failed: 1
            }
        );
        assert!(dir.path().join("b.json").is_file());
        assert!(dir.path().join("c.json").is_file());
        assert!(summary.finish().is_ok());
    }

    #[test]
    fn test_batch_fails_only_when_every_input_failed() {
        let mut summary = BatchSummary::default();
        summary.record(
            Path::new("a.htm"),
            Err(DocumentError::NoContentRoot {
                id: "article".to_string(),
            }
            .into()),
        );
        summary.record(Path::new("b.htm"), Err(anyhow::anyhow!("unreadable")));
        assert_eq!(summary.failed, 2);
        assert!(summary.finish().is_err());

        assert!(BatchSummary::default().finish().is_ok());
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from(["lawdoc", "a.htm", "--export", "outline", "--strict-links"])
            .unwrap();
        assert_eq!(cli.export, ExportFormat::Outline);
        assert!(cli.strict_links);
        assert_eq!(cli.inputs, vec![PathBuf::from("a.htm")]);

        assert!(Cli::try_parse_from(["lawdoc"]).is_err());
        assert!(Cli::try_parse_from(["lawdoc", "--init-config"]).is_ok());
    }
}
