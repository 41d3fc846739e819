//! CLI binary for figslide.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `AssignmentConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use figslide::pipeline::input::read_text;
use figslide::{
    build_deck, export_figures, load_request, parse_slides, write_deck, AssignmentConfig,
    AssignmentProgressCallback, AssignmentStats, DeckOutput, ProgressCallback, VisualKind,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback ────────────────────────────────────────────────────

/// Prints one line per matcher decision to stderr.
struct CliProgressCallback;

impl AssignmentProgressCallback for CliProgressCallback {
    fn on_assignment_start(&self, total_slides: usize, total_figures: usize) {
        eprintln!(
            "{} {} slides, {} figures",
            bold("Assigning"),
            total_slides,
            total_figures
        );
    }

    fn on_figure_assigned(&self, sequence_number: u32, figure_index: usize, relevance: f64) {
        eprintln!(
            "  {} slide {:>3}  ← figure {}  {}",
            green("✔"),
            sequence_number,
            figure_index,
            dim(&format!("relevance {relevance:.2}"))
        );
    }

    fn on_text_only(&self, sequence_number: u32, best_relevance: Option<f64>) {
        let detail = match best_relevance {
            Some(r) => format!("best {r:.2}"),
            None => "no figures left".to_string(),
        };
        eprintln!(
            "  {} slide {:>3}  text emphasis  {}",
            cyan("·"),
            sequence_number,
            dim(&detail)
        );
    }

    fn on_assignment_complete(&self, stats: &AssignmentStats) {
        eprintln!(
            "{}  {}/{} slides with figures, {} figures unused",
            green("✔"),
            stats.figure_slides,
            stats.total_slides,
            stats.figures_unused
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Assign figures and print a summary table
  figslide deck.json

  # Write the annotated deck as JSON
  figslide deck.json -o assigned.json

  # Use slides from the generator's SLIDE_n text instead of the request's
  figslide deck.json --slides-text slides.txt --json

  # Stricter matching, keep small figures, export assigned images
  figslide deck.json --threshold 0.5 --min-figure-size 0 --export-figures out/

REQUEST FORMAT:
  {
    "document_text": "full extracted text…",
    "slides":  [{"sequence_number": 1, "title": "…", "body": "• …"}],
    "figures": [{"page_number": 1, "width": 800, "height": 600, "data": "<base64>"}]
  }
  width/height may be omitted when data holds a PNG or JPEG.

ENVIRONMENT VARIABLES:
  RUST_LOG                 Override log filter (e.g. figslide=debug)
  FIGSLIDE_THRESHOLD       Default for --threshold
  FIGSLIDE_MIN_FIGURE_SIZE Default for --min-figure-size
"#;

/// Assign PDF figures to generated slides by relevance.
#[derive(Parser, Debug)]
#[command(
    name = "figslide",
    version,
    about = "Assign PDF figures to generated slides by relevance",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Deck request JSON file.
    input: PathBuf,

    /// Write the annotated deck JSON to this file instead of stdout.
    #[arg(short, long, env = "FIGSLIDE_OUTPUT")]
    output: Option<PathBuf>,

    /// Read slides from SLIDE_n generator text, replacing the request's slides.
    #[arg(long, env = "FIGSLIDE_SLIDES_TEXT")]
    slides_text: Option<PathBuf>,

    /// Minimum relevance a figure must exceed (0.0–1.0).
    #[arg(long, env = "FIGSLIDE_THRESHOLD", default_value_t = 0.4)]
    threshold: f64,

    /// Drop figures narrower or shorter than this many pixels (0 keeps all).
    #[arg(long, env = "FIGSLIDE_MIN_FIGURE_SIZE", default_value_t = 150)]
    min_figure_size: u32,

    /// Leave slide bodies exactly as given.
    #[arg(long, env = "FIGSLIDE_NO_FORMAT")]
    no_format: bool,

    /// Do not attach diagram suggestions to text-only slides.
    #[arg(long, env = "FIGSLIDE_NO_SUGGESTIONS")]
    no_suggestions: bool,

    /// Embed every figure as a data: URI in the JSON output.
    #[arg(long, env = "FIGSLIDE_EMBED_FIGURES")]
    embed_figures: bool,

    /// Write assigned figures as image files into this directory.
    #[arg(long, env = "FIGSLIDE_EXPORT_FIGURES")]
    export_figures: Option<PathBuf>,

    /// Print the annotated deck as JSON instead of a summary table.
    #[arg(long, env = "FIGSLIDE_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs (per-figure score breakdowns).
    #[arg(short, long, env = "FIGSLIDE_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "FIGSLIDE_QUIET")]
    quiet: bool,
}

impl Cli {
    /// Per-decision progress lines go to stderr unless quiet or emitting JSON.
    fn shows_progress(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Default tracing filter when `RUST_LOG` is unset.
    ///
    /// The progress callback already reports each decision, so library INFO
    /// logs are only shown when it is off.
    fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet || self.shows_progress() {
            "error"
        } else {
            "info"
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = cli.shows_progress();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    let progress: Option<ProgressCallback> = if show_progress {
        Some(Arc::new(CliProgressCallback) as Arc<dyn AssignmentProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress)?;

    // ── Load request ─────────────────────────────────────────────────────
    let mut request = load_request(&cli.input)
        .with_context(|| format!("Failed to load {}", cli.input.display()))?;

    if let Some(ref path) = cli.slides_text {
        let text = read_text(path)
            .with_context(|| format!("Failed to read slides from {}", path.display()))?;
        request.slides = parse_slides(&text);
        if request.slides.is_empty() {
            anyhow::bail!("No SLIDE_n blocks found in {}", path.display());
        }
    }

    // ── Run assignment ───────────────────────────────────────────────────
    let deck = build_deck(request, &config).context("Assignment failed")?;

    if let Some(ref dir) = cli.export_figures {
        let written = export_figures(&deck, dir).context("Failed to export figures")?;
        if !cli.quiet {
            eprintln!(
                "Exported {} figures to {}",
                written.len(),
                bold(&dir.display().to_string())
            );
        }
    }

    if let Some(ref output_path) = cli.output {
        write_deck(&deck, output_path).context("Failed to write deck")?;
        if !cli.quiet {
            eprintln!(
                "{}  {}ms  →  {}",
                green("✔"),
                deck.duration_ms,
                bold(&output_path.display().to_string())
            );
        }
    } else if cli.json {
        let json = serde_json::to_string_pretty(&deck).context("Failed to serialise deck")?;
        println!("{json}");
    } else if !cli.quiet {
        print_table(&deck);
    }

    if !cli.quiet && !deck.skipped_figures.is_empty() {
        eprintln!("  {} figures skipped:", deck.skipped_figures.len());
        for e in &deck.skipped_figures {
            eprintln!("    {}", dim(&e.to_string()));
        }
    }

    Ok(())
}

/// Map CLI args to `AssignmentConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<AssignmentConfig> {
    let mut builder = AssignmentConfig::builder()
        .threshold(cli.threshold)
        .min_figure_size(cli.min_figure_size)
        .format_bullets(!cli.no_format)
        .suggest_visuals(!cli.no_suggestions)
        .embed_figures(cli.embed_figures);

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Human-readable per-slide summary on stdout.
fn print_table(deck: &DeckOutput) {
    println!("{:>5}  {:<14}  {:<28}  {:>9}  TITLE", "SLIDE", "VISUAL", "FIGURE", "RELEVANCE");
    for slide in &deck.slides {
        let kind = slide.visual_kind.unwrap_or(VisualKind::TextEmphasis);
        let figure = slide
            .figure_index()
            .and_then(|i| deck.figures.get(i))
            .map(|f| format!("#{} p{} {}x{}", f.index, f.page_number, f.width, f.height))
            .unwrap_or_else(|| "-".to_string());
        let relevance = slide
            .relevance
            .map(|r| format!("{r:.2}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>5}  {:<14}  {:<28}  {:>9}  {}",
            slide.sequence_number,
            kind.as_str(),
            figure,
            relevance,
            slide.title
        );
        if let Some(ref s) = slide.visual_suggestion {
            println!("{:>5}  {}", "", dim(&format!("suggest {}: {}", s.category, s.description)));
        }
    }
}
