//! Quill CLI
//!
//! Runs one layout pass over a formatted-text subtree described in JSON and
//! prints the serialized fragment and the measured sizes.

mod font_metrics;
mod input;

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use quill_common::url::Url;
use quill_css::{
    ApproximateFontMetrics, FontMetrics, LayoutContext, LayoutParticipant, SizingDirective,
    StyleMap, lay_out_participant,
};
use quill_dom::{DomTree, ElementCategory};
use quill_text::{
    FormattedTextConfig, LinkBridge, LinkOpener, LinkOutcome, MarkupSurface, SurfaceChrome,
    TEXT_COMPONENT_NAME, create_component,
};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use font_metrics::FontdueFontMetrics;
use input::Input;

/// Quill: lay out a formatted-text subtree and report its sizes
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Lay out at the default 400px
    quill subtree.json

    # Shrink-to-fit into 120px, and also probe the height at 60px
    quill subtree.json --width 120 --probe-width 60

    # Measure with a real font and print JSON
    quill subtree.json --font DejaVuSans.ttf --json

    # Click inside the committed box
    quill subtree.json --click 5 10
"#)]
struct Cli {
    /// JSON description of the subtree
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Width available to the participant
    #[arg(long, default_value = "400")]
    width: f32,

    /// Content width of the parent (defaults to --width)
    #[arg(long)]
    parent_width: Option<f32>,

    /// Additionally measure the height at this uncommitted width
    #[arg(long, value_name = "WIDTH")]
    probe_width: Option<f32>,

    /// JSON file with `bridge` and `chrome` settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// TrueType/OpenType font to measure with (default: approximate metrics)
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Click at a point relative to the committed box
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    click: Option<Vec<f32>>,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Log fragment regeneration and probe measurements
    #[arg(short, long)]
    verbose: bool,
}

/// Settings file contents.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CliConfig {
    bridge: FormattedTextConfig,
    chrome: SurfaceChrome,
}

/// What one run measured.
#[derive(Debug, Serialize)]
struct Report {
    fragment: String,
    min_width: f32,
    preferred_width: f32,
    bounds: [f32; 4],
    probe: Option<ProbeReport>,
    click: Option<String>,
}

#[derive(Debug, Serialize)]
struct ProbeReport {
    width: f32,
    height: f32,
}

/// Prints links instead of navigating.
struct PrintOpener;

impl LinkOpener for PrintOpener {
    fn open_link(&self, url: &Url) {
        println!("{} {url}", "open".green().bold());
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => load_json::<CliConfig>(path)?,
        None => CliConfig::default(),
    };
    let input: Input = load_json(&cli.input)?;
    tracing::debug!(
        input = %cli.input.display(),
        children = input.children.len(),
        "loaded subtree description"
    );
    let metrics: Rc<dyn FontMetrics> = match &cli.font {
        Some(path) => Rc::new(FontdueFontMetrics::load(path)?),
        None => Rc::new(ApproximateFontMetrics),
    };

    let report = run(&cli, &config, &input, metrics)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Build the subtree, run a layout pass and collect the measurements.
fn run(
    cli: &Cli,
    config: &CliConfig,
    input: &Input,
    metrics: Rc<dyn FontMetrics>,
) -> Result<Report> {
    let base_url = input
        .base_url
        .as_deref()
        .map(Url::parse)
        .transpose()
        .context("parsing base_url")?;
    let opener: Rc<dyn LinkOpener> = Rc::new(PrintOpener);
    let links = LinkBridge::new(base_url, Some(opener));

    let mut dom = DomTree::new();
    let mut styles = StyleMap::new();
    let chrome = config.chrome;
    let mut bridge = create_component(
        &mut dom,
        ElementCategory::Component,
        TEXT_COMPONENT_NAME,
        || MarkupSurface::new(metrics, chrome),
        links,
        config.bridge,
    )
    .context("no bridge for text component")?;
    dom.append_child(dom.root(), bridge.node())?;
    if let Some(style) = &input.style {
        let _ = styles.insert(bridge.node(), style.clone());
    }
    for child in &input.children {
        let child = child.build(&mut dom, &mut styles)?;
        bridge.insert_child(&mut dom, child, None)?;
    }

    let parent_width = cli.parent_width.unwrap_or(cli.width);
    let cx = LayoutContext::new(&dom, &styles);
    let bounds = lay_out_participant(&mut bridge, &cx, 0.0, 0.0, cli.width, parent_width);
    let min_width = bridge.intrinsic_content_width(&cx, SizingDirective::Minimum, parent_width);
    let preferred_width =
        bridge.intrinsic_content_width(&cx, SizingDirective::Preferred, parent_width);
    let probe = cli.probe_width.map(|width| ProbeReport {
        width,
        height: bridge.content_height_for_width(&cx, width, parent_width),
    });

    let click = match cli.click.as_deref() {
        Some(&[x, y]) => Some(match bridge.click(x, y) {
            None => "no link".to_string(),
            Some(LinkOutcome::Opened(url)) => format!("opened {url}"),
            Some(LinkOutcome::NoOpener) => "no opener".to_string(),
            Some(LinkOutcome::Malformed(error)) => error.to_string(),
        }),
        _ => None,
    };

    Ok(Report {
        fragment: bridge.fragment().to_string(),
        min_width,
        preferred_width,
        bounds: [bounds.x, bounds.y, bounds.width, bounds.height],
        probe,
        click,
    })
}

fn print_report(report: &Report) {
    println!("{}", "=== Fragment ===".bold());
    println!("{}", report.fragment);

    println!("\n{}", "=== Intrinsic Widths ===".bold());
    println!("  min:       {:.1}", report.min_width);
    println!("  preferred: {:.1}", report.preferred_width);

    let [x, y, width, height] = report.bounds;
    println!("\n{}", "=== Committed Bounds ===".bold());
    println!("  x={x:.1} y={y:.1} w={width:.1} h={height:.1}");

    if let Some(probe) = &report.probe {
        println!("\n{}", "=== Probe ===".bold());
        println!("  height at {:.1}: {:.1}", probe.width, probe.height);
    }

    if let Some(click) = &report.click {
        println!("\n{}", "=== Click ===".bold());
        println!("  {}", click.cyan());
    }
}
