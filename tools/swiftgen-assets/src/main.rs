mod logging;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use swiftgen_catalog::{scan, AssetKind, Catalog, ScanOptions};
use swiftgen_swift::{generate, GeneratorOptions, Platform};
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PlatformArg {
    #[value(aliases = ["tvos", "watchos"])]
    Ios,
    Macos,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Image,
    Color,
    Data,
}

impl From<KindArg> for AssetKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Image => AssetKind::Image,
            KindArg::Color => AssetKind::Color,
            KindArg::Data => AssetKind::Data,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "swiftgen-assets",
    about = "Generate a Swift enum for the images, colors and data assets under a directory"
)]
struct Cli {
    /// Directory to scan
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Name of the generated enum
    #[arg(long, default_value = "Asset")]
    enum_name: String,

    #[arg(long, value_enum, default_value_t = PlatformArg::Ios)]
    platform: PlatformArg,

    /// Only collect assets of this kind (repeatable; default: all)
    #[arg(long = "kind", value_enum)]
    kinds: Vec<KindArg>,

    /// Fail when no assets are found
    #[arg(long)]
    require_nonempty: bool,

    /// Print the scanned assets instead of generating code
    #[arg(long)]
    list: bool,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn scan_options(&self) -> ScanOptions {
        if self.kinds.is_empty() {
            ScanOptions::default()
        } else {
            ScanOptions::with_kinds(self.kinds.iter().copied().map(AssetKind::from))
        }
    }

    fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            enum_name: self.enum_name.clone(),
            platform: match self.platform {
                PlatformArg::Ios => Platform::UIKit,
                PlatformArg::Macos => Platform::AppKit,
            },
            require_nonempty: self.require_nonempty,
        }
    }
}

fn list_catalog(catalog: &Catalog) -> String {
    let name_width = catalog
        .iter()
        .map(|e| e.logical_name.chars().count())
        .max()
        .unwrap_or(0);
    let asset_width = catalog
        .iter()
        .map(|e| e.asset_name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for entry in catalog.iter() {
        let line = format!(
            "{:<5}  {:<name_width$}  {:<asset_width$}  {}",
            entry.kind.name(),
            entry.logical_name,
            entry.asset_name,
            entry.relative_path.display(),
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Scan and render everything in memory, so a failure leaves no output.
fn render(cli: &Cli) -> Result<String> {
    let catalog = scan(&cli.dir, &cli.scan_options())
        .with_context(|| format!("failed to scan {}", cli.dir.display()))?;

    if cli.list {
        return Ok(list_catalog(&catalog));
    }

    generate(&catalog, &cli.generator_options()).context("failed to generate Swift code")
}

/// Write to `output` when given, else to `stdout`. An output file whose
/// contents already match is left untouched.
fn write_output(text: &str, output: Option<&Path>, stdout: &mut impl Write) -> Result<()> {
    let Some(path) = output else {
        stdout
            .write_all(text.as_bytes())
            .context("failed to write to stdout")?;
        return Ok(());
    };

    if fs::read(path).map(|old| old == text.as_bytes()).unwrap_or(false) {
        info!(path = %path.display(), "output unchanged");
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote output");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let text = render(&cli)?;
    write_output(&text, cli.output.as_deref(), &mut std::io::stdout().lock())
}
