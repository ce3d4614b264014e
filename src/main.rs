use cardgrid::{
    CardPreset, ExportError, ExportReport, ExporterBuilder, FilesystemResourceProvider, LayoutConfig, LayoutSession,
    PaperSize, RasterEncoding, SessionError, SessionFile, is_supported_image,
};
use cardgrid_executor::ExecutorImpl;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

// Use Mimalloc: rasterization churns through large, short-lived pixel buffers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser, Debug)]
#[command(version, about = "Lay out card images on printable 3x3 sheets and export them as PDF")]
struct Cli {
    /// Print resolution card images are resampled to
    #[arg(long, global = true, default_value_t = cardgrid::DEFAULT_DPI)]
    dpi: f32,

    /// Embed images as JPEG instead of lossless Flate, optionally with a quality (1-100)
    #[arg(long, global = true, num_args = 0..=1, default_missing_value = "100", value_name = "QUALITY")]
    jpeg: Option<u8>,

    /// Rasterization threads; 1 runs on the calling thread (default: all cores)
    #[arg(long, short = 'j', global = true, value_name = "N")]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export a saved session file as a PDF
    Export {
        session: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Auto-place images in order and export them as a PDF
    Pack {
        #[arg(required = true)]
        images: Vec<PathBuf>,
        #[arg(short, long)]
        output: PathBuf,
        /// Also write the resulting layout as a session file
        #[arg(long, value_name = "SESSION")]
        save_session: Option<PathBuf>,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Write a session file with the default layout
    Init {
        session: PathBuf,
        #[command(flatten)]
        layout: LayoutArgs,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Default)]
struct LayoutArgs {
    /// Card preset: ygo (59x86) or mtg (63x88)
    #[arg(long)]
    card: Option<CardPreset>,
    /// Paper: a4, a3, letter or WIDTHxHEIGHT in millimeters
    #[arg(long)]
    paper: Option<PaperSize>,
    #[arg(long, value_name = "MM")]
    card_width: Option<f32>,
    #[arg(long, value_name = "MM")]
    card_height: Option<f32>,
    #[arg(long, value_name = "MM")]
    gap: Option<f32>,
    #[arg(long, value_name = "MM")]
    margin_top: Option<f32>,
    #[arg(long, value_name = "MM")]
    margin_left: Option<f32>,
}

impl LayoutArgs {
    /// Presets first, then explicit dimensions on top.
    fn apply(&self, mut config: LayoutConfig) -> LayoutConfig {
        if let Some(card) = self.card {
            config.set_card_preset(card);
        }
        if let Some(paper) = self.paper {
            config.set_paper(paper);
        }
        let overrides = [
            (self.card_width, &mut config.card_width),
            (self.card_height, &mut config.card_height),
            (self.gap, &mut config.gap),
            (self.margin_top, &mut config.margin_top),
            (self.margin_left, &mut config.margin_left),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        config
    }
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("No supported images among the {0} given paths")]
    NoImages(usize),
    #[error("'{0}' already exists (use --force to overwrite)")]
    AlreadyExists(PathBuf),
}

fn main() -> Result<(), CliError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Export { session, output } => {
            let base = session.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
            let layout = SessionFile::load(session)?.into_session();
            let report = export(&cli, &layout, base, output)?;
            print_report(&report, output);
        }
        Command::Pack {
            images,
            output,
            save_session,
            layout,
        } => {
            let (supported, rejected): (Vec<&PathBuf>, Vec<&PathBuf>) =
                images.iter().partition(|path| is_supported_image(path));
            for path in &rejected {
                log::warn!("Skipping '{}': not a supported image type", path.display());
            }
            if supported.is_empty() {
                return Err(CliError::NoImages(images.len()));
            }

            let mut session = LayoutSession::with_config(layout.apply(LayoutConfig::default()));
            session.auto_place_all(supported.into_iter().map(|path| path.as_path().into()));

            if let Some(session_path) = save_session {
                SessionFile::from_session(&session).save(session_path)?;
                println!("Saved session to {}", session_path.display());
            }
            let report = export(&cli, &session, PathBuf::new(), output)?;
            print_report(&report, output);
        }
        Command::Init { session, layout, force } => {
            if session.exists() && !force {
                return Err(CliError::AlreadyExists(session.clone()));
            }
            let file = SessionFile {
                layout: layout.apply(LayoutConfig::default()),
                ..Default::default()
            };
            file.save(session)?;
            println!("Wrote {}", session.display());
        }
    }
    Ok(())
}

fn export(cli: &Cli, session: &LayoutSession, base: PathBuf, output: &Path) -> Result<ExportReport, CliError> {
    let encoding = match cli.jpeg {
        Some(quality) => RasterEncoding::Jpeg { quality },
        None => RasterEncoding::Flate,
    };
    let provider = if base.as_os_str().is_empty() {
        FilesystemResourceProvider::new()
    } else {
        FilesystemResourceProvider::with_base(base)
    };
    let exporter = ExporterBuilder::new()
        .with_dpi(cli.dpi)
        .with_encoding(encoding)
        .with_resource_provider(Arc::new(provider))
        .with_executor(ExecutorImpl::with_threads(cli.threads))
        .build();

    println!("Generating PDF to {}...", output.display());
    Ok(exporter.export_to_file(&session.snapshot(), output)?)
}

fn print_report(report: &ExportReport, output: &Path) {
    println!(
        "Successfully generated {} ({} pages, {} cards)",
        output.display(),
        report.page_count,
        report.placed.len()
    );
    for skipped in &report.skipped {
        eprintln!("  skipped {}: {}", skipped.slot, skipped.reason);
    }
}
