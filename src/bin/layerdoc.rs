use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "layerdoc", version)]
struct Cli {
    /// Diagnostics written to stderr at this level and above.
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a design JSON file to an SVG document.
    Render(RenderArgs),
    /// Check a design JSON file and print the findings.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input design JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    /// Compositor options JSON.
    #[arg(long)]
    opts: Option<PathBuf>,

    /// Indent the output document.
    #[arg(long)]
    pretty: bool,

    /// Print the render report as JSON on stdout.
    #[arg(long)]
    report: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input design JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn read_design(path: &Path) -> anyhow::Result<layerdoc::Design> {
    layerdoc::Design::from_path(path).with_context(|| format!("load design '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<ExitCode> {
    let design = read_design(&args.in_path)?;

    let mut opts = match &args.opts {
        Some(p) => layerdoc::CompositorOpts::from_path(p)
            .with_context(|| format!("load options '{}'", p.display()))?,
        None => layerdoc::CompositorOpts::default(),
    };
    if args.pretty {
        opts.pretty = true;
    }

    let outcome = layerdoc::Compositor::new(opts).render(&design);

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &outcome.document)
        .with_context(|| format!("write svg '{}'", args.out.display()))?;

    if args.report {
        let json =
            serde_json::to_string_pretty(&outcome.report).context("serialize render report")?;
        println!("{json}");
    }
    if let Some(fb) = &outcome.report.fallback {
        eprintln!("fallback document written ({}: {})", fb.stage.as_str(), fb.cause);
    }
    eprintln!("wrote {}", args.out.display());
    Ok(ExitCode::SUCCESS)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<ExitCode> {
    let design = read_design(&args.in_path)?;
    let result = layerdoc::validate_design(&design);
    let json = serde_json::to_string_pretty(&result).context("serialize validation result")?;
    println!("{json}");
    Ok(if result.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
