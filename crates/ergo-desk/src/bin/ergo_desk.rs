use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use ergo_desk::core::LogLevels;
use ergo_desk::rules::{AdviceGenerator, AnalysisRequest, TemplateAdvice};

#[derive(Parser, Debug)]
#[command(author, version, about = "Ergonomic review of a desk photo's detections", long_about = None)]
struct Cli {
    /// Log verbosity on stderr.
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    log_level: LogLevel,

    /// Log every rule decision (evaluated, skipped, disabled).
    #[arg(long, global = true)]
    explain: bool,

    /// Emit tracing spans as JSON (needs the `tracing` feature).
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every rule for a request and print the report.
    Analyze {
        /// Request JSON: detections, profile, main screen and diagonal.
        request: PathBuf,
        /// Write the report JSON here instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Print advice text instead of the JSON report.
        #[arg(long)]
        text: bool,
    },
    /// List the selectable screens in a request.
    Screens { request: PathBuf },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: ergo_desk::rules::ErgoIoError,
    },
    #[error("{path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: ergo_desk::rules::ErgoIoError,
    },
    #[error(transparent)]
    Profile(#[from] ergo_desk::core::ProfileError),
    #[error(transparent)]
    Request(#[from] ergo_desk::rules::RequestError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn init_logging(cli: &Cli) {
    let general = cli.log_level.into();
    let levels = if cli.explain {
        LogLevels::explain(general)
    } else {
        LogLevels::uniform(general)
    };

    #[cfg(feature = "tracing")]
    ergo_desk::core::init_tracing(levels, cli.json_logs);

    #[cfg(not(feature = "tracing"))]
    {
        if cli.json_logs {
            eprintln!("--json-logs ignored: built without the `tracing` feature");
        }
        let _ = ergo_desk::core::init_logging(levels);
    }
}

fn load(path: &PathBuf) -> Result<AnalysisRequest, CliError> {
    AnalysisRequest::load_json(path).map_err(|source| CliError::Load {
        path: path.clone(),
        source,
    })
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Analyze { request, out, text } => {
            let req = load(&request)?;
            req.profile.validate()?;
            let report = req.run()?;

            if text {
                let Ok(advice) = TemplateAdvice.summarize(&report.findings, &req.profile);
                print!("{advice}");
            } else if let Some(path) = out {
                report
                    .write_json(&path)
                    .map_err(|source| CliError::Write { path, source })?;
            } else {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        Command::Screens { request } => {
            let req = load(&request)?;
            for screen in req.analyzer().detect_screens() {
                let b = screen.bbox;
                println!(
                    "{}\t{}\t{:.0}x{:.0} at ({:.0}, {:.0})",
                    screen.id.as_deref().unwrap_or("-"),
                    screen.class,
                    b.width,
                    b.height,
                    b.x,
                    b.y
                );
            }
        }
    }
    Ok(())
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::ExitCode::FAILURE
        }
    }
}
