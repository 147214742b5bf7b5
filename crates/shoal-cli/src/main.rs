use std::io::Read;
use std::path::Path;

use serde::Serialize;
use shoal_core::{GraphService, LoadReport};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Core(shoal_core::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<shoal_core::Error> for CliError {
    fn from(value: shoal_core::Error) -> Self {
        Self::Core(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Scc,
    Stats,
    Fmt,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    with_mapping: bool,
    out: Option<String>,
}

fn usage() -> &'static str {
    "shoal-cli\n\
\n\
USAGE:\n\
  shoal-cli [scc] [--pretty] [--mapping] [<path>|-]\n\
  shoal-cli stats [--pretty] [<path>|-]\n\
  shoal-cli fmt [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - scc prints the strongly connected components as JSON; --mapping adds the\n\
    handle -> component-index map.\n\
  - fmt re-serializes the graph in normalized form; stdout by default.\n\
  - Parse warnings are reported on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "scc" => args.command = Command::Scc,
            "stats" => args.command = Command::Stats,
            "fmt" => args.command = Command::Fmt,
            "--pretty" => args.pretty = true,
            "--mapping" => args.with_mapping = true,
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            other if other.starts_with("--") => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn load(input: Option<&str>) -> Result<(GraphService, LoadReport), CliError> {
    let mut service = GraphService::new();
    let report = match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            service.load_from_str(&buf)?
        }
        Some(path) => service.load_from_path(Path::new(path))?,
    };
    Ok((service, report))
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn report_warnings(report: &LoadReport) {
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
}

#[derive(Serialize)]
struct ComponentsOut<'a> {
    components: &'a [Vec<String>],
}

#[derive(Serialize)]
struct StatsOut<'a> {
    users: usize,
    relations: usize,
    components: usize,
    warnings: &'a [String],
}

fn run(args: Args) -> Result<(), CliError> {
    let (mut service, report) = load(args.input.as_deref())?;
    report_warnings(&report);

    match args.command {
        Command::Scc => {
            let result = service.compute_components();
            if args.with_mapping {
                write_json(&result, args.pretty)?;
            } else {
                write_json(
                    &ComponentsOut {
                        components: &result.components,
                    },
                    args.pretty,
                )?;
            }
        }
        Command::Stats => {
            let result = service.compute_components();
            write_json(
                &StatsOut {
                    users: report.user_count,
                    relations: report.relation_count,
                    components: result.components.len(),
                    warnings: &report.warnings,
                },
                args.pretty,
            )?;
        }
        Command::Fmt => {
            let text = shoal_core::write_graph(&service.graph_snapshot());
            write_text(&text, args.out.as_deref())?;
        }
    }

    Ok(())
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
