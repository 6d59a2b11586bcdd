mod config;
mod logging;

use std::fmt::Display;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tabwriter::TabWriter;

use blockdoc_io::codec::{parse_persisted_json, to_minified_json, to_pretty_json, validate_persisted};
use blockdoc_io::core::text_hash;
use blockdoc_io::prelude::{
    Block, EditScript, EditorSession, PersistedBlock, SchemaError, SequentialIds, SessionError,
};
use blockdoc_io::version::EDIT_SCRIPT_V;

use crate::config::Config;

/// Process exit codes, stable for CI / integrations.
mod exit {
    pub const IO: i32 = 1;
    pub const SCHEMA: i32 = 2;
    pub const CONTENT: i32 = 3;
    pub const REJECTED: i32 = 4;
}

const PREVIEW_CHARS: usize = 80;

#[derive(Debug, Parser)]
#[command(name = "blockdoc", version, about = "Block document editor core CLI")]
struct Cli {
    /// TOML config file (default: ./blockdoc.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print one row per block: index, type, id, text hash and a preview.
    Inspect {
        /// Persisted content JSON path
        input: PathBuf,
    },
    /// Check persisted content against the shared schema and the editor's loader.
    Validate {
        /// Persisted content JSON path
        input: PathBuf,
    },
    /// Load persisted content into the editor and serialize it back.
    Roundtrip {
        /// Persisted content JSON path
        input: PathBuf,
        /// Output minified JSON
        #[arg(long)]
        min: bool,
    },
    /// Apply an edit script to persisted content.
    Apply {
        /// Persisted content JSON path
        input: PathBuf,
        /// Edit script JSON path
        script: PathBuf,
        /// Print the editor state (with block ids and focus) instead of persisted content
        #[arg(long)]
        state: bool,
        /// Reject invalid mutations instead of skipping them
        #[arg(long)]
        strict: bool,
        /// Output minified JSON
        #[arg(long)]
        min: bool,
        /// Write the result here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the persisted form of a fresh document.
    New {
        /// Output minified JSON
        #[arg(long)]
        min: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match Config::resolve(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => fail(exit::IO, e),
    };
    let level = match logging::level_for(cli.verbose, &config.log.level) {
        Ok(l) => l,
        Err(e) => fail(exit::IO, e),
    };
    logging::init_logging(level)?;

    match cli.cmd {
        Command::Inspect { input } => {
            let session = load_session(&config, &input)?;
            print_table(session.blocks())?;
        }
        Command::Validate { input } => {
            let values = read_persisted(&input)?;

            match validate_persisted(&Value::Array(values.clone())) {
                Ok(()) => {}
                Err(SchemaError::Violations(violations)) => {
                    for v in &violations {
                        eprintln!("{v}");
                    }
                    process::exit(exit::SCHEMA);
                }
                Err(e @ SchemaError::Unavailable(_)) => return Err(e.into()),
            }

            let mut session = new_session(&config);
            if let Err(e) = session.hydrate(&values) {
                fail(exit::CONTENT, e);
            }
            println!("OK");
        }
        Command::Roundtrip { input, min } => {
            let mut session = load_session(&config, &input)?;
            let persisted = save(&mut session);
            println!("{}", render(&persisted, pretty(&config, min))?);
        }
        Command::Apply {
            input,
            script,
            state,
            strict,
            min,
            out,
        } => {
            let script: EditScript = serde_json::from_str(&fs::read_to_string(&script)?)?;
            if script.v != EDIT_SCRIPT_V {
                fail(
                    exit::IO,
                    format!("unsupported edit script version {} (expected {EDIT_SCRIPT_V})", script.v),
                );
            }

            let mut session = load_session(&config, &input)?.with_options(config.mutation_options(strict));
            for (i, op) in script.ops.iter().enumerate() {
                if let Err(e) = session.dispatch(op) {
                    fail(exit::REJECTED, format!("ops[{i}]: {e}"));
                }
            }
            tracing::info!(ops = script.ops.len(), blocks = session.blocks().len(), "applied edit script");

            let pretty = pretty(&config, min);
            let rendered = if state {
                if pretty {
                    serde_json::to_string_pretty(session.state())?
                } else {
                    serde_json::to_string(session.state())?
                }
            } else {
                let persisted = save(&mut session);
                render(&persisted, pretty)?
            };

            match out {
                Some(path) => fs::write(&path, format!("{rendered}\n"))?,
                None => println!("{rendered}"),
            }
        }
        Command::New { min } => {
            let mut session = new_session(&config);
            let persisted = save(&mut session);
            println!("{}", render(&persisted, pretty(&config, min))?);
        }
    }

    Ok(())
}

/// Print `message` to stderr and exit with `code`.
fn fail(code: i32, message: impl Display) -> ! {
    eprintln!("{message}");
    process::exit(code)
}

fn new_session(config: &Config) -> EditorSession {
    EditorSession::with_ids(Box::new(SequentialIds::new(config.editor.id_prefix.clone())))
}

/// Unreadable or malformed JSON propagates (exit 1).
fn read_persisted(path: &Path) -> anyhow::Result<Vec<Value>> {
    let s = fs::read_to_string(path)?;
    Ok(parse_persisted_json(&s)?)
}

/// Content the editor refuses to open exits with `exit::CONTENT`.
fn load_session(config: &Config, path: &Path) -> anyhow::Result<EditorSession> {
    let values = read_persisted(path)?;
    let mut session = new_session(config);
    if let Err(e) = session.hydrate(&values) {
        fail(exit::CONTENT, describe(&e));
    }
    Ok(session)
}

fn save(session: &mut EditorSession) -> Vec<PersistedBlock> {
    match session.save() {
        Ok(p) => p,
        Err(e) => fail(exit::CONTENT, describe(&e)),
    }
}

fn describe(e: &SessionError) -> String {
    format!("{}: {e}", e.user_message())
}

fn pretty(config: &Config, min: bool) -> bool {
    config.output.pretty && !min
}

fn render(persisted: &[PersistedBlock], pretty: bool) -> anyhow::Result<String> {
    Ok(if pretty {
        to_pretty_json(persisted)?
    } else {
        to_minified_json(persisted)?
    })
}

fn print_table(blocks: &[Block]) -> anyhow::Result<()> {
    let mut tw = TabWriter::new(std::io::stdout());
    writeln!(tw, "index\ttype\tblockId\ttextHash\tpreview")?;
    for (i, b) in blocks.iter().enumerate() {
        writeln!(
            tw,
            "{i}\t{}\t{}\t{}\t{}",
            b.block_type(),
            b.id,
            text_hash(b),
            preview(&b.plain_text())
        )?;
    }
    tw.flush()?;
    Ok(())
}

/// Single-line preview, at most `PREVIEW_CHARS` characters including the ellipsis.
fn preview(text: &str) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let mut cut: String = flat.chars().take(PREVIEW_CHARS - 1).collect();
    cut.push('…');
    cut
}
