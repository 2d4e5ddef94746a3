use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use subjs::ast_printer::AstPrinter;
use subjs::lexer::Lexer;
use subjs::parser::Parser;
use subjs::resolver;
use subjs::value::Value;
use subjs::SubjsError;

#[derive(ClapParser, Debug)]
#[command(version, about = "subjs expression lexer and parser", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize { filename: Option<PathBuf> },

    /// Parses input from a file as a single expression and prints its AST
    Parse {
        filename: Option<PathBuf>,

        /// Print the AST as JSON instead of prefix form
        #[arg(long)]
        json: bool,
    },

    /// Parses input from a file and resolves its additions to a literal
    Evaluate { filename: Option<PathBuf> },
}

/// Reads the contents of a file into a String, rejecting invalid UTF‑8.
fn read_file(filename: PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(&filename)
        .map_err(SubjsError::from)
        .context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .map_err(SubjsError::from)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    let text = String::from_utf8(buf)
        .map_err(SubjsError::from)
        .context(format!("File {:?} is not valid UTF-8", filename))?;

    Ok(text)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    // Configure env_logger to write to file with module and source line
    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("subjs::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .parse_default_env() // RUST_LOG overrides the Debug default
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn parse_or_exit(source: &str) -> Value {
    match Parser::new(Lexer::new(source)).parse() {
        Ok(value) => {
            info!("Expression parsed successfully");
            value
        }

        Err(e) => {
            debug!("Parse debug: {}", e);
            eprintln!("{}", e);
            std::process::exit(65);
        }
    }
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let filename = match args.commands {
        Commands::Tokenize { ref filename }
        | Commands::Parse { ref filename, .. }
        | Commands::Evaluate { ref filename } => filename.clone(),
    };

    let Some(filename) = filename else {
        info!("No filepath provided");
        println!("No input filepath was provided. Exiting...");
        std::process::exit(0);
    };

    let source = read_file(filename)?;

    match args.commands {
        Commands::Tokenize { .. } => {
            info!("Running Tokenize subcommand");
            let mut tokenized = true;

            for token in Lexer::new(&source) {
                match token {
                    Ok(token) => {
                        debug!("Scanned token: {}", token);
                        println!("{}", token);
                    }

                    Err(e) => {
                        tokenized = false;
                        debug!("Tokenization debug: {}", e);
                        eprintln!("{}", e);
                    }
                }
            }

            if !tokenized {
                debug!("Tokenization failed, exiting with code 65");
                std::process::exit(65);
            }

            info!("Tokenization completed successfully");
        }

        Commands::Parse { json, .. } => {
            info!("Running Parse subcommand");
            let value = parse_or_exit(&source);

            let rendered = if json {
                serde_json::to_string_pretty(&value).context("Failed to serialize AST")?
            } else {
                AstPrinter::print(&value)
            };

            debug!("AST: {}", rendered);
            println!("{}", rendered);

            info!("Parse subcommand completed");
        }

        Commands::Evaluate { .. } => {
            info!("Running Evaluate subcommand");
            let value = parse_or_exit(&source);

            match resolver::resolve(&value) {
                Ok(resolved) if resolved.is_literal() => {
                    debug!("Resolved to: {}", resolved);
                    println!("{}", resolved);
                }

                Ok(other) => {
                    debug!("Unresolvable {} node", other.kind());
                    eprintln!("Cannot resolve {} to a literal", other.kind());
                    std::process::exit(70);
                }

                Err(e) => {
                    debug!("Resolve debug: {}", e);
                    eprintln!("{}", e);
                    std::process::exit(70);
                }
            }

            info!("Evaluate subcommand completed");
        }
    }

    Ok(())
}
