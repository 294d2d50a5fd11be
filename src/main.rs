use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use barq::dialect::{Dialect, ParserConfig, DEFAULT_MAX_DEPTH};
use barq::driver::{Session, SourceFile};
use barq::lexer::{format_tokens, Lexer};
use barq::printer::print_module;

#[derive(Parser)]
#[command(name = "barq")]
#[command(author, version, about = "Parser front end for the Barq and Cerium languages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Language dialect of the input files
    #[arg(long, value_enum, global = true, default_value = "barq")]
    dialect: DialectArg,

    /// Maximum nesting depth of expressions, statements, and types
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DialectArg {
    /// First generation Barq
    #[value(name = "barq")]
    Barq,
    /// Second generation Barq
    #[value(name = "barq2")]
    Barq2,
    /// Cerium
    #[value(name = "cerium")]
    Cerium,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Barq => Dialect::Barq,
            DialectArg::Barq2 => Dialect::Barq2,
            DialectArg::Cerium => Dialect::Cerium,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse source files and dump their syntax trees
    Parse {
        /// The source files to parse
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Dump the tree as JSON instead of debug output
        #[arg(long)]
        json: bool,
    },

    /// Dump the token stream of a source file
    Tokens {
        /// The source file to tokenize
        input: PathBuf,

        /// Include whitespace and comments
        #[arg(long)]
        trivia: bool,
    },

    /// Check source files for syntax errors
    Check {
        /// The source files to check
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Print a source file in canonical form
    Fmt {
        /// The source file to format
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set log level based on verbose flag
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let config = ParserConfig::for_dialect(cli.dialect.into()).with_max_depth(cli.max_depth);

    let result = match cli.command {
        Commands::Parse { inputs, json } => parse(inputs, json, config),
        Commands::Tokens { input, trivia } => tokens(input, trivia, config),
        Commands::Check { inputs } => check(inputs, config),
        Commands::Fmt { input } => fmt(input, config),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

/// Load every input into a new session
fn open_session(inputs: &[PathBuf], config: ParserConfig) -> Result<Session> {
    let mut session = Session::new(config);
    for input in inputs {
        session
            .load(input)
            .with_context(|| format!("Failed to read source file: {:?}", input))?;
    }
    Ok(session)
}

/// Report diagnostics and fail if there were any
fn finish(session: &Session) -> Result<()> {
    if session.has_errors() {
        session.report_diagnostics()?;
        anyhow::bail!("{} syntax error(s) found", session.error_count());
    }
    Ok(())
}

fn parse(inputs: Vec<PathBuf>, json: bool, config: ParserConfig) -> Result<()> {
    let mut session = open_session(&inputs, config)?;

    for (file_id, output) in session.parse_all() {
        let name = session.file_name(file_id).unwrap_or("<unknown>");
        println!("{}", format!("=== {} ===", name).blue().bold());
        if json {
            println!("{}", serde_json::to_string_pretty(&output.module)?);
        } else {
            println!("{:#?}", output.module);
        }
    }

    finish(&session)
}

fn tokens(input: PathBuf, trivia: bool, config: ParserConfig) -> Result<()> {
    let source = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read source file: {:?}", input))?;

    let tokens: Vec<_> = Lexer::with_features(&source, config.features)
        .filter(|t| trivia || !t.token.is_trivia())
        .collect();

    println!("{}", "=== Tokens ===".blue().bold());
    println!("{}", format_tokens(&tokens));
    Ok(())
}

fn check(inputs: Vec<PathBuf>, config: ParserConfig) -> Result<()> {
    log::info!("Checking {} file(s) as {}", inputs.len(), config.dialect);

    let mut session = open_session(&inputs, config)?;
    session.parse_all();
    finish(&session)?;

    println!("{}: no syntax errors found", "ok".green().bold());
    Ok(())
}

fn fmt(input: PathBuf, config: ParserConfig) -> Result<()> {
    let mut session = Session::new(config);
    let file = SourceFile::read(&input)?;
    session.add_file(file);

    let outputs = session.parse_all();
    finish(&session)?;

    for (_, output) in outputs {
        print!("{}", print_module(&output.module));
    }
    Ok(())
}
