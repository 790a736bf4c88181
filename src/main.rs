use boolex::Limits;
use boolex::cli::{self, CliError, Command, Options, Output};
use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "boolex")]
#[command(about = "boolex - tokenize, normalize and evaluate boolean requirement formulas")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Syntax style: c, python, matlab or sql
    #[arg(short, long, global = true)]
    style: Option<String>,

    /// Path to a JSON grammar definition (overrides --style)
    #[arg(short, long, global = true)]
    grammar: Option<String>,

    /// Characters stripped from literals as modifiers, e.g. '!~'
    #[arg(short, long, global = true)]
    modifiers: Option<String>,

    /// Apply tight parsing and clause-expansion limits
    #[arg(long, global = true)]
    strict: bool,

    /// Pretty-print JSON output
    #[arg(short, long, global = true)]
    pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token sequence of an expression
    Tokens { expression: String },

    /// Validate and parse an expression
    Check { expression: String },

    /// Print the DNF clauses of an expression
    Dnf {
        expression: String,

        /// Render the clauses in the grammar instead of JSON
        #[arg(long)]
        syntax: bool,
    },

    /// Factor out literals common to every clause
    Minimize { expression: String },

    /// Evaluate an expression against a set of true literals
    Eval {
        expression: String,

        /// A literal (as written, modifiers included) that holds
        #[arg(short = 't', long = "true")]
        truths: Vec<String>,

        /// JSON array of true literals (reads from stdin if piped)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// List the built-in syntax styles
    Styles,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("BOOLEX_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let grammar_json = match &cli.grammar {
        Some(path) => Some(std::fs::read_to_string(path)?),
        None => None,
    };
    let grammar = cli::resolve_grammar(
        cli.style.as_deref(),
        grammar_json.as_deref(),
        cli.modifiers.as_deref(),
    )?;

    let (expression, command, input) = match cli.command {
        Commands::Styles => {
            print!("{}", cli::get_styles_overview());
            return Ok(());
        }
        Commands::Tokens { expression } => (expression, Command::Tokens, None),
        Commands::Check { expression } => (expression, Command::Check, None),
        Commands::Dnf { expression, syntax } => (expression, Command::Dnf { syntax }, None),
        Commands::Minimize { expression } => (expression, Command::Minimize, None),
        Commands::Eval {
            expression,
            truths,
            input,
        } => {
            let input = match input {
                Some(s) => Some(s),
                None if truths.is_empty() && !atty::is(atty::Stream::Stdin) => {
                    let mut buffer = String::new();
                    io::stdin().read_to_string(&mut buffer)?;
                    Some(buffer)
                }
                None => None,
            };
            (expression, Command::Eval { truths }, input)
        }
    };

    let options = Options {
        expression,
        grammar,
        command,
        input,
        limits: if cli.strict {
            Limits::strict()
        } else {
            Limits::default()
        },
    };

    match cli::execute(&options)? {
        Output::Text(text) => println!("{}", text),
        Output::Json(value) => {
            let json = if cli.pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            }?;
            println!("{}", json);
        }
    }
    Ok(())
}
