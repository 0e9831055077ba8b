use clap::{Args, Parser as ClapParser, Subcommand};
use std::io::{self, Read};
use valgen::{
    CompileOptions, SampleOptions,
    cli::{self, CliError, LoggingConfig, SamplesOptions},
    compiler::DEFAULT_REPEAT_LIMIT,
    output::DEFAULT_SAMPLE_LIMIT,
};

#[derive(ClapParser)]
#[command(name = "valgen")]
#[command(about = "Valgen - parse value expressions and generate sample property values")]
#[command(version)]
struct Cli {
    /// Log filter in env_logger syntax (defaults to RUST_LOG, then "warn")
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate sample values of an expression
    Samples {
        /// The value expression (reads from stdin if not provided)
        expression: Option<String>,

        /// Number of items to enumerate
        #[arg(short, long, default_value_t = DEFAULT_SAMPLE_LIMIT, conflicts_with = "all")]
        limit: usize,

        /// Enumerate every item
        #[arg(short, long)]
        all: bool,

        /// Keep repeated values
        #[arg(short, long)]
        keep_duplicates: bool,

        /// Upper count used for `*`, `+` and `#`
        #[arg(long, default_value_t = DEFAULT_REPEAT_LIMIT)]
        repeat_limit: usize,

        /// Items of a repeated expression visible to each draw
        #[arg(long)]
        draw_limit: Option<usize>,

        #[command(flatten)]
        types: TypeArgs,
    },

    /// Print the expression tree as JSON
    Parse {
        /// The value expression (reads from stdin if not provided)
        expression: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the canonical source of an expression
    Source {
        /// The value expression (reads from stdin if not provided)
        expression: Option<String>,
    },

    /// Count identifiers, types and strings across expressions
    Symbols {
        /// Value expressions (reads one per line from stdin if none are given)
        expressions: Vec<String>,
    },

    /// Substitute type references with their definitions
    Expand {
        /// The value expression (reads from stdin if not provided)
        expression: Option<String>,

        #[command(flatten)]
        types: TypeArgs,
    },
}

#[derive(Args)]
struct TypeArgs {
    /// Type definition substituted before parsing, e.g. `color=red | blue`
    #[arg(short = 't', long = "type", value_name = "NAME=EXPRESSION")]
    definitions: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    cli::init_logging(LoggingConfig {
        env_filter: cli.log,
        ..Default::default()
    });

    let result = match cli.command {
        Commands::Samples {
            expression,
            limit,
            all,
            keep_duplicates,
            repeat_limit,
            draw_limit,
            types,
        } => run_samples(
            expression,
            SampleOptions {
                limit: (!all).then_some(limit),
                dedup: !keep_duplicates,
            },
            CompileOptions {
                repeat_limit,
                draw_limit,
            },
            types,
        ),
        Commands::Parse { expression, pretty } => {
            read_expression(expression).and_then(|e| cli::execute_parse(&e, pretty)).map(print_line)
        }
        Commands::Source { expression } => {
            read_expression(expression).and_then(|e| cli::execute_source(&e)).map(print_line)
        }
        Commands::Symbols { expressions } => read_expressions(expressions)
            .and_then(|e| cli::execute_symbols(&e))
            .map(print_line),
        Commands::Expand { expression, types } => read_expression(expression)
            .and_then(|e| {
                let table = cli::parse_type_definitions(&types.definitions)?;
                cli::execute_expand(&e, &table)
            })
            .map(print_line),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_samples(
    expression: Option<String>,
    sample: SampleOptions,
    compile: CompileOptions,
    types: TypeArgs,
) -> Result<(), CliError> {
    let options = SamplesOptions {
        expression: read_expression(expression)?,
        types: cli::parse_type_definitions(&types.definitions)?,
        compile,
        sample,
    };

    for value in cli::execute_samples(&options)? {
        println!("{}", value);
    }
    Ok(())
}

fn print_line(text: String) {
    println!("{}", text);
}

fn read_stdin() -> Result<Option<String>, CliError> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(Some(buffer))
}

fn read_expression(expression: Option<String>) -> Result<String, CliError> {
    match expression {
        Some(e) => Ok(e),
        None => read_stdin()?
            .map(|buffer| buffer.trim().to_string())
            .filter(|e| !e.is_empty())
            .ok_or(CliError::NoInput),
    }
}

fn read_expressions(expressions: Vec<String>) -> Result<Vec<String>, CliError> {
    if !expressions.is_empty() {
        return Ok(expressions);
    }
    let buffer = read_stdin()?.ok_or(CliError::NoInput)?;
    Ok(buffer
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
