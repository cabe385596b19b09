use clap::{Parser as ClapParser, Subcommand};
use odata_filter::cli::{
    self, CheckOptions, CheckResult, CliError, CompareOptions, EncodeOptions, ReadOptions,
    RewriteOptions,
};
use odata_filter::bindings_to_json;
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "odata-filter")]
#[command(about = "odata-filter - Parse, match and rewrite OData $filter expressions")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a filter and print its canonical tree as JSON
    Parse {
        /// The filter text
        filter: String,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't print the tree
        #[arg(long)]
        syntax_only: bool,
    },

    /// Write a JSON filter tree back as filter text
    Encode {
        /// JSON filter tree (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Alias values as JSON: [["name", value], ...] or {"name": value}
        #[arg(short, long)]
        bindings: Option<String>,
    },

    /// Match a condition with aliases against a filter
    Compare {
        /// Condition text, may contain @aliases
        condition: String,

        /// Filter text to match against
        data: String,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Substitute alias values into a filter
    Rewrite {
        /// Filter text containing @aliases
        filter: String,

        /// Alias values as JSON: [["name", value], ...] or {"name": value}
        #[arg(short, long)]
        bindings: String,
    },

    /// Read alias values out of a filter using condition templates
    Read {
        /// Filter text to read values from
        filter: String,

        /// Condition template, may be repeated
        #[arg(short, long = "condition", required = true)]
        conditions: Vec<String>,

        /// How the templates are joined: and, or
        #[arg(short, long, default_value = "and")]
        aggregation: String,

        /// Search every node, not only the top-level operands
        #[arg(long)]
        deep: bool,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'odata-filter docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Parse {
            filter,
            pretty,
            syntax_only,
        } => run_parse(filter, pretty, syntax_only),
        Commands::Encode { input, bindings } => run_encode(input, bindings),
        Commands::Compare {
            condition,
            data,
            pretty,
        } => run_compare(condition, data, pretty),
        Commands::Rewrite { filter, bindings } => {
            cli::execute_rewrite(&RewriteOptions { filter, bindings }).map(|text| println!("{}", text))
        }
        Commands::Read {
            filter,
            conditions,
            aggregation,
            deep,
            pretty,
        } => run_read(
            ReadOptions {
                filter,
                conditions,
                aggregation,
                deep,
            },
            pretty,
        ),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => match cli::get_doc_category(&category) {
            Ok(content) => {
                print!("{}", content);
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn print_json(value: &serde_json::Value, pretty: bool) -> Result<(), CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }?;
    println!("{}", json);
    Ok(())
}

fn run_parse(filter: String, pretty: bool, syntax_only: bool) -> Result<(), CliError> {
    let options = CheckOptions {
        filter,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Success(output) => print_json(&output, pretty)?,
    }
    Ok(())
}

fn run_encode(input: Option<String>, bindings: Option<String>) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let text = cli::execute_encode(&EncodeOptions { input, bindings })?;
    println!("{}", text);
    Ok(())
}

fn run_compare(condition: String, data: String, pretty: bool) -> Result<(), CliError> {
    let result = cli::execute_compare(&CompareOptions { condition, data })?;
    print_json(&result.to_json(), pretty)
}

fn run_read(options: ReadOptions, pretty: bool) -> Result<(), CliError> {
    let bindings = cli::execute_read(&options)?;
    print_json(&bindings_to_json(&bindings), pretty)
}
