use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use xplexer::{
    display_error,
    lexer::debug::{print_result_tokens, serialize_min_tokens, serialize_tokens},
    Lexer,
};

const SAMPLES: [&str; 15] = [
    "pp(:(:q:)z:)rr'ss''mm'tt",
    "pp'qq''rr'ss",
    "pp\"tt\"\"tt again ",
    "my 'single' and \"double\" and (: comment :) and",
    "pre 'single' and",
    "$test[@predicate + doc(root + other = 'abc')/remainder]/element",
    "test['abc']",
    "$abc+$def",
    "let $a := Q{http:qutoric.com}slender",
    "+72.8 + $my:first-name + 7e-2 + 7-2 + 982.5",
    "5>=8",
    "let $exclude := test/elements/\"trick.com\":element/let!$over return
if (empty($exclude) and 'tre'||$t eq 'treat' and \"trick.com\":another)
   then ()
else if ($exclude/@end)
   then
   $exclude/@end cast as xs:integer + 1
else ()",
    "let $increment := function($x as xs:integer) as xs:integer* {
\tif ($x lt 10 and 'a' eq $y) then
\t$x + 1, $fnb[22](24), $fna(28)
\telse
\t$x + 2, Q{http://example.com}div
} return books/book/@title + $test",
    "$a and 'a' and 23 and true() and function() and array[1] and $var and 5 + and and",
    "$a castable as xs:integer and $b instance of element()",
];

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Indented token tree
    Tree,
    /// Full token tree as JSON
    Json,
    /// Whitespace-free tree without lexical classes, as JSON
    Min,
}

/// Tokenize an XPath/XQuery expression and print the classified tokens.
#[derive(Parser, Debug)]
#[command(name = "xplexer", version, about)]
struct Cli {
    /// Expression to tokenize
    expression: Option<String>,

    /// Read the expression from a file
    #[arg(short, long, conflicts_with = "expression")]
    file: Option<PathBuf>,

    /// Tokenize one of the built-in sample expressions (1-based)
    #[arg(short, long, conflicts_with_all = ["expression", "file"])]
    sample: Option<usize>,

    #[arg(long, value_enum, default_value_t = Format::Tree)]
    format: Format,

    /// Log emitted tokens and relabels
    #[arg(short, long)]
    verbose: bool,

    /// Log every character state transition
    #[arg(long)]
    trace_states: bool,
}

fn init_logging(cli: &Cli) {
    let level = if cli.trace_states {
        LevelFilter::Trace
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_expression(cli: &Cli) -> Result<(String, String), Box<dyn std::error::Error>> {
    if let Some(path) = &cli.file {
        let source = read_to_string(path)?;
        return Ok((source, path.display().to_string()));
    }

    if let Some(index) = cli.sample {
        let source = index
            .checked_sub(1)
            .and_then(|i| SAMPLES.get(i))
            .ok_or_else(|| format!("sample must be between 1 and {}", SAMPLES.len()))?;
        return Ok((source.to_string(), format!("sample {}", index)));
    }

    match &cli.expression {
        Some(expression) => Ok((expression.clone(), String::from("expression"))),
        None => Err("no expression given (use an argument, --file or --sample)".into()),
    }
}

fn run(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let (source, origin) = read_expression(cli)?;

    let start = Instant::now();
    let (tokens, diagnostics) = Lexer::new().analyse_with_diagnostics(&source);
    info!("Tokenized in {:?}", start.elapsed());

    match cli.format {
        Format::Tree => print_result_tokens(&tokens),
        Format::Json => println!("{}", serialize_tokens(&tokens)?),
        Format::Min => println!("{}", serialize_min_tokens(&tokens)?),
    }

    for diagnostic in &diagnostics {
        display_error(diagnostic, &source, &origin);
    }

    Ok(diagnostics.is_empty())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}
