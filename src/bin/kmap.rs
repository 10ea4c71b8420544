//! K-map SOP minimizer - command line interface

use clap::Parser;
use kmap_sop::{minimize, parse_index_list, Grid, KmapError, MinimizeRequest, Minimization, Notation, Options};
use std::process;

#[derive(Parser, Debug)]
#[command(name = "kmap")]
#[command(about = "Minimize a boolean function of up to five variables with a Karnaugh map", long_about = None)]
#[command(version)]
struct Args {
    /// Boolean expression, e.g. "A'B + C(D + E')"
    #[arg(value_name = "EXPRESSION", conflicts_with = "minterms")]
    expression: Option<String>,

    /// Minterm indices instead of an expression, e.g. "1,3,7,11,15"
    #[arg(short = 'm', long = "minterms", value_name = "LIST")]
    minterms: Option<String>,

    /// Don't-care indices
    #[arg(short = 'd', long = "dont-cares", value_name = "LIST")]
    dont_cares: Option<String>,

    /// Variable names, most significant first, e.g. "A,B,C,D"
    #[arg(long = "vars", value_name = "NAMES", value_delimiter = ',')]
    variables: Option<Vec<String>>,

    /// Number of variables for minterm input without --vars
    #[arg(short = 'n', long = "count")]
    count: Option<usize>,

    /// Notation of the minimized expression
    #[arg(long = "notation", value_enum, default_value = "canonical")]
    notation: Notation,

    /// Print the whole result as JSON
    #[arg(long = "json")]
    json: bool,

    /// Log more (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn request(args: &Args) -> Result<MinimizeRequest, KmapError> {
    let dont_cares = match &args.dont_cares {
        Some(text) => parse_index_list(text)?,
        None => Vec::new(),
    };

    let mut request = match (&args.expression, &args.minterms) {
        (Some(text), _) => MinimizeRequest::expression(text.as_str()),
        (None, Some(list)) => {
            let request = MinimizeRequest::terms(&parse_index_list(list)?, &[]);
            match args.count {
                Some(n) => request.with_variable_count(n),
                None => request,
            }
        }
        (None, None) => return Err(KmapError::EmptyInput("give an expression or --minterms")),
    };
    request = request.with_dont_cares(&dont_cares);

    if let Some(names) = &args.variables {
        request = request.with_variables(names.iter().map(|n| n.trim().to_string()));
    }
    Ok(request)
}

fn print_grid(grid: &Grid) {
    for row in &grid.cells {
        let line: Vec<String> = row
            .iter()
            .map(|cell| {
                let groups = if cell.groups.is_empty() {
                    String::new()
                } else {
                    format!("[{}]", cell.groups.iter().map(|g| g.to_string()).collect::<Vec<_>>().join(","))
                };
                format!("{:>2}:{}{:<8}", cell.index, cell.kind, groups)
            })
            .collect();
        println!("  {}", line.join(" "));
    }
}

fn print_text(result: &Minimization) {
    println!("F({}) = {}", result.variables, result.expression);
    println!();
    println!("Prime implicants:");
    for prime in &result.prime_implicants {
        let marker = if prime.essential {
            "essential"
        } else if result.cover.contains(&prime.id) {
            "selected"
        } else {
            ""
        };
        println!(
            "  #{:<2} {:<16} covers {:?} {}",
            prime.id, prime.term, prime.covers, marker
        );
    }
    println!();
    println!(
        "K-map ({}x{}{}):",
        result.grid.layout.rows,
        result.grid.layout.cols,
        if result.grid.layout.panels > 1 { ", two panels" } else { "" }
    );
    print_grid(&result.grid);
}

fn report(error: &KmapError, input: Option<&str>) {
    eprintln!("Error: {}", error);
    if let (Some(position), Some(text)) = (error.position(), input) {
        eprintln!("  {}", text);
        eprintln!("  {}^", " ".repeat(position));
    }
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => simplelog::LevelFilter::Warn,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    // only fails when a logger is already installed
    let _ = simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );

    let options = Options {
        notation: args.notation,
    };

    let result = request(&args).and_then(|request| minimize(&request, &options));
    match result {
        Ok(result) if args.json => match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Ok(result) => print_text(&result),
        Err(error) => {
            if args.json {
                let body = serde_json::json!({
                    "error": error.to_string(),
                    "position": error.position(),
                });
                println!("{}", body);
            } else {
                report(&error, args.expression.as_deref());
            }
            process::exit(1);
        }
    }
}
