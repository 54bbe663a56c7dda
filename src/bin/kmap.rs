//! Karnaugh Map Solver - Command Line Interface

use clap::{ArgAction, Parser, ValueEnum};
use color_eyre::eyre::WrapErr;
use kmap_logic::{ExplanationStyle, Form, KmapConfig, Response, SolveRequest, Solver};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Debug, Clone, ValueEnum)]
enum FormArg {
    /// Sum of products
    Sop,
    /// Product of sums
    Pos,
}

impl From<FormArg> for Form {
    fn from(val: FormArg) -> Self {
        match val {
            FormArg::Sop => Form::Sop,
            FormArg::Pos => Form::Pos,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "kmap")]
#[command(
    about = "Minimize a 2-4 variable Boolean function and explain its Karnaugh map",
    long_about = None
)]
#[command(version)]
struct Args {
    /// Comma-separated variable names, most significant first
    #[arg(long)]
    variables: Option<String>,

    /// Name of the function
    #[arg(short = 'n', long)]
    output_name: Option<String>,

    /// Comma-separated minterm indices
    #[arg(short = 'm', long, value_delimiter = ',')]
    minterms: Vec<String>,

    /// Comma-separated don't-care indices
    #[arg(short = 'd', long, value_delimiter = ',')]
    dontcares: Vec<String>,

    /// Normal form of the solution
    #[arg(short = 'f', long, value_enum)]
    form: Option<FormArg>,

    /// Read a JSON request from FILE ("-" for stdin) instead of the flags above
    #[arg(short = 'r', long, value_name = "FILE")]
    request: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the JSON response
    #[arg(long)]
    json: bool,

    /// Pretty-print the JSON response
    #[arg(long)]
    pretty: bool,

    /// Wrap positions and terms in HTML tags
    #[arg(long)]
    html: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn to_request(&self) -> SolveRequest {
        SolveRequest {
            variables: self.variables.clone(),
            output_name: self.output_name.clone(),
            minterms: self.minterms.clone(),
            dontcares: self.dontcares.clone(),
            form_type: self
                .form
                .clone()
                .map(|f| Form::from(f).as_str().to_string()),
        }
    }
}

fn read_request(path: &Path) -> color_eyre::Result<SolveRequest> {
    let reader: Box<dyn Read> = if path.as_os_str() == "-" {
        Box::new(io::stdin())
    } else {
        Box::new(
            File::open(path).wrap_err_with(|| format!("cannot open request '{}'", path.display()))?,
        )
    };
    let request = serde_json::from_reader(BufReader::new(reader))
        .wrap_err_with(|| format!("invalid request in '{}'", path.display()))?;
    Ok(request)
}

fn print_text(response: &Response) {
    let Response::Success(solved) = response else {
        return;
    };
    let kmap = &solved.kmap;
    println!(
        "{}({}{}{}) = {}",
        kmap.grid.output_name(),
        kmap.grid.row_vars(),
        if kmap.grid.row_vars().is_empty() { "" } else { "," },
        kmap.grid.col_vars(),
        solved.solution
    );
    println!();
    print!("{}", kmap.grid);
    if !kmap.explanations.is_empty() {
        println!();
        for explanation in &kmap.explanations {
            println!("- {}", explanation);
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path)
                .wrap_err_with(|| format!("cannot open config '{}'", path.display()))?;
            KmapConfig::from_reader(BufReader::new(file))?
        }
        None => KmapConfig::default(),
    };
    if args.html {
        config.explanation_style = ExplanationStyle::Html;
    }

    let request = match &args.request {
        Some(path) => read_request(path)?,
        None => args.to_request(),
    };

    let solver = Solver::new(config);
    let response = solver.respond(&request);

    if args.json || args.pretty {
        let json = if args.pretty {
            response.to_json_pretty()?
        } else {
            response.to_json()?
        };
        println!("{}", json);
    } else {
        print_text(&response);
    }

    if let Response::Error(err) = &response {
        if !(args.json || args.pretty) {
            eprintln!("Error: {}", err.error);
        }
        process::exit(1);
    }

    Ok(())
}
