use std::{fs::read_to_string, path::{Path, PathBuf}, process::ExitCode, time::Instant};

use anyhow::{Context, Result};
use calc::{
    errors::errors::{Error, ErrorTip},
    get_line_at_position,
    lexer::lexer::tokenize,
    parser::parser::parse,
};
use clap::Parser;
use colored::*;
use log::info;

#[derive(Parser)]
#[command(name = "calc")]
#[command(about = "Scan and parse a calc source file", version)]
struct Cli {
    /// Source file
    file: PathBuf,

    /// Print the token stream instead of the parsed file
    #[arg(short, long)]
    tokens: bool,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.to_string_lossy().into_owned());

    let source = read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;

    let start = Instant::now();

    if cli.tokens {
        let tokens = tokenize(source, Some(file_name));
        info!("tokenized in {:?}", start.elapsed());

        for token in &tokens {
            println!("{}", token);
        }
        return Ok(ExitCode::SUCCESS);
    }

    match parse(&file_name, &source) {
        Ok(file) => {
            info!("parsed in {:?}", start.elapsed());
            println!("{}", file);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            display_error(&error, &cli.file, &source);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn display_error(error: &Error, file: &Path, source: &str) {
    /*
        error: file.calc:2:3: InvalidInsertion: ...
        -> file.calc
           |
         2 | 4 5
           | --^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_str = line.to_string();
    let padding = line_str.len() + 2;

    println!("{} {}", "error:".red().bold(), error.report(source).bold());
    if let ErrorTip::Suggestion(tip) = error.get_tip() {
        println!("{} {}", format!("{:>padding$}", "=").blue().bold(), tip);
    }
    println!("{} {}", "->".blue().bold(), file.display());
    println!("{}", format!("{:>padding$}", "|").blue().bold());

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    println!(
        "{} {} {}",
        line_str.blue().bold(),
        "|".blue().bold(),
        line_text_removed.trim_end()
    );

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    println!(
        "{} {}",
        format!("{:>padding$}", "|").blue().bold(),
        format!("{:->arrows$}", "^").red().bold()
    );
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}
