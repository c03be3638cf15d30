//! Terminal rendering for the chat loop

use std::io::{self, Write};

use colored::*;

use docqa_core::{Error, Result};

/// Display startup banner
pub fn display_banner(corpus: &str, chunks: usize) {
    println!();
    println!("{}", "docqa - chat with your documents".blue().bold());
    println!(
        "{}",
        format!("corpus '{}' holds {} chunks", corpus, chunks).dimmed()
    );
    println!();
    println!(
        "{}",
        "Tip: ask a question about the ingested document, or 'help' for commands".dimmed()
    );
    println!();
}

/// Read one line of input; `None` on end of input
pub fn read_input() -> Result<Option<String>> {
    print!("{} ", "docqa>".green().bold());
    io::stdout().flush()?;

    let mut input = String::new();
    let read = io::stdin().read_line(&mut input)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

/// Render an answer
pub fn print_answer(answer: &str) {
    println!("{} {}", "→".green(), answer);
    println!();
}

/// Render a failure inline; the session keeps going
pub fn print_error(err: &Error) {
    println!("{} {}", "✗".red(), err.to_string().red());
    println!();
}

/// Display help message
pub fn print_help() {
    println!("{}", "Available commands:".bold());
    println!("  {} - Ask a question about the ingested document", "question".green());
    println!("  {} - Show this help message", "help".green());
    println!("  {} - Exit the application", "exit/quit".green());
    println!();
}

/// Farewell line on exit
pub fn print_goodbye() {
    println!("{}", "Goodbye!".green());
}
