//! Interactive loop for direct execution.
//!
//! Reads one command per line: `exit` (case-insensitive) terminates, blank
//! input re-prompts, everything else goes through the same resolve→execute
//! pipeline as the HTTP endpoint and the result is printed.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::handlers;
use crate::api::routes::AppState;

/// What one line of input asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplInput<'a> {
    /// Terminate the loop.
    Exit,
    /// Nothing typed; re-prompt.
    Blank,
    /// Forward as a command.
    Command(&'a str),
}

/// Classify one raw input line.
pub fn classify(line: &str) -> ReplInput<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        ReplInput::Blank
    } else if trimmed.eq_ignore_ascii_case("exit") {
        ReplInput::Exit
    } else {
        ReplInput::Command(trimmed)
    }
}

/// Run the interactive loop until `exit` or end of input.
pub async fn run(state: &AppState) -> anyhow::Result<()> {
    println!(
        "AI Excel agent started. Talking to {}",
        state.config.workbook_path.display()
    );
    println!("Type 'exit' to quit.");
    println!("{}", "-".repeat(20));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("Enter your Excel request: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match classify(&line) {
            ReplInput::Blank => continue,
            ReplInput::Exit => break,
            ReplInput::Command(command) => command,
        };

        match handlers::execute_direct(state, command).await {
            Ok(text) => {
                println!("\nAgent response:");
                println!("{text}");
            }
            Err(e) => println!("\nError: {e}"),
        }
        println!("{}", "-".repeat(20));
    }

    println!("Agent stopped.");
    Ok(())
}
