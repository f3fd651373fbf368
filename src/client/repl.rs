use anyhow::Result;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::CompetitorsApi;
use super::table::render_screen;
use super::view::{ClientView, Submission};
use crate::spinner::Spinner;

/// Run one lookup and print the outcome. Blank input prints nothing.
pub async fn lookup(view: &mut ClientView, api: &dyn CompetitorsApi, input: &str) {
    if input.trim().is_empty() {
        return;
    }

    let spinner = Spinner::start("Loading competitors...");
    let submission = view.submit(api, input).await;
    spinner.stop().await;

    match submission {
        Submission::Ignored => {}
        Submission::Loaded => println!("\n{}", render_screen(view)),
        Submission::Failed(e) => {
            eprintln!("error: {}", e);
            println!("\n{}", render_screen(view));
        }
    }
}

/// Interactive loop. `back` returns to the search screen; `quit`, `exit`,
/// Ctrl+D or Ctrl+C leave.
pub async fn run(api: &dyn CompetitorsApi) -> Result<()> {
    let mut view = ClientView::new();
    println!("{}", render_screen(&view));

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\nrivals> ");
        io::stdout().flush()?;

        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        match line.trim() {
            "quit" | "exit" | "/quit" | "/exit" => break,
            "back" | "/back" => {
                view.back();
                println!("{}", render_screen(&view));
            }
            input => {
                // Ctrl+C during a lookup cancels the lookup, not the REPL
                let interrupted = tokio::select! {
                    _ = lookup(&mut view, api, input) => false,
                    _ = tokio::signal::ctrl_c() => true,
                };
                if interrupted {
                    println!("\n\ninterrupted");
                    view.back();
                }
            }
        }
    }

    println!("goodbye.");
    Ok(())
}
