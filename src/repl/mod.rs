//! REPL Module
//!
//! The interactive read/evaluate loop and the session state it drives.

mod command;
mod input;
mod session;

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::error::Result;

pub use command::{Command, COMMANDS};
pub use input::clean_input;
pub use session::{catch_succeeds, Outcome, Session};

/// Prompt printed before every line is read
pub const PROMPT: &str = "Pokedex > ";

/// Reads commands line by line from `input` until `exit` or end of input.
///
/// A failing command prints `Error: ...` and the loop carries on; only I/O
/// errors on `input` or `out` end it early.
pub async fn run<R, W>(session: &mut Session, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        let Some(command) = Command::parse(&clean_input(&line)) else {
            continue;
        };

        match session.execute(command, out).await {
            Ok(Outcome::Exit) => break,
            Ok(Outcome::Continue) => {}
            Err(err) => {
                warn!(error = %err, "Command failed");
                writeln!(out, "Error: {}", err)?;
            }
        }
    }

    Ok(())
}
