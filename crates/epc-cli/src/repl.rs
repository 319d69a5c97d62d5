//! Line-oriented interactive session.
//!
//! Each line is one action against a single [`SearchSession`], so paging
//! and selection carry over between commands. Failed actions print an
//! error and leave the session as it was.

use std::io::{self, BufRead, Write};

use epc_client::Registry;
use epc_session::SearchSession;

const PROMPT: &str = "epc> ";

const HELP: &str = "\
commands:
  search <postcode or address>   search on the current page
  next                           next page
  prev                           previous page
  select <n>                     show result n with its postcode comparison
  show <uprn>                    show a certificate by UPRN
  page                           print the current page number
  reset                          go back to page 1 without searching
  help                           this text
  quit                           leave";

/// One parsed REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Submit a search
    Search(String),
    /// Next page
    Next,
    /// Previous page
    Previous,
    /// Select a result by 0-based index
    Select(usize),
    /// Look up a UPRN directly
    Show(String),
    /// Print the page number
    Page,
    /// Reset the page cursor
    Reset,
    /// Print help
    Help,
    /// Leave the loop
    Quit,
}

impl ReplCommand {
    /// Parses a line. Blank lines give `Ok(None)`.
    ///
    /// `select` takes the 1-based number shown next to each result.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((line, ""));

        let command = match (word.to_ascii_lowercase().as_str(), rest) {
            ("search" | "s", "") => return Err("usage: search <postcode or address>".into()),
            ("search" | "s", term) => ReplCommand::Search(term.to_string()),
            ("next" | "n", "") => ReplCommand::Next,
            ("prev" | "previous" | "p", "") => ReplCommand::Previous,
            ("select", n) => {
                let n: usize = n
                    .parse()
                    .map_err(|_| format!("usage: select <n>, got '{n}'"))?;
                let index = n.checked_sub(1).ok_or("results are numbered from 1")?;
                ReplCommand::Select(index)
            }
            ("show", "") => return Err("usage: show <uprn>".into()),
            ("show", uprn) => ReplCommand::Show(uprn.to_string()),
            ("page", "") => ReplCommand::Page,
            ("reset", "") => ReplCommand::Reset,
            ("help" | "?", _) => ReplCommand::Help,
            ("quit" | "exit" | "q", _) => ReplCommand::Quit,
            _ => return Err(format!("unknown command '{line}' (try 'help')")),
        };
        Ok(Some(command))
    }
}

/// Reads commands from `input` until `quit` or end of input.
///
/// Results go to `out`, errors to `err`. Only I/O failures on the streams
/// end the loop early.
pub async fn run<R, I, O, E>(
    session: &mut SearchSession<R>,
    input: I,
    out: &mut O,
    err: &mut E,
) -> io::Result<()>
where
    R: Registry,
    I: BufRead,
    O: Write,
    E: Write,
{
    write!(out, "{PROMPT}")?;
    out.flush()?;

    for line in input.lines() {
        match ReplCommand::parse(&line?) {
            Ok(None) => {}
            Ok(Some(ReplCommand::Quit)) => return Ok(()),
            Ok(Some(command)) => {
                if let Err(e) = execute(session, command, out).await {
                    match e {
                        Failure::Io(e) => return Err(e),
                        Failure::Epc(e) => writeln!(err, "error: {e}")?,
                    }
                }
            }
            Err(message) => writeln!(err, "error: {message}")?,
        }
        write!(out, "{PROMPT}")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

enum Failure {
    Io(io::Error),
    Epc(epc_core::EpcError),
}

impl From<io::Error> for Failure {
    fn from(e: io::Error) -> Self {
        Failure::Io(e)
    }
}

impl From<epc_core::EpcError> for Failure {
    fn from(e: epc_core::EpcError) -> Self {
        Failure::Epc(e)
    }
}

async fn execute<R, O>(
    session: &mut SearchSession<R>,
    command: ReplCommand,
    out: &mut O,
) -> Result<(), Failure>
where
    R: Registry,
    O: Write,
{
    match command {
        ReplCommand::Search(term) => writeln!(out, "{}", session.submit(&term).await?)?,
        ReplCommand::Next => writeln!(out, "{}", session.next_page().await?)?,
        ReplCommand::Previous => writeln!(out, "{}", session.previous_page().await?)?,
        ReplCommand::Select(index) => writeln!(out, "{}", session.select(index).await?)?,
        ReplCommand::Show(uprn) => writeln!(out, "{}", session.show_uprn(&uprn).await?)?,
        ReplCommand::Page => writeln!(out, "page {}", session.current_page())?,
        ReplCommand::Reset => {
            session.reset_page();
            writeln!(out, "page 1")?;
        }
        ReplCommand::Help => writeln!(out, "{HELP}")?,
        ReplCommand::Quit => {}
    }
    Ok(())
}
