//! Interactive command parsing and dispatch.
//!
//! Lines starting with `:` are commands; anything else is a search query.
//! Page commands only ever reach the session with pages the pager offers.

use moviescout_tmdb::MovieGateway;

use crate::session::{NotificationSink, SearchSession};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Free text: start a new search (empty clears it).
    Search(String),
    /// `:page N`
    Page(u32),
    Next,
    Prev,
    /// `:open N`, 1-based grid index.
    Open(usize),
    Close,
    Refresh,
    Help,
    Quit,
}

/// Input line that is not a valid command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command :{0} (try :help)")]
    Unknown(String),
    #[error(":{0} needs a number")]
    MissingArgument(&'static str),
    #[error("{0:?} is not a number")]
    InvalidNumber(String),
}

impl Command {
    /// Parse one input line.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] for unknown commands or bad arguments.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Self::Search(line.to_string()));
        };

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();
        match name {
            "page" | "p" => Ok(Self::Page(number_arg("page", arg)?)),
            "next" | "n" => Ok(Self::Next),
            "prev" => Ok(Self::Prev),
            "open" | "o" => Ok(Self::Open(number_arg("open", arg)?)),
            "close" | "c" => Ok(Self::Close),
            "refresh" | "r" => Ok(Self::Refresh),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn number_arg<T: std::str::FromStr>(
    command: &'static str,
    arg: Option<&str>,
) -> Result<T, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(command))?;
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}

/// What the front end should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Redraw the result view.
    Render,
    /// Show the selected movie's details.
    ShowDetail,
    ShowHelp,
    Quit,
    /// The command could not be carried out.
    Reject(String),
}

/// Apply a command to a session.
pub fn apply<G, N>(session: &mut SearchSession<G, N>, command: Command) -> Action
where
    G: MovieGateway + 'static,
    N: NotificationSink,
{
    match command {
        Command::Search(query) => {
            session.submit_query(query);
            Action::Render
        }
        Command::Page(n) => match session.pager().and_then(|p| p.page(n)) {
            Some(page) => {
                session.go_to_page(page);
                Action::Render
            }
            None => Action::Reject(format!("there is no page {n}")),
        },
        Command::Next => match session.pager().and_then(|p| p.next()) {
            Some(page) => {
                session.go_to_page(page);
                Action::Render
            }
            None => Action::Reject("already on the last page".into()),
        },
        Command::Prev => match session.pager().and_then(|p| p.prev()) {
            Some(page) => {
                session.go_to_page(page);
                Action::Render
            }
            None => Action::Reject("already on the first page".into()),
        },
        Command::Open(index) => {
            let movie = index
                .checked_sub(1)
                .and_then(|i| session.view().items().get(i))
                .cloned();
            match movie {
                Some(movie) => match session.select_movie(&movie) {
                    Ok(()) => Action::ShowDetail,
                    Err(e) => Action::Reject(e.to_string()),
                },
                None => Action::Reject(format!("there is no result {index}")),
            }
        }
        Command::Close => {
            session.dismiss_selection();
            Action::Render
        }
        Command::Refresh => {
            session.refresh();
            Action::Render
        }
        Command::Help => Action::ShowHelp,
        Command::Quit => Action::Quit,
    }
}
