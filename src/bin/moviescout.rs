//! Interactive terminal client for moviescout.
//!
//! Reads one command or query per line from stdin and prints the result
//! view to stdout. Tracing and notices go to stderr.

use moviescout::command::{self, Action, Command};
use moviescout::render::{render_detail, render_view, HELP_TEXT};
use moviescout::session::{Notice, SearchSession, Settlement};
use moviescout::ScoutConfig;
use moviescout_tmdb::{MovieGateway, TmdbGateway};
use tokio::io::{AsyncBufReadExt, BufReader};

fn print_notice(notice: &Notice) {
    eprintln!("! {}", notice.message());
}

type Session = SearchSession<TmdbGateway, fn(&Notice)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("moviescout=info,moviescout_tmdb=info")
            }),
        )
        .init();

    let config = ScoutConfig::load()?;
    tracing::debug!(?config, "config loaded");

    let mut session: Session = SearchSession::from_config(&config, print_notice as fn(&Notice))?;

    println!("moviescout v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", render_view(session.view(), session.pager()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::info!("stdin closed; exiting");
                    break;
                };
                if !handle_line(&mut session, &line) {
                    break;
                }
            }
            Some(settlement) = session.settle_next(), if session.has_pending() => {
                if matches!(settlement, Settlement::Applied { .. }) {
                    redraw(&session);
                }
            }
        }
    }

    Ok(())
}

/// Returns `false` when the user asked to quit.
fn handle_line<G: MovieGateway + 'static>(
    session: &mut SearchSession<G, fn(&Notice)>,
    line: &str,
) -> bool {
    let command = match Command::parse(line) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}");
            return true;
        }
    };

    match command::apply(session, command) {
        Action::Render => redraw(session),
        Action::ShowDetail => {
            if let Some(movie) = session.selection() {
                println!("{}", render_detail(movie));
                println!("(:close to return)");
            }
        }
        Action::ShowHelp => println!("{HELP_TEXT}"),
        Action::Reject(reason) => eprintln!("{reason}"),
        Action::Quit => return false,
    }
    true
}

fn redraw<G: MovieGateway + 'static>(session: &SearchSession<G, fn(&Notice)>) {
    println!("{}", render_view(session.view(), session.pager()));
    if let Some(movie) = session.selection() {
        println!("(details open for {}; :close to dismiss)", movie.title);
    }
}
