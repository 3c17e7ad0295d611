//! Browse command - interactive gallery driven from stdin
//!
//! Each input line is one trigger. Plain text submits a new search and an
//! empty line asks for the next page, standing in for scrolling to the end
//! of the gallery. Lines starting with `:` are browse commands.
//!
//! Reading continues while a page is being fetched, so a search typed during
//! a slow request replaces the running session straight away.

use std::future::{Future, poll_fn};
use std::io::{IsTerminal, Write};
use std::pin::Pin;
use std::sync::Arc;
use std::task::Poll;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use super::App;
use crate::{
    PixfeedError,
    loader::{LoadState, Trigger, TriggerOutcome},
};

type Result<T> = std::result::Result<T, PixfeedError>;

/// Printed when a more request finds nothing left to load
pub const NOTHING_MORE: &str = "No more results. Type a new search.";

/// Printed when a more request arrives before any search
pub const NO_SEARCH_YET: &str = "Type a search to begin.";

const HELP: &[&str] = &[
    "<text>        search for <text>",
    "<Enter>       load more results",
    ":open N       open image N in the system viewer",
    ":top          print the gallery again",
    ":s <text>     search, even for text starting with ':'",
    ":help         show this help",
    ":q            quit",
];

/// One line of browse input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    /// Load the next page
    More,
    /// Start a new search
    Search(String),
    /// Open the image at a 1-based position
    Open(usize),
    /// Print the gallery again
    Top,
    Help,
    Quit,
}

impl BrowseCommand {
    /// Parse one input line
    ///
    /// # Errors
    ///
    /// Returns `PixfeedError::InvalidInput` for an unknown `:` command or a
    /// missing or malformed `:open` position.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Self::More);
        }
        let Some(command) = line.strip_prefix(':') else {
            return Ok(Self::Search(line.to_string()));
        };

        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(name, arg)| (name, arg.trim()));

        match name {
            "m" | "more" => Ok(Self::More),
            "s" | "search" => Ok(Self::Search(arg.to_string())),
            "o" | "open" => arg
                .parse()
                .map(Self::Open)
                .map_err(|_| PixfeedError::InvalidInput(format!("Usage: :open N (got '{arg}')"))),
            "t" | "top" => Ok(Self::Top),
            "h" | "help" | "?" => Ok(Self::Help),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            _ => Err(PixfeedError::InvalidInput(format!(
                "Unknown command ':{name}'. Type :help for commands."
            ))),
        }
    }

    /// The controller trigger this command raises, if any
    #[must_use]
    pub fn trigger(&self) -> Option<Trigger> {
        match self {
            Self::More => Some(Trigger::ScrollEnd),
            Self::Search(text) => Some(Trigger::Submit(text.clone())),
            _ => None,
        }
    }
}

/// Whether the browse loop keeps reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Raise `trigger` and print hints for scrolls that had nothing to do
pub async fn raise(app: &App, trigger: Trigger) -> TriggerOutcome {
    let scroll = trigger.is_scroll();
    let outcome = app.controller.handle_trigger(trigger).await;
    debug!(?outcome, scroll, "trigger handled");

    if scroll && outcome == TriggerOutcome::Ignored && !app.quiet {
        match app.controller.state() {
            LoadState::Exhausted => app.writer.info(NOTHING_MORE),
            LoadState::Idle => app.writer.info(NO_SEARCH_YET),
            LoadState::Ready | LoadState::Fetching => {}
        }
    }
    outcome
}

/// Act on one browse command, waiting for any fetch it starts
pub async fn dispatch(app: &App, command: BrowseCommand) -> Flow {
    if let Some(trigger) = command.trigger() {
        raise(app, trigger).await;
        return Flow::Continue;
    }

    match command {
        BrowseCommand::Open(position) => match app.gallery.open(position) {
            Ok(url) => {
                if !app.quiet {
                    app.writer.info(&format!("Opening {url}"));
                }
            }
            Err(e) => app.writer.error(&e.to_string()),
        },
        BrowseCommand::Top => app.gallery.reprint(),
        BrowseCommand::Help => {
            for line in HELP {
                app.writer.info(line);
            }
        }
        BrowseCommand::Quit => return Flow::Quit,
        BrowseCommand::More | BrowseCommand::Search(_) => {}
    }
    Flow::Continue
}

type TriggerFuture = Pin<Box<dyn Future<Output = TriggerOutcome> + Send>>;

/// Poll a trigger once on the input loop, then let it finish in `tasks`
///
/// The first poll runs everything up to the transport call, so triggers reach
/// the controller in the order they were typed even though their fetches
/// complete in the background.
async fn start(tasks: &mut JoinSet<TriggerOutcome>, app: &Arc<App>, trigger: Trigger) {
    let app = Arc::clone(app);
    let mut task: TriggerFuture = Box::pin(async move { raise(&app, trigger).await });

    match poll_fn(|cx| Poll::Ready(task.as_mut().poll(cx))).await {
        Poll::Ready(outcome) => debug!(?outcome, "trigger finished on first poll"),
        Poll::Pending => {
            tasks.spawn(task);
        }
    }
}

/// Drive a browse session from `input`
///
/// Input keeps being read while a fetch is outstanding: a scroll typed in the
/// meantime is ignored by the controller and a new search replaces the
/// session, leaving the older fetch to be discarded when it lands. End of
/// input waits for outstanding fetches; `:q` cancels them.
///
/// # Errors
///
/// Returns `PixfeedError::IoError` if `input` or stdout fails.
pub async fn run<R>(
    app: Arc<App>,
    input: R,
    interactive: bool,
    initial: Option<String>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut tasks = JoinSet::new();
    let mut prompt = true;

    if let Some(query) = initial {
        start(&mut tasks, &app, Trigger::Submit(query)).await;
    }

    loop {
        if interactive && prompt && tasks.is_empty() {
            print!("> ");
            std::io::stdout().flush()?;
            prompt = false;
        }

        tokio::select! {
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                if let Err(e) = joined {
                    warn!(error = %e, "browse trigger task failed");
                }
                prompt = true;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                prompt = true;

                match BrowseCommand::parse(&line) {
                    Ok(command) => {
                        if let Some(trigger) = command.trigger() {
                            start(&mut tasks, &app, trigger).await;
                        } else if dispatch(&app, command).await == Flow::Quit {
                            tasks.shutdown().await;
                            return Ok(());
                        }
                    }
                    Err(e) => app.writer.error(&e.to_string()),
                }
            }
        }
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            warn!(error = %e, "browse trigger task failed");
        }
    }
    Ok(())
}

/// Execute the browse command
///
/// Runs `initial` as the first search when given, then reads commands from
/// stdin until `:q` or end of input.
///
/// # Errors
///
/// Returns `PixfeedError::IoError` if stdin cannot be read.
pub async fn execute(app: Arc<App>, initial: Option<String>) -> Result<()> {
    let interactive = std::io::stdin().is_terminal();

    if !app.quiet && interactive {
        app.writer
            .info("Type a search and press Enter. Empty line loads more, :help lists commands.");
    }

    run(app, BufReader::new(tokio::io::stdin()), interactive, initial).await
}
