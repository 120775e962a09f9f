use std::io::Write;
use std::str::FromStr;

use anyhow::Context;
use recipes_core::{FetchError, FetchTicket, FilterKey, PageEnvelope, PageSize, ViewState};
use termcolor::WriteColor;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::formatters::ViewFormatter;
use crate::web_client::RecipeSource;

pub const HELP: &str = "\
Commands:
  filter <title|cuisine|rating|total_time|calories> [value]   set or clear one filter
  clear                                                       clear every filter
  next | prev                                                 move one page
  page <n>                                                    jump to page n
  size <15|20|25|30|40|50>                                    results per page
  show <row>                                                  open the detail panel for a row
  close                                                       close the detail panel
  help                                                        show this text
  quit                                                        leave";

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    Filter(FilterKey, String),
    Clear,
    Next,
    Prev,
    Page(u32),
    Size(PageSize),
    Show(usize),
    Close,
    Help,
    Quit,
}

impl FromStr for BrowseCommand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((line, ""));

        match word.to_ascii_lowercase().as_str() {
            "filter" | "f" => {
                let (key, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(k, v)| (k, v.trim()))
                    .unwrap_or((rest, ""));
                if key.is_empty() {
                    anyhow::bail!("Usage: filter <field> [value]");
                }
                Ok(Self::Filter(key.parse()?, value.to_string()))
            }
            "clear" => Ok(Self::Clear),
            "next" | "n" => Ok(Self::Next),
            "prev" | "p" => Ok(Self::Prev),
            "page" => {
                let page: u32 = rest.parse().context("Usage: page <n>")?;
                Ok(Self::Page(page))
            }
            "size" => {
                let size: u32 = rest.parse().context("Usage: size <n>")?;
                Ok(Self::Size(PageSize::try_from(size)?))
            }
            "show" => {
                let row: usize = rest.parse().context("Usage: show <row>")?;
                if row == 0 {
                    anyhow::bail!("Rows are numbered from 1");
                }
                Ok(Self::Show(row))
            }
            "close" => Ok(Self::Close),
            "help" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => anyhow::bail!("Unknown command '{}', type 'help'", other),
        }
    }
}

/// Outcome of one command against the view
#[derive(Debug, PartialEq)]
pub enum Applied {
    Fetch(FetchTicket),
    Redraw,
    Message(String),
    Quit,
}

/// Apply a command. Page moves are clamped here; the view itself does not clamp.
pub fn apply_command(state: &mut ViewState, command: BrowseCommand) -> Applied {
    let ticket = match command {
        BrowseCommand::Filter(key, value) => state.set_filter(key, value),
        BrowseCommand::Clear => state.clear_filters(),
        BrowseCommand::Next => {
            if !state.has_next() {
                return Applied::Message("Already on the last page".to_string());
            }
            state.set_page(state.page() + 1)
        }
        BrowseCommand::Prev => {
            if !state.has_prev() {
                return Applied::Message("Already on the first page".to_string());
            }
            state.set_page(state.page() - 1)
        }
        BrowseCommand::Page(page) => {
            let last = u32::try_from(state.total_pages()).unwrap_or(u32::MAX);
            state.set_page(page.clamp(1, last))
        }
        BrowseCommand::Size(size) => state.set_page_size(size),
        BrowseCommand::Show(row) => {
            return match state.select_row(row - 1) {
                Some(_) => Applied::Redraw,
                None => Applied::Message(format!("No row {} on this page", row)),
            };
        }
        BrowseCommand::Close => {
            state.select(None);
            return Applied::Redraw;
        }
        BrowseCommand::Help => return Applied::Message(HELP.to_string()),
        BrowseCommand::Quit => return Applied::Quit,
    };

    match ticket {
        Some(ticket) => Applied::Fetch(ticket),
        None => Applied::Redraw,
    }
}

type Completion = (u64, Result<PageEnvelope, FetchError>);

/// Interactive session: reads commands from `input`, renders to `out`.
///
/// Fetches run on spawned tasks and report back over a channel; the view
/// drops any completion that is no longer the latest. When input ends the
/// loop waits for in-flight fetches before returning the final state.
pub struct Browser<S: RecipeSource> {
    source: S,
    formatter: ViewFormatter,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl<S: RecipeSource> Browser<S> {
    pub fn new(source: S, formatter: ViewFormatter) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            source,
            formatter,
            completions_tx,
            completions_rx,
            in_flight: 0,
        }
    }

    pub async fn run<R, W>(
        mut self,
        mut state: ViewState,
        input: R,
        out: &mut W,
    ) -> anyhow::Result<ViewState>
    where
        R: AsyncBufRead + Unpin,
        W: WriteColor,
    {
        let mut lines = input.lines();
        let mut input_open = true;

        let ticket = state.refresh();
        self.spawn(ticket);
        self.draw(out, &state)?;

        loop {
            if !input_open && self.in_flight == 0 {
                break;
            }

            tokio::select! {
                line = lines.next_line(), if input_open => {
                    let Some(line) = line.context("Failed to read command")? else {
                        debug!("input closed, waiting for {} fetches", self.in_flight);
                        input_open = false;
                        continue;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }

                    match line.parse::<BrowseCommand>() {
                        Ok(command) => match apply_command(&mut state, command) {
                            Applied::Fetch(ticket) => {
                                self.spawn(ticket);
                                self.draw(out, &state)?;
                            }
                            Applied::Redraw => self.draw(out, &state)?,
                            Applied::Message(message) => writeln!(out, "{}", message)?,
                            Applied::Quit => break,
                        },
                        Err(e) => writeln!(out, "{}", e)?,
                    }
                }
                Some((generation, result)) = self.completions_rx.recv() => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    if state.complete(generation, result) {
                        self.draw(out, &state)?;
                    } else {
                        debug!(generation, latest = state.generation(), "discarded stale search result");
                    }
                }
            }
        }

        Ok(state)
    }

    fn spawn(&mut self, ticket: FetchTicket) {
        info!(generation = ticket.generation, query = %ticket.request.query_string(), "fetching");

        let source = self.source.clone();
        let tx = self.completions_tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let result = source.search(ticket.request).await;
            // The receiver is gone only after the session ended
            let _ = tx.send((ticket.generation, result));
        });
    }

    fn draw<W: WriteColor>(&self, out: &mut W, state: &ViewState) -> anyhow::Result<()> {
        writeln!(out)?;
        self.formatter
            .print_view(out, state)
            .context("Failed to render view")?;
        out.flush()?;
        Ok(())
    }
}
