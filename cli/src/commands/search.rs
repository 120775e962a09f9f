use anyhow::Context;
use recipes_core::ViewState;
use termcolor::{ColorChoice, StandardStream};

use crate::{
    app_config::AppConfig,
    args::{OutputFormat, SearchArgs},
    formatters::ViewFormatter,
    web_client::{HttpClient, RecipeSource},
};

pub async fn search_cmd(config: &AppConfig, args: SearchArgs) -> anyhow::Result<()> {
    let client = HttpClient::new(&config.base_url)?;
    let state = run_search(&client, config, &args).await?;

    let choice = match args.output {
        OutputFormat::Pretty => ColorChoice::Auto,
        OutputFormat::Plain | OutputFormat::Json => ColorChoice::Never,
    };
    let mut stdout = StandardStream::stdout(choice);
    ViewFormatter::new(args.output)
        .print_view(&mut stdout, &state)
        .context("Error while formatting recipes")?;

    if state.error().is_some() {
        anyhow::bail!("Search failed");
    }

    Ok(())
}

/// Run a single search through the view state and return it settled
pub async fn run_search<S: RecipeSource>(
    source: &S,
    config: &AppConfig,
    args: &SearchArgs,
) -> anyhow::Result<ViewState> {
    let mut state = ViewState::new(args.limit.unwrap_or(config.page_size));

    let filters = args.filters.to_filters();
    let mut ticket = None;
    for (key, value) in filters.active() {
        ticket = state.set_filter(key, value).or(ticket);
    }
    ticket = state.set_page(args.page).or(ticket);
    let ticket = ticket.unwrap_or_else(|| state.refresh());

    let result = source.search(ticket.request).await;
    state.complete(ticket.generation, result);

    if let Some(row) = args.details {
        let index = (row as usize).checked_sub(1);
        if state.error().is_none() && index.and_then(|i| state.select_row(i)).is_none() {
            anyhow::bail!("No row {} on page {}", row, state.page());
        }
    }

    Ok(state)
}
