use recipes_core::ViewState;
use termcolor::{ColorChoice, StandardStream};
use tokio::io::BufReader;

use crate::{
    app_config::AppConfig,
    args::{BrowseArgs, OutputFormat},
    browse::{Browser, HELP},
    formatters::ViewFormatter,
    web_client::HttpClient,
};

pub async fn browse_cmd(config: &AppConfig, args: BrowseArgs) -> anyhow::Result<()> {
    let client = HttpClient::new(&config.base_url)?;
    let state = ViewState::new(args.limit.unwrap_or(config.page_size));

    let (output, choice) = if args.plain {
        (OutputFormat::Plain, ColorChoice::Never)
    } else {
        (OutputFormat::Pretty, ColorChoice::Auto)
    };

    let mut stdout = StandardStream::stdout(choice);
    println!("Recipes from {}\n{}", client.search_url(), HELP);

    let input = BufReader::new(tokio::io::stdin());
    Browser::new(client, ViewFormatter::new(output))
        .run(state, input, &mut stdout)
        .await?;

    Ok(())
}
