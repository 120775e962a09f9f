use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use recipes_core::{FilterKey, Filters, PageSize};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(
    name = "recipes",
    version,
    about,
    long_about = "Search, filter and page through recipes served by a recipe search API"
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Debug, Args, Serialize)]
pub struct ConfigArgs {
    /// Name of the profile to use
    #[arg(long, short, env = "RECIPES_PROFILE", global = true)]
    pub profile_path: Option<String>,

    /// Base URL of the recipe search API
    #[arg(long, env = "RECIPES_API_URL", global = true)]
    pub base_url: Option<String>,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Command {
    /// Prints out current configuration
    Config,
    /// Fetches one page of recipes and prints it
    Search(SearchArgs),
    /// Interactive table: edit filters and page through results
    Browse(BrowseArgs),
    /// Profile management
    Profile {
        #[clap(subcommand)]
        command: Option<ProfileCommand>,
    },
    /// Prints shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum ProfileCommand {
    /// Switch to a profile, creating it when missing
    Use {
        name: String,
        /// Store this API base URL in the profile
        #[arg(long)]
        url: Option<String>,
        /// Store this page size in the profile
        #[arg(long, value_parser = parse_page_size)]
        page_size: Option<PageSize>,
    },
    /// List available profiles
    List,
    /// Show the current profile
    Current,
}

#[derive(Debug, Clone, ValueEnum, PartialEq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Plain,
    Json,
}

#[derive(Debug, Clone, Args, PartialEq, Default)]
pub struct FilterArgs {
    /// Filter by title
    #[arg(long)]
    pub title: Option<String>,

    /// Filter by cuisine
    #[arg(long)]
    pub cuisine: Option<String>,

    /// Filter by rating, e.g. ">=4"
    #[arg(long, allow_hyphen_values = true)]
    pub rating: Option<String>,

    /// Filter by total time in minutes, e.g. "<=60"
    #[arg(long, allow_hyphen_values = true)]
    pub total_time: Option<String>,

    /// Filter by calories, e.g. "<=400"
    #[arg(long, allow_hyphen_values = true)]
    pub calories: Option<String>,
}

impl FilterArgs {
    pub fn to_filters(&self) -> Filters {
        let mut filters = Filters::default();
        let values = [
            (FilterKey::Title, &self.title),
            (FilterKey::Cuisine, &self.cuisine),
            (FilterKey::Rating, &self.rating),
            (FilterKey::TotalTime, &self.total_time),
            (FilterKey::Calories, &self.calories),
        ];

        for (key, value) in values {
            if let Some(value) = value {
                filters.set(key, value.clone());
            }
        }

        filters
    }
}

#[derive(Debug, Clone, Args, PartialEq)]
pub struct SearchArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Results per page (15, 20, 25, 30, 40 or 50)
    #[arg(long, short = 'l', value_parser = parse_page_size)]
    pub limit: Option<PageSize>,

    /// Show the detail panel for this row (1-based)
    #[arg(long, value_name = "ROW", value_parser = clap::value_parser!(u32).range(1..))]
    pub details: Option<u32>,

    /// Output format (pretty, plain, or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Args, PartialEq)]
pub struct BrowseArgs {
    /// Initial results per page
    #[arg(long, short = 'l', value_parser = parse_page_size)]
    pub limit: Option<PageSize>,

    /// Disable colors
    #[arg(long, default_value_t = false)]
    pub plain: bool,
}

pub fn parse_page_size(s: &str) -> anyhow::Result<PageSize> {
    let value: u32 = s.trim().parse()?;
    Ok(PageSize::try_from(value)?)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_search_args_to_filters() {
        let args = CliArgs::try_parse_from([
            "recipes",
            "search",
            "--cuisine",
            "Italian",
            "--rating",
            ">=4",
            "--limit",
            "20",
        ])
        .unwrap();

        let Some(Command::Search(search)) = args.command else {
            unreachable!("expected search command");
        };

        let filters = search.filters.to_filters();
        assert_eq!(filters.cuisine, "Italian");
        assert_eq!(filters.rating, ">=4");
        assert!(filters.title.is_empty());
        assert_eq!(search.limit.unwrap().get(), 20);
        assert_eq!(search.page, 1);
    }

    #[test]
    fn test_invalid_limit_is_rejected() {
        let result = CliArgs::try_parse_from(["recipes", "search", "--limit", "17"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_details_row_zero_is_rejected() {
        let result = CliArgs::try_parse_from(["recipes", "search", "--details", "0"]);
        assert!(result.is_err());

        let args = CliArgs::try_parse_from(["recipes", "search", "--details", "1"]).unwrap();
        let Some(Command::Search(search)) = args.command else {
            unreachable!("expected search command");
        };
        assert_eq!(search.details, Some(1));
    }

    #[test]
    fn test_page_zero_is_rejected() {
        let result = CliArgs::try_parse_from(["recipes", "search", "--page", "0"]);
        assert!(result.is_err());
    }
}
