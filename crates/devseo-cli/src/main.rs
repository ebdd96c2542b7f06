mod research;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use devseo_core::{Locale, QueryKind};
use devseo_dataforseo::DataForSeoClient;
use devseo_research::SearchInput;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "devseo-cli")]
#[command(about = "DevSEO keyword research command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List selectable locations and the languages they offer
    Locations {
        /// Only show locations whose name contains this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Related keywords for a seed keyword
    Related {
        keyword: String,
        #[command(flatten)]
        target: TargetArgs,
        /// Related-keyword tree depth (1-4)
        #[arg(long)]
        depth: Option<u8>,
        /// Number of results (10, 20, 50 or 100)
        #[arg(long)]
        limit: Option<u32>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Long-tail suggestions containing a seed keyword
    Suggestions {
        keyword: String,
        #[command(flatten)]
        target: TargetArgs,
        /// Number of results (10, 20, 50 or 100)
        #[arg(long)]
        limit: Option<u32>,
        /// Skip SERP information in the results
        #[arg(long)]
        no_serp_info: bool,
        /// Leave the seed keyword out of the results
        #[arg(long)]
        no_seed_keyword: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Keyword ideas for a list of seed keywords
    Ideas {
        #[arg(required = true, num_args = 1..)]
        keywords: Vec<String>,
        #[command(flatten)]
        target: TargetArgs,
        /// Number of results (20, 50 or 100)
        #[arg(long)]
        limit: Option<u32>,
        /// Skip SERP information in the results
        #[arg(long)]
        no_serp_info: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Location and language; omitted values fall back to United States / English.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
struct TargetArgs {
    /// Location name, e.g. "Germany"
    #[arg(long)]
    location: Option<String>,
    /// Language name, e.g. "German"
    #[arg(long)]
    language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
struct OutputArgs {
    /// Write results as CSV. A directory (or no value) uses the default file name.
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = ".")]
    csv: Option<PathBuf>,
    /// Print the rendered result view as JSON
    #[arg(long, conflicts_with = "csv")]
    json: bool,
    /// Locale for number formatting (defaults to DEVSEO_DEFAULT_LOCALE)
    #[arg(long)]
    locale: Option<Locale>,
}

impl Commands {
    /// Query kind, form input and output options for search commands.
    fn search(&self) -> Option<(QueryKind, SearchInput, &OutputArgs)> {
        match self {
            Self::Locations { .. } => None,
            Self::Related {
                keyword,
                target,
                depth,
                limit,
                output,
            } => Some((
                QueryKind::Related,
                SearchInput {
                    keyword: Some(keyword.clone()),
                    depth: *depth,
                    limit: *limit,
                    ..target.input()
                },
                output,
            )),
            Self::Suggestions {
                keyword,
                target,
                limit,
                no_serp_info,
                no_seed_keyword,
                output,
            } => Some((
                QueryKind::Suggestions,
                SearchInput {
                    keyword: Some(keyword.clone()),
                    limit: *limit,
                    include_serp_info: Some(!no_serp_info),
                    include_seed_keyword: Some(!no_seed_keyword),
                    ..target.input()
                },
                output,
            )),
            Self::Ideas {
                keywords,
                target,
                limit,
                no_serp_info,
                output,
            } => Some((
                QueryKind::Ideas,
                SearchInput {
                    keywords: keywords.clone(),
                    limit: *limit,
                    include_serp_info: Some(!no_serp_info),
                    ..target.input()
                },
                output,
            )),
        }
    }
}

impl TargetArgs {
    fn input(&self) -> SearchInput {
        SearchInput {
            location: self.location.clone(),
            language: self.language.clone(),
            ..SearchInput::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("devseo-cli ready; run with --help to list commands");
        return Ok(());
    };

    let config = devseo_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = DataForSeoClient::with_base_url(
        &config.dataforseo_auth_token,
        config.dataforseo_timeout_secs,
        &config.user_agent,
        &config.dataforseo_base_url,
    )?;

    if let Commands::Locations { filter } = &command {
        return research::run_locations(&client, filter.as_deref()).await;
    }
    match command.search() {
        Some((kind, input, output)) => {
            research::run_search(&client, kind, &input, output, config.default_locale).await
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests;
