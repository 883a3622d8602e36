use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use clap::{Parser, Subcommand};

use crate::catalog::{load_cards, sort_entries, summarize};
use crate::chat::{HttpPortalClient, PortalApi, RecentProjects, format_reply, to_plain_text};
use crate::config::{DEFAULT_API_BASE, DEFAULT_CARDS, PortalConfig};
use crate::filters::apply::{filter_stats_label, search_stats_label};
use crate::filters::export::{default_export_filename, export_results};
use crate::filters::{CategoryFilter, SearchState, is_no_match, visible_entries};
use crate::models::{CatalogEntry, ChatRequest};
use crate::utils::{humanize_identifier, sanitize_inline};
use crate::{logging, tui};

#[derive(Parser)]
#[command(name = "catalog-portal")]
#[command(version)]
#[command(about = "Browse the dbt documentation portal and ask questions about its projects", long_about = None)]
pub struct Cli {
    /// Card configuration: a path or an http(s) URL
    #[arg(long, global = true, env = "PORTAL_CARDS", default_value = DEFAULT_CARDS)]
    pub cards: String,

    /// Base URL of the portal API
    #[arg(long, global = true, env = "PORTAL_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Where recent projects and logs are kept (default: platform data directory)
    #[arg(long, global = true, env = "PORTAL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive portal (default)
    Browse,
    /// Print the cards matching a search
    List {
        /// Matched against the first word of each title
        #[arg(short, long, default_value = "")]
        query: String,
        /// "all", "recent" or a category tag
        #[arg(short, long, default_value = "all")]
        category: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show totals for the card configuration
    Stats,
    /// Write the cards matching a search to a JSON file
    Export {
        #[arg(short, long, default_value = "")]
        query: String,
        #[arg(short, long, default_value = "all")]
        category: String,
        /// Defaults to dbt-search-results-<date>.json in the working directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List chat projects known to the API
    Projects,
    /// Ask one question about a project and print the reply
    Chat {
        #[arg(short, long)]
        project: String,
        message: String,
    },
    /// Show recently used chat projects
    Recent,
}

pub fn run() -> Result<()> {
    run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> Result<()> {
    let config = PortalConfig::new(&cli.cards, &cli.api_base, cli.data_dir)?;

    let command = cli.command.unwrap_or(Commands::Browse);
    if !matches!(command, Commands::Browse) {
        logging::init_stderr()?;
    }

    match command {
        Commands::Browse => {
            // Runs without a log file when the data dir is unusable
            let _guard = match logging::init_file(&config.data_dir.join("logs")) {
                Ok(guard) => Some(guard),
                Err(e) => {
                    eprintln!("Logging disabled: {:#}", e);
                    None
                }
            };
            tui::run_interactive(&config)
        }
        Commands::List { query, category, json } => list_cards(&config, &query, &category, json),
        Commands::Stats => show_stats(&config),
        Commands::Export { query, category, output } => export_cards(&config, &query, &category, output),
        Commands::Projects => list_projects(&config),
        Commands::Chat { project, message } => ask(&config, &project, &message),
        Commands::Recent => show_recent(&config),
    }
}

fn load_sorted(config: &PortalConfig) -> Result<Vec<CatalogEntry>> {
    let mut entries = load_cards(&config.cards)?.entries;
    sort_entries(&mut entries);
    Ok(entries)
}

fn search_state(query: &str, category: &str) -> SearchState {
    SearchState::new().with_query(query).with_category(CategoryFilter::parse(category))
}

fn list_cards(config: &PortalConfig, query: &str, category: &str, json: bool) -> Result<()> {
    let entries = load_sorted(config)?;
    let state = search_state(query, category);
    let visible = visible_entries(&entries, &state);

    if json {
        println!("{}", export_results(&visible)?);
        return Ok(());
    }

    if let Some(hint) = state.hint() {
        eprintln!("{}", hint);
    }

    if is_no_match(&state, visible.len()) {
        println!("No projects found matching \"{}\"", state.query());
        return Ok(());
    }

    for entry in &visible {
        println!(
            "{} {} [{}]",
            sanitize_inline(&entry.icon),
            sanitize_inline(&entry.title),
            sanitize_inline(&entry.status)
        );
        println!("    {}", sanitize_inline(&entry.description));
        println!(
            "    {} · Updated {} ago · {} models · {}",
            sanitize_inline(&entry.category),
            sanitize_inline(&entry.last_updated),
            entry.model_count,
            sanitize_inline(&entry.url)
        );
    }

    println!();
    if state.query().is_empty() {
        println!("{}", filter_stats_label(state.category(), visible.len()));
    } else {
        println!("{}", search_stats_label(visible.len(), entries.len()));
    }

    Ok(())
}

fn show_stats(config: &PortalConfig) -> Result<()> {
    let entries = load_sorted(config)?;
    let stats = summarize(&entries);

    println!("Catalog Statistics");
    println!("==================");
    println!("Projects: {}", stats.projects);
    println!("Models: {}", stats.models);
    println!("Recently updated (24h): {}", stats.recently_updated);
    if !stats.by_category.is_empty() {
        println!("By category:");
        for (category, count) in &stats.by_category {
            println!("  {}: {}", sanitize_inline(category), count);
        }
    }
    println!();
    println!("Source: {}", config.cards);

    Ok(())
}

fn export_cards(config: &PortalConfig, query: &str, category: &str, output: Option<PathBuf>) -> Result<()> {
    let entries = load_sorted(config)?;
    let state = search_state(query, category);
    let visible = visible_entries(&entries, &state);

    let path = output.unwrap_or_else(|| PathBuf::from(default_export_filename(Local::now().date_naive())));
    let json = export_results(&visible)?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Exported {} projects to {}", visible.len(), path.display());
    Ok(())
}

fn list_projects(config: &PortalConfig) -> Result<()> {
    let client = HttpPortalClient::new(config.api_base.clone())?;
    let projects = client.list_projects().map_err(|e| anyhow!(e.projects_message()))?;

    if projects.is_empty() {
        println!("No projects available");
        return Ok(());
    }

    for project in &projects {
        let name = sanitize_inline(&project.name);
        let label = sanitize_inline(&project.label());
        match &project.dbt_version {
            Some(version) => println!("{}  {}  (dbt {})", name, label, sanitize_inline(version)),
            None => println!("{}  {}", name, label),
        }
    }

    Ok(())
}

fn ask(config: &PortalConfig, project: &str, message: &str) -> Result<()> {
    let project = project.trim();
    let message = message.trim();
    if project.is_empty() || message.is_empty() {
        anyhow::bail!("Both a project and a message are required");
    }

    let mut recent = RecentProjects::load(&config.data_dir);
    if let Err(e) = recent.record(project) {
        tracing::warn!("Failed to save recent projects: {:#}", e);
    }

    let client = HttpPortalClient::new(config.api_base.clone())?;
    let request = ChatRequest {
        project_name: project.to_string(),
        message: message.to_string(),
        conversation_history: Vec::new(),
    };
    let reply = client.send_chat(&request).map_err(|e| anyhow!(e.chat_message()))?;

    println!("{}", to_plain_text(&format_reply(&reply)));
    Ok(())
}

fn show_recent(config: &PortalConfig) -> Result<()> {
    let recent = RecentProjects::load(&config.data_dir);

    if recent.items().is_empty() {
        println!("No recent projects");
        return Ok(());
    }

    for name in recent.items() {
        println!("{}  ({})", sanitize_inline(name), sanitize_inline(&humanize_identifier(name)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_browse() {
        let cli = Cli::try_parse_from(["catalog-portal"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_list_arguments() {
        let cli = Cli::try_parse_from([
            "catalog-portal",
            "list",
            "--query",
            "ord",
            "--category",
            "recent",
            "--json",
            "--cards",
            "cards.json",
        ])
        .unwrap();

        assert_eq!(cli.cards, "cards.json");
        match cli.command {
            Some(Commands::List { query, category, json }) => {
                assert_eq!(query, "ord");
                assert_eq!(category, "recent");
                assert!(json);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_chat_requires_project() {
        assert!(Cli::try_parse_from(["catalog-portal", "chat", "hello"]).is_err());
    }

    #[test]
    fn test_search_state_from_arguments() {
        let state = search_state("  ORD ", "Recent");
        assert_eq!(state.query(), "ord");
        assert_eq!(*state.category(), CategoryFilter::Recent);
    }
}
