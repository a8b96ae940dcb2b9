mod dashboard;
mod report;

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use matlog_core::{
    apply_fields, build_draft, parse_args, AnalyticsService, Config, EntryDraft, EntryService,
    FileEntryRepository, SidePolicy,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "matlog")]
#[command(about = "Training log and statistics for the mat", long_about = None)]
struct Cli {
    /// Data directory (defaults to $MATLOG_HOME or ~/.matlog)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log a session (usage: add hours:1.5 got:"Armbar (L)" sweep:"Scissor Sweep (R)" good rolls)
    Add {
        /// Session details as key:value pairs; other words become the notes
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List logged sessions, newest first
    List,
    /// Change a session (usage: edit 3f2a hours:2 got:Kimura)
    Edit {
        id: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Delete a session by id prefix
    Delete { id: String },
    /// Print training statistics
    Stats {
        /// Keep techniques without (L)/(R) apart instead of counting them as left
        #[arg(long)]
        strict: bool,
        /// Print the raw statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Open the terminal dashboard
    Dashboard,
    /// Browse the technique glossary
    Techniques {
        /// Case-insensitive filter on technique, group or position
        search: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "matlog=info,warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.data_dir)?;
    config.ensure_dirs()?;
    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Add { args }) => {
            if args.is_empty() {
                println!("Error: at least hours:<n> is required.");
                return Ok(());
            }
            let service = EntryService::new(FileEntryRepository::new(&config.data_dir)?);
            let draft = build_draft(&parse_args(&args), today)?;
            let created = service.add_entry(draft)?;
            println!("Session logged: {} (ID: {})", created.date, short_id(&created.id));
            report::show_entry_detail(&created);
        }
        Some(Commands::List) => {
            let service = EntryService::new(FileEntryRepository::new(&config.data_dir)?);
            report::show_entries(&service.list_entries()?);
        }
        Some(Commands::Edit { id, args }) => {
            let service = EntryService::new(FileEntryRepository::new(&config.data_dir)?);
            let existing = service.find_by_prefix(&id)?;
            let mut draft = EntryDraft::from_entry(&existing);
            apply_fields(&mut draft, &parse_args(&args), today)?;
            let updated = service.update_entry(&existing.id, draft)?;
            println!("Session updated: {} (ID: {})", updated.date, short_id(&updated.id));
            report::show_entry_detail(&updated);
        }
        Some(Commands::Delete { id }) => {
            let service = EntryService::new(FileEntryRepository::new(&config.data_dir)?);
            let entry = service.find_by_prefix(&id)?;
            service.delete_entry(&entry.id)?;
            println!("Session deleted: {} (ID: {})", entry.date, short_id(&entry.id));
        }
        Some(Commands::Stats { strict, json }) => {
            let mut options = config.settings.analytics_options();
            if strict {
                options.side_policy = SidePolicy::Strict;
            }
            let service = AnalyticsService::new(FileEntryRepository::new(&config.data_dir)?, options);
            let analytics = service.analytics_on(today)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&analytics)?);
            } else {
                report::show_stats(&analytics, config.settings.top_n);
            }
        }
        Some(Commands::Dashboard) | None => {
            let service = AnalyticsService::new(
                FileEntryRepository::new(&config.data_dir)?,
                config.settings.analytics_options(),
            );
            dashboard::run(&service, config.settings.top_n)?;
        }
        Some(Commands::Techniques { search }) => {
            report::show_techniques(search.as_deref());
        }
    }
    Ok(())
}

pub(crate) fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}
