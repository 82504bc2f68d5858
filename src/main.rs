//! vibepad CLI - inspect and edit a persisted workspace without a UI

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use vibepad::kernel::services::adapters::{
    ensure_store_dir, persist_workspace, restore_workspace, JsonFileStore,
};
use vibepad::kernel::services::ports::{export_workspace_to_json, parse_workspace};
use vibepad::kernel::{file_icon, Action, AppState, Effect, FindOptions, Store};

#[derive(Parser)]
#[command(name = "vibepad")]
#[command(about = "Headless multi-tab workspace", long_about = None)]
#[command(version)]
struct Cli {
    /// Data directory (defaults to the platform data directory)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Also log to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the file tree
    Tree,

    /// Replace the workspace with an exported document
    Import {
        /// Export document (JSON)
        file: PathBuf,
    },

    /// Write the workspace as an export document
    Export {
        /// Output file (stdout if omitted)
        file: Option<PathBuf>,
    },

    /// Search every open tab
    Find {
        pattern: String,

        /// Treat the pattern as a regular expression
        #[arg(long)]
        regex: bool,

        #[arg(long)]
        match_case: bool,

        #[arg(long)]
        whole_word: bool,

        /// Replace every match with this text
        #[arg(long)]
        replace: Option<String>,

        /// Save touched tabs after replacing
        #[arg(long, requires = "replace")]
        save: bool,
    },

    /// Print workspace counters
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logging = vibepad::logging::init(cli.data_dir.as_deref(), cli.verbose);

    let store_dir = ensure_store_dir(cli.data_dir.as_deref())
        .context("cannot create the workspace directory")?;
    let store = JsonFileStore::new(store_dir);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    let mut state = AppState::new();
    runtime
        .block_on(restore_workspace(&store, &mut state))
        .with_context(|| format!("failed to load workspace from {}", store.dir().display()))?;

    match cli.command {
        Commands::Tree => print_tree(&state),

        Commands::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let workspace = parse_workspace(&text)
                .with_context(|| format!("{} is not a workspace export", file.display()))?;
            state
                .apply_workspace(workspace)
                .with_context(|| format!("{} was rejected", file.display()))?;
            runtime
                .block_on(persist_workspace(&store, &state))
                .context("failed to persist workspace")?;
            println!(
                "Imported {} files, {} tabs",
                state.files().len(),
                state.editor().tabs().len()
            );
        }

        Commands::Export { file } => {
            let json = export_workspace_to_json(&state.export_workspace())
                .context("failed to encode workspace")?;
            match file {
                Some(path) => std::fs::write(&path, json)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => {
                    let mut out = std::io::stdout().lock();
                    writeln!(out, "{}", json)?;
                }
            }
        }

        Commands::Find {
            pattern,
            regex,
            match_case,
            whole_word,
            replace,
            save,
        } => {
            let mut app = Store::new(state, Instant::now());
            app.dispatch(Action::SetFindOptions(FindOptions {
                search_text: pattern,
                replace_text: replace.clone().unwrap_or_default(),
                match_case,
                match_whole_word: whole_word,
                use_regex: regex,
                search_in_all_files: true,
            }));
            let find = app.state().find();
            if let Some(err) = find.last_error() {
                bail!("invalid pattern: {}", err);
            }
            for m in find.matches() {
                println!(
                    "{}:{}:{}: {}",
                    m.file_name,
                    m.line_number,
                    m.column,
                    m.line_content.trim_end()
                );
            }
            println!("{} matches", find.matches().len());

            if replace.is_some() {
                let replaced = app.state_mut().replace_all();
                println!("{} replacements", replaced);
                if save {
                    let effects = app.dispatch(Action::SaveAll).effects;
                    tracing::debug!(persist = effects.contains(&Effect::PersistWorkspace), "saved");
                }
                let state = app.into_state();
                println!("{} unsaved tabs", state.editor().dirty_tab_count());
                runtime
                    .block_on(persist_workspace(&store, &state))
                    .context("failed to persist workspace")?;
            }
        }

        Commands::Stats => {
            let editor = state.editor();
            println!("files:  {}", state.files().len());
            println!("tabs:   {}", editor.tabs().len());
            println!("dirty:  {}", editor.dirty_tab_count());
            println!("panes:  {}", editor.panes().len());
        }
    }

    Ok(())
}

fn print_tree(state: &AppState) {
    let rows = state.files().flatten_all();
    if rows.is_empty() {
        println!("(empty workspace)");
        return;
    }
    for row in rows {
        let indent = "  ".repeat(row.depth as usize);
        let icon = file_icon(&row.name, row.is_folder);
        let suffix = if row.is_folder { "/" } else { "" };
        println!("{}[{}] {}{}", indent, icon.as_str(), row.name, suffix);
    }
}
