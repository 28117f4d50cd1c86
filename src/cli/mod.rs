//! CLI implementation for jot

mod commands;
mod config;
mod display;
mod menu;

use config::apply_config_defaults;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use jot::NoteStore;

/// Exit codes for CLI commands
#[repr(i32)]
pub enum ExitCode {
    /// The requested note id does not exist
    NotFound = 2,
}

#[derive(Parser)]
#[command(name = "jot")]
#[command(about = "Local note-taking from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Notes file (JSON)
    #[arg(short = 'f', long, env = "JOT_FILE", global = true)]
    file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Suppress confirmations after add/edit/delete
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show debug info (sets RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive numbered menu (default)
    Menu,
    /// List notes
    List {
        /// Only notes written on or after this date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_since)]
        since: Option<NaiveDate>,
    },
    /// Show one note
    Show {
        /// Note ID
        id: u32,
    },
    /// Add a note
    Add {
        /// Note title
        title: String,
        /// Note body
        #[arg(default_value = "")]
        body: String,
    },
    /// Replace a note's title and body
    Edit {
        /// Note ID
        id: u32,
        /// New title
        title: String,
        /// New body
        #[arg(default_value = "")]
        body: String,
    },
    /// Delete a note (later notes are renumbered)
    Delete {
        /// Note ID
        id: u32,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn parse_since(s: &str) -> Result<NaiveDate, String> {
    jot::parse_date(s).map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

/// Run CLI with pre-parsed arguments (main.rs reads `--verbose` first to set up logging)
pub fn run_with(mut cli: Cli) -> Result<()> {
    // Load config and apply defaults (CLI flags override config)
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = jot::config::Config::load(&cwd);
    apply_config_defaults(&mut cli, &config);

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Some(Commands::Completions { shell }) = cli.command {
        cmd_completions(shell);
        return Ok(());
    }

    let path = cli
        .file
        .clone()
        .unwrap_or_else(|| PathBuf::from(jot::config::Config::DEFAULT_FILE));
    let mut store = NoteStore::open(path);

    match cli.command {
        None | Some(Commands::Menu) => cmd_menu(&mut store),
        Some(ref command) => {
            if let Some(e) = store.load_error() {
                eprintln!("{}", display::load_warning(e));
            }
            match command {
                Commands::List { since } => commands::cmd_list(&cli, &store, *since),
                Commands::Show { id } => commands::cmd_show(&cli, &store, *id),
                Commands::Add { title, body } => commands::cmd_add(&cli, &mut store, title, body),
                Commands::Edit { id, title, body } => {
                    commands::cmd_edit(&cli, &mut store, *id, title, body)
                }
                Commands::Delete { id } => commands::cmd_delete(&cli, &mut store, *id),
                Commands::Menu | Commands::Completions { .. } => Ok(()),
            }
        }
    }
}

/// Interactive menu on the terminal
fn cmd_menu(store: &mut NoteStore) -> Result<()> {
    let mut input = menu::EditorSource::new()?;
    let mut stdout = std::io::stdout();
    menu::run_menu(store, &mut input, &mut stdout)
}

/// Generate shell completion scripts for the specified shell
fn cmd_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    clap_complete::generate(shell, &mut Cli::command(), "jot", &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["jot"]).unwrap();
        assert!(!cli.json);
        assert!(!cli.quiet);
        assert!(!cli.verbose);
        assert!(!cli.no_color);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["jot", "list", "--json", "-f", "/tmp/x.json"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/x.json")));
    }

    #[test]
    fn test_cmd_list_since() {
        let cli = Cli::try_parse_from(["jot", "list", "--since", "2024-02-01"]).unwrap();
        match cli.command {
            Some(Commands::List { since }) => {
                assert_eq!(since, NaiveDate::from_ymd_opt(2024, 2, 1));
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_cmd_list_bad_since_rejected() {
        assert!(Cli::try_parse_from(["jot", "list", "--since", "Feb 1"]).is_err());
    }

    #[test]
    fn test_cmd_show_requires_numeric_id() {
        assert!(Cli::try_parse_from(["jot", "show", "abc"]).is_err());
        assert!(Cli::try_parse_from(["jot", "show", "-1"]).is_err());
        let cli = Cli::try_parse_from(["jot", "show", "3"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Show { id: 3 })));
    }

    #[test]
    fn test_cmd_add_body_optional() {
        let cli = Cli::try_parse_from(["jot", "add", "Title only"]).unwrap();
        match cli.command {
            Some(Commands::Add { title, body }) => {
                assert_eq!(title, "Title only");
                assert_eq!(body, "");
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn test_cmd_edit() {
        let cli = Cli::try_parse_from(["jot", "edit", "2", "T", "B"]).unwrap();
        match cli.command {
            Some(Commands::Edit { id, title, body }) => {
                assert_eq!(id, 2);
                assert_eq!(title, "T");
                assert_eq!(body, "B");
            }
            _ => panic!("Expected Edit command"),
        }
    }

    #[test]
    fn test_cmd_delete_and_menu() {
        let cli = Cli::try_parse_from(["jot", "delete", "1"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Delete { id: 1 })));
        let cli = Cli::try_parse_from(["jot", "menu"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Menu)));
    }
}
