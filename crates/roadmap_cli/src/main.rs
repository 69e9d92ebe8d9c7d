//! Command-line front end over `roadmap_core`.
//!
//! # Responsibility
//! - Wire configuration, cache database, remote store and workspace.
//! - Print the tree and run single mutations from the shell.

use clap::{Parser, Subcommand};
use log::warn;
use roadmap_core::{
    decode, default_log_level, init_logging, open_cache_db, plain_text, render_html, AppConfig,
    DeleteGate, Document, DocumentClient, JsonBinStore, MarkerResources, RichTextDraft,
    SqliteDocumentCache, Workspace,
};
use std::error::Error;
use std::process::ExitCode;

type CliResult = Result<(), Box<dyn Error>>;

/// Roadmap organizer CLI
#[derive(Parser, Debug)]
#[command(name = "roadmap")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check core linkage without touching the store
    Ping,

    /// Print subjects, sections and topics
    Tree,

    /// Create a subject
    AddSubject {
        name: String,
        /// Palette id, e.g. `blue`
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        emoji: Option<String>,
    },

    /// Rename a subject
    RenameSubject { subject_id: String, name: String },

    /// Create a section inside a subject
    AddSection { subject_id: String, name: String },

    /// Create a topic inside a section
    AddTopic {
        subject_id: String,
        section_id: String,
        /// Marker-encoded topic text
        name: String,
    },

    /// Move a subject to the slot of another subject
    MoveSubject { subject_id: String, over_id: String },

    /// Delete a subject and everything under it
    DeleteSubject {
        subject_id: String,
        /// Delete confirmation secret
        #[arg(long)]
        confirm: String,
    },

    /// Render marker text as HTML without any images or links
    Render {
        text: String,
        /// Print visible text instead of HTML
        #[arg(long)]
        plain: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Ping => {
            println!("roadmap_core ping={}", roadmap_core::ping());
            println!("roadmap_core version={}", roadmap_core::core_version());
            Ok(())
        }
        Command::Render { text, plain } => {
            let nodes = decode(&text, &MarkerResources::none());
            if plain {
                println!("{}", plain_text(&nodes));
            } else {
                println!("{}", render_html(&nodes));
            }
            Ok(())
        }
        command => run_with_store(command),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_with_store(command: Command) -> CliResult {
    let config = AppConfig::from_env()?;
    let level = config
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    if let Err(err) = init_logging(&level, config.log_dir.as_deref()) {
        eprintln!("warning: logging disabled: {err}");
    }

    let conn = open_cache_db(&config.cache_path)?;
    let cache = SqliteDocumentCache::new(&conn, config.cache_key.clone());
    let remote = JsonBinStore::new(config.store.clone());
    let mut workspace = Workspace::new(
        DocumentClient::new(remote, cache),
        DeleteGate::new(config.delete_secret.clone()),
    );
    workspace.load(|_| {});

    let result = apply(&mut workspace, command);
    for notice in workspace.take_notices() {
        eprintln!("{}: {}", notice.title, notice.message);
    }
    result
}

fn apply<R, C>(workspace: &mut Workspace<R, C>, command: Command) -> CliResult
where
    R: roadmap_core::RemoteStore,
    C: roadmap_core::DocumentCache,
{
    match command {
        Command::Tree => print_tree(workspace.view()),
        Command::AddSubject { name, color, emoji } => {
            let subject =
                workspace.create_subject(&name, color.as_deref(), emoji.as_deref())?;
            println!("{}", subject.id);
        }
        Command::RenameSubject { subject_id, name } => {
            workspace.rename_subject(&subject_id, &name)?;
        }
        Command::AddSection { subject_id, name } => {
            let section = workspace.create_section(&subject_id, &name)?;
            println!("{}", section.id);
        }
        Command::AddTopic {
            subject_id,
            section_id,
            name,
        } => {
            let draft = RichTextDraft::new(name);
            let topic = workspace.create_topic(&subject_id, &section_id, draft)?;
            println!("{}", topic.id);
        }
        Command::MoveSubject {
            subject_id,
            over_id,
        } => {
            if !workspace.reorder_subjects(&subject_id, Some(&over_id))? {
                warn!("event=cli_move module=cli status=noop");
                println!("nothing to move");
            }
        }
        Command::DeleteSubject {
            subject_id,
            confirm,
        } => workspace.delete_subject(&subject_id, &confirm)?,
        Command::Ping | Command::Render { .. } => {}
    }
    Ok(())
}

fn print_tree(document: &Document) {
    if document.is_empty() {
        println!("(no subjects)");
        return;
    }
    for subject in &document.subjects {
        let emoji = subject.emoji.as_deref().unwrap_or("-");
        println!("{emoji} {} [{}]", subject.name, subject.id);
        for section in &subject.sections {
            println!("    {} [{}]", section.name, section.id);
            for topic in &section.topics {
                let mut line = plain_text(&roadmap_core::decode_topic_name(topic));
                if let Some(priority) = topic.priority {
                    line.push_str(&format!(" ({priority:?})"));
                }
                if !topic.tags.is_empty() {
                    line.push(' ');
                    line.push_str(&topic.tags.join(" "));
                }
                println!("        {line} [{}]", topic.id);
            }
        }
    }
}
