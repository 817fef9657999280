//! Command-line front end for the local notes store.
//!
//! # Usage
//!
//! ```bash
//! notes create --title "Groceries" --content "milk" --tag home
//! notes list grocer
//! notes update <ID> --title "Weekly groceries"
//! notes delete <ID>
//! ```
//!
//! `main` is the composition root: it opens the SQLite-backed store, builds
//! the one `NoteRepository` for this process and hands it to the command.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use notes_core::{
    default_log_level, init_logging, KeyValueStore, NewNote, Note, NoteRepository, NoteUpdate,
    SqliteStore,
};

/// Local notes with search, stored in a SQLite file
#[derive(Parser, Debug)]
#[command(name = "notes", version, about, long_about = None)]
struct Cli {
    /// SQLite file holding the notes mirror
    #[arg(long, env = "NOTES_DB", default_value = "notes.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "NOTES_LOG_DIR", value_name = "DIR")]
    log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "NOTES_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List notes, newest first, optionally filtered by a search query
    List {
        /// Case-insensitive text matched against titles, content and tags
        query: Option<String>,
    },
    /// Show one note
    Show { id: String },
    /// Create a note
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Update fields of an existing note
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Replaces the tag list
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Removes all tags
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,
    },
    /// Delete a note
    Delete { id: String },
    /// List all distinct tags
    Tags,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    let store = SqliteStore::open(&cli.db)
        .with_context(|| format!("failed to open notes database {}", cli.db.display()))?;
    let mut repo = NoteRepository::new(store);
    info!(
        "event=cli_start module=cli status=ok notes={}",
        repo.len()
    );

    let output = run(&mut repo, cli.command)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

fn run<S: KeyValueStore>(repo: &mut NoteRepository<S>, command: Command) -> Result<String> {
    match command {
        Command::List { query } => {
            let notes = repo.list_notes(query.as_deref());
            Ok(notes.iter().map(summary_line).collect::<Vec<_>>().join("\n"))
        }
        Command::Show { id } => match repo.get_note(&id) {
            Some(note) => Ok(detail(&note)),
            None => bail!("note not found: {id}"),
        },
        Command::Create {
            title,
            content,
            tags,
        } => {
            let title = required_title(title)?;
            let mut input = NewNote::titled(title).with_tags(tags);
            input.content = content;
            let note = repo.create_note(input);
            Ok(note.id)
        }
        Command::Update {
            id,
            title,
            content,
            tags,
            clear_tags,
        } => {
            let mut update = NoteUpdate::for_id(id);
            update.title = title.map(required_title).transpose()?;
            update.content = content;
            if clear_tags {
                update.tags = Some(Vec::new());
            } else if !tags.is_empty() {
                update.tags = Some(tags);
            }
            let note = repo.update_note(update)?;
            Ok(detail(&note))
        }
        Command::Delete { id } => {
            if repo.delete_note(&id) {
                Ok(format!("deleted {id}"))
            } else {
                Ok(format!("no note with id {id}"))
            }
        }
        Command::Tags => Ok(repo.list_tags().join("\n")),
    }
}

fn required_title(title: String) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        bail!("title must not be blank");
    }
    Ok(trimmed.to_string())
}

fn summary_line(note: &Note) -> String {
    let mut line = format!(
        "{}  {}  {}",
        note.id,
        note.updated_at.format("%Y-%m-%d %H:%M"),
        note.title
    );
    if !note.tags.is_empty() {
        line.push_str(&format!("  [{}]", note.tags.join(", ")));
    }
    line
}

fn detail(note: &Note) -> String {
    let mut out = format!(
        "id:      {}\ntitle:   {}\ntags:    {}\ncreated: {}\nupdated: {}",
        note.id,
        note.title,
        note.tags.join(", "),
        note.created_at.to_rfc3339(),
        note.updated_at.to_rfc3339()
    );
    if !note.content.is_empty() {
        out.push_str("\n\n");
        out.push_str(&note.content);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{run, Command};
    use notes_core::{MemoryStore, NoteRepository, RepoError, WELCOME_TITLE};

    fn repo() -> NoteRepository<MemoryStore> {
        NoteRepository::new(MemoryStore::new())
    }

    #[test]
    fn create_prints_id_and_rejects_blank_title() {
        let mut repo = repo();
        let id = run(
            &mut repo,
            Command::Create {
                title: "  Trip  ".to_string(),
                content: None,
                tags: vec!["travel".to_string()],
            },
        )
        .unwrap();
        assert_eq!(repo.get_note(&id).unwrap().title, "Trip");

        let err = run(
            &mut repo,
            Command::Create {
                title: "   ".to_string(),
                content: None,
                tags: Vec::new(),
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("blank"));
    }

    #[test]
    fn list_with_query_prints_matching_lines() {
        let mut repo = repo();
        let out = run(
            &mut repo,
            Command::List {
                query: Some("welcome".to_string()),
            },
        )
        .unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains(WELCOME_TITLE));
    }

    #[test]
    fn update_unknown_id_surfaces_not_found() {
        let mut repo = repo();
        let err = run(
            &mut repo,
            Command::Update {
                id: "missing".to_string(),
                title: Some("x".to_string()),
                content: None,
                tags: Vec::new(),
                clear_tags: false,
            },
        )
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<RepoError>(),
            Some(&RepoError::NotFound("missing".to_string()))
        );
    }

    #[test]
    fn update_clear_tags_empties_tag_list() {
        let mut repo = repo();
        let id = repo.list_notes(None)[0].id.clone();
        run(
            &mut repo,
            Command::Update {
                id: id.clone(),
                title: None,
                content: None,
                tags: Vec::new(),
                clear_tags: true,
            },
        )
        .unwrap();
        assert!(repo.get_note(&id).unwrap().tags.is_empty());
    }

    #[test]
    fn delete_reports_noop_for_unknown_id() {
        let mut repo = repo();
        let out = run(
            &mut repo,
            Command::Delete {
                id: "nope".to_string(),
            },
        )
        .unwrap();
        assert_eq!(out, "no note with id nope");
    }
}
