mod config;
mod error;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, TimeZone};
use clap::{Parser, Subcommand};
use runtime::{AnthropicBackend, NoteToolHost, Session, context};
use storage::{Event, EventKind, EventLog, NoteStore, Role, SqliteNoteStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use error::{Error, Result};

const SYSTEM_PROMPT: &str =
    "You are Quill, a note-taking assistant. Use your tools to consult and update \
     the user's notes. Be concise and direct.";
const CONFIG_FILE: &str = "quill.toml";
const DB_FILE: &str = "quill.db";

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "A note-taking assistant backed by a remote model", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single question and print the answer
    Ask {
        /// The question; read from standard input when omitted
        question: Option<String>,
        /// Inject all notes into the system prompt up front
        #[arg(long)]
        preload: bool,
    },
    /// Start an interactive chat session
    Chat,
    /// Inspect or seed the note store
    #[command(subcommand)]
    Note(NoteCommands),
    /// List all sessions
    Sessions {
        /// Show only the last N sessions
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Show event logs for a session
    Logs {
        /// Session ID (prefix match supported)
        #[arg(short, long)]
        session: String,
        /// Filter by event kind (message, tool_call, tool_result)
        #[arg(short, long)]
        kind: Option<String>,
    },
}

#[derive(Subcommand)]
enum NoteCommands {
    /// List note ids
    List,
    /// Print a note's content
    Show { id: String },
    /// Add a note
    Add { id: String, content: String },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    info!("starting quill");

    match cli.command {
        Some(Commands::Ask { question, preload }) => cmd_ask(question, preload).await,
        None => cmd_ask(None, false).await,
        Some(Commands::Chat) => cmd_chat().await,
        Some(Commands::Note(note)) => cmd_note(note),
        Some(Commands::Sessions { limit }) => cmd_sessions(limit),
        Some(Commands::Logs { session, kind }) => cmd_logs(&session, kind.as_deref()),
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn cmd_ask(question: Option<String>, preload: bool) -> Result<()> {
    let mut session = open_session(preload)?;

    let question = match question {
        Some(q) => q,
        None => {
            print!("Ask a question about your notes: ");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            line.trim().to_string()
        }
    };

    if question.is_empty() {
        return Ok(());
    }

    let answer = session.ask(&question).await?;
    println!("{answer}");
    session.end()?;
    Ok(())
}

async fn cmd_chat() -> Result<()> {
    println!("quill v{}", env!("CARGO_PKG_VERSION"));

    let mut session = open_session(false)?;
    println!("Session ID: {}", session.id);
    println!("Type 'quit' or Ctrl+D to exit.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "exit" {
            break;
        }

        match session.ask(input).await {
            Ok(answer) => {
                println!("\n{answer}\n");
            }
            Err(e) => {
                eprintln!("Error: {e}\n");
            }
        }
    }

    session.end()?;
    println!("\nSession ended.");
    Ok(())
}

fn cmd_note(command: NoteCommands) -> Result<()> {
    let store = open_note_store()?;

    match command {
        NoteCommands::List => {
            let ids = store.list()?;
            if ids.is_empty() {
                println!("No notes stored.");
            }
            for id in ids {
                println!("{id}");
            }
        }
        NoteCommands::Show { id } => match store.read(&id)? {
            Some(content) => println!("{content}"),
            None => println!("Note not found"),
        },
        NoteCommands::Add { id, content } => {
            if store.create(&id, &content)? {
                println!("Note {id} created successfully");
            } else {
                println!("Error: This note ID already exists");
            }
        }
    }

    Ok(())
}

fn cmd_sessions(limit: usize) -> Result<()> {
    let log = open_log()?;
    let sessions = log.list_sessions()?;

    if sessions.is_empty() {
        println!("No sessions found.");
        return Ok(());
    }

    println!(
        "{:<36}  {:<20}  {:<8}  STATUS",
        "SESSION ID", "STARTED", "MSGS"
    );
    println!("{}", "-".repeat(80));

    for summary in sessions.into_iter().take(limit) {
        let started = Local
            .from_utc_datetime(&summary.started_at.naive_utc())
            .format("%Y-%m-%d %H:%M");
        let status = if summary.ended_at.is_some() {
            "ended"
        } else {
            "active"
        };
        println!(
            "{:<36}  {:<20}  {:<8}  {status}",
            summary.id, started, summary.message_count
        );
    }

    Ok(())
}

fn cmd_logs(session_prefix: &str, kind_filter: Option<&str>) -> Result<()> {
    let log = open_log()?;

    let sessions = log.list_sessions()?;
    let matching: Vec<_> = sessions
        .iter()
        .filter(|s| s.id.to_string().starts_with(session_prefix))
        .collect();

    let session_id = match matching.len() {
        0 => {
            return Err(Error::SessionNotFound {
                prefix: session_prefix.to_string(),
            });
        }
        1 => matching[0].id,
        _ => {
            return Err(Error::AmbiguousSession {
                prefix: session_prefix.to_string(),
                matches: matching.iter().map(|s| s.id.to_string()).collect(),
            });
        }
    };

    let events = log.load_events(session_id, kind_filter)?;

    if events.is_empty() {
        println!("No events found for session {session_id}");
        return Ok(());
    }

    println!("Session: {session_id}\n");

    for event in events {
        print_event(&event);
    }

    Ok(())
}

fn print_event(event: &Event) {
    let time = Local
        .from_utc_datetime(&event.timestamp.naive_utc())
        .format("%H:%M:%S");

    match &event.kind {
        EventKind::SessionStart => {
            println!("[{time}] === Session started ===");
        }
        EventKind::SessionEnd => {
            println!("[{time}] === Session ended ===");
        }
        EventKind::Message { role, content } => {
            let role_str = match role {
                Role::User => "USER",
                Role::Assistant => "ASSISTANT",
            };
            // Truncate long messages for display
            let display_content = if content.chars().count() > 200 {
                let truncated: String = content.chars().take(200).collect();
                format!("{truncated}...")
            } else {
                content.clone()
            };
            println!("[{time}] {role_str}: {display_content}");
        }
        EventKind::ToolCall {
            id,
            name,
            arguments,
        } => {
            println!("[{time}] TOOL CALL [{id}]: {name} {arguments}");
        }
        EventKind::ToolResult {
            id,
            output,
            is_error,
        } => {
            let marker = if *is_error { " (error)" } else { "" };
            println!("[{time}] TOOL RESULT [{id}]{marker}: {output}");
        }
    }
}

fn open_session(preload: bool) -> Result<Session<AnthropicBackend, NoteToolHost>> {
    let config = Config::load_or_default(CONFIG_FILE)?;
    let api_key = config.api_key()?;

    let backend = AnthropicBackend::builder(api_key, &config.backend.model)
        .max_tokens(config.backend.max_tokens)
        .build();

    let db_path = ensure_db_path()?;
    let store = Arc::new(SqliteNoteStore::open(&db_path)?);
    let log = EventLog::open(&db_path)?;

    let mut system = SYSTEM_PROMPT.to_string();
    if let Some(extra) = &config.system {
        system = format!("{system}\n\n{extra}");
    }
    if preload {
        let block = context::preload(store.as_ref())?;
        system = format!("{system}\n\n{block}");
    }

    let host = NoteToolHost::new(store);
    let session = Session::new(log, backend, host)?
        .with_system(system)
        .with_max_rounds(config.max_rounds);

    Ok(session)
}

fn open_note_store() -> Result<SqliteNoteStore> {
    let db_path = ensure_db_path()?;
    Ok(SqliteNoteStore::open(&db_path)?)
}

fn open_log() -> Result<EventLog> {
    let db_path = data_dir().join(DB_FILE);

    if !db_path.exists() {
        return Err(Error::DatabaseNotFound { path: db_path });
    }

    Ok(EventLog::open(&db_path)?)
}

fn ensure_db_path() -> Result<PathBuf> {
    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join(DB_FILE))
}

fn data_dir() -> PathBuf {
    dirs_data_dir().unwrap_or_else(|| ".quill".into())
}

fn dirs_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local/share/quill"))
    }
    #[cfg(target_os = "linux")]
    {
        std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local/share")))
            .map(|p| p.join("quill"))
    }
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|h| PathBuf::from(h).join("quill"))
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}
