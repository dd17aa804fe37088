use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Add documents to, or query, the document Q&A service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the API, e.g. http://127.0.0.1:8000
    #[arg(long, env = "RAG_API_URL", default_value = "http://127.0.0.1:8000", global = true)]
    pub api_url: String,

    /// Directory where responses are saved as JSON.
    #[arg(long, default_value = "responses", global = true)]
    pub responses_dir: PathBuf,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 300, global = true)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check that the service is up.
    Heartbeat,
    /// Ask a question; the answer cites the retrieved chunks.
    Ask {
        query: String,
        /// Number of references to retrieve (server default when omitted).
        #[arg(short, long)]
        k: Option<i64>,
    },
    /// Ask a question without retrieval.
    AskNoRef { query: String },
    /// Upload a .txt, .pdf or .html file.
    Add { path: PathBuf },
    /// Write an add_document request body to a file instead of sending it.
    MockEvent {
        /// File to encode.
        #[arg(long)]
        path: PathBuf,
        /// Filename to put in the headers.
        #[arg(long)]
        filename: String,
        #[arg(long, default_value = "event.json")]
        output: PathBuf,
    },
}

impl Command {
    /// Name recorded as `request_type` in saved responses.
    pub fn request_type(&self) -> &'static str {
        match self {
            Command::Heartbeat => "heartbeat",
            Command::Ask { .. } => "ask",
            Command::AskNoRef { .. } => "ask-no-ref",
            Command::Add { .. } => "add",
            Command::MockEvent { .. } => "mock-event",
        }
    }
}
