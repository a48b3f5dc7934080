//! Tragres CLI Library
//!
//! Terminal client for a student records and attendance server.
//!
//! # Overview
//!
//! - **Remote client** ([`api`]): HTTP calls to the student resource API
//! - **Data access** ([`store`]): domain verbs over students, attendance and
//!   assignments (`StudentStore`)
//! - **Controllers** ([`controllers`]): per-screen state, derived statistics
//!   and user actions
//! - **Commands** ([`commands`]): render controller state to the terminal
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tragres_cli::api::ApiClient;
//! use tragres_cli::controllers::DashboardController;
//! use tragres_cli::store::ApiStore;
//!
//! # async fn run() -> tragres_cli::Result<()> {
//! let store = Arc::new(ApiStore::new(ApiClient::new("http://localhost:8000/api")?));
//! let mut dashboard = DashboardController::new(store);
//! dashboard.activate().await;
//! println!("{} students", dashboard.summary().total_students);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod commands;
pub mod config;
pub mod controllers;
pub mod error;
pub mod store;

// Re-export commonly used types
pub use error::{CliError, Result};

use clap::{Args, Parser, Subcommand};
use config::DEFAULT_API_URL;

/// Tragres - student records and attendance
#[derive(Parser, Debug)]
#[command(name = "tragres")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// API base URL
    #[arg(long, env = "TRAGRES_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the API server is reachable
    Status,

    /// Show headline statistics and recently added students
    Dashboard,

    /// Manage students
    Students {
        #[command(subcommand)]
        command: StudentsCommand,
    },

    /// Show or record attendance for a date
    Attendance {
        #[command(subcommand)]
        command: AttendanceCommand,
    },

    /// Manage a student's assignments
    Assignments {
        #[command(subcommand)]
        command: AssignmentsCommand,
    },
}

/// Student subcommands
#[derive(Subcommand, Debug)]
pub enum StudentsCommand {
    /// List students
    List {
        /// Only show students whose name, course or phone contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a student's profile, assignments and attendance history
    Show {
        /// Student ID
        id: String,
    },

    /// Register a new student
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        course: String,

        #[arg(long)]
        email: Option<String>,

        /// Profile photo as a URL or data URI
        #[arg(long)]
        photo: Option<String>,
    },

    /// Change a student's details
    Update {
        /// Student ID
        id: String,

        #[command(flatten)]
        fields: UpdateFields,
    },

    /// Delete a student and all their records
    Delete {
        /// Student ID
        id: String,
    },
}

/// Fields accepted by `students update`; unset fields keep their value
#[derive(Args, Debug, Clone, Default)]
pub struct UpdateFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Pass an empty string to clear
    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub course: Option<String>,

    /// Pass an empty string to clear
    #[arg(long)]
    pub photo: Option<String>,
}

/// Attendance subcommands
#[derive(Subcommand, Debug)]
pub enum AttendanceCommand {
    /// Show every student's mark for a date
    Show {
        /// Date as YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Record attendance for a date
    Save {
        /// Date as YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Student IDs to mark present
        #[arg(long, value_delimiter = ',')]
        present: Vec<String>,

        /// Student IDs to mark absent
        #[arg(long, value_delimiter = ',')]
        absent: Vec<String>,

        /// Topic applied to every student
        #[arg(short, long)]
        topic: Option<String>,

        /// Per-student topic as ID=TEXT (repeatable)
        #[arg(long = "note", value_name = "ID=TEXT")]
        notes: Vec<String>,
    },
}

/// Assignment subcommands
#[derive(Subcommand, Debug)]
pub enum AssignmentsCommand {
    /// Add an assignment dated today
    Add {
        /// Student ID
        student: String,

        /// Assignment title
        title: String,
    },

    /// Flip an assignment between completed and open
    Toggle {
        /// Student ID
        student: String,

        /// Assignment ID
        id: String,
    },

    /// Remove an assignment
    Delete {
        /// Student ID
        student: String,

        /// Assignment ID
        id: String,
    },
}
