use crate::export::ReportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for sewalogger
/// Volunteer attendance register backed by SQLite
#[derive(Parser)]
#[command(
    name = "sewalogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Sewadar attendance register: check-ins, chat-log import and daily duty reports (SQLite)",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Inspect or upgrade the configuration file
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage the sewadar roster
    Member {
        #[command(subcommand)]
        action: MemberAction,
    },

    /// Record an attendance entry
    Add {
        /// Attendance day (YYYY-MM-DD)
        date: String,

        #[arg(long = "member", short = 'm', help = "Sewadar id or exact name")]
        member: String,

        #[arg(long = "in", help = "Check-in time (HH:MM, 9:05 AM, 905am ...)")]
        start: String,

        #[arg(long = "out", help = "Check-out time, if already known")]
        end: Option<String>,

        #[arg(long = "counter", short = 'c', help = "Counter / sewa point")]
        counter: Option<String>,
    },

    /// Check out an open attendance record
    Out {
        /// Record id (see `list`)
        record: String,

        #[arg(long = "at", help = "Check-out time (default: now)")]
        at: Option<String>,
    },

    /// Delete attendance records of a day
    Del {
        /// Attendance day (YYYY-MM-DD)
        date: String,

        #[arg(long = "record", help = "Delete only this record")]
        record: Option<String>,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List attendance records
    List {
        /// Attendance day (default: the day in progress)
        date: Option<String>,

        #[arg(long = "all", help = "One summary line per recorded day")]
        all: bool,
    },

    /// Import attendance from an exported chat transcript
    Import {
        /// Chat transcript (plain text export)
        file: String,

        #[arg(long = "date", help = "Attendance day (default: the day in progress)")]
        date: Option<String>,

        #[arg(long = "day-start", help = "Hour the attendance day begins (0-23)")]
        day_start: Option<u32>,

        #[arg(
            long = "response",
            help = "Use a saved extraction answer instead of calling the service"
        )]
        response: Option<String>,

        #[arg(long = "select", help = "Import only these candidates (e.g. 1,3,5-7)")]
        select: Option<String>,

        #[arg(long = "exclude", help = "Leave out these candidates (e.g. 2,4)")]
        exclude: Option<String>,

        #[arg(long = "dry-run", help = "Show the plan without writing")]
        dry_run: bool,

        #[arg(long = "yes", short = 'y', help = "Apply without confirmation")]
        yes: bool,
    },

    /// Produce the daily duty report
    Report {
        /// Attendance day (default: the day in progress)
        date: Option<String>,

        #[arg(long = "format", short = 'f', value_enum, default_value = "pdf")]
        format: ReportFormat,

        #[arg(long = "file", help = "Absolute output path")]
        file: Option<String>,

        #[arg(long = "force", help = "Overwrite an existing file")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum MemberAction {
    /// Add a sewadar to the roster
    Add {
        name: String,

        #[arg(long = "phone")]
        phone: Option<String>,
    },

    /// Show the roster
    List,

    /// Change name, phone number or avatar
    Update {
        id: String,

        #[arg(long = "name")]
        name: Option<String>,

        #[arg(long = "phone")]
        phone: Option<String>,

        #[arg(long = "avatar", help = "PNG or JPEG, long edge at most 200px")]
        avatar: Option<String>,
    },

    /// Remove a sewadar (attendance history is kept)
    Del {
        id: String,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}
