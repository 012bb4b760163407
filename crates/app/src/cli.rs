//! Command-line surface of the `feedback-tracker` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use feedback_core::feedback::{FeedbackType, Priority};
use feedback_core::view::{PriorityFilter, SortDirection, SortKey, SortSpec, TypeFilter, ViewQuery};

use crate::routes::Route;

#[derive(Debug, Parser)]
#[command(name = "feedback-tracker")]
#[command(about = "Track, filter, and archive feedback")]
pub struct Cli {
    /// Directory holding the storage file. Overrides `FEEDBACK_DATA_DIR`.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start a session. Any non-empty email and password are accepted.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// End the current session.
    Logout,
    /// Show the filtered, sorted feedback table.
    List {
        #[command(flatten)]
        view: ViewArgs,
        /// Print the visible rows as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show every field of one record.
    Show { id: String },
    /// Add a record.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        message: String,
        #[arg(long = "type", default_value = "Bug")]
        feedback_type: FeedbackType,
        #[arg(long, default_value = "Medium", value_parser = Priority::parse_selectable)]
        priority: Priority,
    },
    /// Edit a record. Omitted fields keep their current value.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        message: Option<String>,
        #[arg(long = "type")]
        feedback_type: Option<FeedbackType>,
        #[arg(long, value_parser = Priority::parse_selectable)]
        priority: Option<Priority>,
        #[arg(long)]
        archived: Option<bool>,
    },
    /// Delete records.
    Delete(BulkArgs),
    /// Archive records.
    Archive(BulkArgs),
    /// Restore archived records.
    Unarchive(BulkArgs),
    /// Show or change the display theme.
    Theme {
        #[arg(value_enum)]
        choice: Option<ThemeChoice>,
    },
}

impl Command {
    /// The view this command belongs to.
    pub fn route(&self) -> Route {
        match self {
            Self::Login { .. } => Route::Login,
            _ => Route::Dashboard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Dark,
    Light,
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Title,
    Message,
    Priority,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Title => SortKey::Title,
            SortArg::Message => SortKey::Message,
            SortArg::Priority => SortKey::Priority,
        }
    }
}

/// Table controls: search box, archived toggle, dropdowns, sort header.
#[derive(Debug, Clone, Args)]
pub struct ViewArgs {
    #[arg(long, default_value = "")]
    pub search: String,
    /// Show archived records instead of active ones.
    #[arg(long, default_value_t = false)]
    pub archived: bool,
    #[arg(long = "type", default_value = "all")]
    pub type_filter: TypeFilter,
    #[arg(long = "priority", default_value = "all")]
    pub priority_filter: PriorityFilter,
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,
    /// Sort descending.
    #[arg(long, default_value_t = false, requires = "sort")]
    pub desc: bool,
}

impl ViewArgs {
    pub fn to_query(&self) -> ViewQuery {
        ViewQuery {
            search: self.search.clone(),
            show_archived: self.archived,
            type_filter: self.type_filter.clone(),
            priority_filter: self.priority_filter.clone(),
            sort: self.sort.map(|key| SortSpec {
                key: key.into(),
                direction: if self.desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                },
            }),
        }
    }
}

/// Target selection for bulk commands: explicit ids, or every visible row.
#[derive(Debug, Clone, Args)]
pub struct BulkArgs {
    pub ids: Vec<String>,
    /// Select every row the given filters make visible.
    #[arg(long, default_value_t = false, conflicts_with = "ids")]
    pub all_visible: bool,
    #[command(flatten)]
    pub view: ViewArgs,
}
