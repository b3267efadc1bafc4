use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tk", about = concat!("tack v", env!("CARGO_PKG_VERSION"), " - lists you can outline"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all lists
    Lists,
    /// Print a list as an outline (default: the active list)
    Show(ShowArgs),
    /// Create a list and make it active
    New(NewArgs),
    /// Make a list active
    Select(SelectArgs),
    /// Rename the active list
    Rename(RenameArgs),
    /// Add an item to the active list
    Add(AddArgs),
    /// Change an item's title
    Title(TitleArgs),
    /// Mark an item completed
    Done(ItemArg),
    /// Mark an item not completed
    Undone(ItemArg),
    /// Indent an item one level
    Indent(ItemArg),
    /// Outdent an item one level
    Outdent(ItemArg),
    /// Duplicate an item
    Dup(ItemArg),
    /// Delete an item
    Rm(ItemArg),
    /// Set or clear an item's due date and time
    Due(DueArgs),
    /// Set an item's priority
    Priority(PriorityArgs),
    /// Sign in locally
    Login(LoginArgs),
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
}

// ---------------------------------------------------------------------------
// List args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ShowArgs {
    /// List id, unique id prefix, or exact name
    pub list: Option<String>,
}

#[derive(Args)]
pub struct NewArgs {
    /// Name for the new list (default from config)
    pub name: Option<String>,
}

#[derive(Args)]
pub struct SelectArgs {
    /// List id, unique id prefix, or exact name
    pub list: String,
}

#[derive(Args)]
pub struct RenameArgs {
    /// New name for the active list
    pub name: String,
}

// ---------------------------------------------------------------------------
// Item args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ItemArg {
    /// Item id or unique id prefix
    pub id: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Item title
    pub title: String,
    /// Insert after this item (default: end of list)
    #[arg(long)]
    pub after: Option<String>,
    /// Indentation level (default: the anchor's level, or 0)
    #[arg(long)]
    pub level: Option<usize>,
}

#[derive(Args)]
pub struct TitleArgs {
    /// Item id or unique id prefix
    pub id: String,
    /// New title
    pub title: String,
}

#[derive(Args)]
pub struct DueArgs {
    /// Item id or unique id prefix
    pub id: String,
    /// YYYY-MM-DD, today, tomorrow, +N, or "none" to clear
    pub date: String,
    /// Time of day (HH:MM)
    #[arg(long)]
    pub time: Option<String>,
}

#[derive(Args)]
pub struct PriorityArgs {
    /// Item id or unique id prefix
    pub id: String,
    /// high, medium, low, or none
    pub priority: String,
}

#[derive(Args)]
pub struct LoginArgs {
    /// Display name
    pub name: String,
}
