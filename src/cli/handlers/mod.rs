mod auth;
pub use auth::{cmd_login, cmd_logout, cmd_whoami};

use std::path::PathBuf;

use chrono::Local;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::lock::DirLock;
use crate::io::state::{Session, SessionError};
use crate::model::config::AppConfig;
use crate::model::item::{ItemPatch, Priority};
use crate::model::list::TodoList;
use crate::ops::outline::LevelChange;
use crate::ops::schedule;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Everything a command needs besides its own arguments
pub struct Context {
    pub data_dir: PathBuf,
    pub config: AppConfig,
    pub json: bool,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(command: Commands, ctx: &Context) -> CmdResult {
    match command {
        // Read commands
        Commands::Lists => cmd_lists(ctx),
        Commands::Show(args) => cmd_show(args, ctx),
        Commands::Whoami => cmd_whoami(ctx),

        // List commands
        Commands::New(args) => cmd_new(args, ctx),
        Commands::Select(args) => cmd_select(args, ctx),
        Commands::Rename(args) => cmd_rename(args, ctx),

        // Item commands
        Commands::Add(args) => cmd_add(args, ctx),
        Commands::Title(args) => cmd_title(args, ctx),
        Commands::Done(args) => cmd_set_completed(args, true, ctx),
        Commands::Undone(args) => cmd_set_completed(args, false, ctx),
        Commands::Indent(args) => cmd_level(args, LevelChange::Indent, ctx),
        Commands::Outdent(args) => cmd_level(args, LevelChange::Outdent, ctx),
        Commands::Dup(args) => cmd_dup(args, ctx),
        Commands::Rm(args) => cmd_rm(args, ctx),
        Commands::Due(args) => cmd_due(args, ctx),
        Commands::Priority(args) => cmd_priority(args, ctx),

        // Identity
        Commands::Login(args) => cmd_login(args, ctx),
        Commands::Logout => cmd_logout(ctx),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Open a session for reading lists. Lists stay hidden while signed out.
fn open_read(ctx: &Context) -> Result<Session, Box<dyn std::error::Error>> {
    let session = Session::open_dir(&ctx.data_dir, &ctx.config)?;
    if !session.is_signed_in() {
        return Err(SessionError::SignedOut.into());
    }
    Ok(session)
}

fn open_write(ctx: &Context) -> Result<(Session, DirLock), Box<dyn std::error::Error>> {
    Ok(Session::open_dir_locked(&ctx.data_dir, &ctx.config)?)
}

fn active_list(session: &Session) -> Result<&TodoList, Box<dyn std::error::Error>> {
    session
        .outline()
        .active_list()
        .ok_or_else(|| "no active list (run `tk new` or `tk select <list>`)".into())
}

/// Resolve a user-typed item reference against the active list to a full id.
fn resolve_item_id(session: &Session, query: &str) -> Result<String, Box<dyn std::error::Error>> {
    let list = active_list(session)?;
    list.resolve_item(query)
        .map(|item| item.id.clone())
        .ok_or_else(|| format!("item not found in '{}': {}", list.name, query).into())
}

/// Apply a patch to one item of the active list and save.
fn patch_item(ctx: &Context, query: &str, patch: ItemPatch, verb: &str) -> CmdResult {
    let (mut session, _lock) = open_write(ctx)?;
    let id = resolve_item_id(&session, query)?;
    session.apply(|o| o.update_item(&id, patch))?;
    println!("{} {}", id, verb);
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_lists(ctx: &Context) -> CmdResult {
    let session = open_read(ctx)?;
    let outline = session.outline();
    let active = outline.active_list_id();

    if ctx.json {
        let infos: Vec<_> = outline
            .lists()
            .iter()
            .map(|l| list_info_to_json(l, Some(l.id.as_str()) == active))
            .collect();
        println!("{}", serde_json::to_string_pretty(&infos)?);
    } else if outline.lists().is_empty() {
        println!("(no lists)");
    } else {
        for list in outline.lists() {
            println!("{}", format_list_info(list, Some(list.id.as_str()) == active));
        }
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, ctx: &Context) -> CmdResult {
    let session = open_read(ctx)?;
    let list = match args.list.as_deref() {
        Some(query) => session
            .outline()
            .find_list(query)
            .ok_or_else(|| format!("list not found: {}", query))?,
        None => active_list(&session)?,
    };

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&list_to_json(list))?);
    } else {
        for line in format_list_outline(list, ctx.config.ui.indent_width) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// List commands
// ---------------------------------------------------------------------------

fn cmd_new(args: NewArgs, ctx: &Context) -> CmdResult {
    let (mut session, _lock) = open_write(ctx)?;
    let name = args.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
    let id = session.apply(|o| {
        let id = o.create_list();
        if let Some(name) = &name {
            o.rename_active_list(name);
        }
        id
    })?;
    let list = active_list(&session)?;
    println!("created list {} ({})", list.name, id);
    Ok(())
}

fn cmd_select(args: SelectArgs, ctx: &Context) -> CmdResult {
    let (mut session, _lock) = open_write(ctx)?;
    let id = session
        .outline()
        .find_list(&args.list)
        .map(|l| l.id.clone())
        .ok_or_else(|| format!("list not found: {}", args.list))?;
    session.apply(|o| o.select_list(&id))?;
    let list = active_list(&session)?;
    println!("active list: {} ({})", list.name, list.id);
    Ok(())
}

fn cmd_rename(args: RenameArgs, ctx: &Context) -> CmdResult {
    let (mut session, _lock) = open_write(ctx)?;
    active_list(&session)?;
    session.apply(|o| o.rename_active_list(&args.name))?;
    println!("renamed active list to {}", args.name);
    Ok(())
}

// ---------------------------------------------------------------------------
// Item commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, ctx: &Context) -> CmdResult {
    let (mut session, _lock) = open_write(ctx)?;
    active_list(&session)?;

    let anchor = match args.after.as_deref() {
        Some(query) => Some(resolve_item_id(&session, query)?),
        None => None,
    };
    let level = match (args.level, &anchor) {
        (Some(level), _) => level,
        (None, Some(anchor_id)) => active_list(&session)?
            .item(anchor_id)
            .map(|item| item.level)
            .unwrap_or(0),
        (None, None) => 0,
    };

    let title = args.title;
    let id = session
        .apply(|o| {
            let id = o.insert_item_after(anchor.as_deref(), level)?;
            o.update_item(&id, ItemPatch::title(title));
            Some(id)
        })?
        .ok_or("could not insert item")?;
    println!("{} added", id);
    Ok(())
}

fn cmd_title(args: TitleArgs, ctx: &Context) -> CmdResult {
    patch_item(ctx, &args.id, ItemPatch::title(args.title), "title updated")
}

fn cmd_set_completed(args: ItemArg, completed: bool, ctx: &Context) -> CmdResult {
    let verb = if completed { "done" } else { "not done" };
    patch_item(ctx, &args.id, ItemPatch::completed(completed), verb)
}

fn cmd_level(args: ItemArg, direction: LevelChange, ctx: &Context) -> CmdResult {
    let (mut session, _lock) = open_write(ctx)?;
    let id = resolve_item_id(&session, &args.id)?;
    session.apply(|o| o.change_level(&id, direction))?;
    let level = active_list(&session)?
        .item(&id)
        .map(|item| item.level)
        .unwrap_or(0);
    println!("{} level {}", id, level);
    Ok(())
}

fn cmd_dup(args: ItemArg, ctx: &Context) -> CmdResult {
    let (mut session, _lock) = open_write(ctx)?;
    let id = resolve_item_id(&session, &args.id)?;
    let copy = session
        .apply(|o| o.duplicate_item(&id))?
        .ok_or_else(|| format!("could not duplicate {}", id))?;
    println!("{} duplicated as {}", id, copy);
    Ok(())
}

fn cmd_rm(args: ItemArg, ctx: &Context) -> CmdResult {
    let (mut session, _lock) = open_write(ctx)?;
    let id = resolve_item_id(&session, &args.id)?;
    session.apply(|o| o.delete_item(&id))?;
    println!("{} deleted", id);
    Ok(())
}

fn cmd_due(args: DueArgs, ctx: &Context) -> CmdResult {
    if args.date.eq_ignore_ascii_case("none") {
        if args.time.is_some() {
            return Err("--time cannot be combined with clearing the date".into());
        }
        return patch_item(ctx, &args.id, ItemPatch::clear_schedule(), "schedule cleared");
    }

    let today = Local::now().date_naive();
    let date = schedule::parse_due_date(&args.date, today).ok_or_else(|| {
        format!(
            "invalid date '{}' (expected: YYYY-MM-DD, today, tomorrow, +N, none)",
            args.date
        )
    })?;
    let mut patch = ItemPatch::due_date(Some(date));
    if let Some(time) = args.time.as_deref() {
        let time = schedule::parse_due_time(time)
            .ok_or_else(|| format!("invalid time '{}' (expected: HH:MM)", time))?;
        patch.due_time = Some(Some(time));
    }
    patch_item(ctx, &args.id, patch, &format!("due {}", date.format("%Y-%m-%d")))
}

fn cmd_priority(args: PriorityArgs, ctx: &Context) -> CmdResult {
    let priority = Priority::parse(&args.priority).ok_or_else(|| {
        format!(
            "unknown priority '{}' (expected: high, medium, low, none)",
            args.priority
        )
    })?;
    let verb = match priority {
        Some(p) => format!("priority {}", p),
        None => "priority cleared".to_string(),
    };
    patch_item(ctx, &args.id, ItemPatch::priority(priority), &verb)
}
