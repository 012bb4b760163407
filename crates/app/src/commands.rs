//! Command execution against [`AppState`].
//!
//! Output goes to the supplied writer so the same code path serves the
//! binary (stdout) and the integration tests (a buffer).

use std::io::Write;

use feedback_core::error::CoreError;
use feedback_core::feedback::{FeedbackDraft, FeedbackRecord};
use feedback_core::selection::Selection;
use feedback_core::session::Credentials;
use feedback_core::theme::Theme;
use feedback_core::types::FeedbackId;
use feedback_core::view::{project, SortDirection, SortKey, ViewQuery};
use feedback_db::repositories::ThemeRepo;
use feedback_db::KvStore;

use crate::cli::{BulkArgs, Command, ThemeChoice};
use crate::error::{AppError, AppResult};
use crate::routes;
use crate::state::AppState;
use crate::store::UpdateOutcome;

/// Run one command, enforcing the login/dashboard gate first.
pub async fn execute<S: KvStore>(
    state: &mut AppState<S>,
    command: Command,
    out: &mut impl Write,
) -> AppResult<()> {
    let requested = command.route();
    let shown = routes::resolve(requested, state.session.current());
    if shown != requested {
        return Err(match state.session.current() {
            Some(session) => AppError::AlreadyAuthenticated(session.email.clone()),
            None => AppError::Unauthenticated,
        });
    }

    match command {
        Command::Login { email, password } => {
            let session = state
                .session
                .login(Credentials::new(email, password))
                .await?;
            writeln!(out, "Logged in as {}", session.email)?;
        }
        Command::Logout => {
            state.session.logout().await?;
            writeln!(out, "Logged out")?;
        }
        Command::List { view, json } => {
            let items = state.feedback.snapshot().await;
            let query = view.to_query();
            let rows = project(&items, &query);
            if json {
                serde_json::to_writer_pretty(&mut *out, &rows)
                    .map_err(|e| AppError::Output(e.into()))?;
                writeln!(out)?;
            } else {
                render_table(out, &rows, &query)?;
            }
        }
        Command::Show { id } => {
            let id = FeedbackId::from(id);
            let record = find(state, &id).await?;
            render_detail(out, &record)?;
        }
        Command::Add {
            title,
            message,
            feedback_type,
            priority,
        } => {
            let new = FeedbackDraft::new(title, message, feedback_type, Some(priority))
                .into_new(FeedbackId::generate())?;
            let record = state.feedback.create(new).await?;
            writeln!(out, "Feedback added! ({})", record.id)?;
        }
        Command::Edit {
            id,
            title,
            message,
            feedback_type,
            priority,
            archived,
        } => {
            let id = FeedbackId::from(id);
            let existing = find(state, &id).await?;
            let mut draft = FeedbackDraft::from_record(&existing);
            if let Some(title) = title {
                draft.title = title.trim().to_string();
            }
            if let Some(message) = message {
                draft.message = message.trim().to_string();
            }
            if let Some(feedback_type) = feedback_type {
                draft.feedback_type = feedback_type;
            }
            if priority.is_some() {
                draft.priority = priority;
            }
            let mut update = draft.into_update(id.clone())?;
            if let Some(archived) = archived {
                update = update.with_archived(archived);
            }
            match state.feedback.update(update).await? {
                UpdateOutcome::Updated(_) => writeln!(out, "Feedback updated!")?,
                UpdateOutcome::NotFound => writeln!(out, "Feedback {id} no longer exists")?,
            }
        }
        Command::Delete(args) => {
            let Some(ids) = select(state, &args, out).await? else {
                return Ok(());
            };
            let removed = state.feedback.delete_many(&ids).await?;
            writeln!(out, "Deleted {removed} feedback item(s)")?;
        }
        Command::Archive(args) => {
            let Some(ids) = select(state, &args, out).await? else {
                return Ok(());
            };
            let matched = state.feedback.archive_many(&ids).await?;
            writeln!(out, "Archived {matched} feedback item(s)")?;
        }
        Command::Unarchive(args) => {
            let Some(ids) = select(state, &args, out).await? else {
                return Ok(());
            };
            let matched = state.feedback.unarchive_many(&ids).await?;
            writeln!(out, "Unarchived {matched} feedback item(s)")?;
        }
        Command::Theme { choice } => {
            let storage = state.feedback.storage();
            let current = ThemeRepo::load(storage).await?;
            let next = match choice {
                None => current,
                Some(ThemeChoice::Toggle) => current.toggled(),
                Some(ThemeChoice::Dark) => Theme::Dark,
                Some(ThemeChoice::Light) => Theme::Light,
            };
            if choice.is_some() {
                ThemeRepo::save(storage, next).await?;
            }
            writeln!(out, "Theme: {next}")?;
        }
    }
    Ok(())
}

async fn find<S: KvStore>(state: &AppState<S>, id: &FeedbackId) -> AppResult<FeedbackRecord> {
    state.feedback.get(id).await.ok_or_else(|| {
        CoreError::NotFound {
            entity: "feedback",
            id: id.to_string(),
        }
        .into()
    })
}

/// Resolve the ids a bulk command acts on. Returns `None` (after telling the
/// user) when nothing is selected.
async fn select<S: KvStore>(
    state: &AppState<S>,
    args: &BulkArgs,
    out: &mut impl Write,
) -> AppResult<Option<Vec<FeedbackId>>> {
    let mut selection = Selection::new();
    if args.all_visible {
        let items = state.feedback.snapshot().await;
        let rows = project(&items, &args.view.to_query());
        selection.toggle_all(&rows);
    } else {
        for id in &args.ids {
            let id = FeedbackId::from(id.as_str());
            if !selection.contains(&id) {
                selection.toggle(&id);
            }
        }
    }

    if selection.is_empty() {
        writeln!(out, "No feedback selected")?;
        return Ok(None);
    }
    Ok(Some(selection.take()))
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

const TITLE_WIDTH: usize = 24;
const MESSAGE_WIDTH: usize = 40;

fn render_table(
    out: &mut impl Write,
    rows: &[&FeedbackRecord],
    query: &ViewQuery,
) -> std::io::Result<()> {
    let header = |label: &str, key: SortKey| -> String {
        match query.sort {
            Some(spec) if spec.key == key => match spec.direction {
                SortDirection::Asc => format!("{label} ▲"),
                SortDirection::Desc => format!("{label} ▼"),
            },
            _ => label.to_string(),
        }
    };

    writeln!(
        out,
        "{:<36}  {:<tw$}  {:<mw$}  {:<8}  TYPE",
        "ID",
        header("TITLE", SortKey::Title),
        header("MESSAGE", SortKey::Message),
        header("PRIORITY", SortKey::Priority),
        tw = TITLE_WIDTH,
        mw = MESSAGE_WIDTH,
    )?;

    if rows.is_empty() {
        return writeln!(out, "No feedback found.");
    }

    for record in rows {
        writeln!(
            out,
            "{:<36}  {:<tw$}  {:<mw$}  {:<8}  {}",
            record.id,
            truncate(&record.title, TITLE_WIDTH),
            truncate(&record.message, MESSAGE_WIDTH),
            record.priority,
            record.feedback_type,
            tw = TITLE_WIDTH,
            mw = MESSAGE_WIDTH,
        )?;
    }
    Ok(())
}

fn render_detail(out: &mut impl Write, record: &FeedbackRecord) -> std::io::Result<()> {
    writeln!(out, "{}", record.title)?;
    writeln!(out, "Message:  {}", record.message)?;
    writeln!(out, "Priority: {}", record.priority)?;
    writeln!(out, "Type:     {}", record.feedback_type)?;
    writeln!(
        out,
        "Archived: {}",
        if record.archived { "Yes" } else { "No" }
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
