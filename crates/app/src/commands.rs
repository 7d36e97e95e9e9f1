//! Dispatch of parsed subcommands onto the tracker.

use api_types::Id;
use engine::{OperationDraft, Store, Tracker, parse_kind};

use crate::{
    config::{
        AppConfig, CategoriesCommand, Command, FilterCommand, OperationArgs, OperationsCommand,
    },
    error::{AppError, Result},
    local_state::LocalState,
    render, session,
};

/// Run one command and return the text to print.
///
/// `state` is written back to `config.state_path` whenever the command changes it.
pub async fn run<S: Store>(
    tracker: &Tracker<S>,
    config: &AppConfig,
    state: &mut LocalState,
    command: Command,
) -> Result<String> {
    if !matches!(
        command,
        Command::Login { .. } | Command::Logout | Command::Status
    ) {
        session::require_login(state)?;
    }

    let symbol = config.currency_symbol.as_str();
    match command {
        Command::Login { username } => {
            let username = match username {
                Some(username) => username,
                None if !config.username.is_empty() => config.username.clone(),
                None => return Err(AppError::LoginFailed),
            };
            let password = rpassword::prompt_password(format!("Password for {username}: "))?;
            let outcome = session::login(tracker.store(), state, &username, &password).await;
            state.save(&config.state_path)?;
            outcome?;
            Ok(format!("Logged in as {username}.\n"))
        }
        Command::Logout => {
            session::logout(state);
            state.save(&config.state_path)?;
            Ok("Logged out.\n".to_string())
        }
        Command::Status => Ok(match (session::auth_status(state), &state.username) {
            (true, Some(username)) => format!("Logged in as {username}.\n"),
            (true, None) => "Logged in.\n".to_string(),
            (false, _) => "Not logged in.\n".to_string(),
        }),
        Command::Balance => {
            let balance = tracker.calculate_balance().await;
            Ok(render::format_balance(&balance, symbol))
        }
        Command::Report { json } => {
            let report = tracker.generate_reports().await;
            if json {
                let mut text = serde_json::to_string_pretty(&report)?;
                text.push('\n');
                Ok(text)
            } else {
                Ok(render::format_report(&report, symbol))
            }
        }
        Command::Operations(command) => operations(tracker, config, state, command, symbol).await,
        Command::Categories(command) => categories(tracker, command).await,
        Command::Filter(FilterCommand::Show) => Ok(render::format_filter(&state.saved_filters())),
        Command::Filter(FilterCommand::Reset) => {
            state.filters = None;
            state.save(&config.state_path)?;
            Ok(render::format_filter(&state.saved_filters()))
        }
    }
}

async fn operations<S: Store>(
    tracker: &Tracker<S>,
    config: &AppConfig,
    state: &mut LocalState,
    command: OperationsCommand,
    symbol: &str,
) -> Result<String> {
    match command {
        OperationsCommand::List {
            kind,
            category,
            sort,
        } => {
            let mut filter = state.saved_filters();
            if let Some(kind) = kind {
                filter.kind = kind;
            }
            if let Some(category) = category {
                filter.category = category;
            }
            if let Some(sort) = sort {
                filter.sort_by = sort;
            }
            state.set_filters(filter.clone());
            state.save(&config.state_path)?;

            let operations = tracker.list_operations(&filter).await;
            let categories = tracker.list_categories().await;
            Ok(render::format_operations(&operations, &categories, symbol))
        }
        OperationsCommand::Add(fields) => {
            let created = tracker.add_operation(&draft(fields)?).await?;
            Ok(format!("Added operation {}.\n", created.id))
        }
        OperationsCommand::Edit { id, fields } => {
            let updated = tracker
                .edit_operation(&Id::from(id), &draft(fields)?)
                .await?;
            Ok(format!("Updated operation {}.\n", updated.id))
        }
        OperationsCommand::Delete { id } => {
            let id = Id::from(id);
            tracker.delete_operation(&id).await?;
            Ok(format!("Deleted operation {id}.\n"))
        }
    }
}

async fn categories<S: Store>(tracker: &Tracker<S>, command: CategoriesCommand) -> Result<String> {
    match command {
        CategoriesCommand::List => {
            let categories = tracker.list_categories().await;
            Ok(render::format_categories(&categories))
        }
        CategoriesCommand::Add { name } => {
            let created = tracker.add_category(&name).await?;
            Ok(format!("Added category {} ({}).\n", created.name, created.id))
        }
        CategoriesCommand::Edit { id, name } => {
            let updated = tracker.edit_category(&Id::from(id), &name).await?;
            Ok(format!("Renamed category {} to {}.\n", updated.id, updated.name))
        }
        CategoriesCommand::Delete { id } => {
            let id = Id::from(id);
            tracker.delete_category(&id).await?;
            Ok(format!("Deleted category {id}.\n"))
        }
    }
}

fn draft(fields: OperationArgs) -> Result<OperationDraft> {
    let kind = parse_kind(&fields.kind)?;
    let date = fields
        .date
        .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
    Ok(OperationDraft::new(kind, fields.amount, date)
        .description(fields.description)
        .category(fields.category))
}
