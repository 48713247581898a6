//! Line commands read from stdin in headless mode
//!
//! ```text
//! add <id>        register an alarm with the store
//! edit <id>       start editing an existing alarm
//! new <id>        create an alarm and edit it as new
//! hide            end the edit session
//! select <id>     pick a menu item by its host identifier
//! confirm | cancel | dismiss
//! detach          release the controller's subscription
//! quit
//! ```

use actionbar_app::{Message, PromptResponse};
use actionbar_core::prelude::*;
use actionbar_core::AlarmId;

/// A parsed stdin command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    Add(AlarmId),
    Edit(AlarmId),
    New(AlarmId),
    Hide,
    Select(String),
    Respond(PromptResponse),
    Detach,
    Quit,
}

impl HostCommand {
    /// The controller message for UI-side commands; `None` for commands
    /// that go to the store.
    pub fn into_message(self) -> Option<Message> {
        match self {
            HostCommand::Select(id) => Some(Message::MenuItemSelected(id)),
            HostCommand::Respond(response) => Some(Message::PromptResolved(response)),
            HostCommand::Detach => Some(Message::Detach),
            HostCommand::Quit => Some(Message::Quit),
            HostCommand::Add(_)
            | HostCommand::Edit(_)
            | HostCommand::New(_)
            | HostCommand::Hide => None,
        }
    }
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<HostCommand>> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next();
    if parts.next().is_some() {
        return Err(Error::invalid_state(format!(
            "too many arguments: {}",
            line.trim()
        )));
    }

    let command = match (verb, arg) {
        ("add", Some(id)) => HostCommand::Add(parse_id(id)?),
        ("edit", Some(id)) => HostCommand::Edit(parse_id(id)?),
        ("new", Some(id)) => HostCommand::New(parse_id(id)?),
        ("select", Some(id)) => HostCommand::Select(id.to_string()),
        ("hide", None) => HostCommand::Hide,
        ("confirm", None) => HostCommand::Respond(PromptResponse::Confirm),
        ("cancel", None) => HostCommand::Respond(PromptResponse::Cancel),
        ("dismiss", None) => HostCommand::Respond(PromptResponse::Dismiss),
        ("detach", None) => HostCommand::Detach,
        ("q" | "quit", None) => HostCommand::Quit,
        _ => {
            return Err(Error::invalid_state(format!(
                "unknown command: {}",
                line.trim()
            )))
        }
    };
    Ok(Some(command))
}

fn parse_id(raw: &str) -> Result<AlarmId> {
    raw.parse::<i32>()
        .map(AlarmId)
        .map_err(|_| Error::invalid_state(format!("invalid alarm id: {}", raw)))
}
