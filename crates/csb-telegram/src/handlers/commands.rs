use std::sync::Arc;

use teloxide::prelude::*;

use csb_core::{
    commands::CommandEvent,
    domain::{ChatId, UserId},
};

use crate::router::AppState;

/// Split `/cmd@botname arg1 arg2` into a lowercase command name and its
/// whitespace-separated arguments. Arguments keep their case and order.
pub fn parse_command(text: &str) -> (String, Vec<String>) {
    let mut parts = text.split_whitespace();
    let first = parts.next().unwrap_or("");

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, parts.map(str::to_string).collect())
}

/// Build the core event for a command message. `None` for messages with no sender
/// or no text (channel posts, media).
pub fn command_event(msg: &Message) -> Option<CommandEvent> {
    let user = msg.from()?;
    let text = msg.text()?;
    let (name, args) = parse_command(text);

    Some(CommandEvent {
        chat_id: ChatId(msg.chat.id.0),
        user_id: UserId(user.id.0 as i64),
        display_name: user.first_name.clone(),
        name,
        args,
    })
}

pub async fn handle_command(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(event) = command_event(&msg) else {
        return Ok(());
    };

    if let Err(e) = state.commands.dispatch(&event).await {
        tracing::warn!(
            command = %event.name,
            user_id = event.user_id.0,
            "failed to send reply: {e}"
        );
    }
    Ok(())
}
