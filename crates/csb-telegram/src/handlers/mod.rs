//! Telegram update handlers.
//!
//! Each handler is a small adapter that turns a teloxide update into a core event
//! and hands it to the command dispatcher.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, Message},
};

use csb_core::{
    commands::CallbackEvent,
    domain::{ChatId, MessageId, MessageRef},
};

use crate::router::AppState;
mod commands;

pub use commands::{command_event, parse_command};

pub async fn handle_callback(
    _bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let event = CallbackEvent {
        callback_id: q.id.clone(),
        message: q.message.as_ref().map(|m| MessageRef {
            chat_id: ChatId(m.chat.id.0),
            message_id: MessageId(m.id.0),
        }),
        data: q.data.clone().unwrap_or_default(),
    };

    if let Err(e) = state.commands.handle_callback(&event).await {
        tracing::warn!(user_id = q.from.id.0, "callback handling failed: {e}");
    }
    Ok(())
}

pub async fn handle_message(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    if !text.starts_with('/') {
        return Ok(());
    }
    commands::handle_command(msg, state).await
}
