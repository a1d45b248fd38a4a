//! Chat command handlers.
//!
//! Each handler is independent: it may read the credential store, make at most one
//! call to the codespaces API, and always produces exactly one [`Reply`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    codespaces::{CodespacesApi, LifecycleAction},
    credentials::CredentialStore,
    domain::{ChatId, MessageRef, UserId},
    messaging::types::InlineKeyboard,
    security::is_admin,
};

/// Callback payload prefix for the per-codespace buttons of `/list_codespaces`.
pub const COPY_PREFIX: &str = "copy:";

pub const ADD_USAGE: &str = "Please provide a GitHub token. Usage: /add <token>";
pub const ADD_TOKEN_FIRST: &str = "Please add your GitHub token first using /add <token>";
pub const LIST_FAILED: &str = "Failed to fetch codespaces.";
pub const NO_CODESPACES: &str = "No active codespaces found.";
pub const CODESPACES_HEADER: &str = "Your codespaces:";
/// Shared by start and stop; the status code is never surfaced.
pub const LIFECYCLE_FAILED: &str =
    "Failed to change the codespace state. Check the ID and your token.";
pub const SEND_USAGE: &str = "Please provide a message to send. Usage: /send <message>";
pub const NOT_AUTHORIZED: &str = "You are not authorized to use this command.";

/// A command as advertised in /help and the Telegram command menu.
#[derive(Clone, Copy, Debug)]
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "start",
        usage: "/start",
        description: "Start the bot",
    },
    CommandSpec {
        name: "help",
        usage: "/help",
        description: "Display this help message",
    },
    CommandSpec {
        name: "add",
        usage: "/add <token>",
        description: "Add or replace your GitHub token",
    },
    CommandSpec {
        name: "list_codespaces",
        usage: "/list_codespaces",
        description: "List your codespaces",
    },
    CommandSpec {
        name: "start_codespace",
        usage: "/start_codespace <codespace_id>",
        description: "Start a codespace",
    },
    CommandSpec {
        name: "stop_codespace",
        usage: "/stop_codespace <codespace_id>",
        description: "Stop a codespace",
    },
    CommandSpec {
        name: "send",
        usage: "/send <message>",
        description: "Send a message to all users (admin only)",
    },
];

pub fn help_text() -> String {
    let mut out = String::from("Available Commands:\n");
    for spec in COMMANDS {
        out.push_str(&format!("{} - {}\n", spec.usage, spec.description));
    }
    out
}

/// One inbound command, already stripped of the leading `/` and any `@botname`.
#[derive(Clone, Debug)]
pub struct CommandEvent {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub display_name: String,
    pub name: String,
    pub args: Vec<String>,
}

/// A button press on one of our inline keyboards.
#[derive(Clone, Debug)]
pub struct CallbackEvent {
    pub callback_id: String,
    pub message: Option<MessageRef>,
    pub data: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Keyboard {
        text: String,
        keyboard: InlineKeyboard,
    },
}

impl Reply {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }
}

/// Dependencies shared by every handler.
#[derive(Clone)]
pub struct BotContext {
    pub credentials: Arc<dyn CredentialStore>,
    pub codespaces: Arc<dyn CodespacesApi>,
    pub admin_id: Option<UserId>,
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: &BotContext, cmd: &CommandEvent) -> Reply;
}

pub struct StartCommand;

#[async_trait]
impl CommandHandler for StartCommand {
    async fn handle(&self, _ctx: &BotContext, cmd: &CommandEvent) -> Reply {
        Reply::text(format!(
            "Hello {}! Use /help to see available commands.",
            cmd.display_name
        ))
    }
}

pub struct HelpCommand;

#[async_trait]
impl CommandHandler for HelpCommand {
    async fn handle(&self, _ctx: &BotContext, _cmd: &CommandEvent) -> Reply {
        Reply::text(help_text())
    }
}

pub struct AddTokenCommand;

#[async_trait]
impl CommandHandler for AddTokenCommand {
    async fn handle(&self, ctx: &BotContext, cmd: &CommandEvent) -> Reply {
        let Some(token) = cmd.args.first() else {
            return Reply::text(ADD_USAGE);
        };
        ctx.credentials.set(cmd.user_id, token.clone());
        tracing::info!(user_id = cmd.user_id.0, "stored github token");
        Reply::text(format!("GitHub token added: {token}"))
    }
}

pub struct ListCodespacesCommand;

#[async_trait]
impl CommandHandler for ListCodespacesCommand {
    async fn handle(&self, ctx: &BotContext, cmd: &CommandEvent) -> Reply {
        let Some(token) = ctx.credentials.get(cmd.user_id) else {
            return Reply::text(ADD_TOKEN_FIRST);
        };

        match ctx.codespaces.list(&token).await {
            Ok(list) if list.is_empty() => Reply::text(NO_CODESPACES),
            Ok(list) => {
                let ids: Vec<&str> = list.iter().map(|c| c.id.as_str()).collect();
                match InlineKeyboard::one_per_row(COPY_PREFIX, &ids) {
                    Some(keyboard) => Reply::Keyboard {
                        text: CODESPACES_HEADER.to_string(),
                        keyboard,
                    },
                    // Ids too long for button data: list them as text instead.
                    None => Reply::text(format!("{CODESPACES_HEADER}\n{}", ids.join("\n"))),
                }
            }
            Err(e) => {
                tracing::warn!(user_id = cmd.user_id.0, error = %e, "listing codespaces failed");
                Reply::text(LIST_FAILED)
            }
        }
    }
}

/// `/start_codespace` and `/stop_codespace`.
pub struct LifecycleCommand {
    pub action: LifecycleAction,
}

impl LifecycleCommand {
    fn usage(&self) -> &'static str {
        match self.action {
            LifecycleAction::Start => "Usage: /start_codespace <codespace_id>",
            LifecycleAction::Stop => "Usage: /stop_codespace <codespace_id>",
        }
    }

    fn accepted(&self, id: &str) -> String {
        match self.action {
            LifecycleAction::Start => format!("Starting codespace {id}..."),
            LifecycleAction::Stop => format!("Stopping codespace {id}..."),
        }
    }
}

#[async_trait]
impl CommandHandler for LifecycleCommand {
    async fn handle(&self, ctx: &BotContext, cmd: &CommandEvent) -> Reply {
        let Some(token) = ctx.credentials.get(cmd.user_id) else {
            return Reply::text(ADD_TOKEN_FIRST);
        };
        let Some(id) = cmd.args.first() else {
            return Reply::text(self.usage());
        };

        match ctx.codespaces.transition(&token, id, self.action).await {
            Ok(()) => Reply::text(self.accepted(id)),
            Err(e) => {
                tracing::warn!(
                    user_id = cmd.user_id.0,
                    codespace = %id,
                    action = self.action.path_segment(),
                    error = %e,
                    "codespace lifecycle request failed"
                );
                Reply::text(LIFECYCLE_FAILED)
            }
        }
    }
}

/// Admin-only `/send`. Replies as if broadcast, but delivers nothing to other users.
pub struct SendCommand;

#[async_trait]
impl CommandHandler for SendCommand {
    async fn handle(&self, ctx: &BotContext, cmd: &CommandEvent) -> Reply {
        if !is_admin(cmd.user_id, ctx.admin_id) {
            return Reply::text(NOT_AUTHORIZED);
        }
        if cmd.args.is_empty() {
            return Reply::text(SEND_USAGE);
        }
        let message = cmd.args.join(" ");
        Reply::text(format!("Message sent to all users: {message}"))
    }
}
