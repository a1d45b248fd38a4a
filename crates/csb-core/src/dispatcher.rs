//! Routes inbound commands and button presses to handlers and sends the reply.

use std::{collections::HashMap, sync::Arc};

use crate::{
    codespaces::LifecycleAction,
    commands::{
        AddTokenCommand, BotContext, CallbackEvent, CommandEvent, CommandHandler, HelpCommand,
        ListCodespacesCommand, LifecycleCommand, Reply, SendCommand, StartCommand, COPY_PREFIX,
    },
    domain::MessageRef,
    messaging::port::MessagingPort,
    Result,
};

pub struct Dispatcher {
    ctx: BotContext,
    messenger: Arc<dyn MessagingPort>,
    handlers: HashMap<&'static str, Box<dyn CommandHandler>>,
}

impl Dispatcher {
    pub fn new(ctx: BotContext, messenger: Arc<dyn MessagingPort>) -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn CommandHandler>> = HashMap::new();
        handlers.insert("start", Box::new(StartCommand));
        handlers.insert("help", Box::new(HelpCommand));
        handlers.insert("add", Box::new(AddTokenCommand));
        handlers.insert("list_codespaces", Box::new(ListCodespacesCommand));
        handlers.insert(
            "start_codespace",
            Box::new(LifecycleCommand {
                action: LifecycleAction::Start,
            }),
        );
        handlers.insert(
            "stop_codespace",
            Box::new(LifecycleCommand {
                action: LifecycleAction::Stop,
            }),
        );
        handlers.insert("send", Box::new(SendCommand));

        Self {
            ctx,
            messenger,
            handlers,
        }
    }

    /// Run the matching handler and send its single reply.
    ///
    /// Unknown commands are ignored and return `Ok(None)`.
    pub async fn dispatch(&self, cmd: &CommandEvent) -> Result<Option<MessageRef>> {
        let Some(handler) = self.handlers.get(cmd.name.as_str()) else {
            tracing::debug!(command = %cmd.name, "ignoring unknown command");
            return Ok(None);
        };

        tracing::info!(command = %cmd.name, user_id = cmd.user_id.0, "handling command");
        let reply = handler.handle(&self.ctx, cmd).await;

        let sent = match reply {
            Reply::Text(text) => self.messenger.send_text(cmd.chat_id, &text).await?,
            Reply::Keyboard { text, keyboard } => {
                self.messenger
                    .send_inline_keyboard(cmd.chat_id, &text, keyboard)
                    .await?
            }
        };
        Ok(Some(sent))
    }

    /// Handle a `copy:<id>` button press: acknowledge it, then show the id in place
    /// of the keyboard message. Other payloads are ignored.
    pub async fn handle_callback(&self, cb: &CallbackEvent) -> Result<()> {
        let Some(id) = cb.data.strip_prefix(COPY_PREFIX) else {
            return Ok(());
        };

        self.messenger
            .answer_callback_query(&cb.callback_id, None)
            .await?;
        if let Some(msg) = cb.message {
            self.messenger
                .edit_text(msg, &format!("Codespace ID: {id}"))
                .await?;
        }
        Ok(())
    }
}
