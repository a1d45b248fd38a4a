use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*, types::BotCommand};

use csb_core::{
    codespaces::CodespacesApi,
    commands::{BotContext, COMMANDS},
    config::Config,
    credentials::InMemoryCredentialStore,
    dispatcher::Dispatcher as CommandDispatcher,
    messaging::port::MessagingPort,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub commands: Arc<CommandDispatcher>,
}

pub fn menu_commands() -> Vec<BotCommand> {
    COMMANDS
        .iter()
        .map(|c| BotCommand::new(c.name, c.description))
        .collect()
}

pub async fn run_polling(
    cfg: Arc<Config>,
    codespaces: Arc<dyn CodespacesApi>,
) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    // Basic startup info.
    match bot.get_me().await {
        Ok(me) => tracing::info!("csb started: @{}", me.username()),
        Err(e) => tracing::warn!("get_me failed: {e}"),
    }
    if cfg.admin_id.is_none() {
        tracing::info!("no admin configured; /send is disabled");
    }

    // Best effort: the bot works without a command menu.
    if let Err(e) = bot.set_my_commands(menu_commands()).await {
        tracing::warn!("failed to register command menu: {e}");
    }

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let ctx = BotContext {
        credentials: Arc::new(InMemoryCredentialStore::new()),
        codespaces,
        admin_id: cfg.admin_id,
    };

    let state = Arc::new(AppState {
        commands: Arc::new(CommandDispatcher::new(ctx, messenger)),
    });

    // Teloxide runs updates of the same chat sequentially, so one command finishes
    // (including its API call) before the next one from that chat starts.
    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_mirrors_command_table() {
        let menu = menu_commands();
        assert_eq!(menu.len(), COMMANDS.len());
        assert_eq!(menu[0].command, "start");
        assert!(menu.iter().any(|c| c.command == "list_codespaces"));
    }
}
