//! Hand-rolled fakes for the ports, shared by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    codespaces::{Codespace, CodespacesApi, LifecycleAction},
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::{port::MessagingPort, types::InlineKeyboard},
    Result,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sent {
    Text {
        chat_id: ChatId,
        text: String,
    },
    Keyboard {
        chat_id: ChatId,
        text: String,
        keyboard: InlineKeyboard,
    },
    Edit {
        msg: MessageRef,
        text: String,
    },
    Answer {
        callback_id: String,
        text: Option<String>,
    },
}

#[derive(Default)]
pub struct FakeMessenger {
    sent: Mutex<Vec<Sent>>,
    next_id: Mutex<i32>,
}

impl FakeMessenger {
    pub fn take(&self) -> Vec<Sent> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }

    fn alloc(&self, chat_id: ChatId) -> MessageRef {
        let mut guard = self.next_id.lock().unwrap();
        *guard += 1;
        MessageRef {
            chat_id,
            message_id: MessageId(*guard),
        }
    }
}

#[async_trait]
impl MessagingPort for FakeMessenger {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
        self.sent.lock().unwrap().push(Sent::Text {
            chat_id,
            text: text.to_string(),
        });
        Ok(self.alloc(chat_id))
    }

    async fn edit_text(&self, msg: MessageRef, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(Sent::Edit {
            msg,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_inline_keyboard(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: InlineKeyboard,
    ) -> Result<MessageRef> {
        self.sent.lock().unwrap().push(Sent::Keyboard {
            chat_id,
            text: text.to_string(),
            keyboard,
        });
        Ok(self.alloc(chat_id))
    }

    async fn answer_callback_query(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        self.sent.lock().unwrap().push(Sent::Answer {
            callback_id: callback_id.to_string(),
            text: text.map(str::to_string),
        });
        Ok(())
    }
}

/// Codespaces API that either succeeds with a fixed listing or fails every call
/// with one status. Records `"{op} {token} [{id}]"` per call.
#[derive(Default)]
pub struct FakeCodespaces {
    ids: Vec<String>,
    fail_status: Option<u16>,
    calls: Mutex<Vec<String>>,
}

impl FakeCodespaces {
    pub fn listing(ids: &[&str]) -> Self {
        Self {
            ids: ids.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CodespacesApi for FakeCodespaces {
    async fn list(&self, token: &str) -> Result<Vec<Codespace>> {
        self.calls.lock().unwrap().push(format!("list {token}"));
        if let Some(status) = self.fail_status {
            return Err(Error::UnexpectedStatus {
                operation: "list codespaces",
                status,
            });
        }
        Ok(self
            .ids
            .iter()
            .map(|id| Codespace { id: id.clone() })
            .collect())
    }

    async fn transition(&self, token: &str, id: &str, action: LifecycleAction) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} {token} {id}", action.path_segment()));
        if let Some(status) = self.fail_status {
            return Err(Error::UnexpectedStatus {
                operation: "codespace lifecycle",
                status,
            });
        }
        Ok(())
    }
}
