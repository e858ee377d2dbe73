// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! One AI conversation's message log with optimistic send. The list is
//! insertion-ordered and never re-sorted; display order is array order.

use chrono::Local;

use crate::api::{ApiClient, ApiError};
use crate::models::{ChatHistory, ChatInteraction, ChatMessage, ChatRequest, Role};

#[derive(Debug, Default)]
pub struct ChatSession {
    chat_id: Option<i64>,
    messages: Vec<ChatMessage>,
    // Client-generated ids count down from -1 so they can never collide
    // with server-assigned ids.
    next_local_id: i64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            chat_id: None,
            messages: Vec::new(),
            next_local_id: -1,
        }
    }

    pub fn chat_id(&self) -> Option<i64> {
        self.chat_id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Optimistically append the user's message before any network call.
    /// Whitespace-only input is a no-op and returns None.
    pub fn push_local(&mut self, text: &str) -> Option<i64> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let id = self.next_local_id;
        self.next_local_id -= 1;
        self.messages.push(ChatMessage {
            id,
            chat_id: self.chat_id.unwrap_or(0),
            role: Role::User,
            content: trimmed.to_string(),
            created_at: Local::now().to_rfc3339(),
        });
        Some(id)
    }

    /// Append the bot response and adopt the chat id when this send created
    /// the session. The optimistic user message stays; the server does not
    /// echo it back.
    pub fn resolve_success(&mut self, interaction: ChatInteraction) {
        if self.chat_id.is_none() {
            self.chat_id = Some(interaction.chat.id);
        }
        self.messages.push(interaction.bot_response);
    }

    /// Remove exactly the synthesized message; everything else stays.
    pub fn resolve_failure(&mut self, local_id: i64) {
        self.messages.retain(|m| m.id != local_id);
    }

    /// Full snapshot replacement. A history without a chat leaves the
    /// session untouched (there is nothing to show yet).
    pub fn load_history(&mut self, history: ChatHistory) {
        if let Some(chat) = &history.chat {
            self.chat_id = Some(chat.id);
            self.messages = history.messages;
        }
    }

    /// Switch to a known session, replacing the whole list.
    pub fn load_chat(&mut self, chat_id: i64, history: ChatHistory) {
        self.chat_id = Some(chat_id);
        self.messages = history.messages;
    }

    /// Local reset only; the next send creates a new server-side session.
    pub fn start_new(&mut self) {
        self.chat_id = None;
        self.messages.clear();
    }

    /// Optimistic send. Returns the bot reply on success, None for
    /// whitespace-only input; on failure the synthesized message is removed
    /// before the error propagates.
    pub fn send(
        &mut self,
        api: &ApiClient,
        business_id: i64,
        text: &str,
    ) -> Result<Option<&ChatMessage>, ApiError> {
        let Some(local_id) = self.push_local(text) else {
            return Ok(None);
        };
        let req = ChatRequest {
            message: text.trim().to_string(),
            chat_id: self.chat_id,
        };
        match api.send_chat(business_id, &req) {
            Ok(interaction) => {
                self.resolve_success(interaction);
                Ok(self.messages.last())
            }
            Err(err) => {
                self.resolve_failure(local_id);
                Err(err)
            }
        }
    }
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "Anda",
        Role::Bot => "NusaBiz AI",
    }
}
