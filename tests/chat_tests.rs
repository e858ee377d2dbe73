// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use nusabiz::chat::ChatSession;
use nusabiz::models::{Chat, ChatHistory, ChatInteraction, ChatMessage, Role};

fn message(id: i64, role: Role, content: &str) -> ChatMessage {
    ChatMessage {
        id,
        chat_id: 42,
        role,
        content: content.to_string(),
        created_at: "2025-08-01T10:00:00+07:00".to_string(),
    }
}

fn interaction(chat_id: i64, bot_text: &str) -> ChatInteraction {
    ChatInteraction {
        chat: Chat {
            id: chat_id,
            user_id: "u1".into(),
            created_at: None,
            updated_at: None,
        },
        user_message: message(100, Role::User, "echoed"),
        bot_response: message(101, Role::Bot, bot_text),
    }
}

#[test]
fn whitespace_only_input_is_a_noop() {
    let mut chat = ChatSession::new();
    assert!(chat.push_local("   ").is_none());
    assert!(chat.push_local("").is_none());
    assert!(chat.messages().is_empty());
}

#[test]
fn push_local_appends_a_trimmed_user_message_with_client_id() {
    let mut chat = ChatSession::new();
    let id = chat.push_local("  hello  ").unwrap();
    assert!(id < 0, "client ids never collide with server ids");
    assert_eq!(chat.messages().len(), 1);
    assert_eq!(chat.messages()[0].content, "hello");
    assert_eq!(chat.messages()[0].role, Role::User);
}

#[test]
fn success_appends_bot_and_adopts_chat_id() {
    let mut chat = ChatSession::new();
    chat.push_local("hello").unwrap();
    chat.resolve_success(interaction(42, "hi there"));

    assert_eq!(chat.chat_id(), Some(42));
    let roles: Vec<Role> = chat.messages().iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Bot]);
    assert_eq!(chat.messages()[1].content, "hi there");
}

#[test]
fn an_existing_chat_id_is_not_overwritten() {
    let mut chat = ChatSession::new();
    chat.load_chat(
        7,
        ChatHistory {
            chat: None,
            messages: vec![],
        },
    );
    chat.push_local("again").unwrap();
    chat.resolve_success(interaction(42, "reply"));
    assert_eq!(chat.chat_id(), Some(7));
}

#[test]
fn failure_removes_exactly_the_optimistic_message() {
    let mut chat = ChatSession::new();
    let first = chat.push_local("hello").unwrap();
    let second = chat.push_local("still here").unwrap();

    chat.resolve_failure(first);
    assert_eq!(chat.messages().len(), 1);
    assert_eq!(chat.messages()[0].id, second);

    // Failing send on an empty session leaves the list empty.
    let mut empty = ChatSession::new();
    let id = empty.push_local("hello").unwrap();
    empty.resolve_failure(id);
    assert!(empty.messages().is_empty());
}

#[test]
fn load_history_replaces_only_when_a_chat_exists() {
    let mut chat = ChatSession::new();
    chat.push_local("optimistic").unwrap();

    chat.load_history(ChatHistory {
        chat: None,
        messages: vec![message(1, Role::Bot, "ignored")],
    });
    assert_eq!(chat.messages().len(), 1);
    assert_eq!(chat.chat_id(), None);

    chat.load_history(ChatHistory {
        chat: Some(Chat {
            id: 42,
            user_id: "u1".into(),
            created_at: None,
            updated_at: None,
        }),
        messages: vec![
            message(1, Role::User, "old"),
            message(2, Role::Bot, "older reply"),
        ],
    });
    assert_eq!(chat.chat_id(), Some(42));
    assert_eq!(chat.messages().len(), 2);
    assert_eq!(chat.messages()[0].content, "old");
}

#[test]
fn start_new_clears_locally() {
    let mut chat = ChatSession::new();
    chat.load_chat(
        9,
        ChatHistory {
            chat: None,
            messages: vec![message(1, Role::Bot, "hi")],
        },
    );
    chat.start_new();
    assert_eq!(chat.chat_id(), None);
    assert!(chat.messages().is_empty());
}
