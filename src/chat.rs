// 💬 Chat Conversation State Machine
// The floating assistant widget, modeled as explicit states and transitions
// instead of UI-framework booleans:
//
//   Idle --submit--> Sending --dispatched--> AwaitingReply --reply_received--> Idle
//
// Reply content comes from the caller (the response scripting and its fake
// typing delay are external). The machine only guards ordering: one user
// message in flight at a time, replies only when one is expected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ChatError;

// ============================================================================
// MESSAGES
// ============================================================================

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Stable identity (UUID)
    pub id: String,

    /// Message text
    pub content: String,

    /// User or assistant
    pub sender: Sender,

    /// When the message entered the transcript
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(content: &str, sender: Sender, sent_at: DateTime<Utc>) -> Self {
        ChatMessage {
            id: Uuid::new_v4().to_string(),
            content: content.to_string(),
            sender,
            sent_at,
        }
    }
}

// ============================================================================
// CONVERSATION STATES
// ============================================================================

/// Named conversation states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatState {
    /// Ready for user input
    Idle,
    /// A user message was accepted but not yet handed to the responder
    Sending,
    /// Waiting for the responder's reply (the widget shows "typing...")
    AwaitingReply,
}

impl ChatState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatState::Idle => "idle",
            ChatState::Sending => "sending",
            ChatState::AwaitingReply => "awaiting_reply",
        }
    }
}

// ============================================================================
// CONVERSATION
// ============================================================================

/// A chat transcript plus its current state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConversation {
    state: ChatState,
    messages: Vec<ChatMessage>,
}

impl ChatConversation {
    /// Start an empty conversation.
    pub fn new() -> Self {
        ChatConversation {
            state: ChatState::Idle,
            messages: Vec::new(),
        }
    }

    /// Start with an assistant greeting, as the widget does on first open.
    pub fn with_greeting(greeting: &str, now: DateTime<Utc>) -> Self {
        ChatConversation {
            state: ChatState::Idle,
            messages: vec![ChatMessage::new(greeting, Sender::Assistant, now)],
        }
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether the widget should render the typing indicator.
    pub fn is_awaiting_reply(&self) -> bool {
        self.state == ChatState::AwaitingReply
    }

    /// Accept a user message. Only legal in Idle; whitespace-only input is
    /// rejected without a state change.
    pub fn submit(&mut self, content: &str, now: DateTime<Utc>) -> Result<&ChatMessage, ChatError> {
        if self.state != ChatState::Idle {
            return Err(ChatError::InvalidTransition {
                state: self.state.as_str(),
                event: "submit",
            });
        }
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        self.messages.push(ChatMessage::new(trimmed, Sender::User, now));
        self.state = ChatState::Sending;
        Ok(&self.messages[self.messages.len() - 1])
    }

    /// The pending message was handed to the responder.
    pub fn dispatched(&mut self) -> Result<(), ChatError> {
        if self.state != ChatState::Sending {
            return Err(ChatError::InvalidTransition {
                state: self.state.as_str(),
                event: "dispatched",
            });
        }
        self.state = ChatState::AwaitingReply;
        Ok(())
    }

    /// Record the responder's reply and return to Idle.
    pub fn reply_received(
        &mut self,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<&ChatMessage, ChatError> {
        if self.state != ChatState::AwaitingReply {
            return Err(ChatError::InvalidTransition {
                state: self.state.as_str(),
                event: "reply_received",
            });
        }
        self.messages
            .push(ChatMessage::new(content, Sender::Assistant, now));
        self.state = ChatState::Idle;
        Ok(&self.messages[self.messages.len() - 1])
    }
}

impl Default for ChatConversation {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// PANEL TOGGLE
// ============================================================================

/// The widget's open/closed view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

impl PanelState {
    pub fn toggle(self) -> PanelState {
        match self {
            PanelState::Closed => PanelState::Open,
            PanelState::Open => PanelState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == PanelState::Open
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_full_exchange_cycle() {
        let mut chat = ChatConversation::with_greeting("Olá! Como posso ajudá-lo hoje?", now());
        assert_eq!(chat.state(), ChatState::Idle);
        assert_eq!(chat.messages().len(), 1);

        chat.submit("Qual é o meu saldo?", now()).unwrap();
        assert_eq!(chat.state(), ChatState::Sending);

        chat.dispatched().unwrap();
        assert_eq!(chat.state(), ChatState::AwaitingReply);
        assert!(chat.is_awaiting_reply());

        chat.reply_received("Seu saldo atual é R$ 12.580,45.", now()).unwrap();
        assert_eq!(chat.state(), ChatState::Idle);
        assert_eq!(chat.messages().len(), 3);
        assert_eq!(chat.messages()[1].sender, Sender::User);
        assert_eq!(chat.messages()[2].sender, Sender::Assistant);
    }

    #[test]
    fn test_submit_rejected_while_awaiting_reply() {
        let mut chat = ChatConversation::new();
        chat.submit("primeira", now()).unwrap();
        chat.dispatched().unwrap();

        let err = chat.submit("segunda", now()).unwrap_err();
        assert_eq!(
            err,
            ChatError::InvalidTransition {
                state: "awaiting_reply",
                event: "submit",
            }
        );
        // Rejected input never enters the transcript
        assert_eq!(chat.messages().len(), 1);
    }

    #[test]
    fn test_reply_rejected_when_idle() {
        let mut chat = ChatConversation::new();
        let err = chat.reply_received("resposta órfã", now()).unwrap_err();
        assert_eq!(
            err,
            ChatError::InvalidTransition {
                state: "idle",
                event: "reply_received",
            }
        );
    }

    #[test]
    fn test_dispatched_rejected_when_idle() {
        let mut chat = ChatConversation::new();
        assert!(chat.dispatched().is_err());
    }

    #[test]
    fn test_empty_submit_keeps_state() {
        let mut chat = ChatConversation::new();
        assert_eq!(chat.submit("   ", now()).unwrap_err(), ChatError::EmptyMessage);
        assert_eq!(chat.state(), ChatState::Idle);
        assert!(chat.messages().is_empty());
    }

    #[test]
    fn test_submit_trims_content() {
        let mut chat = ChatConversation::new();
        let message = chat.submit("  olá  ", now()).unwrap();
        assert_eq!(message.content, "olá");
    }

    #[test]
    fn test_panel_toggle() {
        let panel = PanelState::default();
        assert!(!panel.is_open());
        assert!(panel.toggle().is_open());
        assert_eq!(panel.toggle().toggle(), PanelState::Closed);
    }
}
