//! Chat module - provider-neutral conversation messages
//!
//! Wire formats for specific providers live in the infrastructure layer;
//! these types only carry the role/content pairs the prompt builder
//! produces.

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatRole {
    /// System directive
    System,
    /// User turn
    User,
    /// Model reply
    Assistant,
}

impl ChatRole {
    /// Get the role name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// One message in a chat-completion conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Who speaks this turn
    pub role: ChatRole,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let msg = ChatMessage::system("be brief");
        assert_eq!(msg.role, ChatRole::System);
        assert_eq!(msg.content, "be brief");
        assert_eq!(ChatMessage::user("hi").role.as_str(), "user");
    }
}
