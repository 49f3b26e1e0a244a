//! Configuration schema.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! `#[serde(rename_all = "camelCase")]` handles the conversion.

use serde::{Deserialize, Serialize};

/// Root configuration — loaded from `~/.murmur/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub chat: ChatConfig,
}

/// Chat session settings: which model to talk to, where, and how.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatConfig {
    /// Model identifier sent with every request.
    pub model: String,
    /// Base URL of the inference backend.
    pub host: String,
    /// Whether replies are streamed fragment by fragment.
    pub stream: bool,
    /// Optional persona text seeded as the system turn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: "llama3".to_string(),
            host: "http://localhost:11434".to_string(),
            stream: true,
            system_prompt: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.chat.model, "llama3");
        assert_eq!(config.chat.host, "http://localhost:11434");
        assert!(config.chat.stream);
        assert!(config.chat.system_prompt.is_none());
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let mut config = Config::default();
        config.chat.system_prompt = Some("P".to_string());
        let json = serde_json::to_value(&config).unwrap();
        assert!(json["chat"].get("systemPrompt").is_some());
        assert!(json["chat"].get("system_prompt").is_none());
    }

    #[test]
    fn test_none_prompt_omitted() {
        let json = serde_json::to_value(Config::default()).unwrap();
        assert!(json["chat"].get("systemPrompt").is_none());
    }
}
