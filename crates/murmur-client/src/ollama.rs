//! HTTP client for an Ollama-compatible `/api/chat` endpoint.
//!
//! Non-streaming calls return one JSON body; streaming calls return
//! newline-delimited JSON, one chunk per line, terminated by a line with
//! `"done": true`. A line carrying an `"error"` field aborts the reply.

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, error};

use murmur_core::{ChatChunk, ChatError, ChatRequest, ChatResponse, Turn};

use crate::traits::{ChatBackend, Fragment, FragmentStream};

/// Default Ollama host.
pub const DEFAULT_HOST: &str = "http://localhost:11434";

/// A chat backend that talks to a locally running Ollama server.
pub struct OllamaClient {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// Base URL (e.g. `"http://localhost:11434"`).
    host: String,
    /// Default model for this client instance.
    default_model: String,
}

impl std::fmt::Debug for OllamaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaClient")
            .field("host", &self.host)
            .field("default_model", &self.default_model)
            .finish()
    }
}

impl OllamaClient {
    /// Create a new client for `host`, defaulting to `model`.
    ///
    /// Only the connect phase is bounded by a timeout: a reply may stream
    /// for as long as the model keeps generating.
    pub fn new(host: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        OllamaClient {
            client,
            host: host.into(),
            default_model: model.into(),
        }
    }

    /// Build the full chat URL.
    fn chat_url(&self) -> String {
        let base = self.host.trim_end_matches('/');
        format!("{}/api/chat", base)
    }

    /// Issue the POST and map transport/status failures to `ChatError`.
    async fn post_chat(&self, model: &str, turns: &[Turn], stream: bool) -> Result<reqwest::Response, ChatError> {
        let request_body = ChatRequest {
            model: model.to_string(),
            messages: turns.to_vec(),
            stream,
        };

        debug!(
            host = %self.host,
            model = %model,
            turns = turns.len(),
            stream,
            "Calling inference backend"
        );

        let response = self
            .client
            .post(self.chat_url())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(host = %self.host, error = %e, "HTTP request failed");
                ChatError::InferenceUnavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(host = %self.host, status = %status, body = %message, "API error");
            return Err(ChatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl ChatBackend for OllamaClient {
    async fn chat(&self, model: &str, turns: &[Turn]) -> Result<String, ChatError> {
        let response = self.post_chat(model, turns, false).await?;

        let reply: ChatResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse reply");
            ChatError::MalformedReply(e.to_string())
        })?;

        debug!(chars = reply.message.content.len(), "Reply received");
        Ok(reply.message.content)
    }

    async fn chat_stream(&self, model: &str, turns: &[Turn]) -> Result<FragmentStream, ChatError> {
        let response = self.post_chat(model, turns, true).await?;

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(pump_stream(response, tx));

        Ok(UnboundedReceiverStream::new(rx).boxed())
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn display_name(&self) -> &str {
        "Ollama"
    }
}

// ─────────────────────────────────────────────
// Stream pump
// ─────────────────────────────────────────────

/// Read the response body, split NDJSON lines, and forward one fragment per
/// chunk until the done marker, an error, or the end of the body.
async fn pump_stream(
    response: reqwest::Response,
    tx: mpsc::UnboundedSender<Result<Fragment, ChatError>>,
) {
    let mut body = response.bytes_stream();
    let mut buf: Vec<u8> = Vec::new();

    while let Some(next) = body.next().await {
        let bytes = match next {
            Ok(b) => b,
            Err(e) => {
                error!(error = %e, "stream transport error");
                let _ = tx.send(Err(ChatError::InferenceUnavailable(e.to_string())));
                return;
            }
        };

        buf.extend_from_slice(&bytes);
        while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = buf.drain(..=pos).collect();
            if !forward_line(&line, &tx) {
                return;
            }
        }
    }

    // Trailing line without a newline terminator.
    if !buf.is_empty() {
        forward_line(&buf, &tx);
    }
}

/// Decode one NDJSON line and forward its fragment.
///
/// Returns `false` when the stream is finished: done marker seen, an error
/// forwarded, or the receiver dropped.
fn forward_line(line: &[u8], tx: &mpsc::UnboundedSender<Result<Fragment, ChatError>>) -> bool {
    let text = String::from_utf8_lossy(line);
    let text = text.trim();
    if text.is_empty() {
        return true;
    }

    let chunk: ChatChunk = match serde_json::from_str(text) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, line = %text, "undecodable stream line");
            let _ = tx.send(Err(ChatError::MalformedReply(e.to_string())));
            return false;
        }
    };

    if let Some(message) = chunk.error {
        error!(%message, "backend reported error mid-stream");
        let _ = tx.send(Err(ChatError::Api {
            status: 200,
            message,
        }));
        return false;
    }

    let done = chunk.done;
    let delta = chunk.message.and_then(|m| m.content);
    if tx.send(Ok(delta)).is_err() {
        return false;
    }
    !done
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use murmur_core::ReplyBuffer;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // ── Unit tests ──

    #[test]
    fn test_chat_url_trailing_slash() {
        let client = OllamaClient::new("http://localhost:11434/", "llama3");
        assert_eq!(client.chat_url(), "http://localhost:11434/api/chat");
    }

    #[test]
    fn test_chat_url_no_trailing_slash() {
        let client = OllamaClient::new("http://localhost:11434", "llama3");
        assert_eq!(client.chat_url(), "http://localhost:11434/api/chat");
    }

    #[test]
    fn test_default_model_and_name() {
        let client = OllamaClient::new(DEFAULT_HOST, "llama3");
        assert_eq!(client.default_model(), "llama3");
        assert_eq!(client.display_name(), "Ollama");
    }

    // ── Integration tests with mock server ──

    #[tokio::test]
    async fn test_chat_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "llama3",
                "message": {"role": "assistant", "content": "ok"},
                "done": true
            })))
            .mount(&mock_server)
            .await;

        let client = OllamaClient::new(mock_server.uri(), "llama3");
        let turns = vec![Turn::system("P"), Turn::user("hi")];

        let reply = client.chat("llama3", &turns).await.unwrap();
        assert_eq!(reply, "ok");
    }

    #[tokio::test]
    async fn test_chat_sends_correct_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama3",
                "stream": false,
                "messages": [
                    {"role": "system", "content": "P"},
                    {"role": "user", "content": "hi"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": {"role": "assistant", "content": "matched"}
            })))
            .mount(&mock_server)
            .await;

        let client = OllamaClient::new(mock_server.uri(), "llama3");
        let turns = vec![Turn::system("P"), Turn::user("hi")];

        // If the body matcher fails, wiremock returns 404 → we'd get an error
        let reply = client.chat("llama3", &turns).await.unwrap();
        assert_eq!(reply, "matched");
    }

    #[tokio::test]
    async fn test_chat_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"error": "model 'nope' not found"})),
            )
            .mount(&mock_server)
            .await;

        let client = OllamaClient::new(mock_server.uri(), "nope");
        let err = client.chat("nope", &[Turn::user("hi")]).await.unwrap_err();

        match err {
            ChatError::Api { status, message } => {
                assert_eq!(status, 404);
                assert!(message.contains("not found"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_chat_network_error() {
        // Point to a port that's not listening
        let client = OllamaClient::new("http://127.0.0.1:1", "llama3");
        let err = client.chat("llama3", &[Turn::user("hi")]).await.unwrap_err();
        assert!(matches!(err, ChatError::InferenceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_chat_malformed_reply() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = OllamaClient::new(mock_server.uri(), "llama3");
        let err = client.chat("llama3", &[Turn::user("hi")]).await.unwrap_err();
        assert!(matches!(err, ChatError::MalformedReply(_)));
    }

    #[tokio::test]
    async fn test_stream_fragments_in_order() {
        let mock_server = MockServer::start().await;

        let ndjson = concat!(
            r#"{"message":{"role":"assistant","content":"Hel"},"done":false}"#, "\n",
            r#"{"message":{"role":"assistant","content":"lo"},"done":false}"#, "\n",
            r#"{"message":{"role":"assistant","content":null},"done":false}"#, "\n",
            r#"{"message":{"role":"assistant","content":" world"},"done":false}"#, "\n",
            r#"{"message":{"role":"assistant","content":""},"done":true}"#, "\n",
        );

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(serde_json::json!({"stream": true})))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(ndjson, "application/x-ndjson"),
            )
            .mount(&mock_server)
            .await;

        let client = OllamaClient::new(mock_server.uri(), "llama3");
        let mut stream = client
            .chat_stream("llama3", &[Turn::user("hi")])
            .await
            .unwrap();

        let mut buffer = ReplyBuffer::new();
        while let Some(fragment) = stream.next().await {
            buffer.push(fragment.unwrap().as_deref());
        }
        assert_eq!(buffer.finish(), "Hello world");
    }

    #[tokio::test]
    async fn test_stream_error_line_aborts() {
        let mock_server = MockServer::start().await;

        let ndjson = concat!(
            r#"{"message":{"role":"assistant","content":"partial"},"done":false}"#, "\n",
            r#"{"error":"runner crashed"}"#, "\n",
        );

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(ndjson, "application/x-ndjson"),
            )
            .mount(&mock_server)
            .await;

        let client = OllamaClient::new(mock_server.uri(), "llama3");
        let mut stream = client
            .chat_stream("llama3", &[Turn::user("hi")])
            .await
            .unwrap();

        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.as_deref(), Some("partial"));

        let second = stream.next().await.unwrap().unwrap_err();
        match second {
            ChatError::Api { message, .. } => assert!(message.contains("runner crashed")),
            other => panic!("expected Api error, got {other:?}"),
        }

        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_stream_undecodable_line() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("garbage line\n", "application/x-ndjson"),
            )
            .mount(&mock_server)
            .await;

        let client = OllamaClient::new(mock_server.uri(), "llama3");
        let mut stream = client
            .chat_stream("llama3", &[Turn::user("hi")])
            .await
            .unwrap();

        let err = stream.next().await.unwrap().unwrap_err();
        assert!(matches!(err, ChatError::MalformedReply(_)));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_stream_http_error_before_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
            .mount(&mock_server)
            .await;

        let client = OllamaClient::new(mock_server.uri(), "llama3");
        let err = client
            .chat_stream("llama3", &[Turn::user("hi")])
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ChatError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_stream_without_trailing_newline() {
        let mock_server = MockServer::start().await;

        // Terminal chunk arrives without a newline terminator.
        let ndjson = concat!(
            r#"{"message":{"role":"assistant","content":"hi"},"done":false}"#, "\n",
            r#"{"message":{"role":"assistant","content":""},"done":true}"#,
        );

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(ndjson, "application/x-ndjson"),
            )
            .mount(&mock_server)
            .await;

        let client = OllamaClient::new(mock_server.uri(), "llama3");
        let mut stream = client
            .chat_stream("llama3", &[Turn::user("hi")])
            .await
            .unwrap();

        let mut buffer = ReplyBuffer::new();
        while let Some(fragment) = stream.next().await {
            buffer.push(fragment.unwrap().as_deref());
        }
        assert_eq!(buffer.finish(), "hi");
    }
}
