pub mod models;

use common::error::{ConfigError, SummarizeError};
use common::http::{build_client, success_json};
use common::Config;
use models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use reqwest::Client;
use tracing::{debug, info, warn};

/// Produces short article briefs through an OpenAI-compatible chat-completion
/// endpoint.
///
/// The summarizer owns its HTTP connection pool; the pool is released when the
/// value is dropped, so scope it to a single run.
pub struct Summarizer {
    http_client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    max_content_chars: usize,
}

impl Summarizer {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let http_client = build_client(config.network, config.timeouts.summarize)?;
        Ok(Self {
            http_client,
            api_key: config.summarization_api_key.clone(),
            endpoint: format!(
                "{}/chat/completions",
                config.endpoints.summarizer.trim_end_matches('/')
            ),
            model: config.summarizer.model.clone(),
            max_content_chars: config.summarizer.max_content_chars,
        })
    }

    /// Never fails: an unsuccessful call comes back as a readable notice that
    /// takes the summary's place in the digest.
    pub async fn summarize(&self, title: &str, content: &str) -> String {
        info!("Summarizing: {}", title);
        let prompt = build_prompt(title, content, self.max_content_chars);
        match self.complete(&prompt).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(title, error = %e, "Summarization failed");
                format!("总结失败: {}", e)
            }
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, SummarizeError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        let res = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let resp: ChatCompletionResponse = success_json::<_, SummarizeError>(res).await?;
        resp.choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or(SummarizeError::NoChoices)
    }
}

impl Drop for Summarizer {
    fn drop(&mut self) {
        debug!("Releasing summarizer connection pool");
    }
}

/// Builds the brief-writing prompt, keeping at most `max_chars` characters of
/// the article body.
pub fn build_prompt(title: &str, content: &str, max_chars: usize) -> String {
    let excerpt: String = content.chars().take(max_chars).collect();
    format!(
        "请为 Hacker News 的热门文章撰写微型简报。\n\
         标题: {title}\n\
         内容: {excerpt}\n\
         \n\
         请输出 Markdown 格式，包含：\n\
         1. **一句话核心**：它是什么？\n\
         2. **关键点**：3个以内的技术要点或观点。\n\
         (保持简洁，不要废话，不要使用任何表情符号)\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{bearer_token, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn summarizer_for(server: &MockServer) -> Summarizer {
        let mut config = Config::new("sk-test", "token");
        config.endpoints.summarizer = server.uri();
        config.summarizer.max_content_chars = 50;
        Summarizer::new(&config).unwrap()
    }

    #[test]
    fn prompt_truncates_by_characters() {
        let content = "字".repeat(80);
        let prompt = build_prompt("Title", &content, 30);
        assert!(prompt.contains("标题: Title"));
        assert!(prompt.contains(&"字".repeat(30)));
        assert!(!prompt.contains(&"字".repeat(31)));
        assert!(prompt.contains("不要使用任何表情符号"));
    }

    #[tokio::test]
    async fn returns_first_choice_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(bearer_token("sk-test"))
            .and(body_partial_json(json!({"model": "deepseek-chat", "stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "**一句话核心**: a runtime"}},
                    {"message": {"role": "assistant", "content": "second"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let summary = summarizer_for(&server)
            .summarize("Tokio", &"x".repeat(500))
            .await;
        assert_eq!(summary, "**一句话核心**: a runtime");
    }

    #[tokio::test]
    async fn failure_becomes_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let summary = summarizer_for(&server).summarize("t", "content").await;
        assert!(summary.starts_with("总结失败: "));
        assert!(summary.contains("401"));
        assert!(summary.contains("invalid api key"));
    }

    #[tokio::test]
    async fn empty_choices_become_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let summary = summarizer_for(&server).summarize("t", "content").await;
        assert_eq!(summary, "总结失败: response contained no choices");
    }
}
