//! External LLM classifier for category suggestions.
//!
//! Strictly optional: no provider configured, or any transport/API/parse
//! failure, collapses to `ClassifierOutcome::Unavailable` and the caller
//! falls back to the keyword rules. Nothing here is ever fatal.

use anyhow::{Context, Result, bail};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::warn;

use sticky_core::{ClassifierOutcome, MAX_CLASSIFIER_CONTEXT};

use crate::config::Config;

const SYSTEM_PROMPT: &str = "You will receive a task and an optional list of existing category labels. \
Return a short category (max 2 words). If any existing label fits, return it EXACTLY. \
Otherwise invent a concise new label. Reply with ONLY the label.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Anthropic,
    OpenAI,
}

#[derive(Debug, Clone)]
pub struct Classifier {
    provider: Provider,
    model: String,
    api_key: String,
}

impl Classifier {
    /// Build from config. `None` when no provider + key is configured, which
    /// the add flow treats the same as a failed call.
    pub fn from_config(cfg: &Config) -> Option<Self> {
        let provider = match cfg.llm.provider.as_deref()? {
            "anthropic" => Provider::Anthropic,
            "openai" => Provider::OpenAI,
            other => {
                warn!("unknown llm.provider {other:?}; classifier disabled");
                return None;
            }
        };
        let api_key = cfg.llm.api_key.clone()?;
        let model = cfg.llm.model.clone().unwrap_or_else(|| {
            match provider {
                Provider::Anthropic => "claude-3-5-haiku-latest",
                Provider::OpenAI => "gpt-4o-mini",
            }
            .to_string()
        });
        Some(Self {
            provider,
            model,
            api_key,
        })
    }

    /// Suggest a raw label for the task text. Total: failures become
    /// `Unavailable`, never errors.
    pub async fn classify(&self, text: &str, existing: &[String]) -> ClassifierOutcome {
        match self.suggest(text, existing).await {
            Ok(label) if !label.trim().is_empty() => ClassifierOutcome::Label(label),
            Ok(_) => ClassifierOutcome::Unavailable,
            Err(err) => {
                warn!("classifier unavailable, falling back to keyword rules: {err:#}");
                ClassifierOutcome::Unavailable
            }
        }
    }

    async fn suggest(&self, text: &str, existing: &[String]) -> Result<String> {
        let shown = &existing[..existing.len().min(MAX_CLASSIFIER_CONTEXT)];
        let listed = if shown.is_empty() {
            "(none)".to_string()
        } else {
            shown.join(", ")
        };
        let user = format!("Task: \"{text}\"\nExisting categories: {listed}\nCategory:");

        match self.provider {
            Provider::Anthropic => self.anthropic_complete(&user).await,
            Provider::OpenAI => self.openai_complete(&user).await,
        }
    }

    async fn anthropic_complete(&self, user: &str) -> Result<String> {
        #[derive(Serialize)]
        struct Msg {
            role: String,
            content: String,
        }

        #[derive(Serialize)]
        struct Req {
            model: String,
            max_tokens: i32,
            system: String,
            messages: Vec<Msg>,
        }

        #[derive(Deserialize)]
        struct Resp {
            content: Vec<ContentBlock>,
        }

        #[derive(Deserialize)]
        struct ContentBlock {
            #[serde(rename = "type")]
            t: String,
            text: Option<String>,
        }

        let body = Req {
            model: self.model.clone(),
            max_tokens: 32,
            system: SYSTEM_PROMPT.to_string(),
            messages: vec![Msg {
                role: "user".to_string(),
                content: user.to_string(),
            }],
        };

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_str(&self.api_key)?);
        headers.insert("anthropic-version", HeaderValue::from_static("2023-06-01"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::new();
        let resp = client
            .post("https://api.anthropic.com/v1/messages")
            .headers(headers)
            .json(&body)
            .send()
            .await
            .context("anthropic request")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("anthropic error: {status} {txt}");
        }

        let out: Resp = resp.json().await.context("parse anthropic response")?;
        let mut s = String::new();
        for b in out.content {
            if b.t == "text" {
                if let Some(t) = b.text {
                    s.push_str(&t);
                }
            }
        }
        Ok(s.trim().to_string())
    }

    async fn openai_complete(&self, user: &str) -> Result<String> {
        #[derive(Serialize)]
        struct Msg {
            role: String,
            content: String,
        }

        #[derive(Serialize)]
        struct Req {
            model: String,
            messages: Vec<Msg>,
            temperature: f32,
        }

        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: MsgOut,
        }

        #[derive(Deserialize)]
        struct MsgOut {
            content: Option<String>,
        }

        let body = Req {
            model: self.model.clone(),
            messages: vec![
                Msg {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                Msg {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: 0.2,
        };

        let client = reqwest::Client::new();
        let resp = client
            .post("https://api.openai.com/v1/chat/completions")
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .context("openai request")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("openai error: {status} {txt}");
        }

        let out: Resp = resp.json().await.context("parse openai response")?;
        let content = out
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmSection;

    #[test]
    fn no_provider_means_no_classifier() {
        let cfg = Config::default();
        assert!(Classifier::from_config(&cfg).is_none());
    }

    #[test]
    fn provider_without_key_means_no_classifier() {
        let mut cfg = Config::default();
        cfg.llm = LlmSection {
            provider: Some("anthropic".to_string()),
            model: None,
            api_key: None,
        };
        assert!(Classifier::from_config(&cfg).is_none());
    }

    #[test]
    fn default_models_per_provider() {
        let mut cfg = Config::default();
        cfg.llm = LlmSection {
            provider: Some("openai".to_string()),
            model: None,
            api_key: Some("sk-test".to_string()),
        };
        let c = Classifier::from_config(&cfg).unwrap();
        assert_eq!(c.provider, Provider::OpenAI);
        assert_eq!(c.model, "gpt-4o-mini");
    }

    #[test]
    fn unknown_provider_is_disabled() {
        let mut cfg = Config::default();
        cfg.llm = LlmSection {
            provider: Some("llama-at-home".to_string()),
            model: None,
            api_key: Some("key".to_string()),
        };
        assert!(Classifier::from_config(&cfg).is_none());
    }
}
