//! Chat engine
//!
//! Decides between two behaviors per message: input mentioning any trigger
//! keyword gets the full menu rendered as an HTML list, everything else is
//! answered by the QA model against the fixed context. When the model is
//! missing or produces nothing, a canned line derived from the context keeps
//! every reply non-empty.

use crate::config::ToskaConfig;
use crate::menu::{MenuItem, MenuStore};
use crate::qa::{QaEngine, QaError};
use anyhow::Result;
use std::sync::Arc;

/// A rendered chat reply
#[derive(Debug, Clone)]
pub struct ChatReply {
    /// HTML fragment inserted into the chat page
    pub html: String,
    /// True when the reply came from the menu table rather than the model
    pub from_menu: bool,
}

pub struct ChatEngine {
    store: Arc<MenuStore>,
    qa: Option<Arc<QaEngine>>,
    context: String,
    trigger_keywords: Vec<String>,
}

impl ChatEngine {
    pub fn new(store: Arc<MenuStore>, qa: Option<Arc<QaEngine>>, config: &ToskaConfig) -> Self {
        Self {
            store,
            qa,
            context: config.context.clone(),
            trigger_keywords: config
                .trigger_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
        }
    }

    /// Whether the QA model was loaded
    pub fn model_loaded(&self) -> bool {
        self.qa.is_some()
    }

    /// Produce a reply for one user message.
    pub fn reply(&self, user_input: &str) -> Result<ChatReply> {
        if self.is_menu_request(user_input) {
            let items = self.store.list()?;
            return Ok(ChatReply {
                html: render_menu_html(&items),
                from_menu: true,
            });
        }

        let html = match self.qa_answer(user_input) {
            Ok(answer) => format!("<p>{}</p>", escape_html(&answer)),
            Err(e) => {
                tracing::warn!("QA fallback for input: {}", e);
                format!("<p>{}</p>", escape_html(&self.fallback_line()))
            }
        };

        Ok(ChatReply {
            html,
            from_menu: false,
        })
    }

    fn is_menu_request(&self, user_input: &str) -> bool {
        let lowered = user_input.to_lowercase();
        self.trigger_keywords.iter().any(|k| lowered.contains(k))
    }

    fn qa_answer(&self, question: &str) -> Result<String, QaError> {
        let qa = self.qa.as_ref().ok_or(QaError::ModelUnavailable)?;
        qa.answer(question, &self.context).map(|a| a.text)
    }

    /// Non-empty canned reply derived from the configured context
    fn fallback_line(&self) -> String {
        let first_sentence = self
            .context
            .split(['.', '!', '?'])
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or("Welcome to our restaurant");
        format!("{}.", first_sentence)
    }
}

/// Render the full menu as the chat's list reply
fn render_menu_html(items: &[MenuItem]) -> String {
    let rows: String = items
        .iter()
        .map(|item| {
            format!(
                "<li>{}: {} - {}</li>",
                escape_html(&item.name),
                item.price,
                escape_html(&item.description)
            )
        })
        .collect();
    format!("<h2>Restaurant menu:</h2><ul>{}</ul>", rows)
}

/// Minimal HTML escaping for text interpolated into the chat page
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_engine() -> ChatEngine {
        let store = Arc::new(MenuStore::open_in_memory().unwrap());
        store.insert("Margherita Pizza", 180, "Classic").unwrap();
        store.insert("Caesar Salad", 95, "Fresh").unwrap();
        // No model: exercises the fallback path the same way a missing
        // checkpoint directory does at daemon start.
        ChatEngine::new(store, None, &ToskaConfig::default())
    }

    #[test]
    fn trigger_keyword_returns_menu_regardless_of_model_state() {
        let engine = seeded_engine();

        let reply = engine.reply("show me the menu please").unwrap();
        assert!(reply.from_menu);
        assert!(reply.html.contains("<ul>"));
        assert!(reply.html.contains("Margherita Pizza"));
        assert!(reply.html.contains("Caesar Salad"));
    }

    #[test]
    fn trigger_match_is_case_insensitive() {
        let engine = seeded_engine();
        let reply = engine.reply("What FOOD do you have?").unwrap();
        assert!(reply.from_menu);
    }

    #[test]
    fn other_input_gets_non_empty_reply() {
        let engine = seeded_engine();

        let reply = engine.reply("when are you open?").unwrap();
        assert!(!reply.from_menu);
        assert!(reply.html.starts_with("<p>"));
        // Strip the tags, the body must not be empty
        let body = reply.html.trim_start_matches("<p>").trim_end_matches("</p>");
        assert!(!body.trim().is_empty());
    }

    #[test]
    fn fallback_is_derived_from_context() {
        let engine = seeded_engine();
        let reply = engine.reply("anything at all").unwrap();
        let config = ToskaConfig::default();
        let first = config.context.split('.').next().unwrap().trim();
        assert!(reply.html.contains(first));
    }

    #[test]
    fn menu_fields_are_escaped() {
        let store = Arc::new(MenuStore::open_in_memory().unwrap());
        store
            .insert("<script>alert(1)</script>", 1, "x & y")
            .unwrap();
        let engine = ChatEngine::new(store, None, &ToskaConfig::default());

        let reply = engine.reply("menu").unwrap();
        assert!(!reply.html.contains("<script>"));
        assert!(reply.html.contains("&lt;script&gt;"));
        assert!(reply.html.contains("x &amp; y"));
    }

    #[test]
    fn escape_html_covers_specials() {
        assert_eq!(escape_html("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&#39;");
    }
}
