//! HTTP client for talking to toskad

use anyhow::{Context, Result};
use std::time::Duration;
use toska_common::{HealthResponse, MenuItem, MenuItemBody, NewMenuItem};

const DEFAULT_ADDR: &str = "127.0.0.1:7870";

pub struct DaemonClient {
    base_url: String,
    http: reqwest::Client,
}

impl DaemonClient {
    /// Resolve the daemon address.
    ///
    /// Priority: explicit --addr flag, then $TOSKAD_ADDR, then the default.
    pub fn discover_addr(explicit: Option<&str>) -> String {
        if let Some(addr) = explicit {
            return addr.to_string();
        }
        if let Ok(addr) = std::env::var("TOSKAD_ADDR") {
            return addr;
        }
        DEFAULT_ADDR.to_string()
    }

    pub fn new(explicit_addr: Option<&str>) -> Self {
        let addr = Self::discover_addr(explicit_addr);
        let base_url = if addr.starts_with("http") {
            addr
        } else {
            format!("http://{}", addr)
        };
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self { base_url, http }
    }

    pub async fn menu(&self) -> Result<Vec<MenuItemBody>> {
        let url = format!("{}/api/menu", self.base_url);
        let resp = self.http.get(&url).send().await.map_err(connect_hint)?;
        resp.error_for_status()
            .context("Menu request failed")?
            .json()
            .await
            .context("Malformed menu response")
    }

    pub async fn search(&self, query: &str) -> Result<Vec<MenuItemBody>> {
        let url = format!("{}/api/search", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await
            .map_err(connect_hint)?;
        resp.error_for_status()
            .context("Search request failed")?
            .json()
            .await
            .context("Malformed search response")
    }

    /// Ask through the chat form endpoint; returns the reply HTML fragment.
    pub async fn ask(&self, question: &str) -> Result<String> {
        let url = format!("{}/", self.base_url);
        let resp = self
            .http
            .post(&url)
            .form(&[("userInput", question)])
            .send()
            .await
            .map_err(connect_hint)?;
        let page = resp
            .error_for_status()
            .context("Chat request failed")?
            .text()
            .await?;
        Ok(extract_reply(&page))
    }

    /// Insert a menu item; the daemon replies with the stored row, id included.
    pub async fn add(&self, item: &NewMenuItem) -> Result<MenuItem> {
        let url = format!("{}/v1/menu", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(item)
            .send()
            .await
            .map_err(connect_hint)?;
        resp.error_for_status()
            .context("Add request failed")?
            .json()
            .await
            .context("Malformed add response")
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/v1/health", self.base_url);
        let resp = self.http.get(&url).send().await.map_err(connect_hint)?;
        resp.error_for_status()
            .context("Health request failed")?
            .json()
            .await
            .context("Malformed health response")
    }
}

fn connect_hint(e: reqwest::Error) -> anyhow::Error {
    anyhow::anyhow!("Cannot reach toskad ({e}). Is the daemon running? Try: toskad")
}

/// Pull the reply fragment out of the rendered chat page.
///
/// The daemon returns the whole page; the reply sits inside the
/// chat-messages div. Falls back to the raw page if the markup changes.
fn extract_reply(page: &str) -> String {
    let tagless = |s: &str| {
        let mut out = String::new();
        let mut in_tag = false;
        for c in s.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => out.push(c),
                _ => {}
            }
        }
        out
    };

    if let Some(start) = page.find(r#"class="chat-messages""#) {
        let after = &page[start..];
        if let Some(open) = after.find('>') {
            if let Some(end) = after.find("</div>") {
                let fragment = &after[open + 1..end];
                return tagless(fragment)
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ");
            }
        }
    }
    tagless(page).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_prefers_explicit_addr() {
        assert_eq!(
            DaemonClient::discover_addr(Some("10.0.0.1:9999")),
            "10.0.0.1:9999"
        );
    }

    #[test]
    fn extract_reply_strips_markup() {
        let page = r#"<div class="chat-messages">
            <h2>Restaurant menu:</h2><ul><li>Pizza: 180 - Classic</li></ul>
        </div>"#;
        let reply = extract_reply(page);
        assert!(reply.contains("Pizza: 180 - Classic"));
        assert!(!reply.contains("<li>"));
    }
}
