//! Embedded chat page assets
//!
//! The page and stylesheet are compiled into the binary so deployment is a
//! single executable next to its database and model directory.

use axum::http::header;
use axum::response::IntoResponse;

/// Chat page skeleton; `{{response}}` is replaced with the reply fragment.
const CHAT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Toska Restaurant</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <div class="chat-container">
        <div class="chat-box">
            <div class="chat-header">
                <h2>Chat with Toska</h2>
            </div>
            <div class="chat-messages">
                {{response}}
            </div>
            <div class="chat-input-container">
                <form method="POST" action="/">
                    <input type="text" name="userInput" placeholder="Ask about our dishes...">
                    <button type="submit">Send</button>
                </form>
            </div>
        </div>
    </div>
</body>
</html>
"#;

pub const CSS: &str = r#"* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
}

body {
    background-color: #f0f2f5;
    display: flex;
    justify-content: center;
    align-items: center;
    height: 90vh;
}

.chat-container {
    width: 90%;
    min-width: 300px;
    max-width: 480px;
    height: 80vh;
    background-color: #fff;
    border-radius: 15px;
    box-shadow: 0 4px 8px rgba(0, 0, 0, 0.1);
    overflow: hidden;
    display: flex;
    flex-direction: column;
}

.chat-box {
    display: flex;
    flex-direction: column;
    height: 100%;
}

.chat-header {
    background-color: #4f4ffa;
    color: white;
    padding: 15px;
    text-align: center;
}

.chat-messages {
    padding: 10px;
    flex-grow: 1;
    overflow-y: auto;
    background-color: #f9f9f9;
    border-bottom: 1px solid #ddd;
}

.chat-input-container {
    display: flex;
    padding: 10px;
    background-color: #fff;
    border-top: 1px solid #ddd;
}

.chat-input-container form {
    display: flex;
    flex-grow: 1;
}

.chat-input-container input {
    flex-grow: 1;
    padding: 10px;
    border: 1px solid #ddd;
    border-radius: 25px;
    font-size: 14px;
    outline: none;
}

.chat-input-container input:focus {
    border-color: #4f4ffa;
}

.chat-input-container button {
    background-color: #4f4ffa;
    color: white;
    padding: 10px 15px;
    margin-left: 10px;
    border: none;
    border-radius: 15px;
    cursor: pointer;
}

.chat-input-container button:hover {
    background-color: #45a049;
}
"#;

/// Render the chat page with a reply fragment in the message area.
///
/// The fragment is trusted HTML produced by the chat engine; user text has
/// already been escaped there.
pub fn render_chat_page(response_html: &str) -> String {
    CHAT_PAGE.replace("{{response}}", response_html)
}

pub async fn serve_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], CSS)
}
