//! Telegram Transport - MessageTransport over the Telegram Bot API.
//!
//! Inbound messages arrive through `getUpdates` long polling; replies go out
//! through `sendMessage`. Updates that carry no text are acknowledged and
//! dropped.
//!
//! # Configuration
//!
//! ```ignore
//! let config = TelegramConfig::new(token)
//!     .with_poll_timeout(Duration::from_secs(30))
//!     .with_proxy("socks5://127.0.0.1:1080");
//!
//! let transport = TelegramTransport::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use super::telegram_types::{
    ApiResponse, GetUpdatesRequest, ReplyKeyboardMarkup, SendMessageRequest, Update,
};
use crate::domain::dialogue::TextFormat;
use crate::domain::foundation::UserId;
use crate::ports::{InboundMessage, MessageTransport, OutboundMessage, TransportError};

/// Extra time on top of the long-poll window before the HTTP client gives up.
const REQUEST_GRACE: Duration = Duration::from_secs(10);

const ALLOWED_UPDATES: &[&str] = &["message"];

/// Configuration for the Telegram transport.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather.
    token: Secret<String>,
    /// Base URL of the Bot API (default: https://api.telegram.org).
    pub api_url: String,
    /// Long-poll window for `getUpdates`.
    pub poll_timeout: Duration,
    /// Optional outbound proxy (http, https or socks5 URL).
    pub proxy: Option<String>,
}

impl TelegramConfig {
    /// Creates a new configuration with the given bot token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Secret::new(token.into()),
            api_url: "https://api.telegram.org".to_string(),
            poll_timeout: Duration::from_secs(30),
            proxy: None,
        }
    }

    /// Sets the API base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Sets the long-poll window.
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Routes all requests through a proxy.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    fn token(&self) -> &str {
        self.token.expose_secret()
    }
}

/// Telegram Bot API transport.
pub struct TelegramTransport {
    config: TelegramConfig,
    client: Client,
    /// Next update id to request; everything below it has been handed out.
    offset: AtomicI64,
}

impl TelegramTransport {
    /// Creates a transport, building the HTTP client with the configured
    /// timeout and proxy.
    pub fn new(config: TelegramConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder().timeout(config.poll_timeout + REQUEST_GRACE);

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| TransportError::network(format!("Invalid proxy: {}", e.without_url())))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            offset: AtomicI64::new(0),
        })
    }

    /// Builds a method URL. Contains the token, so it is never logged.
    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_url.trim_end_matches('/'),
            self.config.token(),
            method
        )
    }

    /// Calls a Bot API method and unwraps the response envelope.
    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        let envelope: ApiResponse<T> = response.json().await.map_err(|e| {
            TransportError::InvalidResponse(format!(
                "{} returned status {} with unreadable body: {}",
                method,
                status,
                e.without_url()
            ))
        })?;

        if !envelope.ok {
            return Err(TransportError::Rejected(format!(
                "{} failed ({}): {}",
                method,
                envelope.error_code.unwrap_or_else(|| i64::from(status.as_u16())),
                envelope.description.unwrap_or_default()
            )));
        }

        envelope.result.ok_or_else(|| {
            TransportError::InvalidResponse(format!("{} returned ok without a result", method))
        })
    }

    fn map_request_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                timeout_secs: (self.config.poll_timeout + REQUEST_GRACE).as_secs(),
            }
        } else if e.is_connect() {
            TransportError::network(format!("Connection failed: {}", e.without_url()))
        } else {
            TransportError::network(e.without_url().to_string())
        }
    }

    /// Moves the offset past every update in the batch.
    fn acknowledge(&self, updates: &[Update]) {
        if let Some(last) = updates.iter().map(|u| u.update_id).max() {
            self.offset.fetch_max(last + 1, Ordering::SeqCst);
        }
    }
}

/// Turns an update into an inbound message, if it carries text.
///
/// Sessions are keyed by the chat the message arrived in, which is also
/// where the reply goes.
pub(crate) fn to_inbound(update: Update) -> Option<InboundMessage> {
    let message = update.message?;
    let text = message.text?;
    Some(InboundMessage::new(
        UserId::new(message.chat.id),
        message.message_id,
        text,
    ))
}

/// Translates an outbound reply into a `sendMessage` body.
pub(crate) fn to_send_request(message: &OutboundMessage) -> SendMessageRequest<'_> {
    SendMessageRequest {
        chat_id: message.user_id.as_i64(),
        text: &message.reply.text,
        parse_mode: match message.reply.format {
            TextFormat::Plain => None,
            TextFormat::Markdown => Some("Markdown"),
        },
        reply_to_message_id: message.reply_to,
        reply_markup: message
            .reply
            .buttons
            .as_deref()
            .map(ReplyKeyboardMarkup::single_row),
    }
}

#[async_trait]
impl MessageTransport for TelegramTransport {
    async fn receive(&self) -> Result<Vec<InboundMessage>, TransportError> {
        let offset = self.offset.load(Ordering::SeqCst);
        let request = GetUpdatesRequest {
            offset: (offset > 0).then_some(offset),
            timeout: self.config.poll_timeout.as_secs(),
            allowed_updates: ALLOWED_UPDATES,
        };

        let mut updates: Vec<Update> = self.call("getUpdates", &request).await?;
        updates.sort_by_key(|u| u.update_id);
        self.acknowledge(&updates);

        let received = updates.len();
        let messages: Vec<InboundMessage> = updates.into_iter().filter_map(to_inbound).collect();
        if messages.len() < received {
            tracing::debug!(
                skipped = received - messages.len(),
                "Ignoring updates without text"
            );
        }

        Ok(messages)
    }

    async fn send(&self, message: OutboundMessage) -> Result<(), TransportError> {
        let request = to_send_request(&message);
        let _sent: serde_json::Value = self.call("sendMessage", &request).await?;
        Ok(())
    }
}
