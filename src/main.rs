use std::process::ExitCode;
use std::sync::Arc;

use tokio::sync::watch;

use liftcalc::adapters::{
    FileSessionStore, InMemorySessionStore, RedisSessionStore, TelegramConfig, TelegramTransport,
};
use liftcalc::application::{HandleMessageHandler, MessageDispatcher, SessionLocks};
use liftcalc::config::{AppConfig, ConfigError, StorageBackend, StorageConfig, ValidationError};
use liftcalc::domain::vocabulary::{self, VocabularyError};
use liftcalc::logging::{self, LoggingError};
use liftcalc::ports::{MessageTransport, SessionStore, SessionStoreError, TransportError};

/// Conditions that stop the bot before it takes any message.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("Vocabulary tables are inconsistent: {0}")]
    Vocabulary(#[from] VocabularyError),

    #[error("Session store unavailable: {0}")]
    Store(#[from] SessionStoreError),

    #[error("Telegram transport setup failed: {0}")]
    Transport(#[from] TransportError),
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("liftcalc: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;

    let _log_guard = logging::init(&config.logging)?;
    vocabulary::validate()?;

    let store = build_store(&config.storage).await?;
    let transport: Arc<dyn MessageTransport> =
        Arc::new(TelegramTransport::new(transport_config(&config)?)?);

    let handler = HandleMessageHandler::new(store, Arc::clone(&transport), Arc::new(SessionLocks::new()));
    let dispatcher = MessageDispatcher::new(transport, Arc::new(handler));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Shutdown requested"),
            Err(e) => tracing::error!(error = %e, "Cannot listen for Ctrl-C, shutting down"),
        }
        let _ = shutdown_tx.send(true);
    });

    tracing::info!(
        storage = ?config.storage.backend,
        poll_timeout_secs = config.telegram.poll_timeout_secs,
        "liftcalc started"
    );
    dispatcher.run(shutdown_rx).await;

    Ok(())
}

fn transport_config(config: &AppConfig) -> Result<TelegramConfig, ConfigError> {
    let token = config
        .telegram
        .token()
        .ok_or(ValidationError::MissingRequired("LIFTCALC__TELEGRAM__TOKEN"))?;

    let mut transport = TelegramConfig::new(token)
        .with_api_url(config.telegram.api_url.clone())
        .with_poll_timeout(config.telegram.poll_timeout());
    if let Some(proxy) = &config.telegram.proxy {
        transport = transport.with_proxy(proxy.clone());
    }
    Ok(transport)
}

async fn build_store(config: &StorageConfig) -> Result<Arc<dyn SessionStore>, SessionStoreError> {
    let store: Arc<dyn SessionStore> = match config.backend {
        StorageBackend::File => Arc::new(FileSessionStore::new(&config.data_dir)),
        StorageBackend::Memory => Arc::new(InMemorySessionStore::new()),
        StorageBackend::Redis => {
            let url = config.redis_url.as_deref().unwrap_or_default();
            Arc::new(RedisSessionStore::connect(url).await?)
        }
    };
    Ok(store)
}
