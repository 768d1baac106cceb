use crate::error::{ChinoResult, ParseTimeoutSnafu};
use dotenvy::var;
use secrecy::SecretString;
use snafu::ResultExt;
use std::{path::PathBuf, sync::Arc, time::Duration};

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    store_config: Arc<StoreConfig>,
    chat_config: Arc<ChatConfig>,
}

impl RuntimeConfiguration {
    pub fn new() -> ChinoResult<Self> {
        Ok(Self {
            store_config: Arc::new(StoreConfig::new()),
            chat_config: Arc::new(ChatConfig::new()?),
        })
    }

    pub fn from_parts(store_config: StoreConfig, chat_config: ChatConfig) -> Self {
        Self {
            store_config: Arc::new(store_config),
            chat_config: Arc::new(chat_config),
        }
    }

    pub fn store_config(&self) -> Arc<StoreConfig> {
        self.store_config.clone()
    }

    pub fn chat_config(&self) -> Arc<ChatConfig> {
        self.chat_config.clone()
    }
}

#[derive(Debug)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn new() -> Self {
        let path = var("CHINO_STUDENTS_PATH").unwrap_or_else(|_| "students.json".to_string());

        Self { path: path.into() }
    }
}

#[derive(Debug)]
pub struct ChatConfig {
    pub api_key: Option<SecretString>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl ChatConfig {
    pub fn new() -> ChinoResult<Self> {
        let timeout_secs = match var("CHINO_CHAT_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().context(ParseTimeoutSnafu)?,
            Err(_) => 30,
        };

        Ok(Self {
            api_key: var("CHINO_OPENAI_API_KEY").ok().map(SecretString::from),
            model: var("CHINO_CHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            endpoint: var("CHINO_CHAT_ENDPOINT")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
