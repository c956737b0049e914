use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::models::PipelineStatus;
use crate::permissions::FEATURE_AI_ASSISTANT;
use crate::permissions::FEATURE_KNOWLEDGE_SEARCH;
use crate::rag::composer::DEFAULT_MAX_SOURCES;
use crate::rag::composer::FOLLOW_UPS_PER_CATEGORY;
use crate::rag::retriever::DEFAULT_TOP_K;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_true")]
    pub backtrace: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            backtrace: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Ranked results kept per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Sources cited per answer
    #[serde(default = "default_max_sources")]
    pub max_sources: usize,
}

const fn default_top_k() -> usize {
    5
}

const fn default_max_sources() -> usize {
    3
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            max_sources: default_max_sources(),
        }
    }
}

/// Minimum dwell per stage in milliseconds, for progress animation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagePacing {
    #[serde(default)]
    pub analyzing: u64,
    #[serde(default)]
    pub searching: u64,
    #[serde(default)]
    pub matching: u64,
    #[serde(default)]
    pub generating: u64,
    #[serde(default)]
    pub completed: u64,
}

impl StagePacing {
    /// Pacing of the interactive progress animation
    #[must_use]
    pub const fn animated() -> Self {
        Self {
            analyzing: 600,
            searching: 500,
            matching: 500,
            generating: 400,
            completed: 300,
        }
    }

    #[must_use]
    pub const fn delay_for(&self, status: PipelineStatus) -> Duration {
        let ms = match status {
            PipelineStatus::Idle => 0,
            PipelineStatus::Analyzing => self.analyzing,
            PipelineStatus::Searching => self.searching,
            PipelineStatus::Matching => self.matching,
            PipelineStatus::Generating => self.generating,
            PipelineStatus::Completed => self.completed,
        };
        Duration::from_millis(ms)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub stage_pacing_ms: StagePacing,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// JSON file with a document array; the built-in corpus is used when absent
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionsConfig {
    #[serde(default = "default_role")]
    pub default_role: String,
    /// Role name -> enabled feature names
    #[serde(default = "default_role_table")]
    pub roles: HashMap<String, Vec<String>>,
}

fn default_role() -> String {
    "user".to_string()
}

fn default_role_table() -> HashMap<String, Vec<String>> {
    let full = vec![
        FEATURE_AI_ASSISTANT.to_string(),
        FEATURE_KNOWLEDGE_SEARCH.to_string(),
    ];
    HashMap::from([
        ("admin".to_string(), full.clone()),
        ("contributor".to_string(), full.clone()),
        ("user".to_string(), full),
        (
            "guest".to_string(),
            vec![FEATURE_KNOWLEDGE_SEARCH.to_string()],
        ),
    ])
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self {
            default_role: default_role(),
            roles: default_role_table(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FollowUpsConfig {
    /// Category -> follow-up questions, replacing the built-in entry for that category
    #[serde(default)]
    pub categories: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsConfig {
    #[serde(default = "default_session_timeout")]
    pub timeout_secs: u64,
    /// Messages kept per conversation
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

const fn default_session_timeout() -> u64 {
    3600
}

const fn default_max_history() -> usize {
    20
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_session_timeout(),
            max_history: default_max_history(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub permissions: PermissionsConfig,
    #[serde(default)]
    pub follow_ups: FollowUpsConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sessions: SessionsConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default config file path
    pub fn load() -> crate::Result<Self> {
        // Try config.toml first, then config.example.toml, then built-in defaults
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            tracing::warn!(
                "Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            tracing::warn!("No config file found, using built-in defaults");
            Ok(Self::default())
        }
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if !(1..=DEFAULT_TOP_K).contains(&self.retrieval.top_k) {
            return Err(crate::AskDeskError::ConfigError(format!(
                "retrieval.top_k must be between 1 and {DEFAULT_TOP_K}, got {}",
                self.retrieval.top_k
            )));
        }
        if !(1..=DEFAULT_MAX_SOURCES).contains(&self.retrieval.max_sources) {
            return Err(crate::AskDeskError::ConfigError(format!(
                "retrieval.max_sources must be between 1 and {DEFAULT_MAX_SOURCES}, got {}",
                self.retrieval.max_sources
            )));
        }
        if let Some((category, questions)) = self
            .follow_ups
            .categories
            .iter()
            .find(|(_, questions)| questions.len() != FOLLOW_UPS_PER_CATEGORY)
        {
            return Err(crate::AskDeskError::ConfigError(format!(
                "follow_ups.categories.{category} must list {FOLLOW_UPS_PER_CATEGORY} questions, got {}",
                questions.len()
            )));
        }
        if self.permissions.default_role.trim().is_empty() {
            return Err(crate::AskDeskError::ConfigError(
                "permissions.default_role must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Get number of ranked results kept per query
    pub fn top_k(&self) -> usize {
        self.retrieval.top_k
    }

    /// Get number of sources cited per answer
    pub fn max_sources(&self) -> usize {
        self.retrieval.max_sources
    }

    /// Get stage pacing
    pub fn stage_pacing(&self) -> StagePacing {
        self.pipeline.stage_pacing_ms
    }

    /// Get role used when a caller does not name one
    pub fn default_role(&self) -> &str {
        &self.permissions.default_role
    }

    /// Get server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
