#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini,
    OpenAi,
}

impl LlmProvider {
    #[must_use]
    pub fn default_model(self) -> &'static str {
        match self {
            LlmProvider::Gemini => "gemini-1.5-flash",
            LlmProvider::OpenAi => "gpt-4o-mini",
        }
    }

    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            LlmProvider::Gemini => "https://generativelanguage.googleapis.com/",
            LlmProvider::OpenAi => "https://api.openai.com/",
        }
    }

    /// Provider-specific fallback variable for the model API key.
    #[must_use]
    pub fn key_env_var(self) -> &'static str {
        match self {
            LlmProvider::Gemini => "GEMINI_API_KEY",
            LlmProvider::OpenAi => "OPENAI_API_KEY",
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProvider::Gemini => write!(f, "gemini"),
            LlmProvider::OpenAi => write!(f, "openai"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Search provider key. Live discovery is disabled when absent.
    pub serpapi_api_key: Option<String>,
    pub search_base_url: String,
    pub search_engine: String,
    pub search_locale: String,
    pub target_results: usize,
    pub page_delay_ms: u64,
    pub llm_provider: LlmProvider,
    /// Model key. Every analysis degrades to zero scores when absent.
    pub llm_api_key: Option<String>,
    pub llm_model: String,
    pub llm_base_url: String,
    pub request_timeout_secs: u64,
    pub llm_timeout_secs: u64,
    pub candidate_timeout_secs: u64,
    pub max_concurrent_candidates: usize,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field(
                "serpapi_api_key",
                &self.serpapi_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("search_base_url", &self.search_base_url)
            .field("search_engine", &self.search_engine)
            .field("search_locale", &self.search_locale)
            .field("target_results", &self.target_results)
            .field("page_delay_ms", &self.page_delay_ms)
            .field("llm_provider", &self.llm_provider)
            .field(
                "llm_api_key",
                &self.llm_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("llm_model", &self.llm_model)
            .field("llm_base_url", &self.llm_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("candidate_timeout_secs", &self.candidate_timeout_secs)
            .field(
                "max_concurrent_candidates",
                &self.max_concurrent_candidates,
            )
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
