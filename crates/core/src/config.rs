use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub prompt: PromptConfig,
    pub llm: LlmConfig,
    pub server: ServerConfig,
    pub cache: CacheSettings,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct PromptConfig {
    pub template_path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub api_key: Option<SecretString>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct CacheSettings {
    pub max_entries: u64,
    pub ttl_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub catalog_path: Option<PathBuf>,
    pub template_path: Option<PathBuf>,
    pub llm_api_key: Option<String>,
    pub llm_model: Option<String>,
    pub llm_base_url: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig { path: PathBuf::from("products.json") },
            prompt: PromptConfig { template_path: PathBuf::from("templates/advisor_prompt.md") },
            llm: LlmConfig {
                api_key: None,
                model: "gemini-1.5-flash-latest".to_string(),
                base_url: "https://generativelanguage.googleapis.com".to_string(),
                timeout_secs: 30,
            },
            server: ServerConfig { bind_address: "127.0.0.1".to_string(), port: 8000 },
            cache: CacheSettings { max_entries: 100, ttl_secs: 3600 },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("techadvisor.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(catalog) = patch.catalog {
            if let Some(path) = catalog.path {
                self.catalog.path = path;
            }
        }

        if let Some(prompt) = patch.prompt {
            if let Some(template_path) = prompt.template_path {
                self.prompt.template_path = template_path;
            }
        }

        if let Some(llm) = patch.llm {
            if let Some(llm_api_key_value) = llm.api_key {
                self.llm.api_key = Some(secret_value(llm_api_key_value));
            }
            if let Some(model) = llm.model {
                self.llm.model = model;
            }
            if let Some(base_url) = llm.base_url {
                self.llm.base_url = base_url;
            }
            if let Some(timeout_secs) = llm.timeout_secs {
                self.llm.timeout_secs = timeout_secs;
            }
        }

        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
        }

        if let Some(cache) = patch.cache {
            if let Some(max_entries) = cache.max_entries {
                self.cache.max_entries = max_entries;
            }
            if let Some(ttl_secs) = cache.ttl_secs {
                self.cache.ttl_secs = ttl_secs;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("TECHADVISOR_CATALOG_PATH") {
            self.catalog.path = PathBuf::from(value);
        }
        if let Some(value) = read_env("TECHADVISOR_PROMPT_TEMPLATE") {
            self.prompt.template_path = PathBuf::from(value);
        }

        let api_key = read_env("TECHADVISOR_LLM_API_KEY").or_else(|| read_env("GEMINI_API_KEY"));
        if let Some(value) = api_key {
            self.llm.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("TECHADVISOR_LLM_MODEL") {
            self.llm.model = value;
        }
        if let Some(value) = read_env("TECHADVISOR_LLM_BASE_URL") {
            self.llm.base_url = value;
        }
        if let Some(value) = read_env("TECHADVISOR_LLM_TIMEOUT_SECS") {
            self.llm.timeout_secs = parse_u64("TECHADVISOR_LLM_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("TECHADVISOR_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("TECHADVISOR_SERVER_PORT") {
            self.server.port = parse_u16("TECHADVISOR_SERVER_PORT", &value)?;
        }

        if let Some(value) = read_env("TECHADVISOR_CACHE_MAX_ENTRIES") {
            self.cache.max_entries = parse_u64("TECHADVISOR_CACHE_MAX_ENTRIES", &value)?;
        }
        if let Some(value) = read_env("TECHADVISOR_CACHE_TTL_SECS") {
            self.cache.ttl_secs = parse_u64("TECHADVISOR_CACHE_TTL_SECS", &value)?;
        }

        let log_level =
            read_env("TECHADVISOR_LOGGING_LEVEL").or_else(|| read_env("TECHADVISOR_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("TECHADVISOR_LOGGING_FORMAT").or_else(|| read_env("TECHADVISOR_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(catalog_path) = overrides.catalog_path {
            self.catalog.path = catalog_path;
        }
        if let Some(template_path) = overrides.template_path {
            self.prompt.template_path = template_path;
        }
        if let Some(llm_api_key) = overrides.llm_api_key {
            self.llm.api_key = Some(secret_value(llm_api_key));
        }
        if let Some(llm_model) = overrides.llm_model {
            self.llm.model = llm_model;
        }
        if let Some(llm_base_url) = overrides.llm_base_url {
            self.llm.base_url = llm_base_url;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_catalog(&self.catalog)?;
        validate_prompt(&self.prompt)?;
        validate_llm(&self.llm)?;
        validate_server(&self.server)?;
        validate_cache(&self.cache)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("techadvisor.toml"), PathBuf::from("config/techadvisor.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    if catalog.path.as_os_str().is_empty() {
        return Err(ConfigError::Validation("catalog.path must not be empty".to_string()));
    }
    Ok(())
}

fn validate_prompt(prompt: &PromptConfig) -> Result<(), ConfigError> {
    if prompt.template_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation("prompt.template_path must not be empty".to_string()));
    }
    Ok(())
}

fn validate_llm(llm: &LlmConfig) -> Result<(), ConfigError> {
    let missing_key =
        llm.api_key.as_ref().map(|value| value.expose_secret().trim().is_empty()).unwrap_or(true);
    if missing_key {
        return Err(ConfigError::Validation(
            "llm.api_key is required (set TECHADVISOR_LLM_API_KEY or GEMINI_API_KEY)".to_string(),
        ));
    }

    if llm.model.trim().is_empty() {
        return Err(ConfigError::Validation("llm.model must not be empty".to_string()));
    }

    if !llm.base_url.starts_with("http://") && !llm.base_url.starts_with("https://") {
        return Err(ConfigError::Validation(
            "llm.base_url must start with http:// or https://".to_string(),
        ));
    }

    if llm.timeout_secs == 0 || llm.timeout_secs > 300 {
        return Err(ConfigError::Validation("llm.timeout_secs must be in range 1..=300".to_string()));
    }

    Ok(())
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.bind_address.trim().is_empty() {
        return Err(ConfigError::Validation("server.bind_address must not be empty".to_string()));
    }
    if server.port == 0 {
        return Err(ConfigError::Validation("server.port must be greater than zero".to_string()));
    }
    Ok(())
}

fn validate_cache(cache: &CacheSettings) -> Result<(), ConfigError> {
    if cache.max_entries == 0 {
        return Err(ConfigError::Validation(
            "cache.max_entries must be greater than zero".to_string(),
        ));
    }
    if cache.ttl_secs == 0 {
        return Err(ConfigError::Validation("cache.ttl_secs must be greater than zero".to_string()));
    }
    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    catalog: Option<CatalogPatch>,
    prompt: Option<PromptPatch>,
    llm: Option<LlmPatch>,
    server: Option<ServerPatch>,
    cache: Option<CachePatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct PromptPatch {
    template_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct LlmPatch {
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct CachePatch {
    max_entries: Option<u64>,
    ttl_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::sync::{Mutex, OnceLock};

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    #[test]
    fn file_load_supports_env_interpolation() {
        let _guard = env_lock().lock().expect("env lock");

        env::set_var("TEST_GEMINI_KEY", "key-from-env");

        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("techadvisor.toml");
        fs::write(
            &path,
            r#"
[llm]
api_key = "${TEST_GEMINI_KEY}"
"#,
        )
        .expect("write config");

        let config =
            AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                .expect("config load");

        assert_eq!(
            config.llm.api_key.as_ref().map(|key| key.expose_secret().to_string()),
            Some("key-from-env".to_string())
        );

        clear_vars(&["TEST_GEMINI_KEY"]);
    }

    #[test]
    fn precedence_defaults_file_env_overrides() {
        let _guard = env_lock().lock().expect("env lock");

        env::set_var("TECHADVISOR_LLM_MODEL", "model-from-env");
        env::set_var("TECHADVISOR_LLM_API_KEY", "key-from-env");

        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("techadvisor.toml");
        fs::write(
            &path,
            r#"
[llm]
api_key = "key-from-file"
model = "model-from-file"

[logging]
level = "warn"
"#,
        )
        .expect("write config");

        let config = AppConfig::load(LoadOptions {
            config_path: Some(path),
            overrides: ConfigOverrides {
                log_level: Some("debug".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .expect("config load");

        assert_eq!(config.llm.model, "model-from-env", "env model should win over file");
        assert_eq!(
            config.llm.api_key.as_ref().map(|key| key.expose_secret().to_string()),
            Some("key-from-env".to_string()),
            "env api key should win over file"
        );
        assert_eq!(config.logging.level, "debug", "override log level should win over file");

        clear_vars(&["TECHADVISOR_LLM_MODEL", "TECHADVISOR_LLM_API_KEY"]);
    }

    #[test]
    fn logging_env_aliases_are_supported() {
        let _guard = env_lock().lock().expect("env lock");

        env::set_var("TECHADVISOR_LLM_API_KEY", "key-test");
        env::set_var("TECHADVISOR_LOG_LEVEL", "warn");
        env::set_var("TECHADVISOR_LOG_FORMAT", "pretty");

        let config = AppConfig::load(LoadOptions::default()).expect("config load");

        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Pretty);

        clear_vars(&[
            "TECHADVISOR_LLM_API_KEY",
            "TECHADVISOR_LOG_LEVEL",
            "TECHADVISOR_LOG_FORMAT",
        ]);
    }

    #[test]
    fn validation_requires_an_api_key() {
        let _guard = env_lock().lock().expect("env lock");
        clear_vars(&["TECHADVISOR_LLM_API_KEY", "GEMINI_API_KEY"]);

        let error = match AppConfig::load(LoadOptions::default()) {
            Ok(_) => panic!("expected validation failure without an api key"),
            Err(error) => error,
        };

        assert!(matches!(
            error,
            ConfigError::Validation(ref message) if message.contains("llm.api_key")
        ));
    }

    #[test]
    fn secret_values_are_not_leaked_by_debug() {
        let _guard = env_lock().lock().expect("env lock");

        env::set_var("TECHADVISOR_LLM_API_KEY", "super-secret-key");

        let config = AppConfig::load(LoadOptions::default()).expect("config load");
        let debug = format!("{config:?}");

        assert!(!debug.contains("super-secret-key"), "debug output should not contain the api key");

        clear_vars(&["TECHADVISOR_LLM_API_KEY"]);
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let _guard = env_lock().lock().expect("env lock");

        env::set_var("TECHADVISOR_LLM_API_KEY", "key-test");
        env::set_var("TECHADVISOR_LLM_TIMEOUT_SECS", "0");

        let error = match AppConfig::load(LoadOptions::default()) {
            Ok(_) => panic!("expected validation failure for zero timeout"),
            Err(error) => error,
        };
        assert!(matches!(
            error,
            ConfigError::Validation(ref message) if message.contains("llm.timeout_secs")
        ));

        clear_vars(&["TECHADVISOR_LLM_API_KEY", "TECHADVISOR_LLM_TIMEOUT_SECS"]);
    }
}
