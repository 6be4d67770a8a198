use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::catalog::Engine;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub engines: Vec<EngineConfig>,
    pub suggest: SuggestConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    pub suggestions_enabled: bool,
    pub default_engine: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            suggestions_enabled: true,
            default_engine: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub template: Option<String>,
}

impl EngineConfig {
    pub fn to_engine(&self) -> Engine {
        Engine::new(&self.id, &self.name, self.template.clone())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SuggestConfig {
    pub max_candidates: usize,
    pub cache_entries: usize,
    pub latency_ms: u64,
    pub words: Vec<String>,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            max_candidates: 8,
            cache_entries: 64,
            latency_ms: 0,
            words: default_words(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "seb=info".to_string(),
            dir: None,
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::config(path, "config path is not a regular file"));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw)
            .map_err(|source| AppError::config(path, source.to_string()))?;
        Ok(parsed.sanitized())
    }

    /// Engines to seed the catalog with; built-in defaults when none are configured.
    pub fn catalog_engines(&self) -> Vec<Engine> {
        if self.engines.is_empty() {
            return default_engines();
        }
        self.engines.iter().map(EngineConfig::to_engine).collect()
    }

    fn sanitized(mut self) -> Self {
        self.suggest.max_candidates = self.suggest.max_candidates.max(1);
        self.suggest.cache_entries = self.suggest.cache_entries.max(1);
        self.search.default_engine = self.search.default_engine.trim().to_string();

        let mut seen = HashSet::new();
        self.engines.retain(|engine| {
            let id = engine.id.trim();
            if id.is_empty() {
                tracing::warn!(name = %engine.name, "dropping engine without id");
                return false;
            }
            if !seen.insert(id.to_string()) {
                tracing::warn!(id, "dropping duplicate engine id");
                return false;
            }
            true
        });
        for engine in &mut self.engines {
            engine.id = engine.id.trim().to_string();
            if engine.name.trim().is_empty() {
                engine.name = engine.id.clone();
            }
        }
        self
    }
}

pub fn default_engines() -> Vec<Engine> {
    vec![
        Engine::new(
            "duckduckgo",
            "DuckDuckGo",
            Some("https://duckduckgo.com/?q={searchTerms}".to_string()),
        ),
        Engine::new(
            "wikipedia",
            "Wikipedia",
            Some("https://en.wikipedia.org/w/index.php?search={searchTerms}".to_string()),
        ),
        Engine::new(
            "crates",
            "Crates.io",
            Some("https://crates.io/search?q={searchTerms}".to_string()),
        ),
    ]
}

fn default_words() -> Vec<String> {
    [
        "rust", "rust book", "rust async", "rustup", "ratatui", "rockets", "tokio",
        "tokio select", "tracing", "serde", "serde json", "search engines",
    ]
    .iter()
    .map(|word| (*word).to_string())
    .collect()
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("SEB_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("seb").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("seb")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("seb").join("config.toml"));
    }
    None
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::error::AppError;

    use super::Config;

    fn unique_temp_path(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("seb_config_{suffix}_{}_{}", process::id(), nanos));
        path
    }

    #[test]
    fn load_from_path_returns_defaults_for_missing_file() {
        let missing = unique_temp_path("missing.toml");
        let config = Config::load_from_path(&missing).expect("missing config should fallback");
        assert_eq!(config, Config::default());
        assert!(config.search.suggestions_enabled);
        assert_eq!(config.catalog_engines().len(), 3);
    }

    #[test]
    fn load_from_path_applies_partial_overrides_and_sanitizes() {
        let path = unique_temp_path("custom.toml");
        fs::write(
            &path,
            r#"
            [search]
            suggestions_enabled = false
            default_engine = "  wiki "

            [[engines]]
            id = "ddg"
            name = "DuckDuckGo"
            template = "t-ddg"

            [[engines]]
            id = "wiki"
            name = ""

            [[engines]]
            id = "ddg"
            name = "Duplicate"

            [[engines]]
            id = "  "
            name = "Blank"

            [suggest]
            max_candidates = 0
            cache_entries = 0
            "#,
        )
        .expect("config file should be written");

        let config = Config::load_from_path(&path).expect("config should parse");
        assert!(!config.search.suggestions_enabled);
        assert_eq!(config.search.default_engine, "wiki");
        assert_eq!(config.suggest.max_candidates, 1);
        assert_eq!(config.suggest.cache_entries, 1);
        assert_eq!(config.log.filter, "seb=info");

        let engines = config.catalog_engines();
        assert_eq!(engines.len(), 2);
        assert_eq!(engines[0].submission_template(), "t-ddg");
        assert_eq!(engines[1].display_name, "wiki");
        assert_eq!(engines[1].template_id, None);

        fs::remove_file(&path).expect("config file should be removed");
    }

    #[test]
    fn load_from_path_rejects_malformed_toml() {
        let path = unique_temp_path("broken.toml");
        fs::write(&path, "[search\nsuggestions_enabled = ").expect("config file should be written");

        let err = Config::load_from_path(&path).expect_err("broken config should fail");
        assert!(matches!(err, AppError::Config { .. }));

        fs::remove_file(&path).expect("config file should be removed");
    }

    #[test]
    fn load_from_path_rejects_directories() {
        let dir = std::env::temp_dir();
        let err = Config::load_from_path(&dir).expect_err("directory is not a config file");
        assert!(matches!(err, AppError::Config { .. }));
    }
}
