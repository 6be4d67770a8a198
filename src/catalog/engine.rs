pub const CONFIGURE_ENTRY_LABEL: &str = "Manage Search Engines…";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineRole {
    #[default]
    Normal,
    /// Synthetic list entry that opens preferences instead of selecting.
    Configure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engine {
    pub id: String,
    pub display_name: String,
    /// Opaque token attached to every search request for this engine.
    pub template_id: Option<String>,
    pub role: EngineRole,
}

impl Engine {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        template_id: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            template_id,
            role: EngineRole::Normal,
        }
    }

    pub fn configure_entry() -> Self {
        Self {
            id: String::new(),
            display_name: CONFIGURE_ENTRY_LABEL.to_string(),
            template_id: None,
            role: EngineRole::Configure,
        }
    }

    pub fn is_selectable(&self) -> bool {
        self.role == EngineRole::Normal
    }

    pub fn submission_template(&self) -> &str {
        self.template_id.as_deref().unwrap_or("")
    }

    pub fn placeholder(&self) -> String {
        match self.role {
            EngineRole::Normal => format!("Search Using {}", self.display_name),
            EngineRole::Configure => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Engine, EngineRole};

    #[test]
    fn placeholder_names_ordinary_engines_only() {
        let engine = Engine::new("ddg", "DuckDuckGo", Some("ddg-html".to_string()));
        assert_eq!(engine.placeholder(), "Search Using DuckDuckGo");
        assert_eq!(Engine::configure_entry().placeholder(), "");
    }

    #[test]
    fn missing_template_reads_as_empty() {
        let engine = Engine::new("wiki", "Wikipedia", None);
        assert_eq!(engine.submission_template(), "");
        assert_eq!(engine.role, EngineRole::Normal);
        assert!(!Engine::configure_entry().is_selectable());
    }
}
