use std::collections::HashMap;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::config::Config;
use crate::notify::{Subscribers, SubscriptionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    SuggestionsEnabled,
    DefaultEngineId,
}

impl SettingKey {
    pub fn id(self) -> &'static str {
        match self {
            Self::SuggestionsEnabled => "SuggestionsEnabled",
            Self::DefaultEngineId => "DefaultEngineId",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Bool(bool),
    Text(String),
}

impl SettingValue {
    /// Loose truthiness: text values count as true when non-empty.
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Text(value) => !value.is_empty() && value != "false",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Bool(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    ValueChanged { key: SettingKey, value: SettingValue },
}

pub trait SettingsChannel {
    fn get(&self, key: SettingKey) -> Option<SettingValue>;

    fn get_bool(&self, key: SettingKey) -> bool {
        self.get(key).is_some_and(|value| value.as_bool())
    }

    /// Text value, `None` when unset or empty.
    fn get_text(&self, key: SettingKey) -> Option<String> {
        self.get(key)
            .and_then(|value| value.as_text().map(str::to_string))
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Default)]
pub struct SettingsStore {
    values: HashMap<SettingKey, SettingValue>,
    subscribers: Subscribers<SettingsEvent>,
}

impl SettingsStore {
    pub fn from_config(config: &Config) -> Self {
        let mut store = Self::default();
        store.values.insert(
            SettingKey::SuggestionsEnabled,
            SettingValue::Bool(config.search.suggestions_enabled),
        );
        store.values.insert(
            SettingKey::DefaultEngineId,
            SettingValue::Text(config.search.default_engine.clone()),
        );
        store
    }

    pub fn subscribe(&mut self) -> (SubscriptionId, UnboundedReceiver<SettingsEvent>) {
        self.subscribers.subscribe()
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Stores `value` and notifies subscribers. Returns false when unchanged.
    pub fn set(&mut self, key: SettingKey, value: SettingValue) -> bool {
        if self.values.get(&key) == Some(&value) {
            return false;
        }
        tracing::debug!(key = key.id(), ?value, "setting changed");
        self.values.insert(key, value.clone());
        self.subscribers
            .publish(SettingsEvent::ValueChanged { key, value });
        true
    }

    pub fn toggle(&mut self, key: SettingKey) -> bool {
        let next = !self.get_bool(key);
        self.set(key, SettingValue::Bool(next));
        next
    }
}

impl SettingsChannel for SettingsStore {
    fn get(&self, key: SettingKey) -> Option<SettingValue> {
        self.values.get(&key).cloned()
    }
}
