//! Provider Registry
//!
//! Routes model ids to the provider that serves them. Entries carry regex
//! patterns and a priority; the highest-priority matching entry wins.

use futures::future::BoxFuture;
use parking_lot::RwLock;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info};

use crate::config::ModelConfig;
use crate::core::providers::bedrock::error::BedrockError;
use crate::core::traits::LanguageModel;

/// Future returned by a provider factory
pub type ModelFuture = BoxFuture<'static, Result<Box<dyn LanguageModel>, BedrockError>>;

/// Builds a model instance from a configuration
pub type ModelFactory = Arc<dyn Fn(ModelConfig) -> ModelFuture + Send + Sync>;

/// One registered provider
#[derive(Clone)]
pub struct ProviderEntry {
    name: String,
    patterns: Vec<Regex>,
    priority: i32,
    factory: ModelFactory,
}

impl ProviderEntry {
    /// Create an entry; fails if a pattern is not a valid regex
    pub fn new(
        name: impl Into<String>,
        patterns: &[&str],
        priority: i32,
        factory: ModelFactory,
    ) -> Result<Self, BedrockError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| {
                    BedrockError::configuration(format!("Invalid provider pattern '{}': {}", p, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: name.into(),
            patterns,
            priority,
            factory,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn patterns(&self) -> Vec<&str> {
        self.patterns.iter().map(Regex::as_str).collect()
    }

    /// Whether any pattern matches the model id
    pub fn matches(&self, model_id: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(model_id))
    }

    pub fn factory(&self) -> ModelFactory {
        Arc::clone(&self.factory)
    }
}

impl std::fmt::Debug for ProviderEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderEntry")
            .field("name", &self.name)
            .field("patterns", &self.patterns())
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// Listing view of a registered provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSummary {
    pub name: String,
    pub patterns: Vec<String>,
    pub priority: i32,
}

/// Provider Registry keyed by provider name
#[derive(Default)]
pub struct ProviderRegistry {
    entries: HashMap<String, ProviderEntry>,
}

impl ProviderRegistry {
    /// Create new provider registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider.
    ///
    /// Returns `false` and leaves the registry untouched when the name is
    /// already registered.
    pub fn register(&mut self, entry: ProviderEntry) -> bool {
        if self.entries.contains_key(entry.name()) {
            debug!(provider = entry.name(), "Provider already registered");
            return false;
        }
        info!(
            provider = entry.name(),
            priority = entry.priority(),
            "Registered provider"
        );
        self.entries.insert(entry.name().to_string(), entry);
        true
    }

    /// Get provider by name
    pub fn get(&self, name: &str) -> Option<&ProviderEntry> {
        self.entries.get(name)
    }

    /// Check if provider is registered
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Highest-priority entry matching the model id; ties go to the
    /// alphabetically first name
    pub fn resolve(&self, model_id: &str) -> Option<&ProviderEntry> {
        self.entries
            .values()
            .filter(|entry| entry.matches(model_id))
            .min_by(|a, b| {
                b.priority
                    .cmp(&a.priority)
                    .then_with(|| a.name.cmp(&b.name))
            })
    }

    /// Registered providers, highest priority first, then by name
    pub fn list_entries(&self) -> Vec<ProviderSummary> {
        let mut summaries: Vec<ProviderSummary> = self
            .entries
            .values()
            .map(|entry| ProviderSummary {
                name: entry.name.clone(),
                patterns: entry.patterns().into_iter().map(str::to_string).collect(),
                priority: entry.priority,
            })
            .collect();
        summaries.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.name.cmp(&b.name)));
        summaries
    }

    /// Factory for a configuration: by `config.provider` when set, otherwise
    /// by model id pattern
    pub fn factory_for(&self, config: &ModelConfig) -> Result<ModelFactory, BedrockError> {
        let entry = match &config.provider {
            Some(name) => self.get(name).ok_or_else(|| {
                BedrockError::configuration(format!("Unknown provider '{}'", name))
            })?,
            None => self.resolve(&config.model_id).ok_or_else(|| {
                BedrockError::configuration(format!(
                    "No provider registered for model '{}'",
                    config.model_id
                ))
            })?,
        };
        debug!(provider = entry.name(), model_id = %config.model_id, "Resolved provider");
        Ok(entry.factory())
    }

    /// Create a model instance for a configuration
    pub async fn create_model(
        &self,
        config: ModelConfig,
    ) -> Result<Box<dyn LanguageModel>, BedrockError> {
        let factory = self.factory_for(&config)?;
        factory(config).await
    }

    /// Get provider count
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.entries.keys().collect();
        names.sort();
        f.debug_struct("ProviderRegistry")
            .field("provider_count", &self.entries.len())
            .field("providers", &names)
            .finish()
    }
}

static GLOBAL_REGISTRY: LazyLock<RwLock<ProviderRegistry>> =
    LazyLock::new(|| RwLock::new(ProviderRegistry::new()));

/// Process-wide registry
pub fn global_registry() -> &'static RwLock<ProviderRegistry> {
    &GLOBAL_REGISTRY
}

/// Create a model through the global registry.
///
/// The lock is released before the factory runs.
pub async fn create_model(config: ModelConfig) -> Result<Box<dyn LanguageModel>, BedrockError> {
    let factory = global_registry().read().factory_for(&config)?;
    factory(config).await
}
