//! Variant name → configuration factory registry
//!
//! The registry is an ordinary value: build one with [`ConfigRegistry::builtin`]
//! for the shipped Vega variants, or start from [`ConfigRegistry::new`] and
//! register your own factories.

use crate::robot::RobotConfig;
use std::fmt;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown robot variant: '{variant}'. Available variants: {}", available.join(", "))]
    UnknownVariant {
        variant: String,
        available: Vec<String>,
    },
}

/// Builds a fresh configuration on every call
pub type ConfigFactory = Box<dyn Fn() -> RobotConfig + Send + Sync>;

/// Ordered collection of robot variants
#[derive(Default)]
pub struct ConfigRegistry {
    variants: Vec<(String, ConfigFactory)>,
}

impl ConfigRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry populated with the shipped variants
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        crate::variants::register_builtin(&mut registry);
        registry
    }

    /// Register a variant
    ///
    /// Re-registering a name replaces its factory but keeps the name's
    /// original position in [`list_variants`](Self::list_variants).
    pub fn register<F>(&mut self, variant: &str, factory: F)
    where
        F: Fn() -> RobotConfig + Send + Sync + 'static,
    {
        match self.variants.iter_mut().find(|(name, _)| name == variant) {
            Some(entry) => {
                debug!("Replacing registration for variant {}", variant);
                entry.1 = Box::new(factory);
            }
            None => {
                debug!("Registered variant {}", variant);
                self.variants.push((variant.to_string(), Box::new(factory)));
            }
        }
    }

    /// Fresh configuration for `variant`
    pub fn get(&self, variant: &str) -> Result<RobotConfig, RegistryError> {
        self.variants
            .iter()
            .find(|(name, _)| name == variant)
            .map(|(_, factory)| factory())
            .ok_or_else(|| RegistryError::UnknownVariant {
                variant: variant.to_string(),
                available: self.list_variants(),
            })
    }

    pub fn contains(&self, variant: &str) -> bool {
        self.variants.iter().any(|(name, _)| name == variant)
    }

    /// Variant names in registration order
    pub fn list_variants(&self) -> Vec<String> {
        self.variants.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl fmt::Debug for ConfigRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigRegistry")
            .field("variants", &self.list_variants())
            .finish()
    }
}
