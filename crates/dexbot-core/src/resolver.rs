//! Variant resolution from explicit names, configs or the environment
//!
//! Resolution priority:
//! 1. An explicit variant name
//! 2. An explicit [`RobotConfig`] (used as is, no registry lookup)
//! 3. `ROBOT_CONFIG`, with a trailing `.py` stripped
//! 4. `ROBOT_NAME`, a robot serial such as `dm/vgabcd123456-1p`
//!
//! The serial's first two block characters are an abbreviation looked up in an
//! [`AbbreviationTable`] built from the registry; the part after the last `-`
//! is the version. `dm/vgabcd123456-1p` resolves to `vega_1p`.

use crate::registry::{ConfigRegistry, RegistryError};
use crate::robot::RobotConfig;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::debug;

pub const ROBOT_NAME_ENV_VAR: &str = "ROBOT_NAME";
pub const ROBOT_CONFIG_ENV_VAR: &str = "ROBOT_CONFIG";

/// `dm/[abbreviation][serial]-[version][suffix]`, 12 characters between `/` and `-`
pub const ROBOT_NAME_PATTERN: &str = r"^dm/[a-zA-Z0-9]{12}-(?:\d+[a-z]?|rc\d+)$";

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(
        "Invalid robot name format: {0}. Expected format: dm/[abbreviation][serial]-[version][suffix] \
         (e.g. 'dm/vgabcd123456-1', 'dm/vg0123456789-1p', 'dm/vg0123456789-1u')"
    )]
    InvalidRobotName(String),
    #[error("Unknown robot abbreviation: {abbr}. Valid abbreviations: {}", valid.join(", "))]
    UnknownAbbreviation { abbr: String, valid: Vec<String> },
    #[error("Variant not specified and neither ROBOT_CONFIG nor ROBOT_NAME environment variables are set")]
    NotSpecified,
    #[error("Provide either a variant name or a config, not both")]
    ConflictingSources,
    #[error("Regex error: {0}")]
    Pattern(#[from] regex::Error),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Read access to environment variables
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;

    /// Like [`var`](Self::var), but empty values count as unset
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key).filter(|value| !value.is_empty())
    }
}

/// The process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Meaning of a version suffix letter (`p` → `pro`, `u` → `upper`)
pub fn version_suffix_meaning(suffix: char) -> Option<&'static str> {
    match suffix {
        'p' => Some("pro"),
        'u' => Some("upper"),
        _ => None,
    }
}

/// Serial abbreviation → robot type (`vg` → `vega`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbbreviationTable {
    entries: BTreeMap<String, String>,
}

impl AbbreviationTable {
    /// Scan every registered variant; the first variant seen for an abbreviation wins
    pub fn from_registry(registry: &ConfigRegistry) -> Self {
        let mut table = Self::default();
        for variant in registry.list_variants() {
            let Ok(config) = registry.get(&variant) else {
                continue;
            };
            if config.abbr.is_empty() {
                continue;
            }
            table
                .entries
                .entry(config.abbr.clone())
                .or_insert_with(|| config.robot_type().to_string());
        }
        debug!("Built abbreviation table with {} entries", table.entries.len());
        table
    }

    pub fn robot_type(&self, abbr: &str) -> Option<&str> {
        self.entries.get(abbr).map(String::as_str)
    }

    pub fn abbreviations(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Derive a variant name from a robot serial string
    pub fn variant_from_robot_name(&self, robot_name: &str) -> Result<String, ResolveError> {
        let pattern = Regex::new(ROBOT_NAME_PATTERN)?;
        if !pattern.is_match(robot_name) {
            return Err(ResolveError::InvalidRobotName(robot_name.to_string()));
        }

        // "dm/vgabcd123456-1p" -> block "vgabcd123456", version "1p"
        let rest = &robot_name["dm/".len()..];
        let (block, version) = rest
            .split_once('-')
            .ok_or_else(|| ResolveError::InvalidRobotName(robot_name.to_string()))?;
        let abbr = &block[..2];

        let robot_type =
            self.robot_type(abbr)
                .ok_or_else(|| ResolveError::UnknownAbbreviation {
                    abbr: abbr.to_string(),
                    valid: self.abbreviations(),
                })?;

        Ok(format!("{robot_type}_{version}"))
    }
}

/// Turns heterogeneous inputs into a variant name or a configuration
#[derive(Debug)]
pub struct VariantResolver<'a> {
    registry: &'a ConfigRegistry,
    abbreviations: AbbreviationTable,
}

impl<'a> VariantResolver<'a> {
    pub fn new(registry: &'a ConfigRegistry) -> Self {
        Self {
            registry,
            abbreviations: AbbreviationTable::from_registry(registry),
        }
    }

    pub fn registry(&self) -> &ConfigRegistry {
        self.registry
    }

    pub fn abbreviations(&self) -> &AbbreviationTable {
        &self.abbreviations
    }

    /// Variant name from `ROBOT_CONFIG`, falling back to `ROBOT_NAME`
    pub fn variant_from_env(&self, env: &dyn EnvSource) -> Result<String, ResolveError> {
        if let Some(config) = env.non_empty(ROBOT_CONFIG_ENV_VAR) {
            let variant = config.strip_suffix(".py").unwrap_or(&config).to_string();
            debug!("Variant {} from {}", variant, ROBOT_CONFIG_ENV_VAR);
            return Ok(variant);
        }

        if let Some(robot_name) = env.non_empty(ROBOT_NAME_ENV_VAR) {
            let variant = self.abbreviations.variant_from_robot_name(&robot_name)?;
            debug!("Variant {} from robot name {}", variant, robot_name);
            return Ok(variant);
        }

        Err(ResolveError::NotSpecified)
    }

    /// Explicit name if given, otherwise the environment
    pub fn resolve_variant(
        &self,
        variant: Option<&str>,
        env: &dyn EnvSource,
    ) -> Result<String, ResolveError> {
        match variant {
            Some(variant) => Ok(variant.to_string()),
            None => self.variant_from_env(env),
        }
    }

    /// Resolve and fetch a fresh configuration
    pub fn default_config(
        &self,
        variant: Option<&str>,
        env: &dyn EnvSource,
    ) -> Result<RobotConfig, ResolveError> {
        let variant = self.resolve_variant(variant, env)?;
        Ok(self.registry.get(&variant)?)
    }

    /// Configuration from the first source available
    ///
    /// An explicit config is returned untouched; passing both a variant and a
    /// config is an error.
    pub fn load(
        &self,
        variant: Option<&str>,
        config: Option<RobotConfig>,
        env: &dyn EnvSource,
    ) -> Result<RobotConfig, ResolveError> {
        match (variant, config) {
            (Some(_), Some(_)) => Err(ResolveError::ConflictingSources),
            (None, Some(config)) => Ok(config),
            (variant, None) => self.default_config(variant, env),
        }
    }
}
