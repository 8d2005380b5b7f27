//! Per-variant robot configuration record

use crate::component::{ComponentConfig, Side};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete description of one robot variant
///
/// Built fresh for every registry lookup, so callers may mutate it freely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// Model name such as `vega_1p`, `{type}_{version}`
    pub robot_model: String,
    /// Two-letter serial abbreviation (`vg`)
    pub abbr: String,
    /// URDF location, relative to the URDF directory unless absolute
    pub urdf_path: String,
    pub components: BTreeMap<String, ComponentConfig>,
    pub sensors: BTreeMap<String, ComponentConfig>,
    /// Service name → query path
    pub querables: BTreeMap<String, String>,
}

impl RobotConfig {
    pub fn new(robot_model: &str, abbr: &str, urdf_path: &str) -> Self {
        Self {
            robot_model: robot_model.to_string(),
            abbr: abbr.to_string(),
            urdf_path: urdf_path.to_string(),
            ..Self::default()
        }
    }

    pub fn with_component(mut self, name: &str, component: ComponentConfig) -> Self {
        self.components.insert(name.to_string(), component);
        self
    }

    pub fn with_sensor(mut self, name: &str, sensor: ComponentConfig) -> Self {
        self.sensors.insert(name.to_string(), sensor);
        self
    }

    pub fn with_querable(mut self, name: &str, path: &str) -> Self {
        self.querables.insert(name.to_string(), path.to_string());
        self
    }

    /// Robot type: `robot_model` up to its last `_` (whole model if none)
    pub fn robot_type(&self) -> &str {
        self.robot_model
            .rsplit_once('_')
            .map_or(self.robot_model.as_str(), |(ty, _)| ty)
    }

    /// Robot version: `robot_model` after its last `_` (empty if none)
    pub fn robot_version(&self) -> &str {
        self.robot_model
            .rsplit_once('_')
            .map_or("", |(_, version)| version)
    }

    pub fn component(&self, name: &str) -> Option<&ComponentConfig> {
        self.components.get(name)
    }

    pub fn has_component(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    pub fn component_names(&self) -> Vec<String> {
        self.components.keys().cloned().collect()
    }

    pub fn sensor_names(&self) -> Vec<String> {
        self.sensors.keys().cloned().collect()
    }
}

/// Component key of the hand on `side` (`left_hand`)
pub fn hand_key(side: Side) -> String {
    format!("{side}_hand")
}

/// Component key of the arm on `side` (`right_arm`)
pub fn arm_key(side: Side) -> String {
    format!("{side}_arm")
}
