//! High-level robot information
//!
//! [`RobotInfo`] ties a resolved [`RobotConfig`] to its URDF so callers can ask
//! about components, sensors and joint limits in one place.
//!
//! ```no_run
//! use dexbot_core::{ConfigRegistry, RobotInfo};
//!
//! let registry = ConfigRegistry::builtin();
//! let robot = RobotInfo::builder(&registry)
//!     .variant("vega_1p")
//!     .urdf_dir("/opt/dexmate/urdf")
//!     .build()?;
//! println!("{} arm joints", robot.component_dof("left_arm")?);
//! # Ok::<(), dexbot_core::RobotInfoError>(())
//! ```

use crate::component::{ComponentConfig, Side};
use crate::hand::HandType;
use crate::modifier::{apply_runtime_overrides, OverrideError, OverrideOptions, OverrideReport};
use crate::registry::ConfigRegistry;
use crate::resolver::{EnvSource, ProcessEnv, ResolveError, VariantResolver, ROBOT_NAME_ENV_VAR};
use crate::robot::RobotConfig;
use crate::urdf::{JointLimit, JointType, UrdfError, UrdfParser};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum RobotInfoError {
    #[error("Component '{name}' not found. Available components: {}", available.join(", "))]
    ComponentNotFound { name: String, available: Vec<String> },
    #[error("Sensor '{name}' not found. Available sensors: {}", available.join(", "))]
    SensorNotFound { name: String, available: Vec<String> },
    #[error("Parameter '{parameter}' not found for component '{component}'")]
    ParameterNotFound { component: String, parameter: String },
    #[error("Component '{0}' does not have joints")]
    NoJoints(String),
    #[error("URDF not loaded")]
    UrdfNotLoaded,
    #[error("Provide either a variant name or a config, not both")]
    ConflictingSources,
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Urdf(#[from] UrdfError),
    #[error(transparent)]
    Override(#[from] OverrideError),
}

/// Builder for [`RobotInfo`]
pub struct RobotInfoBuilder<'a> {
    registry: &'a ConfigRegistry,
    variant: Option<String>,
    config: Option<RobotConfig>,
    env: Option<&'a dyn EnvSource>,
    urdf_dir: Option<PathBuf>,
}

impl<'a> RobotInfoBuilder<'a> {
    /// Look the configuration up by variant name
    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Use this configuration as is
    pub fn config(mut self, config: RobotConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Environment to resolve from; the process environment by default
    pub fn env(mut self, env: &'a dyn EnvSource) -> Self {
        self.env = Some(env);
        self
    }

    /// Directory relative URDF paths are resolved against
    pub fn urdf_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.urdf_dir = Some(dir.into());
        self
    }

    pub fn build(self) -> Result<RobotInfo, RobotInfoError> {
        if self.variant.is_some() && self.config.is_some() {
            return Err(RobotInfoError::ConflictingSources);
        }

        let env: &dyn EnvSource = self.env.unwrap_or(&ProcessEnv);
        let resolver = VariantResolver::new(self.registry);
        let config = resolver.load(self.variant.as_deref(), self.config, env)?;

        let mut info = RobotInfo {
            config,
            robot_name: env.non_empty(ROBOT_NAME_ENV_VAR),
            urdf_dir: self.urdf_dir,
            urdf: None,
            urdf_path: None,
        };

        if info.config.urdf_path.is_empty() {
            debug!("No URDF path specified in config");
            return Ok(info);
        }

        let urdf_path = info.config.urdf_path.clone();
        match info.load_urdf(&urdf_path) {
            Ok(()) => {}
            Err(RobotInfoError::Urdf(UrdfError::NotFound(path))) => {
                warn!(
                    "URDF file not found: {}, continuing without URDF",
                    path.display()
                );
            }
            Err(e) => return Err(e),
        }
        Ok(info)
    }
}

/// Resolved robot configuration plus its parsed URDF, when one was found
#[derive(Debug, Clone)]
pub struct RobotInfo {
    config: RobotConfig,
    robot_name: Option<String>,
    urdf_dir: Option<PathBuf>,
    urdf: Option<UrdfParser>,
    urdf_path: Option<PathBuf>,
}

impl RobotInfo {
    pub fn builder(registry: &ConfigRegistry) -> RobotInfoBuilder<'_> {
        RobotInfoBuilder {
            registry,
            variant: None,
            config: None,
            env: None,
            urdf_dir: None,
        }
    }

    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    /// Apply runtime hand overrides to the held configuration
    pub fn apply_overrides(
        &mut self,
        hand_types: &HashMap<Side, HandType>,
        options: &OverrideOptions,
    ) -> Result<OverrideReport, RobotInfoError> {
        Ok(apply_runtime_overrides(&mut self.config, hand_types, options)?)
    }

    pub fn robot_model(&self) -> &str {
        &self.config.robot_model
    }

    pub fn robot_type(&self) -> &str {
        self.config.robot_type()
    }

    pub fn robot_version(&self) -> &str {
        self.config.robot_version()
    }

    /// Robot serial from `ROBOT_NAME`, if it was set
    pub fn robot_name(&self) -> Option<&str> {
        self.robot_name.as_deref()
    }

    // ---------------------------------------------------------------------
    // URDF
    // ---------------------------------------------------------------------

    /// Load (or replace) the URDF; relative paths go through the URDF directory
    pub fn load_urdf(&mut self, path: impl AsRef<Path>) -> Result<(), RobotInfoError> {
        let path = self.resolve_urdf_path(path.as_ref());
        let parser = UrdfParser::open(&path)?;
        self.urdf_path = Some(path);
        self.urdf = Some(parser);
        Ok(())
    }

    fn resolve_urdf_path(&self, path: &Path) -> PathBuf {
        match &self.urdf_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub fn has_urdf(&self) -> bool {
        self.urdf.is_some()
    }

    pub fn urdf_path(&self) -> Option<&Path> {
        self.urdf_path.as_deref()
    }

    pub fn urdf(&self) -> Result<&UrdfParser, RobotInfoError> {
        self.urdf.as_ref().ok_or(RobotInfoError::UrdfNotLoaded)
    }

    pub fn joint_names(
        &self,
        joint_type: Option<&JointType>,
    ) -> Result<Vec<String>, RobotInfoError> {
        Ok(self.urdf()?.joint_names(joint_type))
    }

    pub fn movable_joint_names(&self) -> Result<Vec<String>, RobotInfoError> {
        Ok(self.urdf()?.movable_joint_names())
    }

    /// Limits of the requested joints (all joints with limits when `None`)
    pub fn joint_limits(
        &self,
        names: Option<&[&str]>,
    ) -> Result<Vec<(String, JointLimit)>, RobotInfoError> {
        Ok(self.urdf()?.joint_limits(names))
    }

    /// `[lower, upper]` per joint with limits
    pub fn joint_pos_limits(
        &self,
        names: Option<&[&str]>,
    ) -> Result<Vec<[f64; 2]>, RobotInfoError> {
        Ok(self
            .joint_limits(names)?
            .into_iter()
            .map(|(_, limit)| [limit.lower, limit.upper])
            .collect())
    }

    /// Velocity limits; joints without one are skipped
    pub fn joint_vel_limits(&self, names: Option<&[&str]>) -> Result<Vec<f64>, RobotInfoError> {
        Ok(self
            .joint_limits(names)?
            .into_iter()
            .filter_map(|(_, limit)| limit.velocity)
            .collect())
    }

    /// Effort limits; joints without one are skipped
    pub fn joint_effort_limits(&self, names: Option<&[&str]>) -> Result<Vec<f64>, RobotInfoError> {
        Ok(self
            .joint_limits(names)?
            .into_iter()
            .filter_map(|(_, limit)| limit.effort)
            .collect())
    }

    pub fn link_names(&self) -> Result<Vec<String>, RobotInfoError> {
        Ok(self.urdf()?.link_names().to_vec())
    }

    // ---------------------------------------------------------------------
    // Components
    // ---------------------------------------------------------------------

    pub fn component_list(&self) -> Vec<String> {
        self.config.component_names()
    }

    pub fn has_component(&self, name: &str) -> bool {
        self.config.has_component(name)
    }

    pub fn has_left_arm(&self) -> bool {
        self.has_component("left_arm")
    }

    pub fn has_right_arm(&self) -> bool {
        self.has_component("right_arm")
    }

    pub fn has_left_hand(&self) -> bool {
        self.has_component("left_hand")
    }

    pub fn has_right_hand(&self) -> bool {
        self.has_component("right_hand")
    }

    pub fn has_torso(&self) -> bool {
        self.has_component("torso")
    }

    pub fn has_head(&self) -> bool {
        self.has_component("head")
    }

    pub fn has_chassis(&self) -> bool {
        self.has_component("chassis")
    }

    pub fn component_config(&self, name: &str) -> Result<&ComponentConfig, RobotInfoError> {
        self.config
            .component(name)
            .ok_or_else(|| RobotInfoError::ComponentNotFound {
                name: name.to_string(),
                available: self.component_list(),
            })
    }

    pub fn component_joints(&self, name: &str) -> Result<Vec<String>, RobotInfoError> {
        self.component_config(name)?
            .joints()
            .ok_or_else(|| RobotInfoError::NoJoints(name.to_string()))
    }

    /// Number of joints in a component
    pub fn component_dof(&self, name: &str) -> Result<usize, RobotInfoError> {
        Ok(self.component_joints(name)?.len())
    }

    /// Stored or derived field of a component
    pub fn component_parameter(
        &self,
        component: &str,
        parameter: &str,
    ) -> Result<Value, RobotInfoError> {
        self.component_config(component)?
            .parameter(parameter)
            .ok_or_else(|| RobotInfoError::ParameterNotFound {
                component: component.to_string(),
                parameter: parameter.to_string(),
            })
    }

    /// Components running in position-velocity mode
    pub fn pv_components(&self) -> Vec<String> {
        self.config
            .components
            .iter()
            .filter(|(_, component)| component.pv_mode() == Some(true))
            .map(|(name, _)| name.clone())
            .collect()
    }

    // ---------------------------------------------------------------------
    // Sensors and queryables
    // ---------------------------------------------------------------------

    pub fn sensor_list(&self) -> Vec<String> {
        self.config.sensor_names()
    }

    pub fn sensor_config(&self, name: &str) -> Result<&ComponentConfig, RobotInfoError> {
        self.config
            .sensors
            .get(name)
            .ok_or_else(|| RobotInfoError::SensorNotFound {
                name: name.to_string(),
                available: self.sensor_list(),
            })
    }

    /// Service path of a queryable (`hand_info` → `info/hand_type`)
    pub fn querable(&self, name: &str) -> Option<&str> {
        self.config.querables.get(name).map(String::as_str)
    }
}

impl fmt::Display for RobotInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let urdf = self
            .urdf_path
            .as_deref()
            .filter(|_| self.has_urdf())
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "not loaded".to_string());
        write!(
            f,
            "RobotInfo(model='{}', components={}, urdf={})",
            self.robot_model(),
            self.config.components.len(),
            urdf
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ROBOT_CONFIG_ENV_VAR;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    const ARM_URDF: &str = r#"<?xml version="1.0"?>
<robot name="vega_1p">
  <link name="base_link"/>
  <link name="L_arm_l1"/>
  <link name="L_arm_l2"/>
  <link name="head_l1"/>
  <joint name="L_arm_j1" type="revolute">
    <parent link="base_link"/>
    <child link="L_arm_l1"/>
    <limit lower="-3.07" upper="3.07" effort="60" velocity="2.5"/>
  </joint>
  <joint name="L_arm_j2" type="revolute">
    <parent link="L_arm_l1"/>
    <child link="L_arm_l2"/>
    <limit lower="-0.1" upper="2.2"/>
  </joint>
  <joint name="head_mount" type="fixed">
    <parent link="base_link"/>
    <child link="head_l1"/>
  </joint>
</robot>
"#;

    fn empty_env() -> HashMap<String, String> {
        HashMap::new()
    }

    fn urdf_root(variant_file: &str, content: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("robots/humanoid/vega_1p").join(variant_file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        dir
    }

    fn vega_1p(registry: &ConfigRegistry, dir: &TempDir) -> RobotInfo {
        let env = empty_env();
        RobotInfo::builder(registry)
            .variant("vega_1p")
            .env(&env)
            .urdf_dir(dir.path())
            .build()
            .unwrap()
    }

    #[test]
    fn test_urdf_loaded_from_directory() {
        let registry = ConfigRegistry::builtin();
        let dir = urdf_root("vega_1p.urdf", ARM_URDF);
        let robot = vega_1p(&registry, &dir);

        assert!(robot.has_urdf());
        assert_eq!(
            robot.urdf_path().unwrap(),
            dir.path().join("robots/humanoid/vega_1p/vega_1p.urdf")
        );
        assert_eq!(robot.movable_joint_names().unwrap(), vec!["L_arm_j1", "L_arm_j2"]);
        assert_eq!(robot.link_names().unwrap().len(), 4);
        assert_eq!(
            robot.joint_pos_limits(None).unwrap(),
            vec![[-3.07, 3.07], [-0.1, 2.2]]
        );
        assert_eq!(robot.joint_vel_limits(None).unwrap(), vec![2.5]);
        assert_eq!(robot.joint_effort_limits(Some(&["L_arm_j2"])).unwrap(), Vec::<f64>::new());
        assert!(robot.to_string().contains("urdf=vega_1p.urdf"));
    }

    #[test]
    fn test_missing_urdf_is_not_fatal() {
        let registry = ConfigRegistry::builtin();
        let dir = TempDir::new().unwrap();
        let robot = vega_1p(&registry, &dir);

        assert!(!robot.has_urdf());
        assert!(robot.urdf_path().is_none());
        assert!(matches!(
            robot.joint_names(None),
            Err(RobotInfoError::UrdfNotLoaded)
        ));
        assert!(matches!(robot.link_names(), Err(RobotInfoError::UrdfNotLoaded)));
        assert!(robot.to_string().contains("urdf=not loaded"));
    }

    #[test]
    fn test_malformed_urdf_fails_construction() {
        let registry = ConfigRegistry::builtin();
        let dir = urdf_root("vega_1p.urdf", "<robot><joint name=\"a\"></robot>");
        let env = empty_env();
        let result = RobotInfo::builder(&registry)
            .variant("vega_1p")
            .env(&env)
            .urdf_dir(dir.path())
            .build();
        assert!(matches!(
            result,
            Err(RobotInfoError::Urdf(UrdfError::ParseError(_)))
        ));
    }

    #[test]
    fn test_type_version_and_components() {
        let registry = ConfigRegistry::builtin();
        let dir = TempDir::new().unwrap();
        let robot = vega_1p(&registry, &dir);

        assert_eq!(robot.robot_model(), "vega_1p");
        assert_eq!(robot.robot_type(), "vega");
        assert_eq!(robot.robot_version(), "1p");
        assert!(robot.robot_name().is_none());

        assert!(robot.has_left_arm() && robot.has_right_arm());
        assert!(robot.has_torso() && robot.has_head() && robot.has_chassis());
        assert!(!robot.has_left_hand() && !robot.has_right_hand());

        assert_eq!(robot.component_dof("left_arm").unwrap(), 7);
        assert_eq!(robot.component_dof("chassis").unwrap(), 4);
        assert_eq!(
            robot.component_joints("torso").unwrap(),
            vec!["torso_j1", "torso_j2", "torso_j3"]
        );
        assert_eq!(robot.pv_components(), vec!["head", "torso"]);
    }

    #[test]
    fn test_component_errors() {
        let registry = ConfigRegistry::builtin();
        let dir = TempDir::new().unwrap();
        let robot = vega_1p(&registry, &dir);

        match robot.component_config("left_hand") {
            Err(RobotInfoError::ComponentNotFound { name, available }) => {
                assert_eq!(name, "left_hand");
                assert!(available.contains(&"left_arm".to_string()));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            robot.component_dof("battery"),
            Err(RobotInfoError::NoJoints(name)) if name == "battery"
        ));
        assert!(matches!(
            robot.component_parameter("torso", "wheel_count"),
            Err(RobotInfoError::ParameterNotFound { .. })
        ));
    }

    #[test]
    fn test_component_parameters() {
        let registry = ConfigRegistry::builtin();
        let dir = TempDir::new().unwrap();
        let robot = vega_1p(&registry, &dir);

        assert_eq!(
            robot.component_parameter("chassis", "max_linear_vel").unwrap(),
            json!(0.8)
        );
        assert_eq!(
            robot.component_parameter("right_arm", "wrench_sub_topic").unwrap(),
            json!("state/wrench/right")
        );
        assert_eq!(
            robot.component_parameter("estop", "estop_query_name").unwrap(),
            json!("system/estop")
        );
    }

    #[test]
    fn test_sensors_and_querables() {
        let registry = ConfigRegistry::builtin();
        let dir = TempDir::new().unwrap();
        let robot = vega_1p(&registry, &dir);

        assert!(robot.sensor_list().contains(&"head_camera".to_string()));
        assert!(!robot.sensor_config("head_camera").unwrap().is_enabled());
        assert!(matches!(
            robot.sensor_config("left_wrist_camera"),
            Err(RobotInfoError::SensorNotFound { .. })
        ));
        assert_eq!(robot.querable("soc_ntp"), Some("time/soc"));
        assert_eq!(robot.querable("missing"), None);
    }

    #[test]
    fn test_variant_and_config_conflict() {
        let registry = ConfigRegistry::builtin();
        let env = empty_env();
        let result = RobotInfo::builder(&registry)
            .variant("vega_1p")
            .config(RobotConfig::new("custom_1", "cu", ""))
            .env(&env)
            .build();
        assert!(matches!(result, Err(RobotInfoError::ConflictingSources)));
    }

    #[test]
    fn test_explicit_config_skips_registry_and_urdf() {
        let registry = ConfigRegistry::new();
        let env = empty_env();
        let robot = RobotInfo::builder(&registry)
            .config(RobotConfig::new("custom_1", "cu", ""))
            .env(&env)
            .build()
            .unwrap();
        assert_eq!(robot.robot_model(), "custom_1");
        assert!(!robot.has_urdf());
    }

    #[test]
    fn test_resolves_from_env() {
        let registry = ConfigRegistry::builtin();
        let env: HashMap<String, String> = [
            (ROBOT_NAME_ENV_VAR.to_string(), "dm/vgabcd123456-1u".to_string()),
            (ROBOT_CONFIG_ENV_VAR.to_string(), String::new()),
        ]
        .into_iter()
        .collect();
        let dir = TempDir::new().unwrap();
        let robot = RobotInfo::builder(&registry)
            .env(&env)
            .urdf_dir(dir.path())
            .build()
            .unwrap();
        assert_eq!(robot.robot_model(), "vega_1u");
        assert_eq!(robot.robot_name(), Some("dm/vgabcd123456-1u"));
    }

    #[test]
    fn test_unknown_variant() {
        let registry = ConfigRegistry::builtin();
        let env = empty_env();
        let result = RobotInfo::builder(&registry)
            .variant("vega_9")
            .env(&env)
            .build();
        assert!(matches!(
            result,
            Err(RobotInfoError::Resolve(ResolveError::Registry(_)))
        ));
    }

    #[test]
    fn test_apply_overrides_through_facade() {
        let registry = ConfigRegistry::builtin();
        let dir = TempDir::new().unwrap();
        let mut robot = vega_1p(&registry, &dir);
        let hands: HashMap<Side, HandType> = [(Side::Right, HandType::HandF5d6V2)].into_iter().collect();

        let report = robot
            .apply_overrides(&hands, &OverrideOptions::default())
            .unwrap();
        assert!(!report.is_empty());
        assert!(robot.has_right_hand());
        assert_eq!(robot.component_dof("right_hand").unwrap(), 6);
    }
}
