//! Component presence checks

use crate::robot_info::RobotInfo;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Robot '{robot_type}' is missing components: {}. Available components: {}",
    missing.join(", "),
    available.join(", ")
)]
pub struct ComponentValidationError {
    pub robot_type: String,
    pub missing: Vec<String>,
    pub available: Vec<String>,
}

/// Components from `components` that `robot` lacks, in the order given
pub fn missing_components(robot: &RobotInfo, components: &[&str]) -> Vec<String> {
    components
        .iter()
        .filter(|name| !robot.has_component(name))
        .map(|name| name.to_string())
        .collect()
}

pub fn validate_components(
    robot: &RobotInfo,
    components: &[&str],
) -> Result<(), ComponentValidationError> {
    let missing = missing_components(robot, components);
    if missing.is_empty() {
        return Ok(());
    }
    Err(ComponentValidationError {
        robot_type: robot.robot_type().to_string(),
        missing,
        available: robot.component_list(),
    })
}

pub fn validate_component(
    robot: &RobotInfo,
    component: &str,
) -> Result<(), ComponentValidationError> {
    validate_components(robot, &[component])
}

pub fn has_component(robot: &RobotInfo, component: &str) -> bool {
    robot.has_component(component)
}

pub fn has_all_components(robot: &RobotInfo, components: &[&str]) -> bool {
    components.iter().all(|name| robot.has_component(name))
}

/// False for an empty list
pub fn has_any_component(robot: &RobotInfo, components: &[&str]) -> bool {
    components.iter().any(|name| robot.has_component(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ConfigRegistry;
    use std::collections::HashMap;

    fn robot(variant: &str) -> RobotInfo {
        let registry = ConfigRegistry::builtin();
        let env: HashMap<String, String> = HashMap::new();
        RobotInfo::builder(&registry)
            .variant(variant)
            .env(&env)
            .urdf_dir(std::env::temp_dir().join("dexbot-validators-missing"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_validate_present_components() {
        let robot = robot("vega_1p");
        assert!(validate_component(&robot, "chassis").is_ok());
        assert!(validate_components(&robot, &["left_arm", "torso"]).is_ok());
    }

    #[test]
    fn test_validation_error_names_missing_and_available() {
        let robot = robot("vega_1u");
        let err = validate_components(&robot, &["left_arm", "chassis", "torso"]).unwrap_err();
        assert_eq!(err.robot_type, "vega");
        assert_eq!(err.missing, vec!["chassis", "torso"]);
        assert!(err.available.contains(&"head".to_string()));

        let message = err.to_string();
        assert!(message.contains("missing components: chassis, torso"));
    }

    #[test]
    fn test_non_failing_checks() {
        let robot = robot("vega_1u_gripper");
        assert!(has_component(&robot, "left_hand"));
        assert!(!has_component(&robot, "battery"));
        assert!(has_all_components(&robot, &["left_hand", "right_hand"]));
        assert!(!has_all_components(&robot, &["left_hand", "chassis"]));
        assert!(has_any_component(&robot, &["chassis", "head"]));
        assert!(!has_any_component(&robot, &[]));
        assert_eq!(missing_components(&robot, &["torso", "head"]), vec!["torso"]);
    }
}
