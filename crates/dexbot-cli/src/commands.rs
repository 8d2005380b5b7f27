//! Command implementations
//!
//! Each command renders its output into a `String` so it can be tested
//! without capturing stdout.

use anyhow::{bail, Result};
use dexbot_core::{
    apply_runtime_overrides, urdf, ConfigRegistry, EnvSource, HandType, JointType,
    OverrideOptions, RobotInfo, Settings, Side,
};
use std::collections::HashMap;
use std::fmt::Write;
use std::path::Path;

const RULE_WIDTH: usize = 70;

pub fn cfg_list() -> String {
    let registry = ConfigRegistry::builtin();
    let mut variants = registry.list_variants();
    variants.sort();

    let mut out = String::new();
    let _ = writeln!(out, "Available robot configurations: {}", variants.len());
    for variant in variants {
        let _ = writeln!(out, "  - {variant}");
    }
    out
}

pub fn cfg_show(
    variant: &str,
    hands: &[(Side, HandType)],
    options: &OverrideOptions,
    json: bool,
) -> Result<String> {
    let path = Path::new(variant);
    if path.is_file() {
        bail!(
            "Loading configs from files is not supported: {}",
            path.display()
        );
    }

    let registry = ConfigRegistry::builtin();
    let mut config = registry.get(variant)?;

    let hand_types: HashMap<Side, HandType> = hands.iter().copied().collect();
    let report = apply_runtime_overrides(&mut config, &hand_types, options)?;

    if json {
        let mut out = serde_json::to_string_pretty(&config)?;
        out.push('\n');
        return Ok(out);
    }

    let mut out = String::new();
    writeln!(out, "Robot Configuration: {variant}")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "Robot Model: {}", config.robot_model)?;
    writeln!(out, "Abbreviation: {}", config.abbr)?;
    writeln!(out, "URDF Path: {}", config.urdf_path)?;

    writeln!(out, "\nComponents ({}):", config.components.len())?;
    for (name, component) in &config.components {
        let state = if component.is_enabled() { "" } else { " (disabled)" };
        writeln!(out, "  - {name}: {}{state}", component.kind())?;
    }

    if !config.sensors.is_empty() {
        writeln!(out, "\nSensors ({}):", config.sensors.len())?;
        for (name, sensor) in &config.sensors {
            writeln!(out, "  - {name}: {}", sensor.kind())?;
        }
    }

    if !config.querables.is_empty() {
        writeln!(out, "\nQueryables ({}):", config.querables.len())?;
        for (name, path) in &config.querables {
            writeln!(out, "  - {name}: {path}")?;
        }
    }

    if !report.is_empty() {
        writeln!(out, "\nRuntime overrides ({}):", report.actions.len())?;
        for action in &report.actions {
            writeln!(out, "  - {action}")?;
        }
    }

    Ok(out)
}

pub fn info(variant: Option<&str>, settings: &Settings, env: &dyn EnvSource) -> Result<String> {
    let registry = ConfigRegistry::builtin();
    let mut builder = RobotInfo::builder(&registry).env(env);
    if let Some(variant) = variant {
        builder = builder.variant(variant);
    }
    if let Some(dir) = &settings.urdf.dir {
        builder = builder.urdf_dir(dir);
    }
    let robot = builder.build()?;

    let mut out = String::new();
    writeln!(out, "Robot Model: {}", robot.robot_model())?;
    writeln!(out, "Type: {}", robot.robot_type())?;
    writeln!(out, "Version: {}", robot.robot_version())?;
    if let Some(name) = robot.robot_name() {
        writeln!(out, "Robot Name: {name}")?;
    }
    match robot.urdf_path() {
        Some(path) => writeln!(out, "URDF: {}", path.display())?,
        None => writeln!(out, "URDF: not loaded")?,
    }

    writeln!(out, "\nComponents:")?;
    for name in robot.component_list() {
        match robot.component_dof(&name) {
            Ok(dof) => writeln!(out, "  - {name} ({dof} DOF)")?,
            Err(_) => writeln!(out, "  - {name}")?,
        }
    }

    let pv = robot.pv_components();
    if !pv.is_empty() {
        writeln!(out, "\nPV mode: {}", pv.join(", "))?;
    }

    let sensors = robot.sensor_list();
    if !sensors.is_empty() {
        writeln!(out, "\nSensors: {}", sensors.join(", "))?;
    }

    if robot.has_urdf() {
        writeln!(
            out,
            "\nMovable joints: {}",
            robot.movable_joint_names()?.len()
        )?;
    }

    Ok(out)
}

fn lines(items: impl IntoIterator<Item = String>) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(&item);
        out.push('\n');
    }
    out
}

pub fn urdf_joints(path: &Path, joint_type: Option<&str>) -> Result<String> {
    let filter = joint_type.map(JointType::from);
    Ok(lines(urdf::get_joint_names(path, filter.as_ref())?))
}

pub fn urdf_movable(path: &Path) -> Result<String> {
    Ok(lines(urdf::get_movable_joint_names(path)?))
}

pub fn urdf_limits(path: &Path) -> Result<String> {
    let limits = urdf::get_joint_limits(path, None)?;
    Ok(lines(limits.into_iter().map(|(name, limit)| {
        let optional = |value: Option<f64>| value.map_or("-".to_string(), |v| v.to_string());
        format!(
            "{name}: lower={} upper={} effort={} velocity={}",
            limit.lower,
            limit.upper,
            optional(limit.effort),
            optional(limit.velocity)
        )
    })))
}

pub fn urdf_links(path: &Path) -> Result<String> {
    Ok(lines(urdf::get_link_names(path)?))
}

pub fn urdf_tree(path: &Path) -> Result<String> {
    let tree = urdf::parse_urdf(path)?.joint_tree();
    Ok(lines(
        tree.into_iter()
            .map(|(parent, joints)| format!("{parent}: {}", joints.join(", "))),
    ))
}
