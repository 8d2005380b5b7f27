//! Runtime overrides driven by live hand detection
//!
//! [`apply_runtime_overrides`] reconciles a configuration with the hand types
//! the robot controller reports, and optionally switches off the estop and
//! heartbeat components. The configuration is mutated in place.

use crate::component::{ComponentConfig, ComponentKind, Side};
use crate::hand::HandType;
use crate::resolver::{EnvSource, ProcessEnv};
use crate::robot::{arm_key, hand_key, RobotConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::warn;

pub const DISABLE_ESTOP_ENV_VAR: &str = "DEXCONTROL_DISABLE_ESTOP_CHECKING";
pub const DISABLE_HEARTBEAT_ENV_VAR: &str = "DEXCONTROL_DISABLE_HEARTBEAT";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OverrideError {
    #[error("Component '{key}' is a {kind}, not a hand or gripper")]
    NotAHand { key: String, kind: ComponentKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverrideOptions {
    /// Replace a configured hand that differs from the detected type
    pub allow_hand_override: bool,
    pub disable_estop: bool,
    pub disable_heartbeat: bool,
}

impl Default for OverrideOptions {
    fn default() -> Self {
        Self {
            allow_hand_override: true,
            disable_estop: false,
            disable_heartbeat: false,
        }
    }
}

/// `1`, `true`, `yes` and `on` (any case) are truthy
pub fn env_flag(env: &dyn EnvSource, key: &str) -> bool {
    env.var(key).is_some_and(|value| {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

impl OverrideOptions {
    /// Defaults plus the `DEXCONTROL_*` disable flags from the process environment
    pub fn from_env() -> Self {
        Self::default().with_env(&ProcessEnv)
    }

    /// Set the disable flags that are truthy in `env`; false values leave them as they are
    pub fn with_env(mut self, env: &dyn EnvSource) -> Self {
        self.disable_estop |= env_flag(env, DISABLE_ESTOP_ENV_VAR);
        self.disable_heartbeat |= env_flag(env, DISABLE_HEARTBEAT_ENV_VAR);
        self
    }
}

/// One change (or refused change) made by the override engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideAction {
    EstopDisabled,
    HeartbeatDisabled,
    PassThroughDisabled { side: Side },
    HandDisabled { side: Side },
    HandReplaced { side: Side, from: ComponentKind, to: ComponentKind },
    /// Configured hand differs from the detected type and overriding is off
    HandMismatchKept { side: Side, configured: HandType, detected: HandType },
    HandInjected { side: Side, kind: ComponentKind },
}

impl fmt::Display for OverrideAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideAction::EstopDisabled => write!(f, "estop disabled"),
            OverrideAction::HeartbeatDisabled => write!(f, "heartbeat disabled"),
            OverrideAction::PassThroughDisabled { side } => {
                write!(f, "{side}_arm end-effector pass-through disabled")
            }
            OverrideAction::HandDisabled { side } => write!(f, "{side}_hand disabled"),
            OverrideAction::HandReplaced { side, from, to } => {
                write!(f, "{side}_hand replaced: {from} -> {to}")
            }
            OverrideAction::HandMismatchKept {
                side,
                configured,
                detected,
            } => write!(
                f,
                "{side}_hand kept as {configured} although {detected} was detected"
            ),
            OverrideAction::HandInjected { side, kind } => {
                write!(f, "{side}_hand added as {kind}")
            }
        }
    }
}

/// Actions taken by one [`apply_runtime_overrides`] call, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideReport {
    pub actions: Vec<OverrideAction>,
}

impl OverrideReport {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn has_mismatch(&self) -> bool {
        self.actions
            .iter()
            .any(|action| matches!(action, OverrideAction::HandMismatchKept { .. }))
    }
}

/// Hand type a configured hand component corresponds to
pub fn hand_type_of(kind: ComponentKind) -> Option<HandType> {
    match kind {
        ComponentKind::DexSGripper | ComponentKind::DexDGripper => Some(HandType::DexGripper),
        ComponentKind::F5d6HandV1 => Some(HandType::HandF5d6V1),
        ComponentKind::F5d6HandV2 => Some(HandType::HandF5d6V2),
        _ => None,
    }
}

/// Component to build for a detected hand type; `None` for `Unknown`
pub fn hand_component_for(hand_type: HandType, side: Side) -> Option<ComponentConfig> {
    match hand_type {
        HandType::DexGripper => Some(ComponentConfig::dex_d_gripper(side)),
        HandType::HandF5d6V1 => Some(ComponentConfig::f5d6_hand_v1(side)),
        HandType::HandF5d6V2 => Some(ComponentConfig::f5d6_hand_v2(side)),
        HandType::Unknown => None,
    }
}

/// Apply runtime overrides to `config`
///
/// Sides are processed left then right; sides missing from `hand_types` are
/// left alone. Applying the same inputs twice leaves the configuration
/// unchanged the second time.
pub fn apply_runtime_overrides(
    config: &mut RobotConfig,
    hand_types: &HashMap<Side, HandType>,
    options: &OverrideOptions,
) -> Result<OverrideReport, OverrideError> {
    let mut report = OverrideReport::default();

    if options.disable_estop {
        if let Some(estop) = config.components.get_mut("estop") {
            estop.set_enabled(false);
            warn!("EStop checking is disabled");
            report.actions.push(OverrideAction::EstopDisabled);
        }
    }

    if options.disable_heartbeat {
        if let Some(heartbeat) = config.components.get_mut("heartbeat") {
            heartbeat.set_enabled(false);
            warn!("Heartbeat is disabled");
            report.actions.push(OverrideAction::HeartbeatDisabled);
        }
    }

    for side in Side::ALL {
        let Some(&detected) = hand_types.get(&side) else {
            continue;
        };

        if !detected.is_unknown() {
            if let Some(ComponentConfig::Arm(arm)) = config.components.get_mut(&arm_key(side)) {
                if arm.enable_ee_pass_through {
                    arm.enable_ee_pass_through = false;
                    warn!("Disabling {}_arm end-effector pass-through, {} detected", side, detected);
                    report.actions.push(OverrideAction::PassThroughDisabled { side });
                }
            }
        }

        reconcile_hand(config, side, detected, options, &mut report)?;
    }

    Ok(report)
}

fn reconcile_hand(
    config: &mut RobotConfig,
    side: Side,
    detected: HandType,
    options: &OverrideOptions,
    report: &mut OverrideReport,
) -> Result<(), OverrideError> {
    let key = hand_key(side);

    if !config.components.contains_key(&key) {
        if let Some(hand) = hand_component_for(detected, side) {
            warn!(
                "Auto-adding {} config ({}) based on runtime detection",
                key, detected
            );
            report.actions.push(OverrideAction::HandInjected {
                side,
                kind: hand.kind(),
            });
            config.components.insert(key, hand);
        }
        return Ok(());
    }
    let Some(current) = config.components.get_mut(&key) else {
        return Ok(());
    };

    if detected.is_unknown() {
        if current.is_enabled() {
            current.set_enabled(false);
            warn!(
                "Disabling {}: can not detect known end-effector from robot-controller",
                key
            );
            report.actions.push(OverrideAction::HandDisabled { side });
        }
        return Ok(());
    }

    let kind = current.kind();
    let configured = hand_type_of(kind).ok_or_else(|| OverrideError::NotAHand {
        key: key.clone(),
        kind,
    })?;
    if configured == detected {
        return Ok(());
    }

    if !options.allow_hand_override {
        warn!(
            "Detected {} type is {}, but the input config is {}",
            key, detected, configured
        );
        report.actions.push(OverrideAction::HandMismatchKept {
            side,
            configured,
            detected,
        });
        return Ok(());
    }

    if let Some(replacement) = hand_component_for(detected, side) {
        warn!(
            "Override {} config to {} based on detected hand type {}",
            key,
            replacement.kind(),
            detected
        );
        report.actions.push(OverrideAction::HandReplaced {
            side,
            from: kind,
            to: replacement.kind(),
        });
        *current = replacement;
    }
    Ok(())
}
