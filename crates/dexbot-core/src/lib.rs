//! Dexbot Core - Robot configuration registry and URDF joint metadata
//!
//! This crate describes the Dexmate robot variants:
//! - Component model for arms, hands, torso, chassis, head and sensors
//! - Variant registry and resolution from names or robot serials
//! - Runtime hand overrides driven by live hand detection
//! - URDF joint/link extraction with a small parser cache
//! - `RobotInfo`, a single entry point over config and URDF

pub mod component;
pub mod hand;
pub mod modifier;
pub mod registry;
pub mod resolver;
pub mod robot;
pub mod robot_info;
pub mod settings;
pub mod urdf;
pub mod validators;
pub mod variants;

pub use component::{ComponentConfig, ComponentKind, PosePool, Side, Transport};
pub use hand::HandType;
pub use modifier::{
    apply_runtime_overrides, OverrideAction, OverrideError, OverrideOptions, OverrideReport,
};
pub use registry::{ConfigRegistry, RegistryError};
pub use resolver::{AbbreviationTable, EnvSource, ProcessEnv, ResolveError, VariantResolver};
pub use robot::RobotConfig;
pub use robot_info::{RobotInfo, RobotInfoBuilder, RobotInfoError};
pub use settings::{load_settings, Settings, SettingsError};
pub use urdf::{JointInfo, JointLimit, JointType, UrdfCache, UrdfError, UrdfParser};
pub use validators::ComponentValidationError;
