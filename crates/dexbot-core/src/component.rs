//! Component configuration records
//!
//! Every component of a robot (arm, hand, torso, chassis, sensors, ...) is
//! one variant of [`ComponentConfig`]. Topic and service names derived from a
//! component's side are computed on demand so they stay consistent with it.
//!
//! Robot components default to enabled, sensors default to disabled.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Named joint-position presets
pub type PosePool = BTreeMap<String, Vec<f64>>;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid side '{0}', expected 'left' or 'right'")]
pub struct ParseSideError(pub String);

/// Which side of the robot a component sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Default for Side {
    fn default() -> Self {
        Side::Left
    }
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// Prefix used in joint names (`L_arm_j1`, `R_th_j0`)
    pub fn joint_prefix(&self) -> &'static str {
        match self {
            Side::Left => "L",
            Side::Right => "R",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}

/// Camera stream transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Reliable, JPEG compressed
    #[default]
    Zenoh,
    /// Low latency, hardware accelerated video
    Rtc,
}

fn sided_joints(side: Side, suffixes: &[&str]) -> Vec<String> {
    suffixes
        .iter()
        .map(|suffix| format!("{}_{}", side.joint_prefix(), suffix))
        .collect()
}

fn pose_pool_from<const N: usize>(entries: &[(&str, [f64; N])]) -> PosePool {
    entries
        .iter()
        .map(|(name, values)| (name.to_string(), values.to_vec()))
        .collect()
}

const ARM_JOINT_SUFFIXES: [&str; 7] = [
    "arm_j1", "arm_j2", "arm_j3", "arm_j4", "arm_j5", "arm_j6", "arm_j7",
];

/// Left-arm presets; the right arm mirrors them
const ARM_POSES: [(&str, [f64; 7]); 5] = [
    ("folded", [1.57079, 0.0, 0.0, -3.1, 0.0, 0.0, -0.69813]),
    ("folded_closed_hand", [1.57079, 0.0, 0.0, -3.1, 0.0, 0.0, -0.9]),
    ("L_shape", [0.064, 0.3, 0.0, -1.556, 1.271, 0.0, 0.0]),
    ("lift_up", [0.064, 0.3, 0.0, -2.756, 1.271, 0.0, 0.0]),
    ("zero", [-1.57079, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
];

/// Seven-joint arm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmConfig {
    pub enabled: bool,
    pub side: Side,
    /// Position-velocity control mode
    pub pv_mode: bool,
    pub default_control_hz: u32,
    /// End-effector pass-through mode on by default
    pub enable_ee_pass_through: bool,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            side: Side::Left,
            pv_mode: false,
            default_control_hz: 100,
            enable_ee_pass_through: true,
        }
    }
}

impl ArmConfig {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            ..Self::default()
        }
    }

    pub fn joints(&self) -> Vec<String> {
        sided_joints(self.side, &ARM_JOINT_SUFFIXES)
    }

    /// Predefined poses; right-arm values negate every joint except the elbow
    pub fn pose_pool(&self) -> PosePool {
        ARM_POSES
            .iter()
            .map(|(name, values)| {
                let values = match self.side {
                    Side::Left => values.to_vec(),
                    Side::Right => values
                        .iter()
                        .enumerate()
                        .map(|(i, v)| if i == 3 { *v } else { -v })
                        .collect(),
                };
                (name.to_string(), values)
            })
            .collect()
    }

    pub fn state_sub_topic(&self) -> String {
        format!("state/arm/{}", self.side)
    }

    pub fn wrench_sub_topic(&self) -> String {
        format!("state/wrench/{}", self.side)
    }

    pub fn wrist_button_sub_topic(&self) -> String {
        format!("state/wrist_button/{}", self.side)
    }

    pub fn control_pub_topic(&self) -> String {
        format!("control/arm/{}", self.side)
    }

    pub fn set_mode_query(&self) -> String {
        format!("mode/arm/{}", self.side)
    }

    pub fn pid_query(&self) -> String {
        format!("system/arm_pid/{}", self.side)
    }

    pub fn brake_query(&self) -> String {
        format!("system/arm_brake/{}", self.side)
    }

    pub fn ee_baud_rate_query(&self) -> String {
        format!("system/ee_baud_rate/{}", self.side)
    }

    pub fn force_torque_sensor_query(&self) -> String {
        format!("mode/force_torque_sensor/{}", self.side)
    }

    pub fn ee_pass_through_pub_topic(&self) -> String {
        format!("control/ee_pass_through/{}", self.side)
    }

    pub fn ee_pass_through_state_sub_topic(&self) -> String {
        format!("state/ee_pass_through/{}", self.side)
    }
}

const F5D6_JOINT_SUFFIXES: [&str; 6] = ["th_j1", "ff_j1", "mf_j1", "rf_j1", "lf_j1", "th_j0"];

fn f5d6_pose_pool() -> PosePool {
    pose_pool_from(&[
        ("open", [0.1834, 0.2891, 0.2801, 0.284, 0.2811, -0.0158]),
        ("close", [-0.1, -1.0946, -1.0844, -1.0154, -1.0118, 0.84]),
    ])
}

/// Five-finger, six-DOF hand (both V1 and V2 share this record)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandConfig {
    pub enabled: bool,
    pub side: Side,
    pub pv_mode: bool,
    pub pose_pool: PosePool,
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            side: Side::Left,
            pv_mode: false,
            pose_pool: f5d6_pose_pool(),
        }
    }
}

impl HandConfig {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            ..Self::default()
        }
    }

    pub fn joints(&self) -> Vec<String> {
        sided_joints(self.side, &F5D6_JOINT_SUFFIXES)
    }

    pub fn state_sub_topic(&self) -> String {
        format!("state/hand/{}", self.side)
    }

    pub fn control_pub_topic(&self) -> String {
        format!("control/hand/{}", self.side)
    }

    /// Only published by V2 hands
    pub fn touch_sensor_sub_topic(&self) -> String {
        format!("state/hand/{}/touch", self.side)
    }
}

fn gripper_pose_pool() -> PosePool {
    pose_pool_from(&[("open", [0.7854]), ("close", [0.0])])
}

/// Single-joint gripper (single and double grippers share the interface)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GripperConfig {
    pub enabled: bool,
    pub side: Side,
    pub pv_mode: bool,
    pub pose_pool: PosePool,
}

impl Default for GripperConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            side: Side::Left,
            pv_mode: false,
            pose_pool: gripper_pose_pool(),
        }
    }
}

impl GripperConfig {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            ..Self::default()
        }
    }

    pub fn joints(&self) -> Vec<String> {
        sided_joints(self.side, &["gripper_j1"])
    }

    pub fn state_sub_topic(&self) -> String {
        format!("state/gripper/{}", self.side)
    }

    pub fn control_pub_topic(&self) -> String {
        format!("control/gripper/{}", self.side)
    }
}

/// Two-wheel steered mobile base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChassisConfig {
    pub enabled: bool,
    pub pv_mode: bool,
    /// m/s
    pub max_linear_vel: f64,
    /// rad
    pub max_steering_angle: f64,
    /// Base center to wheel axis, m
    pub center_to_wheel_axis_dist: f64,
    /// Distance between the two wheels, m
    pub wheels_dist: f64,
    pub steer_joints: Vec<String>,
    pub drive_joints: Vec<String>,
    pub steer_control_pub_topic: String,
    pub steer_state_sub_topic: String,
    pub drive_control_pub_topic: String,
    pub drive_state_sub_topic: String,
}

impl Default for ChassisConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pv_mode: false,
            max_linear_vel: 0.8,
            max_steering_angle: 2.35,
            center_to_wheel_axis_dist: 0.219,
            wheels_dist: 0.45,
            steer_joints: vec!["L_wheel_j1".to_string(), "R_wheel_j1".to_string()],
            drive_joints: vec!["L_wheel_j2".to_string(), "R_wheel_j2".to_string()],
            steer_control_pub_topic: "control/chassis/steer".to_string(),
            steer_state_sub_topic: "state/chassis/steer".to_string(),
            drive_control_pub_topic: "control/chassis/drive".to_string(),
            drive_state_sub_topic: "state/chassis/drive".to_string(),
        }
    }
}

impl ChassisConfig {
    /// Steer joints followed by drive joints
    pub fn joints(&self) -> Vec<String> {
        self.steer_joints
            .iter()
            .chain(self.drive_joints.iter())
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorsoConfig {
    pub enabled: bool,
    pub pv_mode: bool,
    pub joints: Vec<String>,
    pub state_sub_topic: String,
    pub control_pub_topic: String,
    pub pose_pool: PosePool,
}

impl Default for TorsoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pv_mode: true,
            joints: vec![
                "torso_j1".to_string(),
                "torso_j2".to_string(),
                "torso_j3".to_string(),
            ],
            state_sub_topic: "state/torso".to_string(),
            control_pub_topic: "control/torso".to_string(),
            pose_pool: pose_pool_from(&[
                ("home", [0.0, 0.0, 0.0]),
                ("folded", [0.0, 0.0, -1.5708]),
                ("crouch20_low", [0.0, 0.0, -0.35]),
                ("crouch20_medium", [0.52, 1.05, 0.18]),
                ("crouch20_high", [0.78, 1.57, 0.44]),
                ("crouch45_low", [0.0, 0.0, -0.79]),
                ("crouch45_medium", [0.52, 1.05, -0.26]),
                ("crouch45_high", [0.78, 1.57, 0.0]),
                ("crouch90_low", [0.0, 0.0, -1.57]),
                ("crouch90_medium", [0.52, 1.05, -1.04]),
                ("crouch90_high", [0.78, 1.57, -0.78]),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadConfig {
    pub enabled: bool,
    pub pv_mode: bool,
    pub state_sub_topic: String,
    pub control_pub_topic: String,
    pub set_mode_query: String,
    pub pose_pool: PosePool,
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pv_mode: true,
            state_sub_topic: "state/head".to_string(),
            control_pub_topic: "control/head".to_string(),
            set_mode_query: "mode/head".to_string(),
            pose_pool: pose_pool_from(&[
                ("home", [0.0, 0.0, 0.0]),
                ("tucked", [0.0, 0.0, -1.37]),
            ]),
        }
    }
}

impl HeadConfig {
    pub fn joints(&self) -> Vec<String> {
        vec![
            "head_j1".to_string(),
            "head_j2".to_string(),
            "head_j3".to_string(),
        ]
    }
}

/// Battery management system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryConfig {
    pub enabled: bool,
    pub state_sub_topic: String,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            state_sub_topic: "state/bms".to_string(),
        }
    }
}

/// Emergency stop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EStopConfig {
    pub enabled: bool,
    pub state_sub_topic: String,
    pub estop_query_name: String,
}

impl Default for EStopConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            state_sub_topic: "state/estop".to_string(),
            estop_query_name: "system/estop".to_string(),
        }
    }
}

/// Controller heartbeat monitoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartbeatConfig {
    pub enabled: bool,
    pub heartbeat_topic: String,
    pub timeout_seconds: f64,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            heartbeat_topic: "heartbeat".to_string(),
            timeout_seconds: 1.0,
        }
    }
}

/// Component with nothing but an enabled flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericConfig {
    pub enabled: bool,
}

impl Default for GenericConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Single camera stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub enabled: bool,
    pub name: String,
    pub transport: Transport,
    pub topic: String,
    /// Channel used when `transport` is RTC
    pub rtc_channel: String,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            name: "usb_camera".to_string(),
            transport: Transport::Zenoh,
            topic: "sensors/camera/rgb".to_string(),
            rtc_channel: "sensors/camera/rgb_rtc".to_string(),
        }
    }
}

/// ZED stereo camera with left/right RGB and depth streams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZedXCameraConfig {
    pub enabled: bool,
    pub name: String,
    /// Transport for the RGB streams; depth always goes over Zenoh
    pub transport: Transport,
    pub enable_rgb: bool,
    pub enable_depth: bool,
}

impl Default for ZedXCameraConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            name: "head_camera".to_string(),
            transport: Transport::Zenoh,
            enable_rgb: true,
            enable_depth: true,
        }
    }
}

impl ZedXCameraConfig {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    fn rgb_stream(&self, stream: &str) -> CameraConfig {
        CameraConfig {
            enabled: self.enabled && self.enable_rgb,
            name: stream.to_string(),
            transport: self.transport,
            topic: format!("sensors/{}/{}", self.name, stream),
            rtc_channel: format!("sensors/{}/{}_rtc", self.name, stream),
        }
    }

    pub fn left_rgb(&self) -> CameraConfig {
        self.rgb_stream("left_rgb")
    }

    pub fn right_rgb(&self) -> CameraConfig {
        self.rgb_stream("right_rgb")
    }

    pub fn depth(&self) -> CameraConfig {
        CameraConfig {
            enabled: self.enabled && self.enable_depth,
            name: "depth".to_string(),
            transport: self.transport,
            topic: format!("sensors/{}/depth", self.name),
            ..CameraConfig::default()
        }
    }
}

/// Monocular ZED X One camera mounted on a wrist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZedXOneCameraConfig {
    pub enabled: bool,
    pub name: String,
    pub transport: Transport,
    pub side: Side,
}

impl Default for ZedXOneCameraConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            name: "wrist_camera".to_string(),
            transport: Transport::Zenoh,
            side: Side::Left,
        }
    }
}

impl ZedXOneCameraConfig {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            ..Self::default()
        }
    }

    pub fn rgb(&self) -> CameraConfig {
        CameraConfig {
            enabled: self.enabled,
            name: "rgb".to_string(),
            transport: self.transport,
            topic: format!("sensors/{}_{}/rgb", self.side, self.name),
            rtc_channel: format!("sensors/{}/rgb_rtc", self.name),
        }
    }
}

/// Sensor publishing on a single topic (IMU, lidar, ultrasonic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicSensorConfig {
    pub enabled: bool,
    pub name: String,
    pub topic: String,
}

impl TopicSensorConfig {
    fn with(name: &str, topic: String) -> Self {
        Self {
            enabled: false,
            name: name.to_string(),
            topic,
        }
    }

    pub fn chassis_imu(name: &str) -> Self {
        Self::with(name, "state/chassis_imu".to_string())
    }

    /// IMU embedded in a ZED camera
    pub fn zed_imu(name: &str) -> Self {
        Self::with(name, format!("sensors/{name}/imu"))
    }

    pub fn lidar_3d(name: &str) -> Self {
        Self::with(name, "sensors/lidar_3d/points".to_string())
    }

    pub fn rplidar(name: &str) -> Self {
        Self::with(name, "sensors/lidar_front/scan".to_string())
    }

    pub fn ultrasonic(name: &str) -> Self {
        Self::with(name, "state/ultrasonic".to_string())
    }
}

/// Kind tag of a [`ComponentConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Arm,
    F5d6HandV1,
    F5d6HandV2,
    DexSGripper,
    DexDGripper,
    Chassis,
    Torso,
    Head,
    Battery,
    EStop,
    Heartbeat,
    Generic,
    Camera,
    ZedXCamera,
    ZedXOneCamera,
    Imu,
    Lidar3d,
    RpLidar,
    Ultrasonic,
}

impl ComponentKind {
    /// Same string as the serialized `kind` tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Arm => "arm",
            ComponentKind::F5d6HandV1 => "f5d6_hand_v1",
            ComponentKind::F5d6HandV2 => "f5d6_hand_v2",
            ComponentKind::DexSGripper => "dex_s_gripper",
            ComponentKind::DexDGripper => "dex_d_gripper",
            ComponentKind::Chassis => "chassis",
            ComponentKind::Torso => "torso",
            ComponentKind::Head => "head",
            ComponentKind::Battery => "battery",
            ComponentKind::EStop => "estop",
            ComponentKind::Heartbeat => "heartbeat",
            ComponentKind::Generic => "generic",
            ComponentKind::Camera => "camera",
            ComponentKind::ZedXCamera => "zed_x_camera",
            ComponentKind::ZedXOneCamera => "zed_x_one_camera",
            ComponentKind::Imu => "imu",
            ComponentKind::Lidar3d => "lidar_3d",
            ComponentKind::RpLidar => "rplidar",
            ComponentKind::Ultrasonic => "ultrasonic",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One robot component or sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ComponentConfig {
    #[serde(rename = "arm")]
    Arm(ArmConfig),
    #[serde(rename = "f5d6_hand_v1")]
    F5d6HandV1(HandConfig),
    /// F5D6 hand with touch sensors
    #[serde(rename = "f5d6_hand_v2")]
    F5d6HandV2(HandConfig),
    #[serde(rename = "dex_s_gripper")]
    DexSGripper(GripperConfig),
    #[serde(rename = "dex_d_gripper")]
    DexDGripper(GripperConfig),
    #[serde(rename = "chassis")]
    Chassis(ChassisConfig),
    #[serde(rename = "torso")]
    Torso(TorsoConfig),
    #[serde(rename = "head")]
    Head(HeadConfig),
    #[serde(rename = "battery")]
    Battery(BatteryConfig),
    #[serde(rename = "estop")]
    EStop(EStopConfig),
    #[serde(rename = "heartbeat")]
    Heartbeat(HeartbeatConfig),
    #[serde(rename = "generic")]
    Generic(GenericConfig),
    #[serde(rename = "camera")]
    Camera(CameraConfig),
    #[serde(rename = "zed_x_camera")]
    ZedXCamera(ZedXCameraConfig),
    #[serde(rename = "zed_x_one_camera")]
    ZedXOneCamera(ZedXOneCameraConfig),
    #[serde(rename = "imu")]
    Imu(TopicSensorConfig),
    #[serde(rename = "lidar_3d")]
    Lidar3d(TopicSensorConfig),
    #[serde(rename = "rplidar")]
    RpLidar(TopicSensorConfig),
    #[serde(rename = "ultrasonic")]
    Ultrasonic(TopicSensorConfig),
}

impl ComponentConfig {
    pub fn arm(side: Side) -> Self {
        ComponentConfig::Arm(ArmConfig::new(side))
    }

    pub fn f5d6_hand_v1(side: Side) -> Self {
        ComponentConfig::F5d6HandV1(HandConfig::new(side))
    }

    pub fn f5d6_hand_v2(side: Side) -> Self {
        ComponentConfig::F5d6HandV2(HandConfig::new(side))
    }

    pub fn dex_s_gripper(side: Side) -> Self {
        ComponentConfig::DexSGripper(GripperConfig::new(side))
    }

    pub fn dex_d_gripper(side: Side) -> Self {
        ComponentConfig::DexDGripper(GripperConfig::new(side))
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentConfig::Arm(_) => ComponentKind::Arm,
            ComponentConfig::F5d6HandV1(_) => ComponentKind::F5d6HandV1,
            ComponentConfig::F5d6HandV2(_) => ComponentKind::F5d6HandV2,
            ComponentConfig::DexSGripper(_) => ComponentKind::DexSGripper,
            ComponentConfig::DexDGripper(_) => ComponentKind::DexDGripper,
            ComponentConfig::Chassis(_) => ComponentKind::Chassis,
            ComponentConfig::Torso(_) => ComponentKind::Torso,
            ComponentConfig::Head(_) => ComponentKind::Head,
            ComponentConfig::Battery(_) => ComponentKind::Battery,
            ComponentConfig::EStop(_) => ComponentKind::EStop,
            ComponentConfig::Heartbeat(_) => ComponentKind::Heartbeat,
            ComponentConfig::Generic(_) => ComponentKind::Generic,
            ComponentConfig::Camera(_) => ComponentKind::Camera,
            ComponentConfig::ZedXCamera(_) => ComponentKind::ZedXCamera,
            ComponentConfig::ZedXOneCamera(_) => ComponentKind::ZedXOneCamera,
            ComponentConfig::Imu(_) => ComponentKind::Imu,
            ComponentConfig::Lidar3d(_) => ComponentKind::Lidar3d,
            ComponentConfig::RpLidar(_) => ComponentKind::RpLidar,
            ComponentConfig::Ultrasonic(_) => ComponentKind::Ultrasonic,
        }
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            ComponentConfig::Arm(c) => c.enabled,
            ComponentConfig::F5d6HandV1(c) | ComponentConfig::F5d6HandV2(c) => c.enabled,
            ComponentConfig::DexSGripper(c) | ComponentConfig::DexDGripper(c) => c.enabled,
            ComponentConfig::Chassis(c) => c.enabled,
            ComponentConfig::Torso(c) => c.enabled,
            ComponentConfig::Head(c) => c.enabled,
            ComponentConfig::Battery(c) => c.enabled,
            ComponentConfig::EStop(c) => c.enabled,
            ComponentConfig::Heartbeat(c) => c.enabled,
            ComponentConfig::Generic(c) => c.enabled,
            ComponentConfig::Camera(c) => c.enabled,
            ComponentConfig::ZedXCamera(c) => c.enabled,
            ComponentConfig::ZedXOneCamera(c) => c.enabled,
            ComponentConfig::Imu(c)
            | ComponentConfig::Lidar3d(c)
            | ComponentConfig::RpLidar(c)
            | ComponentConfig::Ultrasonic(c) => c.enabled,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        let flag = match self {
            ComponentConfig::Arm(c) => &mut c.enabled,
            ComponentConfig::F5d6HandV1(c) | ComponentConfig::F5d6HandV2(c) => &mut c.enabled,
            ComponentConfig::DexSGripper(c) | ComponentConfig::DexDGripper(c) => &mut c.enabled,
            ComponentConfig::Chassis(c) => &mut c.enabled,
            ComponentConfig::Torso(c) => &mut c.enabled,
            ComponentConfig::Head(c) => &mut c.enabled,
            ComponentConfig::Battery(c) => &mut c.enabled,
            ComponentConfig::EStop(c) => &mut c.enabled,
            ComponentConfig::Heartbeat(c) => &mut c.enabled,
            ComponentConfig::Generic(c) => &mut c.enabled,
            ComponentConfig::Camera(c) => &mut c.enabled,
            ComponentConfig::ZedXCamera(c) => &mut c.enabled,
            ComponentConfig::ZedXOneCamera(c) => &mut c.enabled,
            ComponentConfig::Imu(c)
            | ComponentConfig::Lidar3d(c)
            | ComponentConfig::RpLidar(c)
            | ComponentConfig::Ultrasonic(c) => &mut c.enabled,
        };
        *flag = enabled;
    }

    pub fn side(&self) -> Option<Side> {
        match self {
            ComponentConfig::Arm(c) => Some(c.side),
            ComponentConfig::F5d6HandV1(c) | ComponentConfig::F5d6HandV2(c) => Some(c.side),
            ComponentConfig::DexSGripper(c) | ComponentConfig::DexDGripper(c) => Some(c.side),
            ComponentConfig::ZedXOneCamera(c) => Some(c.side),
            _ => None,
        }
    }

    /// `None` for kinds without a position-velocity mode
    pub fn pv_mode(&self) -> Option<bool> {
        match self {
            ComponentConfig::Arm(c) => Some(c.pv_mode),
            ComponentConfig::F5d6HandV1(c) | ComponentConfig::F5d6HandV2(c) => Some(c.pv_mode),
            ComponentConfig::DexSGripper(c) | ComponentConfig::DexDGripper(c) => Some(c.pv_mode),
            ComponentConfig::Chassis(c) => Some(c.pv_mode),
            ComponentConfig::Torso(c) => Some(c.pv_mode),
            ComponentConfig::Head(c) => Some(c.pv_mode),
            _ => None,
        }
    }

    /// Joint names for joint-bearing kinds, `None` for everything else
    pub fn joints(&self) -> Option<Vec<String>> {
        match self {
            ComponentConfig::Arm(c) => Some(c.joints()),
            ComponentConfig::F5d6HandV1(c) | ComponentConfig::F5d6HandV2(c) => Some(c.joints()),
            ComponentConfig::DexSGripper(c) | ComponentConfig::DexDGripper(c) => Some(c.joints()),
            ComponentConfig::Chassis(c) => Some(c.joints()),
            ComponentConfig::Torso(c) => Some(c.joints.clone()),
            ComponentConfig::Head(c) => Some(c.joints()),
            _ => None,
        }
    }

    pub fn pose_pool(&self) -> Option<PosePool> {
        match self {
            ComponentConfig::Arm(c) => Some(c.pose_pool()),
            ComponentConfig::F5d6HandV1(c) | ComponentConfig::F5d6HandV2(c) => {
                Some(c.pose_pool.clone())
            }
            ComponentConfig::DexSGripper(c) | ComponentConfig::DexDGripper(c) => {
                Some(c.pose_pool.clone())
            }
            ComponentConfig::Torso(c) => Some(c.pose_pool.clone()),
            ComponentConfig::Head(c) => Some(c.pose_pool.clone()),
            _ => None,
        }
    }

    pub fn touch_sensor_sub_topic(&self) -> Option<String> {
        match self {
            ComponentConfig::F5d6HandV2(c) => Some(c.touch_sensor_sub_topic()),
            _ => None,
        }
    }

    /// Stored and derived fields by name, including the `kind` tag
    pub fn parameters(&self) -> Map<String, Value> {
        let mut params = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        if let Some(joints) = self.joints() {
            params.insert("joints".to_string(), json!(joints));
        }
        for (name, value) in self.derived_parameters() {
            params.insert(name.to_string(), value);
        }
        params
    }

    pub fn parameter(&self, name: &str) -> Option<Value> {
        self.parameters().remove(name)
    }

    fn derived_parameters(&self) -> Vec<(&'static str, Value)> {
        match self {
            ComponentConfig::Arm(c) => vec![
                ("pose_pool", json!(c.pose_pool())),
                ("state_sub_topic", json!(c.state_sub_topic())),
                ("wrench_sub_topic", json!(c.wrench_sub_topic())),
                ("wrist_button_sub_topic", json!(c.wrist_button_sub_topic())),
                ("control_pub_topic", json!(c.control_pub_topic())),
                ("set_mode_query", json!(c.set_mode_query())),
                ("pid_query", json!(c.pid_query())),
                ("brake_query", json!(c.brake_query())),
                ("ee_baud_rate_query", json!(c.ee_baud_rate_query())),
                ("force_torque_sensor_query", json!(c.force_torque_sensor_query())),
                ("ee_pass_through_pub_topic", json!(c.ee_pass_through_pub_topic())),
                (
                    "ee_pass_through_state_sub_topic",
                    json!(c.ee_pass_through_state_sub_topic()),
                ),
            ],
            ComponentConfig::F5d6HandV1(c) => vec![
                ("state_sub_topic", json!(c.state_sub_topic())),
                ("control_pub_topic", json!(c.control_pub_topic())),
            ],
            ComponentConfig::F5d6HandV2(c) => vec![
                ("state_sub_topic", json!(c.state_sub_topic())),
                ("control_pub_topic", json!(c.control_pub_topic())),
                ("touch_sensor_sub_topic", json!(c.touch_sensor_sub_topic())),
            ],
            ComponentConfig::DexSGripper(c) | ComponentConfig::DexDGripper(c) => vec![
                ("state_sub_topic", json!(c.state_sub_topic())),
                ("control_pub_topic", json!(c.control_pub_topic())),
            ],
            ComponentConfig::ZedXCamera(c) => vec![
                ("left_rgb", json!(c.left_rgb())),
                ("right_rgb", json!(c.right_rgb())),
                ("depth", json!(c.depth())),
            ],
            ComponentConfig::ZedXOneCamera(c) => vec![("rgb", json!(c.rgb()))],
            _ => Vec::new(),
        }
    }
}
