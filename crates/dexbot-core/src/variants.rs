//! Shipped Vega robot variants
//!
//! Each family (`vega_1`, `vega_1p`, `vega_1u`) comes as a base without
//! hands, an `_f5d6` variant with five-finger hands and a `_gripper`
//! variant with grippers and wrist cameras.

use crate::component::{
    BatteryConfig, ChassisConfig, ComponentConfig, EStopConfig, HeadConfig, HeartbeatConfig,
    Side, TopicSensorConfig, TorsoConfig, ZedXCameraConfig, ZedXOneCameraConfig,
};
use crate::registry::ConfigRegistry;
use crate::robot::{arm_key, hand_key, RobotConfig};

const VEGA_ABBR: &str = "vg";

const QUERABLES: [(&str, &str); 7] = [
    ("version_info", "info/versions"),
    ("status_info", "info/status"),
    ("hand_info", "info/hand_type"),
    ("reboot", "system/reboot"),
    ("clear_error", "system/clear_error"),
    ("soc_ntp", "time/soc"),
    ("chassis_led", "system/led"),
];

#[derive(Clone, Copy)]
enum Hands {
    None,
    F5d6V1,
    F5d6V2,
    Gripper,
}

impl Hands {
    fn build(self, side: Side) -> Option<ComponentConfig> {
        match self {
            Hands::None => None,
            Hands::F5d6V1 => Some(ComponentConfig::f5d6_hand_v1(side)),
            Hands::F5d6V2 => Some(ComponentConfig::f5d6_hand_v2(side)),
            Hands::Gripper => Some(ComponentConfig::dex_d_gripper(side)),
        }
    }
}

fn urdf_path(model: &str, variant: &str) -> String {
    format!("robots/humanoid/{model}/{variant}.urdf")
}

/// Arms, hands, head and the safety components every Vega carries
fn upper_body(model: &str, variant: &str, hands: Hands) -> RobotConfig {
    let mut config = RobotConfig::new(model, VEGA_ABBR, &urdf_path(model, variant));
    for side in Side::ALL {
        config
            .components
            .insert(arm_key(side), ComponentConfig::arm(side));
        if let Some(hand) = hands.build(side) {
            config.components.insert(hand_key(side), hand);
        }
    }
    for (name, path) in QUERABLES {
        config.querables.insert(name.to_string(), path.to_string());
    }
    config
        .with_component("head", ComponentConfig::Head(HeadConfig::default()))
        .with_component("estop", ComponentConfig::EStop(EStopConfig::default()))
        .with_component(
            "heartbeat",
            ComponentConfig::Heartbeat(HeartbeatConfig::default()),
        )
        .with_sensor(
            "head_camera",
            ComponentConfig::ZedXCamera(ZedXCameraConfig::named("head_camera")),
        )
}

fn with_wrist_cameras(mut config: RobotConfig, hands: Hands) -> RobotConfig {
    if matches!(hands, Hands::Gripper) {
        for side in Side::ALL {
            config.sensors.insert(
                format!("{side}_wrist_camera"),
                ComponentConfig::ZedXOneCamera(ZedXOneCameraConfig::new(side)),
            );
        }
    }
    config
}

/// Full-body robot: upper body plus torso, chassis, battery and base sensors
fn full_body(model: &str, variant: &str, hands: Hands) -> RobotConfig {
    let config = upper_body(model, variant, hands)
        .with_component("torso", ComponentConfig::Torso(TorsoConfig::default()))
        .with_component("chassis", ComponentConfig::Chassis(ChassisConfig::default()))
        .with_component("battery", ComponentConfig::Battery(BatteryConfig::default()))
        .with_sensor(
            "chassis_imu",
            ComponentConfig::Imu(TopicSensorConfig::chassis_imu("chassis_imu")),
        )
        .with_sensor(
            "head_imu",
            ComponentConfig::Imu(TopicSensorConfig::zed_imu("head_imu")),
        )
        .with_sensor(
            "ultrasonic",
            ComponentConfig::Ultrasonic(TopicSensorConfig::ultrasonic("ultrasonic")),
        );
    with_wrist_cameras(config, hands)
}

/// Original Vega-1: planar front lidar, V1 hands
fn vega_1(hands: Hands) -> RobotConfig {
    let variant = variant_name("vega_1", hands);
    full_body("vega_1", &variant, hands).with_sensor(
        "front_lidar",
        ComponentConfig::RpLidar(TopicSensorConfig::rplidar("rplidar_front")),
    )
}

/// Vega-1 Pro: 3D front lidar, V2 hands
fn vega_1p(hands: Hands) -> RobotConfig {
    let variant = variant_name("vega_1p", hands);
    full_body("vega_1p", &variant, hands).with_sensor(
        "front_lidar_3d",
        ComponentConfig::Lidar3d(TopicSensorConfig::lidar_3d("lidar_3d_front")),
    )
}

/// Vega-1 upper body: no torso, chassis or battery
fn vega_1u(hands: Hands) -> RobotConfig {
    let variant = variant_name("vega_1u", hands);
    with_wrist_cameras(upper_body("vega_1u", &variant, hands), hands)
}

fn variant_name(model: &str, hands: Hands) -> String {
    match hands {
        Hands::None => model.to_string(),
        Hands::F5d6V1 | Hands::F5d6V2 => format!("{model}_f5d6"),
        Hands::Gripper => format!("{model}_gripper"),
    }
}

/// Register every shipped variant
pub fn register_builtin(registry: &mut ConfigRegistry) {
    registry.register("vega_1", || vega_1(Hands::None));
    registry.register("vega_1_f5d6", || vega_1(Hands::F5d6V1));
    registry.register("vega_1_gripper", || vega_1(Hands::Gripper));
    registry.register("vega_1p", || vega_1p(Hands::None));
    registry.register("vega_1p_f5d6", || vega_1p(Hands::F5d6V2));
    registry.register("vega_1p_gripper", || vega_1p(Hands::Gripper));
    registry.register("vega_1u", || vega_1u(Hands::None));
    registry.register("vega_1u_f5d6", || vega_1u(Hands::F5d6V2));
    registry.register("vega_1u_gripper", || vega_1u(Hands::Gripper));
}
