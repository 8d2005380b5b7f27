//! Dexbot CLI - Main entry point
//!
//! Explore robot variants, their runtime overrides and URDF joint metadata.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dexbot_core::{HandType, ProcessEnv, Side};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "dexbot")]
#[command(about = "Dexmate robot configuration and URDF tools")]
#[command(version)]
struct Args {
    /// Path to settings file
    #[arg(short, long, default_value = "dexbot.toml", global = true)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Robot configuration management
    #[command(subcommand)]
    Cfg(CfgCommand),

    /// Summarize the robot resolved from a variant or the environment
    Info {
        /// Variant name; ROBOT_CONFIG / ROBOT_NAME are used when omitted
        #[arg(long)]
        variant: Option<String>,
    },

    /// Inspect a URDF file
    #[command(subcommand)]
    Urdf(UrdfCommand),
}

#[derive(Subcommand, Debug)]
enum CfgCommand {
    /// List all available robot variants
    List,

    /// Show a variant's components, sensors and queryables
    Show {
        /// Variant name (e.g. vega_1p_gripper)
        variant: String,

        /// Detected hand type per side, e.g. `left=DexGripper`
        #[arg(long = "hand", value_parser = parse_hand)]
        hands: Vec<(Side, HandType)>,

        /// Keep configured hands that differ from the detected type
        #[arg(long)]
        no_hand_override: bool,

        /// Disable the estop component
        #[arg(long)]
        disable_estop: bool,

        /// Disable the heartbeat component
        #[arg(long)]
        disable_heartbeat: bool,

        /// Print the configuration as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum UrdfCommand {
    /// Joint names in document order
    Joints {
        path: PathBuf,
        /// Only joints of this type (revolute, fixed, ...)
        #[arg(long = "type")]
        joint_type: Option<String>,
    },
    /// Revolute, continuous and prismatic joints
    Movable { path: PathBuf },
    /// Joint limits
    Limits { path: PathBuf },
    /// Link names
    Links { path: PathBuf },
    /// Parent link to child joints
    Tree { path: PathBuf },
}

fn parse_hand(arg: &str) -> Result<(Side, HandType), String> {
    let (side, hand) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected side=TYPE, got '{arg}'"))?;
    let side = side.trim().parse::<Side>().map_err(|e| e.to_string())?;
    let hand = hand.trim().parse::<HandType>().map_err(|e| e.to_string())?;
    Ok((side, hand))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    debug!("Dexbot v{}", env!("CARGO_PKG_VERSION"));

    let settings = dexbot_core::load_settings(&args.config)?.apply_env(&ProcessEnv);
    dexbot_core::urdf::set_shared_cache_capacity(settings.urdf.cache_capacity);

    let output = match args.command {
        Command::Cfg(CfgCommand::List) => commands::cfg_list(),
        Command::Cfg(CfgCommand::Show {
            variant,
            hands,
            no_hand_override,
            disable_estop,
            disable_heartbeat,
            json,
        }) => {
            let mut options = settings.overrides;
            options.allow_hand_override &= !no_hand_override;
            options.disable_estop |= disable_estop;
            options.disable_heartbeat |= disable_heartbeat;
            commands::cfg_show(&variant, &hands, &options, json)?
        }
        Command::Info { variant } => commands::info(variant.as_deref(), &settings, &ProcessEnv)?,
        Command::Urdf(command) => match command {
            UrdfCommand::Joints { path, joint_type } => {
                commands::urdf_joints(&path, joint_type.as_deref())?
            }
            UrdfCommand::Movable { path } => commands::urdf_movable(&path)?,
            UrdfCommand::Limits { path } => commands::urdf_limits(&path)?,
            UrdfCommand::Links { path } => commands::urdf_links(&path)?,
            UrdfCommand::Tree { path } => commands::urdf_tree(&path)?,
        },
    };

    print!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_hand() {
        assert_eq!(
            parse_hand("left=DexGripper").unwrap(),
            (Side::Left, HandType::DexGripper)
        );
        assert_eq!(
            parse_hand("right = HandF5D6_V2").unwrap(),
            (Side::Right, HandType::HandF5d6V2)
        );
        assert!(parse_hand("left").is_err());
        assert!(parse_hand("up=DexGripper").is_err());
        assert!(parse_hand("left=claw").is_err());
    }

    #[test]
    fn test_show_arguments() {
        let args = Args::try_parse_from([
            "dexbot",
            "cfg",
            "show",
            "vega_1p",
            "--hand",
            "left=UNKNOWN",
            "--hand",
            "right=DexGripper",
            "--disable-estop",
        ])
        .unwrap();
        match args.command {
            Command::Cfg(CfgCommand::Show {
                variant,
                hands,
                disable_estop,
                no_hand_override,
                ..
            }) => {
                assert_eq!(variant, "vega_1p");
                assert_eq!(hands.len(), 2);
                assert!(disable_estop);
                assert!(!no_hand_override);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
