//! URDF parsing for joint and link metadata
//!
//! Only the kinematic skeleton of a robot description is read: joint type,
//! parent/child links, limits and rotation axis. Visual, collision and
//! inertial data are skipped.
//!
//! Parsed files can be shared through [`UrdfCache`], a small LRU keyed by
//! the path string exactly as the caller spelled it. The free functions at
//! the bottom of this module go through one process-wide cache.

use quick_xml::de::from_str;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use thiserror::Error;
use tracing::debug;

/// Number of parsed descriptions kept by the shared cache
pub const DEFAULT_CACHE_CAPACITY: usize = 4;

#[derive(Error, Debug)]
pub enum UrdfError {
    #[error("URDF file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to parse URDF: {0}")]
    ParseError(String),
    #[error("Invalid {attribute} value '{value}' on joint '{joint}'")]
    InvalidValue {
        joint: String,
        attribute: &'static str,
        value: String,
    },
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Joint type as declared by the `type` attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JointType {
    Revolute,
    Continuous,
    Prismatic,
    Fixed,
    Floating,
    Planar,
    /// No `type` attribute on the joint
    Unknown,
    Other(String),
}

impl JointType {
    pub fn as_str(&self) -> &str {
        match self {
            JointType::Revolute => "revolute",
            JointType::Continuous => "continuous",
            JointType::Prismatic => "prismatic",
            JointType::Fixed => "fixed",
            JointType::Floating => "floating",
            JointType::Planar => "planar",
            JointType::Unknown => "unknown",
            JointType::Other(s) => s,
        }
    }

    /// Revolute, continuous and prismatic joints are movable
    pub fn is_movable(&self) -> bool {
        matches!(
            self,
            JointType::Revolute | JointType::Continuous | JointType::Prismatic
        )
    }
}

impl From<&str> for JointType {
    fn from(s: &str) -> Self {
        match s {
            "revolute" => JointType::Revolute,
            "continuous" => JointType::Continuous,
            "prismatic" => JointType::Prismatic,
            "fixed" => JointType::Fixed,
            "floating" => JointType::Floating,
            "planar" => JointType::Planar,
            "unknown" => JointType::Unknown,
            other => JointType::Other(other.to_string()),
        }
    }
}

impl From<String> for JointType {
    fn from(s: String) -> Self {
        JointType::from(s.as_str())
    }
}

impl From<JointType> for String {
    fn from(t: JointType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for JointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Joint limit from a `<limit>` element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointLimit {
    pub lower: f64,
    pub upper: f64,
    pub effort: Option<f64>,
    pub velocity: Option<f64>,
}

/// Everything the extractor knows about one joint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointInfo {
    pub name: String,
    pub joint_type: JointType,
    pub parent_link: String,
    pub child_link: String,
    pub limit: Option<JointLimit>,
    pub axis: Option<[f64; 3]>,
}

impl fmt::Display for JointInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} -> {}",
            self.name, self.joint_type, self.parent_link, self.child_link
        )
    }
}

// Raw document shape. Anything not listed here is ignored by serde.

#[derive(Debug, Deserialize)]
#[serde(rename = "robot")]
struct RawRobot {
    #[serde(rename = "@name", default)]
    name: Option<String>,
    #[serde(default)]
    link: Vec<RawLink>,
    #[serde(default)]
    joint: Vec<RawJoint>,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    #[serde(rename = "@name", default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawJoint {
    #[serde(rename = "@name", default)]
    name: Option<String>,
    #[serde(rename = "@type", default)]
    joint_type: Option<String>,
    #[serde(default)]
    parent: Option<RawLinkRef>,
    #[serde(default)]
    child: Option<RawLinkRef>,
    #[serde(default)]
    limit: Option<RawLimit>,
    #[serde(default)]
    axis: Option<RawAxis>,
}

#[derive(Debug, Deserialize)]
struct RawLinkRef {
    #[serde(rename = "@link", default)]
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLimit {
    #[serde(rename = "@lower", default)]
    lower: Option<String>,
    #[serde(rename = "@upper", default)]
    upper: Option<String>,
    #[serde(rename = "@effort", default)]
    effort: Option<String>,
    #[serde(rename = "@velocity", default)]
    velocity: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAxis {
    #[serde(rename = "@xyz", default)]
    xyz: Option<String>,
}

/// Parsed robot description
///
/// Parsing happens once on construction; every query afterwards is a lookup.
#[derive(Debug, Clone)]
pub struct UrdfParser {
    path: Option<PathBuf>,
    robot_name: String,
    /// Joints in document order
    joints: Vec<JointInfo>,
    index: HashMap<String, usize>,
    links: Vec<String>,
}

impl UrdfParser {
    /// Parse a URDF file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, UrdfError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(UrdfError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let mut parser = Self::from_xml(&content)?;
        parser.path = Some(path.to_path_buf());
        debug!(
            path = %path.display(),
            joints = parser.joints.len(),
            links = parser.links.len(),
            "Parsed URDF"
        );
        Ok(parser)
    }

    /// Parse a URDF document held in memory
    pub fn from_xml(xml: &str) -> Result<Self, UrdfError> {
        check_well_formed(xml)?;
        let raw: RawRobot = from_str(xml).map_err(|e| UrdfError::ParseError(e.to_string()))?;

        let mut joints: Vec<JointInfo> = Vec::with_capacity(raw.joint.len());
        let mut index = HashMap::new();
        for raw_joint in raw.joint {
            let joint = convert_joint(raw_joint)?;
            // A redefined joint keeps its original position
            match index.get(&joint.name) {
                Some(&pos) => joints[pos] = joint,
                None => {
                    index.insert(joint.name.clone(), joints.len());
                    joints.push(joint);
                }
            }
        }

        Ok(Self {
            path: None,
            robot_name: raw.name.unwrap_or_else(|| "unknown".to_string()),
            joints,
            index,
            links: raw
                .link
                .into_iter()
                .map(|l| l.name.unwrap_or_default())
                .collect(),
        })
    }

    /// Path the description was read from, if it came from a file
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Robot name from the root element, `unknown` when absent
    pub fn robot_name(&self) -> &str {
        &self.robot_name
    }

    /// All joints in document order
    pub fn joints(&self) -> &[JointInfo] {
        &self.joints
    }

    pub fn joint_info(&self, name: &str) -> Option<&JointInfo> {
        self.index.get(name).map(|&i| &self.joints[i])
    }

    /// Joint names, optionally restricted to one joint type
    pub fn joint_names(&self, joint_type: Option<&JointType>) -> Vec<String> {
        self.joints
            .iter()
            .filter(|j| joint_type.map_or(true, |t| &j.joint_type == t))
            .map(|j| j.name.clone())
            .collect()
    }

    pub fn movable_joint_names(&self) -> Vec<String> {
        self.joints
            .iter()
            .filter(|j| j.joint_type.is_movable())
            .map(|j| j.name.clone())
            .collect()
    }

    /// Limits for the requested joints, or for every joint when `names` is `None`
    ///
    /// Joints without a `<limit>` element and unknown names are left out.
    pub fn joint_limits(&self, names: Option<&[&str]>) -> Vec<(String, JointLimit)> {
        match names {
            None => self
                .joints
                .iter()
                .filter_map(|j| j.limit.map(|l| (j.name.clone(), l)))
                .collect(),
            Some(names) => names
                .iter()
                .filter_map(|name| {
                    self.joint_info(name)
                        .and_then(|j| j.limit.map(|l| (j.name.clone(), l)))
                })
                .collect(),
        }
    }

    /// Link names in document order
    pub fn link_names(&self) -> &[String] {
        &self.links
    }

    /// Parent link name to the joints hanging off it
    pub fn joint_tree(&self) -> BTreeMap<String, Vec<String>> {
        let mut tree: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for joint in &self.joints {
            tree.entry(joint.parent_link.clone())
                .or_default()
                .push(joint.name.clone());
        }
        tree
    }
}

/// Reject anything that is not a single well-formed XML element tree
fn check_well_formed(xml: &str) -> Result<(), UrdfError> {
    let mut reader = Reader::from_str(xml);
    let mut depth: usize = 0;
    let mut roots = 0;

    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Empty(_)) => {
                if depth == 0 {
                    roots += 1;
                }
            }
            Ok(Event::Text(text)) => {
                if depth == 0 && !text.iter().all(u8::is_ascii_whitespace) {
                    return Err(UrdfError::ParseError(
                        "text content outside of the root element".to_string(),
                    ));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(UrdfError::ParseError(e.to_string())),
        }
    }

    if depth != 0 {
        return Err(UrdfError::ParseError("unclosed element at end of document".to_string()));
    }
    match roots {
        0 => Err(UrdfError::ParseError("no root element".to_string())),
        1 => Ok(()),
        _ => Err(UrdfError::ParseError("multiple root elements".to_string())),
    }
}

fn convert_joint(raw: RawJoint) -> Result<JointInfo, UrdfError> {
    let name = raw.name.unwrap_or_default();

    let limit = match raw.limit {
        Some(l) => Some(JointLimit {
            lower: parse_optional(&name, "lower", l.lower.as_deref())?.unwrap_or(0.0),
            upper: parse_optional(&name, "upper", l.upper.as_deref())?.unwrap_or(0.0),
            effort: parse_optional(&name, "effort", l.effort.as_deref())?,
            velocity: parse_optional(&name, "velocity", l.velocity.as_deref())?,
        }),
        None => None,
    };

    let axis = match raw.axis {
        Some(a) => Some(parse_axis(&name, a.xyz.as_deref().unwrap_or("1 0 0"))?),
        None => None,
    };

    Ok(JointInfo {
        joint_type: raw
            .joint_type
            .map(JointType::from)
            .unwrap_or(JointType::Unknown),
        parent_link: raw.parent.and_then(|p| p.link).unwrap_or_default(),
        child_link: raw.child.and_then(|c| c.link).unwrap_or_default(),
        limit,
        axis,
        name,
    })
}

/// Empty attributes count as absent
fn parse_optional(
    joint: &str,
    attribute: &'static str,
    value: Option<&str>,
) -> Result<Option<f64>, UrdfError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse().map(Some).map_err(|_| UrdfError::InvalidValue {
            joint: joint.to_string(),
            attribute,
            value: v.to_string(),
        }),
    }
}

fn parse_axis(joint: &str, xyz: &str) -> Result<[f64; 3], UrdfError> {
    let invalid = || UrdfError::InvalidValue {
        joint: joint.to_string(),
        attribute: "axis",
        value: xyz.to_string(),
    };
    let parts: Vec<f64> = xyz
        .split_whitespace()
        .map(|p| p.parse().map_err(|_| invalid()))
        .collect::<Result<_, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => Err(invalid()),
    }
}

/// Bounded least-recently-used cache of parsed descriptions
///
/// Keys are compared as plain strings, so `a.urdf` and `./a.urdf` are two
/// different entries. Failed parses are not cached.
#[derive(Debug)]
pub struct UrdfCache {
    capacity: usize,
    /// Most recently used first
    entries: VecDeque<(String, Arc<UrdfParser>)>,
}

impl UrdfCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Return the cached parser for `path`, parsing the file on a miss
    pub fn get(&mut self, path: &str) -> Result<Arc<UrdfParser>, UrdfError> {
        if let Some(pos) = self.entries.iter().position(|(key, _)| key == path) {
            if let Some(entry) = self.entries.remove(pos) {
                let parser = Arc::clone(&entry.1);
                self.entries.push_front(entry);
                debug!(path, "URDF cache hit");
                return Ok(parser);
            }
        }

        let parser = Arc::new(UrdfParser::open(path)?);
        self.entries.push_front((path.to_string(), Arc::clone(&parser)));
        while self.entries.len() > self.capacity {
            if let Some((evicted, _)) = self.entries.pop_back() {
                debug!(path = %evicted, "URDF cache eviction");
            }
        }
        Ok(parser)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Change the capacity, evicting least recently used entries as needed
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.entries.truncate(self.capacity);
    }
}

impl Default for UrdfCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

fn shared_cache() -> &'static Mutex<UrdfCache> {
    static CACHE: OnceLock<Mutex<UrdfCache>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(UrdfCache::default()))
}

fn lock_shared_cache() -> MutexGuard<'static, UrdfCache> {
    shared_cache()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Resize the cache behind the free functions
pub fn set_shared_cache_capacity(capacity: usize) {
    lock_shared_cache().set_capacity(capacity);
}

/// Parse a URDF through the shared cache
pub fn parse_urdf(path: impl AsRef<Path>) -> Result<Arc<UrdfParser>, UrdfError> {
    let key = path.as_ref().to_string_lossy().into_owned();
    lock_shared_cache().get(&key)
}

pub fn get_joint_names(
    path: impl AsRef<Path>,
    joint_type: Option<&JointType>,
) -> Result<Vec<String>, UrdfError> {
    Ok(parse_urdf(path)?.joint_names(joint_type))
}

pub fn get_movable_joint_names(path: impl AsRef<Path>) -> Result<Vec<String>, UrdfError> {
    Ok(parse_urdf(path)?.movable_joint_names())
}

pub fn get_joint_limits(
    path: impl AsRef<Path>,
    names: Option<&[&str]>,
) -> Result<Vec<(String, JointLimit)>, UrdfError> {
    Ok(parse_urdf(path)?.joint_limits(names))
}

pub fn get_joint_info(
    path: impl AsRef<Path>,
    name: &str,
) -> Result<Option<JointInfo>, UrdfError> {
    Ok(parse_urdf(path)?.joint_info(name).cloned())
}

pub fn get_link_names(path: impl AsRef<Path>) -> Result<Vec<String>, UrdfError> {
    Ok(parse_urdf(path)?.link_names().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE_URDF: &str = r#"<?xml version="1.0"?>
<robot name="test_robot">
  <link name="base_link">
    <visual>
      <geometry>
        <box size="0.1 0.1 0.1"/>
      </geometry>
    </visual>
  </link>
  <link name="link1"/>
  <link name="link2"/>
  <link name="end_effector"/>

  <joint name="joint1" type="revolute">
    <parent link="base_link"/>
    <child link="link1"/>
    <origin xyz="0 0 0.1" rpy="0 0 0"/>
    <axis xyz="0 0 1"/>
    <limit lower="-1.57" upper="1.57" effort="100" velocity="1.0"/>
  </joint>

  <joint name="joint2" type="revolute">
    <parent link="link1"/>
    <child link="link2"/>
    <axis xyz="0 1 0"/>
    <limit lower="-2.0" upper="2.0" effort="150" velocity="1.5"/>
  </joint>

  <joint name="joint3" type="prismatic">
    <parent link="link2"/>
    <child link="end_effector"/>
    <axis xyz="0 0 1"/>
    <limit lower="0.0" upper="0.2" effort="50" velocity="0.5"/>
  </joint>

  <joint name="fixed_joint" type="fixed">
    <parent link="link1"/>
    <child link="link2"/>
    <origin xyz="0 0 0" rpy="0 0 0"/>
  </joint>
</robot>
"#;

    fn write_urdf(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_sample() {
        let parser = UrdfParser::from_xml(SAMPLE_URDF).unwrap();
        assert_eq!(parser.robot_name(), "test_robot");
        assert_eq!(
            parser.joint_names(None),
            vec!["joint1", "joint2", "joint3", "fixed_joint"]
        );
        assert_eq!(
            parser.joint_names(Some(&JointType::Revolute)),
            vec!["joint1", "joint2"]
        );
        assert_eq!(
            parser.movable_joint_names(),
            vec!["joint1", "joint2", "joint3"]
        );
        assert_eq!(
            parser.link_names(),
            &["base_link", "link1", "link2", "end_effector"]
        );

        let joint = parser.joint_info("joint1").unwrap();
        assert_eq!(joint.parent_link, "base_link");
        assert_eq!(joint.child_link, "link1");
        assert_eq!(joint.axis, Some([0.0, 0.0, 1.0]));
        assert!(parser.joint_info("missing").is_none());
    }

    #[test]
    fn test_movable_and_limits_round_trip() {
        let xml = r#"<robot name="mini">
  <link name="a"/>
  <link name="b"/>
  <joint name="hinge" type="revolute">
    <parent link="a"/>
    <child link="b"/>
    <limit lower="-1.57" upper="1.57" effort="100" velocity="1.0"/>
  </joint>
  <joint name="weld" type="fixed">
    <parent link="a"/>
    <child link="b"/>
  </joint>
</robot>"#;
        let parser = UrdfParser::from_xml(xml).unwrap();
        assert_eq!(parser.movable_joint_names(), vec!["hinge"]);

        let limits = parser.joint_limits(None);
        assert_eq!(limits.len(), 1);
        let (name, limit) = &limits[0];
        assert_eq!(name, "hinge");
        assert_eq!(
            *limit,
            JointLimit {
                lower: -1.57,
                upper: 1.57,
                effort: Some(100.0),
                velocity: Some(1.0),
            }
        );
    }

    #[test]
    fn test_requested_limits_skip_unknown_and_limitless() {
        let parser = UrdfParser::from_xml(SAMPLE_URDF).unwrap();
        let limits = parser.joint_limits(Some(&["joint3", "fixed_joint", "nope", "joint1"]));
        let names: Vec<&str> = limits.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["joint3", "joint1"]);
        assert_eq!(limits[0].1.upper, 0.2);
    }

    #[test]
    fn test_axis_defaults_when_xyz_missing() {
        let xml = r#"<robot name="r">
  <joint name="j" type="continuous">
    <parent link="a"/>
    <child link="b"/>
    <axis/>
  </joint>
  <joint name="k" type="continuous">
    <parent link="a"/>
    <child link="c"/>
  </joint>
</robot>"#;
        let parser = UrdfParser::from_xml(xml).unwrap();
        assert_eq!(parser.joint_info("j").unwrap().axis, Some([1.0, 0.0, 0.0]));
        assert_eq!(parser.joint_info("k").unwrap().axis, None);
    }

    #[test]
    fn test_partial_limit_and_missing_type() {
        let xml = r#"<robot>
  <joint name="loose">
    <parent link="a"/>
    <child link="b"/>
    <limit upper="0.5" effort=""/>
  </joint>
  <joint name="odd" type="spherical">
    <parent link="b"/>
    <child link="c"/>
  </joint>
</robot>"#;
        let parser = UrdfParser::from_xml(xml).unwrap();
        assert_eq!(parser.robot_name(), "unknown");

        let loose = parser.joint_info("loose").unwrap();
        assert_eq!(loose.joint_type, JointType::Unknown);
        let limit = loose.limit.unwrap();
        assert_eq!(limit.lower, 0.0);
        assert_eq!(limit.upper, 0.5);
        assert_eq!(limit.effort, None);
        assert_eq!(limit.velocity, None);

        let odd = parser.joint_info("odd").unwrap();
        assert_eq!(odd.joint_type, JointType::Other("spherical".to_string()));
        assert!(!odd.joint_type.is_movable());
    }

    #[test]
    fn test_interleaved_links_and_joints() {
        let xml = r#"<robot name="r">
  <link name="base"/>
  <joint name="j1" type="revolute"><parent link="base"/><child link="l1"/></joint>
  <link name="l1"/>
  <material name="grey"/>
  <joint name="j2" type="prismatic"><parent link="l1"/><child link="l2"/></joint>
  <link name="l2"/>
</robot>"#;
        let parser = UrdfParser::from_xml(xml).unwrap();
        assert_eq!(parser.link_names(), &["base", "l1", "l2"]);
        assert_eq!(parser.joint_names(None), vec!["j1", "j2"]);
    }

    #[test]
    fn test_joint_tree() {
        let parser = UrdfParser::from_xml(SAMPLE_URDF).unwrap();
        let tree = parser.joint_tree();
        assert_eq!(tree["base_link"], vec!["joint1"]);
        assert_eq!(tree["link1"], vec!["joint2", "fixed_joint"]);
        assert_eq!(tree["link2"], vec!["joint3"]);
        assert!(!tree.contains_key("end_effector"));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = UrdfParser::open(dir.path().join("nope.urdf")).unwrap_err();
        assert!(matches!(err, UrdfError::NotFound(_)));
    }

    #[test]
    fn test_malformed_xml() {
        let err = UrdfParser::from_xml("<robot><joint name=\"a\"></robot>").unwrap_err();
        assert!(matches!(err, UrdfError::ParseError(_)));

        let err = UrdfParser::from_xml("this is not xml").unwrap_err();
        assert!(matches!(err, UrdfError::ParseError(_)));

        let err = UrdfParser::from_xml("<robot><link name=\"a\"/>").unwrap_err();
        assert!(matches!(err, UrdfError::ParseError(_)));
    }

    #[test]
    fn test_invalid_number() {
        let xml = r#"<robot>
  <joint name="j" type="revolute">
    <limit lower="low" upper="1"/>
  </joint>
</robot>"#;
        let err = UrdfParser::from_xml(xml).unwrap_err();
        match err {
            UrdfError::InvalidValue { joint, attribute, value } => {
                assert_eq!(joint, "j");
                assert_eq!(attribute, "lower");
                assert_eq!(value, "low");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_open_records_path() {
        let dir = TempDir::new().unwrap();
        let path = write_urdf(&dir, "robot.urdf", SAMPLE_URDF);
        let parser = UrdfParser::open(&path).unwrap();
        assert_eq!(parser.path(), Some(path.as_path()));
        assert_eq!(parser.joints().len(), 4);
    }

    #[test]
    fn test_cache_hit_and_eviction() {
        let dir = TempDir::new().unwrap();
        let paths: Vec<String> = (0..3)
            .map(|i| {
                write_urdf(&dir, &format!("r{i}.urdf"), SAMPLE_URDF)
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();

        let mut cache = UrdfCache::new(2);
        let first = cache.get(&paths[0]).unwrap();
        let again = cache.get(&paths[0]).unwrap();
        assert!(Arc::ptr_eq(&first, &again));

        cache.get(&paths[1]).unwrap();
        // Touch r0 so r1 becomes the eviction candidate
        cache.get(&paths[0]).unwrap();
        cache.get(&paths[2]).unwrap();

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&paths[0]));
        assert!(!cache.contains(&paths[1]));
        assert!(cache.contains(&paths[2]));
    }

    #[test]
    fn test_cache_shrink_keeps_most_recent() {
        let dir = TempDir::new().unwrap();
        let mut cache = UrdfCache::new(3);
        let paths: Vec<String> = (0..3)
            .map(|i| {
                let path = write_urdf(&dir, &format!("s{i}.urdf"), SAMPLE_URDF)
                    .to_string_lossy()
                    .into_owned();
                cache.get(&path).unwrap();
                path
            })
            .collect();

        cache.set_capacity(1);
        assert_eq!(cache.capacity(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&paths[2]));
    }

    #[test]
    fn test_cache_key_is_path_spelling() {
        let dir = TempDir::new().unwrap();
        let path = write_urdf(&dir, "robot.urdf", SAMPLE_URDF);
        let plain = path.to_string_lossy().into_owned();
        let dotted = dir
            .path()
            .join(".")
            .join("robot.urdf")
            .to_string_lossy()
            .into_owned();

        let mut cache = UrdfCache::default();
        let a = cache.get(&plain).unwrap();
        let b = cache.get(&dotted).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_cache_does_not_store_failures() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.urdf").to_string_lossy().into_owned();
        let mut cache = UrdfCache::default();
        assert!(cache.get(&missing).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_convenience_functions() {
        let dir = TempDir::new().unwrap();
        let path = write_urdf(&dir, "shared.urdf", SAMPLE_URDF);

        assert_eq!(get_joint_names(&path, Some(&JointType::Fixed)).unwrap(), vec!["fixed_joint"]);
        assert_eq!(get_movable_joint_names(&path).unwrap().len(), 3);
        assert_eq!(get_joint_limits(&path, None).unwrap().len(), 3);
        assert_eq!(
            get_joint_info(&path, "joint2").unwrap().unwrap().joint_type,
            JointType::Revolute
        );
        assert_eq!(get_link_names(&path).unwrap().len(), 4);
        assert!(Arc::ptr_eq(&parse_urdf(&path).unwrap(), &parse_urdf(&path).unwrap()));
    }
}
