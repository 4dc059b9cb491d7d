//! Pose data model: the 17-point anatomical vocabulary, keypoints, frames
//! and whole pose tracks as produced by the upstream pose detector.

use crate::consts::JOINT_COUNT;
use crate::error::{KineScoreError, KsResult};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Joint {
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A detected landmark. Coordinates are normalized to the frame size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Keypoint {
    pub x: f64,
    pub y: f64,
    pub confidence: f64,
}

impl Keypoint {
    pub fn new(x: f64, y: f64, confidence: f64) -> Self {
        Self { x, y, confidence }
    }

    /// Parses a `[x, y, confidence]` entry. Anything else is rejected.
    fn from_value(value: &serde_json::Value) -> Option<Self> {
        let arr = value.as_array()?;
        if arr.len() != 3 {
            return None;
        }
        let x = arr[0].as_f64()?;
        let y = arr[1].as_f64()?;
        let confidence = arr[2].as_f64()?;
        Some(Self::new(x, y, confidence))
    }
}

/// One sampled instant. A joint missing from the detector output is `None`,
/// which is distinct from a present keypoint with low confidence.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "RawFrame")]
pub struct Frame {
    points: [Option<Keypoint>; JOINT_COUNT],
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, joint: Joint, keypoint: Keypoint) -> Self {
        self.insert(joint, keypoint);
        self
    }

    pub fn insert(&mut self, joint: Joint, keypoint: Keypoint) {
        self.points[joint.index()] = Some(keypoint);
    }

    pub fn remove(&mut self, joint: Joint) -> Option<Keypoint> {
        self.points[joint.index()].take()
    }

    #[inline(always)]
    pub fn get(&self, joint: Joint) -> Option<&Keypoint> {
        self.points[joint.index()].as_ref()
    }

    pub fn len(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.points.iter().all(|p| p.is_none())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Joint, &Keypoint)> + '_ {
        Joint::iter().filter_map(move |j| self.get(j).map(|kp| (j, kp)))
    }
}

#[derive(Deserialize)]
struct RawFrame {
    #[serde(default)]
    keypoints: HashMap<String, serde_json::Value>,
}

impl From<RawFrame> for Frame {
    fn from(raw: RawFrame) -> Self {
        let mut frame = Frame::new();
        for (name, value) in &raw.keypoints {
            // Unknown names and malformed tuples are dropped as if undetected.
            if let (Ok(joint), Some(kp)) = (Joint::from_str(name), Keypoint::from_value(value)) {
                frame.insert(joint, kp);
            }
        }
        frame
    }
}

struct KeypointMap<'a>(&'a Frame);

impl Serialize for KeypointMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (joint, kp) in self.0.iter() {
            map.serialize_entry(joint.as_ref(), &[kp.x, kp.y, kp.confidence])?;
        }
        map.end()
    }
}

impl Serialize for Frame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Frame", 1)?;
        s.serialize_field("keypoints", &KeypointMap(self))?;
        s.end()
    }
}

/// A full pose track: `{"sequence": [{"keypoints": {...}}, ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseTrack {
    #[serde(default)]
    pub sequence: Vec<Frame>,
}

impl PoseTrack {
    pub fn new(sequence: Vec<Frame>) -> Self {
        Self { sequence }
    }

    pub fn from_reader<R: Read>(reader: R) -> KsResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KsResult<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        serde_json::from_reader(reader).map_err(|source| KineScoreError::PoseTrack {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}
