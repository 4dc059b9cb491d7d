use crate::error::{KineScoreError, KsResult};
use crate::skeleton::Joint;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BodyRegion {
    Head,
    UpperBody,
    Torso,
    LowerBody,
}

impl BodyRegion {
    pub fn label(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::UpperBody => "upper body",
            Self::Torso => "torso",
            Self::LowerBody => "lower body",
        }
    }
}

/// A scored articulation: the angle at `points.1` formed with `points.0`
/// and `points.2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointDefinition {
    pub name: String,
    pub points: (Joint, Joint, Joint),
    pub weight: f64,
    pub region: BodyRegion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl JointDefinition {
    pub fn new(name: &str, points: (Joint, Joint, Joint), weight: f64, region: BodyRegion) -> Self {
        Self {
            name: name.to_string(),
            points,
            weight,
            region,
            label: None,
        }
    }

    /// Human-readable name used in feedback lines.
    pub fn display_name(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        self.name
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Immutable set of joints a scoring run evaluates. Built once and shared.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct JointTable {
    defs: Vec<JointDefinition>,
}

impl JointTable {
    pub fn new(defs: Vec<JointDefinition>) -> KsResult<Self> {
        if defs.is_empty() {
            return Err(KineScoreError::Validation(
                "no joints defined".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for def in &defs {
            if !(def.weight.is_finite() && def.weight > 0.0) {
                return Err(KineScoreError::Validation(format!(
                    "Joint '{}' has non-positive weight {}",
                    def.name, def.weight
                )));
            }
            if !seen.insert(def.name.as_str()) {
                return Err(KineScoreError::Validation(format!(
                    "Joint '{}' is defined twice",
                    def.name
                )));
            }
        }

        Ok(Self { defs })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KsResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> KsResult<Self> {
        let defs: Vec<JointDefinition> = serde_json::from_str(content)?;
        Self::new(defs)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JointDefinition> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&JointDefinition> {
        self.defs.iter().find(|d| d.name == name)
    }

    pub fn total_weight(&self) -> f64 {
        self.defs.iter().map(|d| d.weight).sum()
    }

    /// `(min, max)` weight per region, in first-seen region order.
    pub fn weight_ranges(&self) -> Vec<(BodyRegion, f64, f64)> {
        let mut ranges: Vec<(BodyRegion, f64, f64)> = Vec::new();
        for def in &self.defs {
            match ranges.iter_mut().find(|r| r.0 == def.region) {
                Some(r) => {
                    r.1 = r.1.min(def.weight);
                    r.2 = r.2.max(def.weight);
                }
                None => ranges.push((def.region, def.weight, def.weight)),
            }
        }
        ranges
    }
}

impl Default for JointTable {
    fn default() -> Self {
        use Joint::*;
        let defs = vec![
            JointDefinition::new(
                "left_knee",
                (LeftHip, LeftKnee, LeftAnkle),
                1.5,
                BodyRegion::LowerBody,
            ),
            JointDefinition::new(
                "right_knee",
                (RightHip, RightKnee, RightAnkle),
                1.5,
                BodyRegion::LowerBody,
            ),
            JointDefinition::new(
                "left_hip",
                (LeftShoulder, LeftHip, LeftKnee),
                1.3,
                BodyRegion::LowerBody,
            ),
            JointDefinition::new(
                "right_hip",
                (RightShoulder, RightHip, RightKnee),
                1.3,
                BodyRegion::LowerBody,
            ),
            JointDefinition::new(
                "left_elbow",
                (LeftShoulder, LeftElbow, LeftWrist),
                1.0,
                BodyRegion::UpperBody,
            ),
            JointDefinition::new(
                "right_elbow",
                (RightShoulder, RightElbow, RightWrist),
                1.0,
                BodyRegion::UpperBody,
            ),
            JointDefinition::new(
                "left_shoulder",
                (LeftHip, LeftShoulder, LeftElbow),
                1.2,
                BodyRegion::UpperBody,
            ),
            JointDefinition::new(
                "right_shoulder",
                (RightHip, RightShoulder, RightElbow),
                1.2,
                BodyRegion::UpperBody,
            ),
        ];
        Self { defs }
    }
}

impl<'a> IntoIterator for &'a JointTable {
    type Item = &'a JointDefinition;
    type IntoIter = std::slice::Iter<'a, JointDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.defs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_shape() {
        let table = JointTable::default();
        assert_eq!(table.len(), 8);
        assert!((table.total_weight() - 10.0).abs() < 1e-9);

        let ranges = table.weight_ranges();
        assert_eq!(ranges[0], (BodyRegion::LowerBody, 1.3, 1.5));
        assert_eq!(ranges[1], (BodyRegion::UpperBody, 1.0, 1.2));
    }

    #[test]
    fn test_display_name() {
        let table = JointTable::default();
        assert_eq!(table.get("left_knee").unwrap().display_name(), "Left Knee");

        let mut def = table.get("right_hip").unwrap().clone();
        def.label = Some("Hip (R)".to_string());
        assert_eq!(def.display_name(), "Hip (R)");
    }

    #[test]
    fn test_rejects_bad_weight_and_duplicates() {
        let bad = JointDefinition::new(
            "neck",
            (Joint::Nose, Joint::LeftShoulder, Joint::LeftHip),
            0.0,
            BodyRegion::Torso,
        );
        assert!(JointTable::new(vec![bad]).is_err());

        let knee = JointTable::default().get("left_knee").unwrap().clone();
        assert!(JointTable::new(vec![knee.clone(), knee]).is_err());
        assert!(JointTable::new(vec![]).is_err());
    }

    #[test]
    fn test_unknown_point_is_rejected_at_load() {
        let json = r#"[{"name": "tail", "points": ["left_hip", "tailbone", "right_hip"],
                        "weight": 1.0, "region": "torso"}]"#;
        assert!(JointTable::from_json(json).is_err());
    }
}
