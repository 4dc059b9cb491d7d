#![allow(dead_code)]

use kinescore::joints::{BodyRegion, JointDefinition, JointTable};
use kinescore::skeleton::{Frame, Joint, Keypoint};

const KNEE: (f64, f64) = (0.5, 0.5);
const LIMB: f64 = 0.2;

/// Left leg with the knee flexed to `angle_deg` (hip straight above the knee).
pub fn knee_frame(angle_deg: f64, conf: f64) -> Frame {
    let theta = angle_deg.to_radians();
    Frame::new()
        .with(Joint::LeftHip, Keypoint::new(KNEE.0, KNEE.1 - LIMB, conf))
        .with(Joint::LeftKnee, Keypoint::new(KNEE.0, KNEE.1, conf))
        .with(
            Joint::LeftAnkle,
            Keypoint::new(
                KNEE.0 + LIMB * theta.sin(),
                KNEE.1 - LIMB * theta.cos(),
                conf,
            ),
        )
}

/// `frames` samples of a knee sweeping 0° to 90°, shifted by `offset_deg`.
pub fn knee_sweep(frames: usize, offset_deg: f64, conf: f64) -> Vec<Frame> {
    let span = (frames.max(2) - 1) as f64;
    (0..frames)
        .map(|i| knee_frame(90.0 * i as f64 / span + offset_deg, conf))
        .collect()
}

pub fn knee_only_table() -> JointTable {
    JointTable::new(vec![JointDefinition::new(
        "left_knee",
        (Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle),
        1.5,
        BodyRegion::LowerBody,
    )])
    .unwrap()
}

/// A plausible standing pose, perturbed by `t` so frames differ.
pub fn body_frame(t: f64, conf: f64) -> Frame {
    let sway = 0.02 * t.sin();
    let bend = 0.05 * t.cos();
    let pts = [
        (Joint::Nose, 0.50, 0.10),
        (Joint::LeftEye, 0.48, 0.08),
        (Joint::RightEye, 0.52, 0.08),
        (Joint::LeftEar, 0.46, 0.09),
        (Joint::RightEar, 0.54, 0.09),
        (Joint::LeftShoulder, 0.42, 0.25),
        (Joint::RightShoulder, 0.58, 0.25),
        (Joint::LeftElbow, 0.36, 0.38 - bend),
        (Joint::RightElbow, 0.64, 0.38 - bend),
        (Joint::LeftWrist, 0.34 + bend, 0.50),
        (Joint::RightWrist, 0.66 - bend, 0.50),
        (Joint::LeftHip, 0.45, 0.55),
        (Joint::RightHip, 0.55, 0.55),
        (Joint::LeftKnee, 0.44 + bend, 0.72),
        (Joint::RightKnee, 0.56 - bend, 0.72),
        (Joint::LeftAnkle, 0.45, 0.90),
        (Joint::RightAnkle, 0.55, 0.90),
    ];
    pts.iter().fold(Frame::new(), |f, &(j, x, y)| {
        f.with(j, Keypoint::new(x + sway, y, conf))
    })
}

pub fn body_sequence(frames: usize, conf: f64) -> Vec<Frame> {
    (0..frames)
        .map(|i| body_frame(i as f64 * 0.3, conf))
        .collect()
}

/// Returns a copy of `frame` with every keypoint's confidence replaced.
pub fn with_confidence(frame: &Frame, conf: f64) -> Frame {
    frame.iter().fold(Frame::new(), |f, (j, kp)| {
        f.with(j, Keypoint::new(kp.x, kp.y, conf))
    })
}
