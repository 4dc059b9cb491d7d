use crate::skeleton::{Frame, Joint, Keypoint};

/// Returns the triplet's keypoints when all three are present and each
/// meets `threshold`; `None` otherwise.
#[inline]
pub fn resolve_triplet(
    frame: &Frame,
    points: (Joint, Joint, Joint),
    threshold: f64,
) -> Option<[&Keypoint; 3]> {
    let a = frame.get(points.0)?;
    let v = frame.get(points.1)?;
    let c = frame.get(points.2)?;

    // NaN confidences fail the comparison and are rejected.
    if a.confidence >= threshold && v.confidence >= threshold && c.confidence >= threshold {
        Some([a, v, c])
    } else {
        None
    }
}

#[inline]
pub fn triplet_valid(frame: &Frame, points: (Joint, Joint, Joint), threshold: f64) -> bool {
    resolve_triplet(frame, points, threshold).is_some()
}

/// Resolves the triplet in both frames. A joint is only comparable when
/// both sides pass.
#[inline]
pub fn resolve_pair<'a>(
    reference: &'a Frame,
    student: &'a Frame,
    points: (Joint, Joint, Joint),
    threshold: f64,
) -> Option<([&'a Keypoint; 3], [&'a Keypoint; 3])> {
    let r = resolve_triplet(reference, points, threshold)?;
    let s = resolve_triplet(student, points, threshold)?;
    Some((r, s))
}

#[inline]
pub fn pair_valid(
    reference: &Frame,
    student: &Frame,
    points: (Joint, Joint, Joint),
    threshold: f64,
) -> bool {
    resolve_pair(reference, student, points, threshold).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Joint::*;

    const KNEE: (Joint, Joint, Joint) = (LeftHip, LeftKnee, LeftAnkle);

    fn frame(conf: f64) -> Frame {
        Frame::new()
            .with(LeftHip, Keypoint::new(0.5, 0.3, conf))
            .with(LeftKnee, Keypoint::new(0.5, 0.5, conf))
            .with(LeftAnkle, Keypoint::new(0.5, 0.7, conf))
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(triplet_valid(&frame(0.3), KNEE, 0.3));
        assert!(!triplet_valid(&frame(0.2999), KNEE, 0.3));
    }

    #[test]
    fn test_absent_point_is_invalid() {
        let mut f = frame(0.9);
        f.remove(LeftAnkle);
        assert!(!triplet_valid(&f, KNEE, 0.3));
    }

    #[test]
    fn test_both_sides_required() {
        assert!(pair_valid(&frame(0.9), &frame(0.9), KNEE, 0.3));
        assert!(!pair_valid(&frame(0.9), &frame(0.1), KNEE, 0.3));
        assert!(!pair_valid(&frame(0.1), &frame(0.9), KNEE, 0.3));
    }

    #[test]
    fn test_nan_confidence_rejected() {
        assert!(!triplet_valid(&frame(f64::NAN), KNEE, 0.3));
    }
}
