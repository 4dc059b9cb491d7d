use crate::skeleton::Keypoint;

/// Angle in degrees at `vertex`, between the rays towards `a` and `c`.
///
/// Confidence is ignored. Coincident points yield `0.0`.
pub fn joint_angle(a: &Keypoint, vertex: &Keypoint, c: &Keypoint) -> f64 {
    let va = (a.x - vertex.x, a.y - vertex.y);
    let vc = (c.x - vertex.x, c.y - vertex.y);

    let mag_a = (va.0 * va.0 + va.1 * va.1).sqrt();
    let mag_c = (vc.0 * vc.0 + vc.1 * vc.1).sqrt();
    if mag_a == 0.0 || mag_c == 0.0 {
        return 0.0;
    }

    let dot = va.0 * vc.0 + va.1 * vc.1;
    let cos_angle = (dot / (mag_a * mag_c)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}
