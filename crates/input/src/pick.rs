//! Screen-space picking: unproject the cursor and intersect the galaxy
//! plane.

use glam::{DMat4, DVec2, DVec3};

/// Unproject a window-space position into a world-space ray.
///
/// Returns `(origin, direction)` with a unit direction, or None for a
/// degenerate viewport or a non-invertible view-projection (both can occur
/// transiently during window setup).
pub fn screen_to_ray(
    screen: DVec2,
    viewport: DVec2,
    view: DMat4,
    proj: DMat4,
) -> Option<(DVec3, DVec3)> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    let view_proj = proj * view;
    if view_proj.determinant().abs() < 1e-18 {
        return None;
    }
    let inv = view_proj.inverse();

    let ndc = DVec2::new(
        2.0 * screen.x / viewport.x - 1.0,
        1.0 - 2.0 * screen.y / viewport.y,
    );
    // Depth range 0..1 (glam's perspective_rh convention).
    let near = inv.project_point3(DVec3::new(ndc.x, ndc.y, 0.0));
    let far = inv.project_point3(DVec3::new(ndc.x, ndc.y, 1.0));

    let dir = far - near;
    if dir.length_squared() < 1e-18 {
        return None;
    }
    Some((near, dir.normalize()))
}

/// Intersect a ray with the z = 0 galaxy plane.
///
/// None when the ray is parallel to the plane or the hit lies behind the
/// origin.
pub fn intersect_z_plane(origin: DVec3, dir: DVec3) -> Option<DVec3> {
    if dir.z.abs() < 1e-12 {
        return None;
    }
    let t = -origin.z / dir.z;
    if t < 0.0 {
        return None;
    }
    Some(origin + dir * t)
}
