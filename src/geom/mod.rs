mod core;
mod curve;

pub use core::{Frame, Point3, Tolerance, Vec3};
pub use curve::{
    Arc3, CubicBezier3, Curve3, Line3, cumulative_lengths, polyline_frames, polyline_tangents,
    tessellate_curve_uniform,
};

#[cfg(test)]
mod tests;
