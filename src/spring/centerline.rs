//! Generator output: the ordered centerline plus what a sweep needs.

use serde::Serialize;

use crate::geom::{Frame, Point3, Tolerance, Vec3, cumulative_lengths, polyline_frames};

use super::dead_coil::EndGrinding;
use super::error::SpringError;
use super::params::{NormalizedSpring, SpringFamily};

/// Role of a run of points within a centerline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Body,
    StartHook,
    EndHook,
    StartLeg,
    EndLeg,
    InnerEnd,
    OuterEnd,
}

/// Inclusive point index range `[first, last]` of one section. Neighbouring
/// sections share their joint point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSection {
    pub kind: SectionKind,
    pub first: usize,
    pub last: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterlinePath {
    points: Vec<Point3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frames: Option<Vec<Frame>>,
    sections: Vec<PathSection>,
}

impl CenterlinePath {
    /// A path made of a single body section.
    #[must_use]
    pub fn from_points(points: Vec<Point3>) -> Self {
        let mut builder = PathBuilder::new();
        builder.push(SectionKind::Body, points);
        builder.finish()
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn frames(&self) -> Option<&[Frame]> {
        self.frames.as_deref()
    }

    #[must_use]
    pub fn sections(&self) -> &[PathSection] {
        &self.sections
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points of the first section of `kind`.
    #[must_use]
    pub fn section(&self, kind: SectionKind) -> Option<&[Point3]> {
        self.sections
            .iter()
            .find(|section| section.kind == kind)
            .map(|section| &self.points[section.first..=section.last])
    }

    #[must_use]
    pub fn first(&self) -> Option<Point3> {
        self.points.first().copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<Point3> {
        self.points.last().copied()
    }

    /// `(min z, max z)` over all points.
    #[must_use]
    pub fn z_range(&self) -> (f64, f64) {
        self.points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.z), hi.max(p.z))
            })
    }

    /// Accumulated length along the path.
    #[must_use]
    pub fn arc_lengths(&self) -> Vec<f64> {
        cumulative_lengths(&self.points)
    }

    /// Attaches rotation-minimizing frames, seeded from `normal_hint`.
    #[must_use]
    pub fn with_frames(mut self, normal_hint: Vec3) -> Self {
        self.frames = Some(polyline_frames(&self.points, normal_hint));
        self
    }

    /// Every point finite, at least two points, no two consecutive points
    /// coincide.
    pub fn validate_distinct(&self, family: SpringFamily) -> Result<(), SpringError> {
        if self.points.len() < 2 {
            return Err(SpringError::degenerate(
                family,
                "centerline",
                format!("needs at least 2 points, got {}", self.points.len()),
            ));
        }
        if let Some(index) = self.points.iter().position(|p| !p.is_finite()) {
            return Err(SpringError::degenerate(
                family,
                "centerline",
                format!("point {index} is not finite"),
            ));
        }
        let tol = Tolerance::ZERO_LENGTH;
        if let Some(index) = self
            .points
            .windows(2)
            .position(|pair| tol.is_zero_length(pair[0].distance_to(pair[1])))
        {
            return Err(SpringError::degenerate(
                family,
                "centerline",
                format!("points {index} and {} coincide", index + 1),
            ));
        }
        Ok(())
    }

    /// Z never decreases within the sections of `kind` (all points when
    /// `kind` is `None`).
    pub fn validate_monotonic_z(
        &self,
        family: SpringFamily,
        kind: Option<SectionKind>,
    ) -> Result<(), SpringError> {
        let points = match kind {
            Some(kind) => self.section(kind).unwrap_or(&[]),
            None => &self.points,
        };
        if let Some(index) = points.windows(2).position(|pair| pair[1].z < pair[0].z) {
            return Err(SpringError::degenerate(
                family,
                "centerline",
                format!("z decreases after point {index}"),
            ));
        }
        Ok(())
    }
}

/// Concatenates sections, dropping the first point of a section when it
/// coincides with the current end of the path.
#[derive(Debug, Default)]
pub struct PathBuilder {
    points: Vec<Point3>,
    sections: Vec<PathSection>,
}

impl PathBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: SectionKind, points: impl IntoIterator<Item = Point3>) {
        let mut iter = points.into_iter().peekable();
        let joins = match (self.points.last(), iter.peek()) {
            (Some(last), Some(next)) => Tolerance::ZERO_LENGTH.approx_eq_point3(*last, *next),
            _ => false,
        };
        let first = if joins {
            iter.next();
            self.points.len() - 1
        } else {
            self.points.len()
        };
        self.points.extend(iter);
        if self.points.is_empty() {
            return;
        }
        let last = self.points.len() - 1;
        if last > first || (last == first && self.sections.is_empty()) {
            self.sections.push(PathSection { kind, first, last });
        }
    }

    #[must_use]
    pub fn finish(self) -> CenterlinePath {
        CenterlinePath {
            points: self.points,
            frames: None,
            sections: self.sections,
        }
    }
}

/// Profile swept along the centerline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CrossSection {
    #[serde(rename_all = "camelCase")]
    Circular { wire_diameter: f64 },
    Rectangular { width: f64, thickness: f64 },
}

/// Everything the CAD kernel needs to build one spring body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringCenterline {
    pub family: SpringFamily,
    pub spring: NormalizedSpring,
    pub path: CenterlinePath,
    pub cross_section: CrossSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grinding: Option<EndGrinding>,
    /// Fractional turn count per point (arc springs).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn_counts: Option<Vec<f64>>,
}
