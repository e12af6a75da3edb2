//! Silhouette library for petal and leaf archetypes.
//!
//! Every archetype maps to a fixed, closed 2D outline anchored at the origin
//! and extending along +Y (the growth axis). Outlines are pure values: the
//! same archetype always yields the same curve, so callers may cache them
//! freely. The enums are closed; adding an archetype means extending the enum
//! and the corresponding `match`, which the compiler enforces.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::GardenError;

/// Petal silhouette archetypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PetalShape {
    Round,
    Pointy,
    Heart,
    Slender,
}

/// Leaf silhouette archetypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LeafShape {
    Oval,
    Serrated,
    Long,
}

impl PetalShape {
    pub const ALL: [PetalShape; 4] = [
        PetalShape::Round,
        PetalShape::Pointy,
        PetalShape::Heart,
        PetalShape::Slender,
    ];
}

impl LeafShape {
    pub const ALL: [LeafShape; 3] = [LeafShape::Oval, LeafShape::Serrated, LeafShape::Long];
}

impl fmt::Display for PetalShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PetalShape::Round => "ROUND",
            PetalShape::Pointy => "POINTY",
            PetalShape::Heart => "HEART",
            PetalShape::Slender => "SLENDER",
        };
        f.write_str(name)
    }
}

impl fmt::Display for LeafShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LeafShape::Oval => "OVAL",
            LeafShape::Serrated => "SERRATED",
            LeafShape::Long => "LONG",
        };
        f.write_str(name)
    }
}

impl FromStr for PetalShape {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROUND" => Ok(PetalShape::Round),
            "POINTY" => Ok(PetalShape::Pointy),
            "HEART" => Ok(PetalShape::Heart),
            "SLENDER" => Ok(PetalShape::Slender),
            _ => Err(GardenError::UnknownArchetype(s.to_string())),
        }
    }
}

impl FromStr for LeafShape {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OVAL" => Ok(LeafShape::Oval),
            "SERRATED" => Ok(LeafShape::Serrated),
            "LONG" => Ok(LeafShape::Long),
            _ => Err(GardenError::UnknownArchetype(s.to_string())),
        }
    }
}

impl TryFrom<String> for PetalShape {
    type Error = GardenError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PetalShape> for String {
    fn from(s: PetalShape) -> Self {
        s.to_string()
    }
}

impl TryFrom<String> for LeafShape {
    type Error = GardenError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LeafShape> for String {
    fn from(s: LeafShape) -> Self {
        s.to_string()
    }
}

/// One command of a 2D outline path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { ctrl: Vec2, to: Vec2 },
    CubicTo { ctrl1: Vec2, ctrl2: Vec2, to: Vec2 },
    Close,
}

/// A closed 2D silhouette as an ordered command list.
#[derive(Clone, Debug, PartialEq)]
pub struct Outline {
    cmds: Vec<PathCmd>,
}

impl Outline {
    fn new(cmds: Vec<PathCmd>) -> Self {
        Self { cmds }
    }

    pub fn commands(&self) -> &[PathCmd] {
        &self.cmds
    }

    /// Flattens the outline into the vertices of a closed polygon.
    ///
    /// Each curved segment contributes `segments_per_curve` points; straight
    /// segments contribute their endpoint. The start point is not duplicated
    /// at the end; consumers treat the result as an implicitly closed ring.
    pub fn flatten(&self, segments_per_curve: usize) -> Vec<Vec2> {
        let n = segments_per_curve.max(1);
        let mut pts = Vec::new();
        let mut cur = Vec2::ZERO;

        for cmd in &self.cmds {
            match *cmd {
                PathCmd::MoveTo(p) => {
                    cur = p;
                    pts.push(p);
                }
                PathCmd::LineTo(p) => {
                    cur = p;
                    pts.push(p);
                }
                PathCmd::QuadTo { ctrl, to } => {
                    for i in 1..=n {
                        let t = i as f32 / n as f32;
                        pts.push(quad_point(cur, ctrl, to, t));
                    }
                    cur = to;
                }
                PathCmd::CubicTo { ctrl1, ctrl2, to } => {
                    for i in 1..=n {
                        let t = i as f32 / n as f32;
                        pts.push(cubic_point(cur, ctrl1, ctrl2, to, t));
                    }
                    cur = to;
                }
                PathCmd::Close => {}
            }
        }

        // Drop a final vertex that merely re-touches the start.
        if pts.len() > 1 && (pts[pts.len() - 1] - pts[0]).length_squared() < 1e-10 {
            pts.pop();
        }
        pts
    }
}

fn quad_point(p0: Vec2, c: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u) + c * (2.0 * u * t) + p1 * (t * t)
}

fn cubic_point(p0: Vec2, c1: Vec2, c2: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + p1 * (t * t * t)
}

/// Returns the unit petal silhouette for an archetype.
pub fn petal_outline(shape: PetalShape) -> Outline {
    let v = Vec2::new;
    match shape {
        // Two mirrored cubic lobes meeting at the apex.
        PetalShape::Round => Outline::new(vec![
            PathCmd::MoveTo(v(0.0, 0.0)),
            PathCmd::CubicTo {
                ctrl1: v(0.5, 0.5),
                ctrl2: v(0.5, 1.5),
                to: v(0.0, 2.0),
            },
            PathCmd::CubicTo {
                ctrl1: v(-0.5, 1.5),
                ctrl2: v(-0.5, 0.5),
                to: v(0.0, 0.0),
            },
            PathCmd::Close,
        ]),
        // Sharp lens out of straight segments.
        PetalShape::Pointy => Outline::new(vec![
            PathCmd::MoveTo(v(0.0, 0.0)),
            PathCmd::LineTo(v(0.3, 1.0)),
            PathCmd::LineTo(v(0.0, 2.5)),
            PathCmd::LineTo(v(-0.3, 1.0)),
            PathCmd::Close,
        ]),
        // Wide double lobe with an indented apex.
        PetalShape::Heart => Outline::new(vec![
            PathCmd::MoveTo(v(0.0, 0.0)),
            PathCmd::CubicTo {
                ctrl1: v(1.0, 1.0),
                ctrl2: v(1.0, 2.5),
                to: v(0.0, 2.0),
            },
            PathCmd::CubicTo {
                ctrl1: v(-1.0, 2.5),
                ctrl2: v(-1.0, 1.0),
                to: v(0.0, 0.0),
            },
            PathCmd::Close,
        ]),
        // Thin ellipse, base touching the origin.
        PetalShape::Slender => ellipse_outline(0.0, 1.5, 0.1, 1.5),
    }
}

/// Returns the unit leaf silhouette for an archetype.
pub fn leaf_outline(shape: LeafShape) -> Outline {
    let v = Vec2::new;
    match shape {
        LeafShape::Oval => Outline::new(vec![
            PathCmd::MoveTo(v(0.0, 0.0)),
            PathCmd::QuadTo {
                ctrl: v(0.4, 0.5),
                to: v(0.0, 1.2),
            },
            PathCmd::QuadTo {
                ctrl: v(-0.4, 0.5),
                to: v(0.0, 0.0),
            },
            PathCmd::Close,
        ]),
        // Toothed edge from straight segments, symmetric about the axis.
        LeafShape::Serrated => Outline::new(vec![
            PathCmd::MoveTo(v(0.0, 0.0)),
            PathCmd::LineTo(v(0.18, 0.15)),
            PathCmd::LineTo(v(0.12, 0.3)),
            PathCmd::LineTo(v(0.3, 0.45)),
            PathCmd::LineTo(v(0.18, 0.6)),
            PathCmd::LineTo(v(0.28, 0.78)),
            PathCmd::LineTo(v(0.12, 0.9)),
            PathCmd::LineTo(v(0.0, 1.2)),
            PathCmd::LineTo(v(-0.12, 0.9)),
            PathCmd::LineTo(v(-0.28, 0.78)),
            PathCmd::LineTo(v(-0.18, 0.6)),
            PathCmd::LineTo(v(-0.3, 0.45)),
            PathCmd::LineTo(v(-0.12, 0.3)),
            PathCmd::LineTo(v(-0.18, 0.15)),
            PathCmd::Close,
        ]),
        LeafShape::Long => Outline::new(vec![
            PathCmd::MoveTo(v(0.0, 0.0)),
            PathCmd::QuadTo {
                ctrl: v(0.15, 0.7),
                to: v(0.0, 1.8),
            },
            PathCmd::QuadTo {
                ctrl: v(-0.15, 0.7),
                to: v(0.0, 0.0),
            },
            PathCmd::Close,
        ]),
    }
}

/// Approximates an axis-aligned ellipse with four cubic arcs, starting and
/// ending at the bottom point `(cx, cy - ry)`.
fn ellipse_outline(cx: f32, cy: f32, rx: f32, ry: f32) -> Outline {
    // Cubic-arc circle constant.
    const KAPPA: f32 = 0.552_284_8;
    let v = Vec2::new;
    let kx = rx * KAPPA;
    let ky = ry * KAPPA;

    Outline::new(vec![
        PathCmd::MoveTo(v(cx, cy - ry)),
        PathCmd::CubicTo {
            ctrl1: v(cx + kx, cy - ry),
            ctrl2: v(cx + rx, cy - ky),
            to: v(cx + rx, cy),
        },
        PathCmd::CubicTo {
            ctrl1: v(cx + rx, cy + ky),
            ctrl2: v(cx + kx, cy + ry),
            to: v(cx, cy + ry),
        },
        PathCmd::CubicTo {
            ctrl1: v(cx - kx, cy + ry),
            ctrl2: v(cx - rx, cy + ky),
            to: v(cx - rx, cy),
        },
        PathCmd::CubicTo {
            ctrl1: v(cx - rx, cy - ky),
            ctrl2: v(cx - kx, cy - ry),
            to: v(cx, cy - ry),
        },
        PathCmd::Close,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_outline_starts_with_move_and_ends_with_close() {
        let outlines: Vec<Outline> = PetalShape::ALL
            .iter()
            .map(|&s| petal_outline(s))
            .chain(LeafShape::ALL.iter().map(|&s| leaf_outline(s)))
            .collect();

        for o in &outlines {
            let cmds = o.commands();
            assert!(matches!(cmds.first(), Some(PathCmd::MoveTo(_))));
            assert!(matches!(cmds.last(), Some(PathCmd::Close)));
        }
    }

    #[test]
    fn outlines_are_deterministic() {
        for s in PetalShape::ALL {
            assert_eq!(petal_outline(s), petal_outline(s));
        }
        for s in LeafShape::ALL {
            assert_eq!(leaf_outline(s), leaf_outline(s));
        }
    }

    #[test]
    fn petal_archetypes_are_distinct() {
        let all: Vec<Outline> = PetalShape::ALL.iter().map(|&s| petal_outline(s)).collect();
        for i in 0..all.len() {
            for j in (i + 1)..all.len() {
                assert_ne!(all[i], all[j]);
            }
        }
    }

    #[test]
    fn flatten_produces_a_usable_polygon() {
        let pts = petal_outline(PetalShape::Round).flatten(8);
        // Two cubics at 8 segments each plus the start point, start not
        // re-duplicated at the end.
        assert_eq!(pts.len(), 16);
        // The apex of the round petal lies at (0, 2).
        let apex = pts
            .iter()
            .cloned()
            .fold(Vec2::ZERO, |a, p| if p.y > a.y { p } else { a });
        assert!((apex - Vec2::new(0.0, 2.0)).length() < 1e-4);
    }

    #[test]
    fn flatten_of_pointy_keeps_straight_corners() {
        let pts = petal_outline(PetalShape::Pointy).flatten(8);
        assert_eq!(
            pts,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(0.3, 1.0),
                Vec2::new(0.0, 2.5),
                Vec2::new(-0.3, 1.0),
            ]
        );
    }

    #[test]
    fn archetype_names_roundtrip_through_strings() {
        for s in PetalShape::ALL {
            assert_eq!(s.to_string().parse::<PetalShape>().unwrap(), s);
        }
        for s in LeafShape::ALL {
            assert_eq!(s.to_string().parse::<LeafShape>().unwrap(), s);
        }
    }

    #[test]
    fn unknown_archetype_fails_fast() {
        let err = "TRIANGLE".parse::<PetalShape>().unwrap_err();
        assert!(matches!(err, GardenError::UnknownArchetype(_)));
        assert!("oval".parse::<LeafShape>().is_err(), "names are case-exact");
    }
}
