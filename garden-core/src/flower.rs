//! Flower model builder.
//!
//! [`build`] turns a [`FlowerParameters`] value into a hierarchical part
//! list: one stem, one receptacle at stem top, petals fanned radially around
//! the vertical axis, and leaves distributed along the stem. The build is
//! fully deterministic; all randomness lives in the parameter generator.

use std::f32::consts::{FRAC_PI_3, FRAC_PI_4, TAU};

use glam::Quat;

use crate::color::{LEAF_GREEN, Rgb, STEM_GREEN};
use crate::params::FlowerParameters;
use crate::shape::{Outline, leaf_outline, petal_outline};

/// Petal tilt away from vertical so the bloom fans outward.
pub const PETAL_TILT: f32 = FRAC_PI_4;
/// Leaf tilt away from vertical.
pub const LEAF_TILT: f32 = FRAC_PI_3;
/// Receptacle radius as a fraction of the petal size.
pub const CENTER_RADIUS_FACTOR: f32 = 0.3;
/// Self-emission applied to the receptacle so its hue reads at night.
pub const CENTER_EMISSIVE: f32 = 0.2;
/// Self-emission applied to petals.
pub const PETAL_EMISSIVE: f32 = 0.1;

/// Stem cylinder rising from the ground anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct StemPart {
    pub height: f32,
    pub thickness: f32,
    pub color: Rgb,
}

/// Receptacle sphere at the stem top.
#[derive(Clone, Debug, PartialEq)]
pub struct CenterPart {
    pub radius: f32,
    pub color: Rgb,
    pub emissive: f32,
}

/// One petal surface, anchored at the stem top.
#[derive(Clone, Debug, PartialEq)]
pub struct PetalPart {
    /// Rotation around the vertical axis, radians.
    pub azimuth: f32,
    /// Tilt away from vertical, radians.
    pub tilt: f32,
    pub scale: f32,
    pub color: Rgb,
    pub emissive: f32,
}

/// One leaf surface, anchored on the stem at `height`.
#[derive(Clone, Debug, PartialEq)]
pub struct LeafPart {
    pub height: f32,
    pub azimuth: f32,
    pub tilt: f32,
    pub scale: f32,
    pub color: Rgb,
}

impl PetalPart {
    /// Orientation of the petal plane: yaw around the vertical axis, then
    /// the outward tilt.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.azimuth) * Quat::from_rotation_z(self.tilt)
    }
}

impl LeafPart {
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.azimuth) * Quat::from_rotation_z(self.tilt)
    }
}

/// Complete renderable description of one flower, local to its ground
/// anchor. Carries the resolved silhouettes so renderers need no shape
/// lookups of their own.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowerModel {
    pub stem: StemPart,
    pub center: CenterPart,
    pub petals: Vec<PetalPart>,
    pub leaves: Vec<LeafPart>,
    pub petal_outline: Outline,
    pub leaf_outline: Outline,
}

/// Builds the full part hierarchy for one parameter set.
///
/// The i-th petal sits at azimuth `i · 2π / petal_count`; the i-th leaf at
/// height `stem_height · (i+1) / (leaf_count+1)` and azimuth
/// `i · 2π / leaf_count`. Zero petals yields a bloomless but valid model;
/// zero leaves yields an empty leaf list (the azimuth divisor is only used
/// when `leaf_count > 0`).
pub fn build(params: &FlowerParameters) -> FlowerModel {
    let stem = StemPart {
        height: params.stem_height,
        thickness: params.stem_thickness,
        color: STEM_GREEN,
    };

    let center = CenterPart {
        radius: params.petal_size * CENTER_RADIUS_FACTOR,
        color: params.center_color,
        emissive: CENTER_EMISSIVE,
    };

    let petals = (0..params.petal_count)
        .map(|i| PetalPart {
            azimuth: i as f32 * TAU / params.petal_count as f32,
            tilt: PETAL_TILT,
            scale: params.petal_size,
            color: params.petal_color,
            emissive: PETAL_EMISSIVE,
        })
        .collect();

    let leaves = (0..params.leaf_count)
        .map(|i| LeafPart {
            height: params.stem_height * (i + 1) as f32 / (params.leaf_count + 1) as f32,
            azimuth: i as f32 * TAU / params.leaf_count as f32,
            tilt: LEAF_TILT,
            scale: params.leaf_size,
            color: LEAF_GREEN,
        })
        .collect();

    FlowerModel {
        stem,
        center,
        petals,
        leaves,
        petal_outline: petal_outline(params.petal_shape),
        leaf_outline: leaf_outline(params.leaf_shape),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::PetalShape;

    fn degrees(rad: f32) -> f32 {
        rad.to_degrees()
    }

    #[test]
    fn part_counts_match_parameters() {
        let mut p = FlowerParameters::default();
        p.petal_count = 13;
        p.leaf_count = 5;
        let m = build(&p);
        assert_eq!(m.petals.len(), 13);
        assert_eq!(m.leaves.len(), 5);
    }

    #[test]
    fn stem_propagates_height_and_thickness() {
        let mut p = FlowerParameters::default();
        p.stem_height = 7.25;
        p.stem_thickness = 0.4;
        let m = build(&p);
        assert_eq!(m.stem.height, 7.25);
        assert_eq!(m.stem.thickness, 0.4);
        assert_eq!(m.stem.color, STEM_GREEN);
    }

    #[test]
    fn petals_fan_at_even_azimuths() {
        let mut p = FlowerParameters::default();
        p.petal_count = 6;
        let m = build(&p);
        for (i, petal) in m.petals.iter().enumerate() {
            let expect = i as f32 * 360.0 / 6.0;
            assert!((degrees(petal.azimuth) - expect).abs() < 1e-3);
            assert_eq!(petal.tilt, PETAL_TILT);
        }
        // Azimuths are unique modulo 360.
        for i in 0..m.petals.len() {
            for j in (i + 1)..m.petals.len() {
                assert!((m.petals[i].azimuth - m.petals[j].azimuth).abs() > 1e-4);
            }
        }
    }

    #[test]
    fn leaves_sit_at_even_heights_along_the_stem() {
        let mut p = FlowerParameters::default();
        p.stem_height = 3.0;
        p.leaf_count = 2;
        let m = build(&p);
        assert!((m.leaves[0].height - 1.0).abs() < 1e-5);
        assert!((m.leaves[1].height - 2.0).abs() < 1e-5);
        assert_eq!(m.leaves[0].tilt, LEAF_TILT);
        assert_eq!(m.leaves[0].color, LEAF_GREEN);
    }

    #[test]
    fn zero_leaves_and_zero_petals_are_tolerated() {
        let mut p = FlowerParameters::default();
        p.leaf_count = 0;
        p.petal_count = 0;
        let m = build(&p);
        assert!(m.leaves.is_empty());
        assert!(m.petals.is_empty());
        // The rest of the model is still structurally complete.
        assert!(m.stem.height > 0.0);
        assert!(m.center.radius > 0.0);
    }

    #[test]
    fn center_derives_from_petal_size_and_color() {
        let mut p = FlowerParameters::default();
        p.petal_size = 2.0;
        p.center_color = Rgb::new(1, 2, 3);
        let m = build(&p);
        assert!((m.center.radius - 0.6).abs() < 1e-6);
        assert_eq!(m.center.color, Rgb::new(1, 2, 3));
        assert_eq!(m.center.emissive, CENTER_EMISSIVE);
    }

    #[test]
    fn build_is_deterministic() {
        let p = FlowerParameters::default();
        assert_eq!(build(&p), build(&p));
    }

    #[test]
    fn eight_round_petals_with_two_leaves_scenario() {
        let mut p = FlowerParameters::default();
        p.petal_count = 8;
        p.leaf_count = 2;
        p.stem_height = 3.0;
        p.petal_shape = PetalShape::Round;
        let m = build(&p);

        assert_eq!(m.petals.len(), 8);
        for (i, petal) in m.petals.iter().enumerate() {
            assert!((degrees(petal.azimuth) - i as f32 * 45.0).abs() < 1e-3);
        }
        assert_eq!(m.leaves.len(), 2);
        assert!((m.leaves[0].height - 1.0).abs() < 1e-5);
        assert!((m.leaves[1].height - 2.0).abs() < 1e-5);
        assert_eq!(m.stem.height, 3.0);
    }
}
