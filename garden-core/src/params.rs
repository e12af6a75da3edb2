use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::GardenError;
use crate::shape::{LeafShape, PetalShape};

/// Immutable appearance/growth inputs for one flower.
///
/// All numeric fields must be finite and non-negative; see
/// [`FlowerParameters::validate`]. `density` is reserved for clustering and
/// currently unused beyond its default of 1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowerParameters {
    pub petal_color: Rgb,
    pub petal_count: u32,
    pub petal_size: f32,
    pub petal_shape: PetalShape,
    pub stem_height: f32,
    pub stem_thickness: f32,
    pub leaf_count: u32,
    pub leaf_size: f32,
    pub leaf_shape: LeafShape,
    pub center_color: Rgb,
    pub density: f32,
}

impl Default for FlowerParameters {
    /// The starting template: a pink, round, eight-petal flower.
    fn default() -> Self {
        Self {
            petal_color: Rgb::new(0xff, 0x69, 0xb4),
            petal_count: 8,
            petal_size: 1.0,
            petal_shape: PetalShape::Round,
            stem_height: 3.0,
            stem_thickness: 0.1,
            leaf_count: 2,
            leaf_size: 0.8,
            leaf_shape: LeafShape::Oval,
            center_color: Rgb::new(0xff, 0xff, 0x00),
            density: 1.0,
        }
    }
}

impl FlowerParameters {
    /// Checks the numeric invariants: every scalar finite and non-negative.
    pub fn validate(&self) -> Result<(), GardenError> {
        let fields = [
            ("petalSize", self.petal_size),
            ("stemHeight", self.stem_height),
            ("stemThickness", self.stem_thickness),
            ("leafSize", self.leaf_size),
            ("density", self.density),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(GardenError::InvalidParameter { field, value });
            }
        }
        Ok(())
    }
}

/// Draws a fresh random parameter set from the given generator.
///
/// This is the single home of parameter randomness (the "blind box" source);
/// the shape library and model builder stay fully deterministic. The ranges
/// track the design panel's sliders.
pub fn random_parameters(rng: &mut impl Rng) -> FlowerParameters {
    let petal_hue = rng.random_range(0.0..360.0);
    // Center hue offset keeps the receptacle from blending into the petals.
    let center_hue = petal_hue + rng.random_range(120.0..240.0);

    FlowerParameters {
        petal_color: Rgb::from_hsl(petal_hue, 0.8, 0.65),
        petal_count: rng.random_range(5..=24),
        petal_size: rng.random_range(0.5..=2.0),
        petal_shape: PetalShape::ALL[rng.random_range(0..PetalShape::ALL.len())],
        stem_height: rng.random_range(1.0..=8.0),
        stem_thickness: rng.random_range(0.05..=0.25),
        leaf_count: rng.random_range(0..=6),
        leaf_size: rng.random_range(0.5..=1.5),
        leaf_shape: LeafShape::ALL[rng.random_range(0..LeafShape::ALL.len())],
        center_color: Rgb::from_hsl(center_hue, 0.9, 0.6),
        density: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn default_template_is_valid() {
        assert!(FlowerParameters::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_nan_and_negative_scalars() {
        let mut p = FlowerParameters::default();
        p.stem_height = f32::NAN;
        assert!(matches!(
            p.validate(),
            Err(GardenError::InvalidParameter {
                field: "stemHeight",
                ..
            })
        ));

        let mut p = FlowerParameters::default();
        p.petal_size = -1.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn random_parameters_stay_in_slider_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let p = random_parameters(&mut rng);
            assert!(p.validate().is_ok());
            assert!((5..=24).contains(&p.petal_count));
            assert!((0.5..=2.0).contains(&p.petal_size));
            assert!((1.0..=8.0).contains(&p.stem_height));
            assert!((0.05..=0.25).contains(&p.stem_thickness));
            assert!(p.leaf_count <= 6);
            assert!((0.5..=1.5).contains(&p.leaf_size));
            assert_eq!(p.density, 1.0);
        }
    }

    #[test]
    fn random_parameters_are_reproducible_per_seed() {
        let a = random_parameters(&mut StdRng::seed_from_u64(42));
        let b = random_parameters(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn parameters_serialize_as_camel_case() {
        let json = serde_json::to_string(&FlowerParameters::default()).unwrap();
        assert!(json.contains("\"petalColor\":\"#ff69b4\""));
        assert!(json.contains("\"petalShape\":\"ROUND\""));
        assert!(json.contains("\"leafShape\":\"OVAL\""));
    }
}
