//! Garden scene controller.
//!
//! [`Garden`] owns the ordered collection of planted flowers, the current
//! time-of-day, and the per-frame composition of growth, geometry and
//! lighting into a renderable [`SceneFrame`]. It is the single entry point
//! the UI and the AI collaborator feed into; all mutation happens on the one
//! frame loop, so no locking is involved.

use glam::Vec3;

use crate::flower::{self, FlowerModel};
use crate::growth::GrowthState;
use crate::lighting::{self, Lighting};
use crate::params::FlowerParameters;
use crate::types::FlowerId;

/// Half extent of the square ground plane.
pub const GROUND_HALF_EXTENT: f32 = 250.0;

/// One flower rooted in the garden.
///
/// Parameters, position and the built model are fixed at planting time; only
/// the growth state mutates afterwards.
#[derive(Clone, Debug)]
pub struct PlantedFlower {
    pub id: FlowerId,
    pub position: Vec3,
    pub params: FlowerParameters,
    pub model: FlowerModel,
    pub growth: GrowthState,
}

/// Per-frame render entry for one flower.
#[derive(Clone, Copy, Debug)]
pub struct FlowerInstance<'a> {
    pub id: FlowerId,
    pub position: Vec3,
    pub bloom_scale: f32,
    pub model: &'a FlowerModel,
}

/// Everything the render layer needs for one frame.
pub struct SceneFrame<'a> {
    pub lighting: Lighting,
    pub flowers: Vec<FlowerInstance<'a>>,
}

/// Extracts the planting point from a ground-surface hit.
///
/// Callers must already have gated on "the picked object is the ground";
/// this only flattens the hit onto the plane.
pub fn ground_point(hit: Vec3) -> Vec3 {
    Vec3::new(hit.x, 0.0, hit.z)
}

#[derive(Debug)]
pub struct Garden {
    flowers: Vec<PlantedFlower>,
    next_id: FlowerId,
    time_of_day: f32,
}

impl Default for Garden {
    fn default() -> Self {
        Self::new()
    }
}

impl Garden {
    /// An empty garden at noon.
    pub fn new() -> Self {
        Self {
            flowers: Vec::new(),
            next_id: 0,
            time_of_day: 12.0,
        }
    }

    /// Plants a flower at the given ground position.
    ///
    /// The y coordinate is forced to 0, the model is built once up front,
    /// and growth starts from seed. Returns the fresh id.
    pub fn plant_at(&mut self, position: Vec3, params: FlowerParameters) -> FlowerId {
        let id = self.next_id;
        self.next_id += 1;

        let model = flower::build(&params);
        log::debug!(
            "planting flower {id} at ({:.2}, {:.2}) with {} petals",
            position.x,
            position.z,
            params.petal_count
        );

        self.flowers.push(PlantedFlower {
            id,
            position: ground_point(position),
            params,
            model,
            growth: GrowthState::seed(),
        });
        id
    }

    /// Discards every planted flower and its growth state.
    pub fn clear(&mut self) {
        log::debug!("clearing {} flowers", self.flowers.len());
        self.flowers.clear();
    }

    /// Advances growth of every non-bloomed flower by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        for f in self.flowers.iter_mut().filter(|f| !f.growth.is_bloomed()) {
            f.growth.advance(dt);
        }
    }

    /// Sets the scene clock, wrapped into [0, 24).
    pub fn set_time_of_day(&mut self, t: f32) {
        self.time_of_day = t.rem_euclid(24.0);
    }

    pub fn time_of_day(&self) -> f32 {
        self.time_of_day
    }

    pub fn flowers(&self) -> &[PlantedFlower] {
        &self.flowers
    }

    /// Number of flowers that have finished growing.
    pub fn bloomed_count(&self) -> usize {
        self.flowers.iter().filter(|f| f.growth.is_bloomed()).count()
    }

    /// Composes the current render output: lighting for the scene clock plus
    /// the flowers in planting order with their bloom scales.
    pub fn frame(&self) -> SceneFrame<'_> {
        SceneFrame {
            lighting: lighting::lighting_at(self.time_of_day),
            flowers: self
                .flowers
                .iter()
                .map(|f| FlowerInstance {
                    id: f.id,
                    position: f.position,
                    bloom_scale: f.growth.scale(),
                    model: &f.model,
                })
                .collect(),
        }
    }

    /// Plants the two showcase flowers the garden opens with.
    pub fn seed_initial_garden(&mut self) {
        use crate::color::Rgb;
        use crate::shape::{LeafShape, PetalShape};

        self.plant_at(
            Vec3::ZERO,
            FlowerParameters {
                petal_color: Rgb::new(0xff, 0x99, 0xcc),
                petal_count: 16,
                petal_size: 1.5,
                petal_shape: PetalShape::Round,
                stem_height: 5.0,
                stem_thickness: 0.2,
                leaf_count: 4,
                leaf_size: 1.2,
                leaf_shape: LeafShape::Oval,
                center_color: Rgb::new(0xff, 0xd7, 0x00),
                density: 1.0,
            },
        );
        self.plant_at(
            Vec3::new(-10.0, 0.0, 5.0),
            FlowerParameters {
                petal_color: Rgb::new(0xcc, 0x99, 0xff),
                petal_count: 12,
                petal_size: 1.0,
                petal_shape: PetalShape::Pointy,
                stem_height: 4.0,
                stem_thickness: 0.1,
                leaf_count: 2,
                leaf_size: 0.8,
                leaf_shape: LeafShape::Long,
                center_color: Rgb::new(0xff, 0xff, 0xff),
                density: 1.0,
            },
        );
    }
}
