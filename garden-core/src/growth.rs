/// Growth progress per second; full bloom takes roughly 0.83 s.
pub const GROWTH_RATE: f32 = 1.2;

/// Seed-to-bloom state of one planted flower.
///
/// The scalar starts at 0, rises monotonically under [`GrowthState::advance`]
/// and freezes at 1. It doubles as the uniform bloom scale applied to the
/// whole flower model. Not persisted: a recreated flower starts over at 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrowthState {
    scalar: f32,
}

impl GrowthState {
    pub fn seed() -> Self {
        Self { scalar: 0.0 }
    }

    /// Advances the scalar by `dt` seconds, clamped to 1.
    ///
    /// A no-op once bloomed; callers should skip bloomed instances entirely
    /// to bound per-frame cost.
    pub fn advance(&mut self, dt: f32) {
        if self.scalar < 1.0 {
            self.scalar = (self.scalar + dt * GROWTH_RATE).min(1.0);
        }
    }

    /// Uniform scale factor for the flower model, in [0, 1].
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scalar
    }

    #[inline]
    pub fn is_bloomed(&self) -> bool {
        self.scalar >= 1.0
    }
}
