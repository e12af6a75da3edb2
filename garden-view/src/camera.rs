//! Software orbit camera for the garden viewer.
//!
//! Projects world-space points onto the egui panel and casts pointer rays
//! back onto the ground plane for click planting. Drag orbits around the
//! target, scroll zooms; pitch is clamped so the camera never dips below the
//! horizon.

use garden_core::garden::GROUND_HALF_EXTENT;
use glam::{Mat4, Vec3, Vec4};

pub struct OrbitCamera {
    pub target: Vec3,
    /// Azimuth around the target, radians.
    pub yaw: f32,
    /// Elevation above the ground plane, radians.
    pub pitch: f32,
    pub distance: f32,
    pub fov_y: f32,
}

const MIN_PITCH: f32 = 0.05;
const MAX_PITCH: f32 = 1.45;
const MIN_DISTANCE: f32 = 4.0;
const MAX_DISTANCE: f32 = 150.0;

impl Default for OrbitCamera {
    /// Starts where the original garden opens: up and to the side, looking
    /// at the center of the plot.
    fn default() -> Self {
        Self {
            target: Vec3::new(0.0, 2.0, 0.0),
            yaw: std::f32::consts::FRAC_PI_4,
            pitch: 0.52,
            distance: 40.0,
            fov_y: 45_f32.to_radians(),
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        let dir = Vec3::new(
            self.pitch.cos() * self.yaw.cos(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.sin(),
        );
        self.target + dir * self.distance
    }

    fn view_proj(&self, rect: egui::Rect) -> Mat4 {
        let aspect = rect.width() / rect.height().max(1.0);
        Mat4::perspective_rh(self.fov_y, aspect, 0.1, 500.0)
            * Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    /// Projects a world point into panel coordinates.
    ///
    /// Returns `None` for points at or behind the camera plane.
    pub fn project(&self, world: Vec3, rect: egui::Rect) -> Option<egui::Pos2> {
        let clip = self.view_proj(rect) * Vec4::new(world.x, world.y, world.z, 1.0);
        if clip.w <= 1e-5 {
            return None;
        }
        let ndc = clip / clip.w;
        let center = rect.center();
        Some(egui::pos2(
            center.x + ndc.x * rect.width() * 0.5,
            center.y - ndc.y * rect.height() * 0.5,
        ))
    }

    /// Casts the pixel ray onto the y = 0 plane.
    ///
    /// This is the "picked object is the ground" gate for planting: the
    /// result is `None` when the ray misses the plane or lands outside the
    /// ground extent, and a point with y = 0 otherwise.
    pub fn pick_ground(&self, screen: egui::Pos2, rect: egui::Rect) -> Option<Vec3> {
        let center = rect.center();
        let ndc_x = (screen.x - center.x) / (rect.width() * 0.5);
        let ndc_y = (center.y - screen.y) / (rect.height() * 0.5);

        let inv = self.view_proj(rect).inverse();
        let unproject = |z: f32| {
            let p = inv * Vec4::new(ndc_x, ndc_y, z, 1.0);
            Vec3::new(p.x, p.y, p.z) / p.w
        };
        let near = unproject(0.0);
        let far = unproject(1.0);
        let dir = (far - near).normalize_or_zero();

        if dir.y.abs() < 1e-6 {
            return None;
        }
        let t = -near.y / dir.y;
        if t <= 0.0 {
            return None;
        }

        let hit = near + dir * t;
        if hit.x.abs() > GROUND_HALF_EXTENT || hit.z.abs() > GROUND_HALF_EXTENT {
            return None;
        }
        Some(Vec3::new(hit.x, 0.0, hit.z))
    }

    /// Applies a pointer drag as an orbit around the target.
    pub fn orbit(&mut self, delta: egui::Vec2) {
        self.yaw += delta.x * 0.01;
        self.pitch = (self.pitch + delta.y * 0.01).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Applies a scroll amount as a zoom toward/away from the target.
    pub fn zoom(&mut self, scroll: f32) {
        let factor = (1.0 - scroll * 0.001).clamp(0.5, 2.0);
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}
