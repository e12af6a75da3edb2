//! Interactive 3D garden viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the garden state (planted
//! flowers, clock, pending template) and implements [`eframe::App`] to
//! render the scene and drive all interaction through an egui UI.

use std::sync::mpsc::{Receiver, TryRecvError};

use eframe::App;
use garden_core::{
    color::{GROUND_GREEN, Rgb},
    garden::{FlowerInstance, Garden},
    lighting::{DAY_AMBIENT, Lighting, NIGHT_AMBIENT},
    params::{FlowerParameters, random_parameters},
    shape::{LeafShape, PetalShape},
    suggest::{NullSuggester, ParameterPatch, Suggester, SuggestionRequest},
};
use glam::{Quat, Vec2, Vec3};
use rand::Rng;

use crate::camera::OrbitCamera;

/// Half extent of the square area used for random planting positions.
const RANDOM_PLANT_HALF_EXTENT: f32 = 20.0;
/// Half extent of the rendered ground plot and grid.
const PLOT_HALF_EXTENT: f32 = 50.0;

/// Main application state for the interactive garden.
///
/// [`Viewer`] glues together:
/// - The simulation core: [`Garden`] plus the pending [`FlowerParameters`]
///   template consumed by the next plant action.
/// - The orbit camera and painter-based scene rendering.
/// - The AI suggestion collaborator, polled non-blockingly each frame.
///
/// Planting policy: in random mode every plant draws a fresh random
/// parameter set and adopts it as the template; design mode plants the live
/// template as-is.
pub struct Viewer {
    garden: Garden,
    template: FlowerParameters,
    random_mode: bool,

    camera: OrbitCamera,
    rng: rand::rngs::ThreadRng,

    theme: String,
    suggester: Box<dyn Suggester>,
    pending_suggestion: Option<Receiver<ParameterPatch>>,
}

impl Viewer {
    /// Creates a viewer over a garden seeded with the showcase flowers.
    pub fn new() -> Self {
        let mut garden = Garden::new();
        garden.seed_initial_garden();

        Self {
            garden,
            template: FlowerParameters::default(),
            random_mode: false,
            camera: OrbitCamera::default(),
            rng: rand::rng(),
            theme: String::new(),
            suggester: Box::new(NullSuggester),
            pending_suggestion: None,
        }
    }

    /// Plants at a resolved ground point using the current planting policy.
    fn plant_at_ground(&mut self, pos: Vec3) {
        let params = if self.random_mode {
            let fresh = random_parameters(&mut self.rng);
            // Random mode adopts what it just planted as the new template.
            self.template = fresh.clone();
            fresh
        } else {
            self.template.clone()
        };

        if let Err(e) = params.validate() {
            log::error!("refusing to plant: {e}");
            return;
        }
        self.garden.plant_at(pos, params);
    }

    /// Plants somewhere in the central plot, like the panel's plant button.
    fn plant_at_random_position(&mut self) {
        let x = (self.rng.random::<f32>() - 0.5) * 2.0 * RANDOM_PLANT_HALF_EXTENT;
        let z = (self.rng.random::<f32>() - 0.5) * 2.0 * RANDOM_PLANT_HALF_EXTENT;
        self.plant_at_ground(Vec3::new(x, 0.0, z));
    }

    /// Sends the current theme to the suggestion collaborator.
    ///
    /// At most one request is in flight; the reply is merged by
    /// [`Viewer::poll_suggestion`] on a later frame.
    fn request_suggestion(&mut self) {
        if self.theme.trim().is_empty() || self.pending_suggestion.is_some() {
            return;
        }
        let request = SuggestionRequest {
            theme: self.theme.trim().to_string(),
        };
        self.pending_suggestion = Some(self.suggester.suggest(&request));
    }

    /// Non-blocking check for a suggestion reply.
    ///
    /// An arrived patch is merged into the pending template only (never into
    /// planted flowers) and switches the panel back to design mode so the
    /// result is visible. An empty patch leaves the template unchanged.
    fn poll_suggestion(&mut self) {
        let Some(rx) = &self.pending_suggestion else {
            return;
        };
        match rx.try_recv() {
            Ok(patch) => {
                if patch.is_empty() {
                    log::debug!("suggestion returned no usable fields");
                } else {
                    self.template = patch.apply(&self.template);
                    self.random_mode = false;
                }
                self.pending_suggestion = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                log::warn!("suggestion service went away without replying");
                self.pending_suggestion = None;
            }
        }
    }

    /// Helper to draw a labeled `f32` slider.
    fn labeled_slider_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::Slider::new(value, range));
        });
    }

    /// Helper to draw a labeled `u32` slider.
    fn labeled_slider_u32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut u32,
        range: std::ops::RangeInclusive<u32>,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::Slider::new(value, range));
        });
    }

    /// Helper to draw an `Rgb` color picker.
    fn color_picker(ui: &mut egui::Ui, label: &str, color: &mut Rgb) {
        ui.horizontal(|ui| {
            ui.label(label);
            let mut srgb = [color.r, color.g, color.b];
            if ui.color_edit_button_srgb(&mut srgb).changed() {
                *color = Rgb::new(srgb[0], srgb[1], srgb[2]);
            }
        });
    }

    /// Builds the top panel (clock slider, plant/clear/shuffle actions).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut t = self.garden.time_of_day();
                let icon = if t > 6.0 && t < 18.0 { "☀" } else { "🌙" };
                ui.label(icon);
                if ui
                    .add(
                        egui::Slider::new(&mut t, 0.0..=24.0)
                            .step_by(0.5)
                            .text("time of day"),
                    )
                    .changed()
                {
                    self.garden.set_time_of_day(t);
                }

                ui.separator();

                if ui.button("🌱 Plant").clicked() {
                    self.plant_at_random_position();
                }
                if ui.button("🎲 Shuffle").clicked() {
                    self.template = random_parameters(&mut self.rng);
                }
                if ui.button("🗑 Clear").clicked() {
                    self.garden.clear();
                }
            });
        });
    }

    /// Builds the bottom status bar (clock readout, flower counts).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let t = self.garden.time_of_day();
                ui.label(format!(
                    "{:02}:{:02}",
                    t.floor() as u32 % 24,
                    (t.fract() * 60.0) as u32
                ));
                ui.separator();
                ui.label(format!("bloomed = {}", self.garden.bloomed_count()));
                ui.label(format!("flowers = {}", self.garden.flowers().len()));
            });
        });
    }

    /// Builds the right-hand template panel (mode, shapes, colors, sliders,
    /// AI theme input).
    fn ui_template_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("template_panel")
            .resizable(true)
            .default_width(230.0)
            .show(ctx, |ui| {
                ui.heading("Flower template");

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.selectable_label(self.random_mode, "🎲 Random").clicked() {
                        self.random_mode = true;
                    }
                    if ui.selectable_label(!self.random_mode, "✏ Design").clicked() {
                        self.random_mode = false;
                    }
                });

                ui.separator();
                ui.label("AI theme");
                ui.text_edit_singleline(&mut self.theme);
                let idle = self.pending_suggestion.is_none();
                if ui
                    .add_enabled(idle, egui::Button::new(if idle { "✨ Suggest" } else { "…" }))
                    .clicked()
                {
                    self.request_suggestion();
                }

                ui.separator();
                ui.add_enabled_ui(!self.random_mode, |ui| {
                    ui.label("Petal shape");
                    ui.horizontal_wrapped(|ui| {
                        for shape in PetalShape::ALL {
                            if ui
                                .selectable_label(
                                    self.template.petal_shape == shape,
                                    shape.to_string(),
                                )
                                .clicked()
                            {
                                self.template.petal_shape = shape;
                            }
                        }
                    });

                    ui.label("Leaf shape");
                    ui.horizontal_wrapped(|ui| {
                        for shape in LeafShape::ALL {
                            if ui
                                .selectable_label(
                                    self.template.leaf_shape == shape,
                                    shape.to_string(),
                                )
                                .clicked()
                            {
                                self.template.leaf_shape = shape;
                            }
                        }
                    });

                    ui.separator();
                    Self::color_picker(ui, "petal color:", &mut self.template.petal_color);
                    Self::color_picker(ui, "center color:", &mut self.template.center_color);

                    ui.separator();
                    Self::labeled_slider_u32(ui, "petals:", &mut self.template.petal_count, 0..=64);
                    Self::labeled_slider_f32(
                        ui,
                        "petal size:",
                        &mut self.template.petal_size,
                        0.2..=3.0,
                    );
                    Self::labeled_slider_f32(
                        ui,
                        "stem height:",
                        &mut self.template.stem_height,
                        1.0..=15.0,
                    );
                    Self::labeled_slider_f32(
                        ui,
                        "stem girth:",
                        &mut self.template.stem_thickness,
                        0.02..=0.5,
                    );
                    Self::labeled_slider_u32(ui, "leaves:", &mut self.template.leaf_count, 0..=10);
                    Self::labeled_slider_f32(
                        ui,
                        "leaf size:",
                        &mut self.template.leaf_size,
                        0.2..=2.0,
                    );
                });

                ui.separator();
                if ui.button("Reset template").clicked() {
                    self.template = FlowerParameters::default();
                }
            });
    }

    /// Builds the central panel: scene rendering plus orbit/zoom/plant input.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            if response.dragged() {
                self.camera.orbit(response.drag_delta());
            }

            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 && response.hovered() {
                self.camera.zoom(scroll);
            }

            // Ground-gated click planting.
            if response.clicked()
                && let Some(screen) = response.interact_pointer_pos()
                && let Some(hit) = self.camera.pick_ground(screen, rect)
            {
                self.plant_at_ground(hit);
            }

            let frame = self.garden.frame();
            let light = frame.lighting;

            self.draw_sky(&painter, rect, &light);
            self.draw_ground(&painter, rect, &light);
            self.draw_sun(&painter, rect, &light);

            // Painter's algorithm: far flowers first.
            let eye = self.camera.eye();
            let mut order: Vec<&FlowerInstance> = frame.flowers.iter().collect();
            order.sort_by(|a, b| {
                let da = (a.position - eye).length_squared();
                let db = (b.position - eye).length_squared();
                db.total_cmp(&da)
            });
            for inst in order {
                self.draw_flower(&painter, rect, inst, &light);
            }
        });
    }

    fn draw_sky(&self, painter: &egui::Painter, rect: egui::Rect, light: &Lighting) {
        let day = daylight_factor(light);
        let sky = lerp_color((10, 12, 34), (120, 170, 225), day);
        painter.rect_filled(rect, egui::CornerRadius::ZERO, sky);

        if light.stars_visible {
            // Fixed pseudo-random star field; same pattern every frame.
            for i in 0..140 {
                let fx = hash01(i as f32 * 12.9898);
                let fy = hash01(i as f32 * 78.233);
                let p = egui::pos2(
                    rect.left() + fx * rect.width(),
                    rect.top() + fy * rect.height() * 0.6,
                );
                let r = 0.5 + hash01(i as f32 * 3.7) * 1.2;
                painter.circle_filled(p, r, egui::Color32::from_gray(220));
            }
        }
    }

    fn draw_ground(&self, painter: &egui::Painter, rect: egui::Rect, light: &Lighting) {
        let h = PLOT_HALF_EXTENT;
        let corners = [
            Vec3::new(-h, 0.0, -h),
            Vec3::new(h, 0.0, -h),
            Vec3::new(h, 0.0, h),
            Vec3::new(-h, 0.0, h),
        ];
        let projected: Option<Vec<egui::Pos2>> = corners
            .iter()
            .map(|&c| self.camera.project(c, rect))
            .collect();
        if let Some(points) = projected {
            painter.add(egui::Shape::convex_polygon(
                points,
                lit_color(GROUND_GREEN, light, 0.0),
                egui::Stroke::NONE,
            ));
        }

        // Grid lines over the plot.
        let grid = egui::Stroke::new(1.0, lit_color(Rgb::new(0x3d, 0x6d, 0x36), light, 0.0));
        let mut d = -h;
        while d <= h {
            for (a, b) in [
                (Vec3::new(d, 0.0, -h), Vec3::new(d, 0.0, h)),
                (Vec3::new(-h, 0.0, d), Vec3::new(h, 0.0, d)),
            ] {
                if let (Some(pa), Some(pb)) =
                    (self.camera.project(a, rect), self.camera.project(b, rect))
                {
                    painter.line_segment([pa, pb], grid);
                }
            }
            d += 5.0;
        }
    }

    fn draw_sun(&self, painter: &egui::Painter, rect: egui::Rect, light: &Lighting) {
        if light.sun_position.y <= 0.0 {
            return;
        }
        if let Some(p) = self.camera.project(light.sun_position, rect) {
            painter.circle_filled(p, 14.0, egui::Color32::from_rgb(255, 236, 160));
        }
    }

    fn draw_flower(
        &self,
        painter: &egui::Painter,
        rect: egui::Rect,
        inst: &FlowerInstance,
        light: &Lighting,
    ) {
        let s = inst.bloom_scale;
        if s <= 0.0 {
            return;
        }
        let model = inst.model;
        let base = inst.position;
        let top = base + Vec3::Y * (model.stem.height * s);
        let (Some(base_px), Some(top_px)) = (
            self.camera.project(base, rect),
            self.camera.project(top, rect),
        ) else {
            return;
        };

        let world_h = (model.stem.height * s).max(1e-4);
        let px_per_unit = (top_px - base_px).length() / world_h;

        // Stem.
        let stem_w = (model.stem.thickness * 2.0 * s * px_per_unit).max(1.0);
        painter.line_segment(
            [base_px, top_px],
            egui::Stroke::new(stem_w, lit_color(model.stem.color, light, 0.0)),
        );

        // Leaves along the stem.
        let leaf_ring = model.leaf_outline.flatten(6);
        for leaf in &model.leaves {
            let anchor = base + Vec3::Y * (leaf.height * s);
            if let Some(points) =
                self.project_ring(rect, &leaf_ring, anchor, leaf.rotation(), leaf.scale * s)
            {
                painter.add(egui::Shape::convex_polygon(
                    points,
                    lit_color(leaf.color, light, 0.0),
                    egui::Stroke::NONE,
                ));
            }
        }

        // Petals fan from the stem top.
        let petal_ring = model.petal_outline.flatten(8);
        for petal in &model.petals {
            if let Some(points) =
                self.project_ring(rect, &petal_ring, top, petal.rotation(), petal.scale * s)
            {
                painter.add(egui::Shape::convex_polygon(
                    points,
                    lit_color(petal.color, light, petal.emissive),
                    egui::Stroke::NONE,
                ));
            }
        }

        // Receptacle over the petal fan.
        let r = (model.center.radius * s * px_per_unit).max(1.5);
        painter.circle_filled(
            top_px,
            r,
            lit_color(model.center.color, light, model.center.emissive),
        );
    }

    /// Projects a flattened outline into the scene at `anchor` with the
    /// given orientation and uniform scale.
    fn project_ring(
        &self,
        rect: egui::Rect,
        ring: &[Vec2],
        anchor: Vec3,
        rotation: Quat,
        scale: f32,
    ) -> Option<Vec<egui::Pos2>> {
        ring.iter()
            .map(|q| {
                let local = rotation * Vec3::new(q.x * scale, q.y * scale, 0.0);
                self.camera.project(anchor + local, rect)
            })
            .collect()
    }
}

/// Normalized day strength derived from the ambient level.
fn daylight_factor(light: &Lighting) -> f32 {
    ((light.ambient - NIGHT_AMBIENT) / (DAY_AMBIENT - NIGHT_AMBIENT)).clamp(0.0, 1.0)
}

fn lerp_color(a: (u8, u8, u8), b: (u8, u8, u8), t: f32) -> egui::Color32 {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    egui::Color32::from_rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Shades a material color by the scene lights plus a self-emission lift.
fn lit_color(color: Rgb, light: &Lighting, emissive: f32) -> egui::Color32 {
    let f = (light.ambient * 0.4 + light.directional * 0.15).clamp(0.2, 1.0) + emissive;
    let [r, g, b] = color.to_f32();
    let ch = |v: f32| ((v * f).clamp(0.0, 1.0) * 255.0) as u8;
    egui::Color32::from_rgb(ch(r), ch(g), ch(b))
}

fn hash01(x: f32) -> f32 {
    ((x.sin() * 43758.547).fract() + 1.0).fract()
}

impl App for Viewer {
    /// eframe callback that advances the simulation and builds all panels.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_suggestion();

        let dt = ctx.input(|i| i.stable_dt).min(0.1);
        self.garden.tick(dt);

        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_template_panel(ctx);
        self.ui_central_panel(ctx);

        // Keep animating while anything is still sprouting or a suggestion
        // reply is outstanding.
        if self.garden.bloomed_count() < self.garden.flowers().len()
            || self.pending_suggestion.is_some()
        {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    /// Suggester stub that replies immediately with a fixed patch.
    struct FixedSuggester(ParameterPatch);

    impl Suggester for FixedSuggester {
        fn suggest(&mut self, _request: &SuggestionRequest) -> Receiver<ParameterPatch> {
            let (tx, rx) = channel();
            tx.send(self.0.clone()).unwrap();
            rx
        }
    }

    #[test]
    fn design_mode_plants_the_live_template() {
        let mut viewer = Viewer::new();
        viewer.garden.clear();
        viewer.random_mode = false;
        viewer.template.petal_count = 23;

        viewer.plant_at_ground(Vec3::new(2.0, 0.0, 2.0));

        let planted = &viewer.garden.flowers()[0];
        assert_eq!(planted.params.petal_count, 23);
        assert_eq!(planted.params, viewer.template);
    }

    #[test]
    fn random_mode_adopts_the_planted_config_as_template() {
        let mut viewer = Viewer::new();
        viewer.garden.clear();
        viewer.random_mode = true;

        viewer.plant_at_ground(Vec3::new(0.0, 0.0, 0.0));

        let planted = &viewer.garden.flowers()[0];
        assert_eq!(planted.params, viewer.template);
    }

    #[test]
    fn planting_forces_the_ground_plane() {
        let mut viewer = Viewer::new();
        viewer.garden.clear();
        viewer.plant_at_ground(Vec3::new(5.0, 3.0, -3.0));
        assert_eq!(
            viewer.garden.flowers()[0].position,
            Vec3::new(5.0, 0.0, -3.0)
        );
    }

    #[test]
    fn suggestion_reply_merges_into_the_template_only() {
        let mut viewer = Viewer::new();
        let before_planted: Vec<FlowerParameters> = viewer
            .garden
            .flowers()
            .iter()
            .map(|f| f.params.clone())
            .collect();

        viewer.suggester = Box::new(FixedSuggester(ParameterPatch {
            petal_count: Some(31),
            stem_height: Some(9.0),
            ..Default::default()
        }));
        viewer.random_mode = true;
        viewer.theme = "aurora over a frozen lake".into();

        viewer.request_suggestion();
        assert!(viewer.pending_suggestion.is_some());
        viewer.poll_suggestion();

        assert!(viewer.pending_suggestion.is_none());
        assert_eq!(viewer.template.petal_count, 31);
        assert_eq!(viewer.template.stem_height, 9.0);
        // A merged suggestion switches back to design mode.
        assert!(!viewer.random_mode);
        // Already-planted flowers are untouched.
        let after: Vec<FlowerParameters> = viewer
            .garden
            .flowers()
            .iter()
            .map(|f| f.params.clone())
            .collect();
        assert_eq!(after, before_planted);
    }

    #[test]
    fn empty_suggestion_reply_leaves_the_template_unchanged() {
        let mut viewer = Viewer::new();
        let before = viewer.template.clone();
        viewer.theme = "anything".into();

        // The default NullSuggester replies with the empty patch.
        viewer.request_suggestion();
        viewer.poll_suggestion();

        assert!(viewer.pending_suggestion.is_none());
        assert_eq!(viewer.template, before);
    }

    #[test]
    fn blank_theme_sends_no_request() {
        let mut viewer = Viewer::new();
        viewer.theme = "   ".into();
        viewer.request_suggestion();
        assert!(viewer.pending_suggestion.is_none());
    }

    #[test]
    fn random_position_planting_stays_in_the_plot() {
        let mut viewer = Viewer::new();
        viewer.garden.clear();
        for _ in 0..50 {
            viewer.plant_at_random_position();
        }
        for f in viewer.garden.flowers() {
            assert!(f.position.x.abs() <= RANDOM_PLANT_HALF_EXTENT);
            assert!(f.position.z.abs() <= RANDOM_PLANT_HALF_EXTENT);
            assert_eq!(f.position.y, 0.0);
        }
    }
}
