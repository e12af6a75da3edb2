//! Contract with the external AI parameter-suggestion service.
//!
//! The service is an opaque collaborator: the core hands it a free-text
//! theme and at some later point receives a *partial* parameter set over a
//! channel. The core never blocks on the reply and never propagates a
//! failure; anything unparseable collapses to the empty patch, which leaves
//! the pending template unchanged.

use std::sync::mpsc::{Receiver, channel};

use serde::Deserialize;

use crate::color::Rgb;
use crate::params::FlowerParameters;
use crate::shape::{LeafShape, PetalShape};

/// A free-text theme forwarded to the suggestion service.
#[derive(Clone, Debug)]
pub struct SuggestionRequest {
    pub theme: String,
}

/// Partial [`FlowerParameters`]: unspecified fields keep their prior values
/// when applied. Mirrors the service's camelCase JSON wire format.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParameterPatch {
    pub petal_color: Option<Rgb>,
    pub petal_count: Option<u32>,
    pub petal_size: Option<f32>,
    pub petal_shape: Option<PetalShape>,
    pub stem_height: Option<f32>,
    pub stem_thickness: Option<f32>,
    pub leaf_count: Option<u32>,
    pub leaf_size: Option<f32>,
    pub leaf_shape: Option<LeafShape>,
    pub center_color: Option<Rgb>,
    pub density: Option<f32>,
}

impl ParameterPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges the patch over a base parameter set.
    ///
    /// Numeric fields that are non-finite or not positive are skipped with a
    /// warning instead of poisoning the template.
    pub fn apply(&self, base: &FlowerParameters) -> FlowerParameters {
        let mut out = base.clone();

        let mut take_scalar = |field: &str, slot: &mut f32, value: Option<f32>| {
            if let Some(v) = value {
                if v.is_finite() && v > 0.0 {
                    *slot = v;
                } else {
                    log::warn!("suggestion field `{field}` rejected: {v}");
                }
            }
        };

        take_scalar("petalSize", &mut out.petal_size, self.petal_size);
        take_scalar("stemHeight", &mut out.stem_height, self.stem_height);
        take_scalar(
            "stemThickness",
            &mut out.stem_thickness,
            self.stem_thickness,
        );
        take_scalar("leafSize", &mut out.leaf_size, self.leaf_size);
        take_scalar("density", &mut out.density, self.density);

        if let Some(c) = self.petal_color {
            out.petal_color = c;
        }
        if let Some(c) = self.center_color {
            out.center_color = c;
        }
        if let Some(n) = self.petal_count {
            out.petal_count = n;
        }
        if let Some(n) = self.leaf_count {
            out.leaf_count = n;
        }
        if let Some(s) = self.petal_shape {
            out.petal_shape = s;
        }
        if let Some(s) = self.leaf_shape {
            out.leaf_shape = s;
        }
        out
    }
}

/// Parses a raw service response. Total: garbage yields the empty patch.
pub fn parse_patch(json: &str) -> ParameterPatch {
    match serde_json::from_str(json) {
        Ok(patch) => patch,
        Err(e) => {
            log::warn!("unparseable suggestion response: {e}");
            ParameterPatch::default()
        }
    }
}

/// Fire-and-forget suggestion collaborator.
///
/// Implementations reply on the returned channel whenever they are done; the
/// caller polls it (`try_recv`) once per frame and merges any arrival into
/// the pending template.
pub trait Suggester {
    fn suggest(&mut self, request: &SuggestionRequest) -> Receiver<ParameterPatch>;
}

/// Offline default: replies immediately with the empty patch.
#[derive(Debug, Default)]
pub struct NullSuggester;

impl Suggester for NullSuggester {
    fn suggest(&mut self, request: &SuggestionRequest) -> Receiver<ParameterPatch> {
        log::debug!("no suggestion backend configured for theme {:?}", request.theme);
        let (tx, rx) = channel();
        // Receiver still works after the sender drops; the value is buffered.
        let _ = tx.send(ParameterPatch::default());
        rx
    }
}
