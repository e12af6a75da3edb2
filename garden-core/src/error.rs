use thiserror::Error;

/// Errors surfaced by the fallible seams of the garden core.
///
/// Geometry, growth and lighting are total functions and never return these;
/// the only real failure surfaces are string parsing (colors, archetype
/// names) and parameter validation.
#[derive(Debug, Error)]
pub enum GardenError {
    /// An archetype name outside the closed shape enums reached a parser.
    /// Callers are constrained to the enumerated set, so this indicates a
    /// caller or data bug; it is never silently mapped to a default.
    #[error("unknown shape archetype `{0}`")]
    UnknownArchetype(String),

    /// A color string was not of the form `#rrggbb`.
    #[error("invalid color string `{0}`")]
    InvalidColor(String),

    /// A numeric flower parameter was non-finite or negative.
    #[error("invalid flower parameter `{field}`: {value}")]
    InvalidParameter { field: &'static str, value: f32 },
}
