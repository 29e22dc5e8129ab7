//! Visualisation: palette construction, temperature → colour mapping, and
//! viewport geometry for the display collaborator.

pub mod color_map;
pub mod layout;
pub mod palette;

pub use color_map::{ColorMapper, ColorQuantization, IndexFrame, RangeMode, VisualizationRange};
pub use palette::{Palette, Ramp, RampKind, RampSegment, Rgb};
