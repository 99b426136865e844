//! chromapick core library
//!
//! Color transformation and adjustment-state engine for the chromapick color
//! picker. Rendering is left to the host; this crate owns the current color,
//! slider adjustments, shade/tint palettes and swatch sets.

pub mod adjust;
pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod image;
pub mod input;
pub mod listener;
pub mod math;
pub mod palette;
pub mod random;
pub mod swatch;

pub use adjust::{
    AdjustmentBuffer, AdjustmentKind, SliderValues, coerce_slider_input, coerce_slider_value,
};
pub use color::{ColorFormat, ColorValue, Hsl, Hsv, Rgb};
pub use config::{DEFAULT_COLOR, DEFAULT_SWATCHES, MAX_RANDOM_SWATCHES, PickerConfig};
pub use engine::{
    ChangeMode, ColorCallback, ColorEngine, ColorEngineBuilder, EngineState, PickerId,
};
pub use error::{PickerError, PickerResult};
pub use image::{ImageExtractor, ImageRef, PngPaletteExtractor};
pub use input::{DELETION_KEY, KeyEvent};
pub use listener::{ListenerHandle, ListenerKind, ListenerRegistry, PickerListeners};
pub use math::{ColorMath, StandardColorMath};
pub use palette::{MixRamp, PaletteGenerator, RampGenerator};
pub use random::{RandomColorGenerator, RandomColorSource, collect_distinct};
pub use swatch::{DisplayMode, SwatchOrigin, SwatchSet, SwatchSetManager};
