//! The picker engine.
//!
//! [`ColorEngine`] owns one picker's [`EngineState`] and is the only thing
//! that mutates it. Every host event (slider move, swatch click, key press,
//! finished image upload) maps to one synchronous method call.

use crate::adjust::{AdjustmentBuffer, AdjustmentKind, SliderValues, coerce_slider_input};
use crate::color::{ColorFormat, ColorValue, Rgb};
use crate::config::{MAX_RANDOM_SWATCHES, PickerConfig};
use crate::image::{ImageExtractor, ImageRef, PngPaletteExtractor};
use crate::input::KeyEvent;
use crate::listener::{ListenerKind, ListenerRegistry, PickerListeners};
use crate::math::{ColorMath, StandardColorMath};
use crate::palette::{MixRamp, PaletteGenerator, RampGenerator};
use crate::random::{RandomColorGenerator, RandomColorSource};
use crate::swatch::{DisplayMode, SwatchSet, SwatchSetManager};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Callback receiving a color string.
pub type ColorCallback = Box<dyn FnMut(&str)>;

/// Unique identifier for a picker instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PickerId(Uuid);

impl PickerId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PickerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Who owns the current color.
///
/// Fixed when the engine is built. In controlled mode the change handler is
/// the source of truth: the engine reports new colors to it and only updates
/// its own copy when the host pushes one back through
/// [`ColorEngine::set_color`].
pub enum ChangeMode {
    Controlled(ColorCallback),
    Uncontrolled,
}

impl fmt::Debug for ChangeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeMode::Controlled(_) => f.write_str("Controlled"),
            ChangeMode::Uncontrolled => f.write_str("Uncontrolled"),
        }
    }
}

/// Everything a picker instance remembers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineState {
    pub id: PickerId,
    pub color: ColorValue,
    pub format: ColorFormat,
    pub adjustments: AdjustmentBuffer,
    pub sliders: SliderValues,
    pub swatches: SwatchSetManager,
    #[serde(skip)]
    pub image: Option<ImageRef>,
}

/// Builder for [`ColorEngine`].
pub struct ColorEngineBuilder {
    config: PickerConfig,
    on_change: Option<ColorCallback>,
    on_swatch_hover: Option<ColorCallback>,
    math: Option<Box<dyn ColorMath>>,
    ramp: Option<Box<dyn RampGenerator>>,
    random: Option<Box<dyn RandomColorSource>>,
    extractor: Option<Box<dyn ImageExtractor>>,
}

impl ColorEngineBuilder {
    /// Register a change handler, making the engine controlled.
    pub fn on_change(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// Register a hover handler; hovering a swatch then also selects it.
    pub fn on_swatch_hover(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.on_swatch_hover = Some(Box::new(handler));
        self
    }

    pub fn color_math(mut self, math: Box<dyn ColorMath>) -> Self {
        self.math = Some(math);
        self
    }

    pub fn ramp(mut self, ramp: Box<dyn RampGenerator>) -> Self {
        self.ramp = Some(ramp);
        self
    }

    pub fn random_source(mut self, random: Box<dyn RandomColorSource>) -> Self {
        self.random = Some(random);
        self
    }

    pub fn image_extractor(mut self, extractor: Box<dyn ImageExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn build(self) -> ColorEngine {
        let config = self.config;
        let math = self.math.unwrap_or_else(|| Box::new(StandardColorMath));
        let ramp = self
            .ramp
            .unwrap_or_else(|| Box::new(MixRamp::new(config.ramp_step)));

        let color = math.parse(&config.initial_color).unwrap_or_else(|| {
            log::warn!(
                "Invalid initial color {:?}, using default",
                config.initial_color
            );
            default_color()
        });
        let swatches = valid_colors(math.as_ref(), config.swatches);

        let change = match self.on_change {
            Some(handler) => ChangeMode::Controlled(handler),
            None => ChangeMode::Uncontrolled,
        };

        let state = EngineState {
            id: PickerId::new(),
            color,
            format: config.default_format,
            adjustments: AdjustmentBuffer::new(),
            sliders: SliderValues::default(),
            swatches: SwatchSetManager::new(swatches),
            image: None,
        };
        log::debug!(
            "Picker {} created ({:?}) with {}",
            state.id,
            change,
            state.color.original_input()
        );

        ColorEngine {
            state,
            change,
            on_swatch_hover: self.on_swatch_hover,
            max_colors_from_image: config.max_colors_from_image,
            random_swatch_count: config.random_swatch_count,
            random_retry_limit: config.random_retry_limit,
            math,
            palette: PaletteGenerator::new(ramp),
            random: self
                .random
                .unwrap_or_else(|| Box::new(RandomColorGenerator::new())),
            extractor: self
                .extractor
                .unwrap_or_else(|| Box::new(PngPaletteExtractor)),
            listeners: ListenerRegistry::new(),
            last_emitted: None,
        }
    }
}

/// The built-in default color.
fn default_color() -> ColorValue {
    ColorValue::from_rgb(Rgb::new(8.0, 141.0, 165.0), 1.0)
}

/// Keep only strings the color math accepts.
fn valid_colors(math: &dyn ColorMath, colors: Vec<String>) -> Vec<String> {
    colors
        .into_iter()
        .filter(|color| {
            let valid = math.parse(color).is_some();
            if !valid {
                log::warn!("Dropping invalid swatch {:?}", color);
            }
            valid
        })
        .collect()
}

/// Color picker engine: current color, adjustments, and swatch sets.
pub struct ColorEngine {
    state: EngineState,
    change: ChangeMode,
    on_swatch_hover: Option<ColorCallback>,
    max_colors_from_image: usize,
    random_swatch_count: usize,
    random_retry_limit: usize,
    math: Box<dyn ColorMath>,
    palette: PaletteGenerator,
    random: Box<dyn RandomColorSource>,
    extractor: Box<dyn ImageExtractor>,
    listeners: ListenerRegistry,
    // Hex of the last color handed to `emit_color`.
    last_emitted: Option<String>,
}

impl fmt::Debug for ColorEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorEngine")
            .field("state", &self.state)
            .field("change", &self.change)
            .finish_non_exhaustive()
    }
}

impl ColorEngine {
    pub fn builder(config: PickerConfig) -> ColorEngineBuilder {
        ColorEngineBuilder {
            config,
            on_change: None,
            on_swatch_hover: None,
            math: None,
            ramp: None,
            random: None,
            extractor: None,
        }
    }

    /// Uncontrolled engine with default collaborators.
    pub fn new(config: PickerConfig) -> Self {
        Self::builder(config).build()
    }

    pub fn id(&self) -> PickerId {
        self.state.id
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn color(&self) -> &ColorValue {
        &self.state.color
    }

    /// Current color as hex.
    pub fn hex(&self) -> String {
        self.math.to_format(&self.state.color, ColorFormat::Hex)
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self.change, ChangeMode::Controlled(_))
    }

    // --- Formats ---

    pub fn formats(&self) -> &'static [ColorFormat] {
        &ColorFormat::ALL
    }

    pub fn format(&self) -> ColorFormat {
        self.state.format
    }

    pub fn set_format(&mut self, format: ColorFormat) {
        self.state.format = format;
    }

    /// Current color in the current format, as copied to the clipboard.
    pub fn formatted(&self) -> String {
        self.math.to_format(&self.state.color, self.state.format)
    }

    // --- Host property updates ---

    /// Accept a new color from the host. Invalid input is ignored and the
    /// previous color kept. Returns whether the color was accepted.
    ///
    /// A color the engine did not just emit counts as a new selection and
    /// starts a fresh adjustment history. Echoing back the last emitted
    /// color keeps the history, so controlled slider chains still work.
    pub fn set_color(&mut self, color: &str) -> bool {
        match self.math.parse(color) {
            Some(value) => {
                let hex = self.math.to_format(&value, ColorFormat::Hex);
                if self.last_emitted.as_deref() != Some(hex.as_str()) {
                    self.reset_history();
                }
                self.state.color = value;
                true
            }
            None => {
                log::warn!("Picker {}: rejected color {:?}", self.state.id, color);
                false
            }
        }
    }

    /// Replace the base swatches from the host.
    pub fn set_swatches(&mut self, swatches: Vec<String>) {
        let swatches = valid_colors(self.math.as_ref(), swatches);
        self.state.swatches.replace_base(swatches);
    }

    // --- Adjustments ---

    pub fn slider(&self, kind: AdjustmentKind) -> i32 {
        self.state.sliders.get(kind)
    }

    pub fn adjustments(&self) -> &AdjustmentBuffer {
        &self.state.adjustments
    }

    /// Apply a slider move. The result is always computed from the color
    /// held before this slider was first moved, so repeated moves never
    /// compound and moving back to 0 restores the baseline.
    pub fn handle(&mut self, kind: AdjustmentKind, value: i32) {
        let current = self.state.color.original_input().to_string();
        let baseline = self.state.adjustments.capture(kind, &current).to_string();

        let Some(base) = self.math.parse(&baseline) else {
            log::warn!(
                "Picker {}: baseline {:?} no longer parses",
                self.state.id,
                baseline
            );
            self.state.adjustments.clear();
            return;
        };

        let adjusted = self.math.adjust(&base, kind, value as f64);
        self.state.sliders.set(kind, value);
        log::debug!(
            "{} {} from {} -> {}",
            kind,
            value,
            baseline,
            adjusted.original_input()
        );
        self.emit_color(adjusted);
    }

    /// Apply a slider move from raw input text.
    pub fn handle_input(&mut self, kind: AdjustmentKind, raw: &str) {
        self.handle(kind, coerce_slider_input(raw));
    }

    fn reset_history(&mut self) {
        self.state.adjustments.clear();
        self.state.sliders.reset();
    }

    /// Route a new color to whoever owns it.
    fn emit_color(&mut self, color: ColorValue) {
        let hex = self.math.to_format(&color, ColorFormat::Hex);
        match &mut self.change {
            ChangeMode::Controlled(handler) => handler(&hex),
            ChangeMode::Uncontrolled => self.state.color = color,
        }
        self.last_emitted = Some(hex);
    }

    // --- Swatches ---

    pub fn display_mode(&self) -> DisplayMode {
        self.state.swatches.mode()
    }

    pub fn displayed_swatches(&self) -> &SwatchSet {
        self.state.swatches.displayed()
    }

    pub fn swatches(&self) -> &SwatchSetManager {
        &self.state.swatches
    }

    /// User picked a swatch. Starts a fresh adjustment history; the display
    /// mode is left alone so a shade or tint can be picked in place.
    pub fn select_swatch(&mut self, color: &str) -> bool {
        let Some(value) = self.math.parse(color) else {
            log::warn!("Picker {}: rejected swatch {:?}", self.state.id, color);
            return false;
        };
        self.reset_history();
        self.emit_color(value);
        true
    }

    /// Pointer moved over a swatch. Only acts when a hover handler is set.
    pub fn hover_swatch(&mut self, color: &str) -> bool {
        let Some(handler) = self.on_swatch_hover.as_mut() else {
            return false;
        };
        handler(color);
        self.select_swatch(color)
    }

    pub fn random_swatch_count(&self) -> usize {
        self.random_swatch_count
    }

    /// Replace the base swatches with `count` distinct random colors. Fewer
    /// are kept if the random source cannot supply enough within the retry
    /// limit. Returns how many were collected.
    pub fn generate_random_swatches(&mut self, count: usize) -> usize {
        let count = if count > MAX_RANDOM_SWATCHES {
            log::warn!(
                "Picker {}: {} random swatches requested, capping at {}",
                self.state.id,
                count,
                MAX_RANDOM_SWATCHES
            );
            MAX_RANDOM_SWATCHES
        } else {
            count
        };
        let collected = self.state.swatches.generate_random(
            self.random.as_mut(),
            count,
            self.random_retry_limit,
        );
        self.reset_history();
        collected
    }

    /// Show colors extracted from an image and make the first one current.
    /// An empty (or entirely invalid) list changes nothing.
    pub fn derive_swatches_from_image(&mut self, colors: Vec<String>) -> bool {
        let colors = valid_colors(self.math.as_ref(), colors);
        let Some(first) = colors.first().and_then(|c| self.math.parse(c)) else {
            log::warn!("Picker {}: image produced no swatches", self.state.id);
            return false;
        };

        self.state.swatches.set_image_derived(colors);
        self.reset_history();
        self.emit_color(first);
        true
    }

    // --- Palettes ---

    pub fn generate_shades(&mut self) {
        let shades = self.palette.shades(&self.state.color);
        self.state.swatches.set_shades(shades);
    }

    pub fn generate_tints(&mut self) {
        let tints = self.palette.tints(&self.state.color);
        self.state.swatches.set_tints(tints);
    }

    /// Show a cached set without recomputing it.
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.state.swatches.set_mode(mode);
    }

    /// Drop shades and tints and show the base set.
    pub fn reset(&mut self) {
        self.state.swatches.reset_palettes();
    }

    // --- Image ---

    pub fn image(&self) -> Option<&ImageRef> {
        self.state.image.as_ref()
    }

    pub fn max_colors_from_image(&self) -> usize {
        self.max_colors_from_image
    }

    /// Take an uploaded image and show its palette. Extraction failures
    /// leave the swatches as they were.
    pub fn load_image(&mut self, image: ImageRef) -> bool {
        let colors = match self.extractor.extract(&image, self.max_colors_from_image) {
            Ok(colors) => colors,
            Err(e) => {
                log::error!("Picker {}: image extraction failed: {}", self.state.id, e);
                Vec::new()
            }
        };
        self.state.image = Some(image);
        self.derive_swatches_from_image(colors)
    }

    /// Drop the image and any swatches derived from it. Returns whether an
    /// image was held.
    pub fn clear_image(&mut self) -> bool {
        self.state.swatches.clear_image_derived();
        self.state.image.take().is_some()
    }

    // --- Host listeners ---

    /// Attach the key and image-icon listeners. Events are handled for as
    /// long as the returned handles are kept.
    pub fn attach_listeners(&self) -> PickerListeners {
        PickerListeners {
            key: self.listeners.attach(ListenerKind::KeyDown),
            image_icon: self.listeners.attach(ListenerKind::ImageIconClick),
        }
    }

    /// Key press from the host. The deletion key clears the image. Returns
    /// whether the event was acted on.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if !self.listeners.is_attached(ListenerKind::KeyDown) || !event.is_deletion() {
            return false;
        }
        self.clear_image();
        true
    }

    /// Image icon clicked. Returns `true` when the host should open its
    /// upload dialog.
    pub fn handle_image_icon_click(&self) -> bool {
        self.listeners.is_attached(ListenerKind::ImageIconClick)
    }
}
