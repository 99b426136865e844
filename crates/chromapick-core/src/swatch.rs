//! Swatch collections and the active display mode.

use crate::random::{RandomColorSource, collect_distinct};
use serde::{Deserialize, Serialize};

/// Where a swatch set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SwatchOrigin {
    Base,
    Shades,
    Tints,
    ImageDerived,
}

/// An ordered list of swatch colors tagged with its origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwatchSet {
    origin: SwatchOrigin,
    colors: Vec<String>,
}

impl SwatchSet {
    pub fn new(origin: SwatchOrigin, colors: Vec<String>) -> Self {
        Self { origin, colors }
    }

    pub fn empty(origin: SwatchOrigin) -> Self {
        Self::new(origin, Vec::new())
    }

    pub fn origin(&self) -> SwatchOrigin {
        self.origin
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Which swatch set is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Base,
    Shades,
    Tints,
}

impl std::str::FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "base" => Ok(DisplayMode::Base),
            "shades" => Ok(DisplayMode::Shades),
            "tints" => Ok(DisplayMode::Tints),
            other => Err(format!("unknown display mode '{other}'")),
        }
    }
}

/// Owns every swatch set and the display mode.
///
/// Shades and tints stay cached across mode switches; only
/// [`reset_palettes`](Self::reset_palettes) drops them. An image-derived set,
/// when present, is shown in place of the base set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwatchSetManager {
    base: SwatchSet,
    image_derived: Option<SwatchSet>,
    shades: SwatchSet,
    tints: SwatchSet,
    mode: DisplayMode,
}

impl SwatchSetManager {
    pub fn new(base: Vec<String>) -> Self {
        Self {
            base: SwatchSet::new(SwatchOrigin::Base, base),
            image_derived: None,
            shades: SwatchSet::empty(SwatchOrigin::Shades),
            tints: SwatchSet::empty(SwatchOrigin::Tints),
            mode: DisplayMode::Base,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Switch the displayed set without recomputing anything.
    pub fn set_mode(&mut self, mode: DisplayMode) {
        if self.mode != mode {
            log::debug!("Display mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    pub fn base(&self) -> &SwatchSet {
        &self.base
    }

    pub fn image_derived(&self) -> Option<&SwatchSet> {
        self.image_derived.as_ref()
    }

    pub fn shades(&self) -> &SwatchSet {
        &self.shades
    }

    pub fn tints(&self) -> &SwatchSet {
        &self.tints
    }

    /// The set for the current display mode.
    pub fn displayed(&self) -> &SwatchSet {
        match self.mode {
            DisplayMode::Base => self.image_derived.as_ref().unwrap_or(&self.base),
            DisplayMode::Shades => &self.shades,
            DisplayMode::Tints => &self.tints,
        }
    }

    /// Replace the base set, dropping any image-derived set, and show it.
    pub fn replace_base(&mut self, colors: Vec<String>) {
        self.base = SwatchSet::new(SwatchOrigin::Base, colors);
        self.image_derived = None;
        self.set_mode(DisplayMode::Base);
    }

    /// Show image colors in place of the base set.
    pub fn set_image_derived(&mut self, colors: Vec<String>) {
        self.image_derived = Some(SwatchSet::new(SwatchOrigin::ImageDerived, colors));
        self.set_mode(DisplayMode::Base);
    }

    /// Drop image colors, restoring the base set. Returns whether any were held.
    pub fn clear_image_derived(&mut self) -> bool {
        self.set_mode(DisplayMode::Base);
        self.image_derived.take().is_some()
    }

    /// Store freshly generated shades and show them.
    pub fn set_shades(&mut self, shades: SwatchSet) {
        self.shades = SwatchSet::new(SwatchOrigin::Shades, shades.colors);
        self.set_mode(DisplayMode::Shades);
    }

    /// Store freshly generated tints and show them.
    pub fn set_tints(&mut self, tints: SwatchSet) {
        self.tints = SwatchSet::new(SwatchOrigin::Tints, tints.colors);
        self.set_mode(DisplayMode::Tints);
    }

    /// Drop shades and tints and go back to the base set.
    pub fn reset_palettes(&mut self) {
        self.shades = SwatchSet::empty(SwatchOrigin::Shades);
        self.tints = SwatchSet::empty(SwatchOrigin::Tints);
        self.set_mode(DisplayMode::Base);
    }

    /// Fill the base set with `count` distinct random colors, drawing at most
    /// `count * retry_limit` times. Returns how many were collected.
    pub fn generate_random(
        &mut self,
        source: &mut dyn RandomColorSource,
        count: usize,
        retry_limit: usize,
    ) -> usize {
        let colors = collect_distinct(source, count, count.saturating_mul(retry_limit.max(1)));
        let collected = colors.len();
        if collected < count {
            log::warn!(
                "Random source gave {} distinct colors out of {} requested",
                collected,
                count
            );
        }
        self.replace_base(colors);
        collected
    }
}
