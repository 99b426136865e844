//! Random swatch colors.

use crate::color::{ColorValue, Hsv};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Produces one color string per call.
pub trait RandomColorSource {
    fn next_color(&mut self) -> String;
}

/// Random bright colors: uniform hue with saturation and value kept in a
/// range that reads well as a swatch.
#[derive(Debug, Clone)]
pub struct RandomColorGenerator {
    rng: StdRng,
}

impl RandomColorGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomColorGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomColorSource for RandomColorGenerator {
    fn next_color(&mut self) -> String {
        let hsv = Hsv {
            h: self.rng.gen_range(0.0..360.0),
            s: self.rng.gen_range(0.45..=0.95),
            v: self.rng.gen_range(0.55..=0.95),
        };
        ColorValue::from_hsv(hsv, 1.0).to_hex_string()
    }
}

/// Draw from `source` until `count` distinct valid colors are collected or
/// `max_draws` draws have been made, keeping first-seen order.
pub fn collect_distinct(
    source: &mut dyn RandomColorSource,
    count: usize,
    max_draws: usize,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut colors = Vec::new();
    let mut draws = 0;

    while colors.len() < count && draws < max_draws {
        draws += 1;
        let color = source.next_color();
        if ColorValue::parse(&color).is_none() {
            log::warn!("Random source produced invalid color {}", color);
            continue;
        }
        if seen.insert(color.clone()) {
            colors.push(color);
        }
    }

    colors
}
