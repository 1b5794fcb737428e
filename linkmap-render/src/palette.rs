// Colors, colormaps and the category palette

use linkmap_core::layout::{depth_scalars, LayoutStrategy};
use linkmap_core::{Category, LinkGraph};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
        let channel = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
        Rgb(channel(a.0, b.0), channel(a.1, b.1), channel(a.2, b.2))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

/// Color for nodes the category pass left uncategorized.
pub const UNCATEGORIZED: Rgb = Rgb(0xbd, 0xbd, 0xbd);

const BASE_PALETTE: [Rgb; 10] = [
    Rgb(0x1f, 0x77, 0xb4),
    Rgb(0xff, 0x7f, 0x0e),
    Rgb(0x2c, 0xa0, 0x2c),
    Rgb(0xd6, 0x27, 0x28),
    Rgb(0x94, 0x67, 0xbd),
    Rgb(0x8c, 0x56, 0x4b),
    Rgb(0xe3, 0x77, 0xc2),
    Rgb(0x7f, 0x7f, 0x7f),
    Rgb(0xbc, 0xbd, 0x22),
    Rgb(0x17, 0xbe, 0xcf),
];

const VIRIDIS: [Rgb; 5] = [
    Rgb(0x44, 0x01, 0x54),
    Rgb(0x3b, 0x52, 0x8b),
    Rgb(0x21, 0x91, 0x8c),
    Rgb(0x5e, 0xc9, 0x62),
    Rgb(0xfd, 0xe7, 0x25),
];

const PLASMA: [Rgb; 5] = [
    Rgb(0x0d, 0x08, 0x87),
    Rgb(0x7e, 0x03, 0xa8),
    Rgb(0xcc, 0x47, 0x78),
    Rgb(0xf8, 0x95, 0x40),
    Rgb(0xf0, 0xf9, 0x21),
];

const COOL: [Rgb; 2] = [Rgb(0x00, 0xff, 0xff), Rgb(0xff, 0x00, 0xff)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    Viridis,
    Plasma,
    Cool,
}

impl Colormap {
    pub fn for_strategy(strategy: LayoutStrategy) -> Self {
        match strategy {
            LayoutStrategy::ForceDirected => Colormap::Viridis,
            LayoutStrategy::Circular => Colormap::Plasma,
            LayoutStrategy::Shell => Colormap::Cool,
        }
    }

    fn stops(&self) -> &'static [Rgb] {
        match self {
            Colormap::Viridis => &VIRIDIS,
            Colormap::Plasma => &PLASMA,
            Colormap::Cool => &COOL,
        }
    }

    /// Piecewise-linear sample; `t` is clamped to `[0,1]`, NaN reads as 0.
    pub fn sample(&self, t: f64) -> Rgb {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (stops.len() - 1) as f64;
        let lower = (scaled.floor() as usize).min(stops.len() - 2);
        Rgb::lerp(stops[lower], stops[lower + 1], scaled - lower as f64)
    }
}

/// Total mapping from an optional category id to a color.
#[derive(Debug, Clone)]
pub struct CategoryPalette {
    colors: BTreeMap<i64, Rgb>,
    fallback: Rgb,
}

impl CategoryPalette {
    /// Assigns base colors in category table order, cycling when the table
    /// is longer than the palette.
    pub fn from_categories(categories: &[Category]) -> Self {
        let colors = categories
            .iter()
            .zip(BASE_PALETTE.iter().cycle())
            .map(|(category, &color)| (category.id, color))
            .collect();
        Self {
            colors,
            fallback: UNCATEGORIZED,
        }
    }

    pub fn with_color(mut self, category_id: i64, color: Rgb) -> Self {
        self.colors.insert(category_id, color);
        self
    }

    pub fn with_fallback(mut self, color: Rgb) -> Self {
        self.fallback = color;
        self
    }

    pub fn fallback(&self) -> Rgb {
        self.fallback
    }

    pub fn color_for(&self, category_id: Option<i64>) -> Rgb {
        category_id
            .and_then(|id| self.colors.get(&id).copied())
            .unwrap_or(self.fallback)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorBy {
    #[default]
    Depth,
    Category,
}

impl ColorBy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "depth" => Some(ColorBy::Depth),
            "category" => Some(ColorBy::Category),
            _ => None,
        }
    }
}

/// Fill color per node id.
pub type NodeColors = BTreeMap<i64, Rgb>;

pub fn node_colors(
    graph: &LinkGraph,
    strategy: LayoutStrategy,
    color_by: ColorBy,
    palette: &CategoryPalette,
) -> NodeColors {
    match color_by {
        ColorBy::Depth => {
            let colormap = Colormap::for_strategy(strategy);
            depth_scalars(graph)
                .into_iter()
                .map(|(id, t)| (id, colormap.sample(t)))
                .collect()
        }
        ColorBy::Category => graph
            .nodes()
            .map(|n| (n.id, palette.color_for(n.category_id)))
            .collect(),
    }
}
