//! Named palettes mapping `[0, 1]` to colors.
//!
//! Palettes are stored as evenly spaced anchor colors (ColorBrewer sequential
//! schemes and samples of the perceptually uniform matplotlib maps) and
//! linearly interpolated between anchors. Appending `_r` to a name reverses it.

use crate::color::Color;
use crate::error::{VizError, VizResult};

const fn hex(v: u32) -> Color {
    Color::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

const GREENS: &[Color] = &[
    hex(0xf7fcf5), hex(0xe5f5e0), hex(0xc7e9c0), hex(0xa1d99b), hex(0x74c476),
    hex(0x41ab5d), hex(0x238b45), hex(0x006d2c), hex(0x00441b),
];
const BLUES: &[Color] = &[
    hex(0xf7fbff), hex(0xdeebf7), hex(0xc6dbef), hex(0x9ecae1), hex(0x6baed6),
    hex(0x4292c6), hex(0x2171b5), hex(0x08519c), hex(0x08306b),
];
const REDS: &[Color] = &[
    hex(0xfff5f0), hex(0xfee0d2), hex(0xfcbba1), hex(0xfc9272), hex(0xfb6a4a),
    hex(0xef3b2c), hex(0xcb181d), hex(0xa50f15), hex(0x67000d),
];
const ORANGES: &[Color] = &[
    hex(0xfff5eb), hex(0xfee6ce), hex(0xfdd0a2), hex(0xfdae6b), hex(0xfd8d3c),
    hex(0xf16913), hex(0xd94801), hex(0xa63603), hex(0x7f2704),
];
const PURPLES: &[Color] = &[
    hex(0xfcfbfd), hex(0xefedf5), hex(0xdadaeb), hex(0xbcbddc), hex(0x9e9ac8),
    hex(0x807dba), hex(0x6a51a3), hex(0x54278f), hex(0x3f007d),
];
const GREYS: &[Color] = &[
    hex(0xffffff), hex(0xf0f0f0), hex(0xd9d9d9), hex(0xbdbdbd), hex(0x969696),
    hex(0x737373), hex(0x525252), hex(0x252525), hex(0x000000),
];
const VIRIDIS: &[Color] = &[
    hex(0x440154), hex(0x472d7b), hex(0x3b528b), hex(0x2c728e), hex(0x21918c),
    hex(0x28ae80), hex(0x5ec962), hex(0xaddc30), hex(0xfde725),
];
const PLASMA: &[Color] = &[
    hex(0x0d0887), hex(0x4c02a1), hex(0x7e03a8), hex(0xa92395), hex(0xcc4778),
    hex(0xe56b5d), hex(0xf89441), hex(0xfdc328), hex(0xf0f921),
];
const INFERNO: &[Color] = &[
    hex(0x000004), hex(0x1b0c41), hex(0x4a0c6b), hex(0x781c6d), hex(0xa52c60),
    hex(0xcf4446), hex(0xed6925), hex(0xfb9b06), hex(0xfcffa4),
];
const MAGMA: &[Color] = &[
    hex(0x000004), hex(0x180f3d), hex(0x440f76), hex(0x721f81), hex(0x9e2f7f),
    hex(0xcd4071), hex(0xf1605d), hex(0xfd9668), hex(0xfcfdbf),
];
const CIVIDIS: &[Color] = &[
    hex(0x00224e), hex(0x123570), hex(0x3b496c), hex(0x575d6d), hex(0x707173),
    hex(0x8a8779), hex(0xa69d75), hex(0xc4b56c), hex(0xe4cf5b), hex(0xfee838),
];
const COOLWARM: &[Color] = &[
    hex(0x3b4cc0), hex(0x6788ee), hex(0x9abbff), hex(0xc9d7f0), hex(0xedd1c2),
    hex(0xf7a889), hex(0xe26952), hex(0xb40426),
];

const PALETTES: &[(&str, &[Color])] = &[
    ("Greens", GREENS),
    ("Blues", BLUES),
    ("Reds", REDS),
    ("Oranges", ORANGES),
    ("Purples", PURPLES),
    ("Greys", GREYS),
    ("viridis", VIRIDIS),
    ("plasma", PLASMA),
    ("inferno", INFERNO),
    ("magma", MAGMA),
    ("cividis", CIVIDIS),
    ("coolwarm", COOLWARM),
];

/// Names accepted by [`Colormap::from_name`] (each also with a `_r` suffix).
pub fn available() -> impl Iterator<Item = &'static str> {
    PALETTES.iter().map(|(name, _)| *name)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    anchors: Vec<Color>,
}

impl Colormap {
    pub fn from_name(name: &str) -> VizResult<Self> {
        let (base, reversed) = match name.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (name, false),
        };
        let anchors = PALETTES
            .iter()
            .find(|(candidate, _)| *candidate == base)
            .map(|(_, anchors)| anchors.to_vec())
            .ok_or_else(|| VizError::UnknownColormap(name.to_string()))?;
        let anchors = if reversed {
            anchors.into_iter().rev().collect()
        } else {
            anchors
        };
        Ok(Self {
            name: name.to_string(),
            anchors,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color at normalized position `t`; values outside `[0, 1]` are clipped, NaN maps to 0.
    pub fn sample(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let last = self.anchors.len() - 1;
        let pos = t * last as f64;
        let lower = (pos.floor() as usize).min(last);
        let upper = (lower + 1).min(last);
        self.anchors[lower].lerp(self.anchors[upper], pos - lower as f64)
    }

    /// `count` evenly spaced samples from 0 to 1 inclusive.
    pub fn gradient(&self, count: usize) -> Vec<(f64, Color)> {
        let steps = count.max(2) - 1;
        (0..=steps)
            .map(|i| {
                let t = i as f64 / steps as f64;
                (t, self.sample(t))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_anchors() {
        let cmap = Colormap::from_name("Greens").unwrap();
        assert_eq!(cmap.sample(0.0), hex(0xf7fcf5));
        assert_eq!(cmap.sample(1.0), hex(0x00441b));
        assert_eq!(cmap.sample(0.5), hex(0x74c476));
    }

    #[test]
    fn out_of_range_is_clipped() {
        let cmap = Colormap::from_name("viridis").unwrap();
        assert_eq!(cmap.sample(-3.0), cmap.sample(0.0));
        assert_eq!(cmap.sample(7.0), cmap.sample(1.0));
        assert_eq!(cmap.sample(f64::NAN), cmap.sample(0.0));
    }

    #[test]
    fn reversed_palette_swaps_ends() {
        let fwd = Colormap::from_name("Blues").unwrap();
        let rev = Colormap::from_name("Blues_r").unwrap();
        assert_eq!(fwd.sample(0.0), rev.sample(1.0));
        assert_eq!(rev.name(), "Blues_r");
    }

    #[test]
    fn unknown_name_is_an_error() {
        assert!(matches!(
            Colormap::from_name("greens"),
            Err(VizError::UnknownColormap(_))
        ));
    }

    #[test]
    fn every_listed_palette_loads() {
        for name in available() {
            assert!(Colormap::from_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn gradient_spans_unit_interval() {
        let stops = Colormap::from_name("magma").unwrap().gradient(5);
        assert_eq!(stops.len(), 5);
        assert_eq!(stops[0].0, 0.0);
        assert_eq!(stops[4].0, 1.0);
    }
}
