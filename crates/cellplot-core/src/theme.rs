// File: crates/cellplot-core/src/theme.rs
// Summary: Light/Dark theming for chart colors and the series palette.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub legend_background: skia::Color,
    /// Series colors, assigned in request order and cycled.
    pub palette: [skia::Color; 10],
}

const fn rgb(hex: u32) -> skia::Color {
    skia::Color::from_argb(0xff, (hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

// matplotlib "tab10", the colors the simulator's charts were first drawn in.
const TAB10: [skia::Color; 10] = [
    rgb(0x1f77b4), rgb(0xff7f0e), rgb(0x2ca02c), rgb(0xd62728), rgb(0x9467bd),
    rgb(0x8c564b), rgb(0xe377c2), rgb(0x7f7f7f), rgb(0xbcbd22), rgb(0x17becf),
];

// Solarized accents
const SOLARIZED: [skia::Color; 10] = [
    rgb(0x268bd2), rgb(0xcb4b16), rgb(0x859900), rgb(0xdc322f), rgb(0x6c71c4),
    rgb(0xb58900), rgb(0xd33682), rgb(0x2aa198), rgb(0x93a1a1), rgb(0x586e75),
];

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 255, 255, 255),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 40, 40, 45),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            tick: skia::Color::from_argb(255, 60, 60, 70),
            legend_background: skia::Color::from_argb(220, 255, 255, 255),
            palette: TAB10,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            legend_background: skia::Color::from_argb(220, 28, 28, 32),
            palette: TAB10,
        }
    }

    pub fn solarized_dark() -> Self {
        Self {
            name: "solarized-dark",
            background: rgb(0x002b36), // base03
            grid: rgb(0x073642),       // base02
            axis_line: rgb(0x93a1a1),  // base1
            axis_label: rgb(0xeee8d5), // base2
            tick: rgb(0x839496),       // base0
            legend_background: skia::Color::from_argb(220, 0x07, 0x36, 0x42),
            palette: SOLARIZED,
        }
    }

    pub fn solarized_light() -> Self {
        Self {
            name: "solarized-light",
            background: rgb(0xfdf6e3), // base3
            grid: rgb(0xeee8d5),       // base2
            axis_line: rgb(0x657b83),  // base00
            axis_label: rgb(0x002b36), // base03
            tick: rgb(0x586e75),       // base01
            legend_background: skia::Color::from_argb(220, 0xfd, 0xf6, 0xe3),
            palette: SOLARIZED,
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: rgb(0x000000),
            grid: rgb(0x222222),
            axis_line: rgb(0xffffff),
            axis_label: rgb(0xffffff),
            tick: rgb(0xcccccc),
            legend_background: skia::Color::from_argb(220, 0, 0, 0),
            palette: [
                rgb(0x00ffff), rgb(0xffff00), rgb(0x00ff00), rgb(0xff4040), rgb(0xff00ff),
                rgb(0xffa500), rgb(0xffffff), rgb(0x00aaff), rgb(0xaaff00), rgb(0xff88cc),
            ],
        }
    }

    /// Palette color for the `i`-th series.
    pub fn series_color(&self, i: usize) -> skia::Color {
        self.palette[i % self.palette.len()]
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![
        Theme::light(),
        Theme::dark(),
        Theme::solarized_dark(),
        Theme::solarized_light(),
        Theme::high_contrast_dark(),
    ]
}

/// Find a preset by its `name`, case-insensitively.
pub fn find(name: &str) -> Option<Theme> {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_is_case_insensitive() {
        assert_eq!(find("Solarized-Dark").map(|t| t.name), Some("solarized-dark"));
        assert!(find("neon").is_none());
    }

    #[test]
    fn palette_cycles() {
        let t = Theme::light();
        assert_eq!(t.series_color(0), t.series_color(10));
        assert_eq!(t.series_color(1), rgb(0xff7f0e));
    }
}
