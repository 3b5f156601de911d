//! 阅读器主题：把设置里的颜色字符串解析成终端颜色，并按终端能力降级。

use crate::kernel::services::ports::ThemeSettings;
use crate::kernel::state::{DARK_BACKGROUND, LIGHT_BACKGROUND};
use crate::ui::core::style::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderTheme {
    pub text: Color,
    pub background: Color,
    pub focus: Color,
    /// Controls row, help row and borders.
    pub muted: Color,
    pub warning: Color,
    pub error: Color,
    pub dark_mode: bool,
}

/// How many colors the terminal can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    TrueColor,
    Palette256,
    Basic16,
}

impl ColorDepth {
    /// `ZREAD_COLOR_SUPPORT` overrides; otherwise `COLORTERM`/`TERM` are inspected.
    pub fn detect() -> Self {
        let forced = std::env::var("ZREAD_COLOR_SUPPORT").ok();
        if let Some(depth) = forced.as_deref().and_then(Self::from_name) {
            return depth;
        }

        let env = |key: &str| std::env::var(key).unwrap_or_default().to_ascii_lowercase();
        let (colorterm, term) = (env("COLORTERM"), env("TERM"));
        let rgb_markers = ["truecolor", "24bit", "direct"];
        if rgb_markers
            .iter()
            .any(|m| colorterm.contains(m) || term.contains(m))
        {
            ColorDepth::TrueColor
        } else if term.contains("256color") {
            ColorDepth::Palette256
        } else {
            ColorDepth::Basic16
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "truecolor" | "24bit" | "rgb" => Some(ColorDepth::TrueColor),
            "256" | "ansi256" => Some(ColorDepth::Palette256),
            "16" | "ansi16" | "basic" => Some(ColorDepth::Basic16),
            _ => None,
        }
    }

    /// Nearest color this depth can display.
    pub fn quantize(self, color: Color) -> Color {
        match (self, color) {
            (ColorDepth::TrueColor, c) | (_, c @ Color::Reset) => c,
            (ColorDepth::Palette256, Color::Rgb(r, g, b)) => Color::Indexed(nearest_256([r, g, b])),
            (ColorDepth::Palette256, c) => c,
            (ColorDepth::Basic16, Color::Indexed(i)) if i < 16 => color,
            (ColorDepth::Basic16, Color::Indexed(i)) => Color::Indexed(nearest_16(palette_rgb(i))),
            (ColorDepth::Basic16, Color::Rgb(r, g, b)) => Color::Indexed(nearest_16([r, g, b])),
        }
    }
}

impl Default for ReaderTheme {
    fn default() -> Self {
        Self::from_settings(&ThemeSettings::default())
    }
}

impl ReaderTheme {
    /// Unparseable or missing colors fall back to the mode's defaults.
    pub fn from_settings(settings: &ThemeSettings) -> Self {
        let dark = settings.dark_mode;
        let (default_bg, default_text, muted) = if dark {
            (DARK_BACKGROUND, "#FFFFFF", Color::Rgb(0x80, 0x80, 0x80))
        } else {
            (LIGHT_BACKGROUND, "#000000", Color::Rgb(0x70, 0x70, 0x70))
        };

        Self {
            text: resolve(settings.text.as_deref(), default_text),
            background: resolve(settings.background.as_deref(), default_bg),
            focus: resolve(settings.focus.as_deref(), "#FF4444"),
            muted,
            warning: if dark {
                Color::Rgb(0xFF, 0xD1, 0x66)
            } else {
                Color::Rgb(0xB0, 0x70, 0x00)
            },
            error: Color::Rgb(0xFF, 0x44, 0x44),
            dark_mode: dark,
        }
    }

    pub fn adapt_to_terminal_capabilities(&mut self) {
        self.quantize(ColorDepth::detect());
    }

    fn quantize(&mut self, depth: ColorDepth) {
        for color in [
            &mut self.text,
            &mut self.background,
            &mut self.focus,
            &mut self.muted,
            &mut self.warning,
            &mut self.error,
        ] {
            *color = depth.quantize(*color);
        }
    }
}

fn resolve(value: Option<&str>, fallback: &str) -> Color {
    match value.and_then(parse_color) {
        Some(c) => c,
        None => {
            if let Some(v) = value {
                tracing::warn!(color = v, "unrecognized color, using default");
            }
            parse_color(fallback).unwrap_or(Color::Reset)
        }
    }
}

/// xterm's default values for the 16 basic colors.
const BASIC16: [[u8; 3]; 16] = [
    [0, 0, 0],
    [128, 0, 0],
    [0, 128, 0],
    [128, 128, 0],
    [0, 0, 128],
    [128, 0, 128],
    [0, 128, 128],
    [192, 192, 192],
    [128, 128, 128],
    [255, 0, 0],
    [0, 255, 0],
    [255, 255, 0],
    [0, 0, 255],
    [255, 0, 255],
    [0, 255, 255],
    [255, 255, 255],
];

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

fn distance(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b)
        .map(|(&x, y)| (i32::from(x) - i32::from(y)).pow(2) as u32)
        .sum()
}

fn palette_rgb(index: u8) -> [u8; 3] {
    match index {
        0..=15 => BASIC16[index as usize],
        16..=231 => {
            let i = index - 16;
            [
                CUBE_LEVELS[(i / 36) as usize],
                CUBE_LEVELS[(i / 6 % 6) as usize],
                CUBE_LEVELS[(i % 6) as usize],
            ]
        }
        _ => [8 + (index - 232) * 10; 3],
    }
}

fn nearest_16(rgb: [u8; 3]) -> u8 {
    (0u8..16)
        .min_by_key(|&i| distance(rgb, BASIC16[i as usize]))
        .unwrap_or(0)
}

/// Best of the closest 6x6x6 cube entry and the closest gray-ramp entry.
fn nearest_256(rgb: [u8; 3]) -> u8 {
    let level = |v: u8| {
        (0u8..6)
            .min_by_key(|&l| (i32::from(v) - i32::from(CUBE_LEVELS[l as usize])).abs())
            .unwrap_or(0)
    };
    let cube = 16 + 36 * level(rgb[0]) + 6 * level(rgb[1]) + level(rgb[2]);

    let avg = (rgb.iter().map(|&v| u32::from(v)).sum::<u32>() / 3) as u8;
    let gray = 232 + (avg.saturating_sub(3) / 10).min(23);

    if distance(rgb, palette_rgb(gray)) < distance(rgb, palette_rgb(cube)) {
        gray
    } else {
        cube
    }
}

/// `#RRGGBB` or one of the basic color names.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
    }

    const NAMES: [&str; 8] = [
        "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
    ];
    let name = value.to_ascii_lowercase();
    match name.as_str() {
        "reset" | "default" => Some(Color::Reset),
        "gray" | "grey" => Some(Color::Indexed(8)),
        _ => NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| Color::Indexed(if i == 7 { 15 } else { i as u8 })),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/theme.rs"]
mod tests;
