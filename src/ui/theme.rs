use ratatui::style::Color;

use crate::domain::weather::WeatherCategory;

mod capability;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    TrueColor,
    Xterm256,
    Basic16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub top: Color,
    pub bottom: Color,
    pub surface: Color,
    /// Unquantised surface colour, used when blending chart gradients.
    pub surface_rgb: (u8, u8, u8),
    pub accent: Color,
    pub text: Color,
    pub muted_text: Color,
    pub border: Color,
    pub popup_surface: Color,
    pub popup_text: Color,
    pub popup_border: Color,
    pub warning: Color,
    pub info: Color,
    pub danger: Color,
    pub capability: ColorCapability,
}

pub fn detect_color_capability() -> ColorCapability {
    capability::detect_color_capability_from(
        std::env::var("TERM").ok().as_deref(),
        std::env::var("COLORTERM").ok().as_deref(),
        std::env::var("NO_COLOR").ok().as_deref(),
    )
}

/// Background palette per category; `None` before any forecast arrives.
pub fn theme_for(category: Option<WeatherCategory>, capability: ColorCapability) -> Theme {
    let (top, bottom, accent) = match category {
        Some(WeatherCategory::Sunny) => ((92, 58, 12), (168, 104, 24), (255, 215, 117)),
        Some(WeatherCategory::Cloudy) => ((25, 36, 51), (48, 63, 84), (210, 223, 235)),
        Some(WeatherCategory::Rain) => ((12, 25, 52), (32, 73, 126), (153, 214, 255)),
        Some(WeatherCategory::Snow) => ((27, 51, 77), (70, 102, 136), (237, 247, 255)),
        None => ((19, 24, 35), (31, 39, 53), (195, 205, 215)),
    };

    if capability == ColorCapability::Basic16 {
        return Theme {
            top: Color::Black,
            bottom: quantize(rgb(bottom), capability),
            surface: Color::Black,
            surface_rgb: (0, 0, 0),
            accent: quantize(rgb(accent), capability),
            text: Color::White,
            muted_text: Color::Gray,
            border: Color::LightCyan,
            popup_surface: Color::Blue,
            popup_text: Color::White,
            popup_border: Color::Yellow,
            warning: Color::Yellow,
            info: Color::LightCyan,
            danger: Color::LightRed,
            capability,
        };
    }

    let surface = mix_rgb(top, bottom, 0.35);
    let text = (236, 242, 248);
    Theme {
        top: quantize(rgb(top), capability),
        bottom: quantize(rgb(bottom), capability),
        surface: quantize(rgb(surface), capability),
        surface_rgb: surface,
        accent: quantize(rgb(accent), capability),
        text: quantize(rgb(text), capability),
        muted_text: quantize(rgb(mix_rgb(text, surface, 0.4)), capability),
        border: quantize(rgb(mix_rgb(accent, surface, 0.45)), capability),
        popup_surface: quantize(rgb(mix_rgb(surface, (0, 0, 0), 0.35)), capability),
        popup_text: quantize(rgb(text), capability),
        popup_border: quantize(rgb(accent), capability),
        warning: quantize(rgb((255, 196, 92)), capability),
        info: quantize(rgb((120, 200, 255)), capability),
        danger: quantize(rgb((255, 110, 110)), capability),
        capability,
    }
}

pub fn icon_color(theme: &Theme, category: WeatherCategory) -> Color {
    match category {
        WeatherCategory::Sunny => theme.warning,
        WeatherCategory::Cloudy => theme.muted_text,
        WeatherCategory::Rain => theme.info,
        WeatherCategory::Snow => theme.text,
    }
}

/// Colour for a blended RGB triple under the theme's capability.
pub fn blended(theme: &Theme, value: (u8, u8, u8)) -> Color {
    quantize(rgb(value), theme.capability)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn quantize(color: Color, capability: ColorCapability) -> Color {
    match (capability, color) {
        (ColorCapability::Xterm256, Color::Rgb(r, g, b)) => {
            let to_cube = |v: u8| -> u8 { ((f32::from(v) / 255.0) * 5.0).round() as u8 };
            Color::Indexed(16 + 36 * to_cube(r) + 6 * to_cube(g) + to_cube(b))
        }
        (ColorCapability::Basic16, Color::Rgb(r, g, b)) => basic16_from_rgb(r, g, b),
        (_, c) => c,
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn mix_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f32) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| -> u8 {
        (f32::from(x) + (f32::from(y) - f32::from(x)) * t)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

fn basic16_from_rgb(r: u8, g: u8, b: u8) -> Color {
    let (rf, gf, bf) = (
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
    );
    let max = rf.max(gf.max(bf));
    let min = rf.min(gf.min(bf));
    let delta = max - min;
    let light = (max + min) / 2.0;

    if delta < 0.08 {
        return match light {
            l if l < 0.20 => Color::Black,
            l if l < 0.40 => Color::DarkGray,
            l if l < 0.72 => Color::Gray,
            _ => Color::White,
        };
    }

    let hue = if (max - rf).abs() < f32::EPSILON {
        60.0 * ((gf - bf) / delta).rem_euclid(6.0)
    } else if (max - gf).abs() < f32::EPSILON {
        60.0 * (((bf - rf) / delta) + 2.0)
    } else {
        60.0 * (((rf - gf) / delta) + 4.0)
    };

    let bright = light >= 0.55;
    let (dim, lit) = match hue {
        h if !(30.0..330.0).contains(&h) => (Color::Red, Color::LightRed),
        h if h < 90.0 => (Color::Yellow, Color::LightYellow),
        h if h < 150.0 => (Color::Green, Color::LightGreen),
        h if h < 210.0 => (Color::Cyan, Color::LightCyan),
        h if h < 270.0 => (Color::Blue, Color::LightBlue),
        _ => (Color::Magenta, Color::LightMagenta),
    };
    if bright { lit } else { dim }
}
