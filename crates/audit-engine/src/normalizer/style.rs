//! CSS colour parsing and WCAG contrast computation

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RGB_FN: Regex = Regex::new(
        r"^rgba?\(\s*([\d.]+)[\s,]+([\d.]+)[\s,]+([\d.]+)(?:\s*[,/]\s*([\d.]+%?))?\s*\)$"
    )
    .unwrap();
}

/// sRGB colour with straight alpha, channels in 0..=255
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::opaque(255.0, 255.0, 255.0);

    pub const fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Paint `self` over an opaque backdrop
    pub fn over(self, backdrop: Rgba) -> Rgba {
        let a = self.a.clamp(0.0, 1.0);
        Rgba::opaque(
            a * self.r + (1.0 - a) * backdrop.r,
            a * self.g + (1.0 - a) * backdrop.g,
            a * self.b + (1.0 - a) * backdrop.b,
        )
    }

    /// WCAG 2.x relative luminance
    pub fn relative_luminance(&self) -> f64 {
        fn channel(c: f64) -> f64 {
            let c = (c / 255.0).clamp(0.0, 1.0);
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }
}

/// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()` and a few keywords
pub fn parse_color(input: &str) -> Option<Rgba> {
    let s = input.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Some(Rgba { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }),
        "white" => return Some(Rgba::WHITE),
        "black" => return Some(Rgba::opaque(0.0, 0.0, 0.0)),
        _ => {}
    }

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    let caps = RGB_FN.captures(&s)?;
    let channel = |i: usize| -> Option<f64> { caps.get(i)?.as_str().parse::<f64>().ok() };
    let alpha = match caps.get(4) {
        Some(m) => match m.as_str().strip_suffix('%') {
            Some(pct) => pct.parse::<f64>().ok()? / 100.0,
            None => m.as_str().parse::<f64>().ok()?,
        },
        None => 1.0,
    };
    Some(Rgba {
        r: channel(1)?,
        g: channel(2)?,
        b: channel(3)?,
        a: alpha,
    })
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |s: &str| u8::from_str_radix(s, 16).ok().map(f64::from);
    match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| byte(&format!("{c}{c}")));
            Some(Rgba::opaque(it.next()??, it.next()??, it.next()??))
        }
        6 | 8 => {
            let a = if hex.len() == 8 {
                byte(&hex[6..8])? / 255.0
            } else {
                1.0
            };
            Some(Rgba {
                r: byte(&hex[0..2])?,
                g: byte(&hex[2..4])?,
                b: byte(&hex[4..6])?,
                a,
            })
        }
        _ => None,
    }
}

/// Effective opaque background of an element
///
/// A transparent background shows whatever the ancestors painted; a
/// translucent one is composited over it (or over white at the root).
pub fn effective_background(own: Option<Rgba>, inherited: Option<Rgba>) -> Option<Rgba> {
    match own {
        Some(bg) if bg.a >= 1.0 => Some(bg),
        Some(bg) if !bg.is_transparent() => Some(bg.over(inherited.unwrap_or(Rgba::WHITE))),
        _ => inherited,
    }
}

/// WCAG contrast ratio of a foreground over an opaque background
pub fn contrast_ratio(foreground: Rgba, background: Rgba) -> f64 {
    let fg = foreground.over(background).relative_luminance();
    let bg = background.relative_luminance();
    let (light, dark) = if fg >= bg { (fg, bg) } else { (bg, fg) };
    (light + 0.05) / (dark + 0.05)
}
