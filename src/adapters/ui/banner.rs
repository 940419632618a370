//! Welcome banner: "LEGACY" in figlet, shaded left to right like an aged page,
//! followed by the directory tagline.

use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

const TAGLINE: &str = "Leaders, their letters, and the people who remember them";

/// Two-stop horizontal gradient.
struct Gradient {
    from: (u8, u8, u8),
    to: (u8, u8, u8),
}

/// Parchment gold fading into ink blue.
const PAGE: Gradient = Gradient {
    from: (0xd4, 0xa0, 0x17),
    to: (0x1f, 0x4e, 0x9a),
};

impl Gradient {
    /// Color at column `col` of a banner `width` columns wide.
    fn at(&self, col: usize, width: usize) -> Color {
        let t = if width <= 1 {
            0.0
        } else {
            col as f64 / (width - 1) as f64
        };
        let mix = |a: u8, b: u8| {
            let (a, b) = (f64::from(a), f64::from(b));
            (a + (b - a) * t).round() as u8
        };
        Color::Rgb {
            r: mix(self.from.0, self.to.0),
            g: mix(self.from.1, self.to.1),
            b: mix(self.from.2, self.to.2),
        }
    }
}

fn banner_art() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("LEGACY").map(|figure| figure.to_string()))
        .unwrap_or_else(|| "LEGACY\n".to_string())
}

pub fn print_welcome() {
    let art = banner_art();
    let width = art.lines().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = stdout().lock();
    for line in art.lines().filter(|l| !l.trim().is_empty()) {
        for (col, ch) in line.chars().enumerate() {
            let _ = queue!(out, SetForegroundColor(PAGE.at(col, width)), Print(ch));
        }
        let _ = queue!(out, ResetColor, Print("\r\n"));
    }

    let _ = queue!(
        out,
        SetAttribute(Attribute::Italic),
        Print(TAGLINE),
        SetAttribute(Attribute::Reset),
        Print(format!("  v{}\r\n\r\n", env!("CARGO_PKG_VERSION"))),
    );
    let _ = out.flush();
}
