//! CSS values as they appear in inline styles: parsing of single property
//! values and of `style` attribute text, and the computed serialization that
//! style queries report.

use std::fmt::{self, Display};

mod declarations;
mod keywords;
mod parsing;
#[cfg(test)]
mod tests;

pub use declarations::{property_name, Declaration, StyleDeclarations};
pub use keywords::{named_color, BLACK, TRANSPARENT, WHITE};
pub use parsing::{declaration_list, parse_value};

/// Font size that font-relative lengths resolve against
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

#[derive(PartialEq, Clone, Debug)]
pub enum Value {
    Keyword(String),
    String(String),
    Number(f64),
    Percentage(f64),
    Length(f64, Unit),
    Color(ColorValue),
    Function(FunctionValue),
    Multiple(Vec<Value>),
}

impl Value {
    /// Attempts to convert this value to a concrete pixel size
    pub fn try_to_px(&self, font_size: f64) -> Option<f64> {
        match self {
            Value::Number(n) if *n == 0.0 => Some(0.0),
            Value::Length(n, unit) => unit.px_per_unit(font_size).map(|f| n * f),
            _ => None,
        }
    }

    /// Attempts to convert this value to a color
    pub fn try_to_color(&self) -> Option<ColorValue> {
        match self {
            Value::Color(col) => Some(*col),
            _ => None,
        }
    }

    pub fn is_keyword(&self, kw: &str) -> bool {
        matches!(self, Value::Keyword(k) if k.eq_ignore_ascii_case(kw))
    }

    /// Serializes the value the way a computed style query reports it
    pub fn to_computed(&self) -> String {
        match self {
            Value::Keyword(kw) => kw.to_ascii_lowercase(),
            Value::String(s) => format!("\"{}\"", s.replace('"', "\\\"")),
            Value::Number(n) => format_number(*n),
            Value::Percentage(p) => format!("{}%", format_number(*p)),
            Value::Length(n, unit) => match self.try_to_px(DEFAULT_FONT_SIZE) {
                Some(px) => format!("{}px", format_number(px)),
                None => format!("{}{}", format_number(*n), unit),
            },
            Value::Color(col) => col.to_string(),
            Value::Function(FunctionValue(name, args)) => format!(
                "{}({})",
                name,
                args.iter()
                    .map(Value::to_computed)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Value::Multiple(values) => values
                .iter()
                .map(Value::to_computed)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Unit {
    Cm,
    Mm,
    Q,
    In,
    Pc,
    Pt,
    Px,
    Em,
    Ex,
    Ch,
    Rem,
    Lh,
    Vw,
    Vh,
    Vmin,
    Vmax,
}

impl Unit {
    pub fn from_keyword(unit: &str) -> Option<Self> {
        Some(match unit.to_ascii_lowercase().as_str() {
            "cm" => Unit::Cm,
            "mm" => Unit::Mm,
            "q" => Unit::Q,
            "in" => Unit::In,
            "pc" => Unit::Pc,
            "pt" => Unit::Pt,
            "px" => Unit::Px,
            "em" => Unit::Em,
            "ex" => Unit::Ex,
            "ch" => Unit::Ch,
            "rem" => Unit::Rem,
            "lh" => Unit::Lh,
            "vw" => Unit::Vw,
            "vh" => Unit::Vh,
            "vmin" => Unit::Vmin,
            "vmax" => Unit::Vmax,
            _ => return None,
        })
    }

    /// Pixels per unit, or `None` for units that depend on the viewport
    fn px_per_unit(self, font_size: f64) -> Option<f64> {
        Some(match self {
            Unit::Px => 1.0,
            Unit::In => 96.0,
            Unit::Cm => 96.0 / 2.54,
            Unit::Mm => 96.0 / 25.4,
            Unit::Q => 96.0 / 101.6,
            Unit::Pt => 96.0 / 72.0,
            Unit::Pc => 16.0,
            Unit::Em | Unit::Rem | Unit::Lh => font_size,
            Unit::Ex | Unit::Ch => font_size / 2.0,
            Unit::Vw | Unit::Vh | Unit::Vmin | Unit::Vmax => return None,
        })
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Unit::Cm => "cm",
            Unit::Mm => "mm",
            Unit::Q => "q",
            Unit::In => "in",
            Unit::Pc => "pc",
            Unit::Pt => "pt",
            Unit::Px => "px",
            Unit::Em => "em",
            Unit::Ex => "ex",
            Unit::Ch => "ch",
            Unit::Rem => "rem",
            Unit::Lh => "lh",
            Unit::Vw => "vw",
            Unit::Vh => "vh",
            Unit::Vmin => "vmin",
            Unit::Vmax => "vmax",
        };
        f.write_str(s)
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct ColorValue {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorValue {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }
}

impl Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            let alpha = (f64::from(self.a) / 255.0 * 100.0).round() / 100.0;
            write!(
                f,
                "rgba({}, {}, {}, {})",
                self.r,
                self.g,
                self.b,
                format_number(alpha)
            )
        }
    }
}

#[derive(PartialEq, Clone, Debug)]
pub struct FunctionValue(pub String, pub Vec<Value>);

/// Formats a number without a trailing `.0` and with at most four decimals
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        return format!("{}", n as i64);
    }
    let s = format!("{:.4}", n);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Whether a property is inherited by descendants when not set on them
pub fn is_inherited(name: &str) -> bool {
    INHERITED.contains(&name)
}

/// The initial value of the handful of properties computed style queries
/// fall back to
pub fn initial_value(name: &str) -> Option<Value> {
    Some(match name {
        "display" => Value::Keyword("inline".to_string()),
        "visibility" => Value::Keyword("visible".to_string()),
        "opacity" => Value::Number(1.0),
        "color" => Value::Color(BLACK),
        "background-color" => Value::Color(TRANSPARENT),
        "width" | "height" => Value::Keyword("auto".to_string()),
        "font-size" => Value::Length(DEFAULT_FONT_SIZE, Unit::Px),
        "position" => Value::Keyword("static".to_string()),
        _ => return None,
    })
}

static INHERITED: &[&str] = &[
    "azimuth",
    "border-collapse",
    "border-spacing",
    "caption-side",
    "color",
    "cursor",
    "direction",
    "elevation",
    "empty-cells",
    "font-family",
    "font-size",
    "font-style",
    "font-variant",
    "font-weight",
    "font",
    "letter-spacing",
    "line-height",
    "list-style-image",
    "list-style-position",
    "list-style-type",
    "list-style",
    "orphans",
    "pitch-range",
    "pitch",
    "quotes",
    "richness",
    "speak-header",
    "speak-numeral",
    "speak-punctuation",
    "speak",
    "speech-rate",
    "stress",
    "text-align",
    "text-indent",
    "text-transform",
    "visibility",
    "voice-family",
    "volume",
    "white-space",
    "widows",
    "word-spacing",
];
