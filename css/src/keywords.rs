use super::ColorValue;
use lazy_static::lazy_static;
use std::collections::HashMap;

pub static BLACK: ColorValue = ColorValue::rgb(0, 0, 0);
pub static WHITE: ColorValue = ColorValue::rgb(255, 255, 255);
pub static TRANSPARENT: ColorValue = ColorValue::rgba(0, 0, 0, 0);

lazy_static! {
    static ref NAMED_COLORS: HashMap<&'static str, ColorValue> = HashMap::from([
        ("transparent", TRANSPARENT),
        ("black", BLACK),
        ("white", WHITE),
        ("silver", ColorValue::rgb(192, 192, 192)),
        ("gray", ColorValue::rgb(128, 128, 128)),
        ("grey", ColorValue::rgb(128, 128, 128)),
        ("maroon", ColorValue::rgb(128, 0, 0)),
        ("red", ColorValue::rgb(255, 0, 0)),
        ("purple", ColorValue::rgb(128, 0, 128)),
        ("fuchsia", ColorValue::rgb(255, 0, 255)),
        ("magenta", ColorValue::rgb(255, 0, 255)),
        ("green", ColorValue::rgb(0, 128, 0)),
        ("lime", ColorValue::rgb(0, 255, 0)),
        ("olive", ColorValue::rgb(128, 128, 0)),
        ("yellow", ColorValue::rgb(255, 255, 0)),
        ("navy", ColorValue::rgb(0, 0, 128)),
        ("blue", ColorValue::rgb(0, 0, 255)),
        ("teal", ColorValue::rgb(0, 128, 128)),
        ("aqua", ColorValue::rgb(0, 255, 255)),
        ("cyan", ColorValue::rgb(0, 255, 255)),
        ("orange", ColorValue::rgb(255, 165, 0)),
        ("pink", ColorValue::rgb(255, 192, 203)),
        ("brown", ColorValue::rgb(165, 42, 42)),
        ("gold", ColorValue::rgb(255, 215, 0)),
        ("indigo", ColorValue::rgb(75, 0, 130)),
        ("violet", ColorValue::rgb(238, 130, 238)),
        ("coral", ColorValue::rgb(255, 127, 80)),
        ("salmon", ColorValue::rgb(250, 128, 114)),
        ("tomato", ColorValue::rgb(255, 99, 71)),
        ("crimson", ColorValue::rgb(220, 20, 60)),
        ("khaki", ColorValue::rgb(240, 230, 140)),
        ("beige", ColorValue::rgb(245, 245, 220)),
        ("ivory", ColorValue::rgb(255, 255, 240)),
        ("lavender", ColorValue::rgb(230, 230, 250)),
        ("turquoise", ColorValue::rgb(64, 224, 208)),
        ("skyblue", ColorValue::rgb(135, 206, 235)),
        ("steelblue", ColorValue::rgb(70, 130, 180)),
        ("royalblue", ColorValue::rgb(65, 105, 225)),
        ("darkblue", ColorValue::rgb(0, 0, 139)),
        ("darkgreen", ColorValue::rgb(0, 100, 0)),
        ("darkred", ColorValue::rgb(139, 0, 0)),
        ("darkgray", ColorValue::rgb(169, 169, 169)),
        ("darkgrey", ColorValue::rgb(169, 169, 169)),
        ("lightgray", ColorValue::rgb(211, 211, 211)),
        ("lightgrey", ColorValue::rgb(211, 211, 211)),
        ("lightblue", ColorValue::rgb(173, 216, 230)),
        ("lightgreen", ColorValue::rgb(144, 238, 144)),
        ("rebeccapurple", ColorValue::rgb(102, 51, 153)),
        ("whitesmoke", ColorValue::rgb(245, 245, 245)),
    ]);
}

/// Looks up a CSS color keyword, case-insensitively
pub fn named_color(kw: &str) -> Option<ColorValue> {
    NAMED_COLORS.get(kw.to_ascii_lowercase().as_str()).copied()
}
