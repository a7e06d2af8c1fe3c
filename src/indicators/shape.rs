use serde::{Deserialize, Serialize, Serializer};

pub const HORIZONTAL_LINE: &str = "horizontal_line";
pub const LINE_WIDTH: u8 = 2;
pub const LABEL_TEXT_COLOR: &str = "#1D1D1D";
pub const LABEL_FONT_SIZE: u8 = 12;

/// Time span currently shown by the chart, in the library's time units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VisibleRange {
    pub from: i64,
    pub to: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapePoint {
    pub price: f64,
    pub time: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LineStyle {
    Solid = 0,
    Dashed = 2,
}

impl Serialize for LineStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineOverrides {
    pub linecolor: String,
    pub linestyle: LineStyle,
    pub linewidth: u8,
    #[serde(rename = "showLabel")]
    pub show_label: bool,
    pub textcolor: String,
    pub fontsize: u8,
}

/// Options for the library's multipoint-shape call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeOptions {
    pub shape: String,
    pub text: String,
    pub overrides: LineOverrides,
}

impl ShapeOptions {
    pub fn horizontal_line(text: String, color: &str, style: LineStyle) -> Self {
        Self {
            shape: HORIZONTAL_LINE.to_string(),
            text,
            overrides: LineOverrides {
                linecolor: color.to_string(),
                linestyle: style,
                linewidth: LINE_WIDTH,
                show_label: true,
                textcolor: LABEL_TEXT_COLOR.to_string(),
                fontsize: LABEL_FONT_SIZE,
            },
        }
    }
}
