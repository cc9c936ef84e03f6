//! Output seam for laid-out pages. Implementations execute drawing calls in
//! the order issued; later marks overwrite earlier ones at the same spot,
//! which the renderer relies on for shaded rows (shade, then border, then
//! text).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Helvetica,
    HelveticaBold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Page-oriented drawing sink. Coordinates are points with the origin at the
/// top-left corner of a letter page, `y` growing downward.
pub trait DrawingSurface {
    fn begin_page(&mut self);
    /// Full-bleed letterhead image (JPEG bytes) behind the current page.
    fn background_image(&mut self, jpeg: &[u8]);
    fn set_font(&mut self, family: FontFamily, size: f64);
    fn set_fill_color(&mut self, color: Color);
    /// Place a line of text inside a box of the given width.
    fn text(&mut self, text: &str, x: f64, y: f64, width: f64, align: TextAlign);
    /// Fill a rectangle with the current fill color.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, line_width: f64);
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, line_width: f64);
}

/// Captures every drawing call in order. Backs the layout tests and doubles
/// as a dry-run sink when debugging a report.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<SurfaceOp>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    BeginPage,
    BackgroundImage { bytes: usize },
    SetFont { family: FontFamily, size: f64 },
    SetFillColor { color: Color },
    Text { text: String, x: f64, y: f64 },
    FillRect { x: f64, y: f64, width: f64, height: f64 },
    StrokeRect { x: f64, y: f64, width: f64, height: f64 },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl RecordingSurface {
    pub fn page_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::BeginPage))
            .count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawingSurface for RecordingSurface {
    fn begin_page(&mut self) {
        self.ops.push(SurfaceOp::BeginPage);
    }

    fn background_image(&mut self, jpeg: &[u8]) {
        self.ops.push(SurfaceOp::BackgroundImage { bytes: jpeg.len() });
    }

    fn set_font(&mut self, family: FontFamily, size: f64) {
        self.ops.push(SurfaceOp::SetFont { family, size });
    }

    fn set_fill_color(&mut self, color: Color) {
        self.ops.push(SurfaceOp::SetFillColor { color });
    }

    fn text(&mut self, text: &str, x: f64, y: f64, _width: f64, _align: TextAlign) {
        self.ops.push(SurfaceOp::Text {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(SurfaceOp::FillRect { x, y, width, height });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, _line_width: f64) {
        self.ops.push(SurfaceOp::StrokeRect { x, y, width, height });
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, _line_width: f64) {
        self.ops.push(SurfaceOp::Line { x1, y1, x2, y2 });
    }
}
