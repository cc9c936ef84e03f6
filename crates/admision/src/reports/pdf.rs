//! Minimal PDF 1.4 backend for the drawing seam: letter pages, the built-in
//! Helvetica faces with WinAnsi encoding, rectangles, lines, and a JPEG
//! letterhead via DCTDecode. Output is deterministic for a fixed call
//! sequence — no timestamps, no generated ids.

use tracing::warn;

use super::layout::PAGE_HEIGHT;
use super::surface::{Color, DrawingSurface, FontFamily, TextAlign};

pub struct PdfSurface {
    pages: Vec<PageBuf>,
    images: Vec<JpegImage>,
    font: (FontFamily, f64),
    fill: Color,
}

struct PageBuf {
    content: String,
    image: Option<usize>,
}

struct JpegImage {
    data: Vec<u8>,
    width: u16,
    height: u16,
    gray: bool,
}

impl Default for PdfSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfSurface {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            images: Vec::new(),
            font: (FontFamily::Helvetica, 9.0),
            fill: Color::BLACK,
        }
    }

    /// Serialize the accumulated pages into a complete document.
    pub fn finish(self) -> Vec<u8> {
        let page_count = self.pages.len().max(1);
        let pages = if self.pages.is_empty() {
            vec![PageBuf {
                content: String::new(),
                image: None,
            }]
        } else {
            self.pages
        };

        // Object layout: 1 catalog, 2 page tree, then (page, content) pairs,
        // then the two fonts, then one object per image.
        let font_regular_id = 2 + page_count * 2 + 1;
        let font_bold_id = font_regular_id + 1;
        let image_base_id = font_bold_id + 1;

        let mut writer = ObjectWriter::new();

        let kids: Vec<String> = (0..page_count)
            .map(|i| format!("{} 0 R", 3 + i * 2))
            .collect();
        writer.object(1, "<< /Type /Catalog /Pages 2 0 R >>".to_string());
        writer.object(
            2,
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                page_count
            ),
        );

        for (i, page) in pages.iter().enumerate() {
            let page_id = 3 + i * 2;
            let content_id = page_id + 1;

            let mut resources = format!(
                "/Font << /F1 {font_regular_id} 0 R /F2 {font_bold_id} 0 R >>"
            );
            if let Some(image) = page.image {
                resources.push_str(&format!(
                    " /XObject << /Im{image} {} 0 R >>",
                    image_base_id + image
                ));
            }

            writer.object(
                page_id,
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                     /Resources << {resources} >> /Contents {content_id} 0 R >>"
                ),
            );
            writer.stream(content_id, page.content.as_bytes());
        }

        writer.object(
            font_regular_id,
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica \
             /Encoding /WinAnsiEncoding >>"
                .to_string(),
        );
        writer.object(
            font_bold_id,
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold \
             /Encoding /WinAnsiEncoding >>"
                .to_string(),
        );

        for (k, image) in self.images.iter().enumerate() {
            let color_space = if image.gray { "/DeviceGray" } else { "/DeviceRGB" };
            let header = format!(
                "/Type /XObject /Subtype /Image /Width {} /Height {} \
                 /ColorSpace {} /BitsPerComponent 8 /Filter /DCTDecode",
                image.width, image.height, color_space
            );
            writer.raw_stream(image_base_id + k, &header, &image.data);
        }

        writer.finish()
    }

    fn current_page(&mut self) -> &mut PageBuf {
        if self.pages.is_empty() {
            self.pages.push(PageBuf {
                content: String::new(),
                image: None,
            });
        }
        self.pages.last_mut().expect("page buffer present")
    }

    fn fill_color_op(&self) -> String {
        format!(
            "{} {} {} rg",
            component(self.fill.r),
            component(self.fill.g),
            component(self.fill.b)
        )
    }
}

impl DrawingSurface for PdfSurface {
    fn begin_page(&mut self) {
        self.pages.push(PageBuf {
            content: String::new(),
            image: None,
        });
        self.fill = Color::BLACK;
    }

    fn background_image(&mut self, jpeg: &[u8]) {
        let (width, height, gray) = match jpeg_dimensions(jpeg) {
            Some(dims) => dims,
            None => {
                warn!("letterhead is not a decodable JPEG; skipping background");
                return;
            }
        };

        let index = match self.images.iter().position(|img| img.data == jpeg) {
            Some(index) => index,
            None => {
                self.images.push(JpegImage {
                    data: jpeg.to_vec(),
                    width,
                    height,
                    gray,
                });
                self.images.len() - 1
            }
        };

        let page = self.current_page();
        page.image = Some(index);
        page.content
            .push_str(&format!("q 612 0 0 792 0 0 cm /Im{index} Do Q\n"));
    }

    fn set_font(&mut self, family: FontFamily, size: f64) {
        self.font = (family, size);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }

    fn text(&mut self, text: &str, x: f64, y: f64, width: f64, align: TextAlign) {
        if text.is_empty() {
            return;
        }

        let (family, size) = self.font;
        let estimated = text_width(text, family, size);
        let x = match align {
            TextAlign::Left => x,
            TextAlign::Center => x + ((width - estimated) / 2.0).max(0.0),
            TextAlign::Right => x + (width - estimated).max(0.0),
        };
        let baseline = PAGE_HEIGHT - y - size;

        let font = match family {
            FontFamily::Helvetica => "/F1",
            FontFamily::HelveticaBold => "/F2",
        };
        let color = self.fill_color_op();
        let escaped = escape_text(text);
        let content = &mut self.current_page().content;
        content.push_str(&format!(
            "BT {font} {} Tf {color} {} {} Td ({escaped}) Tj ET\n",
            fmt(size),
            fmt(x),
            fmt(baseline)
        ));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let color = self.fill_color_op();
        let bottom = PAGE_HEIGHT - y - height;
        let content = &mut self.current_page().content;
        content.push_str(&format!(
            "{color} {} {} {} {} re f\n",
            fmt(x),
            fmt(bottom),
            fmt(width),
            fmt(height)
        ));
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, line_width: f64) {
        let bottom = PAGE_HEIGHT - y - height;
        let content = &mut self.current_page().content;
        content.push_str(&format!(
            "0 0 0 RG {} w {} {} {} {} re S\n",
            fmt(line_width),
            fmt(x),
            fmt(bottom),
            fmt(width),
            fmt(height)
        ));
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, line_width: f64) {
        let content = &mut self.current_page().content;
        content.push_str(&format!(
            "0 0 0 RG {} w {} {} m {} {} l S\n",
            fmt(line_width),
            fmt(x1),
            fmt(PAGE_HEIGHT - y1),
            fmt(x2),
            fmt(PAGE_HEIGHT - y2)
        ));
    }
}

struct ObjectWriter {
    out: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl ObjectWriter {
    fn new() -> Self {
        Self {
            out: b"%PDF-1.4\n".to_vec(),
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, id: usize, body: String) {
        self.offsets.push((id, self.out.len()));
        self.out
            .extend_from_slice(format!("{id} 0 obj\n{body}\nendobj\n").as_bytes());
    }

    fn stream(&mut self, id: usize, data: &[u8]) {
        self.offsets.push((id, self.out.len()));
        self.out.extend_from_slice(
            format!("{id} 0 obj\n<< /Length {} >>\nstream\n", data.len()).as_bytes(),
        );
        self.out.extend_from_slice(data);
        self.out.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn raw_stream(&mut self, id: usize, dict: &str, data: &[u8]) {
        self.offsets.push((id, self.out.len()));
        self.out.extend_from_slice(
            format!("{id} 0 obj\n<< {dict} /Length {} >>\nstream\n", data.len()).as_bytes(),
        );
        self.out.extend_from_slice(data);
        self.out.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn finish(mut self) -> Vec<u8> {
        self.offsets.sort_by_key(|(id, _)| *id);
        let count = self.offsets.len();

        let xref_at = self.out.len();
        self.out
            .extend_from_slice(format!("xref\n0 {}\n", count + 1).as_bytes());
        self.out.extend_from_slice(b"0000000000 65535 f \n");
        for (_, offset) in &self.offsets {
            self.out
                .extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        self.out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
                count + 1
            )
            .as_bytes(),
        );
        self.out
    }
}

fn fmt(value: f64) -> String {
    if (value - value.round()).abs() < 0.005 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.2}")
    }
}

fn component(value: u8) -> String {
    if value == 0 {
        "0".to_string()
    } else if value == 255 {
        "1".to_string()
    } else {
        format!("{:.3}", f64::from(value) / 255.0)
    }
}

/// Escape a string for a PDF literal: Latin-1 bytes with parentheses and
/// backslashes escaped, anything past Latin-1 replaced.
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        let code = ch as u32;
        match ch {
            '(' => escaped.push_str("\\("),
            ')' => escaped.push_str("\\)"),
            '\\' => escaped.push_str("\\\\"),
            _ if code < 0x20 => escaped.push(' '),
            _ if code < 0x7F => escaped.push(ch),
            _ if code <= 0xFF => escaped.push_str(&format!("\\{code:03o}")),
            _ => escaped.push('?'),
        }
    }
    escaped
}

/// Rough advance-width estimate for the Helvetica faces; only used to place
/// centered and right-aligned text.
fn text_width(text: &str, family: FontFamily, size: f64) -> f64 {
    let factor = match family {
        FontFamily::Helvetica => 0.50,
        FontFamily::HelveticaBold => 0.53,
    };
    text.chars().count() as f64 * size * factor
}

/// Pull the frame dimensions and component count out of a JPEG's SOF marker.
fn jpeg_dimensions(data: &[u8]) -> Option<(u16, u16, bool)> {
    if data.len() < 4 || data[0] != 0xFF || data[1] != 0xD8 {
        return None;
    }

    let mut i = 2;
    while i + 9 < data.len() {
        if data[i] != 0xFF {
            return None;
        }
        // Fill bytes before a marker are legal.
        while i < data.len() && data[i] == 0xFF {
            i += 1;
        }
        if i + 8 >= data.len() {
            return None;
        }
        let marker = data[i];

        let is_sof = (0xC0..=0xCF).contains(&marker)
            && marker != 0xC4
            && marker != 0xC8
            && marker != 0xCC;
        if is_sof {
            let height = u16::from_be_bytes([data[i + 4], data[i + 5]]);
            let width = u16::from_be_bytes([data[i + 6], data[i + 7]]);
            let components = data[i + 8];
            return Some((width, height, components == 1));
        }

        let length = u16::from_be_bytes([data[i + 1], data[i + 2]]) as usize;
        if length < 2 {
            return None;
        }
        i += 1 + length;
    }
    None
}
