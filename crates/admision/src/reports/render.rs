//! Draws laid-out pages onto a [`DrawingSurface`].
//!
//! Emission order is strictly top-to-bottom, left-to-right within a page:
//! the sink has no z-ordering, so row shading is painted first, then the
//! border, then the text on top.

use super::layout::{
    FilterContext, Page, RowBlock, SummaryBlock, TitleBlock, MARGIN, PAGE_WIDTH, ROW_HEIGHT,
    SUMMARY_HEIGHT, TABLE_HEADER_HEIGHT,
};
use super::surface::{Color, DrawingSurface, FontFamily, TextAlign};
use super::variant::ReportVariant;

const USABLE_WIDTH: f64 = PAGE_WIDTH - MARGIN * 2.0;

const HEADER_BG: Color = Color::rgb(208, 208, 208);
const ROW_SHADE: Color = Color::rgb(250, 250, 250);
const SUMMARY_TITLE_BG: Color = Color::rgb(232, 232, 232);

struct Column {
    header: &'static str,
    width: f64,
    align: TextAlign,
}

fn columns(variant: ReportVariant) -> [Column; 6] {
    [
        Column {
            header: "N°",
            width: 30.0,
            align: TextAlign::Center,
        },
        Column {
            header: "C.I.",
            width: 80.0,
            align: TextAlign::Center,
        },
        Column {
            header: "NOMBRE COMPLETO",
            width: 170.0,
            align: TextAlign::Left,
        },
        Column {
            header: variant.extra_header(),
            width: 100.0,
            align: TextAlign::Left,
        },
        Column {
            header: "FIRMA\nENTRADA",
            width: 86.0,
            align: TextAlign::Center,
        },
        Column {
            header: "FIRMA\nSALIDA",
            width: 86.0,
            align: TextAlign::Center,
        },
    ]
}

/// Render every page in order against the surface. The optional letterhead
/// goes behind each page; everything else is derived from the page blocks.
pub fn render<S>(pages: &[Page], variant: ReportVariant, background: Option<&[u8]>, surface: &mut S)
where
    S: DrawingSurface,
{
    let cols = columns(variant);

    for page in pages {
        surface.begin_page();
        if let Some(jpeg) = background {
            surface.background_image(jpeg);
        }

        if let Some(title) = &page.title {
            draw_title(title, surface);
        }

        if let Some(y) = page.table_header_y {
            draw_table_header(&cols, y, surface);
        }

        for row in &page.rows {
            draw_row(&cols, row, surface);
        }

        if let Some(summary) = &page.summary {
            draw_summary(summary, variant, surface);
        }
    }
}

fn draw_title(title: &TitleBlock, surface: &mut impl DrawingSurface) {
    surface.set_fill_color(Color::BLACK);
    surface.set_font(FontFamily::HelveticaBold, 14.0);
    surface.text(&title.text, MARGIN, 40.0, USABLE_WIDTH, TextAlign::Center);
    surface.line(MARGIN, 65.0, PAGE_WIDTH - MARGIN, 65.0, 1.5);

    draw_info_box(&title.filters, surface);
}

fn draw_info_box(filters: &FilterContext, surface: &mut impl DrawingSurface) {
    let top = 75.0;
    surface.stroke_rect(MARGIN, top, USABLE_WIDTH, 60.0, 1.0);

    let rows: [[(&str, &str); 2]; 2] = [
        [
            ("DEPARTAMENTO:", filters.departamento.as_str()),
            ("RECINTO:", filters.recinto.as_str()),
        ],
        [
            ("FECHA:", filters.fecha.as_str()),
            ("AULA:", filters.aula.as_str()),
        ],
    ];

    let mut y = top + 8.0;
    for pairs in rows {
        let mut x = MARGIN + 10.0;
        for (label, value) in pairs {
            surface.set_font(FontFamily::HelveticaBold, 9.0);
            surface.text(label, x, y, 90.0, TextAlign::Left);
            surface.set_font(FontFamily::Helvetica, 9.0);
            surface.text(value, x + 95.0, y, 175.0, TextAlign::Left);
            x += 270.0;
        }
        y += 18.0;
    }

    surface.set_font(FontFamily::HelveticaBold, 9.0);
    surface.text("TURNO:", MARGIN + 10.0, y, 90.0, TextAlign::Left);
    surface.set_font(FontFamily::Helvetica, 9.0);
    surface.text(&filters.turno, MARGIN + 105.0, y, 175.0, TextAlign::Left);
}

fn draw_table_header(cols: &[Column; 6], y: f64, surface: &mut impl DrawingSurface) {
    surface.set_fill_color(HEADER_BG);
    surface.fill_rect(MARGIN, y, USABLE_WIDTH, TABLE_HEADER_HEIGHT);
    surface.stroke_rect(MARGIN, y, USABLE_WIDTH, TABLE_HEADER_HEIGHT, 1.0);

    surface.set_fill_color(Color::BLACK);
    surface.set_font(FontFamily::HelveticaBold, 9.0);

    let mut x = MARGIN;
    for col in cols {
        if col.header.contains('\n') {
            let mut line_y = y + 9.0;
            for part in col.header.split('\n') {
                surface.text(part, x, line_y, col.width, col.align);
                line_y += 10.0;
            }
        } else {
            surface.text(col.header, x, y + 13.0, col.width, col.align);
        }
        x += col.width;
    }
}

fn draw_row(cols: &[Column; 6], row: &RowBlock, surface: &mut impl DrawingSurface) {
    if row.shaded {
        surface.set_fill_color(ROW_SHADE);
        surface.fill_rect(MARGIN, row.y, USABLE_WIDTH, ROW_HEIGHT);
    }
    surface.stroke_rect(MARGIN, row.y, USABLE_WIDTH, ROW_HEIGHT, 1.0);

    surface.set_fill_color(Color::BLACK);
    surface.set_font(FontFamily::Helvetica, 9.0);

    let seq = row.seq.to_string();
    let cells: [&str; 6] = [&seq, &row.ci, &row.nombre, &row.extra, "", ""];

    let mut x = MARGIN;
    for (index, col) in cols.iter().enumerate() {
        if index > 0 {
            surface.line(x, row.y, x, row.y + ROW_HEIGHT, 1.0);
        }
        // Signature cells stay blank for manual completion.
        if !cells[index].is_empty() {
            surface.text(cells[index], x + 3.0, row.y + 10.0, col.width - 6.0, col.align);
        }
        x += col.width;
    }
}

fn draw_summary(summary: &SummaryBlock, variant: ReportVariant, surface: &mut impl DrawingSurface) {
    let y = summary.y;

    surface.stroke_rect(MARGIN, y, USABLE_WIDTH, SUMMARY_HEIGHT, 1.5);
    surface.stroke_rect(
        MARGIN + 2.0,
        y + 2.0,
        USABLE_WIDTH - 4.0,
        SUMMARY_HEIGHT - 4.0,
        0.5,
    );

    surface.set_fill_color(SUMMARY_TITLE_BG);
    surface.fill_rect(MARGIN, y, USABLE_WIDTH, 28.0);
    surface.stroke_rect(MARGIN, y, USABLE_WIDTH, 28.0, 1.0);

    surface.set_fill_color(Color::BLACK);
    surface.set_font(FontFamily::HelveticaBold, 12.0);
    surface.text("RESUMEN", MARGIN + 10.0, y + 10.0, 200.0, TextAlign::Left);

    let total = summary.total.to_string();
    let counts: [[(&str, &str); 2]; 2] = [
        [
            ("CANTIDAD DE POSTULANTES:", total.as_str()),
            ("CANTIDAD QUE ASISTIERON:", "________"),
        ],
        [
            ("CANTIDAD AUSENTES:", "________"),
            ("CANTIDAD DE ANULADOS:", "________"),
        ],
    ];

    let mut line_y = y + 35.0;
    for pairs in counts {
        let mut x = MARGIN + 10.0;
        for (label, value) in pairs {
            surface.set_font(FontFamily::HelveticaBold, 9.0);
            surface.text(label, x, line_y, 160.0, TextAlign::Left);
            surface.set_font(FontFamily::Helvetica, 10.0);
            surface.text(value, x + 165.0, line_y, 100.0, TextAlign::Left);
            x += 290.0;
        }
        line_y += 20.0;
    }

    surface.line(MARGIN, y + 72.0, PAGE_WIDTH - MARGIN, y + 72.0, 1.0);

    surface.set_font(FontFamily::HelveticaBold, 8.0);
    if variant.includes_room_responsible() {
        surface.text("NOMBRE Y FIRMA COORDINADOR:", MARGIN + 10.0, y + 80.0, 170.0, TextAlign::Left);
        surface.line(MARGIN + 10.0, y + 100.0, MARGIN + 170.0, y + 100.0, 1.0);
        surface.text("NOMBRE Y FIRMA SUPERVISOR:", MARGIN + 195.0, y + 80.0, 170.0, TextAlign::Left);
        surface.line(MARGIN + 195.0, y + 100.0, MARGIN + 355.0, y + 100.0, 1.0);
        surface.text("RESPONSABLE DE AULA / TELF.:", MARGIN + 380.0, y + 80.0, 170.0, TextAlign::Left);
        surface.line(MARGIN + 380.0, y + 100.0, MARGIN + 542.0, y + 100.0, 1.0);
    } else {
        surface.text("NOMBRE Y FIRMA COORDINADOR:", MARGIN + 30.0, y + 80.0, 200.0, TextAlign::Left);
        surface.line(MARGIN + 50.0, y + 100.0, MARGIN + 230.0, y + 100.0, 1.0);
        surface.text("NOMBRE Y FIRMA SUPERVISOR:", MARGIN + 320.0, y + 80.0, 200.0, TextAlign::Left);
        surface.line(MARGIN + 340.0, y + 100.0, MARGIN + 520.0, y + 100.0, 1.0);
    }
}
