//! Page layout for the printable candidate documents.
//!
//! The builder turns an ordered record set into an immutable sequence of
//! [`Page`] descriptions; no drawing happens here. The drawing step consumes
//! the pages afterwards, which keeps every geometry decision unit-testable
//! without a backend. Coordinates are PDF points on a letter page with `y`
//! growing downward from the top edge.

use crate::registry::domain::JoinedCandidate;
use crate::registry::names::display_name;

use super::variant::ReportVariant;

pub const PAGE_WIDTH: f64 = 612.0;
pub const PAGE_HEIGHT: f64 = 792.0;
pub const MARGIN: f64 = 30.0;
pub const ROW_HEIGHT: f64 = 30.0;
pub const TABLE_HEADER_HEIGHT: f64 = 32.0;
/// Bottom region kept free of rows so the summary block never collides with
/// the table.
pub const FOOTER_RESERVE: f64 = 150.0;
pub const SUMMARY_HEIGHT: f64 = 110.0;
pub const SUMMARY_GAP: f64 = 20.0;
/// Top of the table on the first page, below the title and the filter info
/// box that overlay the letterhead region.
pub const FIRST_PAGE_TABLE_TOP: f64 = 150.0;
/// Top of the table on continuation pages.
pub const CONTINUATION_TOP: f64 = 50.0;

/// Filter labels echoed in the first-page info box. Unfiltered dimensions
/// show the upstream placeholder literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterContext {
    pub departamento: String,
    pub recinto: String,
    pub fecha: String,
    pub aula: String,
    pub turno: String,
}

impl Default for FilterContext {
    fn default() -> Self {
        Self {
            departamento: "TODOS".to_string(),
            recinto: "TODOS".to_string(),
            fecha: "TODAS".to_string(),
            aula: "TODAS".to_string(),
            turno: "TODOS".to_string(),
        }
    }
}

/// One laid-out page: an optional first-page title block, an optional
/// repeated table header, the row blocks that fit, and possibly the summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub number: usize,
    pub title: Option<TitleBlock>,
    pub table_header_y: Option<f64>,
    pub rows: Vec<RowBlock>,
    pub summary: Option<SummaryBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleBlock {
    pub text: String,
    pub filters: FilterContext,
}

/// One table row. `seq` is 1-based and continuous across pages; `shaded`
/// follows the absolute row index so shading is stable across page breaks.
#[derive(Debug, Clone, PartialEq)]
pub struct RowBlock {
    pub seq: usize,
    pub y: f64,
    pub shaded: bool,
    pub ci: String,
    pub nombre: String,
    pub extra: String,
}

/// The closing summary block. Only the total is computed; the attendance
/// counts and signature lines are blank fields completed by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryBlock {
    pub y: f64,
    pub total: usize,
}

/// Accumulates rows into pages, breaking when a row would cross into the
/// reserved footer region, then places the summary.
pub struct PageBuilder {
    variant: ReportVariant,
    done: Vec<Page>,
    current: Page,
    cursor: f64,
    next_index: usize,
}

impl PageBuilder {
    pub fn new(variant: ReportVariant, context: FilterContext) -> Self {
        let first = Page {
            number: 1,
            title: Some(TitleBlock {
                text: variant.title().to_string(),
                filters: context,
            }),
            table_header_y: Some(FIRST_PAGE_TABLE_TOP),
            rows: Vec::new(),
            summary: None,
        };
        Self {
            variant,
            done: Vec::new(),
            current: first,
            cursor: FIRST_PAGE_TABLE_TOP + TABLE_HEADER_HEIGHT,
            next_index: 0,
        }
    }

    pub fn push_row(&mut self, candidate: &JoinedCandidate) {
        if self.cursor + ROW_HEIGHT > PAGE_HEIGHT - FOOTER_RESERVE {
            self.break_page(true);
        }

        let index = self.next_index;
        self.next_index += 1;

        self.current.rows.push(RowBlock {
            seq: index + 1,
            y: self.cursor,
            shaded: index % 2 == 0,
            ci: candidate.record.ci.clone(),
            nombre: display_name(candidate.persona.as_ref(), self.variant.name_style()),
            extra: self.variant.extra_value(candidate),
        });
        self.cursor += ROW_HEIGHT;
    }

    /// Place the summary and return the finished page sequence.
    pub fn finish(mut self, total: usize) -> Vec<Page> {
        self.cursor += SUMMARY_GAP;
        if self.cursor + SUMMARY_HEIGHT > PAGE_HEIGHT - MARGIN {
            self.break_page(false);
        }

        self.current.summary = Some(SummaryBlock {
            y: self.cursor,
            total,
        });
        self.done.push(self.current);
        self.done
    }

    #[cfg(test)]
    pub(crate) fn set_cursor_for_tests(&mut self, y: f64) {
        self.cursor = y;
    }

    fn break_page(&mut self, with_table_header: bool) {
        let number = self.current.number + 1;
        let finished = std::mem::replace(
            &mut self.current,
            Page {
                number,
                title: None,
                table_header_y: with_table_header.then_some(CONTINUATION_TOP),
                rows: Vec::new(),
                summary: None,
            },
        );
        self.done.push(finished);

        self.cursor = if with_table_header {
            CONTINUATION_TOP + TABLE_HEADER_HEIGHT
        } else {
            CONTINUATION_TOP
        };
    }
}

/// Lay out an ordered record set. Deterministic for a fixed input: the same
/// records always produce the same page sequence.
pub fn layout(
    records: &[JoinedCandidate],
    variant: ReportVariant,
    context: FilterContext,
) -> Vec<Page> {
    let mut builder = PageBuilder::new(variant, context);
    for record in records {
        builder.push_row(record);
    }
    builder.finish(records.len())
}
