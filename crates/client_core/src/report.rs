//! Events report. The layout is computed first as plain draw operations on A4
//! pages (millimetres from the top-left corner); rendering to PDF is a separate
//! pass so pagination can be checked without decoding a PDF.

use std::{fs, path::Path};

use chrono::NaiveDateTime;
use printpdf::{
    path::{PaintMode, WindingOrder},
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point,
    Polygon, Rgb,
};
use shared::protocol::Event;
use thiserror::Error;

use crate::{filter::EventFilter, notice::Notice, present::format_event_date};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_X_MM: f32 = 10.0;
pub const TABLE_TOP_MM: f32 = 50.0;
pub const TABLE_BOTTOM_MARGIN_MM: f32 = 50.0;
pub const ROW_HEIGHT_MM: f32 = 8.0;
const FOOTER_OFFSET_MM: f32 = 10.0;
const CELL_PADDING_MM: f32 = 2.0;
const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

pub const COLUMNS: [(&str, f32); 5] = [
    ("Nombre", 60.0),
    ("Fecha", 30.0),
    ("Estado", 30.0),
    ("Cupos", 25.0),
    ("Categoría", 45.0),
];

pub type Rgb8 = (u8, u8, u8);

const TEXT_COLOR: Rgb8 = (51, 51, 51);
const BLACK: Rgb8 = (0, 0, 0);
const BRAND_COLOR: Rgb8 = (241, 196, 15);
const STRIPE_COLOR: Rgb8 = (245, 245, 245);
const GRID_COLOR: Rgb8 = (200, 200, 200);

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to render pdf: {0}")]
    Pdf(#[from] printpdf::Error),
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Rgb8,
        text: String,
    },
    Rule {
        from: (f32, f32),
        to: (f32, f32),
        thickness: f32,
        color: Rgb8,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb8,
    },
}

impl DrawOp {
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportLayout {
    pub pages: Vec<Vec<DrawOp>>,
}

impl ReportLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn texts(&self, page: usize) -> Vec<&str> {
        self.pages
            .get(page)
            .map(|ops| ops.iter().filter_map(DrawOp::text).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub cells: [String; 5],
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventReport {
    pub file_name: String,
    pub title: String,
    pub filters_line: Option<String>,
    pub generated_line: String,
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    /// Nothing to report; no document is produced.
    Empty(Notice),
    Ready(EventReport),
}

/// Builds the report for the currently displayed events.
pub fn compose(events: &[Event], filter: &EventFilter, generated_at: NaiveDateTime) -> ReportOutcome {
    if events.is_empty() {
        return ReportOutcome::Empty(Notice::info("No hay eventos para generar el reporte", ""));
    }

    let rows = events
        .iter()
        .map(|event| ReportRow {
            cells: [
                event.name.clone(),
                format_event_date(&event.date),
                event.status.as_str().to_string(),
                event.capacity.to_string(),
                event.category.as_str().to_string(),
            ],
        })
        .collect();

    ReportOutcome::Ready(EventReport {
        file_name: report_file_name(filter),
        title: "Reporte de Eventos".to_string(),
        filters_line: filters_line(filter),
        generated_line: format!("Generado el: {}", generated_at.format("%d/%m/%Y %H:%M:%S")),
        rows,
    })
}

pub fn report_file_name(filter: &EventFilter) -> String {
    let mut name = "Reporte_Eventos".to_string();
    if let Some(category) = &filter.category {
        name.push('_');
        name.push_str(category.as_str());
    }
    if let Some(status) = &filter.status {
        name.push('_');
        name.push_str(status.as_str());
    }
    name.push_str(".pdf");
    name
}

pub fn filters_line(filter: &EventFilter) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(category) = &filter.category {
        parts.push(format!("Categoría: {category}"));
    }
    if let Some(status) = &filter.status {
        parts.push(format!("Estado: {status}"));
    }
    if !filter.search.is_empty() {
        parts.push(format!("Búsqueda: \"{}\"", filter.search));
    }
    if parts.is_empty() {
        None
    } else {
        Some(format!("Filtros aplicados: {}", parts.join(" | ")))
    }
}

/// Body rows that fit under the repeated header row on one page.
pub fn rows_per_page() -> usize {
    let usable = PAGE_HEIGHT_MM - TABLE_BOTTOM_MARGIN_MM - TABLE_TOP_MM - ROW_HEIGHT_MM;
    (usable / ROW_HEIGHT_MM).floor() as usize
}

pub fn approx_text_width_mm(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * AVG_GLYPH_WIDTH * PT_TO_MM
}

fn fit_to_width(text: &str, width_mm: f32, size_pt: f32) -> String {
    let available = width_mm - 2.0 * CELL_PADDING_MM;
    if approx_text_width_mm(text, size_pt) <= available {
        return text.to_string();
    }
    let glyph = size_pt * AVG_GLYPH_WIDTH * PT_TO_MM;
    let keep = ((available / glyph).floor() as usize).saturating_sub(3);
    let mut fitted: String = text.chars().take(keep).collect();
    fitted.push_str("...");
    fitted
}

fn centered_text(text: &str, center_x: f32, y: f32, size: f32, weight: FontWeight, color: Rgb8) -> DrawOp {
    DrawOp::Text {
        x: center_x - approx_text_width_mm(text, size) / 2.0,
        y,
        size,
        weight,
        color,
        text: text.to_string(),
    }
}

fn left_text(text: &str, x: f32, y: f32, size: f32, weight: FontWeight) -> DrawOp {
    DrawOp::Text {
        x,
        y,
        size,
        weight,
        color: TEXT_COLOR,
        text: text.to_string(),
    }
}

impl EventReport {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn layout(&self) -> ReportLayout {
        let center_x = PAGE_WIDTH_MM / 2.0;
        let table_width: f32 = COLUMNS.iter().map(|(_, width)| width).sum();
        let mut pages: Vec<Vec<DrawOp>> = Vec::new();

        let mut first = vec![
            DrawOp::FillRect {
                x: MARGIN_X_MM,
                y: 10.0,
                width: 30.0,
                height: 30.0,
                color: BRAND_COLOR,
            },
            centered_text("MILA", MARGIN_X_MM + 15.0, 27.0, 14.0, FontWeight::Bold, BLACK),
            centered_text(&self.title, center_x, 25.0, 22.0, FontWeight::Regular, TEXT_COLOR),
        ];
        if let Some(line) = &self.filters_line {
            first.push(centered_text(line, center_x, 35.0, 12.0, FontWeight::Regular, TEXT_COLOR));
        }
        first.push(centered_text(
            &self.generated_line,
            center_x,
            42.0,
            10.0,
            FontWeight::Regular,
            TEXT_COLOR,
        ));
        first.push(DrawOp::Rule {
            from: (MARGIN_X_MM, 45.0),
            to: (MARGIN_X_MM + table_width, 45.0),
            thickness: 0.5,
            color: GRID_COLOR,
        });
        pages.push(first);

        let per_page = rows_per_page().max(1);
        let mut final_y = TABLE_TOP_MM;
        for (chunk_index, chunk) in self.rows.chunks(per_page).enumerate() {
            let mut page = if chunk_index == 0 {
                pages.pop().unwrap_or_default()
            } else {
                Vec::new()
            };
            final_y =
                Self::layout_table_chunk(&mut page, chunk, chunk_index * per_page, table_width);
            pages.push(page);
        }

        let summary_bottom = PAGE_HEIGHT_MM - FOOTER_OFFSET_MM - ROW_HEIGHT_MM;
        if final_y + 17.0 > summary_bottom {
            pages.push(Vec::new());
            final_y = TABLE_TOP_MM;
        }
        if let Some(page) = pages.last_mut() {
            page.push(left_text("Resumen:", MARGIN_X_MM, final_y + 10.0, 11.0, FontWeight::Bold));
            page.push(left_text(
                &format!("Total de eventos: {}", self.rows.len()),
                MARGIN_X_MM,
                final_y + 17.0,
                11.0,
                FontWeight::Regular,
            ));
        }

        // Second pass: the page total is only known now.
        let total = pages.len();
        for (index, page) in pages.iter_mut().enumerate() {
            page.push(left_text(
                &format!("Página {} de {}", index + 1, total),
                MARGIN_X_MM,
                PAGE_HEIGHT_MM - FOOTER_OFFSET_MM,
                10.0,
                FontWeight::Regular,
            ));
        }

        ReportLayout { pages }
    }

    /// Header row plus `rows`, starting at the table top. Returns the y just
    /// below the last row.
    fn layout_table_chunk(
        page: &mut Vec<DrawOp>,
        rows: &[ReportRow],
        first_row_index: usize,
        table_width: f32,
    ) -> f32 {
        let mut y = TABLE_TOP_MM;

        page.push(DrawOp::FillRect {
            x: MARGIN_X_MM,
            y,
            width: table_width,
            height: ROW_HEIGHT_MM,
            color: BRAND_COLOR,
        });
        let mut x = MARGIN_X_MM;
        for (label, width) in COLUMNS {
            page.push(centered_text(
                label,
                x + width / 2.0,
                y + 5.5,
                11.0,
                FontWeight::Bold,
                BLACK,
            ));
            x += width;
        }
        Self::grid_row(page, y, table_width);
        y += ROW_HEIGHT_MM;

        for (offset, row) in rows.iter().enumerate() {
            if (first_row_index + offset) % 2 == 1 {
                page.push(DrawOp::FillRect {
                    x: MARGIN_X_MM,
                    y,
                    width: table_width,
                    height: ROW_HEIGHT_MM,
                    color: STRIPE_COLOR,
                });
            }
            let mut x = MARGIN_X_MM;
            for (cell, (_, width)) in row.cells.iter().zip(COLUMNS) {
                page.push(left_text(
                    &fit_to_width(cell, width, 10.0),
                    x + CELL_PADDING_MM,
                    y + 5.5,
                    10.0,
                    FontWeight::Regular,
                ));
                x += width;
            }
            Self::grid_row(page, y, table_width);
            y += ROW_HEIGHT_MM;
        }
        y
    }

    fn grid_row(page: &mut Vec<DrawOp>, top: f32, table_width: f32) {
        let bottom = top + ROW_HEIGHT_MM;
        let rule = |from: (f32, f32), to: (f32, f32)| DrawOp::Rule {
            from,
            to,
            thickness: 0.5,
            color: GRID_COLOR,
        };
        page.push(rule((MARGIN_X_MM, top), (MARGIN_X_MM + table_width, top)));
        page.push(rule((MARGIN_X_MM, bottom), (MARGIN_X_MM + table_width, bottom)));
        let mut x = MARGIN_X_MM;
        page.push(rule((x, top), (x, bottom)));
        for (_, width) in COLUMNS {
            x += width;
            page.push(rule((x, top), (x, bottom)));
        }
    }

    pub fn to_pdf_bytes(&self) -> Result<Vec<u8>, ReportError> {
        let layout = self.layout();
        let (doc, first_page, first_layer) = PdfDocument::new(
            self.title.as_str(),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Reporte",
        );
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

        for (index, ops) in layout.pages.iter().enumerate() {
            let (page, layer) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Reporte")
            };
            let layer = doc.get_page(page).get_layer(layer);
            for op in ops {
                draw(&layer, op, &regular, &bold);
            }
        }

        Ok(doc.save_to_bytes()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ReportError> {
        fs::write(path, self.to_pdf_bytes()?)?;
        Ok(())
    }
}

fn pdf_color((r, g, b): Rgb8) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

/// PDF y grows upwards from the bottom edge.
fn point(x: f32, y_from_top: f32) -> Point {
    Point::new(Mm(x), Mm(PAGE_HEIGHT_MM - y_from_top))
}

/// The builtin Helvetica faces only render ASCII reliably through printpdf's
/// text path, so Spanish accents are folded.
fn fold_for_builtin_font(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            'ñ' => 'n',
            'Á' => 'A',
            'É' => 'E',
            'Í' => 'I',
            'Ó' => 'O',
            'Ú' | 'Ü' => 'U',
            'Ñ' => 'N',
            c if c.is_ascii() => c,
            _ => '?',
        })
        .collect()
}

fn draw(layer: &PdfLayerReference, op: &DrawOp, regular: &IndirectFontRef, bold: &IndirectFontRef) {
    match op {
        DrawOp::Text {
            x,
            y,
            size,
            weight,
            color,
            text,
        } => {
            let font = match weight {
                FontWeight::Regular => regular,
                FontWeight::Bold => bold,
            };
            layer.set_fill_color(pdf_color(*color));
            layer.use_text(
                fold_for_builtin_font(text),
                *size,
                Mm(*x),
                Mm(PAGE_HEIGHT_MM - *y),
                font,
            );
        }
        DrawOp::Rule {
            from,
            to,
            thickness,
            color,
        } => {
            layer.set_outline_color(pdf_color(*color));
            layer.set_outline_thickness(*thickness);
            layer.add_line(Line {
                points: vec![(point(from.0, from.1), false), (point(to.0, to.1), false)],
                is_closed: false,
            });
        }
        DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        } => {
            layer.set_fill_color(pdf_color(*color));
            layer.add_polygon(Polygon {
                rings: vec![vec![
                    (point(*x, *y), false),
                    (point(*x + *width, *y), false),
                    (point(*x + *width, *y + *height), false),
                    (point(*x, *y + *height), false),
                ]],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            });
        }
    }
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
