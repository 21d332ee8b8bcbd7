use crate::utils::formatting::truncate;
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::mem;
use std::path::Path;

const FONT_REGULAR: Name<'static> = Name(b"F1");
const FONT_BOLD: Name<'static> = Name(b"F2");
const FONT_ITALIC: Name<'static> = Name(b"F3");

/// Average Helvetica glyph width as a fraction of the font size.
const GLYPH_RATIO: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

impl FontStyle {
    fn name(self) -> Name<'static> {
        match self {
            FontStyle::Regular => FONT_REGULAR,
            FontStyle::Bold => FONT_BOLD,
            FontStyle::Italic => FONT_ITALIC,
        }
    }
}

pub type Rgb = (f32, f32, f32);

pub const BLACK: Rgb = (0.0, 0.0, 0.0);
pub const GREY: Rgb = (0.4, 0.4, 0.4);

#[derive(Debug, Clone, Copy)]
pub struct TableStyle {
    pub head_fill: Rgb,
    pub striped: bool,
}

/// Helvetica is used with its standard encoding: keep ASCII, map the usual
/// typographic characters, replace the rest.
pub fn pdf_safe(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            c if c.is_ascii() && !c.is_ascii_control() => c,
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            _ => '?',
        })
        .collect()
}

/// Flowing A4 document: text blocks and paginated tables are laid out top
/// to bottom, moving to a new page when the current one is full.
pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,
    content: Content,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,
    y: f32,

    next_id: i32,
    font_ids: [Ref; 3],

    font_size: f32,
    header_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        // ID gestiti a mano
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_ids = [Ref::new(3), Ref::new(4), Ref::new(5)];
        let next_id = 6;

        pdf.type1_font(font_ids[0]).base_font(Name(b"Helvetica"));
        pdf.type1_font(font_ids[1]).base_font(Name(b"Helvetica-Bold"));
        pdf.type1_font(font_ids[2]).base_font(Name(b"Helvetica-Oblique"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,
            content: Content::new(),

            page_w: 595.0,
            page_h: 842.0,
            margin: 40.0,
            row_h: 20.0,
            y: 0.0,

            next_id,
            font_ids,

            font_size: 10.0,
            header_font_size: 10.5,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn usable_width(&self) -> f32 {
        self.page_w - 2.0 * self.margin
    }

    /// Close the current page (if any) and open a new one.
    pub fn page_break(&mut self) {
        self.finish_page();

        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        {
            let mut page = self.pdf.page(page_id);
            page.parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
                .contents(content_id);

            page.resources()
                .fonts()
                .pair(FONT_REGULAR, self.font_ids[0])
                .pair(FONT_BOLD, self.font_ids[1])
                .pair(FONT_ITALIC, self.font_ids[2]);
        }

        self.current_content_id = Some(content_id);
        self.y = self.page_h - self.margin;
    }

    /// Footer + content stream of the current page.
    fn finish_page(&mut self) {
        let Some(id) = self.current_content_id.take() else {
            return;
        };

        let pg = format!("Page {}", self.page_refs.len());
        draw_text(
            &mut self.content,
            FONT_REGULAR,
            GREY,
            self.page_w - self.margin - 40.0,
            self.margin / 2.0,
            8.0,
            &pg,
        );

        let content = mem::replace(&mut self.content, Content::new());
        self.pdf.stream(id, &content.finish());
    }

    fn ensure_space(&mut self, h: f32) {
        if self.current_content_id.is_none() || self.y - h < self.margin {
            self.page_break();
        }
    }

    pub fn gap(&mut self, h: f32) {
        self.y -= h;
    }

    /// A paragraph wrapped to the page width.
    pub fn text(&mut self, text: &str, size: f32, style: FontStyle, color: Rgb) {
        let line_h = size * 1.35;
        let max_chars = (self.usable_width() / (size * GLYPH_RATIO)).max(10.0) as usize;
        let safe = pdf_safe(text);

        for line in textwrap::wrap(&safe, max_chars) {
            self.ensure_space(line_h);
            self.y -= line_h;
            draw_text(
                &mut self.content,
                style.name(),
                color,
                self.margin,
                self.y + size * 0.3,
                size,
                &line,
            );
        }
    }

    /// Horizontal rule across the usable width.
    pub fn rule(&mut self) {
        self.ensure_space(8.0);
        self.y -= 4.0;

        self.content.save_state();
        self.content.set_stroke_rgb(0.78, 0.78, 0.78);
        self.content.set_line_width(0.5);
        self.content.move_to(self.margin, self.y);
        self.content.line_to(self.page_w - self.margin, self.y);
        self.content.stroke();
        self.content.restore_state();

        self.y -= 4.0;
    }

    /// Column widths from header + content length, stretched or shrunk to
    /// the usable width.
    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers.iter().map(|h| h.len() as f32 * 6.5 + 8.0).collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (cell.len() as f32 * 5.6 + 8.0).max(*w);
                }
            }
        }

        let total: f32 = widths.iter().sum();
        if total > 0.0 {
            let scale = self.usable_width() / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    fn draw_header_row(&mut self, headers: &[String], col_widths: &[f32], style: TableStyle) {
        let bottom = self.y - self.row_h;
        let total: f32 = col_widths.iter().sum();

        self.content.save_state();
        let (r, g, b) = style.head_fill;
        self.content.set_fill_rgb(r, g, b);
        self.content.rect(self.margin, bottom, total, self.row_h);
        self.content.fill_nonzero();
        self.content.restore_state();

        draw_row(
            &mut self.content,
            FONT_BOLD,
            (1.0, 1.0, 1.0),
            bottom,
            self.row_h,
            col_widths,
            self.margin,
            headers,
            self.header_font_size,
        );
        self.y = bottom;
    }

    /// Paginated table; the header row is repeated on every page it spans.
    pub fn table(&mut self, headers: &[&str], rows: &[Vec<String>], style: TableStyle) {
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|r| r.iter().map(|c| pdf_safe(c)).collect())
            .collect();
        let col_widths = self.compute_col_widths(headers, &rows);
        let header_row: Vec<String> = headers.iter().map(|h| pdf_safe(h)).collect();
        let total: f32 = col_widths.iter().sum();

        // header + at least one row on the same page
        self.ensure_space(self.row_h * 2.0);
        self.draw_header_row(&header_row, &col_widths, style);

        for (i, row) in rows.iter().enumerate() {
            if self.y - self.row_h < self.margin {
                self.page_break();
                self.draw_header_row(&header_row, &col_widths, style);
            }

            let bottom = self.y - self.row_h;

            if style.striped && i % 2 == 1 {
                self.content.save_state();
                self.content.set_fill_rgb(0.95, 0.95, 0.97);
                self.content.rect(self.margin, bottom, total, self.row_h);
                self.content.fill_nonzero();
                self.content.restore_state();
            }

            draw_row(
                &mut self.content,
                FONT_REGULAR,
                BLACK,
                bottom,
                self.row_h,
                &col_widths,
                self.margin,
                row,
                self.font_size,
            );
            self.y = bottom;
        }
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        if self.page_refs.is_empty() {
            self.page_break();
        }
        self.finish_page();

        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        {
            let mut pages = self.pdf.pages(self.pages_id);
            pages.count(self.page_refs.len() as i32);
            pages.kids(self.page_refs.iter().copied());
        }

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

fn draw_text(content: &mut Content, font: Name, color: Rgb, x: f32, y: f32, size: f32, text: &str) {
    content.save_state();
    content.set_fill_rgb(color.0, color.1, color.2);
    content.begin_text();
    content.set_font(font, size);
    content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
    content.show(Str(text.as_bytes()));
    content.end_text();
    content.restore_state();
}

#[allow(clippy::too_many_arguments)]
fn draw_row(
    content: &mut Content,
    font: Name,
    color: Rgb,
    y: f32,
    row_h: f32,
    col_widths: &[f32],
    x_start: f32,
    row: &[String],
    font_size: f32,
) {
    let mut x = x_start;

    for (i, w) in col_widths.iter().enumerate() {
        let cell = row.get(i).map(String::as_str).unwrap_or("");
        let fit = ((w - 8.0) / (font_size * GLYPH_RATIO)).max(1.0) as usize;

        draw_text(
            content,
            font,
            color,
            x + 4.0,
            y + (row_h - font_size) / 2.0 + 2.0,
            font_size,
            &truncate(cell, fit),
        );

        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, *w, row_h);
        content.stroke();
        content.restore_state();

        x += w;
    }
}
