//! Cursor-based single-page layout engine.
//!
//! Draws onto one A4 page with a top-down cursor in page-space points
//! (origin bottom-left). There is no auto-pagination: content that
//! overflows the page height lands at negative coordinates and is not
//! visible. Callers are expected to stay within one page.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

pub const A4_WIDTH: f32 = 595.28;
pub const A4_HEIGHT: f32 = 841.89;
pub const MARGIN: f32 = 50.0;
pub const LINE_HEIGHT: f32 = 18.0;
pub const SECTION_GAP: f32 = 25.0;

const LABEL_COLUMN_WIDTH: f32 = 180.0;
const FIELD_ROW_HEIGHT: f32 = 25.0;
const TABLE_HEADER_HEIGHT: f32 = 22.0;
const TABLE_BODY_HEIGHT: f32 = 20.0;

/// The two embedded standard faces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    fn resource_name(self) -> Name<'static> {
        match self {
            FontFace::Regular => Name(b"F1"),
            FontFace::Bold => Name(b"F2"),
        }
    }
}

/// One table cell: its text and column width in points.
pub struct TableColumn<'a> {
    pub text: &'a str,
    pub width: f32,
}

/// Text on a page is limited to the standard fonts' Latin-1 repertoire;
/// anything outside it renders as '?'.
fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (c as u32) < 256 { c as u8 } else { b'?' })
        .collect()
}

/// Builds one A4 page top-down. The vertical cursor starts at the top
/// margin and is decremented by each row-drawing primitive.
pub struct PageComposer {
    content: Content,
    cursor: f32,
}

impl Default for PageComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageComposer {
    pub fn new() -> Self {
        Self {
            content: Content::new(),
            cursor: A4_HEIGHT - MARGIN,
        }
    }

    /// Current vertical cursor position, in points from the page bottom.
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// Moves the cursor down by `points`.
    pub fn advance(&mut self, points: f32) {
        self.cursor -= points;
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, face: FontFace, size: f32) {
        self.content.begin_text();
        self.content.set_font(face.resource_name(), size);
        self.content.next_line(x, y);
        self.content.show(Str(&encode_latin1(text)));
        self.content.end_text();
    }

    /// Draws a left-aligned 18pt bold title at the cursor, then advances
    /// past it.
    pub fn title(&mut self, text: &str) {
        self.draw_text(MARGIN, self.cursor, text, FontFace::Bold, 18.0);
        self.advance(40.0);
    }

    /// Draws text centered-ish on the page width using a caller-supplied
    /// horizontal offset from the center line.
    pub fn centered_text(&mut self, text: &str, center_offset: f32, face: FontFace, size: f32) {
        self.draw_text(A4_WIDTH / 2.0 - center_offset, self.cursor, text, face, size);
    }

    /// Draws a body line at the cursor without advancing.
    pub fn text(&mut self, text: &str, face: FontFace, size: f32) {
        self.draw_text(MARGIN, self.cursor, text, face, size);
    }

    /// Draws a body line at the cursor, then advances one line height.
    pub fn text_line(&mut self, text: &str, face: FontFace, size: f32) {
        self.text(text, face, size);
        self.advance(LINE_HEIGHT);
    }

    /// Draws a two-cell bordered row: a fixed-width bold label column
    /// and a value column filling the remaining width. Advances the
    /// cursor by the row height.
    pub fn labeled_field(&mut self, label: &str, value: &str) {
        let y = self.cursor;
        let value_x = MARGIN + LABEL_COLUMN_WIDTH;
        let value_width = A4_WIDTH - MARGIN * 2.0 - LABEL_COLUMN_WIDTH;

        self.content.set_line_width(0.5);
        self.content.rect(
            MARGIN,
            y - FIELD_ROW_HEIGHT + 5.0,
            LABEL_COLUMN_WIDTH,
            FIELD_ROW_HEIGHT,
        );
        self.content.stroke();
        self.content.rect(
            value_x,
            y - FIELD_ROW_HEIGHT + 5.0,
            value_width,
            FIELD_ROW_HEIGHT,
        );
        self.content.stroke();

        self.draw_text(MARGIN + 5.0, y - 3.0, label, FontFace::Bold, 10.0);
        self.draw_text(value_x + 5.0, y - 3.0, value, FontFace::Regular, 10.0);

        self.advance(FIELD_ROW_HEIGHT);
    }

    /// Draws a bordered table row with independently sized columns and
    /// advances the cursor. Header rows are taller, bold, and shaded.
    pub fn table_row(&mut self, columns: &[TableColumn<'_>], is_header: bool) {
        let y = self.cursor;
        let row_height = if is_header {
            TABLE_HEADER_HEIGHT
        } else {
            TABLE_BODY_HEIGHT
        };
        let face = if is_header {
            FontFace::Bold
        } else {
            FontFace::Regular
        };

        self.content.set_line_width(0.5);

        if is_header {
            let total_width: f32 = columns.iter().map(|c| c.width).sum();
            self.content.set_fill_gray(0.9);
            self.content
                .rect(MARGIN, y - row_height + 5.0, total_width, row_height);
            self.content.fill_nonzero_and_stroke();
            self.content.set_fill_gray(0.0);
        }

        let mut x = MARGIN;
        for col in columns {
            self.content
                .rect(x, y - row_height + 5.0, col.width, row_height);
            self.content.stroke();
            self.draw_text(x + 5.0, y - 3.0, col.text, face, 10.0);
            x += col.width;
        }

        self.advance(row_height);
    }

    /// Draws a gray 9pt footer line at the cursor without advancing.
    pub fn footer_line(&mut self, text: &str, y: f32) {
        self.content.set_fill_gray(0.4);
        self.draw_text(MARGIN, y, text, FontFace::Regular, 9.0);
        self.content.set_fill_gray(0.0);
    }

    /// Assembles the finished single-page document. Output is fully
    /// deterministic for a given drawing sequence.
    pub fn finish(self) -> Vec<u8> {
        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let page_id = Ref::new(3);
        let font_regular_id = Ref::new(4);
        let font_bold_id = Ref::new(5);
        let content_id = Ref::new(6);

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id).kids([page_id]).count(1);

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, A4_WIDTH, A4_HEIGHT));
        page.parent(page_tree_id);
        page.contents(content_id);
        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        fonts.pair(FontFace::Regular.resource_name(), font_regular_id);
        fonts.pair(FontFace::Bold.resource_name(), font_bold_id);
        fonts.finish();
        resources.finish();
        page.finish();

        pdf.type1_font(font_regular_id)
            .base_font(Name(b"Helvetica"));
        pdf.type1_font(font_bold_id)
            .base_font(Name(b"Helvetica-Bold"));

        pdf.stream(content_id, &self.content.finish());

        pdf.finish()
    }
}
