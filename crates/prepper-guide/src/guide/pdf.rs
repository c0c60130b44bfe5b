use super::layout::{
    palette, Align, Block, GuideDocument, Paragraph, ParagraphStyle, ProfileTable, Rgb, TextRun,
    INCH,
};
use super::RenderError;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

const PAGE_WIDTH: f32 = 8.5 * INCH;
const PAGE_HEIGHT: f32 = 11.0 * INCH;
const MARGIN: f32 = 0.75 * INCH;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    Regular,
    Bold,
    Oblique,
    BoldOblique,
}

impl Face {
    const ALL: [Face; 4] = [Face::Regular, Face::Bold, Face::Oblique, Face::BoldOblique];

    fn select(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => Self::Regular,
            (true, false) => Self::Bold,
            (false, true) => Self::Oblique,
            (true, true) => Self::BoldOblique,
        }
    }

    fn resource(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Oblique => "F3",
            Self::BoldOblique => "F4",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
            Self::Oblique => "Helvetica-Oblique",
            Self::BoldOblique => "Helvetica-BoldOblique",
        }
    }

    fn is_bold(self) -> bool {
        matches!(self, Self::Bold | Self::BoldOblique)
    }
}

// Advance widths in 1/1000 em for bytes 0x20..=0x7e, from the Adobe base-14 AFM files.
// Oblique faces share the upright metrics.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

fn glyph_width(face: Face, byte: u8) -> u16 {
    let table = if face.is_bold() {
        &HELVETICA_BOLD
    } else {
        &HELVETICA
    };
    match byte {
        0x20..=0x7e => table[usize::from(byte - 0x20)],
        0x95 => 350,
        0x97 => 1000,
        0xb0 => 400,
        0xd7 => 584,
        _ => 556,
    }
}

fn text_width(face: Face, bytes: &[u8], size: f32) -> f32 {
    let units: u32 = bytes
        .iter()
        .map(|byte| u32::from(glyph_width(face, *byte)))
        .sum();
    units as f32 * size / 1000.0
}

fn space_width(face: Face, size: f32) -> f32 {
    text_width(face, b" ", size)
}

fn win_ansi_byte(c: char) -> Option<u8> {
    let byte = match c {
        ' '..='~' => c as u8,
        '\u{a0}'..='\u{ff}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        _ => return None,
    };
    Some(byte)
}

/// Encodes text for the base-14 fonts. Characters without a WinAnsi glyph
/// (emoji icons, variation selectors) are dropped.
pub(crate) fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '→' => encoded.extend_from_slice(b"->"),
            '≥' => encoded.extend_from_slice(b">="),
            '≤' => encoded.extend_from_slice(b"<="),
            '\t' | '\n' | '\r' => encoded.push(b' '),
            other => {
                if let Some(byte) = win_ansi_byte(other) {
                    encoded.push(byte);
                }
            }
        }
    }
    encoded
}

#[derive(Debug, Clone)]
struct Word {
    bytes: Vec<u8>,
    face: Face,
    color: Rgb,
    width: f32,
}

#[derive(Debug, Clone, Default)]
struct Line {
    words: Vec<Word>,
    /// Natural width including single spaces between words.
    width: f32,
}

fn words(runs: &[TextRun], style: &ParagraphStyle) -> Vec<Word> {
    let mut words = Vec::new();
    for run in runs {
        let face = Face::select(style.bold || run.bold, run.italic);
        let color = run.color.unwrap_or(style.color);
        for token in run.text.split_whitespace() {
            let bytes = encode_win_ansi(token);
            if bytes.is_empty() {
                continue;
            }
            let width = text_width(face, &bytes, style.font_size);
            words.push(Word {
                bytes,
                face,
                color,
                width,
            });
        }
    }
    words
}

/// Greedy fill; a word wider than the line gets a line of its own.
fn wrap(words: Vec<Word>, size: f32, max_width: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current = Line::default();

    for word in words {
        if current.words.is_empty() {
            current.width = word.width;
            current.words.push(word);
            continue;
        }
        let gap = space_width(word.face, size);
        if current.width + gap + word.width > max_width {
            lines.push(std::mem::take(&mut current));
            current.width = word.width;
        } else {
            current.width += gap + word.width;
        }
        current.words.push(word);
    }

    if !current.words.is_empty() {
        lines.push(current);
    }
    lines
}

/// Where and how one wrapped line is set.
#[derive(Debug, Clone, Copy)]
struct Placement {
    origin: f32,
    width: f32,
    baseline: f32,
    align: Align,
    last: bool,
    size: f32,
}

struct Pager {
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    /// Distance of the next free line from the page bottom.
    cursor: f32,
    fresh: bool,
    face: Option<(Face, u32)>,
    fill: Option<Rgb>,
}

impl Pager {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            ops: Vec::new(),
            cursor: PAGE_HEIGHT - MARGIN,
            fresh: true,
            face: None,
            fill: None,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.ops));
        self.cursor = PAGE_HEIGHT - MARGIN;
        self.fresh = true;
        self.face = None;
        self.fill = None;
    }

    fn ensure(&mut self, height: f32) {
        if !self.fresh && self.cursor - height < MARGIN {
            self.new_page();
        }
    }

    fn spacer(&mut self, height: f32) {
        if self.cursor - height < MARGIN {
            self.new_page();
        } else {
            self.cursor -= height;
        }
    }

    fn page_break(&mut self) {
        if !self.fresh {
            self.new_page();
        }
    }

    fn set_fill(&mut self, color: Rgb) {
        if self.fill != Some(color) {
            let (r, g, b) = color.components();
            self.ops
                .push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
            self.fill = Some(color);
        }
    }

    fn set_font(&mut self, face: Face, size: f32) {
        // sizes are whole or tenth points; compare on a fixed-point key
        let key = (size * 10.0).round() as u32;
        if self.face != Some((face, key)) {
            self.ops.push(Operation::new(
                "Tf",
                vec![face.resource().into(), size.into()],
            ));
            self.face = Some((face, key));
        }
    }

    fn draw_line(&mut self, line: &Line, at: Placement) {
        let Placement {
            origin,
            width,
            baseline,
            align,
            last,
            size,
        } = at;
        let slack = (width - line.width).max(0.0);
        let (mut x, extra_gap) = match align {
            Align::Left => (origin, 0.0),
            Align::Center => (origin + slack / 2.0, 0.0),
            Align::Justify if !last && line.words.len() > 1 => {
                (origin, slack / (line.words.len() - 1) as f32)
            }
            Align::Justify => (origin, 0.0),
        };

        self.ops.push(Operation::new("BT", vec![]));
        self.face = None;
        for (index, word) in line.words.iter().enumerate() {
            if index > 0 {
                x += space_width(word.face, size) + extra_gap;
            }
            self.set_font(word.face, size);
            self.set_fill(word.color);
            self.ops.push(Operation::new(
                "Tm",
                vec![
                    1_i64.into(),
                    0_i64.into(),
                    0_i64.into(),
                    1_i64.into(),
                    x.into(),
                    baseline.into(),
                ],
            ));
            self.ops.push(Operation::new(
                "Tj",
                vec![Object::String(word.bytes.clone(), StringFormat::Hexadecimal)],
            ));
            x += word.width;
        }
        self.ops.push(Operation::new("ET", vec![]));
    }

    fn paragraph(&mut self, paragraph: &Paragraph) {
        let style = paragraph.style();
        let lines = wrap(
            words(&paragraph.runs, &style),
            style.font_size,
            CONTENT_WIDTH,
        );
        if lines.is_empty() {
            return;
        }

        if !self.fresh {
            self.cursor -= style.space_before;
        }
        let leading = style.leading();
        let count = lines.len();
        for (index, line) in lines.iter().enumerate() {
            self.ensure(leading);
            let baseline = self.cursor - style.font_size;
            self.draw_line(
                line,
                Placement {
                    origin: MARGIN,
                    width: CONTENT_WIDTH,
                    baseline,
                    align: style.align,
                    last: index + 1 == count,
                    size: style.font_size,
                },
            );
            self.cursor -= leading;
            self.fresh = false;
        }
        self.cursor -= style.space_after;
    }

    fn table(&mut self, table: &ProfileTable) {
        let size = ProfileTable::FONT_SIZE;
        let style = ParagraphStyle {
            font_size: size,
            color: palette::INK,
            bold: false,
            align: Align::Left,
            space_before: 0.0,
            space_after: 0.0,
        };
        let leading = style.leading();
        let padding = ProfileTable::PADDING;
        let total_width = ProfileTable::LABEL_WIDTH + ProfileTable::VALUE_WIDTH;
        let left = MARGIN + (CONTENT_WIDTH - total_width) / 2.0;
        let value_left = left + ProfileTable::LABEL_WIDTH;

        for row in &table.rows {
            let label_lines = wrap(
                words(&[TextRun::bold(row.label)], &style),
                size,
                ProfileTable::LABEL_WIDTH - 2.0 * padding,
            );
            let value_lines = wrap(
                words(&[TextRun::plain(row.value.as_str())], &style),
                size,
                ProfileTable::VALUE_WIDTH - 2.0 * padding,
            );
            let line_count = label_lines.len().max(value_lines.len()).max(1);
            let height = line_count as f32 * leading + 2.0 * padding;

            self.ensure(height);
            let top = self.cursor;
            let bottom = top - height;

            let (fr, fg, fb) = palette::TABLE_FILL.components();
            let (sr, sg, sb) = palette::TABLE_GRID.components();
            self.ops.push(Operation::new("q", vec![]));
            self.ops
                .push(Operation::new("rg", vec![fr.into(), fg.into(), fb.into()]));
            self.ops.push(Operation::new(
                "re",
                vec![
                    left.into(),
                    bottom.into(),
                    total_width.into(),
                    height.into(),
                ],
            ));
            self.ops.push(Operation::new("f", vec![]));
            self.ops
                .push(Operation::new("RG", vec![sr.into(), sg.into(), sb.into()]));
            self.ops.push(Operation::new("w", vec![0.5_f32.into()]));
            for (x, width) in [
                (left, ProfileTable::LABEL_WIDTH),
                (value_left, ProfileTable::VALUE_WIDTH),
            ] {
                self.ops.push(Operation::new(
                    "re",
                    vec![x.into(), bottom.into(), width.into(), height.into()],
                ));
                self.ops.push(Operation::new("S", vec![]));
            }
            self.ops.push(Operation::new("Q", vec![]));
            self.fill = None;

            for (lines, x, width) in [
                (&label_lines, left, ProfileTable::LABEL_WIDTH),
                (&value_lines, value_left, ProfileTable::VALUE_WIDTH),
            ] {
                for (index, line) in lines.iter().enumerate() {
                    let baseline = top - padding - size - index as f32 * leading;
                    self.draw_line(
                        line,
                        Placement {
                            origin: x + padding,
                            width: width - 2.0 * padding,
                            baseline,
                            align: Align::Left,
                            last: true,
                            size,
                        },
                    );
                }
            }

            self.cursor = bottom;
            self.fresh = false;
        }
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.ops.is_empty() || self.pages.is_empty() {
            self.pages.push(self.ops);
        }
        self.pages
    }
}

fn paginate(document: &GuideDocument) -> Vec<Vec<Operation>> {
    let mut pager = Pager::new();
    for block in &document.blocks {
        match block {
            Block::Spacer(height) => pager.spacer(*height),
            Block::Paragraph(paragraph) => pager.paragraph(paragraph),
            Block::Table(table) => pager.table(table),
            Block::PageBreak => pager.page_break(),
        }
    }
    pager.finish()
}

/// Lays out the story on US Letter pages and serializes it. Output carries no
/// random identifiers or timestamps, so equal documents give equal bytes.
pub(crate) fn write_pdf(document: &GuideDocument) -> Result<Vec<u8>, RenderError> {
    let pages = paginate(document);

    let mut pdf = Document::with_version("1.4");
    let pages_id = pdf.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for face in Face::ALL {
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource(), font_id);
    }
    let resources_id = pdf.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|err| RenderError::Serialize(err.to_string()))?;
        let content_id = pdf.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(PAGE_WIDTH),
            Object::Real(PAGE_HEIGHT),
        ],
    };
    pdf.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let info_id = pdf.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(&document.title), StringFormat::Hexadecimal),
        "Producer" => Object::string_literal("Ultimate Prepper Guide"),
    });
    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);
    pdf.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes)
        .map_err(|err| RenderError::Serialize(err.to_string()))?;
    Ok(bytes)
}
