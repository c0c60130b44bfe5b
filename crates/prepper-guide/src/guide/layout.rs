use crate::checklist::Priority;

/// 72 points per inch.
pub const INCH: f32 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn components(self) -> (f32, f32, f32) {
        (
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        )
    }
}

pub mod palette {
    use super::Rgb;

    pub const BRAND_NAVY: Rgb = Rgb(0x0b, 0x3d, 0x91);
    pub const BRAND_BLUE: Rgb = Rgb(0x20, 0x54, 0x93);
    pub const MUTED: Rgb = Rgb(0x66, 0x66, 0x66);
    pub const INK: Rgb = Rgb(0x1a, 0x1a, 0x1a);
    pub const SLATE: Rgb = Rgb(0x4a, 0x55, 0x68);
    pub const TABLE_FILL: Rgb = Rgb(0xf3, 0xf4, 0xf6);
    pub const TABLE_GRID: Rgb = Rgb(0xd1, 0xd5, 0xdb);

    pub const CRITICAL: Rgb = Rgb(0xdc, 0x26, 0x26);
    pub const HIGH: Rgb = Rgb(0xea, 0x58, 0x0c);
    pub const MEDIUM: Rgb = Rgb(0xd9, 0x77, 0x06);
    pub const LOW: Rgb = Rgb(0x65, 0xa3, 0x0d);
}

pub fn priority_color(priority: Priority) -> Rgb {
    match priority {
        Priority::Critical => palette::CRITICAL,
        Priority::High => palette::HIGH,
        Priority::Medium => palette::MEDIUM,
        Priority::Low => palette::LOW,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    pub font_size: f32,
    pub color: Rgb,
    pub bold: bool,
    pub align: Align,
    pub space_before: f32,
    pub space_after: f32,
}

impl ParagraphStyle {
    pub fn leading(&self) -> f32 {
        self.font_size * 1.2
    }
}

/// What a paragraph is for; determines its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphKind {
    BrandTitle,
    ScenarioTitle,
    Personalization,
    IntroHeading,
    IntroBody,
    LegendEntry,
    CategoryHeading,
    ItemName,
    ItemExamples,
    ItemQuantity,
    ItemWhy,
}

impl ParagraphKind {
    pub fn style(self) -> ParagraphStyle {
        let base = ParagraphStyle {
            font_size: 9.0,
            color: palette::MUTED,
            bold: false,
            align: Align::Left,
            space_before: 0.0,
            space_after: 0.0,
        };
        match self {
            Self::BrandTitle => ParagraphStyle {
                font_size: 28.0,
                color: palette::BRAND_NAVY,
                bold: true,
                align: Align::Center,
                space_after: 6.0,
                ..base
            },
            Self::ScenarioTitle => ParagraphStyle {
                font_size: 18.0,
                color: palette::BRAND_BLUE,
                bold: true,
                align: Align::Center,
                space_after: 12.0,
                ..base
            },
            Self::Personalization => ParagraphStyle {
                font_size: 12.0,
                align: Align::Center,
                space_after: 20.0,
                ..base
            },
            Self::IntroHeading => ParagraphStyle {
                bold: true,
                space_after: 10.8,
                ..base
            },
            Self::IntroBody => ParagraphStyle {
                align: Align::Justify,
                space_after: 10.8,
                ..base
            },
            Self::LegendEntry => base,
            Self::CategoryHeading => ParagraphStyle {
                font_size: 16.0,
                color: palette::BRAND_NAVY,
                bold: true,
                space_before: 20.0,
                space_after: 10.0,
                ..base
            },
            Self::ItemName => ParagraphStyle {
                font_size: 11.0,
                color: palette::INK,
                bold: true,
                space_after: 4.0,
                ..base
            },
            Self::ItemExamples | Self::ItemQuantity => ParagraphStyle {
                color: palette::SLATE,
                space_after: 3.0,
                ..base
            },
            Self::ItemWhy => ParagraphStyle {
                align: Align::Justify,
                space_after: 12.0,
                ..base
            },
        }
    }
}

/// Styled span of text. Run boundaries are also word boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Overrides the paragraph colour.
    pub color: Option<Rgb>,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            color: None,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::plain(text)
        }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            italic: true,
            ..Self::plain(text)
        }
    }

    pub fn colored(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub kind: ParagraphKind,
    pub runs: Vec<TextRun>,
}

impl Paragraph {
    pub fn new(kind: ParagraphKind, runs: Vec<TextRun>) -> Self {
        Self { kind, runs }
    }

    pub fn plain(kind: ParagraphKind, text: impl Into<String>) -> Self {
        Self::new(kind, vec![TextRun::plain(text)])
    }

    pub fn style(&self) -> ParagraphStyle {
        self.kind.style()
    }

    /// Runs joined with single spaces.
    pub fn text(&self) -> String {
        self.runs
            .iter()
            .map(|run| run.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRow {
    pub label: &'static str,
    pub value: String,
}

impl ProfileRow {
    pub fn text(&self) -> String {
        format!("{} {}", self.label, self.value)
    }
}

/// Two-column summary of the questionnaire shown on the title page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileTable {
    pub rows: Vec<ProfileRow>,
}

impl ProfileTable {
    pub const FONT_SIZE: f32 = 10.0;
    pub const PADDING: f32 = 8.0;
    pub const LABEL_WIDTH: f32 = 2.0 * INCH;
    pub const VALUE_WIDTH: f32 = 4.0 * INCH;

    pub fn row(&self, label: &str) -> Option<&ProfileRow> {
        self.rows.iter().find(|row| row.label == label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Spacer(f32),
    Paragraph(Paragraph),
    Table(ProfileTable),
    PageBreak,
}

/// The guide as an ordered sequence of sections, ready for pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideDocument {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl GuideDocument {
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        })
    }

    pub fn paragraphs_of(&self, kind: ParagraphKind) -> impl Iterator<Item = &Paragraph> {
        self.paragraphs()
            .filter(move |paragraph| paragraph.kind == kind)
    }

    pub fn profile_table(&self) -> Option<&ProfileTable> {
        self.blocks.iter().find_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }

    pub fn page_breaks(&self) -> usize {
        self.blocks
            .iter()
            .filter(|block| matches!(block, Block::PageBreak))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_colors_follow_urgency() {
        assert_eq!(priority_color(Priority::Critical), Rgb(0xdc, 0x26, 0x26));
        assert_eq!(priority_color(Priority::Low), Rgb(0x65, 0xa3, 0x0d));
    }

    #[test]
    fn paragraph_text_joins_runs() {
        let paragraph = Paragraph::new(
            ParagraphKind::ItemQuantity,
            vec![TextRun::bold("Quantity:"), TextRun::plain("2 radios")],
        );
        assert_eq!(paragraph.text(), "Quantity: 2 radios");
    }
}
