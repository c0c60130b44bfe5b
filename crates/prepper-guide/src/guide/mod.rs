//! Personalized guide composition and PDF rendering.

pub mod intro;
pub mod layout;
mod pdf;
pub mod profile;

use crate::checklist::ChecklistCatalog;
use chrono::{Local, NaiveDate};
use intro::{IntroBlock, Introduction};
use layout::{
    priority_color, Block, GuideDocument, Paragraph, ParagraphKind, ProfileRow,
    ProfileTable, TextRun, INCH,
};
use profile::{capitalize, UserProfile, NOT_SPECIFIED};
use std::sync::Arc;
use thiserror::Error;

pub const BRAND_TITLE: &str = "ULTIMATE PREPPER GUIDE";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize guide: {0}")]
    Serialize(String),
}

/// Turns a questionnaire into a finished guide. Cheap to clone; the catalog is shared.
#[derive(Debug, Clone)]
pub struct GuideRenderer {
    catalog: Arc<ChecklistCatalog>,
}

impl GuideRenderer {
    pub fn new(catalog: Arc<ChecklistCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ChecklistCatalog {
        &self.catalog
    }

    /// Renders with today's local date on the title page.
    pub fn render(&self, profile: &UserProfile) -> Result<Vec<u8>, RenderError> {
        self.render_on(profile, Local::now().date_naive())
    }

    pub fn render_on(
        &self,
        profile: &UserProfile,
        generated_on: NaiveDate,
    ) -> Result<Vec<u8>, RenderError> {
        pdf::write_pdf(&self.compose(profile, generated_on))
    }

    /// Builds the ordered story without serializing it.
    pub fn compose(&self, profile: &UserProfile, generated_on: NaiveDate) -> GuideDocument {
        let climate = profile.selection_climate();
        let resolved = self
            .catalog
            .resolve(profile.selection_scenario(), &climate);

        let mut blocks = Vec::new();

        blocks.push(Block::Spacer(0.4 * INCH));
        blocks.push(Block::Paragraph(Paragraph::plain(
            ParagraphKind::BrandTitle,
            BRAND_TITLE,
        )));
        blocks.push(Block::Spacer(0.15 * INCH));
        blocks.push(Block::Paragraph(Paragraph::plain(
            ParagraphKind::ScenarioTitle,
            resolved.title.clone(),
        )));
        blocks.push(Block::Paragraph(Paragraph::plain(
            ParagraphKind::Personalization,
            format!(
                "Personalized for {}",
                profile.location().unwrap_or("Your Location")
            ),
        )));
        blocks.push(Block::Spacer(0.3 * INCH));
        blocks.push(Block::Table(profile_table(profile, generated_on)));
        blocks.push(Block::Spacer(0.5 * INCH));

        push_introduction(
            &mut blocks,
            intro::introduction(resolved.scenario, resolved.climate_label),
        );
        blocks.push(Block::PageBreak);

        for category in resolved.dataset.categories() {
            blocks.push(Block::Paragraph(Paragraph::plain(
                ParagraphKind::CategoryHeading,
                category.heading(),
            )));
            blocks.push(Block::Spacer(0.1 * INCH));

            for item in &category.items {
                blocks.push(Block::Paragraph(Paragraph::new(
                    ParagraphKind::ItemName,
                    vec![
                        TextRun::bold(item.priority.tag()).colored(priority_color(item.priority)),
                        TextRun::bold(item.name.clone()),
                    ],
                )));
                blocks.push(Block::Paragraph(Paragraph::new(
                    ParagraphKind::ItemExamples,
                    vec![TextRun::italic(format!("Examples: {}", item.examples))],
                )));
                blocks.push(Block::Paragraph(Paragraph::new(
                    ParagraphKind::ItemQuantity,
                    vec![
                        TextRun::bold("Quantity:"),
                        TextRun::plain(item.quantity.clone()),
                    ],
                )));
                blocks.push(Block::Paragraph(Paragraph::new(
                    ParagraphKind::ItemWhy,
                    vec![TextRun::bold("Why:"), TextRun::plain(item.rationale.clone())],
                )));
                blocks.push(Block::Spacer(0.15 * INCH));
            }

            blocks.push(Block::Spacer(0.2 * INCH));
        }

        GuideDocument {
            title: resolved.title,
            blocks,
        }
    }
}

fn profile_table(profile: &UserProfile, generated_on: NaiveDate) -> ProfileTable {
    let or_missing = |value: Option<&str>| value.unwrap_or(NOT_SPECIFIED).to_string();
    let capitalized =
        |value: Option<&str>| value.map(capitalize).unwrap_or_else(|| NOT_SPECIFIED.to_string());

    ProfileTable {
        rows: vec![
            ProfileRow {
                label: "Prepared for:",
                value: or_missing(profile.scenario()),
            },
            ProfileRow {
                label: "Location:",
                value: or_missing(profile.location()),
            },
            ProfileRow {
                label: "Household Size:",
                value: or_missing(profile.household_size()),
            },
            ProfileRow {
                label: "Climate:",
                value: capitalized(profile.climate()),
            },
            ProfileRow {
                label: "Experience:",
                value: capitalized(profile.experience()),
            },
            ProfileRow {
                label: "Generated:",
                value: generated_on.format("%B %d, %Y").to_string(),
            },
        ],
    }
}

fn push_introduction(blocks: &mut Vec<Block>, introduction: Introduction) {
    blocks.push(Block::Paragraph(Paragraph::new(
        ParagraphKind::IntroHeading,
        vec![TextRun::bold(introduction.heading)],
    )));

    for block in introduction.blocks {
        match block {
            IntroBlock::Paragraph(text) => {
                blocks.push(Block::Paragraph(Paragraph::plain(ParagraphKind::IntroBody, text)));
            }
            IntroBlock::Callout { label, text } => {
                blocks.push(Block::Paragraph(Paragraph::new(
                    ParagraphKind::IntroBody,
                    vec![TextRun::bold(label), TextRun::plain(text)],
                )));
            }
            IntroBlock::Bullets { label, items } => {
                blocks.push(Block::Paragraph(Paragraph::new(
                    ParagraphKind::LegendEntry,
                    vec![TextRun::bold(label)],
                )));
                for item in items {
                    blocks.push(Block::Paragraph(Paragraph::plain(
                        ParagraphKind::LegendEntry,
                        format!("• {item}"),
                    )));
                }
                blocks.push(Block::Spacer(0.15 * INCH));
            }
            IntroBlock::Emphasis(text) => {
                blocks.push(Block::Paragraph(Paragraph::new(
                    ParagraphKind::IntroBody,
                    vec![TextRun::bold(text)],
                )));
            }
        }
    }

    blocks.push(Block::Paragraph(Paragraph::new(
        ParagraphKind::LegendEntry,
        vec![TextRun::bold("Priority Levels:")],
    )));
    for (priority, meaning) in introduction.legend.entries() {
        blocks.push(Block::Paragraph(Paragraph::new(
            ParagraphKind::LegendEntry,
            vec![
                TextRun::plain("•"),
                TextRun::bold(priority.label().to_uppercase()).colored(priority_color(priority)),
                TextRun::plain(format!("- {meaning}")),
            ],
        )));
    }
}
