use chrono::NaiveDate;
use prepper_guide::checklist::{ChecklistCatalog, ClimateVariant, Scenario};
use prepper_guide::guide::layout::{Block, GuideDocument, ParagraphKind};
use prepper_guide::guide::profile::UserProfile;
use prepper_guide::guide::GuideRenderer;
use std::sync::Arc;

fn renderer() -> GuideRenderer {
    GuideRenderer::new(Arc::new(
        ChecklistCatalog::bundled().expect("bundled catalog loads"),
    ))
}

fn generated_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 5).expect("valid date")
}

fn answer(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn tornado_profile() -> UserProfile {
    UserProfile {
        scenario: answer("Tornado"),
        location: answer("Dallas, TX"),
        household_size: answer("4"),
        climate: answer("warm"),
        experience: answer("beginner"),
        email: answer("a@b.com"),
    }
}

fn texts(document: &GuideDocument, kind: ParagraphKind) -> Vec<String> {
    document
        .paragraphs_of(kind)
        .map(|paragraph| paragraph.text())
        .collect()
}

#[test]
fn tornado_guide_end_to_end() {
    let document = renderer().compose(&tornado_profile(), generated_on());

    assert_eq!(document.title, "TORNADO SURVIVAL CHECKLIST");
    assert_eq!(
        texts(&document, ParagraphKind::BrandTitle),
        vec!["ULTIMATE PREPPER GUIDE"]
    );
    assert_eq!(
        texts(&document, ParagraphKind::ScenarioTitle),
        vec!["TORNADO SURVIVAL CHECKLIST"]
    );
    assert_eq!(
        texts(&document, ParagraphKind::Personalization),
        vec!["Personalized for Dallas, TX"]
    );

    let table = document.profile_table().expect("title page has a profile table");
    let location = table.row("Location:").expect("location row");
    assert_eq!(location.text(), "Location: Dallas, TX");
    assert_eq!(table.row("Prepared for:").map(|row| row.value.as_str()), Some("Tornado"));
    assert_eq!(table.row("Climate:").map(|row| row.value.as_str()), Some("Warm"));
    assert_eq!(table.row("Experience:").map(|row| row.value.as_str()), Some("Beginner"));
    assert_eq!(
        table.row("Generated:").map(|row| row.value.as_str()),
        Some("January 05, 2025")
    );

    let headings = texts(&document, ParagraphKind::CategoryHeading);
    assert_eq!(
        headings[0],
        "\u{1f32a}\u{fe0f} CRITICAL PRIORITY ITEMS (BEFORE TORNADO SEASON)"
    );
    let items = texts(&document, ParagraphKind::ItemName);
    assert_eq!(items[0], "[CRITICAL] NOAA Emergency Weather Radio");
}

#[test]
fn checklist_blocks_follow_the_catalog() {
    let renderer = renderer();
    for (name, climate, scenario, variant) in [
        ("Tornado", "warm", Scenario::Tornado, ClimateVariant::Warm),
        ("Flood", "moderate", Scenario::Flood, ClimateVariant::Cold),
        ("Earthquake", "warm", Scenario::Earthquake, ClimateVariant::Warm),
        ("Supervolcano", "", Scenario::Supervolcano, ClimateVariant::Warm),
    ] {
        let profile = UserProfile {
            scenario: answer(name),
            climate: answer(climate),
            ..UserProfile::default()
        };
        let document = renderer.compose(&profile, generated_on());
        let dataset = renderer.catalog().dataset(scenario, variant);

        let expected_headings: Vec<String> = dataset
            .categories()
            .iter()
            .map(|category| category.heading())
            .collect();
        assert_eq!(texts(&document, ParagraphKind::CategoryHeading), expected_headings);

        let expected_items: Vec<String> = dataset
            .categories()
            .iter()
            .flat_map(|category| category.items.iter())
            .map(|item| format!("{} {}", item.priority.tag(), item.name))
            .collect();
        let items = texts(&document, ParagraphKind::ItemName);
        assert_eq!(items.len(), dataset.item_count());
        assert_eq!(items, expected_items);
        assert_eq!(
            document.paragraphs_of(ParagraphKind::ItemWhy).count(),
            dataset.item_count()
        );
    }
}

#[test]
fn flood_with_moderate_climate_gets_cold_weather_gear() {
    let profile = UserProfile {
        scenario: answer("Flood"),
        climate: answer("moderate"),
        ..UserProfile::default()
    };
    let document = renderer().compose(&profile, generated_on());

    assert_eq!(document.title, "FLOOD SURVIVAL CHECKLIST - Cold Climate");
    assert!(texts(&document, ParagraphKind::CategoryHeading)
        .iter()
        .any(|heading| heading.ends_with("COLD WEATHER CLOTHING & WARMTH")));
    assert!(texts(&document, ParagraphKind::IntroBody)
        .iter()
        .any(|text| text.contains("Cold Climate")));
}

#[test]
fn blank_or_padded_climate_selects_the_warm_flood_list() {
    let renderer = renderer();
    for climate in ["", " cold "] {
        let profile = UserProfile {
            scenario: answer("Flood"),
            climate: Some(climate.to_string()),
            ..UserProfile::default()
        };
        let document = renderer.compose(&profile, generated_on());

        assert_eq!(
            document.title, "FLOOD SURVIVAL CHECKLIST - Warm Climate",
            "climate {climate:?}"
        );
        assert!(!texts(&document, ParagraphKind::CategoryHeading)
            .iter()
            .any(|heading| heading.ends_with("COLD WEATHER CLOTHING & WARMTH")));
    }
}

#[test]
fn missing_answers_render_placeholders() {
    let profile = UserProfile {
        scenario: answer("Hurricane"),
        ..UserProfile::default()
    };
    let document = renderer().compose(&profile, generated_on());
    let table = document.profile_table().expect("profile table");

    for label in ["Location:", "Household Size:", "Climate:", "Experience:"] {
        assert_eq!(
            table.row(label).map(|row| row.value.as_str()),
            Some("Not specified"),
            "{label} should fall back to the placeholder"
        );
    }
    assert_eq!(
        texts(&document, ParagraphKind::Personalization),
        vec!["Personalized for Your Location"]
    );
}

#[test]
fn unknown_scenario_uses_hurricane_items_under_its_own_title() {
    let renderer = renderer();
    let profile = UserProfile {
        scenario: answer("Alien Invasion"),
        ..UserProfile::default()
    };
    let document = renderer.compose(&profile, generated_on());

    assert_eq!(document.title, "ALIEN INVASION SURVIVAL CHECKLIST");
    let hurricane = renderer
        .catalog()
        .dataset(Scenario::Hurricane, ClimateVariant::Warm);
    assert_eq!(
        document.paragraphs_of(ParagraphKind::ItemName).count(),
        hurricane.item_count()
    );
    assert_eq!(
        texts(&document, ParagraphKind::IntroHeading),
        vec!["Your Personalized Survival Guide"]
    );
}

#[test]
fn checklist_starts_on_a_new_page() {
    let document = renderer().compose(&tornado_profile(), generated_on());
    assert_eq!(document.page_breaks(), 1);

    let break_at = document
        .blocks
        .iter()
        .position(|block| matches!(block, Block::PageBreak))
        .expect("page break present");
    let first_heading = document
        .blocks
        .iter()
        .position(|block| {
            matches!(block, Block::Paragraph(paragraph) if paragraph.kind == ParagraphKind::CategoryHeading)
        })
        .expect("category heading present");
    assert!(break_at < first_heading);
}

#[test]
fn rendering_is_byte_for_byte_repeatable() {
    let renderer = renderer();
    let first = renderer
        .render_on(&tornado_profile(), generated_on())
        .expect("renders");
    let second = renderer
        .render_on(&tornado_profile(), generated_on())
        .expect("renders");

    assert!(first.starts_with(b"%PDF-1.4"));
    assert_eq!(first, second);
}

#[test]
fn every_scenario_renders() {
    let renderer = renderer();
    for scenario in Scenario::ALL {
        for climate in ["cold", "warm"] {
            let profile = UserProfile {
                scenario: answer(scenario.name()),
                climate: answer(climate),
                location: answer("Bozeman, MT"),
                ..UserProfile::default()
            };
            let bytes = renderer
                .render_on(&profile, generated_on())
                .unwrap_or_else(|err| panic!("{} failed: {err}", scenario.name()));
            assert!(bytes.len() > 1_000);
        }
    }
}
