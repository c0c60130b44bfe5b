use super::scenario::Scenario;

/// How a scenario's data files compose into datasets.
#[derive(Debug, Clone, Copy)]
pub(crate) enum DatasetLayout {
    Single(&'static str),
    /// Warm file plus a one-category cold delta.
    ClimateSplit {
        warm: &'static str,
        cold_delta: &'static str,
    },
    /// Another scenario's dataset plus a one-category delta.
    Extends {
        base: Scenario,
        delta: &'static str,
    },
}

pub(crate) const fn layout(scenario: Scenario) -> DatasetLayout {
    match scenario {
        Scenario::Hurricane => DatasetLayout::Single("hurricane.csv"),
        Scenario::Flood => DatasetLayout::ClimateSplit {
            warm: "flood.csv",
            cold_delta: "flood_cold.csv",
        },
        Scenario::Earthquake => DatasetLayout::ClimateSplit {
            warm: "earthquake.csv",
            cold_delta: "earthquake_cold.csv",
        },
        Scenario::NuclearFallout => DatasetLayout::Single("nuclear_fallout.csv"),
        Scenario::Wildfire => DatasetLayout::Single("wildfire.csv"),
        Scenario::VolcanicEruption => DatasetLayout::Single("volcanic_eruption.csv"),
        Scenario::Supervolcano => DatasetLayout::Extends {
            base: Scenario::VolcanicEruption,
            delta: "supervolcano_extended.csv",
        },
        Scenario::Pandemic => DatasetLayout::Single("pandemic.csv"),
        Scenario::Tornado => DatasetLayout::Single("tornado.csv"),
        Scenario::EconomicCollapse => DatasetLayout::Single("economic_collapse.csv"),
        Scenario::ZombieApocalypse => DatasetLayout::Single("zombie_apocalypse.csv"),
        Scenario::AiTakeover => DatasetLayout::Single("ai_takeover.csv"),
        Scenario::AsteroidImpact => DatasetLayout::Single("asteroid_impact.csv"),
    }
}

const BUNDLED: &[(&str, &str)] = &[
    ("hurricane.csv", include_str!("../../data/checklists/hurricane.csv")),
    ("flood.csv", include_str!("../../data/checklists/flood.csv")),
    ("flood_cold.csv", include_str!("../../data/checklists/flood_cold.csv")),
    ("earthquake.csv", include_str!("../../data/checklists/earthquake.csv")),
    (
        "earthquake_cold.csv",
        include_str!("../../data/checklists/earthquake_cold.csv"),
    ),
    (
        "nuclear_fallout.csv",
        include_str!("../../data/checklists/nuclear_fallout.csv"),
    ),
    ("wildfire.csv", include_str!("../../data/checklists/wildfire.csv")),
    (
        "volcanic_eruption.csv",
        include_str!("../../data/checklists/volcanic_eruption.csv"),
    ),
    (
        "supervolcano_extended.csv",
        include_str!("../../data/checklists/supervolcano_extended.csv"),
    ),
    ("pandemic.csv", include_str!("../../data/checklists/pandemic.csv")),
    ("tornado.csv", include_str!("../../data/checklists/tornado.csv")),
    (
        "economic_collapse.csv",
        include_str!("../../data/checklists/economic_collapse.csv"),
    ),
    (
        "zombie_apocalypse.csv",
        include_str!("../../data/checklists/zombie_apocalypse.csv"),
    ),
    ("ai_takeover.csv", include_str!("../../data/checklists/ai_takeover.csv")),
    (
        "asteroid_impact.csv",
        include_str!("../../data/checklists/asteroid_impact.csv"),
    ),
];

pub(crate) fn bundled(file: &str) -> Option<&'static str> {
    BUNDLED
        .iter()
        .find(|(name, _)| *name == file)
        .map(|(_, contents)| *contents)
}
