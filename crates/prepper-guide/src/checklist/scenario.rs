use serde::Serialize;

/// Disaster types with a hand-authored checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Hurricane,
    Flood,
    Earthquake,
    NuclearFallout,
    Wildfire,
    VolcanicEruption,
    Supervolcano,
    Pandemic,
    Tornado,
    EconomicCollapse,
    ZombieApocalypse,
    AiTakeover,
    AsteroidImpact,
}

/// Climate split for scenarios whose supplies differ between cold and warm regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateVariant {
    Cold,
    Warm,
}

impl ClimateVariant {
    /// `moderate` deliberately routes to the cold dataset: only a distinctly warm
    /// (or unrecognised) climate gets the warm list. Do not "fix" this to warm.
    pub fn classify(climate: &str) -> Self {
        if climate.eq_ignore_ascii_case("cold") || climate.eq_ignore_ascii_case("moderate") {
            Self::Cold
        } else {
            Self::Warm
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Cold => "Cold Climate",
            Self::Warm => "Warm Climate",
        }
    }
}

impl Scenario {
    pub const ALL: [Scenario; 13] = [
        Scenario::Hurricane,
        Scenario::Flood,
        Scenario::Earthquake,
        Scenario::NuclearFallout,
        Scenario::Wildfire,
        Scenario::VolcanicEruption,
        Scenario::Supervolcano,
        Scenario::Pandemic,
        Scenario::Tornado,
        Scenario::EconomicCollapse,
        Scenario::ZombieApocalypse,
        Scenario::AiTakeover,
        Scenario::AsteroidImpact,
    ];

    /// Name as submitted by the questionnaire.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hurricane => "Hurricane",
            Self::Flood => "Flood",
            Self::Earthquake => "Earthquake",
            Self::NuclearFallout => "Nuclear Fallout",
            Self::Wildfire => "Wildfire",
            Self::VolcanicEruption => "Volcanic Eruption",
            Self::Supervolcano => "Supervolcano",
            Self::Pandemic => "Pandemic",
            Self::Tornado => "Tornado",
            Self::EconomicCollapse => "Economic Collapse",
            Self::ZombieApocalypse => "Zombie Apocalypse",
            Self::AiTakeover => "AI Takeover",
            Self::AsteroidImpact => "Asteroid Impact",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scenario| scenario.name() == name)
    }

    pub const fn has_climate_variants(self) -> bool {
        matches!(self, Self::Flood | Self::Earthquake)
    }

    pub(crate) const fn base_title(self) -> &'static str {
        match self {
            Self::Hurricane => "HURRICANE SURVIVAL CHECKLIST",
            Self::Flood => "FLOOD SURVIVAL CHECKLIST",
            Self::Earthquake => "EARTHQUAKE SURVIVAL CHECKLIST",
            Self::NuclearFallout => "NUCLEAR FALLOUT SURVIVAL CHECKLIST",
            Self::Wildfire => "WILDFIRE SURVIVAL CHECKLIST",
            Self::VolcanicEruption => "VOLCANIC ERUPTION SURVIVAL CHECKLIST",
            Self::Supervolcano => "SUPERVOLCANO (YELLOWSTONE) SURVIVAL CHECKLIST",
            Self::Pandemic => "PANDEMIC SURVIVAL CHECKLIST",
            Self::Tornado => "TORNADO SURVIVAL CHECKLIST",
            Self::EconomicCollapse => "ECONOMIC COLLAPSE SURVIVAL GUIDE",
            Self::ZombieApocalypse => "ZOMBIE APOCALYPSE SURVIVAL GUIDE",
            Self::AiTakeover => "AI TAKEOVER SURVIVAL GUIDE",
            Self::AsteroidImpact => "ASTEROID IMPACT SURVIVAL GUIDE",
        }
    }

    /// Label for scenarios without a climate split.
    pub(crate) const fn fixed_label(self) -> &'static str {
        match self {
            Self::Hurricane => "Warm/Coastal Climate",
            Self::NuclearFallout => "All Climates",
            Self::Wildfire => "Evacuation-Ready",
            Self::VolcanicEruption => "Regular Eruption",
            Self::Supervolcano => "Extended Survival - Months",
            Self::Pandemic => "Home Isolation Ready",
            Self::Tornado => "Rapid Response Ready",
            Self::EconomicCollapse => "Long-Term (1-5 Years)",
            Self::ZombieApocalypse => "Ultimate Prepper Scenario",
            Self::AiTakeover => "Go Analog, Go Off-Grid",
            Self::AsteroidImpact => "First 7 Days Critical",
            Self::Flood | Self::Earthquake => "",
        }
    }
}
