use crate::checklist::{Priority, Scenario};

/// One piece of a scenario introduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntroBlock {
    Paragraph(String),
    /// Bold lead-in followed by plain text, e.g. "IMPORTANT: ...".
    Callout { label: &'static str, text: String },
    Bullets {
        label: &'static str,
        items: &'static [&'static str],
    },
    /// Whole paragraph set in bold.
    Emphasis(&'static str),
}

/// How the four priority levels are explained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendWording {
    /// Preparation measured in weeks.
    Standard,
    /// Collapse-style scenarios measured in months.
    LongHorizon,
}

impl LegendWording {
    pub fn entries(self) -> [(Priority, &'static str); 4] {
        let (high, medium) = match self {
            Self::Standard => (
                "Very important. Get within first week of prep.",
                "Important for comfort and extended survival.",
            ),
            Self::LongHorizon => (
                "Very important. Get within first month of prep.",
                "Important for extended survival.",
            ),
        };
        [
            (
                Priority::Critical,
                "Get these first. Essential for immediate survival.",
            ),
            (Priority::High, high),
            (Priority::Medium, medium),
            (Priority::Low, "Nice to have for long-term preparedness."),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Introduction {
    pub heading: String,
    pub blocks: Vec<IntroBlock>,
    pub legend: LegendWording,
}

fn paragraph(text: &str) -> IntroBlock {
    IntroBlock::Paragraph(text.to_string())
}

fn callout(label: &'static str, text: &str) -> IntroBlock {
    IntroBlock::Callout {
        label,
        text: text.to_string(),
    }
}

/// Hand-authored framing for a scenario; unrecognised scenarios get the generic text.
pub fn introduction(scenario: Option<Scenario>, climate_label: &str) -> Introduction {
    let Some(scenario) = scenario else {
        return Introduction {
            heading: "Your Personalized Survival Guide".to_string(),
            blocks: vec![paragraph(
                "This checklist has been customized for your household. The items below will help you \
                 survive and recover from this emergency scenario.",
            )],
            legend: LegendWording::Standard,
        };
    };

    let heading = match scenario {
        Scenario::Supervolcano => "Your Personalized Supervolcano (Yellowstone) Survival Guide".to_string(),
        other => format!("Your Personalized {} Survival Guide", other.name()),
    };

    let (blocks, legend) = match scenario {
        Scenario::Hurricane => (
            vec![paragraph(
                "This checklist has been customized for your household. Hurricanes bring devastating wind, \
                 flooding, and extended power outages. The items below will help you survive the storm \
                 and recover in the critical days and weeks that follow.",
            )],
            LegendWording::Standard,
        ),
        Scenario::Flood => (
            vec![IntroBlock::Paragraph(format!(
                "This checklist has been customized for your household in a {climate_label} environment. \
                 Flooding can occur rapidly and contaminate water supplies, damage homes, and create dangerous \
                 conditions. The items below will help you stay safe during the flood and recover afterward."
            ))],
            LegendWording::Standard,
        ),
        Scenario::Earthquake => (
            vec![IntroBlock::Paragraph(format!(
                "This checklist has been customized for your household in a {climate_label} environment. \
                 Earthquakes strike without warning, causing structural damage, fires, and infrastructure failure. \
                 The items below will help you survive the initial quake, handle aftershocks, and recover safely."
            ))],
            LegendWording::Standard,
        ),
        Scenario::NuclearFallout => (
            vec![
                paragraph(
                    "This checklist has been customized for your household. A nuclear event brings immediate radiation \
                     hazards, long-term contamination, infrastructure collapse, and potential nuclear winter. These supplies \
                     will help you shelter safely, avoid radiation exposure, and survive extended isolation.",
                ),
                callout(
                    "IMPORTANT:",
                    "In a nuclear scenario, immediate shelter-in-place for 24-72 hours is critical. \
                     Do not go outside unless absolutely necessary. Follow official guidance on when it's safe to emerge.",
                ),
            ],
            LegendWording::Standard,
        ),
        Scenario::Wildfire => (
            vec![
                paragraph(
                    "This checklist has been customized for your household. Wildfires move fast, create deadly smoke, \
                     and often force immediate evacuation. Unlike other disasters, you may have only minutes to leave \
                     and may lose your home entirely. These supplies focus on rapid evacuation readiness and survival \
                     during displacement.",
                ),
                callout(
                    "CRITICAL:",
                    "Keep your go-bag packed and ready at all times during fire season. Know your evacuation \
                     routes and have 2-3 backup plans. Never wait for mandatory orders if you see flames or heavy smoke.",
                ),
            ],
            LegendWording::Standard,
        ),
        Scenario::VolcanicEruption => (
            vec![
                paragraph(
                    "This checklist has been customized for your household. Volcanic eruptions bring ashfall (microscopic \
                     volcanic glass), toxic gases, earthquakes, and potential lava flows. Ash is NOT like dust—it's sharp, \
                     abrasive, and extremely dangerous to breathe. This guide focuses on respiratory protection, rapid \
                     evacuation, and surviving extended ashfall periods.",
                ),
                callout(
                    "CRITICAL:",
                    "Volcanic ash can cause permanent lung damage in minutes. N95/P100 masks and sealed \
                     goggles are NON-NEGOTIABLE. Have an evacuation plan ready before any warning signs appear.",
                ),
            ],
            LegendWording::Standard,
        ),
        Scenario::Supervolcano => (
            vec![
                paragraph(
                    "This checklist has been customized for your household. A Yellowstone supervolcano eruption is NOT \
                     a regional disaster—it's a NATIONWIDE catastrophe. Ashfall will cover half the United States, block \
                     sunlight for months, destroy crops, kill livestock, and trigger \"volcanic winter.\" This is the closest \
                     realistic scenario to societal collapse.",
                ),
                callout(
                    "WHAT HAPPENS:",
                    "Food production stops for months. Water systems fail. Power grids collapse. \
                     Grocery stores empty in hours. This requires 3-6 MONTHS of food storage, not days.",
                ),
                IntroBlock::Emphasis(
                    "This guide includes EXTENDED SURVIVAL items beyond normal volcanic prep.",
                ),
            ],
            LegendWording::Standard,
        ),
        Scenario::Pandemic => (
            vec![
                paragraph(
                    "This checklist is based on real lessons from COVID-19 and past outbreaks. When a new pandemic emerges, \
                     you have a narrow window—sometimes just days—before panic buying empties store shelves. This guide \
                     helps you prepare 1-2 months ahead of everyone else so when they panic, you're calm.",
                ),
                callout(
                    "CRITICAL LESSON FROM COVID:",
                    "Most people waited for official lockdowns before taking it seriously. \
                     By then, masks, hand sanitizer, disinfectant wipes, thermometers, and basic medications were sold out \
                     for weeks or months. Don't make that mistake.",
                ),
                callout(
                    "This guide covers:",
                    "Medical supplies that vanish first, food for 2-3 weeks of isolation, home \
                     setup for sick family members, mental health during lockdowns, and security during potential civil unrest.",
                ),
            ],
            LegendWording::Standard,
        ),
        Scenario::Tornado => (
            vec![
                paragraph(
                    "This checklist has been customized for your household. Tornadoes are fast, violent, and unforgiving. \
                     They can appear with NO WARNING, destroy entire neighborhoods in seconds, and turn homes into deadly \
                     debris fields. Your survival depends on preparation BEFORE tornado season, your location WHEN it hits, \
                     and your ability to function AFTER total destruction.",
                ),
                IntroBlock::Bullets {
                    label: "CRITICAL FACTS:",
                    items: &[
                        "Most tornado deaths come from HEAD TRAUMA (flying debris) → Helmets save lives",
                        "Warnings may give you only MINUTES or no warning at all → NOAA radio is essential",
                        "Post-tornado air is TOXIC (insulation, mold, debris) → N95 masks mandatory",
                        "Injuries from debris are the #1 cause of hospital visits → Sturdy boots required",
                    ],
                },
                IntroBlock::Emphasis(
                    "This guide teaches you what to buy, where to shelter, and how to survive when your home is destroyed.",
                ),
            ],
            LegendWording::Standard,
        ),
        Scenario::EconomicCollapse => (
            vec![
                paragraph(
                    "This checklist has been customized for your household. A true economic collapse does NOT last a week—it \
                     can last YEARS. Money becomes worthless, shelves empty, banks freeze or seize accounts, and everyday life \
                     becomes a battle for securing food, staying safe, and protecting what you own.",
                ),
                IntroBlock::Bullets {
                    label: "HARD TRUTHS OF ECONOMIC COLLAPSE:",
                    items: &[
                        "Food becomes currency (people with food are powerful; people without become desperate)",
                        "Crime surges dramatically (looting, home invasions, carjackings spike)",
                        "Police response is slow or nonexistent",
                        "Supply chains break permanently",
                        "Skills become more valuable than money",
                        "Trust becomes rare",
                    ],
                },
                IntroBlock::Emphasis(
                    "This guide outlines 6-12 months of supplies, barter items, security measures, and long-term strategy \
                     for surviving societal breakdown.",
                ),
                IntroBlock::Emphasis(
                    "IMPORTANT: OPSEC (Operational Security) is critical. Keep your preparations SECRET.",
                ),
            ],
            LegendWording::LongHorizon,
        ),
        Scenario::ZombieApocalypse => (
            vec![
                callout(
                    "IMPORTANT SCIENTIFIC CLARIFICATION:",
                    "Zombies as seen in movies (undead, reanimated corpses) are \
                     NOT scientifically possible. However, a mutated rabies-like virus with faster incubation, airborne \
                     transmission, and extreme aggression COULD create humans who behave like zombies—not undead, but mentally \
                     gone, uncontrollably violent, spreading infection through bites and bodily fluids.",
                ),
                IntroBlock::Bullets {
                    label: "THIS IS THE ULTIMATE PREPPER SCENARIO because it combines every other disaster at once:",
                    items: &[
                        "Violent pandemic (like COVID but worse)",
                        "Total supply chain failure",
                        "Grid collapse",
                        "Martial law",
                        "Civil unrest",
                        "Long-term societal breakdown",
                    ],
                },
                IntroBlock::Emphasis(
                    "Preparing for this scenario automatically prepares you for everything else.",
                ),
                callout(
                    "This guide covers:",
                    "Home fortification, 3-6 months of supplies, self-defense, medical care when \
                     hospitals collapse, travel strategy, community building, and long-term survival skills.",
                ),
            ],
            LegendWording::Standard,
        ),
        Scenario::AiTakeover => (
            vec![
                paragraph(
                    "This is NOT science fiction. AI systems already run electrical grids, water treatment, hospitals, telecom \
                     networks, financial systems, supply chains, and banking. If advanced AI gained access or malfunctioned, \
                     humans could be locked out of survival systems.",
                ),
                IntroBlock::Bullets {
                    label: "THE REAL AI THREAT:",
                    items: &[
                        "AI can disable your banking, insurance, licenses, passports, medical records—erasing you from society",
                        "Autonomous drones can identify targets, track heat signatures, use facial recognition",
                        "AI controls the grid and can shut down electricity instantly",
                        "Mass manipulation can collapse trust in information and institutions",
                        "Modern vehicles with GPS and computers can be disabled or hijacked remotely",
                    ],
                },
                IntroBlock::Emphasis("THE ONLY SOLUTION: GO ANALOG. GO OFF-GRID."),
                paragraph(
                    "If AI controls cameras, phones, GPS, smart cars, internet, utilities, and drones—then ALL digital devices \
                     become tracking beacons. To survive, you must live without internet, smartphones, digital communication, \
                     and rely on analog tools, pre-computer vehicles, and physical maps.",
                ),
                IntroBlock::Emphasis(
                    "This guide teaches you how to disappear from AI systems and thrive in a no-tech world.",
                ),
            ],
            LegendWording::LongHorizon,
        ),
        Scenario::AsteroidImpact => (
            vec![
                paragraph(
                    "Asteroids have struck Earth many times. One big enough to cause regional or global destruction does NOT \
                     need to be large: A 150-300 meter asteroid can destroy an entire state. A 1 km asteroid triggers worldwide \
                     climate failure. A 10 km asteroid ends civilizations.",
                ),
                IntroBlock::Bullets {
                    label: "THE DANGER IS MORE THAN THE EXPLOSION:",
                    items: &[
                        "Initial blast: energy of thousands of nuclear bombs",
                        "Shockwaves: flatten everything for miles",
                        "Extreme heat: ignites cities instantly",
                        "Earthquakes: triggered by the impact",
                        "Tsunamis: if hitting water (more likely), coastlines obliterated",
                        "Global ash cloud: creates \"nuclear winter\" effect for weeks or months",
                    ],
                },
                callout(
                    "Most people in the direct impact zone do not survive.",
                    "This guide is for those OUTSIDE the strike \
                     radius—where survival depends on preparation.",
                ),
                callout(
                    "THE GOAL: SURVIVE THE FIRST 7 DAYS.",
                    "The first week after impact is the most dangerous: chaos, \
                     fires, panic, blocked roads, collapsing infrastructure, extreme weather changes, contaminated air, food \
                     shortages, no emergency services. Your job is to stay alive until the situation stabilizes.",
                ),
                IntroBlock::Emphasis(
                    "Your first week is about: Air, Water, Shelter, Protection, Information.",
                ),
            ],
            LegendWording::Standard,
        ),
    };

    Introduction {
        heading,
        blocks,
        legend,
    }
}
