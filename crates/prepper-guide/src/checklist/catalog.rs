use super::domain::ChecklistDataset;
use super::parser::parse_dataset;
use super::scenario::{ClimateVariant, Scenario};
use super::sources::{self, DatasetLayout};
use std::path::{Path, PathBuf};

/// Where checklist CSV files are read from at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogSource {
    /// Files compiled into the binary.
    #[default]
    Bundled,
    /// A directory holding the same file names, for content authoring.
    Directory(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("checklist source '{file}' is missing")]
    MissingSource { file: String },
    #[error("unable to read checklist source '{file}': {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed checklist csv '{file}': {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },
    #[error("{file} row {row}: unknown priority '{value}' (expected Critical, High, Medium or Low)")]
    UnknownPriority {
        file: String,
        row: usize,
        value: String,
    },
    #[error("{file} row {row}: '{field}' must not be blank")]
    BlankField {
        file: String,
        row: usize,
        field: &'static str,
    },
    #[error("{file}: category '{key}' appears more than once")]
    DuplicateCategory { file: String, key: String },
    #[error("{file}: dataset has no categories")]
    EmptyDataset { file: String },
    #[error("{file}: extension files must hold exactly one category, found {categories}")]
    DeltaShape { file: String, categories: usize },
}

impl CatalogError {
    pub(crate) fn csv(file: &str, source: csv::Error) -> Self {
        Self::Csv {
            file: file.to_string(),
            source,
        }
    }
}

#[derive(Debug)]
struct ScenarioDatasets {
    /// Warm variant for climate-split scenarios.
    primary: ChecklistDataset,
    cold: Option<ChecklistDataset>,
}

/// Outcome of looking up a questionnaire's scenario and climate.
#[derive(Debug, Clone)]
pub struct ResolvedChecklist<'a> {
    /// `None` when the scenario name was not recognised.
    pub scenario: Option<Scenario>,
    pub variant: Option<ClimateVariant>,
    pub dataset: &'a ChecklistDataset,
    pub title: String,
    pub climate_label: &'static str,
}

/// Immutable set of every scenario dataset, composed once at load time.
#[derive(Debug)]
pub struct ChecklistCatalog {
    /// Indexed by `Scenario as usize`, in `Scenario::ALL` order.
    entries: Vec<ScenarioDatasets>,
}

impl ChecklistCatalog {
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::load(&CatalogSource::Bundled)
    }

    pub fn load(source: &CatalogSource) -> Result<Self, CatalogError> {
        let mut entries: Vec<ScenarioDatasets> = Vec::with_capacity(Scenario::ALL.len());

        for scenario in Scenario::ALL {
            let datasets = match sources::layout(scenario) {
                DatasetLayout::Single(file) => ScenarioDatasets {
                    primary: read_dataset(source, file)?,
                    cold: None,
                },
                DatasetLayout::ClimateSplit { warm, cold_delta } => {
                    let warm_dataset = read_dataset(source, warm)?;
                    let cold = extend(&warm_dataset, source, cold_delta)?;
                    ScenarioDatasets {
                        primary: warm_dataset,
                        cold: Some(cold),
                    }
                }
                DatasetLayout::Extends { base, delta } => {
                    // Scenario::ALL lists every base ahead of the scenarios extending it.
                    let base_dataset = match entries.get(base as usize) {
                        Some(datasets) => datasets.primary.clone(),
                        None => match sources::layout(base) {
                            DatasetLayout::Single(file) => read_dataset(source, file)?,
                            _ => {
                                return Err(CatalogError::MissingSource {
                                    file: base.name().to_string(),
                                })
                            }
                        },
                    };
                    ScenarioDatasets {
                        primary: extend(&base_dataset, source, delta)?,
                        cold: None,
                    }
                }
            };
            entries.push(datasets);
        }

        Ok(Self { entries })
    }

    pub fn scenarios(&self) -> impl Iterator<Item = Scenario> {
        Scenario::ALL.into_iter()
    }

    /// Dataset for a scenario; `variant` only matters for climate-split scenarios.
    pub fn dataset(&self, scenario: Scenario, variant: ClimateVariant) -> &ChecklistDataset {
        let datasets = &self.entries[scenario as usize];
        match (variant, &datasets.cold) {
            (ClimateVariant::Cold, Some(cold)) => cold,
            _ => &datasets.primary,
        }
    }

    /// Unknown names fall back to the hurricane list but keep the submitted name
    /// in the title.
    pub fn resolve(&self, scenario_name: &str, climate: &str) -> ResolvedChecklist<'_> {
        let Some(scenario) = Scenario::from_name(scenario_name) else {
            return ResolvedChecklist {
                scenario: None,
                variant: None,
                dataset: self.dataset(Scenario::Hurricane, ClimateVariant::Warm),
                title: format!("{} SURVIVAL CHECKLIST", scenario_name.to_uppercase()),
                climate_label: "",
            };
        };

        if scenario.has_climate_variants() {
            let variant = ClimateVariant::classify(climate);
            ResolvedChecklist {
                scenario: Some(scenario),
                variant: Some(variant),
                dataset: self.dataset(scenario, variant),
                title: format!("{} - {}", scenario.base_title(), variant.label()),
                climate_label: variant.label(),
            }
        } else {
            ResolvedChecklist {
                scenario: Some(scenario),
                variant: None,
                dataset: self.dataset(scenario, ClimateVariant::Warm),
                title: scenario.base_title().to_string(),
                climate_label: scenario.fixed_label(),
            }
        }
    }
}

fn read_dataset(source: &CatalogSource, file: &str) -> Result<ChecklistDataset, CatalogError> {
    match source {
        CatalogSource::Bundled => {
            let contents = sources::bundled(file).ok_or_else(|| CatalogError::MissingSource {
                file: file.to_string(),
            })?;
            parse_dataset(file, contents.as_bytes())
        }
        CatalogSource::Directory(dir) => {
            let contents = read_file(dir, file)?;
            parse_dataset(file, contents.as_bytes())
        }
    }
}

fn read_file(dir: &Path, file: &str) -> Result<String, CatalogError> {
    let path = dir.join(file);
    std::fs::read_to_string(&path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => CatalogError::MissingSource {
            file: path.display().to_string(),
        },
        _ => CatalogError::Io {
            file: path.display().to_string(),
            source,
        },
    })
}

/// Appends the single category held by `delta_file` to `base`.
fn extend(
    base: &ChecklistDataset,
    source: &CatalogSource,
    delta_file: &str,
) -> Result<ChecklistDataset, CatalogError> {
    let delta = read_dataset(source, delta_file)?;
    let categories = delta.categories().len();
    if categories != 1 {
        return Err(CatalogError::DeltaShape {
            file: delta_file.to_string(),
            categories,
        });
    }
    if let Some(key) = delta
        .category_keys()
        .find(|key| base.category(key).is_some())
    {
        return Err(CatalogError::DuplicateCategory {
            file: delta_file.to_string(),
            key: key.to_string(),
        });
    }
    Ok(base.extended_with(&delta))
}
