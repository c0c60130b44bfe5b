mod catalog;
pub mod domain;
mod parser;
mod scenario;
mod sources;

pub use catalog::{CatalogError, CatalogSource, ChecklistCatalog, ResolvedChecklist};
pub use domain::{ChecklistCategory, ChecklistDataset, ChecklistItem, Priority};
pub use scenario::{ClimateVariant, Scenario};
