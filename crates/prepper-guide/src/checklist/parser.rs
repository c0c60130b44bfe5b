use super::catalog::CatalogError;
use super::domain::{ChecklistCategory, ChecklistDataset, ChecklistItem, Priority};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct ChecklistRow {
    category_key: String,
    category: String,
    icon: String,
    name: String,
    examples: String,
    quantity: String,
    priority: String,
    why: String,
}

/// Rows sharing a `category_key` must be contiguous; the first row of each run
/// carries the category title and icon.
pub(crate) fn parse_dataset<R: Read>(file: &str, reader: R) -> Result<ChecklistDataset, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|source| CatalogError::csv(file, source))?
        .clone();

    let mut categories: Vec<ChecklistCategory> = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        // header occupies line 1
        let row_number = index + 2;
        let record = record.map_err(|source| CatalogError::csv(file, source))?;
        let row: ChecklistRow = record
            .deserialize(Some(&headers))
            .map_err(|source| CatalogError::csv(file, source))?;

        if row.category_key.is_empty() {
            return Err(CatalogError::BlankField {
                file: file.to_string(),
                row: row_number,
                field: "category_key",
            });
        }
        if row.name.is_empty() {
            return Err(CatalogError::BlankField {
                file: file.to_string(),
                row: row_number,
                field: "name",
            });
        }

        let priority = Priority::parse(&row.priority).ok_or_else(|| CatalogError::UnknownPriority {
            file: file.to_string(),
            row: row_number,
            value: row.priority.clone(),
        })?;

        let item = ChecklistItem {
            name: row.name,
            examples: row.examples,
            rationale: row.why,
            quantity: row.quantity,
            priority,
        };

        match categories.last_mut() {
            Some(current) if current.key == row.category_key => current.items.push(item),
            _ => {
                if categories.iter().any(|existing| existing.key == row.category_key) {
                    return Err(CatalogError::DuplicateCategory {
                        file: file.to_string(),
                        key: row.category_key,
                    });
                }
                categories.push(ChecklistCategory {
                    key: row.category_key,
                    title: row.category,
                    icon: row.icon,
                    items: vec![item],
                });
            }
        }
    }

    if categories.is_empty() {
        return Err(CatalogError::EmptyDataset {
            file: file.to_string(),
        });
    }

    Ok(ChecklistDataset::from_categories(categories))
}
