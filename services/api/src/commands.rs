use crate::infra::parse_date;
use chrono::{Local, NaiveDate};
use clap::Args;
use prepper_guide::checklist::{
    CatalogSource, ChecklistCatalog, ChecklistDataset, ClimateVariant, Priority,
};
use prepper_guide::error::AppError;
use prepper_guide::guide::profile::UserProfile;
use prepper_guide::guide::GuideRenderer;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct GuideRenderArgs {
    /// Scenario name, e.g. "Nuclear Fallout" (defaults to Hurricane)
    #[arg(long)]
    pub(crate) scenario: Option<String>,
    #[arg(long)]
    pub(crate) location: Option<String>,
    #[arg(long)]
    pub(crate) household_size: Option<String>,
    /// cold, moderate, or anything else for warm
    #[arg(long)]
    pub(crate) climate: Option<String>,
    #[arg(long)]
    pub(crate) experience: Option<String>,
    #[arg(long)]
    pub(crate) email: Option<String>,
    /// Date printed on the title page (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Read checklists from this directory instead of the bundled set
    #[arg(long)]
    pub(crate) catalog_dir: Option<PathBuf>,
    /// Where to write the PDF
    #[arg(long, short)]
    pub(crate) output: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Read checklists from this directory instead of the bundled set
    #[arg(long)]
    pub(crate) dir: Option<PathBuf>,
}

fn source(dir: Option<PathBuf>) -> CatalogSource {
    dir.map(CatalogSource::Directory).unwrap_or_default()
}

pub(crate) async fn run_guide_render(args: GuideRenderArgs) -> Result<(), AppError> {
    let GuideRenderArgs {
        scenario,
        location,
        household_size,
        climate,
        experience,
        email,
        date,
        catalog_dir,
        output,
    } = args;

    let catalog = ChecklistCatalog::load(&source(catalog_dir))?;
    let renderer = GuideRenderer::new(Arc::new(catalog));
    let profile = UserProfile {
        scenario,
        location,
        household_size,
        climate,
        experience,
        email,
    };

    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let bytes = renderer.render_on(&profile, date)?;
    tokio::fs::write(&output, &bytes).await?;

    let resolved = renderer
        .catalog()
        .resolve(profile.selection_scenario(), &profile.selection_climate());
    println!("{}", resolved.title);
    println!("Wrote {} ({} bytes)", output.display(), bytes.len());
    Ok(())
}

pub(crate) fn run_catalog_validate(args: CatalogArgs) -> Result<(), AppError> {
    let source = source(args.dir);
    let catalog = ChecklistCatalog::load(&source)?;
    let datasets = catalog.scenarios().count();
    match source {
        CatalogSource::Bundled => println!("Bundled catalog OK: {datasets} scenarios"),
        CatalogSource::Directory(dir) => {
            println!("{} OK: {datasets} scenarios", dir.display())
        }
    }
    Ok(())
}

pub(crate) fn run_catalog_list(args: CatalogArgs) -> Result<(), AppError> {
    let catalog = ChecklistCatalog::load(&source(args.dir))?;
    for line in catalog_listing(&catalog) {
        println!("{line}");
    }
    Ok(())
}

fn describe(dataset: &ChecklistDataset) -> String {
    let critical = dataset.count_by_priority(Priority::Critical);
    format!(
        "{} categories, {} items ({critical} critical)",
        dataset.categories().len(),
        dataset.item_count()
    )
}

pub(crate) fn catalog_listing(catalog: &ChecklistCatalog) -> Vec<String> {
    let mut lines = Vec::new();
    for scenario in catalog.scenarios() {
        if scenario.has_climate_variants() {
            for variant in [ClimateVariant::Warm, ClimateVariant::Cold] {
                lines.push(format!(
                    "{} ({}): {}",
                    scenario.name(),
                    variant.label(),
                    describe(catalog.dataset(scenario, variant))
                ));
            }
        } else {
            lines.push(format!(
                "{}: {}",
                scenario.name(),
                describe(catalog.dataset(scenario, ClimateVariant::Warm))
            ));
        }
    }
    lines
}
