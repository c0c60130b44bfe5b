use prepper_guide::checklist::{
    CatalogError, CatalogSource, ChecklistCatalog, ClimateVariant, Priority, Scenario,
};
use std::fs;
use std::path::{Path, PathBuf};

fn catalog() -> ChecklistCatalog {
    ChecklistCatalog::bundled().expect("bundled catalog loads")
}

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/checklists")
}

/// Copies the shipped datasets so a test can break one of them.
fn copy_of_data() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    for entry in fs::read_dir(data_dir()).expect("data dir readable") {
        let entry = entry.expect("dir entry");
        fs::copy(entry.path(), dir.path().join(entry.file_name())).expect("copy dataset");
    }
    dir
}

#[test]
fn every_bundled_dataset_loads_with_items() {
    let catalog = catalog();
    assert_eq!(catalog.scenarios().count(), Scenario::ALL.len());
    for scenario in catalog.scenarios() {
        for variant in [ClimateVariant::Warm, ClimateVariant::Cold] {
            let dataset = catalog.dataset(scenario, variant);
            assert!(dataset.item_count() > 0, "{} has no items", scenario.name());
            assert!(
                dataset
                    .categories()
                    .iter()
                    .all(|category| !category.items.is_empty()),
                "{} has an empty category",
                scenario.name()
            );
        }
    }
}

#[test]
fn directory_source_matches_bundled_data() {
    let from_disk =
        ChecklistCatalog::load(&CatalogSource::Directory(data_dir())).expect("directory loads");
    let bundled = catalog();
    for scenario in Scenario::ALL {
        for variant in [ClimateVariant::Warm, ClimateVariant::Cold] {
            assert_eq!(
                from_disk.dataset(scenario, variant),
                bundled.dataset(scenario, variant)
            );
        }
    }
}

#[test]
fn scenarios_without_climate_variants_ignore_climate() {
    let catalog = catalog();
    for scenario in Scenario::ALL
        .into_iter()
        .filter(|scenario| !scenario.has_climate_variants())
    {
        let baseline = catalog.resolve(scenario.name(), "warm");
        for climate in ["cold", "moderate", "", "tropical", "COLD"] {
            let resolved = catalog.resolve(scenario.name(), climate);
            assert_eq!(resolved.dataset, baseline.dataset);
            assert_eq!(resolved.title, baseline.title);
        }
    }
}

#[test]
fn moderate_climate_selects_the_cold_variant() {
    let catalog = catalog();
    for scenario in [Scenario::Flood, Scenario::Earthquake] {
        let cold = catalog.resolve(scenario.name(), "cold");
        let moderate = catalog.resolve(scenario.name(), "moderate");
        assert_eq!(cold.variant, Some(ClimateVariant::Cold));
        assert_eq!(moderate.dataset, cold.dataset);

        let warm = catalog.resolve(scenario.name(), "warm");
        for climate in ["", "xyz", "hot"] {
            let resolved = catalog.resolve(scenario.name(), climate);
            assert_eq!(resolved.variant, Some(ClimateVariant::Warm));
            assert_eq!(resolved.dataset, warm.dataset);
        }
        assert_ne!(warm.dataset, cold.dataset);
    }
}

#[test]
fn cold_variants_append_exactly_one_category() {
    let catalog = catalog();
    for scenario in [Scenario::Flood, Scenario::Earthquake] {
        let warm = catalog.dataset(scenario, ClimateVariant::Warm);
        let cold = catalog.dataset(scenario, ClimateVariant::Cold);
        assert_eq!(cold.categories().len(), warm.categories().len() + 1);
        assert_eq!(&cold.categories()[..warm.categories().len()], warm.categories());
        assert_eq!(
            cold.categories().last().map(|category| category.key.as_str()),
            Some("cold_weather")
        );
    }
}

#[test]
fn supervolcano_extends_the_volcanic_list() {
    let catalog = catalog();
    let volcanic = catalog.dataset(Scenario::VolcanicEruption, ClimateVariant::Warm);
    let supervolcano = catalog.dataset(Scenario::Supervolcano, ClimateVariant::Warm);
    assert_eq!(
        &supervolcano.categories()[..volcanic.categories().len()],
        volcanic.categories()
    );
    assert_eq!(supervolcano.item_count(), 47);
    assert!(supervolcano.category("yellowstone_extended").is_some());
}

#[test]
fn flood_moderate_contains_cold_weather_clothing() {
    let catalog = catalog();
    let resolved = catalog.resolve("Flood", "moderate");
    assert_eq!(resolved.title, "FLOOD SURVIVAL CHECKLIST - Cold Climate");
    let category = resolved
        .dataset
        .category("cold_weather")
        .expect("cold weather category present");
    assert_eq!(category.title, "Cold Weather Clothing & Warmth");
}

#[test]
fn unknown_scenarios_fall_back_to_hurricane() {
    let catalog = catalog();
    let resolved = catalog.resolve("totally-unknown-scenario", "cold");
    assert_eq!(resolved.scenario, None);
    assert_eq!(
        resolved.dataset,
        catalog.dataset(Scenario::Hurricane, ClimateVariant::Warm)
    );
    assert!(resolved.title.contains("TOTALLY-UNKNOWN-SCENARIO"));
}

#[test]
fn tornado_list_opens_with_the_weather_radio() {
    let catalog = catalog();
    let dataset = catalog.dataset(Scenario::Tornado, ClimateVariant::Warm);
    let first = &dataset.categories()[0];
    assert_eq!(first.key, "critical");
    assert_eq!(first.items[0].name, "NOAA Emergency Weather Radio");
    assert_eq!(first.items[0].priority, Priority::Critical);
    assert_eq!(dataset.item_count(), 37);
}

#[test]
fn lower_case_priority_fails_validation() {
    let dir = copy_of_data();
    let path = dir.path().join("pandemic.csv");
    let contents = fs::read_to_string(&path).expect("pandemic readable");
    fs::write(&path, contents.replacen(",Critical,", ",critical,", 1)).expect("rewrite");

    match ChecklistCatalog::load(&CatalogSource::Directory(dir.path().to_path_buf())) {
        Err(CatalogError::UnknownPriority { file, value, .. }) => {
            assert_eq!(file, "pandemic.csv");
            assert_eq!(value, "critical");
        }
        other => panic!("expected an unknown priority error, got {other:?}"),
    }
}

#[test]
fn header_only_dataset_is_rejected() {
    let dir = copy_of_data();
    fs::write(
        dir.path().join("wildfire.csv"),
        "category_key,category,icon,name,examples,quantity,priority,why\n",
    )
    .expect("rewrite");

    assert!(matches!(
        ChecklistCatalog::load(&CatalogSource::Directory(dir.path().to_path_buf())),
        Err(CatalogError::EmptyDataset { file }) if file == "wildfire.csv"
    ));
}

#[test]
fn cold_delta_with_two_categories_is_rejected() {
    let dir = copy_of_data();
    let path = dir.path().join("earthquake_cold.csv");
    let mut contents = fs::read_to_string(&path).expect("delta readable");
    contents.push_str("boots,Winter Boots,🥾,Insulated boots,Sorel,1 pair each,High,Frostbite starts at the feet.\n");
    fs::write(&path, contents).expect("rewrite");

    assert!(matches!(
        ChecklistCatalog::load(&CatalogSource::Directory(dir.path().to_path_buf())),
        Err(CatalogError::DeltaShape { categories: 2, .. })
    ));
}

#[test]
fn missing_directory_file_is_reported() {
    let dir = copy_of_data();
    fs::remove_file(dir.path().join("zombie_apocalypse.csv")).expect("remove");

    assert!(matches!(
        ChecklistCatalog::load(&CatalogSource::Directory(dir.path().to_path_buf())),
        Err(CatalogError::MissingSource { file }) if file.ends_with("zombie_apocalypse.csv")
    ));
}
