//! Behavioural tests for dataset loading.

use std::cell::RefCell;
use std::io::Write;

use camino::Utf8Path;
use parkfinder_core::{CatalogError, MalformedReason, ParkCatalog};
use parkfinder_data::{DatasetError, load_catalog};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::NamedTempFile;

#[derive(Default)]
struct LoadWorld {
    file: RefCell<Option<NamedTempFile>>,
    outcome: RefCell<Option<Result<ParkCatalog, DatasetError>>>,
}

impl LoadWorld {
    fn write(&self, contents: &str) {
        let mut file = NamedTempFile::new().expect("create temp dataset");
        file.write_all(contents.as_bytes()).expect("write dataset");
        self.file.replace(Some(file));
    }
}

#[fixture]
fn world() -> LoadWorld {
    LoadWorld::default()
}

#[given("a dataset where park 7 lists Cafe and the facility table adds Toilets")]
fn given_joined_dataset(world: &LoadWorld) {
    world.write(
        r#"{
            "parks": [
                { "site_id": 7, "name": "Leith Links", "lat": 55.971177, "lon": -3.163991,
                  "facilities": ["Cafe"] }
            ],
            "facilities": [ { "site_id": "7", "facility_name": "Toilets" } ]
        }"#,
    );
}

#[given("a dataset whose second park has no longitude")]
fn given_missing_coordinate(world: &LoadWorld) {
    world.write(
        r#"{
            "parks": [
                { "site_id": 1, "name": "Inch Park", "lat": 55.926125, "lon": -3.16042 },
                { "site_id": 2, "name": "Saughton Park", "lat": 55.936426 }
            ]
        }"#,
    );
}

#[when("I load the dataset")]
fn when_load(world: &LoadWorld) {
    let file = world.file.borrow();
    let path = file.as_ref().expect("dataset written").path();
    let path = Utf8Path::from_path(path).expect("temp paths are UTF-8");
    world.outcome.replace(Some(load_catalog(path)));
}

#[then("park 7 offers Cafe and Toilets")]
fn then_joined(world: &LoadWorld) {
    let outcome = world.outcome.borrow();
    let catalog = outcome
        .as_ref()
        .expect("load attempted")
        .as_ref()
        .expect("load succeeds");
    let park = catalog.find_by_site_id(&7).expect("park 7");
    assert_eq!(park.facilities.iter().collect::<Vec<_>>(), ["Cafe", "Toilets"]);
}

#[then("loading fails because record 1 is missing a coordinate")]
fn then_missing_coordinate(world: &LoadWorld) {
    let outcome = world.outcome.borrow();
    let result = outcome.as_ref().expect("load attempted");
    assert!(matches!(
        result,
        Err(DatasetError::Catalog(CatalogError::MalformedRecord {
            index: 1,
            reason: MalformedReason::MissingCoordinate
        }))
    ));
}

#[scenario(path = "tests/features/dataset_loading.feature", index = 0)]
fn facility_join(world: LoadWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/dataset_loading.feature", index = 1)]
fn missing_coordinate(world: LoadWorld) {
    let _ = world;
}
