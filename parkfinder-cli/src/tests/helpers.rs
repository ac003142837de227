//! Test helpers for writing datasets and capturing command output.

use camino::Utf8PathBuf;
use serde_json::Value;
use tempfile::TempDir;

/// A small Edinburgh dataset with a quality tie between the first two parks.
pub(super) const EDINBURGH_DATASET: &str = r#"{
  "parks": [
    { "site_id": 101, "name": "Inverleith Park", "lat": 55.963483, "lon": -3.217358,
      "quality": 0.88, "safety": 0.8, "facilities": ["Toilets", "Parking"] },
    { "site_id": 102, "name": "Leith Links", "lat": 55.971177, "lon": -3.163991,
      "quality": 0.88, "safety": 0.66, "facilities": ["Toilets", "Sports Pitches"] },
    { "site_id": 103, "name": "The Meadows", "lat": 55.94143, "lon": -3.191872,
      "quality": 0.91, "facilities": ["Tennis Courts", "Cafe"] },
    { "site_id": 104, "name": "Inch Park", "lat": 55.926125, "lon": -3.16042,
      "quality": 0.61 }
  ],
  "facilities": [ { "site_id": 103, "facility_name": "Toilets" } ]
}"#;

/// A temporary directory holding a dataset file.
pub(super) struct Workspace {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn with_dataset(contents: &str) -> (Self, Utf8PathBuf) {
        let workspace = Self::new();
        let path = workspace.root.join("parks.json");
        std::fs::write(&path, contents).expect("write dataset");
        (workspace, path)
    }
}

/// Decode captured command output.
pub(super) fn parse_output(buffer: &[u8]) -> Value {
    serde_json::from_slice(buffer).expect("command output is JSON")
}
