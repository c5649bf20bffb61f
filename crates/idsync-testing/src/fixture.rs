//! Webhook payload fixtures.
//!
//! Golden payloads live in `fixtures/` inside this crate, e.g.
//! `fixtures/clerk/user_created.json`.

use std::path::{Path, PathBuf};

use serde_json::Value;

pub struct Fixture;

impl Fixture {
    fn root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Load and parse a fixture JSON file at `fixtures/<relative_path>`.
    ///
    /// Panics if the file is missing or invalid JSON.
    pub fn load(relative_path: &str) -> Value {
        let full_path = Self::root().join(relative_path);
        let contents = std::fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("fixture not found at {}: {}", full_path.display(), e));
        serde_json::from_str(&contents)
            .unwrap_or_else(|e| panic!("invalid JSON in fixture {}: {}", relative_path, e))
    }

    /// Load a Clerk event fixture by name, e.g. `Fixture::clerk("session_created")`.
    pub fn clerk(name: &str) -> Value {
        Self::load(&format!("clerk/{name}.json"))
    }
}
