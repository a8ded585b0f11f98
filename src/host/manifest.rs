//! JSON declaration manifests.
//!
//! ```json
//! {
//!   "classes": [
//!     { "name": "Tag", "attribute_flags": "TARGET_CLASS | IS_REPEATABLE" },
//!     { "name": "Base", "attributes": [{ "name": "Tag", "arguments": { "positional": ["a"] } }] },
//!     { "name": "Child", "parent": "Base", "traits": ["HasTimestamps"] },
//!     { "name": "HasTimestamps", "kind": "trait" }
//!   ],
//!   "functions": [{ "name": "helper" }]
//! }
//! ```

use serde::Deserialize;

use super::decl::{ClassDecl, FunctionDecl};
use super::registry::ClassRegistry;
use crate::error::ReflectResult;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Manifest {
    classes: Vec<ClassDecl>,
    functions: Vec<FunctionDecl>,
}

impl ClassRegistry {
    /// Declare every class-like and function listed in a JSON manifest.
    ///
    /// Declarations are applied in order; the first duplicate name aborts the load
    /// and leaves earlier declarations registered.
    pub fn load_manifest(&self, json: &str) -> ReflectResult<()> {
        let manifest: Manifest = serde_json::from_str(json)?;
        tracing::debug!(
            "[MANIFEST] {} class-likes, {} functions",
            manifest.classes.len(),
            manifest.functions.len()
        );
        for class in manifest.classes {
            self.declare(class)?;
        }
        for function in manifest.functions {
            self.declare_function(function)?;
        }
        Ok(())
    }
}
