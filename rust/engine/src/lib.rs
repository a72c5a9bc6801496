// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stable entry point for design normalization and layout.
//!
//! An [`Engine`] is configured once and can then be shared freely: every
//! call builds and discards its own document graph.

mod error;

pub use error::{Error, Result};

pub use archplan_core::DesignDocument;
pub use archplan_processing::{LayoutOptions, LayoutResults, PackingConfig};

use archplan_core::{design_from_response, normalize};
use archplan_geometry::MeshKernel;
use archplan_processing::run_layout;
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::path::Path;

/// Construction-time engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub packing: PackingConfig,
    /// Attach triangle meshes to 3D volumes
    pub include_meshes: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            packing: PackingConfig::default(),
            include_meshes: true,
        }
    }
}

/// A normalized design, with its layout when one was requested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineOutput {
    pub design: DesignDocument,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutResults>,
}

impl EngineOutput {
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self)
            .map_err(|e| archplan_processing::Error::Serialization(e.to_string()).into())
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    kernel: MeshKernel,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let kernel = MeshKernel::new(config.include_meshes);
        Self { config, kernel }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn normalize_value(&self, input: &Value) -> Result<DesignDocument> {
        Ok(normalize(input)?)
    }

    pub fn normalize_bytes(&self, bytes: &[u8]) -> Result<DesignDocument> {
        let value: Value = serde_json::from_slice(bytes).map_err(|source| archplan_core::Error::Json {
            context: "design document",
            source,
        })?;
        self.normalize_value(&value)
    }

    /// Normalize a design read from a JSON file
    pub fn normalize_file(&self, path: impl AsRef<Path>) -> Result<DesignDocument> {
        let path = path.as_ref();
        let io_error = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_error)?;
        let len = file.metadata().map_err(io_error)?.len();
        tracing::debug!(path = %path.display(), bytes = len, "Loading design file");

        // Zero-length files cannot be mapped; parse them as empty input.
        if len == 0 {
            return self.normalize_bytes(&[]);
        }

        // SAFETY: the mapping is read-only and dropped before returning.
        // Concurrent truncation by another process is not guarded against.
        let map = unsafe { Mmap::map(&file) }.map_err(io_error)?;
        self.normalize_bytes(&map)
    }

    /// Normalize generated text, falling back to the sample design
    pub fn normalize_response(&self, response: &str, prompt: &str) -> DesignDocument {
        design_from_response(response, prompt)
    }

    /// Lay out an already normalized design
    pub fn plan(&self, design: &DesignDocument, options: &LayoutOptions) -> LayoutResults {
        run_layout(design, options, &self.config.packing, &self.kernel)
    }

    /// Normalize, then lay out when `options` is given
    pub fn process_value(&self, input: &Value, options: Option<&LayoutOptions>) -> Result<EngineOutput> {
        let design = self.normalize_value(input)?;
        Ok(self.finish(design, options))
    }

    pub fn process_file(&self, path: impl AsRef<Path>, options: Option<&LayoutOptions>) -> Result<EngineOutput> {
        let design = self.normalize_file(path)?;
        Ok(self.finish(design, options))
    }

    fn finish(&self, design: DesignDocument, options: Option<&LayoutOptions>) -> EngineOutput {
        let layout = options.map(|options| self.plan(&design, options));
        EngineOutput { design, layout }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_bytes() {
        let engine = Engine::default();
        let doc = engine.normalize_bytes(br#"{"rooms": [{"name": "Den"}]}"#).unwrap();
        assert_eq!(doc.rooms[0].name, "Den");

        let err = engine.normalize_bytes(b"[1, 2]").unwrap_err();
        assert!(matches!(err, Error::Core(archplan_core::Error::MalformedInput { .. })));

        let err = engine.normalize_bytes(b"").unwrap_err();
        assert!(matches!(err, Error::Core(archplan_core::Error::Json { .. })));
    }

    #[test]
    fn test_process_without_layout() {
        let output = Engine::default().process_value(&json!({}), None).unwrap();
        assert!(output.layout.is_none());

        let value = output.to_value().unwrap();
        assert!(value.get("layout").is_none());
        assert_eq!(value["design"]["walls"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_config_controls_meshes() {
        let options = LayoutOptions::default();
        let with = Engine::default().process_value(&json!({}), Some(&options)).unwrap();
        let without = Engine::new(EngineConfig {
            include_meshes: false,
            ..EngineConfig::default()
        })
        .process_value(&json!({}), Some(&options))
        .unwrap();

        let with = with.layout.unwrap();
        let without = without.layout.unwrap();
        assert!(with.geometry_3d.iter().all(|v| v.solid.mesh.is_some()));
        assert!(without.geometry_3d.iter().all(|v| v.solid.mesh.is_none()));
        assert_eq!(with.departments, without.departments);
    }

    #[test]
    fn test_missing_file() {
        let err = Engine::default()
            .normalize_file("/nonexistent/archplan/design.json")
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("design.json"));
    }

    #[test]
    fn test_response_fallback() {
        let doc = Engine::default().normalize_response("```json\n{oops\n```", "barn");
        assert_eq!(doc.project.name, "AI-Generated barn");
    }
}
