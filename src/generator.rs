/*!
 * Output generation: one file per registered plugin
 */

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Result, SingleFileError};
use crate::plugins::{Plugin, PluginRegistry};
use crate::types::CodebaseSnapshot;
use crate::utils::replace_invalid_chars;

/// A plugin that failed under continue-on-error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailure {
    pub plugin: String,
    pub reason: String,
}

/// Outcome of generating every registered format
#[derive(Debug, Clone, Default)]
pub struct GenerationSummary {
    /// Output files written, in plugin order
    pub written: Vec<PathBuf>,
    /// Plugins that failed and were skipped
    pub failures: Vec<GenerationFailure>,
}

/// Renders a snapshot through each registered plugin and writes the results
pub struct OutputGenerator {
    config: Config,
}

impl OutputGenerator {
    /// Create a new output generator
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Render and write every plugin currently in `registry`
    pub fn generate_all(
        &self,
        snapshot: &CodebaseSnapshot,
        registry: &PluginRegistry,
    ) -> Result<GenerationSummary> {
        let mut summary = GenerationSummary::default();
        let snapshot = self.prepare(snapshot);

        for plugin in registry.iter() {
            match self.write_output(&snapshot, plugin) {
                Ok(path) => {
                    info!(plugin = plugin.name(), path = %path.display(), "wrote output");
                    summary.written.push(path);
                }
                Err(e) if self.config.ignore_errors => {
                    warn!(plugin = plugin.name(), "skipping output: {}", e);
                    summary.failures.push(GenerationFailure {
                        plugin: plugin.name().to_string(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(summary)
    }

    /// Render one plugin and write it to `{stem}.{name}`
    pub fn generate(&self, snapshot: &CodebaseSnapshot, plugin: &dyn Plugin) -> Result<PathBuf> {
        self.write_output(&self.prepare(snapshot), plugin)
    }

    /// The snapshot plugins render from; sanitized when replacement is on
    fn prepare<'a>(&self, snapshot: &'a CodebaseSnapshot) -> Cow<'a, CodebaseSnapshot> {
        if self.config.replace_invalid_chars {
            Cow::Owned(snapshot.with_replaced_chars())
        } else {
            Cow::Borrowed(snapshot)
        }
    }

    fn write_output(&self, snapshot: &CodebaseSnapshot, plugin: &dyn Plugin) -> Result<PathBuf> {
        let path = self.config.output_path(plugin.name());
        let failed = |e: &dyn std::fmt::Display| SingleFileError::Generation {
            plugin: plugin.name().to_string(),
            message: e.to_string(),
        };

        let mut payload = plugin.render(snapshot).map_err(|e| match e {
            e @ SingleFileError::Generation { .. } => e,
            other => failed(&other),
        })?;
        if self.config.replace_invalid_chars {
            payload = replace_invalid_chars(&payload);
        }

        let file = File::create(&path)
            .map_err(|e| failed(&format!("cannot create {}: {}", path.display(), e)))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(payload.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| failed(&format!("cannot write {}: {}", path.display(), e)))?;

        Ok(path)
    }
}
