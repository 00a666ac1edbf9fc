/*!
 * Output plugins and the per-run plugin registry
 */

use std::str::FromStr;

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::debug;

use crate::bail;
use crate::error::Result;
use crate::types::CodebaseSnapshot;

pub mod default;
pub mod json;
pub mod markdown;
pub mod xml;

pub use default::DefaultPlugin;
pub use json::{JsonDocument, JsonPlugin};
pub use markdown::MarkdownPlugin;
pub use xml::XmlPlugin;

/// A named renderer turning a snapshot into one output format
pub trait Plugin: Send + Sync {
    /// Format name; also the output file suffix
    fn name(&self) -> &str;

    /// Render the snapshot to the output payload
    fn render(&self, snapshot: &CodebaseSnapshot) -> Result<String>;

    /// Whether this format shows file content
    fn needs_content(&self) -> bool {
        true
    }
}

/// Formats shipped with the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum BuiltinFormat {
    /// Flattened text dump
    Default,
    /// Structured JSON record
    Json,
    /// Readable Markdown document
    Markdown,
    /// Structured XML document
    Xml,
}

impl BuiltinFormat {
    /// Instantiate the plugin for this format
    pub fn plugin(self) -> Box<dyn Plugin> {
        match self {
            Self::Default => Box::new(DefaultPlugin),
            Self::Json => Box::new(JsonPlugin),
            Self::Markdown => Box::new(MarkdownPlugin),
            Self::Xml => Box::new(XmlPlugin),
        }
    }

    /// Names of all built-in formats
    pub fn names() -> Vec<String> {
        Self::iter().map(|f| f.to_string()).collect()
    }
}

/// Format name to plugin table, iterated in insertion order
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a registry with the built-in plugins named in `formats`.
    ///
    /// Duplicates collapse to their first occurrence. An unknown name is a
    /// configuration error.
    pub fn from_formats(formats: &[String]) -> Result<Self> {
        let mut registry = Self::new();
        for name in formats {
            let Ok(format) = BuiltinFormat::from_str(name) else {
                bail!(
                    Config,
                    "unknown format `{}` (available: {})",
                    name,
                    BuiltinFormat::names().join(", ")
                );
            };
            if !registry.contains(format.as_ref()) {
                registry.register(format.plugin());
            }
        }
        Ok(registry)
    }

    /// Add a plugin, replacing any plugin registered under the same name
    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        debug!(plugin = plugin.name(), "registering plugin");
        match self.plugins.iter().position(|p| p.name() == plugin.name()) {
            Some(index) => self.plugins[index] = plugin,
            None => self.plugins.push(plugin),
        }
    }

    /// Remove a plugin by name; removing an absent name is a no-op
    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn Plugin>> {
        let index = self.plugins.iter().position(|p| p.name() == name)?;
        debug!(plugin = name, "unregistering plugin");
        Some(self.plugins.remove(index))
    }

    /// Look up a plugin by name
    pub fn get(&self, name: &str) -> Option<&dyn Plugin> {
        self.plugins
            .iter()
            .find(|p| p.name() == name)
            .map(|p| &**p)
    }

    /// Whether a plugin is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered names in insertion order
    pub fn names(&self) -> Vec<String> {
        self.plugins.iter().map(|p| p.name().to_string()).collect()
    }

    /// Registered plugins in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Plugin> {
        self.plugins.iter().map(|p| &**p)
    }

    /// Whether any registered plugin shows file content
    pub fn needs_content(&self) -> bool {
        self.plugins.iter().any(|p| p.needs_content())
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
