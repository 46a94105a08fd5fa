//! Canonical layout specifications and the read-only registry that serves
//! them.
//!
//! A [`LayoutSpec`] describes one layout *type* (e.g. "comparison",
//! "timeline"): the canvas it composes onto and the default geometry of
//! every named element. Specs are provided by the hosting application at
//! startup and are never mutated by editing — edits only ever produce
//! overrides (see [`crate::doc`]), which the resolver layers back on top
//! of these defaults at read time.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Canvas};

/// The kind of a spec-defined element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Text block filled from brand/SKU content.
    Text,
    /// Image slot filled from brand/SKU assets.
    Image,
    /// Filled rectangle.
    Rectangle,
    /// Grouping container.
    Container,
    /// Straight rule line.
    Line,
}

/// Default geometry and type for one named element of a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDef {
    /// Key unique within the layout type, e.g. `"headline"`.
    pub key: String,
    pub kind: ElementKind,
    /// Left edge in canvas units.
    pub x: f64,
    /// Top edge in canvas units.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Stacking order; lower values draw beneath higher values.
    pub z_index: i64,
    /// Clockwise rotation in degrees. Absent in most specs.
    #[serde(default)]
    pub rotation: f64,
}

impl ElementDef {
    /// The element's default bounding box.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }
}

/// Canonical, immutable definition of one layout type.
///
/// Element order is significant: it is the stable tie-break for elements
/// sharing a z-index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    /// Identifier of the layout type, e.g. `"comparison"`.
    pub layout_type: String,
    #[serde(default)]
    pub canvas: Canvas,
    pub elements: Vec<ElementDef>,
}

impl LayoutSpec {
    /// Look up an element definition by key.
    #[must_use]
    pub fn element(&self, key: &str) -> Option<&ElementDef> {
        self.elements.iter().find(|e| e.key == key)
    }

    /// Host-facing sanity check: reports duplicate keys and default
    /// geometry lying outside the canvas. Diagnostics only — resolution
    /// never enforces these.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut seen: HashMap<&str, ()> = HashMap::new();
        for el in &self.elements {
            if seen.insert(el.key.as_str(), ()).is_some() {
                problems.push(format!("duplicate element key `{}`", el.key));
            }
            if el.x < 0.0 || el.y < 0.0 || el.x > self.canvas.width || el.y > self.canvas.height {
                problems.push(format!("element `{}` positioned off-canvas", el.key));
            }
            if el.width <= 0.0 || el.height <= 0.0 {
                problems.push(format!("element `{}` has non-positive size", el.key));
            }
        }
        problems
    }
}

/// Errors surfaced by layout lookup and resolution.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// No spec is registered for the requested layout type.
    #[error("no layout spec registered for type `{0}`")]
    NotFound(String),
}

/// Read-only accessor for the layout specs the host registered.
#[derive(Debug, Default)]
pub struct LayoutRegistry {
    specs: HashMap<String, LayoutSpec>,
}

impl LayoutRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a spec under its layout type. Host wiring only; replacing
    /// an existing spec is allowed (spec evolution between releases).
    pub fn register(&mut self, spec: LayoutSpec) {
        self.specs.insert(spec.layout_type.clone(), spec);
    }

    /// Fetch the spec for a layout type.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NotFound`] if the layout type is unknown.
    pub fn get(&self, layout_type: &str) -> Result<&LayoutSpec, LayoutError> {
        self.specs
            .get(layout_type)
            .ok_or_else(|| LayoutError::NotFound(layout_type.to_string()))
    }

    /// Number of registered layout types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` if no specs are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
