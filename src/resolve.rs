//! Override resolution: canonical spec defaults layered with per-target
//! overrides and custom elements, producing render-ready geometry.
//!
//! Resolution is a pure function of its inputs — identical inputs yield
//! identical output — which is what makes undo/redo and
//! preview-vs-save consistency hold. It runs on the hot path (after every
//! pointer-move), so it allocates one output vector and nothing else of
//! note.

#[cfg(test)]
#[path = "resolve_test.rs"]
mod resolve_test;

use serde::Serialize;
use tracing::warn;

use crate::doc::{Content, CustomKind, ElementStyle, OverrideDoc, is_custom_id};
use crate::layout::{ElementKind, LayoutError, LayoutRegistry, LayoutSpec};

/// Kind of a resolved element: the union of spec and custom kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedKind {
    Text,
    Image,
    Rectangle,
    Container,
    Line,
    Badge,
    Shape,
}

impl From<ElementKind> for ResolvedKind {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Text => Self::Text,
            ElementKind::Image => Self::Image,
            ElementKind::Rectangle => Self::Rectangle,
            ElementKind::Container => Self::Container,
            ElementKind::Line => Self::Line,
        }
    }
}

impl From<CustomKind> for ResolvedKind {
    fn from(kind: CustomKind) -> Self {
        match kind {
            CustomKind::Text => Self::Text,
            CustomKind::Badge => Self::Badge,
            CustomKind::Image => Self::Image,
            CustomKind::Shape => Self::Shape,
        }
    }
}

impl ResolvedKind {
    /// Human-readable name, used as the layer label for custom elements.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Image => "Image",
            Self::Rectangle => "Rectangle",
            Self::Container => "Container",
            Self::Line => "Line",
            Self::Badge => "Badge",
            Self::Shape => "Shape",
        }
    }
}

/// One fully-resolved element, ready for the rendering collaborator.
///
/// Derived on demand and never stored. `has_override` is a pure UI
/// affordance (the "Modified" badge); it has no effect on geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedElement {
    /// Spec element key or custom element id.
    pub key: String,
    pub kind: ResolvedKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub z_index: i64,
    pub has_override: bool,
    /// Present for custom elements only; spec element content comes from
    /// the brand/SKU content tables outside this engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ElementStyle>,
}

/// One row of the layers-panel list, topmost element first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerEntry {
    pub key: String,
    pub label: String,
    pub kind: ResolvedKind,
    pub has_override: bool,
    pub z_index: i64,
}

/// Resolve `doc` against an already-fetched spec.
///
/// Every spec element appears exactly once with its override (if any)
/// merged over the defaults; custom elements follow verbatim. The result
/// is sorted by `z_index` ascending for render order, ties keeping spec
/// order then custom insertion order. Override entries for keys the spec
/// no longer defines are ignored — specs evolve after overrides were
/// recorded, and dropping the entry would lose user intent if the spec
/// change is reverted.
#[must_use]
pub fn resolve_spec(spec: &LayoutSpec, doc: &OverrideDoc) -> Vec<ResolvedElement> {
    let mut out = Vec::with_capacity(spec.elements.len() + doc.custom_elements.len());

    for def in &spec.elements {
        let entry = doc.position_overrides.get(&def.key);
        let has_override = entry.is_some_and(|o| !o.is_empty());
        let ov = entry.cloned().unwrap_or_default();
        out.push(ResolvedElement {
            key: def.key.clone(),
            kind: def.kind.into(),
            x: ov.x.unwrap_or(def.x),
            y: ov.y.unwrap_or(def.y),
            width: ov.width.unwrap_or(def.width),
            height: ov.height.unwrap_or(def.height),
            rotation: ov.rotation.unwrap_or(def.rotation),
            z_index: ov.z_index.unwrap_or(def.z_index),
            has_override,
            content: None,
            style: None,
        });
    }

    for key in doc.position_overrides.keys() {
        if spec.element(key).is_none() {
            warn!(%key, layout_type = %spec.layout_type, "ignoring override for element absent from spec");
        }
    }

    for custom in &doc.custom_elements {
        out.push(ResolvedElement {
            key: custom.id.clone(),
            kind: custom.kind.into(),
            x: custom.x,
            y: custom.y,
            width: custom.width,
            height: custom.height,
            rotation: custom.rotation,
            z_index: custom.z_index,
            has_override: true,
            content: Some(custom.content.clone()),
            style: Some(custom.style.clone()),
        });
    }

    out.sort_by_key(|el| el.z_index);
    out
}

/// Resolve by layout type through the registry.
///
/// # Errors
///
/// Returns [`LayoutError::NotFound`] if the layout type is unknown.
pub fn resolve(
    registry: &LayoutRegistry,
    layout_type: &str,
    doc: &OverrideDoc,
) -> Result<Vec<ResolvedElement>, LayoutError> {
    Ok(resolve_spec(registry.get(layout_type)?, doc))
}

/// Build the layers-panel list from resolved elements: topmost first,
/// spec keys humanized (`price_badge` → `Price Badge`), custom elements
/// labeled by kind.
#[must_use]
pub fn layer_list(resolved: &[ResolvedElement]) -> Vec<LayerEntry> {
    resolved
        .iter()
        .rev()
        .map(|el| LayerEntry {
            key: el.key.clone(),
            label: if is_custom_id(&el.key) {
                el.kind.label().to_string()
            } else {
                humanize_key(&el.key)
            },
            kind: el.kind,
            has_override: el.has_override,
            z_index: el.z_index,
        })
        .collect()
}

/// `price_badge` / `price-badge` → `Price Badge`.
fn humanize_key(key: &str) -> String {
    key.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
