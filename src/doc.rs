//! The persisted mutation surface: sparse per-element overrides and
//! free-form custom elements.
//!
//! A [`PositionOverride`] records only the geometry fields the user
//! actually changed for one spec element — unset fields keep tracking the
//! canonical default, so a later spec revision still propagates to
//! untouched fields. A [`CustomElement`] has no canonical default to fall
//! back to and therefore carries complete geometry, plus theme-relative
//! content and style (color and image *keys*, never literal values, so
//! re-theming a brand restyles every layout without touching overrides).
//!
//! [`OverrideDoc`] bundles both into the pair the host persists per
//! target (brand master or SKU instance).

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Bounds, Canvas};
use crate::layout::ElementDef;

/// Prefix that tags generated custom-element ids.
const CUSTOM_ID_PREFIX: &str = "custom-";

/// Sparse geometry override for one spec element. Only present fields are
/// authoritative; absent fields fall through to the spec default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
}

impl PositionOverride {
    /// Returns `true` when no field is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.rotation.is_none()
            && self.z_index.is_none()
    }
}

/// The kind of a user-created custom element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomKind {
    Text,
    Badge,
    Image,
    Shape,
}

/// Theme-relative content of a custom element.
///
/// Image content is a key into the brand/SKU image table — never a baked
/// pixel value — so the element re-themes automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Content {
    /// Literal text, rendered as-is.
    Text(String),
    /// Key into the brand/SKU image table.
    ImageKey(String),
    /// No drawable content (plain shapes).
    None,
}

/// A key into the brand/SKU color table. Never a literal color value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorRef(pub String);

impl ColorRef {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

/// How image content fits its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectFit {
    Contain,
    Cover,
    Fill,
}

/// Visual styling for a custom element. Every field is optional; the
/// renderer supplies kind-appropriate fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    /// Fill color key, resolved against the brand/SKU theme table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<ColorRef>,
    /// Text color key, resolved against the brand/SKU theme table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<ColorRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_fit: Option<ObjectFit>,
}

/// A user-created element. Carries complete geometry — unlike an
/// override, there is no canonical default beneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomElement {
    /// Globally unique id, generated as `custom-<uuid>`.
    pub id: String,
    pub kind: CustomKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
    pub z_index: i64,
    pub content: Content,
    pub style: ElementStyle,
}

impl CustomElement {
    /// Create a new element of `kind`, centered on `canvas` with
    /// kind-appropriate default size, content, and theme-relative style.
    #[must_use]
    pub fn new(kind: CustomKind, canvas: Canvas, z_index: i64) -> Self {
        let (width, height) = match kind {
            CustomKind::Text => (300.0, 80.0),
            CustomKind::Badge => (160.0, 60.0),
            CustomKind::Image => (300.0, 300.0),
            CustomKind::Shape => (200.0, 200.0),
        };
        let content = match kind {
            CustomKind::Text => Content::Text("Text".to_string()),
            CustomKind::Badge => Content::Text("NEW".to_string()),
            CustomKind::Image => Content::ImageKey("product".to_string()),
            CustomKind::Shape => Content::None,
        };
        let style = match kind {
            CustomKind::Text => ElementStyle {
                font_size: Some(32.0),
                text_color: Some(ColorRef::new("text")),
                ..ElementStyle::default()
            },
            CustomKind::Badge => ElementStyle {
                font_size: Some(24.0),
                font_weight: Some(700),
                padding: Some(8.0),
                corner_radius: Some(8.0),
                fill: Some(ColorRef::new("accent")),
                text_color: Some(ColorRef::new("background")),
                ..ElementStyle::default()
            },
            CustomKind::Image => ElementStyle {
                object_fit: Some(ObjectFit::Contain),
                ..ElementStyle::default()
            },
            CustomKind::Shape => ElementStyle {
                fill: Some(ColorRef::new("primary")),
                ..ElementStyle::default()
            },
        };
        Self {
            id: Self::generate_id(),
            kind,
            x: (canvas.width - width) / 2.0,
            y: (canvas.height - height) / 2.0,
            width,
            height,
            rotation: 0.0,
            z_index,
            content,
            style,
        }
    }

    /// Generate a fresh custom-element id.
    #[must_use]
    pub fn generate_id() -> String {
        format!("{CUSTOM_ID_PREFIX}{}", Uuid::new_v4())
    }

    /// Current bounding box.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }
}

/// Returns `true` if `key` is a generated custom-element id rather than a
/// spec element key.
#[must_use]
pub fn is_custom_id(key: &str) -> bool {
    key.starts_with(CUSTOM_ID_PREFIX)
}

/// The persisted override pair for one (target, layout type): sparse
/// per-element overrides plus the list of custom elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverrideDoc {
    #[serde(default)]
    pub position_overrides: HashMap<String, PositionOverride>,
    #[serde(default)]
    pub custom_elements: Vec<CustomElement>,
}

impl OverrideDoc {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` carries any user modification: a non-empty override
    /// entry, or being a custom element at all.
    #[must_use]
    pub fn has_override(&self, key: &str) -> bool {
        if self.custom(key).is_some() {
            return true;
        }
        self.position_overrides.get(key).is_some_and(|o| !o.is_empty())
    }

    /// Look up a custom element by id.
    #[must_use]
    pub fn custom(&self, id: &str) -> Option<&CustomElement> {
        self.custom_elements.iter().find(|c| c.id == id)
    }

    /// Mutable lookup of a custom element by id.
    pub fn custom_mut(&mut self, id: &str) -> Option<&mut CustomElement> {
        self.custom_elements.iter_mut().find(|c| c.id == id)
    }

    /// Remove a custom element by id, returning it if present.
    pub fn remove_custom(&mut self, id: &str) -> Option<CustomElement> {
        let idx = self.custom_elements.iter().position(|c| c.id == id)?;
        Some(self.custom_elements.remove(idx))
    }

    /// Apply a geometry patch to `key`.
    ///
    /// Custom elements take the patched fields directly. Spec elements
    /// merge the patch into their sparse override entry; a field whose
    /// patched value equals the canonical default is dropped from the
    /// entry (an override is never a full copy of the default), and an
    /// entry left empty is removed entirely. Returns `false` when `key`
    /// matches neither a custom element nor `default`.
    pub fn apply_patch(&mut self, key: &str, patch: &PositionOverride, default: Option<&ElementDef>) -> bool {
        if let Some(custom) = self.custom_mut(key) {
            if let Some(x) = patch.x {
                custom.x = x;
            }
            if let Some(y) = patch.y {
                custom.y = y;
            }
            if let Some(w) = patch.width {
                custom.width = w;
            }
            if let Some(h) = patch.height {
                custom.height = h;
            }
            if let Some(r) = patch.rotation {
                custom.rotation = r;
            }
            if let Some(z) = patch.z_index {
                custom.z_index = z;
            }
            return true;
        }

        let Some(def) = default else {
            return false;
        };

        let entry = self.position_overrides.entry(key.to_string()).or_default();
        if let Some(x) = patch.x {
            entry.x = if x == def.x { None } else { Some(x) };
        }
        if let Some(y) = patch.y {
            entry.y = if y == def.y { None } else { Some(y) };
        }
        if let Some(w) = patch.width {
            entry.width = if w == def.width { None } else { Some(w) };
        }
        if let Some(h) = patch.height {
            entry.height = if h == def.height { None } else { Some(h) };
        }
        if let Some(r) = patch.rotation {
            entry.rotation = if r == def.rotation { None } else { Some(r) };
        }
        if let Some(z) = patch.z_index {
            entry.z_index = if z == def.z_index { None } else { Some(z) };
        }
        if entry.is_empty() {
            self.position_overrides.remove(key);
        }
        true
    }
}
