pub mod collector;
pub mod visitor;

use serde::{Deserialize, Serialize};

use crate::error::ContrastResult;
use crate::types::Rectangle;
use collector::{CollectedText, TextCollector};
use visitor::LayerVisitor;

fn full_opacity() -> f64 {
    1.0
}

/// One node of a host document's layer tree, as exported by the host.
///
/// `frame` is relative to the parent layer. The walk starts at the region
/// whose raster is sampled, so the root frame's origin is normally 0,0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    #[serde(default)]
    pub name: String,
    pub kind: LayerKind,
    #[serde(default)]
    pub frame: Rectangle,
    #[serde(default = "full_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub hidden: bool,
    /// Color override applied to every text layer below this one.
    #[serde(default)]
    pub tint: Option<String>,
    #[serde(default)]
    pub text: Option<TextStyle>,
    #[serde(default)]
    pub children: Vec<Layer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Group,
    Text,
    Shape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Any CSS color string.
    #[serde(default)]
    pub color: Option<String>,
    pub font_size_px: f64,
    #[serde(default)]
    pub bold: bool,
}

impl Layer {
    pub fn from_json(json: &str) -> ContrastResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Depth-first walk in document order. Hidden layers and their subtrees are skipped.
pub fn walk<V: LayerVisitor + ?Sized>(root: &Layer, visitor: &mut V) {
    walk_layer(root, visitor);
    visitor.on_tree_end();
}

fn walk_layer<V: LayerVisitor + ?Sized>(layer: &Layer, visitor: &mut V) {
    if layer.hidden {
        return;
    }
    visitor.on_enter(layer);
    for child in &layer.children {
        walk_layer(child, visitor);
    }
    visitor.on_exit(layer);
}

/// Collect every visible text layer below `root` as rating input.
pub fn collect_text(root: &Layer) -> Vec<CollectedText> {
    let mut collector = TextCollector::new();
    walk(root, &mut collector);
    collector.into_texts()
}
