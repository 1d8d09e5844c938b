use log::warn;
use serde::{Deserialize, Serialize};

use super::visitor::LayerVisitor;
use super::{Layer, LayerKind};
use crate::math::color_parse::resolve_color;
use crate::types::{Color, TextElementInfo};

/// A text layer found during the walk, ready to be rated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectedText {
    pub name: String,
    pub info: TextElementInfo,
}

/// Builds [`TextElementInfo`] for every text layer in the tree.
///
/// Keeps a LIFO stack with one entry per entered layer carrying the
/// accumulated screen origin, the cumulative opacity, and the nearest tint
/// override in scope.
pub struct TextCollector {
    stack: Vec<StackEntry>,
    texts: Vec<CollectedText>,
}

#[derive(Clone, Copy)]
struct StackEntry {
    origin_x: i32,
    origin_y: i32,
    cumulative_opacity: f64,
    tint: Tint,
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Tint {
    None,
    Resolved(Color),
    /// A tint is declared but could not be parsed.
    Unresolvable,
}

impl TextCollector {
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn into_texts(self) -> Vec<CollectedText> {
        self.texts
    }

    fn parent(&self) -> StackEntry {
        self.stack.last().copied().unwrap_or(StackEntry {
            origin_x: 0,
            origin_y: 0,
            cumulative_opacity: 1.0,
            tint: Tint::None,
        })
    }

    fn record_text(&mut self, layer: &Layer, entry: &StackEntry, parent: &StackEntry) {
        let Some(style) = &layer.text else {
            warn!("text layer '{}' has no text style, skipping", layer.name);
            return;
        };

        let text_color = match entry.tint {
            Tint::Resolved(color) => Some(color),
            Tint::Unresolvable => None,
            Tint::None => style.color.as_deref().and_then(|value| {
                let resolved = resolve_color(value);
                if resolved.is_none() {
                    warn!("text layer '{}': cannot resolve color '{}'", layer.name, value);
                }
                resolved
            }),
        };

        self.texts.push(CollectedText {
            name: layer.name.clone(),
            info: TextElementInfo {
                text_color,
                effective_opacity: entry.cumulative_opacity,
                rectangle: layer.frame.translate(parent.origin_x, parent.origin_y),
                font_size_px: style.font_size_px,
                is_bold: style.bold,
            },
        });
    }
}

impl Default for TextCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerVisitor for TextCollector {
    fn on_enter(&mut self, layer: &Layer) {
        let parent = self.parent();
        let tint = match layer.tint.as_deref() {
            Some(value) => match resolve_color(value) {
                Some(color) => Tint::Resolved(color),
                None => {
                    warn!("layer '{}': cannot resolve tint '{}'", layer.name, value);
                    Tint::Unresolvable
                }
            },
            None => parent.tint,
        };
        let entry = StackEntry {
            origin_x: parent.origin_x.saturating_add(layer.frame.x),
            origin_y: parent.origin_y.saturating_add(layer.frame.y),
            cumulative_opacity: parent.cumulative_opacity * layer.opacity,
            tint,
        };

        if layer.kind == LayerKind::Text {
            self.record_text(layer, &entry, &parent);
        }
        self.stack.push(entry);
    }

    fn on_exit(&mut self, _layer: &Layer) {
        self.stack.pop();
    }
}
