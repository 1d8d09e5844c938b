use super::Layer;

/// Events emitted while walking a layer tree.
/// Each visitor implements the methods it cares about; default impls are no-ops.
#[allow(unused_variables)]
pub trait LayerVisitor {
    /// Called before a visible layer's children are walked.
    fn on_enter(&mut self, layer: &Layer) {}

    /// Called after a visible layer's children are walked.
    fn on_exit(&mut self, layer: &Layer) {}

    /// Called once the whole tree has been walked.
    fn on_tree_end(&mut self) {}
}
