use crate::model::{PackedRectangle, Rect};

pub mod growing;
pub mod split_tree;

pub use growing::{GrowingPacker, sort_for_packing};
pub use split_tree::{GrowDirection, Node, NodeId, SplitTree};

/// A packer places rectangles into a fixed region.
///
/// Implementations must ensure no overlaps. `pack` returns `None` if the
/// rectangle does not fit in the current region.
pub trait Packer<K> {
    fn can_pack(&self, rect: &Rect) -> bool;
    fn pack(&mut self, key: K, rect: &Rect) -> Option<PackedRectangle<K>>;
}
