use super::Packer;
use crate::model::{PackedRectangle, Rect};
use tracing::debug;

/// Handle into the [`SplitTree`] node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A region of the canvas.
///
/// Free leaves have `used == false` and no children. A used node either holds a
/// placed rectangle at its top-left corner (children cover the remainder) or is
/// a root created by growth (children cover the whole region).
#[derive(Debug, Clone)]
pub struct Node {
    pub rect: Rect,
    pub used: bool,
    pub right: Option<NodeId>,
    pub down: Option<NodeId>,
}

impl Node {
    fn leaf(rect: Rect) -> Self {
        Self {
            rect,
            used: false,
            right: None,
            down: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.right.is_none() && self.down.is_none()
    }
}

/// Direction in which the canvas was enlarged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowDirection {
    Right,
    Down,
}

/// Binary split tree over a canvas anchored at `(0, 0)`.
///
/// Nodes live in an arena and are never removed or re-parented. Growth only
/// swaps the root for a bigger one that adopts the old root as a child, so
/// placed rectangles keep their coordinates for the lifetime of the tree.
#[derive(Debug, Clone)]
pub struct SplitTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SplitTree {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            nodes: vec![Node::leaf(Rect::new(0, 0, width, height))],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn width(&self) -> u32 {
        self.node(self.root).rect.w
    }

    pub fn height(&self) -> u32 {
        self.node(self.root).rect.h
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Regions still free for placement.
    pub fn free_regions(&self) -> impl Iterator<Item = Rect> + '_ {
        self.nodes.iter().filter(|n| !n.used).map(|n| n.rect)
    }

    /// First free leaf that can hold `w x h`, searching depth-first in
    /// node, right, down order.
    pub fn find(&self, w: u32, h: u32) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.used {
                // right subtree must be popped first
                if let Some(down) = node.down {
                    stack.push(down);
                }
                if let Some(right) = node.right {
                    stack.push(right);
                }
            } else if node.rect.fits(w, h) {
                return Some(id);
            }
        }
        None
    }

    /// Occupies the top-left corner of free leaf `id` with `w x h` and splits
    /// the remainder into `right` (same row) and `down` (full width) leaves.
    pub fn split(&mut self, id: NodeId, w: u32, h: u32) -> Rect {
        let leaf = self.node(id).rect;
        debug_assert!(!self.node(id).used && leaf.fits(w, h));
        let right = (leaf.w > w)
            .then(|| self.push(Node::leaf(Rect::new(leaf.x + w, leaf.y, leaf.w - w, h))));
        let down = (leaf.h > h)
            .then(|| self.push(Node::leaf(Rect::new(leaf.x, leaf.y + h, leaf.w, leaf.h - h))));
        let node = &mut self.nodes[id.0];
        node.used = true;
        node.right = right;
        node.down = down;
        Rect::new(leaf.x, leaf.y, w, h)
    }

    /// Places `w x h` in the current canvas without growing it.
    pub fn insert(&mut self, w: u32, h: u32) -> Option<Rect> {
        if w == 0 || h == 0 {
            return None;
        }
        let id = self.find(w, h)?;
        Some(self.split(id, w, h))
    }

    /// Picks the growth direction for a `w x h` rectangle on a
    /// `width x height` canvas, or `None` when neither direction can admit it.
    pub fn growth_direction(width: u32, height: u32, w: u32, h: u32) -> Option<GrowDirection> {
        let (width, height, w, h) = (width as u64, height as u64, w as u64, h as u64);
        let can_grow_down = w <= width;
        let can_grow_right = h <= height;
        if can_grow_down && width >= height + h {
            return Some(GrowDirection::Down);
        }
        if can_grow_right && height >= width + w {
            return Some(GrowDirection::Right);
        }
        match (can_grow_right, can_grow_down) {
            (true, true) => {
                let skew_down = width.abs_diff(height + h);
                let skew_right = (width + w).abs_diff(height);
                if skew_down < skew_right {
                    Some(GrowDirection::Down)
                } else {
                    Some(GrowDirection::Right)
                }
            }
            (true, false) => Some(GrowDirection::Right),
            (false, true) => Some(GrowDirection::Down),
            (false, false) => None,
        }
    }

    /// Enlarges the canvas so that a `w x h` free leaf exists.
    ///
    /// Returns `None` if no direction can admit the rectangle or the canvas
    /// would overflow `u32`.
    pub fn grow(&mut self, w: u32, h: u32) -> Option<GrowDirection> {
        let (width, height) = (self.width(), self.height());
        let dir = Self::growth_direction(width, height, w, h)?;
        let old_root = self.root;
        let new_root = match dir {
            GrowDirection::Down => {
                let new_h = height.checked_add(h)?;
                let fresh = self.push(Node::leaf(Rect::new(0, height, width, h)));
                Node {
                    rect: Rect::new(0, 0, width, new_h),
                    used: true,
                    right: Some(old_root),
                    down: Some(fresh),
                }
            }
            GrowDirection::Right => {
                let new_w = width.checked_add(w)?;
                let fresh = self.push(Node::leaf(Rect::new(width, 0, w, height)));
                Node {
                    rect: Rect::new(0, 0, new_w, height),
                    used: true,
                    right: Some(fresh),
                    down: Some(old_root),
                }
            }
        };
        debug!(
            direction = ?dir,
            from_w = width,
            from_h = height,
            to_w = new_root.rect.w,
            to_h = new_root.rect.h,
            "canvas grown"
        );
        self.root = self.push(new_root);
        Some(dir)
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }
}

impl<K> Packer<K> for SplitTree {
    fn can_pack(&self, rect: &Rect) -> bool {
        rect.w > 0 && rect.h > 0 && self.find(rect.w, rect.h).is_some()
    }

    fn pack(&mut self, key: K, rect: &Rect) -> Option<PackedRectangle<K>> {
        let placed = self.insert(rect.w, rect.h)?;
        Some(PackedRectangle {
            id: key,
            x: placed.x,
            y: placed.y,
            width: placed.w,
            height: placed.h,
        })
    }
}
