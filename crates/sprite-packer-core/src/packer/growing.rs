use super::Packer;
use super::split_tree::SplitTree;
use crate::config::PackerConfig;
use crate::error::{PackError, Result};
use crate::model::{Placement, Rect, Rectangle};
use crate::registry::RectangleRegistry;
use tracing::{debug, error, instrument, trace};

/// Packs a set of rectangles into a canvas that grows to fit.
///
/// One instance performs exactly one run: register rectangles, then call
/// [`GrowingPacker::pack`], which consumes the packer. Instances share no
/// state, so independent sheets can be packed on separate threads.
#[derive(Debug, Clone)]
pub struct GrowingPacker<K = String> {
    config: PackerConfig,
    registry: RectangleRegistry<K>,
}

impl<K> GrowingPacker<K> {
    pub fn new(config: PackerConfig) -> Self {
        Self {
            config,
            registry: RectangleRegistry::new(),
        }
    }

    pub fn from_registry(registry: RectangleRegistry<K>, config: PackerConfig) -> Self {
        Self { config, registry }
    }

    /// See [`RectangleRegistry::register`].
    pub fn register(&mut self, width: u32, height: u32, id: K) -> Result<()> {
        self.registry.register(width, height, id)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn config(&self) -> &PackerConfig {
        &self.config
    }

    /// Places every registered rectangle and reports the final canvas size.
    ///
    /// Rectangles are processed in [`sort_for_packing`] order and the result
    /// lists them in that order. An empty registry yields a `0 x 0` canvas.
    /// Either every rectangle is placed or an error is returned.
    #[instrument(skip_all, fields(count = self.registry.len()))]
    pub fn pack(self) -> Result<Placement<K>> {
        let total = self.registry.len();
        let sorted = sort_for_packing(self.registry.into_vec());
        let Some(first) = sorted.first() else {
            return Ok(Placement {
                canvas_width: 0,
                canvas_height: 0,
                rects: Vec::new(),
            });
        };

        let (w, h) = self.config.initial_canvas(first.width, first.height);
        let mut tree = SplitTree::new(w, h);
        let mut rects = Vec::with_capacity(total);
        for r in sorted {
            let (rw, rh) = (r.width, r.height);
            let footprint = Rect::new(0, 0, rw, rh);
            if !<SplitTree as Packer<K>>::can_pack(&tree, &footprint) {
                tree.grow(rw, rh);
            }
            let Some(packed) = tree.pack(r.id, &footprint) else {
                error!(
                    w = rw,
                    h = rh,
                    canvas_w = tree.width(),
                    canvas_h = tree.height(),
                    "growth failed to admit rectangle"
                );
                return Err(PackError::PackingExhausted {
                    placed: rects.len(),
                    total,
                });
            };
            trace!(x = packed.x, y = packed.y, w = rw, h = rh, "placed");
            rects.push(packed);
        }

        debug!(
            placed = rects.len(),
            canvas_w = tree.width(),
            canvas_h = tree.height(),
            nodes = tree.len(),
            "pack complete"
        );
        Ok(Placement {
            canvas_width: tree.width(),
            canvas_height: tree.height(),
            rects,
        })
    }
}

/// Sorts rectangles into packing order: longest side descending, then
/// shortest side descending, then registration order. This is a total order,
/// so the output is fully determined by the input sequence.
pub fn sort_for_packing<K>(rects: Vec<Rectangle<K>>) -> Vec<Rectangle<K>> {
    let mut indexed: Vec<(usize, Rectangle<K>)> = rects.into_iter().enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| {
        b.max_side()
            .cmp(&a.max_side())
            .then_with(|| b.min_side().cmp(&a.min_side()))
            .then_with(|| ia.cmp(ib))
    });
    indexed.into_iter().map(|(_, r)| r).collect()
}
