use crate::error::{PackError, Result};
use crate::model::Rectangle;
use tracing::warn;

/// Ordered collection of rectangles waiting to be packed.
///
/// Registration order is kept and only used as the last tie-break when
/// sorting, so identical input always yields identical output.
///
/// Identifiers are expected to be unique. This is not checked; with duplicates
/// the placements still never overlap, but callers keying results by id will
/// see ambiguous entries.
#[derive(Debug, Clone)]
pub struct RectangleRegistry<K = String> {
    entries: Vec<Rectangle<K>>,
}

impl<K> Default for RectangleRegistry<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K> RectangleRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends a rectangle. Zero-sized rectangles are rejected and not stored.
    pub fn register(&mut self, width: u32, height: u32, id: K) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(PackError::InvalidDimension { width, height });
        }
        self.entries.push(Rectangle { id, width, height });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered rectangles in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rectangle<K>> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Rectangle<K>> {
        self.entries
    }
}

impl<K> Extend<Rectangle<K>> for RectangleRegistry<K> {
    /// Bulk registration. Rectangles with a zero side are logged and skipped.
    fn extend<I: IntoIterator<Item = Rectangle<K>>>(&mut self, iter: I) {
        for r in iter {
            if let Err(e) = self.register(r.width, r.height, r.id) {
                warn!(error = %e, "skipping rectangle");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_sides() {
        let mut reg = RectangleRegistry::new();
        assert_eq!(
            reg.register(0, 8, "z"),
            Err(PackError::InvalidDimension { width: 0, height: 8 })
        );
        assert_eq!(
            reg.register(8, 0, "z"),
            Err(PackError::InvalidDimension { width: 8, height: 0 })
        );
        assert!(reg.is_empty());
    }

    #[test]
    fn keeps_insertion_order() {
        let mut reg = RectangleRegistry::new();
        reg.register(1, 2, 7u32).unwrap();
        reg.register(3, 4, 3u32).unwrap();
        let ids: Vec<u32> = reg.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![7, 3]);
    }
}
