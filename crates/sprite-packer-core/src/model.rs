use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Returns true if `r` is fully inside `self`.
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x
            && r.y >= self.y
            && r.x as u64 + r.w as u64 <= self.x as u64 + self.w as u64
            && r.y as u64 + r.h as u64 <= self.y as u64 + self.h as u64
    }
    /// Returns true if the two footprints share at least one pixel.
    pub fn intersects(&self, r: &Rect) -> bool {
        let a_x2 = self.x as u64 + self.w as u64;
        let a_y2 = self.y as u64 + self.h as u64;
        let b_x2 = r.x as u64 + r.w as u64;
        let b_y2 = r.y as u64 + r.h as u64;
        !(self.x as u64 >= b_x2 || r.x as u64 >= a_x2 || self.y as u64 >= b_y2 || r.y as u64 >= a_y2)
    }
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }
    /// True if a `w x h` rectangle fits inside without rotation.
    pub fn fits(&self, w: u32, h: u32) -> bool {
        self.w >= w && self.h >= h
    }
}

/// A rectangle waiting to be packed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rectangle<K = String> {
    /// Caller-chosen identifier. Must be unique within one packing run.
    pub id: K,
    pub width: u32,
    pub height: u32,
}

impl<K> Rectangle<K> {
    pub fn max_side(&self) -> u32 {
        self.width.max(self.height)
    }
    pub fn min_side(&self) -> u32 {
        self.width.min(self.height)
    }
}

/// A rectangle after placement. `width`/`height` echo the input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackedRectangle<K = String> {
    pub id: K,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl<K> PackedRectangle<K> {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Output of one packing run.
///
/// `rects` is in processing order (largest first), not registration order.
/// Re-key by `id` when registration order matters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement<K = String> {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub rects: Vec<PackedRectangle<K>>,
}

impl<K> Placement<K> {
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn canvas(&self) -> Rect {
        Rect::new(0, 0, self.canvas_width, self.canvas_height)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PackedRectangle<K>> {
        self.rects.iter()
    }

    /// Linear lookup by identifier. With duplicate ids the first match wins.
    pub fn get<Q>(&self, id: &Q) -> Option<&PackedRectangle<K>>
    where
        K: PartialEq<Q>,
        Q: ?Sized,
    {
        self.rects.iter().find(|r| r.id == *id)
    }

    /// Computes packing statistics for this placement.
    pub fn stats(&self) -> PackStats {
        let canvas_area = self.canvas_width as u64 * self.canvas_height as u64;
        let used_area: u64 = self.rects.iter().map(|r| r.rect().area()).sum();
        let occupancy = if canvas_area > 0 {
            used_area as f64 / canvas_area as f64
        } else {
            0.0
        };
        PackStats {
            num_rects: self.rects.len(),
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            canvas_area,
            used_area,
            occupancy,
        }
    }
}

impl<K: Eq + std::hash::Hash> Placement<K> {
    /// Consumes the placement and re-keys it by identifier.
    pub fn into_map(self) -> std::collections::HashMap<K, PackedRectangle<K>>
    where
        K: Clone,
    {
        self.rects.into_iter().map(|r| (r.id.clone(), r)).collect()
    }
}

impl<'a, K> IntoIterator for &'a Placement<K> {
    type Item = &'a PackedRectangle<K>;
    type IntoIter = std::slice::Iter<'a, PackedRectangle<K>>;
    fn into_iter(self) -> Self::IntoIter {
        self.rects.iter()
    }
}

/// Statistics about packing efficiency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PackStats {
    /// Number of placed rectangles.
    pub num_rects: usize,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// `canvas_width * canvas_height`.
    pub canvas_area: u64,
    /// Sum of placed rectangle areas.
    pub used_area: u64,
    /// Occupancy ratio: used_area / canvas_area (0.0 to 1.0).
    /// Higher is better (less wasted space).
    pub occupancy: f64,
}

impl PackStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Rects: {}, Canvas: {}x{}, Occupancy: {:.2}%, Canvas Area: {} px², Used Area: {} px²",
            self.num_rects,
            self.canvas_width,
            self.canvas_height,
            self.occupancy * 100.0,
            self.canvas_area,
            self.used_area,
        )
    }

    /// Returns wasted space in pixels.
    pub fn wasted_area(&self) -> u64 {
        self.canvas_area.saturating_sub(self.used_area)
    }

    /// Returns wasted space as a percentage (0.0 to 100.0).
    pub fn waste_percentage(&self) -> f64 {
        if self.canvas_area > 0 {
            (self.wasted_area() as f64 / self.canvas_area as f64) * 100.0
        } else {
            0.0
        }
    }
}
