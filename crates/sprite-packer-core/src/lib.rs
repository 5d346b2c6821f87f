//! Rectangle packing engine for CSS spritesheets.
//!
//! - Algorithm: growing binary split tree. The canvas starts at the largest
//!   rectangle and grows right or down whenever nothing fits, keeping the
//!   sheet close to square.
//! - Ordering: longest side, then shortest side, then registration order, so
//!   the same input always yields the same sheet.
//! - The engine only sees integer sizes and opaque ids; decoding, drawing and
//!   CSS emission belong to the caller (see the `sprite-packer-cli` crate).
//!
//! Quick example:
//! ```
//! use sprite_packer_core::{GrowingPacker, PackerConfig};
//! # fn main() -> sprite_packer_core::Result<()> {
//! let mut packer = GrowingPacker::new(PackerConfig::default());
//! packer.register(10, 10, "a")?;
//! packer.register(10, 10, "b")?;
//! packer.register(20, 10, "c")?;
//! let placement = packer.pack()?;
//! assert_eq!((placement.canvas_width, placement.canvas_height), (20, 20));
//! # Ok(()) }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod packer;
pub mod pipeline;
pub mod registry;

pub use config::*;
pub use error::*;
pub use export::*;
pub use model::*;
pub use packer::*;
pub use pipeline::*;
pub use registry::*;

/// Convenience prelude for common types and functions.
/// Importing `sprite_packer_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{PackerConfig, PackerConfigBuilder};
    pub use crate::error::{PackError, Result};
    pub use crate::model::{PackStats, PackedRectangle, Placement, Rect, Rectangle};
    pub use crate::packer::{GrowDirection, GrowingPacker, Packer, SplitTree, sort_for_packing};
    pub use crate::registry::RectangleRegistry;
    pub use crate::{pack_layout, pack_sheets, to_json_array, to_json_hash};
}
