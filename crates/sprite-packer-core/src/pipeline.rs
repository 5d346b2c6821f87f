use crate::config::PackerConfig;
use crate::error::Result;
use crate::model::Placement;
use crate::packer::GrowingPacker;
use tracing::instrument;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Registers `(key, width, height)` inputs and packs them in one call.
///
/// Fails on the first zero-sized input; nothing is packed in that case.
#[instrument(skip_all)]
pub fn pack_layout<K>(inputs: Vec<(K, u32, u32)>, cfg: PackerConfig) -> Result<Placement<K>> {
    let mut packer = GrowingPacker::new(cfg);
    for (key, w, h) in inputs {
        packer.register(w, h, key)?;
    }
    packer.pack()
}

/// Packs independent sheets, each with its own packer and config.
///
/// Results are returned in input order; a failing sheet does not affect the
/// others. With the `parallel` feature sheets are packed on the rayon pool.
#[instrument(skip_all, fields(sheets = sheets.len()))]
pub fn pack_sheets<K: Send>(sheets: Vec<GrowingPacker<K>>) -> Vec<Result<Placement<K>>> {
    #[cfg(feature = "parallel")]
    {
        sheets.into_par_iter().map(GrowingPacker::pack).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        sheets.into_iter().map(GrowingPacker::pack).collect()
    }
}
