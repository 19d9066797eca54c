//! Power-law (gamma) lookup tables for 8-bit values.

use crate::error::Error;

/// Number of entries in a table: one per 8-bit input value.
pub const TABLE_LEN: usize = 256;

/// Maps an 8-bit input value to its gamma-corrected 8-bit output.
pub type GammaTable = [u8; TABLE_LEN];

/// Builds the table `T[i] = round((i / 255)^gamma * 255)`, clamped to
/// [0, 255].
///
/// Rounding is half-up (add 0.5 and truncate) rather than `f64::round()`
/// or banker's rounding, so the output matches existing reference tables
/// bit for bit.
pub fn build_gamma_table(gamma: f64) -> Result<GammaTable, Error> {
    // Written this way round so that NaN is rejected too.
    if !(gamma > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "gamma must be > 0 (got {})",
            gamma
        )));
    }

    let mut table = [0u8; TABLE_LEN];
    for (i, v) in table.iter_mut().enumerate() {
        *v = gamma_value(gamma, i as u8);
    }

    log::debug!(
        "Built gamma table: gamma = {}, mid-point {} -> {}",
        gamma,
        TABLE_LEN / 2,
        table[TABLE_LEN / 2]
    );

    Ok(table)
}

/// A single table entry.  `gamma` is assumed to be positive.
#[inline]
pub fn gamma_value(gamma: f64, input: u8) -> u8 {
    let x = input as f64 / 255.0;
    let y = x.powf(gamma);
    let v = (y * 255.0 + 0.5).trunc();

    v.max(0.0).min(255.0) as u8
}
