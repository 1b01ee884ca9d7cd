/// Integer division rounding towards negative infinity.
///
/// `floor_div(-1, 256) == -1`, unlike `-1 / 256 == 0`.
pub(crate) fn floor_div(n: i64, d: i64) -> i64 {
    debug_assert!(d > 0);
    n.div_euclid(d)
}

/// Bit-level square root approximation.
///
/// Halves the exponent by shifting the raw IEEE-754 bits and re-biasing. Relative error stays
/// below ~6.1% for positive finite inputs; `0.0` maps to `0.0` exactly.
pub(crate) fn fast_sqrt(z: f32) -> f32 {
    if z <= 0.0 {
        return 0.0;
    }
    let mut bits = z.to_bits() as i32;
    bits -= 1 << 23;
    bits >>= 1;
    bits += 1 << 29;
    f32::from_bits(bits as u32)
}

/// Map a value in `[0, 1]` to a byte, truncating like a plain float-to-int cast.
pub(crate) fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
