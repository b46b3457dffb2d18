//! Fixed-point arithmetic in canonical units (1.0 == 10^18).
//!
//! Every multiply floors its result. Values are non-negative; a negative
//! operand or any overflow of `i128` yields `None` so callers can surface a
//! single overflow error at the contract boundary.

/// One whole unit (100 % when used as a rate).
pub const SCALE: i128 = 1_000_000_000_000_000_000;

/// `⌊a · b / SCALE⌋`, exact for all non-negative inputs whose result fits in
/// `i128`.
///
/// Both operands are split into whole and fractional parts
/// (`a = a_h·SCALE + a_l`), so only the fractional product is divided and no
/// intermediate wider than the result is needed.
pub fn mul_floor(a: i128, b: i128) -> Option<i128> {
    if a < 0 || b < 0 {
        return None;
    }
    let (a_h, a_l) = (a / SCALE, a % SCALE);
    let (b_h, b_l) = (b / SCALE, b % SCALE);

    // a_l, b_l < 10^18, so a_l * b_l < 10^36 always fits.
    let fractional = a_l * b_l / SCALE;

    a_h.checked_mul(b_h)?
        .checked_mul(SCALE)?
        .checked_add(a_h.checked_mul(b_l)?)?
        .checked_add(a_l.checked_mul(b_h)?)?
        .checked_add(fractional)
}

/// `base ^ exp` in fixed point, flooring after every multiply.
///
/// Square-and-multiply, least significant bit first. The trailing squaring is
/// skipped, so for `base >= SCALE` no intermediate exceeds the final result.
pub fn pow_floor(base: i128, exp: u64) -> Option<i128> {
    if base < 0 {
        return None;
    }
    let mut result = SCALE;
    let mut factor = base;
    let mut remaining = exp;
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = mul_floor(result, factor)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            factor = mul_floor(factor, factor)?;
        }
    }
    Some(result)
}

/// Per-block growth factor `1 + rate`.
pub fn growth_factor(rate_per_block: i128) -> Option<i128> {
    if rate_per_block < 0 {
        return None;
    }
    SCALE.checked_add(rate_per_block)
}
