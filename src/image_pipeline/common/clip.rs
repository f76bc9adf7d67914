//! Sample clamping for 16-bit intermediate pixel data.

/// Largest representable intermediate sample.
pub const MAXVAL: i32 = 0xffff;

/// Largest value representable with `bits` bits per sample.
#[inline]
pub const fn max_value(bits: u32) -> i32 {
    ((1u32 << bits) - 1) as i32
}

/// Clamp an integer result into `[0, MAXVAL]`.
#[inline(always)]
pub fn clip(v: i32) -> u16 {
    v.clamp(0, MAXVAL) as u16
}

/// Clamp a float result into `[0, MAXVAL]` and truncate toward zero.
#[inline(always)]
pub fn clip_f64(v: f64) -> u16 {
    if v > 0.0 {
        if v < MAXVAL as f64 { v as u16 } else { MAXVAL as u16 }
    } else {
        0
    }
}

/// Clamp into the range of a `bits`-deep sample (1..=16).
#[inline]
pub fn clip_bits(v: i32, bits: u32) -> u16 {
    debug_assert!((1..=16).contains(&bits), "bit depth {bits} out of range");
    v.clamp(0, max_value(bits)) as u16
}
