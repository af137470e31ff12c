//! Numeric semantics of a single pixel channel.
//!
//! The decodable signs are UNorm, UInt and Float (widths 32/16/11/10);
//! everything else in the [`Sign`] enum is recognized and carried by the
//! descriptor but has no conversion path.
//!
//! The 16/11/10-bit float paths share one construction: the f32 exponent
//! field is rebased by `0x3800_0000` (bias 127 → 15) and the mantissa is
//! truncated to the target width. Zero, NaN and the infinities are
//! special-cased on both directions.

use crate::error::ConvertError;
use crate::pixel_format::Sign;

// f32 bit layout:
//   Float bits => SEEEEEEE EFFFFFFF FFFFFFFF FFFFFFFF
//   Half bits  =>                   SEEEEEFF FFFFFFFF
//   11 bits    =>                        EEE EEFFFFFF
//   10 bits    =>                         EE EEEFFFFF
const F32_EXP_MASK: u32 = 0x7f80_0000;
const F32_MANT_MASK: u32 = 0x007f_ffff;
const EXP_REBASE: u32 = 0x3800_0000;

fn channel_mask(bits: u32) -> u32 {
    if bits < 32 {
        (1u32 << bits) - 1
    } else {
        u32::MAX
    }
}

/// Decodes `bits` raw channel bits into a float.
pub fn channel_to_float(value: u32, bits: u32, sign: Sign) -> Result<f32, ConvertError> {
    let mask = channel_mask(bits);
    let value = value & mask;
    match sign {
        Sign::UNorm => Ok(value as f32 / mask as f32),
        Sign::UInt => Ok(value as f32),
        Sign::Float => match bits {
            32 => Ok(f32::from_bits(value)),
            16 => Ok(decode_small_float(value, 10, 0x8000)),
            11 => Ok(decode_small_float(value, 6, 0)),
            10 => Ok(decode_small_float(value, 5, 0)),
            _ => Err(ConvertError::UnsupportedConversion),
        },
        _ => Err(ConvertError::UnsupportedConversion),
    }
}

/// Encodes a float into `bits` raw channel bits.
pub fn channel_from_float(value: f32, bits: u32, sign: Sign) -> Result<u32, ConvertError> {
    let mask = channel_mask(bits);
    match sign {
        Sign::UNorm => {
            let clamped = value.clamp(0.0, 1.0);
            Ok(libm::roundf(clamped * mask as f32) as u32)
        }
        Sign::UInt => {
            if value <= 0.0 {
                Ok(0)
            } else if value >= mask as f32 {
                Ok(mask)
            } else {
                Ok(value as u32)
            }
        }
        Sign::Float => match bits {
            32 => Ok(value.to_bits()),
            16 => Ok(encode_small_float(value, 10, true)),
            11 => Ok(encode_small_float(value, 6, false)),
            10 => Ok(encode_small_float(value, 5, false)),
            _ => Err(ConvertError::UnsupportedConversion),
        },
        _ => Err(ConvertError::UnsupportedConversion),
    }
}

/// Decodes an unsigned-or-half mini-float with a 5-bit exponent and
/// `mant_bits` mantissa bits. `sign_bit` is 0 for the signless widths.
fn decode_small_float(value: u32, mant_bits: u32, sign_bit: u32) -> f32 {
    let exp_mask = 0x1fu32 << mant_bits;
    let mant_mask = (1u32 << mant_bits) - 1;
    let sign = if sign_bit != 0 && (value & sign_bit) != 0 {
        0x8000_0000
    } else {
        0
    };
    if value & (exp_mask | mant_mask) == 0 {
        return f32::from_bits(sign);
    }
    if value & exp_mask == exp_mask {
        // Exponent all ones: infinity when the mantissa is clear, NaN otherwise.
        return if value & mant_mask == 0 {
            f32::from_bits(sign | F32_EXP_MASK)
        } else {
            f32::NAN
        };
    }
    let shift = 23 - mant_bits;
    let exp = (((value & exp_mask) << shift).wrapping_add(EXP_REBASE)) & F32_EXP_MASK;
    let mant = ((value & mant_mask) << shift) & F32_MANT_MASK;
    f32::from_bits(sign | exp | mant)
}

/// Encodes into a mini-float with a 5-bit exponent and `mant_bits`
/// mantissa bits. NaN encodes as all-ones; the signless widths clamp the
/// sign away (negative inputs are not representable).
fn encode_small_float(value: f32, mant_bits: u32, signed: bool) -> u32 {
    let exp_mask = 0x1fu32 << mant_bits;
    if value == 0.0 {
        return 0;
    }
    if value.is_nan() {
        return !0u32;
    }
    if value.is_infinite() {
        return if signed && value < 0.0 {
            exp_mask | (0x20 << mant_bits)
        } else {
            exp_mask
        };
    }
    let bits = value.to_bits();
    let shift = 23 - mant_bits;
    let sign = if signed { (bits >> 16) & 0x8000 } else { 0 };
    let exp = ((bits & F32_EXP_MASK).wrapping_sub(EXP_REBASE) >> shift) & exp_mask;
    let mant = (bits >> shift) & ((1u32 << mant_bits) - 1);
    sign | exp | mant
}
