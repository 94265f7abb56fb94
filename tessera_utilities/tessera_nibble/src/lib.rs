// Copyright 2015-2024 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # 4-bit Packing
//!
//! Packs a sequence of 4-bit values (nibbles) into 16-bit code units, two nibbles to a unit. The
//! first nibble of a pair occupies bits 4-7 and the second bits 0-3, leaving the high byte clear.
//! If the input has an odd length, the final nibble is written alone in bits 4-7 with the high
//! byte set to [`LONE_MARKER`] so that it can be told apart from a pair on decoding.
//!
//! [`encode`] keeps only the low 4 bits of each value so values above 15 do not survive a round
//! trip. Use [`try_encode`] to reject them instead.
//!
//! ```
//! use tessera_nibble::{decode, encode};
//!
//! let units = encode([1u8, 2, 3]);
//! assert_eq!(units, vec![0x0012, 0x0F30]);
//! assert_eq!(decode(&units), vec![1, 2, 3]);
//! ```

use std::borrow::Borrow;

mod error;
mod nibble;

pub use error::{InvalidCodeUnit, NibbleOutOfRange};
pub use nibble::Nibble;

#[cfg(test)]
mod tests;

/// Selects the low 4 bits of a value.
pub const NIBBLE_MASK: u16 = 0x0F;

/// High byte pattern marking a unit that holds a single nibble.
pub const LONE_MARKER: u16 = 0x0F00;

const HIGH_NIBBLE: u16 = 0x00F0;
const LOW_NIBBLE: u16 = 0x000F;

/// The number of code units that [`encode`] produces for `num_nibbles` values.
pub const fn encoded_len(num_nibbles: usize) -> usize {
    num_nibbles / 2 + num_nibbles % 2
}

#[inline]
fn pair_unit(first: u16, second: u16) -> u16 {
    (first << 4) | second
}

#[inline]
fn lone_unit(nibble: u16) -> u16 {
    LONE_MARKER | (nibble << 4)
}

fn pack<I>(nibbles: I) -> Vec<u16>
where
    I: Iterator<Item = u16>,
{
    let mut units = Vec::with_capacity(encoded_len(nibbles.size_hint().0));
    let mut pending = None;
    for nibble in nibbles {
        match pending.take() {
            Some(first) => units.push(pair_unit(first, nibble)),
            None => pending = Some(nibble),
        }
    }
    if let Some(last) = pending {
        units.push(lone_unit(last));
    }
    units
}

/// Pack a sequence of nibbles into 16-bit code units. Only the low 4 bits of each value are used.
pub fn encode<I>(nibbles: I) -> Vec<u16>
where
    I: IntoIterator,
    I::Item: Nibble,
{
    pack(nibbles.into_iter().map(Nibble::low_bits))
}

/// Pack a sequence of nibbles into 16-bit code units, failing if any value does not fit into 4
/// bits. Negative values are rejected.
pub fn try_encode<I>(nibbles: I) -> Result<Vec<u16>, NibbleOutOfRange>
where
    I: IntoIterator,
    I::Item: Nibble,
{
    let values = nibbles
        .into_iter()
        .enumerate()
        .map(|(index, n)| {
            let value = n.value();
            if (0..=i128::from(NIBBLE_MASK)).contains(&value) {
                Ok(n.low_bits())
            } else {
                Err(NibbleOutOfRange { index, value })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(pack(values.into_iter()))
}

/// Unpack a sequence of 16-bit code units into nibbles. Each unit is interpreted independently of
/// the others: a unit with the [`LONE_MARKER`] bits set produces one nibble and any other unit
/// produces two.
pub fn decode<I>(units: I) -> Vec<u8>
where
    I: IntoIterator,
    I::Item: Borrow<u16>,
{
    let units = units.into_iter();
    let mut nibbles = Vec::with_capacity(units.size_hint().0 * 2);
    for unit in units {
        let unit = *unit.borrow();
        let high = ((unit & HIGH_NIBBLE) >> 4) as u8;
        if unit & LONE_MARKER == LONE_MARKER {
            nibbles.push(high);
        } else {
            nibbles.push(high);
            nibbles.push((unit & LOW_NIBBLE) as u8);
        }
    }
    nibbles
}

/// Pack a sequence of nibbles into a string with one character per code unit.
pub fn encode_to_string<I>(nibbles: I) -> String
where
    I: IntoIterator,
    I::Item: Nibble,
{
    encode(nibbles).into_iter().map(unit_to_char).collect()
}

fn unit_to_char(unit: u16) -> char {
    // Packed units never exceed 0x0FFF, which is below the surrogate range.
    debug_assert!(unit <= 0x0FFF);
    char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Unpack a string produced by [`encode_to_string`]. Fails if the string contains a character
/// that cannot be a 16-bit code unit.
pub fn decode_str(packed: &str) -> Result<Vec<u8>, InvalidCodeUnit> {
    let units = packed
        .chars()
        .enumerate()
        .map(|(index, c)| {
            u16::try_from(u32::from(c)).map_err(|_| InvalidCodeUnit { index, found: c })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(decode(units))
}
