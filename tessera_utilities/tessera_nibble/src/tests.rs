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

use crate::{
    decode, decode_str, encode, encode_to_string, encoded_len, try_encode, InvalidCodeUnit,
    NibbleOutOfRange, LONE_MARKER,
};

#[test]
fn empty_input() {
    assert!(encode(Vec::<u8>::new()).is_empty());
    assert!(decode(Vec::<u16>::new()).is_empty());
    assert!(encode_to_string(Vec::<u8>::new()).is_empty());
}

#[test]
fn single_nibble() {
    let units = encode([5u8]);
    assert_eq!(units, vec![LONE_MARKER | 0x50]);
    assert_eq!(decode(&units), vec![5]);
}

#[test]
fn pair_of_nibbles() {
    let units = encode([1u8, 2]);
    assert_eq!(units, vec![0x0012]);
    assert_eq!(decode(&units), vec![1, 2]);
}

#[test]
fn odd_length_ends_with_lone_unit() {
    let units = encode([1u8, 2, 3]);
    assert_eq!(units, vec![0x0012, 0x0F30]);
    assert_eq!(decode(&units), vec![1, 2, 3]);
}

#[test]
fn pairs_leave_high_byte_clear() {
    let units = encode([15u8, 15, 0, 0, 0, 15]);
    assert_eq!(units, vec![0x00FF, 0x0000, 0x000F]);
    assert!(units.iter().all(|unit| unit & 0xFF00 == 0));
}

#[test]
fn zero_nibbles_are_kept() {
    for input in [vec![0u8], vec![0, 0], vec![0, 5], vec![5, 0, 0]] {
        assert_eq!(decode(encode(input.clone())), input);
    }
    assert_eq!(encode([0u8]), vec![0x0F00]);
}

#[test]
fn out_of_range_values_are_masked() {
    assert_eq!(encode([20u32]), vec![0x0F40]);
    assert_eq!(decode(encode([20u32])), vec![4]);
    assert_eq!(decode(encode([16u32, 0x1FF, 7])), vec![0, 15, 7]);
}

#[test]
fn round_trip_all_values() {
    let input = (0u8..16).chain((0u8..16).rev()).chain([9]).collect::<Vec<_>>();
    let units = encode(input.iter().copied());
    assert_eq!(units.len(), encoded_len(input.len()));
    assert_eq!(decode(&units), input);
}

#[test]
fn decoding_is_per_unit() {
    // A lone unit in the middle of the sequence is still a single nibble.
    let units = [0x0012u16, 0x0F30, 0x0045];
    assert_eq!(decode(units), vec![1, 2, 3, 4, 5]);
}

#[test]
fn encoded_lengths() {
    assert_eq!(encoded_len(0), 0);
    assert_eq!(encoded_len(1), 1);
    assert_eq!(encoded_len(2), 1);
    assert_eq!(encoded_len(3), 2);
    assert_eq!(encoded_len(10), 5);
}

#[test]
fn strict_encoding() {
    assert_eq!(try_encode([1u8, 2, 3]), Ok(vec![0x0012, 0x0F30]));
    assert_eq!(try_encode(Vec::<u8>::new()), Ok(vec![]));

    let result = try_encode([1u32, 15, 16, 40]);
    assert_eq!(result, Err(NibbleOutOfRange { index: 2, value: 16 }));

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Value 16 at index 2 is not a valid nibble.");
}

#[test]
fn string_form() {
    let packed = encode_to_string([1u8, 2, 3]);
    assert_eq!(packed.chars().count(), 2);
    assert_eq!(packed, ['\u{12}', '\u{F30}'].iter().collect::<String>());
    assert_eq!(decode_str(&packed), Ok(vec![1, 2, 3]));
}

#[test]
fn string_form_rejects_wide_chars() {
    let packed = format!("{}{}", encode_to_string([1u8, 2]), '\u{1F600}');
    assert_eq!(
        decode_str(&packed),
        Err(InvalidCodeUnit {
            index: 1,
            found: '\u{1F600}'
        })
    );
}

#[test]
fn signed_and_wide_values_are_masked() {
    assert_eq!(decode(encode([-1i32, 20])), vec![15, 4]);
    assert_eq!(decode(encode([-16i64, -15, 0x1_0000_0003])), vec![0, 1, 3]);
    assert_eq!(decode(encode([31usize, 7])), vec![15, 7]);
    assert_eq!(decode(encode([-128i8])), vec![0]);
}

#[test]
fn encode_from_references() {
    let input = vec![4i64, 9, 2];
    assert_eq!(encode(&input), encode(input.iter().copied()));
    assert_eq!(decode(encode(&input)), vec![4, 9, 2]);
}

#[test]
fn strict_encoding_rejects_negative_values() {
    assert_eq!(try_encode([0i32, 15, 3]), Ok(vec![0x000F, 0x0F30]));
    assert_eq!(
        try_encode([3i32, -1]),
        Err(NibbleOutOfRange {
            index: 1,
            value: -1
        })
    );
    assert_eq!(
        try_encode([u64::MAX]),
        Err(NibbleOutOfRange {
            index: 0,
            value: i128::from(u64::MAX)
        })
    );
}

#[test]
fn string_form_has_one_char_per_unit() {
    let input = [15u8; 7];
    let packed = encode_to_string(input);
    assert_eq!(packed.chars().count(), encoded_len(input.len()));
    assert!(packed.chars().all(|c| c != char::REPLACEMENT_CHARACTER));
    assert_eq!(decode_str(&packed), Ok(input.to_vec()));
}
