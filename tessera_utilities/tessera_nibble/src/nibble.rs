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

use crate::NIBBLE_MASK;

mod private {
    pub trait Sealed {}
}

/// Integer types that can be packed by [`crate::encode`]. Only the low 4 bits of a value are
/// packed; negative values contribute the low bits of their two's complement representation.
pub trait Nibble: private::Sealed + Copy {
    /// The low 4 bits of the value.
    fn low_bits(self) -> u16;

    /// The value itself, widened so that it can be reported.
    fn value(self) -> i128;
}

macro_rules! impl_nibble {
    ($($t:ty),*) => {
        $(
            impl private::Sealed for $t {}

            impl Nibble for $t {
                #[inline]
                fn low_bits(self) -> u16 {
                    (self as u16) & NIBBLE_MASK
                }

                #[inline]
                fn value(self) -> i128 {
                    self as i128
                }
            }
        )*
    };
}

impl_nibble!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl<T: Nibble> private::Sealed for &T {}

impl<T: Nibble> Nibble for &T {
    #[inline]
    fn low_bits(self) -> u16 {
        (*self).low_bits()
    }

    #[inline]
    fn value(self) -> i128 {
        (*self).value()
    }
}
