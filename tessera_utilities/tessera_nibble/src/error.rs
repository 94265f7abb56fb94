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

use thiserror::Error;

/// A value passed to [`crate::try_encode`] did not fit into 4 bits.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Value {value} at index {index} is not a valid nibble.")]
pub struct NibbleOutOfRange {
    pub index: usize,
    pub value: i128,
}

/// A character in a packed string cannot be a 16-bit code unit.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Character {found:?} at index {index} is not a valid code unit.")]
pub struct InvalidCodeUnit {
    pub index: usize,
    pub found: char,
}
