// Copyright 2025 John Brosnihan
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
//! Body handles
//!
//! Bodies are addressed through lightweight generational handles rather than
//! references, so a handle to a body that was merged away or culled simply
//! stops resolving instead of dangling.

use std::fmt;

/// Handle to a body in a [`World`](crate::World)
///
/// The slot index locates the body in the store's slot table; the generation
/// distinguishes successive occupants of the same slot. Generations come from
/// a store-wide counter, so a handle is never reissued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId {
    slot: u32,
    generation: u32,
}

impl BodyId {
    /// Create a handle from a slot index and generation
    pub fn new(slot: u32, generation: u32) -> Self {
        BodyId { slot, generation }
    }

    /// Get the slot index
    pub fn slot(&self) -> u32 {
        self.slot
    }

    /// Get the generation number
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Body({}, gen: {})", self.slot, self.generation)
    }
}
