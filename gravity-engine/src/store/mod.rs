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
//! Entity store
//!
//! Owns the data model: body handles, the body type and its components,
//! and the [`World`] that stores bodies in an arena and steps them.

mod body;
mod components;
mod handle;
mod world;

pub use body::Body;
pub use components::{Acceleration, Color, MergeAnimation, Position, Velocity, PALETTE};
pub use handle::BodyId;
pub use world::{SceneSnapshot, StepStats, World};
