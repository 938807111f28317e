// Copyright 2023 Strixpyrr
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

//! ## How it works
//!
//! Samples are written to a single preallocated block of memory, one *lane* per
//! channel, and read back as fixed-size *blocks*. Two cursors track the data: a
//! write cursor where the next frame lands, and a read cursor where the next block
//! starts. Extracting a block moves the read cursor forward by the *hop size*; when
//! the hop is smaller than the block size, consecutive blocks overlap.
//!
//! ```
//! use blockbuf::BlockBuffer;
//!
//! let mut buffer = BlockBuffer::<f32>::new(4, 2)?;
//! buffer.extend(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
//!
//! let blocks: Vec<Vec<f32>> = buffer.blocks()
//! 	.map(|block| block.channel(0).to_vec())
//! 	.collect();
//! assert_eq!(blocks, [[1.0, 2.0, 3.0, 4.0], [3.0, 4.0, 5.0, 6.0]]);
//! # Ok::<(), blockbuf::Error>(())
//! ```
//!
//! ### Compaction
//!
//! Memory behind the read cursor is dead. Rather than wrapping around like a ring
//! buffer, the unread frames are moved back to the start of each lane when a write
//! would otherwise run past the end. This is a single `memmove` per channel, and
//! keeps every block contiguous so it can be borrowed directly instead of copied.
//!
//! ### Capacity
//!
//! A [`Fixed`](Capacity::Fixed) buffer never allocates after construction; writes
//! that cannot fit even after compaction fail with an overflow error, leaving the
//! buffer untouched. This is the mode to use on a real-time audio thread. An
//! [`Elastic`](Capacity::Elastic) buffer instead doubles its capacity until the
//! write fits, allocating and copying, so it should be kept off latency-critical
//! paths.
//!
//! ### Threads
//!
//! Nothing is synchronized internally. Writing and extracting both borrow the
//! buffer mutably, so one producer and one consumer must take turns; handing the
//! buffer across threads needs an outside lock or channel.

mod buffer;
mod block;
mod error;
mod frames;
mod sample;
mod storage;

pub use buffer::*;
pub use block::*;
pub use error::*;
pub use frames::*;
pub use sample::*;

/// The default capacity, in blocks, of a buffer without an explicit capacity.
pub const DEFAULT_CAPACITY_BLOCKS: usize = 64;
