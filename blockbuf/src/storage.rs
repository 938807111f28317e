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

use std::cmp::min;
use std::mem::size_of;
use std::ops::Range;
use all_asserts::{assert_le, debug_assert_le};
use log::{debug, trace};
use crate::{Frames, Sample};

/// Read and write positions into [`Storage`], in frames.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Cursor {
	/// The offset of unread data, advanced while extracting blocks.
	read: usize,
	/// The offset of the next free frame, advanced while writing.
	write: usize,
}

impl Cursor {
	pub fn read(&self) -> usize { self.read }
	pub fn write(&self) -> usize { self.write }
	/// Returns the number of unread frames.
	pub fn count(&self) -> usize { self.write - self.read }
	fn range(&self) -> Range<usize> { self.read..self.write }

	/// Moves the read position forward by `count` frames, stopping at the write
	/// position.
	pub fn consume(&mut self, count: usize) -> usize {
		self.read = min(self.read.saturating_add(count), self.write);
		self.read
	}

	fn grow(&mut self, count: usize) {
		self.write += count;
	}

	fn shift(&mut self) {
		self.write -= self.read;
		self.read = 0;
	}

	fn reset(&mut self) {
		*self = Self::default();
	}
}

/// Planar sample memory: one lane of `capacity` frames per channel, laid out back
/// to back in a single allocation.
pub(crate) struct Storage<T: Sample> {
	data: Box<[T]>,
	channels: usize,
	capacity: usize,
	cursor: Cursor,
}

impl<T: Sample> Storage<T> {
	pub fn new(channels: usize, capacity: usize) -> Self {
		Self {
			data: alloc_lanes(channels, capacity),
			channels,
			capacity,
			cursor: Cursor::default(),
		}
	}

	pub fn channels(&self) -> usize { self.channels }
	/// Returns the number of frames each lane can hold.
	pub fn capacity(&self) -> usize { self.capacity }
	pub fn cursor(&self) -> Cursor { self.cursor }
	/// Returns the number of unread frames.
	pub fn count(&self) -> usize { self.cursor.count() }
	/// Returns the number of frames that can be written before compacting.
	pub fn limit(&self) -> usize { self.capacity - self.cursor.write }
	/// Returns the number of frames that can be written after compacting.
	pub fn free(&self) -> usize { self.capacity - self.count() }

	/// Moves the unread frames of every lane to its start, freeing the space behind
	/// the read position for writing.
	pub fn compact(&mut self) {
		let Cursor { read, write } = self.cursor;
		if read == 0 { return }

		for lane in self.data.chunks_exact_mut(self.capacity) {
			lane.copy_within(read..write, 0);
		}
		self.cursor.shift();
		trace!("compacted {} unread frame(s) from offset {read}", write - read);
	}

	/// Doubles the capacity until it holds at least `min_capacity` frames, moving
	/// the unread frames to the start of the new lanes. Past the largest capacity
	/// that can be allocated, grows to exactly `min_capacity` instead. Returns
	/// `false` and leaves the storage unchanged if even that can't be allocated.
	#[must_use]
	pub fn grow(&mut self, min_capacity: usize) -> bool {
		let mut capacity = self.capacity;
		while capacity < min_capacity {
			capacity = capacity.saturating_mul(2);
		}

		if capacity == self.capacity {
			self.compact();
			return true
		}

		if !lanes_fit::<T>(self.channels, capacity) {
			capacity = min_capacity;
			if !lanes_fit::<T>(self.channels, capacity) {
				return false
			}
		}

		let range = self.cursor.range();
		let count = range.len();
		let mut data = alloc_lanes(self.channels, capacity);
		let lanes = self.data.chunks_exact(self.capacity);
		for (target, lane) in data.chunks_exact_mut(capacity).zip(lanes) {
			target[..count].copy_from_slice(&lane[range.clone()]);
		}

		debug!("grew buffer from {} to {capacity} frame(s) per channel", self.capacity);
		self.data = data;
		self.capacity = capacity;
		self.cursor.shift();
		true
	}

	/// Copies `count` frames into each lane at the write position. The frames must
	/// have the same channel count as the storage, and fit within [`Self::limit`].
	pub fn write(&mut self, frames: &(impl Frames<T> + ?Sized), count: usize) {
		assert_le!(count, self.limit());

		let write = self.cursor.write;
		for (channel, lane) in self.data.chunks_exact_mut(self.capacity).enumerate() {
			frames.copy_channel(channel, &mut lane[write..write + count]);
		}
		self.cursor.grow(count);
		debug_assert_le!(self.cursor.write, self.capacity);
	}

	/// Discards all unread frames.
	pub fn clear(&mut self) {
		self.cursor.reset();
	}

	/// Returns a lane of `range` frames for `channel`.
	#[cfg(test)]
	fn lane(&self, channel: usize, range: Range<usize>) -> &[T] {
		&self.data[channel * self.capacity..][range]
	}

	/// Splits the storage into its memory and cursor, allowing the cursor to move
	/// while the memory is borrowed.
	pub fn split(&mut self) -> (&[T], &mut Cursor) {
		(&*self.data, &mut self.cursor)
	}
}

/// Returns `true` if `channels` lanes of `capacity` samples fit in one allocation.
pub(crate) fn lanes_fit<T>(channels: usize, capacity: usize) -> bool {
	channels.checked_mul(capacity)
		.and_then(|len| len.checked_mul(size_of::<T>()))
		.is_some_and(|size| size <= isize::MAX as usize)
}

fn alloc_lanes<T: Sample>(channels: usize, capacity: usize) -> Box<[T]> {
	debug_assert!(lanes_fit::<T>(channels, capacity));
	vec![T::zero(); channels * capacity].into_boxed_slice()
}

#[cfg(test)]
mod test {
	use super::{lanes_fit, Cursor, Storage};

	fn filled(channels: usize, capacity: usize, frames: &[[i32; 2]]) -> Storage<i32> {
		let mut storage = Storage::new(channels, capacity);
		storage.write(frames, frames.len());
		storage
	}

	#[test]
	fn consume_stops_at_write() {
		let mut cursor = Cursor { read: 0, write: 5 };
		assert_eq!(cursor.consume(3), 3);
		assert_eq!(cursor.consume(3), 5);
		assert_eq!(cursor.count(), 0);
	}

	#[test]
	fn write_is_planar() {
		let storage = filled(2, 4, &[[1, -1], [2, -2], [3, -3]]);
		assert_eq!(storage.lane(0, 0..3), [1, 2, 3]);
		assert_eq!(storage.lane(1, 0..3), [-1, -2, -3]);
		assert_eq!(storage.limit(), 1);
	}

	#[test]
	fn compact_moves_unread_frames() {
		let mut storage = filled(2, 4, &[[1, -1], [2, -2], [3, -3], [4, -4]]);
		storage.cursor.consume(3);
		assert_eq!(storage.limit(), 0);
		assert_eq!(storage.free(), 3);

		storage.compact();
		assert_eq!(storage.cursor(), Cursor { read: 0, write: 1 });
		assert_eq!(storage.lane(0, 0..1), [4]);
		assert_eq!(storage.lane(1, 0..1), [-4]);
		assert_eq!(storage.limit(), 3);
	}

	#[test]
	fn grow_doubles_and_keeps_unread_frames() {
		let mut storage = filled(2, 3, &[[1, -1], [2, -2], [3, -3]]);
		storage.cursor.consume(1);

		assert!(storage.grow(9));
		assert_eq!(storage.capacity(), 12);
		assert_eq!(storage.cursor(), Cursor { read: 0, write: 2 });
		assert_eq!(storage.lane(0, 0..2), [2, 3]);
		assert_eq!(storage.lane(1, 0..2), [-2, -3]);
	}

	#[test]
	fn grow_past_addressable_size_fails() {
		let mut storage = filled(2, 4, &[[1, -1], [2, -2]]);
		assert!(!storage.grow(usize::MAX / 2 + 1));
		assert_eq!(storage.capacity(), 4);
		assert_eq!(storage.cursor(), Cursor { read: 0, write: 2 });
		assert_eq!(storage.lane(1, 0..2), [-1, -2]);
	}

	#[test]
	fn lane_size_limits() {
		assert!(lanes_fit::<i32>(4, 1024));
		assert!(!lanes_fit::<i32>(4, 1 << 62));
		assert!(!lanes_fit::<i32>(1, 1 << 62));
		assert!(lanes_fit::<u8>(1, 1 << 62));
	}

	#[test]
	fn clear_keeps_capacity() {
		let mut storage = filled(2, 4, &[[1, -1], [2, -2]]);
		storage.clear();
		assert_eq!(storage.count(), 0);
		assert_eq!(storage.limit(), 4);
	}
}
