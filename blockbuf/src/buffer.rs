// SPDX-License-Identifier: Apache-2.0

mod blocks;
mod options;

pub use blocks::*;
pub use options::*;

use std::fmt;
use std::fmt::{Debug, Formatter};
use log::debug;
use crate::{Block, ConfigError, Error, Frames, Result, Sample};
use crate::Operation::Extend;
use crate::storage::{lanes_fit, Storage};

/// A preallocated buffer of audio samples, written in runs of any length and read
/// in fixed-size, optionally overlapping blocks.
///
/// Writing with [`extend`](Self::extend) appends frames, compacting the buffer when
/// it runs out of room at the end. Reading with [`next_block`](Self::next_block) or
/// [`blocks`](Self::blocks) yields blocks while at least one block of unread frames
/// remains, moving forward by the hop size each time. Once exhausted, more blocks
/// become available as more frames are written.
///
/// With a [`Fixed`](Capacity::Fixed) capacity, neither writing nor reading ever
/// allocates.
pub struct BlockBuffer<T: Sample = f32> {
	storage: Storage<T>,
	block_size: usize,
	hop_size: usize,
	capacity_policy: Capacity,
}

impl<T: Sample> Debug for BlockBuffer<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("BlockBuffer")
			.field("block_size", &self.block_size)
			.field("hop_size", &self.hop_size)
			.field("channels", &self.channel_count())
			.field("capacity", &self.capacity())
			.field("capacity_policy", &self.capacity_policy)
			.field("read_position", &self.read_position())
			.field("write_position", &self.write_position())
			.finish_non_exhaustive()
	}
}

impl<T: Sample> BlockBuffer<T> {
	/// Creates a new single-channel, fixed-capacity buffer with the default
	/// capacity. Shorthand for:
	///
	/// ```ignore
	/// use blockbuf::BlockBufferOptions;
	///
	/// BlockBufferOptions::new(block_size)
	/// 	.with_hop_size(hop_size)
	/// 	.build()
	/// ```
	pub fn new(block_size: usize, hop_size: usize) -> Result<Self> {
		BlockBufferOptions::new(block_size)
			.with_hop_size(hop_size)
			.build()
	}

	/// Creates a new buffer from `options`, allocating its full capacity up front.
	pub fn with_options(options: BlockBufferOptions) -> Result<Self> {
		options.validate()?;

		let BlockBufferOptions {
			block_size,
			hop_size,
			channels,
			capacity_policy,
			..
		} = options;
		let capacity = options.capacity();
		if !lanes_fit::<T>(channels, capacity) {
			return Err(ConfigError::CapacityOverflow { channels, capacity }.into())
		}

		debug!(
			"created block buffer; {block_size} frame block(s) every {hop_size} frame(s), \
			{channels} channel(s), {capacity_policy} capacity of {capacity} frame(s)"
		);
		Ok(Self {
			storage: Storage::new(channels, capacity),
			block_size,
			hop_size,
			capacity_policy,
		})
	}

	/// Returns the number of frames per block.
	pub fn block_size(&self) -> usize { self.block_size }

	/// Returns the number of frames between the start of consecutive blocks.
	pub fn hop_size(&self) -> usize { self.hop_size }

	/// Returns the number of channels per frame.
	pub fn channel_count(&self) -> usize { self.storage.channels() }

	/// Returns the number of frames the buffer can hold without growing.
	pub fn capacity(&self) -> usize { self.storage.capacity() }

	/// Returns the capacity policy.
	pub fn capacity_policy(&self) -> Capacity { self.capacity_policy }

	/// Returns the options the buffer would be recreated with, including its current
	/// capacity.
	pub fn options(&self) -> BlockBufferOptions {
		BlockBufferOptions::new(self.block_size)
			.with_hop_size(self.hop_size)
			.with_channels(self.channel_count())
			.with_capacity(self.capacity())
			.with_capacity_policy(self.capacity_policy)
	}

	/// Returns the offset of the first unread frame.
	pub fn read_position(&self) -> usize { self.storage.cursor().read() }

	/// Returns the offset the next frame will be written to.
	pub fn write_position(&self) -> usize { self.storage.cursor().write() }

	/// Returns the number of unread frames.
	pub fn available(&self) -> usize { self.storage.count() }

	/// Returns `true` if there are no unread frames.
	pub fn is_empty(&self) -> bool { self.available() == 0 }

	/// Returns the number of frames that can be written without growing, counting
	/// space reclaimed by compaction.
	pub fn free(&self) -> usize { self.storage.free() }

	/// Returns the number of blocks that can be extracted before more frames must
	/// be written.
	pub fn pending_blocks(&self) -> usize {
		blocks::pending_blocks(self.available(), self.block_size, self.hop_size)
	}

	/// Appends `frames` to the buffer.
	///
	/// If there's not enough room at the end of the buffer, unread frames are moved
	/// to the start first. If there still isn't enough room, a fixed-capacity buffer
	/// fails with an overflow error, and an elastic buffer grows. On failure, the
	/// buffer is left unchanged.
	///
	/// # Errors
	///
	/// Returns a shape mismatch error if the frames have a different channel count
	/// than the buffer or are malformed, or an overflow error if a fixed-capacity
	/// buffer can't fit them or an elastic buffer can't grow large enough.
	pub fn extend<F: Frames<T> + ?Sized>(&mut self, frames: &F) -> Result {
		let shape = frames.shape().ok_or(Error::ragged(Extend))?;
		let channels = self.channel_count();
		if shape.channels != channels {
			return Err(Error::shape_mismatch(Extend, channels, shape.channels))
		}

		let count = shape.frames;
		if count == 0 {
			return Ok(())
		}

		self.reserve(count)?;
		self.storage.write(frames, count);
		Ok(())
	}

	/// Makes room for `count` frames at the end of the buffer.
	fn reserve(&mut self, count: usize) -> Result {
		let storage = &mut self.storage;
		if storage.limit() >= count {
			return Ok(())
		}

		if storage.free() >= count {
			storage.compact();
			return Ok(())
		}

		match self.capacity_policy {
			Capacity::Fixed => Err(Error::overflow(Extend, count, storage.free())),
			Capacity::Elastic => {
				let grown = storage.count()
					.checked_add(count)
					.is_some_and(|min| storage.grow(min));
				if grown {
					Ok(())
				} else {
					Err(Error::overflow(Extend, count, storage.free()))
				}
			}
		}
	}

	/// Extracts the next block, or returns `None` if less than a block of frames is
	/// unread. The read position moves forward by the hop size, stopping at the
	/// write position.
	pub fn next_block(&mut self) -> Option<Block<'_, T>> {
		self.blocks().next()
	}

	/// Returns an iterator extracting every block currently available.
	pub fn blocks(&mut self) -> Blocks<'_, T> {
		let stride = self.storage.capacity();
		let (data, cursor) = self.storage.split();
		Blocks::new(data, cursor, stride, self.block_size, self.hop_size)
	}

	/// Moves unread frames to the start of the buffer. This happens automatically
	/// when writing, but can be done ahead of time to keep the next write cheap.
	pub fn compact(&mut self) {
		self.storage.compact();
	}

	/// Discards all unread frames.
	pub fn clear(&mut self) {
		self.storage.clear();
	}
}

impl<'a, T: Sample> IntoIterator for &'a mut BlockBuffer<T> {
	type Item = Block<'a, T>;
	type IntoIter = Blocks<'a, T>;

	fn into_iter(self) -> Blocks<'a, T> {
		self.blocks()
	}
}
