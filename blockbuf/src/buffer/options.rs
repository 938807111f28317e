// SPDX-License-Identifier: Apache-2.0

use std::cmp::max;
use amplify_derive::Display;
use crate::{BlockBuffer, ConfigError, DEFAULT_CAPACITY_BLOCKS, Result, Sample};

/// Options for configuring a [`BlockBuffer`].
///
/// # Block and hop size
///
/// Each block holds `block_size` frames. After a block is extracted, the next block
/// starts `hop_size` frames later, defaulting to the block size. With a smaller hop
/// size, consecutive blocks share `block_size - hop_size` frames. A hop size larger
/// than the block size skips frames between blocks; this is accepted, but frames are
/// only skipped if they've already been written when the block is extracted.
///
/// # Capacity
///
/// The number of frames per channel the buffer holds before it must compact or grow.
/// Defaults to 64 blocks, and must be at least one block. See [`Capacity`] for how
/// the buffer behaves once this fills.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct BlockBufferOptions {
	pub block_size: usize,
	pub hop_size: usize,
	pub channels: usize,
	pub capacity: Option<usize>,
	pub capacity_policy: Capacity,
}

/// The buffer capacity policy.
#[derive(Copy, Clone, Debug, Default, Display, Eq, PartialEq)]
pub enum Capacity {
	/// Never grow; writes that don't fit after compaction fail with an overflow
	/// error. Writing never allocates, so this is safe for real-time audio threads.
	#[default]
	#[display("fixed")]
	Fixed,
	/// Double the capacity until writes fit. Growing allocates and copies all unread
	/// frames, so this shouldn't be used on latency-critical paths.
	#[display("elastic")]
	Elastic,
}

impl Capacity {
	/// Returns `true` if the policy is [`Fixed`](Self::Fixed).
	pub fn is_fixed(&self) -> bool {
		matches!(self, Self::Fixed)
	}

	/// Returns `true` if the policy is [`Elastic`](Self::Elastic).
	pub fn is_elastic(&self) -> bool {
		matches!(self, Self::Elastic)
	}
}

impl BlockBufferOptions {
	/// Creates a new set of buffer options for a single-channel, fixed-capacity
	/// buffer with non-overlapping blocks of `block_size` frames.
	pub const fn new(block_size: usize) -> Self {
		Self {
			block_size,
			hop_size: block_size,
			channels: 1,
			capacity: None,
			capacity_policy: Capacity::Fixed,
		}
	}

	/// Returns the block size.
	#[inline]
	pub const fn block_size(&self) -> usize { self.block_size }

	/// Returns the hop size.
	#[inline]
	pub const fn hop_size(&self) -> usize { self.hop_size }

	/// Returns the channel count.
	#[inline]
	pub const fn channels(&self) -> usize { self.channels }

	/// Returns the capacity policy.
	#[inline]
	pub const fn capacity_policy(&self) -> Capacity { self.capacity_policy }

	/// Returns the capacity in frames, computing the default if not set.
	pub fn capacity(&self) -> usize {
		self.capacity.unwrap_or_else(||
			max(
				self.block_size.saturating_mul(DEFAULT_CAPACITY_BLOCKS),
				self.block_size.saturating_add(self.hop_size)
			)
		)
	}

	/// Sets the hop size.
	#[inline]
	pub fn set_hop_size(&mut self, value: usize) {
		self.hop_size = value;
	}

	/// Sets the channel count.
	#[inline]
	pub fn set_channels(&mut self, value: usize) {
		self.channels = value;
	}

	/// Sets the capacity in frames.
	#[inline]
	pub fn set_capacity(&mut self, value: usize) {
		self.capacity = Some(value);
	}

	/// Sets the capacity policy.
	#[inline]
	pub fn set_capacity_policy(&mut self, value: Capacity) {
		self.capacity_policy = value;
	}

	/// Sets the hop size.
	#[inline]
	pub const fn with_hop_size(mut self, value: usize) -> Self {
		self.hop_size = value;
		self
	}

	/// Sets the channel count.
	#[inline]
	pub const fn with_channels(mut self, value: usize) -> Self {
		self.channels = value;
		self
	}

	/// Sets the capacity in frames.
	#[inline]
	pub const fn with_capacity(mut self, value: usize) -> Self {
		self.capacity = Some(value);
		self
	}

	/// Sets the capacity policy.
	#[inline]
	pub const fn with_capacity_policy(mut self, value: Capacity) -> Self {
		self.capacity_policy = value;
		self
	}

	/// Sets the capacity policy to [`Elastic`](Capacity::Elastic).
	#[inline]
	pub const fn elastic(self) -> Self {
		self.with_capacity_policy(Capacity::Elastic)
	}

	/// Sets the capacity policy to [`Fixed`](Capacity::Fixed).
	#[inline]
	pub const fn fixed(self) -> Self {
		self.with_capacity_policy(Capacity::Fixed)
	}

	/// Checks the options for zero sizes, a capacity too small to hold a block, and
	/// a capacity whose sample count overflows.
	pub fn validate(&self) -> std::result::Result<(), ConfigError> {
		if self.block_size == 0 {
			return Err(ConfigError::ZeroBlockSize)
		}
		if self.hop_size == 0 {
			return Err(ConfigError::ZeroHopSize)
		}
		if self.channels == 0 {
			return Err(ConfigError::ZeroChannels)
		}

		let capacity = self.capacity();
		if capacity < self.block_size {
			return Err(ConfigError::CapacityTooSmall {
				capacity,
				block_size: self.block_size
			})
		}
		if self.channels.checked_mul(capacity).is_none() {
			return Err(ConfigError::CapacityOverflow {
				channels: self.channels,
				capacity
			})
		}
		Ok(())
	}

	/// Creates a buffer from the options.
	pub fn build<T: Sample>(self) -> Result<BlockBuffer<T>> {
		BlockBuffer::with_options(self)
	}
}
