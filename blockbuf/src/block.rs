// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::fmt::{Debug, Formatter};
use all_asserts::{assert_ge, debug_assert_le};
use crate::Sample;

/// A block of `len` frames across every channel, borrowed from a
/// [`BlockBuffer`](crate::BlockBuffer). Samples are stored planar: each channel is
/// a contiguous slice.
#[derive(Copy, Clone)]
pub struct Block<'a, T> {
	/// The buffer memory, one lane of `stride` samples per channel.
	data: &'a [T],
	stride: usize,
	offset: usize,
	len: usize,
}

impl<'a, T: Sample> Block<'a, T> {
	pub(crate) fn new(data: &'a [T], stride: usize, offset: usize, len: usize) -> Self {
		debug_assert_le!(offset + len, stride);
		Self { data, stride, offset, len }
	}

	/// Returns the number of frames in the block.
	pub fn len(&self) -> usize { self.len }

	/// Returns `true` if the block has no frames.
	pub fn is_empty(&self) -> bool { self.len == 0 }

	/// Returns the number of channels in the block.
	pub fn channel_count(&self) -> usize { self.data.len() / self.stride }

	/// Returns the samples of `channel`.
	///
	/// # Panics
	///
	/// Panics if `channel` is out of range.
	pub fn channel(&self, channel: usize) -> &'a [T] {
		self.get_channel(channel).unwrap_or_else(||
			panic!("channel {channel} out of range for {} channel(s)", self.channel_count())
		)
	}

	/// Returns the samples of `channel`, or `None` if it's out of range.
	pub fn get_channel(&self, channel: usize) -> Option<&'a [T]> {
		let start = channel.checked_mul(self.stride)?.checked_add(self.offset)?;
		self.data.get(start..start.checked_add(self.len)?)
	}

	/// Returns an iterator over the samples of each channel.
	pub fn channels(&self) -> impl ExactSizeIterator<Item = &'a [T]> + 'a {
		let Self { data, stride, offset, len } = *self;
		data.chunks_exact(stride).map(move |lane| &lane[offset..offset + len])
	}

	/// Returns the samples as a single slice if the block has only one channel.
	pub fn as_mono(&self) -> Option<&'a [T]> {
		(self.channel_count() == 1).then(|| self.channel(0))
	}

	/// Returns an iterator over the samples of the frame at `index`, one for each
	/// channel.
	///
	/// # Panics
	///
	/// Panics if `index` is out of range.
	pub fn frame(&self, index: usize) -> impl ExactSizeIterator<Item = T> + 'a {
		assert!(index < self.len, "frame {index} out of range for {} frame(s)", self.len);
		self.channels().map(move |channel| channel[index])
	}

	/// Copies the block into `target` with channels interleaved, returning the number
	/// of samples written. Doesn't allocate.
	///
	/// # Panics
	///
	/// Panics if `target` is shorter than `len * channel_count` samples.
	pub fn copy_interleaved_into(&self, target: &mut [T]) -> usize {
		let channels = self.channel_count();
		let count = self.len * channels;
		assert_ge!(target.len(), count);

		for (index, lane) in self.channels().enumerate() {
			let target = target[index..count].iter_mut().step_by(channels);
			for (sample, &value) in target.zip(lane) {
				*sample = value;
			}
		}
		count
	}

	/// Copies the block into a new vector with channels interleaved.
	pub fn to_interleaved(&self) -> Vec<T> {
		let mut vec = vec![T::zero(); self.len * self.channel_count()];
		self.copy_interleaved_into(&mut vec);
		vec
	}

	/// Copies the block into new vectors, one per channel.
	pub fn to_planar(&self) -> Vec<Vec<T>> {
		self.channels().map(<[T]>::to_vec).collect()
	}
}

impl<T: Sample> Debug for Block<'_, T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.channels()).finish()
	}
}

impl<T: Sample> PartialEq for Block<'_, T> {
	fn eq(&self, other: &Self) -> bool {
		self.len == other.len &&
		self.channels().eq(other.channels())
	}
}
