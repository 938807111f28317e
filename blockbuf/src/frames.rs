// SPDX-License-Identifier: Apache-2.0

use crate::Sample;

/// The dimensions of a run of sample-frames.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Shape {
	/// The number of channels in each frame.
	pub channels: usize,
	/// The number of frames.
	pub frames: usize,
}

impl Shape {
	pub const fn new(channels: usize, frames: usize) -> Self {
		Self { channels, frames }
	}
}

/// Sample-frames that can be written into a [`BlockBuffer`](crate::BlockBuffer).
///
/// Implemented for:
/// - flat slices, arrays, and vectors of samples, as a single channel;
/// - slices, arrays, and vectors of `[T; C]` frames, as `C` interleaved channels;
/// - slices of `&[T]` or `Vec<T>` channels, as planar data;
/// - [`Interleaved`], a flat slice with a runtime channel count.
pub trait Frames<T: Sample> {
	/// Returns the shape of the frames, or `None` if the frames are malformed, like
	/// planar channels with unequal lengths.
	fn shape(&self) -> Option<Shape>;

	/// Copies the first `target.len()` samples of `channel` into `target`. The
	/// caller ensures `channel` and the target length are within the shape.
	fn copy_channel(&self, channel: usize, target: &mut [T]);
}

// Mono

impl<T: Sample> Frames<T> for [T] {
	fn shape(&self) -> Option<Shape> {
		Some(Shape::new(1, self.len()))
	}

	fn copy_channel(&self, channel: usize, target: &mut [T]) {
		debug_assert_eq!(channel, 0);
		target.copy_from_slice(&self[..target.len()]);
	}
}

// Interleaved, one array per frame

impl<T: Sample, const C: usize> Frames<T> for [[T; C]] {
	fn shape(&self) -> Option<Shape> {
		Some(Shape::new(C, self.len()))
	}

	fn copy_channel(&self, channel: usize, target: &mut [T]) {
		for (sample, frame) in target.iter_mut().zip(self) {
			*sample = frame[channel];
		}
	}
}

// Planar, one slice per channel

macro_rules! planar {
    ($($ty:ty),+) => {
		$(
		impl<T: Sample> Frames<T> for [$ty] {
			fn shape(&self) -> Option<Shape> {
				let frames = self.first().map_or(0, |channel| channel.len());
				self.iter()
					.all(|channel| channel.len() == frames)
					.then_some(Shape::new(self.len(), frames))
			}

			fn copy_channel(&self, channel: usize, target: &mut [T]) {
				target.copy_from_slice(&self[channel][..target.len()]);
			}
		}
		)+
	};
}

planar! { &[T], Vec<T> }

// Owned and fixed-size containers delegate to their slices.

impl<T: Sample, const N: usize> Frames<T> for [T; N] {
	fn shape(&self) -> Option<Shape> { <[T] as Frames<T>>::shape(self) }

	fn copy_channel(&self, channel: usize, target: &mut [T]) {
		<[T] as Frames<T>>::copy_channel(self, channel, target)
	}
}

impl<T: Sample> Frames<T> for Vec<T> {
	fn shape(&self) -> Option<Shape> { <[T] as Frames<T>>::shape(self) }

	fn copy_channel(&self, channel: usize, target: &mut [T]) {
		<[T] as Frames<T>>::copy_channel(self, channel, target)
	}
}

impl<T: Sample, const C: usize, const N: usize> Frames<T> for [[T; C]; N] {
	fn shape(&self) -> Option<Shape> { <[[T; C]] as Frames<T>>::shape(self) }

	fn copy_channel(&self, channel: usize, target: &mut [T]) {
		<[[T; C]] as Frames<T>>::copy_channel(self, channel, target)
	}
}

impl<T: Sample, const C: usize> Frames<T> for Vec<[T; C]> {
	fn shape(&self) -> Option<Shape> { <[[T; C]] as Frames<T>>::shape(self) }

	fn copy_channel(&self, channel: usize, target: &mut [T]) {
		<[[T; C]] as Frames<T>>::copy_channel(self, channel, target)
	}
}

/// A flat slice of interleaved samples, `channels` samples per frame. Useful when
/// the channel count is only known at runtime, as with most audio device
/// callbacks.
#[derive(Copy, Clone, Debug)]
pub struct Interleaved<'a, T> {
	samples: &'a [T],
	channels: usize,
}

impl<'a, T: Sample> Interleaved<'a, T> {
	pub const fn new(samples: &'a [T], channels: usize) -> Self {
		Self { samples, channels }
	}

	/// Returns the interleaved samples.
	pub const fn samples(&self) -> &'a [T] { self.samples }

	/// Returns the number of channels per frame.
	pub const fn channels(&self) -> usize { self.channels }
}

impl<T: Sample> Frames<T> for Interleaved<'_, T> {
	fn shape(&self) -> Option<Shape> {
		let Self { samples, channels } = *self;
		(channels > 0 && samples.len() % channels == 0)
			.then(|| Shape::new(channels, samples.len() / channels))
	}

	fn copy_channel(&self, channel: usize, target: &mut [T]) {
		let interleaved = self.samples[channel..].iter().step_by(self.channels);
		for (sample, &value) in target.iter_mut().zip(interleaved) {
			*sample = value;
		}
	}
}
