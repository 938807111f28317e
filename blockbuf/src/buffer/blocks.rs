// SPDX-License-Identifier: Apache-2.0

use std::iter::FusedIterator;
use crate::{Block, Sample};
use crate::storage::Cursor;

/// An iterator over the blocks currently available in a
/// [`BlockBuffer`](crate::BlockBuffer), created by
/// [`BlockBuffer::blocks`](crate::BlockBuffer::blocks).
///
/// Each block moves the read position forward by the hop size. Blocks borrow the
/// buffer's memory, not the iterator, so any number of them can be held at once.
/// Dropping the iterator early leaves the remaining blocks in the buffer.
pub struct Blocks<'a, T> {
	data: &'a [T],
	cursor: &'a mut Cursor,
	stride: usize,
	block_size: usize,
	hop_size: usize,
}

impl<'a, T: Sample> Blocks<'a, T> {
	pub(crate) fn new(
		data: &'a [T],
		cursor: &'a mut Cursor,
		stride: usize,
		block_size: usize,
		hop_size: usize,
	) -> Self {
		Self { data, cursor, stride, block_size, hop_size }
	}
}

impl<'a, T: Sample> Iterator for Blocks<'a, T> {
	type Item = Block<'a, T>;

	fn next(&mut self) -> Option<Block<'a, T>> {
		if self.cursor.count() < self.block_size {
			return None
		}

		let offset = self.cursor.read();
		self.cursor.consume(self.hop_size);
		Some(Block::new(self.data, self.stride, offset, self.block_size))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let count = pending_blocks(self.cursor.count(), self.block_size, self.hop_size);
		(count, Some(count))
	}
}

impl<T: Sample> ExactSizeIterator for Blocks<'_, T> { }

impl<T: Sample> FusedIterator for Blocks<'_, T> { }

/// Returns the number of blocks that can be extracted from `count` unread frames.
pub(crate) fn pending_blocks(count: usize, block_size: usize, hop_size: usize) -> usize {
	if count < block_size {
		0
	} else {
		(count - block_size) / hop_size + 1
	}
}
