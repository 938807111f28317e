// SPDX-License-Identifier: Apache-2.0

use blockbuf::{BlockBuffer, BlockBufferOptions, Capacity, ConfigError, ErrorKind, Operation};
use pretty_assertions::assert_eq;
use crate::common::{drain, mono, ramp};

mod common;

#[test]
fn basic() {
	let mut buffer = BlockBuffer::<i32>::new(4, 4).unwrap();
	assert!(buffer.next_block().is_none());

	buffer.extend(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
	assert_eq!(buffer.next_block().map(mono), Some(vec![1, 2, 3, 4]));
	assert_eq!(buffer.next_block().map(mono), Some(vec![5, 6, 7, 8]));
	assert!(buffer.next_block().is_none());
}

#[test]
fn hop_defaults_to_block_size() {
	let options = BlockBufferOptions::new(16);
	assert_eq!(options.hop_size(), 16);
	assert_eq!(options.channels(), 1);
	assert_eq!(options.capacity(), 16 * blockbuf::DEFAULT_CAPACITY_BLOCKS);
	assert_eq!(options.capacity_policy(), Capacity::Fixed);
}

#[test]
fn overlapping_blocks() {
	let mut buffer = BlockBuffer::<i32>::new(4, 2).unwrap();
	buffer.extend(&[1, 2, 3, 4, 5, 6]).unwrap();

	assert_eq!(buffer.pending_blocks(), 2);
	assert_eq!(drain(&mut buffer), [[1, 2, 3, 4], [3, 4, 5, 6]]);
	assert_eq!(buffer.available(), 2);
	assert!(buffer.next_block().is_none());
}

#[test]
fn hop_across_writes() {
	let mut buffer = BlockBuffer::<i32>::new(8, 2).unwrap();
	buffer.extend(&[1, 2, 3, 4]).unwrap();
	assert!(buffer.next_block().is_none());

	buffer.extend(&[5, 6, 7, 8]).unwrap();
	assert_eq!(buffer.next_block().map(mono), Some(ramp(1, 8)));

	buffer.extend(&[9, 10, 11, 12]).unwrap();
	assert_eq!(buffer.next_block().map(mono), Some(ramp(3, 8)));
	assert_eq!(buffer.next_block().map(mono), Some(ramp(5, 8)));
	assert!(buffer.next_block().is_none());
}

#[test]
fn hop_with_odd_capacity() {
	let mut buffer = BlockBufferOptions::new(4)
		.with_hop_size(2)
		.with_capacity(6)
		.build::<i32>()
		.unwrap();
	assert!(buffer.next_block().is_none());

	buffer.extend(&[1, 2, 3, 4]).unwrap();
	assert_eq!(buffer.next_block().map(mono), Some(vec![1, 2, 3, 4]));
	assert!(buffer.next_block().is_none());

	// Only fits after the two consumed frames are compacted away.
	buffer.extend(&[5, 6, 7, 8]).unwrap();
	assert_eq!(buffer.read_position(), 0);
	assert_eq!(buffer.write_position(), 6);
	assert_eq!(drain(&mut buffer), [[3, 4, 5, 6], [5, 6, 7, 8]]);
	assert!(buffer.next_block().is_none());
}

#[test]
fn iterator_collects_every_block() {
	let mut buffer = BlockBuffer::<i32>::new(4, 2).unwrap();
	buffer.extend(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();

	let blocks = buffer.blocks();
	assert_eq!(blocks.len(), 3);
	let blocks: Vec<_> = blocks.collect();
	assert_eq!(blocks.len(), 3);
	assert_eq!(blocks[0].channel(0), [1, 2, 3, 4]);
	assert_eq!(blocks[1].channel(0), [3, 4, 5, 6]);
	assert_eq!(blocks[2].channel(0), [5, 6, 7, 8]);
}

#[test]
fn into_iterator() {
	let mut buffer = BlockBuffer::<i32>::new(2, 2).unwrap();
	buffer.extend(&ramp(0, 6)).unwrap();

	let mut count = 0;
	for block in &mut buffer {
		assert_eq!(block.len(), 2);
		count += 1;
	}
	assert_eq!(count, 3);
	assert!(buffer.is_empty());
}

#[test]
fn empty_extend_is_noop() {
	let mut buffer = BlockBuffer::<i32>::new(4, 2).unwrap();
	buffer.extend(&[1, 2, 3]).unwrap();
	let before = (buffer.read_position(), buffer.write_position(), buffer.capacity());

	let empty: &[i32] = &[];
	buffer.extend(empty).unwrap();
	assert_eq!((buffer.read_position(), buffer.write_position(), buffer.capacity()), before);
	assert!(buffer.next_block().is_none());
}

#[test]
fn resumes_after_exhaustion() {
	let mut buffer = BlockBuffer::<i32>::new(4, 4).unwrap();
	buffer.extend(&[1, 2, 3]).unwrap();
	assert!(buffer.next_block().is_none());
	assert!(buffer.next_block().is_none());

	buffer.extend(&[4]).unwrap();
	assert_eq!(buffer.next_block().map(mono), Some(vec![1, 2, 3, 4]));
}

#[test]
fn capacity_overflow() {
	let mut buffer = BlockBufferOptions::new(4)
		.with_capacity(8)
		.build::<i32>()
		.unwrap();
	buffer.extend(&[1, 2, 3, 4]).unwrap();
	buffer.extend(&[5, 6, 7, 8]).unwrap();

	let error = buffer.extend(&[9]).unwrap_err();
	assert!(error.is_overflow());
	assert!(!error.is_shape_mismatch());
	assert_eq!(error.operation(), Operation::Extend);
	assert_eq!(error.kind(), ErrorKind::Overflow { requested: 1, free: 0 });
}

#[test]
fn overflow_leaves_buffer_unchanged() {
	let mut buffer = BlockBufferOptions::new(4)
		.with_capacity(8)
		.build::<i32>()
		.unwrap();
	buffer.extend(&ramp(1, 8)).unwrap();
	assert!(buffer.next_block().is_some());
	assert_eq!((buffer.read_position(), buffer.write_position()), (4, 8));

	// Four frames are free after compaction, five don't fit.
	let error = buffer.extend(&ramp(9, 5)).unwrap_err();
	assert_eq!(error.kind(), ErrorKind::Overflow { requested: 5, free: 4 });
	assert_eq!((buffer.read_position(), buffer.write_position()), (4, 8));
	assert_eq!(buffer.capacity(), 8);

	buffer.extend(&ramp(9, 4)).unwrap();
	assert_eq!(drain(&mut buffer), [ramp(5, 4), ramp(9, 4)]);
}

#[test]
fn elastic_growth() {
	let mut buffer = BlockBufferOptions::new(4)
		.with_hop_size(2)
		.with_capacity(8)
		.elastic()
		.build::<i32>()
		.unwrap();
	buffer.extend(&ramp(0, 6)).unwrap();
	assert!(buffer.next_block().is_some());

	buffer.extend(&ramp(6, 100)).unwrap();
	assert!(buffer.capacity() >= 104);
	assert_eq!(buffer.capacity_policy(), Capacity::Elastic);

	let blocks = drain(&mut buffer);
	assert_eq!(blocks.len(), 51);
	for (index, block) in blocks.iter().enumerate() {
		assert_eq!(block, &ramp(2 + 2 * index as i32, 4));
	}
}

#[test]
fn compact_and_clear() {
	let mut buffer = BlockBuffer::<i32>::new(2, 2).unwrap();
	buffer.extend(&ramp(0, 5)).unwrap();
	assert!(buffer.next_block().is_some());

	buffer.compact();
	assert_eq!((buffer.read_position(), buffer.write_position()), (0, 3));
	assert_eq!(buffer.next_block().map(mono), Some(vec![2, 3]));

	buffer.clear();
	assert!(buffer.is_empty());
	assert_eq!(buffer.free(), buffer.capacity());
	assert!(buffer.next_block().is_none());
}

#[test]
fn skips_frames_with_hop_larger_than_block() {
	let mut buffer = BlockBuffer::<i32>::new(2, 3).unwrap();
	buffer.extend(&ramp(0, 8)).unwrap();
	assert_eq!(drain(&mut buffer), [[0, 1], [3, 4], [6, 7]]);

	// The read position stops at the write position, rather than running ahead.
	let mut buffer = BlockBuffer::<i32>::new(2, 3).unwrap();
	buffer.extend(&[0, 1]).unwrap();
	assert!(buffer.next_block().is_some());
	assert_eq!(buffer.read_position(), buffer.write_position());
}

#[test]
fn early_drop_keeps_remaining_blocks() {
	let mut buffer = BlockBuffer::<i32>::new(2, 1).unwrap();
	buffer.extend(&ramp(0, 4)).unwrap();

	let first = buffer.blocks().next().map(mono);
	assert_eq!(first, Some(vec![0, 1]));
	assert_eq!(buffer.pending_blocks(), 2);
	assert_eq!(drain(&mut buffer), [[1, 2], [2, 3]]);
}

#[test]
fn options_round_trip() {
	let options = BlockBufferOptions::new(8)
		.with_hop_size(4)
		.with_channels(2)
		.with_capacity(32)
		.elastic();
	let buffer = options.build::<f32>().unwrap();
	assert_eq!(buffer.options(), options);
}

#[test]
fn invalid_options() {
	let error = BlockBuffer::<f32>::new(4, 0).unwrap_err();
	assert!(error.is_config());
	assert_eq!(error.operation(), Operation::Configure);
	assert_eq!(error.kind(), ErrorKind::InvalidConfig(ConfigError::ZeroHopSize));

	let error = BlockBuffer::<f32>::new(0, 4).unwrap_err();
	assert_eq!(error.kind(), ErrorKind::InvalidConfig(ConfigError::ZeroBlockSize));

	let error = BlockBufferOptions::new(4).with_channels(0).build::<f32>().unwrap_err();
	assert_eq!(error.kind(), ErrorKind::InvalidConfig(ConfigError::ZeroChannels));

	let error = BlockBufferOptions::new(4).with_capacity(3).build::<f32>().unwrap_err();
	assert_eq!(
		error.kind(),
		ErrorKind::InvalidConfig(ConfigError::CapacityTooSmall { capacity: 3, block_size: 4 })
	);
	assert_eq!(
		error.to_string(),
		"configure buffer failed; capacity (3) must be at least the block size (4)"
	);

	let options = BlockBufferOptions::new(2).with_channels(4).with_capacity(1 << 62);
	let overflow = ConfigError::CapacityOverflow { channels: 4, capacity: 1 << 62 };
	assert_eq!(options.validate(), Err(overflow));
	let error = options.build::<i32>().unwrap_err();
	assert!(error.is_config());
	assert_eq!(error.kind(), ErrorKind::InvalidConfig(overflow));

	// The sample count fits, but not its size in bytes.
	let options = BlockBufferOptions::new(2).with_capacity(1 << 62);
	assert_eq!(options.validate(), Ok(()));
	let error = options.build::<i32>().unwrap_err();
	assert_eq!(
		error.kind(),
		ErrorKind::InvalidConfig(ConfigError::CapacityOverflow { channels: 1, capacity: 1 << 62 })
	);
}

#[test]
fn mono_buffer_rejects_stereo_frames() {
	let mut buffer = BlockBuffer::<i32>::new(4, 4).unwrap();
	let error = buffer.extend(&[[1, 2], [3, 4]]).unwrap_err();
	assert!(error.is_shape_mismatch());
	assert_eq!(error.kind(), ErrorKind::ShapeMismatch { expected: 1, found: 2 });
	assert!(buffer.is_empty());
}
