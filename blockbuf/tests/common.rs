// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use blockbuf::{Block, BlockBuffer};
use ctor::ctor;
use simplelog::{Config, LevelFilter, TestLogger};

#[ctor]
fn init_logger() {
	let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

/// Returns `count` consecutive samples starting at `start`.
pub fn ramp(start: i32, count: usize) -> Vec<i32> {
	(start..).take(count).collect()
}

/// Copies a mono block into a vector.
pub fn mono(block: Block<i32>) -> Vec<i32> {
	block.as_mono().expect("block should be mono").to_vec()
}

/// Extracts every available block as mono vectors.
pub fn drain(buffer: &mut BlockBuffer<i32>) -> Vec<Vec<i32>> {
	buffer.blocks().map(mono).collect()
}
