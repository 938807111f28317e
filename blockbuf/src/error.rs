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

use std::{fmt, result};
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};
use amplify_derive::Display;
use thiserror::Error;

pub type Result<T = ()> = result::Result<T, Error>;

/// The buffer operation that failed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Display)]
pub enum Operation {
	#[display("configure buffer")]
	Configure,
	#[display("extend buffer")]
	Extend,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum ErrorKind {
	/// The written frames have a different channel count than the buffer.
	#[error("expected {expected} channel(s), found {found}")]
	ShapeMismatch {
		expected: usize,
		found: usize,
	},
	/// The written channels have unequal lengths, or an interleaved slice isn't a
	/// whole number of frames.
	#[error("channels have unequal lengths")]
	RaggedFrames,
	/// A fixed-capacity buffer has no room for the written frames, even after
	/// compaction.
	#[error("buffer overflowed; {requested} frame(s) written with {free} free")]
	Overflow {
		requested: usize,
		free: usize,
	},
	/// The buffer options are invalid.
	#[error("{0}")]
	InvalidConfig(ConfigError),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum ConfigError {
	#[error("block size must be greater than zero")]
	ZeroBlockSize,
	#[error("hop size must be greater than zero")]
	ZeroHopSize,
	#[error("channel count must be greater than zero")]
	ZeroChannels,
	#[error("capacity ({capacity}) must be at least the block size ({block_size})")]
	CapacityTooSmall {
		capacity: usize,
		block_size: usize,
	},
	#[error("{channels} channel(s) of {capacity} frame(s) can't be allocated")]
	CapacityOverflow {
		channels: usize,
		capacity: usize,
	},
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Error {
	op: Operation,
	kind: ErrorKind,
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let Self { op, kind } = self;
		write!(f, "{op} failed; {kind}")
	}
}

impl StdError for Error { }

impl From<ConfigError> for Error {
	fn from(value: ConfigError) -> Self {
		Self::new(Operation::Configure, ErrorKind::InvalidConfig(value))
	}
}

impl Error {
	pub(crate) fn new(op: Operation, kind: ErrorKind) -> Self {
		Self { op, kind }
	}

	/// Creates a new "shape mismatch" error.
	pub fn shape_mismatch(op: Operation, expected: usize, found: usize) -> Self {
		Self::new(op, ErrorKind::ShapeMismatch { expected, found })
	}

	/// Creates a new "ragged frames" error.
	pub fn ragged(op: Operation) -> Self {
		Self::new(op, ErrorKind::RaggedFrames)
	}

	/// Creates a new "overflow" error.
	pub fn overflow(op: Operation, requested: usize, free: usize) -> Self {
		Self::new(op, ErrorKind::Overflow { requested, free })
	}

	/// Returns the operation kind.
	pub fn operation(&self) -> Operation { self.op }

	/// Returns the error kind.
	pub fn kind(&self) -> ErrorKind { self.kind }

	/// Returns `true` if the written frames didn't match the buffer's shape, either
	/// by channel count or by unequal channel lengths.
	pub fn is_shape_mismatch(&self) -> bool {
		matches!(self.kind, ErrorKind::ShapeMismatch { .. } | ErrorKind::RaggedFrames)
	}

	/// Returns `true` if the buffer overflowed.
	pub fn is_overflow(&self) -> bool {
		matches!(self.kind, ErrorKind::Overflow { .. })
	}

	/// Returns `true` if the buffer options were invalid.
	pub fn is_config(&self) -> bool {
		matches!(self.kind, ErrorKind::InvalidConfig(_))
	}
}
