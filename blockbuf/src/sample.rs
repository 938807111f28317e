// SPDX-License-Identifier: Apache-2.0

use std::fmt::Debug;
use num_traits::Zero;

/// A primitive audio sample, like a float or PCM integer. Buffer memory is filled
/// with [`Zero::zero`] when allocated.
pub trait Sample: Copy + Debug + Default + PartialEq + Zero + Send + Sync + 'static { }

macro_rules! generate {
    ($($ty:ident)+) => {
		$(
		impl Sample for $ty { }
		)+
	};
}

generate! { u8 i8 u16 i16 u32 i32 u64 i64 f32 f64 }
