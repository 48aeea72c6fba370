#[cfg(test)]
#[path = "../../tests/unit/utils/comparison_test.rs"]
mod comparison_test;

use crate::utils::Float;
use std::cmp::{Ordering, PartialOrd};

/// A default tolerance used to compare accumulated time and cost values.
pub const DEFAULT_TOLERANCE: Float = 1e-6;

macro_rules! compare_float_types {
    ($fn_name_: ident, $type_: ty) => {
        /// Compares floating point numbers.
        #[inline]
        pub fn $fn_name_(a: $type_, b: $type_) -> Ordering {
            match a.partial_cmp(&b) {
                Some(ordering) => ordering,
                None => match (a.is_nan(), b.is_nan()) {
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    _ => Ordering::Equal,
                },
            }
        }
    };
}

compare_float_types! { compare_floats, Float}
compare_float_types! { compare_floats_refs, &Float}

/// Compares floating point numbers treating values closer than `tolerance` as equal.
#[inline]
pub fn compare_floats_with_tolerance(a: Float, b: Float, tolerance: Float) -> Ordering {
    if (a - b).abs() < tolerance { Ordering::Equal } else { compare_floats(a, b) }
}

/// Checks whether two numbers are equal within [`DEFAULT_TOLERANCE`].
#[inline]
pub fn is_close(a: Float, b: Float) -> bool {
    compare_floats_with_tolerance(a, b, DEFAULT_TOLERANCE) == Ordering::Equal
}
