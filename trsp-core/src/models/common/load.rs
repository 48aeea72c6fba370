#[cfg(test)]
#[path = "../../../tests/unit/models/common/load_test.rs"]
mod load_test;

use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, Sub};

/// Max amount of demand dimensions (resource or product types).
pub const DEMAND_DIMENSION_SIZE: usize = 8;

/// Specifies multi dimensional demand type which is used for request demand, technician
/// capacity and cumulative load on a tour. It is `Copy` to be stored per tour position.
#[derive(Clone, Copy, Debug, Default)]
pub struct Demand {
    /// Demand data.
    pub load: [i32; DEMAND_DIMENSION_SIZE],
    /// Actual used size.
    pub size: usize,
}

impl Demand {
    /// Creates a new instance of `Demand`. Returns `None` if there are too many dimensions.
    pub fn new(data: &[i32]) -> Option<Self> {
        if data.len() > DEMAND_DIMENSION_SIZE {
            return None;
        }

        let mut load = [0; DEMAND_DIMENSION_SIZE];
        load[..data.len()].copy_from_slice(data);

        Some(Self { load, size: data.len() })
    }

    /// Creates a single dimensional demand.
    pub fn single(value: i32) -> Self {
        let mut load = [0; DEMAND_DIMENSION_SIZE];
        load[0] = value;

        Self { load, size: 1 }
    }

    /// Returns true if it represents an empty demand.
    pub fn is_empty(&self) -> bool {
        self.load.iter().all(|v| *v == 0)
    }

    /// Returns true if any dimension is negative.
    pub fn has_negative(&self) -> bool {
        self.load.iter().any(|v| *v < 0)
    }

    /// Returns max value per dimension.
    pub fn max_per_dim(self, other: Self) -> Self {
        let mut result = self;
        result.load.iter_mut().zip(other.load.iter()).for_each(|(a, b)| *a = (*a).max(*b));
        result.size = self.size.max(other.size);

        result
    }

    /// Returns a demand where negative dimensions are replaced with zero.
    pub fn non_negative(self) -> Self {
        let mut result = self;
        result.load.iter_mut().for_each(|a| *a = (*a).max(0));

        result
    }

    /// Returns true if `other` can be loaded into existing capacity.
    pub fn can_fit(&self, other: &Self) -> bool {
        self.load.iter().zip(other.load.iter()).all(|(a, b)| a >= b)
    }

    /// Converts to vector representation.
    pub fn as_vec(&self) -> Vec<i32> {
        self.load[..self.size].to_vec()
    }
}

impl Add for Demand {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let mut result = self;
        result.load.iter_mut().zip(rhs.load.iter()).for_each(|(a, b)| *a += *b);
        result.size = self.size.max(rhs.size);

        result
    }
}

impl Sub for Demand {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        let mut result = self;
        result.load.iter_mut().zip(rhs.load.iter()).for_each(|(a, b)| *a -= *b);
        result.size = self.size.max(rhs.size);

        result
    }
}

impl PartialEq for Demand {
    fn eq(&self, other: &Self) -> bool {
        self.load == other.load
    }
}

impl Eq for Demand {}

impl Sum for Demand {
    fn sum<I: Iterator<Item = Demand>>(iter: I) -> Self {
        iter.fold(Demand::default(), |acc, item| acc + item)
    }
}

impl Display for Demand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.as_vec())
    }
}
