use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

/// Identifier of a [`Team`](crate::Team), unique within a run.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct TeamId(u64);

/// Identifier of a [`Point`](crate::Point), unique within a run.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct PointId(u64);

/// Identifier of a program (team member) exercised during evaluation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct ProgramId(u64);

impl TeamId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl PointId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Monotonic id source owned by a run.
///
/// Ids start at 1 and increase by one per call to [`Self::next_id`]. Calling
/// [`Self::reset`] at the start of a new run restarts the numbering.
///
/// # Example
///
/// ```
/// use coevo_core::{IdSequence, TeamId};
///
/// let mut ids = IdSequence::<TeamId>::new();
/// assert_eq!(ids.next_id(), TeamId::from(1));
/// assert_eq!(ids.next_id(), TeamId::from(2));
///
/// ids.reset();
/// assert_eq!(ids.next_id(), TeamId::from(1));
/// ```
#[derive(Debug, Clone)]
pub struct IdSequence<T> {
    last: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for IdSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IdSequence<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: 0,
            _marker: PhantomData,
        }
    }

    pub fn next_id(&mut self) -> T
    where
        T: From<u64>,
    {
        self.last += 1;
        T::from(self.last)
    }

    pub fn reset(&mut self) {
        self.last = 0;
    }
}
