#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

/// Measured heights remembered per item key (only used with `retain_measurements`).
#[cfg(feature = "std")]
pub(crate) type KeyHeightMap<K> = HashMap<K, u32>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyHeightMap<K> = BTreeMap<K, u32>;

/// Bound for item keys.
///
/// With `std` keys are hashed; without it they are ordered, so `no_std` builds can fall back to a
/// `BTreeMap`. Either way the key must be `Clone` because rendered rows carry a copy of it.
#[cfg(feature = "std")]
pub trait ListKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone> ListKey for K {}

#[cfg(not(feature = "std"))]
pub trait ListKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone> ListKey for K {}
