use core::fmt::Debug;

/// A trait representing an account or token identifier.
pub trait Id: Clone + Ord + Debug {}

impl<T> Id for T where T: Clone + Ord + Debug {}
