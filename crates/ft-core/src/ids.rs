//! Typed indices for cells and vehicles.
//!
//! Both are numbered densely from 0 by their owner (the `Scenario` for
//! cells, the environment for vehicles), so `.index()` is a direct `Vec`
//! position.  Mixing the two up is a type error.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $name:ident, $label:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl $name {
            /// Refers to nothing; every lookup with it misses.
            pub const INVALID: $name = $name(u32::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, " {}"), self.0)
            }
        }
    };
}

typed_id! {
    /// Position of a cell in its `Scenario`.
    CellId, "cell"
}

typed_id! {
    /// Position of a vehicle in the environment's vehicle list.
    VehicleId, "vehicle"
}
