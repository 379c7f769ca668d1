pub mod ambiguity;
pub mod containers;
pub mod executables;
pub mod round_trip;
