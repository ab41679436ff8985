pub mod inspect;
pub mod reduce;
#[cfg(feature = "solver")]
pub mod solve;
