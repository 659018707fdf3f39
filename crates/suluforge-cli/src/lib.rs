//! Library surface of the suluforge CLI, split out so the integration
//! tests can drive the generator without spawning the binary.

pub mod check;
pub mod codegen;
pub mod emit;
pub mod make;
pub mod patch;
pub mod spec;
