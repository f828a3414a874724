pub mod lighting;

pub use lighting::*;
