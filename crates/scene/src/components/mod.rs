pub mod bounds;
pub mod light;
pub mod material;
pub mod solid;
pub mod transform;

pub use bounds::*;
pub use light::*;
pub use material::*;
pub use solid::*;
pub use transform::*;
