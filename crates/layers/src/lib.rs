pub mod buildings;
pub mod error;
pub mod extrude;
pub mod footprint;
pub mod symbology;

pub use buildings::*;
pub use error::*;
pub use footprint::*;
