pub mod boundary;
pub mod geojson;

pub use boundary::*;
pub use geojson::*;
