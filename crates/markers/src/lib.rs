pub mod popup;
pub mod region;
pub mod symbology;

pub use popup::*;
pub use region::*;
pub use symbology::*;
