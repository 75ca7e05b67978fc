pub mod lego_set;
pub mod theme;

pub use lego_set::*;
pub use theme::*;
