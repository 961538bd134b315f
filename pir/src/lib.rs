mod abst;
mod types;
mod misc;

pub use abst::*;
pub use types::*;
pub use misc::*;

pub mod util;
