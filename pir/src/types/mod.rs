mod int;
mod zn;
mod local2;

pub use int::{IntOps, Integer};
pub use zn::Zn;
pub use local2::Local2_32;
