mod interp;
mod value_range;

pub use interp::{lerp, lerp_range, unlerp};
pub use value_range::ValueRange;
