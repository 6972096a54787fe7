mod copy_file;
mod normalize;

pub use copy_file::*;
pub use normalize::*;
