mod publisher;
pub use publisher::*;

mod result_ext;
pub use result_ext::*;
