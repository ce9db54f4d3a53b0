mod stroke;
pub use stroke::*;

mod recorder;
pub use recorder::*;

mod frame;
pub use frame::*;

mod replay;
pub use replay::*;
