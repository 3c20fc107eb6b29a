pub mod enums;
pub mod intake;
pub mod medication;

pub use enums::*;
pub use intake::*;
pub use medication::*;
