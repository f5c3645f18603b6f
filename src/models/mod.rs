pub mod enums;
pub mod health_record;

pub use enums::*;
pub use health_record::*;
