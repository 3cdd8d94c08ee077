// Utils compartidos

pub mod constants;
pub mod storage;
pub mod response;

pub use constants::*;
pub use storage::*;
pub use response::*;
