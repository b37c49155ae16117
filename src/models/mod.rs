pub mod alert;
pub mod driver;
pub mod logs;
pub mod score;
pub mod snapshot;
pub mod trip;
pub mod vehicle;

pub use alert::*;
pub use driver::*;
pub use logs::*;
pub use score::*;
pub use snapshot::*;
pub use trip::*;
pub use vehicle::*;
