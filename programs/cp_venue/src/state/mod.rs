pub mod pool;
pub mod venue;

pub use pool::*;
pub use venue::*;
