pub mod oracle;
pub mod order;
pub mod relayer;
pub mod treasury;

pub use oracle::*;
pub use order::*;
pub use relayer::*;
pub use treasury::*;
