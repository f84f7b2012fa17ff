pub mod add_liquidity;
pub mod create_pool;
pub mod initialize_venue;
pub mod pool;
pub mod remove_liquidity;
pub mod swap;

// Every module exports a `handler`; the program calls them by path
#[allow(ambiguous_glob_reexports)]
pub use add_liquidity::*;
#[allow(ambiguous_glob_reexports)]
pub use create_pool::*;
#[allow(ambiguous_glob_reexports)]
pub use initialize_venue::*;
#[allow(ambiguous_glob_reexports)]
pub use pool::*;
#[allow(ambiguous_glob_reexports)]
pub use remove_liquidity::*;
#[allow(ambiguous_glob_reexports)]
pub use swap::*;
