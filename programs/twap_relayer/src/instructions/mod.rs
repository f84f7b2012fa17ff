pub mod consult;
pub mod create_order;
pub mod execute_order;
pub mod initialize_relayer;
pub mod open_vault;
pub mod refresh_oracle;
pub mod set_bounty_policy;
pub mod transfer_ownership;
pub mod update_oracle;
pub mod withdraw_expired_order;

// Every module exports a `handler`; the program calls them by path
#[allow(ambiguous_glob_reexports)]
pub use consult::*;
#[allow(ambiguous_glob_reexports)]
pub use create_order::*;
#[allow(ambiguous_glob_reexports)]
pub use execute_order::*;
#[allow(ambiguous_glob_reexports)]
pub use initialize_relayer::*;
#[allow(ambiguous_glob_reexports)]
pub use open_vault::*;
#[allow(ambiguous_glob_reexports)]
pub use refresh_oracle::*;
#[allow(ambiguous_glob_reexports)]
pub use set_bounty_policy::*;
#[allow(ambiguous_glob_reexports)]
pub use transfer_ownership::*;
#[allow(ambiguous_glob_reexports)]
pub use update_oracle::*;
#[allow(ambiguous_glob_reexports)]
pub use withdraw_expired_order::*;
