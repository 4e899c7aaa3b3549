//! Organizations module

mod api;
mod collector;
mod commands;
mod models;

pub use api::OrganizationsApi;
pub use collector::{OrganizationTreeCollector, TreeOptions};
pub use commands::run_accounts_command;
pub use models::{
    Account, AccountRecord, AccountStatus, JoinedMethod, OrganizationInventory,
    OrganizationalUnit, Root,
};

#[cfg(test)]
pub(crate) use collector::fake;
