//! Command handlers for the backsync binary

mod init;
mod project_root;
mod push;
mod status;

pub use init::cmd_init;
pub use push::cmd_push;
pub use status::cmd_status;
