pub mod push;
pub mod status;
