pub mod connect;
pub mod deploy;
