pub mod classify;
pub mod init;
pub mod tree;
