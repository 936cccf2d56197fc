pub mod analyze;
pub mod classify;
pub mod init;
pub mod levels;
