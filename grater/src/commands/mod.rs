// grater/src/commands/mod.rs

pub mod init;
