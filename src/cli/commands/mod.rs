//! One module per subcommand, each exposing an `execute` function.

pub mod add;
pub mod get;
pub mod init;
pub mod keygen;
pub mod list;
pub mod menu;
