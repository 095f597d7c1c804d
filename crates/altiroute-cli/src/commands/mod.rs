// One module per subcommand; main.rs only parses arguments and dispatches.

pub mod data;
pub mod demo;
pub mod locations;
pub mod matrix;
pub mod paths;
pub mod route;
