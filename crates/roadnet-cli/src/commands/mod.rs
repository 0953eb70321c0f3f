// CLI subcommand handlers. main.rs parses arguments and opens the network;
// each module here runs one group of subcommands against it.

pub mod edit;
pub mod network;
pub mod route;
