//! Command handler modules for the rochambeau CLI.
//!
//! Each subcommand lives in its own module and exposes
//! `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`, with output
//! streams (`&mut dyn Write`) passed in so handlers run headless in tests.

mod cfg;
mod play;
mod rng;
mod table;

pub use cfg::handle_cfg_command;
pub use play::handle_play_command;
pub use rng::handle_rng_command;
pub use table::handle_table_command;
