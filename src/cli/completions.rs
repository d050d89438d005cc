//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::{self, Write};

use crate::cli::args::Cli;

/// Write the completion script for `shell` into `out`.
pub fn write_to(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let command_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, command_name, out);
}

/// Print completion script for the requested shell to stdout.
pub fn print(shell: Shell) {
    write_to(shell, &mut io::stdout());
}
