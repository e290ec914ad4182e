//! Shell completion scripts for f1tel

use std::io::Write;

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::Cli;

/// Write the completion script for `shell` to `out`.
///
/// # Errors
///
/// Fails if flushing `out` fails.
pub fn generate_completion<W: Write>(shell: Shell, out: &mut W) -> std::io::Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, out);
    out.flush()
}
