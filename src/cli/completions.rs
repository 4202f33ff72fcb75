//! Completions command implementation

use crate::cli::{Cli, CompletionsArgs};
use clap::CommandFactory;
use clap_complete::generate;
use std::io::{self, Write};

/// Write completions for `args.shell` to `out`
pub fn write_completions(args: &CompletionsArgs, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, bin_name, out);
}

/// Handle `dashboard completions` command
pub fn handle_completions(args: &CompletionsArgs) {
    write_completions(args, &mut io::stdout());
}
