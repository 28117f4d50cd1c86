//! CLI command handlers
//!
//! Each submodule handles a group of CLI subcommands.

mod notes;

pub(crate) use notes::{cmd_add, cmd_delete, cmd_edit, cmd_list, cmd_show};
