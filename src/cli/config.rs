//! Config file application
//!
//! Folds `jot::config::Config` values into parsed CLI options.

use super::Cli;

/// Apply config file defaults to CLI options
/// CLI flags always override config values
pub(super) fn apply_config_defaults(cli: &mut Cli, config: &jot::config::Config) {
    if cli.file.is_none() {
        cli.file = Some(config.file_or_default());
    }
    if !cli.quiet && config.quiet_or_default() {
        cli.quiet = true;
    }
    if !cli.no_color && !config.color_or_default() {
        cli.no_color = true;
    }
}
