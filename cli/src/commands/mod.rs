mod adjust;
mod analyze;
mod entry;
mod helpers;
mod profile;
mod summary;

pub(crate) use adjust::{cmd_adjust, cmd_watch};
pub(crate) use analyze::cmd_analyze;
pub(crate) use entry::{cmd_entry_add, cmd_entry_delete, cmd_entry_list};
pub(crate) use profile::{cmd_profile_set, cmd_profile_show};
pub(crate) use summary::{cmd_stats, cmd_summary};
