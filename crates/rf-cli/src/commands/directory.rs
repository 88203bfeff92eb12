use serde::Serialize;

use rf_core::directory::{FlaggedCompany, FlaggedPerson};
use rf_directory::Directory;

use crate::cli::GlobalFlags;
use crate::cli::commands::DirectoryCommands;
use crate::output::output;

/// Handle `rfl directory <subcommand>`.
pub fn handle(
    action: &DirectoryCommands,
    flags: &GlobalFlags,
    config: &rf_config::RedflagConfig,
) -> anyhow::Result<()> {
    let directory = Directory::builtin();
    let limit = flags.limit.unwrap_or(config.general.default_limit) as usize;

    match action {
        DirectoryCommands::People => output(&clamp(directory.people(), limit), flags.format),
        DirectoryCommands::Companies => output(&clamp(directory.companies(), limit), flags.format),
        DirectoryCommands::Search(args) => {
            let matches = directory.search(&args.query);
            output(
                &SearchResponse {
                    query: args.query.clone(),
                    people: matches.people.into_iter().take(limit).collect(),
                    companies: matches.companies.into_iter().take(limit).collect(),
                },
                flags.format,
            )
        }
    }
}

#[derive(Serialize)]
struct SearchResponse<'a> {
    query: String,
    people: Vec<&'a FlaggedPerson>,
    companies: Vec<&'a FlaggedCompany>,
}

fn clamp<T>(items: &[T], limit: usize) -> &[T] {
    &items[..items.len().min(limit)]
}
