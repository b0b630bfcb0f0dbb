//! Command dispatch: every subcommand loads a tree file and runs one
//! read-only query or rendering over it.

use std::path::Path;

use tracing::{debug, instrument};

use crate::builder::FamilyTree;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Show { file, under, fancy }) => _show(file, under.as_deref(), *fancy),
        Some(Commands::Mrca { file, name1, name2 }) => _mrca(file, name1, name2),
        Some(Commands::Leaves { file }) => _leaves(file),
        Some(Commands::Stats { file }) => _stats(file),
        Some(Commands::Config { command }) => _config(command),
        None => Ok(()),
    }
}

/// Resolve the file argument against the configured data directory and build
/// the tree from it.
#[instrument(level = "debug")]
fn load_tree(file: &Path) -> CliResult<FamilyTree<String>> {
    let settings = Settings::load()?;
    let path = settings.resolve_tree_file(file);
    debug!("loading tree from {:?}", path);

    let mut tree = FamilyTree::from_str_names();
    tree.load(&path)?;
    Ok(tree)
}

#[instrument(level = "debug")]
fn _show(file: &Path, under: Option<&str>, fancy: bool) -> CliResult<()> {
    let tree = load_tree(file)?;
    let arena = tree.arena();

    let start = match under {
        None => arena.root(),
        Some(name) => {
            let root = arena
                .root()
                .ok_or_else(|| CliError::InvalidArgs("tree is empty".to_string()))?;
            Some(
                arena
                    .find_in_subtree(root, &name.to_string())
                    .ok_or_else(|| crate::errors::TreeError::NodeNotFound(name.to_string()))?,
            )
        }
    };

    match start {
        None => output::info(&tree),
        Some(idx) if fancy => output::info(&arena.to_display_tree(idx)),
        Some(idx) if under.is_some() => output::info(&arena.render(idx)),
        Some(_) => output::info(&tree),
    }
    Ok(())
}

#[instrument(level = "debug")]
fn _mrca(file: &Path, name1: &str, name2: &str) -> CliResult<()> {
    let tree = load_tree(file)?;
    match tree.most_recent_common_ancestor(&name1.to_string(), &name2.to_string())? {
        Some(node) => output::action("mrca", &node.name),
        None => output::warning(&format!("no common ancestor of {name1} and {name2}")),
    }
    Ok(())
}

#[instrument(level = "debug")]
fn _leaves(file: &Path) -> CliResult<()> {
    let tree = load_tree(file)?;
    for leaf in tree.arena().leaf_nodes() {
        output::info(&leaf);
    }
    Ok(())
}

#[instrument(level = "debug")]
fn _stats(file: &Path) -> CliResult<()> {
    let tree = load_tree(file)?;
    let arena = tree.arena();

    output::action("nodes", &arena.len());
    output::action("depth", &arena.depth());
    let root_name = arena
        .root()
        .and_then(|idx| arena.get_node(idx))
        .map(|n| n.name.clone())
        .unwrap_or_else(|| "<none>".to_string());
    output::action("root", &root_name);
    Ok(())
}

fn _config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load()?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory available"),
        },
    }
    Ok(())
}
