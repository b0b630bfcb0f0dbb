use std::fmt;
use std::fs::File;
use std::hash::Hash;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::Regex;
use tracing::{debug, instrument};

use crate::arena::{TreeArena, TreeNode};
use crate::errors::{TreeError, TreeResult};
use crate::query;

/// Caller-supplied conversion from a raw text token to the name type.
///
/// Must be deterministic; a failing converter surfaces as
/// [`TreeError::Conversion`] and aborts the line that carried the token.
pub type Converter<T> = Box<dyn Fn(&str) -> TreeResult<T>>;

/// Genealogy tree built incrementally from `parent:child1,child2,...` lines.
///
/// Lines are fed one at a time in order; blank lines and `#` comments are
/// skipped. A line that fails validation commits nothing: nodes and links
/// are only created after the whole line has been parsed, converted, and
/// checked for parent conflicts.
///
/// Not safe for concurrent mutation; once construction is done, shared
/// read-only queries are fine.
pub struct FamilyTree<T> {
    arena: TreeArena<T>,
    convert: Converter<T>,
    line_regex: Regex,
}

impl<T> fmt::Debug for FamilyTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FamilyTree")
            .field("arena", &self.arena)
            .finish_non_exhaustive()
    }
}

impl FamilyTree<String> {
    /// Tree whose names stay plain strings (identity converter).
    pub fn from_str_names() -> Self {
        Self::new(Box::new(|s| Ok(s.to_string())))
    }
}

impl<T> FamilyTree<T>
where
    T: Eq + Hash + Clone + fmt::Display + fmt::Debug,
{
    pub fn new(convert: Converter<T>) -> Self {
        Self {
            arena: TreeArena::new(),
            convert,
            // Splits on the first colon: parent part must be non-empty and
            // colon-free, children part must be non-empty.
            line_regex: Regex::new(r"^([^:]+):(.+)$").unwrap(),
        }
    }

    pub fn arena(&self) -> &TreeArena<T> {
        &self.arena
    }

    /// Process one input line.
    ///
    /// Grammar: `<parent>:<child>[,<child>]*`, whitespace around tokens is
    /// trimmed. Empty child tokens are dropped silently; everything else
    /// that violates the grammar is a [`TreeError::MalformedLine`].
    #[instrument(level = "debug", skip(self))]
    pub fn add_line(&mut self, line: &str) -> TreeResult<()> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            debug!("skipping blank/comment line");
            return Ok(());
        }

        // Grammar runs on the raw line: `X: ` has whitespace-only children
        // text (all tokens dropped, parent still created), while `X:` has
        // none at all and is malformed.
        let caps = self
            .line_regex
            .captures(line)
            .ok_or_else(|| TreeError::MalformedLine {
                line: line.to_string(),
                reason: "expected parent:child1,child2,...".to_string(),
            })?;

        let parent_text = caps.get(1).unwrap().as_str().trim();
        if parent_text.is_empty() {
            return Err(TreeError::MalformedLine {
                line: line.to_string(),
                reason: "empty parent name".to_string(),
            });
        }

        let parent_name = (self.convert)(parent_text)?;
        let child_names = self.convert_children(caps.get(2).unwrap().as_str())?;

        // Validate before mutating: a line that conflicts commits nothing,
        // not even the nodes of its earlier child tokens.
        self.check_conflicts(&parent_name, &child_names)?;

        let parent_idx = self.arena.get_or_create(parent_name);
        for child_name in child_names {
            let child_idx = self.arena.get_or_create(child_name);
            self.arena.add_child(parent_idx, child_idx);
        }

        self.arena.recompute_root();
        Ok(())
    }

    /// Feed lines in order; the first failing line aborts.
    #[instrument(level = "debug", skip_all)]
    pub fn add_lines<I, S>(&mut self, lines: I) -> TreeResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.add_line(line.as_ref())?;
        }
        Ok(())
    }

    /// Read lines from any buffered source, e.g. a file or in-memory text.
    #[instrument(level = "debug", skip_all)]
    pub fn add_from_reader<R: BufRead>(&mut self, reader: R) -> TreeResult<()> {
        for line in reader.lines() {
            let line = line?;
            self.add_line(&line)?;
        }
        Ok(())
    }

    /// Build the tree from a text file.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&mut self, path: &Path) -> TreeResult<()> {
        let file = File::open(path)?;
        self.add_from_reader(BufReader::new(file))
    }

    /// Most recent common ancestor of the nodes named `name1` and `name2`.
    ///
    /// See [`query::most_recent_common_ancestor`] for the contract.
    pub fn most_recent_common_ancestor(
        &self,
        name1: &T,
        name2: &T,
    ) -> TreeResult<Option<&TreeNode<T>>> {
        let found = query::most_recent_common_ancestor(&self.arena, name1, name2)?;
        Ok(found.and_then(|idx| self.arena.get_node(idx)))
    }

    fn convert_children(&self, children_text: &str) -> TreeResult<Vec<T>> {
        let mut names = Vec::new();
        for token in children_text.split(',') {
            let token = token.trim();
            // Empty child tokens are dropped, not rejected
            if token.is_empty() {
                continue;
            }
            names.push((self.convert)(token)?);
        }
        Ok(names)
    }

    /// A child that already exists with a parent other than the one being
    /// declared is a conflict; re-declaring the same parent is idempotent.
    fn check_conflicts(&self, parent_name: &T, child_names: &[T]) -> TreeResult<()> {
        let parent_idx = self.arena.lookup(parent_name);
        for child_name in child_names {
            let Some(child_idx) = self.arena.lookup(child_name) else {
                continue;
            };
            let Some(existing) = self.arena.get_node(child_idx).and_then(|n| n.parent) else {
                continue;
            };
            if parent_idx != Some(existing) {
                let existing_name = self
                    .arena
                    .get_node(existing)
                    .map(|n| n.name.to_string())
                    .unwrap_or_default();
                return Err(TreeError::ConflictingParent {
                    child: child_name.to_string(),
                    existing: existing_name,
                });
            }
        }
        Ok(())
    }
}

impl<T> fmt::Display for FamilyTree<T>
where
    T: Eq + Hash + Clone + fmt::Display + fmt::Debug,
{
    /// Header plus the indented dump of the current root's subtree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Family Tree:\n\n")?;
        if let Some(root) = self.arena.root() {
            write!(f, "{}", self.arena.render(root))?;
        }
        Ok(())
    }
}
