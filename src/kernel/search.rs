//! Find/replace across open tabs.
//!
//! Matches are recomputed from tab content every time; nothing is patched
//! incrementally.

use crate::kernel::editor::{EditorState, EditorTabState};
use crate::models::{FileId, TabId};
use regex::{NoExpand, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FindOptions {
    pub search_text: String,
    pub replace_text: String,
    pub match_case: bool,
    pub match_whole_word: bool,
    pub use_regex: bool,
    pub search_in_all_files: bool,
}

impl FindOptions {
    pub fn scope(&self) -> SearchScope {
        if self.search_in_all_files {
            SearchScope::AllTabs
        } else {
            SearchScope::CurrentTab
        }
    }

    /// Whether both options produce the same result set. `replace_text` does not
    /// take part.
    pub fn same_query(&self, other: &FindOptions) -> bool {
        self.search_text == other.search_text
            && self.match_case == other.match_case
            && self.match_whole_word == other.match_whole_word
            && self.use_regex == other.use_regex
            && self.search_in_all_files == other.search_in_all_files
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    CurrentTab,
    AllTabs,
}

/// One occurrence. Line and column are 1-based; column and length count chars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindMatch {
    pub file_id: FileId,
    pub file_name: String,
    pub line_number: usize,
    pub column: usize,
    pub line_content: String,
    pub match_length: usize,
}

#[derive(Debug, Clone)]
pub enum FindError {
    InvalidRegex(regex::Error),
}

impl fmt::Display for FindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindError::InvalidRegex(e) => write!(f, "invalid regular expression: {}", e),
        }
    }
}

impl std::error::Error for FindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FindError::InvalidRegex(e) => Some(e),
        }
    }
}

impl From<regex::Error> for FindError {
    fn from(e: regex::Error) -> Self {
        FindError::InvalidRegex(e)
    }
}

pub fn compile_pattern(options: &FindOptions) -> Result<Regex, FindError> {
    let core = if options.use_regex {
        options.search_text.clone()
    } else {
        regex::escape(&options.search_text)
    };
    let pattern = if options.match_whole_word {
        format!(r"\b(?:{})\b", core)
    } else {
        core
    };
    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(!options.match_case)
        .build()?;
    Ok(regex)
}

/// Tabs searched under `scope`, in tab order.
pub fn scope_tabs(editor: &EditorState, scope: SearchScope) -> Vec<&EditorTabState> {
    match scope {
        SearchScope::AllTabs => editor.tabs().iter().collect(),
        SearchScope::CurrentTab => editor.active_tab().into_iter().collect(),
    }
}

pub fn find_in_tab(regex: &Regex, tab: &EditorTabState, out: &mut Vec<FindMatch>) {
    for (line_index, line) in tab.content.split('\n').enumerate() {
        for m in regex.find_iter(line) {
            out.push(FindMatch {
                file_id: tab.file_id.clone(),
                file_name: tab.name.clone(),
                line_number: line_index + 1,
                column: line[..m.start()].chars().count() + 1,
                line_content: line.to_string(),
                match_length: m.as_str().chars().count(),
            });
        }
    }
}

/// Replaces every match in `text`. `expand` enables `$1`/`${name}` in `replacement`.
/// Returns `None` when nothing matched.
pub fn replace_in_text(
    regex: &Regex,
    text: &str,
    replacement: &str,
    expand: bool,
) -> Option<(String, usize)> {
    let count = regex.find_iter(text).count();
    if count == 0 {
        return None;
    }
    let replaced = if expand {
        regex.replace_all(text, replacement)
    } else {
        regex.replace_all(text, NoExpand(replacement))
    };
    Some((replaced.into_owned(), count))
}

/// Replaces `len` chars at 1-based (`line_number`, `column`) with `replacement`.
pub fn replace_span(
    text: &str,
    line_number: usize,
    column: usize,
    len: usize,
    replacement: &str,
) -> Option<String> {
    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
    let line = lines.get_mut(line_number.checked_sub(1)?)?;
    let start_char = column.checked_sub(1)?;

    let byte_at = |char_index: usize| {
        line.char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(line.len()))
            .nth(char_index)
    };
    let start = byte_at(start_char)?;
    let end = byte_at(start_char + len).unwrap_or(line.len());
    line.replace_range(start..end, replacement);
    Some(lines.join("\n"))
}

#[derive(Debug, Clone, Default)]
pub struct FindReplaceState {
    pub visible: bool,
    options: FindOptions,
    matches: Vec<FindMatch>,
    current_match_index: Option<usize>,
    last_error: Option<String>,
}

impl FindReplaceState {
    pub fn options(&self) -> &FindOptions {
        &self.options
    }

    pub fn matches(&self) -> &[FindMatch] {
        &self.matches
    }

    pub fn current_match_index(&self) -> Option<usize> {
        self.current_match_index
    }

    pub fn current_match(&self) -> Option<&FindMatch> {
        self.matches.get(self.current_match_index?)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Stores new options. Returns true when the result set is stale.
    pub fn set_options(&mut self, options: FindOptions) -> bool {
        let stale = !self.options.same_query(&options);
        self.options = options;
        stale
    }

    /// Runs the query from scratch; the current match resets to the first one.
    /// A pattern that fails to compile leaves the previous results in place
    /// and yields zero.
    pub fn perform_search(&mut self, editor: &EditorState) -> usize {
        self.run(editor, true)
    }

    /// Re-runs the query after content changed, keeping the current index
    /// when it is still in range. Results from a pattern that no longer
    /// compiles are dropped, since they describe text that has moved.
    pub fn refresh(&mut self, editor: &EditorState) -> usize {
        self.run(editor, false)
    }

    fn run(&mut self, editor: &EditorState, restart: bool) -> usize {
        if self.options.search_text.is_empty() {
            self.clear_results();
            self.last_error = None;
            return 0;
        }

        let regex = match compile_pattern(&self.options) {
            Ok(regex) => regex,
            Err(e) => {
                tracing::debug!(error = %e, "find pattern rejected");
                self.last_error = Some(e.to_string());
                if !restart {
                    self.clear_results();
                }
                return 0;
            }
        };
        self.last_error = None;

        let mut matches = Vec::new();
        for tab in scope_tabs(editor, self.options.scope()) {
            find_in_tab(&regex, tab, &mut matches);
        }
        let previous = if restart { None } else { self.current_match_index };
        self.current_match_index = match (matches.len(), previous) {
            (0, _) => None,
            (len, Some(index)) => Some(index.min(len - 1)),
            (_, None) => Some(0),
        };
        self.matches = matches;
        self.matches.len()
    }

    fn clear_results(&mut self) {
        self.matches.clear();
        self.current_match_index = None;
    }

    /// Selects `index` modulo the match count; negative values wrap from the end.
    pub fn go_to_match(&mut self, index: isize) -> Option<&FindMatch> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }
        let wrapped = index.rem_euclid(len as isize) as usize;
        self.current_match_index = Some(wrapped);
        self.matches.get(wrapped)
    }

    pub fn next_match(&mut self) -> Option<&FindMatch> {
        let current = self.current_match_index.map_or(-1, |i| i as isize);
        self.go_to_match(current + 1)
    }

    pub fn previous_match(&mut self) -> Option<&FindMatch> {
        let current = self.current_match_index.map_or(0, |i| i as isize);
        self.go_to_match(current - 1)
    }

    /// New content for the tab owning the current match, with the match span
    /// replaced literally. `None` when the pattern is invalid or the match no
    /// longer sits at the recorded position in the tab's text.
    pub fn replace_current(&self, editor: &EditorState) -> Option<(TabId, String)> {
        if self.last_error.is_some() {
            return None;
        }
        let m = self.current_match()?;
        let tab = editor.tab_for_file(&m.file_id)?;
        let regex = compile_pattern(&self.options).ok()?;
        let mut live = Vec::new();
        find_in_tab(&regex, tab, &mut live);
        let still_there = live.iter().any(|l| {
            l.line_number == m.line_number
                && l.column == m.column
                && l.match_length == m.match_length
        });
        if !still_there {
            tracing::debug!(file_id = %m.file_id, "current match is stale");
            return None;
        }
        let content = replace_span(
            &tab.content,
            m.line_number,
            m.column,
            m.match_length,
            &self.options.replace_text,
        )?;
        Some((tab.id.clone(), content))
    }

    /// New content for every in-scope tab with at least one match, plus the
    /// per-tab replacement count.
    pub fn replace_all(
        &self,
        editor: &EditorState,
    ) -> Result<Vec<(TabId, String, usize)>, FindError> {
        if self.options.search_text.is_empty() {
            return Ok(Vec::new());
        }
        let regex = compile_pattern(&self.options)?;
        let expand = self.options.use_regex;
        Ok(scope_tabs(editor, self.options.scope())
            .into_iter()
            .filter_map(|tab| {
                replace_in_text(&regex, &tab.content, &self.options.replace_text, expand)
                    .map(|(content, count)| (tab.id.clone(), content, count))
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/search.rs"]
mod tests;
