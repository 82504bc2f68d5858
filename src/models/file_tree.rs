//! 文件树数据模型
//!
//! The workspace forest lives in a slotmap arena; parent/children links are arena
//! keys and the public surface speaks [`FileId`]. Every mutation validates first
//! and writes second, so a refused operation leaves the tree untouched.

use crate::kernel::language::LanguageId;
use crate::models::ids::{FileId, IdAllocator};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use std::cmp::Ordering;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

new_key_type! { struct NodeKey; }

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileTreeError {
    InvalidNodeId,
    ParentNotFolder,
    NotAFile,
    MoveIntoDescendant,
    DuplicateId(FileId),
}

impl fmt::Display for FileTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileTreeError::InvalidNodeId => write!(f, "invalid node id"),
            FileTreeError::ParentNotFolder => write!(f, "parent is not a folder"),
            FileTreeError::NotAFile => write!(f, "node is not a file"),
            FileTreeError::MoveIntoDescendant => {
                write!(f, "cannot move node into its own subtree")
            }
            FileTreeError::DuplicateId(id) => write!(f, "duplicate node id {}", id),
        }
    }
}

impl std::error::Error for FileTreeError {}

/// Milliseconds since the unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[derive(Debug, Clone)]
struct Node {
    id: FileId,
    kind: NodeKind,
    name: String,
    parent: Option<NodeKey>,
    content: Option<String>,
    language: Option<LanguageId>,
    children: Option<Vec<NodeKey>>,
    expanded: bool,
    created_at: u64,
    updated_at: u64,
}

impl Node {
    fn new(id: FileId, name: String, kind: NodeKind, parent: Option<NodeKey>, now: u64) -> Self {
        let (content, language, children) = match kind {
            NodeKind::File => (
                Some(String::new()),
                Some(LanguageId::from_file_name(&name)),
                None,
            ),
            NodeKind::Folder => (None, None, Some(Vec::new())),
        };
        Self {
            id,
            kind,
            name,
            parent,
            content,
            language,
            children,
            expanded: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Serialized form of a node and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    pub id: FileId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub parent_id: Option<FileId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguageId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_expanded: Option<bool>,
    #[serde(default)]
    pub created_at: u64,
    #[serde(default)]
    pub updated_at: u64,
}

/// Borrowed view of one node.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a FileTree,
    node: &'a Node,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> &'a FileId {
        &self.node.id
    }

    pub fn name(&self) -> &'a str {
        &self.node.name
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind
    }

    pub fn is_folder(&self) -> bool {
        self.node.kind == NodeKind::Folder
    }

    pub fn content(&self) -> Option<&'a str> {
        self.node.content.as_deref()
    }

    pub fn language(&self) -> Option<LanguageId> {
        self.node.language
    }

    pub fn is_expanded(&self) -> bool {
        self.node.expanded
    }

    pub fn created_at(&self) -> u64 {
        self.node.created_at
    }

    pub fn updated_at(&self) -> u64 {
        self.node.updated_at
    }

    pub fn parent_id(&self) -> Option<&'a FileId> {
        let tree = self.tree;
        let parent = self.node.parent?;
        tree.arena.get(parent).map(|n| &n.id)
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        let node = self.node;
        node.children
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(move |&key| tree.node_ref(key))
    }

    pub fn to_node(&self) -> FileNode {
        FileNode {
            id: self.node.id.clone(),
            name: self.node.name.clone(),
            kind: self.node.kind,
            parent_id: self.parent_id().cloned(),
            content: self.node.content.clone(),
            language: self.node.language,
            children: self
                .node
                .children
                .as_ref()
                .map(|_| self.children().map(|c| c.to_node()).collect()),
            is_expanded: self.is_folder().then_some(self.node.expanded),
            created_at: self.node.created_at,
            updated_at: self.node.updated_at,
        }
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.node.id)
            .field("name", &self.node.name)
            .field("kind", &self.node.kind)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct FileTree {
    arena: SlotMap<NodeKey, Node>,
    roots: Vec<NodeKey>,
    index: FxHashMap<FileId, NodeKey>,
    ids: IdAllocator,
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTree {
    pub fn new() -> Self {
        Self {
            arena: SlotMap::with_key(),
            roots: Vec::new(),
            index: FxHashMap::default(),
            ids: IdAllocator::new('f'),
        }
    }

    /// Rebuilds a tree from a serialized forest. `parentId` is recomputed from
    /// structure; children listed under a file are ignored.
    pub fn from_nodes(nodes: Vec<FileNode>) -> Result<Self, FileTreeError> {
        let mut tree = Self::new();
        for node in nodes {
            tree.attach_snapshot(node, None)?;
        }
        Ok(tree)
    }

    pub fn to_nodes(&self) -> Vec<FileNode> {
        self.roots().map(|n| n.to_node()).collect()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: &FileId) -> bool {
        self.index.contains_key(id)
    }

    pub fn roots(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.roots.iter().filter_map(|&key| self.node_ref(key))
    }

    pub fn ids(&self) -> impl Iterator<Item = &FileId> + '_ {
        self.arena.values().map(|n| &n.id)
    }

    pub fn get(&self, id: &FileId) -> Option<NodeRef<'_>> {
        let key = *self.index.get(id)?;
        self.node_ref(key)
    }

    /// Resolves a slash-delimited path of names from the roots. Empty segments
    /// are ignored; the first sibling with a matching name wins.
    pub fn find_by_path(&self, path: &str) -> Option<NodeRef<'_>> {
        let mut parts = path.split('/').filter(|p| !p.is_empty()).peekable();
        let mut siblings: &[NodeKey] = &self.roots;
        while let Some(part) = parts.next() {
            let key = siblings
                .iter()
                .copied()
                .find(|&k| self.arena.get(k).is_some_and(|n| n.name == part))?;
            if parts.peek().is_none() {
                return self.node_ref(key);
            }
            siblings = self.arena.get(key)?.children.as_deref()?;
        }
        None
    }

    pub fn insert(
        &mut self,
        parent: Option<&FileId>,
        name: impl Into<String>,
        kind: NodeKind,
    ) -> Result<FileId, FileTreeError> {
        let parent_key = match parent {
            Some(parent_id) => {
                let key = self.key(parent_id)?;
                if !self.is_folder_key(key) {
                    return Err(FileTreeError::ParentNotFolder);
                }
                Some(key)
            }
            None => None,
        };

        let id = self.alloc_id();
        let now = now_millis();
        let key = self
            .arena
            .insert(Node::new(id.clone(), name.into(), kind, parent_key, now));
        self.index.insert(id.clone(), key);
        self.link(key, parent_key, now);
        Ok(id)
    }

    pub fn rename(&mut self, id: &FileId, new_name: impl Into<String>) -> Result<(), FileTreeError> {
        let key = self.key(id)?;
        let node = self
            .arena
            .get_mut(key)
            .ok_or(FileTreeError::InvalidNodeId)?;
        let new_name = new_name.into();
        if node.kind == NodeKind::File {
            node.language = Some(LanguageId::from_file_name(&new_name));
        }
        node.name = new_name;
        node.updated_at = now_millis();
        Ok(())
    }

    pub fn set_content(&mut self, id: &FileId, content: String) -> Result<(), FileTreeError> {
        let key = self.key(id)?;
        let node = self
            .arena
            .get_mut(key)
            .ok_or(FileTreeError::InvalidNodeId)?;
        if node.kind != NodeKind::File {
            return Err(FileTreeError::NotAFile);
        }
        node.content = Some(content);
        node.updated_at = now_millis();
        Ok(())
    }

    /// Removes a node and its subtree. Returns every removed id.
    pub fn remove(&mut self, id: &FileId) -> Result<Vec<FileId>, FileTreeError> {
        let key = self.key(id)?;
        self.unlink(key);

        let mut removed = Vec::new();
        let mut stack = vec![key];
        while let Some(node_key) = stack.pop() {
            if let Some(node) = self.arena.remove(node_key) {
                if let Some(children) = node.children {
                    stack.extend(children);
                }
                self.index.remove(&node.id);
                removed.push(node.id);
            }
        }
        Ok(removed)
    }

    /// Reattaches a node at the end of `new_parent`'s children (or the root
    /// sequence). Refuses targets inside the node's own subtree.
    pub fn move_to(&mut self, id: &FileId, new_parent: Option<&FileId>) -> Result<(), FileTreeError> {
        let key = self.key(id)?;
        let target = match new_parent {
            Some(parent_id) => {
                let parent_key = self.key(parent_id)?;
                if self.is_same_or_ancestor(key, parent_key) {
                    return Err(FileTreeError::MoveIntoDescendant);
                }
                if !self.is_folder_key(parent_key) {
                    return Err(FileTreeError::ParentNotFolder);
                }
                Some(parent_key)
            }
            None => None,
        };

        self.unlink(key);
        let now = now_millis();
        if let Some(node) = self.arena.get_mut(key) {
            node.parent = target;
            node.updated_at = now;
        }
        self.link(key, target, now);
        Ok(())
    }

    /// Flips `isExpanded` on a folder. Returns false for files and unknown ids.
    pub fn toggle_expanded(&mut self, id: &FileId) -> bool {
        let Some(&key) = self.index.get(id) else {
            return false;
        };
        match self.arena.get_mut(key) {
            Some(node) if node.kind == NodeKind::Folder => {
                node.expanded = !node.expanded;
                true
            }
            _ => false,
        }
    }

    pub fn set_expanded(&mut self, id: &FileId, expanded: bool) -> bool {
        let Some(&key) = self.index.get(id) else {
            return false;
        };
        match self.arena.get_mut(key) {
            Some(node) if node.kind == NodeKind::Folder && node.expanded != expanded => {
                node.expanded = expanded;
                true
            }
            _ => false,
        }
    }

    fn node_ref(&self, key: NodeKey) -> Option<NodeRef<'_>> {
        self.arena.get(key).map(|node| NodeRef { tree: self, node })
    }

    fn key(&self, id: &FileId) -> Result<NodeKey, FileTreeError> {
        self.index
            .get(id)
            .copied()
            .ok_or(FileTreeError::InvalidNodeId)
    }

    fn is_folder_key(&self, key: NodeKey) -> bool {
        self.arena
            .get(key)
            .is_some_and(|n| n.kind == NodeKind::Folder)
    }

    fn alloc_id(&mut self) -> FileId {
        let index = &self.index;
        FileId::new(self.ids.alloc(|raw| index.contains_key(raw)))
    }

    fn is_same_or_ancestor(&self, ancestor: NodeKey, mut descendant: NodeKey) -> bool {
        loop {
            if descendant == ancestor {
                return true;
            }
            match self.arena.get(descendant).and_then(|n| n.parent) {
                Some(parent) => descendant = parent,
                None => return false,
            }
        }
    }

    fn link(&mut self, key: NodeKey, parent: Option<NodeKey>, now: u64) {
        match parent.and_then(|p| self.arena.get_mut(p)) {
            Some(parent_node) => {
                if let Some(children) = parent_node.children.as_mut() {
                    children.push(key);
                }
                parent_node.updated_at = now;
            }
            None => self.roots.push(key),
        }
    }

    fn unlink(&mut self, key: NodeKey) {
        let parent = self.arena.get(key).and_then(|n| n.parent);
        match parent.and_then(|p| self.arena.get_mut(p)) {
            Some(parent_node) => {
                if let Some(children) = parent_node.children.as_mut() {
                    children.retain(|&k| k != key);
                }
            }
            None => self.roots.retain(|&k| k != key),
        }
    }

    fn attach_snapshot(
        &mut self,
        snapshot: FileNode,
        parent: Option<NodeKey>,
    ) -> Result<(), FileTreeError> {
        if self.index.contains_key(&snapshot.id) {
            return Err(FileTreeError::DuplicateId(snapshot.id));
        }

        let FileNode {
            id,
            name,
            kind,
            content,
            language,
            children,
            is_expanded,
            created_at,
            updated_at,
            ..
        } = snapshot;

        let mut node = Node::new(id.clone(), name, kind, parent, created_at);
        node.updated_at = updated_at;
        match kind {
            NodeKind::File => {
                node.content = Some(content.unwrap_or_default());
                if let Some(language) = language {
                    node.language = Some(language);
                }
            }
            NodeKind::Folder => node.expanded = is_expanded.unwrap_or(false),
        }

        let key = self.arena.insert(node);
        self.index.insert(id, key);
        match parent.and_then(|p| self.arena.get_mut(p)) {
            Some(parent_node) => {
                if let Some(siblings) = parent_node.children.as_mut() {
                    siblings.push(key);
                }
            }
            None => self.roots.push(key),
        }

        if kind == NodeKind::Folder {
            for child in children.unwrap_or_default() {
                self.attach_snapshot(child, Some(key))?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTreeRow {
    pub id: FileId,
    pub depth: u16,
    pub name: String,
    pub is_folder: bool,
    pub is_expanded: bool,
    pub language: Option<LanguageId>,
}

/// Folders before files, then names in case-insensitive order with lowercase
/// first on ties.
pub fn display_order(a_kind: NodeKind, a_name: &str, b_kind: NodeKind, b_name: &str) -> Ordering {
    match (a_kind, b_kind) {
        (NodeKind::Folder, NodeKind::File) => Ordering::Less,
        (NodeKind::File, NodeKind::Folder) => Ordering::Greater,
        _ => a_name
            .to_lowercase()
            .cmp(&b_name.to_lowercase())
            .then_with(|| b_name.cmp(a_name)),
    }
}

impl FileTree {
    /// Visible rows: roots, plus the children of expanded folders.
    pub fn flatten_for_view(&self) -> Vec<FileTreeRow> {
        self.flatten(false)
    }

    /// Every node, as if all folders were expanded.
    pub fn flatten_all(&self) -> Vec<FileTreeRow> {
        self.flatten(true)
    }

    fn flatten(&self, expand_all: bool) -> Vec<FileTreeRow> {
        let mut result = Vec::with_capacity(self.arena.len());
        let mut stack: Vec<(NodeKey, u16)> = self
            .sorted_for_display(&self.roots)
            .into_iter()
            .rev()
            .map(|key| (key, 0))
            .collect();

        while let Some((key, depth)) = stack.pop() {
            let Some(node) = self.arena.get(key) else {
                continue;
            };
            result.push(FileTreeRow {
                id: node.id.clone(),
                depth,
                name: node.name.clone(),
                is_folder: node.kind == NodeKind::Folder,
                is_expanded: node.expanded,
                language: node.language,
            });

            if node.expanded || expand_all {
                if let Some(children) = &node.children {
                    for child in self.sorted_for_display(children).into_iter().rev() {
                        stack.push((child, depth.saturating_add(1)));
                    }
                }
            }
        }

        result
    }

    fn sorted_for_display(&self, keys: &[NodeKey]) -> Vec<NodeKey> {
        let mut sorted = keys.to_vec();
        sorted.sort_by(|&a, &b| match (self.arena.get(a), self.arena.get(b)) {
            (Some(a), Some(b)) => display_order(a.kind, &a.name, b.kind, &b.name),
            _ => Ordering::Equal,
        });
        sorted
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_tree.rs"]
mod tests;
