//! Reversed-word trie.
//!
//! Words are stored back to front so that "words ending in X" becomes a walk
//! from the root along the reverse of X. The multiway tree is kept in
//! leftmost-child / right-sibling form inside an arena: every node owns its
//! first child and its next sibling, and points back at its parent by index.

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("input is not alphabetic: {0:?}")]
    InvalidInput(String),

    #[error("cursor was invalidated by a delete; find the suffix again")]
    StaleCursor,
}

/// A lower-cased, reversed, non-empty run of ASCII letters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Reversed(Vec<u8>);

impl Reversed {
    pub fn parse(input: &str) -> Result<Self, Error> {
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(Error::InvalidInput(input.to_string()));
        }
        Ok(Self(input.bytes().rev().map(|b| b.to_ascii_lowercase()).collect()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; `parse` rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::str::FromStr for Reversed {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Displays the word the right way round.
impl std::fmt::Display for Reversed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &b in self.0.iter().rev() {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

const ROOT: NodeId = NodeId(0);

#[derive(Debug, Default)]
struct Node {
    letter: u8,
    is_end: bool,
    first_child: Option<NodeId>,
    next_sibling: Option<NodeId>,
    parent: Option<NodeId>,
}

/// The node reached by matching a suffix.
///
/// A cursor is only good until the next successful delete: pruning may free
/// the node it points at, so the trie refuses cursors from an older epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    node: NodeId,
    depth: usize,
    epoch: u64,
}

#[derive(serde::Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    pub words: Vec<String>,
    pub more: bool,
}

#[derive(Debug)]
pub struct Trie {
    nodes: slab::Slab<Node>,
    words: usize,
    epoch: u64,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        let mut nodes = slab::Slab::new();
        // The root is never removed, so it keeps the first key.
        let root = nodes.insert(Node::default());
        debug_assert_eq!(root, ROOT.0);
        Self {
            nodes,
            words: 0,
            epoch: 0,
        }
    }

    /// Number of stored words.
    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Number of live nodes, not counting the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn children(&self, parent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.node(parent).first_child, move |&id| {
            self.node(id).next_sibling
        })
    }

    fn find_child(&self, parent: NodeId, letter: u8) -> Option<NodeId> {
        self.children(parent).find(|&id| self.node(id).letter == letter)
    }

    fn descend(&self, from: NodeId, letters: &[u8]) -> Option<NodeId> {
        letters
            .iter()
            .try_fold(from, |node, &letter| self.find_child(node, letter))
    }

    /// `id` and its ancestors, nearest first, stopping short of the root.
    fn ancestry(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&id| self.node(id).parent)
            .take_while(|&id| id != ROOT)
    }


    /// Appends a new child at the end of `parent`'s sibling list.
    fn append_child(&mut self, parent: NodeId, letter: u8) -> NodeId {
        let last = self.children(parent).last();
        let id = NodeId(self.nodes.insert(Node {
            letter,
            parent: Some(parent),
            ..Node::default()
        }));
        match last {
            Some(last) => self.nodes[last.0].next_sibling = Some(id),
            None => self.nodes[parent.0].first_child = Some(id),
        }
        id
    }

    /// Splices `id` out of `parent`'s child list.
    fn unlink(&mut self, parent: NodeId, id: NodeId) {
        let next = self.node(id).next_sibling;
        if self.node(parent).first_child == Some(id) {
            self.nodes[parent.0].first_child = next;
            return;
        }
        let prev = self
            .children(parent)
            .find(|&sibling| self.node(sibling).next_sibling == Some(id));
        if let Some(prev) = prev {
            self.nodes[prev.0].next_sibling = next;
        }
    }

    fn check(&self, cursor: Cursor) -> Result<NodeId, Error> {
        if cursor.epoch != self.epoch {
            return Err(Error::StaleCursor);
        }
        Ok(cursor.node)
    }

    /// Normalizes `word` and stores it. Returns whether it was new.
    pub fn insert(&mut self, word: &str) -> Result<bool, Error> {
        Ok(self.insert_reversed(&Reversed::parse(word)?))
    }

    pub fn insert_reversed(&mut self, word: &Reversed) -> bool {
        debug_assert!(!word.is_empty());
        let mut node = ROOT;
        for &letter in word.as_bytes() {
            node = match self.find_child(node, letter) {
                Some(child) => child,
                None => self.append_child(node, letter),
            };
        }

        let node = &mut self.nodes[node.0];
        if node.is_end {
            return false;
        }
        node.is_end = true;
        self.words += 1;
        true
    }

    pub fn locate(&self, suffix: &Reversed) -> Option<Cursor> {
        let node = self.descend(ROOT, suffix.as_bytes())?;
        Some(Cursor {
            node,
            depth: suffix.len(),
            epoch: self.epoch,
        })
    }

    /// Word-end nodes at or below `cursor`, in pre-order.
    pub fn matches(&self, cursor: Cursor) -> Result<Matches<'_>, Error> {
        let start = self.check(cursor)?;
        Ok(Matches {
            trie: self,
            start,
            stack: vec![start],
        })
    }

    /// Returns up to `count` matches after skipping the first
    /// `already_skipped`, and whether any remain after those.
    pub fn enumerate(
        &self,
        cursor: Cursor,
        count: usize,
        already_skipped: usize,
    ) -> Result<Page, Error> {
        let mut matches = self.matches(cursor)?.skip(already_skipped);
        let words = matches
            .by_ref()
            .take(count)
            .map(|id| self.word_from_node(id))
            .collect();
        let more = matches.next().is_some();
        Ok(Page { words, more })
    }

    /// Reads letters upward to the root, which undoes the reversal.
    pub fn word_from_node(&self, id: NodeId) -> String {
        self.ancestry(id)
            .map(|id| self.node(id).letter as char)
            .collect()
    }

    pub fn word_at(&self, cursor: Cursor) -> Result<String, Error> {
        Ok(self.word_from_node(self.check(cursor)?))
    }

    /// Deletes `word`, which must end with the suffix `cursor` was located
    /// with. Returns `Ok(false)` if the word is not stored.
    pub fn delete_word(&mut self, word: &Reversed, cursor: Cursor) -> Result<bool, Error> {
        let anchor = self.check(cursor)?;
        let letters = word.as_bytes();
        let Some(rest) = letters.get(cursor.depth..) else {
            return Ok(false);
        };

        let extends_suffix = self
            .ancestry(anchor)
            .zip(letters[..cursor.depth].iter().rev())
            .all(|(id, &letter)| self.node(id).letter == letter);
        if !extends_suffix {
            return Ok(false);
        }

        Ok(self.delete_below(anchor, rest))
    }

    fn delete_below(&mut self, anchor: NodeId, rest: &[u8]) -> bool {
        let Some(target) = self.descend(anchor, rest) else {
            return false;
        };
        if !self.node(target).is_end {
            return false;
        }

        self.nodes[target.0].is_end = false;
        self.words -= 1;
        self.epoch += 1;

        let pruned = self.prune(target);
        log::trace!(pruned = pruned, nodes = self.node_count(); "deleted word");
        true
    }

    /// Frees `id` and then each ancestor for as long as the node is neither a
    /// word end nor has children. Never frees the root.
    fn prune(&mut self, mut id: NodeId) -> usize {
        let mut pruned = 0;
        loop {
            let node = self.node(id);
            if node.is_end || node.first_child.is_some() {
                break;
            }
            let Some(parent) = node.parent else {
                break;
            };
            self.unlink(parent, id);
            self.nodes.remove(id.0);
            pruned += 1;
            id = parent;
        }
        pruned
    }

    #[cfg(test)]
    fn assert_invariants(&self) {
        let mut live = 0;
        let mut ends = 0;
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            let mut letters = std::collections::HashSet::new();
            for child in self.children(id) {
                assert!(
                    letters.insert(self.node(child).letter),
                    "duplicate sibling letter under {id:?}"
                );
                assert_eq!(self.node(child).parent, Some(id));
                assert!(
                    self.node(child).is_end || self.node(child).first_child.is_some(),
                    "unpruned node {child:?}"
                );
                live += 1;
                if self.node(child).is_end {
                    ends += 1;
                }
                stack.push(child);
            }
        }
        assert_eq!(live, self.node_count());
        assert_eq!(ends, self.len());
        assert!(!self.node(ROOT).is_end);
    }
}

pub struct Matches<'a> {
    trie: &'a Trie,
    start: NodeId,
    stack: Vec<NodeId>,
}

impl Iterator for Matches<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let node = self.trie.node(id);
            // The start node's siblings belong to other suffixes.
            if id != self.start {
                if let Some(sibling) = node.next_sibling {
                    self.stack.push(sibling);
                }
            }
            if let Some(child) = node.first_child {
                self.stack.push(child);
            }
            if node.is_end {
                return Some(id);
            }
        }
        None
    }
}
