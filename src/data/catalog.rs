//! The detective's notebook
//!
//! Collected clues are kept in a binary search tree keyed by their text, so
//! the notebook can always be read back in alphabetical order. Text is
//! compared byte by byte, the same order `str::cmp` gives.

use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ClueNode {
    text: String,
    left: Option<Box<ClueNode>>,
    right: Option<Box<ClueNode>>,
}

impl ClueNode {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            left: None,
            right: None,
        }
    }
}

/// Ordered set of collected clues
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClueCatalog {
    root: Option<Box<ClueNode>>,
}

impl ClueCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a clue.
    ///
    /// Returns `true` if the clue was new. A clue already in the catalog
    /// leaves the tree untouched.
    pub fn insert(&mut self, text: &str) -> bool {
        insert_at(&mut self.root, text)
    }

    pub fn contains(&self, text: &str) -> bool {
        let mut node = self.root.as_deref();
        while let Some(current) = node {
            node = match text.cmp(current.text.as_str()) {
                Ordering::Less => current.left.as_deref(),
                Ordering::Greater => current.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Number of clues, counted by walking the whole tree
    pub fn count(&self) -> usize {
        fn walk(node: Option<&ClueNode>) -> usize {
            node.map_or(0, |n| 1 + walk(n.left.as_deref()) + walk(n.right.as_deref()))
        }
        walk(self.root.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Clues in ascending order.
    ///
    /// The iterator is lazy and borrows the catalog; call again to restart.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }
}

fn insert_at(link: &mut Option<Box<ClueNode>>, text: &str) -> bool {
    match link {
        None => {
            *link = Some(Box::new(ClueNode::new(text)));
            true
        }
        Some(node) => match text.cmp(node.text.as_str()) {
            Ordering::Less => insert_at(&mut node.left, text),
            Ordering::Greater => insert_at(&mut node.right, text),
            Ordering::Equal => false,
        },
    }
}

/// In-order walk over a [`ClueCatalog`]
pub struct Iter<'a> {
    stack: Vec<&'a ClueNode>,
}

impl<'a> Iter<'a> {
    fn push_left_spine(&mut self, mut node: Option<&'a ClueNode>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(node.text.as_str())
    }
}

impl<'a> IntoIterator for &'a ClueCatalog {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
