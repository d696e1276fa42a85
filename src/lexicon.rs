// Copyright (C) 2020-2024 Andy Kurnia.

use super::error::{GameError, Returns};
use super::letter_set::{self, LetterSet};
use std::collections::BTreeMap;
use std::io::BufRead;

/// A node of the dictionary trie. The root node is the lexicon.
///
/// Children are kept in letter order so that every traversal, and therefore
/// move enumeration, is deterministic for a given dictionary.
pub struct Node {
    label: Box<[u8]>,
    terminal: bool,
    children: BTreeMap<u8, Node>,
}

/// Hooks driving `Node::visit_pruned`. `enter` and `leave` must mutate any
/// external traversal state symmetrically: every recursive return unwinds to
/// the exact caller state.
pub trait PruneVisitor {
    fn valid_edge(&mut self, letter: u8) -> bool;
    fn enter(&mut self, letter: u8, child: &Node);
    fn leave(&mut self, letter: u8, child: &Node);
    fn stop(&mut self, node: &Node) -> bool;
    fn visit(&mut self, node: &Node);
}

impl Node {
    pub fn new() -> Node {
        Node {
            label: Box::from(&b""[..]),
            terminal: false,
            children: BTreeMap::new(),
        }
    }

    #[inline(always)]
    pub fn label(&self) -> &[u8] {
        &self.label
    }

    #[inline(always)]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Adds `word`, returning whether it was newly inserted.
    pub fn insert(&mut self, word: &[u8]) -> bool {
        if self.contains(word) {
            return false;
        }
        let mut curr = self;
        let mut label = curr.label.to_vec();
        for &letter in word {
            label.push(letter);
            curr = curr.children.entry(letter).or_insert_with(|| Node {
                label: label.clone().into_boxed_slice(),
                terminal: false,
                children: BTreeMap::new(),
            });
        }
        curr.terminal = true;
        true
    }

    /// Terminal-membership test.
    pub fn contains(&self, word: &[u8]) -> bool {
        self.follow(word).is_some_and(|node| node.terminal)
    }

    /// Walks the edges labeled by `path`, returning the node at the end of
    /// the path if every edge exists.
    pub fn follow(&self, path: &[u8]) -> Option<&Node> {
        let mut curr = self;
        for letter in path {
            curr = curr.children.get(letter)?;
        }
        Some(curr)
    }

    fn follow_mut(&mut self, path: &[u8]) -> Option<&mut Node> {
        let mut curr = self;
        for letter in path {
            curr = curr.children.get_mut(letter)?;
        }
        Some(curr)
    }

    /// Removes `word` if present, returning whether it was present.
    ///
    /// If a proper prefix of `word` is itself terminal, the first child after
    /// that prefix is detached; otherwise if the word ends on a leaf its top
    /// edge is detached; otherwise only the terminal flag is cleared.
    pub fn delete(&mut self, word: &[u8]) -> bool {
        if !self.contains(word) {
            return false;
        }
        let mut last_terminal_prefix = None;
        let mut curr = &*self;
        for (i, &letter) in word.iter().enumerate() {
            if curr.terminal {
                last_terminal_prefix = Some(i);
            }
            match curr.children.get(&letter) {
                Some(child) => curr = child,
                None => return false,
            }
        }
        match last_terminal_prefix {
            Some(prefix_len) => {
                if let Some(prefix_node) = self.follow_mut(&word[..prefix_len]) {
                    prefix_node.children.remove(&word[prefix_len]);
                }
            }
            None => {
                let word_is_leaf = self.follow(word).is_some_and(|node| node.children.is_empty());
                if word_is_leaf {
                    self.children.remove(&word[0]);
                } else if let Some(end_node) = self.follow_mut(word) {
                    end_node.terminal = false;
                }
            }
        }
        true
    }

    /// Returns the set of letters `L` for which `prefix + L + suffix` is a
    /// word. The empty set when `prefix` does not lie on the trie.
    pub fn cross_letters(&self, prefix: &[u8], suffix: &[u8]) -> LetterSet {
        let mut valid_letters = LetterSet::EMPTY;
        let middle_node = match self.follow(prefix) {
            Some(node) => node,
            None => return valid_letters,
        };
        for (&letter, child) in &middle_node.children {
            if child.follow(suffix).is_some_and(|node| node.terminal) {
                valid_letters.add(letter);
            }
        }
        valid_letters
    }

    /// Pruned depth-first traversal from the receiver node.
    ///
    /// Per node: `visit`, then unless `stop`, recurse into each child whose
    /// edge passes `valid_edge`, bracketed by `enter`/`leave`.
    pub fn visit_pruned<V: PruneVisitor>(&self, visitor: &mut V) {
        visitor.visit(self);
        if visitor.stop(self) {
            return;
        }
        for (&letter, child) in &self.children {
            if !visitor.valid_edge(letter) {
                continue;
            }
            visitor.enter(letter, child);
            child.visit_pruned(visitor);
            visitor.leave(letter, child);
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a lexicon from a word list with one word per line. Words are
/// case-folded; duplicates are silently ignored.
pub fn from_file(path: &str) -> Returns<Node> {
    let file = std::fs::File::open(path)?;
    from_reader(std::io::BufReader::new(file))
}

pub fn from_reader<R: BufRead>(reader: R) -> Returns<Node> {
    let mut lexicon = Node::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        let word = word.to_ascii_lowercase().into_bytes();
        if !word.iter().all(|&letter| letter_set::is_letter(letter)) {
            return Err(GameError::LoadError(format!(
                "word list entry {:?} is not letters-only",
                line.trim()
            )));
        }
        lexicon.insert(&word);
    }
    Ok(lexicon)
}

#[cfg(test)]
pub(crate) fn from_words(words: &[&str]) -> Node {
    let mut lexicon = Node::new();
    for word in words {
        lexicon.insert(word.as_bytes());
    }
    lexicon
}

#[cfg(test)]
mod tests {
    use super::*;

    // the reference word set exercised throughout the module tests.
    fn sample() -> Node {
        from_words(&[
            "cars", "cats", "car", "cat", "dogs", "dog", "done", "do", "ears", "ear", "eats",
            "eat", "be", "a",
        ])
    }

    #[test]
    fn insert_reports_newness() {
        let mut lexicon = Node::new();
        assert!(lexicon.insert(b"abc"));
        assert!(!lexicon.insert(b"abc"));
        assert!(lexicon.insert(b"ab"));
        assert!(lexicon.insert(b"abd"));
    }

    #[test]
    fn contains_requires_terminal() {
        let lexicon = sample();
        assert!(lexicon.contains(b"dog"));
        assert!(!lexicon.contains(b"ea")); // present but not terminal
        assert!(!lexicon.contains(b"missing"));
        assert!(!lexicon.contains(b""));
    }

    #[test]
    fn follow_reconstructs_labels() {
        let lexicon = sample();
        let node = lexicon.follow(b"ca").unwrap();
        assert_eq!(node.label(), b"ca");
        assert!(!node.is_terminal());
        let node = lexicon.follow(b"cat").unwrap();
        assert_eq!(node.label(), b"cat");
        assert!(node.is_terminal());
        assert!(lexicon.follow(b"cz").is_none());
        assert_eq!(lexicon.follow(b"").unwrap().label(), b"");
    }

    #[test]
    fn delete_empty_and_missing_words() {
        let mut lexicon = sample();
        assert!(!lexicon.delete(b""));
        assert!(!lexicon.delete(b"missing"));
        assert!(lexicon.contains(b"cars"));
    }

    #[test]
    fn delete_word_with_terminal_prefix_detaches_suffix() {
        let mut lexicon = sample();
        assert!(lexicon.delete(b"cars"));
        assert!(!lexicon.contains(b"cars"));
        assert!(lexicon.contains(b"car"));
        assert!(lexicon.follow(b"cars").is_none());
        assert_eq!(lexicon.cross_letters(b"ca", b"s"), LetterSet::from_letters(b"t"));
    }

    #[test]
    fn delete_word_that_is_a_prefix_clears_terminal_flag() {
        let mut lexicon = sample();
        assert!(lexicon.delete(b"car"));
        assert!(!lexicon.contains(b"car"));
        assert!(lexicon.contains(b"cars"));
        assert!(lexicon.follow(b"car").is_some());
    }

    #[test]
    fn delete_word_without_prefixes_detaches_branch() {
        let mut lexicon = sample();
        assert!(lexicon.delete(b"be"));
        assert!(!lexicon.contains(b"be"));
        assert!(lexicon.follow(b"b").is_none());
    }

    #[test]
    fn delete_twice_is_a_no_op() {
        let mut lexicon = sample();
        assert!(lexicon.delete(b"cars"));
        assert!(!lexicon.delete(b"cars"));
        assert!(lexicon.contains(b"car"));
    }

    #[test]
    fn cross_letters() {
        let lexicon = sample();
        assert_eq!(lexicon.cross_letters(b"ca", b"s"), LetterSet::from_letters(b"rt"));
        assert_eq!(lexicon.cross_letters(b"", b"o"), LetterSet::from_letters(b"d"));
        assert_eq!(lexicon.cross_letters(b"do", b""), LetterSet::from_letters(b"g"));
        // empty on both sides yields the single-letter words.
        assert_eq!(lexicon.cross_letters(b"", b""), LetterSet::from_letters(b"a"));
        assert_eq!(lexicon.cross_letters(b"", b"z"), LetterSet::EMPTY);
        assert_eq!(lexicon.cross_letters(b"z", b""), LetterSet::EMPTY);
        assert_eq!(lexicon.cross_letters(b"a", b""), LetterSet::EMPTY);
        // "don" is on the trie but not terminal.
        assert_eq!(lexicon.cross_letters(b"d", b"n"), LetterSet::EMPTY);
    }

    #[test]
    fn from_reader_folds_case_and_skips_duplicates() {
        let lexicon = from_reader(std::io::Cursor::new("CAT\ncat\n\n  dog  \n")).unwrap();
        assert!(lexicon.contains(b"cat"));
        assert!(lexicon.contains(b"dog"));
        assert!(from_reader(std::io::Cursor::new("ok\nnot ok\n")).is_err());
    }

    struct CollectingVisitor {
        rack: Vec<u8>,
        depth: usize,
        max_depth: usize,
        visited: Vec<String>,
    }

    impl PruneVisitor for CollectingVisitor {
        fn valid_edge(&mut self, letter: u8) -> bool {
            self.rack.contains(&letter)
        }
        fn enter(&mut self, letter: u8, _child: &Node) {
            let pos = self.rack.iter().position(|&l| l == letter).unwrap();
            self.rack.swap_remove(pos);
            self.depth += 1;
        }
        fn leave(&mut self, letter: u8, _child: &Node) {
            self.rack.push(letter);
            self.depth -= 1;
        }
        fn stop(&mut self, _node: &Node) -> bool {
            self.depth >= self.max_depth
        }
        fn visit(&mut self, node: &Node) {
            self.visited
                .push(String::from_utf8(node.label().to_vec()).unwrap());
        }
    }

    #[test]
    fn visit_pruned_prunes_and_restores_state() {
        let lexicon = sample();
        let mut visitor = CollectingVisitor {
            rack: b"cat".to_vec(),
            depth: 0,
            max_depth: 2,
            visited: vec![],
        };
        lexicon.visit_pruned(&mut visitor);
        // edges are pruned to rack letters, depth capped at two, and the
        // enumeration order is alphabetical.
        assert_eq!(visitor.visited, ["", "a", "c", "ca"].map(String::from).to_vec());
        let mut rack_after = visitor.rack.clone();
        rack_after.sort_unstable();
        assert_eq!(rack_after, b"act");
        assert_eq!(visitor.depth, 0);
    }
}
