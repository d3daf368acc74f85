// Copyright (C) 2020-2026 Andy Kurnia.

// Prefix tree over the loaded words.
//
// Nodes live in one arena. A node's children are listed by arena index and
// every node also remembers its parent index, which is only ever used to
// spell out the prefix leading to it. Nodes are never removed.

use super::error;

// "this letter at this offset of the word"
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Constraint {
    pub offset: usize,
    pub letter: u8,
}

impl Constraint {
    #[inline(always)]
    pub fn new(letter: u8, offset: usize) -> Self {
        Self { offset, letter }
    }
}

struct Node {
    letter: u8,
    is_terminal: bool,
    parent: Option<u32>,
    // sorted by letter.
    children: Vec<(u8, u32)>,
}

#[inline(always)]
fn find_arc(arcs: &[(u8, u32)], letter: u8) -> Result<usize, usize> {
    arcs.binary_search_by_key(&letter, |&(c, _)| c)
}

#[derive(Default)]
pub struct WordIndex {
    nodes: Vec<Node>,
    // first letter -> root node, sorted by letter.
    roots: Vec<(u8, u32)>,
    num_words: usize,
}

impl WordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new();
        index.load(words);
        index
    }

    // number of distinct words.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.num_words
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.num_words == 0
    }

    #[inline(always)]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn new_node(&mut self, letter: u8, parent: Option<u32>) -> u32 {
        let id = self.nodes.len() as u32;
        self.nodes.push(Node {
            letter,
            is_terminal: false,
            parent,
            children: Vec::new(),
        });
        id
    }

    pub fn load<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.load_word(word.as_ref());
        }
    }

    pub fn load_word(&mut self, word: &str) {
        let mut bytes = word.bytes();
        let Some(first) = bytes.next() else {
            return;
        };
        let mut p = match find_arc(&self.roots, first) {
            Ok(i) => self.roots[i].1,
            Err(i) => {
                let id = self.new_node(first, None);
                self.roots.insert(i, (first, id));
                id
            }
        };
        for c in bytes {
            p = match find_arc(&self.nodes[p as usize].children, c) {
                Ok(i) => self.nodes[p as usize].children[i].1,
                Err(i) => {
                    let id = self.new_node(c, Some(p));
                    self.nodes[p as usize].children.insert(i, (c, id));
                    id
                }
            };
        }
        let node = &mut self.nodes[p as usize];
        if !node.is_terminal {
            node.is_terminal = true;
            self.num_words += 1;
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        let mut bytes = word.bytes();
        let Some(first) = bytes.next() else {
            return false;
        };
        let Ok(i) = find_arc(&self.roots, first) else {
            return false;
        };
        let mut p = self.roots[i].1;
        for c in bytes {
            let children = &self.nodes[p as usize].children;
            match find_arc(children, c) {
                Ok(i) => p = children[i].1,
                Err(_) => return false,
            }
        }
        self.nodes[p as usize].is_terminal
    }

    // letters from the root down to and including p.
    fn spell_prefix(&self, p: u32, out: &mut Vec<u8>) {
        out.clear();
        let mut q = Some(p);
        while let Some(id) = q {
            let node = &self.nodes[id as usize];
            out.push(node.letter);
            q = node.parent;
        }
        out.reverse();
    }

    // every word passing through p, i.e. p's prefix followed by each
    // terminal path at or below p.
    fn collect_words_through(&self, p: u32, out: &mut Vec<String>) {
        let mut buf = Vec::new();
        self.spell_prefix(p, &mut buf);
        let base_len = buf.len() - 1;
        let mut stack = vec![(p, base_len)];
        while let Some((q, depth)) = stack.pop() {
            let node = &self.nodes[q as usize];
            buf.truncate(depth);
            buf.push(node.letter);
            if node.is_terminal {
                out.push(String::from_utf8_lossy(&buf).into_owned());
            }
            // reversed so that words come out in order.
            for &(_, child) in node.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }

    pub fn words(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.num_words);
        for &(_, root) in &self.roots {
            self.collect_words_through(root, &mut out);
        }
        out
    }

    pub fn find_words(&self, constraints: &[Constraint]) -> Vec<String> {
        let Some(last_offset) = constraints.iter().map(|c| c.offset).max() else {
            return Vec::new();
        };
        let mut required = vec![None; last_offset + 1];
        for constraint in constraints {
            match required[constraint.offset] {
                Some(c) if c != constraint.letter => return Vec::new(),
                _ => required[constraint.offset] = Some(constraint.letter),
            }
        }

        let mut level = self.roots.iter().map(|&(_, id)| id).collect::<Vec<_>>();
        let mut next_level = Vec::new();
        for (depth, &letter) in required.iter().enumerate() {
            if let Some(c) = letter {
                level.retain(|&p| self.nodes[p as usize].letter == c);
            }
            if depth == last_offset || level.is_empty() {
                break;
            }
            next_level.clear();
            for &p in &level {
                next_level.extend(self.nodes[p as usize].children.iter().map(|&(_, id)| id));
            }
            std::mem::swap(&mut level, &mut next_level);
        }

        let mut out = Vec::new();
        for &p in &level {
            self.collect_words_through(p, &mut out);
        }
        out
    }
}

// One word per line. Lowercase is accepted and folded; blank lines are
// skipped; anything else that is not A-Z is an error.
pub fn parse_word_list(giant_string: &str) -> error::Returns<Vec<String>> {
    let mut words = Vec::new();
    for (line_num, line) in giant_string.lines().enumerate() {
        let s = line.trim();
        if s.is_empty() {
            continue;
        }
        if let Some(bad) = s.chars().find(|c| !c.is_ascii_alphabetic()) {
            return_error!(
                WordList,
                "invalid character {:?} in {:?} on line {}",
                bad,
                s,
                line_num + 1
            );
        }
        words.push(s.to_ascii_uppercase());
    }
    Ok(words)
}
