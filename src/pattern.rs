// Copyright (C) 2020-2026 Andy Kurnia.

// A line such as ___FETCH__T_R__ splits into fragments FETCH, T and R. Each
// fragment, and with more than two fragments each contiguous group of them,
// becomes one pattern ^[Σ]{0,lead}TEXT[Σ]{0,trail}$ that a word must match in
// full. Σ is every letter on the line or in the rack, and a group's TEXT keeps
// the exact spacing of its members (FETCH[Σ]{2}T).

use fancy_regex::Regex;

pub const BLANK: u8 = b'_';

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    pub offset: usize,
    // letters, with BLANK for the exact gaps inside a group.
    pub text: Vec<u8>,
    pub leading_space: usize,
    pub trailing_space: usize,
    // no fragment before / after this one on the line.
    pub is_starting: bool,
    pub is_ending: bool,
}

impl Fragment {
    // A side that faces another fragment keeps one blank back, so that a match
    // cannot run into that fragment's letters.
    #[inline(always)]
    pub fn lead_tolerance(&self) -> usize {
        self.leading_space - (!self.is_starting && self.leading_space > 0) as usize
    }

    #[inline(always)]
    pub fn trail_tolerance(&self) -> usize {
        self.trailing_space - (!self.is_ending && self.trailing_space > 0) as usize
    }

    #[inline(always)]
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

// Maximal letter runs, left to right.
pub fn segment(template: &[u8]) -> Vec<Fragment> {
    let mut fragments = Vec::<Fragment>::new();
    let len = template.len();
    let mut i = 0;
    while i < len {
        if template[i] == BLANK {
            i += 1;
            continue;
        }
        let start = i;
        while i < len && template[i] != BLANK {
            i += 1;
        }
        let leading_space = match fragments.last() {
            Some(prev) => start - prev.end(),
            None => start,
        };
        fragments.push(Fragment {
            offset: start,
            text: template[start..i].to_vec(),
            leading_space,
            trailing_space: 0,
            is_starting: fragments.is_empty(),
            is_ending: false,
        });
    }
    let num_fragments = fragments.len();
    for idx in 0..num_fragments {
        fragments[idx].trailing_space = if idx + 1 < num_fragments {
            fragments[idx + 1].offset - fragments[idx].end()
        } else {
            len - fragments[idx].end()
        };
    }
    if let Some(last) = fragments.last_mut() {
        last.is_ending = true;
    }
    fragments
}

// Merged fragments for every contiguous run of 2 or more fragments. Only done
// when there are more than two fragments.
pub fn group(fragments: &[Fragment], template: &[u8]) -> Vec<Fragment> {
    let num_fragments = fragments.len();
    let mut groups = Vec::new();
    if num_fragments <= 2 {
        return groups;
    }
    for group_size in 2..=num_fragments {
        for group_start in 0..=num_fragments - group_size {
            let first = &fragments[group_start];
            let last = &fragments[group_start + group_size - 1];
            groups.push(Fragment {
                offset: first.offset,
                text: template[first.offset..last.end()].to_vec(),
                leading_space: first.leading_space,
                trailing_space: last.trailing_space,
                is_starting: first.is_starting,
                is_ending: last.is_ending,
            });
        }
    }
    groups
}

#[derive(Debug)]
pub struct PatternError {
    pub expression: String,
    pub source: Box<fancy_regex::Error>,
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot compile {:?}: {}", self.expression, self.source)
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

#[derive(Clone, Debug)]
pub struct AnchoredPattern {
    // where the fragment (or group) starts on the line.
    pub offset: usize,
    regex: Regex,
}

impl AnchoredPattern {
    pub fn new(offset: usize, expression: String) -> Result<Self, PatternError> {
        match Regex::new(&expression) {
            Ok(regex) => Ok(Self { offset, regex }),
            Err(err) => Err(PatternError {
                expression,
                source: Box::new(err),
            }),
        }
    }

    #[inline(always)]
    pub fn expression(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, word: &str) -> bool {
        match self.regex.is_match(word) {
            Ok(matched) => matched,
            Err(err) => {
                log::warn!("matching {:?} against {}: {}", word, self.expression(), err);
                false
            }
        }
    }
}

// "[ACT]" for every distinct letter on the line or in the rack.
fn wildcard_class(template: &[u8], rack: &[u8]) -> String {
    let mut seen = [false; 256];
    for &c in template.iter().chain(rack) {
        if c != BLANK && c.is_ascii_alphanumeric() {
            seen[c as usize] = true;
        }
    }
    let mut class = String::from("[");
    for (c, _) in seen.iter().enumerate().filter(|&(_, &s)| s) {
        class.push(c as u8 as char);
    }
    class.push(']');
    class
}

pub fn render_expression(fragment: &Fragment, class: &str) -> String {
    use std::fmt::Write;

    let mut s = String::from("^");
    let lead = fragment.lead_tolerance();
    if lead > 0 {
        let _ = write!(s, "{}{{0,{}}}", class, lead);
    }
    let text = &fragment.text;
    let mut i = 0;
    while i < text.len() {
        if text[i] == BLANK {
            let gap_start = i;
            while i < text.len() && text[i] == BLANK {
                i += 1;
            }
            let _ = write!(s, "{}{{{}}}", class, i - gap_start);
        } else {
            s.push(text[i] as char);
            i += 1;
        }
    }
    let trail = fragment.trail_tolerance();
    if trail > 0 {
        let _ = write!(s, "{}{{0,{}}}", class, trail);
    }
    s.push('$');
    s
}

// All patterns for one line. Order carries no meaning.
pub fn compile(template: &[u8], rack: &[u8]) -> Vec<AnchoredPattern> {
    let fragments = segment(template);
    if fragments.is_empty() {
        return Vec::new();
    }
    let groups = group(&fragments, template);
    let class = wildcard_class(template, rack);
    let mut patterns = Vec::with_capacity(fragments.len() + groups.len());
    for fragment in fragments.iter().chain(groups.iter()) {
        match AnchoredPattern::new(fragment.offset, render_expression(fragment, &class)) {
            Ok(pattern) => patterns.push(pattern),
            Err(err) => log::warn!("skipping pattern: {}", err),
        }
    }
    patterns
}
