// Copyright 2016 The Fancy Regex Authors.
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! Compile-time analysis of a pattern: group numbering and structural validation.

use std::collections::HashMap;

use crate::class::ByteClass;
use crate::parse::{next_atom, split_top_level, AtomKind, Scanner, Span};
use crate::Result;

/// Group number by the absolute offset of the group's opening parenthesis.
pub type GroupIndex = HashMap<usize, usize>;

/// What the matcher needs to know about a pattern, see [`analyze`].
#[derive(Debug, Clone)]
pub struct Info {
    pub(crate) groups: GroupIndex,
    pub(crate) n_groups: usize,
    /// Compiled classes by the offset of their `[`
    pub(crate) classes: HashMap<usize, ByteClass>,
    /// Pattern starts with `^`
    pub(crate) anchored: bool,
}

/// Number every `(` outside of a class, in order of appearance, starting at 1.
pub fn build_group_index(pattern: &[u8]) -> GroupIndex {
    let mut groups = GroupIndex::new();
    let mut scanner = Scanner::default();
    for (i, &b) in pattern.iter().enumerate() {
        if scanner.step(b) && !scanner.in_class() && b == b'(' {
            let n = groups.len() + 1;
            groups.insert(i, n);
        }
    }
    groups
}

struct Analyzer<'p> {
    pattern: &'p [u8],
    classes: HashMap<usize, ByteClass>,
}

impl<'p> Analyzer<'p> {
    // Walks the pattern the same way the matcher does, so every atom the matcher can reach has
    // been tokenized once here.
    fn visit(&mut self, mut span: Span) -> Result<()> {
        loop {
            let s = span.slice(self.pattern);
            if s.is_empty() || s == b"$" {
                return Ok(());
            }
            let branches = split_top_level(self.pattern, span);
            if branches.len() > 1 {
                for branch in branches {
                    self.visit(branch)?;
                }
                return Ok(());
            }
            let atom = next_atom(self.pattern, span)?;
            match atom.kind {
                AtomKind::Class => {
                    let class = ByteClass::parse(self.pattern, atom.inner());
                    self.classes.insert(atom.start, class);
                }
                AtomKind::Group => self.visit(atom.inner())?,
                _ => (),
            }
            let rest = match self.pattern[atom.end..span.end].first() {
                Some(b'?') | Some(b'+') => atom.end + 1,
                _ => atom.end,
            };
            span = span.rest_from(rest);
        }
    }
}

/// Validate the pattern and collect what the matcher needs to look up.
pub fn analyze(pattern: &[u8]) -> Result<Info> {
    let anchored = pattern.first() == Some(&b'^');
    let mut analyzer = Analyzer {
        pattern,
        classes: HashMap::new(),
    };
    analyzer.visit(Span::new(usize::from(anchored), pattern.len()))?;
    let groups = build_group_index(pattern);
    Ok(Info {
        n_groups: groups.len(),
        groups,
        classes: analyzer.classes,
        anchored,
    })
}
