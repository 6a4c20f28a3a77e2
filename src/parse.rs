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

//! Tokenizing of pattern slices.
//!
//! There is no syntax tree. The matcher works directly on ranges of the original pattern and asks
//! this module for the next atom of a range, or for the top-level alternatives of a range. All
//! positions handed out here are absolute offsets into the original pattern, so that group
//! numbers (which are keyed by the offset of their opening parenthesis) can be looked up at any
//! depth of the recursion.

use crate::Error;
use crate::ParseError;
use crate::Result;

/// A range of the original pattern, as absolute offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Offset of the first byte
    pub start: usize,
    /// Offset just past the last byte
    pub end: usize,
}

impl Span {
    pub(crate) fn new(start: usize, end: usize) -> Span {
        debug_assert!(start <= end);
        Span { start, end }
    }

    /// Whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The bytes of `pattern` covered by this span.
    pub fn slice<'p>(&self, pattern: &'p [u8]) -> &'p [u8] {
        &pattern[self.start..self.end]
    }

    /// The rest of this span, starting at the absolute offset `start`.
    pub(crate) fn rest_from(&self, start: usize) -> Span {
        Span::new(start.min(self.end), self.end)
    }
}

/// What an atom matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomKind {
    /// A single byte, either plain or escaped (`\.` is the literal `.`)
    Literal(u8),
    /// `.`, any byte
    Any,
    /// `\d`
    Digit,
    /// `\w`
    Word,
    /// `\1` to `\9`
    Backref(usize),
    /// `[...]` or `[^...]`
    Class,
    /// `(...)`
    Group,
}

/// The smallest matchable unit of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atom {
    /// What the atom matches
    pub kind: AtomKind,
    /// Absolute offset of the first byte of the atom
    pub start: usize,
    /// Absolute offset just past the atom, before any quantifier
    pub end: usize,
}

impl Atom {
    /// The body between the delimiters of a group or class.
    pub fn inner(&self) -> Span {
        Span::new(self.start + 1, self.end - 1)
    }
}

/// Tracks escapes and bracket nesting while walking a pattern left to right.
///
/// The alternation splitter, the group indexer and the group tokenizer all share these rules so
/// that they agree about which parentheses are structural.
#[derive(Debug, Default)]
pub(crate) struct Scanner {
    escaped: bool,
    brackets: usize,
}

impl Scanner {
    /// Feed the next byte. Returns false for a backslash and for the byte it escapes.
    pub(crate) fn step(&mut self, b: u8) -> bool {
        if self.escaped {
            self.escaped = false;
            return false;
        }
        match b {
            b'\\' => {
                self.escaped = true;
                return false;
            }
            b'[' => self.brackets += 1,
            b']' => self.brackets = self.brackets.saturating_sub(1),
            _ => (),
        }
        true
    }

    pub(crate) fn in_class(&self) -> bool {
        self.brackets > 0
    }
}

// index of the `)` closing the group opened at s[0]
fn closing_paren(s: &[u8]) -> Option<usize> {
    let mut scanner = Scanner::default();
    let mut depth = 0usize;
    for (i, &b) in s.iter().enumerate() {
        if !scanner.step(b) || scanner.in_class() {
            continue;
        }
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => (),
        }
    }
    None
}

// index of the first unescaped `]` after the `[` at s[0]
fn closing_bracket(s: &[u8]) -> Option<usize> {
    let mut escaped = false;
    for (i, &b) in s.iter().enumerate().skip(1) {
        if escaped {
            escaped = false;
        } else if b == b'\\' {
            escaped = true;
        } else if b == b']' {
            return Some(i);
        }
    }
    None
}

/// Extract the next atom from the start of `span`.
///
/// A quantifier following the atom is not part of it; the caller inspects the byte at
/// `atom.end` itself.
pub fn next_atom(pattern: &[u8], span: Span) -> Result<Atom> {
    let s = span.slice(pattern);
    let start = span.start;
    let err = |kind| Error::ParseError(start, kind);
    let first = *s.first().ok_or_else(|| err(ParseError::EmptyAtom))?;
    let (kind, len) = match first {
        b'(' => {
            let close = closing_paren(s).ok_or_else(|| err(ParseError::UnclosedOpenParen))?;
            (AtomKind::Group, close + 1)
        }
        b'+' | b'?' => return Err(err(ParseError::TargetNotRepeatable)),
        b'\\' => {
            let escaped = *s.get(1).ok_or_else(|| err(ParseError::TrailingBackslash))?;
            let kind = match escaped {
                b'd' => AtomKind::Digit,
                b'w' => AtomKind::Word,
                b'1'..=b'9' => AtomKind::Backref(usize::from(escaped - b'0')),
                _ => AtomKind::Literal(escaped),
            };
            (kind, 2)
        }
        b'[' => {
            let close = closing_bracket(s).ok_or_else(|| err(ParseError::UnclosedClass))?;
            if close == 1 {
                return Err(err(ParseError::EmptyClass));
            }
            (AtomKind::Class, close + 1)
        }
        b'.' => (AtomKind::Any, 1),
        b => (AtomKind::Literal(b), 1),
    };
    Ok(Atom {
        kind,
        start,
        end: start + len,
    })
}

/// Split `span` at every `|` that is neither escaped nor inside a group or class.
///
/// Without such a `|` the result is the whole span as its only element.
pub fn split_top_level(pattern: &[u8], span: Span) -> Vec<Span> {
    let mut branches = Vec::new();
    let mut scanner = Scanner::default();
    let mut parens = 0usize;
    let mut last = span.start;
    for (i, &b) in span.slice(pattern).iter().enumerate() {
        if !scanner.step(b) || scanner.in_class() {
            continue;
        }
        match b {
            b'(' => parens += 1,
            b')' => parens = parens.saturating_sub(1),
            b'|' if parens == 0 => {
                let ix = span.start + i;
                branches.push(Span::new(last, ix));
                last = ix + 1;
            }
            _ => (),
        }
    }
    branches.push(Span::new(last, span.end));
    branches
}
