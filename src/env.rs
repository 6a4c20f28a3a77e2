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

//! Capture environment of a match attempt.
//!
//! Each branch of the search owns its environment. Before trying an alternative, the matcher
//! clones the environment of the branch point and hands the clone down; only when the
//! alternative leads to an overall match is the clone written back. A failed alternative simply
//! drops its clone, so sibling branches never observe each other's captures.
//!
//! Captures are stored as spans of the haystack rather than copies of the bytes: the haystack is
//! borrowed immutably for the whole search, so a span always denotes the bytes that were matched.

use std::ops::Range;

const UNSET: usize = usize::MAX;

/// Captured spans indexed by group number. Group 0 is the whole match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Env {
    /// Two slots per group, start and end. `UNSET` in the start slot means not captured.
    saves: Vec<usize>,
}

impl Env {
    pub(crate) fn new(n_groups: usize) -> Env {
        Env {
            saves: vec![UNSET; (n_groups + 1) * 2],
        }
    }

    /// The span captured by `group`, if any.
    pub(crate) fn get(&self, group: usize) -> Option<Range<usize>> {
        let slot = group.checked_mul(2)?;
        let lo = *self.saves.get(slot)?;
        if lo == UNSET {
            return None;
        }
        Some(lo..self.saves[slot + 1])
    }

    pub(crate) fn set(&mut self, group: usize, span: Range<usize>) {
        let slot = group * 2;
        if slot + 1 < self.saves.len() {
            self.saves[slot] = span.start;
            self.saves[slot + 1] = span.end;
        }
    }

    pub(crate) fn into_saves(self) -> Vec<usize> {
        self.saves
    }
}
