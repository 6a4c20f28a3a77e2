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

//! Bracket character classes over bytes.
//!
//! A class body is a plain set of bytes: `[a-z]` is the three bytes `a`, `-` and `z`, and an
//! escape `\X` inside a body stands for the byte `X` itself, so `[\d]` is the byte `d`.

use bit_set::BitSet;

use crate::parse::Span;

/// `\w`
#[inline]
pub(crate) fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// A compiled `[...]` or `[^...]`.
#[derive(Debug, Clone)]
pub(crate) struct ByteClass {
    set: BitSet,
    negated: bool,
}

impl ByteClass {
    /// Compile the body of a class, the bytes between `[` and `]`.
    pub(crate) fn parse(pattern: &[u8], body: Span) -> ByteClass {
        let mut s = body.slice(pattern);
        let negated = s.first() == Some(&b'^');
        if negated {
            s = &s[1..];
        }
        let mut set = BitSet::with_capacity(256);
        let mut escaped = false;
        for &b in s {
            if b == b'\\' && !escaped {
                escaped = true;
                continue;
            }
            escaped = false;
            set.insert(usize::from(b));
        }
        // a lone trailing backslash stands for itself
        if escaped {
            set.insert(usize::from(b'\\'));
        }
        ByteClass { set, negated }
    }

    #[inline]
    pub(crate) fn matches(&self, b: u8) -> bool {
        self.set.contains(usize::from(b)) != self.negated
    }
}
