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

/*!
A small backtracking regex engine for matching lines of bytes, with capture groups and
backreferences.

There is no automaton and no syntax tree. The pattern is validated once when it is compiled, and
then interpreted directly by a recursive matcher that backtracks through quantifiers, alternatives
and capture groups. That keeps the engine small, but the running time can be exponential in the
length of the text for patterns such as `(\w+)(\w+)(\w+)x`. See
[`RegexBuilder::backtrack_limit`] for a way to bound it.

# Usage

Compile a pattern, then ask whether it matches somewhere in a line:

```rust
use linematch::Regex;

let re = Regex::new(r"^(\w+) \1$").unwrap();
assert!(re.is_match(b"foo foo").unwrap());
assert!(!re.is_match(b"foo bar").unwrap());
```

Like grep, a pattern matches if it matches anywhere in the text; use `^` and `$` to match the whole
line.

## Example: Finding the position of a match

```rust
use linematch::Regex;

let re = Regex::new(r"(\d)\1").unwrap();
let m = re.find(b"foo 22").unwrap().expect("no match");

assert_eq!(m.start(), 4);
assert_eq!(m.end(), 6);
assert_eq!(m.as_bytes(), b"22");
```

## Example: Capturing groups

```rust
use linematch::Regex;

let re = Regex::new(r"(\w+)@(\w+)").unwrap();
let caps = re.captures(b"mail: joe@example").unwrap().expect("no match");

assert_eq!(&caps[1], b"joe");
assert_eq!(&caps[2], b"example");
```

# Syntax

`x`
: the literal byte `x` \
`.`
: any byte \
`\d`
: ASCII digit (`[0-9]`) \
`\w`
: ASCII word byte (`[0-9A-Za-z_]`) \
`\x`
: for any other `x`, the literal `x`, e.g. `\.` or `\(` \
`[abc]`, `[^abc]`
: byte class and negated byte class; the body is a plain set of bytes, so `[a-z]` is `a`, `-`
  and `z`, and `\x` inside a body is the literal `x`

`^`
: at the start of the pattern, anchors the match to the start of the text \
`$`
: at the end of the pattern (or of an alternative), anchors the match to the end of the text;
  at the end of a group body, to the end of the group

`x?`
: zero or one `x`, one preferred \
`x+`
: one or more `x`, as many as possible

Quantifiers apply to the immediately preceding atom: a byte, an escape, a class, or a whole group.

`(exp)`
: capture group, numbered by the position of its opening parenthesis \
`a|b`
: `a` or `b`, first alternative preferred \
`\1` to `\9`
: backreference, the exact bytes the group captured

# Differences from other engines

A group that is the operand of `?` or `+` matches the first way its body can match, and does not
backtrack into that choice later. An unquantified group tries every length, longest first, until
the rest of the pattern matches.
*/

#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]

use std::iter::FusedIterator;
use std::ops::{Index, Range};
use std::slice::ChunksExact;
use std::str::FromStr;
use std::sync::Arc;

use vm::{Prog, Session, DEFAULT_BACKTRACK_LIMIT};

mod analyze;
mod class;
mod env;
mod error;
mod parse;
mod vm;

pub use crate::error::{Error, ParseError, Result, RuntimeError};

// the public API

/// A compiled regular expression.
#[derive(Debug, Clone)]
pub struct Regex {
    prog: Arc<Prog>,
    options: RegexOptions,
}

impl Regex {
    /// Parse and compile a regex with default options, see [`RegexBuilder`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the pattern could not be parsed.
    #[inline]
    pub fn new(re: impl Into<Vec<u8>>) -> Result<Regex> {
        RegexBuilder::new().build(re)
    }

    fn new_with_options(pattern: Vec<u8>, options: RegexOptions) -> Result<Regex> {
        let prog = Prog::new(pattern)?;
        Ok(Regex {
            prog: Arc::new(prog),
            options,
        })
    }

    /// Returns the original pattern used to create this regex.
    #[must_use]
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.prog.pattern()
    }

    /// Check if the regex matches the input text.
    ///
    /// # Example
    ///
    /// Test if some text contains the same word twice:
    ///
    /// ```rust
    /// # use linematch::Regex;
    /// let re = Regex::new(r"(\w+) \1").unwrap();
    /// assert!(re.is_match(b"mirror mirror on the wall").unwrap());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an [`Error::RuntimeError`] for any runtime error occurred.
    #[inline]
    pub fn is_match(&self, text: &[u8]) -> Result<bool> {
        Ok(self.session(text).run(0)?.is_some())
    }

    /// Find the first match in the input text.
    ///
    /// If you have capturing groups in your regex that you want to extract, use the
    /// [`Regex::captures()`] method.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::RuntimeError`] for any runtime error occurred.
    #[inline]
    pub fn find<'t>(&self, text: &'t [u8]) -> Result<Option<Match<'t>>> {
        self.find_at(text, 0)
    }

    /// Returns the first match in `text` that starts at or after the byte position `start`.
    ///
    /// Unlike searching `&text[start..]`, anchors still refer to the whole text: a pattern
    /// starting with `^` never matches when `start` is not 0, and `$` only matches at the end of
    /// `text`.
    ///
    /// ```
    /// # use linematch::Regex;
    /// let re = Regex::new(r"\d+$").unwrap();
    /// let mat = re.find_at(b"12 test 345", 1).unwrap().unwrap();
    ///
    /// assert_eq!(mat.range(), 8..11);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an [`Error::RuntimeError`] for any runtime error occurred.
    pub fn find_at<'t>(&self, text: &'t [u8], start: usize) -> Result<Option<Match<'t>>> {
        let result = self.session(text).run(start)?;
        Ok(result.map(|saves| Match {
            text,
            start: saves[0],
            end: saves[1],
        }))
    }

    /// Returns an iterator for each successive non-overlapping match in `text`.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use linematch::Regex;
    /// let re = Regex::new(r"\d+").unwrap();
    /// let nums: Vec<_> = re
    ///     .find_iter(b"1, 22 and 333")
    ///     .map(|m| m.unwrap().as_bytes())
    ///     .collect();
    /// assert_eq!(nums, [&b"1"[..], &b"22"[..], &b"333"[..]]);
    /// ```
    #[must_use]
    #[inline]
    pub fn find_iter<'r, 't>(&'r self, text: &'t [u8]) -> Matches<'r, 't> {
        Matches {
            re: self,
            text,
            last_end: 0,
            last_match: None,
        }
    }

    /// Returns the capture groups for the first match in `text`.
    ///
    /// If no match is found, then `Ok(None)` is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linematch::Regex;
    /// let re = Regex::new(r"(a)?(b)").unwrap();
    /// let caps = re.captures(b"xb").unwrap().unwrap();
    ///
    /// assert_eq!(caps.get(0).unwrap().as_bytes(), b"b");
    /// assert!(caps.get(1).is_none());
    /// assert_eq!(caps.get(2).unwrap().range(), 1..2);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an [`Error::RuntimeError`] for any runtime error occurred.
    pub fn captures<'t>(&self, text: &'t [u8]) -> Result<Option<Captures<'t>>> {
        let result = self.session(text).run(0)?;
        Ok(result.map(|saves| Captures { text, saves }))
    }

    /// Returns the number of captures, including the implicit capture of the entire expression.
    #[must_use]
    #[inline]
    pub fn captures_len(&self) -> usize {
        self.prog.n_groups() + 1
    }

    fn session<'t>(&self, text: &'t [u8]) -> Session<'_, 't> {
        Session::new(&self.prog, text, self.options.backtrack_limit)
    }
}

impl FromStr for Regex {
    type Err = Error;

    /// Attempts to parse a string into a regular expression
    fn from_str(s: &str) -> Result<Regex> {
        Regex::new(s)
    }
}

#[derive(Copy, Clone, Debug)]
struct RegexOptions {
    backtrack_limit: usize,
}

impl Default for RegexOptions {
    fn default() -> Self {
        RegexOptions {
            backtrack_limit: DEFAULT_BACKTRACK_LIMIT,
        }
    }
}

/// A builder for a `Regex` to allow configuring options.
#[derive(Debug, Copy, Clone, Default)]
pub struct RegexBuilder(RegexOptions);

impl RegexBuilder {
    /// Create a new regex builder with default options.
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [`Regex`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the pattern could not be parsed.
    #[inline]
    pub fn build(&self, pattern: impl Into<Vec<u8>>) -> Result<Regex> {
        Regex::new_with_options(pattern.into(), self.0)
    }

    /// Limit for how many times a search may give up on a possibility and try the next one. If
    /// this limit is exceeded, execution returns an [`Error::RuntimeError`] with
    /// [`RuntimeError::BacktrackLimitExceeded`].
    /// This is for preventing a regex with catastrophic backtracking to run for too long.
    ///
    /// Default is no limit.
    #[inline]
    pub fn backtrack_limit(&mut self, limit: usize) -> &mut Self {
        self.0.backtrack_limit = limit;
        self
    }
}

/// A single match of a regex or group in an input text
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Match<'t> {
    text: &'t [u8],
    start: usize,
    end: usize,
}

impl<'t> Match<'t> {
    /// Returns the starting byte offset of the match in the text.
    #[must_use]
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the ending byte offset of the match in the text.
    #[must_use]
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns the range over the starting and ending byte offsets of the match in text.
    #[must_use]
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns the matched bytes.
    #[must_use]
    #[inline]
    pub fn as_bytes(&self) -> &'t [u8] {
        &self.text[self.start..self.end]
    }

    /// Returns the length, in bytes, of this match.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.range().len()
    }

    /// Returns true if and only if this match has a length of zero.
    ///
    /// Note that an empty match can only occur when the regex itself can match the empty string.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.range().is_empty()
    }
}

impl<'t> AsRef<[u8]> for Match<'t> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<'t> From<Match<'t>> for Range<usize> {
    fn from(m: Match<'t>) -> Range<usize> {
        m.range()
    }
}

/// An iterator over all non-overlapping matches for a particular text.
///
/// The iterator yields a `Result<Match>`. The iterator stops when no more
/// matches can be found.
///
/// `'r` is the lifetime of the compiled regular expression and `'t` is the
/// lifetime of the matched text.
#[derive(Debug, Clone)]
pub struct Matches<'r, 't> {
    re: &'r Regex,
    text: &'t [u8],
    last_end: usize,
    last_match: Option<usize>,
}

impl<'r, 't> Matches<'r, 't> {
    /// Return the text being searched.
    #[must_use]
    #[inline]
    pub fn text(&self) -> &'t [u8] {
        self.text
    }

    /// Return the underlying regex.
    #[must_use]
    #[inline]
    pub fn regex(&self) -> &'r Regex {
        self.re
    }
}

impl<'r, 't> Iterator for Matches<'r, 't> {
    type Item = Result<Match<'t>>;

    /// Calls `find_at` repeatedly. Ignores empty matches immediately after a match.
    fn next(&mut self) -> Option<Self::Item> {
        if self.last_end > self.text.len() {
            return None;
        }

        let mat = match self.re.find_at(self.text, self.last_end) {
            Err(error) => return Some(Err(error)),
            Ok(None) => return None,
            Ok(Some(mat)) => mat,
        };

        if mat.start == mat.end {
            // This is an empty match. To ensure we make progress, start
            // the next search one byte further.
            self.last_end = mat.end + 1;
            // Don't accept empty matches immediately following a match.
            // Just move on to the next match.
            if Some(mat.end) == self.last_match {
                return self.next();
            }
        } else {
            self.last_end = mat.end;
        }

        self.last_match = Some(mat.end);

        Some(Ok(mat))
    }
}

/// A set of capture groups found for a regex.
#[derive(Debug, Clone)]
pub struct Captures<'t> {
    text: &'t [u8],
    saves: Vec<usize>,
}

#[allow(clippy::len_without_is_empty)]
impl<'t> Captures<'t> {
    /// Get the capture group by its index in the regex.
    ///
    /// If there is no match for that group or the index does not correspond to a group, `None` is
    /// returned. The index 0 returns the whole match.
    #[must_use]
    #[inline]
    pub fn get(&self, i: usize) -> Option<Match<'t>> {
        let slot = i.saturating_mul(2);
        if slot >= self.saves.len() {
            return None;
        }
        let lo = self.saves[slot];
        if lo == usize::MAX {
            return None;
        }
        Some(Match {
            text: self.text,
            start: lo,
            end: self.saves[slot + 1],
        })
    }

    /// Iterate over the captured groups in order in which they appeared in the regex. The first
    /// capture corresponds to the whole match.
    #[must_use]
    #[inline]
    pub fn iter<'c>(&'c self) -> SubCaptureMatches<'c, 't> {
        SubCaptureMatches(self.saves.chunks_exact(2), self.text)
    }

    /// How many groups were captured. This is always at least 1 because group 0 returns the whole
    /// match.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.saves.len() / 2
    }
}

impl<'t, 'c> IntoIterator for &'c Captures<'t> {
    type IntoIter = SubCaptureMatches<'c, 't>;
    type Item = Option<Match<'t>>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Get a group by index.
///
/// The text can't outlive the `Captures` object if this method is
/// used, because of how `Index` is defined (normally `a[i]` is part
/// of `a` and can't outlive it); to do that, use `get()` instead.
///
/// # Panics
///
/// If there is no group at the given index.
impl<'t> Index<usize> for Captures<'t> {
    type Output = [u8];

    fn index(&self, i: usize) -> &[u8] {
        self.get(i)
            .map_or_else(|| panic!("no group at index '{}'", i), |m| m.as_bytes())
    }
}

/// Iterator for captured groups in order in which they appear in the regex.
#[derive(Debug)]
pub struct SubCaptureMatches<'c, 't>(ChunksExact<'c, usize>, &'t [u8]);

impl<'c, 't> SubCaptureMatches<'c, 't> {
    fn get(&self, span: &[usize]) -> Option<Match<'t>> {
        if span[0] == usize::MAX {
            None
        } else {
            Some(Match {
                text: self.1,
                start: span[0],
                end: span[1],
            })
        }
    }
}

impl<'c, 't> Iterator for SubCaptureMatches<'c, 't> {
    type Item = Option<Match<'t>>;

    fn next(&mut self) -> Option<Option<Match<'t>>> {
        let span = self.0.next()?;
        Some(self.get(span))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }

    fn count(self) -> usize {
        self.0.count()
    }
}

impl<'c, 't> DoubleEndedIterator for SubCaptureMatches<'c, 't> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let span = self.0.next_back()?;
        Some(self.get(span))
    }
}

impl<'c, 't> ExactSizeIterator for SubCaptureMatches<'c, 't> {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'c, 't> FusedIterator for SubCaptureMatches<'c, 't> {}

/// The internal module only exists so that tests and benchmarks can access internals for
/// debugging and experimenting.
#[doc(hidden)]
pub mod internal {
    pub use crate::analyze::{analyze, build_group_index, GroupIndex, Info};
    pub use crate::parse::{next_atom, split_top_level, Atom, AtomKind, Span};
    pub use crate::vm::{run_default, run_trace, Prog};
}
