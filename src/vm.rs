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

//! Recursive backtracking matcher.
//!
//! There is no compiled program in the usual sense. The matcher works on spans of the original
//! pattern and the haystack, and every step is a question of the form "does the pattern span
//! `[start, end)` match the text starting at `pos`, without reading past `limit`?". The answer is
//! the position where the match stops, or `None`.
//!
//! The pattern span is handled one atom at a time:
//!
//! 1. An empty span matches, consuming nothing.
//! 2. The span `$` matches only at `limit`, the end of the text or of the group length under test.
//! 3. A span with top-level alternatives tries each branch in order.
//! 4. An atom followed by `?` tries one occurrence first and then none.
//! 5. An atom followed by `+` is expanded greedily and then given back one repetition at a time,
//!    until the rest of the pattern matches.
//! 6. A group tries every length from the longest down, and keeps the first one for which the rest
//!    of the pattern also matches. That is what makes `(a|ab)c` match `abc`.
//! 7. Anything else matches one atom and continues with the rest.
//!
//! A group's body must consume exactly the length under test. To enforce that, the body is matched
//! with `exhaust` set, which turns the empty-pattern success of step 1 into "only if at `limit`".
//! Since every branch of the body eventually ends in step 1, the requirement reaches all of them
//! and backtracking inside the body searches for an exact fit.
//!
//! Captures live in an [`Env`] passed down by `&mut`. A call writes to it only when it returns a
//! match, so on failure the caller's environment is untouched. Wherever more than one possibility
//! is tried, each possibility gets its own clone and the winner's clone replaces the caller's.
//!
//! Example, the pattern `(a)?ab` against `ab`:
//!
//! 1. `(a)?`: one occurrence first. The group captures `a` into a clone, then `ab` fails at `b`.
//! 2. The clone is dropped, and `ab` is tried with no occurrence, which matches.
//! 3. Group 1 is unset in the result, because the capture only existed in the dropped clone.

use std::fmt;

use crate::analyze::{analyze, Info};
use crate::class::{is_word_byte, ByteClass};
use crate::env::Env;
use crate::error::RuntimeError;
use crate::parse::{next_atom, split_top_level, Atom, AtomKind, Span};
use crate::Error;
use crate::Result;

/// Enable tracing of the search. Only for debugging/investigating.
const OPTION_TRACE: u32 = 1 << 0;

/// No limit, the search may take exponential time.
pub(crate) const DEFAULT_BACKTRACK_LIMIT: usize = usize::MAX;

/// A pattern checked and prepared for matching. Read-only once built.
#[derive(Debug)]
pub struct Prog {
    pattern: Box<[u8]>,
    info: Info,
}

impl Prog {
    /// Validate `pattern` and build its group index.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::ParseError`] for a malformed pattern.
    pub fn new(pattern: Vec<u8>) -> Result<Prog> {
        let info = analyze(&pattern)?;
        Ok(Prog {
            pattern: pattern.into_boxed_slice(),
            info,
        })
    }

    pub(crate) fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    pub(crate) fn n_groups(&self) -> usize {
        self.info.n_groups
    }
}

/// State of one search of a [`Prog`] against one text.
#[derive(Debug)]
pub(crate) struct Session<'p, 't> {
    prog: &'p Prog,
    text: &'t [u8],
    options: u32,
    backtrack_limit: usize,
    backtrack_count: usize,
}

impl<'p, 't> Session<'p, 't> {
    pub(crate) fn new(prog: &'p Prog, text: &'t [u8], backtrack_limit: usize) -> Self {
        Session {
            prog,
            text,
            options: 0,
            backtrack_limit,
            backtrack_count: 0,
        }
    }

    /// Find the leftmost match starting at or after `from`.
    ///
    /// On success, returns two slots per group (start and end, `usize::MAX` if the group did not
    /// participate), where group 0 is the whole match.
    pub(crate) fn run(&mut self, from: usize) -> Result<Option<Vec<usize>>> {
        let prog = self.prog;
        let end = self.text.len();
        if from > end {
            return Ok(None);
        }
        if prog.info.anchored {
            if from != 0 {
                return Ok(None);
            }
            let body = Span::new(1, prog.pattern.len());
            return self.run_at(0, body);
        }
        let body = Span::new(0, prog.pattern.len());
        for start in from..=end {
            if let Some(saves) = self.run_at(start, body)? {
                return Ok(Some(saves));
            }
            self.backtrack()?;
        }
        Ok(None)
    }

    fn run_at(&mut self, start: usize, body: Span) -> Result<Option<Vec<usize>>> {
        let mut env = Env::new(self.prog.n_groups());
        let stop = self.match_here(start, self.text.len(), body, false, &mut env)?;
        Ok(stop.map(|stop| {
            env.set(0, start..stop);
            env.into_saves()
        }))
    }

    fn match_here(
        &mut self,
        pos: usize,
        limit: usize,
        span: Span,
        exhaust: bool,
        env: &mut Env,
    ) -> Result<Option<usize>> {
        let prog = self.prog;
        let pattern = prog.pattern();
        let s = span.slice(pattern);
        self.trace(format_args!("{}\t{}", pos, s.escape_ascii()));
        if s.is_empty() {
            return Ok((!exhaust || pos == limit).then_some(pos));
        }
        if s == b"$" {
            return Ok((pos == limit).then_some(pos));
        }

        let branches = split_top_level(pattern, span);
        if branches.len() > 1 {
            return self.match_alternation(pos, limit, &branches, exhaust, env);
        }

        let atom = next_atom(pattern, span)?;
        match pattern[atom.end..span.end].first() {
            Some(b'?') => {
                let rest = span.rest_from(atom.end + 1);
                self.match_optional(atom, pos, limit, rest, exhaust, env)
            }
            Some(b'+') => {
                let rest = span.rest_from(atom.end + 1);
                self.match_repeat(atom, pos, limit, rest, exhaust, env)
            }
            _ if atom.kind == AtomKind::Group => {
                self.match_group(atom, pos, limit, span.rest_from(atom.end), exhaust, env)
            }
            _ => {
                let next = match self.match_atom_once(atom, pos, limit, env)? {
                    Some(next) => next,
                    None => return Ok(None),
                };
                self.match_here(next, limit, span.rest_from(atom.end), exhaust, env)
            }
        }
    }

    fn match_alternation(
        &mut self,
        pos: usize,
        limit: usize,
        branches: &[Span],
        exhaust: bool,
        env: &mut Env,
    ) -> Result<Option<usize>> {
        for &branch in branches {
            let mut st = env.clone();
            if let Some(stop) = self.match_here(pos, limit, branch, exhaust, &mut st)? {
                *env = st;
                return Ok(Some(stop));
            }
            self.backtrack()?;
        }
        Ok(None)
    }

    // `atom?` followed by `rest`, one occurrence preferred
    fn match_optional(
        &mut self,
        atom: Atom,
        pos: usize,
        limit: usize,
        rest: Span,
        exhaust: bool,
        env: &mut Env,
    ) -> Result<Option<usize>> {
        let mut one = env.clone();
        if let Some(next) = self.match_atom_once(atom, pos, limit, &mut one)? {
            if let Some(stop) = self.match_here(next, limit, rest, exhaust, &mut one)? {
                *env = one;
                return Ok(Some(stop));
            }
        }
        self.backtrack()?;
        self.match_here(pos, limit, rest, exhaust, env)
    }

    // `atom+` followed by `rest`, as many repetitions as possible
    fn match_repeat(
        &mut self,
        atom: Atom,
        pos: usize,
        limit: usize,
        rest: Span,
        exhaust: bool,
        env: &mut Env,
    ) -> Result<Option<usize>> {
        // (position after n repetitions, environment after n repetitions), for n = 1, 2, ...
        let mut steps: Vec<(usize, Env)> = Vec::new();
        let mut ix = pos;
        loop {
            let mut st = steps.last().map_or(&*env, |(_, st)| st).clone();
            match self.match_atom_once(atom, ix, limit, &mut st)? {
                // a repetition that consumes nothing would repeat forever
                Some(next) if next > ix => {
                    ix = next;
                    steps.push((ix, st));
                }
                _ => break,
            }
        }
        self.trace(format_args!("{} repetitions of atom at {}", steps.len(), atom.start));
        while let Some((ix, mut st)) = steps.pop() {
            if let Some(stop) = self.match_here(ix, limit, rest, exhaust, &mut st)? {
                *env = st;
                return Ok(Some(stop));
            }
            self.backtrack()?;
        }
        Ok(None)
    }

    // a capturing group followed by `rest`, longest capture first
    fn match_group(
        &mut self,
        atom: Atom,
        pos: usize,
        limit: usize,
        rest: Span,
        exhaust: bool,
        env: &mut Env,
    ) -> Result<Option<usize>> {
        let group = self.prog.info.groups.get(&atom.start).copied();
        for end in (pos..=limit).rev() {
            let mut st = env.clone();
            if self
                .match_here(pos, end, atom.inner(), true, &mut st)?
                .is_some()
            {
                if let Some(group) = group {
                    st.set(group, pos..end);
                }
                if let Some(stop) = self.match_here(end, limit, rest, exhaust, &mut st)? {
                    *env = st;
                    return Ok(Some(stop));
                }
            }
            self.backtrack()?;
        }
        Ok(None)
    }

    // A single occurrence of `atom`. A group as the operand of a quantifier takes the first match
    // of its body, whatever its length.
    fn match_atom_once(
        &mut self,
        atom: Atom,
        pos: usize,
        limit: usize,
        env: &mut Env,
    ) -> Result<Option<usize>> {
        if pos >= limit {
            return Ok(None);
        }
        let b = self.text[pos];
        let matched = match atom.kind {
            AtomKind::Literal(c) => b == c,
            AtomKind::Any => true,
            AtomKind::Digit => b.is_ascii_digit(),
            AtomKind::Word => is_word_byte(b),
            AtomKind::Class => match self.prog.info.classes.get(&atom.start) {
                Some(class) => class.matches(b),
                None => ByteClass::parse(self.prog.pattern(), atom.inner()).matches(b),
            },
            AtomKind::Backref(group) => return Ok(self.match_backref(group, pos, limit, env)),
            AtomKind::Group => {
                let stop = match self.match_here(pos, limit, atom.inner(), false, env)? {
                    Some(stop) => stop,
                    None => return Ok(None),
                };
                if let Some(&group) = self.prog.info.groups.get(&atom.start) {
                    env.set(group, pos..stop);
                }
                return Ok(Some(stop));
            }
        };
        Ok(matched.then_some(pos + 1))
    }

    fn match_backref(&self, group: usize, pos: usize, limit: usize, env: &Env) -> Option<usize> {
        // Referenced group hasn't matched, so the backref doesn't match either
        let captured = env.get(group)?;
        let end = pos + captured.len();
        if end <= limit && self.text[pos..end] == self.text[captured] {
            Some(end)
        } else {
            None
        }
    }

    fn backtrack(&mut self) -> Result<()> {
        self.backtrack_count += 1;
        if self.backtrack_count > self.backtrack_limit {
            return Err(Error::RuntimeError(RuntimeError::BacktrackLimitExceeded));
        }
        Ok(())
    }

    fn trace(&self, args: fmt::Arguments) {
        #[cfg(debug_assertions)]
        if self.options & OPTION_TRACE != 0 {
            Self::do_trace(args);
        }
        let _ = args;
    }

    #[cold]
    #[cfg(debug_assertions)]
    fn do_trace(args: fmt::Arguments) {
        eprintln!("{args}");
    }
}

/// Run the program with trace printing for debugging.
#[doc(hidden)]
pub fn run_trace(prog: &Prog, text: &[u8]) -> Result<Option<Vec<usize>>> {
    let mut session = Session::new(prog, text, DEFAULT_BACKTRACK_LIMIT);
    session.options = OPTION_TRACE;
    session.run(0)
}

/// Run the program with default options.
#[doc(hidden)]
pub fn run_default(prog: &Prog, text: &[u8]) -> Result<Option<Vec<usize>>> {
    Session::new(prog, text, DEFAULT_BACKTRACK_LIMIT).run(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use matches::assert_matches;

    const UNSET: usize = usize::MAX;

    fn prog(pattern: &str) -> Prog {
        Prog::new(pattern.as_bytes().to_vec()).unwrap()
    }

    fn saves(pattern: &str, text: &str) -> Option<Vec<usize>> {
        run_default(&prog(pattern), text.as_bytes()).unwrap()
    }

    #[test]
    fn whole_match_in_first_slots() {
        assert_eq!(saves("b+", "abbc"), Some(vec![1, 3]));
        assert_eq!(saves("x", "abc"), None);
        assert_eq!(saves("", ""), Some(vec![0, 0]));
    }

    #[test]
    fn leftmost_start_wins() {
        // the match at 1 is shorter than the one at 2, but starts first
        assert_eq!(saves("a|bcd", "xabcd"), Some(vec![1, 2]));
    }

    #[test]
    fn anchored_tries_only_start() {
        assert_eq!(saves("^b", "ab"), None);
        assert_eq!(saves("^a", "ab"), Some(vec![0, 1]));
        let p = prog("^a");
        let mut session = Session::new(&p, b"aa", DEFAULT_BACKTRACK_LIMIT);
        assert_eq!(session.run(1).unwrap(), None);
    }

    #[test]
    fn failed_branch_does_not_leak_captures() {
        assert_eq!(saves("(a)c|ab", "ab"), Some(vec![0, 2, UNSET, UNSET]));
    }

    #[test]
    fn optional_falls_back_without_capture() {
        assert_eq!(saves("(a)?ab", "ab"), Some(vec![0, 2, UNSET, UNSET]));
        assert_eq!(saves("(a)?b", "ab"), Some(vec![0, 2, 0, 1]));
    }

    #[test]
    fn repeat_keeps_capture_of_chosen_iteration() {
        // four repetitions are possible, the rest only matches after three
        assert_eq!(saves("(a|b)+b", "abab"), Some(vec![0, 4, 2, 3]));
    }

    #[test]
    fn group_backtracks_into_shorter_length() {
        assert_eq!(saves("(a|ab)c", "abc"), Some(vec![0, 3, 0, 2]));
        assert_eq!(saves("(\\w+)\\w", "abc"), Some(vec![0, 3, 0, 2]));
    }

    #[test]
    fn end_anchor_is_end_of_candidate() {
        // inside a group, `$` holds at the end of the length under test
        assert_eq!(saves("(a$)", "ab"), Some(vec![0, 1, 0, 1]));
        assert_eq!(saves("(a$)b", "ab"), Some(vec![0, 2, 0, 1]));
        assert_eq!(saves("(b$)", "ab"), Some(vec![1, 2, 1, 2]));
        assert_eq!(saves("a$", "ab"), None);
    }

    #[test]
    fn zero_width_repetition_terminates() {
        assert_eq!(saves("(a?)+b", "ab"), Some(vec![0, 2, 0, 1]));
        assert!(run_default(&prog("(a?)+b"), b"b").is_ok());
    }

    #[test]
    fn backtrack_limit() {
        let p = prog("(\\w+)(\\w+)(\\w+)x");
        let text = [b'a'; 30];
        let mut session = Session::new(&p, &text, 1000);
        assert_matches!(
            session.run(0),
            Err(Error::RuntimeError(RuntimeError::BacktrackLimitExceeded))
        );
        let mut session = Session::new(&p, b"abcx", 1000);
        assert_eq!(session.run(0).unwrap(), Some(vec![0, 4, 0, 1, 1, 2, 2, 3]));
    }

    #[test]
    fn trace_gives_same_result() {
        let p = prog("(a)(b)\\2\\1");
        assert_eq!(
            run_trace(&p, b"xabba").unwrap(),
            run_default(&p, b"xabba").unwrap()
        );
    }
}
