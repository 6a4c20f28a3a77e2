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


mod common;

use common::regex;
use linematch::{Error, RegexBuilder, RuntimeError};
use matches::assert_matches;

fn find(re: &str, text: &str) -> Option<(usize, usize)> {
    regex(re)
        .find(text.as_bytes())
        .unwrap()
        .map(|m| (m.start(), m.end()))
}

fn find_all(re: &str, text: &str) -> Vec<(usize, usize)> {
    regex(re)
        .find_iter(text.as_bytes())
        .map(|m| {
            let m = m.unwrap();
            (m.start(), m.end())
        })
        .collect()
}

#[test]
fn find_leftmost() {
    assert_eq!(find("\\d+", "ab123c"), Some((2, 5)));
    assert_eq!(find("a+", "baaa"), Some((1, 4)));
    assert_eq!(find("x", "abc"), None);
}

#[test]
fn earlier_start_beats_branch_order() {
    assert_eq!(find("b|ab", "ab"), Some((0, 2)));
    assert_eq!(find("a|ab", "ab"), Some((0, 1)));
}

#[test]
fn find_empty() {
    assert_eq!(find("", "abc"), Some((0, 0)));
    assert_eq!(find("$", "abc"), Some((3, 3)));
    let re = regex("$");
    let m = re.find(b"abc").unwrap().unwrap();
    assert!(m.is_empty());
    assert_eq!(m.len(), 0);
    assert_eq!(m.as_bytes(), b"");
}

#[test]
fn find_match_accessors() {
    let re = regex("b+");
    let m = re.find(b"abbc").unwrap().unwrap();
    assert_eq!(m.range(), 1..3);
    assert_eq!(m.len(), 2);
    assert_eq!(m.as_ref(), b"bb");
    let range: std::ops::Range<usize> = m.into();
    assert_eq!(range, 1..3);
}

#[test]
fn find_at_keeps_anchors_absolute() {
    let re = regex("\\d+$");
    assert_eq!(re.find_at(b"12 test 345", 1).unwrap().unwrap().range(), 8..11);
    assert!(regex("^a").find_at(b"aa", 1).unwrap().is_none());
    assert!(regex("a").find_at(b"ab", 5).unwrap().is_none());
}

#[test]
fn find_iter_non_overlapping() {
    assert_eq!(
        find_all("\\d+", "1, 22 and 333"),
        vec![(0, 1), (3, 5), (10, 13)]
    );
    assert_eq!(find_all("aa", "aaaaa"), vec![(0, 2), (2, 4)]);
    assert_eq!(find_all("x", "abc"), vec![]);
}

#[test]
fn find_iter_empty_matches_advance() {
    assert_eq!(find_all("", "ab"), vec![(0, 0), (1, 1), (2, 2)]);
    assert_eq!(find_all("$", "ab"), vec![(2, 2)]);
}

#[test]
fn find_iter_accessors() {
    let re = regex("a");
    let it = re.find_iter(b"banana");
    assert_eq!(it.text(), b"banana");
    assert_eq!(it.regex().as_bytes(), b"a");
    assert_eq!(it.count(), 3);
}

#[test]
fn backtrack_limit_surfaces_as_error() {
    let re = RegexBuilder::new()
        .backtrack_limit(1000)
        .build("(\\w+)(\\w+)(\\w+)x")
        .unwrap();
    let text = "a".repeat(30);

    assert_matches!(
        re.is_match(text.as_bytes()),
        Err(Error::RuntimeError(RuntimeError::BacktrackLimitExceeded))
    );
    assert_matches!(
        re.find_iter(text.as_bytes()).next(),
        Some(Err(Error::RuntimeError(RuntimeError::BacktrackLimitExceeded)))
    );
    // the limit applies per search
    assert_matches!(re.is_match(b"abcx"), Ok(true));
}

#[test]
fn unlimited_by_default() {
    let text = "a".repeat(30);
    assert_matches!(
        regex("(\\w+)(\\w+)(\\w+)x").is_match(text.as_bytes()),
        Ok(false)
    );
}
