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

#![allow(dead_code)]

use linematch::{Error, Regex};

#[cfg_attr(feature = "track_caller", track_caller)]
pub fn regex(re: &str) -> Regex {
    let parse_result = Regex::new(re);
    assert!(
        parse_result.is_ok(),
        "Expected regex '{}' to be compiled successfully, got {:?}",
        re,
        parse_result.err()
    );
    parse_result.unwrap()
}

#[cfg_attr(feature = "track_caller", track_caller)]
pub fn is_match(re: &str, text: &str) -> bool {
    let regex = regex(re);
    let result = regex.is_match(text.as_bytes());
    assert!(
        result.is_ok(),
        "Expected match to succeed, but was {:?}",
        result
    );
    result.unwrap()
}

#[cfg_attr(feature = "track_caller", track_caller)]
pub fn assert_match(re: &str, text: &str) {
    assert!(is_match(re, text), "Expected '{}' to match '{}'", re, text);
}

#[cfg_attr(feature = "track_caller", track_caller)]
pub fn assert_no_match(re: &str, text: &str) {
    assert!(!is_match(re, text), "Expected '{}' not to match '{}'", re, text);
}

#[cfg_attr(feature = "track_caller", track_caller)]
pub fn parse_error(re: &str) -> Error {
    match Regex::new(re) {
        Err(e) => e,
        Ok(_) => panic!("Expected '{}' to fail to compile", re),
    }
}

/// Captured groups of the first match as strings, `None` for groups that did not participate.
#[cfg_attr(feature = "track_caller", track_caller)]
pub fn captures(re: &str, text: &str) -> Option<Vec<Option<String>>> {
    let regex = regex(re);
    let caps = regex.captures(text.as_bytes()).unwrap()?;
    Some(
        caps.iter()
            .map(|m| m.map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned()))
            .collect(),
    )
}
