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

use common::{captures, regex};

fn some(groups: &[Option<&str>]) -> Option<Vec<Option<String>>> {
    Some(groups.iter().map(|g| g.map(String::from)).collect())
}

#[test]
fn whole_match_is_group_zero() {
    assert_eq!(captures("b+", "abbc"), some(&[Some("bb")]));
    assert_eq!(captures("x", "y"), None);
}

#[test]
fn groups_in_order_of_opening_paren() {
    assert_eq!(
        captures("((a)b)\\2", "aba"),
        some(&[Some("aba"), Some("ab"), Some("a")])
    );
    assert_eq!(
        captures("(foo|bar)baz", "barbaz"),
        some(&[Some("barbaz"), Some("bar")])
    );
    assert_eq!(captures("[(](a)", "(a"), some(&[Some("(a"), Some("a")]));
}

#[test]
fn unset_groups() {
    assert_eq!(captures("(a)|b", "b"), some(&[Some("b"), None]));
    assert_eq!(captures("(a)c|ab", "ab"), some(&[Some("ab"), None]));
    assert_eq!(captures("(a)?ab", "ab"), some(&[Some("ab"), None]));
}

#[test]
fn optional_prefers_one() {
    assert_eq!(
        captures("(a)?(a)?", "a"),
        some(&[Some("a"), Some("a"), None])
    );
}

#[test]
fn repeated_group_keeps_last_iteration() {
    assert_eq!(captures("(a|b)+b", "abab"), some(&[Some("abab"), Some("a")]));
    assert_eq!(captures("(ab)+", "xababx"), some(&[Some("abab"), Some("ab")]));
}

#[test]
fn groups_take_longest_fit() {
    assert_eq!(
        captures("(\\d+)(\\d+)", "1234"),
        some(&[Some("1234"), Some("123"), Some("4")])
    );
    assert_eq!(captures("(a|ab)c", "abc"), some(&[Some("abc"), Some("ab")]));
}

#[test]
fn backref_uses_captured_bytes() {
    assert_eq!(captures("(a+)b\\1$", "aaba"), some(&[Some("aba"), Some("a")]));
}

#[test]
fn end_anchor_inside_group() {
    assert_eq!(captures("(a$)b", "ab"), some(&[Some("ab"), Some("a")]));
    assert_eq!(captures("x(\\w+$)", "xabc"), some(&[Some("xabc"), Some("abc")]));
}

#[test]
fn captures_api() {
    let re = regex("(a)(x)?(b)");
    assert_eq!(re.captures_len(), 4);
    let caps = re.captures(b"zab").unwrap().unwrap();
    assert_eq!(caps.len(), 4);
    assert_eq!(caps.get(0).unwrap().range(), 1..3);
    assert_eq!(caps.get(1).unwrap().range(), 1..2);
    assert!(caps.get(2).is_none());
    assert!(caps.get(4).is_none());
    assert_eq!(&caps[3], b"b");
    assert_eq!((&caps).into_iter().filter(Option::is_some).count(), 3);
}
