//! Key search over parsed JSON documents
//!
//! Response documents nest the interesting renderers at unpredictable depths,
//! so lookups are done by key name anywhere in the tree rather than by path.
//! The walk uses an explicit stack, so document depth never touches the host
//! stack.

use serde_json::Value;

/// Pending work for the scanner
enum Frame<'a> {
    /// A value found under the search key, ready to be yielded
    Hit(&'a Value),
    /// A node whose children still have to be examined
    Visit(&'a Value),
}

/// Iterator over every value stored under a given key
///
/// Values found under the key are yielded but not searched further.
/// Yields follow document order (pre-order, first child first).
pub struct SearchKey<'a, 'k> {
    key: &'k str,
    stack: Vec<Frame<'a>>,
}

impl<'a, 'k> SearchKey<'a, 'k> {
    fn new(tree: &'a Value, key: &'k str) -> Self {
        Self {
            key,
            stack: vec![Frame::Visit(tree)],
        }
    }
}

impl<'a> Iterator for SearchKey<'a, '_> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Hit(value) => return Some(value),
                Frame::Visit(Value::Object(map)) => {
                    // Reversed so the first entry is popped first
                    for (k, v) in map.iter().rev() {
                        if k == self.key {
                            self.stack.push(Frame::Hit(v));
                        } else {
                            self.stack.push(Frame::Visit(v));
                        }
                    }
                }
                Frame::Visit(Value::Array(items)) => {
                    self.stack.extend(items.iter().rev().map(Frame::Visit));
                }
                Frame::Visit(_) => {}
            }
        }
        None
    }
}

/// Search `tree` for every value stored under `key`
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use ytcomments::parser::scan::search_key;
///
/// let doc = json!({"a": {"token": 1}, "b": [{"token": 2}]});
/// let found: Vec<_> = search_key(&doc, "token").collect();
/// assert_eq!(found, vec![&json!(1), &json!(2)]);
/// ```
pub fn search_key<'a, 'k>(tree: &'a Value, key: &'k str) -> SearchKey<'a, 'k> {
    SearchKey::new(tree, key)
}

/// First value stored under `key`, if any
pub fn first_match<'a>(tree: &'a Value, key: &str) -> Option<&'a Value> {
    search_key(tree, key).next()
}
