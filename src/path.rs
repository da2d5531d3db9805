//! Path tokenizer.
//!
//! Raw paths are cleaned the way a filesystem path cleaner treats a rooted
//! path: repeated delimiters collapse, `.` segments vanish, and `..` removes
//! the preceding segment (or nothing, at the root). Cleaning never fails.

/// Returns the cleaned, non-empty components of `raw`, borrowed from it.
///
/// Every path is treated as rooted, so `"a/b"` and `"/a/b"` are the same
/// path and a leading `..` can never escape the root.
///
/// This departs from a plain lexical cleaner on relative input: where that
/// would keep `"../x"` as is, here the `..` is dropped and the result is
/// `["x"]`.
pub(crate) fn clean(raw: &str, delimiter: char) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for segment in raw.split(delimiter) {
        match segment {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Splits `raw` into owned components after cleaning.
///
/// The empty sequence denotes the root path.
pub fn tokenize(raw: &str, delimiter: char) -> Vec<String> {
    clean(raw, delimiter)
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Appends `component` to the reconstructed path in `prefix`.
///
/// `prefix` holding only the delimiter is the root; the result never ends
/// with a delimiter unless it is the root itself.
pub(crate) fn push_component(prefix: &mut String, component: &str, delimiter: char) {
    if !prefix.ends_with(delimiter) {
        prefix.push(delimiter);
    }
    prefix.push_str(component);
}

/// Joins components back into a path string, the inverse of [`tokenize`].
pub fn join<S: AsRef<str>>(components: &[S], delimiter: char) -> String {
    let mut path = String::from(delimiter);
    for component in components {
        push_component(&mut path, component.as_ref(), delimiter);
    }
    path
}
