use std::borrow::Cow;

use crate::strategy::Strategy;

/// Turn a request target such as `/docs/read%20me.txt?v=2` into the path
/// to resolve. The query string is cut off before percent-decoding so an
/// encoded `?` stays part of the path.
pub fn request_path(target: &str) -> Cow<'_, str> {
    let path = match target.split_once('?') {
        Some((path, _query)) => path,
        None => target,
    };
    match urlencoding::decode(path) {
        Ok(decoded) => decoded,
        // Not valid UTF-8 once decoded; resolve the raw text instead
        _ => Cow::Borrowed(path),
    }
}

/// The answer of every strategy for one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub path: String,
    pub outputs: Vec<(Strategy, &'static str)>,
}

impl Resolution {
    pub fn new(path: &str) -> Resolution {
        Resolution {
            path: path.to_string(),
            outputs: Strategy::ALL.into_iter().map(|s| (s, s.resolve(path))).collect(),
        }
    }

    /// The common content type, or `None` if the strategies disagree.
    pub fn agreed(&self) -> Option<&'static str> {
        let (_, first) = *self.outputs.first()?;
        self.outputs
            .iter()
            .all(|(_, content_type)| *content_type == first)
            .then_some(first)
    }
}
