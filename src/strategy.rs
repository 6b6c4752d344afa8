use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;

use crate::mimetype::*;

/// Signature shared by every resolution strategy.
pub type ResolveFn = fn(&str) -> &'static str;

/// Resolve the content type of `path` from its extension.
///
/// Never fails: unknown, missing or empty extensions give
/// [`DEFAULT_CONTENT_TYPE`]. Matching is exact and case-sensitive.
pub fn resolve_content_type(path: &str) -> &'static str {
    resolve_first_char_dispatch(path)
}

/// Scan the catalog in priority order, stopping at the first exact match.
pub fn resolve_linear_chain(path: &str) -> &'static str {
    let Some(ext) = extension(path) else {
        return DEFAULT_CONTENT_TYPE;
    };
    for &(candidate, content_type) in CATALOG {
        if ext == candidate {
            return content_type;
        }
    }
    DEFAULT_CONTENT_TYPE
}

/// Branch on the first character after the dot, then compare only the
/// extensions starting with it, most common first.
pub fn resolve_first_char_dispatch(path: &str) -> &'static str {
    let Some(ext) = extension(path) else {
        return DEFAULT_CONTENT_TYPE;
    };

    match ext.as_bytes().get(1) {
        Some(b'a') if ext == EXT_AVIF => IMAGE_AVIF,
        Some(b'c') if ext == EXT_CSS => TEXT_CSS,
        Some(b'g') if ext == EXT_GIF => IMAGE_GIF,
        Some(b'h') if ext == EXT_HTML || ext == EXT_HTM => TEXT_HTML,
        Some(b'i') if ext == EXT_ICO => IMAGE_X_ICON,
        Some(b'j') => {
            // js dominates, json is mostly API traffic
            if ext == EXT_JS {
                APPLICATION_JAVASCRIPT
            } else if ext == EXT_JPG {
                IMAGE_JPEG
            } else if ext == EXT_JSON {
                APPLICATION_JSON
            } else {
                DEFAULT_CONTENT_TYPE
            }
        }
        Some(b'm') if ext == EXT_MP4 => VIDEO_MP4,
        Some(b'o') if ext == EXT_OPUS => AUDIO_OPUS,
        Some(b'p') => {
            if ext == EXT_PNG {
                IMAGE_PNG
            } else if ext == EXT_PDF {
                APPLICATION_PDF
            } else {
                DEFAULT_CONTENT_TYPE
            }
        }
        Some(b's') if ext == EXT_SVG => IMAGE_SVG_XML,
        Some(b't') => {
            if ext == EXT_TTF {
                FONT_TTF
            } else if ext == EXT_TXT {
                TEXT_PLAIN
            } else {
                DEFAULT_CONTENT_TYPE
            }
        }
        Some(b'w') => {
            if ext == EXT_WEBP {
                IMAGE_WEBP
            } else if ext == EXT_WEBM {
                VIDEO_WEBM
            } else if ext == EXT_WOFF2 {
                FONT_WOFF2
            } else if ext == EXT_WOFF {
                FONT_WOFF
            } else {
                DEFAULT_CONTENT_TYPE
            }
        }
        Some(b'x') if ext == EXT_XML => TEXT_XML,
        _ => DEFAULT_CONTENT_TYPE,
    }
}

/// Same order as [`resolve_linear_chain`], but each candidate is dropped on
/// its second byte before the full comparison is attempted.
pub fn resolve_fast_reject(path: &str) -> &'static str {
    let Some(ext) = extension(path) else {
        return DEFAULT_CONTENT_TYPE;
    };
    // `None` for the bare "." suffix, which every candidate then rejects
    let lead = ext.as_bytes().get(1).copied();
    for &(candidate, content_type) in CATALOG {
        if lead == candidate.as_bytes().get(1).copied() && ext == candidate {
            return content_type;
        }
    }
    DEFAULT_CONTENT_TYPE
}

/// The interchangeable resolution strategies under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    LinearChain,
    FirstCharDispatch,
    FastReject,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::LinearChain,
        Strategy::FirstCharDispatch,
        Strategy::FastReject,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::LinearChain => "linear",
            Strategy::FirstCharDispatch => "dispatch",
            Strategy::FastReject => "fast-reject",
        }
    }

    pub fn resolver(self) -> ResolveFn {
        match self {
            Strategy::LinearChain => resolve_linear_chain,
            Strategy::FirstCharDispatch => resolve_first_char_dispatch,
            Strategy::FastReject => resolve_fast_reject,
        }
    }

    pub fn resolve(self, path: &str) -> &'static str {
        (self.resolver())(path)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" | "linear" => Ok(Strategy::LinearChain),
            "2" | "dispatch" => Ok(Strategy::FirstCharDispatch),
            "3" | "fast-reject" => Ok(Strategy::FastReject),
            _ => Err(anyhow!(
                "unknown strategy '{s}' (expected linear, dispatch or fast-reject)"
            )),
        }
    }
}
