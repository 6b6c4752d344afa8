use crate::mimetype::*;

/// A request path together with the content type it must resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub path: &'static str,
    pub expected: &'static str,
}

const fn sample(path: &'static str, expected: &'static str) -> Sample {
    Sample { path, expected }
}

/// Realistic paths for a small embedded web UI, plus the awkward cases:
/// multi-dot, missing, empty and unknown extensions.
pub static CORPUS: &[Sample] = &[
    sample("/index.html", TEXT_HTML),
    sample("/dashboard.html", TEXT_HTML),
    sample("/settings.html", TEXT_HTML),
    sample("/about.html", TEXT_HTML),
    sample("/config.htm", TEXT_HTML),
    sample("/style.css", TEXT_CSS),
    sample("/theme.css", TEXT_CSS),
    sample("/layout.css", TEXT_CSS),
    sample("/main.js", APPLICATION_JAVASCRIPT),
    sample("/ajax.js", APPLICATION_JAVASCRIPT),
    sample("/charts.js", APPLICATION_JAVASCRIPT),
    sample("/data.json", APPLICATION_JSON),
    sample("/config.json", APPLICATION_JSON),
    sample("/status.json", APPLICATION_JSON),
    sample("/icon.png", IMAGE_PNG),
    sample("/logo.png", IMAGE_PNG),
    sample("/favicon.ico", IMAGE_X_ICON),
    sample("/graphics/alert.svg", IMAGE_SVG_XML),
    sample("/fonts/roboto.woff2", FONT_WOFF2),
    sample("/fonts/icons.ttf", FONT_TTF),
    sample("/unknownfile.xyz", DEFAULT_CONTENT_TYPE),
    sample("/very/long/path/to/file.html", TEXT_HTML),
    sample("/no/extension", DEFAULT_CONTENT_TYPE),
    sample("/void/extension.", DEFAULT_CONTENT_TYPE),
    sample("/two/extension.min.js", APPLICATION_JAVASCRIPT),
];

/// Path used by the periodic quick benchmark.
pub const QUICK_SAMPLE_PATH: &str = "example.css";
