// Extensions, including the leading dot, as they appear at the end of a path
pub const EXT_AVIF: &str = ".avif";
pub const EXT_CSS: &str = ".css";
pub const EXT_GIF: &str = ".gif";
pub const EXT_HTM: &str = ".htm";
pub const EXT_HTML: &str = ".html";
pub const EXT_ICO: &str = ".ico";
pub const EXT_JPG: &str = ".jpg";
pub const EXT_JS: &str = ".js";
pub const EXT_JSON: &str = ".json";
pub const EXT_MP4: &str = ".mp4";
pub const EXT_OPUS: &str = ".opus";
pub const EXT_PDF: &str = ".pdf";
pub const EXT_PNG: &str = ".png";
pub const EXT_SVG: &str = ".svg";
pub const EXT_TTF: &str = ".ttf";
pub const EXT_TXT: &str = ".txt";
pub const EXT_WEBM: &str = ".webm";
pub const EXT_WEBP: &str = ".webp";
pub const EXT_WOFF: &str = ".woff";
pub const EXT_WOFF2: &str = ".woff2";
pub const EXT_XML: &str = ".xml";

// Content types handed back to callers
pub const APPLICATION_JAVASCRIPT: &str = "application/javascript"; // legacy, browsers accept it
pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";
pub const APPLICATION_PDF: &str = "application/pdf";
pub const AUDIO_OPUS: &str = "audio/opus";
pub const FONT_TTF: &str = "font/ttf";
pub const FONT_WOFF: &str = "font/woff";
pub const FONT_WOFF2: &str = "font/woff2";
pub const IMAGE_AVIF: &str = "image/avif";
pub const IMAGE_GIF: &str = "image/gif";
pub const IMAGE_JPEG: &str = "image/jpeg";
pub const IMAGE_PNG: &str = "image/png";
pub const IMAGE_SVG_XML: &str = "image/svg+xml";
pub const IMAGE_WEBP: &str = "image/webp";
pub const IMAGE_X_ICON: &str = "image/x-icon";
pub const TEXT_CSS: &str = "text/css";
pub const TEXT_HTML: &str = "text/html";
pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_XML: &str = "text/xml";
pub const VIDEO_MP4: &str = "video/mp4";
pub const VIDEO_WEBM: &str = "video/webm";

/// Returned for paths without an extension or with one not in [`CATALOG`].
pub const DEFAULT_CONTENT_TYPE: &str = APPLICATION_OCTET_STREAM;

/// Every known extension and its content type, in linear lookup priority.
///
/// Keys are unique. The order only matters for how quickly a linear scan
/// finds a hit; it never changes which content type is returned.
pub static CATALOG: &[(&str, &str)] = &[
    (EXT_HTML, TEXT_HTML),
    (EXT_HTM, TEXT_HTML),
    (EXT_CSS, TEXT_CSS),
    (EXT_JS, APPLICATION_JAVASCRIPT),
    (EXT_JSON, APPLICATION_JSON),
    (EXT_PNG, IMAGE_PNG),
    (EXT_ICO, IMAGE_X_ICON),
    (EXT_SVG, IMAGE_SVG_XML),
    (EXT_JPG, IMAGE_JPEG),
    (EXT_WEBP, IMAGE_WEBP),
    (EXT_AVIF, IMAGE_AVIF),
    (EXT_GIF, IMAGE_GIF),
    (EXT_WOFF2, FONT_WOFF2),
    (EXT_WOFF, FONT_WOFF),
    (EXT_TTF, FONT_TTF),
    (EXT_XML, TEXT_XML),
    (EXT_PDF, APPLICATION_PDF),
    (EXT_MP4, VIDEO_MP4),
    (EXT_OPUS, AUDIO_OPUS),
    (EXT_WEBM, VIDEO_WEBM),
    (EXT_TXT, TEXT_PLAIN),
];

/// The suffix of `path` starting at its last `.`, dot included.
///
/// A path ending in `.` yields `Some(".")`, which no catalog entry matches.
/// Directory separators are not special: `/a.b/c` has the extension `.b/c`.
pub fn extension(path: &str) -> Option<&str> {
    path.rfind('.').map(|dot| &path[dot..])
}
