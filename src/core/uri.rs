//! Conversion of stored folder references into canonical platform paths.
//!
//! History entries store either a `file://` URI or a plain path. These helpers
//! never fail: malformed input degrades to a best-effort passthrough.

use crate::core::platform::Platform;
use percent_encoding::percent_decode_str;
use url::Url;

const FILE_SCHEME_PREFIX: &str = "file://";

/// Convert a stored URI (or raw path) into a decoded filesystem path string.
pub fn uri_to_path(raw: &str, platform: Platform) -> String {
    if looks_like_drive_path(raw) {
        return raw.to_string();
    }

    match Url::parse(raw) {
        Ok(url) => {
            let decoded = decode(url.path());
            let path = strip_drive_slash(&decoded, platform);
            match url.host_str() {
                Some(host)
                    if !host.is_empty()
                        && url.scheme() == "file"
                        && platform == Platform::Windows =>
                {
                    format!("//{}{}", host, path)
                }
                _ => path.to_string(),
            }
        }
        Err(_) => match raw.strip_prefix(FILE_SCHEME_PREFIX) {
            Some(rest) => strip_drive_slash(&decode(rest), platform).to_string(),
            None => raw.to_string(),
        },
    }
}

/// On backslash platforms, swap every forward slash for a backslash.
pub fn normalize_path_for_platform(path: &str, platform: Platform) -> String {
    if platform.uses_backslash() {
        path.replace('/', "\\")
    } else {
        path.to_string()
    }
}

/// Full pipeline used by the parser: decode, then normalize separators.
pub fn canonical_path(raw: &str, platform: Platform) -> String {
    normalize_path_for_platform(&uri_to_path(raw, platform), platform)
}

fn decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

// `/C:/Users/...` -> `C:/Users/...`, Windows only.
fn strip_drive_slash(path: &str, platform: Platform) -> &str {
    if platform != Platform::Windows {
        return path;
    }
    let bytes = path.as_bytes();
    if bytes.len() >= 3 && bytes[0] == b'/' && bytes[1].is_ascii_alphabetic() && bytes[2] == b':' {
        &path[1..]
    } else {
        path
    }
}

// `C:\x` and `C:/x` parse as URLs with scheme `c`; they are drive paths.
fn looks_like_drive_path(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes.len() == 2 || bytes[2] == b'/' || bytes[2] == b'\\')
}
