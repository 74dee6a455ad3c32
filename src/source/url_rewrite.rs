//! GitHub and Gist URL rewriting

use regex::Regex;
use std::sync::LazyLock;

static GITHUB_BLOB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://github\.com/([^/]+)/([^/]+)/blob/([^/]+)/(.+)")
        .expect("GitHub blob pattern is valid")
});

static GIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://gist\.github\.com/([^/]+)/([^/#]+)(?:#file-(.+))?")
        .expect("Gist pattern is valid")
});

/// Rewrite GitHub blob and Gist page URLs to their raw content URLs.
/// Other URLs are returned unchanged.
pub fn to_raw_url(url: &str) -> String {
    if let Some(caps) = GITHUB_BLOB.captures(url) {
        return format!(
            "https://raw.githubusercontent.com/{}/{}/{}/{}",
            &caps[1], &caps[2], &caps[3], &caps[4]
        );
    }

    if let Some(caps) = GIST.captures(url) {
        let (user, gist_id) = (&caps[1], &caps[2]);
        return match caps.get(3) {
            Some(anchor) => format!(
                "https://gist.githubusercontent.com/{}/{}/raw/{}",
                user,
                gist_id,
                anchor_to_filename(anchor.as_str())
            ),
            None => format!("https://gist.githubusercontent.com/{}/{}/raw", user, gist_id),
        };
    }

    url.to_string()
}

/// Rewrite a GitHub blob URL to ESPHome's `github://user/repo/path@ref` form
/// for `dashboard_import`.
pub fn to_esphome_github_url(url: &str) -> Option<String> {
    GITHUB_BLOB.captures(url).map(|caps| {
        format!(
            "github://{}/{}/{}@{}",
            &caps[1], &caps[2], &caps[4], &caps[3]
        )
    })
}

/// Gist anchors flatten `my-device.yaml` to `my-device-yaml`; the last dash
/// is taken to be the extension separator.
fn anchor_to_filename(anchor: &str) -> String {
    match anchor.rsplit_once('-') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}.{}", stem, ext),
        _ => anchor.to_string(),
    }
}
