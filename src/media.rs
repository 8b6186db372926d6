//! Image attachment paths.
//!
//! The client stores image attachments under the account directory as
//! `msg/attach/<md5(talker)>/<YYYY-MM>/Img/<stem><suffix>.dat`. The file stem
//! comes from the record's packed info when known; the month is the send
//! time in local time. Several suffixes exist for the same image, so callers
//! get candidates and pick the one present on disk.
//!
//! # Example
//!
//! ```rust
//! use wxdecode::media::{image_path_candidates, thumb_path};
//!
//! // 2025-02-15 12:00:00 UTC
//! let candidates = image_path_candidates("wxid_friend", 1739620800, Some("abc123.jpg"));
//! assert_eq!(candidates.len(), 3);
//! assert!(candidates[0].ends_with("/2025-02/Img/abc123_W.dat"));
//!
//! let thumb = thumb_path("wxid_friend", 1739620800, Some("abc123.jpg")).unwrap();
//! assert!(thumb.ends_with("/Img/abc123_t.dat"));
//! ```

use std::path::Path;

use chrono::{DateTime, Local};

/// Suffixes of full-size image variants, most preferred first.
const IMAGE_SUFFIXES: [&str; 3] = ["_W", "_h", ""];

const THUMB_SUFFIX: &str = "_t";

/// Returns the attachment image directory for a conversation and month.
///
/// A `create_time` of 0 (unknown) uses the current month. Returns `None`
/// when `talker` is empty.
pub fn image_dir(talker: &str, create_time: i64) -> Option<String> {
    if talker.is_empty() {
        return None;
    }
    let hashed = md5::compute(talker.as_bytes());
    Some(format!("msg/attach/{:x}/{}/Img", hashed, month(create_time)))
}

/// Relative paths where a full-size image may be stored.
///
/// With a file name, one candidate per variant suffix. Without one, a single
/// `<create_time>.dat` guess. Empty when `talker` is empty.
pub fn image_path_candidates(
    talker: &str,
    create_time: i64,
    file_name: Option<&str>,
) -> Vec<String> {
    let Some(dir) = image_dir(talker, create_time) else {
        return Vec::new();
    };
    match file_name.and_then(stem) {
        Some(stem) => IMAGE_SUFFIXES
            .iter()
            .map(|suffix| format!("{dir}/{stem}{suffix}.dat"))
            .collect(),
        None => vec![format!("{dir}/{create_time}.dat")],
    }
}

/// Relative path of an image's thumbnail. Requires a file name.
pub fn thumb_path(talker: &str, create_time: i64, file_name: Option<&str>) -> Option<String> {
    let dir = image_dir(talker, create_time)?;
    let stem = file_name.and_then(stem)?;
    Some(format!("{dir}/{stem}{THUMB_SUFFIX}.dat"))
}

/// Picks the first candidate that exists under `root`.
///
/// Falls back to the first candidate when none exists, and returns `None`
/// only for an empty list.
pub fn pick_existing_path<'a>(root: &Path, candidates: &'a [String]) -> Option<&'a str> {
    candidates
        .iter()
        .find(|candidate| root.join(candidate.as_str()).exists())
        .or_else(|| candidates.first())
        .map(String::as_str)
}

fn stem(file_name: &str) -> Option<&str> {
    let name = file_name.trim().trim_matches('"').trim();
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
}

fn month(create_time: i64) -> String {
    let local = match DateTime::from_timestamp(create_time, 0) {
        Some(utc) if create_time != 0 => utc.with_timezone(&Local),
        _ => Local::now(),
    };
    local.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    // Mid-month, so every timezone agrees on the month.
    const FEB_2025: i64 = 1739620800;

    #[test]
    fn test_image_dir_hashes_talker() {
        let dir = image_dir("wxid_friend", FEB_2025).unwrap();
        let expected = format!("{:x}", md5::compute("wxid_friend"));
        assert_eq!(dir, format!("msg/attach/{expected}/2025-02/Img"));
        assert!(image_dir("", FEB_2025).is_none());
    }

    #[test]
    fn test_candidates_with_file_name() {
        let candidates = image_path_candidates("t", FEB_2025, Some("\"photo.jpg\""));
        let names: Vec<_> = candidates
            .iter()
            .map(|c| c.rsplit('/').next().unwrap())
            .collect();
        assert_eq!(names, ["photo_W.dat", "photo_h.dat", "photo.dat"]);
    }

    #[test]
    fn test_candidates_without_file_name() {
        let candidates = image_path_candidates("t", FEB_2025, None);
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].ends_with(&format!("/{FEB_2025}.dat")));
        assert!(image_path_candidates("", FEB_2025, Some("a.jpg")).is_empty());
    }

    #[test]
    fn test_thumb_path() {
        let thumb = thumb_path("t", FEB_2025, Some("dir/photo.jpg")).unwrap();
        assert!(thumb.ends_with("/2025-02/Img/photo_t.dat"));
        assert!(thumb_path("t", FEB_2025, None).is_none());
    }

    #[test]
    fn test_unknown_time_uses_current_month() {
        let dir = image_dir("t", 0).unwrap();
        assert!(dir.contains(&Local::now().format("/%Y-%m/").to_string()));
    }

    #[test]
    fn test_pick_existing_path() {
        let root = tempfile::tempdir().unwrap();
        let candidates = image_path_candidates("t", FEB_2025, Some("photo.jpg"));

        let picked = pick_existing_path(root.path(), &candidates);
        assert_eq!(picked, Some(candidates[0].as_str()));

        let second = root.path().join(&candidates[1]);
        fs::create_dir_all(second.parent().unwrap()).unwrap();
        fs::write(&second, b"").unwrap();
        let picked = pick_existing_path(root.path(), &candidates);
        assert_eq!(picked, Some(candidates[1].as_str()));

        assert_eq!(pick_existing_path(root.path(), &[]), None);
    }
}
