//! Snapshot files.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use regioncast_common::clock::snapshot_stamp;
use regioncast_common::error::{RegioncastError, RegioncastResult};
use regioncast_region_model::Frame;

/// `snapshot_YYYYmmdd_HHMMSS.png`
pub fn snapshot_file_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("snapshot_{}.png", snapshot_stamp(at))
}

/// Write `frame` as a PNG into `dir`, named after `at`.
///
/// Creates `dir` if needed. A snapshot taken within the same second as a
/// previous one replaces it.
pub fn write_snapshot<Tz: TimeZone>(
    frame: &Frame,
    dir: &Path,
    at: &DateTime<Tz>,
) -> RegioncastResult<PathBuf>
where
    Tz::Offset: std::fmt::Display,
{
    if !dir.as_os_str().is_empty() {
        std::fs::create_dir_all(dir)
            .map_err(|e| RegioncastError::snapshot(dir, e.to_string()))?;
    }

    let path = dir.join(snapshot_file_name(at));
    frame
        .save_with_format(&path, image::ImageFormat::Png)
        .map_err(|e| RegioncastError::snapshot(&path, e.to_string()))?;

    tracing::info!(
        path = %path.display(),
        width = frame.width(),
        height = frame.height(),
        "Snapshot written"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use image::Rgb;

    #[test]
    fn test_file_name_uses_timestamp() {
        let at = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 1)
            .unwrap();
        assert_eq!(snapshot_file_name(&at), "snapshot_20240309_070501.png");
    }

    #[test]
    fn test_write_creates_dir_and_png() {
        let dir = std::env::temp_dir().join(format!(
            "regioncast_test_snapshot_{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);

        let frame = Frame::from_pixel(12, 7, Rgb([1, 2, 3]));
        let path = write_snapshot(&frame, &dir, &Utc::now()).unwrap();
        assert!(path.starts_with(&dir));

        let read = image::open(&path).unwrap().to_rgb8();
        assert_eq!(read, frame);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let blocker = std::env::temp_dir().join(format!(
            "regioncast_test_snapshot_blocker_{}",
            std::process::id()
        ));
        std::fs::write(&blocker, b"not a dir").unwrap();

        let frame = Frame::from_pixel(2, 2, Rgb([0, 0, 0]));
        let err = write_snapshot(&frame, &blocker, &Utc::now()).unwrap_err();
        assert!(matches!(err, RegioncastError::Snapshot { .. }));

        std::fs::remove_file(&blocker).ok();
    }
}
