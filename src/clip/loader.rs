//! CSV clip loading.
//!
//! One header row, then one row per frame in playback order. Timecode and
//! channel-count columns are metadata; every other column is a weight.

use super::FrameStore;
use crate::error::{IdleError, Result};
use crate::livelink::FaceBlendShape;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header names (case-insensitive) that carry metadata rather than weights.
pub const METADATA_COLUMNS: [&str; 2] = ["timecode", "blendshapecount"];

/// Eye-look channels zeroed at load time; a separate controller drives gaze.
///
/// Derived from [`FaceBlendShape::is_eye_look`].
pub const EYE_CHANNELS: [usize; 8] = eye_channels();

const fn eye_channels() -> [usize; 8] {
    let mut out = [0; 8];
    let mut found = 0;
    let mut index = 0;
    while index < FaceBlendShape::COUNT {
        if FaceBlendShape::ALL[index].is_eye_look() {
            out[found] = index;
            found += 1;
        }
        index += 1;
    }
    assert!(found == out.len(), "eye-look channel count changed");
    out
}

/// Load a clip from a CSV file.
pub fn load(path: impl AsRef<Path>) -> Result<FrameStore> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IdleError::data_load(path, e.to_string()))?;
    load_reader(file, path)
}

/// Load a clip from any CSV source. `source` is only used in error messages.
pub fn load_reader<R: Read>(reader: R, source: &Path) -> Result<FrameStore> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv
        .headers()
        .map_err(|e| IdleError::data_load(source, format!("unreadable header: {e}")))?;
    let width = headers.len();
    let keep: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| !is_metadata(name))
        .map(|(i, _)| i)
        .collect();

    let channels = keep.len();
    if channels == 0 {
        return Err(IdleError::data_load(source, "header has no blendshape columns"));
    }
    if channels > FaceBlendShape::COUNT {
        return Err(IdleError::data_load(
            source,
            format!(
                "{channels} blendshape columns, receiver accepts at most {}",
                FaceBlendShape::COUNT
            ),
        ));
    }

    let mut data = Vec::new();
    for (row, record) in csv.records().enumerate() {
        let row = row + 1;
        let record =
            record.map_err(|e| IdleError::data_load(source, format!("row {row}: {e}")))?;
        if record.len() != width {
            return Err(IdleError::data_load(
                source,
                format!("row {row}: expected {width} columns, found {}", record.len()),
            ));
        }
        for &column in &keep {
            let cell = &record[column];
            let value = cell.parse::<f32>().map_err(|e| {
                IdleError::data_load(
                    source,
                    format!("row {row}, column {}: {cell:?} is not a number ({e})", column + 1),
                )
            })?;
            data.push(value);
        }
    }

    if data.is_empty() {
        return Err(IdleError::data_load(source, "clip has no frames"));
    }

    let mut store = FrameStore::from_flat(channels, data);
    store.zero_channels(&EYE_CHANNELS);
    log::debug!(
        "loaded {} frames x {} channels from {}",
        store.len(),
        channels,
        source.display()
    );
    Ok(store)
}

fn is_metadata(header: &str) -> bool {
    METADATA_COLUMNS
        .iter()
        .any(|m| header.trim().eq_ignore_ascii_case(m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn parse(text: &str) -> Result<FrameStore> {
        load_reader(Cursor::new(text.as_bytes().to_vec()), Path::new("inline.csv"))
    }

    fn header(channels: usize) -> String {
        let mut cols = vec!["Timecode".to_string(), "BlendshapeCount".to_string()];
        cols.extend(FaceBlendShape::ALL[..channels].iter().map(|s| s.name().to_string()));
        cols.join(",")
    }

    fn row(timecode: &str, values: &[f32]) -> String {
        let mut cols = vec![timecode.to_string(), values.len().to_string()];
        cols.extend(values.iter().map(ToString::to_string));
        cols.join(",")
    }

    #[test]
    fn test_drops_metadata_and_zeroes_eyes() {
        let values: Vec<f32> = (0..FaceBlendShape::COUNT).map(|i| i as f32 / 100.0).collect();
        let text = format!(
            "{}\n{}\n{}\n",
            header(FaceBlendShape::COUNT),
            row("00:00:00:01.000", &values),
            row("00:00:00:02.000", &values)
        );
        let store = parse(&text).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.channels(), 61);

        let frame = store.frame(0).unwrap();
        for i in EYE_CHANNELS {
            assert_eq!(frame[i], 0.0, "eye channel {i}");
        }
        assert_eq!(EYE_CHANNELS, [1, 2, 3, 4, 8, 9, 10, 11]);
        assert_eq!(frame[0], 0.0);
        assert_eq!(frame[5], 0.05);
        assert_eq!(frame[60], 0.6);
    }

    #[test]
    fn test_narrow_clip_skips_missing_eye_channels() {
        let text = "Timecode,BlendShapeCount,A,B,C\nt0,3,0.1,0.2,0.3\n";
        let store = parse(text).unwrap();
        assert_eq!(store.channels(), 3);
        assert_eq!(store.frame(0), Some(&[0.1, 0.0, 0.0][..]));
    }

    #[test]
    fn test_row_width_mismatch_is_rejected() {
        let text = "Timecode,BlendshapeCount,A,B\nt0,2,0.1,0.2\nt1,2,0.1\n";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, IdleError::DataLoad { .. }));
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_non_numeric_cell_is_rejected() {
        let text = "Timecode,BlendshapeCount,A\nt0,1,abc\n";
        let err = parse(text).unwrap_err();
        assert!(err.to_string().contains("\"abc\""));
    }

    #[test]
    fn test_too_many_channels_is_rejected() {
        let mut cols = vec!["Timecode".to_string()];
        cols.extend((0..62).map(|i| format!("c{i}")));
        let values = vec!["0"; 63].join(",");
        let text = format!("{}\n{}\n", cols.join(","), values);
        assert!(parse(&text).is_err());
    }

    #[test]
    fn test_header_only_is_rejected() {
        let err = parse("Timecode,BlendshapeCount,A\n").unwrap_err();
        assert!(err.to_string().contains("no frames"));
    }

    #[test]
    fn test_missing_file_is_data_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, IdleError::DataLoad { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Timecode,BlendshapeCount,A,B").unwrap();
        writeln!(file, "t0,2,1,0").unwrap();
        writeln!(file, "t1,2,0,1").unwrap();
        file.flush().unwrap();

        let store = load(file.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.frame(1), Some(&[0.0, 0.0][..]));
    }
}
