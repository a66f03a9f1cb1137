//! Load, transform, detect, match and write one stereo pair.

use crate::config::Config;
use serde::Serialize;
use std::path::PathBuf;
use stereobmp::{Bitmap, RowMatch};

#[derive(Debug, Serialize)]
pub(crate) struct MatchRecord {
    src_row: usize,
    src_col: usize,
    dst_row: usize,
    dst_col: usize,
    ssd: u64,
    disparity: isize,
}

impl From<RowMatch> for MatchRecord {
    fn from(value: RowMatch) -> Self {
        Self {
            src_row: value.source.row,
            src_col: value.source.col,
            dst_row: value.target.row,
            dst_col: value.target.col,
            ssd: value.ssd,
            disparity: value.disparity(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Output {
    pub(crate) height: usize,
    pub(crate) width: usize,
    pub(crate) edge_count: usize,
    pub(crate) matches: Vec<MatchRecord>,
    pub(crate) written: Vec<PathBuf>,
}

pub(crate) fn run(config: &Config) -> Result<Output, Box<dyn std::error::Error>> {
    let mut left = Bitmap::load(&config.left)?;
    let mut right = Bitmap::load(&config.right)?;
    tracing::info!(
        height = left.height(),
        width = left.width(),
        "loaded stereo pair"
    );

    if config.contrast.enabled {
        left.apply_auto_contrast_with((&config.contrast.mode).into())?;
    }
    left.apply_grayscale()?;
    if config.grayscale_right {
        right.apply_grayscale()?;
    }

    let params = config.edge_params();
    match &config.edges.rows {
        Some(rows) => {
            for &row in rows {
                left.detect_row_edges(row, &params)?;
            }
        }
        None => {
            left.detect_edges(&params)?;
        }
    }
    let edge_count = left.edge_points().len();
    tracing::info!(edge_count, "edge detection finished");

    let matches = if edge_count == 0 {
        tracing::warn!("no edge points found, skipping matching");
        Vec::new()
    } else {
        config
            .matcher()
            .match_row(&left, &mut right, config.match_cfg.row_offset)?
    };

    let mut written = Vec::new();
    if let Some(kind) = config.write_left {
        written.push(left.write_output(kind.into())?);
    }
    if let Some(kind) = config.write_right {
        written.push(right.write_output(kind.into())?);
    }

    Ok(Output {
        height: left.height(),
        width: left.width(),
        edge_count,
        matches: matches.into_iter().map(MatchRecord::from).collect(),
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::config::Config;
    use std::fs;
    use std::path::Path;
    use stereobmp::bitmap::{input_path, output_path};
    use stereobmp::BmpHeader;

    fn write_scene(base: &Path, width: u16, height: u16) {
        let mut bytes = BmpHeader::new(width, height).as_bytes().to_vec();
        for row in 0..height as usize {
            for col in 0..width as usize {
                let v = (((col * 13) ^ (row * 7) ^ (col * row)) & 0xFF) as u8;
                bytes.extend_from_slice(&[v, v.wrapping_mul(3), 255 - v]);
            }
        }
        fs::write(input_path(base), bytes).unwrap();
    }

    fn config_for(left: &Path, right: &Path, extra: &str) -> Config {
        let text = format!(
            r#"{{ "left": {:?}, "right": {:?}{extra} }}"#,
            left.to_str().unwrap(),
            right.to_str().unwrap()
        );
        Config::from_json(&text).unwrap()
    }

    #[test]
    fn default_config_sweeps_and_writes_right_only() {
        let dir = tempfile::tempdir().unwrap();
        let (left, right) = (dir.path().join("left"), dir.path().join("right"));
        write_scene(&left, 48, 24);
        write_scene(&right, 48, 24);

        let output = run(&config_for(&left, &right, "")).unwrap();
        assert_eq!((output.height, output.width), (24, 48));
        assert!(output.edge_count > 0);
        assert_eq!(output.matches.len(), output.edge_count);
        assert!(output.matches.iter().all(|m| m.ssd == 0));
        assert_eq!(output.written, vec![output_path(&right)]);
        assert!(!output_path(&left).exists());
    }

    #[test]
    fn listed_rows_limit_detection() {
        let dir = tempfile::tempdir().unwrap();
        let (left, right) = (dir.path().join("left"), dir.path().join("right"));
        write_scene(&left, 48, 24);
        write_scene(&right, 48, 24);

        let extra = r#", "edges": { "rows": [5, 12] }, "write_left": "original""#;
        let output = run(&config_for(&left, &right, extra)).unwrap();
        assert!(output.edge_count > 0);
        assert!(output
            .matches
            .iter()
            .all(|m| m.src_row == 5 || m.src_row == 12));
        assert_eq!(output.written.len(), 2);
        assert!(output_path(&left).exists());
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("nope"), &dir.path().join("nope2"), "");
        assert!(run(&config).is_err());
    }
}
