use stereobmp::{Bitmap, BmpHeader, EdgeParams, EdgePoint, StereoBmpError, HIGHLIGHT};

/// Builds a grayscale bitmap whose intensity at `(row, col)` is `f(row, col)`.
fn gray_bitmap(width: u16, height: u16, f: impl Fn(usize, usize) -> u8) -> Bitmap {
    let mut bytes = BmpHeader::new(width, height).as_bytes().to_vec();
    for row in 0..height as usize {
        for col in 0..width as usize {
            let v = f(row, col);
            bytes.extend_from_slice(&[v, v, v]);
        }
    }
    let mut bmp = Bitmap::from_bytes(&bytes).unwrap();
    bmp.apply_grayscale().unwrap();
    bmp
}

fn params(padding: usize, skip: usize) -> EdgeParams {
    EdgeParams {
        padding,
        skip,
        ..EdgeParams::default()
    }
}

#[test]
fn flat_row_has_no_edges() {
    let mut bmp = gray_bitmap(16, 3, |_, _| 90);
    let found = bmp.detect_row_edges(1, &params(1, 0)).unwrap();
    assert!(found.is_empty());
    assert!(bmp.edge_points().is_empty());
}

#[test]
fn single_step_yields_one_point_left_of_the_step() {
    let k = 4;
    let mut bmp = gray_bitmap(10, 3, |_, col| if col < k { 0 } else { 255 });
    let found = bmp.detect_row_edges(1, &params(1, 0)).unwrap();
    assert_eq!(found, vec![EdgePoint::new(1, k - 1)]);
    assert_eq!(bmp.edge_points(), &[EdgePoint::new(1, k - 1)]);
}

#[test]
fn threshold_is_inclusive() {
    let mut bmp = gray_bitmap(8, 3, |row, col| match (row, col) {
        (0, c) if c >= 3 => 130,
        (2, c) if c >= 3 => 129,
        _ => 100,
    });
    let edge = params(1, 0);
    assert_eq!(
        bmp.detect_row_edges(0, &edge).unwrap(),
        vec![EdgePoint::new(0, 2)]
    );
    assert!(bmp.detect_row_edges(2, &edge).unwrap().is_empty());
}

#[test]
fn skip_thins_out_adjacent_hits() {
    let stripes = |_: usize, col: usize| if col % 2 == 0 { 0 } else { 255 };

    let mut bmp = gray_bitmap(12, 3, stripes);
    let all = bmp.detect_row_edges(1, &params(1, 0)).unwrap();
    assert_eq!(all.len(), 10);

    let mut bmp = gray_bitmap(12, 3, stripes);
    let cols: Vec<usize> = bmp
        .detect_row_edges(1, &params(1, 2))
        .unwrap()
        .iter()
        .map(|p| p.col)
        .collect();
    assert_eq!(cols, vec![1, 4, 7, 10]);
}

#[test]
fn padding_bounds_the_scan() {
    let stripes = |_: usize, col: usize| if col % 2 == 0 { 0 } else { 255 };
    let mut bmp = gray_bitmap(12, 3, stripes);
    let cols: Vec<usize> = bmp
        .detect_row_edges(1, &params(3, 0))
        .unwrap()
        .iter()
        .map(|p| p.col)
        .collect();
    assert_eq!(cols, (3..9).collect::<Vec<_>>());

    // Zero padding still stops one short of the last column.
    let mut bmp = gray_bitmap(12, 3, stripes);
    let found = bmp.detect_row_edges(1, &params(0, 0)).unwrap();
    assert_eq!(found.len(), 11);
    assert_eq!(found.last(), Some(&EdgePoint::new(1, 10)));
}

#[test]
fn detection_requires_grayscale() {
    let mut bytes = BmpHeader::new(4, 3).as_bytes().to_vec();
    bytes.extend_from_slice(&[0u8; 36]);
    let mut bmp = Bitmap::from_bytes(&bytes).unwrap();
    let err = bmp.detect_row_edges(1, &params(1, 0)).unwrap_err();
    assert_eq!(
        err,
        StereoBmpError::InvalidState {
            reason: "edge detection requires a grayscale image",
        }
    );
}

#[test]
fn row_outside_image_is_rejected() {
    let mut bmp = gray_bitmap(10, 3, |_, _| 0);
    let err = bmp.detect_row_edges(3, &params(1, 0)).unwrap_err();
    assert_eq!(
        err,
        StereoBmpError::OutOfBounds {
            row: 3,
            col: 0,
            height: 3,
            width: 10,
        }
    );
}

#[test]
fn detection_without_pixels_is_missing_buffer() {
    let mut bmp = Bitmap::new();
    assert!(matches!(
        bmp.detect_row_edges(0, &EdgeParams::default()),
        Err(StereoBmpError::MissingBuffer { .. })
    ));
    assert!(matches!(
        bmp.detect_edges(&EdgeParams::default()),
        Err(StereoBmpError::MissingBuffer { .. })
    ));
}

#[test]
fn repeated_detection_appends_until_cleared() {
    let mut bmp = gray_bitmap(10, 3, |_, col| if col < 5 { 0 } else { 200 });
    bmp.detect_row_edges(1, &params(1, 0)).unwrap();
    bmp.detect_row_edges(1, &params(1, 0)).unwrap();
    assert_eq!(
        bmp.edge_points(),
        &[EdgePoint::new(1, 4), EdgePoint::new(1, 4)]
    );
    bmp.clear_edge_points();
    assert!(bmp.edge_points().is_empty());
}

#[test]
fn marking_outlines_each_hit() {
    let mut bmp = gray_bitmap(10, 5, |_, col| if col < 5 { 0 } else { 200 });
    let edge = EdgeParams {
        mark: true,
        ..params(1, 0)
    };
    let found = bmp.detect_row_edges(2, &edge).unwrap();
    assert_eq!(found, vec![EdgePoint::new(2, 4)]);

    let current = bmp.current().unwrap();
    for row in 1..=3 {
        for col in 3..=5 {
            let px = current.pixel(row, col).unwrap();
            if (row, col) == (2, 4) {
                assert_eq!(px, [0, 0, 0]);
            } else {
                assert_eq!(px, HIGHLIGHT, "({row}, {col}) not marked");
            }
        }
    }
    assert_eq!(current.pixel(0, 4), Some([0, 0, 0]));
    // The original snapshot never carries marks.
    assert_eq!(bmp.original().unwrap().pixel(1, 3), Some([0, 0, 0]));
}

#[test]
fn marking_rejects_rows_and_padding_without_room() {
    let mut bmp = gray_bitmap(10, 5, |_, col| if col < 5 { 0 } else { 200 });
    let marked = |padding| EdgeParams {
        mark: true,
        ..params(padding, 0)
    };
    assert!(matches!(
        bmp.detect_row_edges(0, &marked(1)),
        Err(StereoBmpError::OutOfBounds { .. })
    ));
    assert!(matches!(
        bmp.detect_row_edges(4, &marked(1)),
        Err(StereoBmpError::OutOfBounds { .. })
    ));
    assert!(matches!(
        bmp.detect_row_edges(2, &marked(0)),
        Err(StereoBmpError::OutOfBounds { .. })
    ));
    assert!(bmp.edge_points().is_empty());
}

#[test]
fn sweep_covers_rows_inside_padding() {
    let mut bmp = gray_bitmap(10, 6, |_, col| if col < 5 { 0 } else { 200 });
    let total = bmp.detect_edges(&params(1, 0)).unwrap();
    assert_eq!(total, 4);
    let rows: Vec<usize> = bmp.edge_points().iter().map(|p| p.row).collect();
    assert_eq!(rows, vec![1, 2, 3, 4]);
    assert!(bmp.edge_points().iter().all(|p| p.col == 4));
}

#[test]
fn huge_skip_ends_the_row_after_first_hit() {
    let mut bmp = gray_bitmap(10, 3, |_, col| if col % 2 == 0 { 0 } else { 255 });
    let found = bmp.detect_row_edges(1, &params(1, usize::MAX)).unwrap();
    assert_eq!(found, vec![EdgePoint::new(1, 1)]);
    assert_eq!(bmp.edge_points().len(), 1);
}

#[test]
fn empty_sweep_still_requires_grayscale() {
    let mut bytes = BmpHeader::new(4, 2).as_bytes().to_vec();
    bytes.extend_from_slice(&[0u8; 24]);
    let mut bmp = Bitmap::from_bytes(&bytes).unwrap();
    // Two rows with padding 1 leave nothing to sweep.
    assert!(matches!(
        bmp.detect_edges(&params(1, 0)),
        Err(StereoBmpError::InvalidState { .. })
    ));
}
