//! End-to-end tests for scalar field construction and lookup.

use scalar_field::{FieldError, GridGeometry, ScalarField};

const NCOLS: usize = 10;
const NROWS: usize = 10;
const XLL: f64 = -3.769470033164;
const YLL: f64 = 43.460341898838;
const CELL: f64 = 0.000505065545;

const HEADER: &str = "ncols 10\n\
                      nrows 10\n\
                      xllcorner -3.769470033164\n\
                      yllcorner 43.460341898838\n\
                      cellsize 0.000505065545\n\
                      NODATA_value -9999\n";

/// 10x10 grid where value(row, col) = row * 10 + col. The field is affine
/// in (row, col), so bilinear interpolation reproduces it exactly at
/// fractional positions.
fn position_encoded_asc() -> String {
    let mut text = String::from(HEADER);
    for row in 0..NROWS {
        let tokens: Vec<String> = (0..NCOLS).map(|col| (row * 10 + col).to_string()).collect();
        text.push_str(&tokens.join(" "));
        text.push('\n');
    }
    text
}

fn expected(row: f64, col: f64) -> f64 {
    row * 10.0 + col
}

#[test]
fn test_created_from_ascii_grid() {
    let field = ScalarField::from_ascii_grid(&position_encoded_asc()).unwrap();
    let g = field.geometry();
    assert_eq!(g.ncols, NCOLS);
    assert_eq!(g.nrows, NROWS);
    assert_eq!(g.xllcorner, XLL);
    assert_eq!(g.yllcorner, YLL);
    assert_eq!(g.cellsize, CELL);
}

#[test]
fn test_value_at_indexes_is_row_major() {
    let field = ScalarField::from_ascii_grid(&position_encoded_asc()).unwrap();
    // Top-left is the first token of the first data line, bottom-right the
    // last token of the last line.
    assert_eq!(field.value_at_indexes(0, 0), Some(0.0));
    assert_eq!(field.value_at_indexes(0, 9), Some(9.0));
    assert_eq!(field.value_at_indexes(9, 0), Some(90.0));
    assert_eq!(field.value_at_indexes(9, 9), Some(99.0));
}

#[test]
fn test_range_spans_all_values() {
    let field = ScalarField::from_ascii_grid(&position_encoded_asc()).unwrap();
    let range = field.range().unwrap();
    assert_eq!(range.min, 0.0);
    assert_eq!(range.max, 99.0);
    for cell in field.grid().values().iter().flatten() {
        assert!(range.min <= *cell && *cell <= range.max);
    }
}

#[test]
fn test_value_at_near_corner_cell_centers() {
    let field = ScalarField::from_ascii_grid(&position_encoded_asc()).unwrap();
    let top = YLL + NROWS as f64 * CELL;

    // At the center of each corner cell the lookup degenerates to the
    // corner sample itself.
    let cases = [
        (XLL + 0.5 * CELL, top - 0.5 * CELL, expected(0.0, 0.0)), // UL
        (XLL + 9.5 * CELL, top - 0.5 * CELL, expected(0.0, 9.0)), // UR
        (XLL + 0.5 * CELL, YLL + 0.5 * CELL, expected(9.0, 0.0)), // LL
        (XLL + 9.5 * CELL, YLL + 0.5 * CELL, expected(9.0, 9.0)), // LR
    ];
    for (lon, lat, want) in cases {
        let got = field.value_at(lon, lat).unwrap();
        assert!(
            (got - want).abs() < 1e-6,
            "value_at({lon}, {lat}) = {got}, want {want}"
        );
    }
}

#[test]
fn test_value_at_interior_fractional_position() {
    let field = ScalarField::from_ascii_grid(&position_encoded_asc()).unwrap();

    // (lon, lat) three cells right of and two cells up from the lower-left
    // corner sits at fractional indexes (row 7.5, col 2.5).
    let lon = XLL + 3.0 * CELL;
    let lat = YLL + 2.0 * CELL;
    let got = field.value_at(lon, lat).unwrap();
    assert!((got - expected(7.5, 2.5)).abs() < 1e-6);
}

#[test]
fn test_value_at_outside_extent_is_missing() {
    let field = ScalarField::from_ascii_grid(&position_encoded_asc()).unwrap();
    assert!(field.value_at(XLL - CELL, YLL + CELL).is_none());
    assert!(field.value_at(XLL + CELL, YLL - CELL).is_none());
    assert!(field.value_at(XLL + 20.0 * CELL, YLL + CELL).is_none());
}

#[test]
fn test_nodata_cells_are_missing() {
    // Replace the (0, 1) sample with the sentinel and sneak in a
    // differently-spelled twin at (0, 2).
    let mut text = String::from(HEADER);
    text.push_str("0 -9999 -9999.0 3 4 5 6 7 8 9\n");
    for row in 1..NROWS {
        let tokens: Vec<String> = (0..NCOLS).map(|col| (row * 10 + col).to_string()).collect();
        text.push_str(&tokens.join(" "));
        text.push('\n');
    }
    let field = ScalarField::from_ascii_grid(&text).unwrap();

    // Textual sentinel match is missing; the numeric twin is a value.
    assert_eq!(field.value_at_indexes(0, 1), None);
    assert_eq!(field.value_at_indexes(0, 2), Some(-9999.0));

    // A continuous lookup blending the missing cell comes back missing.
    let top = YLL + NROWS as f64 * CELL;
    assert!(field.value_at(XLL + 1.5 * CELL, top - 1.0 * CELL).is_none());
    // The rest of the field still interpolates.
    assert!(field.value_at(XLL + 5.0 * CELL, YLL + 5.0 * CELL).is_some());
}

#[test]
fn test_construction_is_idempotent() {
    let text = position_encoded_asc();
    let a = ScalarField::from_ascii_grid(&text).unwrap();
    let b = ScalarField::from_ascii_grid(&text).unwrap();
    assert_eq!(a.grid(), b.grid());
    assert_eq!(a.range(), b.range());
    assert_eq!(a.geometry(), b.geometry());
}

#[test]
fn test_dimension_mismatch_is_rejected() {
    let geometry = GridGeometry::new(NCOLS, NROWS, XLL, YLL, CELL).unwrap();
    let err = ScalarField::new(geometry, vec![Some(0.0); 99]).unwrap_err();
    assert!(matches!(
        err,
        FieldError::DimensionMismatch {
            expected: 100,
            actual: 99
        }
    ));
}

#[test]
fn test_truncated_header_is_rejected() {
    let err = ScalarField::from_ascii_grid("ncols 10\nnrows 10\n").unwrap_err();
    assert!(matches!(err, FieldError::Asc(_)));
}

#[test]
fn test_data_after_blank_line_is_ignored() {
    let mut text = position_encoded_asc();
    text.push_str("\n99 99 99 99 99 99 99 99 99 99\n");
    let field = ScalarField::from_ascii_grid(&text).unwrap();
    assert_eq!(field.grid().values().len(), 100);
    assert_eq!(field.value_at_indexes(9, 9), Some(99.0));
}

#[test]
fn test_geometry_serde_roundtrip() {
    let geometry = GridGeometry::new(NCOLS, NROWS, XLL, YLL, CELL).unwrap();
    let json = serde_json::to_string(&geometry).unwrap();
    let back: GridGeometry = serde_json::from_str(&json).unwrap();
    assert_eq!(back, geometry);
}
