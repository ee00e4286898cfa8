//! FILENAME: core/cube-engine/tests/common/mod.rs
//! Fixtures shared by the cube-engine integration tests.

#![allow(dead_code)]

use cube_engine::{Cube, ScalarResult, Value};

/// Sales cube: dimensions `[Year, Month, Product]`, fields `[Count, PercentOk]`.
pub fn create_sales_cube() -> Cube {
    let mut cube = Cube::new(&["Year", "Month", "Product"], &["Count", "PercentOk"]);
    cube.add_rows(
        &["Year", "Month", "Product", "Count", "PercentOk"],
        &[
            vec![Value::from(2018), Value::from("Jan"), Value::from("A"), Value::from(100), Value::from(0.05)],
            vec![Value::from(2018), Value::from("Feb"), Value::from("A"), Value::from(300), Value::from(0.01)],
            vec![Value::from(2018), Value::from("Feb"), Value::from("B"), Value::from(100), Value::from(0.1)],
            vec![Value::from(2017), Value::from("Jan"), Value::from("A"), Value::from(200), Value::from(0.5)],
            vec![Value::from(2017), Value::from("Jan"), Value::from("B"), Value::from(200), Value::from(0.1)],
        ],
    )
    .expect("fixture rows match the schema");
    cube
}

/// Sums `Count` and keeps `PercentOk` as a Count-weighted average.
/// The aggregate starts as `[0, Empty]`.
pub fn weighted_average(current: &[Value], row: &[Value]) -> ScalarResult<Vec<Value>> {
    let sum = current[0].as_i64()?;
    let mut pct = if current[1].is_empty() { 1.0 } else { current[1].as_f64()? };

    let count = row[0].as_i64()?;
    let percentage = row[1].as_f64()?;

    if sum + count > 0 {
        pct = (sum as f64 * pct + count as f64 * percentage) / (sum + count) as f64;
    }

    Ok(vec![Value::Integer(sum + count), Value::Float(pct)])
}

/// Initial aggregate for `weighted_average`.
pub fn weighted_average_seed() -> Vec<Value> {
    vec![Value::Integer(0), Value::Empty]
}

/// Compares rows, allowing float values to differ by rounding noise.
pub fn assert_rows_close(actual: &[Vec<Value>], expected: &[Vec<Value>]) {
    assert_eq!(actual.len(), expected.len(), "row count differs: {:?}", actual);
    for (a_row, e_row) in actual.iter().zip(expected) {
        assert_eq!(a_row.len(), e_row.len(), "row width differs: {:?}", a_row);
        for (a, e) in a_row.iter().zip(e_row) {
            match (a, e) {
                (Value::Float(a), Value::Float(e)) => {
                    assert!((a - e).abs() < 1e-12, "expected {} got {} in {:?}", e, a, a_row)
                }
                _ => assert_eq!(a, e, "in row {:?}", a_row),
            }
        }
    }
}
