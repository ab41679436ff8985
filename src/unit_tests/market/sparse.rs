use super::*;

#[test]
fn test_empty_matrix_reads_zero() {
    let m = SparseMatrix::<f64>::new(3, 2);
    assert_eq!(m.nrows(), 3);
    assert_eq!(m.ncols(), 2);
    assert_eq!(m.nnz(), 0);
    assert_eq!(m.get(2, 1), 0.0);
}

#[test]
fn test_add_and_get() {
    let mut m = SparseMatrix::new(2, 2);
    m.add(0, 1, 3.0);
    m.add(1, 0, -2.0);
    assert_eq!(m.get(0, 1), 3.0);
    assert_eq!(m.get(1, 0), -2.0);
    assert_eq!(m.get(0, 0), 0.0);
    assert_eq!(m.nnz(), 2);
}

#[test]
fn test_duplicate_insertion_sums() {
    let mut m = SparseMatrix::new(2, 2);
    m.add(0, 0, 1.5);
    m.add(0, 0, 2.5);
    assert_eq!(m.get(0, 0), 4.0);
    assert_eq!(m.nnz(), 1, "duplicates fold into one entry");
}

#[test]
fn test_column_keeps_insertion_order() {
    let mut m = SparseMatrix::new(3, 1);
    m.add(2, 0, 1.0);
    m.add(0, 0, 2.0);
    let rows: Vec<usize> = m.column(0).iter().map(|(r, _)| *r).collect();
    assert_eq!(rows, vec![2, 0]);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_row_out_of_range_panics() {
    let mut m = SparseMatrix::new(1, 1);
    m.add(1, 0, 1.0);
}
