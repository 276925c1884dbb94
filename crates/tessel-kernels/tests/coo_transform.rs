use tessel_core::{Complex, Coo, KernelError};
use tessel_kernels::*;

fn sorted_triplets(a: &Coo<f64, i64>) -> Vec<(usize, usize, f64)> {
    let mut t: Vec<_> = a.triplets().collect();
    t.sort_by(|x, y| x.partial_cmp(y).unwrap());
    t
}

fn sample_coo() -> Coo<f64, i64> {
    // A = [[1,0,2],[0,3,0]], (1,1) stored twice
    let nrows = 2usize;
    let ncols = 3usize;
    let row = vec![1i64, 0, 1, 0];
    let col = vec![1i64, 2, 1, 0];
    let data = vec![1.0f64, 2.0, 2.0, 1.0];
    Coo::from_parts(nrows, ncols, row, col, data, true).unwrap()
}

#[test]
fn transpose_swaps_coordinates() {
    let a = sample_coo();
    let mut t = Coo::zeros(3, 2, a.nnz());
    transpose(&a, &mut t).unwrap();
    assert_eq!(t.shape(), (3, 2));
    assert_eq!(t.row, vec![1i64, 2, 1, 0]);
    assert_eq!(t.col, vec![1i64, 0, 1, 0]);
    assert_eq!(t.data, a.data);
}

#[test]
fn transpose_keeps_duplicate_entries() {
    let a = sample_coo();
    let t = transposed(&a).unwrap();
    assert_eq!(t.nnz(), 4);
    let ones: Vec<_> = t.triplets().filter(|&(i, j, _)| i == 1 && j == 1).collect();
    assert_eq!(ones, vec![(1, 1, 1.0), (1, 1, 2.0)]);
}

#[test]
fn double_transpose_restores_triplets() {
    let a = sample_coo();
    let tt = transposed(&transposed(&a).unwrap()).unwrap();
    assert_eq!(tt.shape(), a.shape());
    assert_eq!(sorted_triplets(&tt), sorted_triplets(&a));
}

#[test]
fn conj_transpose_of_real_matrix_equals_transpose() {
    let a = sample_coo();
    assert_eq!(conj_transposed(&a).unwrap(), transposed(&a).unwrap());
}

#[test]
fn conj_transpose_conjugates_complex_values() {
    let a = Coo::<Complex<f64>, i32>::from_parts(
        1,
        2,
        vec![0, 0],
        vec![0, 1],
        vec![Complex::new(1.0, 2.0), Complex::new(-3.0, -4.0)],
        true,
    )
    .unwrap();
    let mut t = Coo::zeros(2, 1, 2);
    conj_transpose(&a, &mut t).unwrap();
    assert_eq!(t.row, vec![0, 1]);
    assert_eq!(t.col, vec![0, 0]);
    assert_eq!(
        t.data,
        vec![Complex::new(1.0, -2.0), Complex::new(-3.0, 4.0)]
    );

    let plain = transposed(&a).unwrap();
    assert_eq!(plain.data, a.data);
}

#[test]
fn transpose_rejects_wrong_target_shape() {
    let a = sample_coo();
    let mut t = Coo::zeros(2, 3, a.nnz());
    let err = transpose(&a, &mut t).unwrap_err();
    assert!(matches!(
        err,
        KernelError::DimensionMismatch {
            what: "trans",
            expected: (3, 2),
            got: (2, 3),
            ..
        }
    ));
}

#[test]
fn transpose_rejects_wrong_target_nnz() {
    let a = sample_coo();
    let mut t = Coo::zeros(3, 2, 3);
    let err = transpose(&a, &mut t).unwrap_err();
    assert!(matches!(err, KernelError::DimensionMismatch { what: "trans nnz", .. }));
    assert!(t.data.iter().all(|&v| v == 0.0));
}

#[test]
fn transpose_of_empty_matrix() {
    let a = Coo::<f64, i64>::from_parts(4, 1, vec![], vec![], vec![], true).unwrap();
    let t = transposed(&a).unwrap();
    assert_eq!(t.shape(), (1, 4));
    assert_eq!(t.nnz(), 0);
}

#[test]
fn parallel_transpose_matches_swap() {
    let nnz = 100_000usize;
    let row: Vec<i64> = (0..nnz).map(|k| (k % 997) as i64).collect();
    let col: Vec<i64> = (0..nnz).map(|k| ((k * 31) % 503) as i64).collect();
    let data: Vec<f64> = (0..nnz).map(|k| k as f64).collect();
    let a = Coo::from_parts(997, 503, row, col, data, true).unwrap();
    let t = transposed(&a).unwrap();
    assert_eq!(t.row, a.col);
    assert_eq!(t.col, a.row);
    assert_eq!(t.data, a.data);
}

#[test]
fn extract_diagonal_sums_duplicates() {
    let a = Coo::<f64, i64>::from_parts(
        3,
        4,
        vec![0, 2, 1, 2, 0],
        vec![0, 2, 3, 2, 1],
        vec![1.0, 2.0, 9.0, 0.5, 7.0],
        true,
    )
    .unwrap();
    let mut diag = vec![f64::NAN; 3];
    extract_diagonal(&a, &mut diag).unwrap();
    assert_eq!(diag, vec![1.0, 0.0, 2.5]);
}

#[test]
fn extract_diagonal_rejects_wrong_length() {
    let a = sample_coo();
    let mut diag = vec![0.0; 3];
    let err = extract_diagonal(&a, &mut diag).unwrap_err();
    assert!(matches!(
        err,
        KernelError::DimensionMismatch {
            expected: (2, 1),
            got: (3, 1),
            ..
        }
    ));
}
