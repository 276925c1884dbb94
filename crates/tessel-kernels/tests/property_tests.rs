//! Property-based tests for the coordinate-format kernels.
//!
//! Values are drawn from small integers so every sum is exact and results
//! can be compared with `==` regardless of accumulation order.

use proptest::prelude::*;
use tessel_core::{Coo, Dense, Layout};
use tessel_kernels::*;

type Triplets = (usize, usize, Vec<(usize, usize, f64)>);

fn coo_strategy(max_dim: usize, max_nnz: usize) -> impl Strategy<Value = Triplets> {
    (1..=max_dim, 1..=max_dim).prop_flat_map(move |(nrows, ncols)| {
        (
            Just(nrows),
            Just(ncols),
            prop::collection::vec(
                (0..nrows, 0..ncols, (-8i32..=8).prop_map(f64::from)),
                0..=max_nnz,
            ),
        )
    })
}

fn build(nrows: usize, ncols: usize, entries: &[(usize, usize, f64)]) -> Coo<f64, i64> {
    let row = entries.iter().map(|e| e.0 as i64).collect();
    let col = entries.iter().map(|e| e.1 as i64).collect();
    let data = entries.iter().map(|e| e.2).collect();
    Coo::from_parts(nrows, ncols, row, col, data, true).unwrap()
}

fn dense_product(a: &Dense<f64>, b: &Dense<f64>) -> Vec<f64> {
    let (m, n) = a.shape();
    let k = b.ncols;
    let mut out = vec![0.0; m * k];
    for i in 0..m {
        for j in 0..k {
            out[i * k + j] = (0..n).map(|p| a.get(i, p) * b.get(p, j)).sum();
        }
    }
    out
}

fn sorted(mut t: Vec<(usize, usize, f64)>) -> Vec<(usize, usize, f64)> {
    t.sort_by(|x, y| x.partial_cmp(y).unwrap());
    t
}

proptest! {
    #[test]
    fn prop_spmv_matches_dense_product(
        (nrows, ncols, entries) in coo_strategy(12, 40),
        k in 1usize..4,
        col_major in any::<bool>(),
    ) {
        let a = build(nrows, ncols, &entries);
        let bvals: Vec<f64> = (0..ncols * k).map(|v| (v % 5) as f64 - 2.0).collect();
        let b = Dense::from_row_major(ncols, k, bvals).unwrap();
        let layout = if col_major { Layout::ColMajor } else { Layout::RowMajor };
        let mut c = Dense::zeros(nrows, k, layout);
        spmv(&a, &b, &mut c).unwrap();

        let want = dense_product(&to_dense(&a, Layout::RowMajor).unwrap(), &b);
        prop_assert_eq!(c.to_row_major_vec(), want);
    }

    #[test]
    fn prop_spmv_ignores_entry_order(
        (nrows, ncols, entries) in coo_strategy(10, 30),
        shift in 0usize..30,
    ) {
        let a = build(nrows, ncols, &entries);
        let mut rotated = entries.clone();
        if !rotated.is_empty() {
            let by = shift % rotated.len();
            rotated.rotate_left(by);
        }
        rotated.reverse();
        let r = build(nrows, ncols, &rotated);

        let b = Dense::from_row_major(ncols, 1, (0..ncols).map(|v| v as f64).collect()).unwrap();
        let mut c1 = Dense::zeros(nrows, 1, Layout::RowMajor);
        let mut c2 = Dense::zeros(nrows, 1, Layout::RowMajor);
        spmv(&a, &b, &mut c1).unwrap();
        spmv(&r, &b, &mut c2).unwrap();
        prop_assert_eq!(c1.data, c2.data);
    }

    #[test]
    fn prop_zero_beta_ignores_prior_output(
        (nrows, ncols, entries) in coo_strategy(10, 30),
        junk in prop::collection::vec(-1.0e6..1.0e6f64, 10),
    ) {
        let a = build(nrows, ncols, &entries);
        let b = Dense::from_row_major(ncols, 1, vec![1.0; ncols]).unwrap();
        let alpha = Dense::scalar(2.0);
        let beta = Dense::scalar(0.0);

        let mut clean = Dense::zeros(nrows, 1, Layout::RowMajor);
        advanced_spmv(&alpha, &a, &b, &beta, &mut clean).unwrap();

        let dirty: Vec<f64> = (0..nrows).map(|i| if i % 2 == 0 { f64::NAN } else { junk[i % junk.len()] }).collect();
        let mut c = Dense::from_row_major(nrows, 1, dirty).unwrap();
        advanced_spmv(&alpha, &a, &b, &beta, &mut c).unwrap();
        prop_assert_eq!(c.data, clean.data);
    }

    #[test]
    fn prop_dense_sums_duplicates(
        (nrows, ncols, entries) in coo_strategy(8, 40),
    ) {
        let a = build(nrows, ncols, &entries);
        let d = to_dense(&a, Layout::ColMajor).unwrap();
        let mut want = vec![0.0; nrows * ncols];
        for &(i, j, v) in &entries {
            want[i * ncols + j] += v;
        }
        prop_assert_eq!(d.to_row_major_vec(), want);
    }

    #[test]
    fn prop_double_transpose_is_identity(
        (nrows, ncols, entries) in coo_strategy(12, 40),
    ) {
        let a = build(nrows, ncols, &entries);
        let t = transposed(&a).unwrap();
        prop_assert_eq!(t.shape(), (ncols, nrows));
        let tt = transposed(&t).unwrap();
        prop_assert_eq!(tt.shape(), a.shape());
        prop_assert_eq!(sorted(tt.triplets().collect()), sorted(a.triplets().collect()));
    }

    #[test]
    fn prop_conj_transpose_of_real_is_transpose(
        (nrows, ncols, entries) in coo_strategy(12, 40),
    ) {
        let a = build(nrows, ncols, &entries);
        prop_assert_eq!(conj_transposed(&a).unwrap(), transposed(&a).unwrap());
    }

    #[test]
    fn prop_row_ptrs_bracket_each_row(
        counts in prop::collection::vec(0usize..5, 1..20),
    ) {
        let idxs: Vec<i64> = counts
            .iter()
            .enumerate()
            .flat_map(|(r, &n)| std::iter::repeat(r as i64).take(n))
            .collect();
        let ptrs = row_idxs_to_ptrs(&idxs, counts.len()).unwrap();
        prop_assert_eq!(ptrs.len(), counts.len() + 1);
        prop_assert_eq!(ptrs[0], 0);
        prop_assert_eq!(*ptrs.last().unwrap() as usize, idxs.len());
        for (r, &n) in counts.iter().enumerate() {
            prop_assert_eq!((ptrs[r + 1] - ptrs[r]) as usize, n);
        }
    }
}
