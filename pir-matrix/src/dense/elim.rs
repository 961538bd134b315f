// Elimination passes based on:
//
// "Worst Case Complexity Bounds on Algorithms for Computing the Canonical
// Structure of Finite Abelian Groups and the Hermite and Smith Normal Forms
// of an Integer Matrix", Costas S. Iliopoulos.
//
// `eliminate_row` clears the first row of the window to (pivot, 0, .., 0)
// using column combinations only; `eliminate_col` is the transpose dual.
// Every division is exact by construction: quotients are only taken
// against a gcd just computed to divide the dividend, so no division by a
// non-divisor can occur for a well-behaved ring.

use log::trace;
use pir::{Pir, PirOps};
use crate::MatTrait;
use super::{vd, SubMat};

pub fn eliminate_row<R>(a: &mut SubMat<R>) -> bool
where R: Pir, for<'x> &'x R: PirOps<R> {
    if a.ncols() <= 1 {
        return false
    }

    let mut modified = false;
    let a00 = a.at(0, 0).clone();

    if a00.is_unit() {
        // scale col 0 so the pivot becomes one
        if !a00.is_one() {
            let s = a00.inv().unwrap();
            a.mul_col(0, &s);
            modified = true;
        }
    } else {
        if !a00.is_zero() {
            // send a00 to zero by a unimodular combination of cols 0, 1
            let a01 = a.at(0, 1).clone();
            let (g, s, t) = R::gcdx(&a00, &a01);
            let y2 = &a00 / &g;
            let y1 = -(&a01 / &g);

            // (c0, c1) <- (y1 c0 + y2 c1, s c0 + t c1), det -1
            a.combine_cols(0, 1, [&y1, &y2, &s, &t]);

            // clear any residual against the fresh gcd at (0, 1)
            if !a.at(0, 0).is_zero() {
                let q = -(a.at(0, 0) / &g);
                a.axpy_col(0, &q, 1);
            }
            modified = true;
        }

        // concentrate a generator of the ideal of the whole first row
        // into col 0: weights w with w[0] = 1, sum_j w[j] a[0][j] = g
        let n = a.ncols();
        let mut w = vec![R::one(); n];
        let mut g = a.at(0, 1).clone();

        for j in 2..n {
            let (g1, s, wj) = R::gcdx(&g, a.at(0, j));
            w[j] = wj;
            if !s.is_one() {
                vd::mulin(w[1..j].iter_mut(), &s);
            }
            g = g1;
        }

        // no pivot: the whole row is zero
        if g.is_zero() {
            trace!("elim-row: no pivot");
            return modified
        }

        for i in 0..a.nrows() {
            let x = a.dot_row(i, &w);
            *a.at_mut(i, 0) = x;
        }
        modified = true;
    }

    // the pivot divides the rest of the row by construction; clear it
    let g = a.at(0, 0).clone();
    for j in 1..a.ncols() {
        if a.at(0, j).is_zero() {
            continue
        }
        let q = -(a.at(0, j) / &g);
        a.axpy_col(j, &q, 0);
        modified = true;
    }

    modified
}

pub fn eliminate_col<R>(a: &mut SubMat<R>) -> bool
where R: Pir, for<'x> &'x R: PirOps<R> {
    if a.nrows() <= 1 {
        return false
    }

    let mut modified = false;
    let a00 = a.at(0, 0).clone();

    if a00.is_unit() {
        if !a00.is_one() {
            let s = a00.inv().unwrap();
            a.mul_row(0, &s);
            modified = true;
        }
    } else {
        if !a00.is_zero() {
            let a10 = a.at(1, 0).clone();
            let (g, s, t) = R::gcdx(&a00, &a10);
            let y2 = &a00 / &g;
            let y1 = -(&a10 / &g);

            a.combine_rows(0, 1, [&y1, &y2, &s, &t]);

            if !a.at(0, 0).is_zero() {
                let q = -(a.at(0, 0) / &g);
                a.axpy_row(0, &q, 1);
            }
            modified = true;
        }

        let m = a.nrows();
        let mut w = vec![R::one(); m];
        let mut g = a.at(1, 0).clone();

        for i in 2..m {
            let (g1, s, wi) = R::gcdx(&g, a.at(i, 0));
            w[i] = wi;
            if !s.is_one() {
                vd::mulin(w[1..i].iter_mut(), &s);
            }
            g = g1;
        }

        if g.is_zero() {
            trace!("elim-col: no pivot");
            return modified
        }

        for j in 0..a.ncols() {
            let x = a.dot_col(j, &w);
            *a.at_mut(0, j) = x;
        }
        modified = true;
    }

    let g = a.at(0, 0).clone();
    for i in 1..a.nrows() {
        if a.at(i, 0).is_zero() {
            continue
        }
        let q = -(a.at(i, 0) / &g);
        a.axpy_row(i, &q, 0);
        modified = true;
    }

    modified
}

// The fixed-point predicate of the diagonalization loop: the leading
// entry divides everything else in the first row. A zero leading entry
// passes, since it certifies an all-zero first row and column.
pub fn is_row_reduced<R>(a: &SubMat<R>) -> bool
where R: Pir, for<'x> &'x R: PirOps<R> {
    if a.nrows() == 0 || a.ncols() == 0 {
        return true
    }
    let lead = a.at(0, 0);
    if lead.is_zero() {
        return true
    }
    (1..a.ncols()).all(|j| lead.divides(a.at(0, j)))
}

#[cfg(test)]
mod tests {
    use num_traits::Zero;
    use pir::{Ring, Zn};
    use super::*;
    use super::super::Mat;

    #[test]
    fn row_unit_pivot() {
        let mut a = Mat::from_data((2, 3), [
            -1, 4, 6,
            2, 5, 9,
        ]);
        let mut v = SubMat::of(&mut a);
        assert!(eliminate_row(&mut v));

        assert_eq!(a[(0, 0)], 1);
        assert_eq!(a[(0, 1)], 0);
        assert_eq!(a[(0, 2)], 0);
    }

    #[test]
    fn row_gcd_pivot() {
        let mut a: Mat<i64> = Mat::from_data((2, 3), [
            4, 6, 9,
            1, 2, 3,
        ]);
        let mut v = SubMat::of(&mut a);
        assert!(eliminate_row(&mut v));

        assert_eq!(a[(0, 0)].abs(), 1);  // gcd(4, 6, 9)
        assert_eq!(a[(0, 1)], 0);
        assert_eq!(a[(0, 2)], 0);
    }

    #[test]
    fn row_zero_leading() {
        let mut a: Mat<i64> = Mat::from_data((2, 3), [
            0, 6, 8,
            1, 1, 1,
        ]);
        let mut v = SubMat::of(&mut a);
        assert!(eliminate_row(&mut v));

        assert_eq!(a[(0, 0)].abs(), 2);
        assert_eq!(a[(0, 1)], 0);
        assert_eq!(a[(0, 2)], 0);
    }

    #[test]
    fn row_all_zero() {
        let mut a = Mat::from_data((2, 3), [
            0, 0, 0,
            1, 2, 3,
        ]);
        let orig = a.clone();
        let mut v = SubMat::of(&mut a);
        assert!(!eliminate_row(&mut v));
        assert_eq!(a, orig);
    }

    #[test]
    fn row_single_col() {
        let mut a = Mat::from_data((2, 1), [3, 4]);
        let orig = a.clone();
        let mut v = SubMat::of(&mut a);
        assert!(!eliminate_row(&mut v));
        assert_eq!(a, orig);
    }

    #[test]
    fn col_gcd_pivot() {
        let mut a: Mat<i64> = Mat::from_data((3, 2), [
            4, 1,
            6, 2,
            9, 3,
        ]);
        let mut v = SubMat::of(&mut a);
        assert!(eliminate_col(&mut v));

        assert_eq!(a[(0, 0)].abs(), 1);
        assert_eq!(a[(1, 0)], 0);
        assert_eq!(a[(2, 0)], 0);
    }

    #[test]
    fn col_all_zero() {
        let mut a = Mat::from_data((3, 2), [
            0, 1,
            0, 2,
            0, 3,
        ]);
        let orig = a.clone();
        let mut v = SubMat::of(&mut a);
        assert!(!eliminate_col(&mut v));
        assert_eq!(a, orig);
    }

    #[test]
    fn row_mod_composite() {
        type R = Zn<12>;

        // 8 and 6 are both zero divisors mod 12; gcd(8, 6) = 2
        let mut a = Mat::from_data((2, 2), [
            R::new(8), R::new(6),
            R::new(1), R::new(5),
        ]);
        let mut v = SubMat::of(&mut a);
        assert!(eliminate_row(&mut v));

        assert_eq!(a[(0, 1)], R::new(0));
        assert!(!a[(0, 0)].is_zero());
        assert!(a[(0, 0)].divides(&R::new(2)));
    }

    #[test]
    fn row_mod_unit_from_zero() {
        type R = Zn<5>;

        let mut a = Mat::from_data((2, 2), [
            R::new(0), R::new(1),
            R::new(1), R::new(0),
        ]);
        let mut v = SubMat::of(&mut a);
        assert!(eliminate_row(&mut v));

        assert!(a[(0, 0)].is_unit());
        assert_eq!(a[(0, 1)], R::new(0));
    }

    #[test]
    fn reduced_predicate() {
        let mut a = Mat::from_data((2, 3), [2, 4, 6, 0, 5, 7]);
        assert!(is_row_reduced(&SubMat::of(&mut a)));

        let mut a = Mat::from_data((2, 3), [4, 2, 8, 0, 5, 7]);
        assert!(!is_row_reduced(&SubMat::of(&mut a)));

        let mut a = Mat::from_data((2, 3), [0, 0, 0, 1, 2, 3]);
        assert!(is_row_reduced(&SubMat::of(&mut a)));
    }
}
