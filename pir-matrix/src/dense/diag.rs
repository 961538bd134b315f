use log::trace;
use pir::{Pir, PirOps};
use crate::MatTrait;
use super::{eliminate_row, eliminate_col, is_row_reduced, Mat, SubMat};

// Full diagonalization: alternate row / column elimination on the leading
// position until the pivot divides its whole row, then recurse on the
// trailing window. Eliminating the row can reintroduce nonzeros in the
// column (and vice versa) over a non-field ring, hence the loop.

pub fn diagonalize<R>(a: &mut Mat<R>)
where R: Pir, for<'x> &'x R: PirOps<R> {
    let mut v = SubMat::of(a);
    diagonalize_in(&mut v);
}

fn diagonalize_in<R>(a: &mut SubMat<R>)
where R: Pir, for<'x> &'x R: PirOps<R> {
    if a.nrows() == 0 || a.ncols() == 0 {
        return
    }

    trace!("diagonalize: {:?}", a.shape());

    loop {
        let modified = eliminate_row(a) | eliminate_col(a);
        if is_row_reduced(a) {
            break
        }
        assert!(modified, "elimination made no progress");
    }

    // The column pass may leave residue in row 0, but only residue the
    // pivot divides. Col 0 is zero below the pivot, so clearing it is a
    // column operation that touches nothing outside row 0.
    let g = a.at(0, 0).clone();
    if !g.is_zero() {
        for j in 1..a.ncols() {
            if a.at(0, j).is_zero() {
                continue
            }
            let q = -(a.at(0, j) / &g);
            a.axpy_col(j, &q, 0);
        }
    }

    let mut sub = a.trailing();
    diagonalize_in(&mut sub);
}

// Rearrange a diagonal matrix so that each entry divides the next, by
// pairwise gcd absorption, and canonicalize every entry. Trailing zeros
// stay last: a zero is only ever moved backwards, swapped against a
// later nonzero entry.

pub fn diag_normalize<R>(a: &mut Mat<R>)
where R: Pir, for<'x> &'x R: PirOps<R> {
    debug_assert!(a.is_diag());

    let n = a.min_dim();

    for i in 0..n {
        for j in (i + 1)..n {
            if a[(i, i)].is_unit() {
                break
            }
            if a[(j, j)].is_zero() {
                continue
            }
            if a[(i, i)].is_zero() {
                let x = std::mem::replace(&mut a[(j, j)], R::zero());
                a[(i, i)] = x;
                continue
            }

            // d_i <- gcd(d_j, d_i), d_j <- (d_j / gcd) d_i
            let g = R::gcd(&a[(j, j)], &a[(i, i)]);
            let q = &a[(j, j)] / &g;
            let absorbed = &q * &a[(i, i)];
            a[(j, j)] = absorbed;
            a[(i, i)] = g;
        }

        let u = a[(i, i)].normalizing_unit();
        if !u.is_one() {
            // the rest of row i is zero, so scaling the diagonal entry
            // is the whole row operation
            a[(i, i)] *= &u;
        }
    }
}
