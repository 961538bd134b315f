use log::trace;
use pir::{Pir, PirOps};
use crate::MatTrait;
use super::Mat;

// Elimination over a local principal ideal ring whose maximal ideal is
// generated by p (integers mod a prime power, mod 2^32, ...). Every
// nonunit is associate to a power of p, so an entry of minimal p-adic
// valuation in the trailing block divides everything in the block and a
// single Gaussian pass per pivot suffices; the divisibility chain comes
// out for free, in non-decreasing valuation order.

pub fn local_smith<R>(a: &mut Mat<R>, p: &R)
where R: Pir, for<'x> &'x R: PirOps<R> {
    let (m, n) = a.shape();
    let r = a.min_dim();

    trace!("local-smith: {:?}", a.shape());

    for k in 0..r {
        let Some((i0, j0)) = min_valuation_entry(a, k, p) else {
            break
        };

        if i0 > k {
            a.swap_rows(k, i0);
        }
        if j0 > k {
            a.swap_cols(k, j0);
        }

        // associate the pivot to its canonical power of p
        let u = a[(k, k)].normalizing_unit();
        if !u.is_one() {
            a.mul_row(k, &u);
        }

        let pivot = a[(k, k)].clone();

        for i in (k + 1)..m {
            if a[(i, k)].is_zero() {
                continue
            }
            let q = -(&a[(i, k)] / &pivot);
            a.add_row_to(k, i, &q);
        }
        for j in (k + 1)..n {
            if a[(k, j)].is_zero() {
                continue
            }
            let q = -(&a[(k, j)] / &pivot);
            a.add_col_to(k, j, &q);
        }
    }
}

// p-adic valuation; None for zero
fn valuation<R>(x: &R, p: &R) -> Option<usize>
where R: Pir, for<'x> &'x R: PirOps<R> {
    if x.is_zero() {
        return None
    }
    let mut v = 0;
    let mut y = x.clone();
    while p.divides(&y) {
        y /= p;
        v += 1;
    }
    Some(v)
}

fn min_valuation_entry<R>(a: &Mat<R>, k: usize, p: &R) -> Option<(usize, usize)>
where R: Pir, for<'x> &'x R: PirOps<R> {
    let (m, n) = a.shape();
    let mut best: Option<(usize, (usize, usize))> = None;

    for i in k..m {
        for j in k..n {
            let Some(v) = valuation(&a[(i, j)], p) else {
                continue
            };
            if v == 0 {
                return Some((i, j))
            }
            if best.as_ref().map_or(true, |(bv, _)| v < *bv) {
                best = Some((v, (i, j)));
            }
        }
    }
    best.map(|(_, ij)| ij)
}
