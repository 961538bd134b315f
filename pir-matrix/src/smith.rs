#![allow(non_upper_case_globals)]

use std::str::FromStr;
use itertools::Itertools;
use log::{debug, trace};
use thiserror::Error;

use pir::{Pir, PirOps, Integer, IntOps, Elem, Zn, Local2_32, prime_power_root};
use crate::MatTrait;
use crate::dense::{diagonalize, diag_normalize, local_smith, Mat};

// Driver layer: strategy selection and validation happen here, before any
// elimination touches the matrix. The elimination itself never fails for a
// valid ring; it always runs to its fixed point.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Strategy {
    General,          // "ilio": elimination over an arbitrary PIR
    LocalPrimePower,  // "local": modulus is a prime power
    Local2,           // "2local": integers mod 2^32, machine words
    Adaptive,         // "adaptive": exact integer invariant factors
}

impl FromStr for Strategy {
    type Err = SmithError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ilio" | "general" => Ok(Self::General),
            "local"            => Ok(Self::LocalPrimePower),
            "2local"           => Ok(Self::Local2),
            "adaptive"         => Ok(Self::Adaptive),
            _ => Err(SmithError::UnknownStrategy(s.to_string())),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum SmithError {
    #[error("unknown strategy `{0}`")]
    UnknownStrategy(String),

    #[error("modulus {0} exceeds the supported range (max 2^32)")]
    ModulusTooLarge(u64),

    #[error("modulus {0} is not a prime power")]
    NotPrimePower(u64),

    #[error("strategy {0:?} does not apply to matrices over {1}")]
    StrategyMismatch(Strategy, String),
}

// The reduced matrix, kept whole so callers can read the diagonal directly
// or extract the run-length-encoded invariant factor list.

#[derive(Debug)]
pub struct SmithForm<R>
where R: Pir, for<'x> &'x R: PirOps<R> {
    result: Mat<R>,
}

impl<R> SmithForm<R>
where R: Pir, for<'x> &'x R: PirOps<R> {
    pub fn mat(&self) -> &Mat<R> {
        &self.result
    }

    pub fn into_mat(self) -> Mat<R> {
        self.result
    }

    pub fn rank(&self) -> usize {
        let n = self.result.min_dim();
        (0..n).find(|&i| self.result[(i, i)].is_zero()).unwrap_or(n)
    }

    // nonzero invariant factors, in diagonal order
    pub fn factors(&self) -> Vec<&R> {
        self.result.diag_entries().filter(|a| !a.is_zero()).collect()
    }

    // the full diagonal, run-length-encoded as (value, multiplicity)
    pub fn factors_rle(&self) -> Vec<(R, usize)> {
        self.result.diag_entries()
            .dedup_with_count()
            .map(|(n, a)| (a.clone(), n))
            .collect()
    }
}

pub fn smith_form<R>(a: &Mat<R>) -> SmithForm<R>
where R: Pir, for<'x> &'x R: PirOps<R> {
    smith_form_in_place(a.clone())
}

pub fn smith_form_in_place<R>(mut a: Mat<R>) -> SmithForm<R>
where R: Pir, for<'x> &'x R: PirOps<R> {
    debug!("smith: {:?}", a.shape());
    trace!("{}", a);

    diagonalize(&mut a);
    diag_normalize(&mut a);

    debug!("smith done.");
    trace!("{}", a);

    SmithForm { result: a }
}

pub fn smith_form_local<R>(a: &Mat<R>, p: &R) -> SmithForm<R>
where R: Pir, for<'x> &'x R: PirOps<R> {
    smith_form_local_in_place(a.clone(), p)
}

pub fn smith_form_local_in_place<R>(mut a: Mat<R>, p: &R) -> SmithForm<R>
where R: Pir, for<'x> &'x R: PirOps<R> {
    debug!("smith (local): {:?}", a.shape());

    local_smith(&mut a, p);

    debug!("smith done.");
    SmithForm { result: a }
}

// Dispatch for matrices over Z/m. The choice is a pure function of the
// requested strategy and the modulus, never of the matrix data; all
// validation happens before the matrix is touched.
pub fn smith_form_mod<const m: u64>(strategy: Strategy, a: &Mat<Zn<m>>)
    -> Result<SmithForm<Zn<m>>, SmithError>
{
    if m > 1 << 32 {
        return Err(SmithError::ModulusTooLarge(m))
    }

    match strategy {
        Strategy::General => Ok(smith_form(a)),
        Strategy::LocalPrimePower => {
            let Some((p, _)) = prime_power_root(m) else {
                return Err(SmithError::NotPrimePower(m))
            };
            Ok(smith_form_local(a, &Zn::new(p)))
        }
        Strategy::Local2 | Strategy::Adaptive => {
            Err(SmithError::StrategyMismatch(strategy, Zn::<m>::math_symbol()))
        }
    }
}

// Local elimination mod 2^32 on native machine words.
pub fn smith_form_2local(a: &Mat<Local2_32>) -> SmithForm<Local2_32> {
    smith_form_local(a, &Local2_32::new(2))
}

// Exact invariant factors of an integer matrix, with no caller-chosen
// modulus. Use an arbitrary-precision element type for matrices whose
// intermediate values may grow beyond machine range.
pub fn smith_form_ints<I>(a: &Mat<I>) -> SmithForm<I>
where I: Integer, for<'x> &'x I: IntOps<I> {
    smith_form(a)
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use pir::Ring;
    use super::*;

    #[test]
    fn strategy_names() {
        assert_eq!("ilio".parse::<Strategy>(), Ok(Strategy::General));
        assert_eq!("general".parse::<Strategy>(), Ok(Strategy::General));
        assert_eq!("local".parse::<Strategy>(), Ok(Strategy::LocalPrimePower));
        assert_eq!("2local".parse::<Strategy>(), Ok(Strategy::Local2));
        assert_eq!("adaptive".parse::<Strategy>(), Ok(Strategy::Adaptive));
        assert_eq!(
            "bogus".parse::<Strategy>(),
            Err(SmithError::UnknownStrategy("bogus".to_string()))
        );
    }

    #[test]
    fn ilio_mod_360() {
        type R = Zn<360>;

        let a = Mat::diag((4, 4), [1, 2, 3, 4].map(R::new));
        let snf = smith_form_mod(Strategy::General, &a).unwrap();

        assert_eq!(
            snf.factors_rle(),
            vec![(R::new(1), 2), (R::new(2), 1), (R::new(12), 1)]
        );
        assert_eq!(snf.rank(), 4);
    }

    #[test]
    fn zero_matrix() {
        type R = Zn<360>;

        let a: Mat<R> = Mat::zero((3, 3));
        let snf = smith_form_mod(Strategy::General, &a).unwrap();

        assert_eq!(snf.rank(), 0);
        assert!(snf.factors().is_empty());
        assert_eq!(snf.factors_rle(), vec![(R::new(0), 3)]);
    }

    #[test]
    fn one_by_one_mod_21() {
        type R = Zn<21>;

        let a = Mat::from_data((1, 1), [R::new(7)]);
        let snf = smith_form_mod(Strategy::General, &a).unwrap();

        assert_eq!(snf.mat()[(0, 0)], R::new(7));
        assert_eq!(snf.factors_rle(), vec![(R::new(7), 1)]);
    }

    #[test]
    fn antidiagonal_mod_5() {
        type R = Zn<5>;

        let a = Mat::from_data((2, 2), [0, 1, 1, 0].map(R::new));
        let snf = smith_form_mod(Strategy::General, &a).unwrap();

        assert!(snf.mat()[(0, 0)].is_unit());
        assert_eq!(snf.factors_rle(), vec![(R::new(1), 2)]);
    }

    #[test]
    fn local_prime_power() {
        type R = Zn<27>;

        // rank 1: rows are multiples of (3, 6, 9)
        let a = Mat::from_data((3, 3), [
            3, 6, 9,
            6, 12, 18,
            9, 18, 0,
        ].map(R::new));

        let snf = smith_form_mod(Strategy::LocalPrimePower, &a).unwrap();

        assert_eq!(snf.rank(), 1);
        let factors = snf.factors();
        assert_eq!(factors, vec![&R::new(3)]);
    }

    #[test]
    fn rejects_oversized_modulus() {
        type R = Zn<{ 1u64 << 33 }>;

        let a: Mat<R> = Mat::id(2);
        let err = smith_form_mod(Strategy::General, &a).unwrap_err();
        assert_eq!(err, SmithError::ModulusTooLarge(1 << 33));
    }

    #[test]
    fn local_rejects_composite() {
        type R = Zn<360>;

        let a: Mat<R> = Mat::id(2);
        let err = smith_form_mod(Strategy::LocalPrimePower, &a).unwrap_err();
        assert_eq!(err, SmithError::NotPrimePower(360));
    }

    #[test]
    fn mod_rejects_mismatched_strategies() {
        type R = Zn<27>;

        let a: Mat<R> = Mat::id(2);
        assert!(matches!(
            smith_form_mod(Strategy::Local2, &a),
            Err(SmithError::StrategyMismatch(Strategy::Local2, _))
        ));
        assert!(matches!(
            smith_form_mod(Strategy::Adaptive, &a),
            Err(SmithError::StrategyMismatch(Strategy::Adaptive, _))
        ));
    }

    #[test]
    fn two_local() {
        type R = Local2_32;

        let a = Mat::from_data((2, 2), [2, 0, 0, 3].map(R::new));
        let snf = smith_form_2local(&a);

        assert_eq!(snf.factors_rle(), vec![(R::new(1), 1), (R::new(2), 1)]);
    }

    #[test]
    fn adaptive_bigint() {
        let a = Mat::from_data((3, 3), [
            2, 4, 4,
            -6, 6, 12,
            10, -4, -16,
        ].map(BigInt::from));

        let snf = smith_form_ints(&a);

        let expected: Vec<_> = [2, 6, 12].map(BigInt::from).into_iter()
            .map(|a| (a, 1))
            .collect();
        assert_eq!(snf.factors_rle(), expected);
    }

    #[test]
    fn divisibility_chain_ints() {
        let a: Mat<i64> = Mat::from_data((5, 5), [
            -20, -7, -27, 2, 29,
            17, 8, 14, -4, -10,
            13, 8, 10, -4, -6,
            -9, -2, -14, 0, 16,
            5, 0, 5, -1, -4,
        ]);
        let snf = smith_form(&a);

        let d: Vec<_> = snf.mat().diag_entries().cloned().collect();
        assert_eq!(d, vec![1, 1, 1, 2, 60]);
        for i in 0..4 {
            assert!(d[i].divides(&d[i + 1]));
        }
    }

    #[test]
    fn determinant_up_to_units() {
        // diagonal product equals the determinant up to sign
        let a: Mat<i64> = Mat::from_data((3, 3), [
            2, 4, 4,
            -6, 6, 12,
            10, -4, -16,
        ]);
        let snf = smith_form(&a);

        let prod: i64 = snf.mat().diag_entries().product();
        assert_eq!(prod.abs(), 144);
    }

    #[test]
    fn idempotent() {
        let a: Mat<i64> = Mat::from_data((3, 4), [
            6, 4, 2, 0,
            4, 8, 10, 2,
            2, 2, 2, 0,
        ]);
        let snf = smith_form(&a);
        let again = smith_form(snf.mat());

        assert_eq!(snf.mat(), again.mat());
    }

    #[test]
    fn rank_preserved() {
        // rank 2: row2 = row0 + row1
        let a: Mat<i64> = Mat::from_data((3, 3), [
            1, 2, 3,
            4, 5, 6,
            5, 7, 9,
        ]);
        let snf = smith_form(&a);
        assert_eq!(snf.rank(), 2);
        assert_eq!(snf.factors_rle().last().unwrap().0, 0);
    }

    #[test]
    fn scramble_preserves_factors() {
        use rand::prelude::*;

        let mut rng = StdRng::seed_from_u64(7);
        let mut a = Mat::diag((4, 5), [1, 2, 6, 0].map(BigInt::from));

        // random unimodular row/col shears leave the factors unchanged
        for _ in 0..16 {
            let (m, n) = a.shape();
            let (i, j) = (rng.gen_range(0..m), rng.gen_range(0..m));
            if i != j {
                a.add_row_to(i, j, &BigInt::from(1));
            }
            let (k, l) = (rng.gen_range(0..n), rng.gen_range(0..n));
            if k != l {
                a.add_col_to(k, l, &BigInt::from(-1));
            }
        }

        let snf = smith_form_in_place(a);
        let expected: Vec<_> = [1, 2, 6, 0].map(BigInt::from).into_iter()
            .map(|a| (a, 1))
            .collect();
        assert_eq!(snf.factors_rle(), expected);
    }
}
