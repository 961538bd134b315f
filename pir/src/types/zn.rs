#![allow(non_upper_case_globals)]

use std::ops::{Add, Neg, Sub, Mul, Div, AddAssign, SubAssign, MulAssign, DivAssign};
use std::iter::{Sum, Product};
use derive_more::{Display, Debug};
use num_traits::{Zero, One};
use auto_impl_ops::auto_ops;

use crate::{Elem, AddMonOps, AddGrpOps, MonOps, RingOps, PirOps, AddMon, AddGrp, Mon, Ring, Pir};

type I = u64;

// The ring of integers mod m, for arbitrary (possibly composite) m > 1.
// Elements are represented by their residue in 0..m.

#[derive(Clone, Copy, PartialEq, Eq, Default, Display, Debug)]
#[display("{_0}")]
#[debug("{_0}")]
pub struct Zn<const m: I>(I);

impl<const m: I> Zn<m> {
    pub fn new(a: I) -> Self {
        assert!(m > 1);
        Self(a % m)
    }

    pub fn rep(&self) -> I {
        self.0
    }

    fn from_i128(a: i128) -> Self {
        Self(a.rem_euclid(m as i128) as I)
    }
}

impl<const m: I> From<i32> for Zn<m> {
    fn from(a: i32) -> Self {
        Self::from_i128(a as i128)
    }
}

fn gcd_u64(a: I, b: I) -> I {
    num_integer::Integer::gcd(&a, &b)
}

fn inv_mod(a: I, n: I) -> Option<I> {
    if n == 1 {
        return Some(0)
    }
    let num_integer::ExtendedGcd{ gcd: g, x: s, .. } =
        num_integer::Integer::extended_gcd(&(a as i128), &(n as i128));
    (g == 1).then(|| s.rem_euclid(n as i128) as I)
}

impl<const m: I> Zero for Zn<m> {
    fn zero() -> Self {
        Self(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl<const m: I> One for Zn<m> {
    fn one() -> Self {
        Self(1 % m)
    }

    fn is_one(&self) -> bool {
        self.0 == 1 % m
    }
}

impl<const m: I> Neg for Zn<m> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self((m - self.0) % m)
    }
}

impl<'a, const m: I> Neg for &'a Zn<m> {
    type Output = Zn<m>;
    fn neg(self) -> Self::Output {
        Zn((m - self.0) % m)
    }
}

#[auto_ops]
impl<'a, 'b, const m: I> Add<&'b Zn<m>> for &'a Zn<m> {
    type Output = Zn<m>;
    fn add(self, rhs: &'b Zn<m>) -> Self::Output {
        Zn(((self.0 as u128 + rhs.0 as u128) % m as u128) as I)
    }
}

#[auto_ops]
impl<'a, 'b, const m: I> Sub<&'b Zn<m>> for &'a Zn<m> {
    type Output = Zn<m>;
    fn sub(self, rhs: &'b Zn<m>) -> Self::Output {
        self + &(-rhs)
    }
}

#[auto_ops]
impl<'a, 'b, const m: I> Mul<&'b Zn<m>> for &'a Zn<m> {
    type Output = Zn<m>;
    fn mul(self, rhs: &'b Zn<m>) -> Self::Output {
        Zn(((self.0 as u128 * rhs.0 as u128) % m as u128) as I)
    }
}

// Exact division. When the representatives divide as integers the integer
// quotient is returned; this keeps the 2x2 elimination combinations
// unimodular (their determinant is exactly -1).
#[auto_ops]
impl<'a, 'b, const m: I> Div<&'b Zn<m>> for &'a Zn<m> {
    type Output = Zn<m>;
    fn div(self, rhs: &'b Zn<m>) -> Self::Output {
        debug_assert!(rhs.divides(self));

        let (a, b) = (self.0, rhs.0);
        if b == 0 {
            return Zn(0)
        }
        if a % b == 0 {
            return Zn((a / b) % m)
        }

        let g = gcd_u64(b, m);
        let mh = m / g;
        let binv = inv_mod(b / g, mh).unwrap();
        Zn((((a / g) as u128 * binv as u128) % m as u128) as I)
    }
}

macro_rules! impl_accum {
    ($trait:ident, $method:ident, $accum_method:ident, $accum_init:ident) => {
        impl<const m: I> $trait for Zn<m> {
            fn $method<Iter: Iterator<Item = Self>>(iter: Iter) -> Self {
                iter.fold(Self::$accum_init(), |mut res, r| {
                    Self::$accum_method(&mut res, r);
                    res
                })
            }
        }

        impl<'a, const m: I> $trait<&'a Zn<m>> for Zn<m> {
            fn $method<Iter: Iterator<Item = &'a Self>>(iter: Iter) -> Self {
                iter.fold(Self::$accum_init(), |mut res, r| {
                    Self::$accum_method(&mut res, r);
                    res
                })
            }
        }
    }
}

impl_accum!(Sum, sum, add_assign, zero);
impl_accum!(Product, product, mul_assign, one);

macro_rules! impl_alg_ops {
    ($trait:ident) => {
        impl<const m: I> $trait for Zn<m> {}
        impl<'a, const m: I> $trait<Zn<m>> for &'a Zn<m> {}
    };
}

impl_alg_ops!(AddMonOps);
impl_alg_ops!(AddGrpOps);
impl_alg_ops!(MonOps);
impl_alg_ops!(RingOps);
impl_alg_ops!(PirOps);

impl<const m: I> Elem for Zn<m> {
    fn math_symbol() -> String {
        format!("Z/{}", m)
    }
}

impl<const m: I> AddMon for Zn<m> {}
impl<const m: I> AddGrp for Zn<m> {}
impl<const m: I> Mon for Zn<m> {}

impl<const m: I> Ring for Zn<m> {
    fn inv(&self) -> Option<Self> {
        inv_mod(self.0, m).map(Self)
    }

    fn is_unit(&self) -> bool {
        gcd_u64(self.0, m) == 1
    }

    // The canonical representative of the associate class of x is
    // gcd(x, m). The unit carrying x there is the inverse of x/g mod m/g,
    // lifted along m/g until it is coprime to m.
    fn normalizing_unit(&self) -> Self {
        if self.0 == 0 {
            return Self::one()
        }
        let g = gcd_u64(self.0, m);
        let mh = m / g;
        let mut u = inv_mod(self.0 / g, mh).unwrap();
        while gcd_u64(u, m) != 1 {
            u += mh;
        }
        Self(u % m)
    }
}

impl<const m: I> Pir for Zn<m> {
    fn divides(&self, y: &Self) -> bool {
        let g = gcd_u64(self.0, m);
        y.0 % g == 0
    }

    fn gcd(x: &Self, y: &Self) -> Self {
        if x.is_zero() && y.is_zero() {
            return Self::zero()
        }
        Self(gcd_u64(x.0, y.0))
    }

    fn gcdx(x: &Self, y: &Self) -> (Self, Self, Self) {
        if x.is_zero() && y.is_zero() {
            return (Self::zero(), Self::zero(), Self::zero())
        }
        if x.divides(y) {
            return (x.clone(), Self::one(), Self::zero())
        }
        if y.divides(x) {
            return (y.clone(), Self::zero(), Self::one())
        }

        let num_integer::ExtendedGcd{ gcd: g, x: s, y: t } =
            num_integer::Integer::extended_gcd(&(x.0 as i128), &(y.0 as i128));
        (Self(g as I), Self::from_i128(s), Self::from_i128(t))
    }
}
