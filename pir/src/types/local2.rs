#![allow(non_camel_case_types)]

use std::ops::{Add, Neg, Sub, Mul, Div, AddAssign, SubAssign, MulAssign, DivAssign};
use std::iter::{Sum, Product};
use derive_more::{Display, Debug};
use num_traits::{Zero, One};
use auto_impl_ops::auto_ops;

use crate::{Elem, AddMonOps, AddGrpOps, MonOps, RingOps, PirOps, AddMon, AddGrp, Mon, Ring, Pir};

// The local ring of integers mod 2^32 on native machine words.
// The maximal ideal is (2): units are exactly the odd values, and every
// nonzero element is associate to the power of two given by its trailing
// zeros.

#[derive(Clone, Copy, PartialEq, Eq, Default, Display, Debug)]
#[display("{_0}")]
#[debug("{_0}")]
pub struct Local2_32(u32);

impl Local2_32 {
    pub fn new(a: u32) -> Self {
        Self(a)
    }

    pub fn rep(&self) -> u32 {
        self.0
    }

    // 2-adic valuation; None for zero
    pub fn valuation(&self) -> Option<u32> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros())
        }
    }
}

impl From<i32> for Local2_32 {
    fn from(a: i32) -> Self {
        Self(a as u32)
    }
}

// inverse of an odd value mod 2^32, by Hensel lifting
fn inv_odd(x: u32) -> u32 {
    debug_assert!(x % 2 == 1);
    let mut y = x;
    for _ in 0..5 {
        y = y.wrapping_mul(2u32.wrapping_sub(x.wrapping_mul(y)));
    }
    y
}

impl Zero for Local2_32 {
    fn zero() -> Self {
        Self(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl One for Local2_32 {
    fn one() -> Self {
        Self(1)
    }

    fn is_one(&self) -> bool {
        self.0 == 1
    }
}

impl Neg for Local2_32 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self(self.0.wrapping_neg())
    }
}

impl<'a> Neg for &'a Local2_32 {
    type Output = Local2_32;
    fn neg(self) -> Self::Output {
        Local2_32(self.0.wrapping_neg())
    }
}

#[auto_ops]
impl<'a, 'b> Add<&'b Local2_32> for &'a Local2_32 {
    type Output = Local2_32;
    fn add(self, rhs: &'b Local2_32) -> Self::Output {
        Local2_32(self.0.wrapping_add(rhs.0))
    }
}

#[auto_ops]
impl<'a, 'b> Sub<&'b Local2_32> for &'a Local2_32 {
    type Output = Local2_32;
    fn sub(self, rhs: &'b Local2_32) -> Self::Output {
        Local2_32(self.0.wrapping_sub(rhs.0))
    }
}

#[auto_ops]
impl<'a, 'b> Mul<&'b Local2_32> for &'a Local2_32 {
    type Output = Local2_32;
    fn mul(self, rhs: &'b Local2_32) -> Self::Output {
        Local2_32(self.0.wrapping_mul(rhs.0))
    }
}

// Exact division: defined when rhs.divides(self).
#[auto_ops]
impl<'a, 'b> Div<&'b Local2_32> for &'a Local2_32 {
    type Output = Local2_32;
    fn div(self, rhs: &'b Local2_32) -> Self::Output {
        debug_assert!(rhs.divides(self));

        if self.0 == 0 {
            return Local2_32(0)
        }
        let v = rhs.0.trailing_zeros();
        Local2_32((self.0 >> v).wrapping_mul(inv_odd(rhs.0 >> v)))
    }
}

macro_rules! impl_accum {
    ($trait:ident, $method:ident, $accum_method:ident, $accum_init:ident) => {
        impl $trait for Local2_32 {
            fn $method<Iter: Iterator<Item = Self>>(iter: Iter) -> Self {
                iter.fold(Self::$accum_init(), |mut res, r| {
                    Self::$accum_method(&mut res, r);
                    res
                })
            }
        }

        impl<'a> $trait<&'a Local2_32> for Local2_32 {
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
        impl $trait for Local2_32 {}
        impl<'a> $trait<Local2_32> for &'a Local2_32 {}
    };
}

impl_alg_ops!(AddMonOps);
impl_alg_ops!(AddGrpOps);
impl_alg_ops!(MonOps);
impl_alg_ops!(RingOps);
impl_alg_ops!(PirOps);

impl Elem for Local2_32 {
    fn math_symbol() -> String {
        String::from("Z/2^32")
    }
}

impl AddMon for Local2_32 {}
impl AddGrp for Local2_32 {}
impl Mon for Local2_32 {}

impl Ring for Local2_32 {
    fn inv(&self) -> Option<Self> {
        if self.is_unit() {
            Some(Self(inv_odd(self.0)))
        } else {
            None
        }
    }

    fn is_unit(&self) -> bool {
        self.0 % 2 == 1
    }

    // x * u = 2^v(x), the canonical associate
    fn normalizing_unit(&self) -> Self {
        match self.valuation() {
            None    => Self::one(),
            Some(v) => Self(inv_odd(self.0 >> v)),
        }
    }
}

impl Pir for Local2_32 {
    fn divides(&self, y: &Self) -> bool {
        match (self.valuation(), y.valuation()) {
            (None, None)        => true,
            (None, Some(_))     => false,
            (Some(_), None)     => true,
            (Some(v), Some(w))  => v <= w,
        }
    }

    fn gcd(x: &Self, y: &Self) -> Self {
        match (x.valuation(), y.valuation()) {
            (None, None)       => Self::zero(),
            (Some(v), None)    => Self(1 << v),
            (None, Some(w))    => Self(1 << w),
            (Some(v), Some(w)) => Self(1 << v.min(w)),
        }
    }

    fn gcdx(x: &Self, y: &Self) -> (Self, Self, Self) {
        match (x.valuation(), y.valuation()) {
            (None, None) => (Self::zero(), Self::zero(), Self::zero()),
            (Some(v), w) if w.map_or(true, |w| v <= w) => {
                // s x = 2^v with s the inverse of the odd part of x
                (Self(1 << v), Self(inv_odd(x.0 >> v)), Self::zero())
            }
            (_, Some(w)) => {
                (Self(1 << w), Self::zero(), Self(inv_odd(y.0 >> w)))
            }
            _ => unreachable!(),
        }
    }
}
