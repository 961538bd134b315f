use std::ops::{Div, DivAssign};
use crate::{Ring, RingOps};

// Principal ideal rings.
//
// `a / b` is exact division: it is only defined when `b.divides(&a)`.
// Divisibility must be established before dividing, typically via `gcd`
// or `gcdx`; the operation itself does not re-check it.

pub trait PirOps<T = Self>:
    RingOps<T> +
    Div<T, Output = T> +
    for<'a> Div<&'a T, Output = T>
{}

pub trait Pir:
    Ring +
    PirOps +
    DivAssign +
    for<'a> DivAssign<&'a Self>
where
    for<'a> &'a Self: PirOps<Self>
{
    fn divides(&self, y: &Self) -> bool;

    // a generator of the ideal (x, y)
    fn gcd(x: &Self, y: &Self) -> Self;

    // (g, s, t) with g = s*x + t*y
    fn gcdx(x: &Self, y: &Self) -> (Self, Self, Self);

    fn lcm(x: &Self, y: &Self) -> Self {
        if x.is_zero() || y.is_zero() {
            return Self::zero()
        }
        x * &(y / &Self::gcd(x, y))
    }
}
