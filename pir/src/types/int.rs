use num_bigint::BigInt;
use num_traits::{Zero, One, Signed, ToPrimitive, FromPrimitive};
use crate::*;

pub trait IntOps<T = Self>: PirOps<T> {}

pub trait Integer: Pir + IntOps + Signed + PartialOrd + Ord + FromPrimitive + ToPrimitive
where for<'a> &'a Self: IntOps<Self> {}

macro_rules! impl_ops {
    ($trait:ident, $type:ty) => {
        impl $trait for $type {}
        impl<'a> $trait<$type> for &'a $type {}
    };
}

macro_rules! impl_integer {
    ($type:ident) => {
        impl_ops!(AddMonOps, $type);
        impl_ops!(AddGrpOps, $type);
        impl_ops!(MonOps, $type);
        impl_ops!(RingOps, $type);
        impl_ops!(PirOps, $type);
        impl_ops!(IntOps, $type);

        impl Elem for $type {
            fn math_symbol() -> String {
                String::from("Z")
            }
        }

        impl AddMon for $type {}
        impl AddGrp for $type {}
        impl Mon for $type {}

        impl Ring for $type {
            fn inv(&self) -> Option<Self> {
                if self.is_unit() {
                    Some(self.clone())
                } else {
                    None
                }
            }

            fn is_unit(&self) -> bool {
                self.is_one() || (-self).is_one()
            }

            fn normalizing_unit(&self) -> Self {
                if !self.is_negative() {
                    Self::one()
                } else {
                    -Self::one()
                }
            }
        }

        impl Pir for $type {
            fn divides(&self, y: &Self) -> bool {
                !self.is_zero() && (y % self).is_zero()
            }

            fn gcd(x: &Self, y: &Self) -> Self {
                num_integer::Integer::gcd(x, y)
            }

            fn gcdx(x: &Self, y: &Self) -> (Self, Self, Self) {
                let num_integer::ExtendedGcd{ gcd: d, x: s, y: t } = num_integer::Integer::extended_gcd(x, y);
                (d, s, t)
            }

            fn lcm(x: &Self, y: &Self) -> Self {
                num_integer::Integer::lcm(x, y)
            }
        }

        impl Integer for $type {}
    }
}

impl_integer!(i32);
impl_integer!(i64);
impl_integer!(i128);
impl_integer!(BigInt);
