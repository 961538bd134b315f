use std::iter::Sum;
use std::ops::{Add, AddAssign};
use num_traits::Zero;
use crate::Elem;

// Additive monoids

pub trait AddMonOps<T = Self>:
    Sized +
    Add<T, Output = T> +
    for<'a> Add<&'a T, Output = T>
{}

pub trait AddMon:
    Elem +
    AddMonOps +
    AddAssign +
    for<'a> AddAssign<&'a Self> +
    Sum<Self> +
    for<'a> Sum<&'a Self> +
    Zero
where
    for<'a> &'a Self: AddMonOps<Self>
{}
