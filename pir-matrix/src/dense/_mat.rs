use std::ops::{Add, Neg, Sub, Mul, Index, IndexMut, AddAssign, SubAssign, MulAssign};
use nalgebra::{Scalar, DMatrix, ClosedAddAssign, ClosedSubAssign, ClosedMulAssign};
use simba::scalar::ClosedNeg;
use delegate::delegate;
use derive_more::Display;
use num_traits::{Zero, One};
use auto_impl_ops::auto_ops;
use crate::MatTrait;

#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub struct Mat<R> {
    inner: DMatrix<R>
}

impl<R> MatTrait for Mat<R> {
    fn shape(&self) -> (usize, usize) {
        (self.inner.nrows(), self.inner.ncols())
    }
}

impl<R> Mat<R> {
    pub fn inner(&self) -> &DMatrix<R> {
        &self.inner
    }

    pub fn into_inner(self) -> DMatrix<R> {
        self.inner
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &R)> {
        let m = self.nrows();
        self.inner.iter().enumerate().map(move |(i, a)|
            (i % m, i / m, a)
        )
    }
}

impl<R> Mat<R>
where R: Scalar {
    pub fn from_data<I>(shape: (usize, usize), data: I) -> Self
    where I: IntoIterator<Item = R> {
        DMatrix::from_row_iterator(shape.0, shape.1, data).into()
    }

    pub fn zero(shape: (usize, usize)) -> Self
    where R: Zero {
        let inner = DMatrix::zeros(shape.0, shape.1);
        Self::from(inner)
    }

    pub fn is_zero(&self) -> bool
    where R: Zero {
        self.iter().all(|e| e.2.is_zero())
    }

    pub fn id(size: usize) -> Self
    where R: Zero + One {
        let inner = DMatrix::identity(size, size);
        Self::from(inner)
    }

    pub fn is_id(&self) -> bool
    where R: Zero + One {
        self.is_square() && self.iter().all(|(i, j, a)|
            i == j && a.is_one() ||
            i != j && a.is_zero()
        )
    }

    pub fn diag<I>(shape: (usize, usize), entries: I) -> Self
    where R: Zero, I: IntoIterator<Item = R> {
        let mut mat = Self::zero(shape);
        for (i, a) in entries.into_iter().enumerate() {
            mat[(i, i)] = a;
        }
        mat
    }

    pub fn is_diag(&self) -> bool
    where R: Zero {
        self.iter().all(|(i, j, a)|
            i == j || a.is_zero()
        )
    }

    pub fn diag_entries(&self) -> impl Iterator<Item = &R> {
        (0..self.min_dim()).map(|i| &self[(i, i)])
    }

    pub fn resize(&mut self, nrows: usize, ncols: usize, fill: R)
    where R: Zero {
        let old = std::mem::replace(&mut self.inner, DMatrix::zeros(0, 0));
        self.inner = old.resize(nrows, ncols, fill);
    }
}

impl<R> From<DMatrix<R>> for Mat<R> {
    fn from(inner: DMatrix<R>) -> Self {
        Self { inner }
    }
}

impl<R> Index<(usize, usize)> for Mat<R> {
    type Output = R;
    delegate! {
        to self.inner {
            fn index(&self, index: (usize, usize)) -> &R;
        }
    }
}

impl<R> IndexMut<(usize, usize)> for Mat<R> {
    delegate! {
        to self.inner {
            fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output;
        }
    }
}

impl<R> Default for Mat<R>
where R: Scalar + Zero {
    fn default() -> Self {
        Self::zero((0, 0))
    }
}

impl<R> Neg for Mat<R>
where R: Scalar + ClosedNeg {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Mat::from(-self.inner)
    }
}

impl<R> Neg for &Mat<R>
where R: Scalar + ClosedNeg {
    type Output = Mat<R>;
    fn neg(self) -> Self::Output {
        Mat::from(-&self.inner)
    }
}

#[auto_ops]
impl<R> AddAssign<&Mat<R>> for Mat<R>
where R: Scalar + ClosedAddAssign {
    fn add_assign(&mut self, rhs: &Self) {
        self.inner += &rhs.inner;
    }
}

#[auto_ops]
impl<R> SubAssign<&Mat<R>> for Mat<R>
where R: Scalar + ClosedSubAssign {
    fn sub_assign(&mut self, rhs: &Self) {
        self.inner -= &rhs.inner
    }
}

#[auto_ops]
impl<'a, 'b, R> Mul<&'b Mat<R>> for &'a Mat<R>
where R: Scalar + Zero + One + ClosedAddAssign + ClosedMulAssign {
    type Output = Mat<R>;
    fn mul(self, rhs: &'b Mat<R>) -> Self::Output {
        let prod = &self.inner * &rhs.inner;
        Mat::from(prod)
    }
}

impl<R> Mat<R>
where R: Scalar {
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.inner.swap_rows(i, j);
    }

    pub fn swap_cols(&mut self, i: usize, j: usize) {
        self.inner.swap_columns(i, j);
    }

    pub fn mul_row(&mut self, i: usize, r: &R)
    where R: for<'a> std::ops::MulAssign<&'a R> {
        for j in 0..self.ncols() {
            self[(i, j)] *= r;
        }
    }

    pub fn mul_col(&mut self, j: usize, r: &R)
    where R: for<'a> std::ops::MulAssign<&'a R> {
        for i in 0..self.nrows() {
            self[(i, j)] *= r;
        }
    }

    // row_j += r * row_i
    pub fn add_row_to(&mut self, i: usize, j: usize, r: &R)
    where R: ClosedAddAssign, for<'a> &'a R: Mul<&'a R, Output = R> {
        for l in 0..self.ncols() {
            let a = r * &self[(i, l)];
            self[(j, l)] += a;
        }
    }

    // col_j += r * col_i
    pub fn add_col_to(&mut self, i: usize, j: usize, r: &R)
    where R: ClosedAddAssign, for<'a> &'a R: Mul<&'a R, Output = R> {
        for l in 0..self.nrows() {
            let a = r * &self[(l, i)];
            self[(l, j)] += a;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init() {
        let a = Mat::from_data((2, 3), [1,2,3,4,5,6]);

        assert_eq!(a.nrows(), 2);
        assert_eq!(a.ncols(), 3);
        assert_eq!(a.into_inner(), DMatrix::from_row_slice(2, 3, &[1,2,3,4,5,6]));
    }

    #[test]
    fn eq() {
        let a = Mat::from_data((2, 3), [1,2,3,4,5,6]);
        let b = Mat::from_data((2, 3), [1,2,0,4,5,6]);
        let c = Mat::from_data((3, 2), [1,2,3,4,5,6]);

        assert_eq!(a, a);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn zero() {
        let a: Mat<i64> = Mat::zero((3, 2));
        assert!(a.is_zero());

        let a = Mat::from_data((2, 3), [1,2,3,4,5,6]);
        assert!(!a.is_zero());
    }

    #[test]
    fn id() {
        let a: Mat<i64> = Mat::id(3);
        assert!(a.is_id());

        let a = Mat::from_data((2, 2), [1,2,3,4]);
        assert!(!a.is_id());
    }

    #[test]
    fn diag() {
        let a = Mat::diag((3, 4), [1, 2, 3]);
        assert!(a.is_diag());
        assert_eq!(a.diag_entries().collect::<Vec<_>>(), [&1, &2, &3]);

        let a = Mat::from_data((2, 2), [1,0,1,1]);
        assert!(!a.is_diag());
    }

    #[test]
    fn resize() {
        let mut a = Mat::from_data((2, 2), [1,2,3,4]);
        a.resize(3, 3, 0);
        assert_eq!(a, Mat::from_data((3, 3), [1,2,0,3,4,0,0,0,0]));

        a.resize(1, 2, 0);
        assert_eq!(a, Mat::from_data((1, 2), [1,2]));
    }

    #[test]
    fn swap_rows() {
        let mut a = Mat::from_data((3, 4), 1..=12);
        a.swap_rows(0, 1);
        assert_eq!(a, Mat::from_data((3, 4), [5,6,7,8,1,2,3,4,9,10,11,12]));
    }

    #[test]
    fn swap_cols() {
        let mut a = Mat::from_data((3, 4), 1..=12);
        a.swap_cols(0, 1);
        assert_eq!(a, Mat::from_data((3, 4), [2,1,3,4,6,5,7,8,10,9,11,12]));
    }

    #[test]
    fn mul_row() {
        let mut a = Mat::from_data((3, 3), 1..=9);
        a.mul_row(1, &10);
        assert_eq!(a, Mat::from_data((3, 3), [1,2,3,40,50,60,7,8,9]));
    }

    #[test]
    fn mul_col() {
        let mut a = Mat::from_data((3, 3), 1..=9);
        a.mul_col(1, &10);
        assert_eq!(a, Mat::from_data((3, 3), [1,20,3,4,50,6,7,80,9]));
    }

    #[test]
    fn add_row_to() {
        let mut a = Mat::from_data((3, 3), 1..=9);
        a.add_row_to(0, 1, &10);
        assert_eq!(a, Mat::from_data((3, 3), [1,2,3,14,25,36,7,8,9]));
    }

    #[test]
    fn add_col_to() {
        let mut a = Mat::from_data((3, 3), 1..=9);
        a.add_col_to(0, 1, &10);
        assert_eq!(a, Mat::from_data((3, 3), [1,12,3,4,45,6,7,78,9]));
    }

    #[test]
    fn add() {
        let a = Mat::from_data((3, 2), [1,2,3,4,5,6]);
        let b = Mat::from_data((3, 2), [8,2,4,0,2,1]);
        assert_eq!(a + b, Mat::from_data((3, 2), [9,4,7,4,7,7]));
    }

    #[test]
    fn sub() {
        let a = Mat::from_data((3, 2), [1,2,3,4,5,6]);
        let b = Mat::from_data((3, 2), [8,2,4,0,2,1]);
        assert_eq!(a - b, Mat::from_data((3, 2), [-7,0,-1,4,3,5]));
    }

    #[test]
    fn neg() {
        let a = Mat::from_data((3, 2), [1,2,3,4,5,6]);
        assert_eq!(-a, Mat::from_data((3, 2), [-1,-2,-3,-4,-5,-6]));
    }

    #[test]
    fn mul() {
        let a = Mat::from_data((2, 3), [1,2,3,4,5,6]);
        let b = Mat::from_data((3, 2), [1,2,1,-1,0,2]);
        assert_eq!(a * b, Mat::from_data((2, 2), [3,6,9,15]));
    }
}
