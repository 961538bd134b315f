use pir::{Ring, RingOps};
use crate::MatTrait;
use super::{vd, Mat};

// A mutable window into a `Mat`, identified by its offset and extent.
// All access goes through index translation into the parent storage, so
// mutations are visible globally; the recursion over trailing submatrices
// never copies the backing matrix.

pub struct SubMat<'a, R> {
    mat: &'a mut Mat<R>,
    row0: usize,
    col0: usize,
    nrows: usize,
    ncols: usize,
}

impl<R> MatTrait for SubMat<'_, R> {
    fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }
}

impl<'a, R> SubMat<'a, R> {
    pub fn of(mat: &'a mut Mat<R>) -> Self {
        let (nrows, ncols) = mat.shape();
        Self { mat, row0: 0, col0: 0, nrows, ncols }
    }

    pub fn view(mat: &'a mut Mat<R>, row0: usize, col0: usize, nrows: usize, ncols: usize) -> Self {
        let (m, n) = mat.shape();
        assert!(row0 + nrows <= m && col0 + ncols <= n);
        Self { mat, row0, col0, nrows, ncols }
    }

    // the window dropping row 0 and col 0
    pub fn trailing(&mut self) -> SubMat<'_, R> {
        assert!(self.nrows > 0 && self.ncols > 0);
        SubMat {
            mat: &mut *self.mat,
            row0: self.row0 + 1,
            col0: self.col0 + 1,
            nrows: self.nrows - 1,
            ncols: self.ncols - 1,
        }
    }

    pub fn at(&self, i: usize, j: usize) -> &R {
        debug_assert!(i < self.nrows && j < self.ncols);
        &self.mat[(self.row0 + i, self.col0 + j)]
    }

    pub fn at_mut(&mut self, i: usize, j: usize) -> &mut R {
        debug_assert!(i < self.nrows && j < self.ncols);
        &mut self.mat[(self.row0 + i, self.col0 + j)]
    }

    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = &R> {
        (0..self.ncols).map(move |j| self.at(i, j))
    }

    pub fn col_iter(&self, j: usize) -> impl Iterator<Item = &R> {
        (0..self.nrows).map(move |i| self.at(i, j))
    }
}

impl<'a, R> SubMat<'a, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn mul_row(&mut self, i: usize, s: &R) {
        for j in 0..self.ncols {
            *self.at_mut(i, j) *= s;
        }
    }

    pub fn mul_col(&mut self, j: usize, s: &R) {
        for i in 0..self.nrows {
            *self.at_mut(i, j) *= s;
        }
    }

    // row_dst += s * row_src
    pub fn axpy_row(&mut self, dst: usize, s: &R, src: usize) {
        for j in 0..self.ncols {
            let a = s * self.at(src, j);
            *self.at_mut(dst, j) += a;
        }
    }

    // col_dst += s * col_src
    pub fn axpy_col(&mut self, dst: usize, s: &R, src: usize) {
        for i in 0..self.nrows {
            let a = s * self.at(i, src);
            *self.at_mut(i, dst) += a;
        }
    }

    // (row_i0, row_i1) <- (a row_i0 + b row_i1, c row_i0 + d row_i1)
    pub fn combine_rows(&mut self, i0: usize, i1: usize, comps: [&R; 4]) {
        let [a, b, c, d] = comps;
        let n = self.ncols;

        let mut tmp0 = vec![R::zero(); n];
        let mut tmp1 = vec![R::zero(); n];

        vd::mul(&mut tmp0, self.row_iter(i0), a);
        vd::axpyin(tmp0.iter_mut(), b, self.row_iter(i1));
        vd::mul(&mut tmp1, self.row_iter(i0), c);
        vd::axpyin(tmp1.iter_mut(), d, self.row_iter(i1));

        for (j, x) in tmp0.into_iter().enumerate() {
            *self.at_mut(i0, j) = x;
        }
        for (j, x) in tmp1.into_iter().enumerate() {
            *self.at_mut(i1, j) = x;
        }
    }

    // (col_j0, col_j1) <- (a col_j0 + b col_j1, c col_j0 + d col_j1)
    pub fn combine_cols(&mut self, j0: usize, j1: usize, comps: [&R; 4]) {
        let [a, b, c, d] = comps;
        let m = self.nrows;

        let mut tmp0 = vec![R::zero(); m];
        let mut tmp1 = vec![R::zero(); m];

        vd::mul(&mut tmp0, self.col_iter(j0), a);
        vd::axpyin(tmp0.iter_mut(), b, self.col_iter(j1));
        vd::mul(&mut tmp1, self.col_iter(j0), c);
        vd::axpyin(tmp1.iter_mut(), d, self.col_iter(j1));

        for (i, x) in tmp0.into_iter().enumerate() {
            *self.at_mut(i, j0) = x;
        }
        for (i, x) in tmp1.into_iter().enumerate() {
            *self.at_mut(i, j1) = x;
        }
    }

    pub fn dot_row(&self, i: usize, w: &[R]) -> R {
        vd::dot(self.row_iter(i), w.iter())
    }

    pub fn dot_col(&self, j: usize, w: &[R]) -> R {
        vd::dot(self.col_iter(j), w.iter())
    }
}
