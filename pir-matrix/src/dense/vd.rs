// Element-wise vector combinations over a ring, used to mix matrix rows
// and columns. No pivoting or elimination logic lives here.

use pir::{Ring, RingOps};

// dst = s * src
pub fn mul<'a, R, I>(dst: &mut [R], src: I, s: &R)
where R: Ring, for<'x> &'x R: RingOps<R>, I: IntoIterator<Item = &'a R> {
    for (d, x) in dst.iter_mut().zip(src) {
        *d = s * x;
    }
}

// v *= s
pub fn mulin<'a, R, I>(v: I, s: &R)
where R: Ring, for<'x> &'x R: RingOps<R>, I: IntoIterator<Item = &'a mut R> {
    for x in v {
        *x *= s;
    }
}

// dst += s * src
pub fn axpyin<'a, 'b, R, I, J>(dst: I, s: &R, src: J)
where R: Ring, for<'x> &'x R: RingOps<R>,
      I: IntoIterator<Item = &'a mut R>, J: IntoIterator<Item = &'b R> {
    for (d, x) in dst.into_iter().zip(src) {
        *d += s * x;
    }
}

pub fn copy<'a, 'b, R, I, J>(dst: I, src: J)
where R: Ring, for<'x> &'x R: RingOps<R>,
      I: IntoIterator<Item = &'a mut R>, J: IntoIterator<Item = &'b R> {
    for (d, x) in dst.into_iter().zip(src) {
        *d = x.clone();
    }
}

pub fn dot<'a, 'b, R, I, J>(v: I, w: J) -> R
where R: Ring, for<'x> &'x R: RingOps<R>,
      I: IntoIterator<Item = &'a R>, J: IntoIterator<Item = &'b R> {
    v.into_iter().zip(w).fold(R::zero(), |mut acc, (x, y)| {
        acc += x * y;
        acc
    })
}
