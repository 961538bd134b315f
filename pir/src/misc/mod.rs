mod primes;

pub use primes::*;
