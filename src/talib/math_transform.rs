//! Math Transforms
//!
//! Element-wise vector functions. Values outside a function's domain come
//! back as NaN, which the CLI shows as an absent value.

use super::common::map_valid;

macro_rules! vector_fn {
    ($(#[$doc:meta] $name:ident => $f:expr;)*) => {
        $(
            #[$doc]
            pub fn $name(values: &[f64]) -> Vec<f64> {
                map_valid(values, $f)
            }
        )*
    };
}

vector_fn! {
    /// Vector arc cosine
    acos => f64::acos;
    /// Vector arc sine
    asin => f64::asin;
    /// Vector arc tangent
    atan => f64::atan;
    /// Vector ceiling
    ceil => f64::ceil;
    /// Vector cosine
    cos => f64::cos;
    /// Vector hyperbolic cosine
    cosh => f64::cosh;
    /// Vector exponential
    exp => f64::exp;
    /// Vector floor
    floor => f64::floor;
    /// Vector natural log
    ln => f64::ln;
    /// Vector base-10 log
    log10 => f64::log10;
    /// Vector sine
    sin => f64::sin;
    /// Vector hyperbolic sine
    sinh => f64::sinh;
    /// Vector square root
    sqrt => f64::sqrt;
    /// Vector tangent
    tan => f64::tan;
    /// Vector hyperbolic tangent
    tanh => f64::tanh;
}
