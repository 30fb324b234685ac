pub mod approx;
pub mod search;

pub use approx::ApproxRange;
