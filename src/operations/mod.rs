//! The non-expression calculations offered by the menu

mod divisors;
mod errors;
mod powers;
mod roots;
mod rounding;

pub use divisors::divisors;
pub use errors::OperationError;
pub use powers::{PerfectPower, perfect_powers, power};
pub use roots::{RootForm, simplify_root};
pub use rounding::{percentage, round_half_even};
