mod arithmetic;
mod error;
mod format;
mod normalize;
mod number_theory;
mod operand;
mod parse;
mod rational;
mod snap;

pub use {error::*, number_theory::*, operand::*, rational::*, snap::*};
