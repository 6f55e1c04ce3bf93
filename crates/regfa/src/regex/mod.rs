//! Regular expression front end: validation, normalization and Thompson construction.

mod normalize;
mod thompson;
mod validate;

pub use normalize::{CONCAT, Token, add_concat, infix_to_postfix, postfix_to_string};
pub use thompson::thompson_construction;
pub use validate::{is_valid, validate};
