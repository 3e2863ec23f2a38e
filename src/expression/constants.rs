// Limits for the expression parser

/// Groups, negations and exponents parsed inside one another
pub const MAX_NESTING_DEPTH: usize = 200;
/// Height of the finished tree, which also grows with chains like `1+1+1`
pub const MAX_TREE_DEPTH: usize = 1000;
