mod resolver;
mod scopes;

use crate::parser::ast::ExprId;
use std::collections::HashMap;

/// The resolver's output: for each resolved reference, how many environments
/// to skip at runtime. References without an entry are globals.
pub type ResolutionMap = HashMap<ExprId, usize>;

pub use resolver::Resolver;
