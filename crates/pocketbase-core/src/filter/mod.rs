//! Fluent builder for PocketBase filter expressions.
//!
//! ```
//! use pocketbase_core::Filter;
//!
//! let filter = Filter::field("id")
//!     .equal(37)
//!     .and()
//!     .grouped(Filter::field("age").greater_than_or_equal(18).or().field("role").like("admin"))
//!     .and()
//!     .field("isVerified")
//!     .equal(true)
//!     .build();
//!
//! assert_eq!(filter, r#"id=37 && (age>=18 || role~"admin") && isVerified=true"#);
//! ```

mod node;
mod value;

pub use node::{
    ConditionNode, Conjunction, FieldNode, GroupNode, Operator, OperatorNode, TerminalNode,
};
pub use value::{FilterValue, Number};

/// Entry point for filter expressions.
pub struct Filter;

impl Filter {
    /// Start an expression with a comparison on `name`.
    pub fn field(name: impl Into<String>) -> FieldNode {
        FieldNode::start(name)
    }
}
