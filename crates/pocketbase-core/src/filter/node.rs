//! Typed nodes of a filter expression chain.
//!
//! Each node owns its predecessor, so a chain is a singly-linked list from
//! tail to head. The methods available on each node type only allow
//! well-formed continuations: a field is followed by a comparison, a
//! comparison or group by a conjunction, a conjunction by a field or group.

use std::fmt;

use super::value::{FilterValue, Number};

/// A comparison operator of the filter language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Like,
    NotLike,
    AnyEqual,
    AnyNotEqual,
    AnyGreaterThan,
    AnyGreaterThanOrEqual,
    AnyLessThan,
    AnyLessThanOrEqual,
    AnyLike,
    AnyNotLike,
}

impl Operator {
    /// Returns the operator symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::Like => "~",
            Operator::NotLike => "!~",
            Operator::AnyEqual => "?=",
            Operator::AnyNotEqual => "?!=",
            Operator::AnyGreaterThan => "?>",
            Operator::AnyGreaterThanOrEqual => "?>=",
            Operator::AnyLessThan => "?<",
            Operator::AnyLessThanOrEqual => "?<=",
            Operator::AnyLike => "?~",
            Operator::AnyNotLike => "?!~",
        }
    }
}

/// Logical conjunction between two comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conjunction {
    And,
    Or,
}

impl Conjunction {
    pub fn symbol(&self) -> &'static str {
        match self {
            Conjunction::And => " && ",
            Conjunction::Or => " || ",
        }
    }
}

mod chain {
    use super::{Conjunction, FilterValue, Operator};

    #[derive(Debug, Clone, PartialEq)]
    pub enum Token {
        Field(String),
        Comparison(Operator, FilterValue),
        Condition(Conjunction),
        Group(Box<Link>),
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Link {
        pub prev: Option<Box<Link>>,
        pub token: Token,
    }

    impl Link {
        pub fn head(token: Token) -> Self {
            Self { prev: None, token }
        }

        pub fn push(self, token: Token) -> Self {
            Self {
                prev: Some(Box::new(self)),
                token,
            }
        }

        pub fn render(&self) -> String {
            let mut tokens = Vec::new();
            let mut cursor = Some(self);
            while let Some(link) = cursor {
                tokens.push(&link.token);
                cursor = link.prev.as_deref();
            }

            let mut out = String::new();
            for token in tokens.into_iter().rev() {
                match token {
                    Token::Field(name) => out.push_str(name),
                    Token::Comparison(op, value) => {
                        out.push_str(op.symbol());
                        out.push_str(&value.to_string());
                    }
                    Token::Condition(conjunction) => out.push_str(conjunction.symbol()),
                    Token::Group(inner) => {
                        out.push('(');
                        out.push_str(&inner.render());
                        out.push(')');
                    }
                }
            }
            out
        }
    }
}

use chain::{Link, Token};

mod sealed {
    pub trait Sealed {
        fn into_link(self) -> super::chain::Link;
    }
}

fn number(value: impl Into<Number>) -> FilterValue {
    let number: Number = value.into();
    number.into()
}

/// A node a complete expression can end on: a comparison or a group.
///
/// Only terminal nodes can be built or wrapped with
/// [`ConditionNode::grouped`].
pub trait TerminalNode: sealed::Sealed {
    /// Render the whole chain ending at this node.
    fn build(&self) -> String;
}

/// A field name awaiting a comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    link: Link,
}

/// A completed comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorNode {
    link: Link,
}

/// A conjunction awaiting its right-hand side.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionNode {
    link: Link,
}

/// A parenthesized sub-expression.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupNode {
    link: Link,
}

impl FieldNode {
    pub(crate) fn start(name: impl Into<String>) -> Self {
        Self {
            link: Link::head(Token::Field(name.into())),
        }
    }

    fn compare(self, op: Operator, value: FilterValue) -> OperatorNode {
        OperatorNode {
            link: self.link.push(Token::Comparison(op, value)),
        }
    }

    /// `field=value`
    pub fn equal(self, value: impl Into<FilterValue>) -> OperatorNode {
        self.compare(Operator::Equal, value.into())
    }

    /// `field!=value`
    pub fn not_equal(self, value: impl Into<FilterValue>) -> OperatorNode {
        self.compare(Operator::NotEqual, value.into())
    }

    /// `field>value`
    pub fn greater_than(self, value: impl Into<Number>) -> OperatorNode {
        self.compare(Operator::GreaterThan, number(value))
    }

    /// `field>=value`
    pub fn greater_than_or_equal(self, value: impl Into<Number>) -> OperatorNode {
        self.compare(Operator::GreaterThanOrEqual, number(value))
    }

    /// `field<value`
    pub fn less_than(self, value: impl Into<Number>) -> OperatorNode {
        self.compare(Operator::LessThan, number(value))
    }

    /// `field<=value`
    pub fn less_than_or_equal(self, value: impl Into<Number>) -> OperatorNode {
        self.compare(Operator::LessThanOrEqual, number(value))
    }

    /// `field~"value"`, a case-insensitive contains.
    pub fn like(self, value: impl Into<String>) -> OperatorNode {
        self.compare(Operator::Like, FilterValue::Text(value.into()))
    }

    /// `field!~"value"`
    pub fn not_like(self, value: impl Into<String>) -> OperatorNode {
        self.compare(Operator::NotLike, FilterValue::Text(value.into()))
    }

    /// `field?=value`: at least one element of an array field is equal.
    pub fn any_equal(self, value: impl Into<FilterValue>) -> OperatorNode {
        self.compare(Operator::AnyEqual, value.into())
    }

    /// `field?!=value`
    pub fn any_not_equal(self, value: impl Into<FilterValue>) -> OperatorNode {
        self.compare(Operator::AnyNotEqual, value.into())
    }

    /// `field?>value`
    pub fn any_greater_than(self, value: impl Into<Number>) -> OperatorNode {
        self.compare(Operator::AnyGreaterThan, number(value))
    }

    /// `field?>=value`
    pub fn any_greater_than_or_equal(self, value: impl Into<Number>) -> OperatorNode {
        self.compare(Operator::AnyGreaterThanOrEqual, number(value))
    }

    /// `field?<value`
    pub fn any_less_than(self, value: impl Into<Number>) -> OperatorNode {
        self.compare(Operator::AnyLessThan, number(value))
    }

    /// `field?<=value`
    pub fn any_less_than_or_equal(self, value: impl Into<Number>) -> OperatorNode {
        self.compare(Operator::AnyLessThanOrEqual, number(value))
    }

    /// `field?~"value"`
    pub fn any_like(self, value: impl Into<String>) -> OperatorNode {
        self.compare(Operator::AnyLike, FilterValue::Text(value.into()))
    }

    /// `field?!~"value"`
    pub fn any_not_like(self, value: impl Into<String>) -> OperatorNode {
        self.compare(Operator::AnyNotLike, FilterValue::Text(value.into()))
    }
}

macro_rules! terminal_node {
    ($node:ty) => {
        impl $node {
            /// Continue with `&&`.
            pub fn and(self) -> ConditionNode {
                ConditionNode {
                    link: self.link.push(Token::Condition(Conjunction::And)),
                }
            }

            /// Continue with `||`.
            pub fn or(self) -> ConditionNode {
                ConditionNode {
                    link: self.link.push(Token::Condition(Conjunction::Or)),
                }
            }

            /// Render the whole expression.
            pub fn build(&self) -> String {
                self.link.render()
            }
        }

        impl sealed::Sealed for $node {
            fn into_link(self) -> Link {
                self.link
            }
        }

        impl TerminalNode for $node {
            fn build(&self) -> String {
                self.link.render()
            }
        }

        impl fmt::Display for $node {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.link.render())
            }
        }

        impl From<$node> for String {
            fn from(node: $node) -> String {
                node.link.render()
            }
        }
    };
}

terminal_node!(OperatorNode);
terminal_node!(GroupNode);

impl ConditionNode {
    /// Continue with another field comparison.
    pub fn field(self, name: impl Into<String>) -> FieldNode {
        FieldNode {
            link: self.link.push(Token::Field(name.into())),
        }
    }

    /// Continue with a complete sub-expression wrapped in parentheses.
    pub fn grouped<T: TerminalNode>(self, expression: T) -> GroupNode {
        let inner = sealed::Sealed::into_link(expression);
        GroupNode {
            link: self.link.push(Token::Group(Box::new(inner))),
        }
    }
}
