use std::fmt;

/// Binary operators.
///
/// Precedence values are part of the grammar: two parsers that agree on them
/// group every mixed-operator expression the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Comparison
    /// Equal (`eq`)
    Eq,
    /// Not equal (`ne`)
    Ne,
    /// Greater than (`gt`)
    Gt,
    /// Greater than or equal (`ge`)
    Ge,
    /// Less than (`lt`)
    Lt,
    /// Less than or equal (`le`)
    Le,

    // Logical
    /// Logical AND (`and`)
    And,
    /// Logical OR (`or`)
    Or,

    // Arithmetic
    /// Addition (`add`)
    Add,
    /// Subtraction (`sub`)
    Sub,
    /// Multiplication (`mul`)
    Mul,
    /// Division (`div`)
    Div,
    /// Modulo (`mod`)
    Mod,

    // Membership
    /// Enum flag test (`has`)
    Has,
    /// Collection membership (`in`)
    In,
}

impl Operator {
    /// Every operator, in the order the lexer tries them.
    pub const ALL: [Operator; 15] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Gt,
        Operator::Ge,
        Operator::Lt,
        Operator::Le,
        Operator::And,
        Operator::Or,
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Mod,
        Operator::Has,
        Operator::In,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Gt => "gt",
            Operator::Ge => "ge",
            Operator::Lt => "lt",
            Operator::Le => "le",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Add => "add",
            Operator::Sub => "sub",
            Operator::Mul => "mul",
            Operator::Div => "div",
            Operator::Mod => "mod",
            Operator::Has => "has",
            Operator::In => "in",
        }
    }

    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Has => 150,
            Operator::In => 140,
            Operator::Mul => 130,
            Operator::Div => 120,
            Operator::Mod => 110,
            Operator::Add => 100,
            Operator::Sub => 90,
            Operator::Lt => 80,
            Operator::Gt => 70,
            Operator::Le => 60,
            Operator::Ge => 50,
            Operator::Eq => 40,
            Operator::Ne => 30,
            Operator::And => 20,
            Operator::Or => 10,
        }
    }

    /// Chains of these operators are flattened into one n-ary node.
    ///
    /// `sub` and `div` are included: flattening only ever merges a
    /// left-associated chain, so `a sub b sub c` keeps its meaning.
    pub fn is_associative(self) -> bool {
        matches!(
            self,
            Operator::And
                | Operator::Or
                | Operator::Add
                | Operator::Sub
                | Operator::Mul
                | Operator::Div
        )
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Collection quantifiers used by lambda expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LambdaOp {
    /// `any(x: ...)` - at least one member satisfies the expression
    Any,
    /// `all(x: ...)` - every member satisfies the expression
    All,
}

impl LambdaOp {
    pub fn name(self) -> &'static str {
        match self {
            LambdaOp::Any => "any",
            LambdaOp::All => "all",
        }
    }

    /// Case-sensitive, unlike operators and functions.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "any" => Some(LambdaOp::Any),
            "all" => Some(LambdaOp::All),
            _ => None,
        }
    }
}

impl fmt::Display for LambdaOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
