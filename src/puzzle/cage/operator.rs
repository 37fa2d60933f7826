/// The `Operator` enum represents each of the possible math operators
/// that can be on a cage.
///
/// `Equal` is the single-cell operator: the cage's one cell must hold
/// the target number. `Subtract` and `Divide` are only satisfiable by
/// two-cell cages.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
}

impl Operator {
    /// Retrieve the character representation of the operator
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Equal => '=',
        }
    }

    /// Retrieve an `Operator` from its corresponding symbol
    pub fn from_symbol(c: char) -> Option<Operator> {
        let operator = match c {
            '+' => Operator::Add,
            '-' => Operator::Subtract,
            '*' => Operator::Multiply,
            '/' => Operator::Divide,
            '=' => Operator::Equal,
            _ => return None,
        };
        Some(operator)
    }
}
