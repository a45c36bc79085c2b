//! Abstract syntax tree of propositional formulas.
//!
//! A [`Formula`] is either an atomic [`Variable`], a [`UnaryFormula`] applying a unary connective
//! to one operand, or a [`BinaryFormula`] joining two operands with a binary connective. Every
//! node exclusively owns its operands and a tree is never modified after it is built.
//!
//! Formulas render canonically through [`Display`]. Binary formulas are always parenthesized
//! while unary formulas are not, so the rendering of a tree never depends on how the source text
//! was grouped:
//!
//! ```rust
//! use proplogic::formula::Formula;
//!
//! let formula: Formula = "A & B > ~C".parse().unwrap();
//! assert_eq!(formula.to_string(), "((A ∧ B) → ¬C)");
//! ```

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

use crate::connectives::{BinaryConnective, UnaryConnective};

/// Error produced when a variable name is empty or contains characters other than letters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid variable name \"{0}\"")]
pub struct InvalidVariableName(String);

/// An atomic propositional formula.
///
/// Also known as a sentential variable or sentential letter, it is the simplest well-formed
/// formula and contains no connectives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidVariableName> {
        let name = name.into();

        if !name.is_empty() && name.chars().all(char::is_alphabetic) {
            Ok(Self { name })
        } else {
            Err(InvalidVariableName(name))
        }
    }

    /// Build a variable from a lexeme the scanner already classified as a variable.
    pub(crate) fn from_lexeme(name: String) -> Self {
        debug_assert!(!name.is_empty() && name.chars().all(char::is_alphabetic));
        Self { name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for Variable {
    type Err = InvalidVariableName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A formula connected by a unary connective.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnaryFormula {
    connective: UnaryConnective,
    operand: Box<Formula>,
}

impl UnaryFormula {
    pub fn new(connective: UnaryConnective, operand: Formula) -> Self {
        Self {
            connective,
            operand: Box::new(operand),
        }
    }

    pub fn connective(&self) -> UnaryConnective {
        self.connective
    }

    pub fn operand(&self) -> &Formula {
        &self.operand
    }
}

impl Display for UnaryFormula {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.connective, self.operand)
    }
}

/// Two formulas connected by a binary connective.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinaryFormula {
    left: Box<Formula>,
    connective: BinaryConnective,
    right: Box<Formula>,
}

impl BinaryFormula {
    pub fn new(left: Formula, connective: BinaryConnective, right: Formula) -> Self {
        Self {
            left: Box::new(left),
            connective,
            right: Box::new(right),
        }
    }

    pub fn left(&self) -> &Formula {
        &self.left
    }

    pub fn connective(&self) -> BinaryConnective {
        self.connective
    }

    pub fn right(&self) -> &Formula {
        &self.right
    }
}

impl Display for BinaryFormula {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.connective, self.right)
    }
}

/// A well-formed propositional formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    Variable(Variable),
    Unary(UnaryFormula),
    Binary(BinaryFormula),
}

impl Formula {
    /// Create an atomic formula, failing if `name` is not a non-empty run of letters.
    pub fn variable(name: impl Into<String>) -> Result<Self, InvalidVariableName> {
        Variable::new(name).map(Formula::Variable)
    }

    pub fn unary(connective: UnaryConnective, operand: Formula) -> Self {
        Formula::Unary(UnaryFormula::new(connective, operand))
    }

    pub fn binary(left: Formula, connective: BinaryConnective, right: Formula) -> Self {
        Formula::Binary(BinaryFormula::new(left, connective, right))
    }

    pub fn not(operand: Formula) -> Self {
        Self::unary(UnaryConnective::Negation, operand)
    }

    pub fn and(left: Formula, right: Formula) -> Self {
        Self::binary(left, BinaryConnective::Conjunction, right)
    }

    pub fn or(left: Formula, right: Formula) -> Self {
        Self::binary(left, BinaryConnective::Disjunction, right)
    }

    pub fn implies(antecedent: Formula, consequent: Formula) -> Self {
        Self::binary(antecedent, BinaryConnective::Implication, consequent)
    }

    /// Height of the tree, where a variable has a depth of one.
    pub fn depth(&self) -> usize {
        match self {
            Formula::Variable(_) => 1,
            Formula::Unary(formula) => 1 + formula.operand.depth(),
            Formula::Binary(formula) => 1 + formula.left.depth().max(formula.right.depth()),
        }
    }

    /// Names of the distinct variables in the formula, in order of first appearance.
    pub fn variables(&self) -> Vec<&str> {
        fn collect<'a>(formula: &'a Formula, names: &mut Vec<&'a str>) {
            match formula {
                Formula::Variable(variable) => {
                    if !names.contains(&variable.name()) {
                        names.push(variable.name());
                    }
                }
                Formula::Unary(formula) => collect(&formula.operand, names),
                Formula::Binary(formula) => {
                    collect(&formula.left, names);
                    collect(&formula.right, names);
                }
            }
        }

        let mut names = Vec::new();
        collect(self, &mut names);
        names
    }
}

impl Formula {
    /// Move the operands of a compound formula onto `stack`, leaving empty variables in their place.
    fn take_operands(&mut self, stack: &mut Vec<Formula>) {
        let empty = || Formula::Variable(Variable { name: String::new() });

        match self {
            Formula::Variable(_) => {}
            Formula::Unary(formula) => stack.push(std::mem::replace(&mut *formula.operand, empty())),
            Formula::Binary(formula) => {
                stack.push(std::mem::replace(&mut *formula.left, empty()));
                stack.push(std::mem::replace(&mut *formula.right, empty()));
            }
        }
    }
}

// Operands are released from an explicit stack so that dropping a long chain does not recurse
// once per node.
impl Drop for Formula {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.take_operands(&mut stack);

        while let Some(mut formula) = stack.pop() {
            formula.take_operands(&mut stack);
        }
    }
}

impl From<Variable> for Formula {
    fn from(variable: Variable) -> Self {
        Formula::Variable(variable)
    }
}

impl From<UnaryFormula> for Formula {
    fn from(formula: UnaryFormula) -> Self {
        Formula::Unary(formula)
    }
}

impl From<BinaryFormula> for Formula {
    fn from(formula: BinaryFormula) -> Self {
        Formula::Binary(formula)
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Formula::Variable(variable) => Display::fmt(variable, f),
            Formula::Unary(formula) => Display::fmt(formula, f),
            Formula::Binary(formula) => Display::fmt(formula, f),
        }
    }
}
