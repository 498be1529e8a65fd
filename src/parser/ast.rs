//! Syntax tree for floor edit scripts

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Valid identifier (alphanumeric + underscore, starts with letter/_)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Root node - a complete edit script
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    pub statements: Vec<Spanned<Statement>>,
}

/// The element a statement acts on
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// Name bound earlier in the script: `t1`
    Name(Identifier),
    /// Literal element id already in the document: `"el-17"`
    Id(String),
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Name(name) => write!(f, "{}", name),
            Target::Id(id) => write!(f, "\"{}\"", id),
        }
    }
}

/// Right-hand side of a field
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    String(String),
    /// `#rrggbb`, kept as written
    Color(String),
    /// Bare word: `zone: patio` refers to a binding
    Ident(Identifier),
    List(Vec<Spanned<Value>>),
}

impl Value {
    /// Short description used in type errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Color(_) => "color",
            Value::Ident(_) => "name",
            Value::List(_) => "list",
        }
    }
}

/// `key: value` inside a field block
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: Spanned<Identifier>,
    pub value: Spanned<Value>,
}

/// A pair of numbers: `100, 40`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pair {
    pub a: f64,
    pub b: f64,
}

/// `add table t1 [number: "4", seats: 2] at 100, 100`
#[derive(Debug, Clone, PartialEq)]
pub struct AddStmt {
    pub kind: Spanned<Identifier>,
    pub name: Option<Spanned<Identifier>>,
    pub fields: Vec<Spanned<Field>>,
    pub at: Option<Spanned<Pair>>,
}

/// `update t1 [seats: 6]`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStmt {
    pub target: Spanned<Target>,
    pub fields: Vec<Spanned<Field>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Absolute position
    To,
    /// Relative offset
    By,
}

/// `move t1 to 200, 100` / `move t1 by 40, 0`
#[derive(Debug, Clone, PartialEq)]
pub struct MoveStmt {
    pub target: Spanned<Target>,
    pub motion: Motion,
    pub offset: Spanned<Pair>,
}

/// `resize t1 to 120, 80`
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeStmt {
    pub target: Spanned<Target>,
    pub size: Spanned<Pair>,
}

/// `duplicate t1 as t2 at 300, 300`
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateStmt {
    pub source: Spanned<Target>,
    pub name: Option<Spanned<Identifier>>,
    pub at: Option<Spanned<Pair>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Add(AddStmt),
    Update(UpdateStmt),
    Move(MoveStmt),
    Resize(ResizeStmt),
    Duplicate(DuplicateStmt),
    Remove(Spanned<Target>),
    Undo,
    Redo,
}

impl Statement {
    pub fn keyword(&self) -> &'static str {
        match self {
            Statement::Add(_) => "add",
            Statement::Update(_) => "update",
            Statement::Move(_) => "move",
            Statement::Resize(_) => "resize",
            Statement::Duplicate(_) => "duplicate",
            Statement::Remove(_) => "remove",
            Statement::Undo => "undo",
            Statement::Redo => "redo",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_display() {
        assert_eq!(Target::Name(Identifier::new("t1")).to_string(), "t1");
        assert_eq!(Target::Id("el-1".to_string()).to_string(), "\"el-1\"");
    }

    #[test]
    fn test_value_type_names() {
        assert_eq!(Value::Number(1.0).type_name(), "number");
        assert_eq!(Value::Color("#fff".into()).type_name(), "color");
        assert_eq!(Value::List(vec![]).type_name(), "list");
    }
}
