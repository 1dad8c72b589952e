//! Tagged-union AST for a single Java compilation unit
//!
//! Constructs the analyzers and rewrite passes care about are typed variants.
//! Everything else is a [`Verbatim`] node: the original source text of the
//! construct with its lowered children spliced in between, so code nobody
//! touches re-serializes unchanged.

use crate::symbols::SymbolTable;

/// A parsed compilation unit: the source it came from, its tree and the
/// declared-variable types collected while parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    source: String,
    root: Node,
    symbols: SymbolTable,
}

impl CompilationUnit {
    pub fn new(source: impl Into<String>, root: Node, symbols: SymbolTable) -> Self {
        Self {
            source: source.into(),
            root,
            symbols,
        }
    }

    /// Original text the unit was parsed from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Replace the tree, keeping source text and symbols.
    #[must_use]
    pub fn with_root(&self, root: Node) -> Self {
        Self {
            source: self.source.clone(),
            root,
            symbols: self.symbols.clone(),
        }
    }

    /// Re-serialize the tree.
    pub fn render(&self) -> String {
        self.root.to_source()
    }

    /// Number of nodes in the tree
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.root.walk(&mut |_| count += 1);
        count
    }
}

/// AST node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// `for (init; condition; update) body`
    For(ForLoop),
    /// `while (condition) body`
    While(WhileLoop),
    /// A switch in statement position
    Switch(Switch),
    Return(Option<Box<Node>>),
    Yield(Option<Box<Node>>),
    /// `expr;`
    ExprStmt(Box<Node>),
    /// A block built by a rewrite; parsed blocks stay [`Node::Verbatim`]
    Block(Vec<Node>),
    /// Opaque rendered text injected by a rewrite
    Splice(String),
    /// Method declaration; `decl` holds the whole declaration
    Method(MethodDecl),
    MethodCall(MethodCall),
    ObjectCreation(ObjectCreation),
    Binary(Binary),
    Unary(Unary),
    VarDecl(VarDecl),
    Identifier(String),
    Bool(bool),
    Lambda(Lambda),
    Verbatim(Verbatim),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    pub init: Vec<Node>,
    pub condition: Option<Box<Node>>,
    pub update: Vec<Node>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileLoop {
    pub condition: Box<Node>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    pub selector: Box<Node>,
    pub entries: Vec<SwitchEntry>,
}

/// One `case`/`default` entry. No labels means `default`.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchEntry {
    pub labels: Vec<Node>,
    pub statements: Vec<Node>,
    pub form: EntryForm,
}

impl SwitchEntry {
    pub fn is_default(&self) -> bool {
        self.labels.is_empty()
    }
}

/// How an entry is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryForm {
    /// `case A: statements`
    Colon,
    /// `case A -> body`
    Arrow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    /// Annotation names as written (`Deprecated`, `java.lang.Deprecated`)
    pub annotations: Vec<String>,
    pub decl: Box<Node>,
}

impl MethodDecl {
    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub receiver: Option<Box<Node>>,
    /// Text between receiver and name, usually `.`
    pub separator: String,
    pub name: String,
    pub args: Vec<Node>,
}

impl MethodCall {
    pub fn new(receiver: Option<Node>, name: impl Into<String>, args: Vec<Node>) -> Self {
        Self {
            separator: if receiver.is_some() { ".".to_string() } else { String::new() },
            receiver: receiver.map(Box::new),
            name: name.into(),
            args,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectCreation {
    pub type_name: String,
    pub args: Vec<Node>,
    /// Anonymous class body
    pub body: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub op: BinaryOp,
    pub left: Box<Node>,
    pub right: Box<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Equals,
    NotEquals,
    And,
    Or,
    BitAnd,
    BitOr,
    Xor,
    Plus,
    Minus,
    Multiply,
    Divide,
    Remainder,
    LeftShift,
    SignedRightShift,
    UnsignedRightShift,
}

impl BinaryOp {
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "<" => Self::Less,
            "<=" => Self::LessEquals,
            ">" => Self::Greater,
            ">=" => Self::GreaterEquals,
            "==" => Self::Equals,
            "!=" => Self::NotEquals,
            "&&" => Self::And,
            "||" => Self::Or,
            "&" => Self::BitAnd,
            "|" => Self::BitOr,
            "^" => Self::Xor,
            "+" => Self::Plus,
            "-" => Self::Minus,
            "*" => Self::Multiply,
            "/" => Self::Divide,
            "%" => Self::Remainder,
            "<<" => Self::LeftShift,
            ">>" => Self::SignedRightShift,
            ">>>" => Self::UnsignedRightShift,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::LessEquals => "<=",
            Self::Greater => ">",
            Self::GreaterEquals => ">=",
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::And => "&&",
            Self::Or => "||",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::Xor => "^",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Remainder => "%",
            Self::LeftShift => "<<",
            Self::SignedRightShift => ">>",
            Self::UnsignedRightShift => ">>>",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub op: UnaryOp,
    pub operand: Box<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    Complement,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
}

impl UnaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Not => "!",
            Self::Complement => "~",
            Self::PreIncrement | Self::PostIncrement => "++",
            Self::PreDecrement | Self::PostDecrement => "--",
        }
    }

    pub const fn is_postfix(self) -> bool {
        matches!(self, Self::PostIncrement | Self::PostDecrement)
    }
}

/// `final int i = 0, j = 1`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    /// Modifiers and type as written
    pub prefix: String,
    pub declarators: Vec<Declarator>,
    /// Whether the declaration ends with `;` (false inside a `for` header)
    pub terminated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    /// Name including any array dimensions
    pub name: String,
    pub init: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    /// Parameter list as written, `()` for none
    pub params: String,
    pub body: Box<Node>,
}

/// A construct kept as source text with lowered children spliced in
#[derive(Debug, Clone, PartialEq)]
pub struct Verbatim {
    /// tree-sitter node kind
    pub kind: String,
    pub parts: Vec<Fragment>,
}

impl Verbatim {
    /// Lowered children, in source order
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.parts.iter().filter_map(|part| match part {
            Fragment::Child(node) => Some(node),
            Fragment::Text(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Text(String),
    Child(Node),
}

impl Node {
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Direct children in source order
    pub fn children(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        match self {
            Self::For(f) => {
                out.extend(f.init.iter());
                out.extend(f.condition.as_deref());
                out.extend(f.update.iter());
                out.push(&*f.body);
            }
            Self::While(w) => {
                out.push(&*w.condition);
                out.push(&*w.body);
            }
            Self::Switch(s) => {
                out.push(&*s.selector);
                for entry in &s.entries {
                    out.extend(entry.labels.iter());
                    out.extend(entry.statements.iter());
                }
            }
            Self::Return(value) | Self::Yield(value) => out.extend(value.as_deref()),
            Self::ExprStmt(expr) => out.push(&**expr),
            Self::Block(stmts) => out.extend(stmts.iter()),
            Self::Method(m) => out.push(&*m.decl),
            Self::MethodCall(call) => {
                out.extend(call.receiver.as_deref());
                out.extend(call.args.iter());
            }
            Self::ObjectCreation(creation) => {
                out.extend(creation.args.iter());
                out.extend(creation.body.as_deref());
            }
            Self::Binary(b) => {
                out.push(&*b.left);
                out.push(&*b.right);
            }
            Self::Unary(u) => out.push(&*u.operand),
            Self::VarDecl(decl) => {
                out.extend(decl.declarators.iter().filter_map(|d| d.init.as_deref()));
            }
            Self::Lambda(l) => out.push(&*l.body),
            Self::Verbatim(v) => out.extend(v.children()),
            Self::Splice(_) | Self::Identifier(_) | Self::Bool(_) => {}
        }
        out
    }

    /// Pre-order traversal in source order
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Rebuild this node with every direct child passed through `f`.
    ///
    /// The node itself is not passed to `f`; recursion is up to the caller.
    pub fn try_map_children<E>(
        self,
        f: &mut impl FnMut(Node) -> Result<Node, E>,
    ) -> Result<Node, E> {
        Ok(match self {
            Self::For(ForLoop {
                init,
                condition,
                update,
                body,
            }) => Self::For(ForLoop {
                init: init.into_iter().map(&mut *f).collect::<Result<_, E>>()?,
                condition: condition.map(|c| map_boxed(c, f)).transpose()?,
                update: update.into_iter().map(&mut *f).collect::<Result<_, E>>()?,
                body: map_boxed(body, f)?,
            }),
            Self::While(WhileLoop { condition, body }) => Self::While(WhileLoop {
                condition: map_boxed(condition, f)?,
                body: map_boxed(body, f)?,
            }),
            Self::Switch(Switch { selector, entries }) => {
                let selector = map_boxed(selector, f)?;
                let mut mapped = Vec::with_capacity(entries.len());
                for entry in entries {
                    mapped.push(SwitchEntry {
                        labels: entry.labels.into_iter().map(&mut *f).collect::<Result<_, E>>()?,
                        statements: entry
                            .statements
                            .into_iter()
                            .map(&mut *f)
                            .collect::<Result<_, E>>()?,
                        form: entry.form,
                    });
                }
                Self::Switch(Switch {
                    selector,
                    entries: mapped,
                })
            }
            Self::Return(value) => Self::Return(value.map(|v| map_boxed(v, f)).transpose()?),
            Self::Yield(value) => Self::Yield(value.map(|v| map_boxed(v, f)).transpose()?),
            Self::ExprStmt(expr) => Self::ExprStmt(map_boxed(expr, f)?),
            Self::Block(stmts) => {
                Self::Block(stmts.into_iter().map(&mut *f).collect::<Result<_, E>>()?)
            }
            Self::Method(MethodDecl {
                name,
                annotations,
                decl,
            }) => Self::Method(MethodDecl {
                name,
                annotations,
                decl: map_boxed(decl, f)?,
            }),
            Self::MethodCall(MethodCall {
                receiver,
                separator,
                name,
                args,
            }) => Self::MethodCall(MethodCall {
                receiver: receiver.map(|r| map_boxed(r, f)).transpose()?,
                separator,
                name,
                args: args.into_iter().map(&mut *f).collect::<Result<_, E>>()?,
            }),
            Self::ObjectCreation(ObjectCreation {
                type_name,
                args,
                body,
            }) => Self::ObjectCreation(ObjectCreation {
                type_name,
                args: args.into_iter().map(&mut *f).collect::<Result<_, E>>()?,
                body: body.map(|b| map_boxed(b, f)).transpose()?,
            }),
            Self::Binary(Binary { op, left, right }) => Self::Binary(Binary {
                op,
                left: map_boxed(left, f)?,
                right: map_boxed(right, f)?,
            }),
            Self::Unary(Unary { op, operand }) => Self::Unary(Unary {
                op,
                operand: map_boxed(operand, f)?,
            }),
            Self::VarDecl(VarDecl {
                prefix,
                declarators,
                terminated,
            }) => {
                let mut mapped = Vec::with_capacity(declarators.len());
                for declarator in declarators {
                    mapped.push(Declarator {
                        name: declarator.name,
                        init: declarator.init.map(|i| map_boxed(i, f)).transpose()?,
                    });
                }
                Self::VarDecl(VarDecl {
                    prefix,
                    declarators: mapped,
                    terminated,
                })
            }
            Self::Lambda(Lambda { params, body }) => Self::Lambda(Lambda {
                params,
                body: map_boxed(body, f)?,
            }),
            Self::Verbatim(Verbatim { kind, parts }) => {
                let mut mapped = Vec::with_capacity(parts.len());
                for part in parts {
                    mapped.push(match part {
                        Fragment::Child(node) => Fragment::Child(f(node)?),
                        text @ Fragment::Text(_) => text,
                    });
                }
                Self::Verbatim(Verbatim {
                    kind,
                    parts: mapped,
                })
            }
            leaf @ (Self::Splice(_) | Self::Identifier(_) | Self::Bool(_)) => leaf,
        })
    }
}

fn map_boxed<E>(
    node: Box<Node>,
    f: &mut impl FnMut(Node) -> Result<Node, E>,
) -> Result<Box<Node>, E> {
    f(*node).map(Box::new)
}
