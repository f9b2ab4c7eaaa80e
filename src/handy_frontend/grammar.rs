/// Root of a parsed source file.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    pub statements: Vec<Node>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct VarDecl {
    pub name: String,
    pub type_name: Option<String>,
    pub value: Option<Box<Node>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ConstDecl {
    pub name: String,
    pub type_name: Option<String>,
    pub value: Box<Node>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Option<String>,
    pub body: Block,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Param {
    pub name: String,
    pub type_name: Option<String>,
    pub default: Option<Box<Node>>,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Block {
    pub statements: Vec<Node>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct IfStmt {
    pub condition: Box<Node>,
    pub then_block: Block,
    pub else_block: Option<Block>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ForStmt {
    pub var_name: String,
    pub iterable: Box<Node>,
    pub body: Block,
}

#[derive(Debug, PartialEq, Clone)]
pub struct MatchStmt {
    pub expr: Box<Node>,
    pub cases: Vec<(Node, Block)>,
    pub else_block: Option<Block>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Node>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ReturnStmt {
    pub value: Option<Box<Node>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct RaiseStmt {
    pub exception_type: String,
    pub message: Option<Box<Node>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct TryStmt {
    pub try_block: Block,
    /// Exception type names handled by each block.
    pub except_blocks: Vec<(Vec<String>, Block)>,
}

/// Binary expression.
#[derive(Debug, PartialEq, Clone)]
pub struct Expression {
    pub left: Box<Node>,
    pub operator: String,
    pub right: Box<Node>,
}

/// Literal kept in its source spelling; the interpreter decides its type.
#[derive(Debug, PartialEq, Clone)]
pub struct Literal {
    pub value: String,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Identifier {
    pub name: String,
}

#[derive(Debug, PartialEq, Clone)]
pub struct CodeBlock {
    pub params: Vec<Param>,
    pub body: Block,
}

#[derive(Debug, PartialEq, Clone)]
pub struct MacroDef {
    pub name: String,
    pub params: Vec<Param>,
    pub body: Block,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ComptimeDef {
    pub name: String,
    pub params: Vec<Param>,
    pub body: Block,
}

#[derive(Debug, PartialEq, Clone)]
pub struct TypeDef {
    pub name: String,
    pub base_type: Option<String>,
    pub fields: Vec<VarDecl>,
    pub methods: Vec<FunctionDef>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Node {
    Program(Program),
    VarDecl(VarDecl),
    ConstDecl(ConstDecl),
    FunctionDef(FunctionDef),
    Param(Param),
    Block(Block),
    IfStmt(IfStmt),
    ForStmt(ForStmt),
    MatchStmt(MatchStmt),
    FunctionCall(FunctionCall),
    ReturnStmt(ReturnStmt),
    RaiseStmt(RaiseStmt),
    TryStmt(TryStmt),
    Expression(Expression),
    Literal(Literal),
    Identifier(Identifier),
    CodeBlock(CodeBlock),
    MacroDef(MacroDef),
    ComptimeDef(ComptimeDef),
    TypeDef(TypeDef),
}

impl Node {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Program(_) => "Program",
            Node::VarDecl(_) => "VarDecl",
            Node::ConstDecl(_) => "ConstDecl",
            Node::FunctionDef(_) => "FunctionDef",
            Node::Param(_) => "Param",
            Node::Block(_) => "Block",
            Node::IfStmt(_) => "IfStmt",
            Node::ForStmt(_) => "ForStmt",
            Node::MatchStmt(_) => "MatchStmt",
            Node::FunctionCall(_) => "FunctionCall",
            Node::ReturnStmt(_) => "ReturnStmt",
            Node::RaiseStmt(_) => "RaiseStmt",
            Node::TryStmt(_) => "TryStmt",
            Node::Expression(_) => "Expression",
            Node::Literal(_) => "Literal",
            Node::Identifier(_) => "Identifier",
            Node::CodeBlock(_) => "CodeBlock",
            Node::MacroDef(_) => "MacroDef",
            Node::ComptimeDef(_) => "ComptimeDef",
            Node::TypeDef(_) => "TypeDef",
        }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Node::Literal(Literal {
            value: value.into(),
        })
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Node::Identifier(Identifier { name: name.into() })
    }
}
