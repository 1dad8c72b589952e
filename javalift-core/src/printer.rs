//! Re-serialization of the AST
//!
//! Verbatim nodes print their captured text. Typed nodes print in a
//! canonical layout; statements they contain are indented relative to the
//! line the construct starts on.

use crate::models::{EntryForm, Fragment, Node, SwitchEntry};

const INDENT: &str = "    ";

impl Node {
    /// Render this node as Java source text.
    pub fn to_source(&self) -> String {
        let mut printer = Printer::default();
        printer.print(self);
        printer.out
    }
}

#[derive(Default)]
struct Printer {
    out: String,
}

impl Printer {
    /// Leading whitespace of the line being written
    fn current_indent(&self) -> String {
        let line_start = self.out.rfind('\n').map_or(0, |idx| idx + 1);
        self.out[line_start..]
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect()
    }

    fn newline(&mut self, indent: &str) {
        self.out.push('\n');
        self.out.push_str(indent);
    }

    fn print_joined(&mut self, nodes: &[Node], separator: &str) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.out.push_str(separator);
            }
            self.print(node);
        }
    }

    fn print(&mut self, node: &Node) {
        match node {
            Node::Verbatim(verbatim) => {
                for part in &verbatim.parts {
                    match part {
                        Fragment::Text(text) => self.out.push_str(text),
                        Fragment::Child(child) => self.print(child),
                    }
                }
            }
            Node::Identifier(text) | Node::Splice(text) => self.out.push_str(text),
            Node::Bool(value) => self.out.push_str(if *value { "true" } else { "false" }),
            Node::For(for_loop) => {
                self.out.push_str("for (");
                self.print_joined(&for_loop.init, ", ");
                self.out.push(';');
                if let Some(condition) = &for_loop.condition {
                    self.out.push(' ');
                    self.print(condition);
                }
                self.out.push(';');
                if !for_loop.update.is_empty() {
                    self.out.push(' ');
                    self.print_joined(&for_loop.update, ", ");
                }
                self.out.push_str(") ");
                self.print(&for_loop.body);
            }
            Node::While(while_loop) => {
                self.out.push_str("while (");
                self.print(&while_loop.condition);
                self.out.push_str(") ");
                self.print(&while_loop.body);
            }
            Node::Switch(switch) => {
                let indent = self.current_indent();
                let entry_indent = format!("{indent}{INDENT}");
                self.out.push_str("switch (");
                self.print(&switch.selector);
                self.out.push_str(") {");
                for entry in &switch.entries {
                    self.newline(&entry_indent);
                    self.print_entry(entry, &entry_indent);
                }
                self.newline(&indent);
                self.out.push('}');
            }
            Node::Return(value) => self.print_keyword_statement("return", value.as_deref()),
            Node::Yield(value) => self.print_keyword_statement("yield", value.as_deref()),
            Node::ExprStmt(expr) => {
                self.print(expr);
                self.out.push(';');
            }
            Node::Block(statements) => {
                if statements.is_empty() {
                    self.out.push_str("{}");
                    return;
                }
                let indent = self.current_indent();
                let inner = format!("{indent}{INDENT}");
                self.out.push('{');
                for statement in statements {
                    self.newline(&inner);
                    self.print(statement);
                }
                self.newline(&indent);
                self.out.push('}');
            }
            Node::Method(method) => self.print(&method.decl),
            Node::MethodCall(call) => {
                if let Some(receiver) = &call.receiver {
                    self.print(receiver);
                }
                self.out.push_str(&call.separator);
                self.out.push_str(&call.name);
                self.out.push('(');
                self.print_joined(&call.args, ", ");
                self.out.push(')');
            }
            Node::ObjectCreation(creation) => {
                self.out.push_str("new ");
                self.out.push_str(&creation.type_name);
                self.out.push('(');
                self.print_joined(&creation.args, ", ");
                self.out.push(')');
                if let Some(body) = &creation.body {
                    self.out.push(' ');
                    self.print(body);
                }
            }
            Node::Binary(binary) => {
                self.print(&binary.left);
                self.out.push(' ');
                self.out.push_str(binary.op.as_str());
                self.out.push(' ');
                self.print(&binary.right);
            }
            Node::Unary(unary) => {
                if unary.op.is_postfix() {
                    self.print(&unary.operand);
                    self.out.push_str(unary.op.symbol());
                } else {
                    self.out.push_str(unary.op.symbol());
                    self.print(&unary.operand);
                }
            }
            Node::VarDecl(decl) => {
                self.out.push_str(&decl.prefix);
                self.out.push(' ');
                for (i, declarator) in decl.declarators.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.out.push_str(&declarator.name);
                    if let Some(init) = &declarator.init {
                        self.out.push_str(" = ");
                        self.print(init);
                    }
                }
                if decl.terminated {
                    self.out.push(';');
                }
            }
            Node::Lambda(lambda) => {
                self.out.push_str(&lambda.params);
                self.out.push_str(" -> ");
                self.print(&lambda.body);
            }
        }
    }

    fn print_keyword_statement(&mut self, keyword: &str, value: Option<&Node>) {
        self.out.push_str(keyword);
        if let Some(value) = value {
            self.out.push(' ');
            self.print(value);
        }
        self.out.push(';');
    }

    fn print_entry(&mut self, entry: &SwitchEntry, indent: &str) {
        match entry.form {
            EntryForm::Colon => {
                self.print_label(entry);
                self.out.push(':');
                let body_indent = format!("{indent}{INDENT}");
                for statement in &entry.statements {
                    self.newline(&body_indent);
                    self.print(statement);
                }
            }
            EntryForm::Arrow => {
                self.print_label(entry);
                self.out.push_str(" -> ");
                self.print_joined(&entry.statements, " ");
            }
        }
    }

    fn print_label(&mut self, entry: &SwitchEntry) {
        if entry.is_default() {
            self.out.push_str("default");
        } else {
            self.out.push_str("case ");
            self.print_joined(&entry.labels, ", ");
        }
    }
}
