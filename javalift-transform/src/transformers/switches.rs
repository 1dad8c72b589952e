//! Switch-to-arrow modernization
//!
//! Every entry of a statement switch that owns statements keeps its labels
//! but has its statement list replaced by a single spliced
//! `<label> -> <body>` line, which names only the first label. A lone
//! `return` becomes a `yield` first, and a bare `return;` becomes `yield;`.
//! The spliced text is not re-parsed, so neither the nested arrow line nor a
//! `yield` inside it has to form valid Java.

use super::{TransformContext, Transformer};
use crate::types::TransformationType;
use crate::Result;
use javalift_core::models::{EntryForm, Switch, SwitchEntry};
use javalift_core::Node;

#[derive(Debug, Clone, Copy, Default)]
pub struct SwitchTransformer;

impl SwitchTransformer {
    pub const fn new() -> Self {
        Self
    }

    /// Matched switches are not searched for nested switches.
    fn rewrite(&self, node: Node, rewrites: &mut usize) -> Result<Node> {
        match node {
            Node::Switch(switch) => Ok(Node::Switch(Switch {
                selector: switch.selector,
                entries: switch
                    .entries
                    .into_iter()
                    .map(|entry| {
                        if entry.statements.is_empty() {
                            entry
                        } else {
                            *rewrites += 1;
                            arrow_entry(entry)
                        }
                    })
                    .collect(),
            })),
            other => other.try_map_children(&mut |child| self.rewrite(child, rewrites)),
        }
    }
}

fn arrow_entry(entry: SwitchEntry) -> SwitchEntry {
    let label = entry
        .labels
        .first()
        .map_or_else(|| "default".to_string(), |first| format!("case {}", first.to_source()));

    let mut statements = entry.statements;
    if let [Node::Return(value)] = statements.as_mut_slice() {
        let value = value.take();
        statements[0] = Node::Yield(value);
    }

    let body = match statements.as_slice() {
        [single] => single.to_source().trim().to_string(),
        many => format!(
            "{{ {} }}",
            many.iter().map(Node::to_source).collect::<Vec<_>>().join("; ")
        ),
    };

    SwitchEntry {
        labels: entry.labels,
        statements: vec![Node::Splice(format!("{label} -> {body}"))],
        form: EntryForm::Colon,
    }
}

impl Transformer for SwitchTransformer {
    fn transformation_type(&self) -> TransformationType {
        TransformationType::SwitchModernization
    }

    fn apply(&self, root: Node, _context: &TransformContext<'_>) -> Result<(Node, usize)> {
        let mut rewrites = 0;
        let root = self.rewrite(root, &mut rewrites)?;
        tracing::debug!("Switch entries rewritten: {}", rewrites);
        Ok((root, rewrites))
    }
}
