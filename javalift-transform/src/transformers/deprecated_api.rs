//! Deprecated API rewrite
//!
//! Calls are rewritten in one walk, object creations in a second:
//!
//! | Match | Condition | Rewrite |
//! |---|---|---|
//! | `r.list(..)` | `r` is a `File` | `r.listFiles(..)` |
//! | `r.toURL(..)` | `r` is a `File` | `r.toURI().toURL(..)` |
//! | `getBytes(..)` | at least one argument | `getBytes(StandardCharsets.UTF_8)` |
//! | `r.newInstance(..)` | `r`'s type contains `Class` | `r.getDeclaredConstructor().newInstance(..)` |
//! | `new Date(..)` | | `new Instant(now())` |
//! | `new SecureRandom(..)` | | `SecureRandom.getInstanceStrong()` |
//!
//! A receiver whose type cannot be resolved fails the pass.

use super::{TransformContext, Transformer};
use crate::types::TransformationType;
use crate::{Result, TransformError};
use javalift_core::constants::{is_class_type, is_file_type, CHARSET_CONSTANT};
use javalift_core::models::{MethodCall, ObjectCreation};
use javalift_core::{Node, SymbolTable};

#[derive(Debug, Clone, Copy, Default)]
pub struct DeprecatedApiTransformer;

impl DeprecatedApiTransformer {
    pub const fn new() -> Self {
        Self
    }

    fn rewrite_calls(&self, node: Node, symbols: &SymbolTable, rewrites: &mut usize) -> Result<Node> {
        let node = match node {
            Node::MethodCall(call) => rewrite_call(call, symbols, rewrites)?,
            other => other,
        };
        node.try_map_children(&mut |child| self.rewrite_calls(child, symbols, rewrites))
    }

    fn rewrite_creations(&self, node: Node, rewrites: &mut usize) -> Result<Node> {
        let node = match node {
            Node::ObjectCreation(creation) => rewrite_creation(creation, rewrites),
            other => other,
        };
        node.try_map_children(&mut |child| self.rewrite_creations(child, rewrites))
    }
}

/// Resolved receiver type, or an error when a receiver exists but cannot
/// be typed. `None` when the call has no receiver.
fn receiver_type(call: &MethodCall, symbols: &SymbolTable) -> Result<Option<String>> {
    let Some(receiver) = call.receiver.as_deref() else {
        return Ok(None);
    };
    symbols
        .resolve_receiver(receiver)
        .map(Some)
        .ok_or_else(|| TransformError::UnresolvedReceiver {
            method: call.name.clone(),
            receiver: receiver.to_source(),
        })
}

/// Move the call's receiver under a new zero-argument call named `inner`.
fn chain_through(mut call: MethodCall, inner: &str) -> MethodCall {
    let receiver = call.receiver.take().map(|receiver| *receiver);
    let separator = std::mem::take(&mut call.separator);
    let mut inner_call = MethodCall::new(receiver, inner, Vec::new());
    inner_call.separator = separator;
    call.receiver = Some(Box::new(Node::MethodCall(inner_call)));
    call.separator = ".".to_string();
    call
}

fn rewrite_call(mut call: MethodCall, symbols: &SymbolTable, rewrites: &mut usize) -> Result<Node> {
    let rewritten = match call.name.as_str() {
        "list" => match receiver_type(&call, symbols)? {
            Some(ty) if is_file_type(&ty) => {
                call.name = "listFiles".to_string();
                true
            }
            _ => false,
        },
        "toURL" => match receiver_type(&call, symbols)? {
            Some(ty) if is_file_type(&ty) => {
                call = chain_through(call, "toURI");
                true
            }
            _ => false,
        },
        "getBytes" if !call.args.is_empty() => {
            call.args = vec![Node::identifier(CHARSET_CONSTANT)];
            true
        }
        "newInstance" => match receiver_type(&call, symbols)? {
            Some(ty) if is_class_type(&ty) => {
                call = chain_through(call, "getDeclaredConstructor");
                true
            }
            _ => false,
        },
        _ => false,
    };
    if rewritten {
        *rewrites += 1;
    }
    Ok(Node::MethodCall(call))
}

fn rewrite_creation(mut creation: ObjectCreation, rewrites: &mut usize) -> Node {
    match creation.type_name.as_str() {
        "Date" => {
            *rewrites += 1;
            creation.type_name = "Instant".to_string();
            creation.args = vec![Node::MethodCall(MethodCall::new(None, "now", Vec::new()))];
            Node::ObjectCreation(creation)
        }
        "SecureRandom" => {
            *rewrites += 1;
            Node::MethodCall(MethodCall::new(
                Some(Node::identifier(creation.type_name)),
                "getInstanceStrong",
                Vec::new(),
            ))
        }
        _ => Node::ObjectCreation(creation),
    }
}

impl Transformer for DeprecatedApiTransformer {
    fn transformation_type(&self) -> TransformationType {
        TransformationType::DeprecatedApi
    }

    fn apply(&self, root: Node, context: &TransformContext<'_>) -> Result<(Node, usize)> {
        let mut calls = 0;
        let root = self.rewrite_calls(root, context.symbols, &mut calls)?;
        let mut creations = 0;
        let root = self.rewrite_creations(root, &mut creations)?;
        tracing::debug!("Deprecated API rewrites: {} calls, {} creations", calls, creations);
        Ok((root, calls + creations))
    }
}
