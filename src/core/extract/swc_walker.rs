//! swc-backed [`UsageWalker`].
//!
//! Recognised call shapes (marker names come from [`Markers`]):
//!
//! - scalar: a tagged template whose tag is `__` or `<expr>.__`
//! - plural: a tagged template whose tag is a call to `__p` or `<expr>.__p`
//!
//! ```text
//! __`hello ${name}`              -> scalar  "hello {1}"
//! i18n.with('pt').__`hello`      -> scalar  "hello"
//! __p(count)`# apples`           -> plural  "# apples"
//! ```

use std::sync::Arc;

use anyhow::Result;
use swc_common::SourceMap;
use swc_ecma_ast::{Callee, Expr, MemberProp, TaggedTpl, Tpl};
use swc_ecma_visit::{Visit, VisitWith};

use super::{Markers, TemplateUsage, UsageKind, UsageWalker};
use crate::core::parsers::jsx::parse_source;

/// Walker that parses each file with swc and visits its tagged templates.
#[derive(Debug, Clone, Default)]
pub struct SwcWalker {
    markers: Markers,
}

impl SwcWalker {
    pub fn new(markers: Markers) -> Self {
        Self { markers }
    }
}

impl UsageWalker for SwcWalker {
    fn walk(&self, file_name: &str, code: &str) -> Result<Vec<TemplateUsage>> {
        // Each call gets its own SourceMap so files can be walked on any thread.
        let source_map = Arc::new(SourceMap::default());
        let parsed = parse_source(code.to_string(), file_name, source_map)?;

        let mut collector = TaggedTemplateCollector {
            markers: &self.markers,
            usages: Vec::new(),
        };
        parsed.module.visit_with(&mut collector);

        Ok(collector.usages)
    }
}

struct TaggedTemplateCollector<'a> {
    markers: &'a Markers,
    usages: Vec<TemplateUsage>,
}

impl TaggedTemplateCollector<'_> {
    fn usage_kind(&self, tag: &Expr) -> Option<UsageKind> {
        if marker_name(tag) == Some(self.markers.scalar.as_str()) {
            return Some(UsageKind::Scalar);
        }

        if let Expr::Call(call) = tag
            && let Callee::Expr(callee) = &call.callee
            && marker_name(callee) == Some(self.markers.plural.as_str())
        {
            return Some(UsageKind::Plural);
        }

        None
    }
}

impl Visit for TaggedTemplateCollector<'_> {
    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        if let Some(kind) = self.usage_kind(&node.tag)
            && let Some(segments) = template_segments(&node.tpl)
        {
            self.usages.push(TemplateUsage::new(kind, segments));
        }

        // Templates can nest inside slot expressions.
        node.visit_children_with(self);
    }
}

/// Name of an identifier (`__`) or of the accessed property (`i18n.__`).
fn marker_name(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.as_str()),
        Expr::Member(member) => match &member.prop {
            MemberProp::Ident(prop) => Some(prop.sym.as_str()),
            _ => None,
        },
        _ => None,
    }
}

/// Cooked text of every quasi; `None` when a quasi has an invalid escape.
fn template_segments(tpl: &Tpl) -> Option<Vec<String>> {
    tpl.quasis
        .iter()
        .map(|quasi| {
            quasi
                .cooked
                .as_ref()
                .and_then(|cooked| cooked.as_str())
                .map(str::to_string)
        })
        .collect()
}
