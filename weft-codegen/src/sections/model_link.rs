//! View/model link surface.

use super::SectionContext;
use crate::ir::{Accessor, Item, Param, Stmt};
use weft_analysis::{LinkKind, LinkTarget, SurfaceKind};
use weft_core::naming;

/// Generator for the model-link surface.
pub struct ModelLinkGenerator<'a> {
    ctx: SectionContext<'a>,
}

impl<'a> ModelLinkGenerator<'a> {
    /// Creates a new model-link generator.
    #[must_use]
    pub fn new(ctx: SectionContext<'a>) -> Self {
        Self { ctx }
    }

    /// Generates the typed model accessor, the model-reader conversion and
    /// the context-config binding method. Unresolved links produce nothing.
    #[must_use]
    pub fn generate(&self) -> Vec<Item> {
        let descriptor = self.ctx.descriptor;
        let resolved = move |kind: LinkKind| {
            descriptor
                .link(kind)
                .and_then(|link| link.resolved.as_ref())
        };

        let mut items = Vec::new();
        if let Some(model) = resolved(LinkKind::ViewModel) {
            let model_name = model.qualified_name();
            items.push(Item::Property {
                modifiers: "public".to_string(),
                type_name: model_name.clone(),
                name: "Model".to_string(),
                get: Accessor::Expr(format!("({model_name})DataContext")),
                set: None,
            });
        }
        if let Some(shape) = resolved(LinkKind::ModelReader) {
            items.push(self.reader(shape));
        }
        if let (Some(view), Some(model)) = (
            resolved(LinkKind::ContextView),
            resolved(LinkKind::ContextModel),
        ) {
            items.push(Item::method(
                "public static",
                "void",
                "Bind",
                vec![Param::new(view.qualified_name(), "view")],
                vec![Stmt::line(format!(
                    "view.DataContext = new {}();",
                    model.qualified_name()
                ))],
            ));
        }
        items
    }

    /// Conversion copying every same-named member into a new data-shape
    /// instance.
    fn reader(&self, shape: &LinkTarget) -> Item {
        let descriptor = self.ctx.descriptor;
        let shape_name = shape.qualified_name();
        let source_has = |name: &str| {
            descriptor.members.iter().any(|m| m.public_name == name)
                || descriptor
                    .surface
                    .iter()
                    .any(|s| s.kind == SurfaceKind::Property && s.name == name)
        };

        let mut body = vec![Stmt::line(format!("var result = new {shape_name}();"))];
        body.extend(
            shape
                .members
                .iter()
                .filter(|m| source_has(&m.public_name))
                .map(|m| Stmt::line(format!("result.{0} = {0};", m.public_name))),
        );
        body.push(Stmt::line("return result;"));

        Item::method(
            "public",
            shape_name,
            naming::reader_method_name(&shape.name),
            Vec::new(),
            body,
        )
    }
}
