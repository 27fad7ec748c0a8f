//! Hover and theme companion members.
//!
//! Every companion setter propagates into the expanded member:
//! - hovered values feed the member's transition board
//! - no-hovered values feed the board and, while no transition runs, the
//!   member itself
//! - themed values are persisted into theme storage and applied while their
//!   theme is active
//!
//! Theme-keyed propagation only touches the member while `CurrentTheme`
//! matches the companion's variant.

use super::properties::{bindable_property, change_callback};
use super::{SectionContext, runtime};
use crate::ir::{Accessor, Item, Param, Stmt};
use weft_analysis::{Companion, CompanionKind, CompanionPlan, Storage, ThemeScope};
use weft_core::naming;

/// Generator for hover/theme companions.
pub struct CompanionGenerator<'a> {
    ctx: SectionContext<'a>,
}

impl<'a> CompanionGenerator<'a> {
    /// Creates a new companion generator.
    #[must_use]
    pub fn new(ctx: SectionContext<'a>) -> Self {
        Self { ctx }
    }

    /// Generates transition boards, companions and the hover handler.
    #[must_use]
    pub fn generate(&self) -> Vec<Item> {
        if !self.ctx.synthesizes_members() {
            return Vec::new();
        }

        let mut items = Vec::new();
        for plan in self.ctx.plans {
            if plan.can_hover {
                items.push(Item::field(
                    "private readonly",
                    format!("{}<{}>", runtime::TRANSITION_BOARD, plan.type_name),
                    board_name(plan),
                    Some("new()".to_string()),
                ));
            }
            for companion in &plan.companions {
                items.extend(self.companion(plan, companion));
            }
        }

        if self.ctx.has_hover() {
            items.push(self.hover_handler());
        }
        items
    }

    fn companion(&self, plan: &CompanionPlan, companion: &Companion) -> Vec<Item> {
        let name = &companion.name;
        let ty = &plan.type_name;
        let mut propagation = self.propagation(plan, companion);
        propagation.extend(self.ctx.notify(name).map(Stmt::Line));

        match companion.storage {
            Storage::Bindable => {
                let default = if companion.default_value == "default" {
                    format!("default({ty})")
                } else {
                    companion.default_value.clone()
                };
                let mut items = bindable_property(
                    &self.ctx.descriptor.name,
                    name,
                    ty,
                    &default,
                    format!("On{name}Changed"),
                );
                items.push(change_callback(name, ty, propagation));
                items
            }
            Storage::Field => {
                let backing = naming::backing_field_name(name);
                let mut setter = vec![
                    Stmt::block(
                        format!("if (EqualityComparer<{ty}>.Default.Equals({backing}, value))"),
                        vec![Stmt::line("return;")],
                    ),
                    Stmt::line(format!("{backing} = value;")),
                ];
                setter.extend(propagation);

                vec![
                    Item::field(
                        "private",
                        ty,
                        &backing,
                        Some(companion.default_value.clone()),
                    ),
                    Item::Property {
                        modifiers: "public".to_string(),
                        type_name: ty.clone(),
                        name: name.clone(),
                        get: Accessor::Expr(backing),
                        set: Some(Accessor::Body(setter)),
                    },
                ]
            }
        }
    }

    /// Statements pushing a new companion `value` into the expanded member.
    fn propagation(&self, plan: &CompanionPlan, companion: &Companion) -> Vec<Stmt> {
        let board = board_name(plan);
        let member = &plan.member;

        let applied = match companion.kind {
            CompanionKind::Hovered => vec![Stmt::line(format!("{board}.Hovered = value;"))],
            CompanionKind::NoHovered => vec![
                Stmt::line(format!("{board}.NoHovered = value;")),
                Stmt::block(
                    format!("if (!{board}.IsTransitioning)"),
                    vec![Stmt::line(format!("{member} = value;"))],
                ),
            ],
            CompanionKind::Themed => vec![Stmt::line(format!("{member} = value;"))],
        };

        let Some(tag) = companion.variant.as_ref() else {
            return applied;
        };

        let mut statements = Vec::new();
        if companion.persists_theme_value() {
            let values = runtime::THEME_VALUES;
            statements.push(Stmt::line(match companion.scope {
                ThemeScope::Shared => format!(
                    "{values}.SetShared(typeof({}), typeof({}), \"{member}\", value);",
                    self.ctx.descriptor.name, tag.type_ref
                ),
                ThemeScope::Isolated => format!(
                    "{values}.SetIsolated(this, typeof({}), \"{member}\", value);",
                    tag.type_ref
                ),
            }));
        }
        statements.push(Stmt::block(
            format!("if (CurrentTheme == typeof({}))", tag.type_ref),
            applied,
        ));
        statements
    }

    fn hover_handler(&self) -> Item {
        let body = self
            .ctx
            .plans
            .iter()
            .filter(|p| p.can_hover)
            .map(|p| Stmt::line(format!("{} = {}.Transition(hovered);", p.member, board_name(p))))
            .collect();
        Item::method(
            "private",
            "void",
            "OnHoverChanged",
            vec![Param::new("bool", "hovered")],
            body,
        )
    }
}

/// Name of the transition board field of a hover member.
fn board_name(plan: &CompanionPlan) -> String {
    naming::backing_field_name(&format!("{}Board", plan.member))
}
