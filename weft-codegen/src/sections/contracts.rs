//! Change-notification and theme-lifecycle contract implementations.

use super::SectionContext;
use crate::ir::{Accessor, Item, Param, Stmt};
use weft_analysis::CompanionKind;
use weft_core::naming;

/// Name of the private field recording the active theme.
const CURRENT_THEME_FIELD: &str = "_currentTheme";

/// Generator for the change-notification contract.
pub struct NotificationGenerator<'a> {
    ctx: SectionContext<'a>,
}

impl<'a> NotificationGenerator<'a> {
    /// Creates a new notification generator.
    #[must_use]
    pub fn new(ctx: SectionContext<'a>) -> Self {
        Self { ctx }
    }

    /// Generates the contract, unless an ancestor already provides it.
    #[must_use]
    pub fn generate(&self) -> Vec<Item> {
        if !self.ctx.synthesizes_members() || !self.ctx.descriptor.flags.needs_notification_contract()
        {
            return Vec::new();
        }

        vec![
            Item::Event {
                modifiers: "public".to_string(),
                type_name: "PropertyChangedEventHandler?".to_string(),
                name: "PropertyChanged".to_string(),
            },
            Item::method(
                "protected",
                "void",
                "OnPropertyChanged",
                vec![Param::new(
                    "[CallerMemberName] string?",
                    "propertyName = null",
                )],
                vec![Stmt::line(
                    "PropertyChanged?.Invoke(this, new PropertyChangedEventArgs(propertyName));",
                )],
            ),
        ]
    }
}

/// Generator for the theme-lifecycle contract.
pub struct ThemeContractGenerator<'a> {
    ctx: SectionContext<'a>,
}

impl<'a> ThemeContractGenerator<'a> {
    /// Creates a new theme contract generator.
    #[must_use]
    pub fn new(ctx: SectionContext<'a>) -> Self {
        Self { ctx }
    }

    /// Generates `CurrentTheme`, `ApplyTheme` and the lifecycle hooks.
    #[must_use]
    pub fn generate(&self) -> Vec<Item> {
        if !self.ctx.synthesizes_members() || !self.ctx.descriptor.flags.is_theme_aware {
            return Vec::new();
        }

        let mut body = vec![
            Stmt::block(
                format!("if ({CURRENT_THEME_FIELD} == theme)"),
                vec![Stmt::line("return;")],
            ),
            Stmt::line("OnThemeChanging(theme);"),
            Stmt::line(format!("{CURRENT_THEME_FIELD} = theme;")),
        ];
        body.extend(self.restore_statements());
        body.push(Stmt::line("OnThemeChanged(theme);"));
        body.extend(self.ctx.notify("CurrentTheme").map(Stmt::Line));

        vec![
            Item::field("private", "Type?", CURRENT_THEME_FIELD, None),
            Item::Property {
                modifiers: "public".to_string(),
                type_name: "Type?".to_string(),
                name: "CurrentTheme".to_string(),
                get: Accessor::Expr(CURRENT_THEME_FIELD.to_string()),
                set: None,
            },
            Item::method(
                "public",
                "void",
                "ApplyTheme",
                vec![Param::new("Type", "theme")],
                body,
            ),
            Item::PartialHook {
                name: "OnThemeChanging".to_string(),
                params: vec![Param::new("Type", "theme")],
            },
            Item::PartialHook {
                name: "OnThemeChanged".to_string(),
                params: vec![Param::new("Type", "theme")],
            },
        ]
    }

    /// Statements pushing each theme's stored companion values into the base
    /// members once that theme becomes active.
    fn restore_statements(&self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        for plan in self.ctx.plans {
            let board = naming::backing_field_name(&format!("{}Board", plan.member));
            for companion in &plan.companions {
                let Some(tag) = companion.variant.as_ref() else {
                    continue;
                };
                let mut body = Vec::new();
                match companion.kind {
                    CompanionKind::Hovered => {
                        body.push(Stmt::line(format!("{board}.Hovered = {};", companion.name)));
                    }
                    CompanionKind::NoHovered => {
                        body.push(Stmt::line(format!("{board}.NoHovered = {};", companion.name)));
                        body.push(Stmt::line(format!("{} = {};", plan.member, companion.name)));
                    }
                    CompanionKind::Themed => {
                        body.push(Stmt::line(format!("{} = {};", plan.member, companion.name)));
                    }
                }
                statements.push(Stmt::block(
                    format!("if (theme == typeof({}))", tag.type_ref),
                    body,
                ));
            }
        }
        statements
    }
}
