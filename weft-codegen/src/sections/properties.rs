//! Per-member generated properties.
//!
//! Members marked `Dependency` become bindable-property descriptors; every
//! other member gets a field-backed property whose setter runs partial
//! changing/changed hooks and raises change notification.

use super::{SectionContext, runtime};
use crate::ir::{Accessor, Item, Param, Stmt};
use weft_analysis::MemberDescriptor;
use weft_core::naming;

/// Generator for member properties.
pub struct PropertyGenerator<'a> {
    ctx: SectionContext<'a>,
}

impl<'a> PropertyGenerator<'a> {
    /// Creates a new property generator.
    #[must_use]
    pub fn new(ctx: SectionContext<'a>) -> Self {
        Self { ctx }
    }

    /// Generates one property per member, in declaration order.
    #[must_use]
    pub fn generate(&self) -> Vec<Item> {
        if !self.ctx.synthesizes_members() {
            return Vec::new();
        }

        let mut items = Vec::new();
        for member in &self.ctx.descriptor.members {
            if member.flags.can_dependency {
                items.extend(self.bindable(member));
            } else {
                items.extend(self.notifying(member));
            }
        }
        items
    }

    fn notifying(&self, member: &MemberDescriptor) -> Vec<Item> {
        let name = &member.public_name;
        let storage = &member.storage_name;
        let ty = &member.type_name;

        let mut setter = vec![
            Stmt::block(
                format!("if (EqualityComparer<{ty}>.Default.Equals({storage}, value))"),
                vec![Stmt::line("return;")],
            ),
            Stmt::line(format!("On{name}Changing(value);")),
            Stmt::line(format!("{storage} = value;")),
            Stmt::line(format!("On{name}Changed(value);")),
        ];
        setter.extend(self.ctx.notify(name).map(Stmt::Line));

        vec![
            Item::Property {
                modifiers: "public".to_string(),
                type_name: ty.clone(),
                name: name.clone(),
                get: Accessor::Expr(storage.clone()),
                set: Some(Accessor::Body(setter)),
            },
            Item::hook(format!("On{name}Changing"), ty),
            Item::hook(format!("On{name}Changed"), ty),
        ]
    }

    fn bindable(&self, member: &MemberDescriptor) -> Vec<Item> {
        let owner = &self.ctx.descriptor.name;
        let name = &member.public_name;
        let ty = &member.type_name;
        let default = member
            .default_expression()
            .map_or_else(|| format!("default({ty})"), str::to_string);

        bindable_property(owner, name, ty, &default, format!("On{name}Changed"))
            .into_iter()
            .chain([Item::hook(format!("On{name}Changed"), ty)])
            .collect()
    }
}

/// Descriptor field and wrapper property of a bindable property whose change
/// callback invokes `callback(value)`.
pub(crate) fn bindable_property(
    owner: &str,
    name: &str,
    ty: &str,
    default: &str,
    callback: String,
) -> Vec<Item> {
    let descriptor = naming::descriptor_name(name);
    let bindable = runtime::BINDABLE_PROPERTY;
    vec![
        Item::field(
            "public static readonly",
            bindable,
            &descriptor,
            Some(format!(
                "{bindable}.Register(nameof({name}), typeof({ty}), typeof({owner}), {default}, \
                 (d, o, n) => (({owner})d).{callback}(({ty})n))"
            )),
        ),
        Item::Property {
            modifiers: "public".to_string(),
            type_name: ty.to_string(),
            name: name.to_string(),
            get: Accessor::Expr(format!("({ty})GetValue({descriptor})")),
            set: Some(Accessor::Expr(format!("SetValue({descriptor}, value)"))),
        },
    ]
}

/// Private change callback of a bindable companion.
pub(crate) fn change_callback(name: &str, ty: &str, body: Vec<Stmt>) -> Item {
    Item::method(
        "private",
        "void",
        format!("On{name}Changed"),
        vec![Param::new(ty, "value")],
        body,
    )
}
