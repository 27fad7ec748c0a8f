//! Constructor overload generation.

use super::{SectionContext, runtime};
use crate::ir::{Item, Param, Stmt};
use weft_analysis::{ConstructorHook, LinkKind};
use weft_core::naming;

/// Generator for constructor overloads.
pub struct ConstructorGenerator<'a> {
    ctx: SectionContext<'a>,
}

impl<'a> ConstructorGenerator<'a> {
    /// Creates a new constructor generator.
    #[must_use]
    pub fn new(ctx: SectionContext<'a>) -> Self {
        Self { ctx }
    }

    /// Generates one overload per distinct hook parameter-type signature.
    ///
    /// Without hooks a single parameterless constructor is emitted when the
    /// prologue is not empty.
    #[must_use]
    pub fn generate(&self) -> Vec<Item> {
        if !self.ctx.synthesizes_members() {
            return Vec::new();
        }

        let prologue = self.prologue();
        let groups = group_by_signature(&self.ctx.descriptor.constructor_hooks);

        if groups.is_empty() {
            if prologue.is_empty() {
                return Vec::new();
            }
            return vec![Item::Constructor {
                modifiers: "public".to_string(),
                params: Vec::new(),
                body: prologue,
            }];
        }

        groups
            .into_iter()
            .map(|group| {
                let params: Vec<Param> = group[0]
                    .parameters
                    .iter()
                    .map(|p| Param::new(&p.type_name, &p.name))
                    .collect();
                let arguments = params
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");

                let mut body = prologue.clone();
                for hook in group {
                    body.push(Stmt::line(format!("{}({arguments});", hook.method)));
                }

                Item::Constructor {
                    modifiers: "public".to_string(),
                    params,
                    body,
                }
            })
            .collect()
    }

    /// Fixed prologue shared by every overload.
    fn prologue(&self) -> Vec<Stmt> {
        let descriptor = self.ctx.descriptor;
        let flags = descriptor.flags;
        let mut body = Vec::new();

        if flags.is_proxy_target {
            body.push(Stmt::line(format!(
                "_proxy = {}.Create<{}>(this);",
                runtime::ASPECT_PROXY,
                naming::aspect_interface_name(&descriptor.name)
            )));
        }

        if flags.is_theme_aware {
            body.push(Stmt::line(format!(
                "{}.Register(this);",
                runtime::THEME_MANAGER
            )));
        }

        if let Some(target) = descriptor
            .link(LinkKind::ViewModel)
            .and_then(|l| l.resolved.as_ref())
        {
            body.push(Stmt::line(format!(
                "DataContext = new {}();",
                target.qualified_name()
            )));
        }

        if self.ctx.has_hover() {
            body.push(Stmt::line(format!(
                "{}.Track(this, OnHoverChanged);",
                runtime::POINTER_TRACKER
            )));
        }
        if flags.is_clickable {
            body.push(Stmt::line(format!(
                "{}.OnRelease(this, RaiseClick);",
                runtime::POINTER_TRACKER
            )));
        }

        if flags.is_periodic_update {
            body.push(Stmt::line(format!(
                "_updateTimer = new {}(TimeSpan.FromMilliseconds({}), OnUpdateTick);",
                runtime::UPDATE_TIMER,
                descriptor.tick_interval_ms
            )));
        }

        body
    }
}

/// Groups hooks by parameter-type signature, in first-appearance order.
fn group_by_signature(hooks: &[ConstructorHook]) -> Vec<Vec<&ConstructorHook>> {
    let mut groups: Vec<Vec<&ConstructorHook>> = Vec::new();
    for hook in hooks {
        let signature = hook.signature();
        match groups.iter().position(|g| g[0].signature() == signature) {
            Some(index) => groups[index].push(hook),
            None => groups.push(vec![hook]),
        }
    }
    groups
}
