//! Click and periodic-update surface.

use super::{SectionContext, runtime};
use crate::ir::{Item, Stmt};

/// Generator for the interaction surface.
pub struct InteractionGenerator<'a> {
    ctx: SectionContext<'a>,
}

impl<'a> InteractionGenerator<'a> {
    /// Creates a new interaction generator.
    #[must_use]
    pub fn new(ctx: SectionContext<'a>) -> Self {
        Self { ctx }
    }

    /// Generates the click event and the periodic update timer surface.
    #[must_use]
    pub fn generate(&self) -> Vec<Item> {
        if !self.ctx.synthesizes_members() {
            return Vec::new();
        }
        let descriptor = self.ctx.descriptor;
        let mut items = Vec::new();

        if descriptor.flags.is_clickable {
            items.push(Item::Event {
                modifiers: "public".to_string(),
                type_name: "EventHandler?".to_string(),
                name: "Click".to_string(),
            });
            items.push(Item::method(
                "private",
                "void",
                "RaiseClick",
                Vec::new(),
                vec![Stmt::line("Click?.Invoke(this, EventArgs.Empty);")],
            ));
        }

        if descriptor.flags.is_periodic_update {
            items.push(Item::field(
                "private readonly",
                runtime::UPDATE_TIMER,
                "_updateTimer",
                None,
            ));
            items.push(Item::method(
                "public",
                "void",
                "StartUpdating",
                Vec::new(),
                vec![Stmt::line("_updateTimer.Start();")],
            ));
            items.push(Item::method(
                "public",
                "void",
                "StopUpdating",
                Vec::new(),
                vec![Stmt::line("_updateTimer.Stop();")],
            ));
            items.push(Item::method(
                "private",
                "void",
                "OnUpdateTick",
                Vec::new(),
                descriptor
                    .tick_methods
                    .iter()
                    .map(|method| Stmt::line(format!("{method}();")))
                    .collect(),
            ));
        }

        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::fixtures;
    use weft_core::GeneratorConfig;

    const XML: &str = r#"<snapshot>
    <declaration name="Clock" namespace="App" partial="true">
        <annotation name="Clickable"/>
        <member kind="method" name="Advance">
            <annotation name="Tick"/>
        </member>
        <member kind="method" name="Redraw">
            <annotation name="Tick"/>
        </member>
    </declaration>
</snapshot>"#;

    #[test]
    fn test_click_and_periodic_surface() {
        let analysis = fixtures::analysis(XML);
        let decl = fixtures::declaration(&analysis, "App.Clock");
        let descriptor = decl.descriptor.as_ref().expect("Missing descriptor");
        let config = GeneratorConfig::default();

        let items =
            InteractionGenerator::new(SectionContext::new(descriptor, &decl.plans, &config)).generate();
        let names: Vec<_> = items.iter().filter_map(Item::name).collect();
        assert_eq!(
            names,
            vec![
                "Click",
                "RaiseClick",
                "_updateTimer",
                "StartUpdating",
                "StopUpdating",
                "OnUpdateTick"
            ]
        );

        let Item::Method { body, .. } = &items[5] else {
            panic!("expected method");
        };
        assert_eq!(body, &vec![Stmt::line("Advance();"), Stmt::line("Redraw();")]);
    }
}
