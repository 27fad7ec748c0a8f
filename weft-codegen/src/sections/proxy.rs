//! Proxy surface and interception interface generation.

use super::SectionContext;
use crate::ir::{Accessor, InterfaceNode, Item};
use weft_analysis::SurfaceKind;
use weft_core::naming;
use weft_schema::Accessibility;

/// Generator for the proxy surface of a proxy target.
pub struct ProxyGenerator<'a> {
    ctx: SectionContext<'a>,
}

impl<'a> ProxyGenerator<'a> {
    /// Creates a new proxy generator.
    #[must_use]
    pub fn new(ctx: SectionContext<'a>) -> Self {
        Self { ctx }
    }

    fn is_enabled(&self) -> bool {
        self.ctx.synthesizes_members() && self.ctx.descriptor.flags.is_proxy_target
    }

    /// Generates the proxy field and the `Proxy` property.
    #[must_use]
    pub fn generate(&self) -> Vec<Item> {
        if !self.is_enabled() {
            return Vec::new();
        }
        let interface = naming::aspect_interface_name(&self.ctx.descriptor.name);

        vec![
            Item::field("private readonly", &interface, "_proxy", None),
            Item::Property {
                modifiers: "public".to_string(),
                type_name: interface,
                name: "Proxy".to_string(),
                get: Accessor::Expr("_proxy".to_string()),
                set: None,
            },
        ]
    }

    /// Generates the interception interface emitted after the declaration.
    ///
    /// It lists the declared public instance members followed by the
    /// generated member properties.
    #[must_use]
    pub fn interface(&self) -> Option<InterfaceNode> {
        if !self.is_enabled() {
            return None;
        }
        let descriptor = self.ctx.descriptor;

        let mut members: Vec<String> = descriptor
            .surface
            .iter()
            .map(|member| match member.kind {
                SurfaceKind::Property => format!("{} {} {{ get; }}", member.type_name, member.name),
                SurfaceKind::Method => {
                    let params = member
                        .parameters
                        .iter()
                        .map(|p| format!("{} {}", p.type_name, p.name))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{} {}({params});", member.type_name, member.name)
                }
            })
            .collect();
        members.extend(
            descriptor
                .members
                .iter()
                .map(|m| format!("{} {} {{ get; set; }}", m.type_name, m.public_name)),
        );

        let accessibility = match descriptor.accessibility {
            Accessibility::Public => "public",
            _ => "internal",
        };

        Some(InterfaceNode {
            accessibility: accessibility.to_string(),
            name: naming::aspect_interface_name(&descriptor.name),
            members,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::fixtures;
    use weft_core::GeneratorConfig;

    const XML: &str = r#"<snapshot>
    <declaration name="Service" namespace="App" accessibility="public" partial="true">
        <annotation name="Aspect"/>
        <member kind="field" name="_status" type="string">
            <annotation name="Observable"/>
        </member>
        <member kind="property" name="Name" type="string" accessibility="public"/>
        <member kind="method" name="Send" type="bool" accessibility="public">
            <parameter name="id" type="int"/>
            <parameter name="body" type="string"/>
        </member>
        <member kind="method" name="Helper"/>
    </declaration>
    <declaration name="Quiet" namespace="App" partial="true">
        <member kind="field" name="_status" type="string">
            <annotation name="Observable"/>
        </member>
    </declaration>
</snapshot>"#;

    #[test]
    fn test_proxy_surface_and_interface() {
        let analysis = fixtures::analysis(XML);
        let decl = fixtures::declaration(&analysis, "App.Service");
        let descriptor = decl.descriptor.as_ref().expect("Missing descriptor");
        let config = GeneratorConfig::default();
        let generator = ProxyGenerator::new(SectionContext::new(descriptor, &decl.plans, &config));

        let names: Vec<_> = generator.generate().iter().filter_map(|i| i.name().map(str::to_string)).collect();
        assert_eq!(names, vec!["_proxy", "Proxy"]);

        let interface = generator.interface().expect("Missing interface");
        assert_eq!(interface.name, "IServiceAspect");
        assert_eq!(interface.accessibility, "public");
        assert_eq!(
            interface.members,
            vec![
                "string Name { get; }",
                "bool Send(int id, string body);",
                "string Status { get; set; }",
            ]
        );
    }

    #[test]
    fn test_no_proxy_without_aspect() {
        let analysis = fixtures::analysis(XML);
        let decl = fixtures::declaration(&analysis, "App.Quiet");
        let descriptor = decl.descriptor.as_ref().expect("Missing descriptor");
        let config = GeneratorConfig::default();
        let generator = ProxyGenerator::new(SectionContext::new(descriptor, &decl.plans, &config));

        assert!(generator.generate().is_empty());
        assert!(generator.interface().is_none());
    }
}
