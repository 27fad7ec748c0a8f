//! Human-readable classification listing.

use std::fmt::Write;
use weft_analysis::{Analysis, DeclarationAnalysis, DeclarationFlags};

/// Names of the flags that are set, in a fixed order.
#[must_use]
pub fn flag_names(flags: &DeclarationFlags) -> Vec<&'static str> {
    [
        (flags.is_proxy_target, "proxy-target"),
        (flags.is_observable_model, "observable-model"),
        (flags.is_theme_aware, "theme-aware"),
        (flags.is_view_bound, "view-bound"),
        (flags.is_clickable, "clickable"),
        (flags.is_periodic_update, "periodic-update"),
        (flags.has_model_mapping, "model-mapping"),
        (flags.is_context_config, "context-config"),
        (flags.inherits_notification, "inherits-notification"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect()
}

/// Formats every candidate declaration with its flags, members, companions
/// and diagnostics.
#[must_use]
pub fn describe(analysis: &Analysis) -> String {
    let mut out = String::new();
    for declaration in &analysis.declarations {
        describe_declaration(&mut out, declaration);
    }
    out
}

fn describe_declaration(out: &mut String, declaration: &DeclarationAnalysis) {
    let _ = write!(out, "{}", declaration.qualified_name);
    match declaration.descriptor.as_ref() {
        None => {
            let _ = writeln!(out, " (failed)");
        }
        Some(descriptor) => {
            let _ = writeln!(out);
            let flags = flag_names(&descriptor.flags);
            if !flags.is_empty() {
                let _ = writeln!(out, "  flags: {}", flags.join(", "));
            }
            for member in &descriptor.members {
                let _ = writeln!(
                    out,
                    "  member: {} {} ({})",
                    member.type_name, member.public_name, member.storage_name
                );
            }
            for link in &descriptor.links {
                let target = link
                    .resolved
                    .as_ref()
                    .map_or_else(|| link.target.clone(), |t| t.qualified_name());
                let _ = writeln!(out, "  link: {:?} -> {target}", link.kind);
            }
            for plan in &declaration.plans {
                let names: Vec<_> = plan.companions.iter().map(|c| c.name.as_str()).collect();
                let _ = writeln!(out, "  companions of {}: {}", plan.member, names.join(", "));
            }
        }
    }
    for diagnostic in &declaration.diagnostics {
        let _ = writeln!(out, "  {diagnostic}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::GeneratorConfig;
    use weft_schema::parse_snapshot;

    #[test]
    fn test_describe_lists_flags_and_failures() {
        let xml = r#"<snapshot>
    <declaration name="Panel" namespace="App" partial="true" base="Control">
        <member kind="field" name="_background" type="Brush">
            <annotation name="Hover"/>
        </member>
    </declaration>
    <declaration name="Binding" namespace="App" partial="true">
        <annotation name="ContextConfig" view="Panel" model="Missing"/>
    </declaration>
</snapshot>"#;
        let snapshot = parse_snapshot(xml).expect("Failed to parse");
        let analysis = weft_analysis::analyze(&snapshot, &GeneratorConfig::default());

        let text = describe(&analysis);
        assert!(text.contains("App.Panel\n  flags: view-bound\n"));
        assert!(text.contains("  member: Brush Background (_background)\n"));
        assert!(text.contains("  companions of Background: HoveredBackground, NoHoveredBackground\n"));
        assert!(text.contains("App.Binding (failed)\n  error[WEFT003]"));
    }

    #[test]
    fn test_flag_names_order() {
        let flags = DeclarationFlags {
            is_clickable: true,
            is_proxy_target: true,
            ..DeclarationFlags::default()
        };
        assert_eq!(flag_names(&flags), vec!["proxy-target", "clickable"]);
    }
}
