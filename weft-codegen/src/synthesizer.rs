//! Compilation unit synthesis.
//!
//! Assembles the section builders' output into one [`CodeUnit`] per
//! declaration. Synthesis is a pure function of the descriptor, its plans and
//! the configuration.

use crate::error::CodegenError;
use crate::ir::{CodeUnit, SectionKind, TypeNode};
use crate::sections::{
    CompanionGenerator, ConstructorGenerator, InteractionGenerator, ModelLinkGenerator,
    NotificationGenerator, PropertyGenerator, ProxyGenerator, SectionContext,
    ThemeContractGenerator,
};
use weft_analysis::{CompanionPlan, DeclarationDescriptor};
use weft_core::annotations::{NOTIFY_CONTRACT, THEME_CONTRACT};
use weft_core::{GeneratorConfig, naming};

/// Imports every generated unit starts with.
const BASE_IMPORTS: [&str; 4] = [
    "System",
    "System.Collections.Generic",
    "System.ComponentModel",
    "System.Runtime.CompilerServices",
];

/// Builds the compilation unit of one analysed declaration.
pub struct Synthesizer<'a> {
    descriptor: &'a DeclarationDescriptor,
    plans: &'a [CompanionPlan],
    config: &'a GeneratorConfig,
}

impl<'a> Synthesizer<'a> {
    /// Creates a new synthesizer.
    #[must_use]
    pub fn new(
        descriptor: &'a DeclarationDescriptor,
        plans: &'a [CompanionPlan],
        config: &'a GeneratorConfig,
    ) -> Self {
        Self {
            descriptor,
            plans,
            config,
        }
    }

    /// Synthesizes the unit.
    ///
    /// # Errors
    /// Returns `CodegenError::Unresolved` if a model link has no resolved
    /// target; such a declaration must never reach synthesis.
    pub fn synthesize(&self) -> Result<CodeUnit, CodegenError> {
        let descriptor = self.descriptor;
        if let Some(link) = descriptor.links.iter().find(|l| !l.is_resolved()) {
            return Err(CodegenError::Unresolved {
                declaration: descriptor.qualified_name(),
                target: link.target.clone(),
            });
        }

        let ctx = SectionContext::new(descriptor, self.plans, self.config);
        let mut node = TypeNode::new(
            descriptor.accessibility.keyword(),
            descriptor.kind.keyword(),
            &descriptor.name,
        );
        node.capabilities = self.capabilities();

        node.extend(
            SectionKind::Constructors,
            ConstructorGenerator::new(ctx).generate(),
        );
        node.extend(
            SectionKind::NotificationContract,
            NotificationGenerator::new(ctx).generate(),
        );
        node.extend(
            SectionKind::ThemeContract,
            ThemeContractGenerator::new(ctx).generate(),
        );
        let proxy = ProxyGenerator::new(ctx);
        node.extend(SectionKind::ProxySurface, proxy.generate());
        node.extend(
            SectionKind::InteractionSurface,
            InteractionGenerator::new(ctx).generate(),
        );
        node.extend(SectionKind::Properties, PropertyGenerator::new(ctx).generate());
        node.extend(SectionKind::Companions, CompanionGenerator::new(ctx).generate());
        node.extend(SectionKind::ModelLink, ModelLinkGenerator::new(ctx).generate());

        let unit = CodeUnit {
            hint_name: naming::hint_name(&descriptor.namespace, &descriptor.name),
            imports: self.imports(),
            namespace: descriptor.namespace.clone(),
            declaration: node,
            trailing: proxy.interface().into_iter().collect(),
        };

        tracing::debug!(
            declaration = %descriptor.qualified_name(),
            hint = %unit.hint_name,
            sections = unit.declaration.sections.len(),
            "synthesized unit"
        );
        Ok(unit)
    }

    /// Contracts the generated part adds to the declaration header.
    fn capabilities(&self) -> Vec<String> {
        let flags = self.descriptor.flags;
        if flags.is_context_config {
            return Vec::new();
        }

        let mut capabilities = Vec::new();
        if flags.needs_notification_contract() {
            capabilities.push(NOTIFY_CONTRACT.to_string());
        }
        if flags.is_theme_aware {
            capabilities.push(THEME_CONTRACT.to_string());
        }
        if flags.is_proxy_target {
            capabilities.push(naming::aspect_interface_name(&self.descriptor.name));
        }
        capabilities
    }

    /// Base imports, runtime namespace, configured extras, then the
    /// declaration's own usings. First occurrence wins.
    fn imports(&self) -> Vec<String> {
        let candidates = BASE_IMPORTS
            .iter()
            .copied()
            .chain([self.config.runtime_namespace()])
            .chain(self.config.extra_imports().iter().map(String::as_str))
            .chain(self.descriptor.usings.iter().map(String::as_str));

        let mut imports: Vec<String> = Vec::new();
        for import in candidates {
            if !import.is_empty() && !imports.iter().any(|i| i == import) {
                imports.push(import.to_string());
            }
        }
        imports
    }
}
