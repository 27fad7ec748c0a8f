//! Section builders.
//!
//! Each builder reads the analysed declaration and returns the items of one
//! [`SectionKind`](crate::ir::SectionKind). Builders never look at each
//! other's output.

pub mod companions;
pub mod constructors;
pub mod contracts;
pub mod interaction;
pub mod model_link;
pub mod properties;
pub mod proxy;

pub use companions::CompanionGenerator;
pub use constructors::ConstructorGenerator;
pub use contracts::{NotificationGenerator, ThemeContractGenerator};
pub use interaction::InteractionGenerator;
pub use model_link::ModelLinkGenerator;
pub use properties::PropertyGenerator;
pub use proxy::ProxyGenerator;

use weft_analysis::{CompanionPlan, DeclarationDescriptor};
use weft_core::GeneratorConfig;

/// Runtime types the generated code calls into.
pub mod runtime {
    /// Creates interception proxies.
    pub const ASPECT_PROXY: &str = "AspectProxy";
    /// Toolkit bindable-property descriptor.
    pub const BINDABLE_PROPERTY: &str = "BindableProperty";
    /// Registers theme-aware instances.
    pub const THEME_MANAGER: &str = "ThemeManager";
    /// Theme-keyed value storage.
    pub const THEME_VALUES: &str = "ThemeValues";
    /// Animates between hovered and no-hovered values.
    pub const TRANSITION_BOARD: &str = "TransitionBoard";
    /// Pointer enter/leave/release wiring.
    pub const POINTER_TRACKER: &str = "PointerTracker";
    /// Periodic update timer.
    pub const UPDATE_TIMER: &str = "UpdateTimer";
}

/// Everything a section builder may read.
#[derive(Debug, Clone, Copy)]
pub struct SectionContext<'a> {
    /// Classified and resolved declaration.
    pub descriptor: &'a DeclarationDescriptor,
    /// Companion plans in member order.
    pub plans: &'a [CompanionPlan],
    /// Generator configuration.
    pub config: &'a GeneratorConfig,
}

impl<'a> SectionContext<'a> {
    /// Creates a context.
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

    /// Returns true if any planned member reacts to hover.
    #[must_use]
    pub fn has_hover(&self) -> bool {
        self.plans.iter().any(|p| p.can_hover)
    }

    /// Returns true if the declaration carries generated state.
    ///
    /// Context-config declarations only carry a binding.
    #[must_use]
    pub fn synthesizes_members(&self) -> bool {
        !self.descriptor.flags.is_context_config
    }

    /// Returns the statement raising a change notification for `name`, if
    /// setters notify.
    #[must_use]
    pub fn notify(&self, name: &str) -> Option<String> {
        self.descriptor
            .flags
            .raises_notifications()
            .then(|| format!("OnPropertyChanged(\"{name}\");"))
    }
}
