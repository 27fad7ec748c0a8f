//! Annotation vocabulary.
//!
//! Names of the declarative annotations the classifier understands. The host
//! may spell any of them with an `Attribute` suffix; see [`matches`].

/// Member is observable; its declaration becomes an observable model.
pub const OBSERVABLE: &str = "Observable";
/// Member is emitted as a bindable-property descriptor.
pub const DEPENDENCY: &str = "Dependency";
/// Member reacts to pointer hover.
pub const HOVER: &str = "Hover";
/// Member keeps theme values per instance instead of per type.
pub const ISOLATED: &str = "Isolated";
/// Attaches one theme variant to a member.
pub const THEME_VALUE: &str = "ThemeValue";

/// Declaration is a proxy target.
pub const ASPECT: &str = "Aspect";
/// Declaration is theme-aware.
pub const THEME: &str = "Theme";
/// Declaration raises click events.
pub const CLICKABLE: &str = "Clickable";
/// Declaration updates periodically.
pub const PERIODIC_UPDATE: &str = "PeriodicUpdate";
/// View declaration paired with a model.
pub const DATA_CONTEXT: &str = "DataContext";
/// Model declaration convertible to a data-shape type.
pub const MODEL_READER: &str = "ModelReader";
/// Declaration carrying only a view/model binding.
pub const CONTEXT_CONFIG: &str = "ContextConfig";

/// Method runs on construction.
pub const ON_CONSTRUCT: &str = "OnConstruct";
/// Method runs on every periodic update.
pub const TICK: &str = "Tick";

/// Member annotations that make a field an annotated member.
pub const MEMBER_MARKERS: [&str; 5] = [OBSERVABLE, DEPENDENCY, HOVER, ISOLATED, THEME_VALUE];

/// Annotation argument names.
pub mod args {
    /// Theme variant type reference.
    pub const VARIANT: &str = "variant";
    /// Extra constructor text of a theme variant.
    pub const ARGS: &str = "args";
    /// Link target type name.
    pub const TYPE: &str = "type";
    /// Link namespace validation string.
    pub const NAMESPACE: &str = "namespace";
    /// Context-config view type name.
    pub const VIEW: &str = "view";
    /// Context-config model type name.
    pub const MODEL: &str = "model";
    /// Context-config view namespace.
    pub const VIEW_NAMESPACE: &str = "viewNamespace";
    /// Context-config model namespace.
    pub const MODEL_NAMESPACE: &str = "modelNamespace";
    /// Periodic update interval in milliseconds.
    pub const INTERVAL: &str = "interval";
}

/// Host contract implemented by change-notifying declarations.
pub const NOTIFY_CONTRACT: &str = "INotifyPropertyChanged";
/// Host contract implemented by theme-aware declarations.
pub const THEME_CONTRACT: &str = "IThemeApplied";

/// Suffix the host allows on annotation names.
const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// Returns true if an annotation spelled `written` refers to `known`.
///
/// Accepts the bare name, the `Attribute`-suffixed name, and either form
/// qualified by a namespace.
#[must_use]
pub fn matches(written: &str, known: &str) -> bool {
    let simple = written.rsplit('.').next().unwrap_or(written);
    let simple = simple.strip_suffix(ATTRIBUTE_SUFFIX).unwrap_or(simple);
    simple == known
}
