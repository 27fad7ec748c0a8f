//! Example generating the units of a small themed view and its model.
//!
//! Run with: `cargo run --example generate`

use weft::prelude::*;

const SNAPSHOT: &str = r#"<snapshot>
    <declaration name="ProfileModel" namespace="Demo.Models" accessibility="public" partial="true">
        <member kind="field" name="_displayName" type="string" initializer="= &quot;guest&quot;">
            <annotation name="Observable"/>
        </member>
    </declaration>
    <declaration name="ProfileCard" namespace="Demo.Views" accessibility="public" partial="true" base="Control">
        <annotation name="DataContext" type="ProfileModel" namespace="Demo.Models"/>
        <annotation name="Clickable"/>
        <member kind="field" name="_accent" type="Brush" initializer="= Brushes.Gray">
            <annotation name="Hover"/>
            <annotation name="ThemeValue" variant="Demo.Themes.Dark" args="Brushes.White"/>
            <annotation name="ThemeValue" variant="Demo.Themes.Light" args="Brushes.Black"/>
        </member>
        <member kind="method" name="Initialize">
            <annotation name="OnConstruct"/>
        </member>
    </declaration>
</snapshot>"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = GeneratorConfig::default().with_extra_import("Demo.Themes");
    let report = generate_from_xml(SNAPSHOT, &config)?;

    for diagnostic in &report.diagnostics {
        eprintln!("{diagnostic}");
    }
    for unit in &report.units {
        println!("// ===== {} =====", unit.hint_name);
        println!("{}", unit.render());
    }
    Ok(())
}
