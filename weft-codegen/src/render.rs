//! The single formatter turning a [`CodeUnit`] into source text.

use crate::ir::{Accessor, CodeUnit, InterfaceNode, Item, Param, Stmt, TypeNode};

const INDENT: &str = "    ";

/// Marker line opening every generated unit.
pub const GENERATED_HEADER: &str = "// <auto-generated/>";

/// Renders a compilation unit.
#[must_use]
pub fn render(unit: &CodeUnit) -> String {
    let mut w = Writer::default();

    w.line(GENERATED_HEADER);
    w.line("#nullable enable");
    w.blank();

    for import in &unit.imports {
        w.line(&format!("using {import};"));
    }
    if !unit.imports.is_empty() {
        w.blank();
    }

    let scoped = !unit.namespace.is_empty();
    if scoped {
        w.line(&format!("namespace {}", unit.namespace));
        w.open();
    }

    w.declaration(&unit.declaration);
    for interface in &unit.trailing {
        w.blank();
        w.interface(interface);
    }

    if scoped {
        w.close();
    }

    w.output
}

#[derive(Default)]
struct Writer {
    output: String,
    depth: usize,
}

impl Writer {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.output.push_str(INDENT);
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn blank(&mut self) {
        self.output.push('\n');
    }

    fn open(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    fn declaration(&mut self, node: &TypeNode) {
        let mut header = format!("{} partial {} {}", node.accessibility, node.keyword, node.name);
        if !node.capabilities.is_empty() {
            header.push_str(" : ");
            header.push_str(&node.capabilities.join(", "));
        }
        self.line(&header);
        self.open();

        for (index, items) in node.sections.values().enumerate() {
            if index > 0 {
                self.blank();
            }
            let mut previous: Option<&Item> = None;
            for item in items {
                if previous.is_some_and(|prev| !is_compact_run(prev, item)) {
                    self.blank();
                }
                self.item(&node.name, item);
                previous = Some(item);
            }
        }

        self.close();
    }

    fn interface(&mut self, interface: &InterfaceNode) {
        self.line(&format!(
            "{} interface {}",
            interface.accessibility, interface.name
        ));
        self.open();
        for member in &interface.members {
            self.line(member);
        }
        self.close();
    }

    fn item(&mut self, owner: &str, item: &Item) {
        match item {
            Item::Field {
                modifiers,
                type_name,
                name,
                initializer,
            } => match initializer {
                Some(init) => self.line(&format!("{modifiers} {type_name} {name} = {init};")),
                None => self.line(&format!("{modifiers} {type_name} {name};")),
            },
            Item::Property {
                modifiers,
                type_name,
                name,
                get,
                set,
            } => self.property(modifiers, type_name, name, get, set.as_ref()),
            Item::Constructor {
                modifiers,
                params,
                body,
            } => {
                self.line(&format!("{modifiers} {owner}({})", params_list(params)));
                self.body(body);
            }
            Item::Method {
                modifiers,
                return_type,
                name,
                params,
                body,
            } => {
                self.line(&format!(
                    "{modifiers} {return_type} {name}({})",
                    params_list(params)
                ));
                self.body(body);
            }
            Item::Event {
                modifiers,
                type_name,
                name,
            } => self.line(&format!("{modifiers} event {type_name} {name};")),
            Item::PartialHook { name, params } => {
                self.line(&format!("partial void {name}({});", params_list(params)));
            }
        }
    }

    fn property(
        &mut self,
        modifiers: &str,
        type_name: &str,
        name: &str,
        get: &Accessor,
        set: Option<&Accessor>,
    ) {
        if let (Accessor::Expr(expr), None) = (get, set) {
            self.line(&format!("{modifiers} {type_name} {name} => {expr};"));
            return;
        }

        self.line(&format!("{modifiers} {type_name} {name}"));
        self.open();
        self.accessor("get", get);
        if let Some(set) = set {
            self.accessor("set", set);
        }
        self.close();
    }

    fn accessor(&mut self, keyword: &str, accessor: &Accessor) {
        match accessor {
            Accessor::Expr(expr) => self.line(&format!("{keyword} => {expr};")),
            Accessor::Body(body) => {
                self.line(keyword);
                self.body(body);
            }
        }
    }

    fn body(&mut self, body: &[Stmt]) {
        self.open();
        for stmt in body {
            self.stmt(stmt);
        }
        self.close();
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Line(text) => self.line(text),
            Stmt::Block { head, body } => {
                self.line(head);
                self.body(body);
            }
        }
    }
}

/// Fields, events and hooks of the same kind are written without blank lines
/// between them.
fn is_compact_run(previous: &Item, current: &Item) -> bool {
    matches!(
        (previous, current),
        (Item::Field { .. }, Item::Field { .. })
            | (Item::Event { .. }, Item::Event { .. })
            | (Item::PartialHook { .. }, Item::PartialHook { .. })
    )
}

fn params_list(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| format!("{} {}", p.type_name, p.name))
        .collect::<Vec<_>>()
        .join(", ")
}
