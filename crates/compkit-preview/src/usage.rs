//! Per-role usage examples.
//!
//! Each role gets a fixed scaffold built as an element tree and rendered to
//! `React.createElement` calls. Sub-parts the body defines (`CardHeader`,
//! `TableRow`, …) are taken from the registry; the rest fall back to plain
//! elements so the example always renders.

use crate::symbols::SymbolTable;
use crate::templates::js_string;
use compkit_core::Role;

/// Binding the mounted component is stored under in the render function.
pub const MOUNTED: &str = "Mounted";

/// What an element node renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// A symbol the body defines, looked up in the registry.
    Registry(String),
    /// A plain DOM element.
    Element(&'static str),
    /// A local binding of the preview script.
    Binding(&'static str),
}

/// A prop value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prop {
    Str(String),
    Bool(bool),
    Num(i64),
    /// JavaScript expression inserted as written.
    Expr(&'static str),
}

impl Prop {
    fn to_js(&self) -> String {
        match self {
            Self::Str(s) => js_string(s),
            Self::Bool(b) => b.to_string(),
            Self::Num(n) => n.to_string(),
            Self::Expr(e) => e.to_string(),
        }
    }
}

impl From<&str> for Prop {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// One node of an example tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element {
        tag: Tag,
        props: Vec<(&'static str, Prop)>,
        children: Vec<Node>,
    },
    Text(String),
}

impl Node {
    pub fn new(tag: Tag) -> Self {
        Self::Element {
            tag,
            props: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: &str) -> Self {
        Self::Text(text.to_string())
    }

    /// Builder-style prop.
    pub fn prop(mut self, key: &'static str, value: impl Into<Prop>) -> Self {
        if let Self::Element { props, .. } = &mut self {
            props.push((key, value.into()));
        }
        self
    }

    pub fn class(self, class_name: &str) -> Self {
        self.prop("className", class_name)
    }

    pub fn child(mut self, node: Node) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.push(node);
        }
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.extend(nodes);
        }
        self
    }

    /// Shorthand for a single text child.
    pub fn label(self, text: &str) -> Self {
        self.child(Node::text(text))
    }

    /// Render as nested `h(...)` calls.
    pub fn to_js(&self, indent: usize) -> String {
        let spaces = " ".repeat(indent);
        match self {
            Self::Text(text) => format!("{spaces}{}", js_string(text)),
            Self::Element { tag, props, children } => {
                let tag = match tag {
                    Tag::Registry(name) => format!("registry[{}]", js_string(name)),
                    Tag::Element(element) => js_string(element),
                    Tag::Binding(binding) => binding.to_string(),
                };
                let props = if props.is_empty() {
                    "null".to_string()
                } else {
                    let entries = props
                        .iter()
                        .map(|(key, value)| format!("{key}: {}", value.to_js()))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{{ {entries} }}")
                };

                match children.as_slice() {
                    [] => format!("{spaces}h({tag}, {props})"),
                    [Self::Text(text)] => format!("{spaces}h({tag}, {props}, {})", js_string(text)),
                    _ => {
                        let mut lines = vec![format!("{spaces}h("), format!("{spaces}  {tag},"), format!("{spaces}  {props},")];
                        let rendered = children
                            .iter()
                            .map(|child| child.to_js(indent + 2))
                            .collect::<Vec<_>>()
                            .join(",\n");
                        lines.push(rendered);
                        lines.push(format!("{spaces})"));
                        lines.join("\n")
                    }
                }
            }
        }
    }
}

/// A built example and the script helpers it relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub node: Node,
    pub uses_fallback_button: bool,
}

/// Builds the usage example for one role.
pub struct ExampleBuilder<'a> {
    table: &'a SymbolTable,
    uses_fallback_button: bool,
}

const STATS: &[(&str, &str, &str)] = &[
    ("Active sprints", "5", "+1"),
    ("Weekly velocity", "62 pts", "+8%"),
    ("Review queue", "12 PRs", "-3"),
];

const TEAMS: &[(&str, &str, &str, &str)] = &[
    ("Design", "Alice", "Active", "48 pts"),
    ("Frontend", "Leon", "In review", "56 pts"),
    ("QA", "Priya", "Pending", "58 pts"),
];

pub const MODAL_TITLE: &str = "Invite collaborators";
pub const MODAL_DESCRIPTION: &str = "Preview and refine the dialog appearance before shipping.";
pub const MODAL_BODY: &str = "This dialog stays open in the preview so you can inspect its overlay and focus styles.";
pub const MODAL_CANCEL: &str = "Cancel";
pub const MODAL_CONFIRM: &str = "Send invites";

impl<'a> ExampleBuilder<'a> {
    pub fn new(table: &'a SymbolTable) -> Self {
        Self {
            table,
            uses_fallback_button: false,
        }
    }

    /// Build the example for `role`, mounting [`MOUNTED`].
    pub fn build(mut self, role: Role) -> Example {
        let node = match role {
            Role::Button => self.button(),
            Role::Input => self.input(),
            Role::Textarea => self.textarea(),
            Role::Navbar => self.navbar(),
            Role::Modal => self.modal(),
            Role::Badge => self.badge(),
            Role::Card => self.card(),
            Role::Table => self.table(),
            Role::Component => mounted(),
        };
        Example {
            node,
            uses_fallback_button: self.uses_fallback_button,
        }
    }

    /// The body's own sub-part, or a plain element.
    fn part(&self, name: &str, fallback: &'static str) -> Tag {
        if self.table.defines(name) {
            Tag::Registry(name.to_string())
        } else {
            Tag::Element(fallback)
        }
    }

    fn has(&self, name: &str) -> bool {
        self.table.defines(name)
    }

    fn action_button(&mut self) -> Node {
        if self.has("Button") {
            Node::new(Tag::Registry("Button".to_string()))
        } else {
            self.uses_fallback_button = true;
            Node::new(Tag::Binding("FallbackButton"))
        }
    }

    fn button(&mut self) -> Node {
        Node::new(Tag::Element("div"))
            .class("flex w-full max-w-xs flex-col gap-2")
            .child(mounted().label("Primary"))
            .child(mounted().prop("variant", "secondary").label("Secondary"))
            .child(mounted().prop("variant", "outline").label("Outline"))
    }

    fn badge(&mut self) -> Node {
        Node::new(Tag::Element("div"))
            .class("flex flex-wrap items-center gap-2")
            .child(mounted().label("New"))
            .child(mounted().prop("variant", "secondary").label("Beta"))
            .child(mounted().prop("variant", "outline").label("Archived"))
    }

    fn input(&mut self) -> Node {
        Node::new(Tag::Element("div"))
            .class("flex w-full max-w-sm flex-col gap-2")
            .child(
                Node::new(Tag::Element("label"))
                    .class("text-sm font-medium text-foreground")
                    .label("Email"),
            )
            .child(
                mounted()
                    .prop("type", "email")
                    .prop("placeholder", "maria@example.com"),
            )
    }

    fn textarea(&mut self) -> Node {
        Node::new(Tag::Element("div"))
            .class("flex w-full max-w-sm flex-col gap-2")
            .child(
                Node::new(Tag::Element("label"))
                    .class("text-sm font-medium text-foreground")
                    .label("Message"),
            )
            .child(
                mounted()
                    .prop("rows", Prop::Num(4))
                    .prop("placeholder", "Tell us a little about your project"),
            )
    }

    fn navbar(&mut self) -> Node {
        Node::new(Tag::Element("div")).class("w-full max-w-4xl").child(mounted())
    }

    fn card(&mut self) -> Node {
        let title = Node::new(self.part("CardTitle", "h3"))
            .class("text-lg font-semibold text-foreground")
            .label("Project status");
        let description = Node::new(self.part("CardDescription", "p"))
            .class("text-sm text-muted-foreground")
            .label("Live metrics for your selected teams.");
        let manage = self
            .action_button()
            .prop("size", "sm")
            .prop("variant", "outline")
            .label("Manage");

        let header = if self.has("CardHeader") {
            let action = if self.has("CardAction") {
                Node::new(Tag::Registry("CardAction".to_string())).child(manage)
            } else {
                Node::new(Tag::Element("div"))
                    .class("col-start-2 row-span-2 row-start-1 self-start justify-self-end")
                    .child(manage)
            };
            Node::new(Tag::Registry("CardHeader".to_string()))
                .child(title)
                .child(description)
                .child(action)
        } else {
            Node::new(Tag::Element("div"))
                .class("flex items-start justify-between gap-4 px-6 pt-6")
                .child(
                    Node::new(Tag::Element("div"))
                        .class("space-y-1.5 text-left")
                        .child(title)
                        .child(description),
                )
                .child(manage)
        };

        let rows = STATS.iter().map(|(label, value, trend)| {
            Node::new(Tag::Element("div"))
                .prop("key", *label)
                .class("flex items-center justify-between rounded-md border border-dashed border-border/50 px-3 py-2")
                .child(Node::new(Tag::Element("div")).label(label))
                .child(
                    Node::new(Tag::Element("div"))
                        .class("text-right")
                        .child(
                            Node::new(Tag::Element("div"))
                                .class("font-medium text-foreground")
                                .label(value),
                        )
                        .child(
                            Node::new(Tag::Element("div"))
                                .class("text-xs text-muted-foreground")
                                .label(trend),
                        ),
                )
        });
        let content = Node::new(self.part("CardContent", "div"))
            .class("grid gap-4 px-6 pb-6 text-sm text-muted-foreground")
            .children(rows.collect::<Vec<_>>());

        let invite = self
            .action_button()
            .prop("variant", "secondary")
            .prop("size", "sm")
            .label("Invite");
        let report = self.action_button().prop("size", "sm").label("View report");
        let footer = Node::new(self.part("CardFooter", "div"))
            .class("flex items-center gap-2 px-6 pb-6")
            .child(invite)
            .child(report);

        mounted()
            .class("w-full max-w-sm")
            .child(header)
            .child(content)
            .child(footer)
    }

    fn modal(&mut self) -> Node {
        let title = Node::new(self.part("DialogTitle", "h3"))
            .class("text-lg font-semibold text-foreground")
            .label(MODAL_TITLE);
        let description = Node::new(self.part("DialogDescription", "p"))
            .class("text-sm text-muted-foreground")
            .label(MODAL_DESCRIPTION);
        let header = Node::new(self.part("DialogHeader", "div"))
            .class("space-y-1.5 text-left")
            .child(title)
            .child(description);

        let body = Node::new(Tag::Element("div"))
            .class("text-sm text-muted-foreground")
            .label(MODAL_BODY);

        let cancel = self.action_button().prop("variant", "outline").label(MODAL_CANCEL);
        let confirm = self.action_button().label(MODAL_CONFIRM);
        let footer = Node::new(self.part("DialogFooter", "div"))
            .class("flex justify-end gap-2 pt-4")
            .child(cancel)
            .child(confirm);

        let content = if self.has("DialogContent") {
            Node::new(Tag::Registry("DialogContent".to_string())).class("space-y-4 sm:max-w-md")
        } else {
            Node::new(Tag::Element("div"))
                .prop("role", "dialog")
                .class("w-full max-w-md space-y-4 rounded-lg border border-border bg-background p-6 shadow-lg")
        };
        let content = content.child(header).child(body).child(footer);

        let root = mounted().prop("open", Prop::Bool(true));
        let root = if self.has("DialogContent") {
            root
        } else {
            root.prop("isOpen", Prop::Bool(true)).prop("onClose", Prop::Expr("() => {}"))
        };
        root.child(content)
    }

    fn table(&mut self) -> Node {
        let row = |s: &Self| s.part("TableRow", "tr");
        let head = |s: &Self, label: &str| Node::new(s.part("TableHead", "th")).label(label);
        let cell = |s: &Self, label: &str| Node::new(s.part("TableCell", "td")).label(label);

        let caption = Node::new(self.part("TableCaption", "caption"))
            .class("px-2 text-sm text-muted-foreground")
            .label("Sprint health overview");

        let header = Node::new(self.part("TableHeader", "thead")).child(
            Node::new(row(self))
                .child(head(self, "Team"))
                .child(head(self, "Owner"))
                .child(head(self, "Status"))
                .child(head(self, "Velocity").class("text-right")),
        );

        let body_rows = TEAMS
            .iter()
            .map(|(team, owner, status, velocity)| {
                Node::new(row(self))
                    .prop("key", *team)
                    .child(cell(self, team))
                    .child(cell(self, owner))
                    .child(cell(self, status))
                    .child(cell(self, velocity).class("text-right font-medium"))
            })
            .collect::<Vec<_>>();
        let body = Node::new(self.part("TableBody", "tbody")).children(body_rows);

        let footer = Node::new(self.part("TableFooter", "tfoot")).child(
            Node::new(row(self))
                .child(cell(self, "Average velocity").prop("colSpan", Prop::Num(2)))
                .child(cell(self, "Across teams").class("text-right text-muted-foreground"))
                .child(cell(self, "54 pts").class("text-right font-semibold")),
        );

        mounted()
            .class("w-full max-w-2xl overflow-hidden rounded-lg border border-border/40")
            .child(caption)
            .child(header)
            .child(body)
            .child(footer)
    }
}

fn mounted() -> Node {
    Node::new(Tag::Binding(MOUNTED))
}
