//! Stand-in primitives for symbols a component uses but does not define.
//!
//! Every stand-in is a JavaScript binding placed in the injection scope the
//! component body is evaluated in. Nothing is attached to `window`.

use crate::symbols::SymbolTable;
use crate::templates::js_string;
use indexmap::IndexSet;
use tracing::trace;

/// Namespaces that get the eight dialog primitives.
const DIALOG_NAMESPACES: &[&str] = &["DialogPrimitive", "AlertDialogPrimitive", "SheetPrimitive"];

/// Bare dialog primitive names and the namespace member they stand in for.
const DIALOG_PARTS: &[(&str, &str)] = &[
    ("Dialog", "Root"),
    ("DialogTrigger", "Trigger"),
    ("DialogPortal", "Portal"),
    ("DialogClose", "Close"),
    ("DialogOverlay", "Overlay"),
    ("DialogContent", "Content"),
    ("DialogTitle", "Title"),
    ("DialogDescription", "Description"),
];

/// React members a body may use without the `React.` prefix.
const REACT_BINDINGS: &[&str] = &[
    "useState",
    "useEffect",
    "useLayoutEffect",
    "useRef",
    "useMemo",
    "useCallback",
    "useContext",
    "useReducer",
    "useId",
    "useTransition",
    "useDeferredValue",
    "useImperativeHandle",
    "forwardRef",
    "memo",
    "createContext",
    "cloneElement",
    "isValidElement",
    "Children",
    "Fragment",
];

/// Element a forwarding stand-in renders for well-known component names.
const ELEMENT_TAGS: &[(&str, &str)] = &[
    ("Button", "button"),
    ("Input", "input"),
    ("Textarea", "textarea"),
    ("Label", "label"),
    ("Link", "a"),
    ("Image", "img"),
];

const CN_SOURCE: &str = r#"const cn = (...inputs) => {
  const flatten = (value) => {
    if (!value) return [];
    if (Array.isArray(value)) return value.flatMap(flatten);
    if (typeof value === "object") {
      return Object.entries(value)
        .filter(([, enabled]) => Boolean(enabled))
        .map(([name]) => name);
    }
    return [String(value)];
  };
  return inputs.flatMap(flatten).join(" ").trim();
};"#;

const CVA_SOURCE: &str = r#"const cva = (base = "", config = {}) => {
  const { variants = {}, defaultVariants = {}, compoundVariants = [] } = config;
  const classList = (value) => {
    if (!value) return [];
    if (Array.isArray(value)) return value.flatMap(classList);
    if (typeof value === "object") return Object.values(value).flatMap(classList);
    return [String(value)];
  };
  return ({ className, class: classProp, ...props } = {}) => {
    const selected = { ...defaultVariants };
    Object.entries(props).forEach(([name, value]) => {
      if (value !== undefined) selected[name] = value;
    });
    const classes = classList(base);
    Object.entries(variants).forEach(([name, options]) => {
      const value = selected[name];
      if (value == null || !options) return;
      classes.push(...classList(options[String(value)]));
    });
    compoundVariants.forEach(({ class: compoundClass, className: compoundClassName, ...conditions }) => {
      const matches = Object.entries(conditions).every(([name, expected]) =>
        Array.isArray(expected) ? expected.includes(selected[name]) : selected[name] === expected
      );
      if (matches) classes.push(...classList(compoundClass), ...classList(compoundClassName));
    });
    classes.push(...classList(className), ...classList(classProp));
    return classes.join(" ").trim();
  };
};"#;

const SLOT_SOURCE: &str = r#"const Slot = React.forwardRef(({ children, ...props }, ref) => {
  if (!React.isValidElement(children)) return children ?? null;
  const className = [props.className, children.props.className].filter(Boolean).join(" ");
  return React.cloneElement(children, {
    ...props,
    ...children.props,
    className: className || undefined,
    ref,
  });
});"#;

/// Helpers every document carries.
pub const BASE_HELPERS: &str = r##"const createPrimitive = (tag, displayName) => {
  const Primitive = React.forwardRef((props, ref) => h(tag, { ref, ...props }));
  Primitive.displayName = displayName || tag;
  return Primitive;
};

const renderMissing = (name) =>
  h(
    "div",
    {
      style: {
        padding: "1.5rem",
        border: "1px dashed hsl(var(--border, 214 32% 91%))",
        borderRadius: "0.5rem",
        color: "hsl(var(--muted-foreground, 215 16% 47%))",
        fontFamily: "Inter, system-ui, sans-serif",
        fontSize: "0.875rem",
      },
    },
    'Component "' + name + '" is not exported in this file.'
  );

const renderError = (error) =>
  h(
    "div",
    { style: { color: "#b91c1c", padding: "20px", fontFamily: "ui-monospace, monospace", whiteSpace: "pre-wrap" } },
    "Error: " + (error && error.message ? error.message : String(error))
  );"##;

/// Plain button used by examples when the body defines no `Button`.
pub const FALLBACK_BUTTON: &str = r#"const FallbackButton = React.forwardRef(({ children, variant, size, ...props }, ref) =>
  h(
    "button",
    {
      ref,
      type: "button",
      className:
        "inline-flex items-center justify-center gap-2 rounded-md border border-border bg-secondary px-3 py-1.5 text-sm font-medium text-secondary-foreground shadow-xs",
      ...props,
    },
    children ?? "Button"
  )
);"#;

const ICON_FACTORY: &str = r#"const createIcon = (displayName) => {
  const Icon = React.forwardRef(({ size = 24, strokeWidth = 2, ...props }, ref) =>
    h(
      "svg",
      {
        ref,
        role: "img",
        width: size,
        height: size,
        viewBox: "0 0 24 24",
        fill: "none",
        stroke: "currentColor",
        strokeWidth,
        strokeLinecap: "round",
        strokeLinejoin: "round",
        ...props,
      },
      h("circle", { cx: 12, cy: 12, r: 10, opacity: 0.08 })
    )
  );
  Icon.displayName = displayName;
  return Icon;
};"#;

const DIALOG_FACTORY: &str = r#"const createDialogNamespace = () => ({
  Root: ({ open, defaultOpen, onOpenChange, modal, ...props }) => h("div", props),
  Trigger: createPrimitive("button", "Trigger"),
  Portal: ({ children }) => h(React.Fragment, null, children),
  Close: createPrimitive("button", "Close"),
  Overlay: createPrimitive("div", "Overlay"),
  Content: createPrimitive("div", "Content"),
  Title: createPrimitive("h2", "Title"),
  Description: createPrimitive("p", "Description"),
});

const dialogParts = createDialogNamespace();"#;

const NAMESPACE_FACTORY: &str = r#"const createNamespace = (namespace) => {
  const members = {};
  return new Proxy(members, {
    get: (target, key) => {
      if (typeof key !== "string") return undefined;
      if (!(key in target)) {
        const tag = key === "Trigger" || key === "Close" ? "button" : "div";
        target[key] = createPrimitive(tag, namespace + "." + key);
      }
      return target[key];
    },
  });
};"#;

/// What a stand-in provides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StandInKind {
    /// Conditional class-name composer.
    ClassComposer,
    /// Styling-variant builder.
    VariantBuilder,
    /// Forwarding wrapper that merges its props onto its child.
    Slot,
    /// Namespace holding the eight dialog primitives.
    DialogNamespace,
    /// Namespace whose members are created on first access.
    Namespace,
    /// One dialog primitive under its bare name.
    DialogPart(&'static str),
    /// Member of the `React` global.
    ReactBinding,
    /// Inert svg icon.
    Icon,
    /// Forwarding wrapper around a plain element.
    Element(&'static str),
}

/// One injected binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandIn {
    pub name: String,
    pub kind: StandInKind,
}

impl StandIn {
    /// JavaScript declaring the binding.
    pub fn definition(&self) -> String {
        let name = &self.name;
        match &self.kind {
            StandInKind::ClassComposer => CN_SOURCE.to_string(),
            StandInKind::VariantBuilder => CVA_SOURCE.to_string(),
            StandInKind::Slot => SLOT_SOURCE.to_string(),
            StandInKind::DialogNamespace => format!("const {name} = createDialogNamespace();"),
            StandInKind::Namespace => format!("const {name} = createNamespace({});", js_string(name)),
            StandInKind::DialogPart(part) => format!("const {name} = dialogParts.{part};"),
            StandInKind::ReactBinding => format!("const {name} = React.{name};"),
            StandInKind::Icon => format!("const {name} = createIcon({});", js_string(name)),
            StandInKind::Element(tag) => {
                format!("const {name} = createPrimitive({}, {});", js_string(tag), js_string(name))
            }
        }
    }
}

/// The stand-ins chosen for one body, in injection order.
#[derive(Debug, Clone, Default)]
pub struct StandInSet {
    entries: Vec<StandIn>,
    names: IndexSet<String>,
}

impl StandInSet {
    /// Choose stand-ins for the symbols `table` references but does not
    /// define. `icon_imports` are names imported from icon modules.
    pub fn plan(table: &SymbolTable, icon_imports: &[String]) -> Self {
        let mut set = Self::default();
        let missing = |name: &str| table.references(name) && !table.defines(name);

        if missing("cn") {
            set.push("cn", StandInKind::ClassComposer);
        }
        if missing("cva") {
            set.push("cva", StandInKind::VariantBuilder);
        }
        if missing("Slot") {
            set.push("Slot", StandInKind::Slot);
        }

        for namespace in table.namespaces() {
            if namespace == "React" || table.defines(namespace) {
                continue;
            }
            if DIALOG_NAMESPACES.contains(&namespace) {
                set.push(namespace, StandInKind::DialogNamespace);
            } else {
                set.push(namespace, StandInKind::Namespace);
            }
        }

        for &(name, part) in DIALOG_PARTS {
            if missing(name) {
                set.push(name, StandInKind::DialogPart(part));
            }
        }

        for &name in REACT_BINDINGS {
            if missing(name) {
                set.push(name, StandInKind::ReactBinding);
            }
        }

        for name in icon_imports {
            if missing(name.as_str()) {
                set.push(name, StandInKind::Icon);
            }
        }

        for tag in table.jsx_tags() {
            if tag == "React" || table.declares(tag) || set.contains(tag) {
                continue;
            }
            if tag.ends_with("Icon") {
                set.push(tag, StandInKind::Icon);
            } else {
                let element = ELEMENT_TAGS
                    .iter()
                    .find(|(name, _)| *name == tag)
                    .map_or("div", |(_, element)| *element);
                set.push(tag, StandInKind::Element(element));
            }
        }

        set
    }

    fn push(&mut self, name: &str, kind: StandInKind) {
        if self.names.insert(name.to_string()) {
            trace!(name, ?kind, "stand-in planned");
            self.entries.push(StandIn {
                name: name.to_string(),
                kind,
            });
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StandIn> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }

    fn needs(&self, pred: impl Fn(&StandInKind) -> bool) -> bool {
        self.entries.iter().any(|entry| pred(&entry.kind))
    }

    /// Factories the planned definitions call, followed by the definitions.
    pub fn render(&self) -> String {
        let mut sections: Vec<String> = Vec::new();

        if self.needs(|k| matches!(k, StandInKind::Icon)) {
            sections.push(ICON_FACTORY.to_string());
        }
        if self.needs(|k| matches!(k, StandInKind::DialogNamespace | StandInKind::DialogPart(_))) {
            sections.push(DIALOG_FACTORY.to_string());
        }
        if self.needs(|k| matches!(k, StandInKind::Namespace)) {
            sections.push(NAMESPACE_FACTORY.to_string());
        }

        sections.extend(self.entries.iter().map(StandIn::definition));
        sections.join("\n\n")
    }
}
