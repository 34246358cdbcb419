//! Tree rendering for bone hierarchies

use console::Style;

/// A node in a rendered tree
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    pub node_type: NodeType,
    pub children: Vec<TreeNode>,
    pub metadata: Vec<(&'static str, String)>,
}

/// Kinds of nodes in a bone tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// The rig itself
    Rig,
    /// A bone without a parent
    Root,
    /// A bone with more than one child
    Branch,
    /// A bone with exactly one child
    Bone,
    /// A bone without children
    Leaf,
}

/// Options for tree rendering
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    /// Deepest level drawn; the rig node is level 0
    pub max_depth: Option<usize>,
    pub no_color: bool,
    /// Metadata inline as `[key:value, ...]` instead of one line per entry
    pub compact: bool,
}

impl TreeNode {
    pub fn new(name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            name: name.into(),
            node_type,
            children: Vec::new(),
            metadata: Vec::new(),
        }
    }

    pub fn add_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_metadata(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.metadata.push((key, value.into()));
        self
    }
}

impl NodeType {
    /// Marker drawn before the node name
    pub fn icon(self) -> &'static str {
        match self {
            Self::Rig => "🦴",
            Self::Root => "◉",
            Self::Branch => "◆",
            Self::Bone => "●",
            Self::Leaf => "○",
        }
    }

    fn style(self) -> Style {
        match self {
            Self::Rig => Style::new().bold().cyan(),
            Self::Root => Style::new().bold().yellow(),
            Self::Branch => Style::new().magenta(),
            Self::Bone => Style::new().blue(),
            Self::Leaf => Style::new().green(),
        }
    }
}

/// Render a tree to a string, one node per line
pub fn render_tree(root: &TreeNode, options: &TreeOptions) -> String {
    let mut renderer = Renderer {
        options,
        output: String::new(),
    };
    renderer.node(root, "", None, 0);
    renderer.output
}

struct Renderer<'a> {
    options: &'a TreeOptions,
    output: String,
}

impl Renderer<'_> {
    fn styled(&self, style: Style) -> Style {
        if self.options.no_color {
            Style::new()
        } else {
            style
        }
    }

    /// `last` is `None` for the top node, which gets no connector
    fn node(&mut self, node: &TreeNode, lead: &str, last: Option<bool>, depth: usize) {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return;
        }

        let (connector, indent) = match last {
            None => ("", ""),
            Some(true) => ("└── ", "    "),
            Some(false) => ("├── ", "│   "),
        };
        let name = self.styled(node.node_type.style()).apply_to(&node.name);
        self.output.push_str(&format!(
            "{lead}{connector}{} {name}",
            node.node_type.icon()
        ));

        if self.options.compact {
            if !node.metadata.is_empty() {
                let inline: Vec<String> = node
                    .metadata
                    .iter()
                    .map(|(key, value)| format!("{key}:{value}"))
                    .collect();
                self.output.push_str(&format!(" [{}]", inline.join(", ")));
            }
            self.output.push('\n');
        } else {
            self.output.push('\n');
            let dim = self.styled(Style::new().dim());
            for (key, value) in &node.metadata {
                self.output.push_str(&format!(
                    "{lead}{indent}    · {}: {value}\n",
                    dim.apply_to(key)
                ));
            }
        }

        let lead = format!("{lead}{indent}");
        let count = node.children.len();
        for (i, child) in node.children.iter().enumerate() {
            self.node(child, &lead, Some(i + 1 == count), depth + 1);
        }
    }
}
