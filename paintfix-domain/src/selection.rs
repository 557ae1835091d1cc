use crate::capabilities::is_supported;
use paintfix_types::{Node, NodePath, Scope};
use tracing::debug;

/// Which nodes under a root selection an action may touch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionRule {
    pub scope: Scope,

    /// Case-insensitive name prefix. `None` and `""` exclude nothing.
    pub excluded_prefix: Option<String>,

    /// Skip the whole subtree under an excluded node instead of only the node.
    pub preserve_children_of_excluded: bool,
}

impl SelectionRule {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    pub fn excluding(mut self, prefix: impl Into<String>) -> Self {
        self.excluded_prefix = Some(prefix.into());
        self
    }

    pub fn preserve_children(mut self, preserve: bool) -> Self {
        self.preserve_children_of_excluded = preserve;
        self
    }

    fn prefix(&self) -> Option<String> {
        self.excluded_prefix
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(str::to_lowercase)
    }
}

/// Eligible nodes in pre-order (parent before children, siblings in document order).
///
/// The result is owned and built fresh on every call; running twice over the
/// same tree yields the same paths.
pub fn resolve(roots: &[Node], rule: &SelectionRule) -> Vec<NodePath> {
    let prefix = rule.prefix();
    let mut out = Vec::new();

    for (index, root) in roots.iter().enumerate() {
        let path = NodePath::root(index);
        let excluded = is_excluded(root, prefix.as_deref());
        if excluded && rule.preserve_children_of_excluded {
            debug!(node = %root.label(), "skipping excluded subtree");
            continue;
        }
        let include_self = rule.scope == Scope::WholeSubtree && !excluded;
        if include_self && is_supported(root.kind) {
            out.push(path.clone());
        }
        visit_children(root, &path, rule, prefix.as_deref(), &mut out);
    }

    debug!(roots = roots.len(), eligible = out.len(), "selection resolved");
    out
}

/// Like [`resolve`], but hands back the nodes themselves.
pub fn resolve_nodes<'a>(roots: &'a [Node], rule: &SelectionRule) -> Vec<&'a Node> {
    resolve(roots, rule)
        .iter()
        .filter_map(|path| path.find(roots))
        .collect()
}

fn visit_children(
    parent: &Node,
    parent_path: &NodePath,
    rule: &SelectionRule,
    prefix: Option<&str>,
    out: &mut Vec<NodePath>,
) {
    for (index, child) in parent.children.iter().enumerate() {
        let path = parent_path.child(index);
        if is_excluded(child, prefix) {
            if rule.preserve_children_of_excluded {
                debug!(node = %child.label(), "skipping excluded subtree");
                continue;
            }
        } else if is_supported(child.kind) {
            out.push(path.clone());
        }
        visit_children(child, &path, rule, prefix, out);
    }
}

fn is_excluded(node: &Node, prefix: Option<&str>) -> bool {
    prefix.is_some_and(|p| node.name.to_lowercase().starts_with(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintfix_types::NodeKind;

    fn paths(v: &[NodePath]) -> Vec<String> {
        v.iter().map(ToString::to_string).collect()
    }

    fn tree() -> Vec<Node> {
        vec![
            Node::new(NodeKind::Frame, "Card").with_children(vec![
                Node::new(NodeKind::Rectangle, "bg"),
                Node::new(NodeKind::Group, "content").with_children(vec![
                    Node::new(NodeKind::Text, "title"),
                    Node::new(NodeKind::Ellipse, "dot"),
                ]),
            ]),
            Node::new(NodeKind::Star, "badge"),
        ]
    }

    #[test]
    fn whole_subtree_is_pre_order() {
        let out = resolve(&tree(), &SelectionRule::new(Scope::WholeSubtree));
        assert_eq!(paths(&out), vec!["0", "0/0", "0/1/0", "0/1/1", "1"]);
    }

    #[test]
    fn nested_only_skips_roots() {
        let out = resolve(&tree(), &SelectionRule::new(Scope::NestedOnly));
        assert_eq!(paths(&out), vec!["0/0", "0/1/0", "0/1/1"]);
    }

    #[test]
    fn unsupported_kind_is_traversed_but_not_added() {
        let out = resolve(&tree(), &SelectionRule::new(Scope::WholeSubtree));
        assert!(!paths(&out).contains(&"0/1".to_string()));
        assert!(paths(&out).contains(&"0/1/0".to_string()));
    }

    #[test]
    fn empty_prefix_excludes_nothing() {
        let rule = SelectionRule::new(Scope::WholeSubtree)
            .excluding("")
            .preserve_children(true);
        assert_eq!(resolve(&tree(), &rule).len(), 5);
    }

    #[test]
    fn excluded_root_under_nested_only_still_hides_subtree_when_preserving() {
        let rule = SelectionRule::new(Scope::NestedOnly)
            .excluding("CARD")
            .preserve_children(true);
        assert!(resolve(&tree(), &rule).is_empty());
    }

    #[test]
    fn excluded_root_under_nested_only_keeps_children_without_preserve() {
        let rule = SelectionRule::new(Scope::NestedOnly).excluding("card");
        let out = resolve(&tree(), &rule);
        assert_eq!(paths(&out), vec!["0/0", "0/1/0", "0/1/1"]);
    }

    #[test]
    fn resolve_nodes_matches_paths() {
        let roots = tree();
        let nodes = resolve_nodes(&roots, &SelectionRule::new(Scope::WholeSubtree));
        let names: Vec<&str> = nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Card", "bg", "title", "dot", "badge"]);
    }
}
