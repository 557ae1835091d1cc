//! Completions for the action parameters a host asks the user for.

use paintfix_types::{Action, Node, Scope};
use std::collections::HashSet;

/// Scope labels containing `query`.
pub fn suggest_scopes(query: &str) -> Vec<&'static str> {
    Scope::ALL
        .iter()
        .map(|s| s.label())
        .filter(|label| label.contains(query))
        .collect()
}

/// Action identifiers containing `query`.
pub fn suggest_actions(query: &str) -> Vec<&'static str> {
    let query = query.to_lowercase();
    Action::ALL
        .iter()
        .map(|a| a.as_str())
        .filter(|id| id.contains(&query))
        .collect()
}

/// Node names usable as an exclusion prefix.
///
/// For each root, its descendants are listed before the root itself. Names
/// are matched by lowercase prefix and de-duplicated by exact name.
pub fn suggest_excluded_names(roots: &[Node], query: &str) -> Vec<String> {
    if query.is_empty() {
        return Vec::new();
    }
    let query = query.to_lowercase();

    let mut names = Vec::new();
    for root in roots {
        collect_descendant_names(root, &mut names);
        names.push(root.name.as_str());
    }

    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| name.to_lowercase().starts_with(&query))
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

fn collect_descendant_names<'a>(node: &'a Node, out: &mut Vec<&'a str>) {
    for child in &node.children {
        out.push(child.name.as_str());
        collect_descendant_names(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintfix_types::NodeKind;

    #[test]
    fn scope_labels_filter_by_substring() {
        assert_eq!(suggest_scopes("nested"), vec!["Only nested layers in selection"]);
        assert_eq!(suggest_scopes("").len(), 2);
    }

    #[test]
    fn actions_filter_by_substring() {
        assert_eq!(
            suggest_actions("detach"),
            vec!["detach-style", "detach-variables"]
        );
        assert!(suggest_actions("nope").is_empty());
    }

    #[test]
    fn excluded_names_dedupe_and_order() {
        let roots = vec![
            Node::new(NodeKind::Frame, "Icon set").with_children(vec![
                Node::new(NodeKind::Vector, "icon/home"),
                Node::new(NodeKind::Vector, "Icon/home"),
                Node::new(NodeKind::Vector, "icon/home"),
                Node::new(NodeKind::Rectangle, "bg"),
            ]),
            Node::new(NodeKind::Vector, "icon/home"),
        ];
        assert_eq!(
            suggest_excluded_names(&roots, "ICON"),
            vec!["icon/home", "Icon/home", "Icon set"]
        );
    }

    #[test]
    fn empty_query_suggests_nothing() {
        let roots = vec![Node::new(NodeKind::Frame, "Anything")];
        assert!(suggest_excluded_names(&roots, "").is_empty());
    }
}
