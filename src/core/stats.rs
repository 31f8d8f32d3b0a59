use crate::domain::model::{Node, Stats};
use std::collections::BTreeMap;

/// Active node names grouped by role. Names keep catalog order within a role.
pub fn group_roles(nodes: &[Node]) -> BTreeMap<String, Vec<String>> {
    let mut roles: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for node in nodes.iter().filter(|n| n.exists) {
        roles
            .entry(node.role.clone())
            .or_default()
            .push(node.name.clone());
    }
    roles
}

pub fn aggregate(nodes: &[Node]) -> Stats {
    let active = nodes.iter().filter(|n| n.exists).count();
    let with_pages = nodes.iter().filter(|n| n.exists && n.has_pages()).count();

    Stats {
        total_defined: nodes.len(),
        active,
        with_pages,
        roles: group_roles(nodes)
            .into_iter()
            .map(|(role, names)| (role, names.len()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RepoStatus;

    fn node(name: &str, role: &str, status: Option<bool>) -> Node {
        Node {
            name: name.to_string(),
            role: role.to_string(),
            icon: "x".to_string(),
            tier: 2,
            exists: status.is_some(),
            status: status.map(|has_pages| RepoStatus {
                has_pages,
                updated: String::new(),
                size: 0,
                language: "None".to_string(),
                url: String::new(),
                pages_url: has_pages.then(|| format!("https://o.github.io/{}/", name)),
            }),
        }
    }

    #[test]
    fn test_empty_active_set() {
        let nodes = vec![node("a", "core", None), node("b", "hub", None)];
        let stats = aggregate(&nodes);

        assert_eq!(stats.total_defined, 2);
        assert_eq!(stats.active, 0);
        assert_eq!(stats.with_pages, 0);
        assert!(stats.roles.is_empty());
        assert!(group_roles(&nodes).is_empty());
    }

    #[test]
    fn test_no_nodes_at_all() {
        assert_eq!(aggregate(&[]), Stats::default());
    }

    #[test]
    fn test_counts_and_role_grouping() {
        let nodes = vec![
            node("market", "commerce", Some(true)),
            node("hub", "hub", Some(false)),
            node("token", "commerce", Some(false)),
            node("mint", "commerce", None),
            node("vault", "storage", None),
        ];

        let stats = aggregate(&nodes);
        assert_eq!(stats.total_defined, 5);
        assert_eq!(stats.active, 3);
        assert_eq!(stats.with_pages, 1);
        assert_eq!(stats.roles.get("commerce"), Some(&2));
        assert_eq!(stats.roles.get("hub"), Some(&1));
        assert!(!stats.roles.contains_key("storage"));

        let roles = group_roles(&nodes);
        assert_eq!(roles["commerce"], vec!["market", "token"]);
        let grouped: usize = roles.values().map(Vec::len).sum();
        assert_eq!(grouped, stats.active);
    }
}
