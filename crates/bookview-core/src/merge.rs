//! Two ways of laying two statement trees side by side.
//!
//! [`merge_at_reference`] keeps the shape of the current tree and looks up
//! the reference-date value of each node; branches only present at the
//! reference date are dropped. [`diff_trees`] unions both trees level by
//! level and keeps every branch from either side.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::{MergedNode, ValuedAccountNode};

/// Point-in-time merge.
///
/// The result has exactly the shape of `current`. Each node carries its own
/// value as `value_a` and, as `value_b`, the value of the node in `reference`
/// with the same key (code, else name). Nodes without a match, or every node
/// when `reference` is `None`, get no reference value.
pub fn merge_at_reference(
    current: &ValuedAccountNode,
    reference: Option<&ValuedAccountNode>,
) -> MergedNode {
    let mut index = HashMap::new();
    if let Some(reference) = reference {
        index_by_key(reference, &mut index);
    }
    merge_node(current, &index)
}

/// Pre-order index; the first node seen for a key wins
fn index_by_key<'a>(node: &'a ValuedAccountNode, index: &mut HashMap<&'a str, Decimal>) {
    index.entry(node.key()).or_insert(node.value);
    for child in &node.children {
        index_by_key(child, index);
    }
}

fn merge_node(node: &ValuedAccountNode, index: &HashMap<&str, Decimal>) -> MergedNode {
    MergedNode {
        code: node.code.clone(),
        name: node.name.clone(),
        value_a: Some(node.value),
        value_b: index.get(node.key()).copied(),
        children: node.children.iter().map(|c| merge_node(c, index)).collect(),
    }
}

/// Comparative diff of two independently shaped trees.
///
/// The roots are taken as the same statement. At every level the children
/// are unioned: a child of `a` pairs with a child of `b` that has the same
/// code (when both carry one) or else the same name, each node used at most
/// once. Unpaired children still appear, with the missing side left empty.
/// `a`'s children come first in their order, then the rest of `b`'s.
///
/// Returns `None` only when both sides are absent.
pub fn diff_trees(
    a: Option<&ValuedAccountNode>,
    b: Option<&ValuedAccountNode>,
) -> Option<MergedNode> {
    let (code, name) = match (a, b) {
        (None, None) => return None,
        (Some(n), _) | (None, Some(n)) => (n.code.clone(), n.name.clone()),
    };

    let a_children: &[ValuedAccountNode] = a.map(|n| n.children.as_slice()).unwrap_or(&[]);
    let b_children: &[ValuedAccountNode] = b.map(|n| n.children.as_slice()).unwrap_or(&[]);

    let mut used = vec![false; b_children.len()];
    let mut children = Vec::with_capacity(a_children.len().max(b_children.len()));

    for child_a in a_children {
        let partner = find_partner(child_a, b_children, &used);
        if let Some(i) = partner {
            used[i] = true;
        }
        children.extend(diff_trees(Some(child_a), partner.map(|i| &b_children[i])));
    }

    for (i, child_b) in b_children.iter().enumerate() {
        if !used[i] {
            children.extend(diff_trees(None, Some(child_b)));
        }
    }

    Some(MergedNode {
        code,
        name,
        value_a: a.map(|n| n.value),
        value_b: b.map(|n| n.value),
        children,
    })
}

/// Code match first, then name, among the unused candidates
fn find_partner(
    node: &ValuedAccountNode,
    candidates: &[ValuedAccountNode],
    used: &[bool],
) -> Option<usize> {
    let free = |i: &usize| !used[*i];

    if let Some(code) = node.code.as_deref().filter(|c| !c.is_empty()) {
        let by_code = (0..candidates.len())
            .filter(free)
            .find(|&i| candidates[i].code.as_deref() == Some(code));
        if by_code.is_some() {
            return by_code;
        }
    }

    (0..candidates.len())
        .filter(free)
        .find(|&i| candidates[i].name == node.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::BTreeSet;

    fn node(code: Option<&str>, name: &str, value: Decimal) -> ValuedAccountNode {
        ValuedAccountNode::new(code, name, value)
    }

    fn today() -> ValuedAccountNode {
        node(None, "ASSETS", dec!(1500)).with_children(vec![
            node(Some("1.1"), "Current", dec!(500)).with_children(vec![
                node(Some("1.1.01"), "Cash", dec!(200)),
                node(Some("1.1.02"), "Bank", dec!(300)),
            ]),
            node(Some("1.2"), "Non-current", dec!(1000)),
        ])
    }

    fn last_quarter() -> ValuedAccountNode {
        node(None, "ASSETS", dec!(900)).with_children(vec![
            node(Some("1.1"), "Current (renamed)", dec!(400)).with_children(vec![
                node(Some("1.1.01"), "Cash", dec!(150)),
                node(Some("1.1.03"), "Receivables", dec!(250)),
            ]),
            node(None, "Inventory", dec!(500)),
        ])
    }

    fn same_shape(a: &ValuedAccountNode, m: &MergedNode) -> bool {
        a.name == m.name
            && a.code == m.code
            && a.children.len() == m.children.len()
            && a.children.iter().zip(&m.children).all(|(x, y)| same_shape(x, y))
    }

    #[test]
    fn test_point_in_time_looks_up_by_code_then_name() {
        let merged = merge_at_reference(&today(), Some(&last_quarter()));

        assert_eq!(merged.value_a, Some(dec!(1500)));
        assert_eq!(merged.value_b, Some(dec!(900)));

        let current = &merged.children[0];
        assert_eq!(current.value_b, Some(dec!(400)));
        assert_eq!(current.children[0].value_b, Some(dec!(150)));
        assert_eq!(current.children[1].value_b, None);
        assert_eq!(current.children[1].value_b_or_zero(), dec!(0));
        assert_eq!(merged.children[1].value_b, None);
    }

    #[test]
    fn test_point_in_time_keeps_current_shape() {
        let current = today();
        let merged = merge_at_reference(&current, Some(&last_quarter()));

        assert!(same_shape(&current, &merged));
        assert_eq!(merged.node_count(), current.node_count());
        // Inventory and Receivables exist only at the reference date
        assert!(merged.rows().iter().all(|r| r.name != "Inventory" && r.name != "Receivables"));
    }

    #[test]
    fn test_point_in_time_without_reference() {
        let current = today();
        let merged = merge_at_reference(&current, None);

        assert!(same_shape(&current, &merged));
        assert!(merged.rows().iter().all(|r| r.value_b.is_none()));
        assert!(merged.rows().iter().all(|r| r.value_a.is_some()));
    }

    #[test]
    fn test_point_in_time_first_duplicate_wins() {
        let reference = node(None, "ROOT", dec!(0)).with_children(vec![
            node(None, "Cash", dec!(1)),
            node(None, "Group", dec!(0)).with_children(vec![node(None, "Cash", dec!(2))]),
        ]);
        let current = node(None, "ROOT", dec!(0)).with_children(vec![node(None, "Cash", dec!(5))]);

        let merged = merge_at_reference(&current, Some(&reference));
        assert_eq!(merged.children[0].value_b, Some(dec!(1)));
    }

    fn names(node: &MergedNode) -> BTreeSet<String> {
        node.children.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_diff_unions_children() {
        let merged = diff_trees(Some(&today()), Some(&last_quarter())).unwrap();

        // Current pairs by code despite the rename; Non-current and Inventory are one-sided
        assert_eq!(merged.children.len(), 3);
        assert_eq!(merged.children[0].name, "Current");
        assert_eq!(merged.children[0].value_b, Some(dec!(400)));

        let non_current = &merged.children[1];
        assert_eq!(non_current.value_a, Some(dec!(1000)));
        assert_eq!(non_current.value_b, None);

        let inventory = &merged.children[2];
        assert_eq!(inventory.name, "Inventory");
        assert_eq!(inventory.value_a, None);
        assert_eq!(inventory.value_b, Some(dec!(500)));

        let current_children = &merged.children[0].children;
        assert_eq!(current_children.len(), 3);
        assert_eq!(current_children[2].name, "Receivables");
        assert_eq!(current_children[2].value_a, None);
    }

    #[test]
    fn test_diff_row_count_is_union_size() {
        let a = node(None, "EQUITY", dec!(0)).with_children(vec![
            node(None, "Capital", dec!(1000)),
            node(None, "Reserves", dec!(50)),
        ]);
        let b = node(None, "EQUITY", dec!(0)).with_children(vec![
            node(None, "Reserves", dec!(40)),
            node(None, "Retained earnings", dec!(10)),
        ]);

        let merged = diff_trees(Some(&a), Some(&b)).unwrap();
        let expected: BTreeSet<String> = ["Capital", "Reserves", "Retained earnings"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(names(&merged), expected);
        assert_eq!(merged.rows().len(), 1 + expected.len());
    }

    #[test]
    fn test_diff_one_sided_roots() {
        let b = last_quarter();
        let merged = diff_trees(None, Some(&b)).unwrap();

        assert_eq!(merged.value_a, None);
        assert_eq!(merged.node_count(), b.node_count());
        assert!(merged.rows().iter().all(|r| r.value_a.is_none()));

        assert!(diff_trees(None, None).is_none());
    }

    #[test]
    fn test_diff_duplicate_names_pair_once() {
        let a = node(None, "ROOT", dec!(0)).with_children(vec![
            node(None, "Misc", dec!(1)),
            node(None, "Misc", dec!(2)),
        ]);
        let b = node(None, "ROOT", dec!(0)).with_children(vec![node(None, "Misc", dec!(3))]);

        let merged = diff_trees(Some(&a), Some(&b)).unwrap();
        assert_eq!(merged.children.len(), 2);
        assert_eq!(merged.children[0].value_b, Some(dec!(3)));
        assert_eq!(merged.children[1].value_b, None);
    }

    #[test]
    fn test_diff_is_symmetric_in_node_count() {
        let ab = diff_trees(Some(&today()), Some(&last_quarter())).unwrap();
        let ba = diff_trees(Some(&last_quarter()), Some(&today())).unwrap();
        assert_eq!(ab.node_count(), ba.node_count());
    }
}
