//! The aggregate tree: transactions grouped gender → age bracket → category.
//!
//! Nodes live in a flat arena (`Vec<AggNode>` indexed by `usize`) so the
//! render layer can key transient animation state by node index without
//! touching the domain data. The tree is built once per load and read-only
//! afterwards.

pub mod stats;

use std::collections::HashMap;

use crate::data::{AgeBracket, Gender, Transaction};

/// Index of the root node in every [`AggTree`].
pub const ROOT: usize = 0;

/// One grouping level: the root, a gender, an age bracket, or a category leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct AggNode {
    pub name: String,
    /// Sum of descendant line values. Leaves accumulate it directly,
    /// interior nodes derive it from their children.
    pub value: f64,
    pub depth: u32,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

/// Hierarchical summation structure over the full record set.
#[derive(Debug, Clone, PartialEq)]
pub struct AggTree {
    nodes: Vec<AggNode>,
}

impl AggTree {
    pub fn node(&self, id: usize) -> &AggNode {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // The root always exists.
        self.nodes.len() <= 1
    }

    /// Node ids in creation order; parents always precede their children.
    pub fn ids(&self) -> impl Iterator<Item = usize> {
        0..self.nodes.len()
    }

    /// Ids from the root down to `id`, inclusive.
    pub fn ancestor_path(&self, id: usize) -> Vec<usize> {
        let mut path = vec![id];
        let mut cursor = id;
        while let Some(parent) = self.nodes[cursor].parent {
            path.push(parent);
            cursor = parent;
        }
        path.reverse();
        path
    }

    /// Human-readable ancestor chain, e.g. "root → Male → 20-29 → Shoes".
    pub fn path_label(&self, id: usize) -> String {
        self.ancestor_path(id)
            .into_iter()
            .map(|n| self.nodes[n].name.as_str())
            .collect::<Vec<_>>()
            .join(" → ")
    }

    /// Whether `id` lies in the subtree rooted at `ancestor` (inclusive).
    pub fn in_subtree(&self, id: usize, ancestor: usize) -> bool {
        let mut cursor = id;
        loop {
            if cursor == ancestor {
                return true;
            }
            match self.nodes[cursor].parent {
                Some(parent) => cursor = parent,
                None => return false,
            }
        }
    }

    /// Depth-1 ancestor of `id` (the gender level), or `id` itself at depth 1.
    /// Root has no top-level ancestor.
    pub fn top_ancestor(&self, id: usize) -> Option<usize> {
        let mut cursor = id;
        while self.nodes[cursor].depth > 1 {
            cursor = self.nodes[cursor].parent?;
        }
        if self.nodes[cursor].depth == 1 {
            Some(cursor)
        } else {
            None
        }
    }
}

/// Build the aggregate tree from the full in-memory record set.
///
/// Leaf value = Σ quantity × unit price over matching records; interior
/// values are derived by summation. Children end up sorted by descending
/// value, ties broken by first-appearance order, which also fixes the f64
/// summation order and makes the build deterministic.
pub fn build_tree(records: &[Transaction]) -> AggTree {
    let mut nodes = vec![AggNode {
        name: "root".to_string(),
        value: 0.0,
        depth: 0,
        parent: None,
        children: Vec::new(),
    }];

    let mut gender_ix: HashMap<Gender, usize> = HashMap::new();
    let mut bracket_ix: HashMap<(Gender, AgeBracket), usize> = HashMap::new();
    let mut leaf_ix: HashMap<(Gender, AgeBracket, String), usize> = HashMap::new();

    for tx in records {
        let bracket = tx.bracket();

        let gender_id = *gender_ix.entry(tx.gender).or_insert_with(|| {
            push_child(&mut nodes, ROOT, tx.gender.label().to_string())
        });
        let bracket_id = *bracket_ix.entry((tx.gender, bracket)).or_insert_with(|| {
            push_child(&mut nodes, gender_id, bracket.label().to_string())
        });
        let leaf_id = *leaf_ix
            .entry((tx.gender, bracket, tx.category.clone()))
            .or_insert_with(|| push_child(&mut nodes, bracket_id, tx.category.clone()));

        nodes[leaf_id].value += tx.line_value();
    }

    // Propagate leaf sums upward. Parents precede children in the arena, so
    // a reverse walk adds each node into its parent exactly once.
    for id in (1..nodes.len()).rev() {
        let value = nodes[id].value;
        if let Some(parent) = nodes[id].parent {
            nodes[parent].value += value;
        }
    }

    // Descending value, stable within ties.
    let values: Vec<f64> = nodes.iter().map(|n| n.value).collect();
    for node in &mut nodes {
        node.children
            .sort_by(|a, b| values[*b].total_cmp(&values[*a]));
    }

    AggTree { nodes }
}

fn push_child(nodes: &mut Vec<AggNode>, parent: usize, name: String) -> usize {
    let id = nodes.len();
    let depth = nodes[parent].depth + 1;
    nodes.push(AggNode {
        name,
        value: 0.0,
        depth,
        parent: Some(parent),
        children: Vec::new(),
    });
    nodes[parent].children.push(id);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(gender: Gender, age: u32, category: &str, quantity: u32, price: f64) -> Transaction {
        Transaction {
            gender,
            age,
            category: category.to_string(),
            quantity,
            unit_price: price,
            date: NaiveDate::from_ymd_opt(2022, 1, 15).unwrap(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(Gender::Male, 25, "Shoes", 2, 50.0),
            tx(Gender::Male, 25, "Shoes", 1, 30.0),
            tx(Gender::Female, 45, "Books", 3, 10.0),
        ]
    }

    fn find_child(tree: &AggTree, parent: usize, name: &str) -> usize {
        *tree
            .node(parent)
            .children
            .iter()
            .find(|&&c| tree.node(c).name == name)
            .unwrap()
    }

    #[test]
    fn concrete_scenario_totals() {
        let tree = build_tree(&sample());

        assert_eq!(tree.node(ROOT).value, 160.0);

        let male = find_child(&tree, ROOT, "Male");
        let male_20s = find_child(&tree, male, "20-29");
        let shoes = find_child(&tree, male_20s, "Shoes");
        assert_eq!(tree.node(shoes).value, 130.0);

        let female = find_child(&tree, ROOT, "Female");
        let female_40s = find_child(&tree, female, "40-49");
        let books = find_child(&tree, female_40s, "Books");
        assert_eq!(tree.node(books).value, 30.0);
    }

    #[test]
    fn interior_values_equal_child_sums() {
        let tree = build_tree(&sample());
        for id in tree.ids() {
            let node = tree.node(id);
            if !node.children.is_empty() {
                let sum: f64 = node.children.iter().map(|&c| tree.node(c).value).sum();
                assert!((node.value - sum).abs() < 1e-9, "node {} value mismatch", id);
            }
        }
    }

    #[test]
    fn root_value_is_dataset_total() {
        let records = sample();
        let total: f64 = records.iter().map(|t| t.line_value()).sum();
        let tree = build_tree(&records);
        assert_eq!(tree.node(ROOT).value, total);
    }

    #[test]
    fn children_sorted_by_descending_value() {
        let tree = build_tree(&sample());
        // Male (130) before Female (30).
        let first = tree.node(ROOT).children[0];
        let second = tree.node(ROOT).children[1];
        assert_eq!(tree.node(first).name, "Male");
        assert_eq!(tree.node(second).name, "Female");
    }

    #[test]
    fn rebuild_is_deterministic() {
        let records = sample();
        let a = build_tree(&records);
        let b = build_tree(&records);
        assert_eq!(a, b);
    }

    #[test]
    fn path_label_walks_ancestors() {
        let tree = build_tree(&sample());
        let male = find_child(&tree, ROOT, "Male");
        let male_20s = find_child(&tree, male, "20-29");
        let shoes = find_child(&tree, male_20s, "Shoes");
        assert_eq!(tree.path_label(shoes), "root → Male → 20-29 → Shoes");
        assert_eq!(tree.top_ancestor(shoes), Some(male));
        assert!(tree.in_subtree(shoes, male));
        assert!(!tree.in_subtree(male, shoes));
    }

    #[test]
    fn empty_dataset_keeps_bare_root() {
        let tree = build_tree(&[]);
        assert!(tree.is_empty());
        assert_eq!(tree.node(ROOT).value, 0.0);
    }
}
