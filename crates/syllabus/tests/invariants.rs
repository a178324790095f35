//! Generative invariant checks over the final store.
//!
//! Random catalogs are generated with deliberately hostile shapes —
//! duplicate definitions, self-references, dangling references, and
//! arbitrary (often cyclic) edge tangles — written to a real file and
//! loaded. Whatever the input, the final store must satisfy the pipeline's
//! guarantees. Acyclicity is cross-checked with petgraph's own
//! `is_cyclic_directed` as an independent oracle.

use std::collections::{HashMap, HashSet};
use std::io::Write;

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use proptest::prelude::*;
use tempfile::NamedTempFile;

use syllabus::Catalog;

/// One generated source line: a course index plus prerequisite indices.
/// Course indices span 0..20; prerequisite indices span 0..26, so indices
/// 20..26 reference identifiers no line ever defines (dangling).
fn line_strategy() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (0..20usize, prop::collection::vec(0..26usize, 0..4))
}

fn identifier(index: usize) -> String {
    format!("GEN{index:02}")
}

fn render_catalog(lines: &[(usize, Vec<usize>)]) -> String {
    let mut out = String::new();
    for (course, prereqs) in lines {
        out.push_str(&identifier(*course));
        out.push_str(&format!(",Generated Course {course}"));
        for p in prereqs {
            out.push(',');
            out.push_str(&identifier(*p));
        }
        out.push('\n');
    }
    out
}

fn load_generated(lines: &[(usize, Vec<usize>)]) -> Catalog {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(render_catalog(lines).as_bytes())
        .expect("write fixture");
    let mut catalog = Catalog::new();
    catalog.load(file.path());
    catalog
}

proptest! {
    #[test]
    fn stored_identifiers_are_unique(lines in prop::collection::vec(line_strategy(), 0..30)) {
        let catalog = load_generated(&lines);

        let ids: Vec<String> = catalog.list().into_iter().map(|c| c.identifier).collect();
        let unique: HashSet<&String> = ids.iter().collect();
        prop_assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn no_stored_record_references_itself(lines in prop::collection::vec(line_strategy(), 0..30)) {
        let catalog = load_generated(&lines);

        for course in catalog.list() {
            prop_assert!(
                !course.prerequisites.contains(&course.identifier),
                "{} lists itself", course.identifier
            );
        }
    }

    #[test]
    fn referential_closure_over_final_store(lines in prop::collection::vec(line_strategy(), 0..30)) {
        let catalog = load_generated(&lines);

        for course in catalog.list() {
            for prereq in &course.prerequisites {
                prop_assert!(
                    catalog.search(prereq).is_some(),
                    "{} referenced by {} is not stored", prereq, course.identifier
                );
            }
        }
    }

    #[test]
    fn stored_prerequisite_graph_is_acyclic(lines in prop::collection::vec(line_strategy(), 0..30)) {
        let catalog = load_generated(&lines);

        let mut graph = DiGraph::<String, ()>::new();
        let mut nodes: HashMap<String, NodeIndex> = HashMap::new();
        let courses = catalog.list();
        for course in &courses {
            let idx = graph.add_node(course.identifier.clone());
            nodes.insert(course.identifier.clone(), idx);
        }
        for course in &courses {
            for prereq in &course.prerequisites {
                // Closure holds (checked above), so the lookup succeeds.
                if let (Some(&from), Some(&to)) =
                    (nodes.get(&course.identifier), nodes.get(prereq))
                {
                    graph.add_edge(from, to, ());
                }
            }
        }

        prop_assert!(!is_cyclic_directed(&graph));
    }

    #[test]
    fn sorted_listing_is_a_permutation_of_enumeration(
        lines in prop::collection::vec(line_strategy(), 0..30)
    ) {
        let catalog = load_generated(&lines);

        let mut enumerated: Vec<String> =
            catalog.list().into_iter().map(|c| c.identifier).collect();
        enumerated.sort_unstable();

        let sorted: Vec<String> =
            catalog.list_sorted().into_iter().map(|c| c.identifier).collect();

        prop_assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(sorted, enumerated);
    }

    #[test]
    fn every_stored_record_is_searchable_by_lowercase(
        lines in prop::collection::vec(line_strategy(), 0..30)
    ) {
        let catalog = load_generated(&lines);

        for course in catalog.list() {
            let variant = course.identifier.to_lowercase();
            prop_assert!(catalog.search(&variant).is_some());
        }
    }
}
