//! Property-based tests for import closure resolution.
//!
//! Random import graphs (cycles, self-imports and dangling references
//! included) are resolved and checked against a plain reachability search
//! over the same graph.

#[cfg(test)]
mod proptest_tests {
    use std::collections::{BTreeSet, VecDeque};

    use crate::filesystem::MemoryFS;
    use crate::path::FileRef;
    use crate::resolver::resolve_closure;
    use proptest::prelude::*;

    /// Node `i` imports `imports[i]`; `present[i]` says whether its file exists.
    /// Targets `>= imports.len()` never exist.
    #[derive(Debug, Clone)]
    struct Graph {
        imports: Vec<Vec<usize>>,
        present: Vec<bool>,
    }

    fn name(node: usize) -> String {
        format!("pkg/n{:02}.proto", node)
    }

    impl Graph {
        fn readable(&self, node: usize) -> bool {
            node < self.present.len() && self.present[node]
        }

        fn to_fs(&self) -> MemoryFS {
            let mut fs = MemoryFS::new();
            for (node, targets) in self.imports.iter().enumerate() {
                if !self.readable(node) {
                    continue;
                }
                let text: String = targets
                    .iter()
                    .map(|t| format!("import \"{}\";\n", name(*t)))
                    .collect();
                fs.add_file_string(&name(node), &text);
            }
            fs
        }

        /// Breadth-first reachability from node 0.
        fn reachable(&self) -> BTreeSet<usize> {
            let mut seen = BTreeSet::from([0]);
            let mut queue = VecDeque::from([0]);
            while let Some(node) = queue.pop_front() {
                if !self.readable(node) {
                    continue;
                }
                for &target in &self.imports[node] {
                    if seen.insert(target) {
                        queue.push_back(target);
                    }
                }
            }
            seen
        }
    }

    fn graph_strategy() -> impl Strategy<Value = Graph> {
        (1usize..12).prop_flat_map(|n| {
            prop::collection::vec(
                (
                    prop::collection::vec(0..n + 2, 0..4),
                    prop::bool::weighted(0.85),
                ),
                n,
            )
            .prop_map(|nodes| {
                let (imports, present) = nodes.into_iter().unzip();
                Graph { imports, present }
            })
        })
    }

    proptest! {
        /// Property: the closure is exactly the reachable node set, root included
        #[test]
        fn closure_equals_reachable_set(graph in graph_strategy()) {
            let closure = resolve_closure(&FileRef::new(&name(0)), &graph.to_fs()).unwrap();

            let expected: BTreeSet<FileRef> =
                graph.reachable().into_iter().map(|n| FileRef::new(&name(n))).collect();
            let actual: BTreeSet<FileRef> = closure.files().cloned().collect();

            prop_assert_eq!(actual, expected);
            prop_assert!(closure.contains(&FileRef::new(&name(0))));
        }

        /// Property: enumeration is sorted and free of duplicates
        #[test]
        fn closure_is_sorted_and_unique(graph in graph_strategy()) {
            let closure = resolve_closure(&FileRef::new(&name(0)), &graph.to_fs()).unwrap();
            let files: Vec<&FileRef> = closure.files().collect();
            prop_assert!(files.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(files.len(), closure.len());
        }

        /// Property: unresolved references are exactly the reachable unreadable ones
        #[test]
        fn unresolved_are_reachable_missing_nodes(graph in graph_strategy()) {
            let closure = resolve_closure(&FileRef::new(&name(0)), &graph.to_fs()).unwrap();

            let expected: BTreeSet<FileRef> = graph
                .reachable()
                .into_iter()
                .filter(|n| !graph.readable(*n))
                .map(|n| FileRef::new(&name(n)))
                .collect();
            let actual: BTreeSet<FileRef> = closure.unresolved().cloned().collect();
            prop_assert_eq!(actual, expected);
        }

        /// Property: resolving twice yields identical output
        #[test]
        fn resolution_is_deterministic(graph in graph_strategy()) {
            let fs = graph.to_fs();
            let root = FileRef::new(&name(0));
            let first = resolve_closure(&root, &fs).unwrap();
            let second = resolve_closure(&root, &fs).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
