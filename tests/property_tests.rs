use huffheap::{build_huffman_tree, code_table, PriorityHeap, Symbol};
use proptest::prelude::*;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

/// Array-backed heap with the same swap rules as the linked heap: strict comparisons, and the
/// left child wins ties on the way down. Indices are 1-based to match the complete-tree numbering.
struct ArrayHeap {
    items: Vec<(u32, usize)>,
}

impl ArrayHeap {
    fn insert(&mut self, item: (u32, usize)) {
        self.items.push(item);
        let mut i = self.items.len();
        while i > 1 && self.items[i / 2 - 1].0 > self.items[i - 1].0 {
            self.items.swap(i / 2 - 1, i - 1);
            i /= 2;
        }
    }

    fn extract(&mut self) -> Option<(u32, usize)> {
        let n = self.items.len();
        if n == 0 {
            return None;
        }
        self.items.swap(0, n - 1);
        let top = self.items.pop();
        let n = n - 1;
        let mut i = 1;
        loop {
            let l = 2 * i;
            if l > n {
                break;
            }
            let c = if l < n && self.items[l - 1].0 > self.items[l].0 {
                l + 1
            } else {
                l
            };
            if self.items[i - 1].0 > self.items[c - 1].0 {
                self.items.swap(i - 1, c - 1);
                i = c;
            } else {
                break;
            }
        }
        top
    }
}

proptest! {
    #[test]
    fn heap_matches_array_heap(ops in prop::collection::vec(prop::option::of(0..40u32), 1..400)) {
        let mut heap = PriorityHeap::new(|a: &(u32, usize), b: &(u32, usize)| a.0.cmp(&b.0));
        let mut reference = ArrayHeap { items: vec![] };
        // Multiset of keys still in the heap
        let mut keys: BTreeMap<u32, usize> = BTreeMap::new();

        for (id, op) in ops.into_iter().enumerate() {
            match op {
                Some(key) => {
                    heap.insert((key, id));
                    reference.insert((key, id));
                    *keys.entry(key).or_insert(0) += 1;
                }
                None => {
                    let got = heap.extract();
                    prop_assert_eq!(got, reference.extract());
                    let min = keys.keys().next().copied();
                    prop_assert_eq!(got.map(|p| p.0), min);
                    if let Some(key) = min {
                        let count = keys.get_mut(&key).unwrap();
                        *count -= 1;
                        if *count == 0 {
                            keys.remove(&key);
                        }
                    }
                }
            }
            prop_assert!(heap.is_valid());
            prop_assert_eq!(heap.len(), reference.items.len());
            prop_assert_eq!(heap.level_order(), reference.items.clone());
        }
    }

    #[test]
    fn codes_are_prefix_free(freqs in prop::collection::vec(0..1000u64, 1..60)) {
        let symbols = freqs
            .iter()
            .enumerate()
            .map(|(i, &f)| Symbol::new(char::from_u32(0x3B1 + i as u32).unwrap(), f))
            .collect::<Vec<_>>();
        let tree = build_huffman_tree(&symbols).unwrap();
        prop_assert_eq!(tree.node_count(), 2 * symbols.len() - 1);

        let table = code_table(&tree).unwrap();
        prop_assert_eq!(table.len(), symbols.len());
        prop_assert!(table.kraft_sum() <= 1.0 + 1e-9);

        let mut codes = table.iter().map(|(_, c)| c.bits().to_vec()).collect::<Vec<_>>();
        codes.sort();
        for pair in codes.windows(2) {
            prop_assert!(!pair[1].starts_with(&pair[0]));
        }
    }

    #[test]
    fn weighted_length_is_optimal(freqs in prop::collection::vec(1..500u64, 2..80)) {
        let symbols = freqs
            .iter()
            .enumerate()
            .map(|(i, &f)| Symbol::new(char::from_u32(0x41 + i as u32).unwrap(), f))
            .collect::<Vec<_>>();
        let tree = build_huffman_tree(&symbols).unwrap();
        let table = code_table(&tree).unwrap();
        let cost: u64 = symbols
            .iter()
            .map(|s| s.freq() * table.get(s.ch()).unwrap().len() as u64)
            .sum();

        // Reference cost: sum of all merge weights from std's binary heap
        let mut queue = freqs.iter().map(|&f| Reverse(f)).collect::<BinaryHeap<_>>();
        let mut expected = 0;
        while queue.len() > 1 {
            let Reverse(a) = queue.pop().unwrap();
            let Reverse(b) = queue.pop().unwrap();
            expected += a + b;
            queue.push(Reverse(a + b));
        }
        prop_assert_eq!(cost, expected);
    }
}
