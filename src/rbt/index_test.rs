use arbitrary::{self, unstructured::Unstructured, Arbitrary};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};

use std::collections::BTreeMap;

use super::*;

const KEYS_A: [u32; 12] = [50, 20, 60, 10, 30, 70, 5, 15, 25, 35, 65, 75];
const KEYS_B: [u32; 4] = [30, 10, 60, 50];

fn init_logger() {
    use simplelog::{LevelFilter, TestLogger};

    TestLogger::init(LevelFilter::Debug, simplelog::Config::default()).ok();
}

// iterative in-order walk over the arena.
fn to_keys<K, V>(index: &Index<K, V>) -> Vec<K>
where
    K: Clone,
{
    let (mut keys, mut stack, mut node) = (vec![], vec![], index.root);
    loop {
        while let Some(n) = node {
            stack.push(n);
            node = index.nodes[n].link[LEFT];
        }
        match stack.pop() {
            Some(n) => {
                keys.push(index.nodes[n].key.clone());
                node = index.nodes[n].link[RIGHT];
            }
            None => break keys,
        }
    }
}

fn height_bound(n: usize) -> f64 {
    2.0 * ((n + 1) as f64).log2()
}

#[test]
fn test_rbt_insert() {
    init_logger();

    let mut index: Index<u32, u32> = Index::new("test_rbt_insert");
    assert_eq!(index.is_empty(), true);
    assert_eq!(index.contains(&50), false);

    for key in KEYS_A.iter() {
        index.insert(*key, key * 10);
        index.validate().unwrap();
    }

    for key in KEYS_A.iter() {
        assert!(index.contains(key), "{}", key);
        assert_eq!(index.get(key), Some(&(key * 10)));
    }
    assert_eq!(index.contains(&1), false);
    assert_eq!(index.contains(&100), false);
    assert_eq!(index.get(&100), None);

    assert_eq!(index.len(), KEYS_A.len());
    assert_eq!(index.is_empty(), false);
    assert_eq!(index.to_name(), "test_rbt_insert".to_string());

    let mut refkeys = KEYS_A.to_vec();
    refkeys.sort_unstable();
    assert_eq!(to_keys(&index), refkeys);
}

#[test]
fn test_rbt_remove() {
    init_logger();

    let mut index: Index<u32, u32> = Index::new("test_rbt_remove");
    for key in KEYS_A.iter() {
        index.insert(*key, key * 10);
    }
    for key in KEYS_B.iter() {
        index.remove(key);
        index.validate().unwrap();
        assert_eq!(index.contains(key), false);
    }

    for key in KEYS_A.iter() {
        let removed = KEYS_B.contains(key);
        assert_eq!(index.contains(key), !removed, "{}", key);
        if !removed {
            assert_eq!(index.get(key), Some(&(key * 10)));
        }
    }
    assert_eq!(index.len(), 8);
    assert_eq!(to_keys(&index), vec![5, 15, 20, 25, 35, 65, 70, 75]);

    // drain the rest of the index.
    for key in [20_u32, 70, 5, 15, 25, 35, 65, 75].iter() {
        index.remove(key);
        index.validate().unwrap();
    }
    assert_eq!(index.is_empty(), true);
    assert_eq!(index.root, None);

    // remove on empty index is a no-op.
    index.remove(&20);
    assert_eq!(index.is_empty(), true);
}

#[test]
fn test_rbt_first_insert_wins() {
    let mut index: Index<u32, &str> = Index::new("test_rbt_first_insert_wins");
    index.insert(1, "first");
    index.insert(1, "second");
    assert_eq!(index.get(&1), Some(&"first"));
    assert_eq!(index.len(), 1);

    for key in KEYS_A.iter() {
        index.insert(*key, "first");
    }
    for key in KEYS_A.iter() {
        index.insert(*key, "second");
        index.validate().unwrap();
    }
    for key in KEYS_A.iter() {
        assert_eq!(index.get(key), Some(&"first"));
    }
    assert_eq!(index.get(&1), Some(&"first"));
    assert_eq!(index.len(), KEYS_A.len() + 1);
}

#[test]
fn test_rbt_remove_idempotent() {
    let mut index: Index<u32, u32> = Index::new("test_rbt_remove_idempotent");
    for key in KEYS_A.iter() {
        index.insert(*key, *key);
    }

    index.remove(&30);
    let (keys, len) = (to_keys(&index), index.len());
    index.remove(&30);
    index.validate().unwrap();
    assert_eq!(to_keys(&index), keys);
    assert_eq!(index.len(), len);
    assert_eq!(index.contains(&30), false);
}

#[test]
fn test_rbt_remove_missing() {
    let mut index: Index<u32, u32> = Index::new("test_rbt_remove_missing");
    for key in (0..1000).map(|k| k * 2) {
        index.insert(key, key);
    }
    let keys = to_keys(&index);

    // odd keys are never present, probing still keeps the tree valid.
    for key in (0..1000).map(|k| k * 2 + 1) {
        index.remove(&key);
        index.validate().unwrap();
    }
    index.remove(&5000);
    index.validate().unwrap();

    assert_eq!(to_keys(&index), keys);
    assert_eq!(index.len(), 1000);
    for key in keys.iter() {
        assert_eq!(index.get(key), Some(key));
    }
}

#[test]
fn test_rbt_sequential() {
    let n = 10_000_u32;
    let mut index: Index<u32, u32> = Index::new("test_rbt_sequential");
    index.validate = false;

    for key in 0..n {
        index.insert(key, key);
    }
    let stats = index.validate().unwrap();
    let depths = stats.depths.unwrap();
    println!("test_rbt_sequential ascending {}", depths);
    assert!((depths.to_max() as f64) <= height_bound(n as usize));

    for key in (0..n).step_by(2) {
        index.remove(&key);
    }
    let stats = index.validate().unwrap();
    assert_eq!(stats.n_count, (n / 2) as usize);
    assert_eq!(to_keys(&index), (0..n).filter(|k| k % 2 == 1).collect::<Vec<u32>>());

    for key in (0..n).rev() {
        index.remove(&key);
    }
    index.validate().unwrap();
    assert_eq!(index.is_empty(), true);

    for key in (0..n).rev() {
        index.insert(key, key);
    }
    let stats = index.validate().unwrap();
    let depths = stats.depths.unwrap();
    println!("test_rbt_sequential descending {}", depths);
    assert!((depths.to_max() as f64) <= height_bound(n as usize));
}

#[test]
fn test_rbt_random_ops() {
    init_logger();

    let seed: u64 = random();
    // let seed: u64 = 2389571234523;
    println!("test_rbt_random_ops seed:{}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let (n_ops, key_max) = (10_000, 2_000_u64);
    let mut index: Index<u64, u64> = Index::new("test_rbt_random_ops");
    let mut btmap: BTreeMap<u64, u64> = BTreeMap::new();

    let (mut n_inserts, mut n_removes) = (0, 0);
    for i in 0..n_ops {
        let key = rng.gen::<u64>() % key_max;
        if rng.gen::<bool>() {
            let value = i as u64;
            index.insert(key, value);
            btmap.entry(key).or_insert(value);
            n_inserts += 1;
        } else {
            index.remove(&key);
            btmap.remove(&key);
            n_removes += 1;
        }

        let stats = index.validate().unwrap();
        assert_eq!(stats.n_count, btmap.len(), "seed:{} op:{}", seed, i);
        assert!((stats.depths.unwrap().to_max() as f64) <= height_bound(btmap.len()));
        assert_eq!(index.contains(&key), btmap.contains_key(&key));
        assert_eq!(to_keys(&index), btmap.keys().cloned().collect::<Vec<u64>>());
    }
    println!(
        "test_rbt_random_ops inserts:{} removes:{} len:{}",
        n_inserts,
        n_removes,
        index.len()
    );

    for (key, value) in btmap.iter() {
        assert_eq!(index.get(key), Some(value));
    }
}

#[derive(Clone, Debug, Arbitrary)]
enum Op<K, V> {
    Insert(K, V),
    Remove(K),
    Contains(K),
    Get(K),
}

#[test]
fn test_rbt_arbitrary_ops() {
    let seed: u64 = random();
    println!("test_rbt_arbitrary_ops seed:{}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut index: Index<u8, u64> = Index::new("test_rbt_arbitrary_ops");
    let mut btmap: BTreeMap<u8, u64> = BTreeMap::new();

    let mut counts = [0_usize; 4];
    for _ in 0..20_000 {
        let bytes = rng.gen::<[u8; 32]>();
        let mut uns = Unstructured::new(&bytes);

        let op: Op<u8, u64> = uns.arbitrary().unwrap();
        match op {
            Op::Insert(key, value) => {
                index.insert(key, value);
                btmap.entry(key).or_insert(value);
                counts[0] += 1;
            }
            Op::Remove(key) => {
                index.remove(&key);
                btmap.remove(&key);
                counts[1] += 1;
            }
            Op::Contains(key) => {
                assert_eq!(index.contains(&key), btmap.contains_key(&key));
                counts[2] += 1;
            }
            Op::Get(key) => {
                assert_eq!(index.get(&key), btmap.get(&key));
                counts[3] += 1;
            }
        }
        assert_eq!(index.len(), btmap.len());
    }
    println!("test_rbt_arbitrary_ops counts:{:?}", counts);

    index.validate().unwrap();
    assert_eq!(to_keys(&index), btmap.keys().cloned().collect::<Vec<u8>>());
}

#[test]
fn test_rbt_clone() {
    let mut index1: Index<u32, String> = Index::new("test_rbt_clone");
    for key in KEYS_A.iter() {
        index1.insert(*key, key.to_string());
    }

    let mut index2 = index1.clone();
    for key in KEYS_B.iter() {
        index2.remove(key);
    }
    index2.insert(100, "100".to_string());

    index1.validate().unwrap();
    index2.validate().unwrap();

    assert_eq!(index1.len(), 12);
    assert_eq!(index2.len(), 9);
    for key in KEYS_A.iter() {
        assert_eq!(index1.get(key), Some(&key.to_string()));
    }
    for key in KEYS_B.iter() {
        assert_eq!(index2.contains(key), false);
    }
    assert_eq!(index1.contains(&100), false);
    assert_eq!(index2.get(&100), Some(&"100".to_string()));

    drop(index1);
    index2.validate().unwrap();
    assert_eq!(index2.get(&75), Some(&"75".to_string()));
}

#[test]
fn test_rbt_borrowed_keys() {
    let mut index: Index<String, usize> = Index::new("test_rbt_borrowed_keys");
    let words = ["delta", "alpha", "echo", "bravo", "charlie", "foxtrot"];
    for (i, word) in words.iter().enumerate() {
        index.insert(word.to_string(), i);
    }

    assert_eq!(index.contains("alpha"), true);
    assert_eq!(index.get("echo"), Some(&2));
    assert_eq!(index.contains("golf"), false);

    index.remove("alpha");
    index.remove("golf");
    assert_eq!(index.contains("alpha"), false);
    assert_eq!(index.len(), 5);
    assert_eq!(
        to_keys(&index),
        vec!["bravo", "charlie", "delta", "echo", "foxtrot"]
    );
}

#[test]
fn test_rbt_stats() {
    let mut index: Index<u32, u32> = Index::new("test_rbt_stats");

    let stats = index.to_stats();
    assert_eq!(stats.name, "test_rbt_stats");
    assert_eq!(stats.n_count, 0);
    assert_eq!(stats.node_size, mem::size_of::<Node<u32, u32>>());
    assert!(stats.blacks.is_none() && stats.depths.is_none());

    let stats = index.validate().unwrap();
    assert_eq!(stats.blacks, Some(1));
    assert_eq!(stats.depths.as_ref().map(|d| d.to_samples()), Some(0));

    for key in 0..1000 {
        index.insert(key, key);
    }
    let stats = index.validate().unwrap();
    assert_eq!(stats.n_count, 1000);
    assert!(stats.blacks.unwrap() > 1);
    let depths = stats.depths.as_ref().unwrap();
    assert!(depths.to_min() <= depths.to_max());
    assert!((depths.to_max() as f64) <= height_bound(1000));

    let s = stats.to_string();
    assert!(s.contains("rbt.name = test_rbt_stats"), "{}", s);
    assert!(s.contains("n_count=1000"), "{}", s);
    println!("{}", s);
}

#[test]
fn test_rbt_from_config() {
    let config = Config::from_toml("name = \"configured\"\nvalidate = false\n").unwrap();
    let mut index: Index<u32, u32> = Index::from_config(config);
    assert_eq!(index.to_name(), "configured");
    assert_eq!(index.validate, false);

    for key in KEYS_A.iter() {
        index.insert(*key, *key);
    }
    index.validate().unwrap();
    assert_eq!(format!("{:?}", index), "Index<configured,n_count:12>");
}

#[test]
fn test_rbt_validate_corrupt() {
    let mut index: Index<u32, u32> = Index::new("test_rbt_validate_corrupt");
    for key in KEYS_A.iter() {
        index.insert(*key, *key);
    }
    index.validate = false;

    // red root.
    let root = index.root.unwrap();
    index.nodes[root].set_red();
    match index.validate() {
        Err(Error::Fatal(_, msg)) => assert!(msg.contains("root"), "{}", msg),
        Err(err) => panic!("unexpected {}", err),
        Ok(_) => panic!("red root not detected"),
    }
    index.nodes[root].set_black();
    index.validate().unwrap();

    // detached node, arena and tree disagree.
    index.nodes.push(Node::new(1000, 1000));
    match index.validate() {
        Err(Error::Fatal(_, msg)) => assert!(msg.contains("n_count"), "{}", msg),
        Err(err) => panic!("unexpected {}", err),
        Ok(_) => panic!("detached node not detected"),
    }
}

#[cfg(debug_assertions)]
#[test]
#[should_panic]
fn test_rbt_check_invariants() {
    let mut index: Index<u32, u32> = Index::new("test_rbt_check_invariants");
    for key in KEYS_A.iter() {
        index.insert(*key, *key);
    }
    // break the sort order behind the index's back.
    let root = index.root.unwrap();
    index.nodes[root].key = 0;
    index.insert(1000, 1000);
}
