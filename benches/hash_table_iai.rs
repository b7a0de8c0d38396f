#[cfg(target_os = "linux")]
mod bench {
    use iai::black_box;
    use stride_hashtable::HashTable;

    const OPS: usize = 1_000;

    fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
        std::iter::from_fn(move || {
            s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
            Some(s)
        })
    }

    fn key(n: u64) -> String {
        format!("k{:016x}", n)
    }

    // Insert 1k entries, growing from the default capacity.
    pub fn table_put_1000_ops() {
        let mut t = HashTable::<String, u64>::new();
        for (i, x) in lcg(1).take(OPS).enumerate() {
            t.put(key(x), i as u64);
        }
        black_box(t);
    }

    // Repeated hits on existing keys.
    pub fn table_get_hit_1000_ops() {
        let mut t = HashTable::new();
        let keys: Vec<_> = lcg(7).take(OPS * 2).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            t.put(k.clone(), i as u64);
        }
        let mut it = keys.iter().cycle();
        for _ in 0..OPS {
            let k = it.next().unwrap();
            black_box(t.get(k.as_str()));
        }
    }

    // Repeated misses for keys unlikely to be present.
    pub fn table_get_miss_1000_ops() {
        let mut t = HashTable::new();
        for (i, x) in lcg(11).take(OPS).enumerate() {
            t.put(key(x), i as u64);
        }
        let mut miss = lcg(0xdead_beef);
        for _ in 0..OPS {
            let k = key(miss.next().unwrap());
            black_box(t.get(k.as_str()));
        }
    }

    // Remove and reinsert one key; its tombstone is reused every time.
    pub fn table_remove_reinsert_1000_ops() {
        let mut t = HashTable::new();
        for _ in 0..OPS {
            t.put("k".to_string(), 1u64);
            black_box(t.remove("k"));
        }
    }
}

#[cfg(target_os = "linux")]
use bench::{
    table_get_hit_1000_ops, table_get_miss_1000_ops, table_put_1000_ops,
    table_remove_reinsert_1000_ops,
};

#[cfg(target_os = "linux")]
iai::main!(
    table_put_1000_ops,
    table_get_hit_1000_ops,
    table_get_miss_1000_ops,
    table_remove_reinsert_1000_ops
);

#[cfg(not(target_os = "linux"))]
fn main() {
    eprintln!("Skipping: iai benches require Linux/valgrind.");
}
