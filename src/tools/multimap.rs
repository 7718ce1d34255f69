//! Cacheline-bucket unordered multimaps for the meet-in-the-middle stages
//!
//! Buckets are exactly one cacheline and hold as many key/value pairs as
//! fit next to a 1-byte fill counter; full buckets overflow into the next
//! bucket. Bucket selection is `hash(k) % p` for a table prime p with
//! precomputed fast-mod constants. The batched variant queues operations
//! and prefetches each target cacheline when the operation enters the
//! queue, so the data is already in L1/L2 when the queue drains.

use super::hash_primes::{self, HashPrime};

/// Pairs per 64-byte bucket: floor((64 - 1) / (8 + 8)).
const BUCKET_SIZE: usize = (CACHELINE_SIZE - 1) / 16;
const CACHELINE_SIZE: usize = 64;

pub const DEFAULT_MAX_LOAD_FACTOR: f32 = 0.9;
pub const DEFAULT_SCALE_FACTOR: f32 = 1.5;
pub const DEFAULT_GROW_FACTOR: f32 = 1.4;
pub const DEFAULT_INSERT_BATCH_SIZE: usize = 128;
pub const DEFAULT_MATCH_BATCH_SIZE: usize = 128;

/// Keys first: u64 keys and u64 values share alignment, keys break the tie.
#[derive(Clone, Copy)]
#[repr(C, align(64))]
struct Bucket {
    keys: [u64; BUCKET_SIZE],
    values: [u64; BUCKET_SIZE],
    len: u8,
}

const _: () = assert!(std::mem::size_of::<Bucket>() == CACHELINE_SIZE);
const _: () = assert!(std::mem::align_of::<Bucket>() == CACHELINE_SIZE);
const _: () = assert!(BUCKET_SIZE > 0 && BUCKET_SIZE <= u8::MAX as usize);

impl Bucket {
    const EMPTY: Bucket = Bucket { keys: [0; BUCKET_SIZE], values: [0; BUCKET_SIZE], len: 0 };
}

#[inline(always)]
fn prefetch<T>(p: *const T) {
    #[cfg(target_arch = "x86_64")]
    unsafe {
        use std::arch::x86_64::{_MM_HINT_T0, _mm_prefetch};
        _mm_prefetch(p as *const i8, _MM_HINT_T0);
    }
    #[cfg(not(target_arch = "x86_64"))]
    let _ = p;
}

/// Plain cacheline-bucket unordered multimap over u64 keys and values.
pub struct CachelineMultimap {
    max_load_factor: f32,
    grow_factor: f32,
    size: usize,
    max_size: usize,
    reserved_size: usize,
    auto_grow: bool,
    hp: HashPrime,
    map: Vec<Bucket>,
}

impl CachelineMultimap {
    pub fn new() -> Self {
        CachelineMultimap {
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            grow_factor: DEFAULT_GROW_FACTOR,
            size: 0,
            max_size: 0,
            reserved_size: 1,
            auto_grow: false,
            hp: hash_primes::get_hash_prime_ge(3).expect("table holds 3"),
            map: Vec::new(),
        }
    }

    /// Enable rehash-on-full instead of rejecting inserts.
    pub fn set_auto_grow(&mut self, grow: bool) {
        self.auto_grow = grow;
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }

    pub fn bucket_count(&self) -> usize {
        self.reserved_size
    }

    /// Reserve for `elements` entries scaled by `scale` (lower-bounded by
    /// the load-factor reciprocal); picks the next fast prime bucket count.
    pub fn reserve(&mut self, elements: usize, scale: f32) {
        let scale = scale.max(1.0 / self.max_load_factor);
        let buckets = (elements as f32 * scale / BUCKET_SIZE as f32) as usize;
        self.rehash(buckets);
    }

    fn reserve_buckets(&mut self, buckets: usize) {
        debug_assert!(self.is_empty());
        self.hp = hash_primes::get_hash_prime_ge(buckets.max(1) as u64)
            .expect("bucket count exceeds the prime table");
        self.reserved_size = self.hp.prime() as usize * BUCKET_SIZE;
        self.max_size = (self.reserved_size as f32 * self.max_load_factor) as usize;
        // one spare bucket so overflow prefetch of bucket p stays in bounds
        self.map.clear();
        self.map.resize(self.hp.prime() as usize + 1, Bucket::EMPTY);
    }

    /// Resize to a new bucket count, rehashing current contents. Returns
    /// false when the shrink would violate the load factor.
    pub fn rehash(&mut self, buckets: usize) -> bool {
        if self.is_empty() {
            self.reserve_buckets(buckets);
            return true;
        }
        if (buckets * BUCKET_SIZE) as f32 * self.max_load_factor <= self.size as f32 {
            return false;
        }
        let mut tmp = CachelineMultimap::new();
        tmp.max_load_factor = self.max_load_factor;
        tmp.grow_factor = self.grow_factor;
        tmp.auto_grow = self.auto_grow;
        tmp.reserve_buckets(buckets);
        for b in &self.map {
            for j in 0..b.len as usize {
                tmp.insert(b.keys[j], b.values[j]);
            }
        }
        *self = tmp;
        true
    }

    /// Drop all entries, keeping the allocation.
    pub fn clear(&mut self) {
        self.size = 0;
        self.map.fill(Bucket::EMPTY);
    }

    #[inline]
    pub fn bucket(&self, k: u64) -> u64 {
        self.hp.modulo(hash_primes::hash_u64(k))
    }

    #[inline]
    pub fn prefetch_key(&self, k: u64) {
        let b = self.bucket(k);
        prefetch(&self.map[b as usize]);
    }

    /// Insert into the first non-full bucket from `bucket(k)` on; duplicate
    /// keys are stored. False when the map is at capacity (unless growing).
    pub fn insert(&mut self, k: u64, v: u64) -> bool {
        if self.size >= self.max_size {
            if !self.auto_grow {
                return false;
            }
            let target = (self.hp.prime() as f32 * self.grow_factor) as usize + 1;
            self.rehash(target);
        }
        self.size += 1;
        let mut b = self.bucket(k) as usize;
        loop {
            let bucket = &mut self.map[b];
            if bucket.len as usize == BUCKET_SIZE {
                b += 1;
                if b as u64 == self.hp.prime() {
                    b = 0;
                }
                continue;
            }
            let j = bucket.len as usize;
            bucket.keys[j] = k;
            bucket.values[j] = v;
            bucket.len += 1;
            return true;
        }
    }

    /// Call `f(v)` for every entry with key `k`, probing from `bucket(k)`
    /// and stopping at the first non-full bucket.
    pub fn match_key(&self, k: u64, mut f: impl FnMut(u64)) {
        let mut b = self.bucket(k) as usize;
        loop {
            let bucket = &self.map[b];
            if (bucket.len as usize) < BUCKET_SIZE {
                for j in 0..bucket.len as usize {
                    if bucket.keys[j] == k {
                        f(bucket.values[j]);
                    }
                }
                return;
            }
            prefetch(&self.map[b + 1]);
            for j in 0..BUCKET_SIZE {
                if bucket.keys[j] == k {
                    f(bucket.values[j]);
                }
            }
            b += 1;
            if b as u64 == self.hp.prime() {
                b = 0;
            }
        }
    }
}

impl Default for CachelineMultimap {
    fn default() -> Self {
        CachelineMultimap::new()
    }
}

#[derive(Clone, Copy, Default)]
struct InsertItem {
    key: u64,
    value: u64,
    bucket: usize,
}

#[derive(Clone, Copy, Default)]
struct MatchItem {
    key: u64,
    aux: u64,
    bucket: usize,
}

/// Batched variant: inserts and matches go through fixed-size queues; each
/// queued item prefetches its bucket, the whole queue is drained when full.
/// `finalize_insert` must run before matching, `finalize_match` before
/// reading results as complete.
pub struct BatchMultimap {
    inner: CachelineMultimap,
    insert_batch_size: usize,
    match_batch_size: usize,
    insert_queue: Vec<InsertItem>,
    insert_count: usize,
    match_queue: Vec<MatchItem>,
    match_count: usize,
}

impl BatchMultimap {
    pub fn new() -> Self {
        BatchMultimap {
            inner: CachelineMultimap::new(),
            insert_batch_size: DEFAULT_INSERT_BATCH_SIZE,
            match_batch_size: DEFAULT_MATCH_BATCH_SIZE,
            insert_queue: vec![InsertItem::default(); DEFAULT_INSERT_BATCH_SIZE],
            insert_count: 0,
            match_queue: vec![MatchItem::default(); DEFAULT_MATCH_BATCH_SIZE],
            match_count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub fn reserve(&mut self, elements: usize, scale: f32) {
        self.inner.reserve(elements, scale);
    }

    /// Drop contents and pending queue entries, keeping allocations.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.insert_count = 0;
        self.match_count = 0;
    }

    /// Queue an insert; the target cacheline is prefetched now and the
    /// queue drained once full. False when the map is at capacity.
    pub fn queue_insert(&mut self, k: u64, v: u64) -> bool {
        if self.inner.size >= self.inner.max_size {
            return false;
        }
        self.inner.size += 1;
        let b = self.inner.bucket(k) as usize;
        prefetch(&self.inner.map[b]);
        self.insert_queue[self.insert_count] = InsertItem { key: k, value: v, bucket: b };
        self.insert_count += 1;
        if self.insert_count == self.insert_batch_size {
            self.process_insert_queue();
        }
        true
    }

    fn process_insert_queue(&mut self) -> bool {
        loop {
            let e = self.insert_count;
            self.insert_count = 0;
            for i in 0..e {
                let item = self.insert_queue[i];
                let bucket = &mut self.inner.map[item.bucket];
                if bucket.len as usize == BUCKET_SIZE {
                    // full: requeue at the next bucket and prefetch it
                    let mut b = item.bucket + 1;
                    if b as u64 == self.inner.hp.prime() {
                        b = 0;
                    }
                    prefetch(&self.inner.map[b]);
                    self.insert_queue[self.insert_count] =
                        InsertItem { bucket: b, ..item };
                    self.insert_count += 1;
                    continue;
                }
                let j = bucket.len as usize;
                bucket.keys[j] = item.key;
                bucket.values[j] = item.value;
                bucket.len += 1;
            }
            if self.insert_count != self.insert_batch_size {
                break;
            }
        }
        self.insert_count == 0
    }

    /// Drain the insert queue completely.
    pub fn finalize_insert(&mut self) {
        while !self.process_insert_queue() {}
    }

    /// Queue a key lookup with caller context `aux`; `f(aux, key, value)`
    /// fires for every match once the queue drains.
    pub fn queue_match(&mut self, k: u64, aux: u64, f: &mut impl FnMut(u64, u64, u64)) {
        let b = self.inner.bucket(k) as usize;
        prefetch(&self.inner.map[b]);
        self.match_queue[self.match_count] = MatchItem { key: k, aux, bucket: b };
        self.match_count += 1;
        if self.match_count == self.match_batch_size {
            self.process_match_queue(f);
        }
    }

    fn process_match_queue(&mut self, f: &mut impl FnMut(u64, u64, u64)) -> bool {
        loop {
            let e = self.match_count;
            self.match_count = 0;
            for i in 0..e {
                let item = self.match_queue[i];
                let bucket = &self.inner.map[item.bucket];
                if (bucket.len as usize) < BUCKET_SIZE {
                    for j in 0..bucket.len as usize {
                        if bucket.keys[j] == item.key {
                            f(item.aux, item.key, bucket.values[j]);
                        }
                    }
                } else {
                    for j in 0..BUCKET_SIZE {
                        if bucket.keys[j] == item.key {
                            f(item.aux, item.key, bucket.values[j]);
                        }
                    }
                    let mut b = item.bucket + 1;
                    if b as u64 == self.inner.hp.prime() {
                        b = 0;
                    }
                    prefetch(&self.inner.map[b]);
                    self.match_queue[self.match_count] = MatchItem { bucket: b, ..item };
                    self.match_count += 1;
                }
            }
            if self.match_count != self.match_batch_size {
                break;
            }
        }
        self.match_count == 0
    }

    /// Drain the match queue completely.
    pub fn finalize_match(&mut self, f: &mut impl FnMut(u64, u64, u64)) {
        while !self.process_match_queue(f) {}
    }
}

impl Default for BatchMultimap {
    fn default() -> Self {
        BatchMultimap::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_layout() {
        assert_eq!(BUCKET_SIZE, 3);
        assert_eq!(std::mem::size_of::<Bucket>(), 64);
    }

    #[test]
    fn test_insert_and_match_duplicates() {
        let mut map = CachelineMultimap::new();
        map.reserve(100, 2.0);
        assert!(map.insert(42, 1));
        assert!(map.insert(42, 2));
        assert!(map.insert(7, 3));
        let mut got = Vec::new();
        map.match_key(42, |v| got.push(v));
        got.sort_unstable();
        assert_eq!(got, vec![1, 2]);
        let mut got7 = Vec::new();
        map.match_key(7, |v| got7.push(v));
        assert_eq!(got7, vec![3]);
        let mut none = Vec::new();
        map.match_key(1000, |v| none.push(v));
        assert!(none.is_empty());
    }

    #[test]
    fn test_overflow_probing() {
        let mut map = CachelineMultimap::new();
        map.reserve(60, 2.0);
        let p = map.hp.prime();
        // force many collisions into one bucket chain
        for i in 0..12u64 {
            assert!(map.insert(5 + i * p, i));
        }
        let mut got = Vec::new();
        map.match_key(5, |v| got.push(v));
        assert_eq!(got, vec![0]);
        let mut got2 = Vec::new();
        map.match_key(5 + p, |v| got2.push(v));
        assert_eq!(got2, vec![1]);
    }

    #[test]
    fn test_capacity_and_clear() {
        let mut map = CachelineMultimap::new();
        map.reserve(10, 2.0);
        let cap = map.capacity();
        let mut inserted = 0;
        while map.insert(inserted as u64, 0) {
            inserted += 1;
            assert!(inserted <= cap + 1);
        }
        assert_eq!(inserted, cap);
        map.clear();
        assert!(map.is_empty());
        assert!(map.insert(1, 1));
    }

    #[test]
    fn test_auto_grow() {
        let mut map = CachelineMultimap::new();
        map.set_auto_grow(true);
        map.reserve(4, 1.2);
        for i in 0..500u64 {
            assert!(map.insert(i, i * 10));
        }
        assert_eq!(map.len(), 500);
        let mut got = Vec::new();
        map.match_key(250, |v| got.push(v));
        assert_eq!(got, vec![2500]);
    }

    #[test]
    fn test_rehash_preserves_entries() {
        let mut map = CachelineMultimap::new();
        map.reserve(50, 2.0);
        for i in 0..40u64 {
            map.insert(i, i + 1000);
        }
        assert!(map.rehash(200));
        for i in 0..40u64 {
            let mut got = Vec::new();
            map.match_key(i, |v| got.push(v));
            assert_eq!(got, vec![i + 1000]);
        }
    }

    #[test]
    fn test_batched_insert_match() {
        let mut map = BatchMultimap::new();
        map.reserve(1000, 2.0);
        for i in 0..700u64 {
            assert!(map.queue_insert(i % 350, i));
        }
        map.finalize_insert();
        assert_eq!(map.len(), 700);
        let mut hits = Vec::new();
        {
            let mut collect = |aux: u64, _k: u64, v: u64| hits.push((aux, v));
            map.queue_match(17, 99, &mut collect);
            map.finalize_match(&mut collect);
        }
        hits.sort_unstable();
        assert_eq!(hits, vec![(99, 17), (99, 367)]);
    }

    #[test]
    fn test_batched_queue_wraps() {
        let mut map = BatchMultimap::new();
        map.reserve(4000, 2.0);
        // more than one queue length of inserts and matches
        for i in 0..3000u64 {
            assert!(map.queue_insert(i, i));
        }
        map.finalize_insert();
        let mut count = 0usize;
        {
            let mut f = |_aux: u64, k: u64, v: u64| {
                assert_eq!(k, v);
                count += 1;
            };
            for i in 0..3000u64 {
                map.queue_match(i, 0, &mut f);
            }
            map.finalize_match(&mut f);
        }
        assert_eq!(count, 3000);
    }
}
