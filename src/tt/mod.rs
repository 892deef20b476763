//! Transposition table for caching search results.
//!
//! Uses Zobrist keys to store and retrieve position evaluations,
//! enabling significant search tree pruning.
//!
//! This implementation uses lockless hashing for thread-safe access
//! in multi-threaded (Lazy SMP) search. Entries are stored as atomic
//! u64 pairs using XOR verification to detect torn reads, so a racing
//! reader sees a miss rather than a move and score from different writes.

mod entry;
pub mod score;

use std::mem;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

use crate::board::Move;
use crate::zobrist::PositionKey;
use crate::logging::{tt_debug, tt_trace};

pub use entry::{BoundType, TTEntry};
use entry::{
    pack_entry, packed_depth, packed_generation, packed_move, unpack_entry, with_generation,
    GENERATION_MASK,
};
use score::{to_table_value, MAX_DEPTH, MAX_PLY, VALUE_MAX, VALUE_MIN};

/// Number of slots per bucket for collision resolution
pub const BUCKET_SIZE: usize = 4;

/// Table size used when the caller does not pick one.
pub const DEFAULT_TT_MB: usize = 16;

/// A single TT slot using lockless hashing.
///
/// Uses the XOR technique: stores (key ^ data) and data separately.
/// On read, we verify by checking if (stored_key ^ data) equals the probe key.
/// This detects torn reads from concurrent writes.
#[repr(C)]
struct TTSlot {
    /// Stores: key ^ packed_data
    key_xor: AtomicU64,
    /// Stores: packed_data, 0 when empty
    data: AtomicU64,
}

impl TTSlot {
    fn new() -> Self {
        TTSlot {
            key_xor: AtomicU64::new(0),
            data: AtomicU64::new(0),
        }
    }

    fn write(&self, key: PositionKey, packed: u64) {
        // Data first, then key_xor: a reader that sees the new key_xor with
        // the old data fails verification.
        self.data.store(packed, Ordering::Relaxed);
        self.key_xor.store(key.as_u64() ^ packed, Ordering::Relaxed);
    }

    /// Packed data if the slot holds `key` and the read was not torn.
    fn read(&self, key: PositionKey) -> Option<u64> {
        let key_xor = self.key_xor.load(Ordering::Relaxed);
        let data = self.data.load(Ordering::Relaxed);

        if data != 0 && key_xor ^ data == key.as_u64() {
            Some(data)
        } else {
            None
        }
    }

    /// Replace `seen` with `refreshed` unless another write landed since
    /// `seen` was read. Returns true if the slot was updated.
    fn refresh(&self, key: PositionKey, seen: u64, refreshed: u64) -> bool {
        if self
            .data
            .compare_exchange(seen, refreshed, Ordering::Relaxed, Ordering::Relaxed)
            .is_err()
        {
            return false;
        }
        self.key_xor.store(key.as_u64() ^ refreshed, Ordering::Relaxed);
        true
    }

    fn reset(&self) {
        self.key_xor.store(0, Ordering::Relaxed);
        self.data.store(0, Ordering::Relaxed);
    }

    fn is_empty(&self) -> bool {
        self.data.load(Ordering::Relaxed) == 0
    }
}

/// A bucket containing multiple slots
#[repr(C)]
struct TTBucket {
    slots: [TTSlot; BUCKET_SIZE],
}

impl TTBucket {
    fn new() -> Self {
        TTBucket {
            slots: std::array::from_fn(|_| TTSlot::new()),
        }
    }
}

/// Thread-safe transposition table using lockless hashing.
///
/// A fixed number of buckets, each holding [`BUCKET_SIZE`] slots. A key maps
/// to bucket `key mod bucket_count` and may live in any slot of it.
/// Multiple threads can read and write concurrently without locks.
pub struct TranspositionTable {
    buckets: Vec<TTBucket>,
    generation: AtomicU8,
}

impl TranspositionTable {
    /// Create a table of `bucket_count` empty buckets at generation 0.
    #[must_use]
    pub fn new(bucket_count: usize) -> Self {
        debug_assert!(bucket_count > 0, "transposition table needs at least one bucket");
        let bucket_count = bucket_count.max(1);

        let buckets = (0..bucket_count).map(|_| TTBucket::new()).collect();
        tt_debug!(
            "allocated transposition table: {} buckets, {} KiB",
            bucket_count,
            bucket_count * mem::size_of::<TTBucket>() / 1024
        );

        TranspositionTable {
            buckets,
            generation: AtomicU8::new(0),
        }
    }

    /// Create a transposition table with the given size in megabytes.
    #[must_use]
    pub fn with_size_mb(size_mb: usize) -> Self {
        Self::new(Self::buckets_for_mb(size_mb))
    }

    fn buckets_for_mb(size_mb: usize) -> usize {
        let bucket_size = mem::size_of::<TTBucket>();
        ((size_mb * 1024 * 1024) / bucket_size).max(1)
    }

    /// Reallocate to `size_mb` megabytes. All entries are lost.
    pub fn resize(&mut self, size_mb: usize) {
        *self = Self::with_size_mb(size_mb);
    }

    #[inline]
    fn bucket(&self, key: PositionKey) -> &TTBucket {
        let index = (key.as_u64() % self.buckets.len() as u64) as usize;
        &self.buckets[index]
    }

    /// Current generation, in `0..64`.
    #[must_use]
    pub fn generation(&self) -> u8 {
        self.generation.load(Ordering::Relaxed)
    }

    /// Start a new search generation. Called once per search, not per node.
    pub fn new_generation(&self) {
        let advance = |g: u8| Some(g.wrapping_add(1) & GENERATION_MASK);
        // The closure never returns None, so the update cannot fail.
        if let Ok(previous) =
            self.generation
                .fetch_update(Ordering::Relaxed, Ordering::Relaxed, advance)
        {
            tt_trace!(
                "transposition table generation {} -> {}",
                previous,
                (previous + 1) & GENERATION_MASK
            );
        }
    }

    /// Look up `key`, accepting only entries searched to at least `min_depth`.
    ///
    /// A hit refreshes the entry's generation so replacement treats it as
    /// current. Entries that are too shallow are reported as misses.
    ///
    /// The refresh is skipped if another thread rewrote the slot after it was
    /// read, so a concurrent `store` is never undone by stale data. The
    /// returned entry is the one that was read.
    pub fn probe(&self, key: PositionKey, min_depth: u32) -> Option<TTEntry> {
        let current = self.generation();
        self.bucket(key).slots.iter().find_map(|slot| {
            let data = slot.read(key)?;
            if u32::from(packed_depth(data)) < min_depth {
                return None;
            }
            if packed_generation(data) == current {
                return Some(unpack_entry(key, data));
            }
            let refreshed = with_generation(data, current);
            let data = if slot.refresh(key, data, refreshed) {
                refreshed
            } else {
                data
            };
            Some(unpack_entry(key, data))
        })
    }

    /// Store a search result.
    ///
    /// `score` is root-relative as seen at `ply`; mate scores are converted
    /// to node-relative form before storing. A slot already holding `key` is
    /// updated in place, keeping its best move when `best_move` is `None`.
    /// Otherwise an empty slot is used, or the slot with the oldest
    /// generation, shallowest depth first, is replaced.
    pub fn store(
        &self,
        key: PositionKey,
        depth: u32,
        score: i32,
        ply: usize,
        bound_type: BoundType,
        best_move: Option<Move>,
    ) {
        debug_assert!(depth <= MAX_DEPTH, "depth {depth} out of range");
        debug_assert!((VALUE_MIN..=VALUE_MAX).contains(&score), "score {score} out of range");
        debug_assert!(ply < MAX_PLY, "ply {ply} out of range");

        let current = self.generation();
        let stored_score = to_table_value(score, ply) as i16;
        let bucket = self.bucket(key);

        // Same position: update in place.
        for slot in &bucket.slots {
            if let Some(existing) = slot.read(key) {
                let best_move = best_move.or_else(|| packed_move(existing));
                slot.write(
                    key,
                    pack_entry(depth as u8, stored_score, bound_type, best_move, current),
                );
                return;
            }
        }

        let packed = pack_entry(depth as u8, stored_score, bound_type, best_move, current);
        let victim = bucket
            .slots
            .iter()
            .find(|slot| slot.is_empty())
            .unwrap_or_else(|| Self::replacement_victim(bucket, current));
        victim.write(key, packed);
    }

    /// Slot with the smallest (generation, depth) pair. Generations are
    /// compared by age relative to `current` so the order survives the
    /// counter wrapping.
    fn replacement_victim(bucket: &TTBucket, current: u8) -> &TTSlot {
        let mut victim = &bucket.slots[0];
        let mut worst = (0u8, u8::MAX);

        for slot in &bucket.slots {
            let data = slot.data.load(Ordering::Relaxed);
            let age = current.wrapping_sub(packed_generation(data)) & GENERATION_MASK;
            let depth = packed_depth(data);
            // Older first, then shallower. Ties keep the earlier slot.
            if age > worst.0 || (age == worst.0 && depth < worst.1) {
                victim = slot;
                worst = (age, depth);
            }
        }

        victim
    }

    /// Number of buckets.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of slots.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.buckets.len() * BUCKET_SIZE
    }

    /// Number of occupied slots across the whole table.
    #[must_use]
    pub fn occupied_slots(&self) -> usize {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.slots.iter())
            .filter(|slot| !slot.is_empty())
            .count()
    }

    /// Returns hash table fullness in per mille (0-1000).
    ///
    /// Only slots written during the current generation count, matching the
    /// UCI `hashfull` convention.
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        // Sample first 1000 buckets for efficiency
        let sample_size = self.buckets.len().min(1000);
        let current = self.generation();
        let mut occupied = 0u64;

        for bucket in self.buckets.iter().take(sample_size) {
            for slot in &bucket.slots {
                let data = slot.data.load(Ordering::Relaxed);
                if data != 0 && packed_generation(data) == current {
                    occupied += 1;
                }
            }
        }

        let total_slots = (sample_size * BUCKET_SIZE) as u64;
        ((occupied * 1000) / total_slots) as u32
    }

    /// Clear all entries from the table and reset the generation to 0.
    pub fn clear(&self) {
        for bucket in &self.buckets {
            for slot in &bucket.slots {
                slot.reset();
            }
        }
        self.generation.store(0, Ordering::Relaxed);
        tt_debug!("cleared transposition table ({} buckets)", self.buckets.len());
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::with_size_mb(DEFAULT_TT_MB)
    }
}
