// Sat Oct 17 2026 - Alex

use indexmap::IndexMap;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

/// Integer types a [`Tally`] can count in. Counts stop at the type's maximum.
pub trait Count: Copy {
    const ONE: Self;

    fn bump(self) -> Self;
}

macro_rules! impl_count {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Count for $ty {
                const ONE: Self = 1;

                fn bump(self) -> Self {
                    self.saturating_add(1)
                }
            }
        )*
    };
}

impl_count!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Add-or-increment counting for maps with integer values.
pub trait Tally<K, V> {
    /// Inserts 1 for a new key, otherwise adds 1, saturating. Returns the new count.
    fn increment(&mut self, key: K) -> V;
}

impl<K, V, S> Tally<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash,
    V: Count,
    S: BuildHasher,
{
    fn increment(&mut self, key: K) -> V {
        let count = self
            .entry(key)
            .and_modify(|v| *v = v.bump())
            .or_insert(V::ONE);
        *count
    }
}

impl<K, V, S> Tally<K, V> for IndexMap<K, V, S>
where
    K: Eq + Hash,
    V: Count,
    S: BuildHasher,
{
    fn increment(&mut self, key: K) -> V {
        let count = self
            .entry(key)
            .and_modify(|v| *v = v.bump())
            .or_insert(V::ONE);
        *count
    }
}
