//! Character bitmap cache
//!
//! Memoizes successful glyph lookups by (character, font size). Entries live
//! as long as the cache and are never evicted; a display session only ever
//! sees a bounded set of characters. Failures are not cached, so a later
//! lookup of the same key goes back to the source.

use alloc::collections::BTreeMap;
use alloc::rc::Rc;

use glyphcast_protocol::FontSize;

use crate::bitmap::Glyph;
use crate::error::FetchError;
use crate::traits::GlyphSource;

/// Cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CacheKey {
    pub character: char,
    pub font_size: FontSize,
}

impl CacheKey {
    pub const fn new(character: char, font_size: FontSize) -> Self {
        Self {
            character,
            font_size,
        }
    }
}

/// Lookup counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u32,
    /// Lookups that went to the source (successful or not)
    pub misses: u32,
}

/// Glyph cache in front of a [`GlyphSource`]
pub struct GlyphCache<S> {
    source: S,
    entries: BTreeMap<CacheKey, Rc<Glyph>>,
    stats: CacheStats,
}

impl<S: GlyphSource> GlyphCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries: BTreeMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Return the cached glyph, fetching and storing it on a miss
    pub fn get_or_fetch(
        &mut self,
        character: char,
        font_size: FontSize,
    ) -> Result<Rc<Glyph>, FetchError> {
        let key = CacheKey::new(character, font_size);

        if let Some(glyph) = self.entries.get(&key) {
            self.stats.hits = self.stats.hits.saturating_add(1);
            trace!("cache hit {} @{}", character, font_size);
            return Ok(Rc::clone(glyph));
        }

        self.stats.misses = self.stats.misses.saturating_add(1);
        trace!("cache miss {} @{}", character, font_size);

        let glyph = Rc::new(self.source.fetch_glyph(character, font_size)?);
        self.entries.insert(key, Rc::clone(&glyph));
        Ok(glyph)
    }

    /// Check whether a key is cached, without fetching
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of cached glyphs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Access the underlying source
    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Bitmap;
    use crate::traits::NetworkError;

    /// Serves a glyph whose width encodes the character, failing on demand
    struct CountingSource {
        calls: u32,
        fail_next: u32,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                calls: 0,
                fail_next: 0,
            }
        }
    }

    impl GlyphSource for CountingSource {
        fn fetch_glyph(&mut self, character: char, size: FontSize) -> Result<Glyph, FetchError> {
            self.calls += 1;
            if self.fail_next > 0 {
                self.fail_next -= 1;
                return Err(FetchError::Network(NetworkError::Unreachable));
            }
            let width = (character as u32 % 7) + 1;
            let mut bitmap = Bitmap::new(width, size.get() as u32);
            crate::bitmap::Canvas::set_pixel(&mut bitmap, 0, 0);
            Ok(Glyph::new(bitmap).unwrap())
        }
    }

    #[test]
    fn test_miss_then_hit() {
        let mut cache = GlyphCache::new(CountingSource::new());

        let first = cache.get_or_fetch('好', FontSize::DEFAULT).unwrap();
        let second = cache.get_or_fetch('好', FontSize::DEFAULT).unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.source().calls, 1);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_font_size_is_part_of_key() {
        let mut cache = GlyphCache::new(CountingSource::new());
        let small = FontSize::new(12).unwrap();

        cache.get_or_fetch('A', FontSize::DEFAULT).unwrap();
        let glyph = cache.get_or_fetch('A', small).unwrap();

        assert_eq!(glyph.height(), 12);
        assert_eq!(cache.source().calls, 2);
        assert!(cache.contains(&CacheKey::new('A', small)));
        assert!(cache.contains(&CacheKey::new('A', FontSize::DEFAULT)));
        assert!(!cache.contains(&CacheKey::new('B', small)));
    }

    #[test]
    fn test_failures_are_not_cached() {
        let mut source = CountingSource::new();
        source.fail_next = 1;
        let mut cache = GlyphCache::new(source);

        assert!(cache.get_or_fetch('A', FontSize::DEFAULT).is_err());
        assert!(cache.is_empty());

        // Recovers on the next attempt
        assert!(cache.get_or_fetch('A', FontSize::DEFAULT).is_ok());
        assert_eq!(cache.source().calls, 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().misses, 2);
    }
}
