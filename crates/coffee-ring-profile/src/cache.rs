//! Caller-owned memoization of radial profiles.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use coffee_ring_core::{PixelPoint, RgbImageView};

use crate::sampler::{sample_rgb, RgbRadialProfile};

/// Identity of one sampling request.
///
/// The pixels enter only through a 64-bit [`image_digest`], so two different
/// buffers of the same size can collide and share an entry. The odds are
/// negligible for a working set of a few images; callers that cannot accept
/// them should sample without a cache.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ProfileKey {
    pub image_digest: u64,
    pub width: usize,
    pub height: usize,
    pub center: PixelPoint,
    pub radius: u32,
}

impl ProfileKey {
    pub fn new(img: &RgbImageView<'_>, center: PixelPoint, radius: u32) -> Self {
        Self {
            image_digest: image_digest(img),
            width: img.width,
            height: img.height,
            center,
            radius,
        }
    }
}

/// Content hash of the pixel buffer.
pub fn image_digest(img: &RgbImageView<'_>) -> u64 {
    let mut h = DefaultHasher::new();
    img.width.hash(&mut h);
    img.height.hash(&mut h);
    img.data.hash(&mut h);
    h.finish()
}

/// Entry limit of [`ProfileCache::new`].
pub const DEFAULT_CACHE_ENTRIES: usize = 64;

/// Results of `sample_rgb` keyed by identical inputs.
///
/// A miss recomputes, a hit returns the stored value. At most `limit` entries
/// are kept; inserting past the limit evicts the oldest entry.
#[derive(Debug)]
pub struct ProfileCache {
    entries: HashMap<ProfileKey, Arc<RgbRadialProfile>>,
    order: VecDeque<ProfileKey>,
    limit: usize,
    hits: usize,
    misses: usize,
}

impl Default for ProfileCache {
    fn default() -> Self {
        Self::with_capacity_limit(DEFAULT_CACHE_ENTRIES)
    }
}

impl ProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache holding at most `limit` profiles. A limit of 0 stores nothing.
    pub fn with_capacity_limit(limit: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            limit,
            hits: 0,
            misses: 0,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn get_or_sample(
        &mut self,
        img: &RgbImageView<'_>,
        center: PixelPoint,
        radius: u32,
    ) -> Arc<RgbRadialProfile> {
        let key = ProfileKey::new(img, center, radius);
        if let Some(hit) = self.entries.get(&key) {
            self.hits += 1;
            log::debug!("profile cache hit ({center}) r {radius}");
            return Arc::clone(hit);
        }
        self.misses += 1;
        let profile = Arc::new(sample_rgb(img, center, radius));
        if self.limit == 0 {
            return profile;
        }
        while self.entries.len() >= self.limit {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            log::debug!("profile cache evicted ({}) r {}", oldest.center, oldest.radius);
        }
        self.entries.insert(key, Arc::clone(&profile));
        self.order.push_back(key);
        profile
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation or the last `clear`.
    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coffee_ring_core::RgbImage;

    #[test]
    fn identical_request_is_served_from_cache() {
        let img = RgbImage::filled(30, 30, [5, 6, 7]);
        let mut cache = ProfileCache::new();
        let a = cache.get_or_sample(&img.view(), PixelPoint::new(15, 15), 10);
        let b = cache.get_or_sample(&img.view(), PixelPoint::new(15, 15), 10);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.stats(), (1, 1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn changed_pixels_miss() {
        let mut img = RgbImage::filled(30, 30, [5, 6, 7]);
        let mut cache = ProfileCache::new();
        let a = cache.get_or_sample(&img.view(), PixelPoint::new(15, 15), 4);
        img.put_pixel(15, 15, [250, 0, 0]);
        let b = cache.get_or_sample(&img.view(), PixelPoint::new(15, 15), 4);
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(b.r.mean[0], 250.0);
        assert_eq!(cache.stats(), (0, 2));
    }

    #[test]
    fn full_cache_evicts_oldest_entry() {
        let img = RgbImage::filled(20, 20, [3, 3, 3]);
        let mut cache = ProfileCache::with_capacity_limit(2);
        let first = cache.get_or_sample(&img.view(), PixelPoint::new(10, 10), 1);
        cache.get_or_sample(&img.view(), PixelPoint::new(10, 10), 2);
        cache.get_or_sample(&img.view(), PixelPoint::new(10, 10), 3);
        assert_eq!(cache.len(), 2);

        let again = cache.get_or_sample(&img.view(), PixelPoint::new(10, 10), 1);
        assert!(!Arc::ptr_eq(&first, &again));
        assert_eq!(cache.stats(), (0, 4));
        assert_eq!(cache.len(), 2);

        cache.get_or_sample(&img.view(), PixelPoint::new(10, 10), 3);
        assert_eq!(cache.stats(), (1, 4));
    }

    #[test]
    fn zero_limit_stores_nothing() {
        let img = RgbImage::filled(8, 8, [1, 1, 1]);
        let mut cache = ProfileCache::with_capacity_limit(0);
        cache.get_or_sample(&img.view(), PixelPoint::new(4, 4), 2);
        cache.get_or_sample(&img.view(), PixelPoint::new(4, 4), 2);
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), (0, 2));
        assert_eq!(ProfileCache::new().limit(), DEFAULT_CACHE_ENTRIES);
    }

    #[test]
    fn clear_resets_counters() {
        let img = RgbImage::filled(8, 8, [1, 1, 1]);
        let mut cache = ProfileCache::new();
        cache.get_or_sample(&img.view(), PixelPoint::new(4, 4), 2);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), (0, 0));
    }
}
