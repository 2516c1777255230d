use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Width/height ratios cycled through for tiles without a real image.
const PLACEHOLDER_ASPECTS: [f32; 7] = [
    3.0 / 4.0,
    4.0 / 3.0,
    2.0 / 3.0,
    3.0 / 2.0,
    1.0,
    9.0 / 16.0,
    16.0 / 9.0,
];

/// Two stable pseudo-random values in `[-1, 1]` derived from `key`.
pub fn stable_pair<T: Hash + ?Sized>(key: &T) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

pub fn placeholder_aspect(tile_id: usize) -> f32 {
    let (x, _) = stable_pair(&("aspect", tile_id));
    let slot = (((x + 1.0) * 0.5) * PLACEHOLDER_ASPECTS.len() as f32) as usize;
    PLACEHOLDER_ASPECTS[slot.min(PLACEHOLDER_ASPECTS.len() - 1)]
}
