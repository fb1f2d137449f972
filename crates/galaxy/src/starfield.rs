//! Star field generation: a spiral disc of track-bearing stars.

use glam::DVec3;
use noise::{NoiseFn, Perlin};
use rand::prelude::*;

/// Radius of the inner edge of the disc (star-world units).
const DISC_INNER_RADIUS: f64 = 200.0;
/// Radial extent of the disc beyond the inner edge.
const DISC_RADIAL_SPAN: f64 = 800.0;
/// Baseline disc thickness along z.
const DISC_THICKNESS: f64 = 40.0;
/// Number of spiral arms.
const ARM_COUNT: usize = 4;

/// One star in the galaxy, bound to a music track.
#[derive(Debug, Clone)]
pub struct StarEntry {
    pub seed: u64,
    pub name: String,
    /// Star-world position (galaxy plane is z = 0).
    pub position: DVec3,
    /// Index into the music library.
    pub track: usize,
}

/// The whole star field.
#[derive(Debug)]
pub struct MusicGalaxy {
    pub seed: u64,
    pub stars: Vec<StarEntry>,
}

impl MusicGalaxy {
    /// Generate a galaxy of `star_count` stars mapped onto `track_count`
    /// library tracks. Deterministic per seed.
    pub fn generate(seed: u64, star_count: usize, track_count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let perlin = Perlin::new(seed as u32);

        let stars: Vec<StarEntry> = (0..star_count)
            .map(|i| {
                let star_seed = seed.wrapping_add((i as u64 + 1) * 40_503);

                // Spiral arm placement in the x-y plane
                let angle = rng.gen::<f64>() * std::f64::consts::TAU;
                let arm = (i % ARM_COUNT) as f64 * std::f64::consts::TAU / ARM_COUNT as f64;
                let spiral_angle = angle + arm;

                let r = DISC_INNER_RADIUS + rng.gen::<f64>() * DISC_RADIAL_SPAN;
                let spread = 80.0 * rng.gen::<f64>();

                let x = spiral_angle.cos() * r + rng.gen::<f64>() * spread - spread * 0.5;
                let y = spiral_angle.sin() * r + rng.gen::<f64>() * spread - spread * 0.5;

                // Noise thickens the disc where the nebula is dense
                let density = perlin.get([x * 0.004, y * 0.004]);
                let z = (rng.gen::<f64>() - 0.5) * DISC_THICKNESS * (1.0 + 0.5 * density);

                let track = if track_count > 0 {
                    (star_seed % track_count as u64) as usize
                } else {
                    0
                };

                StarEntry {
                    seed: star_seed,
                    name: generate_star_name(star_seed),
                    position: DVec3::new(x, y, z),
                    track,
                }
            })
            .collect();

        Self { seed, stars }
    }

    /// Get a star by index.
    pub fn star(&self, index: usize) -> Option<&StarEntry> {
        self.stars.get(index)
    }

    /// Find the star nearest to a star-world position.
    pub fn nearest_star(&self, pos: DVec3) -> Option<(usize, f64)> {
        self.stars
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let dist = (pos - entry.position).length();
                (i, dist)
            })
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Get stars within a certain radius of a position (for the galaxy map).
    pub fn stars_near(&self, pos: DVec3, radius: f64) -> Vec<(usize, &StarEntry, f64)> {
        self.stars
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| {
                let dist = (pos - entry.position).length();
                if dist <= radius {
                    Some((i, entry, dist))
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Generate a star name from syllable tables.
fn generate_star_name(seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(17));

    if rng.gen_bool(0.2) {
        // Catalog style: "HD 1042", "NGC 77"
        let catalogs = ["HD", "NGC", "GJ", "HIP", "KIC"];
        let cat = catalogs[rng.gen_range(0..catalogs.len())];
        return format!("{} {}", cat, rng.gen_range(10..9999));
    }

    let prefixes = [
        "Aur", "Bel", "Cal", "Dor", "Ely", "Fen", "Gal", "Hel",
        "Ily", "Jun", "Kor", "Lyr", "Mir", "Nov", "Ori", "Pyx",
        "Quel", "Rho", "Ser", "Tal", "Umb", "Vel", "Wyn", "Zef",
    ];
    let middles = [
        "an", "ell", "ar", "ion", "ith", "or", "ess", "al",
        "un", "ys", "em", "ad",
    ];
    let suffixes = ["a", "is", "os", "ia", "ur", "e", "um", "ae"];

    let mut name = String::new();
    name.push_str(prefixes[rng.gen_range(0..prefixes.len())]);
    name.push_str(middles[rng.gen_range(0..middles.len())]);
    if rng.gen_bool(0.6) {
        name.push_str(suffixes[rng.gen_range(0..suffixes.len())]);
    }
    if rng.gen_bool(0.15) {
        name.push_str(&format!("-{}", rng.gen_range(1..99)));
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_is_deterministic_per_seed() {
        let g1 = MusicGalaxy::generate(777, 64, 12);
        let g2 = MusicGalaxy::generate(777, 64, 12);
        assert_eq!(g1.stars.len(), 64);
        for (a, b) in g1.stars.iter().zip(&g2.stars) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.position, b.position);
            assert_eq!(a.track, b.track);
        }
    }

    #[test]
    fn different_seeds_give_different_fields() {
        let g1 = MusicGalaxy::generate(1, 16, 4);
        let g2 = MusicGalaxy::generate(2, 16, 4);
        let p1: Vec<_> = g1.stars.iter().map(|s| s.position).collect();
        let p2: Vec<_> = g2.stars.iter().map(|s| s.position).collect();
        assert_ne!(p1, p2);
    }

    #[test]
    fn tracks_index_into_the_library() {
        let g = MusicGalaxy::generate(42, 200, 7);
        assert!(g.stars.iter().all(|s| s.track < 7));
    }

    #[test]
    fn disc_is_thin_along_z() {
        let g = MusicGalaxy::generate(9, 500, 4);
        for star in &g.stars {
            assert!(star.position.z.abs() <= DISC_THICKNESS);
            assert!(star.position.truncate().length() >= DISC_INNER_RADIUS - 80.0);
        }
    }

    #[test]
    fn nearest_star_finds_itself() {
        let g = MusicGalaxy::generate(5, 50, 4);
        let probe = g.stars[17].position;
        let (idx, dist) = g.nearest_star(probe).unwrap();
        assert_eq!(idx, 17);
        assert!(dist < 1e-12);
    }
}
