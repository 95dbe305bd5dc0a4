//! Collectible dots and field generation

use glam::Vec2;
use rand::Rng;

use crate::consts::{DOT_RADIUS, FIELD_MARGIN};

/// A collectible dot
#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    pub pos: Vec2,
    pub radius: f32,
    /// Hidden and ignored by scoring once set
    pub collected: bool,
    /// Special dots subtract from the collector's score
    pub special: bool,
}

impl Dot {
    pub fn new(pos: Vec2, special: bool) -> Self {
        Self {
            pos,
            radius: DOT_RADIUS,
            collected: false,
            special,
        }
    }

    /// Visible and still worth something
    #[inline]
    pub fn is_live(&self) -> bool {
        !self.collected
    }
}

/// Number of special dots in a field of `count` dots
pub fn special_count(count: usize, special_ratio: f32) -> usize {
    (count as f32 * special_ratio.clamp(0.0, 1.0)).floor() as usize
}

/// Scatter `count` dots uniformly inside `bounds`, inset by the field margin.
///
/// The first `floor(count * special_ratio)` dots generated are the special
/// ones. Positions are independent, so dots may overlap.
pub fn generate_dots<R: Rng>(
    rng: &mut R,
    count: usize,
    bounds: Vec2,
    special_ratio: f32,
) -> Vec<Dot> {
    let specials = special_count(count, special_ratio);
    let min = Vec2::splat(FIELD_MARGIN);
    // A canvas narrower than twice the margin collapses to its center line
    let max = (bounds - Vec2::splat(FIELD_MARGIN)).max(min);

    (0..count)
        .map(|i| {
            let pos = Vec2::new(
                rng.random_range(min.x..=max.x),
                rng.random_range(min.y..=max.y),
            );
            Dot::new(pos, i < specials)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas_size;
    use crate::consts::{DOT_COUNT, SPECIAL_RATIO};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_generate_exact_special_count() {
        let mut rng = Pcg32::seed_from_u64(7);
        let dots = generate_dots(&mut rng, DOT_COUNT, canvas_size(), SPECIAL_RATIO);
        assert_eq!(dots.len(), 50);
        assert_eq!(dots.iter().filter(|d| d.special).count(), 10);
    }

    #[test]
    fn test_specials_come_first() {
        let mut rng = Pcg32::seed_from_u64(11);
        let dots = generate_dots(&mut rng, 50, canvas_size(), 0.2);
        assert!(dots[..10].iter().all(|d| d.special));
        assert!(dots[10..].iter().all(|d| !d.special));
    }

    #[test]
    fn test_special_count_floors() {
        assert_eq!(special_count(50, 0.2), 10);
        assert_eq!(special_count(7, 0.2), 1);
        assert_eq!(special_count(4, 0.2), 0);
        assert_eq!(special_count(10, 1.5), 10);
    }

    #[test]
    fn test_dots_inside_margin() {
        let mut rng = Pcg32::seed_from_u64(3);
        let bounds = canvas_size();
        for dot in generate_dots(&mut rng, 500, bounds, 0.2) {
            assert!(dot.pos.x >= FIELD_MARGIN && dot.pos.x <= bounds.x - FIELD_MARGIN);
            assert!(dot.pos.y >= FIELD_MARGIN && dot.pos.y <= bounds.y - FIELD_MARGIN);
            assert!(!dot.collected);
            assert_eq!(dot.radius, DOT_RADIUS);
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = generate_dots(&mut Pcg32::seed_from_u64(99), 20, canvas_size(), 0.2);
        let b = generate_dots(&mut Pcg32::seed_from_u64(99), 20, canvas_size(), 0.2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_field() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(generate_dots(&mut rng, 0, canvas_size(), 0.2).is_empty());
    }
}
