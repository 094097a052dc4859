//! Randomized recursive subdivision of the canvas into colored tiles.
//!
//! The canvas is split along its longer side at a random ratio, and each half
//! is split again until a depth budget runs out, a piece gets too small, or a
//! random early stop fires near the bottom of the budget. Every split divides a
//! rectangle into exactly two children, so the leaves always partition the
//! canvas.
//!
//! The recursion runs on an explicit stack and draws from an injected
//! [`Rng`], so a seeded generator reproduces the same canvas.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::constants::{
    CONTINUE_PROBABILITY, DEFAULT_DEPTH, EARLY_STOP_DEPTH, MAX_DEPTH, MAX_SPLIT_RATIO,
    MIN_SPLIT_RATIO, MIN_TILE_DIMENSION,
};
use crate::models::{Rect, Tile};

/// Tuning knobs for [`subdivide`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubdivisionParams {
    /// Depth budget at the top level
    pub depth: u32,
    /// Pieces narrower or shorter than this are never split
    pub min_dimension: f64,
    /// Below this depth, a piece stops early when a uniform draw exceeds `continue_probability`
    pub early_stop_depth: u32,
    /// Chance of continuing to split once inside the early-stop zone
    pub continue_probability: f64,
    /// Smallest share of the parent given to the first child
    pub min_ratio: f64,
    /// Largest share of the parent given to the first child
    pub max_ratio: f64,
}

impl Default for SubdivisionParams {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            min_dimension: MIN_TILE_DIMENSION,
            early_stop_depth: EARLY_STOP_DEPTH,
            continue_probability: CONTINUE_PROBABILITY,
            min_ratio: MIN_SPLIT_RATIO,
            max_ratio: MAX_SPLIT_RATIO,
        }
    }
}

impl SubdivisionParams {
    /// Default parameters with a different depth budget.
    #[must_use]
    pub fn with_depth(depth: u32) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }

    /// Validates parameter ranges.
    ///
    /// Checks:
    /// - depth is between 1 and the supported maximum
    /// - probabilities lie in [0, 1]
    /// - ratio bounds satisfy `0 < min <= max < 1`
    pub fn validate(&self) -> Result<()> {
        if self.depth == 0 || self.depth > MAX_DEPTH {
            anyhow::bail!("Depth {} out of range (1-{})", self.depth, MAX_DEPTH);
        }
        if !(0.0..=1.0).contains(&self.continue_probability) {
            anyhow::bail!(
                "Continue probability {} out of range (0-1)",
                self.continue_probability
            );
        }
        if !(self.min_ratio > 0.0 && self.min_ratio <= self.max_ratio && self.max_ratio < 1.0) {
            anyhow::bail!(
                "Split ratio bounds {}..{} must satisfy 0 < min <= max < 1",
                self.min_ratio,
                self.max_ratio
            );
        }
        if !(self.min_dimension.is_finite() && self.min_dimension >= 0.0) {
            anyhow::bail!("Minimum dimension {} must be non-negative", self.min_dimension);
        }
        Ok(())
    }
}

/// Subdivides `rect` into tiles with palette indices in `[0, color_count)`.
///
/// Returns an empty list when `color_count` is zero. Tiles come out in the
/// order a depth-first recursion would emit them (first child before second).
pub fn subdivide<R: Rng + ?Sized>(
    rect: Rect,
    depth: u32,
    color_count: usize,
    params: &SubdivisionParams,
    rng: &mut R,
) -> Vec<Tile> {
    let mut tiles = Vec::new();
    if color_count == 0 {
        return tiles;
    }

    let mut pending = vec![(rect, depth)];
    while let Some((rect, depth)) = pending.pop() {
        let too_small = rect.width < params.min_dimension || rect.height < params.min_dimension;
        let is_leaf = depth == 0
            || too_small
            || (depth < params.early_stop_depth
                && rng.random::<f64>() > params.continue_probability);

        if is_leaf {
            tiles.push(Tile::new(rect, rng.random_range(0..color_count)));
            continue;
        }

        let split_vertical = if rect.width > rect.height {
            true
        } else if rect.height > rect.width {
            false
        } else {
            rng.random_bool(0.5)
        };
        let ratio = rng.random_range(params.min_ratio..=params.max_ratio);

        let (first, second) = if split_vertical {
            rect.split_vertical(ratio)
        } else {
            rect.split_horizontal(ratio)
        };

        // Second child goes underneath so the first is fully processed before it
        pending.push((second, depth - 1));
        pending.push((first, depth - 1));
    }

    tiles
}

/// Produces canvases for a palette size.
#[derive(Debug, Clone, Default)]
pub struct TileGenerator {
    params: SubdivisionParams,
}

impl TileGenerator {
    /// Creates a generator with validated parameters.
    pub fn new(params: SubdivisionParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Creates a generator with default parameters and the given depth.
    pub fn with_depth(depth: u32) -> Result<Self> {
        Self::new(SubdivisionParams::with_depth(depth))
    }

    /// The parameters in use.
    #[must_use]
    pub const fn params(&self) -> &SubdivisionParams {
        &self.params
    }

    /// Tiles the full 100×100 canvas using `rng`.
    pub fn generate<R: Rng + ?Sized>(&self, color_count: usize, rng: &mut R) -> Vec<Tile> {
        subdivide(
            Rect::CANVAS,
            self.params.depth,
            color_count,
            &self.params,
            rng,
        )
    }

    /// Tiles the canvas reproducibly: the same `(color_count, seed)` always
    /// gives the same tiles.
    #[must_use]
    pub fn generate_seeded(&self, color_count: usize, seed: u64) -> Vec<Tile> {
        let mut rng = StdRng::seed_from_u64(seed);
        let tiles = self.generate(color_count, &mut rng);
        debug!(
            "Generated {} tiles for {} colors (seed {}, depth {})",
            tiles.len(),
            color_count,
            seed,
            self.params.depth
        );
        tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn total_area(tiles: &[Tile]) -> f64 {
        tiles.iter().map(Tile::area).sum()
    }

    fn overlaps(a: &Tile, b: &Tile) -> bool {
        let x_overlap = a.x.max(b.x) < (a.x + a.width).min(b.x + b.width) - EPSILON;
        let y_overlap = a.y.max(b.y) < (a.y + a.height).min(b.y + b.height) - EPSILON;
        x_overlap && y_overlap
    }

    /// Straightforward recursive form, used to check the stack-based version.
    fn subdivide_recursive(
        rect: Rect,
        depth: u32,
        color_count: usize,
        params: &SubdivisionParams,
        rng: &mut StdRng,
        out: &mut Vec<Tile>,
    ) {
        let too_small = rect.width < params.min_dimension || rect.height < params.min_dimension;
        if depth == 0
            || too_small
            || (depth < params.early_stop_depth
                && rng.random::<f64>() > params.continue_probability)
        {
            out.push(Tile::new(rect, rng.random_range(0..color_count)));
            return;
        }
        let vertical = if rect.width > rect.height {
            true
        } else if rect.height > rect.width {
            false
        } else {
            rng.random_bool(0.5)
        };
        let ratio = rng.random_range(params.min_ratio..=params.max_ratio);
        let (a, b) = if vertical {
            rect.split_vertical(ratio)
        } else {
            rect.split_horizontal(ratio)
        };
        subdivide_recursive(a, depth - 1, color_count, params, rng, out);
        subdivide_recursive(b, depth - 1, color_count, params, rng, out);
    }

    #[test]
    fn test_empty_palette_yields_no_tiles() {
        let generator = TileGenerator::default();
        assert!(generator.generate_seeded(0, 42).is_empty());
    }

    #[test]
    fn test_partition_area_matches_canvas() {
        let generator = TileGenerator::default();
        for seed in 0..200 {
            let tiles = generator.generate_seeded(5, seed);
            assert!(!tiles.is_empty());
            assert!(
                (total_area(&tiles) - 10_000.0).abs() < EPSILON,
                "seed {seed}: area {}",
                total_area(&tiles)
            );
        }
    }

    #[test]
    fn test_tiles_do_not_overlap_and_stay_inside() {
        let generator = TileGenerator::default();
        for seed in 0..50 {
            let tiles = generator.generate_seeded(6, seed);
            for (i, a) in tiles.iter().enumerate() {
                assert!(a.x >= -EPSILON && a.y >= -EPSILON);
                assert!(a.x + a.width <= 100.0 + EPSILON);
                assert!(a.y + a.height <= 100.0 + EPSILON);
                for b in &tiles[i + 1..] {
                    assert!(!overlaps(a, b), "seed {seed}: {a:?} overlaps {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_color_indices_in_range() {
        let generator = TileGenerator::default();
        for count in 1..=6 {
            for seed in 0..30 {
                for tile in generator.generate_seeded(count, seed) {
                    assert!(tile.color_index < count);
                }
            }
        }
    }

    #[test]
    fn test_single_color_palette() {
        let tiles = TileGenerator::default().generate_seeded(1, 7);
        assert!(tiles.iter().all(|t| t.color_index == 0));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let generator = TileGenerator::default();
        assert_eq!(generator.generate_seeded(5, 99), generator.generate_seeded(5, 99));
    }

    #[test]
    fn test_different_seeds_usually_differ() {
        let generator = TileGenerator::default();
        let first = generator.generate_seeded(5, 0);
        let distinct = (1..20).any(|seed| generator.generate_seeded(5, seed) != first);
        assert!(distinct);
    }

    #[test]
    fn test_matches_recursive_order() {
        let params = SubdivisionParams::default();
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let iterative = subdivide(Rect::CANVAS, params.depth, 5, &params, &mut rng);

            let mut rng = StdRng::seed_from_u64(seed);
            let mut recursive = Vec::new();
            subdivide_recursive(Rect::CANVAS, params.depth, 5, &params, &mut rng, &mut recursive);

            assert_eq!(iterative, recursive, "seed {seed}");
        }
    }

    #[test]
    fn test_depth_bounds_tile_count() {
        let generator = TileGenerator::with_depth(3).unwrap();
        for seed in 0..50 {
            let tiles = generator.generate_seeded(4, seed);
            assert!(tiles.len() <= 8, "seed {seed}: {} tiles", tiles.len());
        }
    }

    #[test]
    fn test_depth_above_early_stop_always_splits_first_level() {
        // Depth 5 is outside the early-stop zone, and the canvas is large
        let generator = TileGenerator::default();
        for seed in 0..50 {
            assert!(generator.generate_seeded(3, seed).len() >= 2);
        }
    }

    #[test]
    fn test_small_rectangle_is_single_leaf() {
        let params = SubdivisionParams::default();
        let mut rng = StdRng::seed_from_u64(1);
        let tiles = subdivide(Rect::new(0.0, 0.0, 9.0, 50.0), 5, 3, &params, &mut rng);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].rect(), Rect::new(0.0, 0.0, 9.0, 50.0));
    }

    #[test]
    fn test_zero_depth_is_single_leaf() {
        let params = SubdivisionParams::default();
        let mut rng = StdRng::seed_from_u64(1);
        let tiles = subdivide(Rect::CANVAS, 0, 3, &params, &mut rng);
        assert_eq!(tiles.len(), 1);
    }

    #[test]
    fn test_leaves_respect_minimum_dimension_of_parent() {
        // A piece is only split when both sides are >= 10, and ratios are >= 0.3
        let generator = TileGenerator::default();
        for seed in 0..100 {
            for tile in generator.generate_seeded(5, seed) {
                assert!(tile.width >= 3.0 - EPSILON && tile.height >= 3.0 - EPSILON);
            }
        }
    }

    #[test]
    fn test_params_validation() {
        assert!(SubdivisionParams::default().validate().is_ok());
        assert!(SubdivisionParams::with_depth(0).validate().is_err());
        assert!(SubdivisionParams::with_depth(MAX_DEPTH + 1).validate().is_err());
        let bad_ratio = SubdivisionParams {
            min_ratio: 0.8,
            max_ratio: 0.2,
            ..SubdivisionParams::default()
        };
        assert!(bad_ratio.validate().is_err());
        assert!(TileGenerator::with_depth(0).is_err());
    }
}
