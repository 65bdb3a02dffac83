//! Star rating projection.

/// Total number of symbols in every rating.
pub const STAR_SLOTS: usize = 5;
pub const FILLED_STAR: char = '★';
pub const EMPTY_STAR: char = '☆';

/// Number of filled stars for `rank`, clamped to `0..=5`.
fn filled_stars(rank: i64) -> usize {
    rank.clamp(0, STAR_SLOTS as i64) as usize
}

/// Renders `rank` as exactly five symbols, filled first.
pub fn generate_stars(rank: i64) -> String {
    let filled = filled_stars(rank);
    std::iter::repeat(FILLED_STAR)
        .take(filled)
        .chain(std::iter::repeat(EMPTY_STAR).take(STAR_SLOTS - filled))
        .collect()
}
