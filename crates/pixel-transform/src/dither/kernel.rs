//! Error diffusion kernel definitions.

/// An error diffusion kernel.
///
/// Each entry is `(dx, dy, weight)`: the neighbor at that offset receives
/// `error * weight / divisor`. Offsets only point at pixels the sweep has
/// not reached yet (same row to the right, or rows below).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    pub entries: &'static [(i32, i32, u8)],
    pub divisor: u8,
}

/// Floyd-Steinberg dithering kernel.
///
/// Distributes error to 4 neighbors with 100% total propagation (16/16).
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
        (-1, 1, 3), // bottom-left
    ],
    divisor: 16,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floyd_steinberg_propagates_everything() {
        let total: u32 = FLOYD_STEINBERG.entries.iter().map(|&(_, _, w)| w as u32).sum();
        assert_eq!(total, FLOYD_STEINBERG.divisor as u32);
    }

    #[test]
    fn test_entries_only_reach_unvisited_pixels() {
        for &(dx, dy, _) in FLOYD_STEINBERG.entries {
            assert!(dy > 0 || (dy == 0 && dx > 0), "({dx}, {dy}) points backwards");
        }
    }
}
