//! Extent resolution shared by the width and height passes.
//!
//! Columns and rows are both sequences of tracks with a sizing policy and a
//! minimum requirement. The solver computes the table extent from them and
//! hands out every track's final extent such that the extents sum to the
//! table extent exactly, down to the last raw unit.

use crate::{Axis, LayoutError};
use log::trace;
use mathtab_types::Scaled;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum TrackClass {
    /// Sized from content (auto or fit content tracks).
    Plain,
    /// Exactly its requirement.
    Fixed,
    /// A fraction of the table extent.
    Scale(f32),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct TrackRequest {
    pub class: TrackClass,
    /// Minimum extent after the span pass.
    pub requirement: Scaled,
    pub content: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SizingMode {
    /// Every plain track gets the same extent, driven by the largest one.
    Equal,
    /// Plain tracks keep their own requirement and share any excess.
    Content,
}

#[derive(Debug, Clone)]
pub(crate) struct TrackSolution {
    pub extents: Vec<Scaled>,
    pub total: Scaled,
}

/// Raw `value / divisor`, rounded up to the next raw unit.
fn div_ceil(value: i64, divisor: f32) -> i64 {
    (value as f64 / divisor as f64).ceil() as i64
}

/// Adds `amount` to the receivers in equal shares; the raw units left over
/// by the integer division go one each to the first receivers.
pub(crate) fn distribute(amount: Scaled, extents: &mut [Scaled], receivers: &[usize]) {
    if receivers.is_empty() || amount == Scaled::ZERO {
        return;
    }
    let n = receivers.len() as i32;
    let share = amount.raw() / n;
    let leftover = amount.raw() % n;
    for (k, &index) in receivers.iter().enumerate() {
        let bonus = if (k as i32) < leftover.abs() { leftover.signum() } else { 0 };
        extents[index] += Scaled::from_raw(share + bonus);
    }
}

/// A dedicated solver for one axis of the grid.
pub(crate) struct TrackSolver<'a> {
    axis: Axis,
    tracks: &'a [TrackRequest],
}

impl<'a> TrackSolver<'a> {
    pub fn new(axis: Axis, tracks: &'a [TrackRequest]) -> Self {
        Self { axis, tracks }
    }

    fn indices(&self, pred: impl Fn(&TrackRequest) -> bool) -> Vec<usize> {
        self.tracks
            .iter()
            .enumerate()
            .filter(|(_, t)| pred(t))
            .map(|(i, _)| i)
            .collect()
    }

    /// Resolves every track.
    ///
    /// The table extent is `(plain + fixed) / (1 - sumScale)`, where `plain`
    /// is the sum of the plain requirements in content mode and
    /// `count * max` in equal mode; it grows further if a content track
    /// sized by a fraction needs more.
    pub fn solve(&self, mode: SizingMode) -> Result<TrackSolution, LayoutError> {
        let sum_scale: f32 = self
            .tracks
            .iter()
            .filter_map(|t| match t.class {
                TrackClass::Scale(f) => Some(f),
                _ => None,
            })
            .sum();
        if sum_scale >= 1.0 {
            return Err(LayoutError::DegenerateScale { axis: self.axis, sum: sum_scale });
        }

        // Raw units are summed in i64: fractions close to 1 blow the table
        // extent up past what a Scaled can hold.
        let requirement = |t: &TrackRequest| i64::from(t.requirement.raw());
        let sum_fixed: i64 = self
            .tracks
            .iter()
            .filter(|t| t.class == TrackClass::Fixed)
            .map(requirement)
            .sum();

        let plain = self.indices(|t| t.class == TrackClass::Plain);
        let max_plain = plain.iter().map(|&i| requirement(&self.tracks[i])).max().unwrap_or(0);
        let sum_plain: i64 = match mode {
            SizingMode::Equal => max_plain * plain.len() as i64,
            SizingMode::Content => plain.iter().map(|&i| requirement(&self.tracks[i])).sum(),
        };

        let mut total = div_ceil(sum_plain + sum_fixed, 1.0 - sum_scale);
        for track in self.tracks {
            if let TrackClass::Scale(fraction) = track.class {
                if track.content && fraction > 0.0 {
                    total = total.max(div_ceil(requirement(track), fraction));
                }
            }
        }

        let raw_extents: Vec<i64> = self
            .tracks
            .iter()
            .map(|t| match t.class {
                TrackClass::Fixed => requirement(t),
                TrackClass::Scale(fraction) => {
                    let share = ((total as f64 * fraction as f64) as i64).max(0);
                    if t.content { share.max(requirement(t)) } else { share }
                }
                TrackClass::Plain => match mode {
                    SizingMode::Equal => max_plain,
                    SizingMode::Content => requirement(t),
                },
            })
            .collect();

        let assigned: i64 = raw_extents.iter().sum();
        if assigned > total {
            trace!("{} extent grows from {} to {} raw units to fit assigned tracks", self.axis, total, assigned);
            total = assigned;
        }

        let to_scaled = |raw: i64| {
            i32::try_from(raw)
                .map(Scaled::from_raw)
                .map_err(|_| LayoutError::ExtentOverflow { axis: self.axis })
        };
        let mut extents = raw_extents.into_iter().map(to_scaled).collect::<Result<Vec<_>, _>>()?;
        let remainder = to_scaled(total - assigned)?;
        let total = to_scaled(total)?;

        let receivers = if !plain.is_empty() {
            plain
        } else {
            let scaled = self.indices(|t| matches!(t.class, TrackClass::Scale(_)));
            if scaled.is_empty() { (0..self.tracks.len()).collect() } else { scaled }
        };
        distribute(remainder, &mut extents, &receivers);

        Ok(TrackSolution { extents, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: i32) -> Scaled {
        Scaled::from_int(v)
    }

    fn plain(v: i32) -> TrackRequest {
        TrackRequest { class: TrackClass::Plain, requirement: s(v), content: true }
    }

    fn fixed(v: i32) -> TrackRequest {
        TrackRequest { class: TrackClass::Fixed, requirement: s(v), content: false }
    }

    fn scale(f: f32, requirement: i32, content: bool) -> TrackRequest {
        TrackRequest { class: TrackClass::Scale(f), requirement: s(requirement), content }
    }

    #[test]
    fn test_content_mode_keeps_requirements() {
        let tracks = [plain(10), fixed(2), plain(20)];
        let solution = TrackSolver::new(Axis::Horizontal, &tracks).solve(SizingMode::Content).unwrap();
        assert_eq!(solution.extents, vec![s(10), s(2), s(20)]);
        assert_eq!(solution.total, s(32));
    }

    #[test]
    fn test_equal_mode_uses_largest() {
        let tracks = [plain(5), plain(10), plain(15)];
        let solution = TrackSolver::new(Axis::Horizontal, &tracks).solve(SizingMode::Equal).unwrap();
        assert_eq!(solution.extents, vec![s(15), s(15), s(15)]);
        assert_eq!(solution.total, s(45));
    }

    #[test]
    fn test_scale_tracks_take_their_fraction() {
        let tracks = [plain(30), scale(0.25, 0, false), plain(30)];
        let solution = TrackSolver::new(Axis::Horizontal, &tracks).solve(SizingMode::Content).unwrap();
        assert_eq!(solution.total, s(80));
        assert_eq!(solution.extents[1], s(20));
        assert_eq!(solution.extents.iter().copied().sum::<Scaled>(), solution.total);
    }

    #[test]
    fn test_scaled_content_track_drives_the_total() {
        // 40 wide content asking for half the table: the table is at least 80.
        let tracks = [plain(10), scale(0.5, 40, true)];
        let solution = TrackSolver::new(Axis::Horizontal, &tracks).solve(SizingMode::Content).unwrap();
        assert_eq!(solution.total, s(80));
        assert_eq!(solution.extents, vec![s(40), s(40)]);
    }

    #[test]
    fn test_degenerate_scale_is_an_error() {
        let tracks = [plain(10), scale(0.6, 0, false), scale(0.4, 0, false)];
        let err = TrackSolver::new(Axis::Vertical, &tracks).solve(SizingMode::Content).unwrap_err();
        assert!(matches!(err, LayoutError::DegenerateScale { axis: Axis::Vertical, .. }));
    }

    #[test]
    fn test_near_unit_scale_overflow_is_an_error() {
        // 300 px left for a ten-thousandth of the table.
        let tracks = [scale(0.9999, 10, true), plain(300)];
        let err = TrackSolver::new(Axis::Horizontal, &tracks).solve(SizingMode::Content).unwrap_err();
        assert!(matches!(err, LayoutError::ExtentOverflow { axis: Axis::Horizontal }));

        // Just under the limit still resolves exactly.
        let tracks = [scale(0.99, 0, false), plain(10_000)];
        let solution = TrackSolver::new(Axis::Horizontal, &tracks).solve(SizingMode::Content).unwrap();
        assert_eq!(solution.extents.iter().copied().sum::<Scaled>(), solution.total);
        assert!(solution.total >= s(1_000_000));
    }

    #[test]
    fn test_distribute_is_exact() {
        let mut extents = vec![Scaled::ZERO; 3];
        distribute(Scaled::from_raw(10), &mut extents, &[0, 2]);
        assert_eq!(extents, vec![Scaled::from_raw(5), Scaled::ZERO, Scaled::from_raw(5)]);

        let mut extents = vec![Scaled::ZERO; 3];
        distribute(Scaled::from_raw(11), &mut extents, &[0, 1, 2]);
        assert_eq!(extents.iter().map(|e| e.raw()).collect::<Vec<_>>(), vec![4, 4, 3]);

        let mut extents = vec![Scaled::ZERO; 2];
        distribute(Scaled::from_raw(-3), &mut extents, &[0, 1]);
        assert_eq!(extents.iter().map(|e| e.raw()).sum::<i32>(), -3);
    }
}
