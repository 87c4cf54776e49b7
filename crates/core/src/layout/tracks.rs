use std::collections::HashMap;

/// Half-open `[start, end)` interval in fraction space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of the region both intervals cover; zero or negative when
    /// they are disjoint.
    pub fn shared(&self, other: &Interval) -> f64 {
        self.end.min(other.end) - self.start.max(other.start)
    }

    /// Intervals sharing no more than `tolerance` are considered
    /// back-to-back rather than concurrent.
    pub fn truly_overlaps(&self, other: &Interval, tolerance: f64) -> bool {
        self.shared(other) > tolerance
    }
}

/// Greedy first-fit lane packing with one lane per organization.
///
/// An organization claims a track the first time it is seen, and the claim
/// covers every interval that organization has, so a later entry of the same
/// employer can never land on top of a different employer.
pub struct TrackAssigner<'a> {
    tolerance: f64,
    by_organization: HashMap<&'a str, usize>,
    occupancy: Vec<Vec<Interval>>,
}

impl<'a> TrackAssigner<'a> {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            by_organization: HashMap::new(),
            occupancy: Vec::new(),
        }
    }

    /// Track for `organization`. `intervals` must hold all of the
    /// organization's intervals; it is only consulted the first time the
    /// organization is seen.
    pub fn assign(&mut self, organization: &'a str, intervals: &[Interval]) -> usize {
        if let Some(&track) = self.by_organization.get(organization) {
            return track;
        }

        let track = self
            .occupancy
            .iter()
            .position(|occupied| self.fits(occupied, intervals))
            .unwrap_or_else(|| {
                self.occupancy.push(Vec::new());
                self.occupancy.len() - 1
            });

        self.occupancy[track].extend_from_slice(intervals);
        self.by_organization.insert(organization, track);
        tracing::trace!(organization, track, "assigned track");
        track
    }

    pub fn track_count(&self) -> usize {
        self.occupancy.len()
    }

    fn fits(&self, occupied: &[Interval], candidate: &[Interval]) -> bool {
        candidate.iter().all(|new| {
            occupied
                .iter()
                .all(|existing| !new.truly_overlaps(existing, self.tolerance))
        })
    }
}
