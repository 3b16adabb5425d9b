//! Constrained A* route planning over the sixteen compass headings.
//!
//! Paths are sequences of coordinates exactly one move apart. The search
//! runs in continuous degree space: nodes are identified by the bit
//! patterns of their coordinates, and the goal test is the close-distance
//! tolerance rather than exact arrival.

use crate::cache::PathCache;
use crate::models::{LngLat, Region};
use crate::spatial::{
    distance, is_close, is_in_region, next_position, region_boundary_intersects, RegionError,
    COMPASS_HEADINGS,
};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

/// Tuning knobs for the route search.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Upper bound on nodes settled per search. A search that spends the
    /// whole budget without reaching the goal reports no route. Without
    /// the bound, a goal sealed inside a no-fly ring would keep the
    /// frontier growing forever in continuous space.
    pub max_expanded_nodes: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_expanded_nodes: 200_000,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// One coordinate discovered during a search, stored in the arena.
#[derive(Debug, Clone)]
struct SearchNode {
    coordinate: LngLat,
    g: f64,
    h: f64,
    parent: Option<usize>,
    /// Whether the best-known path to this node has touched the central
    /// area. Tracked only on return searches; outbound nodes keep it
    /// false.
    entered_central: bool,
    settled: bool,
}

/// Heap entry pointing into the arena.
///
/// Ties on f break toward the smaller g, then toward the
/// earlier-discovered node, so expansion order is deterministic for
/// identical inputs.
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f: FloatOrd,
    g: FloatOrd,
    node: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.g == other.g && self.node == other.node
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .cmp(&other.f)
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| self.node.cmp(&other.node))
    }
}

/// Route planner over fixed geography.
///
/// Construction validates the central-area naming contract once, so the
/// search loop itself never has to. The planner is immutable after
/// construction apart from its internal path cache, and is safe to share
/// across threads by reference.
#[derive(Debug)]
pub struct RoutePlanner {
    no_fly_zones: Vec<Region>,
    central_area: Region,
    config: PlannerConfig,
    cache: PathCache,
}

impl RoutePlanner {
    /// Build a planner with default search limits.
    ///
    /// Fails if `central_area` does not carry the reserved name.
    pub fn new(no_fly_zones: Vec<Region>, central_area: Region) -> Result<Self, RegionError> {
        Self::with_config(no_fly_zones, central_area, PlannerConfig::default())
    }

    pub fn with_config(
        no_fly_zones: Vec<Region>,
        central_area: Region,
        config: PlannerConfig,
    ) -> Result<Self, RegionError> {
        if !central_area.is_central() {
            return Err(RegionError::NotCentral(central_area.name));
        }
        Ok(Self {
            no_fly_zones,
            central_area,
            config,
            cache: PathCache::new(),
        })
    }

    /// Plan a route from `start` to within the close tolerance of `end`.
    ///
    /// The result starts at `start`, steps exactly one move at a time,
    /// and its last coordinate is close to `end`. An empty vector means
    /// no route exists under the constraints, which callers must treat
    /// as an expected outcome rather than an error.
    ///
    /// On a return leg (`is_return_path`), a path that enters the
    /// central area is locked in: it never leaves again before reaching
    /// the goal.
    ///
    /// Results are memoized per direction under the exact endpoint bits;
    /// hits return an independent copy of the stored path.
    pub fn find_path(&self, start: LngLat, end: LngLat, is_return_path: bool) -> Vec<LngLat> {
        if let Some(cached) = self.cache.get(start, end, is_return_path) {
            return cached;
        }
        let path = self.search(start, end, is_return_path);
        self.cache.insert(start, end, is_return_path, &path);
        path
    }

    /// Forget every memoized path. In-flight searches are unaffected and
    /// re-populate the cache when they finish.
    pub fn reset_state(&self) {
        self.cache.clear();
    }

    fn search(&self, start: LngLat, end: LngLat, is_return_path: bool) -> Vec<LngLat> {
        let mut arena: Vec<SearchNode> = Vec::new();
        let mut index: HashMap<(u64, u64), usize> = HashMap::new();
        let mut open: BinaryHeap<Reverse<OpenEntry>> = BinaryHeap::new();

        let start_h = distance(start, end);
        arena.push(SearchNode {
            coordinate: start,
            g: 0.0,
            h: start_h,
            parent: None,
            entered_central: is_return_path && is_in_region(start, &self.central_area),
            settled: false,
        });
        index.insert(start.bits(), 0);
        open.push(Reverse(OpenEntry {
            f: FloatOrd(start_h),
            g: FloatOrd(0.0),
            node: 0,
        }));

        let mut expanded = 0usize;

        while let Some(Reverse(entry)) = open.pop() {
            let current = entry.node;
            if arena[current].settled {
                continue;
            }
            if entry.g.0 > arena[current].g {
                // Stale heap entry; a cheaper path to this node was
                // queued after this one.
                continue;
            }
            arena[current].settled = true;

            if is_close(arena[current].coordinate, end) {
                return reconstruct(&arena, current);
            }

            expanded += 1;
            if expanded >= self.config.max_expanded_nodes {
                return Vec::new();
            }

            let from = arena[current].coordinate;
            let locked = arena[current].entered_central;
            let current_g = arena[current].g;

            for heading in COMPASS_HEADINGS {
                let candidate = next_position(from, heading);
                if locked && !is_in_region(candidate, &self.central_area) {
                    continue;
                }
                if self.inside_no_fly_zone(candidate) {
                    continue;
                }
                if self.crosses_no_fly_boundary(from, candidate) {
                    continue;
                }

                let tentative_g = current_g + distance(from, candidate);
                let entered = if is_return_path {
                    locked || is_in_region(candidate, &self.central_area)
                } else {
                    false
                };

                let node = match index.get(&candidate.bits()) {
                    Some(&existing) => {
                        if arena[existing].settled || tentative_g >= arena[existing].g {
                            continue;
                        }
                        arena[existing].g = tentative_g;
                        arena[existing].parent = Some(current);
                        arena[existing].entered_central = entered;
                        existing
                    }
                    None => {
                        let id = arena.len();
                        arena.push(SearchNode {
                            coordinate: candidate,
                            g: tentative_g,
                            h: distance(candidate, end),
                            parent: Some(current),
                            entered_central: entered,
                            settled: false,
                        });
                        index.insert(candidate.bits(), id);
                        id
                    }
                };

                open.push(Reverse(OpenEntry {
                    f: FloatOrd(arena[node].g + arena[node].h),
                    g: FloatOrd(arena[node].g),
                    node,
                }));
            }
        }

        // Frontier exhausted without reaching the goal.
        Vec::new()
    }

    fn inside_no_fly_zone(&self, position: LngLat) -> bool {
        self.no_fly_zones
            .iter()
            .any(|zone| is_in_region(position, zone))
    }

    fn crosses_no_fly_boundary(&self, from: LngLat, to: LngLat) -> bool {
        self.no_fly_zones
            .iter()
            .any(|zone| region_boundary_intersects(from, to, zone))
    }
}

/// Walk predecessor links back to the start, then flip.
fn reconstruct(arena: &[SearchNode], goal: usize) -> Vec<LngLat> {
    let mut path = Vec::new();
    let mut cursor = Some(goal);
    while let Some(node) = cursor {
        path.push(arena[node].coordinate);
        cursor = arena[node].parent;
    }
    path.reverse();
    path
}
