// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Broad-phase collision detection
//!
//! Every movable body is tested against every other body (O(n²) per
//! sub-step). When a body overlaps several others, the recorded region is the
//! smallest bounding box of all the individual overlaps. Results are stored
//! per body slot, `None` for bodies with no contact and for immovable bodies.
//!
//! A spatial index over the static bodies would cut the pair count; entity
//! counts are small enough that the all-pairs pass is not a bottleneck.

use crate::body::RigidBody;
use crate::math::Rectangle;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Union of all overlaps between body `index` and every other body
pub(crate) fn collision_region(bodies: &[RigidBody], index: usize) -> Option<Rectangle> {
    let body = &bodies[index];
    if !body.can_move {
        return None;
    }
    bodies
        .iter()
        .enumerate()
        .filter(|(other_index, _)| *other_index != index)
        .filter_map(|(_, other)| body.rect.intersection(&other.rect))
        .reduce(|union, overlap| union.sbb(&overlap))
}

/// Fill `regions` with one entry per body slot
///
/// The union is order independent, so the parallel path produces exactly the
/// same regions as the sequential one.
pub(crate) fn detect_collisions(
    bodies: &[RigidBody],
    regions: &mut Vec<Option<Rectangle>>,
    parallel_threshold: usize,
) {
    #[cfg(feature = "parallel")]
    if bodies.len() >= parallel_threshold {
        (0..bodies.len())
            .into_par_iter()
            .map(|index| collision_region(bodies, index))
            .collect_into_vec(regions);
        return;
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel_threshold;

    regions.clear();
    regions.extend((0..bodies.len()).map(|index| collision_region(bodies, index)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(left: f64, right: f64, top: f64, bottom: f64) -> RigidBody {
        RigidBody::new(Rectangle::new(left, right, top, bottom)).unwrap()
    }

    fn moving(left: f64, right: f64, top: f64, bottom: f64) -> RigidBody {
        RigidBody::movable(Rectangle::new(left, right, top, bottom), 1.0).unwrap()
    }

    #[test]
    fn test_no_contact() {
        let bodies = vec![moving(0.0, 1.0, 1.0, 0.0), fixed(2.0, 3.0, 1.0, 0.0)];
        let mut regions = Vec::new();
        detect_collisions(&bodies, &mut regions, usize::MAX);
        assert_eq!(regions, vec![None, None]);
    }

    #[test]
    fn test_immovable_bodies_have_no_region() {
        let bodies = vec![fixed(0.0, 2.0, 2.0, 0.0), moving(1.0, 3.0, 3.0, 1.0)];
        let mut regions = Vec::new();
        detect_collisions(&bodies, &mut regions, usize::MAX);
        assert_eq!(regions[0], None);
        assert_eq!(regions[1], Some(Rectangle::new(1.0, 2.0, 2.0, 1.0)));
    }

    #[test]
    fn test_multiple_contacts_use_union() {
        // Body straddling a floor and a wall
        let bodies = vec![
            moving(0.0, 1.0, 1.0, -0.1),
            fixed(-5.0, 5.0, 0.0, -1.0),
            fixed(0.9, 2.0, 5.0, -1.0),
        ];
        let region = collision_region(&bodies, 0).unwrap();
        let floor = Rectangle::new(0.0, 1.0, 0.0, -0.1);
        let wall = Rectangle::new(0.9, 1.0, 1.0, -0.1);
        assert_eq!(region, floor.sbb(&wall));
    }

    #[test]
    fn test_two_movable_bodies_both_record() {
        let bodies = vec![moving(0.0, 1.0, 1.0, 0.0), moving(0.5, 1.5, 1.0, 0.0)];
        let mut regions = Vec::new();
        detect_collisions(&bodies, &mut regions, usize::MAX);
        let overlap = Some(Rectangle::new(0.5, 1.0, 1.0, 0.0));
        assert_eq!(regions, vec![overlap, overlap]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut bodies = vec![fixed(-100.0, 100.0, 0.0, -1.0)];
        for i in 0..40 {
            let x = i as f64 * 0.75;
            bodies.push(moving(x, x + 1.0, 0.9, -0.1));
        }
        let mut sequential = Vec::new();
        let mut threaded = Vec::new();
        detect_collisions(&bodies, &mut sequential, usize::MAX);
        detect_collisions(&bodies, &mut threaded, 0);
        assert_eq!(sequential, threaded);
        assert_eq!(sequential.len(), bodies.len());
    }
}
