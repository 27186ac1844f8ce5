use crate::graph::Weight;

/// Calculates the lightest and heaviest vertex weight of each part of a given partition.
///
/// Parts without any vertex map to `None`.
pub fn compute_parts_bounds(partition: &[usize], num_parts: usize, weights: &[Weight]) -> Vec<Option<(Weight, Weight)>> {
    let mut bounds = vec![None; num_parts];

    for (&part, &w) in partition.iter().zip(weights.iter()) {
        if part < num_parts {
            bounds[part] = match bounds[part] {
                None => Some((w, w)),
                Some((min, max)) => Some((min.min(w), max.max(w))),
            };
        }
    }

    bounds
}

/// Compute the summed gap after passing part bounds, saturating at `Weight::MAX`.
pub fn compute_gap_from_part_bounds(part_bounds: &[Option<(Weight, Weight)>]) -> Weight {
    part_bounds
        .iter()
        .flatten()
        .map(|(min, max)| max.saturating_sub(*min))
        .fold(0, Weight::saturating_add)
}

/// Compute the total gap of the given partition.
///
/// `partition[v]` is the part of vertex index `v` and `weights[v]` its weight.
pub fn total_gap(num_parts: usize, partition: &[usize], weights: &[Weight]) -> Weight {
    if num_parts == 0 {
        return 0;
    }

    let part_bounds = compute_parts_bounds(partition, num_parts, weights);

    compute_gap_from_part_bounds(&part_bounds)
}
