//! Spawn point allocation at countdown start

use uuid::Uuid;

use super::participant::Participant;
use super::Position;

/// Result of allocating spawn points over a roster
#[derive(Debug)]
pub struct SpawnPlan {
    /// One entry per assigned participant, in roster order
    pub assignments: Vec<(Uuid, Position)>,
    /// Participants left without a point
    pub shortage: usize,
}

/// Pair roster entries with spawn points, both in order.
///
/// Exhaustion is recoverable: excess participants are counted, never an
/// error.
pub fn allocate<'a>(
    points: &[Position],
    participants: impl IntoIterator<Item = &'a Participant>,
) -> SpawnPlan {
    let mut assignments = Vec::new();
    let mut shortage = 0;

    for (idx, participant) in participants.into_iter().enumerate() {
        match points.get(idx) {
            Some(point) => assignments.push((participant.player_id(), *point)),
            None => shortage += 1,
        }
    }

    SpawnPlan {
        assignments,
        shortage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(n: usize) -> Vec<Position> {
        (0..n)
            .map(|i| Position {
                x: i as f64,
                y: 64.0,
                z: i as f64,
            })
            .collect()
    }

    fn participants(n: usize) -> Vec<Participant> {
        (0..n)
            .map(|i| Participant::solo(Uuid::new_v4(), format!("P{i}")))
            .collect()
    }

    #[test]
    fn pairs_first_n_participants_with_first_n_points() {
        let points = points(3);
        let roster = participants(2);
        let plan = allocate(&points, &roster);

        assert_eq!(plan.shortage, 0);
        assert_eq!(plan.assignments.len(), 2);
        for (i, (id, point)) in plan.assignments.iter().enumerate() {
            assert_eq!(*id, roster[i].player_id());
            assert_eq!(*point, points[i]);
        }
    }

    #[test]
    fn exhaustion_is_counted_not_fatal() {
        let points = points(2);
        let roster = participants(5);
        let plan = allocate(&points, &roster);

        assert_eq!(plan.assignments.len(), 2);
        assert_eq!(plan.shortage, 3);
    }

    #[test]
    fn zero_points_leaves_everyone_unassigned() {
        let roster = participants(3);
        let plan = allocate(&[], &roster);

        assert!(plan.assignments.is_empty());
        assert_eq!(plan.shortage, 3);
    }
}
