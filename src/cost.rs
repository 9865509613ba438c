//! Step cost and the heuristic family.
//!
//! Step cost is the radiation sum over the boat's destination footprint.
//! Heuristics all return 0 on terminal (goal-overlapping) states and
//! otherwise combine goal distance, obstacle density in the boat/goal
//! bounding box, and an orientation term. `consistent` and `admissible`
//! additionally scale by `min_rad_cost`, a lower bound on per-cell radiation
//! computed once from the initial board.

use std::collections::HashSet;

use crate::board_state::BoardState;
use crate::geometry::{manhattan, Direction, Point};

/// Radiation summed over the boat's footprint in the destination state.
/// May be negative; never clamped.
pub fn step_cost(state: &BoardState) -> i64 {
    state.boat.footprint().iter().map(|&p| state.rad.rads(p)).sum()
}

fn obstacle_points(state: &BoardState) -> HashSet<Point> {
    let mut pts = HashSet::new();
    for a in state.alligators.iter() {
        pts.extend(a.footprint());
    }
    for t in state.turtles.iter() {
        pts.extend(t.footprint());
    }
    for t in state.trees.iter() {
        pts.extend(t.footprint());
    }
    pts
}

fn bbox(points: &[Point]) -> (i32, i32, i32, i32) {
    let min_x = points.iter().map(|p| p.x).min().unwrap();
    let max_x = points.iter().map(|p| p.x).max().unwrap();
    let min_y = points.iter().map(|p| p.y).min().unwrap();
    let max_y = points.iter().map(|p| p.y).max().unwrap();
    (min_x, max_x, min_y, max_y)
}

fn obstacle_count_in_bbox(state: &BoardState, boat_pos: Point, boat_front: Point, goal: Point) -> i64 {
    let (min_x, max_x, min_y, max_y) = bbox(&[boat_pos, boat_front, goal]);
    let obstacles = obstacle_points(state);
    let mut count = 0i64;
    for x in min_x..=max_x {
        for y in min_y..=max_y {
            if obstacles.contains(&Point::new(x, y)) {
                count += 1;
            }
        }
    }
    count
}

/// `min(manhattan(boatAnchor, goal), manhattan(boatFront, goal)) +
/// obstacleCount_in_bbox + orientationPenalty`. Not guaranteed admissible.
pub fn greedy_heuristic(state: &BoardState) -> i64 {
    if state.is_goal() {
        return 0;
    }
    let boat_pos = state.boat.pose.anchor;
    let boat_front = state.boat.front();
    let goal = state.goal.pos;

    let goal_dist = manhattan(boat_pos, goal).min(manhattan(boat_front, goal)) as i64;
    let obstacle_cost = obstacle_count_in_bbox(state, boat_pos, boat_front, goal);
    let orientation_cost = orientation_penalty(state.boat.pose.dir, boat_pos, boat_front, goal);

    goal_dist + obstacle_cost + orientation_cost
}

/// 1 if the boat isn't already facing a dimension that reaches the goal's
/// dominant axis, mirroring the original "reward facing the long way" bias.
fn orientation_penalty(dir: Direction, boat_pos: Point, boat_front: Point, goal: Point) -> i64 {
    let (min_x, max_x, min_y, max_y) = bbox(&[boat_pos, boat_front, goal]);
    if (max_x - min_x) > (max_y - min_y) {
        match dir {
            Direction::Left if min_x == goal.x => 0,
            Direction::Right if max_x == goal.x => 0,
            Direction::Left | Direction::Right => 4,
            Direction::Up | Direction::Down => 1,
        }
    } else {
        match dir {
            Direction::Up if min_y == goal.y => 0,
            Direction::Down if max_y == goal.y => 0,
            Direction::Up | Direction::Down => 4,
            Direction::Left | Direction::Right => 1,
        }
    }
}

/// A small admissible orientation nudge: 1 if the boat doesn't already face
/// toward whichever side of the bbox touches the goal, else 0.
fn admissible_orientation_cost(dir: Direction, boat_pos: Point, boat_front: Point, goal: Point) -> i64 {
    let (min_x, max_x, min_y, max_y) = bbox(&[boat_pos, boat_front, goal]);
    let mut cost = 0i64;
    let facing_right_edge = max_x == goal.x;
    let facing_left_edge = min_x == goal.x;
    let facing_bottom_edge = max_y == goal.y;
    let facing_top_edge = min_y == goal.y;
    let matches = match dir {
        Direction::Left => facing_left_edge,
        Direction::Right => facing_right_edge,
        Direction::Up => facing_top_edge,
        Direction::Down => facing_bottom_edge,
    };
    if !matches {
        cost = 1;
    }
    cost
}

/// True when the boat can reach the goal in a single additional move:
/// either it's inline with the goal one cell away and the goal is clear, or
/// it's diagonally one step away and both the goal and the swept rotation
/// cell are clear.
fn one_move_from_clear_goal(state: &BoardState) -> bool {
    let boat_pos = state.boat.pose.anchor;
    let boat_front = state.boat.front();
    let goal = state.goal.pos;
    let obstacles = obstacle_points(state);

    let front_dist = manhattan(boat_pos, goal);
    let back_dist = manhattan(boat_pos, goal);

    if front_dist == 1 && (boat_pos.x == goal.x || boat_pos.y == goal.y) {
        if !obstacles.contains(&goal) {
            return true;
        }
    } else if back_dist == 1 && boat_front.x != goal.x && boat_front.y != goal.y {
        if !obstacles.contains(&goal) {
            let p1 = Point::new(goal.x, boat_front.y);
            let p2 = Point::new(boat_front.x, goal.y);
            if !obstacles.contains(&p1) && !obstacles.contains(&p2) {
                return true;
            }
        }
    }
    false
}

/// Lower bound on the radiation incurred by any single boat move: twice the
/// board-wide minimum per-cell radiation (a 2-cell footprint), plus the
/// decay factor as slack for discretization. Computed once from the initial
/// board so every heuristic instance built from the same puzzle agrees.
pub fn min_rad_cost(initial: &BoardState) -> i64 {
    let mut min = i64::MAX;
    for x in 0..initial.board.width {
        for y in 0..initial.board.height {
            let r = initial.rad.rads(Point::new(x, y));
            if r < min {
                min = r;
            }
        }
    }
    2 * min + initial.rad.decay
}

/// `goalDist * minRadCost`, with the one-move-from-goal short circuit.
/// Consistent (and therefore admissible) with respect to [`step_cost`].
pub fn consistent_heuristic(state: &BoardState, min_rad_cost: i64) -> i64 {
    if state.is_goal() {
        return 0;
    }
    if one_move_from_clear_goal(state) {
        return 0;
    }
    let boat_pos = state.boat.pose.anchor;
    let boat_front = state.boat.front();
    let goal = state.goal.pos;
    let goal_dist = manhattan(boat_pos, goal).min(manhattan(boat_front, goal)) as i64;
    goal_dist * min_rad_cost
}

/// [`consistent_heuristic`] plus a small orientation penalty scaled by
/// `min_rad_cost`; still admissible because the penalty is bounded by the
/// cost of the single extra rotation it accounts for.
pub fn admissible_heuristic(state: &BoardState, min_rad_cost: i64) -> i64 {
    if state.is_goal() {
        return 0;
    }
    if one_move_from_clear_goal(state) {
        return 0;
    }
    let boat_pos = state.boat.pose.anchor;
    let boat_front = state.boat.front();
    let goal = state.goal.pos;
    let goal_dist = manhattan(boat_pos, goal).min(manhattan(boat_front, goal)) as i64;
    let orientation_cost = admissible_orientation_cost(state.boat.pose.dir, boat_pos, boat_front, goal);
    (goal_dist + orientation_cost) * min_rad_cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Boat, Goal, RadiationSource};
    use crate::geometry::{Pose, Rectangle};

    fn state_with_boat(boat_pos: Point, dir: Direction, goal: Point, mag: i64, decay: i64) -> BoardState {
        BoardState::new(
            Rectangle::new(5, 5),
            RadiationSource::new(Point::new(2, 2), mag, decay),
            Boat::new(Pose { anchor: boat_pos, dir }),
            Goal::new(goal),
            vec![],
            vec![],
            vec![],
        )
    }

    #[test]
    fn heuristics_are_zero_at_goal() {
        let state = state_with_boat(Point::new(4, 4), Direction::Right, Point::new(4, 4), 10, 1);
        assert_eq!(greedy_heuristic(&state), 0);
        let mrc = min_rad_cost(&state);
        assert_eq!(consistent_heuristic(&state, mrc), 0);
        assert_eq!(admissible_heuristic(&state, mrc), 0);
    }

    #[test]
    fn consistent_heuristic_never_overestimates_on_hand_solved_case() {
        let state = state_with_boat(Point::new(0, 2), Direction::Right, Point::new(4, 2), 10, 1);
        let mrc = min_rad_cost(&state);
        // Optimal path: four forwards, each incurring step_cost of the boat's
        // two-cell footprint after the move; compute the true optimal cost by
        // hand-walking the only path (no obstacles on this board).
        let mut cur = state.clone();
        let mut true_cost = 0i64;
        for _ in 0..4 {
            let action = crate::entities::Action::new(
                crate::entities::ObjectKind::Boat,
                0,
                crate::entities::MoveKind::Forward,
            );
            cur = cur.apply_action(&action).expect("forward always legal here");
            true_cost += step_cost(&cur);
        }
        assert!(cur.is_goal());
        assert!(consistent_heuristic(&state, mrc) <= true_cost);
    }

    #[test]
    fn step_cost_sums_radiation_over_boat_footprint() {
        let state = state_with_boat(Point::new(2, 2), Direction::Right, Point::new(4, 4), 10, 1);
        // boat occupies (2,2) and (3,2); rads(2,2) = 10, rads(3,2) = 9
        assert_eq!(step_cost(&state), 19);
    }

    #[test]
    fn min_rad_cost_uses_board_wide_minimum() {
        let state = state_with_boat(Point::new(0, 0), Direction::Right, Point::new(4, 4), 10, 3);
        // Farthest board cell from (2,2) within a 5x5 board is manhattan 4 (e.g. (0,0)? that's 4)
        let mrc = min_rad_cost(&state);
        assert_eq!(mrc, 2 * (10 - 3 * 4) + 3);
    }
}
