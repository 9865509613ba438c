//! The immutable board snapshot and its successor function.
//!
//! A [`BoardState`] bundles every entity on the board. It never mutates in
//! place: [`BoardState::apply_action`] returns a fresh snapshot (or `None` if
//! the action is illegal), sharing every entity list it didn't touch via
//! `Rc` so a single move never re-allocates the whole state.

use std::fmt;
use std::rc::Rc;

use crate::entities::{
    Action, Alligator, Boat, Footprint, Goal, MoveKind, ObjectKind, RadiationSource, Tree, Turtle,
};
use crate::error::bail_internal;
use crate::geometry::{ray_cells, Point, Pose, Rectangle};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardState {
    pub board: Rectangle,
    pub rad: RadiationSource,
    pub boat: Boat,
    pub goal: Goal,
    pub alligators: Rc<Vec<Alligator>>,
    pub turtles: Rc<Vec<Turtle>>,
    pub trees: Rc<Vec<Tree>>,
}

impl BoardState {
    pub fn new(
        board: Rectangle,
        rad: RadiationSource,
        boat: Boat,
        goal: Goal,
        alligators: Vec<Alligator>,
        turtles: Vec<Turtle>,
        trees: Vec<Tree>,
    ) -> Self {
        Self {
            board,
            rad,
            boat,
            goal,
            alligators: Rc::new(alligators),
            turtles: Rc::new(turtles),
            trees: Rc::new(trees),
        }
    }

    pub fn is_goal(&self) -> bool {
        !self.boat.footprint().is_disjoint(&self.goal.footprint())
    }

    fn tree_footprint(&self) -> Footprint {
        self.trees.iter().flat_map(|t| t.footprint()).collect()
    }

    /// Apply `action`, returning the resulting state if legal, `None`
    /// otherwise. Panics (InternalInvariant) if `action` pairs an object
    /// kind with a move kind it cannot perform; `neighbors` never produces
    /// such a pairing, so this can only happen on programmer error.
    pub fn apply_action(&self, action: &Action) -> Option<BoardState> {
        match action.obj {
            ObjectKind::Boat => self.apply_boat_action(action),
            ObjectKind::Alligator => self.apply_alligator_action(action),
            ObjectKind::Turtle => self.apply_turtle_action(action),
        }
    }

    fn apply_boat_action(&self, action: &Action) -> Option<BoardState> {
        let old_front = ray_cells(self.boat.pose, 2)[1];
        let (new_pose, swept) = match action.mv {
            MoveKind::Forward => (
                Pose {
                    anchor: old_front,
                    dir: self.boat.pose.dir,
                },
                None,
            ),
            MoveKind::Clockwise => {
                let dir = self.boat.pose.dir.clockwise();
                (Pose { anchor: self.boat.pose.anchor, dir }, Some(old_front))
            }
            MoveKind::CounterClockwise => {
                let dir = self.boat.pose.dir.counter_clockwise();
                (Pose { anchor: self.boat.pose.anchor, dir }, Some(old_front))
            }
            MoveKind::Backward => bail_internal!("boat has no backward move"),
        };
        let new_boat = Boat::new(new_pose);
        let mut test_footprint = new_boat.footprint();
        if let Some(old_front) = swept {
            let new_front = ray_cells(new_pose, 2)[1];
            test_footprint.insert(Point::new(new_front.x, old_front.y));
            test_footprint.insert(Point::new(old_front.x, new_front.y));
        }

        if !self.board.contains_all(&test_footprint) {
            return None;
        }
        let obstacles = self.obstacle_footprint_excluding_boat();
        if !test_footprint.is_disjoint(&obstacles) {
            return None;
        }

        Some(BoardState {
            board: self.board,
            rad: self.rad,
            boat: new_boat,
            goal: self.goal,
            alligators: Rc::clone(&self.alligators),
            turtles: Rc::clone(&self.turtles),
            trees: Rc::clone(&self.trees),
        })
    }

    fn apply_alligator_action(&self, action: &Action) -> Option<BoardState> {
        let index = action.index;
        let current = *self.alligators.get(index)?;
        let new_pose = move_animal_pose(current.pose, action.mv);
        let moved = Alligator::new(new_pose);
        let test_footprint = moved.footprint();

        if !self.board.contains_all(&test_footprint) {
            return None;
        }
        let mut obstacles = self.tree_footprint();
        obstacles.extend(self.boat.footprint());
        obstacles.extend(self.turtles.iter().flat_map(|t| t.footprint()));
        for (i, other) in self.alligators.iter().enumerate() {
            if i != index {
                obstacles.extend(other.footprint());
            }
        }
        if !test_footprint.is_disjoint(&obstacles) {
            return None;
        }

        let mut new_alligators = (*self.alligators).clone();
        new_alligators[index] = moved;
        Some(BoardState {
            board: self.board,
            rad: self.rad,
            boat: self.boat,
            goal: self.goal,
            alligators: Rc::new(new_alligators),
            turtles: Rc::clone(&self.turtles),
            trees: Rc::clone(&self.trees),
        })
    }

    fn apply_turtle_action(&self, action: &Action) -> Option<BoardState> {
        let index = action.index;
        let current = *self.turtles.get(index)?;
        let new_pose = move_animal_pose(current.pose, action.mv);
        let moved = Turtle::new(new_pose);
        let test_footprint = moved.footprint();

        if !self.board.contains_all(&test_footprint) {
            return None;
        }
        let mut obstacles = self.tree_footprint();
        obstacles.extend(self.boat.footprint());
        obstacles.extend(self.alligators.iter().flat_map(|a| a.footprint()));
        for (i, other) in self.turtles.iter().enumerate() {
            if i != index {
                obstacles.extend(other.footprint());
            }
        }
        if !test_footprint.is_disjoint(&obstacles) {
            return None;
        }

        let mut new_turtles = (*self.turtles).clone();
        new_turtles[index] = moved;
        Some(BoardState {
            board: self.board,
            rad: self.rad,
            boat: self.boat,
            goal: self.goal,
            alligators: Rc::clone(&self.alligators),
            turtles: Rc::new(new_turtles),
            trees: Rc::clone(&self.trees),
        })
    }

    fn obstacle_footprint_excluding_boat(&self) -> Footprint {
        let mut obstacles = self.tree_footprint();
        obstacles.extend(self.alligators.iter().flat_map(|a| a.footprint()));
        obstacles.extend(self.turtles.iter().flat_map(|t| t.footprint()));
        obstacles
    }

    /// All movable entities in generator order `[Boat, Alligators.., Turtles..]`,
    /// paired with the `(new_state, action)` for every legal action whose
    /// `apply_action` succeeds.
    pub fn neighbors(&self) -> Vec<(BoardState, Action)> {
        let mut out = Vec::new();
        for action in self.boat.legal_actions(0) {
            if let Some(s) = self.apply_action(&action) {
                out.push((s, action));
            }
        }
        for (i, gator) in self.alligators.iter().enumerate() {
            for action in gator.legal_actions(i) {
                if let Some(s) = self.apply_action(&action) {
                    out.push((s, action));
                }
            }
        }
        for (i, turtle) in self.turtles.iter().enumerate() {
            for action in turtle.legal_actions(i) {
                if let Some(s) = self.apply_action(&action) {
                    out.push((s, action));
                }
            }
        }
        out
    }

    /// Every footprint-bearing entity, boat first then the goal last, for
    /// invariant checking in [`crate::puzzle_io::parse`] and tests. The goal
    /// is expected to overlap the boat's footprint at a solved state, so
    /// callers checking pairwise disjointness must special-case that pair.
    pub fn all_footprints(&self) -> Vec<(&'static str, Footprint)> {
        let mut v = vec![("boat", self.boat.footprint())];
        for g in self.alligators.iter() {
            v.push(("alligator", g.footprint()));
        }
        for t in self.turtles.iter() {
            v.push(("turtle", t.footprint()));
        }
        for t in self.trees.iter() {
            v.push(("tree", t.footprint()));
        }
        v.push(("goal", self.goal.footprint()));
        v
    }
}

/// Serialises in the puzzle file layout: dimensions, radiation source,
/// entity counts, then each entity block in `[alligators, turtles, trees]`
/// order, then the boat and goal. The parser in [`crate::puzzle_io`] reads
/// this exact layout back.
impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.board.width, self.board.height)?;
        writeln!(f, "{} {}", self.rad.location.x, self.rad.location.y)?;
        writeln!(f, "{} {}", self.rad.magnitude, self.rad.decay)?;
        writeln!(f, "{} {} {}", self.alligators.len(), self.turtles.len(), self.trees.len())?;
        for a in self.alligators.iter() {
            writeln!(f, "{} {} {}", a.pose.anchor.x, a.pose.anchor.y, a.pose.dir.as_char())?;
        }
        for t in self.turtles.iter() {
            writeln!(f, "{} {} {}", t.pose.anchor.x, t.pose.anchor.y, t.pose.dir.as_char())?;
        }
        for t in self.trees.iter() {
            writeln!(f, "{} {}", t.pos.x, t.pos.y)?;
        }
        writeln!(f, "{} {} {}", self.boat.pose.anchor.x, self.boat.pose.anchor.y, self.boat.pose.dir.as_char())?;
        write!(f, "{} {}", self.goal.pos.x, self.goal.pos.y)
    }
}

/// Forward: translate anchor one cell in `pose.dir`, direction unchanged.
/// Backward: reverse direction, compute forward, reverse back — direction is
/// never considered "changed" by a backward move.
fn move_animal_pose(pose: Pose, mv: MoveKind) -> Pose {
    match mv {
        MoveKind::Forward => Pose {
            anchor: ray_cells(pose, 2)[1],
            dir: pose.dir,
        },
        MoveKind::Backward => {
            let reversed = pose.reversed();
            let stepped = ray_cells(reversed, 2)[1];
            Pose { anchor: stepped, dir: pose.dir }
        }
        MoveKind::Clockwise | MoveKind::CounterClockwise => {
            bail_internal!("animals cannot rotate")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RadiationSource;
    use crate::geometry::Direction;

    fn empty_state(width: i32, height: i32, boat: Pose, goal: Point) -> BoardState {
        BoardState::new(
            Rectangle::new(width, height),
            RadiationSource::new(Point::new(0, 0), 0, 0),
            Boat::new(boat),
            Goal::new(goal),
            vec![],
            vec![],
            vec![],
        )
    }

    #[test]
    fn forward_then_forward_reaches_goal_on_trivial_board() {
        let state = empty_state(3, 3, Pose::new(0, 0, Direction::Right), Point::new(2, 0));
        let action = Action::new(ObjectKind::Boat, 0, MoveKind::Forward);
        let s1 = state.apply_action(&action).expect("first forward legal");
        assert!(!s1.is_goal());
        let s2 = s1.apply_action(&action).expect("second forward legal");
        assert!(s2.is_goal());
    }

    #[test]
    fn rotation_requires_both_diagonals_clear() {
        let state = BoardState::new(
            Rectangle::new(3, 3),
            RadiationSource::new(Point::new(0, 0), 0, 0),
            Boat::new(Pose::new(0, 0, Direction::Right)),
            Goal::new(Point::new(0, 2)),
            vec![],
            vec![],
            vec![Tree::new(Point::new(1, 1))],
        );
        let cw = Action::new(ObjectKind::Boat, 0, MoveKind::Clockwise);
        assert!(state.apply_action(&cw).is_none());
    }

    #[test]
    fn animal_forward_then_backward_is_reversible() {
        let state = BoardState::new(
            Rectangle::new(5, 5),
            RadiationSource::new(Point::new(0, 0), 0, 0),
            Boat::new(Pose::new(4, 4, Direction::Right)),
            Goal::new(Point::new(4, 4)),
            vec![Alligator::new(Pose::new(0, 0, Direction::Right))],
            vec![],
            vec![],
        );
        let fwd = Action::new(ObjectKind::Alligator, 0, MoveKind::Forward);
        let bwd = Action::new(ObjectKind::Alligator, 0, MoveKind::Backward);
        let moved = state.apply_action(&fwd).expect("forward legal");
        let back = moved.apply_action(&bwd).expect("backward legal");
        assert_eq!(back.alligators[0].pose, state.alligators[0].pose);
    }

    #[test]
    fn successor_footprints_stay_on_board_and_disjoint() {
        let state = BoardState::new(
            Rectangle::new(5, 2),
            RadiationSource::new(Point::new(0, 0), 0, 0),
            Boat::new(Pose::new(0, 0, Direction::Right)),
            Goal::new(Point::new(4, 1)),
            vec![Alligator::new(Pose::new(2, 0, Direction::Right))],
            vec![],
            vec![],
        );
        for (succ, _action) in state.neighbors() {
            let boat_footprint = succ.boat.footprint();
            let mut seen = Footprint::new();
            for (name, fp) in succ.all_footprints() {
                assert!(succ.board.contains_all(&fp));
                // The goal is allowed to overlap the boat (that's the win
                // condition); every other pair must stay disjoint.
                if name == "goal" {
                    for p in &fp {
                        assert!(boat_footprint.contains(p) || !seen.contains(p), "goal overlaps a non-boat entity");
                    }
                } else {
                    assert!(seen.is_disjoint(&fp), "footprints overlap");
                }
                seen.extend(fp);
            }
        }
    }

    #[test]
    fn unmoved_entities_are_structurally_shared() {
        let state = BoardState::new(
            Rectangle::new(5, 5),
            RadiationSource::new(Point::new(0, 0), 0, 0),
            Boat::new(Pose::new(0, 0, Direction::Right)),
            Goal::new(Point::new(4, 4)),
            vec![Alligator::new(Pose::new(3, 3, Direction::Right))],
            vec![Turtle::new(Pose::new(1, 3, Direction::Right))],
            vec![],
        );
        let action = Action::new(ObjectKind::Boat, 0, MoveKind::Forward);
        let next = state.apply_action(&action).expect("legal");
        assert!(Rc::ptr_eq(&state.alligators, &next.alligators));
        assert!(Rc::ptr_eq(&state.turtles, &next.turtles));
    }

    #[test]
    fn neighbor_order_is_deterministic() {
        let state = BoardState::new(
            Rectangle::new(5, 5),
            RadiationSource::new(Point::new(0, 0), 0, 0),
            Boat::new(Pose::new(0, 0, Direction::Right)),
            Goal::new(Point::new(4, 4)),
            vec![Alligator::new(Pose::new(2, 2, Direction::Right))],
            vec![Turtle::new(Pose::new(3, 3, Direction::Right))],
            vec![],
        );
        let first: Vec<String> = state.neighbors().iter().map(|(_, a)| a.to_string()).collect();
        let second: Vec<String> = state.neighbors().iter().map(|(_, a)| a.to_string()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn display_emits_the_puzzle_file_layout() {
        let state = BoardState::new(
            Rectangle::new(3, 3),
            RadiationSource::new(Point::new(1, 1), 5, 1),
            Boat::new(Pose::new(0, 0, Direction::Right)),
            Goal::new(Point::new(2, 2)),
            vec![Alligator::new(Pose::new(1, 0, Direction::Down))],
            vec![],
            vec![Tree::new(Point::new(0, 2))],
        );
        let expected = "3 3\n1 1\n5 1\n1 0 1\n1 0 D\n0 2\n0 0 R\n2 2";
        assert_eq!(state.to_string(), expected);
    }
}
