//! Game entities: the board, the radiation source, the three movable piece
//! kinds (boat, alligator, turtle), and the two single-cell static kinds
//! (tree, goal). Every entity exposes a `footprint`; movables additionally
//! expose `legal_actions`.

use std::collections::HashSet;
use std::fmt;

use crate::geometry::{ray_cells, Direction, Pose};

pub type Footprint = HashSet<crate::geometry::Point>;

/// Which kind of object an [`Action`] moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Boat,
    Alligator,
    Turtle,
}

impl ObjectKind {
    pub fn as_char(self) -> char {
        match self {
            ObjectKind::Boat => 'B',
            ObjectKind::Alligator => 'A',
            ObjectKind::Turtle => 'T',
        }
    }
}

/// The kind of move an [`Action`] applies, independent of which object moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Clockwise,
    CounterClockwise,
    Forward,
    Backward,
}

impl MoveKind {
    /// The move-character used when an action has no display direction.
    pub fn as_char(self) -> char {
        match self {
            MoveKind::Clockwise => 'C',
            MoveKind::CounterClockwise => 'N',
            MoveKind::Forward => 'F',
            MoveKind::Backward => 'B',
        }
    }
}

/// An action: which object, which move, and (cosmetically) which cardinal
/// direction to print instead of the move character. Equality and hashing
/// ignore `display_dir`.
#[derive(Clone, Copy, Debug)]
pub struct Action {
    pub obj: ObjectKind,
    pub index: usize,
    pub mv: MoveKind,
    pub display_dir: Option<Direction>,
}

impl Action {
    pub fn new(obj: ObjectKind, index: usize, mv: MoveKind) -> Self {
        Self {
            obj,
            index,
            mv,
            display_dir: None,
        }
    }

    pub fn with_display(obj: ObjectKind, index: usize, mv: MoveKind, dir: Direction) -> Self {
        Self {
            obj,
            index,
            mv,
            display_dir: Some(dir),
        }
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.obj == other.obj && self.index == other.index && self.mv == other.mv
    }
}
impl Eq for Action {}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir_char = self.display_dir.map_or(self.mv.as_char(), Direction::as_char);
        write!(f, "{} {} {}", self.obj.as_char(), self.index, dir_char)
    }
}

/// A non-negative-magnitude radiation field decaying linearly with Manhattan
/// distance. Values may go negative once `D * distance` exceeds `M`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RadiationSource {
    pub location: crate::geometry::Point,
    pub magnitude: i64,
    pub decay: i64,
}

impl RadiationSource {
    pub fn new(location: crate::geometry::Point, magnitude: i64, decay: i64) -> Self {
        Self {
            location,
            magnitude,
            decay,
        }
    }

    pub fn rads(&self, p: crate::geometry::Point) -> i64 {
        self.magnitude - self.decay * i64::from(crate::geometry::manhattan(self.location, p))
    }
}

/// Length in cells of a given movable kind.
pub const BOAT_LENGTH: usize = 2;
pub const ALLIGATOR_LENGTH: usize = 3;
pub const TURTLE_LENGTH: usize = 2;

fn footprint_of(pose: Pose, length: usize) -> Footprint {
    ray_cells(pose, length).into_iter().collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Boat {
    pub pose: Pose,
}

impl Boat {
    pub fn new(pose: Pose) -> Self {
        Self { pose }
    }

    pub fn footprint(&self) -> Footprint {
        footprint_of(self.pose, BOAT_LENGTH)
    }

    /// `[Forward, CounterClockwise, Clockwise]`, matching spec.md §4.2.
    pub fn legal_actions(&self, index: usize) -> Vec<Action> {
        vec![
            Action::with_display(ObjectKind::Boat, index, MoveKind::Forward, self.pose.dir),
            Action::new(ObjectKind::Boat, index, MoveKind::CounterClockwise),
            Action::new(ObjectKind::Boat, index, MoveKind::Clockwise),
        ]
    }

    pub fn front(&self) -> crate::geometry::Point {
        ray_cells(self.pose, BOAT_LENGTH)[BOAT_LENGTH - 1]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Alligator {
    pub pose: Pose,
}

impl Alligator {
    pub fn new(pose: Pose) -> Self {
        Self { pose }
    }

    pub fn footprint(&self) -> Footprint {
        footprint_of(self.pose, ALLIGATOR_LENGTH)
    }

    pub fn legal_actions(&self, index: usize) -> Vec<Action> {
        animal_actions(ObjectKind::Alligator, index, self.pose.dir)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Turtle {
    pub pose: Pose,
}

impl Turtle {
    pub fn new(pose: Pose) -> Self {
        Self { pose }
    }

    pub fn footprint(&self) -> Footprint {
        footprint_of(self.pose, TURTLE_LENGTH)
    }

    pub fn legal_actions(&self, index: usize) -> Vec<Action> {
        animal_actions(ObjectKind::Turtle, index, self.pose.dir)
    }
}

/// `[Forward, Backward]` shared by alligators and turtles; backward's display
/// direction is the reverse of the current facing.
fn animal_actions(obj: ObjectKind, index: usize, facing: Direction) -> Vec<Action> {
    vec![
        Action::with_display(obj, index, MoveKind::Forward, facing),
        Action::with_display(obj, index, MoveKind::Backward, facing.reverse()),
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tree {
    pub pos: crate::geometry::Point,
}

impl Tree {
    pub fn new(pos: crate::geometry::Point) -> Self {
        Self { pos }
    }

    pub fn footprint(&self) -> Footprint {
        [self.pos].into_iter().collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Goal {
    pub pos: crate::geometry::Point,
}

impl Goal {
    pub fn new(pos: crate::geometry::Point) -> Self {
        Self { pos }
    }

    pub fn footprint(&self) -> Footprint {
        [self.pos].into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn boat_legal_actions_are_forward_then_rotations() {
        let boat = Boat::new(Pose::new(0, 0, Direction::Right));
        let actions = boat.legal_actions(0);
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0].mv, MoveKind::Forward);
        assert_eq!(actions[1].mv, MoveKind::CounterClockwise);
        assert_eq!(actions[2].mv, MoveKind::Clockwise);
    }

    #[test]
    fn animal_legal_actions_tag_backward_with_reverse_direction() {
        let gator = Alligator::new(Pose::new(0, 0, Direction::Down));
        let actions = gator.legal_actions(2);
        assert_eq!(actions[0].display_dir, Some(Direction::Down));
        assert_eq!(actions[1].mv, MoveKind::Backward);
        assert_eq!(actions[1].display_dir, Some(Direction::Up));
    }

    #[test]
    fn action_equality_ignores_display_direction() {
        let a = Action::with_display(ObjectKind::Boat, 0, MoveKind::Forward, Direction::Up);
        let b = Action::new(ObjectKind::Boat, 0, MoveKind::Forward);
        assert_eq!(a, b);
    }

    #[test]
    fn action_display_format() {
        let a = Action::new(ObjectKind::Turtle, 1, MoveKind::Clockwise);
        assert_eq!(a.to_string(), "T 1 C");
        let b = Action::with_display(ObjectKind::Boat, 0, MoveKind::Forward, Direction::Right);
        assert_eq!(b.to_string(), "B 0 R");
    }

    #[test]
    fn radiation_decays_with_distance_and_may_go_negative() {
        let src = RadiationSource::new(Point::new(0, 0), 10, 3);
        assert_eq!(src.rads(Point::new(0, 0)), 10);
        assert_eq!(src.rads(Point::new(1, 0)), 7);
        assert_eq!(src.rads(Point::new(5, 0)), -5);
    }

    #[test]
    fn boat_footprint_has_two_cells() {
        let boat = Boat::new(Pose::new(1, 1, Direction::Down));
        let fp = boat.footprint();
        assert_eq!(fp.len(), 2);
        assert!(fp.contains(&Point::new(1, 1)));
        assert!(fp.contains(&Point::new(1, 2)));
    }
}
