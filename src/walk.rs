use std::collections::HashMap;

use nom::{
    branch::alt,
    character::complete::{char, digit1, multispace0},
    combinator::{all_consuming, map, map_res, value},
    multi::many0,
    sequence::terminated,
    IResult,
};

use crate::{
    bridge::CoordinateBridge,
    geom::{Facing, Point2, Rotate},
    net::{FaceId, Material, NetLayout},
    Error,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Instruction {
    Move(usize),
    Turn(Rotate),
}

pub(crate) fn instructions(input: &str) -> IResult<&str, Vec<Instruction>> {
    use Instruction::*;
    use Rotate::*;

    many0(alt((
        map(map_res(digit1, str::parse), Move),
        value(Turn(Left), char('L')),
        value(Turn(Right), char('R')),
    )))(input)
}

pub fn parse_instructions(input: &str) -> Result<Vec<Instruction>, Error> {
    let (_, cmds) = all_consuming(terminated(instructions, multispace0))(input)?;

    Ok(cmds)
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WalkState {
    pub face: FaceId,
    /// position on `face`'s own grid
    pub pos: Point2,
    pub facing: Facing,
}

impl WalkState {
    pub fn rotate(self, rot: Rotate) -> Self {
        Self {
            facing: self.facing.turn(rot),
            ..self
        }
    }
}

/// Every net cell walked over, with the last facing it was left with.
pub type Trail = HashMap<Point2, Facing>;

pub struct SurfaceWalker<'a> {
    net: &'a NetLayout,
    bridge: &'a CoordinateBridge,
}

impl<'a> SurfaceWalker<'a> {
    pub fn new(net: &'a NetLayout, bridge: &'a CoordinateBridge) -> Self {
        Self { net, bridge }
    }

    pub fn start(&self, face: FaceId) -> Result<WalkState, Error> {
        let pos = self.net.first_open(face).ok_or(Error::NoOpenCell(face))?;

        Ok(WalkState {
            face,
            pos,
            facing: Facing::Right,
        })
    }

    pub fn global(&self, state: &WalkState) -> Point2 {
        self.net.to_global(state.face, state.pos)
    }

    /// Moves one cell forward, possibly onto another face. `None` if a wall is in the way.
    pub fn step(&self, state: WalkState) -> Option<WalkState> {
        let WalkState { face, pos, facing } = state;

        let next = pos + facing;

        let (face, pos, facing) = if self.net.contains_local(next) {
            (face, next, facing)
        } else {
            self.bridge.across(face, pos, facing)
        };

        // peek before committing: the walker never stands on a wall
        match self.net.classify(face, pos) {
            Material::Open => Some(WalkState { face, pos, facing }),
            Material::Wall => None,
            Material::Void => unreachable!("{pos} on face {face} is void"),
        }
    }

    fn execute(
        &self,
        mut state: WalkState,
        instr: Instruction,
        mut visit: impl FnMut(&WalkState),
    ) -> WalkState {
        match instr {
            Instruction::Turn(rot) => state = state.rotate(rot),
            Instruction::Move(count) => {
                for _ in 0..count {
                    let Some(next) = self.step(state) else {
                        // a wall ends the whole move
                        break;
                    };

                    visit(&state);
                    state = next;
                }
            }
        }

        visit(&state);

        state
    }

    pub fn apply(&self, state: WalkState, instr: Instruction) -> WalkState {
        self.execute(state, instr, |_| {})
    }

    pub fn run(&self, state: WalkState, instrs: &[Instruction]) -> WalkState {
        instrs
            .iter()
            .fold(state, |state, &instr| self.apply(state, instr))
    }

    /// Like [`Self::run`], also recording the cells walked over.
    pub fn trace(&self, mut state: WalkState, instrs: &[Instruction]) -> (WalkState, Trail) {
        let mut trail = Trail::from_iter([(self.global(&state), state.facing)]);

        for &instr in instrs {
            state = self.execute(state, instr, |s| {
                trail.insert(self.global(s), s.facing);
            });
        }

        (state, trail)
    }

    pub fn render_trail(&self, trail: &Trail) -> String {
        self.net.render(|p, m| {
            trail
                .get(&p)
                .map(|f| f.arrow())
                .unwrap_or_else(|| m.symbol())
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        fold::Embedding,
        net::tests::EXAMPLE,
        topology::{tests::EXAMPLE_TOPOLOGY, Topology},
    };

    fn id(label: u8) -> FaceId {
        FaceId::new(label).unwrap()
    }

    fn example() -> (NetLayout, CoordinateBridge) {
        let net = NetLayout::parse(EXAMPLE).unwrap();
        let topology: Topology = EXAMPLE_TOPOLOGY.parse().unwrap();
        let cube = Embedding::fold(&net, &topology).unwrap();
        let bridge = CoordinateBridge::new(&net, &cube).unwrap();

        (net, bridge)
    }

    #[test]
    fn parses_instructions() {
        use Instruction::*;

        assert_eq!(
            parse_instructions("10R5L5\n").unwrap(),
            [
                Move(10),
                Turn(Rotate::Right),
                Move(5),
                Turn(Rotate::Left),
                Move(5)
            ]
        );

        assert!(parse_instructions("").unwrap().is_empty());
        assert!(matches!(parse_instructions("10X5"), Err(Error::Parse(_))));
    }

    #[test]
    fn starts_on_the_first_open_cell() {
        let (net, bridge) = example();
        let walker = SurfaceWalker::new(&net, &bridge);

        let start = walker.start(id(1)).unwrap();

        assert_eq!(walker.global(&start), Point2(8, 0));
        assert_eq!(start.facing, Facing::Right);

        assert_eq!(walker.start(id(2)).unwrap().pos, Point2(0, 0));
    }

    #[test]
    fn walls_stop_the_whole_move() {
        let (net, bridge) = example();
        let walker = SurfaceWalker::new(&net, &bridge);

        let start = walker.start(id(1)).unwrap();

        // (11, 0) is a wall, two steps away
        let blocked = walker.apply(start, Instruction::Move(10));
        let exact = walker.apply(start, Instruction::Move(2));

        assert_eq!(blocked, exact);
        assert_eq!(walker.global(&blocked), Point2(10, 0));
        assert_eq!(walker.apply(blocked, Instruction::Move(8)), blocked);
    }

    #[test]
    fn full_turn_changes_nothing() {
        let (net, bridge) = example();
        let walker = SurfaceWalker::new(&net, &bridge);

        let start = walker.start(id(1)).unwrap();
        let instrs = parse_instructions("RRRR").unwrap();

        assert_eq!(walker.run(start, &instrs), start);
        assert_eq!(
            walker.run(start, &parse_instructions("LLLL").unwrap()),
            start
        );
    }

    #[test]
    fn steps_across_an_edge_change_facing() {
        let (net, bridge) = example();
        let walker = SurfaceWalker::new(&net, &bridge);

        // right off (11, 5) comes out at the top of face 6
        let at = WalkState {
            face: id(4),
            pos: Point2(3, 1),
            facing: Facing::Right,
        };

        let next = walker.step(at).unwrap();

        assert_eq!(next.face, id(6));
        assert_eq!(walker.global(&next), Point2(14, 8));
        assert_eq!(next.facing, Facing::Down);
    }

    #[test]
    fn example_path() {
        let (net, bridge) = example();
        let walker = SurfaceWalker::new(&net, &bridge);

        let instrs = parse_instructions("10R5L5R10L4R5L5").unwrap();
        let start = walker.start(id(1)).unwrap();

        let end = walker.run(start, &instrs);

        assert_eq!(walker.global(&end), Point2(6, 4));
        assert_eq!(end.facing, Facing::Up);

        // same thing twice
        let (traced, trail) = walker.trace(start, &instrs);

        assert_eq!(traced, end);
        assert_eq!(trail.get(&Point2(6, 4)), Some(&Facing::Up));
        assert_eq!(trail.get(&Point2(8, 0)), Some(&Facing::Right));
    }
}
