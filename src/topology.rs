//! Which face edges meet when a net is folded.
//!
//! A topology is written one gluing per line, as two `<face><edge>` pairs with the edge
//! being one of `U`, `R`, `D` or `L`:
//!
//! ```text
//! # face 1's left edge touches face 3's top edge
//! 1L 3U
//! ```

use std::{fmt::Display, str::FromStr};

use itertools::Itertools;
use nom::{
    character::complete::{anychar, satisfy, space1},
    combinator::{all_consuming, map, map_opt},
    sequence::{pair, separated_pair},
    IResult,
};
use strum::IntoEnumIterator;

use crate::{
    fold::Embedding,
    geom::Facing,
    net::{FaceId, NetLayout},
    Error,
};

pub type Edge = (FaceId, Facing);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Gluing {
    pub a: Edge,
    pub b: Edge,
}

/// The twelve edges of a cube, as pairs of face edges.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Topology {
    table: [[Edge; 4]; FaceId::COUNT],
}

impl Topology {
    /// Builds the table, requiring every face edge to be glued exactly once, and never to
    /// its own face.
    pub fn new(gluings: impl IntoIterator<Item = Gluing>) -> Result<Self, Error> {
        let mut table: [[Option<Edge>; 4]; FaceId::COUNT] = Default::default();

        for Gluing { a, b } in gluings {
            if a.0 == b.0 {
                return Err(Error::Topology(format!(
                    "face {} is glued to itself",
                    a.0
                )));
            }

            for (from, to) in [(a, b), (b, a)] {
                let slot = &mut table[from.0.index()][from.1 as usize];

                if let Some(prev) = slot {
                    return Err(Error::Topology(format!(
                        "edge {} is glued to both {} and {}",
                        fmt_edge(from),
                        fmt_edge(*prev),
                        fmt_edge(to)
                    )));
                }

                *slot = Some(to);
            }
        }

        let mut ret = [[(FaceId::FIRST, Facing::Up); 4]; FaceId::COUNT];

        for (face, facing) in FaceId::all().cartesian_product(Facing::iter()) {
            ret[face.index()][facing as usize] = table[face.index()][facing as usize]
                .ok_or_else(|| {
                    Error::Topology(format!("edge {} is not glued", fmt_edge((face, facing))))
                })?;
        }

        Ok(Self { table: ret })
    }

    /// Reads the topology off the net itself by folding it along the edges it already
    /// shares on paper.
    pub fn infer(net: &NetLayout) -> Result<Self, Error> {
        let cube = Embedding::from_net(net)?;

        let mut gluings = Vec::with_capacity(12);

        for (face, facing) in FaceId::all().cartesian_product(Facing::iter()) {
            let other = cube.coincident_edge(face, facing).ok_or_else(|| Error::Fold {
                face,
                reason: format!("nothing meets its {facing:?} edge"),
            })?;

            // each edge shows up from both sides; keep it once
            if (face, facing as u8) < (other.0, other.1 as u8) {
                gluings.push(Gluing {
                    a: (face, facing),
                    b: other,
                });
            }
        }

        log::debug!(
            "inferred topology: {}",
            gluings
                .iter()
                .map(|g| format!("{}-{}", fmt_edge(g.a), fmt_edge(g.b)))
                .format(" ")
        );

        Self::new(gluings)
    }

    pub fn parse(input: &str) -> Result<Self, Error> {
        let mut gluings = Vec::new();

        for (n, line) in input.lines().enumerate() {
            let line = line.split('#').next().unwrap_or_default().trim();

            if line.is_empty() {
                continue;
            }

            let (_, g) = all_consuming(gluing)(line)
                .map_err(|e| Error::Parse(format!("topology line {}: {e}", n + 1)))?;

            gluings.push(g);
        }

        Self::new(gluings)
    }

    pub fn glued(&self, face: FaceId, facing: Facing) -> Edge {
        self.table[face.index()][facing as usize]
    }

    pub fn gluings(&self) -> impl Iterator<Item = Gluing> + '_ {
        FaceId::all()
            .cartesian_product(Facing::iter())
            .map(|a| Gluing {
                a,
                b: self.glued(a.0, a.1),
            })
            .filter(|Gluing { a, b }| (a.0, a.1 as u8) < (b.0, b.1 as u8))
    }
}

impl FromStr for Topology {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for Gluing { a, b } in self.gluings() {
            writeln!(f, "{} {}", fmt_edge(a), fmt_edge(b))?;
        }

        Ok(())
    }
}

fn fmt_edge((face, facing): Edge) -> String {
    format!("{face}{}", facing.letter())
}

fn face_id(input: &str) -> IResult<&str, FaceId> {
    map_opt(satisfy(|c| c.is_ascii_digit()), |c| {
        FaceId::new(c as u8 - b'0')
    })(input)
}

fn edge(input: &str) -> IResult<&str, Edge> {
    pair(face_id, map_opt(anychar, Facing::from_letter))(input)
}

fn gluing(input: &str) -> IResult<&str, Gluing> {
    map(separated_pair(edge, space1, edge), |(a, b)| Gluing { a, b })(input)
}

#[cfg(test)]
pub(crate) mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::net::tests::EXAMPLE;

    pub(crate) const EXAMPLE_TOPOLOGY: &str = indoc! {"
        # the 4x4 example net
        1U 2U
        1L 3U
        1R 6R
        1D 4U
        2L 6D
        2R 3L
        2D 5D
        3R 4L
        3D 5L
        4R 6U
        4D 5U
        5R 6L
    "};

    /// The shape of the full-size puzzle inputs, shrunk to 2x2 faces.
    pub(crate) const TALL_NET: &str = indoc! {"
          ....
          ....
          ..
          ..
        ....
        ....
        ..
        ..
    "};

    fn id(label: u8) -> FaceId {
        FaceId::new(label).unwrap()
    }

    #[test]
    fn parses_and_looks_up_both_ways() {
        let t: Topology = EXAMPLE_TOPOLOGY.parse().unwrap();

        assert_eq!(t.glued(id(1), Facing::Left), (id(3), Facing::Up));
        assert_eq!(t.glued(id(3), Facing::Up), (id(1), Facing::Left));
        assert_eq!(t.gluings().count(), 12);
    }

    #[test]
    fn display_round_trips() {
        let t: Topology = EXAMPLE_TOPOLOGY.parse().unwrap();

        assert_eq!(t.to_string().parse::<Topology>().unwrap(), t);
    }

    #[test]
    fn infers_the_example() {
        let net = NetLayout::parse(EXAMPLE).unwrap();

        assert_eq!(
            Topology::infer(&net).unwrap(),
            EXAMPLE_TOPOLOGY.parse::<Topology>().unwrap()
        );
    }

    #[test]
    fn infers_the_tall_net() {
        let net = NetLayout::parse(TALL_NET).unwrap();

        let expected: Topology = indoc! {"
            1R 2L
            1D 3U
            3D 5U
            4R 5L
            4D 6U
            6D 2U
            6L 1U
            6R 5D
            4L 1L
            4U 3L
            5R 2R
            3R 2D
        "}
        .parse()
        .unwrap();

        assert_eq!(Topology::infer(&net).unwrap(), expected);
    }

    #[test]
    fn rejects_edges_glued_twice() {
        let bad = EXAMPLE_TOPOLOGY.replace("5R 6L", "5R 1U");

        assert!(matches!(
            bad.parse::<Topology>(),
            Err(Error::Topology(msg)) if msg.contains("1U")
        ));
    }

    #[test]
    fn rejects_missing_edges() {
        let bad = EXAMPLE_TOPOLOGY.replace("5R 6L", "");

        assert_eq!(
            bad.parse::<Topology>().unwrap_err(),
            Error::Topology("edge 5R is not glued".to_string())
        );
    }

    #[test]
    fn rejects_self_gluing() {
        let bad = EXAMPLE_TOPOLOGY.replace("5R 6L", "5R 5L");

        assert!(matches!(bad.parse::<Topology>(), Err(Error::Topology(_))));
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["1X 2U", "0U 2U", "7U 2U", "1U2U", "1U 2U 3U"] {
            assert!(
                matches!(Topology::parse(bad), Err(Error::Parse(_))),
                "{bad} should not parse"
            );
        }
    }
}
