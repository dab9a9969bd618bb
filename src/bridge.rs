//! Precomputed edge crossings of a folded net.
//!
//! Stepping off a face either lands on the face next to it on the flat net, which is a plain
//! 2D step, or falls off the net and has to be carried around the cube. The latter is
//! resolved once per `(face, facing)` by matching the edge cells of the two faces in space,
//! so the walk itself only ever does table lookups.

use strum::IntoEnumIterator;

use crate::{
    fold::{edge_cell, Embedding},
    geom::{Facing, Point2},
    net::{FaceId, NetLayout},
    Error,
};

/// How to carry a walker over an edge that falls off the net.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CrossingRule {
    pub to: FaceId,
    /// edge of `to` the walker enters through
    pub edge: Facing,
    /// facing after the crossing, pointing into `to`
    pub entry: Facing,
    /// offset along the exit edge -> offset along `edge`
    remap: Vec<i16>,
}

impl CrossingRule {
    pub fn remap(&self, offset: i16) -> i16 {
        self.remap[offset as usize]
    }

    pub fn remap_table(&self) -> &[i16] {
        &self.remap
    }

    pub fn land(&self, offset: i16) -> (FaceId, Point2, Facing) {
        let n = self.remap.len() as i16;

        (self.to, edge_cell(self.edge, self.remap(offset), n), self.entry)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Link {
    /// the next face is right there on the net
    Net(FaceId),
    Cross(CrossingRule),
}

#[derive(Clone, Debug)]
pub struct CoordinateBridge {
    side: i16,
    links: [[Link; 4]; FaceId::COUNT],
}

impl CoordinateBridge {
    pub fn new(net: &NetLayout, cube: &Embedding) -> Result<Self, Error> {
        let mut rows = Vec::with_capacity(FaceId::COUNT);

        for face in FaceId::all() {
            let row = Facing::iter()
                .map(|facing| Self::link(net, cube, face, facing))
                .collect::<Result<Vec<_>, _>>()?;

            rows.push(<[Link; 4]>::try_from(row).expect("one link per facing"));
        }

        let links = rows.try_into().expect("one row per face");

        Ok(Self {
            side: net.face_size(),
            links,
        })
    }

    fn link(
        net: &NetLayout,
        cube: &Embedding,
        face: FaceId,
        facing: Facing,
    ) -> Result<Link, Error> {
        if let Some(neigh) = net.net_neighbour(face, facing) {
            return Ok(Link::Net(neigh));
        }

        let (to, edge) = cube
            .coincident_edge(face, facing)
            .ok_or_else(|| Error::Fold {
                face,
                reason: format!("its {facing:?} edge meets no other face"),
            })?;

        let n = net.face_size();

        // match every cell along our edge with the one touching it on the other side
        let remap = (0..n)
            .map(|offset| {
                let p = cube.edge_point3(face, facing, offset);

                (0..n)
                    .find(|&other| cube.edge_point3(to, edge, other) == p)
                    .ok_or_else(|| Error::Fold {
                        face,
                        reason: format!(
                            "cell {offset} along its {facing:?} edge has no counterpart on face {to}"
                        ),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::trace!(
            "crossing {face}{} -> {to}{}, facing {:?}, remap {:?}",
            facing.letter(),
            edge.letter(),
            edge.opposite(),
            remap
        );

        Ok(Link::Cross(CrossingRule {
            to,
            edge,
            entry: edge.opposite(),
            remap,
        }))
    }

    pub fn link_at(&self, face: FaceId, facing: Facing) -> &Link {
        &self.links[face.index()][facing as usize]
    }

    pub fn rule(&self, face: FaceId, facing: Facing) -> Option<&CrossingRule> {
        match self.link_at(face, facing) {
            Link::Net(_) => None,
            Link::Cross(rule) => Some(rule),
        }
    }

    /// Carries a walker standing on the `facing` edge of `face` over to the next face.
    pub fn across(&self, face: FaceId, pos: Point2, facing: Facing) -> (FaceId, Point2, Facing) {
        match self.link_at(face, facing) {
            Link::Net(neigh) => {
                let Point2(x, y) = pos + facing;

                (
                    *neigh,
                    Point2(x.rem_euclid(self.side), y.rem_euclid(self.side)),
                    facing,
                )
            }
            Link::Cross(rule) => rule.land(pos[facing.edge_axis()]),
        }
    }
}
