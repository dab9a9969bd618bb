//! Folding a net into a cube.
//!
//! Every face gets a rigid placement in 3D: an integer orthonormal frame `(u, v)` and an
//! origin. Local coordinates are doubled (a face spans `0..=2n` on both axes) so that cell
//! centres and edge midpoints are integer points, which keeps every comparison exact.
//!
//! ```text
//!        origin +------> u (local x, Right)
//!               |
//!               |   normal = u × v points out of the cube
//!               v
//!        v (local y, Down)
//! ```

use std::collections::VecDeque;

use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::{
    geom::{Facing, Point2, Point3, Rotate},
    net::{FaceId, NetLayout},
    topology::Topology,
    Error,
};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Placement {
    pub origin: Point3,
    pub u: Point3,
    pub v: Point3,
}

impl Placement {
    /// The reference placement: the face lies on `z = 0` with its local axes on `x` and `y`.
    pub const IDENTITY: Self = Self {
        origin: Point3(0, 0, 0),
        u: Point3(1, 0, 0),
        v: Point3(0, 1, 0),
    };

    pub const fn normal(&self) -> Point3 {
        self.u.cross(self.v)
    }

    pub fn axis(&self, facing: Facing) -> Point3 {
        let Point2(x, y) = facing.versor();

        self.u * x + self.v * y
    }

    pub fn map(&self, Point2(x, y): Point2) -> Point3 {
        self.origin + self.u * x + self.v * y
    }

    /// Places the face glued to this one's `from` edge through its own `to` edge.
    ///
    /// The new face shares the edge and is rotated by 90° about it, towards the inside of
    /// the cube: its normal becomes our outward `from` direction, and its `to` heading
    /// points back along our normal.
    pub fn hinge(&self, from: Facing, to: Facing, side: i16) -> Self {
        let normal = self.axis(from);

        // walking the headings clockwise means rotating about the normal
        let mut axes = [Point3::default(); 4];
        let (mut facing, mut axis) = (to, self.normal());

        for _ in 0..axes.len() {
            axes[facing as usize] = axis;

            facing = facing.turn(Rotate::Right);
            axis = normal.cross(axis);
        }

        let frame = Self {
            origin: Point3::default(),
            u: axes[Facing::Right as usize],
            v: axes[Facing::Down as usize],
        };

        debug_assert_eq!(frame.normal(), normal);

        // slide the frame so that both edge midpoints coincide
        let origin = self.map(edge_midpoint(from, side)) - frame.map(edge_midpoint(to, side));

        Self { origin, ..frame }
    }
}

pub fn edge_midpoint(facing: Facing, side: i16) -> Point2 {
    let half = side / 2;

    Point2(half, half) + facing.versor() * half
}

/// Where the edge point of the `offset`-th cell along an edge lies, in doubled local
/// coordinates. Offsets grow along the edge's axis.
pub fn edge_point(facing: Facing, offset: i16, side: i16) -> Point2 {
    let mut p = edge_midpoint(facing, side);

    p[facing.edge_axis()] = 2 * offset + 1;

    p
}

pub fn edge_corners(facing: Facing, side: i16) -> [Point2; 2] {
    let mut corners = [edge_midpoint(facing, side); 2];

    let axis = facing.edge_axis();

    corners[0][axis] = 0;
    corners[1][axis] = side;

    corners
}

/// Local cell whose edge lies on `facing`, `offset` cells along it.
pub fn edge_cell(facing: Facing, offset: i16, n: i16) -> Point2 {
    let mut p = match facing {
        Facing::Right | Facing::Down => Point2(n - 1, n - 1),
        Facing::Left | Facing::Up => Point2(0, 0),
    };

    p[facing.edge_axis()] = offset;

    p
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Embedding {
    /// doubled face side
    side: i16,
    placements: [Placement; FaceId::COUNT],
}

impl Embedding {
    /// Folds the net breadth first from face 1, hinging faces as `topology` glues them.
    pub fn fold(net: &NetLayout, topology: &Topology) -> Result<Self, Error> {
        // the faces touching on the flat net must be glued the same way on the cube
        for face in FaceId::all() {
            for facing in Facing::iter() {
                let Some(neigh) = net.net_neighbour(face, facing) else {
                    continue;
                };

                let glued = topology.glued(face, facing);

                if glued != (neigh, facing.opposite()) {
                    return Err(Error::Topology(format!(
                        "face {face} touches face {neigh} on the net across {facing:?}, \
                         but the topology glues it to {}{}",
                        glued.0,
                        glued.1.letter()
                    )));
                }
            }
        }

        Self::breadth_first(2 * net.face_size(), |face, facing| {
            Some(topology.glued(face, facing))
        })
    }

    /// Folds the net along the edges shared on the flat net alone, which is enough to
    /// place every face of a valid net.
    pub fn from_net(net: &NetLayout) -> Result<Self, Error> {
        Self::breadth_first(2 * net.face_size(), |face, facing| {
            net.net_neighbour(face, facing)
                .map(|neigh| (neigh, facing.opposite()))
        })
    }

    fn breadth_first(
        side: i16,
        glued: impl Fn(FaceId, Facing) -> Option<(FaceId, Facing)>,
    ) -> Result<Self, Error> {
        let first = FaceId::FIRST;

        let mut placed: [Option<Placement>; FaceId::COUNT] = [None; FaceId::COUNT];
        placed[first.index()] = Some(Placement::IDENTITY);

        let mut queue = VecDeque::from([first]);

        while let Some(face) = queue.pop_front() {
            let parent = placed[face.index()].expect("queued faces are placed");

            for from in Facing::iter() {
                let Some((next, to)) = glued(face, from) else {
                    continue;
                };

                let candidate = parent.hinge(from, to, side);

                match placed[next.index()] {
                    None => {
                        log::trace!(
                            "face {next} hinged on {face}{}: origin {}, u {}, v {}",
                            from.letter(),
                            candidate.origin,
                            candidate.u,
                            candidate.v
                        );

                        placed[next.index()] = Some(candidate);
                        queue.push_back(next);
                    }
                    Some(existing) if existing == candidate => {}
                    Some(existing) => {
                        return Err(Error::Fold {
                            face: next,
                            reason: format!(
                                "reached from face {face} at origin {} with normal {}, \
                                 but already placed at origin {} with normal {}",
                                candidate.origin,
                                candidate.normal(),
                                existing.origin,
                                existing.normal()
                            ),
                        })
                    }
                }
            }
        }

        let mut placements = [Placement::IDENTITY; FaceId::COUNT];

        for (face, (dst, src)) in FaceId::all().zip(placements.iter_mut().zip(placed)) {
            *dst = src.ok_or_else(|| Error::Fold {
                face,
                reason: "not connected to face 1".to_string(),
            })?;
        }

        let normals = placements.iter().map(Placement::normal);

        if let Some((face, _)) = FaceId::all()
            .zip(normals.clone())
            .find(|(_, n)| normals.clone().filter(|m| m == n).count() > 1)
        {
            return Err(Error::Fold {
                face,
                reason: "overlaps another face".to_string(),
            });
        }

        log::debug!(
            "folded cube, normals {}",
            placements.iter().map(Placement::normal).format(", ")
        );

        Ok(Self { side, placements })
    }

    pub const fn placement(&self, face: FaceId) -> &Placement {
        &self.placements[face.index()]
    }

    pub const fn side(&self) -> i16 {
        self.side
    }

    pub fn edge_endpoints(&self, face: FaceId, facing: Facing) -> [Point3; 2] {
        edge_corners(facing, self.side).map(|p| self.placement(face).map(p))
    }

    pub fn edge_point3(&self, face: FaceId, facing: Facing, offset: i16) -> Point3 {
        self.placement(face)
            .map(edge_point(facing, offset, self.side))
    }

    pub fn cell_centre3(&self, face: FaceId, Point2(x, y): Point2) -> Point3 {
        self.placement(face).map(Point2(2 * x + 1, 2 * y + 1))
    }

    /// The other face edge lying on the same segment of the cube, if any.
    pub fn coincident_edge(&self, face: FaceId, facing: Facing) -> Option<(FaceId, Facing)> {
        let [a, b] = self.edge_endpoints(face, facing);

        FaceId::all()
            .filter(|&other| other != face)
            .cartesian_product(Facing::iter())
            .find(|&(other, edge)| {
                let [c, d] = self.edge_endpoints(other, edge);

                (a, b) == (c, d) || (a, b) == (d, c)
            })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{net::tests::EXAMPLE, topology::tests::EXAMPLE_TOPOLOGY};

    fn id(label: u8) -> FaceId {
        FaceId::new(label).unwrap()
    }

    #[test]
    fn hinge_folds_downwards() {
        let side = 8;
        let right = Placement::IDENTITY.hinge(Facing::Right, Facing::Left, side);

        assert_eq!(right.normal(), Point3(1, 0, 0));
        assert_eq!(right.v, Point3(0, 1, 0));
        assert_eq!(right.origin, Point3(side, 0, 0));

        // the shared edge maps onto the same points from both sides
        for offset in 0..4 {
            assert_eq!(
                Placement::IDENTITY.map(edge_point(Facing::Right, offset, side)),
                right.map(edge_point(Facing::Left, offset, side))
            );
        }

        // and the face hangs below the reference face, inside the cube
        assert_eq!(right.map(Point2(side, 0)), Point3(side, 0, -side));
    }

    #[test]
    fn hinging_back_is_identity() {
        for (from, to) in Facing::iter().cartesian_product(Facing::iter()) {
            let there = Placement::IDENTITY.hinge(from, to, 6);

            assert_eq!(there.hinge(to, from, 6), Placement::IDENTITY);
        }
    }

    #[test]
    fn edge_geometry() {
        assert_eq!(edge_midpoint(Facing::Up, 8), Point2(4, 0));
        assert_eq!(edge_point(Facing::Right, 2, 8), Point2(8, 5));
        assert_eq!(edge_corners(Facing::Down, 8), [Point2(0, 8), Point2(8, 8)]);
        assert_eq!(edge_cell(Facing::Right, 1, 4), Point2(3, 1));
        assert_eq!(edge_cell(Facing::Up, 2, 4), Point2(2, 0));
    }

    #[test]
    fn example_folds_into_a_closed_cube() {
        let net = NetLayout::parse(EXAMPLE).unwrap();
        let cube = Embedding::fold(&net, &EXAMPLE_TOPOLOGY.parse().unwrap()).unwrap();

        assert_eq!(cube, Embedding::from_net(&net).unwrap());

        // every edge is shared by exactly two faces
        for face in FaceId::all() {
            for facing in Facing::iter() {
                let (other, edge) = cube.coincident_edge(face, facing).unwrap();

                assert_eq!(cube.coincident_edge(other, edge), Some((face, facing)));
            }
        }

        // three faces in a straight line on the net end up opposite each other
        assert_eq!(cube.placement(id(1)).normal(), -cube.placement(id(5)).normal());
        assert_eq!(cube.placement(id(2)).normal(), -cube.placement(id(4)).normal());
        assert_eq!(cube.placement(id(3)).normal(), -cube.placement(id(6)).normal());
    }

    #[test]
    fn wrong_gluing_is_a_fold_error() {
        let net = NetLayout::parse(EXAMPLE).unwrap();

        // swap which edges of faces 1 and 6 are glued to faces 2 and 3
        let bad = EXAMPLE_TOPOLOGY
            .replace("1U 2U", "1U 6R")
            .replace("1R 6R", "1R 2U");

        let err = Embedding::fold(&net, &bad.parse().unwrap()).unwrap_err();

        assert!(matches!(err, Error::Fold { .. }), "{err}");
    }

    #[test]
    fn topology_must_agree_with_the_net() {
        let net = NetLayout::parse(EXAMPLE).unwrap();

        // 1D touches 4U on the net
        let bad = EXAMPLE_TOPOLOGY
            .replace("1D 4U", "1D 6R")
            .replace("1R 6R", "1R 4U");

        let err = Embedding::fold(&net, &bad.parse().unwrap()).unwrap_err();

        assert!(matches!(err, Error::Topology(_)), "{err}");
    }
}
