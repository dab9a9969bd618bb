//! The unfolded cube: a grid of cells split into six square faces.

use std::{
    fmt::Display,
    ops::{Index, Range},
};

use itertools::Itertools;
use nom::{
    branch::alt,
    character::complete::{char, line_ending, multispace0},
    combinator::{all_consuming, value},
    multi::{many1, separated_list1},
    sequence::terminated,
    IResult,
};

use crate::{
    geom::{Facing, Point2},
    Error,
};

#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Material {
    #[default]
    Void,
    Open,
    Wall,
}

impl Material {
    pub const fn symbol(self) -> char {
        use Material::*;

        match self {
            Void => ' ',
            Open => '.',
            Wall => '#',
        }
    }
}

impl Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.symbol().fmt(f)
    }
}

/// One of the six faces, labelled `1..=6` in row-major order of their top-left corners.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct FaceId(u8);

impl FaceId {
    pub const COUNT: usize = 6;

    pub const FIRST: Self = Self(0);

    pub fn new(label: u8) -> Option<Self> {
        label
            .checked_sub(1)
            .filter(|&i| (i as usize) < Self::COUNT)
            .map(Self)
    }

    pub fn all() -> impl Iterator<Item = Self> + Clone {
        (0..Self::COUNT as u8).map(Self)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn label(self) -> u8 {
        self.0 + 1
    }
}

impl Display for FaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.label().fmt(f)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Face {
    pub id: FaceId,
    /// top-left cell, in net coordinates
    pub origin: Point2,
    cols: Range<i16>,
    rows: Range<i16>,
}

impl Face {
    fn new(id: FaceId, origin: Point2, side: i16) -> Self {
        Self {
            id,
            origin,
            cols: origin.0..origin.0 + side,
            rows: origin.1..origin.1 + side,
        }
    }

    pub fn contains(&self, Point2(ref x, ref y): Point2) -> bool {
        self.cols.contains(x) && self.rows.contains(y)
    }
}

#[derive(Clone, Debug)]
struct Grid {
    grid: Vec<Vec<Material>>,
    dim: (usize, usize),
}

impl Grid {
    fn new(mut grid: Vec<Vec<Material>>) -> Self {
        let dim_x = grid.iter().map(Vec::len).max().unwrap_or_default();

        for row in &mut grid {
            row.resize(dim_x, Material::Void);
        }

        let dim_y = grid.len();

        Self {
            grid,
            dim: (dim_x, dim_y),
        }
    }

    const fn dims(&self) -> (usize, usize) {
        self.dim
    }

    fn get(&self, Point2(x, y): Point2) -> Material {
        usize::try_from(x)
            .ok()
            .zip(usize::try_from(y).ok())
            .and_then(|(x, y)| self.grid.get(y)?.get(x).copied())
            .unwrap_or_default()
    }

    fn cells(&self) -> impl Iterator<Item = Material> + '_ {
        self.grid.iter().flatten().copied()
    }
}

impl Index<Point2> for Grid {
    type Output = Material;

    fn index(&self, Point2(i, j): Point2) -> &Self::Output {
        &self.grid[j as usize][i as usize]
    }
}

#[derive(Clone, Debug)]
pub struct NetLayout {
    grid: Grid,
    side: i16,
    faces: Vec<Face>,
}

impl NetLayout {
    pub fn new(rows: Vec<Vec<Material>>) -> Result<Self, Error> {
        let grid = Grid::new(rows);
        let (dim_x, dim_y) = grid.dims();

        if dim_x == 0 || dim_y == 0 {
            return Err(Error::EmptyNet);
        }

        if i16::try_from(dim_x).and(i16::try_from(dim_y)).is_err() {
            return Err(Error::NetTooLarge(dim_x, dim_y));
        }

        let cells = grid.cells().filter(|&m| m != Material::Void).count();

        if cells == 0 {
            return Err(Error::EmptyNet);
        }

        // six squares of side n cover exactly 6n² cells
        let area = cells / FaceId::COUNT;
        let side = (1..=area)
            .find(|n| n * n >= area)
            .filter(|n| n * n * FaceId::COUNT == cells)
            .ok_or(Error::FaceCount { cells })?;

        let mut faces = Vec::with_capacity(FaceId::COUNT);

        // blocks are laid out from the top-left corner of the net's bounding box, not the text's
        let (x0, y0) = (0..dim_y)
            .cartesian_product(0..dim_x)
            .filter(|&(j, i)| grid.get(Point2(i as i16, j as i16)) != Material::Void)
            .fold((dim_x, dim_y), |(x0, y0), (j, i)| (x0.min(i), y0.min(j)));

        // tile the net in side x side blocks: each one is either a face or empty
        let blocks =
            (0..(dim_y - y0).div_ceil(side)).cartesian_product(0..(dim_x - x0).div_ceil(side));

        for (by, bx) in blocks {
            let (x, y) = (x0 + bx * side, y0 + by * side);

            let filled = (y..y + side)
                .cartesian_product(x..x + side)
                .filter(|&(j, i)| {
                    let p = Point2(i as i16, j as i16);

                    grid.get(p) != Material::Void
                })
                .count();

            if filled == 0 {
                continue;
            }

            if filled != side * side {
                return Err(Error::RaggedFace { x, y, n: side });
            }

            let id = FaceId(faces.len() as u8);

            faces.push(Face::new(id, Point2(x as i16, y as i16), side as i16));
        }

        // the cell count already pins this down, as every block is full or empty
        debug_assert_eq!(faces.len(), FaceId::COUNT);

        log::debug!(
            "net is {dim_x}x{dim_y}, face side {side}, faces at {}",
            faces.iter().map(|f| f.origin).format(", ")
        );

        Ok(Self {
            grid,
            side: side as i16,
            faces,
        })
    }

    pub fn parse(input: &str) -> Result<Self, Error> {
        let (_, rows) = all_consuming(terminated(rows, multispace0))(input)?;

        Self::new(rows)
    }

    pub const fn face_size(&self) -> i16 {
        self.side
    }

    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.index()]
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face_at(&self, p: Point2) -> Option<FaceId> {
        self.faces.iter().find(|f| f.contains(p)).map(|f| f.id)
    }

    pub fn material(&self, p: Point2) -> Material {
        self.grid.get(p)
    }

    pub fn contains_local(&self, local: Point2) -> bool {
        let range = 0..self.side;

        range.contains(&local.0) && range.contains(&local.1)
    }

    pub fn to_global(&self, face: FaceId, local: Point2) -> Point2 {
        self.face(face).origin + local
    }

    /// Classifies a cell given in face-local coordinates.
    ///
    /// Panics if `local` lies outside the face.
    pub fn classify(&self, face: FaceId, local: Point2) -> Material {
        assert!(
            self.contains_local(local),
            "{local} is outside face {face}"
        );

        self.grid[self.to_global(face, local)]
    }

    pub fn net_neighbour(&self, face: FaceId, facing: Facing) -> Option<FaceId> {
        self.face_at(self.face(face).origin + facing.versor() * self.side)
    }

    pub fn first_open(&self, face: FaceId) -> Option<Point2> {
        (0..self.side)
            .cartesian_product(0..self.side)
            .map(|(y, x)| Point2(x, y))
            .find(|&p| self.classify(face, p) == Material::Open)
    }

    /// Draws the net one character per cell, trimming trailing void.
    pub fn render(&self, mut cell: impl FnMut(Point2, Material) -> char) -> String {
        let (dim_x, dim_y) = self.grid.dims();

        let mut out = String::new();

        for j in 0..dim_y {
            let line: String = (0..dim_x)
                .map(|i| {
                    let p = Point2(i as i16, j as i16);

                    cell(p, self.grid[p])
                })
                .collect();

            out.push_str(line.trim_end());
            out.push('\n');
        }

        out
    }

    pub fn face_map(&self) -> String {
        self.render(|p, _| {
            self.face_at(p)
                .map(|f| char::from(b'0' + f.label()))
                .unwrap_or(' ')
        })
    }
}

impl Display for NetLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.render(|_, m| m.symbol()).fmt(f)
    }
}

fn material(input: &str) -> IResult<&str, Material> {
    use Material::*;

    alt((
        value(Void, char(' ')),
        value(Open, char('.')),
        value(Wall, char('#')),
    ))(input)
}

pub(crate) fn rows(input: &str) -> IResult<&str, Vec<Vec<Material>>> {
    separated_list1(line_ending, many1(material))(input)
}
