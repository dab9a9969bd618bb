use std::{
    fmt::Display,
    num::TryFromIntError,
    ops::{Add, AddAssign, Index, IndexMut, Mul, Neg, Sub},
};

use num::FromPrimitive;
use num_derive::FromPrimitive;
use strum::{EnumCount, EnumIter, IntoEnumIterator};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(i8)]
pub enum Rotate {
    Left = -1,
    Right = 1,
}

/// Heading on a face's local grid. The discriminants are the values used by the password.
#[repr(u8)]
#[derive(Clone, Copy, Debug, EnumCount, EnumIter, Eq, FromPrimitive, Hash, PartialEq)]
#[num_traits = "num"]
pub enum Facing {
    Right = 0,
    Down = 1,
    Left = 2,
    Up = 3,
}

impl Facing {
    /// The axis running along the edge a walker crosses when leaving a face with this facing.
    pub const fn edge_axis(self) -> Axis {
        use Axis::*;
        use Facing::*;

        match self {
            Up | Down => X,
            Right | Left => Y,
        }
    }

    pub const fn opposite(self) -> Self {
        use Facing::*;

        match self {
            Up => Down,
            Right => Left,
            Down => Up,
            Left => Right,
        }
    }

    pub fn turn(self, rot: Rotate) -> Self {
        Self::from_isize((self as isize + rot as isize).rem_euclid(Self::COUNT as isize))
            .expect("rem_euclid keeps the index in range")
    }

    pub const fn versor(self) -> Point2 {
        use Facing::*;

        match self {
            Up => Point2(0, -1),
            Right => Point2(1, 0),
            Down => Point2(0, 1),
            Left => Point2(-1, 0),
        }
    }

    pub const fn letter(self) -> char {
        use Facing::*;

        match self {
            Up => 'U',
            Right => 'R',
            Down => 'D',
            Left => 'L',
        }
    }

    pub const fn arrow(self) -> char {
        use Facing::*;

        match self {
            Right => '>',
            Down => 'v',
            Left => '<',
            Up => '^',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        Self::iter().find(|f| f.letter() == c)
    }
}

impl Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.arrow().fmt(f)
    }
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Axis {
    X,
    Y,
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Point2(pub i16, pub i16);

impl Add for Point2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(
            self.0.checked_add(rhs.0).unwrap(),
            self.1.checked_add(rhs.1).unwrap(),
        )
    }
}

impl AddAssign<Facing> for Point2 {
    fn add_assign(&mut self, rhs: Facing) {
        *self = *self + rhs.versor()
    }
}

impl Add<Facing> for Point2 {
    type Output = Self;

    fn add(self, rhs: Facing) -> Self::Output {
        self + rhs.versor()
    }
}

impl Sub for Point2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(
            self.0.checked_sub(rhs.0).unwrap(),
            self.1.checked_sub(rhs.1).unwrap(),
        )
    }
}

impl Mul<i16> for Point2 {
    type Output = Self;

    fn mul(self, rhs: i16) -> Self::Output {
        Self(
            self.0.checked_mul(rhs).unwrap(),
            self.1.checked_mul(rhs).unwrap(),
        )
    }
}

impl Index<Axis> for Point2 {
    type Output = i16;

    fn index(&self, index: Axis) -> &Self::Output {
        use Axis::*;

        match index {
            X => &self.0,
            Y => &self.1,
        }
    }
}

impl IndexMut<Axis> for Point2 {
    fn index_mut(&mut self, index: Axis) -> &mut Self::Output {
        use Axis::*;

        match index {
            X => &mut self.0,
            Y => &mut self.1,
        }
    }
}

impl Display for Point2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self(x, y) = self;

        write!(f, "({x}, {y})")
    }
}

impl TryFrom<(usize, usize)> for Point2 {
    type Error = TryFromIntError;

    fn try_from((x, y): (usize, usize)) -> Result<Self, Self::Error> {
        Ok(Self(x.try_into()?, y.try_into()?))
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Point3(pub i16, pub i16, pub i16);

impl Point3 {
    pub const fn cross(self, rhs: Self) -> Self {
        let (Self(a1, a2, a3), Self(b1, b2, b3)) = (self, rhs);

        Self(a2 * b3 - a3 * b2, a3 * b1 - a1 * b3, a1 * b2 - a2 * b1)
    }
}

impl Display for Point3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self(x, y, z) = self;

        write!(f, "({x}, {y}, {z})")
    }
}

impl Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Self) -> Self::Output {
        self.0
            .checked_add(rhs.0)
            .zip(self.1.checked_add(rhs.1))
            .zip(self.2.checked_add(rhs.2))
            .map(|((x, y), z)| Self(x, y, z))
            .expect("integer overflow")
    }
}

impl Sub for Point3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + -rhs
    }
}

impl Neg for Point3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        let Self(x, y, z) = self;

        Self(-x, -y, -z)
    }
}

impl Mul<i16> for Point3 {
    type Output = Point3;

    fn mul(self, rhs: i16) -> Self::Output {
        let Self(x, y, z) = self;

        x.checked_mul(rhs)
            .zip(y.checked_mul(rhs))
            .zip(z.checked_mul(rhs))
            .map(|((x, y), z)| Self(x, y, z))
            .expect("integer overflow")
    }
}
