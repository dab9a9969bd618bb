use crate::{geom::Point2, net::NetLayout, walk::WalkState};

/// `1000 * row + 4 * column + facing`, rows and columns counted from 1 on the whole net.
pub fn password(net: &NetLayout, state: &WalkState) -> usize {
    let Point2(x, y) = net.to_global(state.face, state.pos);

    let (x, y, facing) = (x as usize + 1, y as usize + 1, state.facing as usize);

    1000 * y + 4 * x + facing
}
