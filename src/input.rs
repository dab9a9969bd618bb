use nom::{
    character::complete::{line_ending, multispace0},
    combinator::all_consuming,
    sequence::{pair, separated_pair, terminated},
};

use crate::{
    net::{self, NetLayout},
    walk::{self, Instruction},
    Error,
};

#[derive(Clone, Debug)]
pub struct Puzzle {
    pub net: NetLayout,
    pub instructions: Vec<Instruction>,
}

impl Puzzle {
    pub fn parse(input: &str) -> Result<Self, Error> {
        let (_, (rows, instructions)) = all_consuming(terminated(
            separated_pair(
                net::rows,
                pair(line_ending, line_ending),
                walk::instructions,
            ),
            multispace0,
        ))(input)?;

        Ok(Self {
            net: NetLayout::new(rows)?,
            instructions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geom::Rotate, net::tests::EXAMPLE};

    #[test]
    fn splits_net_and_path() {
        let input = format!("{EXAMPLE}\n10R5L5\n");

        let Puzzle { net, instructions } = Puzzle::parse(&input).unwrap();

        assert_eq!(net.face_size(), 4);
        assert_eq!(instructions.len(), 5);
        assert_eq!(instructions[1], Instruction::Turn(Rotate::Right));
    }

    #[test]
    fn rejects_unknown_tokens() {
        let input = format!("{EXAMPLE}\n10R5F5\n");

        assert!(matches!(Puzzle::parse(&input), Err(Error::Parse(_))));
    }

    #[test]
    fn requires_the_blank_line() {
        let input = format!("{EXAMPLE}10R5L5\n");

        assert!(Puzzle::parse(&input).is_err());
    }
}
