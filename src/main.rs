use std::{error::Error, fs, path::PathBuf};

use clap::Parser;
use cubewalk::{
    password, CoordinateBridge, Embedding, FaceId, Puzzle, SurfaceWalker, Topology,
};

/// Walks a path over the surface of a cube drawn as a flat net
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File with the net and the path to walk
    file: PathBuf,

    /// Which face edges are glued together; read off the net when missing
    #[arg(short, long)]
    topology: Option<PathBuf>,

    /// Face to start walking from
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=6))]
    start_face: u8,

    /// Print the face labels and the walked path
    #[arg(short, long)]
    dump: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let Args {
        file,
        topology,
        start_face,
        dump,
    } = Args::parse();

    let Puzzle { net, instructions } = Puzzle::parse(&fs::read_to_string(file)?)?;

    let topology = match topology {
        Some(path) => {
            log::info!("reading topology from {}", path.display());

            Topology::parse(&fs::read_to_string(path)?)?
        }
        None => {
            log::info!("no topology given, folding the net along its shared edges");

            Topology::infer(&net)?
        }
    };

    let cube = Embedding::fold(&net, &topology)?;
    let bridge = CoordinateBridge::new(&net, &cube)?;
    let walker = SurfaceWalker::new(&net, &bridge);

    let face = FaceId::new(start_face).ok_or("start face out of range")?;
    let (end, trail) = walker.trace(walker.start(face)?, &instructions);

    if dump {
        print!("{}\n{topology}\n", net.face_map());
        print!("{}", walker.render_trail(&trail));
    }

    println!(
        "face {} at {} facing {:?}, password = {}",
        end.face,
        walker.global(&end),
        end.facing,
        password(&net, &end)
    );

    Ok(())
}
