//! Recover the checksum of Toyota TPMS (tire pressure) frames.
//!
//! Each frame is nine bytes, the last one a checksum over some span of
//! the others.  The search is told spans cover at least five bytes.
//! Run with RUST_LOG=debug to see the search progress.
use checksum_cracker::search::{Search, SearchConfiguration};
use checksum_cracker::SweepOrder;

const FRAMES: [&[u8]; 3] = [
    b"\xD5\x15\x7B\x93\xCE\x9C\x00\x62\x3D",
    b"\xD9\xB6\x22\x85\xD5\x9C\x80\x54\x8A",
    b"\xD3\xC7\x1F\xD3\xDF\x1E\x00\x41\x96",
];

const MINLEN: usize = 5;

fn main() {
    env_logger::init();

    for order in [SweepOrder::Legacy, SweepOrder::FamilyFirst] {
        let search = Search::new(SearchConfiguration::new(MINLEN, Some(order)));

        println!("Sweep order: {:?}", order);
        match search.run(&FRAMES) {
            Ok(Some(found)) => {
                println!("{}", found);
                if let Some(polynomial) = found.polynomial() {
                    println!("polynomial: {}", polynomial);
                }
                match found.preset() {
                    Some(preset) => println!("known as: {}", preset.name),
                    None => println!("known as: no catalogued CRC-8"),
                }
            }
            Ok(None) => println!("No match found"),
            Err(e) => {
                eprintln!("Invalid frames: {}", e);
                std::process::exit(1);
            }
        }
        println!();
    }
}
