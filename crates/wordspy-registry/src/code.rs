//! Join-code generation.

use rand::Rng;

use wordspy_protocol::RoomCode;

/// Code alphabet: uppercase letters and digits minus the glyph pairs
/// people misread over voice chat (`I`/`1`, `O`/`0`).
const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

const CODE_LEN: usize = 6;

/// Draws a random six-character join code. Uniqueness against live rooms
/// is the registry's job.
pub fn random_code(rng: &mut impl Rng) -> RoomCode {
    let code: String = (0..CODE_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect();
    RoomCode(code)
}
