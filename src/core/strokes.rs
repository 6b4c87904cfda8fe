/// Handicap strokes (0 or 1) a player gets on a hole.
///
/// The half handicap is the nine-hole stroke budget, spent on the hardest-ranked holes first.
/// A fractional budget is rounded up, so 4.5 strokes cover ranks 1 through 5; a whole budget
/// covers exactly its own count. No hole ever gets a second stroke.
pub fn strokes_received(half_handicap: f64, hole_difficulty: u8) -> u8 {
    let rank = f64::from(hole_difficulty);
    let receives = if half_handicap.fract() != 0.0 {
        rank <= half_handicap.ceil()
    } else {
        rank <= half_handicap
    };
    u8::from(receives)
}
