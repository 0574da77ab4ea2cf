//! Plain-text map rendering.

use delve_core::Point;
use delve_rl::{Tile, TileGrid, TileKind};

fn rune(t: &Tile) -> char {
    match (t.kind, t.visible) {
        (TileKind::Wall, true) => '#',
        (TileKind::Wall, false) => '%',
        (TileKind::Floor, true) => '.',
        (TileKind::Floor, false) => ':',
        (TileKind::Water, _) => '~',
        (TileKind::Lava, _) => '=',
        (TileKind::Door, _) => '+',
        (TileKind::StairsDown, _) => '>',
        (TileKind::StairsUp, _) => '<',
    }
}

/// Draw the grid as rows of characters separated by newlines.
///
/// Unexplored cells are blank and remembered walls and floors use dimmer
/// runes. Agents only show up on currently visible cells; the observer is
/// always drawn.
pub fn render_ascii(grid: &TileGrid, observer: Point, agents: &[Point]) -> String {
    let mut out = String::with_capacity(((grid.width() + 1) * grid.height()) as usize);
    for (p, t) in grid.iter() {
        if p.x == 0 && p.y > 0 {
            out.push('\n');
        }
        let c = if p == observer {
            '@'
        } else if t.visible && agents.contains(&p) {
            'a'
        } else if t.explored {
            rune(t)
        } else {
            ' '
        };
        out.push(c);
    }
    out
}
