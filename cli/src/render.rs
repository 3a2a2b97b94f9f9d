use circuit_escape_core::*;
use std::fmt::Write as _;
use std::io::Write as _;

/// Draws frames as plain text, printing only when the picture changes.
#[derive(Debug, Default)]
pub struct TextRenderer {
    last_frame: String,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for TextRenderer {
    fn render_frame(&mut self, view: &FrameView<'_>) {
        let frame = draw(view);
        if frame == self.last_frame {
            return;
        }

        let mut stdout = std::io::stdout().lock();
        if let Err(err) = writeln!(stdout, "{}", frame) {
            log::warn!("Could not draw frame: {}", err);
        }
        self.last_frame = frame;
    }
}

pub fn draw(view: &FrameView<'_>) -> String {
    let mut out = String::new();
    match view.state {
        GameState::MainMenu => draw_menu(&mut out, view.menu),
        GameState::LevelSelection => draw_level_select(&mut out, view.level_select),
        GameState::Exploration => {
            draw_map(&mut out, view);
            draw_effects(&mut out, view.camera, view.effects);
        }
        // the map is left out so each typed character only redraws one line
        GameState::Dialogue => {
            draw_dialogue(&mut out, view.dialogue);
            draw_effects(&mut out, view.camera, view.effects);
        }
        GameState::Puzzle => {
            draw_puzzle(&mut out, view.puzzle);
            draw_effects(&mut out, view.camera, view.effects);
        }
        GameState::Victory => {
            let _ = writeln!(out, "*** {} ***", VICTORY_TEXT);
            let _ = writeln!(out, "(confirm to exit)");
        }
    }
    out
}

fn draw_menu(out: &mut String, selected: MenuItem) {
    let _ = writeln!(out, "== CIRCUIT ESCAPE ==");
    for item in MenuItem::ALL {
        let marker = if item == selected { '>' } else { ' ' };
        let _ = writeln!(out, "{} {}", marker, item.label());
    }
}

fn draw_level_select(out: &mut String, select: LevelSelect) {
    let _ = writeln!(out, "== SELECT LEVEL ==");
    for level in 1..=LEVEL_COUNT {
        let marker = if level == select.selected() { '>' } else { ' ' };
        let lock = if LevelSelect::is_unlocked(level) { "" } else { " [locked]" };
        let _ = writeln!(out, "{} Level {}{}", marker, level, lock);
    }
}

fn map_glyph(view: &FrameView<'_>, coords: Coord2, tile: Tile) -> char {
    if coords == view.player.position() {
        return '@';
    }
    if coords == view.level.npc {
        return 'P';
    }
    if coords == view.level.terminal {
        return 'T';
    }
    match view.circuits.element_at(coords) {
        Some(element) if element.is_switch() => {
            if element.is_active() { '/' } else { '\\' }
        }
        Some(element) => {
            if element.is_active() { '_' } else { '+' }
        }
        None if tile.is_solid() => '#',
        None => '.',
    }
}

fn draw_map(out: &mut String, view: &FrameView<'_>) {
    for (y, row) in view.level.map.rows().enumerate() {
        let line: String = row
            .enumerate()
            .map(|(x, tile)| map_glyph(view, (x as Coord, y as Coord), tile))
            .collect();
        let _ = writeln!(out, "{}", line);
    }
}

fn draw_dialogue(out: &mut String, dialogue: &Dialogue) {
    if !dialogue.is_active() {
        return;
    }
    let prompt = if !dialogue.is_revealed() {
        "..."
    } else if dialogue.has_more() {
        ">>"
    } else {
        "[confirm]"
    };
    let _ = writeln!(out, "{}: {} {}", dialogue.speaker(), dialogue.visible_text(), prompt);
}

/// One line per running effect; nothing when the screen is calm.
fn draw_effects(out: &mut String, camera: (i32, i32), effects: &Effects) {
    if effects.is_shaking() {
        let (dx, dy) = effects.shake_offset();
        let _ = writeln!(
            out,
            "shake: camera ({}, {}) offset ({}, {})",
            camera.0, camera.1, dx, dy
        );
    }
    if let Some((color, alpha)) = effects.flash() {
        let _ = writeln!(
            out,
            "flash: rgb({}, {}, {}) at {:.1}",
            color.r, color.g, color.b, alpha
        );
    }
    let smoke = effects.particles().len();
    if smoke > 0 {
        let _ = writeln!(out, "smoke: {} puffs", smoke);
    }
}

fn cell_glyph(cell: &PuzzleCell) -> char {
    if cell.is_burning() {
        return '*';
    }
    match cell.kind() {
        ComponentKind::Empty => '.',
        ComponentKind::Wire => '-',
        ComponentKind::Resistor => 'R',
        ComponentKind::Led if cell.rotation() == Rotation::Deg180 => 'v',
        ComponentKind::Led => 'L',
        ComponentKind::Battery => 'B',
        ComponentKind::Switch => 'S',
    }
}

fn draw_puzzle(out: &mut String, puzzle: &PuzzleController) {
    let board = puzzle.board();
    let (width, height) = board.size();
    let _ = writeln!(out, "== PUZZLE {} ==", board.puzzle_id());
    for y in 0..height {
        let mut line = String::new();
        for x in 0..width {
            let glyph = cell_glyph(&board[(x, y)]);
            if (x, y) == board.cursor() {
                let _ = write!(line, "[{}]", glyph);
            } else {
                let _ = write!(line, " {} ", glyph);
            }
        }
        let _ = writeln!(out, "{}", line);
    }

    let inventory = board.inventory();
    let items: Vec<String> = inventory
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let marker = if i == inventory.selected_index() { ">" } else { "" };
            format!("{}{} x{}", marker, item.kind.label(), item.count)
        })
        .collect();
    let _ = writeln!(out, "pieces: {}", items.join("  "));

    if let Some(result) = puzzle.result_banner() {
        let _ = writeln!(out, "result: {:?}", result);
    }
    if board.has_burning() {
        let _ = writeln!(out, "burning: pulse {:.1}", puzzle.burn_pulse());
    }
}
