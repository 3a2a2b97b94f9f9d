use crate::*;

/// Selects `kind` in the inventory and places it at `coords`.
pub(crate) fn place_kind(board: &mut PuzzleBoard, kind: ComponentKind, coords: Coord2) {
    for _ in 0..board.inventory().items().len() {
        if board.inventory().selected().is_some_and(|item| item.kind == kind) {
            break;
        }
        board.select_next();
    }

    assert_eq!(
        board.place(coords).unwrap(),
        EditOutcome::Changed,
        "could not place {:?} at {:?}",
        kind,
        coords
    );
}

#[derive(Debug, Default)]
pub(crate) struct RecordingAudio {
    pub sounds: Vec<Sound>,
    pub music: Vec<Music>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, sound: Sound) {
        self.sounds.push(sound);
    }

    fn play_music(&mut self, music: Music) {
        self.music.push(music);
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingIndicator {
    pub colors: Vec<IndicatorColor>,
    pub patterns: Vec<FeedbackPattern>,
}

impl Indicator for RecordingIndicator {
    fn set_color(&mut self, color: IndicatorColor) {
        self.colors.push(color);
    }

    fn play_pattern(&mut self, pattern: FeedbackPattern) {
        self.patterns.push(pattern);
    }
}
